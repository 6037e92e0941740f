use crate::{
    composition::model::{
        FontStyle, OverlapPolicy, Slide, SlideshowProject, StyleConfig, TransitionPolicy,
    },
    foundation::color::Color,
    foundation::core::Fps,
    foundation::error::{SlidecastError, SlidecastResult},
};

/// Programmatic builder for a [`SlideshowProject`].
///
/// `build()` validates the assembled project, so a built project is always safe to hand to
/// [`crate::build_timeline`].
pub struct SlideshowBuilder {
    slides: Vec<Slide>,
    transition: TransitionPolicy,
    style: StyleConfig,
    overlap_policy: OverlapPolicy,
}

impl SlideshowBuilder {
    /// Start from the editor defaults (30 fps, 0.3s fade, bold white text).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            transition: TransitionPolicy::default(),
            style: StyleConfig::default(),
            overlap_policy: OverlapPolicy::default(),
        }
    }

    /// Append a slide, rejecting a duplicate id early.
    pub fn slide(mut self, slide: Slide) -> SlidecastResult<Self> {
        if self.slides.iter().any(|s| s.id == slide.id) {
            return Err(SlidecastError::validation(format!(
                "duplicate slide id '{}'",
                slide.id
            )));
        }
        self.slides.push(slide);
        Ok(self)
    }

    /// Set the transition policy.
    pub fn transition(mut self, transition: TransitionPolicy) -> Self {
        self.transition = transition;
        self
    }

    /// Replace the whole style block.
    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Set the frame rate.
    pub fn fps(mut self, fps: Fps) -> Self {
        self.style.fps = fps;
        self
    }

    /// Set the font style.
    pub fn font_style(mut self, font_style: FontStyle) -> Self {
        self.style.font_style = font_style;
        self
    }

    /// Set text and highlight colors.
    pub fn colors(mut self, text: Color, highlight: Color) -> Self {
        self.style.text_color = text;
        self.style.highlight_color = highlight;
        self
    }

    /// Set the overlap policy.
    pub fn overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }

    /// Assemble and validate the project.
    pub fn build(self) -> SlidecastResult<SlideshowProject> {
        let project = SlideshowProject {
            slides: self.slides,
            transition: self.transition,
            style: self.style,
            overlap_policy: self.overlap_policy,
        };
        project.validate()?;
        Ok(project)
    }
}

impl Default for SlideshowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
