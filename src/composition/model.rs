use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{
    animation::ease::Ease,
    foundation::color::Color,
    foundation::core::Fps,
    foundation::error::{SlidecastError, SlidecastResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One visual unit of a slideshow: an image with an optional text overlay.
pub struct Slide {
    /// Unique, stable identifier.
    pub id: String,
    /// Opaque pixel source reference (path, URL, or data URL) resolved by the renderer.
    #[serde(alias = "image_url", default)]
    pub image_source: String,
    /// Overlay text; empty means no overlay.
    #[serde(default)]
    pub text: String,
    /// Word of `text` rendered in the highlight color (case-insensitive exact token match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_word: Option<String>,
    /// Time this slide occupies before transition overlap is subtracted.
    #[serde(alias = "duration")]
    pub duration_secs: f64,
}

impl Slide {
    /// Slide with an image and a duration, no text.
    pub fn new(id: impl Into<String>, image_source: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            id: id.into(),
            image_source: image_source.into(),
            text: String::new(),
            highlight_word: None,
            duration_secs,
        }
    }

    /// Set the overlay text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the highlighted word.
    pub fn with_highlight(mut self, word: impl Into<String>) -> Self {
        self.highlight_word = Some(word.into());
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Transition type tag between adjacent slides.
///
/// Every kind other than [`TransitionKind::None`] is evaluated as a cross-opacity transition. The
/// tag is carried through to the renderer unchanged.
pub enum TransitionKind {
    /// Hard cut; slides do not overlap.
    None,
    /// Cross-fade.
    #[default]
    Fade,
    /// Slide-in tag (evaluated as cross-fade).
    Slide,
    /// Wipe tag (evaluated as cross-fade).
    Wipe,
}

impl TransitionKind {
    /// `true` for every kind that overlaps adjacent slides.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Composition-wide transition settings.
pub struct TransitionPolicy {
    /// Transition type.
    #[serde(alias = "type", default)]
    pub kind: TransitionKind,
    /// Overlap between adjacent slides in seconds.
    #[serde(default = "default_transition_secs")]
    pub duration_secs: f64,
    /// Easing applied to the entry and exit opacity ramps.
    #[serde(default)]
    pub ease: Ease,
}

fn default_transition_secs() -> f64 {
    0.3
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            kind: TransitionKind::Fade,
            duration_secs: default_transition_secs(),
            ease: Ease::Linear,
        }
    }
}

impl TransitionPolicy {
    /// Hard cuts between slides.
    pub fn none() -> Self {
        Self {
            kind: TransitionKind::None,
            duration_secs: 0.0,
            ease: Ease::Linear,
        }
    }

    /// Linear transition of the given kind and length.
    pub fn new(kind: TransitionKind, duration_secs: f64) -> Self {
        Self {
            kind,
            duration_secs,
            ease: Ease::Linear,
        }
    }

    /// Reject negative or non-finite durations.
    pub fn validate(&self) -> SlidecastResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(SlidecastError::validation(format!(
                "transition duration must be finite and >= 0, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }

    /// Transition length in frames, before any per-boundary clamping.
    pub fn frames(&self, fps: Fps) -> u64 {
        fps.secs_to_frames(self.duration_secs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Text paint treatment.
pub enum FontStyle {
    /// Solid fill with a soft drop shadow.
    #[default]
    Bold,
    /// Stroke only, transparent fill.
    Outline,
    /// Solid fill with a hard two-layer offset shadow.
    Shadow,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// What the timeline builder does when a transition does not fit between two slides.
pub enum OverlapPolicy {
    /// Shrink the overlap to one frame less than the shorter neighbour and log a warning.
    #[default]
    Clamp,
    /// Fail with [`SlidecastError::InvalidTransitionOverlap`].
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Composition-wide style, immutable during a render pass.
pub struct StyleConfig {
    /// Canvas color behind images.
    #[serde(default = "default_background")]
    pub background_color: Color,
    /// Regular text color.
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    /// Accent color for the highlighted word.
    #[serde(default = "default_highlight")]
    pub highlight_color: Color,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size_px: u32,
    /// Paint treatment.
    #[serde(default)]
    pub font_style: FontStyle,
    /// Frame rate driving every time-to-frame conversion.
    #[serde(default)]
    pub fps: Fps,
}

fn default_background() -> Color {
    Color::BLACK
}

fn default_text_color() -> Color {
    Color::WHITE
}

fn default_highlight() -> Color {
    Color::rgb(0xff, 0x00, 0x50)
}

fn default_font_size() -> u32 {
    64
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: default_background(),
            text_color: default_text_color(),
            highlight_color: default_highlight(),
            font_size_px: default_font_size(),
            font_style: FontStyle::Bold,
            fps: Fps::DEFAULT,
        }
    }
}

impl StyleConfig {
    /// Reject a zero font size.
    pub fn validate(&self) -> SlidecastResult<()> {
        if self.font_size_px == 0 {
            return Err(SlidecastError::validation("font_size_px must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Serialized slideshow project: the immutable snapshot handed to the engine per render.
pub struct SlideshowProject {
    /// Ordered slides.
    #[serde(default)]
    pub slides: Vec<Slide>,
    /// Transition between adjacent slides.
    #[serde(default)]
    pub transition: TransitionPolicy,
    /// Global style.
    #[serde(default)]
    pub style: StyleConfig,
    /// Handling of transitions that do not fit between two slides.
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

impl SlideshowProject {
    /// Parse a project from JSON text without validating it.
    pub fn from_json_str(s: &str) -> SlidecastResult<Self> {
        serde_json::from_str(s).map_err(|e| SlidecastError::serde(e.to_string()))
    }

    /// Parse a project from a JSON reader without validating it.
    pub fn from_reader(r: impl Read) -> SlidecastResult<Self> {
        serde_json::from_reader(r).map_err(|e| SlidecastError::serde(e.to_string()))
    }

    /// Open and parse a project JSON file without validating it.
    pub fn from_path(path: impl AsRef<Path>) -> SlidecastResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SlidecastError::validation(format!("open project JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> SlidecastResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SlidecastError::serde(e.to_string()))
    }

    /// Validate style, transition, and every slide.
    pub fn validate(&self) -> SlidecastResult<()> {
        self.style.validate()?;
        self.transition.validate()?;
        validate_slides(&self.slides)
    }
}

/// Check every slide has a positive finite duration and a unique, non-empty id.
pub fn validate_slides(slides: &[Slide]) -> SlidecastResult<()> {
    let mut seen = BTreeSet::new();
    for (index, slide) in slides.iter().enumerate() {
        if !slide.duration_secs.is_finite() || slide.duration_secs <= 0.0 {
            return Err(SlidecastError::InvalidDuration {
                index,
                id: slide.id.clone(),
                secs: slide.duration_secs,
            });
        }
        if slide.id.trim().is_empty() {
            return Err(SlidecastError::validation(format!(
                "slide #{index} has an empty id"
            )));
        }
        if !seen.insert(slide.id.as_str()) {
            return Err(SlidecastError::validation(format!(
                "duplicate slide id '{}'",
                slide.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
