use crate::{
    animation::interp::{interpolate_clamped, progress},
    composition::model::{Slide, StyleConfig, TransitionKind, TransitionPolicy},
    eval::paint::TextPaint,
    timeline::builder::TimelineWindow,
};

/// Zoom reached at the end of a slide's window.
pub const KEN_BURNS_MAX_SCALE: f64 = 1.08;
/// Duration of the text entrance animation.
pub const TEXT_ENTRANCE_SECS: f64 = 0.2;
/// Starting downward offset of the text block, in pixels.
pub const TEXT_ENTRANCE_OFFSET_PX: f64 = 20.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One whitespace-separated token of the overlay text with its paint.
pub struct WordPaint {
    /// Token text as written (case preserved).
    pub text: String,
    /// `true` when the token matches the slide's highlight word.
    pub highlighted: bool,
    /// Resolved paint for this token.
    pub paint: TextPaint,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Deterministic visual parameters of one slide at one local frame.
pub struct FrameParams {
    /// Ken Burns image scale in `[1.0, 1.08]`.
    pub zoom_scale: f64,
    /// Text block opacity in `[0, 1]`.
    pub text_opacity: f64,
    /// Downward text offset in pixels, `20 -> 0` during the entrance.
    pub text_offset_y: f64,
    /// Uniform alpha applied to the whole composited slide, in `[0, 1]`.
    pub composite_opacity: f64,
    /// Transition tag, passed through for renderers.
    pub transition: TransitionKind,
    /// Base paint of the text block.
    pub text_paint: TextPaint,
    /// Tokens in order; empty when the slide has no text.
    pub words: Vec<WordPaint>,
}

impl FrameParams {
    /// `true` when there is overlay text to paint.
    pub fn has_text(&self) -> bool {
        !self.words.is_empty()
    }

    /// Jump the text to the end of its entrance (full opacity, no offset).
    ///
    /// Used for stills, which show a single frame and never play the entrance. Zoom and
    /// composite opacity are left untouched. Slides without text stay invisible.
    pub fn settle_text(&mut self) {
        if self.has_text() {
            self.text_opacity = 1.0;
            self.text_offset_y = 0.0;
        }
    }
}

/// Evaluate the visual parameters of `slide` at `local_frame` within its `window`.
///
/// Never fails. `local_frame` is clamped into `[0, window.length_frames]`, so negative or
/// overshooting frames resolve to the first or last state.
///
/// Entry and exit cross-fades use the effective overlap stored in `window`. `is_first` and
/// `is_last` disable the entry and exit ramp respectively.
pub fn evaluate_frame(
    slide: &Slide,
    local_frame: i64,
    window: &TimelineWindow,
    style: &StyleConfig,
    transition: &TransitionPolicy,
    is_first: bool,
    is_last: bool,
) -> FrameParams {
    let len = window.length_frames as f64;
    let f = (local_frame as f64).clamp(0.0, len);

    let zoom_scale = interpolate_clamped(f, [0.0, len], [1.0, KEN_BURNS_MAX_SCALE]);

    let composite_opacity = if transition.kind.is_active() {
        let entry = if is_first || window.transition_in_frames == 0 {
            1.0
        } else {
            let t_in = window.transition_in_frames as f64;
            transition.ease.apply(progress(f, 0.0, t_in))
        };
        let exit = if is_last || window.transition_out_frames == 0 {
            1.0
        } else {
            let t_out = window.transition_out_frames as f64;
            1.0 - transition.ease.apply(progress(f, len - t_out, len))
        };
        entry.min(exit).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let text_paint = style.font_style.paint(style.text_color);
    let words = paint_words(slide, style);
    let (text_opacity, text_offset_y) = if words.is_empty() {
        (0.0, 0.0)
    } else {
        let entrance_end = TEXT_ENTRANCE_SECS * style.fps.as_f64();
        (
            interpolate_clamped(f, [0.0, entrance_end], [0.0, 1.0]),
            interpolate_clamped(f, [0.0, entrance_end], [TEXT_ENTRANCE_OFFSET_PX, 0.0]),
        )
    };

    FrameParams {
        zoom_scale,
        text_opacity,
        text_offset_y,
        composite_opacity,
        transition: transition.kind,
        text_paint,
        words,
    }
}

/// Split the slide text on whitespace and resolve each token's paint.
///
/// Matching against `highlight_word` is case-insensitive and exact: punctuation is part of the
/// token, so `"sleep."` does not match `"sleep"`.
pub fn paint_words(slide: &Slide, style: &StyleConfig) -> Vec<WordPaint> {
    let needle = slide
        .highlight_word
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase);

    let regular = style.font_style.paint(style.text_color);
    let accent = style
        .font_style
        .highlight_paint(style.text_color, style.highlight_color);

    slide
        .text
        .split_whitespace()
        .map(|token| {
            let highlighted = needle
                .as_deref()
                .is_some_and(|n| token.to_lowercase() == n);
            WordPaint {
                text: token.to_string(),
                highlighted,
                paint: if highlighted {
                    accent.clone()
                } else {
                    regular.clone()
                },
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
