/// Convenience result type used across slidecast.
pub type SlidecastResult<T> = Result<T, SlidecastError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only timeline construction and project loading fail. Frame evaluation clamps instead of
/// erroring, so a render in progress is never interrupted.
#[derive(thiserror::Error, Debug)]
pub enum SlidecastError {
    /// Invalid user-provided project or style data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A slide has a zero, negative, or non-finite duration.
    #[error("invalid duration for slide #{index} ('{id}'): {secs}s (must be > 0)")]
    InvalidDuration {
        /// Position of the slide in the input sequence.
        index: usize,
        /// Slide identifier.
        id: String,
        /// Offending duration in seconds.
        secs: f64,
    },

    /// The transition is at least as long as one of the two slides it joins.
    #[error(
        "transition of {transition_frames} frames does not fit boundary before slide #{index} \
         (shorter neighbour is {slide_frames} frames)"
    )]
    InvalidTransitionOverlap {
        /// Index of the incoming slide of the offending boundary.
        index: usize,
        /// Requested transition length in frames.
        transition_frames: u64,
        /// Frame length of the shorter of the two adjacent slides.
        slide_frames: u64,
    },

    /// Errors while planning frames from a built timeline.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidecastError {
    /// Build a [`SlidecastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlidecastError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`SlidecastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
