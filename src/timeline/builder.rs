use crate::{
    composition::model::{OverlapPolicy, Slide, SlideshowProject, TransitionPolicy, validate_slides},
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{SlidecastError, SlidecastResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Placement of one slide in the composition.
pub struct TimelineWindow {
    /// Index of the slide in the input sequence.
    pub slide_index: usize,
    /// First global frame of the slide.
    pub start_frame: u64,
    /// Number of frames the slide is visible, overlaps included. Always >= 1.
    pub length_frames: u64,
    /// Frames shared with the previous slide (entry ramp length).
    pub transition_in_frames: u64,
    /// Frames shared with the next slide (exit ramp length).
    pub transition_out_frames: u64,
}

impl TimelineWindow {
    /// One past the last global frame of the slide.
    pub fn end_frame(&self) -> u64 {
        self.start_frame.saturating_add(self.length_frames)
    }

    /// Global frame range `[start, end)` covered by the slide.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.end_frame()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// A slide visible at a given global frame.
pub struct ActiveSlide {
    /// Index of the slide in the input sequence.
    pub slide_index: usize,
    /// Frame relative to the slide's own window.
    pub local_frame: FrameIndex,
    /// `true` for the first slide of the timeline.
    pub is_first: bool,
    /// `true` for the last slide of the timeline.
    pub is_last: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Frame-accurate layout of a slideshow, one window per slide in input order.
pub struct Timeline {
    /// Frame rate the windows were computed at.
    pub fps: Fps,
    /// Transition policy the windows were computed with.
    pub transition: TransitionPolicy,
    /// Per-slide windows.
    pub windows: Vec<TimelineWindow>,
    /// Composition length in frames (`start_last + length_last`, or 0 when empty).
    pub total_frames: u64,
}

impl Timeline {
    /// `true` when the timeline holds no slides.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Window of the slide at `index`.
    pub fn window(&self, index: usize) -> Option<&TimelineWindow> {
        self.windows.get(index)
    }

    /// Composition length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.total_frames)
    }

    /// Global frame range of the whole composition.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames),
        }
    }

    /// Slides visible at global `frame`, in painter's order (outgoing before incoming).
    ///
    /// Outside `[0, total_frames)` the result is empty.
    pub fn locate(&self, frame: FrameIndex) -> Vec<ActiveSlide> {
        let last = self.windows.len().saturating_sub(1);
        self.windows
            .iter()
            .filter(|w| w.range().contains(frame))
            .map(|w| ActiveSlide {
                slide_index: w.slide_index,
                local_frame: FrameIndex(frame.0 - w.start_frame),
                is_first: w.slide_index == 0,
                is_last: w.slide_index == last,
            })
            .collect()
    }
}

/// Build the timeline for `slides`, clamping transitions that do not fit.
///
/// See [`build_timeline_with_policy`].
pub fn build_timeline(
    slides: &[Slide],
    transition: &TransitionPolicy,
    fps: Fps,
) -> SlidecastResult<Timeline> {
    build_timeline_with_policy(slides, transition, fps, OverlapPolicy::Clamp)
}

/// Build the timeline for a whole project using its own transition, fps, and overlap policy.
pub fn build_project_timeline(project: &SlideshowProject) -> SlidecastResult<Timeline> {
    project.style.validate()?;
    build_timeline_with_policy(
        &project.slides,
        &project.transition,
        project.style.fps,
        project.overlap_policy,
    )
}

/// Convert slides plus a transition policy into per-slide frame windows.
///
/// Each slide lasts `round(duration * fps)` frames, raised to 1 for very short slides. When the
/// transition is active, slide `i > 0` starts `T` frames before slide `i - 1` ends, where `T` is
/// `round(transition.duration * fps)`. With [`OverlapPolicy::Clamp`], `T` is reduced per
/// boundary to `min(len_prev, len_next) - 1`. With [`OverlapPolicy::Reject`] an oversized `T` is
/// an error.
///
/// Inputs are validated up front and no partial timeline is ever returned. A timeline whose
/// total length does not fit in `u64` frames is a validation error.
#[tracing::instrument(skip(slides, transition), fields(slides = slides.len(), fps = fps.get()))]
pub fn build_timeline_with_policy(
    slides: &[Slide],
    transition: &TransitionPolicy,
    fps: Fps,
    overlap: OverlapPolicy,
) -> SlidecastResult<Timeline> {
    transition.validate()?;
    validate_slides(slides)?;

    let requested = if transition.kind.is_active() {
        transition.frames(fps)
    } else {
        0
    };

    let lengths: Vec<u64> = slides
        .iter()
        .map(|s| fps.secs_to_frames(s.duration_secs).max(1))
        .collect();

    let mut boundaries = Vec::with_capacity(lengths.len().saturating_sub(1));
    for (i, pair) in lengths.windows(2).enumerate() {
        let index = i + 1;
        let shorter = pair[0].min(pair[1]);
        let fit = shorter.saturating_sub(1);
        let effective = if requested <= fit {
            requested
        } else {
            match overlap {
                OverlapPolicy::Reject => {
                    return Err(SlidecastError::InvalidTransitionOverlap {
                        index,
                        transition_frames: requested,
                        slide_frames: shorter,
                    });
                }
                OverlapPolicy::Clamp => {
                    tracing::warn!(
                        boundary = index,
                        requested,
                        clamped = fit,
                        "transition longer than adjacent slide; clamping overlap"
                    );
                    fit
                }
            }
        };
        boundaries.push(effective);
    }

    let mut windows: Vec<TimelineWindow> = Vec::with_capacity(lengths.len());
    let mut total_frames = 0u64;
    for (i, &len) in lengths.iter().enumerate() {
        let transition_in_frames = if i == 0 { 0 } else { boundaries[i - 1] };
        let transition_out_frames = boundaries.get(i).copied().unwrap_or(0);
        // Effective overlap is at most the previous length minus one.
        let start = total_frames - transition_in_frames;
        total_frames = start.checked_add(len).ok_or_else(|| {
            SlidecastError::validation(format!(
                "timeline length overflows u64 frames at slide #{i} ('{}')",
                slides[i].id
            ))
        })?;
        windows.push(TimelineWindow {
            slide_index: i,
            start_frame: start,
            length_frames: len,
            transition_in_frames,
            transition_out_frames,
        });
    }

    tracing::debug!(
        total_frames,
        transition_frames = requested,
        "timeline built"
    );

    Ok(Timeline {
        fps,
        transition: *transition,
        windows,
        total_frames,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
