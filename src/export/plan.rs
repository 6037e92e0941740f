use std::collections::BTreeSet;

use crate::{
    composition::model::{
        OverlapPolicy, Slide, SlideshowProject, StyleConfig, TransitionPolicy,
    },
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange},
    foundation::error::{SlidecastError, SlidecastResult},
    render::backend::FramePlan,
    render::pipeline::{FrameSource, RenderThreading, plan_frame, plan_frames},
    timeline::builder::{Timeline, build_timeline_with_policy},
};

/// Portrait 9:16 canvas used for video export.
pub const VIDEO_CANVAS: Canvas = Canvas {
    width: 1080,
    height: 1920,
};

/// Portrait 4:5 canvas used for still-image export, matching the editor preview.
pub const IMAGE_CANVAS: Canvas = Canvas {
    width: 1080,
    height: 1350,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Still-image encoding requested by the caller.
pub enum ImageFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// JPEG.
    Jpg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// What the export produces.
pub enum ExportKind {
    /// One still of the selected slide at `slide_index` (position within the selection).
    SingleImage {
        /// Position of the slide within the selected slides.
        slide_index: usize,
        /// Output encoding.
        #[serde(default)]
        format: ImageFormat,
    },
    /// One still per selected slide.
    ImageSet {
        /// Output encoding.
        #[serde(default)]
        format: ImageFormat,
    },
    /// The full composited slideshow.
    Video,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Which slides to export and how long each lasts.
pub struct ExportSelection {
    /// Indices into the project's slides; `None` exports all. Project order is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<Vec<usize>>,
    /// Replaces every selected slide's duration when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_override_secs: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One output file of an export.
pub struct ExportTarget {
    /// Suggested output file name.
    pub file_name: String,
    /// Index into [`ExportPlan::slides`] for stills, `None` for video.
    pub slide_index: Option<usize>,
    /// Timeline driving this target (single-slide, no transition for stills).
    pub timeline: Timeline,
    /// Frames to render.
    pub frames: FrameRange,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Fully resolved export request: canvas, effective slides, and per-file timelines.
pub struct ExportPlan {
    /// Export kind.
    pub kind: ExportKind,
    /// Output canvas.
    pub canvas: Canvas,
    /// Selected slides with duration overrides applied.
    pub slides: Vec<Slide>,
    /// Style for every target.
    pub style: StyleConfig,
    /// Output files.
    pub targets: Vec<ExportTarget>,
}

impl ExportPlan {
    /// Total frames across all targets.
    pub fn total_frames(&self) -> u64 {
        self.targets.iter().map(|t| t.frames.len_frames()).sum()
    }

    /// Evaluate every frame of `target`.
    ///
    /// Stills are sampled at local frame 0 with their text settled, so overlay text is fully
    /// visible and unshifted.
    pub fn plan_target(
        &self,
        target: &ExportTarget,
        threading: &RenderThreading,
    ) -> SlidecastResult<Vec<FramePlan>> {
        match target.slide_index {
            Some(i) => {
                let slide = self.slides.get(i..=i).ok_or_else(|| {
                    SlidecastError::evaluation(format!("export target refers to missing slide {i}"))
                })?;
                let source = FrameSource::new(slide, &self.style, &target.timeline)?;
                let mut plan = plan_frame(&source, target.frames.start)?;
                for layer in &mut plan.layers {
                    layer.params.settle_text();
                }
                Ok(vec![plan])
            }
            None => {
                let source = FrameSource::new(&self.slides, &self.style, &target.timeline)?;
                plan_frames(&source, target.frames, threading)
            }
        }
    }
}

/// Resolve an export request against a project.
///
/// Video export builds one timeline over the selected slides. Image exports build a one-slide,
/// no-transition timeline per still and render its local frame 0 with settled text. The whole plan fails if any
/// slide is invalid; partial exports are never planned.
#[tracing::instrument(skip(project, selection), fields(slides = project.slides.len()))]
pub fn plan_export(
    project: &SlideshowProject,
    kind: ExportKind,
    selection: &ExportSelection,
) -> SlidecastResult<ExportPlan> {
    project.style.validate()?;
    project.transition.validate()?;
    let slides = select_slides(&project.slides, selection)?;
    let fps = project.style.fps;

    let (canvas, targets) = match kind {
        ExportKind::Video => {
            let timeline =
                build_timeline_with_policy(&slides, &project.transition, fps, project.overlap_policy)?;
            let targets = if timeline.is_empty() {
                Vec::new()
            } else {
                vec![ExportTarget {
                    file_name: "slideshow.mp4".to_string(),
                    slide_index: None,
                    frames: timeline.range(),
                    timeline,
                }]
            };
            (VIDEO_CANVAS, targets)
        }
        ExportKind::SingleImage {
            slide_index,
            format,
        } => {
            if slide_index >= slides.len() {
                return Err(SlidecastError::validation(format!(
                    "single-image export index {slide_index} out of range ({} slides selected)",
                    slides.len()
                )));
            }
            let target = still_target(
                &slides,
                slide_index,
                fps,
                format!("slide.{}", format.extension()),
            )?;
            (IMAGE_CANVAS, vec![target])
        }
        ExportKind::ImageSet { format } => {
            let targets = (0..slides.len())
                .map(|i| {
                    still_target(
                        &slides,
                        i,
                        fps,
                        format!("slide-{}.{}", i + 1, format.extension()),
                    )
                })
                .collect::<SlidecastResult<Vec<_>>>()?;
            (IMAGE_CANVAS, targets)
        }
    };

    let plan = ExportPlan {
        kind,
        canvas,
        slides,
        style: project.style,
        targets,
    };
    tracing::debug!(
        targets = plan.targets.len(),
        frames = plan.total_frames(),
        "export planned"
    );
    Ok(plan)
}

/// Frame count the preview player should use: the timeline length, at least one second.
pub fn preview_duration_frames(timeline: &Timeline) -> u64 {
    timeline.total_frames.max(u64::from(timeline.fps.get()))
}

fn select_slides(slides: &[Slide], selection: &ExportSelection) -> SlidecastResult<Vec<Slide>> {
    let mut out: Vec<Slide> = match &selection.selected {
        None => slides.to_vec(),
        Some(indices) => {
            let mut wanted = BTreeSet::new();
            for &i in indices {
                if i >= slides.len() {
                    return Err(SlidecastError::validation(format!(
                        "selected slide index {i} out of range ({} slides)",
                        slides.len()
                    )));
                }
                wanted.insert(i);
            }
            wanted.into_iter().map(|i| slides[i].clone()).collect()
        }
    };

    if let Some(secs) = selection.duration_override_secs {
        for s in &mut out {
            s.duration_secs = secs;
        }
    }
    Ok(out)
}

fn still_target(
    slides: &[Slide],
    index: usize,
    fps: Fps,
    file_name: String,
) -> SlidecastResult<ExportTarget> {
    let timeline = build_timeline_with_policy(
        &slides[index..=index],
        &TransitionPolicy::none(),
        fps,
        OverlapPolicy::Clamp,
    )?;
    Ok(ExportTarget {
        file_name,
        slide_index: Some(index),
        timeline,
        frames: FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(1),
        },
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/plan.rs"]
mod tests;
