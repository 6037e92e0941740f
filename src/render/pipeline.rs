use rayon::prelude::*;

use crate::{
    composition::model::{Slide, StyleConfig},
    eval::evaluator::evaluate_frame,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{SlidecastError, SlidecastResult},
    render::backend::{FramePlan, FrameRenderer, LayerPlan},
    timeline::builder::Timeline,
};

/// Immutable inputs for planning frames: slides, style, and the timeline built from them.
#[derive(Clone, Copy, Debug)]
pub struct FrameSource<'a> {
    slides: &'a [Slide],
    style: &'a StyleConfig,
    timeline: &'a Timeline,
}

impl<'a> FrameSource<'a> {
    /// Bundle planning inputs, checking the timeline was built for these slides.
    pub fn new(
        slides: &'a [Slide],
        style: &'a StyleConfig,
        timeline: &'a Timeline,
    ) -> SlidecastResult<Self> {
        if slides.len() != timeline.len() {
            return Err(SlidecastError::evaluation(format!(
                "timeline has {} windows but {} slides were supplied",
                timeline.len(),
                slides.len()
            )));
        }
        if style.fps != timeline.fps {
            return Err(SlidecastError::evaluation(format!(
                "style fps {} does not match timeline fps {}",
                style.fps.get(),
                timeline.fps.get()
            )));
        }
        Ok(Self {
            slides,
            style,
            timeline,
        })
    }

    /// Timeline being planned.
    pub fn timeline(&self) -> &'a Timeline {
        self.timeline
    }

    /// Style applied to every frame.
    pub fn style(&self) -> &'a StyleConfig {
        self.style
    }
}

/// Evaluate every slide visible at global `frame`.
pub fn plan_frame(source: &FrameSource<'_>, frame: FrameIndex) -> SlidecastResult<FramePlan> {
    if frame.0 >= source.timeline.total_frames {
        return Err(SlidecastError::evaluation(format!(
            "frame {} is out of bounds (timeline has {} frames)",
            frame.0, source.timeline.total_frames
        )));
    }

    let layers = source
        .timeline
        .locate(frame)
        .into_iter()
        .map(|active| {
            let slide = &source.slides[active.slide_index];
            let window = &source.timeline.windows[active.slide_index];
            let local = i64::try_from(active.local_frame.0).unwrap_or(i64::MAX);
            LayerPlan {
                slide_index: active.slide_index,
                slide_id: slide.id.clone(),
                image_source: slide.image_source.clone(),
                local_frame: active.local_frame,
                params: evaluate_frame(
                    slide,
                    local,
                    window,
                    source.style,
                    &source.timeline.transition,
                    active.is_first,
                    active.is_last,
                ),
            }
        })
        .collect();

    Ok(FramePlan {
        frame,
        background: source.style.background_color,
        layers,
    })
}

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame planning.
pub struct RenderThreading {
    /// Evaluate frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated planning/rendering counters.
pub struct RenderStats {
    /// Frames produced.
    pub frames_total: u64,
    /// Slide layers evaluated across all frames.
    pub layers_evaluated: u64,
    /// Frames where two or more slides overlapped.
    pub overlap_frames: u64,
}

impl RenderStats {
    fn record(&mut self, plan: &FramePlan) {
        self.frames_total += 1;
        self.layers_evaluated += plan.layers.len() as u64;
        if plan.layers.len() > 1 {
            self.overlap_frames += 1;
        }
    }
}

/// Plan a frame range in frame order.
///
/// In parallel mode, chunks of `chunk_size` frames are evaluated on a dedicated rayon pool.
/// Evaluation is pure, so the output is identical to sequential planning.
#[tracing::instrument(skip(source, threading), fields(parallel = threading.parallel))]
pub fn plan_frames(
    source: &FrameSource<'_>,
    range: FrameRange,
    threading: &RenderThreading,
) -> SlidecastResult<Vec<FramePlan>> {
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    for_each_chunk(source, range, threading, |chunk| {
        out.extend(chunk);
        Ok(())
    })?;
    Ok(out)
}

/// Plan a frame range and feed every frame, in order, to `renderer`.
#[tracing::instrument(skip(source, threading, renderer), fields(parallel = threading.parallel))]
pub fn render_frames<R>(
    source: &FrameSource<'_>,
    range: FrameRange,
    threading: &RenderThreading,
    renderer: &mut R,
) -> SlidecastResult<(Vec<R::Frame>, RenderStats)>
where
    R: FrameRenderer + ?Sized,
{
    let mut frames = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let mut stats = RenderStats::default();
    for_each_chunk(source, range, threading, |chunk| {
        for plan in &chunk {
            frames.push(renderer.render_frame(plan, source.style)?);
            stats.record(plan);
        }
        Ok(())
    })?;
    tracing::debug!(
        frames = stats.frames_total,
        overlap_frames = stats.overlap_frames,
        "render range finished"
    );
    Ok((frames, stats))
}

fn for_each_chunk(
    source: &FrameSource<'_>,
    range: FrameRange,
    threading: &RenderThreading,
    mut sink: impl FnMut(Vec<FramePlan>) -> SlidecastResult<()>,
) -> SlidecastResult<()> {
    if range.end.0 > source.timeline.total_frames {
        return Err(SlidecastError::validation(format!(
            "render range end {} exceeds timeline length {}",
            range.end.0, source.timeline.total_frames
        )));
    }
    if range.is_empty() {
        return Ok(());
    }

    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let plans = match &pool {
            Some(pool) => pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|f| plan_frame(source, FrameIndex(f)))
                    .collect::<SlidecastResult<Vec<_>>>()
            })?,
            None => (chunk_start..chunk_end)
                .map(|f| plan_frame(source, FrameIndex(f)))
                .collect::<SlidecastResult<Vec<_>>>()?,
        };
        sink(plans)?;
        chunk_start = chunk_end;
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> SlidecastResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlidecastError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlidecastError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
