//! Slidecast turns an ordered list of image slides into a frame-accurate slideshow plan.
//!
//! The engine is deterministic and IO-free apart from project loading. Rasterization and
//! encoding live behind [`FrameRenderer`]; this crate decides *what* every frame shows.
//!
//! # Pipeline overview
//!
//! 1. **Model**: [`SlideshowProject`] (slides, transition policy, style) from JSON or
//!    [`SlideshowBuilder`].
//! 2. **Timeline**: [`build_timeline`] maps slides to overlapping frame windows.
//! 3. **Evaluate**: [`evaluate_frame`] computes zoom, text, and opacity for one slide at one
//!    local frame. [`plan_frame`] does it for every slide visible at a global frame.
//! 4. **Export**: [`plan_export`] resolves a video or still-image export into per-file
//!    timelines and frame ranges.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same inputs always produce the same timeline and frame parameters.
//! - **Fail early**: only timeline construction and project loading return errors; frame
//!   evaluation clamps.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod composition;
mod eval;
mod export;
mod foundation;
mod render;
mod timeline;

pub use animation::ease::Ease;
pub use animation::interp::{interpolate_clamped, progress};
pub use composition::dsl::SlideshowBuilder;
pub use composition::model::{
    FontStyle, OverlapPolicy, Slide, SlideshowProject, StyleConfig, TransitionKind,
    TransitionPolicy, validate_slides,
};
pub use eval::evaluator::{
    FrameParams, KEN_BURNS_MAX_SCALE, TEXT_ENTRANCE_OFFSET_PX, TEXT_ENTRANCE_SECS, WordPaint,
    evaluate_frame, paint_words,
};
pub use eval::paint::{
    OVERLAY_GRADIENT, OverlayGradient, Shadow, Stroke, TEXT_LAYOUT, TextLayout, TextPaint,
};
pub use export::plan::{
    ExportKind, ExportPlan, ExportSelection, ExportTarget, IMAGE_CANVAS, ImageFormat,
    VIDEO_CANVAS, plan_export, preview_duration_frames,
};
pub use foundation::color::Color;
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rect, Size};
pub use foundation::error::{SlidecastError, SlidecastResult};
pub use render::backend::{FramePlan, FrameRenderer, LayerPlan, cover_fit, ken_burns_crop};
pub use render::pipeline::{
    FrameSource, RenderStats, RenderThreading, plan_frame, plan_frames, render_frames,
};
pub use timeline::builder::{
    ActiveSlide, Timeline, TimelineWindow, build_project_timeline, build_timeline,
    build_timeline_with_policy,
};
pub use timeline::cache::{CacheStats, TimelineCache, TimelineKey};
