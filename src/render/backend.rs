use crate::{
    composition::model::StyleConfig,
    eval::evaluator::FrameParams,
    foundation::color::Color,
    foundation::core::{Canvas, FrameIndex, Rect, Size},
    foundation::error::SlidecastResult,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One slide to paint into a composition frame.
pub struct LayerPlan {
    /// Index of the slide in the input sequence.
    pub slide_index: usize,
    /// Slide identifier.
    pub slide_id: String,
    /// Opaque image reference for the renderer to resolve.
    pub image_source: String,
    /// Frame relative to the slide window.
    pub local_frame: FrameIndex,
    /// Evaluated visual parameters.
    pub params: FrameParams,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything a renderer needs to rasterize one composition frame.
pub struct FramePlan {
    /// Global frame number.
    pub frame: FrameIndex,
    /// Canvas fill behind all layers.
    pub background: Color,
    /// Layers in painter's order (outgoing slide first).
    pub layers: Vec<LayerPlan>,
}

/// Rasterizer for evaluated frames.
///
/// Implementations resolve `image_source`, cover-fit the image onto the canvas (see
/// [`cover_fit`]), scale it by `zoom_scale`, paint the overlay text per the word paints, and
/// multiply the whole layer by `composite_opacity` before blending it over the previous layers.
pub trait FrameRenderer {
    /// Output produced per frame.
    type Frame;

    /// Rasterize one planned frame.
    fn render_frame(&mut self, plan: &FramePlan, style: &StyleConfig)
    -> SlidecastResult<Self::Frame>;
}

/// Source-space crop rectangle that fills `dst` while preserving the aspect ratio of `src`.
///
/// The crop is centered; the overflowing axis is trimmed evenly on both sides. Degenerate
/// sizes yield [`Rect::ZERO`].
pub fn cover_fit(src: Size, dst: Canvas) -> Rect {
    let dw = f64::from(dst.width);
    let dh = f64::from(dst.height);
    if src.width <= 0.0 || src.height <= 0.0 || dw <= 0.0 || dh <= 0.0 {
        return Rect::ZERO;
    }

    let scale = (dw / src.width).max(dh / src.height);
    let crop = Size::new(dw / scale, dh / scale);
    Rect::from_center_size(
        (src.width / 2.0, src.height / 2.0),
        crop,
    )
}

/// Cover-fit crop further narrowed by a centered Ken Burns zoom factor (`>= 1`).
pub fn ken_burns_crop(src: Size, dst: Canvas, zoom_scale: f64) -> Rect {
    let crop = cover_fit(src, dst);
    let zoom = if zoom_scale.is_finite() {
        zoom_scale.max(1.0)
    } else {
        1.0
    };
    Rect::from_center_size(crop.center(), crop.size() / zoom)
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
