use kurbo::Vec2;

use crate::{
    composition::model::FontStyle,
    foundation::color::Color,
    foundation::core::{Canvas, Rect},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Outline stroke around glyphs.
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width_px: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// One drop-shadow layer, painted below the glyphs.
pub struct Shadow {
    /// Offset in pixels (positive is right/down).
    pub offset: Vec2,
    /// Gaussian blur radius in pixels; 0 is a hard shadow.
    pub blur_px: f64,
    /// Shadow color including opacity.
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Resolved paint for a run of text.
pub struct TextPaint {
    /// Glyph fill; transparent for outline text.
    pub fill: Color,
    /// Optional outline stroke.
    pub stroke: Option<Stroke>,
    /// Shadow layers, bottom-most first.
    pub shadows: Vec<Shadow>,
}

#[derive(Clone, Copy, Debug)]
enum FillSource {
    TextColor,
    Transparent,
}

#[derive(Clone, Copy, Debug)]
struct ShadowSpec {
    dx: f64,
    dy: f64,
    blur_px: f64,
    opacity: f64,
}

#[derive(Clone, Copy, Debug)]
struct StyleSpec {
    fill: FillSource,
    stroke_width_px: Option<f64>,
    shadows: &'static [ShadowSpec],
}

const OUTLINE_WIDTH_PX: f64 = 3.0;

const BOLD: StyleSpec = StyleSpec {
    fill: FillSource::TextColor,
    stroke_width_px: None,
    shadows: &[ShadowSpec {
        dx: 2.0,
        dy: 2.0,
        blur_px: 4.0,
        opacity: 0.5,
    }],
};

const OUTLINE: StyleSpec = StyleSpec {
    fill: FillSource::Transparent,
    stroke_width_px: Some(OUTLINE_WIDTH_PX),
    shadows: &[],
};

const SHADOW: StyleSpec = StyleSpec {
    fill: FillSource::TextColor,
    stroke_width_px: None,
    shadows: &[
        ShadowSpec {
            dx: 4.0,
            dy: 4.0,
            blur_px: 0.0,
            opacity: 0.3,
        },
        ShadowSpec {
            dx: 8.0,
            dy: 8.0,
            blur_px: 0.0,
            opacity: 0.1,
        },
    ],
};

impl FontStyle {
    fn spec(self) -> &'static StyleSpec {
        match self {
            Self::Bold => &BOLD,
            Self::Outline => &OUTLINE,
            Self::Shadow => &SHADOW,
        }
    }

    /// Paint for regular (non-highlighted) text in `color`.
    pub fn paint(self, color: Color) -> TextPaint {
        let spec = self.spec();
        TextPaint {
            fill: match spec.fill {
                FillSource::TextColor => color,
                FillSource::Transparent => Color::TRANSPARENT,
            },
            stroke: spec.stroke_width_px.map(|width_px| Stroke { color, width_px }),
            shadows: spec
                .shadows
                .iter()
                .map(|s| Shadow {
                    offset: Vec2::new(s.dx, s.dy),
                    blur_px: s.blur_px,
                    color: Color::black_alpha(s.opacity),
                })
                .collect(),
        }
    }

    /// Paint for the highlighted word.
    ///
    /// Filled styles swap the fill to `highlight`. Outline keeps its transparent fill and
    /// strokes in `highlight`. Shadows are unchanged.
    pub fn highlight_paint(self, text_color: Color, highlight: Color) -> TextPaint {
        let mut paint = self.paint(text_color);
        match self.spec().fill {
            FillSource::TextColor => paint.fill = highlight,
            FillSource::Transparent => {}
        }
        if let Some(stroke) = paint.stroke.as_mut() {
            stroke.color = highlight;
        }
        paint
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Placement and typographic treatment of the overlay text block.
pub struct TextLayout {
    /// Glyph weight.
    pub font_weight: u16,
    /// Text is rendered uppercase.
    pub uppercase: bool,
    /// Tracking in em units.
    pub letter_spacing_em: f64,
    /// Line height as a multiple of font size.
    pub line_height: f64,
    /// Distance between the bottom of the text block and the canvas bottom.
    pub bottom_px: f64,
    /// Left and right margins.
    pub side_margin_px: f64,
}

/// Overlay text treatment shared by every slide.
pub const TEXT_LAYOUT: TextLayout = TextLayout {
    font_weight: 800,
    uppercase: true,
    letter_spacing_em: -0.02,
    line_height: 1.1,
    bottom_px: 200.0,
    side_margin_px: 60.0,
};

impl TextLayout {
    /// Region the centered text block lives in; the block is bottom-aligned inside it.
    pub fn text_region(&self, canvas: Canvas) -> Rect {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let x0 = self.side_margin_px.min(w / 2.0);
        let y1 = (h - self.bottom_px).max(0.0);
        Rect::new(x0, 0.0, w - x0, y1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Vertical readability gradient painted over the image, below the text.
pub struct OverlayGradient {
    /// Fraction of canvas height covered, measured from the bottom.
    pub height_fraction: f64,
    /// Color at the top edge of the gradient.
    pub top: Color,
    /// Color at the canvas bottom.
    pub bottom: Color,
}

/// Gradient drawn over the lower half of every slide that has an image.
pub const OVERLAY_GRADIENT: OverlayGradient = OverlayGradient {
    height_fraction: 0.5,
    top: Color::TRANSPARENT,
    bottom: Color::rgba(0, 0, 0, 179),
};

impl OverlayGradient {
    /// Canvas region the gradient covers.
    pub fn rect(&self, canvas: Canvas) -> Rect {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        Rect::new(0.0, h * (1.0 - self.height_fraction), w, h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/paint.rs"]
mod tests;
