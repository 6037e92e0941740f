use super::*;

const TEXT: Color = Color::rgb(255, 255, 255);
const ACCENT: Color = Color::rgb(255, 0, 80);

#[test]
fn bold_is_filled_with_soft_shadow() {
    let p = FontStyle::Bold.paint(TEXT);
    assert_eq!(p.fill, TEXT);
    assert!(p.stroke.is_none());
    assert_eq!(p.shadows.len(), 1);
    assert_eq!(p.shadows[0].offset, Vec2::new(2.0, 2.0));
    assert_eq!(p.shadows[0].blur_px, 4.0);
    assert_eq!(p.shadows[0].color, Color::black_alpha(0.5));
}

#[test]
fn outline_is_stroke_only() {
    let p = FontStyle::Outline.paint(TEXT);
    assert!(p.fill.is_transparent());
    assert_eq!(
        p.stroke,
        Some(Stroke {
            color: TEXT,
            width_px: 3.0
        })
    );
    assert!(p.shadows.is_empty());
}

#[test]
fn shadow_has_two_hard_layers() {
    let p = FontStyle::Shadow.paint(TEXT);
    assert_eq!(p.fill, TEXT);
    assert!(p.stroke.is_none());
    assert_eq!(p.shadows.len(), 2);
    assert!(p.shadows.iter().all(|s| s.blur_px == 0.0));
    assert_eq!(p.shadows[0].offset, Vec2::new(4.0, 4.0));
    assert_eq!(p.shadows[1].offset, Vec2::new(8.0, 8.0));
    assert!(p.shadows[0].color.a > p.shadows[1].color.a);
}

#[test]
fn highlight_swaps_fill_for_filled_styles() {
    for style in [FontStyle::Bold, FontStyle::Shadow] {
        let p = style.highlight_paint(TEXT, ACCENT);
        assert_eq!(p.fill, ACCENT);
        assert!(p.stroke.is_none());
        assert_eq!(p.shadows, style.paint(TEXT).shadows);
    }
}

#[test]
fn highlight_swaps_stroke_for_outline() {
    let p = FontStyle::Outline.highlight_paint(TEXT, ACCENT);
    assert!(p.fill.is_transparent());
    assert_eq!(p.stroke.map(|s| s.color), Some(ACCENT));
}

#[test]
fn text_region_respects_margins() {
    let canvas = Canvas {
        width: 1080,
        height: 1920,
    };
    assert_eq!(
        TEXT_LAYOUT.text_region(canvas),
        Rect::new(60.0, 0.0, 1020.0, 1720.0)
    );
}

#[test]
fn gradient_covers_bottom_half() {
    let canvas = Canvas {
        width: 1080,
        height: 1350,
    };
    assert_eq!(
        OVERLAY_GRADIENT.rect(canvas),
        Rect::new(0.0, 675.0, 1080.0, 1350.0)
    );
    assert_eq!(OVERLAY_GRADIENT.bottom, Color::rgba(0, 0, 0, 179));
    assert!(OVERLAY_GRADIENT.top.is_transparent());
}
