use super::*;
use crate::{
    animation::ease::Ease,
    composition::model::FontStyle,
    foundation::color::Color,
    timeline::builder::build_timeline,
};

fn window(len: u64, t_in: u64, t_out: u64) -> TimelineWindow {
    TimelineWindow {
        slide_index: 1,
        start_frame: 0,
        length_frames: len,
        transition_in_frames: t_in,
        transition_out_frames: t_out,
    }
}

fn fade(secs: f64) -> TransitionPolicy {
    TransitionPolicy::new(TransitionKind::Fade, secs)
}

fn slide(text: &str, highlight: Option<&str>) -> Slide {
    let s = Slide::new("s", "s.jpg", 3.0).with_text(text);
    match highlight {
        Some(h) => s.with_highlight(h),
        None => s,
    }
}

#[test]
fn zoom_is_monotonic_and_bounded() {
    let style = StyleConfig::default();
    let w = window(90, 9, 9);
    let s = slide("", None);
    let mut prev = 0.0;
    for f in -5..=120 {
        let p = evaluate_frame(&s, f, &w, &style, &fade(0.3), false, false);
        assert!(p.zoom_scale >= 1.0 && p.zoom_scale <= KEN_BURNS_MAX_SCALE);
        assert!(p.zoom_scale >= prev);
        prev = p.zoom_scale;
    }
    let start = evaluate_frame(&s, 0, &w, &style, &fade(0.3), false, false);
    let end = evaluate_frame(&s, 90, &w, &style, &fade(0.3), false, false);
    assert_eq!(start.zoom_scale, 1.0);
    assert!((end.zoom_scale - 1.08).abs() < 1e-12);
}

#[test]
fn text_entrance_runs_over_first_fifth_second() {
    let style = StyleConfig::default();
    let w = window(90, 0, 0);
    let s = slide("Hello world", None);
    let tr = TransitionPolicy::none();

    let f0 = evaluate_frame(&s, 0, &w, &style, &tr, true, true);
    assert_eq!(f0.text_opacity, 0.0);
    assert_eq!(f0.text_offset_y, 20.0);

    let mid = evaluate_frame(&s, 3, &w, &style, &tr, true, true);
    assert!((mid.text_opacity - 0.5).abs() < 1e-12);
    assert!((mid.text_offset_y - 10.0).abs() < 1e-12);

    let done = evaluate_frame(&s, 6, &w, &style, &tr, true, true);
    assert_eq!(done.text_opacity, 1.0);
    assert_eq!(done.text_offset_y, 0.0);

    let later = evaluate_frame(&s, 50, &w, &style, &tr, true, true);
    assert_eq!(later.text_opacity, 1.0);
    assert_eq!(later.text_offset_y, 0.0);
}

#[test]
fn empty_text_yields_neutral_text_fields() {
    let style = StyleConfig::default();
    let p = evaluate_frame(
        &slide("", Some("x")),
        40,
        &window(90, 0, 0),
        &style,
        &fade(0.3),
        true,
        true,
    );
    assert!(!p.has_text());
    assert_eq!(p.text_opacity, 0.0);
    assert_eq!(p.text_offset_y, 0.0);

    let ws = evaluate_frame(
        &slide("   \t ", None),
        40,
        &window(90, 0, 0),
        &style,
        &fade(0.3),
        true,
        true,
    );
    assert!(!ws.has_text());
}

#[test]
fn entry_ramp_boundaries() {
    let style = StyleConfig::default();
    let s = slide("", None);
    let w = window(90, 9, 9);
    let at = |f| evaluate_frame(&s, f, &w, &style, &fade(0.3), false, false).composite_opacity;
    assert_eq!(at(0), 0.0);
    assert!((at(3) - 3.0 / 9.0).abs() < 1e-12);
    assert_eq!(at(9), 1.0);
    assert_eq!(at(40), 1.0);
    assert_eq!(at(-10), 0.0);
}

#[test]
fn exit_ramp_boundaries() {
    let style = StyleConfig::default();
    let s = slide("", None);
    let w = window(90, 9, 9);
    let at = |f| evaluate_frame(&s, f, &w, &style, &fade(0.3), false, false).composite_opacity;
    assert_eq!(at(81), 1.0);
    assert!((at(84) - 6.0 / 9.0).abs() < 1e-12);
    assert_eq!(at(90), 0.0);
    assert_eq!(at(500), 0.0);
}

#[test]
fn first_and_last_skip_their_ramps() {
    let style = StyleConfig::default();
    let s = slide("", None);
    let w = window(90, 9, 9);
    let first = evaluate_frame(&s, 0, &w, &style, &fade(0.3), true, false);
    assert_eq!(first.composite_opacity, 1.0);
    let last = evaluate_frame(&s, 89, &w, &style, &fade(0.3), false, true);
    assert_eq!(last.composite_opacity, 1.0);
}

#[test]
fn no_transition_is_always_opaque() {
    let style = StyleConfig::default();
    let s = slide("", None);
    let w = window(90, 9, 9);
    for f in [0, 1, 45, 85, 90] {
        let p = evaluate_frame(&s, f, &w, &style, &TransitionPolicy::none(), false, false);
        assert_eq!(p.composite_opacity, 1.0);
        assert_eq!(p.transition, TransitionKind::None);
    }
}

#[test]
fn single_slide_is_opaque_for_every_kind() {
    let style = StyleConfig::default();
    let slides = vec![Slide::new("only", "a.jpg", 2.5)];
    for kind in [
        TransitionKind::None,
        TransitionKind::Fade,
        TransitionKind::Slide,
        TransitionKind::Wipe,
    ] {
        let tr = TransitionPolicy::new(kind, 0.3);
        let t = build_timeline(&slides, &tr, style.fps).unwrap();
        let w = t.windows[0];
        for f in 0..w.length_frames as i64 {
            let p = evaluate_frame(&slides[0], f, &w, &style, &tr, true, true);
            assert_eq!(p.composite_opacity, 1.0);
        }
    }
}

#[test]
fn ease_shapes_the_ramp() {
    let style = StyleConfig::default();
    let s = slide("", None);
    let w = window(90, 10, 10);
    let mut tr = fade(0.3);
    tr.ease = Ease::InQuad;
    let p = evaluate_frame(&s, 5, &w, &style, &tr, false, false);
    assert!((p.composite_opacity - 0.25).abs() < 1e-12);
}

#[test]
fn highlight_is_case_insensitive_exact_token() {
    let style = StyleConfig::default();
    let words = paint_words(&slide("Sleep well, SLEEP. sleep", Some("sleep")), &style);
    let flags: Vec<_> = words.iter().map(|w| w.highlighted).collect();
    assert_eq!(flags, vec![true, false, false, true]);
    assert_eq!(words[0].text, "Sleep");
    assert_eq!(words[0].paint.fill, style.highlight_color);
    assert_eq!(words[1].paint.fill, style.text_color);

    let upper = paint_words(&slide("why sleep matters", Some("Sleep")), &style);
    assert!(upper[1].highlighted);
}

#[test]
fn missing_highlight_match_is_not_an_error() {
    let style = StyleConfig::default();
    let words = paint_words(&slide("nothing to see", Some("banana")), &style);
    assert_eq!(words.len(), 3);
    assert!(words.iter().all(|w| !w.highlighted));

    let blank = paint_words(&slide("nothing to see", Some("  ")), &style);
    assert!(blank.iter().all(|w| !w.highlighted));
}

#[test]
fn outline_highlight_uses_stroke() {
    let style = StyleConfig {
        font_style: FontStyle::Outline,
        text_color: Color::WHITE,
        highlight_color: Color::rgb(10, 20, 30),
        ..StyleConfig::default()
    };
    let words = paint_words(&slide("big news", Some("news")), &style);
    assert!(words[0].paint.fill.is_transparent());
    assert_eq!(words[0].paint.stroke.unwrap().color, Color::WHITE);
    assert!(words[1].paint.fill.is_transparent());
    assert_eq!(
        words[1].paint.stroke.unwrap().color,
        Color::rgb(10, 20, 30)
    );
}

#[test]
fn settle_text_skips_the_entrance_only() {
    let style = StyleConfig::default();
    let w = window(90, 9, 9);
    let mut p = evaluate_frame(&slide("Hello there", None), 0, &w, &style, &fade(0.3), false, false);
    assert_eq!(p.text_opacity, 0.0);
    let opacity = p.composite_opacity;
    let zoom = p.zoom_scale;

    p.settle_text();
    assert_eq!(p.text_opacity, 1.0);
    assert_eq!(p.text_offset_y, 0.0);
    assert_eq!(p.composite_opacity, opacity);
    assert_eq!(p.zoom_scale, zoom);

    let mut empty = evaluate_frame(&slide("", None), 0, &w, &style, &fade(0.3), false, false);
    empty.settle_text();
    assert_eq!(empty.text_opacity, 0.0);
}
