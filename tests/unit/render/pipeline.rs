use super::*;
use crate::{
    composition::model::{TransitionKind, TransitionPolicy},
    timeline::builder::build_timeline,
};

fn slides() -> Vec<Slide> {
    vec![
        Slide::new("a", "a.jpg", 2.5).with_text("Why sleep matters"),
        Slide::new("b", "b.jpg", 3.0),
        Slide::new("c", "c.jpg", 3.0).with_text("Sleep more"),
    ]
}

fn timeline(slides: &[Slide], style: &StyleConfig) -> Timeline {
    build_timeline(
        slides,
        &TransitionPolicy::new(TransitionKind::Fade, 0.3),
        style.fps,
    )
    .unwrap()
}

struct OpacityProbe {
    seen: Vec<u64>,
}

impl FrameRenderer for OpacityProbe {
    type Frame = Vec<f64>;

    fn render_frame(
        &mut self,
        plan: &FramePlan,
        _style: &StyleConfig,
    ) -> SlidecastResult<Self::Frame> {
        self.seen.push(plan.frame.0);
        Ok(plan
            .layers
            .iter()
            .map(|l| l.params.composite_opacity)
            .collect())
    }
}

#[test]
fn source_rejects_mismatched_inputs() {
    let style = StyleConfig::default();
    let s = slides();
    let t = timeline(&s, &style);
    assert!(FrameSource::new(&s[..2], &style, &t).is_err());

    let other = StyleConfig {
        fps: crate::Fps::new(60).unwrap(),
        ..StyleConfig::default()
    };
    assert!(FrameSource::new(&s, &other, &t).is_err());
}

#[test]
fn overlap_frame_has_two_layers_in_painter_order() {
    let style = StyleConfig::default();
    let s = slides();
    let t = timeline(&s, &style);
    let source = FrameSource::new(&s, &style, &t).unwrap();

    let plan = plan_frame(&source, FrameIndex(66)).unwrap();
    assert_eq!(plan.background, style.background_color);
    assert_eq!(plan.layers.len(), 2);
    assert_eq!(plan.layers[0].slide_id, "a");
    assert_eq!(plan.layers[1].slide_id, "b");
    assert_eq!(plan.layers[1].local_frame, FrameIndex(0));
    assert_eq!(plan.layers[1].params.composite_opacity, 0.0);
    // Outgoing slide is 9 frames from its end: exit ramp starts at local frame 66.
    assert_eq!(plan.layers[0].params.composite_opacity, 1.0);
}

#[test]
fn out_of_bounds_frame_is_an_error() {
    let style = StyleConfig::default();
    let s = slides();
    let t = timeline(&s, &style);
    let source = FrameSource::new(&s, &style, &t).unwrap();
    assert!(plan_frame(&source, FrameIndex(237)).is_err());

    let too_long = FrameRange::new(FrameIndex(0), FrameIndex(500)).unwrap();
    assert!(plan_frames(&source, too_long, &RenderThreading::default()).is_err());
}

#[test]
fn parallel_planning_matches_sequential() {
    let style = StyleConfig::default();
    let s = slides();
    let t = timeline(&s, &style);
    let source = FrameSource::new(&s, &style, &t).unwrap();

    let seq = plan_frames(&source, t.range(), &RenderThreading::default()).unwrap();
    let par = plan_frames(
        &source,
        t.range(),
        &RenderThreading {
            parallel: true,
            chunk_size: 7,
            threads: Some(2),
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 237);
    assert_eq!(seq, par);
    for (i, p) in par.iter().enumerate() {
        assert_eq!(p.frame, FrameIndex(i as u64));
    }
}

#[test]
fn zero_threads_is_rejected() {
    let style = StyleConfig::default();
    let s = slides();
    let t = timeline(&s, &style);
    let source = FrameSource::new(&s, &style, &t).unwrap();
    let res = plan_frames(
        &source,
        t.range(),
        &RenderThreading {
            parallel: true,
            chunk_size: 16,
            threads: Some(0),
        },
    );
    assert!(res.is_err());
}

#[test]
fn renderer_sees_every_frame_in_order() {
    let style = StyleConfig::default();
    let s = slides();
    let t = timeline(&s, &style);
    let source = FrameSource::new(&s, &style, &t).unwrap();
    let mut probe = OpacityProbe { seen: Vec::new() };

    let range = FrameRange::new(FrameIndex(60), FrameIndex(80)).unwrap();
    let (frames, stats) = render_frames(
        &source,
        range,
        &RenderThreading {
            parallel: true,
            chunk_size: 0,
            threads: None,
        },
        &mut probe,
    )
    .unwrap();

    assert_eq!(probe.seen, (60..80).collect::<Vec<_>>());
    assert_eq!(frames.len(), 20);
    assert_eq!(stats.frames_total, 20);
    // Frames 66..=74 hold both slides.
    assert_eq!(stats.overlap_frames, 9);
    assert_eq!(stats.layers_evaluated, 29);
    assert_eq!(frames[0], vec![1.0]);
}

#[test]
fn empty_range_renders_nothing() {
    let style = StyleConfig::default();
    let s = slides();
    let t = timeline(&s, &style);
    let source = FrameSource::new(&s, &style, &t).unwrap();
    let mut probe = OpacityProbe { seen: Vec::new() };
    let range = FrameRange::new(FrameIndex(10), FrameIndex(10)).unwrap();
    let (frames, stats) =
        render_frames(&source, range, &RenderThreading::default(), &mut probe).unwrap();
    assert!(frames.is_empty());
    assert_eq!(stats, RenderStats::default());
}
