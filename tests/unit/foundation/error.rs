use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlidecastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SlidecastError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        SlidecastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn invalid_duration_names_the_slide() {
    let err = SlidecastError::InvalidDuration {
        index: 2,
        id: "intro".to_string(),
        secs: -1.0,
    };
    let msg = err.to_string();
    assert!(msg.contains("#2"));
    assert!(msg.contains("'intro'"));
    assert!(msg.contains("-1s"));
}

#[test]
fn invalid_overlap_reports_frame_counts() {
    let err = SlidecastError::InvalidTransitionOverlap {
        index: 1,
        transition_frames: 30,
        slide_frames: 12,
    };
    let msg = err.to_string();
    assert!(msg.contains("30 frames"));
    assert!(msg.contains("12 frames"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlidecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
