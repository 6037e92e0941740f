use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0050")).unwrap();
    assert_eq!(c, Color::rgb(0xff, 0x00, 0x50));

    let c: Color = serde_json::from_value(json!("0000ff80")).unwrap();
    assert_eq!(c, Color::rgba(0, 0, 255, 0x80));

    let c: Color = serde_json::from_value(json!("Transparent")).unwrap();
    assert!(c.is_transparent());
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Color = serde_json::from_value(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap();
    assert_eq!(c, Color::rgb(255, 128, 0));

    let c: Color = serde_json::from_value(json!([0.0, 0.0, 0.0, 0.5])).unwrap();
    assert_eq!(c, Color::black_alpha(0.5));

    assert!(serde_json::from_value::<Color>(json!([0.0, 1.0])).is_err());
}

#[test]
fn rejects_malformed_hex() {
    assert!(Color::parse("#fff").is_err());
    assert!(Color::parse("#gg0000").is_err());
}

#[test]
fn serializes_to_hex() {
    assert_eq!(
        serde_json::to_value(Color::rgb(255, 255, 255)).unwrap(),
        json!("#ffffff")
    );
    assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
}
