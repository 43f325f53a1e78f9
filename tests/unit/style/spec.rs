use super::*;
use serde_json::json;

#[test]
fn defaults_fill_missing_fields() {
    let style: StyleSpec = serde_json::from_value(json!({ "font_size": 64 })).unwrap();
    assert_eq!(style.font_size, 64);
    assert_eq!(style.font_id, DEFAULT_FONT_ID);
    assert_eq!(style.color, Rgb8::WHITE);
    assert_eq!(style.align, TextAlign::Center);
    assert_eq!(style.position, Position::default());
    assert_eq!(style.max_lines, 1);
}

#[test]
fn opacities_are_clamped_at_parse_time() {
    let style: StyleSpec = serde_json::from_value(json!({
        "opacity": 3.5,
        "stroke": { "size": 2, "opacity": -1.0 },
        "shadow": { "intensity": 7.0 }
    }))
    .unwrap();
    assert_eq!(style.opacity, 1.0);
    assert_eq!(style.stroke.opacity, 0.0);
    assert_eq!(style.shadow.intensity, 1.0);
}

#[test]
fn bad_colors_parse_as_white() {
    let style: StyleSpec = serde_json::from_value(json!({
        "color": "#12",
        "stroke": { "color": 255 }
    }))
    .unwrap();
    assert_eq!(style.color, Rgb8::WHITE);
    assert_eq!(style.stroke.color, Rgb8::new(0, 0, 255));
}

#[test]
fn enums_use_kebab_case() {
    let style: StyleSpec = serde_json::from_value(json!({
        "weight": "ultra-heavy",
        "direction": "vertical",
        "constraint": "per-character-clip",
        "gradient": { "mode": "diagonal" },
        "stroke": { "position": "inner" }
    }))
    .unwrap();
    assert_eq!(style.weight, FontWeight::UltraHeavy);
    assert_eq!(style.direction, LayoutDirection::Vertical);
    assert_eq!(style.constraint, CanvasConstraint::PerCharacterClip);
    assert_eq!(style.gradient.mode, GradientMode::Diagonal);
    assert_eq!(style.stroke.position, StrokePosition::Inner);
}

#[test]
fn complex_styles_are_detected() {
    let plain = StyleSpec::default();
    assert!(!plain.is_complex());

    let mut stroked = plain.clone();
    stroked.stroke.size = 1;
    assert!(stroked.is_complex());

    let mut gradient = plain.clone();
    gradient.gradient.mode = GradientMode::Linear;
    assert!(gradient.is_complex());

    let mut vertical = plain;
    vertical.direction = LayoutDirection::Vertical;
    assert!(vertical.is_complex());
}

#[test]
fn shadow_offset_truncates_toward_zero() {
    let shadow = ShadowSpec {
        angle_deg: 135.0,
        distance: 5,
        intensity: 0.75,
        blur: 4,
    };
    // cos(135°)*5 = -3.53, sin(135°)*5 = 3.53
    assert_eq!(shadow.offset(), (-3, 3));
    assert!(shadow.is_active());
    assert!(!ShadowSpec::none().is_active());
}
