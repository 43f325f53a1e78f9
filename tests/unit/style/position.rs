use super::*;

fn canvas() -> Canvas {
    Canvas::new(1920, 1080)
}

#[test]
fn named_presets_resolve_to_fixed_percentages() {
    assert_eq!(resolve_position_preset("bottom-center", canvas()), (50.0, 85.0));
    assert_eq!(resolve_position_preset("top-center", canvas()), (50.0, 15.0));
    assert_eq!(resolve_position_preset("center", canvas()), (50.0, 50.0));
    assert_eq!(resolve_position_preset("bottom-left", canvas()), (15.0, 85.0));
    assert_eq!(resolve_position_preset("bottom-right", canvas()), (85.0, 85.0));
    assert_eq!(resolve_position_preset("top-left", canvas()), (15.0, 15.0));
    assert_eq!(resolve_position_preset("top-right", canvas()), (85.0, 15.0));
    assert_eq!(resolve_position_preset("left-center", canvas()), (15.0, 50.0));
    assert_eq!(resolve_position_preset("right-center", canvas()), (85.0, 50.0));
    assert_eq!(resolve_position_preset("bottom-third", canvas()), (50.0, 75.0));
    assert_eq!(resolve_position_preset("top-third", canvas()), (50.0, 25.0));
}

#[test]
fn unknown_names_default_to_bottom_center() {
    assert_eq!(resolve_position_preset("middle-ish", canvas()), DEFAULT_POSITION_PCT);
    assert_eq!(resolve_position_preset("", canvas()), DEFAULT_POSITION_PCT);
    assert_eq!(resolve_position_preset("custom", canvas()), DEFAULT_POSITION_PCT);
}

#[test]
fn names_round_trip() {
    for p in PositionPreset::NAMED {
        assert_eq!(PositionPreset::from_name(p.name()), Some(p));
        assert!(p.percentages().is_some());
    }
    assert_eq!(PositionPreset::from_name("custom"), Some(PositionPreset::Custom));
    assert_eq!(PositionPreset::Custom.percentages(), None);
}

#[test]
fn serde_uses_kebab_case() {
    let p: PositionPreset = serde_json::from_str("\"bottom-third\"").unwrap();
    assert_eq!(p, PositionPreset::BottomThird);
}
