use super::*;
use crate::style::spec::ShadowSpec;
use crate::test_support::BlockFonts;

fn cache() -> FontCache {
    FontCache::new(BlockFonts::new(&["default"]))
}

fn frames_request(start: f64, end: f64) -> OverlayRequest {
    let mut req = OverlayRequest::new("AB");
    req.timing = TimingSpec {
        unit: TimeUnit::Frames,
        start,
        end,
        fps: 30.0,
    };
    req
}

#[test]
fn only_text_is_required() {
    let req = OverlayRequest::from_json(r#"{"text": "hello"}"#).unwrap();
    assert_eq!(req, OverlayRequest::new("hello"));
    assert_eq!(req.timing.unit, TimeUnit::Seconds);
    assert_eq!(req.timing.fps, 30.0);

    let err = OverlayRequest::from_json(r#"{"style": {}}"#).unwrap_err();
    assert!(matches!(err, CaptionError::Serde(_)));
    assert!(OverlayRequest::from_json("{").is_err());
}

#[test]
fn nested_fields_parse_from_json() {
    let req = OverlayRequest::from_json(
        r#"{
            "text": "x",
            "style": {"font_size": 30, "max_lines": 2},
            "position_preset": "top-center",
            "animation": {"effect": "Fade-In", "duration": 0.5, "speed": 2.0},
            "timing": {"unit": "frames", "start": 4, "end": 9},
            "punctuation": "all-symbols"
        }"#,
    )
    .unwrap();
    assert_eq!(req.style.font_size, 30);
    assert_eq!(req.style.max_lines, 2);
    assert_eq!(req.position_preset, PositionPreset::TopCenter);
    assert_eq!(req.animation.effect, EffectKind::FadeIn);
    assert_eq!(req.animation.intensity, 1.0);
    assert_eq!(req.timing.unit, TimeUnit::Frames);
    assert_eq!(req.punctuation, PunctuationFilter::AllSymbols);
}

#[test]
fn unknown_effect_plays_nothing() {
    let req = OverlayRequest::from_json(r#"{"text": "x", "animation": {"effect": "wobble"}}"#)
        .unwrap();
    assert_eq!(req.animation.effect, EffectKind::None);
}

#[test]
fn seconds_are_converted_with_fps_and_speed() {
    let mut req = OverlayRequest::new("x");
    req.timing = TimingSpec {
        unit: TimeUnit::Seconds,
        start: 1.0,
        end: 2.55,
        fps: 10.0,
    };
    req.animation.duration = 1.0;
    req.animation.speed = 2.0;
    let t = req.resolve_timing(100).unwrap();
    assert_eq!(t.window, DisplayWindow::new(10, 25).unwrap());
    assert_eq!(t.duration_frames, 5);
}

#[test]
fn frame_values_are_floored() {
    let mut req = frames_request(3.7, 8.2);
    req.animation.duration = 4.0;
    req.animation.speed = 3.0;
    let t = req.resolve_timing(100).unwrap();
    assert_eq!(t.window, DisplayWindow::new(3, 8).unwrap());
    assert_eq!(t.duration_frames, 1);
}

#[test]
fn non_positive_end_means_end_of_batch() {
    let t = frames_request(2.0, 0.0).resolve_timing(12).unwrap();
    assert_eq!(t.window, DisplayWindow::new(2, 12).unwrap());
    let t = frames_request(2.0, -5.0).resolve_timing(12).unwrap();
    assert_eq!(t.window.end, 12);
}

#[test]
fn end_is_clamped_and_late_starts_are_empty() {
    let t = frames_request(2.0, 500.0).resolve_timing(12).unwrap();
    assert_eq!(t.window, DisplayWindow::new(2, 12).unwrap());
    let t = frames_request(20.0, 30.0).resolve_timing(12).unwrap();
    assert!(t.window.is_empty());
}

#[test]
fn animation_is_at_least_one_frame() {
    let mut req = frames_request(0.0, 0.0);
    req.animation.duration = 0.0;
    assert_eq!(req.resolve_timing(10).unwrap().duration_frames, 1);
}

#[test]
fn invalid_rates_are_rejected() {
    let mut req = OverlayRequest::new("x");
    req.timing.fps = 0.0;
    assert!(matches!(req.validate(), Err(CaptionError::Validation(_))));
    // Frame timing never reads fps.
    req.timing.unit = TimeUnit::Frames;
    assert!(req.validate().is_ok());

    let mut req = OverlayRequest::new("x");
    req.animation.speed = 0.0;
    assert!(matches!(req.resolve_timing(5), Err(CaptionError::Validation(_))));

    let mut req = OverlayRequest::new("x");
    req.timing.start = f64::NAN;
    assert!(req.validate().is_err());
}

#[test]
fn preset_overrides_style_position() {
    let mut req = OverlayRequest::new("x");
    req.style.position = Position {
        x_pct: 10.0,
        y_pct: 20.0,
    };
    req.position_preset = PositionPreset::TopCenter;
    assert_eq!(
        req.resolved_style().position,
        Position {
            x_pct: 50.0,
            y_pct: 15.0
        }
    );
    req.position_preset = PositionPreset::Custom;
    assert_eq!(req.resolved_style().position, req.style.position);
}

#[test]
fn text_is_filtered_then_wrapped() {
    let mut req = OverlayRequest::new("A,B.");
    req.punctuation = PunctuationFilter::English;
    assert_eq!(req.prepared_text(&mut cache(), 640).unwrap(), "AB");

    // 30 characters at 24px are 720px wide, over the 576px wrap width of a 640px frame.
    let long = "ABCDEFGHIJKLMNOPQRSTUVWXYZABCD";
    let mut req = OverlayRequest::new(long);
    req.style.font_size = 40;
    assert_eq!(req.prepared_text(&mut cache(), 640).unwrap(), long);
    req.style.max_lines = 3;
    assert_eq!(
        req.prepared_text(&mut cache(), 640).unwrap(),
        "ABCDEFGHIJKLMNO\nPQRSTUVWXYZABCD"
    );
    req.style.direction = LayoutDirection::Vertical;
    assert_eq!(req.prepared_text(&mut cache(), 640).unwrap(), long);
}

#[test]
fn wrapping_needs_a_known_font() {
    let mut req = OverlayRequest::new("ABCDEFGHIJKLMNOPQRSTUVWXYZABCD");
    req.style.max_lines = 2;
    req.style.font_id = "missing".to_owned();
    let mut fonts = FontCache::new(BlockFonts::new(&[]));
    assert!(matches!(
        req.prepared_text(&mut fonts, 640),
        Err(CaptionError::FontNotFound { .. })
    ));
}

#[test]
fn apply_draws_inside_the_window_and_echoes_times() {
    let (w, h) = (640u32, 200u32);
    let frames = FrameSequence::black(4, w, h).unwrap();
    let mut req = frames_request(1.0, 3.0);
    req.style.font_size = 40;
    req.style.shadow = ShadowSpec::none();

    let out = req.apply(&mut cache(), &frames).unwrap();
    assert_eq!((out.start_time, out.end_time), (1.0, 3.0));

    let at = |i: usize| {
        let f = out.frames.frame(i).unwrap();
        f[((170 * w + 320) * 3) as usize]
    };
    assert_eq!(at(0), 0.0);
    assert_eq!(at(1), 1.0);
    assert_eq!(at(2), 1.0);
    assert_eq!(at(3), 0.0);
}

#[test]
fn blank_text_skips_font_lookup_and_returns_frames() {
    let frames = FrameSequence::black(3, 64, 32).unwrap();
    let mut req = frames_request(0.0, 3.0);
    req.text = "   ".to_owned();
    req.style.max_lines = 3;
    req.style.font_id = "missing".to_owned();
    let mut fonts = FontCache::new(BlockFonts::new(&[]));

    let out = req.apply(&mut fonts, &frames).unwrap();
    assert_eq!(out.frames, frames);
    assert_eq!((out.start_time, out.end_time), (0.0, 3.0));
    assert!(fonts.is_empty());

    // Text that filters down to nothing is not wrapped either.
    req.text = "!?".to_owned();
    req.punctuation = PunctuationFilter::English;
    assert_eq!(req.prepared_text(&mut fonts, 64).unwrap(), "");
    let out = req.apply(&mut fonts, &frames).unwrap();
    assert_eq!(out.frames, frames);
}
