use super::*;

#[test]
fn window_rejects_inverted_bounds() {
    assert!(DisplayWindow::new(5, 2).is_err());
    assert!(DisplayWindow::new(3, 3).unwrap().is_empty());
}

#[test]
fn window_contains_is_half_open() {
    let w = DisplayWindow::new(2, 5).unwrap();
    assert!(!w.contains(1));
    assert!(w.contains(2));
    assert!(w.contains(4));
    assert!(!w.contains(5));
    assert_eq!(w.len_frames(), 3);
    assert_eq!(w.relative(4), Some(2));
    assert_eq!(w.relative(5), None);
}

#[test]
fn window_clamps_to_batch_length() {
    let w = DisplayWindow::new(8, 40).unwrap().clamp_to(10);
    assert_eq!(w, DisplayWindow { start: 8, end: 10 });

    let past_end = DisplayWindow::new(20, 40).unwrap().clamp_to(10);
    assert!(past_end.is_empty());
}

#[test]
fn premultiply_rounds_to_nearest() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}
