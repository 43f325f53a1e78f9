use super::*;

#[test]
fn endpoints_are_stable() {
    assert_eq!(ease_out(0.0), 0.0);
    assert_eq!(ease_out(1.0), 1.0);
}

#[test]
fn decelerates_towards_the_end() {
    let (a, b, c) = (ease_out(0.25), ease_out(0.5), ease_out(0.75));
    assert!(a < b && b < c);
    assert!(b - a > c - b);
}

#[test]
fn matches_closed_form_and_clamps() {
    assert_eq!(ease_out(0.5), 0.75);
    assert_eq!(ease_out(2.0), 1.0);
    assert_eq!(ease_out(-1.0), 0.0);
}
