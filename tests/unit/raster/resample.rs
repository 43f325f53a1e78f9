use super::*;

fn solid(w: u32, h: u32) -> RgbaLayer {
    RgbaLayer::from_raw(w, h, [255, 255, 255, 255].repeat((w * h) as usize)).unwrap()
}

#[test]
fn scaled_size_truncates_and_never_collapses() {
    assert_eq!(scaled_size(100, 50, 0.5), (50, 25));
    assert_eq!(scaled_size(3, 3, 0.1), (1, 1));
    assert_eq!(scaled_size(10, 10, 1.55), (15, 15));
}

#[test]
fn scale_layer_resizes_and_keeps_solid_fill() {
    let out = scale_layer(&solid(4, 4), 2.0).unwrap();
    assert_eq!((out.width(), out.height()), (8, 8));
    assert_eq!(out.pixel(4, 4), [255, 255, 255, 255]);

    let same = scale_layer(&solid(4, 4), 1.0).unwrap();
    assert_eq!(same, solid(4, 4));
    let ignored = scale_layer(&solid(4, 4), 0.0).unwrap();
    assert_eq!(ignored, solid(4, 4));
}

#[test]
fn scaled_layers_stay_premultiplied() {
    let mut data = vec![0u8; 6 * 6 * 4];
    for px in data.chunks_exact_mut(4).step_by(2) {
        px.copy_from_slice(&[200, 100, 50, 200]);
    }
    let layer = RgbaLayer::from_raw(6, 6, data).unwrap();
    let out = scale_layer(&layer, 1.7).unwrap();
    assert!(out.data().chunks_exact(4).all(|px| px[..3].iter().all(|&c| c <= px[3])));
}

#[test]
fn rotate_90_is_clockwise_and_swaps_dimensions() {
    let mut data = vec![0u8; 4 * 2 * 4];
    data[..4].copy_from_slice(&[255, 255, 255, 255]);
    let layer = RgbaLayer::from_raw(4, 2, data).unwrap();

    let out = rotate_layer(&layer, 90.0).unwrap();
    assert_eq!((out.width(), out.height()), (2, 4));
    assert_eq!(out.alpha(1, 0), 255);
    assert_eq!(out.alpha(0, 0), 0);
}

#[test]
fn rotate_full_turn_is_identity() {
    let layer = solid(3, 5);
    assert_eq!(rotate_layer(&layer, 0.0).unwrap(), layer);
    assert_eq!(rotate_layer(&layer, 360.0).unwrap(), layer);
}

#[test]
fn rotate_expands_canvas() {
    let out = rotate_layer(&solid(10, 10), 45.0).unwrap();
    assert!(out.width() > 10 && out.height() > 10);
    // Center stays covered, corners of the expanded canvas stay empty.
    assert_eq!(out.alpha(out.width() as i32 / 2, out.height() as i32 / 2), 255);
    assert_eq!(out.alpha(0, 0), 0);
}

#[test]
fn rotate_rejects_non_finite_angles() {
    assert!(rotate_layer(&solid(2, 2), f64::INFINITY).is_err());
}

#[test]
fn cubic_weights_interpolate() {
    assert_eq!(cubic_weight(0.0), 1.0);
    assert_eq!(cubic_weight(1.0), 0.0);
    assert_eq!(cubic_weight(2.0), 0.0);
    let sum: f64 = [-1.3, -0.3, 0.7, 1.7].iter().map(|&t| cubic_weight(t)).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}
