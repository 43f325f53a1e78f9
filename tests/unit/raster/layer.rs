use super::*;

fn block(w: usize, h: usize) -> GlyphBitmap {
    GlyphBitmap {
        width: w,
        height: h,
        coverage: vec![255; w * h],
        left: 0,
        top: -(h as i32),
        advance: w as f32,
    }
}

#[test]
fn over_matches_premultiplied_source_over() {
    assert_eq!(over([1, 2, 3, 4], [9, 9, 9, 0]), [1, 2, 3, 4]);
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
    assert_eq!(over([0, 0, 0, 0], [100, 110, 120, 200]), [100, 110, 120, 200]);
    assert_eq!(over([200, 200, 200, 255], [0, 0, 0, 128]), [100, 100, 100, 255]);
}

#[test]
fn stamp_clips_and_max_combines() {
    let mut m = CoverageMask::new(4, 4);
    m.stamp(&block(3, 3), -1, -1);
    assert_eq!(m.get(0, 0), 255);
    assert_eq!(m.get(1, 1), 255);
    assert_eq!(m.get(2, 2), 0);

    let mut faint = block(1, 1);
    faint.coverage[0] = 10;
    m.stamp(&faint, 0, 0);
    assert_eq!(m.get(0, 0), 255);
    assert_eq!(m.get(-5, 0), 0);
}

#[test]
fn dilate_grows_by_offsets() {
    let mut m = CoverageMask::new(5, 5);
    m.stamp(&block(1, 1), 2, 2);
    let d = m.dilate(&[(0, 0), (1, 0), (-1, 0), (0, 1)]);
    assert_eq!(d.get(2, 2), 255);
    assert_eq!(d.get(3, 2), 255);
    assert_eq!(d.get(1, 2), 255);
    assert_eq!(d.get(2, 3), 255);
    assert_eq!(d.get(2, 1), 0);
}

#[test]
fn intersect_requires_equal_sizes() {
    let a = CoverageMask::new(2, 2);
    let b = CoverageMask::new(3, 2);
    assert!(matches!(a.intersect(&b), Err(CaptionError::Raster(_))));
    assert!(a.intersect(&a).unwrap().is_blank());
}

#[test]
fn paint_solid_respects_coverage_and_opacity() {
    let mut m = CoverageMask::new(2, 1);
    m.stamp(&block(1, 1), 0, 0);
    let mut layer = RgbaLayer::new(2, 1);
    layer.paint_solid(&m, Rgb8::new(255, 0, 0), 1.0).unwrap();
    assert_eq!(layer.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(layer.pixel(1, 0), [0, 0, 0, 0]);

    let mut half = RgbaLayer::new(2, 1);
    half.paint_solid(&m, Rgb8::WHITE, 0.5).unwrap();
    assert_eq!(half.alpha(0, 0), 127);

    let wrong = CoverageMask::new(1, 1);
    assert!(layer.paint_solid(&wrong, Rgb8::WHITE, 1.0).is_err());
}

#[test]
fn scale_alpha_truncates_and_keeps_premultiplication() {
    let mut layer = RgbaLayer::from_raw(1, 1, vec![255, 128, 0, 255]).unwrap();
    layer.scale_alpha(0.5);
    assert_eq!(layer.pixel(0, 0), [127, 64, 0, 127]);
    layer.scale_alpha(0.0);
    assert!(layer.is_blank());
}

#[test]
fn from_raw_validates_length() {
    assert!(RgbaLayer::from_raw(2, 2, vec![0; 15]).is_err());
    assert!(RgbaLayer::from_raw(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn retain_columns_zeroes_everything_else() {
    let mut layer = RgbaLayer::from_raw(4, 1, vec![255; 16]).unwrap();
    layer.retain_columns(&[(1, 3)]);
    assert_eq!(layer.alpha(0, 0), 0);
    assert_eq!(layer.alpha(1, 0), 255);
    assert_eq!(layer.alpha(2, 0), 255);
    assert_eq!(layer.alpha(3, 0), 0);
}

#[test]
fn composite_onto_rgb_clips_to_frame() {
    let layer = RgbaLayer::from_raw(2, 2, [255, 255, 255, 255].repeat(4)).unwrap();
    let mut frame = vec![0u8; 3 * 3 * 3];
    layer.composite_onto_rgb(&mut frame, 3, 3, 2, -1).unwrap();
    // Only the layer's bottom-left pixel lands at frame (2, 0).
    let lit: Vec<usize> = frame
        .chunks_exact(3)
        .enumerate()
        .filter(|(_, px)| px[0] != 0)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(lit, vec![2]);
    assert!(layer.composite_onto_rgb(&mut frame[..5], 3, 3, 0, 0).is_err());
}
