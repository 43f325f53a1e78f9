use super::*;
use crate::test_support::BlockFace;

#[test]
fn middle_anchor_centers_advance_and_line_box() {
    let face = BlockFace::new(40); // 24x28 blocks, ascent 28, descent 0
    let (pen_x, baseline) = middle_anchor_origin(&face, 24.0, 100, 50);
    assert_eq!(pen_x, 88);
    assert_eq!(baseline, 64);
}

#[test]
fn fontdue_face_rejects_garbage_bytes() {
    let err = FontdueFace::from_bytes(vec![0u8; 16], 32.0).unwrap_err();
    assert!(matches!(err, CaptionError::FontLoad(_)));
    assert!(err.is_fatal());
}

#[test]
fn block_face_whitespace_has_advance_but_no_ink() {
    let face = BlockFace::new(20);
    let b = face.glyph_box(' ');
    assert_eq!(b.width, face.glyph_w());
    assert_eq!(b.height, 0);
    let bmp = face.rasterize(' ');
    assert!(bmp.coverage.is_empty());
    assert_eq!(bmp.advance, face.glyph_w() as f32);
}
