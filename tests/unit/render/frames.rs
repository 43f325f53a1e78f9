use super::*;

#[test]
fn from_raw_validates_the_shape() {
    assert!(FrameSequence::from_raw(2, 4, 3, vec![0.0; 2 * 4 * 3 * 3]).is_ok());
    let err = FrameSequence::from_raw(2, 4, 3, vec![0.0; 10]).unwrap_err();
    assert!(matches!(err, CaptionError::Validation(_)));
}

#[test]
fn frames_are_addressed_row_major() {
    let mut data = vec![0.0; 2 * 2 * 2 * 3];
    data[12] = 0.5;
    let seq = FrameSequence::from_raw(2, 2, 2, data).unwrap();
    assert_eq!(seq.frame(1).unwrap()[0], 0.5);
    assert_eq!(seq.frame(0).unwrap()[0], 0.0);
    assert!(seq.frame(2).is_none());
    assert_eq!(seq.canvas(), Canvas::new(2, 2));
}

#[test]
fn rgb8_round_trip_truncates() {
    let seq = FrameSequence::from_raw(1, 1, 1, vec![1.0, 0.5, -3.0]).unwrap();
    assert_eq!(seq.frame_rgb8(0).unwrap(), vec![255, 127, 0]);

    let mut seq = FrameSequence::black(1, 1, 1).unwrap();
    seq.store_rgb8(0, &[255, 0, 51]).unwrap();
    assert_eq!(seq.frame(0).unwrap(), &[1.0, 0.0, 0.2]);
    assert!(seq.store_rgb8(0, &[1, 2]).is_err());
    assert!(seq.store_rgb8(3, &[1, 2, 3]).is_err());
}

#[test]
fn from_rgb8_frames_rejects_mismatched_frames() {
    let ok = FrameSequence::from_rgb8_frames(1, 1, &[vec![0, 0, 0], vec![255, 255, 255]]).unwrap();
    assert_eq!(ok.len(), 2);
    assert!(FrameSequence::from_rgb8_frames(1, 1, &[vec![0, 0]]).is_err());
}

#[test]
fn empty_batches_are_valid() {
    let seq = FrameSequence::black(0, 8, 8).unwrap();
    assert!(seq.is_empty());
    assert!(seq.frame(0).is_none());
}
