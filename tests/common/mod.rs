//! Fixtures shared by the integration tests.
#![allow(dead_code, unused_imports)]

use captionfx::FrameSequence;

#[path = "../unit/support.rs"]
mod support;

pub(crate) use support::{BlockFace, BlockFonts};

/// `count` frames of `w × h` filled with a per-frame gray level.
pub fn gradient_batch(count: usize, w: u32, h: u32) -> FrameSequence {
    let per = (w * h * 3) as usize;
    let mut data = Vec::with_capacity(per * count);
    for i in 0..count {
        let v = (i as f32 + 1.0) / (count as f32 + 2.0);
        data.extend(std::iter::repeat_n(v, per));
    }
    FrameSequence::from_raw(count, w, h, data).unwrap()
}
