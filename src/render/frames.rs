use crate::foundation::core::Canvas;
use crate::foundation::error::{CaptionError, CaptionResult};

/// A batch of RGB frames as `f32` samples in `[0, 1]`, laid out `N x H x W x 3`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    count: usize,
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FrameSequence {
    /// Wrap a flat `N x H x W x 3` buffer, validating its length.
    pub fn from_raw(count: usize, width: u32, height: u32, data: Vec<f32>) -> CaptionResult<Self> {
        let expected = count
            .checked_mul(frame_len(width, height)?)
            .ok_or_else(|| CaptionError::validation("frame batch size overflow"))?;
        if data.len() != expected {
            return Err(CaptionError::validation(format!(
                "frame batch holds {} samples, expected {expected} for {count}x{height}x{width}x3",
                data.len()
            )));
        }
        Ok(Self {
            count,
            width,
            height,
            data,
        })
    }

    /// `count` black frames.
    pub fn black(count: usize, width: u32, height: u32) -> CaptionResult<Self> {
        let len = count
            .checked_mul(frame_len(width, height)?)
            .ok_or_else(|| CaptionError::validation("frame batch size overflow"))?;
        Self::from_raw(count, width, height, vec![0.0; len])
    }

    /// Build a batch from RGB8 frames of identical size.
    pub fn from_rgb8_frames(width: u32, height: u32, frames: &[Vec<u8>]) -> CaptionResult<Self> {
        let per_frame = frame_len(width, height)?;
        let mut data = Vec::with_capacity(per_frame * frames.len());
        for (i, f) in frames.iter().enumerate() {
            if f.len() != per_frame {
                return Err(CaptionError::validation(format!(
                    "frame {i} holds {} bytes, expected {per_frame}",
                    f.len()
                )));
            }
            data.extend(f.iter().map(|&v| f32::from(v) / 255.0));
        }
        Self::from_raw(frames.len(), width, height, data)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Return `true` when the batch has no frames.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Frame width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame size as a canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Flat sample buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consume into the flat sample buffer.
    pub fn into_raw(self) -> Vec<f32> {
        self.data
    }

    /// Samples of frame `index`.
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        let n = self.width as usize * self.height as usize * 3;
        (index < self.count).then(|| &self.data[index * n..(index + 1) * n])
    }

    /// Mutable samples of frame `index`.
    pub fn frame_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        let n = self.width as usize * self.height as usize * 3;
        (index < self.count).then(move || &mut self.data[index * n..(index + 1) * n])
    }

    /// Frame `index` quantized to RGB8 (`trunc(clamp(v) * 255)`).
    pub fn frame_rgb8(&self, index: usize) -> Option<Vec<u8>> {
        self.frame(index).map(quantize)
    }

    /// Overwrite frame `index` from RGB8 samples.
    pub fn store_rgb8(&mut self, index: usize, rgb: &[u8]) -> CaptionResult<()> {
        let frame = self
            .frame_mut(index)
            .ok_or_else(|| CaptionError::validation(format!("frame {index} out of range")))?;
        if frame.len() != rgb.len() {
            return Err(CaptionError::validation("RGB8 frame does not match batch frame size"));
        }
        for (dst, &src) in frame.iter_mut().zip(rgb) {
            *dst = f32::from(src) / 255.0;
        }
        Ok(())
    }
}

fn frame_len(width: u32, height: u32) -> CaptionResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(3))
        .ok_or_else(|| CaptionError::validation("frame size overflow"))
}

fn quantize(samples: &[f32]) -> Vec<u8> {
    samples
        .iter()
        .map(|&v| {
            let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
            (v * 255.0) as u8
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/frames.rs"]
mod tests;
