use crate::foundation::error::{CaptionError, CaptionResult};

/// Half-open frame window `[start, end)` during which the overlay is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DisplayWindow {
    /// Inclusive first displayed frame.
    pub start: u64,
    /// Exclusive end frame.
    pub end: u64, // exclusive
}

impl DisplayWindow {
    /// Create a validated window with `start <= end`.
    pub fn new(start: u64, end: u64) -> CaptionResult<Self> {
        if start > end {
            return Err(CaptionError::validation(
                "DisplayWindow start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the window.
    pub fn len_frames(self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Return `true` when the window has no frames.
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Return `true` when `frame` is inside `[start, end)`.
    pub fn contains(self, frame: u64) -> bool {
        self.start <= frame && frame < self.end
    }

    /// Frame index relative to the window start, or `None` outside the window.
    pub fn relative(self, frame: u64) -> Option<u64> {
        self.contains(frame).then(|| frame - self.start)
    }

    /// Clamp the window end to a batch of `len` frames.
    pub fn clamp_to(self, len: u64) -> Self {
        let end = self.end.min(len);
        Self {
            start: self.start.min(end),
            end,
        }
    }
}

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Return the pixel as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
