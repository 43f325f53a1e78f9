use crate::font::glyph::GlyphBitmap;
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::foundation::math::{mul_div255_u8, scale_u8_trunc};
use crate::style::color::Rgb8;

/// Single-channel 8-bit coverage, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CoverageMask {
    /// Empty (all zero) mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Mask width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw coverage values.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage at `(x, y)`; zero outside the mask.
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Return `true` when no pixel has coverage.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Max-combine a glyph bitmap whose top-left lands on `(x0, y0)`.
    pub fn stamp(&mut self, glyph: &GlyphBitmap, x0: i32, y0: i32) {
        let (w, h) = (self.width as i32, self.height as i32);
        for gy in 0..glyph.height {
            let y = y0 + gy as i32;
            if y < 0 || y >= h {
                continue;
            }
            let src_row = &glyph.coverage[gy * glyph.width..(gy + 1) * glyph.width];
            let dst_row = y as usize * self.width as usize;
            for (gx, &c) in src_row.iter().enumerate() {
                let x = x0 + gx as i32;
                if c == 0 || x < 0 || x >= w {
                    continue;
                }
                let d = &mut self.data[dst_row + x as usize];
                *d = (*d).max(c);
            }
        }
    }

    /// Max of this mask shifted by every offset.
    pub fn dilate(&self, offsets: &[(i32, i32)]) -> Self {
        let mut out = Self::new(self.width, self.height);
        let (w, h) = (self.width as i32, self.height as i32);
        for &(dx, dy) in offsets {
            for y in 0..h {
                let sy = y - dy;
                if sy < 0 || sy >= h {
                    continue;
                }
                for x in 0..w {
                    let sx = x - dx;
                    if sx < 0 || sx >= w {
                        continue;
                    }
                    let v = self.data[(sy * w + sx) as usize];
                    let d = &mut out.data[(y * w + x) as usize];
                    *d = (*d).max(v);
                }
            }
        }
        out
    }

    /// Pixelwise minimum of two equally sized masks.
    pub fn intersect(&self, other: &Self) -> CaptionResult<Self> {
        if (self.width, self.height) != (other.width, other.height) {
            return Err(CaptionError::raster("mask intersection expects equal sizes"));
        }
        Ok(Self {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| a.min(b))
                .collect(),
        })
    }
}

/// Source-over for premultiplied RGBA8 pixels.
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Premultiplied RGBA8 raster, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaLayer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaLayer {
    /// Fully transparent layer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap premultiplied pixels, validating the buffer length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> CaptionResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CaptionError::raster("layer size overflow"))?;
        if data.len() != expected {
            return Err(CaptionError::raster(format!(
                "layer buffer holds {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Layer width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Layer height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, transparent outside the layer.
    pub fn pixel(&self, x: i32, y: i32) -> [u8; 4] {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return [0; 4];
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Alpha at `(x, y)`, zero outside the layer.
    pub fn alpha(&self, x: i32, y: i32) -> u8 {
        self.pixel(x, y)[3]
    }

    /// Return `true` when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Composite `color` at `opacity` through `mask`, source-over.
    pub fn paint_solid(
        &mut self,
        mask: &CoverageMask,
        color: Rgb8,
        opacity: f64,
    ) -> CaptionResult<()> {
        self.paint_with(mask, opacity, |_, _| color)
    }

    /// Composite a per-pixel color at `opacity` through `mask`, source-over.
    pub fn paint_with(
        &mut self,
        mask: &CoverageMask,
        opacity: f64,
        color_at: impl Fn(u32, u32) -> Rgb8,
    ) -> CaptionResult<()> {
        if (mask.width, mask.height) != (self.width, self.height) {
            return Err(CaptionError::raster("paint mask does not match layer size"));
        }
        let alpha_max = (255.0 * opacity.clamp(0.0, 1.0)) as u16;
        if alpha_max == 0 {
            return Ok(());
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = (y * self.width + x) as usize;
                let cov = mask.data[idx];
                if cov == 0 {
                    continue;
                }
                let a = mul_div255_u8(u16::from(cov), alpha_max);
                let c = color_at(x, y).with_alpha(a).to_array();
                let i = idx * 4;
                let dst = [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]];
                self.data[i..i + 4].copy_from_slice(&over(dst, c));
            }
        }
        Ok(())
    }

    /// Multiply every channel by `factor`, truncating like an integer alpha rescale.
    pub fn scale_alpha(&mut self, factor: f64) {
        if factor >= 1.0 {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = scale_u8_trunc(px[3], factor);
            for c in &mut px[..3] {
                *c = scale_u8_trunc(*c, factor).min(a);
            }
            px[3] = a;
        }
    }

    /// Keep only pixels whose column lies in one of `columns` (half-open ranges).
    pub fn retain_columns(&mut self, columns: &[(u32, u32)]) {
        for y in 0..self.height {
            for x in 0..self.width {
                if columns.iter().any(|&(a, b)| a <= x && x < b) {
                    continue;
                }
                let i = ((y * self.width + x) * 4) as usize;
                self.data[i..i + 4].fill(0);
            }
        }
    }

    /// Composite onto an opaque RGB8 frame with the layer's top-left at `(x, y)`, clipped.
    pub fn composite_onto_rgb(
        &self,
        frame: &mut [u8],
        frame_w: u32,
        frame_h: u32,
        x: i32,
        y: i32,
    ) -> CaptionResult<()> {
        if frame.len() != frame_w as usize * frame_h as usize * 3 {
            return Err(CaptionError::raster("frame buffer does not match its dimensions"));
        }
        for sy in 0..self.height as i32 {
            let fy = y + sy;
            if fy < 0 || fy >= frame_h as i32 {
                continue;
            }
            for sx in 0..self.width as i32 {
                let fx = x + sx;
                if fx < 0 || fx >= frame_w as i32 {
                    continue;
                }
                let s = self.pixel(sx, sy);
                if s[3] == 0 {
                    continue;
                }
                let inv = 255u16 - u16::from(s[3]);
                let i = (fy as usize * frame_w as usize + fx as usize) * 3;
                for c in 0..3 {
                    let d = mul_div255_u8(u16::from(frame[i + c]), inv);
                    frame[i + c] = s[c].saturating_add(d);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/layer.rs"]
mod tests;
