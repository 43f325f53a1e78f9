//! Hermetic glyph face shared by the unit and integration tests: every visible character is a
//! solid `0.6·size × 0.7·size` rectangle.

use std::sync::Arc;

use captionfx::font::glyph::{GlyphBitmap, GlyphBox, LineMetrics};
use captionfx::{CaptionError, CaptionResult, FontHandle, FontSource, GlyphFace};

pub(crate) struct BlockFace {
    size: f32,
    w: i32,
    h: i32,
}

impl BlockFace {
    pub(crate) fn new(size_px: u32) -> Self {
        let size = size_px as f32;
        Self {
            size,
            w: ((size * 0.6).round() as i32).max(1),
            h: ((size * 0.7).round() as i32).max(1),
        }
    }

    pub(crate) fn glyph_w(&self) -> i32 {
        self.w
    }

    pub(crate) fn glyph_h(&self) -> i32 {
        self.h
    }
}

impl GlyphFace for BlockFace {
    fn size_px(&self) -> f32 {
        self.size
    }

    fn line_metrics(&self) -> LineMetrics {
        LineMetrics {
            ascent: self.h as f32,
            descent: 0.0,
        }
    }

    fn glyph_box(&self, ch: char) -> GlyphBox {
        GlyphBox {
            width: self.w,
            height: if ch.is_whitespace() { 0 } else { self.h },
        }
    }

    fn rasterize(&self, ch: char) -> GlyphBitmap {
        if ch.is_whitespace() {
            return GlyphBitmap {
                advance: self.w as f32,
                ..GlyphBitmap::default()
            };
        }
        GlyphBitmap {
            width: self.w as usize,
            height: self.h as usize,
            coverage: vec![255; (self.w * self.h) as usize],
            left: 0,
            top: -self.h,
            advance: self.w as f32,
        }
    }
}

/// Serves [`BlockFace`]s for a fixed set of font ids.
pub(crate) struct BlockFonts {
    known: Vec<String>,
}

impl BlockFonts {
    pub(crate) fn new(ids: &[&str]) -> Self {
        Self {
            known: ids.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl FontSource for BlockFonts {
    fn load(&self, font_id: &str, size_px: u32) -> CaptionResult<FontHandle> {
        if !self.known.iter().any(|k| k == font_id) {
            return Err(CaptionError::font_not_found(font_id));
        }
        Ok(Arc::new(BlockFace::new(size_px)))
    }
}
