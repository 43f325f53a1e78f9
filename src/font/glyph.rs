use fontdue::{Font, FontSettings};

use crate::foundation::error::{CaptionError, CaptionResult};

/// Vertical font metrics in pixels, y up from the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline to the ascender line (positive).
    pub ascent: f32,
    /// Distance from the baseline to the descender line (usually negative).
    pub descent: f32,
}

/// Measured size of a single character, as used by layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphBox {
    /// Horizontal extent (rounded-up advance).
    pub width: i32,
    /// Ink height.
    pub height: i32,
}

/// 8-bit coverage of a single glyph, top row first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphBitmap {
    /// Bitmap width.
    pub width: usize,
    /// Bitmap height.
    pub height: usize,
    /// `width * height` coverage values.
    pub coverage: Vec<u8>,
    /// Left edge relative to the pen position.
    pub left: i32,
    /// Top row relative to the baseline, y down (negative above the baseline).
    pub top: i32,
    /// Horizontal advance in pixels.
    pub advance: f32,
}

/// A sized font face that can measure and rasterize single characters.
///
/// Implementations must be cheap to share; the font cache hands them out behind an `Arc`.
pub trait GlyphFace: Send + Sync {
    /// Pixel size this face was loaded at.
    fn size_px(&self) -> f32;

    /// Ascender and descender lines.
    fn line_metrics(&self) -> LineMetrics;

    /// Layout box of `ch`.
    fn glyph_box(&self, ch: char) -> GlyphBox;

    /// Coverage bitmap of `ch`.
    fn rasterize(&self, ch: char) -> GlyphBitmap;
}

/// Pen position and baseline that center `ch` on `(cx, cy)`.
///
/// Horizontally the advance is centered; vertically the midpoint between the ascender and
/// descender lines lands on `cy`.
pub fn middle_anchor_origin(face: &dyn GlyphFace, advance: f32, cx: i32, cy: i32) -> (i32, i32) {
    let lm = face.line_metrics();
    let pen_x = (cx as f32 - advance / 2.0).round() as i32;
    let baseline = (cy as f32 + (lm.ascent + lm.descent) / 2.0).round() as i32;
    (pen_x, baseline)
}

/// [`GlyphFace`] backed by a parsed `fontdue` font.
pub struct FontdueFace {
    font: Font,
    size_px: f32,
    metrics: LineMetrics,
}

impl FontdueFace {
    /// Parse font bytes (`ttf`/`otf`, first face of a collection) at `size_px`.
    pub fn from_bytes(bytes: Vec<u8>, size_px: f32) -> CaptionResult<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| CaptionError::font_load(format!("failed to parse font: {e}")))?;
        Ok(Self::from_font(font, size_px))
    }

    /// Wrap an already parsed font.
    pub fn from_font(font: Font, size_px: f32) -> Self {
        let metrics = font
            .horizontal_line_metrics(size_px)
            .map(|lm| LineMetrics {
                ascent: lm.ascent,
                descent: lm.descent,
            })
            .unwrap_or(LineMetrics {
                ascent: size_px * 0.8,
                descent: -size_px * 0.2,
            });
        Self {
            font,
            size_px,
            metrics,
        }
    }
}

impl GlyphFace for FontdueFace {
    fn size_px(&self) -> f32 {
        self.size_px
    }

    fn line_metrics(&self) -> LineMetrics {
        self.metrics
    }

    fn glyph_box(&self, ch: char) -> GlyphBox {
        let m = self.font.metrics(ch, self.size_px);
        GlyphBox {
            width: m.advance_width.ceil().max(0.0) as i32,
            height: m.height as i32,
        }
    }

    fn rasterize(&self, ch: char) -> GlyphBitmap {
        let (m, coverage) = self.font.rasterize(ch, self.size_px);
        GlyphBitmap {
            width: m.width,
            height: m.height,
            coverage,
            left: m.xmin,
            top: -(m.ymin + m.height as i32),
            advance: m.advance_width,
        }
    }
}

impl std::fmt::Debug for FontdueFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueFace")
            .field("size_px", &self.size_px)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/font/glyph.rs"]
mod tests;
