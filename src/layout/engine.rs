use crate::font::glyph::{GlyphBox, GlyphFace};
use crate::foundation::math::floor_div;
use crate::style::spec::{LayoutDirection, TextAlign};

/// Character used to size empty lines and the inter-line gap.
pub const REFERENCE_CHAR: char = 'A';
/// Inter-line gap as a fraction of the reference glyph height.
pub const LINE_GAP_FRACTION: f64 = 0.2;

/// A character centered on `(cx, cy)` in layer pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Character to draw.
    pub ch: char,
    /// Center x.
    pub cx: i32,
    /// Center y.
    pub cy: i32,
}

/// Result of laying a string out inside a `width x height` area.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextLayout {
    /// Placements in reading order, newlines excluded.
    pub placements: Vec<Placement>,
    /// Width of the widest line (or column).
    pub block_width: i32,
    /// Total height including line gaps.
    pub block_height: i32,
}

impl TextLayout {
    /// Placements before the typewriter cutoff; `None` shows everything.
    pub fn visible(&self, visible_chars: Option<usize>) -> &[Placement] {
        match visible_chars {
            Some(n) => &self.placements[..n.min(self.placements.len())],
            None => &self.placements,
        }
    }
}

/// Layout inputs taken from the style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOpts {
    /// Horizontal lines or a vertical column.
    pub direction: LayoutDirection,
    /// Line alignment within the block.
    pub align: TextAlign,
    /// Extra advance between characters; negative values are ignored.
    pub spacing: i32,
}

struct Line {
    glyphs: Vec<(char, GlyphBox)>,
    width: i32,
    height: i32,
}

/// Pen extent of a run of boxes along one axis; negative spacing counts as 0.
fn run_extent(sizes: impl ExactSizeIterator<Item = i32>, spacing: i32) -> i32 {
    let n = sizes.len();
    let spacing = spacing.max(0);
    sizes
        .enumerate()
        .map(|(i, s)| if i + 1 < n { s + spacing } else { s })
        .sum()
}

fn reference_height(face: &dyn GlyphFace) -> i32 {
    face.glyph_box(REFERENCE_CHAR).height
}

fn line_gap(face: &dyn GlyphFace) -> i32 {
    (f64::from(reference_height(face)) * LINE_GAP_FRACTION) as i32
}

fn measure_lines(face: &dyn GlyphFace, text: &str, spacing: i32) -> Vec<Line> {
    let ref_h = reference_height(face);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                return Line {
                    glyphs: Vec::new(),
                    width: 0,
                    height: ref_h,
                };
            }
            let glyphs: Vec<(char, GlyphBox)> =
                line.chars().map(|c| (c, face.glyph_box(c))).collect();
            let width = run_extent(glyphs.iter().map(|(_, b)| b.width), spacing);
            let height = glyphs.iter().map(|(_, b)| b.height).max().unwrap_or(0);
            Line {
                glyphs,
                width,
                height,
            }
        })
        .collect()
}

fn column_glyphs(face: &dyn GlyphFace, text: &str) -> Vec<(char, GlyphBox)> {
    text.chars()
        .filter(|&c| c != '\n')
        .map(|c| (c, face.glyph_box(c)))
        .collect()
}

/// Width and height of the laid-out block, without positioning anything.
pub fn measure_block(face: &dyn GlyphFace, text: &str, opts: LayoutOpts) -> (i32, i32) {
    match opts.direction {
        LayoutDirection::Vertical => {
            let glyphs = column_glyphs(face, text);
            let width = glyphs.iter().map(|(_, b)| b.width).max().unwrap_or(0);
            let height = run_extent(glyphs.iter().map(|(_, b)| b.height), opts.spacing);
            (width, height)
        }
        LayoutDirection::Horizontal => {
            let lines = measure_lines(face, text, opts.spacing);
            let gap = line_gap(face);
            let width = lines.iter().map(|l| l.width).max().unwrap_or(0);
            let height = lines.iter().map(|l| l.height).sum::<i32>()
                + gap * (lines.len() as i32 - 1).max(0);
            (width, height)
        }
    }
}

/// Lay `text` out centered inside a `width x height` area.
pub fn layout_text(
    face: &dyn GlyphFace,
    text: &str,
    opts: LayoutOpts,
    width: i32,
    height: i32,
) -> TextLayout {
    match opts.direction {
        LayoutDirection::Horizontal => layout_horizontal(face, text, opts, width, height),
        LayoutDirection::Vertical => layout_vertical(face, text, opts, width, height),
    }
}

fn layout_horizontal(
    face: &dyn GlyphFace,
    text: &str,
    opts: LayoutOpts,
    width: i32,
    height: i32,
) -> TextLayout {
    let lines = measure_lines(face, text, opts.spacing);
    let gap = line_gap(face);
    let block_width = lines.iter().map(|l| l.width).max().unwrap_or(0);
    let block_height =
        lines.iter().map(|l| l.height).sum::<i32>() + gap * (lines.len() as i32 - 1).max(0);

    let block_left = floor_div(i64::from(width - block_width), 2) as i32;
    let mut y = floor_div(i64::from(height - block_height), 2) as i32;
    let mut placements = Vec::new();

    for line in &lines {
        let start_x = match opts.align {
            TextAlign::Center => floor_div(i64::from(width - line.width), 2) as i32,
            TextAlign::Left => block_left,
            TextAlign::Right => block_left + (block_width - line.width),
        };
        let mut x = start_x;
        for &(ch, b) in &line.glyphs {
            placements.push(Placement {
                ch,
                cx: x + b.width / 2,
                cy: y + line.height / 2,
            });
            x += b.width + opts.spacing.max(0);
        }
        y += line.height + gap;
    }

    TextLayout {
        placements,
        block_width,
        block_height,
    }
}

fn layout_vertical(
    face: &dyn GlyphFace,
    text: &str,
    opts: LayoutOpts,
    width: i32,
    height: i32,
) -> TextLayout {
    let glyphs = column_glyphs(face, text);
    let block_width = glyphs.iter().map(|(_, b)| b.width).max().unwrap_or(0);
    let block_height = run_extent(glyphs.iter().map(|(_, b)| b.height), opts.spacing);

    let cx = width / 2;
    let mut y = floor_div(i64::from(height - block_height), 2) as i32;
    let placements = glyphs
        .iter()
        .map(|&(ch, b)| {
            let p = Placement {
                ch,
                cx,
                cy: y + b.height / 2,
            };
            y += b.height + opts.spacing.max(0);
            p
        })
        .collect();

    TextLayout {
        placements,
        block_width,
        block_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
