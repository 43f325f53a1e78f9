use crate::foundation::core::Canvas;
use crate::raster::layer::RgbaLayer;

/// Alpha above which a pixel counts as part of a character.
pub const CLIP_ALPHA_THRESHOLD: u8 = 30;

/// Half-open column ranges whose columns contain at least one pixel above the alpha threshold.
pub fn column_regions(layer: &RgbaLayer) -> Vec<(u32, u32)> {
    let mut regions = Vec::new();
    let mut start = None;
    for x in 0..layer.width() {
        let inked = column_has_ink(layer, x, 0..layer.height());
        match (inked, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                regions.push((s, x));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        regions.push((s, layer.width()));
    }
    regions
}

fn column_has_ink(layer: &RgbaLayer, x: u32, rows: std::ops::Range<u32>) -> bool {
    rows.into_iter()
        .any(|y| layer.alpha(x as i32, y as i32) > CLIP_ALPHA_THRESHOLD)
}

/// First and one-past-last inked rows inside the columns `[x0, x1)`.
fn row_extent(layer: &RgbaLayer, x0: u32, x1: u32) -> Option<(u32, u32)> {
    let inked = |y: u32| (x0..x1).any(|x| layer.alpha(x as i32, y as i32) > CLIP_ALPHA_THRESHOLD);
    let top = (0..layer.height()).find(|&y| inked(y))?;
    let bottom = (0..layer.height()).rev().find(|&y| inked(y))?;
    Some((top, bottom + 1))
}

/// Drop every character region of `layer` (pasted at `(x, y)`) that is not fully on `canvas`.
///
/// A layer that is entirely inside the canvas is returned unchanged. Kept regions stay at their
/// original pixel positions; when nothing survives a 1x1 transparent layer is returned.
pub fn clip_to_canvas_by_char(layer: &RgbaLayer, x: i32, y: i32, canvas: Canvas) -> RgbaLayer {
    let (cw, ch) = (i64::from(canvas.width), i64::from(canvas.height));
    let (x, y) = (i64::from(x), i64::from(y));
    if x >= 0
        && y >= 0
        && x + i64::from(layer.width()) <= cw
        && y + i64::from(layer.height()) <= ch
    {
        return layer.clone();
    }

    let regions = column_regions(layer);
    let kept: Vec<(u32, u32)> = regions
        .iter()
        .copied()
        .filter(|&(a, b)| {
            if x + i64::from(a) < 0 || x + i64::from(b) > cw {
                return false;
            }
            row_extent(layer, a, b).is_some_and(|(top, bottom)| {
                y + i64::from(top) >= 0 && y + i64::from(bottom) <= ch
            })
        })
        .collect();

    if kept.is_empty() {
        tracing::warn!(regions = regions.len(), "every character left the canvas; text hidden");
        return RgbaLayer::new(1, 1);
    }
    tracing::debug!(
        regions = regions.len(),
        kept = kept.len(),
        "clipped characters crossing the canvas edge"
    );
    let mut out = layer.clone();
    out.retain_columns(&kept);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/constraint/clip.rs"]
mod tests;
