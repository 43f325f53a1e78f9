use crate::font::cache::{FontCache, MIN_FONT_PX, clamp_font_size};
use crate::foundation::core::Canvas;
use crate::foundation::error::CaptionResult;
use crate::layout::engine::{LayoutOpts, measure_block};
use crate::style::spec::StyleSpec;

/// Maximum number of measure/resize rounds.
pub const SHRINK_MAX_ATTEMPTS: usize = 20;
/// Share of the canvas the text block may occupy.
pub const CANVAS_FILL_FRACTION: f64 = 0.95;
/// Extra reduction applied on every resize round.
const SHRINK_MARGIN: f64 = 0.95;

/// Font size, starting at the clamped `style.font_size`, whose block fits 95% of `canvas`.
///
/// The measured block includes the stroke on both sides. Every round shrinks by the measured
/// overflow ratio and a 5% margin; the loop ends once the block fits or the size stops changing at
/// the minimum font size.
pub fn fit_font_size(
    fonts: &mut FontCache,
    style: &StyleSpec,
    text: &str,
    canvas: Canvas,
) -> CaptionResult<u32> {
    let max_w = (f64::from(canvas.width) * CANVAS_FILL_FRACTION) as i32;
    let max_h = (f64::from(canvas.height) * CANVAS_FILL_FRACTION) as i32;
    let opts = LayoutOpts {
        direction: style.direction,
        align: style.align,
        spacing: style.spacing,
    };
    let stroke = 2 * style.stroke.size as i32;

    let mut size = clamp_font_size(style.font_size);
    for _ in 0..SHRINK_MAX_ATTEMPTS {
        let face = fonts.get(&style.font_id, size)?;
        let (w, h) = measure_block(face.as_ref(), text, opts);
        let (w, h) = (w + stroke, h + stroke);
        if w <= max_w && h <= max_h {
            return Ok(size);
        }

        let ratio = |limit: i32, v: i32| {
            if v > 0 {
                f64::from(limit) / f64::from(v)
            } else {
                f64::INFINITY
            }
        };
        let scale = ratio(max_w, w).min(ratio(max_h, h));
        let next = ((f64::from(size) * scale * SHRINK_MARGIN) as u32).max(MIN_FONT_PX);
        tracing::debug!(from = size, to = next, w, h, "shrinking font to fit canvas");
        if next == size {
            break;
        }
        size = next;
    }
    Ok(size)
}

#[cfg(test)]
#[path = "../../tests/unit/constraint/shrink.rs"]
mod tests;
