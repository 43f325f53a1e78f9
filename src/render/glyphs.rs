use std::collections::HashMap;

use crate::font::glyph::{GlyphBitmap, GlyphFace, middle_anchor_origin};
use crate::foundation::error::CaptionResult;
use crate::foundation::math::{lerp, scale_u8_trunc};
use crate::layout::engine::{LayoutOpts, layout_text, measure_block};
use crate::raster::blur::{blur_alpha8, kernel_radius};
use crate::raster::layer::{CoverageMask, RgbaLayer};
use crate::style::color::Rgb8;
use crate::style::spec::{
    FontWeight, GradientMode, GradientSpec, LayoutDirection, ShadowSpec, StrokePosition, StyleSpec,
};

const REGULAR_OFFSETS: [(i32, i32); 1] = [(0, 0)];
const BOLD_OFFSETS: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
const HEAVY_OFFSETS: [(i32, i32); 8] = [
    (0, 0),
    (1, 0),
    (2, 0),
    (0, 1),
    (1, 1),
    (2, 1),
    (0, 2),
    (1, 2),
];
const ULTRA_HEAVY_OFFSETS: [(i32, i32); 16] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (-1, 2),
    (0, -1),
    (0, 0),
    (0, 1),
    (0, 2),
    (1, -1),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, -1),
    (2, 0),
    (2, 1),
    (2, 2),
];

/// Stamp offsets used to synthesize `weight`.
pub fn weight_offsets(weight: FontWeight) -> &'static [(i32, i32)] {
    match weight {
        FontWeight::Regular => &REGULAR_OFFSETS,
        FontWeight::Bold => &BOLD_OFFSETS,
        FontWeight::Heavy => &HEAVY_OFFSETS,
        FontWeight::UltraHeavy => &ULTRA_HEAVY_OFFSETS,
    }
}

/// Ring offsets sampled for a stroke of `size` pixels, deduplicated in sampling order.
pub fn stroke_offsets(size: u32) -> Vec<(i32, i32)> {
    let step = if size <= 5 { 10 } else { 15 };
    let mut offsets = Vec::new();
    for angle in (0..360).step_by(step) {
        let rad = f64::from(angle).to_radians();
        let (sin, cos) = rad.sin_cos();
        for distance in 1..=size {
            let d = f64::from(distance);
            let o = ((cos * d) as i32, (sin * d) as i32);
            if !offsets.contains(&o) {
                offsets.push(o);
            }
        }
    }
    offsets
}

/// Transparent margin around the text block inside a glyph layer.
pub fn layer_padding(style: &StyleSpec) -> i32 {
    let base = (style.font_size as i32 / 8).max(8);
    base + style.stroke.size as i32 + 2 + kernel_radius(style.shadow.blur as f32) as i32
}

/// Gradient progress in `[0, 1]` for block-relative pixel `(x, y)` of a `w x h` block.
pub fn gradient_progress(
    mode: GradientMode,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    intensity: f64,
) -> f64 {
    let (w, h) = (w.max(1), h.max(1));
    let x = f64::from(x.clamp(0, w - 1));
    let y = f64::from(y.clamp(0, h - 1));
    let p = match mode {
        GradientMode::None => 0.0,
        GradientMode::Linear => {
            if w > 1 {
                x / f64::from(w - 1) * intensity
            } else {
                0.0
            }
        }
        GradientMode::Radial => {
            let (cx, cy) = (f64::from(w / 2), f64::from(h / 2));
            let max_dist = (cx * cx + cy * cy).sqrt();
            if max_dist > 0.0 {
                ((x - cx).powi(2) + (y - cy).powi(2)).sqrt() / max_dist * intensity
            } else {
                0.0
            }
        }
        GradientMode::Diagonal => (x / f64::from(w) + y / f64::from(h)) / 2.0 * intensity,
    };
    p.clamp(0.0, 1.0)
}

/// Three-stop gradient color at progress `p`.
pub fn gradient_color(spec: &GradientSpec, p: f64) -> Rgb8 {
    let (a, b, t) = if p < 0.5 {
        (spec.start, spec.mid, p * 2.0)
    } else {
        (spec.mid, spec.end, (p - 0.5) * 2.0)
    };
    let [ar, ag, ab] = a.channels_f64();
    let [br, bg, bb] = b.channels_f64();
    Rgb8::new(
        lerp(ar, br, t) as u8,
        lerp(ag, bg, t) as u8,
        lerp(ab, bb, t) as u8,
    )
}

/// Rendered text block plus the geometry needed to anchor it.
#[derive(Clone, Debug)]
pub struct GlyphLayer {
    /// Premultiplied raster, text block centered inside `padding`.
    pub layer: RgbaLayer,
    /// Margin between the layer edge and the text block.
    pub padding: i32,
    /// Text block width.
    pub block_width: i32,
    /// Text block height.
    pub block_height: i32,
}

/// Render `text` into a glyph layer (fill, weight, stroke and gradient; no opacity, no shadow).
///
/// `visible_chars` hides placements past the cutoff without moving the others.
pub fn render_glyph_layer(
    face: &dyn GlyphFace,
    text: &str,
    style: &StyleSpec,
    visible_chars: Option<usize>,
) -> CaptionResult<GlyphLayer> {
    let opts = LayoutOpts {
        direction: style.direction,
        align: style.align,
        spacing: style.spacing,
    };
    let (block_width, block_height) = measure_block(face, text, opts);
    let padding = layer_padding(style);
    let width = (block_width + 2 * padding).max(1);
    let height = (block_height + 2 * padding).max(1);

    let layout = layout_text(face, text, opts, width, height);
    let fill = stamp_fill(face, layout.visible(visible_chars), style.weight, width, height);

    let mut layer = RgbaLayer::new(width as u32, height as u32);
    let stroke = &style.stroke;
    if stroke.is_active() && stroke.position != StrokePosition::Inner {
        let outline = fill.dilate(&stroke_offsets(stroke.size));
        layer.paint_solid(&outline, stroke.color, stroke.opacity)?;
    }

    if style.gradient.is_active() {
        let mode = match style.direction {
            LayoutDirection::Vertical => GradientMode::Linear,
            LayoutDirection::Horizontal => style.gradient.mode,
        };
        let (left, top) = ((width - block_width) / 2, (height - block_height) / 2);
        layer.paint_with(&fill, 1.0, |x, y| {
            let p = gradient_progress(
                mode,
                x as i32 - left,
                y as i32 - top,
                block_width,
                block_height,
                style.gradient.intensity,
            );
            gradient_color(&style.gradient, p)
        })?;
    } else {
        layer.paint_solid(&fill, style.color, 1.0)?;
    }

    if stroke.is_active() && stroke.position == StrokePosition::Inner {
        let inner = fill.dilate(&stroke_offsets(stroke.size)).intersect(&fill)?;
        layer.paint_solid(&inner, stroke.color, stroke.opacity)?;
    }

    Ok(GlyphLayer {
        layer,
        padding,
        block_width,
        block_height,
    })
}

fn stamp_fill(
    face: &dyn GlyphFace,
    placements: &[crate::layout::engine::Placement],
    weight: FontWeight,
    width: i32,
    height: i32,
) -> CoverageMask {
    let mut mask = CoverageMask::new(width as u32, height as u32);
    let mut bitmaps: HashMap<char, GlyphBitmap> = HashMap::new();
    for p in placements {
        let bmp = bitmaps.entry(p.ch).or_insert_with(|| face.rasterize(p.ch));
        if bmp.coverage.is_empty() {
            continue;
        }
        let (pen_x, baseline) = middle_anchor_origin(face, bmp.advance, p.cx, p.cy);
        let (x0, y0) = (pen_x + bmp.left, baseline + bmp.top);
        for &(dx, dy) in weight_offsets(weight) {
            mask.stamp(bmp, x0 + dx, y0 + dy);
        }
    }
    mask
}

/// Blurred black shadow of `layer`, or `None` when the shadow is disabled.
///
/// The result has the same size as `layer`; the caller applies [`ShadowSpec::offset`].
pub fn shadow_layer(layer: &RgbaLayer, shadow: &ShadowSpec) -> CaptionResult<Option<RgbaLayer>> {
    if !shadow.is_active() {
        return Ok(None);
    }
    let alpha: Vec<u8> = layer
        .data()
        .chunks_exact(4)
        .map(|px| scale_u8_trunc(px[3], shadow.intensity))
        .collect();
    let alpha = blur_alpha8(&alpha, layer.width(), layer.height(), shadow.blur as f32)?;
    let data = alpha.iter().flat_map(|&a| [0, 0, 0, a]).collect();
    RgbaLayer::from_raw(layer.width(), layer.height(), data).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyphs.rs"]
mod tests;
