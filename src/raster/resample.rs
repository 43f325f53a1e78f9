use image::imageops::{self, FilterType};
use kurbo::{Affine, Point, Rect, Vec2};

use crate::foundation::error::{CaptionError, CaptionResult};
use crate::raster::layer::RgbaLayer;

/// Target size of a layer scaled by `factor`, never smaller than 1x1.
pub fn scaled_size(width: u32, height: u32, factor: f64) -> (u32, u32) {
    (
        ((f64::from(width) * factor) as u32).max(1),
        ((f64::from(height) * factor) as u32).max(1),
    )
}

/// Lanczos3 resample of a premultiplied layer.
///
/// Factors of exactly 1 or non-positive factors return an unchanged copy.
pub fn scale_layer(layer: &RgbaLayer, factor: f64) -> CaptionResult<RgbaLayer> {
    if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
        return Ok(layer.clone());
    }
    let (nw, nh) = scaled_size(layer.width(), layer.height(), factor);
    let img = image::RgbaImage::from_raw(layer.width(), layer.height(), layer.data().to_vec())
        .ok_or_else(|| CaptionError::raster("layer buffer does not match its dimensions"))?;
    let resized = imageops::resize(&img, nw, nh, FilterType::Lanczos3);
    let mut data = resized.into_raw();
    // Lanczos ringing can push color above alpha; keep the buffer premultiplied.
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = (*c).min(a);
        }
    }
    RgbaLayer::from_raw(nw, nh, data)
}

/// Rotate a layer clockwise (screen space) by `degrees`, growing the canvas to fit.
pub fn rotate_layer(layer: &RgbaLayer, degrees: f64) -> CaptionResult<RgbaLayer> {
    if !degrees.is_finite() {
        return Err(CaptionError::validation("rotation must be finite"));
    }
    if degrees % 360.0 == 0.0 {
        return Ok(layer.clone());
    }

    let (w, h) = (f64::from(layer.width()), f64::from(layer.height()));
    let rotation = Affine::rotate(degrees.to_radians());
    let bounds = rotation.transform_rect_bbox(Rect::new(0.0, 0.0, w, h));
    // Round away tiny float noise before taking the integer extent.
    let snap = |v: f64| (v * 1e6).round() / 1e6;
    let nw = (snap(bounds.x1).ceil() - snap(bounds.x0).floor()).max(1.0) as u32;
    let nh = (snap(bounds.y1).ceil() - snap(bounds.y0).floor()).max(1.0) as u32;

    let forward = Affine::translate(Vec2::new(f64::from(nw) / 2.0, f64::from(nh) / 2.0))
        * rotation
        * Affine::translate(Vec2::new(-w / 2.0, -h / 2.0));
    let inverse = forward.inverse();

    let mut out = vec![0u8; nw as usize * nh as usize * 4];
    for oy in 0..nh {
        for ox in 0..nw {
            let src = inverse * Point::new(f64::from(ox) + 0.5, f64::from(oy) + 0.5);
            let px = sample_bicubic(layer, src.x - 0.5, src.y - 0.5);
            let i = (oy as usize * nw as usize + ox as usize) * 4;
            out[i..i + 4].copy_from_slice(&px);
        }
    }
    RgbaLayer::from_raw(nw, nh, out)
}

/// Catmull-Rom style cubic weight (a = -0.5).
fn cubic_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

/// Bicubic sample at pixel-center coordinates; outside pixels are transparent.
fn sample_bicubic(layer: &RgbaLayer, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (f64::from(layer.width()), f64::from(layer.height()));
    if x < -1.0 || y < -1.0 || x > w || y > h {
        return [0; 4];
    }
    let x0 = x.floor();
    let y0 = y.floor();
    let mut acc = [0.0f64; 4];
    for j in -1..=2 {
        let wy = cubic_weight(y - (y0 + f64::from(j)));
        if wy == 0.0 {
            continue;
        }
        for i in -1..=2 {
            let wx = cubic_weight(x - (x0 + f64::from(i)));
            if wx == 0.0 {
                continue;
            }
            let p = layer.pixel(x0 as i32 + i, y0 as i32 + j);
            let wgt = wx * wy;
            for c in 0..4 {
                acc[c] += wgt * f64::from(p[c]);
            }
        }
    }
    let a = acc[3].round().clamp(0.0, 255.0) as u8;
    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = (acc[c].round().clamp(0.0, 255.0) as u8).min(a);
    }
    out[3] = a;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/resample.rs"]
mod tests;
