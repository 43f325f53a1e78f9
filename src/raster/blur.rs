use crate::foundation::error::{CaptionError, CaptionResult};

/// Kernel radius used for a Gaussian of standard deviation `sigma`.
pub fn kernel_radius(sigma: f32) -> u32 {
    (sigma * 3.0).ceil().max(0.0) as u32
}

/// Separable Gaussian blur of a single 8-bit channel (Q16 fixed-point weights).
///
/// `sigma <= 0` returns the input unchanged. Edge pixels are clamped.
pub fn blur_alpha8(src: &[u8], width: u32, height: u32, sigma: f32) -> CaptionResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| CaptionError::raster("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(CaptionError::raster(
            "blur_alpha8 expects src matching width*height",
        ));
    }
    if !sigma.is_finite() {
        return Err(CaptionError::validation("blur sigma must be finite"));
    }
    let radius = kernel_radius(sigma);
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CaptionResult<Vec<u32>> {
    if sigma <= 0.0 {
        return Err(CaptionError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(CaptionError::raster("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    // Push rounding drift into the center tap so the kernel sums to exactly 1.0.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        let row = (y * w) as usize;
        for x in 0..w {
            let acc: u64 = k
                .iter()
                .enumerate()
                .map(|(ki, &kw)| {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    u64::from(kw) * u64::from(src[row + sx as usize])
                })
                .sum();
            dst[row + x as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let acc: u64 = k
                .iter()
                .enumerate()
                .map(|(ki, &kw)| {
                    let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                    u64::from(kw) * u64::from(src[(sy * w + x) as usize])
                })
                .sum();
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
