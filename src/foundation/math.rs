pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Scale an 8-bit value by a factor in `[0, 1]`, truncating like an integer cast.
pub(crate) fn scale_u8_trunc(v: u8, factor: f64) -> u8 {
    (f64::from(v) * factor.clamp(0.0, 1.0)) as u8
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Integer floor division matching Python's `//` for the signed sizes used in layout.
pub(crate) fn floor_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
