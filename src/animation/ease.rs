/// Quadratic ease-out, `1 - (1 - t)^2`, with `t` clamped to `[0, 1]`.
///
/// Every effect's motion is shaped by this one curve.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
