//! Per-frame animation: the easing curve and the named effects built on it.

/// Easing curve.
pub mod ease;
pub mod effect;
