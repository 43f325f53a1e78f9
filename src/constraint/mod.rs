//! Canvas constraint policies: font auto-shrink and per-character clipping.

/// Per-character clipping against the frame edges.
pub mod clip;
/// Font auto-shrink.
pub mod shrink;
