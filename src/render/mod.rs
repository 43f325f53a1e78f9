//! Glyph layers, frame batches and the per-frame overlay compositor.

/// Float frame batches.
pub mod frames;
/// Text block rasterization: weight, stroke, gradient and shadow.
pub mod glyphs;
/// Per-frame overlay compositing.
pub mod overlay;
