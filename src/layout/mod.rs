//! Character placement for horizontal and vertical text blocks.

/// Horizontal and vertical block layout.
pub mod engine;
