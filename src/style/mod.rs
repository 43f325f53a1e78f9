//! Style model: colors, anchor presets and the per-request [`spec::StyleSpec`].

/// Color parsing with a white fallback.
pub mod color;
/// Named anchor presets.
pub mod position;
/// Style structs and enums.
pub mod spec;
