//! Font faces and the bounded font cache.

/// Font lookup and the bounded LRU cache.
pub mod cache;
/// Glyph faces and the `fontdue` backend.
pub mod glyph;
