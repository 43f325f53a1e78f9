//! Text preprocessing applied before layout.

/// Punctuation filters.
pub mod punctuation;
/// Character-count smart wrap.
pub mod wrap;
