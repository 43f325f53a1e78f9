/// Convenience result type used across captionfx.
pub type CaptionResult<T> = Result<T, CaptionError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only [`CaptionError::FontNotFound`] and [`CaptionError::FontLoad`] abort an overlay call. The
/// compositor recovers every other variant locally and keeps processing the batch.
#[derive(thiserror::Error, Debug)]
pub enum CaptionError {
    /// Neither the requested font nor the default font could be located.
    #[error("font not found: '{font_id}' (default font also missing)")]
    FontNotFound {
        /// Font identifier that was requested.
        font_id: String,
    },

    /// A font file was located but could not be parsed.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Invalid user-provided data (frame shapes, display windows, request values).
    #[error("validation error: {0}")]
    Validation(String),

    /// A color string that could not be parsed.
    #[error("color parse error: {0}")]
    Color(String),

    /// Raster drawing or compositing failed for a single frame.
    #[error("raster error: {0}")]
    Raster(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptionError {
    /// Build a [`CaptionError::FontNotFound`] value.
    pub fn font_not_found(font_id: impl Into<String>) -> Self {
        Self::FontNotFound {
            font_id: font_id.into(),
        }
    }

    /// Build a [`CaptionError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`CaptionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CaptionError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`CaptionError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`CaptionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors that must abort the whole overlay call.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FontNotFound { .. } | Self::FontLoad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
