//! CPU raster primitives on premultiplied RGBA8 buffers.

/// Gaussian blur of alpha masks.
pub mod blur;
/// Coverage masks and premultiplied RGBA layers.
pub mod layer;
/// Lanczos scaling and expanded-canvas rotation.
pub mod resample;
