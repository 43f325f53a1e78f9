//! captionfx renders animated captions onto batches of video frames.
//!
//! The pipeline per call:
//!
//! - Resolve a [`StyleSpec`] and optional auto-shrink against the frame size
//! - Rasterize the text block once through a cached [`GlyphFace`]
//! - Evaluate an [`AnimationSpec`] per frame and composite the transformed layer
//!
//! [`render_overlay`] is the engine entry point; [`OverlayRequest`] adds JSON timing, presets
//! and text preprocessing on top of it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(test)]
extern crate self as captionfx;

mod foundation;

pub mod animation;
pub mod constraint;
pub mod font;
pub mod layout;
pub mod raster;
pub mod render;
pub mod request;
pub mod style;
pub mod text;

pub use crate::foundation::core::{Canvas, DisplayWindow, Rgba8Premul};
pub use crate::foundation::error::{CaptionError, CaptionResult};

pub use crate::animation::effect::{AnimationSpec, EffectKind, TransformFrame};
pub use crate::font::cache::{FontCache, FontCacheOpts, FontDirectory, FontHandle, FontSource};
pub use crate::font::glyph::{FontdueFace, GlyphFace};
pub use crate::render::frames::FrameSequence;
pub use crate::render::overlay::render_overlay;
pub use crate::request::{OverlayOutput, OverlayRequest, TimeUnit, TimingSpec};
pub use crate::style::color::Rgb8;
pub use crate::style::position::PositionPreset;
pub use crate::style::spec::StyleSpec;
pub use crate::text::punctuation::PunctuationFilter;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
