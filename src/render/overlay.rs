use crate::animation::effect::{AnimationSpec, TransformFrame};
use crate::constraint::clip::clip_to_canvas_by_char;
use crate::constraint::shrink::fit_font_size;
use crate::font::cache::{FontCache, FontHandle};
use crate::foundation::core::{Canvas, DisplayWindow};
use crate::foundation::error::CaptionResult;
use crate::raster::layer::RgbaLayer;
use crate::raster::resample::{rotate_layer, scale_layer};
use crate::render::frames::FrameSequence;
use crate::render::glyphs::{GlyphLayer, render_glyph_layer, shadow_layer};
use crate::style::spec::{CanvasConstraint, StyleSpec, TextAlign};

/// Render `text` over every frame of `frames` inside `window`.
///
/// Frames outside the window, and frames where nothing is visible, are returned bit-identical.
/// Only font lookup failures abort the call; a frame that fails to draw keeps its source pixels.
#[tracing::instrument(
    skip(fonts, frames, text, style, animation),
    fields(frames = frames.len(), effect = %animation.effect)
)]
pub fn render_overlay(
    fonts: &mut FontCache,
    frames: &FrameSequence,
    text: &str,
    style: &StyleSpec,
    animation: &AnimationSpec,
    window: DisplayWindow,
) -> CaptionResult<FrameSequence> {
    if text.trim().is_empty() {
        tracing::warn!("overlay text is empty; frames returned unchanged");
        return Ok(frames.clone());
    }
    let window = window.clamp_to(frames.len() as u64);
    if window.is_empty() {
        tracing::debug!(?window, "display window is empty after clamping");
        return Ok(frames.clone());
    }

    let canvas = frames.canvas();
    let style = if style.constraint == CanvasConstraint::AutoShrink {
        let size = fit_font_size(fonts, style, text, canvas)?;
        if size != style.font_size {
            tracing::debug!(from = style.font_size, to = size, "font size adjusted to canvas");
        }
        style.with_font_size(size)
    } else {
        style.clone()
    };
    let face = fonts.get(&style.font_id, style.font_size)?;

    let mut renderer = OverlayRenderer::new(face, &style, text, canvas);
    let mut out = frames.clone();
    let window_len = window.len_frames();
    for index in 0..frames.len() {
        let Some(relative) = window.relative(index as u64) else {
            continue;
        };
        let t = animation.transform_at(relative, window_len, canvas.width);
        let Some(mut rgb) = out.frame_rgb8(index) else {
            continue;
        };
        match renderer.compose(&mut rgb, &t) {
            Ok(true) => out.store_rgb8(index, &rgb)?,
            Ok(false) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!(frame = index, error = %e, "overlay failed; keeping source frame");
            }
        }
    }
    Ok(out)
}

/// Glyph layers reused across the frames of one overlay call.
struct OverlayRenderer<'a> {
    face: FontHandle,
    style: &'a StyleSpec,
    text: &'a str,
    char_count: usize,
    canvas: Canvas,
    base: Option<GlyphLayer>,
    revealed: Option<(usize, GlyphLayer)>,
    settled: Option<Option<Placed>>,
}

/// A finished layer and its shadow at their paste positions.
struct Placed {
    layer: RgbaLayer,
    origin: (i32, i32),
    shadow: Option<(RgbaLayer, (i32, i32))>,
}

impl Placed {
    fn draw(&self, rgb: &mut [u8], canvas: Canvas) -> CaptionResult<()> {
        let Canvas { width, height } = canvas;
        if let Some((shadow, (x, y))) = &self.shadow {
            shadow.composite_onto_rgb(rgb, width, height, *x, *y)?;
        }
        let (x, y) = self.origin;
        self.layer.composite_onto_rgb(rgb, width, height, x, y)
    }
}

impl<'a> OverlayRenderer<'a> {
    fn new(face: FontHandle, style: &'a StyleSpec, text: &'a str, canvas: Canvas) -> Self {
        Self {
            face,
            style,
            text,
            char_count: text.chars().count(),
            canvas,
            base: None,
            revealed: None,
            settled: None,
        }
    }

    /// Glyph layer for the full text, or for the first `reveal` characters.
    ///
    /// Complex styles re-lay out the revealed prefix; plain fills keep the full layout and hide
    /// the tail so characters never shift.
    fn glyph_layer(&mut self, reveal: Option<usize>) -> CaptionResult<GlyphLayer> {
        let Some(count) = reveal else {
            if let Some(base) = &self.base {
                return Ok(base.clone());
            }
            let base = render_glyph_layer(self.face.as_ref(), self.text, self.style, None)?;
            self.base = Some(base.clone());
            return Ok(base);
        };
        if let Some((n, g)) = &self.revealed
            && *n == count
        {
            return Ok(g.clone());
        }
        let glyphs = if self.style.is_complex() {
            let prefix: String = self.text.chars().take(count).collect();
            render_glyph_layer(self.face.as_ref(), &prefix, self.style, None)?
        } else {
            render_glyph_layer(self.face.as_ref(), self.text, self.style, Some(count))?
        };
        self.revealed = Some((count, glyphs.clone()));
        Ok(glyphs)
    }

    /// Draw one frame; `Ok(false)` means nothing was visible and the frame is untouched.
    ///
    /// Frames with an identity transform share one placed layer.
    fn compose(&mut self, rgb: &mut [u8], t: &TransformFrame) -> CaptionResult<bool> {
        let fresh;
        let placed = if t.is_identity() {
            if self.settled.is_none() {
                self.settled = Some(self.place(t)?);
            }
            self.settled.as_ref().and_then(Option::as_ref)
        } else {
            fresh = self.place(t)?;
            fresh.as_ref()
        };
        match placed {
            Some(p) => {
                p.draw(rgb, self.canvas)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Transform, position and clip the glyph layer; `None` when nothing would be drawn.
    fn place(&mut self, t: &TransformFrame) -> CaptionResult<Option<Placed>> {
        let reveal = if t.char_reveal < 1.0 {
            let count = (self.char_count as f64 * t.char_reveal) as usize;
            if count == 0 {
                return Ok(None);
            }
            Some(count)
        } else {
            None
        };

        let opacity = self.style.opacity * t.opacity;
        if opacity <= 0.0 {
            return Ok(None);
        }
        let glyphs = self.glyph_layer(reveal)?;
        let mut layer = glyphs.layer;
        layer.scale_alpha(opacity);

        let mut block_width = f64::from(glyphs.block_width);
        if t.scale != 1.0 && t.scale > 0.0 {
            layer = scale_layer(&layer, t.scale)?;
            block_width *= t.scale;
        }
        let rotation = self.style.rotation_deg + f64::from(t.rotation_deg);
        if rotation != 0.0 {
            layer = rotate_layer(&layer, rotation)?;
        }

        let (x, y) = self.paste_origin(&layer, block_width, t);
        if self.style.constraint == CanvasConstraint::PerCharacterClip {
            layer = clip_to_canvas_by_char(&layer, x, y, self.canvas);
        }
        if layer.is_blank() {
            return Ok(None);
        }

        let (dx, dy) = self.style.shadow.offset();
        let shadow = shadow_layer(&layer, &self.style.shadow)?.map(|s| (s, (x + dx, y + dy)));
        Ok(Some(Placed {
            layer,
            origin: (x, y),
            shadow,
        }))
    }

    /// Top-left paste position of `layer`.
    ///
    /// The anchor is the style position plus the animation offset. Center alignment centers the
    /// layer on it; left and right put the text block edge (not the padded layer edge) on it.
    fn paste_origin(&self, layer: &RgbaLayer, block_width: f64, t: &TransformFrame) -> (i32, i32) {
        let pos = self.style.position;
        let anchor_x = (f64::from(self.canvas.width) * pos.x_pct / 100.0) as i32 + t.offset_x;
        let anchor_y = (f64::from(self.canvas.height) * pos.y_pct / 100.0) as i32 + t.offset_y;
        let layer_w = layer.width() as i32;
        let inset = ((f64::from(layer.width()) - block_width) / 2.0).max(0.0) as i32;
        let x = match self.style.align {
            TextAlign::Center => anchor_x - layer_w / 2,
            TextAlign::Left => anchor_x - inset,
            TextAlign::Right => anchor_x - layer_w + inset,
        };
        (x, anchor_y - layer.height() as i32 / 2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
