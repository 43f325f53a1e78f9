//! JSON-facing overlay request: timing in seconds or frames, named presets and effects, and
//! text preprocessing ahead of [`render_overlay`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::animation::effect::{AnimationSpec, EffectKind};
use crate::font::cache::FontCache;
use crate::foundation::core::DisplayWindow;
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::render::frames::FrameSequence;
use crate::render::overlay::render_overlay;
use crate::style::position::PositionPreset;
use crate::style::spec::{LayoutDirection, Position, StyleSpec};
use crate::text::punctuation::{PunctuationFilter, remove_punctuation};
use crate::text::wrap::{wrap_text_smart, wrap_width};

/// Unit of [`TimingSpec::start`], [`TimingSpec::end`] and [`AnimationRequest::duration`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeUnit {
    /// Values are frame counts.
    Frames,
    /// Values are seconds, converted with [`TimingSpec::fps`].
    #[default]
    Seconds,
}

/// When the overlay is shown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSpec {
    /// Unit of `start`, `end` and the animation duration.
    pub unit: TimeUnit,
    /// First visible instant.
    pub start: f64,
    /// End of the window (exclusive); `<= 0` means the end of the batch.
    pub end: f64,
    /// Frame rate used by [`TimeUnit::Seconds`].
    pub fps: f64,
}

impl Default for TimingSpec {
    fn default() -> Self {
        Self {
            unit: TimeUnit::Seconds,
            start: 0.0,
            end: 0.0,
            fps: 30.0,
        }
    }
}

/// Animation as written in a request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationRequest {
    /// Effect name; unknown names play no animation.
    #[serde(deserialize_with = "effect_or_none")]
    pub effect: EffectKind,
    /// Strength multiplier.
    pub intensity: f64,
    /// Effect length in the timing unit.
    pub duration: f64,
    /// Playback speed; `2.0` halves the effect length.
    pub speed: f64,
}

impl Default for AnimationRequest {
    fn default() -> Self {
        Self {
            effect: EffectKind::None,
            intensity: 1.0,
            duration: 1.0,
            speed: 1.0,
        }
    }
}

fn effect_or_none<'de, D>(de: D) -> Result<EffectKind, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(de)?;
    Ok(EffectKind::from_name(&name).unwrap_or_else(|| {
        tracing::warn!(effect = %name, "unknown animation effect; playing none");
        EffectKind::None
    }))
}

/// Frame window and animation length after unit conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedTiming {
    /// Frames that receive the overlay.
    pub window: DisplayWindow,
    /// Animation length in frames, at least 1.
    pub duration_frames: u64,
}

/// A complete overlay job.
///
/// Every field except `text` has a default, so `{"text": "hello"}` is a valid request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayRequest {
    /// Caption text; `\n` starts a new line.
    pub text: String,
    /// Visual style.
    #[serde(default)]
    pub style: StyleSpec,
    /// Named anchor; anything but `custom` replaces `style.position`.
    #[serde(default)]
    pub position_preset: PositionPreset,
    /// Effect and its timing.
    #[serde(default)]
    pub animation: AnimationRequest,
    /// Display window.
    #[serde(default)]
    pub timing: TimingSpec,
    /// Punctuation stripped before layout.
    #[serde(default)]
    pub punctuation: PunctuationFilter,
}

/// Result of [`OverlayRequest::apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayOutput {
    /// Frames with the overlay drawn.
    pub frames: FrameSequence,
    /// The request's `timing.start`, unchanged.
    pub start_time: f64,
    /// The request's `timing.end`, unchanged.
    pub end_time: f64,
}

impl OverlayRequest {
    /// Request with default settings for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: StyleSpec::default(),
            position_preset: PositionPreset::default(),
            animation: AnimationRequest::default(),
            timing: TimingSpec::default(),
            punctuation: PunctuationFilter::default(),
        }
    }

    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> CaptionResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CaptionError::serde(format!("overlay request JSON: {e}")))
    }

    /// Reject timing and animation values that cannot be converted to frames.
    pub fn validate(&self) -> CaptionResult<()> {
        let t = &self.timing;
        if t.unit == TimeUnit::Seconds && !(t.fps.is_finite() && t.fps > 0.0) {
            return Err(CaptionError::validation(format!(
                "timing.fps must be positive, got {}",
                t.fps
            )));
        }
        if !t.start.is_finite() || !t.end.is_finite() {
            return Err(CaptionError::validation("timing.start and timing.end must be finite"));
        }
        let a = &self.animation;
        if !(a.speed.is_finite() && a.speed > 0.0) {
            return Err(CaptionError::validation(format!(
                "animation.speed must be positive, got {}",
                a.speed
            )));
        }
        if !a.duration.is_finite() || !a.intensity.is_finite() {
            return Err(CaptionError::validation(
                "animation.duration and animation.intensity must be finite",
            ));
        }
        Ok(())
    }

    /// Convert the request's timing into frames for a batch of `batch_len` frames.
    pub fn resolve_timing(&self, batch_len: u64) -> CaptionResult<ResolvedTiming> {
        self.validate()?;
        let t = &self.timing;
        let scale = match t.unit {
            TimeUnit::Seconds => t.fps,
            TimeUnit::Frames => 1.0,
        };
        let start = (t.start * scale).max(0.0) as u64;
        let end = if t.end > 0.0 {
            (t.end * scale) as u64
        } else {
            batch_len
        };
        let end = end.min(batch_len);
        let duration = (self.animation.duration * scale / self.animation.speed).max(0.0) as u64;
        Ok(ResolvedTiming {
            window: DisplayWindow::new(start.min(end), end)?,
            duration_frames: duration.max(1),
        })
    }

    /// Style with the position preset applied.
    pub fn resolved_style(&self) -> StyleSpec {
        let mut style = self.style.clone();
        if let Some((x_pct, y_pct)) = self.position_preset.percentages() {
            style.position = Position { x_pct, y_pct };
        }
        style
    }

    /// Text after punctuation removal and, for multi-line horizontal styles, smart wrapping at
    /// 90% of `frame_width`.
    pub fn prepared_text(&self, fonts: &mut FontCache, frame_width: u32) -> CaptionResult<String> {
        let text = remove_punctuation(&self.text, self.punctuation);
        if text != self.text {
            tracing::debug!(
                filter = ?self.punctuation,
                before = self.text.chars().count(),
                after = text.chars().count(),
                "punctuation removed"
            );
        }
        let style = &self.style;
        let single_line = style.max_lines <= 1 || style.direction != LayoutDirection::Horizontal;
        if single_line || text.trim().is_empty() {
            return Ok(text);
        }
        let face = fonts.get(&style.font_id, style.font_size)?;
        Ok(wrap_text_smart(
            face.as_ref(),
            &text,
            wrap_width(frame_width),
            style.max_lines,
        ))
    }

    /// Animation spec with the duration converted to frames.
    pub fn animation_spec(&self, duration_frames: u64) -> AnimationSpec {
        AnimationSpec {
            effect: self.animation.effect,
            intensity: self.animation.intensity,
            duration_frames,
            canvas_width: 0,
        }
    }

    /// Draw the request over `frames`.
    #[tracing::instrument(
        skip(self, fonts, frames),
        fields(frames = frames.len(), effect = %self.animation.effect)
    )]
    pub fn apply(
        &self,
        fonts: &mut FontCache,
        frames: &FrameSequence,
    ) -> CaptionResult<OverlayOutput> {
        if self.text.trim().is_empty() {
            tracing::warn!("overlay text is empty; frames returned unchanged");
            return Ok(self.output(frames.clone()));
        }
        let timing = self.resolve_timing(frames.len() as u64)?;
        tracing::debug!(
            unit = ?self.timing.unit,
            start = timing.window.start,
            end = timing.window.end,
            duration_frames = timing.duration_frames,
            "resolved overlay timing"
        );
        let text = self.prepared_text(fonts, frames.width())?;
        let style = self.resolved_style();
        let animation = self.animation_spec(timing.duration_frames);
        let frames = render_overlay(fonts, frames, &text, &style, &animation, timing.window)?;
        Ok(self.output(frames))
    }

    fn output(&self, frames: FrameSequence) -> OverlayOutput {
        OverlayOutput {
            frames,
            start_time: self.timing.start,
            end_time: self.timing.end,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/request.rs"]
mod tests;
