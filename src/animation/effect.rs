//! Closed-form entrance, exit and motion effects.
//!
//! Every effect is a pure function of the animation progress, the intensity and (for the flight
//! effects) the canvas width. Integer outputs truncate toward zero.

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::animation::ease::ease_out;
use crate::foundation::error::{CaptionError, CaptionResult};

/// Named animation effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// No animation.
    #[default]
    None,
    /// Opacity eases in.
    FadeIn,
    /// Opacity eases out over the end of the display window.
    FadeOut,
    /// Rises into place from below.
    RollUp,
    /// Drops into place from above.
    RollDown,
    /// Characters are revealed left to right.
    Typewriter,
    /// Grows from 30% while fading in.
    ZoomIn,
    /// Slides in from the left edge.
    FlyInLeft,
    /// Slides in from the right edge.
    FlyInRight,
    /// Slides in from above.
    FlyInTop,
    /// Slides in from below.
    FlyInBottom,
    /// Falls in with damped bounces.
    BounceIn,
    /// Unwinds a full turn while fading in.
    SpinFadeIn,
    /// Vertical sine oscillation.
    Wave,
    /// Opacity toggles between full and 30%.
    Blink,
    /// Decaying jitter while fading in.
    ShakeIn,
    /// Grows from 10% while fading in.
    GrowIn,
    /// Horizontal spread that collapses then reopens.
    SplitMerge,
    /// Overshooting scale.
    ElasticIn,
    /// Half turn with a cosine squash.
    #[serde(rename = "flip-3d")]
    Flip3d,
    /// Scatters inward from a spinning, oversized state.
    Explode,
    /// Spirals into place.
    Spiral,
    /// Gathers from a wide scatter.
    ParticleGather,
    /// Streaks in from far left.
    LightSpeed,
    /// Damped spring oscillation.
    SpringShake,
    /// Horizontal squash mimicking a page turn.
    PageTurn,
    /// Wobbling vertical flow.
    LiquidFlow,
    /// Strobing flashes with jitter.
    Lightning,
    /// Scattered shards reassemble.
    Shatter,
}

type Evaluator = fn(&MotionCtx) -> TransformFrame;

impl EffectKind {
    /// Every effect, in declaration order.
    pub const ALL: [EffectKind; 29] = [
        Self::None,
        Self::FadeIn,
        Self::FadeOut,
        Self::RollUp,
        Self::RollDown,
        Self::Typewriter,
        Self::ZoomIn,
        Self::FlyInLeft,
        Self::FlyInRight,
        Self::FlyInTop,
        Self::FlyInBottom,
        Self::BounceIn,
        Self::SpinFadeIn,
        Self::Wave,
        Self::Blink,
        Self::ShakeIn,
        Self::GrowIn,
        Self::SplitMerge,
        Self::ElasticIn,
        Self::Flip3d,
        Self::Explode,
        Self::Spiral,
        Self::ParticleGather,
        Self::LightSpeed,
        Self::SpringShake,
        Self::PageTurn,
        Self::LiquidFlow,
        Self::Lightning,
        Self::Shatter,
    ];

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FadeIn => "fade-in",
            Self::FadeOut => "fade-out",
            Self::RollUp => "roll-up",
            Self::RollDown => "roll-down",
            Self::Typewriter => "typewriter",
            Self::ZoomIn => "zoom-in",
            Self::FlyInLeft => "fly-in-left",
            Self::FlyInRight => "fly-in-right",
            Self::FlyInTop => "fly-in-top",
            Self::FlyInBottom => "fly-in-bottom",
            Self::BounceIn => "bounce-in",
            Self::SpinFadeIn => "spin-fade-in",
            Self::Wave => "wave",
            Self::Blink => "blink",
            Self::ShakeIn => "shake-in",
            Self::GrowIn => "grow-in",
            Self::SplitMerge => "split-merge",
            Self::ElasticIn => "elastic-in",
            Self::Flip3d => "flip-3d",
            Self::Explode => "explode",
            Self::Spiral => "spiral",
            Self::ParticleGather => "particle-gather",
            Self::LightSpeed => "light-speed",
            Self::SpringShake => "spring-shake",
            Self::PageTurn => "page-turn",
            Self::LiquidFlow => "liquid-flow",
            Self::Lightning => "lightning",
            Self::Shatter => "shatter",
        }
    }

    /// Look an effect up by its kebab-case name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    fn evaluator(self) -> Evaluator {
        match self {
            Self::None => identity,
            Self::FadeIn => fade_in,
            Self::FadeOut => fade_out,
            Self::RollUp => roll_up,
            Self::RollDown => roll_down,
            Self::Typewriter => typewriter,
            Self::ZoomIn => zoom_in,
            Self::FlyInLeft => fly_in_left,
            Self::FlyInRight => fly_in_right,
            Self::FlyInTop => fly_in_top,
            Self::FlyInBottom => fly_in_bottom,
            Self::BounceIn => bounce_in,
            Self::SpinFadeIn => spin_fade_in,
            Self::Wave => wave,
            Self::Blink => blink,
            Self::ShakeIn => shake_in,
            Self::GrowIn => grow_in,
            Self::SplitMerge => split_merge,
            Self::ElasticIn => elastic_in,
            Self::Flip3d => flip_3d,
            Self::Explode => explode,
            Self::Spiral => spiral,
            Self::ParticleGather => particle_gather,
            Self::LightSpeed => light_speed,
            Self::SpringShake => spring_shake,
            Self::PageTurn => page_turn,
            Self::LiquidFlow => liquid_flow,
            Self::Lightning => lightning,
            Self::Shatter => shatter,
        }
    }
}

impl FromStr for EffectKind {
    type Err = CaptionError;

    fn from_str(s: &str) -> CaptionResult<Self> {
        Self::from_name(s).ok_or_else(|| CaptionError::validation(format!("unknown effect '{s}'")))
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-frame transform produced by an effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformFrame {
    /// Alpha multiplier in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal offset in pixels.
    pub offset_x: i32,
    /// Vertical offset in pixels.
    pub offset_y: i32,
    /// Uniform scale, never negative.
    pub scale: f64,
    /// Fraction of characters revealed.
    pub char_reveal: f64,
    /// Extra rotation in degrees, clockwise.
    pub rotation_deg: i32,
    /// Distortion hint for pixel effects; carried but not applied by the compositor.
    pub distortion: u32,
}

impl TransformFrame {
    /// Transform that leaves the text untouched.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset_x: 0,
        offset_y: 0,
        scale: 1.0,
        char_reveal: 1.0,
        rotation_deg: 0,
        distortion: 0,
    };

    /// Return `true` when this transform leaves the text untouched.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for TransformFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Animation parameters for one overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSpec {
    /// Effect to play.
    pub effect: EffectKind,
    /// Strength multiplier, typically `0.1..=3.0`.
    pub intensity: f64,
    /// Effect length in frames; values below 1 are treated as 1.
    pub duration_frames: u64,
    /// Width used to scale flight distances; `0` uses the frame width.
    pub canvas_width: u32,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            effect: EffectKind::None,
            intensity: 1.0,
            duration_frames: 30,
            canvas_width: 0,
        }
    }
}

impl AnimationSpec {
    /// Transform for `relative_frame` of a display window `window_len` frames long.
    ///
    /// Fade-out is evaluated against the tail of the window; other effects start at frame 0.
    pub fn transform_at(
        &self,
        relative_frame: u64,
        window_len: u64,
        frame_width: u32,
    ) -> TransformFrame {
        let width = if self.canvas_width == 0 {
            frame_width
        } else {
            self.canvas_width
        };
        let rf = if self.effect == EffectKind::FadeOut {
            match fade_out_local_frame(relative_frame, window_len, self.duration_frames) {
                Some(local) => local,
                None => return TransformFrame::IDENTITY,
            }
        } else {
            relative_frame
        };
        evaluate(self.effect, rf, self.duration_frames, self.intensity, width)
    }
}

/// Offset of `relative_frame` inside the trailing fade-out window, or `None` before it starts.
pub fn fade_out_local_frame(
    relative_frame: u64,
    window_len: u64,
    duration_frames: u64,
) -> Option<u64> {
    let fade_start = window_len.saturating_sub(duration_frames.max(1));
    relative_frame.checked_sub(fade_start)
}

/// Evaluate `effect` at `relative_frame` of a `duration_frames` long animation.
pub fn evaluate(
    effect: EffectKind,
    relative_frame: u64,
    duration_frames: u64,
    intensity: f64,
    canvas_width: u32,
) -> TransformFrame {
    let duration = duration_frames.max(1);
    if effect == EffectKind::FadeOut && relative_frame >= duration {
        return TransformFrame {
            opacity: 0.0,
            ..TransformFrame::IDENTITY
        };
    }
    if effect == EffectKind::None || relative_frame >= duration {
        return TransformFrame::IDENTITY;
    }

    let p = (relative_frame as f64 / duration as f64).min(1.0);
    let ctx = MotionCtx {
        p,
        eo: ease_out(p),
        intensity,
        width: f64::from(canvas_width),
    };
    let mut t = (effect.evaluator())(&ctx);
    t.opacity = t.opacity.clamp(0.0, 1.0);
    t.scale = t.scale.max(0.0);
    t.char_reveal = t.char_reveal.clamp(0.0, 1.0);
    t
}

struct MotionCtx {
    p: f64,
    eo: f64,
    intensity: f64,
    width: f64,
}

impl MotionCtx {
    /// `1 - ease_out`, the share of the motion still ahead.
    fn rest(&self) -> f64 {
        1.0 - self.eo
    }
}

fn identity(_: &MotionCtx) -> TransformFrame {
    TransformFrame::IDENTITY
}

fn fading(opacity: f64) -> TransformFrame {
    TransformFrame {
        opacity,
        ..TransformFrame::IDENTITY
    }
}

fn fade_in(c: &MotionCtx) -> TransformFrame {
    fading(c.eo)
}

fn fade_out(c: &MotionCtx) -> TransformFrame {
    fading(1.0 - c.eo)
}

fn roll_up(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        offset_y: (c.rest() * 100.0 * c.intensity) as i32,
        ..fading(c.eo)
    }
}

fn roll_down(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        offset_y: -((c.rest() * 100.0 * c.intensity) as i32),
        ..fading(c.eo)
    }
}

fn typewriter(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        char_reveal: c.eo,
        ..TransformFrame::IDENTITY
    }
}

fn zoom_in(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        scale: 0.3 + 0.7 * c.eo,
        ..fading(c.eo)
    }
}

fn fly_in_left(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        offset_x: -((c.rest() * c.width * c.intensity) as i32),
        ..fading(c.eo)
    }
}

fn fly_in_right(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        offset_x: (c.rest() * c.width * c.intensity) as i32,
        ..fading(c.eo)
    }
}

fn fly_in_top(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        offset_y: -((c.rest() * 200.0 * c.intensity) as i32),
        ..fading(c.eo)
    }
}

fn fly_in_bottom(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        offset_y: (c.rest() * 200.0 * c.intensity) as i32,
        ..fading(c.eo)
    }
}

fn bounce_in(c: &MotionCtx) -> TransformFrame {
    let bounce = (c.p * PI * 3.0).sin().abs() * c.rest() * 50.0 * c.intensity;
    TransformFrame {
        offset_y: -(bounce as i32),
        ..fading(c.eo)
    }
}

fn spin_fade_in(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        rotation_deg: (c.rest() * 360.0 * c.intensity) as i32,
        scale: c.eo,
        ..fading(c.eo)
    }
}

fn wave(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        offset_y: ((c.p * PI * 4.0).sin() * 30.0 * c.intensity) as i32,
        ..TransformFrame::IDENTITY
    }
}

fn blink(c: &MotionCtx) -> TransformFrame {
    let phase = (c.p * 10.0) as i64;
    fading(if phase % 2 == 0 { 1.0 } else { 0.3 })
}

fn shake_in(c: &MotionCtx) -> TransformFrame {
    let jitter = c.rest() * 10.0 * c.intensity;
    TransformFrame {
        offset_x: ((c.p * 50.0).sin() * jitter) as i32,
        offset_y: ((c.p * 50.0).cos() * jitter) as i32,
        ..fading(c.eo)
    }
}

fn grow_in(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        scale: 0.1 + 0.9 * c.eo,
        ..fading(c.eo)
    }
}

fn split_merge(c: &MotionCtx) -> TransformFrame {
    let spread = if c.p < 0.5 {
        (0.5 - c.p) * 200.0 * c.intensity
    } else {
        (c.p - 0.5) * 200.0 * c.intensity
    };
    TransformFrame {
        offset_x: ((c.p * 10.0).sin() * spread) as i32,
        ..fading(c.eo)
    }
}

fn elastic_in(c: &MotionCtx) -> TransformFrame {
    let elastic = if c.p < 0.5 {
        c.p * 2.0
    } else {
        1.0 + ((c.p - 0.5) * 4.0 * PI).sin() * (1.0 - c.p) * 0.3
    };
    TransformFrame {
        scale: 0.5 + 0.5 * elastic,
        ..fading((c.p * 1.5).min(1.0))
    }
}

fn flip_3d(c: &MotionCtx) -> TransformFrame {
    let rotation = (c.p * 180.0 * c.intensity) as i32;
    TransformFrame {
        rotation_deg: rotation,
        scale: f64::from(rotation).to_radians().cos().abs().max(0.1),
        ..TransformFrame::IDENTITY
    }
}

fn explode(c: &MotionCtx) -> TransformFrame {
    let scatter = (c.rest() * 30.0 * c.intensity) as i32;
    let scatter = f64::from(scatter);
    TransformFrame {
        scale: 1.0 + 1.5 * c.intensity * c.rest(),
        rotation_deg: (720.0 * c.rest() * c.intensity) as i32,
        offset_x: ((c.p * 12.0).sin() * scatter) as i32,
        offset_y: ((c.p * 12.0).cos() * scatter) as i32,
        ..fading(c.eo)
    }
}

fn spiral(c: &MotionCtx) -> TransformFrame {
    let angle = c.p * PI * 4.0 * c.intensity;
    let radius = 200.0 * c.rest() * c.intensity;
    TransformFrame {
        offset_x: (angle.cos() * radius) as i32,
        offset_y: (angle.sin() * radius) as i32,
        rotation_deg: (c.p * 720.0 * c.intensity) as i32,
        scale: c.eo,
        ..fading(c.eo)
    }
}

fn particle_gather(c: &MotionCtx) -> TransformFrame {
    let scatter = c.rest() * 300.0 * c.intensity;
    TransformFrame {
        offset_x: ((c.p * 10.0).sin() * scatter) as i32,
        offset_y: ((c.p * 10.0).cos() * scatter) as i32,
        scale: 0.3 + 0.7 * c.eo,
        distortion: (c.rest() * 20.0 * c.intensity) as u32,
        ..fading(c.eo)
    }
}

fn light_speed(c: &MotionCtx) -> TransformFrame {
    TransformFrame {
        offset_x: -(((1.0 - c.p).powi(3) * c.width * 2.0 * c.intensity) as i32),
        scale: 0.2 + 0.8 * c.eo,
        distortion: (c.rest() * 30.0 * c.intensity) as u32,
        ..fading((c.p * 2.0).min(1.0))
    }
}

fn spring_shake(c: &MotionCtx) -> TransformFrame {
    let frequency = 8.0 * c.intensity;
    let shake = (c.p * PI * frequency).sin() * c.rest() * 30.0 * c.intensity;
    TransformFrame {
        offset_x: shake as i32,
        offset_y: (shake * 0.5) as i32,
        rotation_deg: shake as i32,
        ..fading((c.p * 1.5).min(1.0))
    }
}

fn page_turn(c: &MotionCtx) -> TransformFrame {
    let squash = if c.p < 0.5 {
        (c.p * 180.0 * c.intensity).to_radians().cos()
    } else {
        -(180.0 - (c.p - 0.5) * 180.0 * c.intensity).to_radians().cos()
    };
    TransformFrame {
        scale: squash.abs().max(0.1),
        ..TransformFrame::IDENTITY
    }
}

fn liquid_flow(c: &MotionCtx) -> TransformFrame {
    let wave = (c.p * PI * 3.0).sin() * 20.0 * c.intensity * c.rest();
    TransformFrame {
        offset_y: wave as i32,
        scale: 0.8 + 0.2 * c.eo,
        distortion: wave.abs() as u32,
        ..fading(c.eo)
    }
}

fn lightning(c: &MotionCtx) -> TransformFrame {
    let opacity = if c.p < 0.7 {
        let flash_phase = (c.p / 0.7 * 5.0) % 1.0;
        if flash_phase > 0.5 { 1.0 } else { 0.0 }
    } else {
        1.0
    };
    let jitter = c.rest() * 15.0 * c.intensity;
    TransformFrame {
        offset_x: ((c.p * 50.0).sin() * jitter) as i32,
        offset_y: ((c.p * 50.0).cos() * jitter) as i32,
        ..fading(opacity)
    }
}

fn shatter(c: &MotionCtx) -> TransformFrame {
    let spread = c.rest() * 150.0 * c.intensity;
    TransformFrame {
        offset_x: ((c.p * 20.0).sin() * spread) as i32,
        offset_y: ((c.p * 15.0).cos() * spread) as i32,
        rotation_deg: (c.rest() * 360.0 * c.intensity) as i32,
        scale: 0.5 + 0.5 * c.eo,
        distortion: (c.rest() * 25.0 * c.intensity) as u32,
        ..fading(c.eo)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/effect.rs"]
mod tests;
