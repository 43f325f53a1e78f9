use serde::{Deserialize, Deserializer, Serialize};

use crate::style::color::Rgb8;

/// Synthetic weight levels, produced by stamping the regular face at small pixel offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    /// Single stamp.
    #[default]
    Regular,
    /// 2x2 stamp pattern.
    Bold,
    /// 3x2 stamp pattern.
    Heavy,
    /// 4x4 stamp pattern around the glyph origin.
    UltraHeavy,
}

/// Where the outline sits relative to the glyph silhouette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokePosition {
    /// Stroke under the fill.
    #[default]
    Outer,
    /// Currently composited exactly like [`StrokePosition::Outer`].
    Center,
    /// Stroke clipped to the fill silhouette, painted over the fill.
    Inner,
}

/// Glyph outline parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeSpec {
    /// Outline radius in pixels; `0` disables the stroke.
    pub size: u32,
    /// Outline color.
    pub color: Rgb8,
    /// Outline placement.
    pub position: StrokePosition,
    /// Outline opacity in `[0, 1]`.
    #[serde(deserialize_with = "de_unit_interval")]
    pub opacity: f64,
}

impl Default for StrokeSpec {
    fn default() -> Self {
        Self {
            size: 0,
            color: Rgb8::BLACK,
            position: StrokePosition::Outer,
            opacity: 1.0,
        }
    }
}

impl StrokeSpec {
    /// Return `true` when the stroke is drawn at all.
    pub fn is_active(&self) -> bool {
        self.size > 0
    }
}

/// Drop shadow parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSpec {
    /// Direction in degrees (0 = +x, 90 = +y, screen space).
    pub angle_deg: f64,
    /// Offset length in pixels; `0` disables the shadow.
    pub distance: u32,
    /// Alpha multiplier in `[0, 1]`; `0` disables the shadow.
    #[serde(deserialize_with = "de_unit_interval")]
    pub intensity: f64,
    /// Gaussian blur sigma in pixels.
    pub blur: u32,
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            angle_deg: 135.0,
            distance: 5,
            intensity: 0.75,
            blur: 4,
        }
    }
}

impl ShadowSpec {
    /// A disabled shadow.
    pub fn none() -> Self {
        Self {
            distance: 0,
            intensity: 0.0,
            ..Self::default()
        }
    }

    /// Return `true` when a shadow layer must be produced.
    pub fn is_active(&self) -> bool {
        self.distance > 0 && self.intensity > 0.0
    }

    /// Integer shadow offset, truncated toward zero.
    pub fn offset(&self) -> (i32, i32) {
        let rad = self.angle_deg.to_radians();
        let d = f64::from(self.distance);
        ((rad.cos() * d) as i32, (rad.sin() * d) as i32)
    }
}

/// Text flow direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutDirection {
    /// Lines left to right, stacked top to bottom.
    #[default]
    Horizontal,
    /// A single column, top to bottom; newlines are ignored.
    Vertical,
}

/// Shape of the gradient progress field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientMode {
    /// Solid fill with the text color.
    #[default]
    None,
    /// Left to right ramp.
    Linear,
    /// Distance from the block center.
    Radial,
    /// Average of the horizontal and vertical fractions.
    Diagonal,
}

/// Three-stop gradient fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientSpec {
    /// Progress field shape.
    pub mode: GradientMode,
    /// Color at progress 0.
    pub start: Rgb8,
    /// Color at progress 0.5.
    pub mid: Rgb8,
    /// Color at progress 1.
    pub end: Rgb8,
    /// Multiplier applied to the raw progress before clamping.
    pub intensity: f64,
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self {
            mode: GradientMode::None,
            start: Rgb8::WHITE,
            mid: Rgb8::new(255, 255, 0),
            end: Rgb8::new(255, 0, 0),
            intensity: 1.0,
        }
    }
}

impl GradientSpec {
    /// Return `true` when the fill is a gradient.
    pub fn is_active(&self) -> bool {
        self.mode != GradientMode::None
    }
}

/// Horizontal alignment of lines and of the block against its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    /// Align to the block's left edge.
    Left,
    /// Center every line.
    #[default]
    Center,
    /// Align to the block's right edge.
    Right,
}

/// What to do when the rendered text would leave the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanvasConstraint {
    /// Paste as is; the frame edge crops the text.
    None,
    /// Shrink the font until the block fits 95% of the frame.
    #[default]
    AutoShrink,
    /// Drop every character that would be partially outside the frame.
    PerCharacterClip,
}

/// Anchor point in percent of the frame size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal anchor, percent of the frame width.
    pub x_pct: f64,
    /// Vertical anchor, percent of the frame height.
    pub y_pct: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x_pct: 50.0,
            y_pct: 85.0,
        }
    }
}

/// Immutable per-request text style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSpec {
    /// Font identifier resolved by the font source.
    pub font_id: String,
    /// Requested font size in pixels (clamped by the font cache).
    pub font_size: u32,
    /// Synthetic weight.
    pub weight: FontWeight,
    /// Fill color.
    pub color: Rgb8,
    /// Overall text opacity in `[0, 1]`.
    #[serde(deserialize_with = "de_unit_interval")]
    pub opacity: f64,
    /// Outline.
    pub stroke: StrokeSpec,
    /// Drop shadow.
    pub shadow: ShadowSpec,
    /// Flow direction.
    pub direction: LayoutDirection,
    /// Static rotation added to the animation rotation, degrees clockwise.
    pub rotation_deg: f64,
    /// Gradient fill.
    pub gradient: GradientSpec,
    /// Line and anchor alignment.
    pub align: TextAlign,
    /// Extra pixels between characters; negative values are treated as 0.
    pub spacing: i32,
    /// Frame boundary policy.
    pub constraint: CanvasConstraint,
    /// Anchor point.
    pub position: Position,
    /// Maximum number of lines produced by smart wrap; `1` disables wrapping.
    pub max_lines: u32,
}

/// Font id used when none is configured.
pub const DEFAULT_FONT_ID: &str = "default";

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            font_id: DEFAULT_FONT_ID.to_owned(),
            font_size: 48,
            weight: FontWeight::Regular,
            color: Rgb8::WHITE,
            opacity: 1.0,
            stroke: StrokeSpec::default(),
            shadow: ShadowSpec::default(),
            direction: LayoutDirection::Horizontal,
            rotation_deg: 0.0,
            gradient: GradientSpec::default(),
            align: TextAlign::Center,
            spacing: 0,
            constraint: CanvasConstraint::AutoShrink,
            position: Position::default(),
            max_lines: 1,
        }
    }
}

impl StyleSpec {
    /// Styles that go through the truncating typewriter path.
    ///
    /// Stroke, gradient and vertical layouts are re-laid out for every revealed prefix; plain
    /// horizontal fills keep the full layout and only hide the tail.
    pub fn is_complex(&self) -> bool {
        self.stroke.is_active()
            || self.gradient.is_active()
            || self.direction == LayoutDirection::Vertical
    }

    /// Copy of this style with a different font size.
    pub fn with_font_size(&self, font_size: u32) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }
}

fn de_unit_interval<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    Ok(if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 })
}

#[cfg(test)]
#[path = "../../tests/unit/style/spec.rs"]
mod tests;
