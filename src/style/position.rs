use crate::foundation::core::Canvas;

/// Named anchor positions, expressed as percentages of the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionPreset {
    /// Keep the style's own `position`.
    Custom,
    /// (50%, 85%).
    #[default]
    BottomCenter,
    /// (50%, 15%).
    TopCenter,
    /// (50%, 50%).
    Center,
    /// (15%, 85%).
    BottomLeft,
    /// (85%, 85%).
    BottomRight,
    /// (15%, 15%).
    TopLeft,
    /// (85%, 15%).
    TopRight,
    /// (15%, 50%).
    LeftCenter,
    /// (85%, 50%).
    RightCenter,
    /// (50%, 75%).
    BottomThird,
    /// (50%, 25%).
    TopThird,
}

/// Fallback used for unknown preset names.
pub const DEFAULT_POSITION_PCT: (f64, f64) = (50.0, 85.0);

impl PositionPreset {
    /// Every named preset, in declaration order.
    pub const NAMED: [Self; 11] = [
        Self::BottomCenter,
        Self::TopCenter,
        Self::Center,
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopLeft,
        Self::TopRight,
        Self::LeftCenter,
        Self::RightCenter,
        Self::BottomThird,
        Self::TopThird,
    ];

    /// Kebab-case name of the preset.
    pub fn name(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::BottomCenter => "bottom-center",
            Self::TopCenter => "top-center",
            Self::Center => "center",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::LeftCenter => "left-center",
            Self::RightCenter => "right-center",
            Self::BottomThird => "bottom-third",
            Self::TopThird => "top-third",
        }
    }

    /// Look a preset up by its kebab-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name == Self::Custom.name() {
            return Some(Self::Custom);
        }
        Self::NAMED.into_iter().find(|p| p.name() == name)
    }

    /// Percentages for a named preset; `None` for [`PositionPreset::Custom`].
    pub fn percentages(self) -> Option<(f64, f64)> {
        let pct = match self {
            Self::Custom => return None,
            Self::BottomCenter => (50.0, 85.0),
            Self::TopCenter => (50.0, 15.0),
            Self::Center => (50.0, 50.0),
            Self::BottomLeft => (15.0, 85.0),
            Self::BottomRight => (85.0, 85.0),
            Self::TopLeft => (15.0, 15.0),
            Self::TopRight => (85.0, 15.0),
            Self::LeftCenter => (15.0, 50.0),
            Self::RightCenter => (85.0, 50.0),
            Self::BottomThird => (50.0, 75.0),
            Self::TopThird => (50.0, 25.0),
        };
        Some(pct)
    }
}

/// Resolve a preset name into `(x_pct, y_pct)`.
///
/// Percentages are canvas independent; the canvas is accepted so callers can treat presets and
/// pixel anchors uniformly. Unknown names (and `custom`) resolve to bottom-center.
pub fn resolve_position_preset(name: &str, _canvas: Canvas) -> (f64, f64) {
    PositionPreset::from_name(name)
        .and_then(PositionPreset::percentages)
        .unwrap_or(DEFAULT_POSITION_PCT)
}

#[cfg(test)]
#[path = "../../tests/unit/style/position.rs"]
mod tests;
