use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{CaptionError, CaptionResult};

/// Largest decimal value accepted as a packed `0xRRGGBB` color.
pub const MAX_PACKED_RGB: i64 = 0xFF_FF_FF;

/// Straight 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque white, the fallback for every unparseable color.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` integer.
    pub fn from_packed(v: u32) -> Self {
        Self::new(
            ((v >> 16) & 0xFF) as u8,
            ((v >> 8) & 0xFF) as u8,
            (v & 0xFF) as u8,
        )
    }

    /// Format as `#RRGGBB` (uppercase).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Premultiplied pixel of this color at `alpha`.
    pub fn with_alpha(self, alpha: u8) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, alpha)
    }

    pub(crate) fn channels_f64(self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }
}

impl Default for Rgb8 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Parse a color string, returning an error instead of falling back.
///
/// Accepted forms: `#RRGGBB`, bare `RRGGBB` containing at least one hex letter, or a decimal
/// integer in `[0, 16777215]`. Purely numeric strings are always read as decimal.
pub fn try_parse_color(input: &str) -> CaptionResult<Rgb8> {
    let s = input.trim();
    if s.is_empty() {
        return Err(CaptionError::color("empty color string"));
    }

    let looks_hex = s.starts_with('#') || s.chars().any(|c| matches!(c, 'a'..='f' | 'A'..='F'));
    if looks_hex {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(CaptionError::color(format!(
                "invalid hex color \"{input}\" (expected #RRGGBB)"
            )));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CaptionError::color(format!("invalid hex byte in \"{input}\"")))
        };
        return Ok(Rgb8::new(byte(0)?, byte(2)?, byte(4)?));
    }

    let value: i64 = s
        .parse()
        .map_err(|_| CaptionError::color(format!("\"{input}\" is neither hex nor decimal")))?;
    if !(0..=MAX_PACKED_RGB).contains(&value) {
        return Err(CaptionError::color(format!(
            "decimal color {value} out of range 0..={MAX_PACKED_RGB}"
        )));
    }
    Ok(Rgb8::from_packed(value as u32))
}

/// Parse a color string, falling back to white.
///
/// Every failure, the empty string included, is reported as a `warn` event.
pub fn parse_color(input: &str) -> Rgb8 {
    match try_parse_color(input) {
        Ok(c) => c,
        Err(err) => {
            tracing::warn!(input, error = %err, "color fallback to white");
            Rgb8::WHITE
        }
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Int(i64),
        }

        // Colors never fail deserialization: bad values become white.
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Str(s) => parse_color(&s),
            Repr::Int(v) => parse_color(&v.to_string()),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
