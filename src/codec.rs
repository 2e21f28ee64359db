//! Portable encodings for colors and text alignment.
//!
//! A [`Color`] wraps a palette [`Srgba`] value, which is what the rest of the
//! crate and the renderer work with. On disk it is stored as four doubles:
//!
//! ```json
//! { "red": 0.2, "green": 0.2, "blue": 0.2, "opacity": 1.0 }
//! ```
//!
//! [`TextAlignment`] is stored as its lowercase tag. Unknown tags decode to
//! [`TextAlignment::Leading`] instead of failing, so themes written by newer
//! builds still load.

use palette::{Hsl, IntoColor, Srgb, Srgba};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CardError;

// ============================================================================
// ColorComponents
// ============================================================================

/// Serialized form of a [`Color`]: normalized RGBA, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ColorComponents {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

// ============================================================================
// Color
// ============================================================================

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorComponents", into = "ColorComponents")]
pub struct Color(Srgba<f64>);

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const CLEAR: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// The platform's standard gray, `#8e8e8e`.
    pub const GRAY: Self = Self::rgba(142.0 / 255.0, 142.0 / 255.0, 142.0 / 255.0, 1.0);

    /// Creates a color from normalized components.
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    /// Creates an opaque color from a packed `0xRRGGBB` value.
    pub fn from_rgb_u32(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f64 / 255.0;
        Self::rgba(channel(16), channel(8), channel(0), 1.0)
    }

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb` into an opaque color.
    pub fn from_hex(input: &str) -> Result<Self, CardError> {
        let rgb: Srgb<u8> = input.trim().parse().map_err(|_| CardError::InvalidColor {
            input: input.to_string(),
        })?;
        let rgb: Srgb<f64> = rgb.into_format();
        Ok(Self::rgba(rgb.red, rgb.green, rgb.blue, 1.0))
    }

    /// Formats the color channels as `#rrggbb`. Alpha is dropped.
    pub fn to_hex(&self) -> String {
        let rgb: Srgb<u8> = self.0.color.into_format();
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
    }

    /// Returns the same color with its alpha replaced.
    pub fn opacity(self, alpha: f64) -> Self {
        let mut color = self;
        color.0.alpha = alpha;
        color
    }

    /// Returns the color with its HSL lightness reduced by `amount`.
    pub fn darkened(self, amount: f64) -> Self {
        let mut hsl: Hsl<palette::encoding::Srgb, f64> = self.0.color.into_color();
        hsl.lightness = (hsl.lightness - amount).max(0.0);
        let rgb: Srgb<f64> = hsl.into_color();
        Self::rgba(rgb.red, rgb.green, rgb.blue, self.0.alpha)
    }

    pub fn red(&self) -> f64 {
        self.0.color.red
    }

    pub fn green(&self) -> f64 {
        self.0.color.green
    }

    pub fn blue(&self) -> f64 {
        self.0.color.blue
    }

    pub fn alpha(&self) -> f64 {
        self.0.alpha
    }

    /// Quantizes to 8-bit RGBA, the precision the renderer stores.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.red()),
            quantize(self.green()),
            quantize(self.blue()),
            quantize(self.alpha()),
        ]
    }

    /// Encodes the color into its portable component form.
    pub fn encode(&self) -> ColorComponents {
        ColorComponents {
            red: self.red(),
            green: self.green(),
            blue: self.blue(),
            opacity: self.alpha(),
        }
    }

    /// Decodes a color from its portable component form.
    pub fn decode(components: ColorComponents) -> Self {
        Self::rgba(
            components.red,
            components.green,
            components.blue,
            components.opacity,
        )
    }
}

impl From<ColorComponents> for Color {
    fn from(components: ColorComponents) -> Self {
        Self::decode(components)
    }
}

impl From<Color> for ColorComponents {
    fn from(color: Color) -> Self {
        color.encode()
    }
}

impl From<Srgba<f64>> for Color {
    fn from(color: Srgba<f64>) -> Self {
        Self(color)
    }
}

impl From<Color> for Srgba<f64> {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        ColorComponents::json_schema(generator)
    }
}

// ============================================================================
// TextAlignment
// ============================================================================

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

impl TextAlignment {
    /// Returns the persisted tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Leading => "leading",
            Self::Center => "center",
            Self::Trailing => "trailing",
        }
    }

    /// Decodes a persisted tag, falling back to `Leading` for anything unknown.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "center" => Self::Center,
            "trailing" => Self::Trailing,
            _ => Self::Leading,
        }
    }
}

impl<'de> Deserialize<'de> for TextAlignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

// ============================================================================
// Tests
// ============================================================================
