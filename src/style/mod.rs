//! Style schemas for the four card layouts.
//!
//! Each layout has two representations:
//!
//! - a **live** struct ([`BaseCard`], [`ArticleCard`], [`LayeredCard`],
//!   [`MovieCard`]) that the editor mutates field by field and the renderer
//!   reads continuously, including transient content such as the card text;
//! - an immutable, named **snapshot** ([`BaseCardStyle`], ...) that carries
//!   only stylable fields and is what presets and saved themes are made of.
//!
//! [`StyleSchema`] ties the two together so the session, the preset library,
//! and the theme store can treat all layouts uniformly.
//!
//! # Applying a snapshot
//!
//! ```
//! use cardmaker_style::{BaseCard, StyleSchema};
//!
//! let mut card = BaseCard::default();
//! let preset = &BaseCard::presets()[1];
//! card.apply_snapshot(preset);
//!
//! let captured = card.to_snapshot("Mine");
//! assert_eq!(captured.corner_radius, preset.corner_radius);
//! ```

pub mod article;
pub mod base;
pub mod date_format;
pub mod layered;
pub mod movie;

pub use article::{ArticleCard, ArticleCardStyle, ArticleModule, ArticleModules};
pub use base::{BaseCard, BaseCardStyle, WatermarkPosition};
pub use date_format::DateFormat;
pub use layered::{LAYER_COUNT, LayeredCard, LayeredCardStyle};
pub use movie::{MovieCard, MovieCardStyle};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::Color;
use crate::layout::LayoutKind;

// ============================================================================
// StyleSchema Trait
// ============================================================================

/// A live, editable style that can be captured into and restored from a
/// named snapshot.
pub trait StyleSchema: Default {
    /// The immutable snapshot type for this layout.
    type Snapshot: Clone + Into<StyleSnapshot> + 'static;

    /// The layout this schema belongs to.
    const LAYOUT: LayoutKind;

    /// Copies every stylable field into a new snapshot with a fresh id.
    fn to_snapshot(&self, name: impl Into<String>) -> Self::Snapshot;

    /// Overwrites the live fields the snapshot carries.
    ///
    /// Fields the snapshot does not carry are left untouched.
    fn apply_snapshot(&mut self, snapshot: &Self::Snapshot);

    /// Built-in presets in display order.
    fn presets() -> &'static [Self::Snapshot];

    /// Restores the built-in starting values.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Background
// ============================================================================

/// Page background shared by every layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub use_gradient: bool,
    /// Gradient stops in order. Must not be empty while `use_gradient` is set.
    pub gradient_colors: Vec<Color>,
    /// Gradient direction in degrees.
    pub gradient_angle: f64,
    /// Solid fill used when the gradient is off.
    pub background_color: Color,
}

/// What the renderer should paint behind the card.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundFill<'a> {
    Gradient { colors: &'a [Color], angle: f64 },
    Solid(Color),
}

impl Background {
    pub fn gradient(colors: Vec<Color>, angle: f64, fallback: Color) -> Self {
        Self {
            use_gradient: true,
            gradient_colors: colors,
            gradient_angle: angle,
            background_color: fallback,
        }
    }

    pub fn solid(color: Color, gradient_colors: Vec<Color>, angle: f64) -> Self {
        Self {
            use_gradient: false,
            gradient_colors,
            gradient_angle: angle,
            background_color: color,
        }
    }

    /// Resolves the fill, treating an empty gradient as the solid color.
    pub fn fill(&self) -> BackgroundFill<'_> {
        if self.use_gradient && !self.gradient_colors.is_empty() {
            BackgroundFill::Gradient {
                colors: &self.gradient_colors,
                angle: self.gradient_angle,
            }
        } else {
            BackgroundFill::Solid(self.background_color)
        }
    }
}

// ============================================================================
// StyleSnapshot
// ============================================================================

/// A snapshot of any layout.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSnapshot {
    Base(BaseCardStyle),
    Article(ArticleCardStyle),
    Layered(LayeredCardStyle),
    Movie(MovieCardStyle),
}

impl StyleSnapshot {
    /// Returns the layout this snapshot applies to.
    pub fn layout(&self) -> LayoutKind {
        match self {
            Self::Base(_) => LayoutKind::Base,
            Self::Article(_) => LayoutKind::Article,
            Self::Layered(_) => LayoutKind::Layered,
            Self::Movie(_) => LayoutKind::Movie,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Base(s) => s.id,
            Self::Article(s) => s.id,
            Self::Layered(s) => s.id,
            Self::Movie(s) => s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Base(s) => &s.name,
            Self::Article(s) => &s.name,
            Self::Layered(s) => &s.name,
            Self::Movie(s) => &s.name,
        }
    }
}

impl From<BaseCardStyle> for StyleSnapshot {
    fn from(style: BaseCardStyle) -> Self {
        Self::Base(style)
    }
}

impl From<ArticleCardStyle> for StyleSnapshot {
    fn from(style: ArticleCardStyle) -> Self {
        Self::Article(style)
    }
}

impl From<LayeredCardStyle> for StyleSnapshot {
    fn from(style: LayeredCardStyle) -> Self {
        Self::Layered(style)
    }
}

impl From<MovieCardStyle> for StyleSnapshot {
    fn from(style: MovieCardStyle) -> Self {
        Self::Movie(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_gradient_falls_back_to_solid() {
        let mut background = Background::gradient(Vec::new(), 45.0, Color::WHITE);
        assert_eq!(background.fill(), BackgroundFill::Solid(Color::WHITE));

        background.gradient_colors.push(Color::BLACK);
        assert_eq!(
            background.fill(),
            BackgroundFill::Gradient {
                colors: &[Color::BLACK],
                angle: 45.0
            }
        );
    }

    #[test]
    fn solid_background_ignores_gradient_stops() {
        let background = Background::solid(Color::GRAY, vec![Color::WHITE, Color::BLACK], 0.0);
        assert_eq!(background.fill(), BackgroundFill::Solid(Color::GRAY));
    }

    #[test]
    fn background_flattens_into_camel_case_keys() {
        let json = serde_json::to_value(Background::solid(Color::WHITE, vec![Color::WHITE], 0.0))
            .unwrap();
        assert_eq!(json["useGradient"], false);
        assert_eq!(json["gradientAngle"], 0.0);
        assert!(json["backgroundColor"].is_object());
    }

    #[test]
    fn snapshot_reports_its_layout() {
        let snapshot: StyleSnapshot = crate::MovieCard::default().to_snapshot("x").into();
        assert_eq!(snapshot.layout(), LayoutKind::Movie);
        assert_eq!(snapshot.name(), "x");
    }
}
