//! Layout kinds and their canvas geometry.

use serde::{Deserialize, Serialize};

/// Logical width every card is laid out at before scaling to the screen.
pub const BASE_CARD_WIDTH: f64 = 300.0;

/// The four card templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum LayoutKind {
    #[serde(rename = "baseCard")]
    Base,
    #[serde(rename = "articleCard")]
    Article,
    #[serde(rename = "layeredCard")]
    Layered,
    #[serde(rename = "movieCard")]
    Movie,
}

impl LayoutKind {
    /// All layouts in home-screen order.
    pub const ALL: [LayoutKind; 4] = [Self::Base, Self::Article, Self::Layered, Self::Movie];

    /// Returns the persisted tag (`baseCard`, `articleCard`, ...).
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Base => "baseCard",
            Self::Article => "articleCard",
            Self::Layered => "layeredCard",
            Self::Movie => "movieCard",
        }
    }

    /// Parses a persisted tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Template name shown on the home screen.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Base => "基础卡片",
            Self::Article => "文章卡片",
            Self::Layered => "层叠卡片",
            Self::Movie => "语录卡片",
        }
    }

    /// Allowed width/height ratios, in picker order.
    ///
    /// The article card has no ratio picker and is always square.
    pub fn aspect_ratios(&self) -> &'static [AspectRatio] {
        match self {
            Self::Base => BASE_RATIOS,
            Self::Article => SQUARE_ONLY,
            Self::Layered => LAYERED_RATIOS,
            Self::Movie => MOVIE_RATIOS,
        }
    }

    /// Returns the ratio at `index`, clamping to the last entry.
    pub fn aspect_ratio(&self, index: usize) -> AspectRatio {
        let ratios = self.aspect_ratios();
        ratios[index.min(ratios.len() - 1)]
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

// ============================================================================
// Aspect ratios
// ============================================================================

/// A width/height ratio with its picker label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    /// Width divided by height.
    pub ratio: f64,
    pub name: &'static str,
}

impl AspectRatio {
    /// Used by layouts without a ratio picker, and before any layout is chosen.
    pub const SQUARE: AspectRatio = AspectRatio::new(1.0, 1.0, "1:1");

    const fn new(width: f64, height: f64, name: &'static str) -> Self {
        Self {
            ratio: width / height,
            name,
        }
    }
}

const SQUARE: AspectRatio = AspectRatio::SQUARE;
const FOUR_THREE: AspectRatio = AspectRatio::new(4.0, 3.0, "4:3");
const SIXTEEN_NINE: AspectRatio = AspectRatio::new(16.0, 9.0, "16:9");
const THREE_FOUR: AspectRatio = AspectRatio::new(3.0, 4.0, "3:4");
const NINE_SIXTEEN: AspectRatio = AspectRatio::new(9.0, 16.0, "9:16");

const BASE_RATIOS: &[AspectRatio] = &[SQUARE, FOUR_THREE, SIXTEEN_NINE, THREE_FOUR, NINE_SIXTEEN];
const LAYERED_RATIOS: &[AspectRatio] = &[SQUARE, THREE_FOUR, NINE_SIXTEEN];
const MOVIE_RATIOS: &[AspectRatio] = &[THREE_FOUR, SQUARE, NINE_SIXTEEN];
const SQUARE_ONLY: &[AspectRatio] = &[SQUARE];

// ============================================================================
// Card size
// ============================================================================

/// On-screen card size in points, plus the factor applied to the
/// [`BASE_CARD_WIDTH`] layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

/// Fits a card of the given ratio to `screen_width`.
pub fn card_size(ratio: AspectRatio, screen_width: f64) -> CardSize {
    let scale = screen_width / BASE_CARD_WIDTH;
    let height = BASE_CARD_WIDTH / ratio.ratio;
    CardSize {
        width: BASE_CARD_WIDTH * scale,
        height: height * scale,
        scale,
    }
}
