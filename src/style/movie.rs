//! The movie-quote card: a header bar, a translucent quote card, and an
//! optional blurred photo behind both.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Background, DateFormat, StyleSchema};
use crate::codec::Color;
use crate::layout::LayoutKind;

const DEFAULT_CONTENT: &str = "我不再装模作样地拥有很多朋友，而是回到了孤单之中，以真正的我开始了独自的生活。\
有时我也会因为寂寞而难以忍受空虚的折磨，但我宁愿以这样的方式来维护自己的自尊，\
也不愿以耻辱为代价去换取那种表面的朋友。";

// ============================================================================
// MovieCard (live)
// ============================================================================

/// Live state of the movie-quote card.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    // Content
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub award: String,
    /// Encoded photo bytes from the image picker, passed through untouched.
    pub image: Option<Vec<u8>>,

    // Colors
    pub background: Background,
    pub card_background_color: Color,
    pub title_color: Color,
    pub text_color: Color,
    pub award_text_color: Color,

    // Fonts
    pub title_font: String,
    pub content_font: String,
    pub title_font_size: f64,
    pub content_font_size: f64,

    // Photo effects
    pub blur_radius: f64,
    pub darken_amount: f64,
    pub card_opacity: f64,

    // Watermark
    pub watermark_text: String,
    pub watermark_size: f64,
    pub watermark_opacity: f64,
    pub watermark_color: Color,

    pub show_award: bool,
    pub show_watermark: bool,

    // Layout
    pub corner_radius: f64,
    pub content_card_padding: f64,
    pub horizontal_padding: f64,
    pub bottom_padding: f64,
    pub line_spacing: f64,
    pub header_padding: f64,
    pub header_horizontal_padding: f64,
    pub shadow_radius: f64,
    pub shadow_opacity: f64,
    pub content_card_opacity: f64,

    // Header bar
    pub award_font_size: f64,
    pub award_prefix: String,

    // Date
    pub show_date: bool,
    pub date: DateTime<Local>,
    pub date_format: DateFormat,
    pub date_color: Color,
}

impl Default for MovieCard {
    fn default() -> Self {
        let ink = Color::from_rgb_u32(0x5c5c5c);
        Self {
            title: "在细雨中呼喊".to_string(),
            subtitle: "余华".to_string(),
            content: DEFAULT_CONTENT.to_string(),
            award: "经典语录".to_string(),
            image: None,
            background: Background::gradient(
                vec![Color::from_rgb_u32(0xE0F7FA), Color::from_rgb_u32(0xB2EBF2)],
                45.0,
                Color::CLEAR,
            ),
            card_background_color: Color::WHITE.opacity(0.85),
            title_color: Color::from_rgb_u32(0x00838F),
            text_color: Color::from_rgb_u32(0x006064),
            award_text_color: ink.opacity(0.9),
            title_font: "SmileySans-Oblique".to_string(),
            content_font: "LXGWWenKai-Regular".to_string(),
            title_font_size: 16.0,
            content_font_size: 12.0,
            blur_radius: 4.0,
            darken_amount: 0.05,
            card_opacity: 0.9,
            watermark_text: "CardMaker".to_string(),
            watermark_size: 8.0,
            watermark_opacity: 0.9,
            watermark_color: ink.opacity(0.7),
            show_award: true,
            show_watermark: true,
            corner_radius: 14.0,
            content_card_padding: 20.0,
            horizontal_padding: 17.0,
            bottom_padding: 32.0,
            line_spacing: 6.0,
            header_padding: 12.0,
            header_horizontal_padding: 16.0,
            shadow_radius: 10.0,
            shadow_opacity: 0.1,
            content_card_opacity: 0.9,
            award_font_size: 8.0,
            award_prefix: "| ".to_string(),
            show_date: true,
            date: Local::now(),
            date_format: DateFormat::Standard,
            date_color: Color::from_rgb_u32(0x00ACC1),
        }
    }
}

impl MovieCard {
    /// Header label, e.g. `| 经典语录`.
    pub fn award_label(&self) -> String {
        format!("{}{}", self.award_prefix, self.award)
    }

    pub fn formatted_date(&self) -> String {
        self.date_format.format(&self.date)
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

// ============================================================================
// MovieCardStyle (snapshot)
// ============================================================================

/// Named snapshot of a [`MovieCard`] style.
///
/// `card_opacity` is stored from the live `content_card_opacity` and
/// `top_padding` from the live `header_padding`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct MovieCardStyle {
    pub id: Uuid,
    pub name: String,

    #[serde(flatten)]
    pub background: Background,

    pub card_background_color: Color,
    pub card_opacity: f64,
    pub corner_radius: f64,
    pub blur_radius: f64,
    pub darken_amount: f64,

    pub title_color: Color,
    pub text_color: Color,
    pub date_color: Color,
    pub award_text_color: Color,
    pub watermark_color: Color,

    pub title_font: String,
    pub title_font_size: f64,
    pub content_font: String,
    pub content_font_size: f64,

    pub show_watermark: bool,
    pub watermark_text: String,
    pub watermark_opacity: f64,
    pub watermark_size: f64,

    pub top_padding: f64,
    pub horizontal_padding: f64,
    pub bottom_padding: f64,
}

impl StyleSchema for MovieCard {
    type Snapshot = MovieCardStyle;

    const LAYOUT: LayoutKind = LayoutKind::Movie;

    fn to_snapshot(&self, name: impl Into<String>) -> MovieCardStyle {
        MovieCardStyle {
            id: Uuid::new_v4(),
            name: name.into(),
            background: self.background.clone(),
            card_background_color: self.card_background_color,
            card_opacity: self.content_card_opacity,
            corner_radius: self.corner_radius,
            blur_radius: self.blur_radius,
            darken_amount: self.darken_amount,
            title_color: self.title_color,
            text_color: self.text_color,
            date_color: self.date_color,
            award_text_color: self.award_text_color,
            watermark_color: self.watermark_color,
            title_font: self.title_font.clone(),
            title_font_size: self.title_font_size,
            content_font: self.content_font.clone(),
            content_font_size: self.content_font_size,
            show_watermark: self.show_watermark,
            watermark_text: self.watermark_text.clone(),
            watermark_opacity: self.watermark_opacity,
            watermark_size: self.watermark_size,
            top_padding: self.header_padding,
            horizontal_padding: self.horizontal_padding,
            bottom_padding: self.bottom_padding,
        }
    }

    fn apply_snapshot(&mut self, style: &MovieCardStyle) {
        self.background = style.background.clone();
        self.card_background_color = style.card_background_color;
        self.content_card_opacity = style.card_opacity;
        self.corner_radius = style.corner_radius;
        self.blur_radius = style.blur_radius;
        self.darken_amount = style.darken_amount;
        self.title_color = style.title_color;
        self.text_color = style.text_color;
        self.date_color = style.date_color;
        self.award_text_color = style.award_text_color;
        self.watermark_color = style.watermark_color;
        self.title_font = style.title_font.clone();
        self.title_font_size = style.title_font_size;
        self.content_font = style.content_font.clone();
        self.content_font_size = style.content_font_size;
        self.show_watermark = style.show_watermark;
        self.watermark_text = style.watermark_text.clone();
        self.watermark_opacity = style.watermark_opacity;
        self.watermark_size = style.watermark_size;
        self.header_padding = style.top_padding;
        self.horizontal_padding = style.horizontal_padding;
        self.bottom_padding = style.bottom_padding;
    }

    fn presets() -> &'static [MovieCardStyle] {
        crate::preset::movie_presets()
    }
}
