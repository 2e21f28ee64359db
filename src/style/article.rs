//! The article card: a stack of independently toggled modules.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Background, DateFormat, StyleSchema};
use crate::codec::Color;
use crate::layout::LayoutKind;

// ============================================================================
// Modules
// ============================================================================

/// A visual block of the article card that can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleModule {
    Icon,
    Date,
    Title,
    Content,
    Author,
    WordCount,
    QrCode,
    Watermark,
}

impl ArticleModule {
    pub const ALL: [ArticleModule; 8] = [
        Self::Icon,
        Self::Date,
        Self::Title,
        Self::Content,
        Self::Author,
        Self::WordCount,
        Self::QrCode,
        Self::Watermark,
    ];
}

/// Visibility flags for every [`ArticleModule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleModules {
    pub show_icon: bool,
    pub show_date: bool,
    pub show_title: bool,
    pub show_content: bool,
    pub show_author: bool,
    pub show_word_count: bool,
    pub show_qr_code: bool,
    pub show_watermark: bool,
}

impl Default for ArticleModules {
    fn default() -> Self {
        Self {
            show_icon: true,
            show_date: true,
            show_title: true,
            show_content: true,
            show_author: true,
            show_word_count: true,
            show_qr_code: true,
            show_watermark: true,
        }
    }
}

impl ArticleModules {
    fn flag_mut(&mut self, module: ArticleModule) -> &mut bool {
        match module {
            ArticleModule::Icon => &mut self.show_icon,
            ArticleModule::Date => &mut self.show_date,
            ArticleModule::Title => &mut self.show_title,
            ArticleModule::Content => &mut self.show_content,
            ArticleModule::Author => &mut self.show_author,
            ArticleModule::WordCount => &mut self.show_word_count,
            ArticleModule::QrCode => &mut self.show_qr_code,
            ArticleModule::Watermark => &mut self.show_watermark,
        }
    }

    pub fn is_visible(&self, module: ArticleModule) -> bool {
        let mut copy = *self;
        *copy.flag_mut(module)
    }

    pub fn set_visible(&mut self, module: ArticleModule, visible: bool) {
        *self.flag_mut(module) = visible;
    }

    /// Modules currently shown, in layout order.
    pub fn visible(&self) -> impl Iterator<Item = ArticleModule> + '_ {
        ArticleModule::ALL
            .into_iter()
            .filter(|module| self.is_visible(*module))
    }
}

// ============================================================================
// ArticleCard (live)
// ============================================================================

/// Live state of the article card.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub background: Background,

    pub card_background_color: Color,
    pub card_opacity: f64,
    pub corner_radius: f64,
    pub edge_padding: f64,
    pub inner_padding: f64,
    pub module_height: f64,
    pub module_background_color: Color,

    pub modules: ArticleModules,

    // Content
    /// Opaque identifier handed back by the icon picker.
    pub icon: String,
    pub date: DateTime<Local>,
    pub title: String,
    pub content: String,
    pub author: String,
    pub qr_code_data: String,
    pub watermark_text: String,
    pub date_format: DateFormat,

    // Typography and colors
    pub title_font: String,
    pub content_font: String,
    pub title_size: f64,
    pub content_size: f64,
    pub title_color: Color,
    pub content_color: Color,
    pub author_color: Color,
    pub word_count_color: Color,
    pub qr_code_color: Color,
    pub date_color: Color,
    pub watermark_color: Color,
    pub watermark_opacity: f64,
}

impl Default for ArticleCard {
    fn default() -> Self {
        let muted = Color::from_rgb_u32(0xa1a1a1);
        Self {
            background: Background::gradient(
                vec![
                    Color::from_rgb_u32(0xdbdcd7),
                    Color::from_rgb_u32(0xdddcd7),
                    Color::from_rgb_u32(0xe2c9cc),
                ],
                45.0,
                Color::from_rgb_u32(0xf6d365),
            ),
            card_background_color: Color::from_rgb_u32(0xf5f4f7),
            card_opacity: 0.4,
            corner_radius: 15.0,
            edge_padding: 20.0,
            inner_padding: 15.0,
            module_height: 40.0,
            module_background_color: Color::WHITE,
            modules: ArticleModules::default(),
            icon: "doc.text".to_string(),
            date: Local::now(),
            title: String::new(),
            content: String::new(),
            author: String::new(),
            qr_code_data: "https://cardmaker.byclemon.com".to_string(),
            watermark_text: "CardMaker".to_string(),
            date_format: DateFormat::LongDate,
            title_font: "TsangerYuMo".to_string(),
            content_font: "TsangerYuMo".to_string(),
            title_size: 16.0,
            content_size: 15.0,
            title_color: Color::from_rgb_u32(0x333333),
            content_color: Color::from_rgb_u32(0x333333),
            author_color: muted,
            word_count_color: muted,
            qr_code_color: muted,
            date_color: muted,
            watermark_color: muted,
            watermark_opacity: 0.5,
        }
    }
}

impl ArticleCard {
    /// Number of characters in the body, as shown by the word-count module.
    pub fn word_count(&self) -> usize {
        self.content.chars().count()
    }

    /// The date line as currently formatted.
    pub fn formatted_date(&self) -> String {
        self.date_format.format(&self.date)
    }
}

// ============================================================================
// ArticleCardStyle (snapshot)
// ============================================================================

/// Named snapshot of an [`ArticleCard`] style.
///
/// Module visibility and content are not part of the style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ArticleCardStyle {
    pub id: Uuid,
    pub name: String,

    #[serde(flatten)]
    pub background: Background,

    pub card_background_color: Color,
    pub card_opacity: f64,
    pub corner_radius: f64,
    pub edge_padding: f64,
    pub inner_padding: f64,
    pub module_height: f64,
    pub module_background_color: Color,

    pub title_font: String,
    pub content_font: String,
    pub title_size: f64,
    pub content_size: f64,
    pub title_color: Color,
    pub content_color: Color,

    pub author_color: Color,
    pub word_count_color: Color,
    pub qr_code_color: Color,
    #[serde(rename = "dataColor")]
    pub date_color: Color,
    pub watermark_color: Color,
    pub watermark_opacity: f64,
}

impl StyleSchema for ArticleCard {
    type Snapshot = ArticleCardStyle;

    const LAYOUT: LayoutKind = LayoutKind::Article;

    fn to_snapshot(&self, name: impl Into<String>) -> ArticleCardStyle {
        ArticleCardStyle {
            id: Uuid::new_v4(),
            name: name.into(),
            background: self.background.clone(),
            card_background_color: self.card_background_color,
            card_opacity: self.card_opacity,
            corner_radius: self.corner_radius,
            edge_padding: self.edge_padding,
            inner_padding: self.inner_padding,
            module_height: self.module_height,
            module_background_color: self.module_background_color,
            title_font: self.title_font.clone(),
            content_font: self.content_font.clone(),
            title_size: self.title_size,
            content_size: self.content_size,
            title_color: self.title_color,
            content_color: self.content_color,
            author_color: self.author_color,
            word_count_color: self.word_count_color,
            qr_code_color: self.qr_code_color,
            date_color: self.date_color,
            watermark_color: self.watermark_color,
            watermark_opacity: self.watermark_opacity,
        }
    }

    fn apply_snapshot(&mut self, style: &ArticleCardStyle) {
        self.background = style.background.clone();
        self.card_background_color = style.card_background_color;
        self.card_opacity = style.card_opacity;
        self.corner_radius = style.corner_radius;
        self.edge_padding = style.edge_padding;
        self.inner_padding = style.inner_padding;
        self.module_height = style.module_height;
        self.module_background_color = style.module_background_color;
        self.title_font = style.title_font.clone();
        self.content_font = style.content_font.clone();
        self.title_size = style.title_size;
        self.content_size = style.content_size;
        self.title_color = style.title_color;
        self.content_color = style.content_color;
        self.author_color = style.author_color;
        self.word_count_color = style.word_count_color;
        self.qr_code_color = style.qr_code_color;
        self.date_color = style.date_color;
        self.watermark_color = style.watermark_color;
        self.watermark_opacity = style.watermark_opacity;
    }

    fn presets() -> &'static [ArticleCardStyle] {
        crate::preset::article_presets()
    }
}
