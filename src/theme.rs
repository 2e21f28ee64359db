//! User-saved themes.
//!
//! A [`CustomTheme`] pairs a name with a single style snapshot for the layout
//! it was captured from. Themes are immutable once created; the only other
//! lifecycle step is deletion from the store.
//!
//! # JSON Format
//!
//! Each theme persists as a flat record with one optional field per layout,
//! of which only the one matching `layout` is populated:
//!
//! ```json
//! {
//!   "id": "5f0c6c1e-...",
//!   "name": "MyTheme",
//!   "layout": "movieCard",
//!   "createdAt": "2024-03-05T14:30:00Z",
//!   "movieStyle": { "titleFontSize": 20.0, ... }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::CardError;
use crate::layout::LayoutKind;
use crate::style::{
    ArticleCardStyle, BaseCardStyle, LayeredCardStyle, MovieCardStyle, StyleSchema,
    StyleSnapshot,
};

// ============================================================================
// CustomTheme
// ============================================================================

/// A named style captured from the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ThemeRecord", try_from = "ThemeRecord")]
pub struct CustomTheme {
    id: Uuid,
    name: String,
    layout: LayoutKind,
    created_at: DateTime<Utc>,
    style: Option<StyleSnapshot>,
}

impl CustomTheme {
    /// Creates a theme from a snapshot, taking the layout from the snapshot.
    pub fn new(name: impl Into<String>, style: impl Into<StyleSnapshot>) -> Self {
        let style = style.into();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            layout: style.layout(),
            created_at: Utc::now(),
            style: Some(style),
        }
    }

    /// Captures the current state of a live style.
    ///
    /// The snapshot inside the theme carries the same name as the theme.
    pub fn capture<S: StyleSchema>(name: impl Into<String>, live: &S) -> Self {
        let name = name.into();
        let snapshot = live.to_snapshot(name.clone());
        Self {
            id: Uuid::new_v4(),
            name,
            layout: S::LAYOUT,
            created_at: Utc::now(),
            style: Some(snapshot.into()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The snapshot for [`Self::layout`], if the record carried one.
    pub fn style(&self) -> Option<&StyleSnapshot> {
        self.style.as_ref()
    }

    pub fn base_style(&self) -> Option<&BaseCardStyle> {
        match &self.style {
            Some(StyleSnapshot::Base(style)) => Some(style),
            _ => None,
        }
    }

    pub fn article_style(&self) -> Option<&ArticleCardStyle> {
        match &self.style {
            Some(StyleSnapshot::Article(style)) => Some(style),
            _ => None,
        }
    }

    pub fn layered_style(&self) -> Option<&LayeredCardStyle> {
        match &self.style {
            Some(StyleSnapshot::Layered(style)) => Some(style),
            _ => None,
        }
    }

    pub fn movie_style(&self) -> Option<&MovieCardStyle> {
        match &self.style {
            Some(StyleSnapshot::Movie(style)) => Some(style),
            _ => None,
        }
    }
}

// ============================================================================
// ThemeRecord (persisted form)
// ============================================================================

/// On-disk shape of a [`CustomTheme`].
///
/// The layout stays a raw tag here so that an unknown layout is reported
/// per theme instead of failing the whole archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ThemeRecord {
    id: Uuid,
    name: String,
    layout: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_style: Option<BaseCardStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    article_style: Option<ArticleCardStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layered_style: Option<LayeredCardStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    movie_style: Option<MovieCardStyle>,
}

impl From<CustomTheme> for ThemeRecord {
    fn from(theme: CustomTheme) -> Self {
        let mut record = ThemeRecord {
            id: theme.id,
            name: theme.name,
            layout: theme.layout.tag().to_string(),
            created_at: theme.created_at,
            base_style: None,
            article_style: None,
            layered_style: None,
            movie_style: None,
        };
        match theme.style {
            Some(StyleSnapshot::Base(style)) => record.base_style = Some(style),
            Some(StyleSnapshot::Article(style)) => record.article_style = Some(style),
            Some(StyleSnapshot::Layered(style)) => record.layered_style = Some(style),
            Some(StyleSnapshot::Movie(style)) => record.movie_style = Some(style),
            None => {}
        }
        record
    }
}

impl TryFrom<ThemeRecord> for CustomTheme {
    type Error = CardError;

    fn try_from(record: ThemeRecord) -> Result<Self, Self::Error> {
        let layout = LayoutKind::from_tag(&record.layout).ok_or_else(|| {
            CardError::UnknownLayout {
                tag: record.layout.clone(),
            }
        })?;

        // Only the field matching the declared layout counts.
        let style = match layout {
            LayoutKind::Base => record.base_style.map(StyleSnapshot::from),
            LayoutKind::Article => record.article_style.map(StyleSnapshot::from),
            LayoutKind::Layered => record.layered_style.map(StyleSnapshot::from),
            LayoutKind::Movie => record.movie_style.map(StyleSnapshot::from),
        };
        if style.is_none() {
            warn!(theme = %record.id, %layout, "theme has no style for its layout");
        }

        Ok(CustomTheme {
            id: record.id,
            name: record.name,
            layout,
            created_at: record.created_at,
            style,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ArticleCard, LayeredCard, MovieCard};

    #[test]
    fn capture_uses_the_live_layout() {
        let mut card = MovieCard::default();
        card.title_font_size = 20.0;

        let theme = CustomTheme::capture("MyTheme", &card);

        assert_eq!(theme.layout(), LayoutKind::Movie);
        assert_eq!(theme.name(), "MyTheme");
        assert_eq!(theme.movie_style().map(|s| s.title_font_size), Some(20.0));
        assert!(theme.base_style().is_none());
    }

    #[test]
    fn capture_layout_matches_snapshot_layout() {
        let themes = [
            CustomTheme::capture("a", &crate::style::BaseCard::default()),
            CustomTheme::capture("b", &ArticleCard::default()),
            CustomTheme::capture("c", &LayeredCard::default()),
            CustomTheme::capture("d", &MovieCard::default()),
        ];
        for theme in &themes {
            assert_eq!(theme.style().map(StyleSnapshot::layout), Some(theme.layout()));
        }
    }

    #[test]
    fn record_populates_only_the_matching_field() {
        let theme = CustomTheme::capture("stack", &LayeredCard::default());
        let json = serde_json::to_value(&theme).unwrap();

        assert_eq!(json["layout"], "layeredCard");
        assert!(json["layeredStyle"].is_object());
        assert!(json.get("baseStyle").is_none());
        assert!(json.get("articleStyle").is_none());
        assert!(json.get("movieStyle").is_none());
    }

    #[test]
    fn json_roundtrip_preserves_identity() {
        let theme = CustomTheme::capture("Notes", &ArticleCard::default());
        let json = serde_json::to_string(&theme).unwrap();
        let decoded: CustomTheme = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.id(), theme.id());
        assert_eq!(decoded.created_at(), theme.created_at());
        assert_eq!(decoded.style(), theme.style());
    }

    #[test]
    fn persisted_colors_come_back_exactly() {
        let mut card = crate::style::BaseCard::default();
        card.text_color = crate::codec::Color::rgba(0.1, 0.9568627450980393, 1.0 / 3.0, 0.7);
        let theme = CustomTheme::capture("exact", &card);

        let json = serde_json::to_vec(&theme).unwrap();
        let decoded: CustomTheme = serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, theme);
    }

    #[test]
    fn mismatched_style_is_dropped() {
        let theme = CustomTheme::capture("odd", &MovieCard::default());
        let mut json = serde_json::to_value(&theme).unwrap();
        json["layout"] = "baseCard".into();

        let decoded: CustomTheme = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.layout(), LayoutKind::Base);
        assert!(decoded.style().is_none());
    }

    #[test]
    fn unknown_layout_fails_to_decode() {
        let theme = CustomTheme::capture("future", &MovieCard::default());
        let mut json = serde_json::to_value(&theme).unwrap();
        json["layout"] = "posterCard".into();

        let err = serde_json::from_value::<CustomTheme>(json).unwrap_err();
        assert!(err.to_string().contains("posterCard"));
    }
}
