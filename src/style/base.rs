//! The plain text card.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{Background, StyleSchema};
use crate::codec::{Color, TextAlignment};
use crate::layout::LayoutKind;

// ============================================================================
// WatermarkPosition
// ============================================================================

/// Where the watermark sits on the card.
///
/// Unknown tags decode to [`WatermarkPosition::BottomRight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum WatermarkPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
    Center,
}

impl WatermarkPosition {
    /// Decodes a persisted tag, falling back to `BottomRight`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "topLeft" => Self::TopLeft,
            "topRight" => Self::TopRight,
            "bottomLeft" => Self::BottomLeft,
            "bottomCenter" => Self::BottomCenter,
            "center" => Self::Center,
            _ => Self::BottomRight,
        }
    }
}

impl<'de> Deserialize<'de> for WatermarkPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

// ============================================================================
// BaseCard (live)
// ============================================================================

/// Live state of the plain text card.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseCard {
    // Text
    pub content: String,
    pub selected_font: String,
    pub font_size: f64,
    pub text_color: Color,
    pub text_alignment: TextAlignment,
    pub line_spacing: f64,
    /// Extra spacing between glyphs.
    pub text_spacing: f64,
    pub text_shadow_radius: f64,
    pub text_shadow_color: Color,
    /// Set while the inline text editor is open. Never captured.
    pub is_editing_text: bool,
    pub editing_text: String,

    // Background and card
    pub background: Background,
    pub card_background_color: Color,
    pub card_opacity: f64,

    // Layout
    pub show_window_controls: bool,
    pub corner_radius: f64,
    pub edge_padding: f64,
    pub inner_padding: f64,

    // Watermark
    pub show_watermark: bool,
    pub watermark_text: String,
    pub watermark_opacity: f64,
    pub watermark_color: Color,
    pub watermark_size: f64,
    pub watermark_position: WatermarkPosition,
}

impl Default for BaseCard {
    fn default() -> Self {
        Self {
            content: String::new(),
            selected_font: "HongLeiZhuoShu".to_string(),
            font_size: 23.0,
            text_color: Color::from_rgb_u32(0x333333),
            text_alignment: TextAlignment::Center,
            line_spacing: 10.0,
            text_spacing: 0.0,
            text_shadow_radius: 2.0,
            text_shadow_color: Color::WHITE.opacity(0.5),
            is_editing_text: false,
            editing_text: String::new(),
            background: Background::gradient(
                vec![Color::from_rgb_u32(0xFCEDCD), Color::from_rgb_u32(0x83ECC6)],
                82.0,
                Color::from_rgb_u32(0xa18cd1),
            ),
            card_background_color: Color::WHITE,
            card_opacity: 0.90,
            show_window_controls: true,
            corner_radius: 16.0,
            edge_padding: 30.0,
            inner_padding: 12.0,
            show_watermark: true,
            watermark_text: "@CardMaker".to_string(),
            watermark_opacity: 0.3,
            watermark_color: Color::GRAY,
            watermark_size: 8.0,
            watermark_position: WatermarkPosition::BottomRight,
        }
    }
}

// ============================================================================
// BaseCardStyle (snapshot)
// ============================================================================

/// Named snapshot of a [`BaseCard`] style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BaseCardStyle {
    pub id: Uuid,
    pub name: String,

    #[serde(flatten)]
    pub background: Background,

    pub show_window_controls: bool,
    pub card_background_color: Color,
    pub card_opacity: f64,
    pub corner_radius: f64,
    pub edge_padding: f64,
    pub inner_padding: f64,

    pub selected_font: String,
    pub font_size: f64,
    pub text_color: Color,
    pub text_alignment: TextAlignment,
    pub line_spacing: f64,
    pub text_spacing: f64,
    pub text_shadow_radius: f64,
    pub text_shadow_color: Color,

    pub show_watermark: bool,
    /// Captured for reference but never applied back; see
    /// [`BaseCard::apply_snapshot`].
    pub watermark_text: String,
    pub watermark_opacity: f64,
    pub watermark_size: f64,
    pub watermark_color: Color,
    pub watermark_position: WatermarkPosition,
}

impl StyleSchema for BaseCard {
    type Snapshot = BaseCardStyle;

    const LAYOUT: LayoutKind = LayoutKind::Base;

    fn to_snapshot(&self, name: impl Into<String>) -> BaseCardStyle {
        BaseCardStyle {
            id: Uuid::new_v4(),
            name: name.into(),
            background: self.background.clone(),
            show_window_controls: self.show_window_controls,
            card_background_color: self.card_background_color,
            card_opacity: self.card_opacity,
            corner_radius: self.corner_radius,
            edge_padding: self.edge_padding,
            inner_padding: self.inner_padding,
            selected_font: self.selected_font.clone(),
            font_size: self.font_size,
            text_color: self.text_color,
            text_alignment: self.text_alignment,
            line_spacing: self.line_spacing,
            text_spacing: self.text_spacing,
            text_shadow_radius: self.text_shadow_radius,
            text_shadow_color: self.text_shadow_color,
            show_watermark: self.show_watermark,
            watermark_text: self.watermark_text.clone(),
            watermark_opacity: self.watermark_opacity,
            watermark_size: self.watermark_size,
            watermark_color: self.watermark_color,
            watermark_position: self.watermark_position,
        }
    }

    /// Applies every captured field except `watermark_text`, which belongs to
    /// the user and survives theme switches.
    fn apply_snapshot(&mut self, style: &BaseCardStyle) {
        self.background = style.background.clone();
        self.show_window_controls = style.show_window_controls;
        self.card_background_color = style.card_background_color;
        self.card_opacity = style.card_opacity;
        self.corner_radius = style.corner_radius;
        self.edge_padding = style.edge_padding;
        self.inner_padding = style.inner_padding;
        self.selected_font = style.selected_font.clone();
        self.font_size = style.font_size;
        self.text_color = style.text_color;
        self.text_alignment = style.text_alignment;
        self.line_spacing = style.line_spacing;
        self.text_spacing = style.text_spacing;
        self.text_shadow_radius = style.text_shadow_radius;
        self.text_shadow_color = style.text_shadow_color;
        self.show_watermark = style.show_watermark;
        self.watermark_opacity = style.watermark_opacity;
        self.watermark_size = style.watermark_size;
        self.watermark_color = style.watermark_color;
        self.watermark_position = style.watermark_position;
    }

    fn presets() -> &'static [BaseCardStyle] {
        crate::preset::base_presets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_editor_starting_point() {
        let card = BaseCard::default();
        assert_eq!(card.corner_radius, 16.0);
        assert_eq!(card.font_size, 23.0);
        assert_eq!(card.watermark_position, WatermarkPosition::BottomRight);
        assert!(card.background.use_gradient);
        assert_eq!(card.background.gradient_colors.len(), 2);
    }

    #[test]
    fn snapshot_then_apply_is_identity() {
        let mut card = BaseCard::default();
        card.content = "hello".into();
        card.font_size = 31.0;
        card.watermark_position = WatermarkPosition::TopLeft;

        let before = card.clone();
        let snapshot = card.to_snapshot("probe");
        card.apply_snapshot(&snapshot);
        assert_eq!(card, before);
    }

    #[test]
    fn apply_keeps_watermark_text() {
        let mut source = BaseCard::default();
        source.watermark_text = "@someone-else".into();
        source.watermark_opacity = 0.8;
        let snapshot = source.to_snapshot("theirs");
        assert_eq!(snapshot.watermark_text, "@someone-else");

        let mut card = BaseCard::default();
        card.watermark_text = "@me".into();
        card.apply_snapshot(&snapshot);

        assert_eq!(card.watermark_text, "@me");
        assert_eq!(card.watermark_opacity, 0.8);
    }

    #[test]
    fn apply_leaves_transient_state_alone() {
        let mut card = BaseCard::default();
        card.is_editing_text = true;
        card.editing_text = "draft".into();
        card.content = "body".into();

        card.apply_snapshot(&BaseCard::presets()[0]);

        assert!(card.is_editing_text);
        assert_eq!(card.editing_text, "draft");
        assert_eq!(card.content, "body");
    }

    #[test]
    fn snapshot_json_keeps_flat_keys() {
        let json = serde_json::to_value(BaseCard::default().to_snapshot("flat")).unwrap();
        assert_eq!(json["name"], "flat");
        assert_eq!(json["useGradient"], true);
        assert_eq!(json["fontSize"], 23.0);
        assert_eq!(json["textAlignment"], "center");
        assert_eq!(json["watermarkPosition"], "bottomRight");
        assert!(json.get("background").is_none());
    }

    #[test]
    fn unknown_watermark_position_falls_back() {
        let position: WatermarkPosition = serde_json::from_str("\"topCenter\"").unwrap();
        assert_eq!(position, WatermarkPosition::BottomRight);

        let known: WatermarkPosition = serde_json::from_str("\"bottomCenter\"").unwrap();
        assert_eq!(known, WatermarkPosition::BottomCenter);
    }

    #[test]
    fn negative_values_are_accepted_as_is() {
        let mut card = BaseCard::default();
        card.corner_radius = -4.0;
        let snapshot = card.to_snapshot("odd");
        let mut other = BaseCard::default();
        other.apply_snapshot(&snapshot);
        assert_eq!(other.corner_radius, -4.0);
    }
}
