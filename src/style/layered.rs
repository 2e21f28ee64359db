//! The layered card: text on top of three stacked, rotated plates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Background, StyleSchema};
use crate::codec::{Color, TextAlignment};
use crate::layout::LayoutKind;

/// Number of plates stacked behind the text. Index 0 is the top plate.
pub const LAYER_COUNT: usize = 3;

const DEFAULT_CONTENT: &str = "可是我再也没遇到一个像福贵这样令我难忘的人了，对自己的经历如此清楚，\
又能如此精彩地讲述自己是如何衰老的。这样的老人在乡间实在是难以遇上，也许是困苦的生活损坏了他们的记忆，\
面对往事他们通常显得木讷，常常以不知所措的微笑搪塞过去。";

/// One plate, assembled from the parallel per-layer arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub color: Color,
    pub scale: f64,
    pub offset: f64,
    /// Degrees.
    pub rotation: f64,
    pub visible: bool,
}

// ============================================================================
// LayeredCard (live)
// ============================================================================

/// Live state of the layered card.
///
/// The per-layer attributes are fixed-size arrays so every index always
/// describes the same plate.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredCard {
    pub content: String,
    pub icon: String,

    pub layer_colors: [Color; LAYER_COUNT],
    pub layer_scales: [f64; LAYER_COUNT],
    pub layer_offsets: [f64; LAYER_COUNT],
    pub layer_rotations: [f64; LAYER_COUNT],
    pub layer_visibility: [bool; LAYER_COUNT],

    pub background: Background,

    pub corner_radius: f64,
    pub inner_padding: f64,

    pub selected_font: String,
    pub font_size: f64,
    pub text_color: Color,
    pub text_alignment: TextAlignment,
    pub line_spacing: f64,
}

impl Default for LayeredCard {
    fn default() -> Self {
        let light = Color::from_rgb_u32(0xcdd7fc);
        Self {
            content: DEFAULT_CONTENT.to_string(),
            icon: "doc.text".to_string(),
            layer_colors: [Color::from_rgb_u32(0x0a3cff), light, light],
            layer_scales: [0.7; LAYER_COUNT],
            layer_offsets: [0.0; LAYER_COUNT],
            layer_rotations: [0.0, -6.0, 6.0],
            layer_visibility: [true; LAYER_COUNT],
            background: Background::solid(
                Color::WHITE,
                vec![Color::from_rgb_u32(0xa1c4fd), Color::from_rgb_u32(0xc2e9fb)],
                45.0,
            ),
            corner_radius: 24.0,
            inner_padding: 16.0,
            selected_font: "Inter-Regular".to_string(),
            font_size: 14.0,
            text_color: Color::WHITE,
            text_alignment: TextAlignment::Leading,
            line_spacing: 9.0,
        }
    }
}

impl LayeredCard {
    pub fn layer(&self, index: usize) -> Option<Layer> {
        (index < LAYER_COUNT).then(|| Layer {
            color: self.layer_colors[index],
            scale: self.layer_scales[index],
            offset: self.layer_offsets[index],
            rotation: self.layer_rotations[index],
            visible: self.layer_visibility[index],
        })
    }

    /// Visible plates, bottom first, in the order they are painted.
    pub fn paint_order(&self) -> impl Iterator<Item = Layer> + '_ {
        (0..LAYER_COUNT)
            .rev()
            .filter_map(|index| self.layer(index))
            .filter(|layer| layer.visible)
    }
}

// ============================================================================
// LayeredCardStyle (snapshot)
// ============================================================================

/// Named snapshot of a [`LayeredCard`] style.
///
/// Corner radius and inner padding stay with the live card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LayeredCardStyle {
    pub id: Uuid,
    pub name: String,

    pub layer_colors: [Color; LAYER_COUNT],
    pub layer_scales: [f64; LAYER_COUNT],
    pub layer_offsets: [f64; LAYER_COUNT],
    pub layer_rotations: [f64; LAYER_COUNT],
    pub layer_visibility: [bool; LAYER_COUNT],

    #[serde(flatten)]
    pub background: Background,

    pub selected_font: String,
    pub font_size: f64,
    pub text_color: Color,
    pub text_alignment: TextAlignment,
    pub line_spacing: f64,
}

impl StyleSchema for LayeredCard {
    type Snapshot = LayeredCardStyle;

    const LAYOUT: LayoutKind = LayoutKind::Layered;

    fn to_snapshot(&self, name: impl Into<String>) -> LayeredCardStyle {
        LayeredCardStyle {
            id: Uuid::new_v4(),
            name: name.into(),
            layer_colors: self.layer_colors,
            layer_scales: self.layer_scales,
            layer_offsets: self.layer_offsets,
            layer_rotations: self.layer_rotations,
            layer_visibility: self.layer_visibility,
            background: self.background.clone(),
            selected_font: self.selected_font.clone(),
            font_size: self.font_size,
            text_color: self.text_color,
            text_alignment: self.text_alignment,
            line_spacing: self.line_spacing,
        }
    }

    fn apply_snapshot(&mut self, style: &LayeredCardStyle) {
        self.layer_colors = style.layer_colors;
        self.layer_scales = style.layer_scales;
        self.layer_offsets = style.layer_offsets;
        self.layer_rotations = style.layer_rotations;
        self.layer_visibility = style.layer_visibility;
        self.background = style.background.clone();
        self.selected_font = style.selected_font.clone();
        self.font_size = style.font_size;
        self.text_color = style.text_color;
        self.text_alignment = style.text_alignment;
        self.line_spacing = style.line_spacing;
    }

    fn presets() -> &'static [LayeredCardStyle] {
        crate::preset::layered_presets()
    }
}
