//! Built-in style presets, in picker order.
//!
//! Presets are built once per process. Their ids are generated at that point
//! and stay stable for the lifetime of the process.

use std::sync::LazyLock;

use uuid::Uuid;

use crate::codec::{Color, TextAlignment};
use crate::layout::LayoutKind;
use crate::style::{
    ArticleCardStyle, Background, BaseCardStyle, LayeredCardStyle, MovieCardStyle, StyleSnapshot,
    WatermarkPosition,
};

fn hex(rgb: u32) -> Color {
    Color::from_rgb_u32(rgb)
}

fn stops(colors: &[u32]) -> Vec<Color> {
    colors.iter().copied().map(hex).collect()
}

/// Returns every preset for `kind` as layout-agnostic snapshots.
pub fn presets_for(kind: LayoutKind) -> Vec<StyleSnapshot> {
    match kind {
        LayoutKind::Base => base_presets().iter().cloned().map(Into::into).collect(),
        LayoutKind::Article => article_presets().iter().cloned().map(Into::into).collect(),
        LayoutKind::Layered => layered_presets().iter().cloned().map(Into::into).collect(),
        LayoutKind::Movie => movie_presets().iter().cloned().map(Into::into).collect(),
    }
}

/// Finds a preset by its display name.
pub fn find(kind: LayoutKind, name: &str) -> Option<StyleSnapshot> {
    presets_for(kind).into_iter().find(|preset| preset.name() == name)
}

// ============================================================================
// Base
// ============================================================================

static BASE_PRESETS: LazyLock<Vec<BaseCardStyle>> = LazyLock::new(|| {
    vec![
        BaseCardStyle {
            background: Background::solid(Color::WHITE, vec![Color::WHITE], 0.0),
            card_opacity: 1.0,
            text_color: Color::BLACK,
            text_shadow_radius: 0.0,
            text_shadow_color: Color::CLEAR,
            ..base("简约白", [0xffffff, 0xffffff])
        },
        base("渐变紫", [0xa18cd1, 0xfbc2eb]),
        base("海洋蓝", [0x0984E3, 0x74B9FF]),
        base("清新绿", [0x00B894, 0x55EFC4]),
        base("暖阳橙", [0xF6D365, 0xFDA085]),
        BaseCardStyle {
            text_color: Color::BLACK,
            text_shadow_color: Color::BLACK.opacity(0.5),
            ..base("深邃黑", [0x434343, 0x000000])
        },
        base("极光紫", [0x7F00FF, 0xE100FF]),
        base("日落金", [0xFFE259, 0xFFA751]),
        base("薄荷绿", [0x00F2FE, 0x4FACFE]),
        base("玫瑰粉", [0xFF9A9E, 0xFAD0C4]),
    ]
});

fn base(name: &str, gradient: [u32; 2]) -> BaseCardStyle {
    BaseCardStyle {
        id: Uuid::new_v4(),
        name: name.to_string(),
        background: Background::gradient(stops(&gradient), 45.0, hex(gradient[0])),
        show_window_controls: true,
        card_background_color: Color::WHITE,
        card_opacity: 0.95,
        corner_radius: 16.0,
        edge_padding: 25.0,
        inner_padding: 20.0,
        selected_font: "TsangerYuMo".to_string(),
        font_size: 24.0,
        text_color: hex(0x333333),
        text_alignment: TextAlignment::Center,
        line_spacing: 8.0,
        text_spacing: 0.0,
        text_shadow_radius: 2.0,
        text_shadow_color: Color::WHITE.opacity(0.5),
        show_watermark: true,
        watermark_text: "@CardMaker".to_string(),
        watermark_opacity: 0.3,
        watermark_size: 8.0,
        watermark_color: Color::GRAY,
        watermark_position: WatermarkPosition::BottomRight,
    }
}

pub fn base_presets() -> &'static [BaseCardStyle] {
    &BASE_PRESETS
}

// ============================================================================
// Article
// ============================================================================

static ARTICLE_PRESETS: LazyLock<Vec<ArticleCardStyle>> = LazyLock::new(|| {
    let dim = hex(0xA3A3A3);
    vec![
        article("暖阳橙", &[0xf6d365, 0xfda085]),
        article("清新绿", &[0x22c1c3, 0xfdbb2d]),
        article("晨光粉", &[0xdbdcd7, 0xdddcd7, 0xe2c9cc]),
        article("薄荷蓝", &[0xa1c4fd, 0xc2e9fb]),
        article("梦幻紫", &[0x667eea, 0x764ba2]),
        article("玫瑰粉", &[0xff9a9e, 0xfecfef]),
        article("海洋蓝", &[0x2cd8d5, 0xc5c1ff, 0xffbac3]),
        // Dark card on a bright background.
        ArticleCardStyle {
            card_background_color: hex(0x1A1A1A),
            module_background_color: hex(0x262626),
            title_color: Color::WHITE,
            content_color: hex(0xE5E5E5),
            author_color: dim,
            word_count_color: dim,
            qr_code_color: dim,
            date_color: dim,
            watermark_color: dim,
            ..article("向日葵", &[0xFFE259, 0xFFA751])
        },
        article("樱花粉", &[0xfbc2eb, 0xa6c1ee]),
        article("柠檬黄", &[0x96fbc4, 0xf9f586]),
        article("珊瑚橙", &[0x89f7fe, 0x66a6ff]),
        article("极光绿", &[0xc471f5, 0xfa71cd]),
    ]
});

fn article(name: &str, gradient: &[u32]) -> ArticleCardStyle {
    let muted = hex(0xa1a1a1);
    let first = gradient.first().copied().map(hex).unwrap_or(Color::WHITE);
    ArticleCardStyle {
        id: Uuid::new_v4(),
        name: name.to_string(),
        background: Background::gradient(stops(gradient), 45.0, first),
        card_background_color: hex(0xf5f4f7),
        card_opacity: 1.0,
        corner_radius: 16.0,
        edge_padding: 16.0,
        inner_padding: 16.0,
        module_height: 44.0,
        module_background_color: Color::WHITE,
        title_font: "PingFangSC-Semibold".to_string(),
        content_font: "PingFangSC-Regular".to_string(),
        title_size: 24.0,
        content_size: 16.0,
        title_color: hex(0x333333),
        content_color: hex(0x333333),
        author_color: muted,
        word_count_color: muted,
        qr_code_color: muted,
        date_color: muted,
        watermark_color: muted,
        watermark_opacity: 0.5,
    }
}

pub fn article_presets() -> &'static [ArticleCardStyle] {
    &ARTICLE_PRESETS
}

// ============================================================================
// Layered
// ============================================================================

static LAYERED_PRESETS: LazyLock<Vec<LayeredCardStyle>> = LazyLock::new(|| {
    vec![
        layered("薄荷蓝", [0xa1c4fd, 0xc2e9fb, 0xc2e9fb], [0xa1c4fd, 0xc2e9fb]),
        LayeredCardStyle {
            layer_colors: [hex(0xa18cd1).opacity(0.75), hex(0xfbc2eb), hex(0xfbc2eb)],
            layer_rotations: [0.0, 0.0, 0.0],
            layer_visibility: [true, false, false],
            ..layered("淡紫", [0xa18cd1, 0xfbc2eb, 0xfbc2eb], [0xa18cd1, 0xfbc2eb])
        },
        layered("清新绿", [0x00B894, 0x55EFC4, 0x55EFC4], [0x00B894, 0x55EFC4]),
    ]
});

fn layered(name: &str, layers: [u32; 3], gradient: [u32; 2]) -> LayeredCardStyle {
    LayeredCardStyle {
        id: Uuid::new_v4(),
        name: name.to_string(),
        layer_colors: layers.map(hex),
        layer_scales: [0.7, 0.7, 0.7],
        layer_offsets: [0.0, 0.0, 0.0],
        layer_rotations: [0.0, -6.0, 6.0],
        layer_visibility: [true, true, true],
        background: Background::gradient(stops(&gradient), 45.0, Color::WHITE),
        selected_font: "Inter-Regular".to_string(),
        font_size: 14.0,
        text_color: Color::WHITE,
        text_alignment: TextAlignment::Leading,
        line_spacing: 6.0,
    }
}

pub fn layered_presets() -> &'static [LayeredCardStyle] {
    &LAYERED_PRESETS
}

// ============================================================================
// Movie
// ============================================================================

/// Per-preset ink colors: title, body text, date.
struct Ink(u32, u32, u32);

static MOVIE_PRESETS: LazyLock<Vec<MovieCardStyle>> = LazyLock::new(|| {
    vec![
        movie("清新蓝", [0xE0F7FA, 0xB2EBF2], Ink(0x00838F, 0x006064, 0x00ACC1)),
        MovieCardStyle {
            card_background_color: Color::WHITE.opacity(0.9),
            card_opacity: 0.85,
            corner_radius: 16.0,
            blur_radius: 5.0,
            darken_amount: 0.08,
            title_font_size: 18.0,
            content_font_size: 13.0,
            top_padding: 14.0,
            horizontal_padding: 18.0,
            bottom_padding: 34.0,
            ..movie("暖阳橙", [0xFFF3E0, 0xFFE0B2], Ink(0xE65100, 0xEF6C00, 0xF57C00))
                .with_translucency(0.85)
        },
        MovieCardStyle {
            card_background_color: Color::WHITE.opacity(0.88),
            card_opacity: 0.92,
            corner_radius: 12.0,
            blur_radius: 3.0,
            darken_amount: 0.04,
            title_font_size: 17.0,
            top_padding: 13.0,
            horizontal_padding: 16.0,
            bottom_padding: 30.0,
            ..movie("薄荷绿", [0xE8F5E9, 0xC8E6C9], Ink(0x2E7D32, 0x388E3C, 0x43A047))
                .with_translucency(0.88)
        },
        MovieCardStyle {
            card_background_color: Color::WHITE.opacity(0.87),
            card_opacity: 0.88,
            corner_radius: 15.0,
            blur_radius: 4.5,
            darken_amount: 0.06,
            top_padding: 13.0,
            bottom_padding: 31.0,
            ..movie("浪漫紫", [0xF3E5F5, 0xE1BEE7], Ink(0x6A1B9A, 0x7B1FA2, 0x8E24AA))
                .with_translucency(0.87)
        },
        MovieCardStyle {
            card_background_color: Color::WHITE.opacity(0.86),
            card_opacity: 0.89,
            darken_amount: 0.07,
            title_font_size: 17.0,
            horizontal_padding: 16.0,
            ..movie("深邃蓝", [0xE3F2FD, 0xBBDEFB], Ink(0x1565C0, 0x1976D2, 0x1E88E5))
                .with_translucency(0.86)
        },
        MovieCardStyle {
            card_background_color: Color::WHITE.opacity(0.88),
            corner_radius: 13.0,
            top_padding: 13.0,
            bottom_padding: 31.0,
            ..movie("暮光粉", [0xFCE4EC, 0xF8BBD0], Ink(0xC2185B, 0xD81B60, 0xE91E63))
                .with_translucency(0.88)
        },
        MovieCardStyle {
            card_background_color: Color::WHITE.opacity(0.87),
            card_opacity: 0.89,
            darken_amount: 0.06,
            ..movie("秋日棕", [0xEFEBE9, 0xD7CCC8], Ink(0x4E342E, 0x5D4037, 0x6D4C41))
                .with_translucency(0.87)
        },
        MovieCardStyle {
            card_opacity: 0.88,
            darken_amount: 0.07,
            ..movie("墨黑", [0xECEFF1, 0xCFD8DC], Ink(0x263238, 0x37474F, 0x455A64))
                .with_translucency(0.85)
        },
        MovieCardStyle {
            background: Background::solid(Color::WHITE, vec![Color::WHITE, Color::WHITE], 45.0),
            card_background_color: Color::WHITE.opacity(0.95),
            card_opacity: 0.95,
            corner_radius: 12.0,
            blur_radius: 3.0,
            darken_amount: 0.03,
            horizontal_padding: 16.0,
            bottom_padding: 30.0,
            ..movie("极简白", [0xffffff, 0xffffff], Ink(0x212121, 0x424242, 0x616161))
        },
    ]
});

fn movie(name: &str, gradient: [u32; 2], ink: Ink) -> MovieCardStyle {
    let gray = hex(0x5c5c5c);
    MovieCardStyle {
        id: Uuid::new_v4(),
        name: name.to_string(),
        background: Background::gradient(stops(&gradient), 45.0, Color::CLEAR),
        card_background_color: Color::WHITE.opacity(0.85),
        card_opacity: 0.9,
        corner_radius: 14.0,
        blur_radius: 4.0,
        darken_amount: 0.05,
        title_color: hex(ink.0),
        text_color: hex(ink.1),
        date_color: hex(ink.2),
        award_text_color: gray.opacity(0.9),
        watermark_color: gray.opacity(0.7),
        title_font: "SmileySans-Oblique".to_string(),
        title_font_size: 16.0,
        content_font: "LXGWWenKai-Regular".to_string(),
        content_font_size: 12.0,
        show_watermark: true,
        watermark_text: "CardMaker".to_string(),
        watermark_opacity: 0.9,
        watermark_size: 8.0,
        top_padding: 12.0,
        horizontal_padding: 17.0,
        bottom_padding: 32.0,
    }
}

impl MovieCardStyle {
    /// Sets the award text and watermark opacity together. The watermark
    /// color always sits 0.2 below the award text.
    fn with_translucency(mut self, opacity: f64) -> Self {
        let gray = hex(0x5c5c5c);
        self.award_text_color = gray.opacity(opacity);
        self.watermark_color = gray.opacity(opacity - 0.2);
        self.watermark_opacity = opacity;
        self
    }
}

pub fn movie_presets() -> &'static [MovieCardStyle] {
    &MOVIE_PRESETS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::LAYER_COUNT;

    #[test]
    fn every_layout_has_presets() {
        for kind in LayoutKind::ALL {
            let presets = presets_for(kind);
            assert!(!presets.is_empty(), "{kind}");
            assert!(presets.iter().all(|preset| preset.layout() == kind));
        }
        assert_eq!(base_presets().len(), 10);
        assert_eq!(article_presets().len(), 12);
        assert_eq!(layered_presets().len(), 3);
        assert_eq!(movie_presets().len(), 9);
    }

    #[test]
    fn gradient_presets_have_stops() {
        for preset in LayoutKind::ALL.into_iter().flat_map(presets_for) {
            let background = match &preset {
                StyleSnapshot::Base(s) => &s.background,
                StyleSnapshot::Article(s) => &s.background,
                StyleSnapshot::Layered(s) => &s.background,
                StyleSnapshot::Movie(s) => &s.background,
            };
            if background.use_gradient {
                assert!(!background.gradient_colors.is_empty(), "{}", preset.name());
            }
        }
    }

    #[test]
    fn layered_arrays_stay_aligned() {
        for preset in layered_presets() {
            assert_eq!(preset.layer_colors.len(), LAYER_COUNT);
            assert_eq!(preset.layer_scales.len(), LAYER_COUNT);
            assert_eq!(preset.layer_offsets.len(), LAYER_COUNT);
            assert_eq!(preset.layer_rotations.len(), LAYER_COUNT);
            assert_eq!(preset.layer_visibility.len(), LAYER_COUNT);
        }
    }

    #[test]
    fn simple_white_is_flat_black_on_white() {
        let preset = &base_presets()[0];
        assert_eq!(preset.name, "简约白");
        assert!(!preset.background.use_gradient);
        assert_eq!(preset.corner_radius, 16.0);

        let text = preset.text_color.encode();
        assert_eq!(
            (text.red, text.green, text.blue, text.opacity),
            (0.0, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn movie_translucency_pairs() {
        let warm = &movie_presets()[1];
        assert_eq!(warm.name, "暖阳橙");
        assert!((warm.award_text_color.alpha() - 0.85).abs() < 1e-9);
        assert!((warm.watermark_color.alpha() - 0.65).abs() < 1e-9);
        assert_eq!(warm.watermark_opacity, 0.85);
        assert_eq!(warm.title_font_size, 18.0);
    }

    #[test]
    fn ids_are_stable_within_a_process() {
        let first: Vec<_> = base_presets().iter().map(|p| p.id).collect();
        let second: Vec<_> = base_presets().iter().map(|p| p.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn find_by_name() {
        let found = find(LayoutKind::Layered, "淡紫").unwrap();
        assert_eq!(found.layout(), LayoutKind::Layered);
        assert!(find(LayoutKind::Layered, "不存在").is_none());
    }
}
