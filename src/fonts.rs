//! Bundled fonts and their registration with the renderer.
//!
//! Font identifiers are opaque strings. The renderer resolves them against
//! whatever has been registered and falls back to its default font for
//! anything unknown, so a failed registration is logged and otherwise
//! ignored.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::CardError;

/// The platform font. Always available, never registered.
pub const SYSTEM_FONT: &str = "PingFang SC";

/// A font offered in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontPreset {
    pub id: &'static str,
    pub display_name: &'static str,
}

/// Fonts offered in the picker, in picker order.
pub const FONT_PRESETS: &[FontPreset] = &[
    FontPreset { id: SYSTEM_FONT, display_name: "系统" },
    FontPreset { id: "AaJianHaoTi", display_name: "建豪体" },
    FontPreset { id: "Slidefu", display_name: "演示佛系" },
    FontPreset { id: "HongLeiZhuoShu", display_name: "鸿雷拙书" },
    FontPreset { id: "TsangerYuMo", display_name: "仓耳与墨" },
    FontPreset { id: "TsangerXWZ", display_name: "仓耳行者" },
    FontPreset { id: "TsangerYuYangT", display_name: "仓耳渔阳" },
];

/// Display name for a font id, if it is one of the presets.
pub fn display_name(id: &str) -> Option<&'static str> {
    FONT_PRESETS
        .iter()
        .find(|preset| preset.id == id)
        .map(|preset| preset.display_name)
}

/// Registers bundled font files with the rendering layer.
pub trait FontRegistrar {
    fn register(&mut self, font: &str) -> Result<(), CardError>;
}

/// Tracks which fonts have been handed to a [`FontRegistrar`].
#[derive(Debug, Default)]
pub struct FontLoader {
    loaded: HashSet<String>,
}

impl FontLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every font in `fonts` that is not yet loaded.
    ///
    /// Returns how many fonts were newly registered.
    pub fn preload<'a, R>(
        &mut self,
        registrar: &mut R,
        fonts: impl IntoIterator<Item = &'a str>,
    ) -> usize
    where
        R: FontRegistrar + ?Sized,
    {
        let mut registered = 0;
        for font in fonts {
            if font == SYSTEM_FONT || self.loaded.contains(font) {
                continue;
            }
            match registrar.register(font) {
                Ok(()) => {
                    debug!(font, "registered font");
                    self.loaded.insert(font.to_string());
                    registered += 1;
                }
                Err(err) => warn!(font, %err, "failed to register font"),
            }
        }
        registered
    }

    /// Registers all [`FONT_PRESETS`].
    pub fn preload_presets<R>(&mut self, registrar: &mut R) -> usize
    where
        R: FontRegistrar + ?Sized,
    {
        self.preload(registrar, FONT_PRESETS.iter().map(|preset| preset.id))
    }

    pub fn is_loaded(&self, font: &str) -> bool {
        font == SYSTEM_FONT || self.loaded.contains(font)
    }
}
