//! cardmaker-style: style model for shareable text cards
//!
//! This crate holds everything about a card except the drawing: the four
//! layout templates and their editable styles, the built-in presets, the
//! user's saved themes, and the editor session that ties them together.
//! Pixels come from a platform renderer behind the [`CardRenderer`] trait.
//!
//! # Example
//!
//! ```
//! use cardmaker_style::{EditorSession, LayoutKind, MemoryStore, ThemeStore};
//!
//! let mut store = ThemeStore::open(MemoryStore::default(), "saved_themes");
//!
//! let mut session = EditorSession::new();
//! session.set_layout(LayoutKind::Movie);
//! session.movie.title_font_size = 20.0;
//!
//! let theme = session.save_current_theme("MyTheme", &mut store).unwrap();
//! assert_eq!(theme.movie_style().unwrap().title_font_size, 20.0);
//!
//! // Reopening the theme keeps its values across layout re-selection.
//! let mut editing = EditorSession::from_theme(theme);
//! editing.set_layout(LayoutKind::Movie);
//! assert_eq!(editing.movie.title_font_size, 20.0);
//! ```
//!
//! # Presets
//!
//! ```
//! use cardmaker_style::{preset, LayoutKind, EditorSession};
//!
//! let mut session = EditorSession::new();
//! session.set_layout(LayoutKind::Base);
//!
//! let simple_white = preset::find(LayoutKind::Base, "简约白").unwrap();
//! session.apply_preset(&simple_white);
//! assert!(!session.base.background.use_gradient);
//! ```

mod codec;
mod config;
mod error;
mod export;
pub mod fonts;
mod layout;
pub mod preset;
mod session;
mod store;
pub mod style;
mod theme;

pub use codec::{Color, ColorComponents, TextAlignment};
pub use config::EditorConfig;
pub use error::CardError;
pub use export::{
    CardImage, CardRenderer, CardView, SizePx, encode_png, flatten_onto_white, render_card,
};
pub use fonts::{FONT_PRESETS, FontLoader, FontPreset, FontRegistrar};
pub use layout::{AspectRatio, BASE_CARD_WIDTH, CardSize, LayoutKind, card_size};
pub use session::EditorSession;
#[cfg(feature = "jsonschema")]
pub use store::archive_schema;
pub use store::{ARCHIVE_VERSION, FileStore, KeyValueStore, MemoryStore, ThemeStore};
pub use style::{
    ArticleCard, ArticleCardStyle, ArticleModule, ArticleModules, Background, BackgroundFill,
    BaseCard, BaseCardStyle, DateFormat, LAYER_COUNT, LayeredCard, LayeredCardStyle, MovieCard,
    MovieCardStyle, StyleSchema, StyleSnapshot, WatermarkPosition,
};
pub use theme::{CustomTheme, ThemeRecord};
