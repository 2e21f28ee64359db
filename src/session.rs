//! The editor session: four live cards, the active layout, and the theme the
//! session was opened from.

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::CardError;
use crate::export::{CardImage, CardRenderer, CardView, SizePx, render_card};
use crate::layout::{AspectRatio, CardSize, LayoutKind, card_size};
use crate::store::{KeyValueStore, ThemeStore};
use crate::style::{
    ArticleCard, BaseCard, LayeredCard, MovieCard, StyleSchema, StyleSnapshot,
};
use crate::theme::CustomTheme;

/// Editing state for one visit to the editor.
///
/// All four layouts are held at once; only the active one is shown. The
/// others keep their default values until selected.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    pub base: BaseCard,
    pub article: ArticleCard,
    pub layered: LayeredCard,
    pub movie: MovieCard,
    /// Index into the active layout's aspect-ratio list. Out-of-range values
    /// clamp to the last ratio.
    pub selected_aspect_ratio_index: usize,
    layout: Option<LayoutKind>,
    origin_theme: Option<CustomTheme>,
}

impl EditorSession {
    /// A session starting from default styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session for editing a saved theme. The theme is applied immediately
    /// and its layout becomes active.
    pub fn from_theme(theme: CustomTheme) -> Self {
        let mut session = Self::default();
        session.apply_theme(&theme);
        session.layout = Some(theme.layout());
        session.origin_theme = Some(theme);
        session
    }

    /// The active layout, or `None` before the first [`Self::set_layout`].
    pub fn layout(&self) -> Option<LayoutKind> {
        self.layout
    }

    pub fn origin_theme(&self) -> Option<&CustomTheme> {
        self.origin_theme.as_ref()
    }

    /// Activates `kind`.
    ///
    /// Without an originating theme the layout restarts from its defaults on
    /// every selection. A theme-backed session keeps its values.
    pub fn set_layout(&mut self, kind: LayoutKind) {
        let previous = self.layout.replace(kind);
        if self.origin_theme.is_some() {
            debug!(from = ?previous, to = %kind, "layout selected, keeping theme values");
            return;
        }

        match kind {
            LayoutKind::Base => self.base.reset(),
            LayoutKind::Article => self.article.reset(),
            LayoutKind::Layered => self.layered.reset(),
            LayoutKind::Movie => self.movie.reset(),
        }
        debug!(from = ?previous, to = %kind, "layout selected, reset to defaults");
    }

    /// Applies the theme's snapshot to the live card of the theme's layout.
    ///
    /// Does nothing if the theme carries no snapshot for its layout.
    pub fn apply_theme(&mut self, theme: &CustomTheme) {
        match theme.style() {
            Some(style) => self.apply_preset(style),
            None => warn!(
                theme = %theme.id(),
                layout = %theme.layout(),
                "theme has no style to apply"
            ),
        }
    }

    /// Applies any snapshot to the live card of its own layout.
    pub fn apply_preset(&mut self, snapshot: &StyleSnapshot) {
        match snapshot {
            StyleSnapshot::Base(style) => self.base.apply_snapshot(style),
            StyleSnapshot::Article(style) => self.article.apply_snapshot(style),
            StyleSnapshot::Layered(style) => self.layered.apply_snapshot(style),
            StyleSnapshot::Movie(style) => self.movie.apply_snapshot(style),
        }
    }

    /// Captures the active card as a new theme and saves it.
    ///
    /// Returns `None` if no layout is active.
    pub fn save_current_theme<S: KeyValueStore>(
        &self,
        name: impl Into<String>,
        store: &mut ThemeStore<S>,
    ) -> Option<CustomTheme> {
        let Some(kind) = self.layout else {
            warn!("cannot save a theme before a layout is selected");
            return None;
        };

        let theme = match kind {
            LayoutKind::Base => CustomTheme::capture(name, &self.base),
            LayoutKind::Article => CustomTheme::capture(name, &self.article),
            LayoutKind::Layered => CustomTheme::capture(name, &self.layered),
            LayoutKind::Movie => CustomTheme::capture(name, &self.movie),
        };
        store.save(theme.clone());
        Some(theme)
    }

    /// Ratio picker entries for the active layout.
    pub fn aspect_ratios(&self) -> &'static [AspectRatio] {
        match self.layout {
            Some(kind) => kind.aspect_ratios(),
            None => std::slice::from_ref(&AspectRatio::SQUARE),
        }
    }

    pub fn current_aspect_ratio(&self) -> AspectRatio {
        match self.layout {
            Some(kind) => kind.aspect_ratio(self.selected_aspect_ratio_index),
            None => AspectRatio::SQUARE,
        }
    }

    /// On-screen size of the active card for a screen `screen_width` wide.
    pub fn card_size(&self, screen_width: f64) -> CardSize {
        card_size(self.current_aspect_ratio(), screen_width)
    }

    /// Read-only view of the active card.
    pub fn active_card(&self) -> Option<CardView<'_>> {
        Some(match self.layout? {
            LayoutKind::Base => CardView::Base(&self.base),
            LayoutKind::Article => CardView::Article(&self.article),
            LayoutKind::Layered => CardView::Layered(&self.layered),
            LayoutKind::Movie => CardView::Movie(&self.movie),
        })
    }

    /// Renders the active card at `size` pixels.
    pub async fn export_image<R>(
        &self,
        renderer: &mut R,
        size: SizePx,
        scale: f32,
        config: &EditorConfig,
    ) -> Result<CardImage, CardError>
    where
        R: CardRenderer + ?Sized,
    {
        let card = self.active_card().ok_or(CardError::RenderFailed)?;
        render_card(renderer, card, size, scale, config).await
    }

    /// Renders the active card and hands it to `share`. Returns whether a
    /// bitmap was produced and the share step reported success.
    pub async fn share_card<R, F>(
        &self,
        renderer: &mut R,
        size: SizePx,
        scale: f32,
        config: &EditorConfig,
        share: F,
    ) -> bool
    where
        R: CardRenderer + ?Sized,
        F: AsyncFnOnce(CardImage) -> bool,
    {
        match self.export_image(renderer, size, scale, config).await {
            Ok(image) => {
                let shared = share(image).await;
                info!(shared, "share sheet closed");
                shared
            }
            Err(err) => {
                warn!(%err, "card export failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn fresh_session_has_no_layout() {
        let session = EditorSession::new();
        assert_eq!(session.layout(), None);
        assert_eq!(session.current_aspect_ratio(), AspectRatio::SQUARE);
        assert!(session.active_card().is_none());
    }

    #[test]
    fn reselecting_resets_without_theme() {
        let mut session = EditorSession::new();
        session.set_layout(LayoutKind::Article);
        session.article.title_size = 40.0;

        session.set_layout(LayoutKind::Article);
        assert_eq!(session.article.title_size, 16.0);
    }

    #[test]
    fn reselecting_keeps_theme_values() {
        let mut card = ArticleCard::default();
        card.title_size = 30.0;
        let mut session = EditorSession::from_theme(CustomTheme::capture("mine", &card));
        assert_eq!(session.layout(), Some(LayoutKind::Article));
        assert_eq!(session.article.title_size, 30.0);

        session.article.title_size = 40.0;
        session.set_layout(LayoutKind::Article);
        assert_eq!(session.article.title_size, 40.0);
    }

    #[test]
    fn switching_layout_leaves_others_alone() {
        let mut session = EditorSession::new();
        session.set_layout(LayoutKind::Base);
        session.base.font_size = 50.0;

        session.set_layout(LayoutKind::Movie);
        assert_eq!(session.base.font_size, 50.0);
    }

    #[test]
    fn apply_preset_targets_its_layout() {
        let mut session = EditorSession::new();
        let preset = crate::preset::find(LayoutKind::Base, "简约白").unwrap();
        session.apply_preset(&preset);

        assert!(!session.base.background.use_gradient);
        assert_eq!(session.movie, MovieCard {
            date: session.movie.date,
            ..MovieCard::default()
        });
    }

    #[test]
    fn save_requires_a_layout() {
        let mut store = ThemeStore::open(MemoryStore::default(), "saved_themes");
        assert!(EditorSession::new().save_current_theme("x", &mut store).is_none());
        assert!(store.themes().is_empty());
    }

    #[test]
    fn save_captures_active_layout() {
        let mut store = ThemeStore::open(MemoryStore::default(), "saved_themes");
        let mut session = EditorSession::new();
        session.set_layout(LayoutKind::Layered);
        session.layered.font_size = 18.0;

        let theme = session.save_current_theme("stack", &mut store).unwrap();
        assert_eq!(theme.layout(), LayoutKind::Layered);
        assert_eq!(theme.layered_style().map(|s| s.font_size), Some(18.0));
        assert_eq!(store.themes().len(), 1);
    }

    #[test]
    fn ratio_index_clamps() {
        let mut session = EditorSession::new();
        session.set_layout(LayoutKind::Movie);
        session.selected_aspect_ratio_index = 10;
        assert_eq!(session.current_aspect_ratio().name, "9:16");

        session.selected_aspect_ratio_index = 0;
        let size = session.card_size(300.0);
        assert_eq!(size.scale, 1.0);
        assert_eq!(size.height, 400.0);
    }

    #[test]
    fn article_has_only_square() {
        let mut session = EditorSession::new();
        session.set_layout(LayoutKind::Article);
        session.selected_aspect_ratio_index = 3;
        assert_eq!(session.aspect_ratios().len(), 1);
        assert_eq!(session.current_aspect_ratio(), AspectRatio::SQUARE);
    }
}
