//! Rasterizing the active card for sharing.
//!
//! Drawing is done by an external [`CardRenderer`]. This module drives it:
//! request a layout, give the view tree a short pause to settle, capture the
//! bitmap under a timeout, then flatten it onto opaque white so transparent
//! corners do not turn black in other apps.
//!
//! The settle pause is a heuristic, not a readiness signal. A renderer that
//! needs longer than [`EditorConfig::settle_delay`] can still hand back a
//! stale frame.

use std::future::Future;
use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::error::CardError;
use crate::layout::{CardSize, LayoutKind};
use crate::style::{ArticleCard, BaseCard, LayeredCard, MovieCard};

// ============================================================================
// Sizes and images
// ============================================================================

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel size of an on-screen card at the given display scale.
    pub fn from_card(size: CardSize, display_scale: f64) -> Self {
        let px = |points: f64| (points * display_scale).round().max(1.0) as u32;
        Self::new(px(size.width), px(size.height))
    }
}

/// A captured card bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct CardImage {
    /// The image data in RGBA format.
    pub data: RgbaImage,

    /// Display scale the bitmap was rendered at. The logical size of the
    /// card is `dimensions / scale`.
    pub scale: f32,
}

impl CardImage {
    pub fn new(data: RgbaImage, scale: f32) -> Self {
        Self { data, scale }
    }

    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.data.width() as f32 / self.scale,
            self.data.height() as f32 / self.scale,
        )
    }

    /// Encodes the bitmap as PNG for the share sheet.
    pub fn to_png(&self) -> Result<Vec<u8>, CardError> {
        encode_png(&self.data)
    }
}

// ============================================================================
// Renderer seam
// ============================================================================

/// Read-only view of the card being exported.
#[derive(Debug, Clone, Copy)]
pub enum CardView<'a> {
    Base(&'a BaseCard),
    Article(&'a ArticleCard),
    Layered(&'a LayeredCard),
    Movie(&'a MovieCard),
}

impl CardView<'_> {
    pub fn layout(&self) -> LayoutKind {
        match self {
            Self::Base(_) => LayoutKind::Base,
            Self::Article(_) => LayoutKind::Article,
            Self::Layered(_) => LayoutKind::Layered,
            Self::Movie(_) => LayoutKind::Movie,
        }
    }
}

/// The platform layer that turns a card into pixels.
pub trait CardRenderer {
    /// Lays out `card` at `size` pixels. Drawing may complete later.
    fn request_layout(&mut self, card: CardView<'_>, size: SizePx, scale: f32);

    /// Returns the most recent frame, or `None` if nothing could be drawn.
    fn capture(&mut self) -> impl Future<Output = Option<RgbaImage>>;
}

/// Renders `card` and returns the flattened bitmap.
///
/// Dropping the returned future abandons the export; nothing is delivered
/// unless the whole bitmap comes back.
pub async fn render_card<R>(
    renderer: &mut R,
    card: CardView<'_>,
    size: SizePx,
    scale: f32,
    config: &EditorConfig,
) -> Result<CardImage, CardError>
where
    R: CardRenderer + ?Sized,
{
    let started = Instant::now();
    let layout = card.layout();
    renderer.request_layout(card, size, scale);

    sleep(config.settle_delay).await;

    let frame = match timeout(config.render_timeout, renderer.capture()).await {
        Ok(Some(frame)) => frame,
        Ok(None) => {
            warn!(%layout, "renderer returned no image");
            return Err(CardError::RenderFailed);
        }
        Err(_) => {
            warn!(%layout, timeout = ?config.render_timeout, "renderer timed out");
            return Err(CardError::RenderTimedOut(config.render_timeout));
        }
    };

    let image = CardImage::new(flatten_onto_white(&frame), scale);
    debug!(
        %layout,
        width = image.data.width(),
        height = image.data.height(),
        elapsed = ?started.elapsed(),
        "card exported"
    );
    Ok(image)
}

// ============================================================================
// Compositing
// ============================================================================

/// Paints `frame` over an opaque white canvas of the same size.
pub fn flatten_onto_white(frame: &RgbaImage) -> RgbaImage {
    let mut canvas = frame.clone();
    for pixel in canvas.pixels_mut() {
        *pixel = over_white(*pixel);
    }
    canvas
}

// Source-over with an opaque white destination, so the output alpha is 1.
fn over_white(Rgba([red, green, blue, alpha]): Rgba<u8>) -> Rgba<u8> {
    let coverage = alpha as f32 / 255.0;
    let channel = |value: u8| (value as f32 * coverage + 255.0 * (1.0 - coverage)).round() as u8;
    Rgba([channel(red), channel(green), channel(blue), 255])
}

/// Encodes an RGBA bitmap as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CardError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct StillFrame {
        frame: Option<RgbaImage>,
        requested: Vec<(LayoutKind, SizePx)>,
    }

    impl CardRenderer for StillFrame {
        fn request_layout(&mut self, card: CardView<'_>, size: SizePx, _scale: f32) {
            self.requested.push((card.layout(), size));
        }

        fn capture(&mut self) -> impl Future<Output = Option<RgbaImage>> {
            let frame = self.frame.clone();
            async move { frame }
        }
    }

    struct Hung;

    impl CardRenderer for Hung {
        fn request_layout(&mut self, _card: CardView<'_>, _size: SizePx, _scale: f32) {}

        fn capture(&mut self) -> impl Future<Output = Option<RgbaImage>> {
            std::future::pending()
        }
    }

    fn config() -> EditorConfig {
        EditorConfig::default()
            .with_settle_delay(Duration::from_millis(100))
            .with_render_timeout(Duration::from_secs(2))
    }

    #[test]
    fn transparent_pixels_become_white() {
        let mut frame = RgbaImage::new(2, 1);
        frame.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let flat = flatten_onto_white(&frame);
        assert_eq!(*flat.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*flat.get_pixel(1, 0), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn half_transparent_black_turns_gray() {
        let frame = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let flat = flatten_onto_white(&frame);
        let pixel = flat.get_pixel(0, 0);
        assert_eq!(pixel[3], 255);
        assert!((126..=128).contains(&pixel[0]), "{pixel:?}");
    }

    #[test]
    fn translucent_color_is_tinted_toward_white() {
        let frame = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 51]));
        let flat = flatten_onto_white(&frame);
        assert_eq!(*flat.get_pixel(0, 0), Rgba([255, 204, 204, 255]));
    }

    #[test]
    fn png_has_signature() {
        let png = encode_png(&RgbaImage::new(3, 3)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn size_from_card_rounds_to_pixels() {
        let size = SizePx::from_card(
            CardSize {
                width: 390.0,
                height: 520.0,
                scale: 1.3,
            },
            3.0,
        );
        assert_eq!(size, SizePx::new(1170, 1560));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_settle_then_captures() {
        let mut renderer = StillFrame {
            frame: Some(RgbaImage::new(4, 4)),
            requested: Vec::new(),
        };
        let card = MovieCard::default();
        let started = Instant::now();

        let image = render_card(
            &mut renderer,
            CardView::Movie(&card),
            SizePx::new(4, 4),
            2.0,
            &config(),
        )
        .await
        .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(100));
        assert_eq!(renderer.requested, [(LayoutKind::Movie, SizePx::new(4, 4))]);
        assert_eq!(image.dimensions(), SizePx::new(4, 4));
        assert_eq!(image.logical_size(), (2.0, 2.0));
        assert_eq!(*image.data.get_pixel(0, 0), Rgba([255; 4]));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_frame_is_a_failure() {
        let mut renderer = StillFrame {
            frame: None,
            requested: Vec::new(),
        };
        let card = BaseCard::default();

        let result = render_card(
            &mut renderer,
            CardView::Base(&card),
            SizePx::new(1, 1),
            1.0,
            &config(),
        )
        .await;
        assert!(matches!(result, Err(CardError::RenderFailed)));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_renderer_times_out() {
        let card = LayeredCard::default();
        let result = render_card(
            &mut Hung,
            CardView::Layered(&card),
            SizePx::new(1, 1),
            1.0,
            &config(),
        )
        .await;
        assert!(matches!(result, Err(CardError::RenderTimedOut(t)) if t == Duration::from_secs(2)));
    }
}
