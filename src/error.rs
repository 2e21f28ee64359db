//! Error types for the card style model.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by the style model, the theme store, and the export path.
///
/// Most of these never reach the UI: the theme store logs and swallows
/// storage and decode failures, and [`EditorSession::share_card`] collapses
/// export failures into a boolean.
///
/// [`EditorSession::share_card`]: crate::EditorSession::share_card
#[derive(Debug, Error)]
pub enum CardError {
    /// Reading or writing the persisted storage slot failed.
    #[error("storage I/O failed for key `{key}`")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A persisted value could not be encoded or decoded.
    #[error("theme data (de)serialization failed")]
    Serialization(#[from] serde_json::Error),

    /// A persisted theme names a layout this build does not know.
    #[error("unknown layout `{tag}`")]
    UnknownLayout { tag: String },

    /// A user-supplied hex color string could not be parsed.
    #[error("invalid hex color `{input}`")]
    InvalidColor { input: String },

    /// The external renderer returned no bitmap.
    #[error("renderer produced no image")]
    RenderFailed,

    /// The external renderer did not produce a bitmap in time.
    #[error("renderer did not finish within {0:?}")]
    RenderTimedOut(Duration),

    /// Encoding the exported bitmap failed.
    #[error("failed to encode exported image")]
    ImageEncode(#[from] image::ImageError),
}
