//! Persistence for user-saved themes.
//!
//! Themes live in a single storage slot as one serialized archive. The whole
//! archive is rewritten on every save or delete. Storage and decode failures
//! never reach the caller: a slot that cannot be read counts as "no saved
//! themes", and a failed write leaves the in-memory list as it is.
//!
//! ```
//! use cardmaker_style::{BaseCard, CustomTheme, MemoryStore, ThemeStore};
//!
//! let mut store = ThemeStore::open(MemoryStore::default(), "saved_themes");
//! let theme = CustomTheme::capture("Calm", &BaseCard::default());
//! store.save(theme.clone());
//! assert_eq!(store.themes().len(), 1);
//!
//! store.delete(&theme);
//! assert!(store.themes().is_empty());
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::CardError;
use crate::theme::{CustomTheme, ThemeRecord};

/// Current archive format version.
pub const ARCHIVE_VERSION: u32 = 1;

// ============================================================================
// KeyValueStore
// ============================================================================

/// A durable byte store addressed by string keys.
pub trait KeyValueStore {
    /// Returns the bytes stored under `key`, or `None` if the slot is empty.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CardError>;

    /// Replaces the slot content.
    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), CardError>;
}

/// Keeps slots in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Creates a store with one slot pre-filled.
    pub fn with_slot(key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), bytes.into());
        Self { slots }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CardError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), CardError> {
        self.slots.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CardError> {
        match fs::read(self.slot_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CardError::Storage {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), CardError> {
        let storage_err = |source| CardError::Storage {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(storage_err)?;

        // Write beside the slot and rename so a crash never leaves half a file.
        let path = self.slot_path(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, bytes).map_err(storage_err)?;
        fs::rename(&staging, &path).map_err(storage_err)
    }
}

// ============================================================================
// Archive
// ============================================================================

#[derive(Serialize)]
struct ArchiveOut<'a> {
    version: u32,
    themes: &'a [CustomTheme],
}

/// What the slot may contain. Unversioned archives are a bare array.
///
/// Themes stay raw here so one bad record cannot fail the rest.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArchiveIn {
    Versioned {
        version: u32,
        themes: Vec<serde_json::Value>,
    },
    Legacy(Vec<serde_json::Value>),
}

/// Shape of the archive as written, for schema export.
#[cfg(feature = "jsonschema")]
#[derive(schemars::JsonSchema)]
#[allow(dead_code)]
struct ArchiveSchema {
    version: u32,
    themes: Vec<ThemeRecord>,
}

/// Decodes an archive, skipping themes that cannot be understood.
fn decode_archive(bytes: &[u8]) -> Result<Vec<CustomTheme>, CardError> {
    let records = match serde_json::from_slice::<ArchiveIn>(bytes)? {
        ArchiveIn::Versioned { version, themes } => {
            if version > ARCHIVE_VERSION {
                warn!(version, "theme archive is newer than this build");
            }
            themes
        }
        ArchiveIn::Legacy(themes) => {
            debug!("reading unversioned theme archive");
            themes
        }
    };

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let decoded = serde_json::from_value::<ThemeRecord>(value)
                .map_err(CardError::from)
                .and_then(CustomTheme::try_from);
            match decoded {
                Ok(theme) => Some(theme),
                Err(err) => {
                    warn!(index, %err, "skipping saved theme");
                    None
                }
            }
        })
        .collect())
}

fn encode_archive(themes: &[CustomTheme]) -> Result<Vec<u8>, CardError> {
    let archive = ArchiveOut {
        version: ARCHIVE_VERSION,
        themes,
    };
    Ok(serde_json::to_vec(&archive)?)
}

/// JSON schema of the persisted archive.
#[cfg(feature = "jsonschema")]
pub fn archive_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(ArchiveSchema)
}

// ============================================================================
// ThemeStore
// ============================================================================

/// The ordered list of saved themes, mirrored to one storage slot.
#[derive(Debug)]
pub struct ThemeStore<S> {
    backend: S,
    key: String,
    themes: Vec<CustomTheme>,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Opens the store and loads whatever the slot holds.
    pub fn open(backend: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            backend,
            key: key.into(),
            themes: Vec::new(),
        };
        store.themes = store.load();
        store
    }

    /// Reads the slot. Missing or unreadable data yields an empty list.
    pub fn load(&self) -> Vec<CustomTheme> {
        let bytes = match self.backend.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key = %self.key, %err, "failed to read saved themes");
                return Vec::new();
            }
        };

        match decode_archive(&bytes) {
            Ok(themes) => {
                debug!(key = %self.key, count = themes.len(), "loaded saved themes");
                themes
            }
            Err(err) => {
                warn!(key = %self.key, %err, "saved themes are corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Saved themes in insertion order.
    pub fn themes(&self) -> &[CustomTheme] {
        &self.themes
    }

    pub fn get(&self, id: uuid::Uuid) -> Option<&CustomTheme> {
        self.themes.iter().find(|theme| theme.id() == id)
    }

    /// Appends a theme and rewrites the slot.
    ///
    /// The append is kept even if the write fails.
    pub fn save(&mut self, theme: CustomTheme) {
        info!(theme = %theme.id(), name = theme.name(), layout = %theme.layout(), "saving theme");
        self.themes.push(theme);
        self.persist();
    }

    /// Removes the theme with the same id, if any, and rewrites the slot.
    pub fn delete(&mut self, theme: &CustomTheme) {
        if let Some(index) = self.themes.iter().position(|t| t.id() == theme.id()) {
            self.themes.remove(index);
            info!(theme = %theme.id(), "deleted theme");
        } else {
            debug!(theme = %theme.id(), "delete of unknown theme");
        }
        self.persist();
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn persist(&mut self) {
        let result =
            encode_archive(&self.themes).and_then(|bytes| self.backend.set(&self.key, &bytes));
        if let Err(err) = result {
            warn!(key = %self.key, %err, "failed to persist saved themes");
        }
    }
}

impl ThemeStore<FileStore> {
    /// The process-wide store, opened on first use from
    /// [`EditorConfig::from_env`].
    pub fn shared() -> &'static Mutex<ThemeStore<FileStore>> {
        static SHARED: OnceLock<Mutex<ThemeStore<FileStore>>> = OnceLock::new();
        SHARED.get_or_init(|| {
            let config = EditorConfig::from_env();
            Mutex::new(ThemeStore::from_config(&config))
        })
    }

    /// Opens the file-backed store described by `config`.
    pub fn from_config(config: &EditorConfig) -> Self {
        ThemeStore::open(FileStore::new(&config.data_dir), config.themes_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BaseCard, LayeredCard, MovieCard, WatermarkPosition};

    const KEY: &str = "saved_themes";

    /// Backend whose writes always fail.
    #[derive(Default)]
    struct ReadOnly(MemoryStore);

    impl KeyValueStore for ReadOnly {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CardError> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _bytes: &[u8]) -> Result<(), CardError> {
            Err(CardError::Storage {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn empty_slot_loads_empty() {
        let store = ThemeStore::open(MemoryStore::default(), KEY);
        assert!(store.themes().is_empty());
    }

    #[test]
    fn save_persists_whole_archive() {
        let mut store = ThemeStore::open(MemoryStore::default(), KEY);
        let first = CustomTheme::capture("one", &BaseCard::default());
        let second = CustomTheme::capture("two", &MovieCard::default());
        store.save(first.clone());
        store.save(second.clone());

        let bytes = store.backend().get(KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["version"], ARCHIVE_VERSION);
        assert_eq!(json["themes"].as_array().map(Vec::len), Some(2));

        let reopened = ThemeStore::open(store.backend().clone(), KEY);
        let ids: Vec<_> = reopened.themes().iter().map(CustomTheme::id).collect();
        assert_eq!(ids, [first.id(), second.id()]);
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut store = ThemeStore::open(MemoryStore::default(), KEY);
        store.save(CustomTheme::capture("kept", &BaseCard::default()));

        let stranger = CustomTheme::capture("stranger", &BaseCard::default());
        store.delete(&stranger);

        assert_eq!(store.themes().len(), 1);
        assert_eq!(store.themes()[0].name(), "kept");
    }

    #[test]
    fn legacy_bare_array_is_read() {
        let theme = CustomTheme::capture("old", &BaseCard::default());
        let bytes = serde_json::to_vec(&vec![theme.clone()]).unwrap();

        let store = ThemeStore::open(MemoryStore::with_slot(KEY, bytes), KEY);
        assert_eq!(store.themes().len(), 1);
        assert_eq!(store.themes()[0].id(), theme.id());
    }

    #[test]
    fn unknown_layouts_are_skipped_individually() {
        let good = CustomTheme::capture("good", &BaseCard::default());
        let mut bad = serde_json::to_value(CustomTheme::capture("bad", &BaseCard::default())).unwrap();
        bad["layout"] = "posterCard".into();
        let archive = serde_json::json!({ "version": 1, "themes": [bad, good] });

        let store = ThemeStore::open(
            MemoryStore::with_slot(KEY, serde_json::to_vec(&archive).unwrap()),
            KEY,
        );
        assert_eq!(store.themes().len(), 1);
        assert_eq!(store.themes()[0].name(), "good");
    }

    fn archive_of(themes: Vec<serde_json::Value>) -> MemoryStore {
        let archive = serde_json::json!({ "version": ARCHIVE_VERSION, "themes": themes });
        MemoryStore::with_slot(KEY, serde_json::to_vec(&archive).unwrap())
    }

    #[test]
    fn unknown_watermark_position_keeps_the_archive() {
        let good = CustomTheme::capture("good", &MovieCard::default());
        let newer = CustomTheme::capture("newer", &BaseCard::default());
        let mut newer_json = serde_json::to_value(&newer).unwrap();
        newer_json["baseStyle"]["watermarkPosition"] = "topCenter".into();

        let mut store = ThemeStore::open(
            archive_of(vec![serde_json::to_value(&good).unwrap(), newer_json]),
            KEY,
        );
        assert_eq!(store.themes().len(), 2);
        let position = store
            .get(newer.id())
            .and_then(CustomTheme::base_style)
            .map(|style| style.watermark_position);
        assert_eq!(position, Some(WatermarkPosition::BottomRight));

        store.save(CustomTheme::capture("third", &BaseCard::default()));
        assert_eq!(store.load().len(), 3);
    }

    #[tracing_test::traced_test]
    #[test]
    fn bad_record_is_skipped_individually() {
        let good = CustomTheme::capture("good", &BaseCard::default());
        let mut short = serde_json::to_value(CustomTheme::capture("short", &LayeredCard::default()))
            .unwrap();
        short["layeredStyle"]["layerScales"] = serde_json::json!([0.7, 0.7]);

        let mut store = ThemeStore::open(
            archive_of(vec![serde_json::to_value(&good).unwrap(), short]),
            KEY,
        );
        assert_eq!(store.themes().len(), 1);
        assert_eq!(store.themes()[0].id(), good.id());
        assert!(logs_contain("skipping saved theme"));

        // The unreadable record is gone after the next write, the good one is not.
        store.save(CustomTheme::capture("next", &MovieCard::default()));
        let names: Vec<_> = store.load().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, ["good", "next"]);
    }

    #[tracing_test::traced_test]
    #[test]
    fn corrupt_slot_loads_empty() {
        let store = ThemeStore::open(MemoryStore::with_slot(KEY, b"{not json".to_vec()), KEY);
        assert!(store.themes().is_empty());
        assert!(logs_contain("saved themes are corrupt"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn failed_write_keeps_in_memory_append() {
        let mut store = ThemeStore::open(ReadOnly::default(), KEY);
        store.save(CustomTheme::capture("volatile", &BaseCard::default()));

        assert_eq!(store.themes().len(), 1);
        assert!(store.backend().get(KEY).unwrap().is_none());
        assert!(logs_contain("failed to persist saved themes"));
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileStore::new(dir.path().join("nested"));
        assert!(backend.get(KEY).unwrap().is_none());

        backend.set(KEY, b"[]").unwrap();
        assert_eq!(backend.get(KEY).unwrap().as_deref(), Some(&b"[]"[..]));
        assert!(dir.path().join("nested/saved_themes.json").exists());
    }
}
