//! Runtime knobs for the editor: where themes live and how long export waits.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Storage slot holding the saved theme list.
pub const DEFAULT_THEMES_KEY: &str = "saved_themes";

/// Pause between requesting a layout and capturing the bitmap.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on how long the renderer may take to produce a bitmap.
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Directory for [`FileStore`](crate::FileStore) slots.
    pub data_dir: PathBuf,
    pub themes_key: String,
    pub settle_delay: Duration,
    pub render_timeout: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            themes_key: DEFAULT_THEMES_KEY.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            render_timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }
}

impl EditorConfig {
    /// Loads configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                       |
    /// |--------------------------------|-------------------------------|
    /// | `CARDMAKER_DATA_DIR`           | `<platform data dir>/cardmaker` |
    /// | `CARDMAKER_SETTLE_MS`          | `100`                         |
    /// | `CARDMAKER_RENDER_TIMEOUT_MS`  | `5000`                        |
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("CARDMAKER_DATA_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(delay) = millis(&lookup, "CARDMAKER_SETTLE_MS") {
            config.settle_delay = delay;
        }
        if let Some(timeout) = millis(&lookup, "CARDMAKER_RENDER_TIMEOUT_MS") {
            config.render_timeout = timeout;
        }

        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = timeout;
        self
    }
}

fn millis(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(err) => {
            warn!(key, value = %raw, %err, "ignoring invalid duration override");
            None
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("cardmaker")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = EditorConfig::from_lookup(lookup(&[]));
        assert_eq!(config.themes_key, "saved_themes");
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.render_timeout, Duration::from_secs(5));
        assert!(config.data_dir.ends_with("cardmaker"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = EditorConfig::from_lookup(lookup(&[
            ("CARDMAKER_DATA_DIR", "/tmp/cards"),
            ("CARDMAKER_SETTLE_MS", "250"),
            ("CARDMAKER_RENDER_TIMEOUT_MS", " 1500 "),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cards"));
        assert_eq!(config.settle_delay, Duration::from_millis(250));
        assert_eq!(config.render_timeout, Duration::from_millis(1500));
    }

    #[tracing_test::traced_test]
    #[test]
    fn invalid_values_fall_back() {
        let config = EditorConfig::from_lookup(lookup(&[
            ("CARDMAKER_SETTLE_MS", "soon"),
            ("CARDMAKER_DATA_DIR", "  "),
        ]));
        assert_eq!(config.settle_delay, DEFAULT_SETTLE_DELAY);
        assert!(config.data_dir.ends_with("cardmaker"));
        assert!(logs_contain("ignoring invalid duration override"));
    }
}
