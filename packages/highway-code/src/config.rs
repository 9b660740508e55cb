use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{HighwayCodeError, Result};

pub const DEFAULT_RULES_TABLE: &str = "highway_code";
pub const DEFAULT_SECTION_TABLE: &str = "highway_code_section";
pub const DEFAULT_IMAGE_PATH: &str = "/images/highway-code/";

/// Table names are interpolated into SQL, so only plain identifiers pass.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TABLE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("valid regex"));

/// Connection settings for the PostgreSQL store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| HighwayCodeError::Config("DATABASE_URL not set".into()))?;

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            max_connections,
        })
    }

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
        }
    }
}

/// Settings for section assembly: table names, image locations and audio.
///
/// The value is immutable once built. Use [`HighwayCodeConfig::builder`] or
/// [`HighwayCodeConfig::to_builder`] to derive a changed copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighwayCodeConfig {
    rules_table: String,
    section_table: String,
    image_path: String,
    root_path: PathBuf,
    audio_path: String,
    audio_enabled: bool,
}

impl Default for HighwayCodeConfig {
    fn default() -> Self {
        Self {
            rules_table: DEFAULT_RULES_TABLE.into(),
            section_table: DEFAULT_SECTION_TABLE.into(),
            image_path: DEFAULT_IMAGE_PATH.into(),
            root_path: PathBuf::new(),
            audio_path: String::new(),
            audio_enabled: true,
        }
    }
}

impl HighwayCodeConfig {
    /// Load configuration from `HC_*` environment variables.
    ///
    /// Unset variables keep their defaults; rejected values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration from `HC_*` variables supplied by `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = Self::builder();

        if let Some(table) = lookup("HC_RULES_TABLE") {
            builder = builder.rules_table(table);
        }
        if let Some(table) = lookup("HC_SECTION_TABLE") {
            builder = builder.section_table(table);
        }
        if let Some(path) = lookup("HC_IMAGE_PATH") {
            builder = builder.image_path(path);
        }
        if let Some(path) = lookup("HC_ROOT_PATH") {
            builder = builder.root_path(path);
        }
        if let Some(path) = lookup("HC_AUDIO_PATH") {
            builder = builder.audio_path(path);
        }
        if let Some(flag) = lookup("HC_AUDIO_ENABLED") {
            builder = builder.audio_enabled_flag(&flag);
        }

        builder.build()
    }

    pub fn builder() -> HighwayCodeConfigBuilder {
        HighwayCodeConfigBuilder {
            config: Self::default(),
        }
    }

    pub fn to_builder(&self) -> HighwayCodeConfigBuilder {
        HighwayCodeConfigBuilder {
            config: self.clone(),
        }
    }

    pub fn rules_table(&self) -> &str {
        &self.rules_table
    }

    pub fn section_table(&self) -> &str {
        &self.section_table
    }

    /// URL path of the image folder relative to the web root.
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Server directory the image path is resolved against.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// URL of the folder holding the `mp3/` and `ogg/` audio folders.
    pub fn audio_path(&self) -> &str {
        &self.audio_path
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    /// Filesystem location of an image: root path, image path and file name
    /// concatenated as-is.
    pub fn image_file(&self, filename: &str) -> PathBuf {
        let mut path = OsString::from(self.root_path.as_os_str());
        path.push(&self.image_path);
        path.push(filename);
        PathBuf::from(path)
    }
}

/// Builder for [`HighwayCodeConfig`].
///
/// Each setter validates its input. A rejected value leaves the previous one
/// in place, so reading the built config back shows whether a change applied.
#[derive(Debug, Clone)]
pub struct HighwayCodeConfigBuilder {
    config: HighwayCodeConfig,
}

impl HighwayCodeConfigBuilder {
    pub fn rules_table(mut self, table: impl Into<String>) -> Self {
        let table = table.into();
        if is_valid_table_name(&table) {
            self.config.rules_table = table;
        } else {
            tracing::warn!(%table, "ignoring invalid rules table name");
        }
        self
    }

    pub fn section_table(mut self, table: impl Into<String>) -> Self {
        let table = table.into();
        if is_valid_table_name(&table) {
            self.config.section_table = table;
        } else {
            tracing::warn!(%table, "ignoring invalid section table name");
        }
        self
    }

    pub fn image_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if path.is_empty() {
            tracing::warn!("ignoring empty image path");
        } else {
            self.config.image_path = path;
        }
        self
    }

    /// Only an existing directory is accepted.
    pub fn root_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            self.config.root_path = path;
        } else {
            tracing::warn!(path = %path.display(), "ignoring root path that is not a directory");
        }
        self
    }

    pub fn audio_path(mut self, path: impl Into<String>) -> Self {
        self.config.audio_path = path.into();
        self
    }

    pub fn audio_enabled(mut self, enabled: bool) -> Self {
        self.config.audio_enabled = enabled;
        self
    }

    /// Set the audio switch from text such as `true`, `off` or `0`.
    /// Anything [`parse_flag`] does not recognise is ignored.
    pub fn audio_enabled_flag(mut self, flag: &str) -> Self {
        match parse_flag(flag) {
            Some(enabled) => self.config.audio_enabled = enabled,
            None => tracing::warn!(%flag, "ignoring unrecognised audio flag"),
        }
        self
    }

    pub fn build(self) -> HighwayCodeConfig {
        self.config
    }
}

pub fn is_valid_table_name(table: &str) -> bool {
    TABLE_NAME_PATTERN.is_match(table)
}

/// Case-insensitive boolean: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HighwayCodeConfig::default();
        assert_eq!(config.rules_table(), "highway_code");
        assert_eq!(config.section_table(), "highway_code_section");
        assert_eq!(config.image_path(), "/images/highway-code/");
        assert_eq!(config.root_path(), Path::new(""));
        assert_eq!(config.audio_path(), "");
        assert!(config.audio_enabled());
    }

    #[test]
    fn test_table_names_round_trip() {
        let config = HighwayCodeConfig::builder()
            .rules_table("hc_rules")
            .section_table("hc_sections")
            .build();
        assert_eq!(config.rules_table(), "hc_rules");
        assert_eq!(config.section_table(), "hc_sections");
    }

    #[test]
    fn test_invalid_table_names_keep_previous_value() {
        let config = HighwayCodeConfig::builder()
            .rules_table("hc_rules")
            .rules_table("rules; DROP TABLE users")
            .section_table("")
            .section_table("1sections")
            .build();
        assert_eq!(config.rules_table(), "hc_rules");
        assert_eq!(config.section_table(), DEFAULT_SECTION_TABLE);
    }

    #[test]
    fn test_image_path() {
        let config = HighwayCodeConfig::builder().image_path("/images/").build();
        assert_eq!(config.image_path(), "/images/");

        let config = config.to_builder().image_path("").build();
        assert_eq!(config.image_path(), "/images/");
    }

    #[test]
    fn test_root_path_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = HighwayCodeConfig::builder().root_path(dir.path()).build();
        assert_eq!(config.root_path(), dir.path());

        let missing = dir.path().join("some-random-dir");
        let config = config.to_builder().root_path(&missing).build();
        assert_eq!(config.root_path(), dir.path());

        std::fs::create_dir(&missing).unwrap();
        let config = config.to_builder().root_path(&missing).build();
        assert_eq!(config.root_path(), missing.as_path());
    }

    #[test]
    fn test_root_path_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let config = HighwayCodeConfig::builder().root_path(&file).build();
        assert_eq!(config.root_path(), Path::new(""));
    }

    #[test]
    fn test_audio_settings() {
        let config = HighwayCodeConfig::builder()
            .audio_path("/audio/")
            .audio_enabled(false)
            .build();
        assert_eq!(config.audio_path(), "/audio/");
        assert!(!config.audio_enabled());

        let config = config.to_builder().audio_enabled(true).build();
        assert!(config.audio_enabled());
        assert_eq!(config.audio_path(), "/audio/");
    }

    #[test]
    fn test_parse_flag() {
        for value in ["true", "TRUE", "1", "yes", "On", " on "] {
            assert_eq!(parse_flag(value), Some(true), "{value:?}");
        }
        for value in ["false", "False", "0", "NO", "off", "OFF"] {
            assert_eq!(parse_flag(value), Some(false), "{value:?}");
        }
        for value in ["", "2", "disabled", "nope", "f"] {
            assert_eq!(parse_flag(value), None, "{value:?}");
        }
    }

    #[test]
    fn test_unrecognised_audio_flag_keeps_previous_value() {
        let config = HighwayCodeConfig::builder()
            .audio_enabled_flag("off")
            .audio_enabled_flag("disabled")
            .build();
        assert!(!config.audio_enabled());

        let config = config.to_builder().audio_enabled_flag("Yes").build();
        assert!(config.audio_enabled());
    }

    #[test]
    fn test_from_vars() {
        let vars = |pairs: &[(&str, &str)]| {
            let map: std::collections::HashMap<String, String> = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            HighwayCodeConfig::from_vars(|name| map.get(name).cloned())
        };

        assert_eq!(vars(&[]), HighwayCodeConfig::default());

        for flag in ["False", "no", "off", "FALSE", "0"] {
            assert!(!vars(&[("HC_AUDIO_ENABLED", flag)]).audio_enabled(), "{flag:?}");
        }
        for flag in ["garbage", "", "enabled"] {
            assert!(vars(&[("HC_AUDIO_ENABLED", flag)]).audio_enabled(), "{flag:?}");
        }

        let config = vars(&[
            ("HC_RULES_TABLE", "hc_rules"),
            ("HC_SECTION_TABLE", "bad table"),
            ("HC_IMAGE_PATH", "/img/"),
            ("HC_AUDIO_PATH", "/audio/"),
        ]);
        assert_eq!(config.rules_table(), "hc_rules");
        assert_eq!(config.section_table(), DEFAULT_SECTION_TABLE);
        assert_eq!(config.image_path(), "/img/");
        assert_eq!(config.audio_path(), "/audio/");
    }

    #[test]
    fn test_image_file_concatenates_paths() {
        let config = HighwayCodeConfig::builder()
            .root_path("/")
            .image_path("images/hc/")
            .build();
        assert_eq!(config.image_file("r1.png"), PathBuf::from("/images/hc/r1.png"));
    }
}
