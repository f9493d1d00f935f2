//! Configuration loading and discovery.
//!
//! Sources are merged with [figment], lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `<user config dir>/config.<ext>` (see [`user_config_dir`])
//! 3. Project config: `.wordtally.<ext>` then `wordtally.<ext>` in the
//!    nearest directory at or above the working directory that has one.
//!    The walk stops at a directory containing `.git`.
//! 4. Files passed to [`ConfigLoader::with_file`] (the CLI's `--config`)
//! 5. `WORDTALLY_*` environment variables
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`. Several files in one
//! directory are all merged, later extensions on top.
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use wordtally_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)?;
//! let (config, _sources) = ConfigLoader::new().with_project_search(&cwd).load()?;
//! println!("stop words: {}", config.stop_words_path());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::cloud::{CloudOptions, FontScale};
use crate::counter::DEFAULT_MAX_WORD_CHARS;
use crate::error::{ConfigError, ConfigResult};
use crate::stop_words::DEFAULT_STOP_WORDS_FILE;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// The configuration for wordtally.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON), then overridden by `WORDTALLY_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    #[serde(deserialize_with = "lenient::path")]
    pub log_dir: Option<Utf8PathBuf>,
    /// Stop-word list to load (default: `StopWords.txt` in the working directory).
    #[serde(deserialize_with = "lenient::path")]
    pub stop_words: Option<Utf8PathBuf>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Omit to use the default. Use `disable_input_limit` to remove the
    /// limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    #[serde(default)]
    pub disable_input_limit: bool,
    /// Longest token, in characters, that is counted (default: 256).
    pub max_word_chars: Option<usize>,
    /// Title of generated word clouds.
    #[serde(deserialize_with = "lenient::string")]
    pub cloud_title: Option<String>,
    /// Font size in pixels of the least frequent word in a cloud.
    pub min_font_px: Option<u32>,
    /// Font size in pixels of the most frequent word in a cloud.
    pub max_font_px: Option<u32>,
    /// How counts map onto the cloud's font range (linear or log).
    pub font_scale: Option<FontScale>,
}

impl Config {
    /// The stop-word list path, falling back to [`DEFAULT_STOP_WORDS_FILE`].
    pub fn stop_words_path(&self) -> Utf8PathBuf {
        self.stop_words
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STOP_WORDS_FILE))
    }

    /// The effective input size limit, or `None` when disabled.
    pub fn max_input(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// The token length limit, falling back to [`DEFAULT_MAX_WORD_CHARS`].
    pub fn max_word_chars(&self) -> usize {
        self.max_word_chars.unwrap_or(DEFAULT_MAX_WORD_CHARS)
    }

    /// Word-cloud settings, with defaults for anything unset.
    pub fn cloud_options(&self) -> CloudOptions {
        let defaults = CloudOptions::default();
        CloudOptions {
            title: self.cloud_title.clone().unwrap_or(defaults.title),
            min_font_px: self.min_font_px.unwrap_or(defaults.min_font_px),
            max_font_px: self.max_font_px.unwrap_or(defaults.max_font_px),
            scale: self.font_scale.unwrap_or(defaults.scale),
        }
    }
}

/// Deserializers for free-text fields.
///
/// Environment values are type-guessed, so `WORDTALLY_CLOUD_TITLE=2024`
/// arrives as a number. These accept any scalar and keep its text.
mod lenient {
    use std::fmt;

    use camino::Utf8PathBuf;
    use serde::Deserializer;
    use serde::de::{self, Visitor};

    struct ScalarText;

    impl<'de> Visitor<'de> for ScalarText {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        d.deserialize_any(ScalarText)
    }

    pub fn path<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Utf8PathBuf>, D::Error> {
        Ok(string(d)?.map(Utf8PathBuf::from))
    }
}

/// Default log level when neither `-q`/`-v` nor `RUST_LOG` is given.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The files that fed a [`Config`], as returned by [`ConfigLoader::load`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// `<user config dir>/config.<ext>`, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files from the nearest config directory, lowest precedence first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// Files given explicitly, in load order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Every loaded file, lowest precedence first.
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.user_file
            .iter()
            .chain(&self.project_files)
            .chain(&self.explicit_files)
            .map(Utf8PathBuf::as_path)
    }

    /// The highest-precedence file that was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.files().last()
    }
}

/// Recognized config file extensions, lowest precedence first.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for the user config directory and config file stems.
const APP_NAME: &str = "wordtally";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "WORDTALLY_";

/// Directory entry that ends the upward config search.
const BOUNDARY_MARKER: &str = ".git";

/// Builder for loading configuration from multiple sources.
#[derive(Debug)]
pub struct ConfigLoader {
    search_from: Option<Utf8PathBuf>,
    user_config: bool,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user config and, once given a directory,
    /// project config found above it.
    pub const fn new() -> Self {
        Self {
            search_from: None,
            user_config: true,
            explicit_files: Vec::new(),
        }
    }

    /// Search for project config starting at `dir` and walking up.
    ///
    /// The walk stops after the first directory containing `.git`.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_from = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip `<user config dir>/config.<ext>`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Load `path` after every discovered file. Later calls win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source into a [`Config`].
    ///
    /// Lowest to highest precedence: defaults, user config, project config,
    /// explicit files, then `WORDTALLY_*` environment variables.
    #[tracing::instrument(skip(self), fields(search_from = ?self.search_from))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        if let Some(missing) = self.explicit_files.iter().find(|path| !path.is_file()) {
            return Err(ConfigError::MissingFile {
                path: missing.clone(),
            });
        }

        let sources = ConfigSources {
            user_file: self.user_config.then(find_user_config).flatten(),
            project_files: self
                .search_from
                .as_deref()
                .map(discover_project_files)
                .unwrap_or_default(),
            explicit_files: self.explicit_files,
        };

        let figment = sources
            .files()
            .fold(
                Figment::from(Serialized::defaults(Config::default())),
                merge_file,
            )
            // WORDTALLY_STOP_WORDS=stop.txt, WORDTALLY_MIN_FONT_PX=10, ...
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            config_file = ?sources.primary_file(),
            stop_words = %config.stop_words_path(),
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

/// Config files in the nearest directory at or above `start` that has any.
///
/// Dotfiles come before regular names, and each group is ordered by
/// [`CONFIG_EXTENSIONS`], so the last entry has the highest precedence.
fn discover_project_files(start: &Utf8Path) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
            .iter()
            .flat_map(|stem| {
                CONFIG_EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{stem}.{ext}")))
            })
            .filter(|candidate| candidate.is_file())
            .collect();
        if !found.is_empty() {
            tracing::debug!(dir = %dir, files = found.len(), "found project config");
            return found;
        }
        if dir.join(BOUNDARY_MARKER).exists() {
            break;
        }
    }
    Vec::new()
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Merge one file, picking the format from its extension.
fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// The per-user config directory, e.g. `~/.config/wordtally` on Linux.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}
