//! Configuration file support for pixort.
//!
//! Settings load from a JSON file next to the executable (or a path given
//! on the command line). A missing file falls back to defaults; a malformed
//! one is an error so typos do not silently drop categories.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pixort_raster::Quantizer;

use crate::constants::DEFAULT_MAX_FILES;

/// Current configuration file format version.
pub const CONFIG_VERSION: u32 = 1;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Which pixel property feeds the histogram buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistogramChannel {
    #[default]
    Luminance,
    Red,
    Green,
    Blue,
}

impl HistogramChannel {
    pub fn to_quantizer(self) -> Quantizer {
        match self {
            HistogramChannel::Luminance => Quantizer::Luminance,
            HistogramChannel::Red => Quantizer::Red,
            HistogramChannel::Green => Quantizer::Green,
            HistogramChannel::Blue => Quantizer::Blue,
        }
    }
}

/// One sorting category as configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Display name; also the default destination directory name.
    pub name: String,

    /// Display/background color for the category's zone.
    pub color: [u8; 3],

    /// Keyboard shortcut accepting the current image into this category.
    #[serde(default)]
    pub hotkey: Option<char>,

    /// Destination directory; defaults to `<source_dir>/<name>`.
    #[serde(default)]
    pub dest_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format.
    pub version: u32,

    /// Directory scanned for candidate images.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// File extension of candidate images (with or without the leading dot).
    #[serde(default = "default_extension")]
    pub file_extension: String,

    /// Upper bound on the candidate list snapshotted at session start.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Move sorted files back to the source directory on shutdown
    /// (repeatable-testing behaviour).
    #[serde(default)]
    pub restore_on_exit: bool,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Histogram quantization policy.
    #[serde(default)]
    pub histogram_channel: HistogramChannel,

    /// Sorting categories, top to bottom in the category panel.
    pub categories: Vec<CategoryConfig>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_extension() -> String {
    "png".to_string()
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            source_dir: default_source_dir(),
            file_extension: default_extension(),
            max_files: DEFAULT_MAX_FILES,
            restore_on_exit: false,
            log_level: LogLevel::default(),
            histogram_channel: HistogramChannel::default(),
            categories: vec![
                CategoryConfig {
                    name: "red".to_string(),
                    color: [200, 40, 40],
                    hotkey: Some('r'),
                    dest_dir: None,
                },
                CategoryConfig {
                    name: "green".to_string(),
                    color: [40, 160, 60],
                    hotkey: Some('g'),
                    dest_dir: None,
                },
                CategoryConfig {
                    name: "blue".to_string(),
                    color: [50, 80, 200],
                    hotkey: Some('b'),
                    dest_dir: None,
                },
            ],
        }
    }
}

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config version {found} (expected {CONFIG_VERSION})")]
    Version { found: u32 },

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&text)?;

        if config.version != CONFIG_VERSION {
            return Err(ConfigError::Version {
                found: config.version,
            });
        }
        if config.categories.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one category is required".to_string(),
            ));
        }

        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    /// A present-but-broken file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::load(path)?;
            log::info!("loaded config from {}", path.display());
            Ok(config)
        } else {
            log::info!(
                "no config at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }
}
