//! Category data model for sorting buckets.

use std::path::{Path, PathBuf};

use pixort_raster::{Color, Histogram, PixelRange};

use crate::config::CategoryConfig;
use crate::input::Key;

/// A sorting bucket: a destination directory, a display color, a screen
/// zone assigned when sorting starts, and a running histogram accumulated
/// over every image accepted into it. Categories live for the whole
/// session; the histogram only ever grows.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub color: Color,
    pub hotkey: Option<Key>,
    pub dest_dir: PathBuf,
    /// Assigned once when sorting starts; empty until then.
    pub zone: PixelRange,
    pub hist: Histogram,
    /// False when the destination directory could not be created; the
    /// category then accumulates statistics but never moves files.
    pub accepts_moves: bool,
}

impl Category {
    /// Build a category from its config entry. The destination defaults to
    /// a directory named after the category inside the source directory.
    pub fn from_config(config: &CategoryConfig, source_dir: &Path) -> Self {
        let dest_dir = config
            .dest_dir
            .clone()
            .unwrap_or_else(|| source_dir.join(&config.name));

        let hotkey = config.hotkey.and_then(|c| {
            let key = match c.to_ascii_lowercase() {
                'r' => Some(Key::R),
                'g' => Some(Key::G),
                'b' => Some(Key::B),
                _ => None,
            };
            if key.is_none() {
                log::warn!("category {}: unsupported hotkey '{}'", config.name, c);
            }
            key
        });

        Self {
            name: config.name.clone(),
            color: Color::rgb(config.color[0], config.color[1], config.color[2]),
            hotkey,
            dest_dir,
            zone: PixelRange::default(),
            hist: Histogram::new(),
            accepts_moves: false,
        }
    }
}
