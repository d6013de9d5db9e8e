//! File-system collaborators: candidate scanning, file moves, image decode.
//!
//! Failure policy throughout is degraded-but-non-fatal: a directory that
//! cannot be scanned yields an empty list, a file that cannot be moved
//! stays where it is, and callers log and continue.

use std::path::{Path, PathBuf};

use pixort_raster::RasterImage;
use walkdir::WalkDir;

/// List regular files directly under `dir` with the given extension
/// (dot-normalized, case-insensitive), up to `max` entries, sorted by name
/// for a stable order.
pub fn list_files_of_type(dir: &Path, extension: &str, max: usize) -> Vec<PathBuf> {
    let wanted = extension.trim_start_matches('.').to_ascii_lowercase();

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                log::warn!("scan error under {}: {}", dir.display(), err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&wanted))
        })
        .collect();

    files.sort();
    files.truncate(max);
    files
}

/// Move a regular file into a destination directory. No-op (returning
/// `false`) when the source is not a regular file or the destination is
/// not a directory; the file is left untouched on failure.
pub fn move_file(file: &Path, dest_dir: &Path) -> bool {
    if !file.is_file() || !dest_dir.is_dir() {
        return false;
    }

    let Some(name) = file.file_name() else {
        return false;
    };
    let dest = dest_dir.join(name);

    match std::fs::rename(file, &dest) {
        Ok(()) => {
            log::debug!("moved {} -> {}", file.display(), dest.display());
            true
        }
        Err(err) => {
            log::warn!("could not move {}: {}", file.display(), err);
            false
        }
    }
}

/// Create a directory (and parents) if absent. Returns whether the
/// directory is usable afterwards.
pub fn ensure_dir(dir: &Path) -> bool {
    match std::fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("could not create {}: {}", dir.display(), err);
            false
        }
    }
}

/// Decode an image file into blit-ready RGBA pixels.
pub fn load_image(path: &Path) -> Result<RasterImage, image::ImageError> {
    let decoded = image::open(path)?;
    Ok(RasterImage::from_rgba(decoded.to_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_list_filters_by_extension_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "b.png");
        write_png(dir.path(), "a.png");
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let files = list_files_of_type(dir.path(), "png", 10);
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.png"));
        assert!(files[1].ends_with("b.png"));

        // Dot-prefixed spelling works too.
        assert_eq!(list_files_of_type(dir.path(), ".png", 10).len(), 2);
    }

    #[test]
    fn test_list_respects_max() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            write_png(dir.path(), name);
        }
        assert_eq!(list_files_of_type(dir.path(), "png", 2).len(), 2);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(list_files_of_type(&missing, "png", 10).is_empty());
    }

    #[test]
    fn test_list_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "top.png");
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        write_png(&sub, "nested.png");

        assert_eq!(list_files_of_type(dir.path(), "png", 10).len(), 1);
    }

    #[test]
    fn test_move_file_happy_path() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_png(dir.path(), "img.png");
        let dest = dir.path().join("sorted");
        std::fs::create_dir(&dest).unwrap();

        assert!(move_file(&src, &dest));
        assert!(!src.exists());
        assert!(dest.join("img.png").exists());
    }

    #[test]
    fn test_move_file_noop_without_destination_dir() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_png(dir.path(), "img.png");
        let missing = dir.path().join("nowhere");

        assert!(!move_file(&src, &missing));
        assert!(src.exists());
    }

    #[test]
    fn test_move_file_noop_for_non_regular_source() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("sorted");
        std::fs::create_dir(&dest).unwrap();

        assert!(!move_file(&dir.path().join("ghost.png"), &dest));
    }

    #[test]
    fn test_load_image_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "img.png");
        let img = load_image(&path).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.rgba_at(0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_load_image_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_image(&path).is_err());
    }
}
