//! Card preview thumbnails
//!
//! Recognized image files are decoded and shrunk to a fixed thumbnail box
//! with the `image` crate, then handed to iced as raw RGBA handles. Decoded
//! handles are kept in a cache owned by the application so they stay alive
//! for as long as any card shows them.

use iced::widget::image::Handle;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Bounding box for card preview thumbnails (width, height)
pub const PREVIEW_THUMB_SIZE: (u32, u32) = (100, 75);

/// Extensions that get a decoded preview instead of the generic placeholder
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Whether a path should be previewed as an image (case-insensitive).
pub fn has_image_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .map(|e| {
            let ext = e.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Decode a file and shrink it to fit the preview box.
fn decode_thumbnail(path: &str) -> Result<Handle, String> {
    let img = image::open(path).map_err(|e| e.to_string())?;
    let thumb = img.thumbnail(PREVIEW_THUMB_SIZE.0, PREVIEW_THUMB_SIZE.1);
    let rgba = thumb.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Handle::from_rgba(width, height, rgba.into_raw()))
}

/// Keeps decoded preview handles referenced for the lifetime of their cards.
///
/// Keyed by the record's `file_path`, so a rename (which changes the path)
/// naturally triggers a fresh decode. Failed decodes are cached too, so a
/// broken image is not re-read on every re-render.
#[derive(Debug, Default)]
pub struct PreviewCache {
    handles: HashMap<String, Result<Handle, String>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        PreviewCache::default()
    }

    /// Handle for `path`, decoding it on first use.
    /// The error string is shown inline in the card's preview slot.
    pub fn get(&mut self, path: &str) -> Result<Handle, String> {
        self.handles
            .entry(path.to_string())
            .or_insert_with(|| decode_thumbnail(path))
            .clone()
    }

    /// Read-only lookup for view code (`view` cannot decode; the cache is
    /// refilled in `update` after every mutation).
    pub fn peek(&self, path: &str) -> Option<&Result<Handle, String>> {
        self.handles.get(path)
    }

    /// Drop cached handles whose record no longer exists in the store.
    pub fn prune(&mut self, live_paths: &HashSet<String>) {
        self.handles.retain(|path, _| live_paths.contains(path));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_image_extension_matching_is_case_insensitive() {
        assert!(has_image_extension("/a/cover.png"));
        assert!(has_image_extension("/a/cover.JPG"));
        assert!(has_image_extension("/a/cover.Jpeg"));
        assert!(has_image_extension("/a/anim.gif"));
        assert!(has_image_extension("/a/old.BMP"));
        assert!(!has_image_extension("/a/design.pdf"));
        assert!(!has_image_extension("/a/noext"));
    }

    #[test]
    fn test_decode_and_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbaImage::new(4, 4).save(&path).unwrap();
        let key = path.to_string_lossy().into_owned();

        let mut cache = PreviewCache::new();
        assert!(cache.get(&key).is_ok());
        assert_eq!(cache.len(), 1);
        // Second lookup hits the cache
        assert!(cache.get(&key).is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_decode_failure_is_reported_and_cached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        let key = path.to_string_lossy().into_owned();

        let mut cache = PreviewCache::new();
        assert!(cache.get(&key).is_err());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_prune_drops_dead_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbaImage::new(2, 2).save(&path).unwrap();
        let key = path.to_string_lossy().into_owned();

        let mut cache = PreviewCache::new();
        cache.get(&key).unwrap();
        cache.prune(&HashSet::new());
        assert_eq!(cache.len(), 0);
    }
}
