//! Where level bitmaps come from

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbImage;

use super::LevelError;
use super::config::LevelEntry;

/// Provides decoded RGB bitmaps for configured levels
pub trait LevelSource {
    fn load(&self, entry: &LevelEntry) -> Result<RgbImage, LevelError>;
}

/// Decodes bitmaps from disk with the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl LevelSource for FileSource {
    fn load(&self, entry: &LevelEntry) -> Result<RgbImage, LevelError> {
        let img = image::open(&entry.path).map_err(|source| LevelError::Decode {
            path: entry.path.clone(),
            source,
        })?;
        log::debug!(
            "Decoded {} ({}x{})",
            entry.path.display(),
            img.width(),
            img.height()
        );
        Ok(img.to_rgb8())
    }
}

/// Bitmaps held in memory, keyed by level path
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    images: HashMap<PathBuf, RgbImage>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, image: RgbImage) {
        self.images.insert(path.as_ref().to_path_buf(), image);
    }

    pub fn with(mut self, path: impl AsRef<Path>, image: RgbImage) -> Self {
        self.insert(path, image);
        self
    }
}

impl LevelSource for MemorySource {
    fn load(&self, entry: &LevelEntry) -> Result<RgbImage, LevelError> {
        self.images
            .get(&entry.path)
            .cloned()
            .ok_or_else(|| LevelError::NotFound {
                path: entry.path.clone(),
            })
    }
}
