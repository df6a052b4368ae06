//! Photo persistence for the user screen.
//!
//! Saving never fails loudly: a photo that cannot be written simply
//! yields no reference, and the caller carries on without it.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::model::ImageData;

/// Stores image bytes and hands back an opaque reference to them.
pub trait ImageStore: Send + Sync {
    /// Persist `image`. Returns `None` if it could not be stored.
    fn save(&self, image: &ImageData) -> Option<String>;
}

/// Writes images as PNG files into a directory.
pub struct FileImageStore {
    dir: PathBuf,
}

impl FileImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_png(&self, image: &ImageData) -> Result<PathBuf, image::ImageError> {
        let decoded = image::load_from_memory(image.as_bytes())?;
        fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("user_image_{}.png", uuid::Uuid::new_v4()));
        decoded.save_with_format(&path, ImageFormat::Png)?;
        Ok(path)
    }
}

impl ImageStore for FileImageStore {
    fn save(&self, image: &ImageData) -> Option<String> {
        match self.write_png(image) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Saved image");
                Some(format!("file://{}", path.display()))
            }
            Err(err) => {
                tracing::warn!(
                    dir = %self.dir.display(),
                    bytes = image.as_bytes().len(),
                    error = %err,
                    "Failed to save image"
                );
                None
            }
        }
    }
}
