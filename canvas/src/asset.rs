//! Bitmap loading for image shapes.
//!
//! An image shape only stores its source path. The renderer asks an
//! [`ImageCache`] for the decoded pixels each frame; the cache loads through
//! an [`ImageLoader`] once per source and remembers failures too, so a broken
//! path is reported a single time and then simply draws nothing.

#[cfg(test)]
#[path = "asset_test.rs"]
mod asset_test;

use std::collections::HashMap;
use std::rc::Rc;

/// Decoded, straight-alpha RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Bitmap {
    /// Wrap raw RGBA8 data, checking its length against the dimensions.
    ///
    /// # Errors
    ///
    /// `AssetError::Size` when `rgba.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(AssetError::Size { expected, actual: rgba.len() });
        }
        Ok(Self { width, height, rgba })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read image {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("bitmap data is {actual} bytes, expected {expected}")]
    Size { expected: usize, actual: usize },
}

/// Image loading service.
pub trait ImageLoader {
    /// Load and decode the bitmap named by `source`.
    ///
    /// # Errors
    ///
    /// Any read or decode failure.
    fn load(&self, source: &str) -> Result<Bitmap, AssetError>;
}

/// Reads image files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, source: &str) -> Result<Bitmap, AssetError> {
        let bytes = std::fs::read(source).map_err(|e| AssetError::Io { path: source.to_owned(), source: e })?;
        decode(source, &bytes)
    }
}

/// Decode an encoded image (PNG, JPEG) into RGBA8.
///
/// # Errors
///
/// `AssetError::Decode` when the bytes are not a supported image.
pub fn decode(source: &str, bytes: &[u8]) -> Result<Bitmap, AssetError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| AssetError::Decode { path: source.to_owned(), source: e })?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Ok(Bitmap { width, height, rgba: image.into_raw() })
}

/// Per-source memo of load results.
pub struct ImageCache {
    loader: Box<dyn ImageLoader>,
    entries: HashMap<String, Option<Rc<Bitmap>>>,
}

impl ImageCache {
    #[must_use]
    pub fn new(loader: Box<dyn ImageLoader>) -> Self {
        Self { loader, entries: HashMap::new() }
    }

    /// Bitmap for `source`, loading it on first request. `None` when it
    /// cannot be loaded.
    pub fn get(&mut self, source: &str) -> Option<Rc<Bitmap>> {
        if let Some(entry) = self.entries.get(source) {
            return entry.clone();
        }

        let loaded = match self.loader.load(source) {
            Ok(bitmap) => {
                tracing::debug!(source, width = bitmap.width, height = bitmap.height, "image loaded");
                Some(Rc::new(bitmap))
            }
            Err(e) => {
                tracing::warn!(source, error = %e, "image unavailable; shape renders empty");
                None
            }
        };
        self.entries.insert(source.to_owned(), loaded.clone());
        loaded
    }

    /// Provide pixels for `source` directly, replacing any earlier result.
    pub fn insert(&mut self, source: &str, bitmap: Bitmap) {
        self.entries.insert(source.to_owned(), Some(Rc::new(bitmap)));
    }

    /// Decode `bytes` and store them under `source`.
    ///
    /// # Errors
    ///
    /// Decode failure; the cache is left unchanged.
    pub fn insert_encoded(&mut self, source: &str, bytes: &[u8]) -> Result<(), AssetError> {
        let bitmap = decode(source, bytes)?;
        self.insert(source, bitmap);
        Ok(())
    }

    /// Drop the memoized result for `source` so the next `get` retries.
    pub fn forget(&mut self, source: &str) {
        self.entries.remove(source);
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(Box::new(FsImageLoader))
    }
}
