//! Image storage collaborator.
//!
//! Product image bytes are handed to an [`ImageStore`] and only the returned
//! reference string is persisted on the product. The shipped implementation
//! writes to the local filesystem; failures propagate to the caller and are
//! never retried here.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by image storage.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Underlying I/O failure while writing the image.
    #[error("image I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores product image bytes and returns a reference to the stored file.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under a freshly generated name, keeping the extension
    /// of `file_name`. Returns the reference to persist on the product.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] if the image cannot be written.
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, ImageError>;
}

/// Filesystem-backed image store.
///
/// Files land under the configured directory with a random UUID name, so two
/// uploads with the same original file name never collide.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: PathBuf,
}

impl FsImageStore {
    /// Create a store writing under `dir`. The directory is created on first
    /// write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn generated_name(original: &str) -> String {
        let id = Uuid::new_v4();
        match original.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => format!("{id}.{extension}"),
            _ => id.to_string(),
        }
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, ImageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stored_name = Self::generated_name(file_name);
        let path = self.dir.join(&stored_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::info!(file = %stored_name, "stored product image");
        Ok(stored_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("tamarind-image-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_generated_name_keeps_extension() {
        let name = FsImageStore::generated_name("phone.png");
        assert!(name.ends_with(".png"));
        assert_ne!(name, "phone.png");
    }

    #[test]
    fn test_generated_name_without_extension() {
        let name = FsImageStore::generated_name("phone");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_generated_names_are_unique() {
        let a = FsImageStore::generated_name("phone.png");
        let b = FsImageStore::generated_name("phone.png");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_store_writes_bytes() {
        let dir = temp_dir();
        let store = FsImageStore::new(&dir);

        let reference = store.store("phone.jpg", b"not really a jpeg").await.unwrap();
        assert!(reference.ends_with(".jpg"));

        let written = tokio::fs::read(dir.join(&reference)).await.unwrap();
        assert_eq!(written, b"not really a jpeg");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
