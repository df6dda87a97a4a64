//! Filesystem photo store.
//!
//! Owns the asset root directory and its fixed per-category
//! subdirectories (`plants/`, `locations/`, `events/`, `general/`).
//! Stored files get collision-free `<uuid-hex>.<ext>` names; callers only
//! ever see references relative to the root, in the canonical
//! `<subdir>/<filename>` form. Deletion is best-effort so that a leftover
//! file never blocks a user-visible action.

use std::path::{Path, PathBuf};

use plantarium_core::category::PhotoCategory;
use plantarium_core::photo_ref;
use plantarium_core::upload;
use uuid::Uuid;

/// Error type for asset store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The upload was refused before any side effect (bad extension,
    /// empty payload, unrecognisable image data).
    #[error("Rejected upload: {reason}")]
    Rejected { reason: String },

    /// A filesystem operation failed. Fatal for the calling operation:
    /// no reference to the file may be persisted.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Whether this error is a non-fatal upload rejection.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Photo store rooted at a single asset directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The asset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a stored reference.
    pub fn path_for(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }

    /// Whether a file exists for the given reference.
    pub fn exists(&self, reference: &str) -> bool {
        self.path_for(reference).is_file()
    }

    /// Store uploaded bytes under a fresh unique name in the category's
    /// subdirectory and return the canonical reference.
    ///
    /// Disallowed extensions and empty payloads are rejected with no side
    /// effect. Write failures propagate; the caller must not persist a
    /// reference unless this returns `Ok`.
    pub async fn store(
        &self,
        original_name: &str,
        bytes: &[u8],
        category: PhotoCategory,
    ) -> Result<String, StoreError> {
        let ext = upload::file_extension(original_name)
            .filter(|ext| upload::ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| StoreError::rejected(format!("unsupported type '{original_name}'")))?;

        if bytes.is_empty() {
            return Err(StoreError::rejected(format!("empty file '{original_name}'")));
        }

        let filename = format!("{}.{ext}", Uuid::new_v4().simple());
        self.write_new(&filename, bytes, category).await
    }

    /// Store a legacy binary blob, sniffing the image format from its
    /// header since no file name is available.
    pub async fn store_blob(
        &self,
        bytes: &[u8],
        category: PhotoCategory,
    ) -> Result<String, StoreError> {
        if bytes.is_empty() {
            return Err(StoreError::rejected("empty image data"));
        }
        let ext = sniff_image_extension(bytes)
            .ok_or_else(|| StoreError::rejected("unrecognisable image data"))?;

        let filename = format!("{}.{ext}", Uuid::new_v4().simple());
        self.write_new(&filename, bytes, category).await
    }

    async fn write_new(
        &self,
        filename: &str,
        bytes: &[u8],
        category: PhotoCategory,
    ) -> Result<String, StoreError> {
        let dir = self.root.join(category.subdir());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(filename), bytes).await?;
        Ok(photo_ref::canonical(category, filename))
    }

    /// Delete the file behind a reference.
    ///
    /// Idempotent and best-effort: a missing file is not an error, and
    /// other failures are logged and swallowed.
    pub async fn delete(&self, reference: &str) {
        let path = self.path_for(reference);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(reference, error = %err, "Failed to delete stored photo");
            }
        }
    }

    /// Move an existing legacy file into the category's canonical
    /// subdirectory, keeping its file name, and return the canonical
    /// reference.
    pub async fn adopt(
        &self,
        source: &Path,
        category: PhotoCategory,
    ) -> Result<String, StoreError> {
        let filename = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StoreError::rejected(format!("invalid source path {source:?}")))?
            .to_string();

        let dir = self.root.join(category.subdir());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::rename(source, dir.join(&filename)).await?;
        Ok(photo_ref::canonical(category, &filename))
    }
}

/// Detect a supported image format from the first bytes of a payload and
/// return the extension to store it under.
pub fn sniff_image_extension(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Png => Some("png"),
        image::ImageFormat::Jpeg => Some("jpg"),
        image::ImageFormat::Gif => Some("gif"),
        image::ImageFormat::WebP => Some("webp"),
        _ => None,
    }
}
