//! Storage for images uploaded with entity forms.

use crate::content_store::EntityKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// URL prefix the media directory is served under.
pub const MEDIA_URL_PREFIX: &str = "/media";

const UPLOADS_DIR: &str = "uploads";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File '{0}' is not a supported image")]
    NotAnImage(String),

    #[error("File '{0}' is too large: {1} bytes (max: {2})")]
    FileTooLarge(String, usize, usize),
}

/// Writes uploads to `{media}/uploads/{kind}/{uuid}.{ext}`.
#[derive(Clone, Debug)]
pub struct UploadStore {
    media_root: PathBuf,
    max_file_size: usize,
}

impl UploadStore {
    pub fn new(media_root: impl Into<PathBuf>, max_file_size: usize) -> Self {
        Self {
            media_root: media_root.into(),
            max_file_size,
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// Checks size and content, returning the extension to store under.
    /// The client-supplied name is only used in error messages.
    pub fn check(&self, file_name: &str, data: &[u8]) -> Result<&'static str, UploadError> {
        if data.len() > self.max_file_size {
            return Err(UploadError::FileTooLarge(
                file_name.to_string(),
                data.len(),
                self.max_file_size,
            ));
        }
        match infer::get(data) {
            Some(kind) if kind.mime_type().starts_with("image/") => Ok(kind.extension()),
            _ => Err(UploadError::NotAnImage(file_name.to_string())),
        }
    }

    /// Saves one upload and returns the public path to put in the record.
    pub async fn save(
        &self,
        kind: EntityKind,
        file_name: &str,
        data: &[u8],
    ) -> Result<String, UploadError> {
        let extension = self.check(file_name, data)?;

        let dir = self.media_root.join(UPLOADS_DIR).join(kind.collection());
        fs::create_dir_all(&dir).await?;

        let stored_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
        let mut file = fs::File::create(dir.join(&stored_name)).await?;
        file.write_all(data).await?;
        file.flush().await?;

        let public_path = format!(
            "{}/{}/{}/{}",
            MEDIA_URL_PREFIX,
            UPLOADS_DIR,
            kind.collection(),
            stored_name
        );
        debug!("Stored upload '{}' as {}", file_name, public_path);
        Ok(public_path)
    }

    /// Maps a path returned by `save` back to its file on disk.
    fn disk_path(&self, public_path: &str) -> Option<PathBuf> {
        let relative = public_path
            .strip_prefix(MEDIA_URL_PREFIX)?
            .strip_prefix('/')?;
        let mut parts = relative.split('/');
        if parts.next() != Some(UPLOADS_DIR) || parts.any(|p| p.is_empty() || p == "..") {
            return None;
        }
        Some(self.media_root.join(relative))
    }

    /// Removes uploads stored for a submission that was then rejected.
    pub async fn discard(&self, public_paths: &[String]) {
        for public_path in public_paths {
            let Some(path) = self.disk_path(public_path) else {
                warn!("Not discarding {}: outside the uploads directory", public_path);
                continue;
            };
            match fs::remove_file(&path).await {
                Ok(()) => debug!("Discarded upload {}", public_path),
                Err(err) => warn!("Failed to discard upload {}: {}", public_path, err),
            }
        }
    }
}
