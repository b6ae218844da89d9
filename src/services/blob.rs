//! Storage for uploaded poster images.
//!
//! Handlers validate an [`Upload`] with [`validate_upload`] and hand it to a
//! [`BlobStore`], which returns the public URL of the stored file.

use async_trait::async_trait;
use axum::body::Bytes;
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::constants::{IMAGE_MIME_PREFIX, uploads};

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("File too large")]
    TooLarge { size: usize, limit: usize },

    #[error("Only image files are allowed")]
    UnsupportedMedia(String),

    #[error("No file uploaded")]
    Missing,

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// An attachment as received from a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Form field the file arrived in.
    pub field: String,
    pub original_name: String,
    /// Content type declared by the client, if any.
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Upload {
    /// The declared content type, or one guessed from the file name.
    #[must_use]
    pub fn effective_content_type(&self) -> String {
        self.content_type.clone().unwrap_or_else(|| {
            mime_guess::from_path(&self.original_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBlob {
    pub filename: String,
    pub original_name: String,
    pub url: String,
    pub size: usize,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn store(&self, upload: &Upload) -> Result<StoredBlob, BlobError>;
}

/// Rejects attachments over `max_bytes` and anything that is not `image/*`.
pub fn validate_upload(upload: &Upload, max_bytes: usize) -> Result<(), BlobError> {
    if upload.bytes.len() > max_bytes {
        return Err(BlobError::TooLarge {
            size: upload.bytes.len(),
            limit: max_bytes,
        });
    }

    let content_type = upload.effective_content_type();
    if !content_type.to_ascii_lowercase().starts_with(IMAGE_MIME_PREFIX) {
        return Err(BlobError::UnsupportedMedia(content_type));
    }

    Ok(())
}

/// Writes uploads into a directory that is served under `/uploads`.
pub struct LocalBlobStore {
    dir: PathBuf,
}

impl LocalBlobStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, upload: &Upload) -> Result<StoredBlob, BlobError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let filename = unique_filename(upload);
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, &upload.bytes).await?;

        info!(
            path = %path.display(),
            size = upload.bytes.len(),
            original_name = %upload.original_name,
            "Stored upload"
        );

        Ok(StoredBlob {
            url: format!("{}/{}", uploads::URL_PREFIX, filename),
            filename,
            original_name: upload.original_name.clone(),
            size: upload.bytes.len(),
        })
    }
}

/// `<field>-<millis>-<random><.ext>`. The extension comes from the original
/// name when it is plain alphanumeric, otherwise from the content type.
fn unique_filename(upload: &Upload) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    let field = sanitize(&upload.field);
    let field = if field.is_empty() { "file".to_string() } else { field };

    format!("{field}-{millis}-{suffix}{}", extension(upload))
}

fn extension(upload: &Upload) -> String {
    let from_name = Path::new(&upload.original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));

    let ext = from_name.map(str::to_ascii_lowercase).or_else(|| {
        mime_guess::get_mime_extensions_str(&upload.effective_content_type())
            .and_then(|exts| exts.first())
            .map(|e| (*e).to_string())
    });

    ext.map(|e| format!(".{e}")).unwrap_or_default()
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
