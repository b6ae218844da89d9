//! Movie use-cases: public reads, admin writes and poster uploads.

use thiserror::Error;

use crate::db::{MovieKey, RecordError};
use crate::domain::MovieId;
use crate::models::{FieldError, MovieFields, MovieRecord};
use crate::services::blob::{BlobError, StoredBlob, Upload};
use crate::services::query::{Page, QueryOptions};
use crate::services::stats::{Dashboard, PublicStats};

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found")]
    NotFound,

    #[error("Movie with this title already exists")]
    DuplicateSlug(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upload(#[from] BlobError),
}

impl From<RecordError> for MovieError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::NotFound(_) => Self::NotFound,
            RecordError::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
            RecordError::TitleRequired => Self::Validation(err.to_string()),
        }
    }
}

impl From<FieldError> for MovieError {
    fn from(err: FieldError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Domain service trait for movie operations.
///
/// Handlers go through this trait rather than the store so that an
/// attachment is only written once the record change is known to succeed.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Runs the listing pipeline with the visibility carried by `options`.
    async fn list(&self, options: &QueryOptions) -> Page<MovieRecord>;

    /// Finds a published movie by id or slug and counts the view.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] for unknown keys and for drafts.
    async fn view(&self, key: &MovieKey) -> Result<MovieRecord, MovieError>;

    async fn featured(&self) -> Vec<MovieRecord>;

    async fn stats(&self) -> PublicStats;

    async fn dashboard(&self) -> Dashboard;

    /// Creates a movie, storing `poster` first when one is attached.
    ///
    /// # Errors
    ///
    /// - [`MovieError::Validation`] when the title is missing
    /// - [`MovieError::DuplicateSlug`] when the title's slug is taken
    /// - [`MovieError::Upload`] when the attachment is rejected
    async fn create(
        &self,
        fields: MovieFields,
        poster: Option<Upload>,
    ) -> Result<MovieRecord, MovieError>;

    /// Merges `fields` into an existing movie.
    async fn update(
        &self,
        id: MovieId,
        fields: MovieFields,
        poster: Option<Upload>,
    ) -> Result<MovieRecord, MovieError>;

    async fn delete(&self, id: MovieId) -> Result<(), MovieError>;

    /// Stores a standalone image and returns where it is served from.
    async fn upload(&self, upload: Upload) -> Result<StoredBlob, MovieError>;
}
