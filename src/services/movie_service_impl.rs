//! [`MovieService`] backed by the in-memory [`Store`] and a [`BlobStore`].

use std::sync::Arc;
use tracing::info;

use crate::db::{MovieKey, Store};
use crate::domain::MovieId;
use crate::models::{MovieFields, MovieRecord};
use crate::services::blob::{BlobStore, StoredBlob, Upload, validate_upload};
use crate::services::movie_service::{MovieError, MovieService};
use crate::services::query::{self, Page, QueryOptions};
use crate::services::stats::{self, Dashboard, PublicStats};

pub struct StoreMovieService {
    store: Store,
    blobs: Arc<dyn BlobStore>,
    max_upload_bytes: usize,
}

impl StoreMovieService {
    #[must_use]
    pub fn new(store: Store, blobs: Arc<dyn BlobStore>, max_upload_bytes: usize) -> Self {
        Self {
            store,
            blobs,
            max_upload_bytes,
        }
    }

    /// Stores an attachment and returns its public URL.
    async fn store_poster(&self, upload: &Upload) -> Result<String, MovieError> {
        let stored = self.blobs.store(upload).await?;
        Ok(stored.url)
    }
}

#[async_trait::async_trait]
impl MovieService for StoreMovieService {
    async fn list(&self, options: &QueryOptions) -> Page<MovieRecord> {
        self.store
            .read(|dataset| query::query(&dataset.movies, options))
            .await
    }

    async fn view(&self, key: &MovieKey) -> Result<MovieRecord, MovieError> {
        let movie = self
            .store
            .view_published_movie(key)
            .await
            .ok_or(MovieError::NotFound)?;

        metrics::counter!("movie_views_total").increment(1);
        Ok(movie)
    }

    async fn featured(&self) -> Vec<MovieRecord> {
        self.store
            .read(|dataset| stats::featured(&dataset.movies))
            .await
    }

    async fn stats(&self) -> PublicStats {
        self.store
            .read(|dataset| stats::public_stats(&dataset.movies))
            .await
    }

    async fn dashboard(&self) -> Dashboard {
        self.store
            .read(|dataset| stats::dashboard(&dataset.movies))
            .await
    }

    async fn create(
        &self,
        mut fields: MovieFields,
        poster: Option<Upload>,
    ) -> Result<MovieRecord, MovieError> {
        if let Some(upload) = &poster {
            validate_upload(upload, self.max_upload_bytes)?;
            self.store.check_create(&fields).await?;
            fields.poster = Some(Some(self.store_poster(upload).await?));
        }

        let movie = self.store.create_movie(fields).await?;
        info!(movie_id = %movie.id, slug = %movie.slug, "Movie created");
        Ok(movie)
    }

    async fn update(
        &self,
        id: MovieId,
        mut fields: MovieFields,
        poster: Option<Upload>,
    ) -> Result<MovieRecord, MovieError> {
        if let Some(upload) = &poster {
            validate_upload(upload, self.max_upload_bytes)?;
            self.store.check_update(id, &fields).await?;
            fields.poster = Some(Some(self.store_poster(upload).await?));
        }

        let movie = self.store.update_movie(id, fields).await?;
        info!(movie_id = %movie.id, slug = %movie.slug, "Movie updated");
        Ok(movie)
    }

    async fn delete(&self, id: MovieId) -> Result<(), MovieError> {
        let movie = self.store.delete_movie(id).await?;
        info!(movie_id = %movie.id, slug = %movie.slug, "Movie deleted");
        Ok(())
    }

    async fn upload(&self, upload: Upload) -> Result<StoredBlob, MovieError> {
        validate_upload(&upload, self.max_upload_bytes)?;
        Ok(self.blobs.store(&upload).await?)
    }
}
