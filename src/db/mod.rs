use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

pub mod repositories;
pub mod seed;
pub mod snapshot;

pub use repositories::movie::{MovieKey, RecordError};
pub use seed::AdminSeed;
pub use snapshot::{
    Dataset, JsonFilePersistence, MemoryPersistence, SnapshotError, SnapshotPersistence,
    SnapshotWriter, StoredDataset,
};

use crate::auth::password::{PasswordError, verify_dummy_blocking};
use crate::domain::MovieId;
use crate::models::{MovieFields, MovieRecord, Settings, UserRecord};

/// The owned dataset.
///
/// Reads share the lock; every mutation takes the single write lock, applies
/// one record rule and queues a snapshot before releasing it, so snapshots are
/// written in mutation order.
#[derive(Clone)]
pub struct Store {
    dataset: Arc<RwLock<Dataset>>,
    writer: SnapshotWriter,
}

impl Store {
    /// Loads the dataset, filling absent collections with the built-in seed.
    ///
    /// When anything had to be seeded the completed dataset is saved right
    /// away, so the admin password hash is generated only once.
    pub async fn open(persistence: Arc<dyn SnapshotPersistence>, admin: &AdminSeed) -> Result<Self> {
        let stored = persistence
            .load()
            .await
            .context("Failed to load data snapshot")?;

        let (dataset, seeded) = match stored {
            Some(stored) => complete(stored, admin).await?,
            None => {
                info!("No existing data found, using default data");
                complete(StoredDataset::default(), admin).await?
            }
        };

        info!(
            movies = dataset.movies.len(),
            users = dataset.users.len(),
            "Dataset loaded"
        );

        let store = Self::with_dataset(dataset, persistence);
        if seeded {
            store.persist(&*store.dataset.read().await);
        }
        Ok(store)
    }

    /// Wraps an already complete dataset without loading anything.
    #[must_use]
    pub fn with_dataset(dataset: Dataset, persistence: Arc<dyn SnapshotPersistence>) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
            writer: SnapshotWriter::spawn(persistence),
        }
    }

    fn persist(&self, dataset: &Dataset) {
        self.writer.enqueue(dataset.clone());
    }

    /// Runs `f` against a consistent view of the dataset.
    pub async fn read<R>(&self, f: impl FnOnce(&Dataset) -> R) -> R {
        f(&*self.dataset.read().await)
    }

    pub async fn movies(&self) -> Vec<MovieRecord> {
        self.dataset.read().await.movies.clone()
    }

    pub async fn get_movie(&self, id: MovieId) -> Option<MovieRecord> {
        self.read(|d| repositories::movie::find_by_id(&d.movies, id).cloned())
            .await
    }

    /// Validates a create without applying it.
    pub async fn check_create(&self, fields: &MovieFields) -> Result<String, RecordError> {
        self.read(|d| repositories::movie::check_create(&d.movies, fields))
            .await
    }

    /// Validates an update without applying it.
    pub async fn check_update(&self, id: MovieId, fields: &MovieFields) -> Result<String, RecordError> {
        self.read(|d| repositories::movie::check_update(&d.movies, id, fields))
            .await
    }

    pub async fn create_movie(&self, fields: MovieFields) -> Result<MovieRecord, RecordError> {
        let mut dataset = self.dataset.write().await;
        let movie = repositories::movie::create(&mut dataset.movies, fields, Utc::now())?;
        self.persist(&dataset);
        Ok(movie)
    }

    pub async fn update_movie(
        &self,
        id: MovieId,
        fields: MovieFields,
    ) -> Result<MovieRecord, RecordError> {
        let mut dataset = self.dataset.write().await;
        let movie = repositories::movie::update(&mut dataset.movies, id, fields)?;
        self.persist(&dataset);
        Ok(movie)
    }

    pub async fn delete_movie(&self, id: MovieId) -> Result<MovieRecord, RecordError> {
        let mut dataset = self.dataset.write().await;
        let movie = repositories::movie::delete(&mut dataset.movies, id)?;
        self.persist(&dataset);
        Ok(movie)
    }

    /// Public single-record lookup: finds a published record by id or slug and
    /// counts the view.
    pub async fn view_published_movie(&self, key: &MovieKey) -> Option<MovieRecord> {
        let mut dataset = self.dataset.write().await;
        let movie = repositories::movie::record_view(&mut dataset.movies, key)?;
        self.persist(&dataset);
        Some(movie)
    }

    pub async fn settings(&self) -> Settings {
        self.dataset.read().await.settings.clone()
    }

    pub async fn merge_settings(&self, patch: Map<String, Value>) -> Settings {
        let mut dataset = self.dataset.write().await;
        dataset.settings.merge(patch);
        self.persist(&dataset);
        dataset.settings.clone()
    }

    pub async fn find_user_by_email(&self, email: &str) -> Option<UserRecord> {
        self.read(|d| repositories::user::find_by_email(&d.users, email).cloned())
            .await
    }

    /// Returns the user when `email` exists and `password` matches its hash.
    ///
    /// An unknown email still pays for one Argon2 verification.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, PasswordError> {
        let Some(user) = self.find_user_by_email(email).await else {
            verify_dummy_blocking(password.to_string()).await?;
            return Ok(None);
        };

        let valid = repositories::user::verify_password(&user, password).await?;
        Ok(valid.then_some(user))
    }

    /// Waits for every queued snapshot to be written.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }
}

async fn complete(stored: StoredDataset, admin: &AdminSeed) -> Result<(Dataset, bool)> {
    let mut seeded = false;

    let movies = match stored.movies {
        Some(movies) => movies,
        None => {
            seeded = true;
            seed::default_movies().context("Built-in movie seed is invalid")?
        }
    };

    let users = match stored.users {
        Some(users) => users,
        None => {
            seeded = true;
            seed::default_users(admin)
                .await
                .context("Failed to hash the default admin password")?
        }
    };

    let settings = match stored.settings {
        Some(settings) => settings,
        None => {
            seeded = true;
            seed::default_settings()
        }
    };

    Ok((
        Dataset {
            movies,
            users,
            settings,
        },
        seeded,
    ))
}
