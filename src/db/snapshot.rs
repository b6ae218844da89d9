//! Whole-dataset snapshots and the background task that writes them.
//!
//! Every mutation hands a full copy of the dataset to [`SnapshotWriter`],
//! which saves them one at a time in the order they were queued. Requests
//! never wait for the disk.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::{debug, error};

use crate::models::{MovieRecord, Settings, UserRecord};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// Everything the service persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub movies: Vec<MovieRecord>,
    pub users: Vec<UserRecord>,
    pub settings: Settings,
}

/// A dataset as read back from storage. A collection missing from the file
/// is `None` and gets its built-in default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoredDataset {
    #[serde(default)]
    pub movies: Option<Vec<MovieRecord>>,
    #[serde(default)]
    pub users: Option<Vec<UserRecord>>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

impl From<Dataset> for StoredDataset {
    fn from(dataset: Dataset) -> Self {
        Self {
            movies: Some(dataset.movies),
            users: Some(dataset.users),
            settings: Some(dataset.settings),
        }
    }
}

#[async_trait]
pub trait SnapshotPersistence: Send + Sync + 'static {
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<StoredDataset>, SnapshotError>;

    async fn save(&self, dataset: &Dataset) -> Result<(), SnapshotError>;
}

/// Pretty-printed JSON file, replaced atomically through a sibling temp file.
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl SnapshotPersistence for JsonFilePersistence {
    async fn load(&self) -> Result<Option<StoredDataset>, SnapshotError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        Ok(Some(serde_json::from_slice(&content)?))
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_vec_pretty(dataset)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        Ok(())
    }
}

/// In-memory snapshots, for tests.
#[derive(Clone, Default)]
pub struct MemoryPersistence {
    initial: Option<StoredDataset>,
    saved: Arc<Mutex<Vec<Dataset>>>,
}

impl MemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from `dataset` as if it had been loaded from disk.
    #[must_use]
    pub fn with_dataset(dataset: impl Into<StoredDataset>) -> Self {
        Self {
            initial: Some(dataset.into()),
            saved: Arc::default(),
        }
    }

    pub async fn last_saved(&self) -> Option<Dataset> {
        self.saved.lock().await.last().cloned()
    }

    pub async fn save_count(&self) -> usize {
        self.saved.lock().await.len()
    }
}

#[async_trait]
impl SnapshotPersistence for MemoryPersistence {
    async fn load(&self) -> Result<Option<StoredDataset>, SnapshotError> {
        if let Some(last) = self.saved.lock().await.last() {
            return Ok(Some(last.clone().into()));
        }
        Ok(self.initial.clone())
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), SnapshotError> {
        self.saved.lock().await.push(dataset.clone());
        Ok(())
    }
}

enum WriterMessage {
    Save(Box<Dataset>),
    Flush(oneshot::Sender<()>),
}

/// Handle to the background snapshot task.
#[derive(Clone)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<WriterMessage>,
}

impl SnapshotWriter {
    /// Spawns the writer task on the current runtime.
    #[must_use]
    pub fn spawn(persistence: Arc<dyn SnapshotPersistence>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(persistence, rx));
        Self { tx }
    }

    /// Queues `dataset` for saving. Returns immediately.
    pub fn enqueue(&self, dataset: Dataset) {
        if self.tx.send(WriterMessage::Save(Box::new(dataset))).is_err() {
            error!("Snapshot writer has stopped; change will not be persisted");
            metrics::counter!("snapshot_write_failures_total").increment(1);
        }
    }

    /// Waits until every snapshot queued before this call has been handled.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(WriterMessage::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }
}

async fn run_writer(
    persistence: Arc<dyn SnapshotPersistence>,
    mut rx: mpsc::UnboundedReceiver<WriterMessage>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            WriterMessage::Save(dataset) => match persistence.save(&dataset).await {
                Ok(()) => {
                    metrics::counter!("snapshot_writes_total").increment(1);
                    debug!(movies = dataset.movies.len(), "Snapshot saved");
                }
                Err(e) => {
                    metrics::counter!("snapshot_write_failures_total").increment(1);
                    error!(error = %e, "Failed to save snapshot");
                }
            },
            WriterMessage::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
