use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};
use tokio::sync::Mutex;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("Store file corrupted: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String key/value store kept as one JSON object on disk.
///
/// Every write carries a ticket from [`KvStore::reserve`]. Writes run one at a
/// time, each through its own temp file and a rename, and a write whose ticket
/// is older than the last one stored for the same key is skipped.
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    next_ticket: AtomicU64,
    written: Mutex<HashMap<String, u64>>,
}

impl KvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            next_ticket: AtomicU64::new(1),
            written: Mutex::new(HashMap::new()),
        }
    }

    /// Takes the next write ticket. Call in the order the writes were issued.
    pub fn reserve(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::Relaxed)
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.read_all().await?;
        Ok(entries
            .get(key)
            .and_then(|value| value.as_str())
            .map(|value| value.to_string()))
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let ticket = self.reserve();
        self.set_reserved(ticket, key, value).await.map(|_| ())
    }

    /// Writes `value` under a ticket from [`KvStore::reserve`]. Returns `false`
    /// when a newer ticket already wrote this key.
    pub async fn set_reserved(
        &self,
        ticket: u64,
        key: &str,
        value: &str,
    ) -> Result<bool, StorageError> {
        let mut written = self.written.lock().await;
        if written.get(key).is_some_and(|last| *last > ticket) {
            tracing::debug!(key, ticket, "skipping superseded write");
            return Ok(false);
        }
        let mut entries = match self.read_all().await {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(error)) => {
                tracing::warn!(path = %self.path.display(), %error, "replacing corrupt store file");
                Map::new()
            }
            Err(error) => return Err(error),
        };
        entries.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(&entries, ticket).await?;
        written.insert(key.to_string(), ticket);
        Ok(true)
    }

    async fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write_all(&self, entries: &Map<String, Value>, ticket: u64) -> Result<(), StorageError> {
        let write_error = |source| StorageError::Write {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension(format!("json.{ticket}.tmp"));
        tokio::fs::write(&tmp, json).await.map_err(write_error)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(write_error)?;
        tracing::debug!(path = %self.path.display(), keys = entries.len(), "store saved");
        Ok(())
    }
}
