use thiserror::Error;

/// Failures of a [`KvStore`] backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not (de)serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("quota exceeded writing {key}: {needed} bytes needed, {limit} bytes allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// String-keyed store of raw JSON documents.
/// Writes replace the previous value of a key entirely (last write wins).
pub trait KvStore {
    /// Raw value stored under `key`, `None` if the key was never written
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}
