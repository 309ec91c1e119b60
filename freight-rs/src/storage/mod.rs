use log::{error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

mod file;
mod kv;
mod memory;

#[doc(inline)]
pub use file::JsonFileStore;
#[doc(inline)]
pub use kv::KvStore;
#[doc(inline)]
pub use kv::StorageError;
#[doc(inline)]
pub use memory::MemoryStore;

/// Keys under which the depot state is persisted
pub mod keys {
    pub const INVENTORY: &str = "inventory";
    pub const SHIPMENTS: &str = "shipments";
    pub const CONTAINERS: &str = "containers";
    pub const FLEET: &str = "fleet";

    pub const ALL: [&str; 4] = [INVENTORY, SHIPMENTS, CONTAINERS, FLEET];
}

/// Typed access to a [`KvStore`].
/// Storage failures never reach the caller: they are logged and masked behind defaults or `false`.
pub struct Storage {
    store: Box<dyn KvStore + Send>,
}

impl Storage {
    pub fn new(store: Box<dyn KvStore + Send>) -> Self {
        Self { store }
    }

    /// Value stored under `key`, `None` if absent or unreadable
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.read(key) {
            Ok(raw) => raw?,
            Err(e) => {
                error!("[STORE] reading {key} failed: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("[STORE] discarding malformed value of {key}: {e}");
                None
            }
        }
    }

    /// Value stored under `key`, or `default` if absent or unreadable
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.load(key).unwrap_or(default)
    }

    /// Stores `value` under `key`. Returns whether the write succeeded.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| self.store.write(key, &raw));
        match result {
            Ok(()) => true,
            Err(e) => {
                error!("[STORE] writing {key} failed: {e}");
                false
            }
        }
    }

    /// Removes `key`. Returns whether the removal succeeded.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.store.delete(key) {
            Ok(()) => true,
            Err(e) => {
                error!("[STORE] removing {key} failed: {e}");
                false
            }
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }
}
