//! Storage
//!
//! Durable per-customer key-value slots. A slot holds one serialized value and is always
//! written or removed as a whole.

use std::{fs, io, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read, written or removed.
    #[error("storage io failed for key {key}: {source}")]
    Io {
        /// Slot key
        key: String,

        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// A value could not be serialized for storage.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Storage key of a customer's cart.
pub fn cart_key(customer: &str) -> String {
    format!("cart-{customer}")
}

/// Storage key of a customer's selected discount code.
pub fn discount_key(customer: &str) -> String {
    format!("discount-{customer}")
}

/// A durable key-value slot store.
pub trait Storage: Send {
    /// Returns the raw value of a slot, if present and readable.
    fn get(&self, key: &str) -> Option<String>;

    /// Replaces the value of a slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a slot. Removing an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the slot exists but cannot be removed.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage, mostly useful for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);

        Ok(())
    }
}

/// File-backed storage: one `<key>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_error)?;
        fs::write(self.path(key), value).map_err(io_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn keys_are_scoped_by_customer() {
        assert_eq!(cart_key("c1"), "cart-c1");
        assert_eq!(discount_key("c1"), "discount-c1");
    }

    #[test]
    fn memory_storage_round_trips_slots() -> TestResult {
        let mut storage = MemoryStorage::new();

        storage.set("cart-c1", "[]")?;
        assert_eq!(storage.get("cart-c1").as_deref(), Some("[]"));

        storage.remove("cart-c1")?;
        storage.remove("cart-c1")?;
        assert!(storage.is_empty());

        Ok(())
    }

    #[test]
    fn file_storage_writes_one_file_per_key() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut storage = FileStorage::new(dir.path().join("slots"));

        assert_eq!(storage.get("cart-c1"), None);

        storage.set("cart-c1", "[1]")?;
        assert!(dir.path().join("slots").join("cart-c1.json").exists());
        assert_eq!(storage.get("cart-c1").as_deref(), Some("[1]"));

        storage.remove("cart-c1")?;
        storage.remove("cart-c1")?;
        assert_eq!(storage.get("cart-c1"), None);

        Ok(())
    }
}
