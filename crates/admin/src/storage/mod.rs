//! Persisted key-value storage.
//!
//! Each collection lives under its own key as one JSON array, read once when
//! state is loaded and overwritten in full after every mutation. There is no
//! schema version and no migration.
//!
//! # Keys
//!
//! - [`PRODUCTS_KEY`] - the product catalog
//! - [`ORDERS_KEY`] - all orders

pub mod file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Key holding the product catalog.
pub const PRODUCTS_KEY: &str = "products";

/// Key holding the order list.
pub const ORDERS_KEY: &str = "orders";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("io error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored value could not be encoded or decoded.
    #[error("serialization error on key {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters that are not allowed.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A whole-value string store.
///
/// Implementations never merge or append: `set` replaces the previous value.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Load a JSON array stored under `key`.
///
/// Returns `Ok(None)` when nothing has been stored yet.
///
/// # Errors
///
/// Returns `StorageError` if the store fails or the value is not valid JSON
/// for `Vec<T>`.
pub fn load_collection<S, T>(store: &S, key: &str) -> Result<Option<Vec<T>>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    let items = serde_json::from_str(&raw).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;

    Ok(Some(items))
}

/// Overwrite the JSON array stored under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or writing fails.
pub fn save_collection<S, T>(store: &mut S, key: &str, items: &[T]) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(items).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;

    store.set(key, &raw)?;
    tracing::debug!(key, bytes = raw.len(), items = items.len(), "Persisted collection");
    Ok(())
}

/// Check that a key is safe to use as a file stem.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
