//! Durable key-value storage for client state.
//!
//! The storefront persists a handful of string values between runs: the cart,
//! the language preference and the last submitted order. [`KeyValueStore`]
//! is the only interface the rest of the crate sees; backends are swappable:
//!
//! - [`MemoryStore`] - process-local map, used by tests and ephemeral servers
//! - [`FileStore`] - one file per key under a data directory
//!
//! Writes are single-key overwrites with last-write-wins semantics. There is
//! no transaction or cross-key atomicity.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt::Debug;

use thiserror::Error;

/// Errors returned by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// An internal lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A durable string-keyed store.
///
/// All methods take `&self`; implementations use interior mutability so a
/// single store can be shared behind an `Arc`.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Keys used for persisted storefront state.
pub mod keys {
    /// Serialized cart `{ items, total }`.
    pub const CART: &str = "cart";

    /// Preferred display language (`en` or `ar`).
    pub const LANGUAGE: &str = "language";

    /// Last submitted order, read by the order summary.
    pub const ORDER_DATA: &str = "orderData";

    /// Presence flag set once the order notification link was issued.
    pub const ORDER_SENT: &str = "orderSent";
}

/// Validate that a key only uses characters safe for every backend.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_storefront_keys() {
        for key in [keys::CART, keys::LANGUAGE, keys::ORDER_DATA, keys::ORDER_SENT] {
            assert!(validate_key(key).is_ok(), "{key}");
        }
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        for key in ["", "../cart", "a/b", ".hidden", "spa ce"] {
            assert!(
                matches!(validate_key(key), Err(StoreError::InvalidKey(_))),
                "{key}"
            );
        }
    }
}
