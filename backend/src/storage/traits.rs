//! # Storage Traits
//!
//! The domain layer only ever needs a flat string-to-string store. Records
//! are JSON documents under well-known keys (see [`super::keys`]).

use anyhow::Result;
use async_trait::async_trait;

/// Trait defining the interface for key/value storage backends
///
/// Implementations must be cheap to clone; clones share the same underlying
/// store.
#[async_trait]
pub trait KeyValueStorage: Send + Sync + Clone {
    /// Retrieve a value by its key
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, overwriting any existing value for the same key
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value by its key
    /// Returns true if the key existed
    async fn delete_value(&self, key: &str) -> Result<bool>;

    /// List all keys in ascending order
    async fn list_keys(&self) -> Result<Vec<String>>;
}
