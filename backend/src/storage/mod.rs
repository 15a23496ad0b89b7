//! # Storage Layer
//!
//! Persistence for the attendance tracker. Backends implement
//! [`KeyValueStorage`]; repositories turn the JSON records under each key
//! into domain values.
//!
//! - [`sqlite::DbConnection`]: SQLite key/value table, the default backend
//! - [`memory::MemoryConnection`]: process-local map for tests and throwaway sessions

pub mod keys;
pub mod memory;
pub mod repositories;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use memory::MemoryConnection;
pub use repositories::{DailyMarkRepository, LedgerRepository, UserRepository};
pub use sqlite::DbConnection;
pub use traits::KeyValueStorage;
