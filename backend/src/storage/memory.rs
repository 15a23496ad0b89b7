use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::traits::KeyValueStorage;

/// Process-local key/value store. Nothing survives the process; useful for
/// tests and for sessions that should not touch disk.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_values<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> T {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut values)
    }
}

#[async_trait]
impl KeyValueStorage for MemoryConnection {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.with_values(|values| values.get(key).cloned()))
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        self.with_values(|values| values.insert(key.to_string(), value.to_string()));
        Ok(())
    }

    async fn delete_value(&self, key: &str) -> Result<bool> {
        Ok(self.with_values(|values| values.remove(key).is_some()))
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.with_values(|values| values.keys().cloned().collect()))
    }
}
