//! Repositories over a [`KeyValueStorage`], one per stored record kind.
//!
//! Every record is a JSON document under a fixed key (see [`super::keys`]).

pub mod daily_mark_repository;
pub mod ledger_repository;
pub mod user_repository;

pub use daily_mark_repository::DailyMarkRepository;
pub use ledger_repository::LedgerRepository;
pub use user_repository::UserRepository;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::KeyValueStorage;

pub(crate) async fn read_json<S, T>(storage: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStorage,
    T: DeserializeOwned,
{
    let Some(raw) = storage.get_value(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON stored under {}", key))?;
    Ok(Some(value))
}

pub(crate) async fn write_json<S, T>(storage: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStorage,
    T: Serialize,
{
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize record for {}", key))?;
    storage.put_value(key, &raw).await
}
