//! # Attendance Tracker Backend
//!
//! All non-UI logic for the attendance tracker: students track their
//! attendance per subject against the 75% rule.
//!
//! ## Architecture
//!
//! ```text
//! UI
//!     ↓
//! IO Layer (DashboardApi, DTO mappers, display text)
//!     ↓
//! Domain Layer (ledger, attendance arithmetic, services)
//!     ↓
//! Storage Layer (SQLite or in-memory key/value store)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub use config::AppConfig;
pub use domain::*;
pub use io::DashboardApi;
pub use storage::{DbConnection, KeyValueStorage, MemoryConnection};

/// Open the configured database and build the API. The stored session, if
/// any, is restored.
pub async fn initialize_backend(config: &AppConfig) -> Result<DashboardApi<DbConnection>> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::init(config).await?;

    info!("Setting up dashboard");
    let mut api = DashboardApi::new(db_conn, Arc::new(SystemClock));
    api.restore_session().await?;

    Ok(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;
    use shared::RegisterRequest;

    #[tokio::test]
    async fn test_initialize_backend_restores_session() {
        let env = TestEnvironment::new().unwrap();

        {
            let mut api = initialize_backend(&env.config).await.unwrap();
            assert!(!api.is_logged_in());
            api.register(RegisterRequest {
                student_id: "S1".to_string(),
                name: "Rohan".to_string(),
                email: "rohan@example.edu".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        }

        let api = initialize_backend(&env.config).await.unwrap();
        assert!(api.is_logged_in());
        assert_eq!(api.dashboard().unwrap().student.name, "Rohan");
    }
}
