use anyhow::Result;
use shared::UserData;
use tracing::{debug, info};

use super::{read_json, write_json};
use crate::domain::ledger::LedgerRecord;
use crate::io::mappers::LedgerMapper;
use crate::storage::keys::ledger_key;
use crate::storage::traits::KeyValueStorage;

/// Repository for the per-student `attendance_<studentId>` record.
#[derive(Clone)]
pub struct LedgerRepository<S: KeyValueStorage> {
    connection: S,
}

impl<S: KeyValueStorage> LedgerRepository<S> {
    pub fn new(connection: S) -> Self {
        Self { connection }
    }

    /// Load a student's ledger record. A missing record is an empty ledger.
    pub async fn load(&self, student_id: &str) -> Result<LedgerRecord> {
        let key = ledger_key(student_id);
        match read_json::<_, UserData>(&self.connection, &key).await? {
            Some(data) => {
                debug!("Loaded {} subjects for {}", data.subjects.len(), student_id);
                LedgerMapper::to_domain(data)
            }
            None => {
                info!("No attendance record for {}, starting empty", student_id);
                Ok(LedgerRecord::default())
            }
        }
    }

    pub async fn store(&self, student_id: &str, record: LedgerRecord) -> Result<()> {
        let data = LedgerMapper::to_dto(record);
        debug!("Storing {} subjects for {}", data.subjects.len(), student_id);
        write_json(&self.connection, &ledger_key(student_id), &data).await
    }
}
