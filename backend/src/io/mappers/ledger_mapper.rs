use anyhow::Result;
use shared::UserData;

use super::subject_mapper::SubjectMapper;
use crate::domain::ledger::LedgerRecord;

/// Mapper between the stored `attendance_<studentId>` record and the ledger.
pub struct LedgerMapper;

impl LedgerMapper {
    pub fn to_domain(dto: UserData) -> Result<LedgerRecord> {
        let subjects = dto
            .subjects
            .into_iter()
            .map(SubjectMapper::to_domain)
            .collect::<Result<Vec<_>>>()?;

        Ok(LedgerRecord {
            subjects,
            attendance_records: dto.attendance_records,
        })
    }

    pub fn to_dto(domain: LedgerRecord) -> UserData {
        UserData {
            subjects: domain.subjects.into_iter().map(SubjectMapper::to_dto).collect(),
            attendance_records: domain.attendance_records,
        }
    }
}
