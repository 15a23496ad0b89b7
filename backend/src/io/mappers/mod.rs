//! Conversions between the `shared` DTOs and the domain models.

pub mod daily_marks_mapper;
pub mod ledger_mapper;
pub mod subject_mapper;
pub mod user_mapper;

pub use daily_marks_mapper::DailyMarksMapper;
pub use ledger_mapper::LedgerMapper;
pub use subject_mapper::SubjectMapper;
pub use user_mapper::UserMapper;
