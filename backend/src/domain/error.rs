use thiserror::Error;

use super::ledger::LedgerError;
use super::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Student ID already exists!")]
    StudentIdTaken,
    #[error("Email already registered!")]
    EmailTaken,
    #[error("Invalid student ID or password!")]
    InvalidCredentials,
    #[error("No student is logged in")]
    NotLoggedIn,
}

/// Everything a service call can report back to the UI
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    /// True for outcomes the student can act on (as opposed to storage faults)
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ServiceError::Storage(_))
    }
}
