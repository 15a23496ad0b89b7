//! Input rules applied before a command reaches a service.
//!
//! The ledger itself never re-validates string content; these checks run in
//! the io layer on behalf of the UI.

use thiserror::Error;

use super::commands::account::RegisterCommand;
use super::commands::subject::{CreateSubjectCommand, UpdateSubjectCommand};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_CODE_LENGTH: usize = 20;
pub const MIN_CREDITS: u8 = 1;
pub const MAX_CREDITS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Subject name cannot be empty")]
    EmptySubjectName,
    #[error("Subject name cannot exceed {} characters", MAX_NAME_LENGTH)]
    SubjectNameTooLong,
    #[error("Subject code cannot be empty")]
    EmptySubjectCode,
    #[error("Subject code cannot exceed {} characters", MAX_CODE_LENGTH)]
    SubjectCodeTooLong,
    #[error("Credits must be between 1 and 5, got {0}")]
    CreditsOutOfRange(u8),
    #[error("Student ID cannot be empty")]
    EmptyStudentId,
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Password cannot be empty")]
    EmptyPassword,
}

fn validate_subject_fields(name: &str, code: &str, credits: u8) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptySubjectName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::SubjectNameTooLong);
    }

    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::EmptySubjectCode);
    }
    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(ValidationError::SubjectCodeTooLong);
    }

    if !(MIN_CREDITS..=MAX_CREDITS).contains(&credits) {
        return Err(ValidationError::CreditsOutOfRange(credits));
    }

    Ok(())
}

pub fn validate_create_subject(command: &CreateSubjectCommand) -> Result<(), ValidationError> {
    validate_subject_fields(&command.name, &command.code, command.credits)
}

pub fn validate_update_subject(command: &UpdateSubjectCommand) -> Result<(), ValidationError> {
    validate_subject_fields(&command.name, &command.code, command.credits)
}

pub fn validate_registration(command: &RegisterCommand) -> Result<(), ValidationError> {
    if command.student_id.trim().is_empty() {
        return Err(ValidationError::EmptyStudentId);
    }
    if command.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let email = command.email.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !well_formed {
        return Err(ValidationError::InvalidEmail(command.email.clone()));
    }

    if command.password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }

    Ok(())
}
