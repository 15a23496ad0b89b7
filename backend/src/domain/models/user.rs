//! Domain model for a registered student.
use chrono::{DateTime, Utc};

/// A registered student. The password is kept exactly as entered; the stored
/// records have always held it in cleartext.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
