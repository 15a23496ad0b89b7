//! Key layout of the store.

/// Map of student id to registered user
pub const USERS_KEY: &str = "attendanceUsers";

/// The logged-in user, restored on startup
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Subjects and opaque records of one student
pub fn ledger_key(student_id: &str) -> String {
    format!("attendance_{}", student_id)
}

/// Today's attendance marks of one student
pub fn daily_marks_key(student_id: &str) -> String {
    format!("todayMarked_{}", student_id)
}
