use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A tracked course as it is persisted under `attendance_<studentId>`.
///
/// Field names serialize in camelCase. Counters default to zero when missing
/// so that partially written records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Creation-time epoch millis, unique within a ledger
    pub id: u64,
    pub name: String,
    pub code: String,
    /// Course credits (1-5), informational only. 0 means the stored record
    /// had no credits field.
    #[serde(default)]
    pub credits: u8,
    /// Classes held since the subject was created
    #[serde(default)]
    pub total_classes: u32,
    /// Classes attended
    #[serde(default)]
    pub attended_classes: u32,
    /// Planned number of classes, 0 when not tracked
    #[serde(default)]
    pub total_classes_planned: u32,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

/// The per-user record stored under `attendance_<studentId>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    /// Carried opaquely; keyed by subject id
    #[serde(default)]
    pub attendance_records: serde_json::Map<String, serde_json::Value>,
}

/// A registered student as stored in the `attendanceUsers` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    /// RFC 3339 registration timestamp
    pub created_at: String,
}

/// Daily "already marked" flags stored under `todayMarked_<studentId>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyMarksRecord {
    /// Calendar date (YYYY-MM-DD) the flags belong to
    pub date: String,
    #[serde(default)]
    pub marked: BTreeMap<String, bool>,
}

/// Attendance tier derived from the percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// 75% or more
    Safe,
    /// 65% up to 75%
    Warning,
    /// Below 65%
    Danger,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Safe => write!(f, "safe"),
            AttendanceStatus::Warning => write!(f, "warning"),
            AttendanceStatus::Danger => write!(f, "danger"),
        }
    }
}

/// Public profile of the logged-in student (no password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub student_id: String,
    pub name: String,
    pub email: String,
}

/// A subject card as the dashboard renders it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub subject: Subject,
    pub percentage: f64,
    pub formatted_percentage: String,
    pub status: AttendanceStatus,
    pub status_label: String,
    pub classes_needed_for_75: u32,
    /// Classes missed so far
    pub remaining: u32,
    /// Share of the plan already held, capped at 100; None when no plan
    pub plan_progress: Option<f64>,
    pub prediction_message: String,
    pub guidance_message: String,
}

/// Dashboard header statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_subjects: usize,
    pub avg_attendance: f64,
    pub formatted_avg_attendance: String,
    pub safe_count: usize,
    pub warning_count: usize,
    pub risk_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub student: UserProfile,
    pub subjects: Vec<SubjectSummary>,
    pub stats: DashboardStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub student: UserProfile,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub credits: u8,
    /// Planned number of classes; None or 0 means not tracked
    pub total_classes_planned: Option<u32>,
}

/// Manual correction of every mutable field of a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectRequest {
    pub subject_id: u64,
    pub name: String,
    pub code: String,
    pub credits: u8,
    pub total_classes_planned: Option<u32>,
    pub total_classes: u32,
    pub attended_classes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub subject_id: u64,
    pub is_present: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubjectRequest {
    pub subject_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    pub subject: SubjectSummary,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubjectResponse {
    pub subject_id: u64,
    pub success_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_data_defaults_missing_fields() {
        let json = serde_json::json!({
            "subjects": [{
                "id": 1700000000000u64,
                "name": "Physics",
                "code": "PHY101",
                "credits": 4,
                "createdAt": "2024-01-01T00:00:00Z"
            }]
        });
        let data: UserData = serde_json::from_value(json).expect("Failed to parse user data");

        assert_eq!(data.subjects.len(), 1);
        assert_eq!(data.subjects[0].total_classes, 0);
        assert_eq!(data.subjects[0].attended_classes, 0);
        assert_eq!(data.subjects[0].total_classes_planned, 0);
        assert!(data.attendance_records.is_empty());
    }

    #[test]
    fn test_empty_record_parses_to_default() {
        let data: UserData = serde_json::from_str("{}").expect("Failed to parse empty record");
        assert_eq!(data, UserData::default());
    }

    #[test]
    fn test_subject_serializes_camel_case() {
        let subject = Subject {
            id: 42,
            name: "Maths".to_string(),
            code: "MA101".to_string(),
            credits: 3,
            total_classes: 10,
            attended_classes: 8,
            total_classes_planned: 40,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };

        let value = serde_json::to_value(&subject).expect("Failed to serialize subject");
        assert_eq!(value["totalClasses"], 10);
        assert_eq!(value["attendedClasses"], 8);
        assert_eq!(value["totalClassesPlanned"], 40);
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&AttendanceStatus::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        assert_eq!(AttendanceStatus::Danger.to_string(), "danger");
    }
}
