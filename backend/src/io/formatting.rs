//! Display text for the dashboard.

use shared::AttendanceStatus;

use crate::domain::attendance::{DerivedAttendance, SAFE_THRESHOLD};

pub fn status_label(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Safe => "✓ Safe (≥75%)",
        AttendanceStatus::Warning => "⚠ Warning (65-74%)",
        AttendanceStatus::Danger => "⚠ At Risk (<65%)",
    }
}

/// One-line hint shown under a subject card
pub fn guidance_message(derived: &DerivedAttendance, total_classes: u32) -> String {
    if derived.classes_needed_for_75 > 0 {
        format!("Attend {} more to reach 75%", derived.classes_needed_for_75)
    } else if derived.percentage >= SAFE_THRESHOLD {
        "✓ Target achieved!".to_string()
    } else if total_classes == 0 {
        "Start marking attendance".to_string()
    } else {
        "Keep attending classes".to_string()
    }
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}
