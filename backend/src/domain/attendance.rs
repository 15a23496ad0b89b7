//! Attendance arithmetic.
//!
//! Everything here is a pure function of the subject counters:
//!
//! - **percentage**: `attended / total * 100`, or 0 before the first class
//! - **status**: safe at 75% and above, warning from 65% up to 75%, danger below
//! - **classes needed for 75%**: attendances missing against the *current*
//!   total, `max(0, ceil(total * 0.75) - attended)`
//! - **forward prediction**: how many future classes can be skipped (or must be
//!   attended in a row) to hold or reach 75%
//! - **aggregate stats**: the unweighted mean of subject percentages plus a
//!   tally by status

use shared::AttendanceStatus;
use std::fmt;

use super::models::Subject;

/// Percentage at or above which a subject is safe
pub const SAFE_THRESHOLD: f64 = 75.0;
/// Percentage at or above which a subject is only a warning
pub const WARNING_THRESHOLD: f64 = 65.0;

/// Values derived from a subject's counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedAttendance {
    pub percentage: f64,
    pub status: AttendanceStatus,
    pub classes_needed_for_75: u32,
    /// Classes missed so far
    pub remaining: u32,
    /// Share of the plan already held, capped at 100
    pub plan_progress: Option<f64>,
}

/// How the student stands against 75% going forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardPrediction {
    /// No class held yet
    NoData,
    /// This many future classes can be missed while staying at or above 75%
    CanMiss(u32),
    /// At 75% but with no slack left
    AttendAllRemaining,
    /// This many consecutive attendances are needed to reach 75%
    AttendNext(u32),
}

impl fmt::Display for ForwardPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ForwardPrediction::NoData => write!(f, "No classes recorded yet"),
            ForwardPrediction::CanMiss(n) => {
                write!(f, "You can miss {} more {}", n, classes_word(n))
            }
            ForwardPrediction::AttendAllRemaining => write!(f, "Attend all remaining classes"),
            ForwardPrediction::AttendNext(n) => {
                write!(f, "Attend next {} {} to reach 75%", n, classes_word(n))
            }
        }
    }
}

fn classes_word(n: u32) -> &'static str {
    if n == 1 {
        "class"
    } else {
        "classes"
    }
}

/// Dashboard-wide tallies
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateStats {
    pub total_subjects: usize,
    /// Unweighted mean of the subject percentages
    pub avg_attendance: f64,
    pub safe_count: usize,
    pub warning_count: usize,
    /// Subjects in the danger band
    pub risk_count: usize,
}

pub fn attendance_percentage(attended: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    // Multiply first so whole-number percentages come out exact
    (attended as f64 * 100.0) / total as f64
}

pub fn attendance_status(percentage: f64) -> AttendanceStatus {
    if percentage >= SAFE_THRESHOLD {
        AttendanceStatus::Safe
    } else if percentage >= WARNING_THRESHOLD {
        AttendanceStatus::Warning
    } else {
        AttendanceStatus::Danger
    }
}

/// `max(0, ceil(total * 0.75) - attended)`
pub fn classes_needed_for_75(attended: u32, total: u32) -> u32 {
    let target = (3 * total as u64).div_ceil(4);
    target.saturating_sub(attended as u64) as u32
}

pub fn compute_derived(subject: &Subject) -> DerivedAttendance {
    let total = subject.total_classes;
    let attended = subject.attended_classes;
    let percentage = attendance_percentage(attended, total);

    let plan_progress = subject.has_plan().then(|| {
        let progress = (total as f64 * 100.0) / subject.total_classes_planned as f64;
        progress.min(100.0)
    });

    DerivedAttendance {
        percentage,
        status: attendance_status(percentage),
        classes_needed_for_75: classes_needed_for_75(attended, total),
        remaining: subject.missed_classes(),
        plan_progress,
    }
}

/// Solve `attended / (total + x) >= 0.75` for the classes that can be missed,
/// or `(attended + x) / (total + x) >= 0.75` for the classes still needed.
///
/// `floor(attended / 0.75 - total)` equals `floor((4a - 3t) / 3)` and
/// `ceil((0.75t - a) / 0.25)` equals `3t - 4a`, so both are evaluated exactly
/// in integers.
pub fn compute_forward_prediction(attended: u32, total: u32, percentage: f64) -> ForwardPrediction {
    if total == 0 {
        return ForwardPrediction::NoData;
    }

    let attended = attended as i64;
    let total = total as i64;

    if percentage >= SAFE_THRESHOLD {
        let can_miss = (4 * attended - 3 * total).div_euclid(3);
        if can_miss > 0 {
            ForwardPrediction::CanMiss(can_miss as u32)
        } else {
            ForwardPrediction::AttendAllRemaining
        }
    } else {
        let needed = (3 * total - 4 * attended).max(0);
        ForwardPrediction::AttendNext(needed as u32)
    }
}

/// Prediction for a subject's current counters
pub fn predict(subject: &Subject) -> ForwardPrediction {
    let percentage = attendance_percentage(subject.attended_classes, subject.total_classes);
    compute_forward_prediction(subject.attended_classes, subject.total_classes, percentage)
}

/// A subject together with everything derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectOverview {
    pub subject: Subject,
    pub derived: DerivedAttendance,
    pub prediction: ForwardPrediction,
}

impl SubjectOverview {
    pub fn of(subject: Subject) -> Self {
        let derived = compute_derived(&subject);
        let prediction = predict(&subject);
        Self {
            subject,
            derived,
            prediction,
        }
    }
}

pub fn compute_aggregate_stats(subjects: &[Subject]) -> AggregateStats {
    let mut stats = AggregateStats {
        total_subjects: subjects.len(),
        ..AggregateStats::default()
    };

    if subjects.is_empty() {
        return stats;
    }

    let mut total_percentage = 0.0;
    for subject in subjects {
        let derived = compute_derived(subject);
        total_percentage += derived.percentage;

        match derived.status {
            AttendanceStatus::Safe => stats.safe_count += 1,
            AttendanceStatus::Warning => stats.warning_count += 1,
            AttendanceStatus::Danger => stats.risk_count += 1,
        }
    }

    stats.avg_attendance = total_percentage / subjects.len() as f64;
    stats
}
