//! The attendance ledger: one student's ordered list of subjects and the
//! rules for mutating their counters.
//!
//! ## Invariants
//!
//! - `attended_classes <= total_classes` for every subject, restored by
//!   clamping on every path that writes counters (including restore)
//! - Insertion order is display order; ids are strictly increasing
//! - A rejected operation leaves the ledger untouched
//!
//! The ledger is synchronous and does no I/O. Callers supply "now" and
//! "today" and persist the ledger after each accepted mutation.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use super::attendance::{self, AggregateStats, DerivedAttendance, ForwardPrediction};
use super::commands::subject::{CreateSubjectCommand, UpdateSubjectCommand};
use super::daily_marks::DailyMarks;
use super::models::{Subject, SubjectId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Subject not found: {0}")]
    NotFound(SubjectId),
    #[error("Attendance already marked for today!")]
    AlreadyMarkedToday(SubjectId),
    #[error("You've reached the planned number of classes ({planned})!")]
    PlanExhausted { subject_id: SubjectId, planned: u32 },
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// The persisted part of a ledger (`attendance_<studentId>`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerRecord {
    pub subjects: Vec<Subject>,
    /// Opaque per-subject map kept for compatibility with stored records
    pub attendance_records: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceLedger {
    subjects: Vec<Subject>,
    attendance_records: Map<String, Value>,
    daily_marks: DailyMarks,
}

impl AttendanceLedger {
    /// Empty ledger for a newly registered student
    pub fn new(today: NaiveDate) -> Self {
        Self::restore(LedgerRecord::default(), DailyMarks::new(today))
    }

    /// Rebuild a ledger from persisted state, clamping any counters that
    /// violate `attended <= total`.
    pub fn restore(record: LedgerRecord, daily_marks: DailyMarks) -> Self {
        let mut subjects = record.subjects;
        for subject in &mut subjects {
            subject.clamp_attended();
        }

        Self {
            subjects,
            attendance_records: record.attendance_records,
            daily_marks,
        }
    }

    /// Snapshot of the persisted part
    pub fn to_record(&self) -> LedgerRecord {
        LedgerRecord {
            subjects: self.subjects.clone(),
            attendance_records: self.attendance_records.clone(),
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn attendance_records(&self) -> &Map<String, Value> {
        &self.attendance_records
    }

    pub fn daily_marks(&self) -> &DailyMarks {
        &self.daily_marks
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn get(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    fn position(&self, id: SubjectId) -> LedgerResult<usize> {
        self.subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or(LedgerError::NotFound(id))
    }

    pub fn is_marked_today(&self, id: SubjectId, today: NaiveDate) -> bool {
        self.daily_marks.is_marked(id, today)
    }

    /// Drop daily marks from an earlier date. Returns true if any reset happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        self.daily_marks.reset_if_stale(today)
    }

    /// Append a new subject with zeroed counters.
    pub fn create_subject(&mut self, command: CreateSubjectCommand, now: DateTime<Utc>) -> Subject {
        let last_id = self.subjects.iter().map(|s| s.id).max();
        let now_millis = now.timestamp_millis().max(0) as u64;

        let subject = Subject {
            id: SubjectId::generate(now_millis, last_id),
            name: command.name,
            code: command.code,
            credits: command.credits,
            total_classes: 0,
            attended_classes: 0,
            total_classes_planned: command.total_classes_planned,
            created_at: now,
        };

        self.attendance_records
            .insert(subject.id.to_string(), Value::Object(Map::new()));
        self.subjects.push(subject.clone());
        subject
    }

    /// Overwrite every mutable field. `attended_classes` above
    /// `total_classes` is clamped down; the daily guard and the plan do not
    /// apply to manual corrections.
    pub fn update_subject_details(
        &mut self,
        id: SubjectId,
        command: UpdateSubjectCommand,
    ) -> LedgerResult<Subject> {
        let index = self.position(id)?;
        let subject = &mut self.subjects[index];

        subject.name = command.name;
        subject.code = command.code;
        subject.credits = command.credits;
        subject.total_classes_planned = command.total_classes_planned;
        subject.total_classes = command.total_classes;
        subject.attended_classes = command.attended_classes;
        subject.clamp_attended();

        Ok(subject.clone())
    }

    /// Remove a subject together with its daily mark and opaque record.
    pub fn delete_subject(&mut self, id: SubjectId) -> LedgerResult<Subject> {
        let index = self.position(id)?;
        let removed = self.subjects.remove(index);

        self.attendance_records.remove(&id.to_string());
        self.daily_marks.forget(id);

        Ok(removed)
    }

    /// Record today's class for a subject.
    ///
    /// Checks, in order: the subject exists, it was not marked today, and the
    /// plan (if any) still has room.
    pub fn mark_attendance(
        &mut self,
        id: SubjectId,
        is_present: bool,
        today: NaiveDate,
    ) -> LedgerResult<Subject> {
        let index = self.position(id)?;

        if self.daily_marks.is_marked(id, today) {
            return Err(LedgerError::AlreadyMarkedToday(id));
        }

        let subject = &mut self.subjects[index];
        if subject.plan_exhausted() {
            return Err(LedgerError::PlanExhausted {
                subject_id: id,
                planned: subject.total_classes_planned,
            });
        }

        subject.total_classes = subject.total_classes.saturating_add(1);
        if is_present {
            subject.attended_classes = subject.attended_classes.saturating_add(1);
        }
        subject.clamp_attended();
        let updated = subject.clone();

        self.daily_marks.mark(id, today);
        Ok(updated)
    }

    pub fn derived(&self, id: SubjectId) -> LedgerResult<DerivedAttendance> {
        self.get(id)
            .map(attendance::compute_derived)
            .ok_or(LedgerError::NotFound(id))
    }

    pub fn prediction(&self, id: SubjectId) -> LedgerResult<ForwardPrediction> {
        self.get(id)
            .map(attendance::predict)
            .ok_or(LedgerError::NotFound(id))
    }

    pub fn stats(&self) -> AggregateStats {
        attendance::compute_aggregate_stats(&self.subjects)
    }
}
