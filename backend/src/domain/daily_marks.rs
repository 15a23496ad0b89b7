//! Per-day "attendance already recorded" guard.
//!
//! The table is stamped with the calendar date it belongs to. Any lookup or
//! update made with a different date sees an empty table, so a new day
//! invalidates every earlier mark without a separate reset step.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::models::SubjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyMarks {
    date: NaiveDate,
    marked: BTreeSet<SubjectId>,
}

impl DailyMarks {
    /// Empty table for `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today,
            marked: BTreeSet::new(),
        }
    }

    /// Rebuild a persisted table. Marks from another date are dropped.
    pub fn restore(
        date: NaiveDate,
        marked: impl IntoIterator<Item = SubjectId>,
        today: NaiveDate,
    ) -> Self {
        if date != today {
            return Self::new(today);
        }
        Self {
            date,
            marked: marked.into_iter().collect(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn marked_ids(&self) -> impl Iterator<Item = SubjectId> + '_ {
        self.marked.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Clear and re-stamp the table when the date changed.
    /// Returns true if a reset happened.
    pub fn reset_if_stale(&mut self, today: NaiveDate) -> bool {
        if self.date == today {
            return false;
        }
        self.date = today;
        self.marked.clear();
        true
    }

    pub fn is_marked(&self, subject_id: SubjectId, today: NaiveDate) -> bool {
        self.date == today && self.marked.contains(&subject_id)
    }

    pub fn mark(&mut self, subject_id: SubjectId, today: NaiveDate) {
        self.reset_if_stale(today);
        self.marked.insert(subject_id);
    }

    /// Drop the mark for a subject. Returns true if it was marked.
    pub fn forget(&mut self, subject_id: SubjectId) -> bool {
        self.marked.remove(&subject_id)
    }
}
