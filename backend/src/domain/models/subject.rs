//! Domain model for a tracked subject.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject identifier: the creation time in epoch millis, bumped when needed
/// so ids stay strictly increasing within a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub u64);

impl SubjectId {
    /// Mint an id from the current time, staying above `last` if given.
    pub fn generate(now_millis: u64, last: Option<SubjectId>) -> Self {
        match last {
            Some(SubjectId(last)) if now_millis <= last => SubjectId(last.saturating_add(1)),
            _ => SubjectId(now_millis),
        }
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SubjectId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(SubjectId)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    pub credits: u8,
    pub total_classes: u32,
    pub attended_classes: u32,
    /// 0 when no plan is tracked
    pub total_classes_planned: u32,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    pub fn has_plan(&self) -> bool {
        self.total_classes_planned > 0
    }

    /// True once as many classes were held as were planned
    pub fn plan_exhausted(&self) -> bool {
        self.has_plan() && self.total_classes >= self.total_classes_planned
    }

    /// Classes missed so far
    pub fn missed_classes(&self) -> u32 {
        self.total_classes.saturating_sub(self.attended_classes)
    }

    /// Restore `attended_classes <= total_classes`.
    pub(crate) fn clamp_attended(&mut self) {
        if self.attended_classes > self.total_classes {
            self.attended_classes = self.total_classes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(total: u32, attended: u32, planned: u32) -> Subject {
        Subject {
            id: SubjectId(1),
            name: "Chemistry".to_string(),
            code: "CH101".to_string(),
            credits: 3,
            total_classes: total,
            attended_classes: attended,
            total_classes_planned: planned,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_id_uses_timestamp() {
        assert_eq!(SubjectId::generate(1_000, None), SubjectId(1_000));
        assert_eq!(SubjectId::generate(1_000, Some(SubjectId(999))), SubjectId(1_000));
    }

    #[test]
    fn test_generate_id_same_millisecond() {
        assert_eq!(SubjectId::generate(1_000, Some(SubjectId(1_000))), SubjectId(1_001));
        // Clock went backwards
        assert_eq!(SubjectId::generate(500, Some(SubjectId(1_000))), SubjectId(1_001));
    }

    #[test]
    fn test_generate_id_after_max_does_not_overflow() {
        let id = SubjectId::generate(1_000, Some(SubjectId(u64::MAX)));
        assert_eq!(id, SubjectId(u64::MAX));
    }

    #[test]
    fn test_plan_exhausted() {
        assert!(!subject(10, 5, 0).plan_exhausted());
        assert!(!subject(9, 5, 10).plan_exhausted());
        assert!(subject(10, 5, 10).plan_exhausted());
        assert!(subject(12, 5, 10).plan_exhausted());
    }

    #[test]
    fn test_clamp_attended() {
        let mut s = subject(5, 8, 0);
        s.clamp_attended();
        assert_eq!(s.attended_classes, 5);
        assert_eq!(s.missed_classes(), 0);
    }

    #[test]
    fn test_subject_id_parse() {
        assert_eq!("1700000000000".parse::<SubjectId>().unwrap(), SubjectId(1_700_000_000_000));
        assert!("abc".parse::<SubjectId>().is_err());
    }
}
