use anyhow::Result;
use chrono::NaiveDate;
use shared::DailyMarksRecord;
use tracing::{debug, warn};

use super::write_json;
use crate::domain::daily_marks::DailyMarks;
use crate::io::mappers::DailyMarksMapper;
use crate::storage::keys::daily_marks_key;
use crate::storage::traits::KeyValueStorage;

/// Repository for the per-student `todayMarked_<studentId>` record.
#[derive(Clone)]
pub struct DailyMarkRepository<S: KeyValueStorage> {
    connection: S,
}

impl<S: KeyValueStorage> DailyMarkRepository<S> {
    pub fn new(connection: S) -> Self {
        Self { connection }
    }

    /// Load the marks as of `today`. Marks stamped with another date come
    /// back empty, and so does a record that does not parse.
    pub async fn load(&self, student_id: &str, today: NaiveDate) -> Result<DailyMarks> {
        let key = daily_marks_key(student_id);
        let marks = match self.connection.get_value(&key).await? {
            Some(raw) => match serde_json::from_str::<DailyMarksRecord>(&raw) {
                Ok(record) => DailyMarksMapper::to_domain(record, today),
                Err(e) => {
                    warn!("Ignoring unreadable daily marks under {}: {}", key, e);
                    DailyMarks::new(today)
                }
            },
            None => DailyMarks::new(today),
        };
        debug!(
            "{} subjects already marked on {} for {}",
            marks.len(),
            today,
            student_id
        );
        Ok(marks)
    }

    pub async fn store(&self, student_id: &str, marks: &DailyMarks) -> Result<()> {
        let record = DailyMarksMapper::to_dto(marks);
        write_json(&self.connection, &daily_marks_key(student_id), &record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SubjectId;
    use crate::storage::memory::MemoryConnection;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
    }

    #[tokio::test]
    async fn test_marks_expire_with_the_day() {
        let repo = DailyMarkRepository::new(MemoryConnection::new());

        let mut marks = DailyMarks::new(day(2));
        marks.mark(SubjectId(1), day(2));
        repo.store("S1", &marks).await.unwrap();

        let same_day = repo.load("S1", day(2)).await.unwrap();
        assert!(same_day.is_marked(SubjectId(1), day(2)));

        let next_day = repo.load("S1", day(3)).await.unwrap();
        assert!(next_day.is_empty());
        assert_eq!(next_day.date(), day(3));
    }

    #[tokio::test]
    async fn test_unreadable_record_is_empty() {
        let store = MemoryConnection::new();
        let repo = DailyMarkRepository::new(store.clone());

        // Flat id map without a date stamp
        store.put_value("todayMarked_S1", r#"{"1700000000000":true}"#).await.unwrap();
        let marks = repo.load("S1", day(2)).await.unwrap();
        assert!(marks.is_empty());
        assert_eq!(marks.date(), day(2));

        store.put_value("todayMarked_S1", "garbage").await.unwrap();
        assert!(repo.load("S1", day(2)).await.unwrap().is_empty());

        // The next mark overwrites the unreadable record
        let mut marks = DailyMarks::new(day(2));
        marks.mark(SubjectId(1), day(2));
        repo.store("S1", &marks).await.unwrap();
        assert!(repo.load("S1", day(2)).await.unwrap().is_marked(SubjectId(1), day(2)));
    }

    #[tokio::test]
    async fn test_missing_record_is_empty() {
        let repo = DailyMarkRepository::new(MemoryConnection::new());
        assert!(repo.load("S1", day(2)).await.unwrap().is_empty());
    }
}
