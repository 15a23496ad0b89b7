//! One student's attendance session.
//!
//! `AttendanceService` owns the student's [`AttendanceLedger`] for as long as
//! they are logged in. Every accepted mutation is written back (ledger record
//! and daily marks) before the call returns; a rejected call writes nothing.
//!
//! The date is read from the injected [`Clock`] on every call, so a session
//! left open past midnight picks up the new day on its next operation.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::attendance::{AggregateStats, SubjectOverview};
use super::clock::Clock;
use super::commands::subject::{CreateSubjectCommand, UpdateSubjectCommand};
use super::error::ServiceResult;
use super::ledger::{AttendanceLedger, LedgerError};
use super::models::{Subject, SubjectId, User};
use crate::storage::{DailyMarkRepository, KeyValueStorage, LedgerRepository};

pub struct AttendanceService<S: KeyValueStorage> {
    user: User,
    ledger: AttendanceLedger,
    ledger_repository: LedgerRepository<S>,
    daily_mark_repository: DailyMarkRepository<S>,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStorage> AttendanceService<S> {
    /// Load the student's ledger and today's marks.
    pub async fn open(connection: S, clock: Arc<dyn Clock>, user: User) -> ServiceResult<Self> {
        let ledger_repository = LedgerRepository::new(connection.clone());
        let daily_mark_repository = DailyMarkRepository::new(connection);

        let today = clock.today();
        let record = ledger_repository.load(&user.student_id).await?;
        let marks = daily_mark_repository.load(&user.student_id, today).await?;
        let ledger = AttendanceLedger::restore(record, marks);

        info!(
            "Opened attendance for {} with {} subjects ({} marked today)",
            user.student_id,
            ledger.len(),
            ledger.daily_marks().len()
        );

        Ok(Self {
            user,
            ledger,
            ledger_repository,
            daily_mark_repository,
            clock,
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn ledger(&self) -> &AttendanceLedger {
        &self.ledger
    }

    pub fn subjects(&self) -> &[Subject] {
        self.ledger.subjects()
    }

    /// Every subject with its derived figures, in display order
    pub fn summaries(&self) -> Vec<SubjectOverview> {
        self.ledger.subjects().iter().cloned().map(SubjectOverview::of).collect()
    }

    pub fn summary(&self, id: SubjectId) -> ServiceResult<SubjectOverview> {
        let subject = self.ledger.get(id).cloned().ok_or(LedgerError::NotFound(id))?;
        Ok(SubjectOverview::of(subject))
    }

    pub fn stats(&self) -> AggregateStats {
        self.ledger.stats()
    }

    pub fn is_marked_today(&self, id: SubjectId) -> bool {
        self.ledger.is_marked_today(id, self.clock.today())
    }

    pub async fn create_subject(
        &mut self,
        command: CreateSubjectCommand,
    ) -> ServiceResult<Subject> {
        self.roll_over();
        let subject = self.ledger.create_subject(command, self.clock.now());
        info!("Created subject {} ({}) for {}", subject.id, subject.code, self.user.student_id);

        self.persist().await?;
        Ok(subject)
    }

    pub async fn update_subject(
        &mut self,
        id: SubjectId,
        command: UpdateSubjectCommand,
    ) -> ServiceResult<Subject> {
        self.roll_over();
        let subject = self.ledger.update_subject_details(id, command).map_err(|e| {
            warn!("Update of subject {} rejected: {}", id, e);
            e
        })?;
        info!(
            "Updated subject {}: {}/{} attended",
            id, subject.attended_classes, subject.total_classes
        );

        self.persist().await?;
        Ok(subject)
    }

    pub async fn delete_subject(&mut self, id: SubjectId) -> ServiceResult<Subject> {
        self.roll_over();
        let removed = self.ledger.delete_subject(id).map_err(|e| {
            warn!("Delete of subject {} rejected: {}", id, e);
            e
        })?;
        info!("Deleted subject {} for {}", id, self.user.student_id);

        self.persist().await?;
        Ok(removed)
    }

    pub async fn mark_attendance(
        &mut self,
        id: SubjectId,
        is_present: bool,
    ) -> ServiceResult<Subject> {
        let today = self.clock.today();
        self.roll_over();
        let subject = self.ledger.mark_attendance(id, is_present, today).map_err(|e| {
            warn!("Marking subject {} on {} rejected: {}", id, today, e);
            e
        })?;
        info!(
            "Marked subject {} {} on {}",
            id,
            if is_present { "present" } else { "absent" },
            today
        );

        self.persist().await?;
        Ok(subject)
    }

    /// End the session. Stored data stays behind for the next login.
    pub fn close(self) -> User {
        info!("Closed attendance for {}", self.user.student_id);
        self.user
    }

    fn roll_over(&mut self) {
        let today = self.clock.today();
        if self.ledger.roll_over(today) {
            debug!("New day {}, cleared daily marks", today);
        }
    }

    /// Marks go first: if the ledger write then fails, a reopened session
    /// still refuses a second mark today instead of counting the class twice.
    async fn persist(&self) -> ServiceResult<()> {
        let student_id = &self.user.student_id;
        self.daily_mark_repository
            .store(student_id, self.ledger.daily_marks())
            .await?;
        self.ledger_repository
            .store(student_id, self.ledger.to_record())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attendance::ForwardPrediction;
    use crate::domain::clock::FixedClock;
    use crate::domain::error::ServiceError;
    use crate::storage::{DbConnection, MemoryConnection};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use shared::AttendanceStatus;
    use std::sync::{Mutex, PoisonError};

    /// Store whose writes fail for keys starting with a chosen prefix
    #[derive(Clone, Default)]
    struct FailingWrites {
        inner: MemoryConnection,
        failing_prefix: Arc<Mutex<Option<&'static str>>>,
    }

    impl FailingWrites {
        fn fail_writes_to(&self, prefix: &'static str) {
            *self.failing_prefix.lock().unwrap_or_else(PoisonError::into_inner) = Some(prefix);
        }
    }

    #[async_trait]
    impl KeyValueStorage for FailingWrites {
        async fn get_value(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.inner.get_value(key).await
        }

        async fn put_value(&self, key: &str, value: &str) -> anyhow::Result<()> {
            let prefix = *self.failing_prefix.lock().unwrap_or_else(PoisonError::into_inner);
            if prefix.is_some_and(|p| key.starts_with(p)) {
                anyhow::bail!("disk full");
            }
            self.inner.put_value(key, value).await
        }

        async fn delete_value(&self, key: &str) -> anyhow::Result<bool> {
            self.inner.delete_value(key).await
        }

        async fn list_keys(&self) -> anyhow::Result<Vec<String>> {
            self.inner.list_keys().await
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn student() -> User {
        User {
            student_id: "S1".to_string(),
            name: "Kabir".to_string(),
            email: "kabir@example.edu".to_string(),
            password: "pw".to_string(),
            created_at: FixedClock::at_date(day(1)).now(),
        }
    }

    fn create_command(name: &str, planned: u32) -> CreateSubjectCommand {
        CreateSubjectCommand {
            name: name.to_string(),
            code: "PH201".to_string(),
            credits: 3,
            total_classes_planned: planned,
        }
    }

    async fn setup_test() -> (AttendanceService<MemoryConnection>, MemoryConnection, FixedClock) {
        let store = MemoryConnection::new();
        let clock = FixedClock::at_date(day(6));
        let service = AttendanceService::open(store.clone(), Arc::new(clock.clone()), student())
            .await
            .unwrap();
        (service, store, clock)
    }

    #[tokio::test]
    async fn test_open_empty() {
        let (service, store, _) = setup_test().await;
        assert!(service.subjects().is_empty());
        assert_eq!(service.stats(), AggregateStats::default());
        // Opening alone writes nothing
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutations_are_persisted_before_returning() {
        let (mut service, store, clock) = setup_test().await;

        let subject = service.create_subject(create_command("Quantum", 0)).await.unwrap();
        assert!(store.get_value("attendance_S1").await.unwrap().is_some());

        service.mark_attendance(subject.id, true).await.unwrap();

        let reopened = AttendanceService::open(store.clone(), Arc::new(clock.clone()), student())
            .await
            .unwrap();
        assert_eq!(reopened.subjects(), service.subjects());
        assert!(reopened.is_marked_today(subject.id));
    }

    #[tokio::test]
    async fn test_daily_guard_across_days() {
        let (mut service, store, clock) = setup_test().await;
        let id = service.create_subject(create_command("Optics", 0)).await.unwrap().id;

        service.mark_attendance(id, true).await.unwrap();
        let err = service.mark_attendance(id, true).await.unwrap_err();
        assert!(matches!(err, ServiceError::Ledger(LedgerError::AlreadyMarkedToday(_))));
        assert_eq!(err.to_string(), "Attendance already marked for today!");

        clock.advance_days(1);
        assert!(!service.is_marked_today(id));
        let subject = service.mark_attendance(id, false).await.unwrap();
        assert_eq!((subject.total_classes, subject.attended_classes), (2, 1));

        // A session opened on the following day starts with no marks
        clock.advance_days(1);
        let reopened = AttendanceService::open(store, Arc::new(clock.clone()), student())
            .await
            .unwrap();
        assert!(!reopened.is_marked_today(id));
        assert!(reopened.ledger().daily_marks().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_calls_persist_nothing() {
        let (mut service, store, _) = setup_test().await;
        let id = service.create_subject(create_command("Thermo", 1)).await.unwrap().id;
        service.mark_attendance(id, true).await.unwrap();
        let before = store.get_value("attendance_S1").await.unwrap();

        assert!(service.mark_attendance(id, true).await.is_err());
        assert!(service.delete_subject(SubjectId(1)).await.is_err());
        assert!(service.mark_attendance(SubjectId(1), true).await.is_err());

        assert_eq!(store.get_value("attendance_S1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_plan_guard() {
        let (mut service, _, clock) = setup_test().await;
        let id = service.create_subject(create_command("Mechanics", 2)).await.unwrap().id;

        service.mark_attendance(id, true).await.unwrap();
        clock.advance_days(1);
        service.mark_attendance(id, false).await.unwrap();
        clock.advance_days(1);

        let err = service.mark_attendance(id, true).await.unwrap_err();
        assert_eq!(err.to_string(), "You've reached the planned number of classes (2)!");
        assert!(!service.is_marked_today(id));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (mut service, store, _) = setup_test().await;
        let id = service.create_subject(create_command("Acoustics", 0)).await.unwrap().id;
        service.mark_attendance(id, true).await.unwrap();

        let command = UpdateSubjectCommand {
            name: "Acoustics II".to_string(),
            code: "PH202".to_string(),
            credits: 2,
            total_classes_planned: 30,
            total_classes: 8,
            attended_classes: 12,
        };
        let subject = service.update_subject(id, command).await.unwrap();
        assert_eq!(subject.attended_classes, 8);

        let overview = service.summary(id).unwrap();
        assert_eq!(overview.derived.status, AttendanceStatus::Safe);
        assert_eq!(overview.prediction, ForwardPrediction::CanMiss(2));

        service.delete_subject(id).await.unwrap();
        assert!(!service.is_marked_today(id));
        assert!(service.summaries().is_empty());

        let err = service.delete_subject(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Ledger(LedgerError::NotFound(_))));

        let stored = store.get_value("todayMarked_S1").await.unwrap().unwrap();
        assert!(!stored.contains(&id.to_string()));
    }

    #[tokio::test]
    async fn test_open_ignores_unreadable_daily_marks() {
        let store = MemoryConnection::new();
        store
            .put_value("todayMarked_S1", r#"{"1700000000000":true}"#)
            .await
            .unwrap();
        let clock = FixedClock::at_date(day(6));

        let mut service = AttendanceService::open(store.clone(), Arc::new(clock), student())
            .await
            .unwrap();
        assert!(service.ledger().daily_marks().is_empty());

        let id = service.create_subject(create_command("Fluids", 0)).await.unwrap().id;
        service.mark_attendance(id, true).await.unwrap();
        assert!(service.is_marked_today(id));
    }

    #[tokio::test]
    async fn test_failed_marks_write_keeps_change_in_memory() {
        let store = FailingWrites::default();
        let clock = FixedClock::at_date(day(6));
        let mut service = AttendanceService::open(store.clone(), Arc::new(clock), student())
            .await
            .unwrap();
        let id = service.create_subject(create_command("Plasma", 0)).await.unwrap().id;
        let stored_ledger = store.get_value("attendance_S1").await.unwrap();

        store.fail_writes_to("todayMarked_");
        let err = service.mark_attendance(id, true).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        assert!(!err.is_user_facing());

        // The session keeps the mark
        let subject = service.ledger().get(id).unwrap();
        assert_eq!((subject.total_classes, subject.attended_classes), (1, 1));
        assert!(service.is_marked_today(id));

        // The ledger was not written after the marks failed
        assert_eq!(store.get_value("attendance_S1").await.unwrap(), stored_ledger);
    }

    #[tokio::test]
    async fn test_failed_ledger_write_cannot_double_count() {
        let store = FailingWrites::default();
        let clock = FixedClock::at_date(day(6));
        let mut service = AttendanceService::open(store.clone(), Arc::new(clock.clone()), student())
            .await
            .unwrap();
        let id = service.create_subject(create_command("Optics II", 0)).await.unwrap().id;

        store.fail_writes_to("attendance_");
        let err = service.mark_attendance(id, true).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        assert_eq!(service.ledger().get(id).unwrap().total_classes, 1);

        // Reopened the same day: the stored ledger lacks the class, but the
        // stored mark still blocks a second attempt
        let mut reopened = AttendanceService::open(store.inner.clone(), Arc::new(clock), student())
            .await
            .unwrap();
        assert_eq!(reopened.ledger().get(id).unwrap().total_classes, 0);
        assert!(reopened.is_marked_today(id));
        let err = reopened.mark_attendance(id, true).await.unwrap_err();
        assert!(matches!(err, ServiceError::Ledger(LedgerError::AlreadyMarkedToday(_))));
    }

    #[tokio::test]
    async fn test_sqlite_backed_session() {
        let db = DbConnection::in_memory().await.unwrap();
        let clock = FixedClock::at_date(day(10));

        let mut service = AttendanceService::open(db.clone(), Arc::new(clock.clone()), student())
            .await
            .unwrap();
        let a = service.create_subject(create_command("Relativity", 0)).await.unwrap().id;
        let b = service.create_subject(create_command("Astro", 0)).await.unwrap().id;
        assert!(a < b);
        service.mark_attendance(a, true).await.unwrap();
        service.mark_attendance(b, false).await.unwrap();

        let user = service.close();
        let reopened = AttendanceService::open(db, Arc::new(clock), user).await.unwrap();
        let stats = reopened.stats();
        assert_eq!(stats.total_subjects, 2);
        assert_eq!(stats.avg_attendance, 50.0);
        assert_eq!(stats.safe_count, 1);
        assert_eq!(stats.risk_count, 1);
    }
}
