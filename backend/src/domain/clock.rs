//! Source of "now" and "today" for the domain layer.
//!
//! The daily attendance guard compares calendar dates, so services never read
//! the wall clock directly. Tests inject a [`FixedClock`] and roll the date
//! forward explicitly.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};

pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date as the student sees it
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

/// Wall-clock time in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock. Clones share the same instant, so a test can keep a
/// handle and advance the date under a running service.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Arc::new(RwLock::new(instant)),
        }
    }

    /// Clock fixed at noon UTC on the given date
    pub fn at_date(date: NaiveDate) -> Self {
        let midnight = date.and_time(NaiveTime::default()).and_utc();
        Self::new(midnight + Duration::hours(12))
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.write().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut instant = self.instant.write().unwrap_or_else(PoisonError::into_inner);
        *instant += by;
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.read().unwrap_or_else(PoisonError::into_inner)
    }

    // UTC date, so tests do not depend on the host timezone
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
