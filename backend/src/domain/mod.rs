//! # Domain Module
//!
//! Contains all business logic for the attendance tracker.
//!
//! The core is the synchronous [`ledger::AttendanceLedger`] and the pure
//! arithmetic in [`attendance`]. Services wrap them with persistence and a
//! [`clock::Clock`]; they never format text for display.
//!
//! ## Module Organization
//!
//! - **ledger**: subject CRUD and the two marking guards (daily, plan)
//! - **attendance**: percentage, status, classes needed, forward prediction, stats
//! - **daily_marks**: the per-day "already marked" table
//! - **account_service**: registration, login and the stored session
//! - **attendance_service**: one student's ledger, persisted after each change
//! - **validation**: input rules the io layer checks before calling a service
//!
//! ## Business Rules
//!
//! - `attended_classes <= total_classes` for every subject
//! - A subject is marked at most once per calendar day
//! - A subject with a plan cannot be marked once the plan's total is reached
//! - Manual updates bypass both guards but are still clamped

pub mod account_service;
pub mod attendance;
pub mod attendance_service;
pub mod clock;
pub mod commands;
pub mod daily_marks;
pub mod error;
pub mod ledger;
pub mod models;
pub mod validation;

pub use account_service::AccountService;
pub use attendance::{AggregateStats, DerivedAttendance, ForwardPrediction, SubjectOverview};
pub use attendance_service::AttendanceService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AccountError, ServiceError, ServiceResult};
pub use ledger::{AttendanceLedger, LedgerError, LedgerRecord};
pub use models::{Subject, SubjectId, User};
pub use validation::ValidationError;
