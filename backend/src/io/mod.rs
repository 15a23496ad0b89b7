//! # IO Module
//!
//! The boundary between the UI and the domain. Requests arrive as `shared`
//! DTOs, are validated and mapped to domain commands, and results are mapped
//! back to DTOs with their display text.
//!
//! - **dashboard_api**: the single entry point the UI drives
//! - **mappers**: DTO <-> domain conversions, also used by the repositories
//! - **formatting**: status labels, guidance hints and percentage text

pub mod dashboard_api;
pub mod formatting;
pub mod mappers;

pub use dashboard_api::DashboardApi;
