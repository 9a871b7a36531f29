//! Shared foundations for the cadence recurrence engine.
//!
//! Holds the error taxonomy every crate reports through, the runtime
//! settings, and the calendar-day boundary collaborator used by day queries.

pub mod calendar;
pub mod config;
pub mod error;
