//! Occurrence-set algebra over recurrence rules.
//!
//! A [`Schedule`] combines an anchor, recurrence rules, exception rules and
//! explicit included/excluded instants into one ordered, duplicate-free
//! occurrence set, and answers point, range and prefix queries over it.
//!
//! ## Concurrency
//! Queries take `&self` and allocate their own results, so a schedule can be
//! queried from several threads at once. Attaching rules or dates takes
//! `&mut self`; sharing a schedule that is still being built needs external
//! synchronisation.

pub mod error;
pub mod ical;
pub mod record;
pub mod schedule;
pub mod text;

pub use error::{ScheduleError, ScheduleResult};
pub use record::ScheduleRecord;
pub use schedule::{Schedule, ScheduleOptions};
