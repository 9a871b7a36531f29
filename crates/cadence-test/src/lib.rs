//! Cadence - integration test support.
//!
//! Re-exports the workspace crates under one root and provides fixtures
//! shared by the scenario suites in `tests/integration`.

pub use cadence_core as core;
pub use cadence_rule as rule;
pub use cadence_schedule as schedule;

pub mod fixtures;
