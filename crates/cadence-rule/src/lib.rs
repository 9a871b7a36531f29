//! Recurrence rules and the occurrence heads that enumerate them.
//!
//! A [`Rule`] is an immutable pattern ("every 2nd Tuesday, 10 times"). A
//! [`RuleHead`] binds a rule to a schedule's anchor and optional hard end and
//! answers bounded, ranged and prefix occurrence queries over it.

pub mod error;
pub mod head;
pub mod rule;

pub use error::{RuleError, RuleResult};
pub use head::RuleHead;
pub use rule::{Frequency, Pattern, Rule, WeekdayNum};
