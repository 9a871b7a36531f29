//! The schedule aggregate: construction, attachment and accessors.
//!
//! Query operations live in `query`, point-in-time checks in `containment`,
//! and the set algebra they share in `merge`.

mod containment;
mod merge;
mod query;

use chrono::{DateTime, TimeDelta, Utc};

use cadence_core::config::ExpansionLimits;
use cadence_core::error::CoreError;
use cadence_rule::{Rule, RuleHead};

use crate::error::ScheduleResult;

/// Optional parameters fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// How long each occurrence lasts for containment queries.
    pub duration: Option<TimeDelta>,
    /// No occurrence is valid strictly after this instant.
    pub end_time: Option<DateTime<Utc>>,
    pub limits: ExpansionLimits,
}

impl ScheduleOptions {
    #[must_use]
    pub const fn with_duration(mut self, duration: TimeDelta) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub const fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub const fn with_limits(mut self, limits: ExpansionLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// A recurring schedule: anchor, rules, exceptions and explicit dates.
///
/// Anchor, duration and end time are fixed at construction. Rules and dates
/// are appended afterwards and never removed; insertion order is kept for
/// serialization but does not affect query results.
#[derive(Debug, Clone)]
pub struct Schedule {
    anchor: DateTime<Utc>,
    duration: Option<TimeDelta>,
    end_time: Option<DateTime<Utc>>,
    limits: ExpansionLimits,
    recurrence_heads: Vec<RuleHead>,
    exception_heads: Vec<RuleHead>,
    recurrence_dates: Vec<DateTime<Utc>>,
    exception_dates: Vec<DateTime<Utc>>,
}

impl Schedule {
    /// ## Summary
    /// Creates a schedule anchored at `anchor`.
    ///
    /// ## Errors
    /// Returns `InvalidDuration` for a negative duration and `InvalidEndTime`
    /// for an end time before the anchor.
    pub fn new(anchor: DateTime<Utc>, options: ScheduleOptions) -> ScheduleResult<Self> {
        if let Some(duration) = options.duration
            && duration < TimeDelta::zero()
        {
            return Err(CoreError::InvalidDuration(format!(
                "duration must not be negative, got {} seconds",
                duration.num_seconds()
            ))
            .into());
        }

        if let Some(end_time) = options.end_time
            && end_time < anchor
        {
            return Err(CoreError::InvalidEndTime(format!(
                "end time {end_time} precedes start {anchor}"
            ))
            .into());
        }

        tracing::debug!(%anchor, duration = ?options.duration, end_time = ?options.end_time, "Creating schedule");

        Ok(Self {
            anchor,
            duration: options.duration,
            end_time: options.end_time,
            limits: options.limits,
            recurrence_heads: Vec::new(),
            exception_heads: Vec::new(),
            recurrence_dates: Vec::new(),
            exception_dates: Vec::new(),
        })
    }

    /// Creates a schedule with default options.
    ///
    /// Infallible: without a duration or end time there is nothing to reject.
    #[must_use]
    pub const fn starting(anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            duration: None,
            end_time: None,
            limits: ExpansionLimits {
                max_instances: cadence_core::config::DEFAULT_MAX_INSTANCES,
            },
            recurrence_heads: Vec::new(),
            exception_heads: Vec::new(),
            recurrence_dates: Vec::new(),
            exception_dates: Vec::new(),
        }
    }

    fn bind(&self, rule: Rule) -> ScheduleResult<RuleHead> {
        Ok(RuleHead::new(rule, self.anchor, self.end_time, self.limits)?)
    }

    /// ## Summary
    /// Attaches a recurrence rule.
    ///
    /// ## Errors
    /// Returns `InvalidRule` if the rule cannot be bound to the anchor; the
    /// schedule is left unchanged.
    pub fn add_recurrence_rule(&mut self, rule: Rule) -> ScheduleResult<()> {
        let head = self.bind(rule)?;
        tracing::debug!(rule = %head.rule(), "Adding recurrence rule");
        self.recurrence_heads.push(head);
        Ok(())
    }

    /// ## Summary
    /// Attaches an exception rule.
    ///
    /// ## Errors
    /// Returns `InvalidRule` if the rule cannot be bound to the anchor; the
    /// schedule is left unchanged.
    pub fn add_exception_rule(&mut self, rule: Rule) -> ScheduleResult<()> {
        let head = self.bind(rule)?;
        tracing::debug!(rule = %head.rule(), "Adding exception rule");
        self.exception_heads.push(head);
        Ok(())
    }

    /// Adds an explicitly included instant. An absent date is ignored.
    pub fn add_recurrence_date(&mut self, date: impl Into<Option<DateTime<Utc>>>) {
        match date.into() {
            Some(date) => self.recurrence_dates.push(date),
            None => tracing::debug!("Ignoring absent recurrence date"),
        }
    }

    /// Adds an explicitly excluded instant. An absent date is ignored.
    pub fn add_exception_date(&mut self, date: impl Into<Option<DateTime<Utc>>>) {
        match date.into() {
            Some(date) => self.exception_dates.push(date),
            None => tracing::debug!("Ignoring absent exception date"),
        }
    }

    #[must_use]
    pub const fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    #[must_use]
    pub const fn duration(&self) -> Option<TimeDelta> {
        self.duration
    }

    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    #[must_use]
    pub const fn limits(&self) -> ExpansionLimits {
        self.limits
    }

    /// Recurrence rules in attachment order.
    pub fn recurrence_rules(&self) -> impl Iterator<Item = &Rule> {
        self.recurrence_heads.iter().map(RuleHead::rule)
    }

    /// Exception rules in attachment order.
    pub fn exception_rules(&self) -> impl Iterator<Item = &Rule> {
        self.exception_heads.iter().map(RuleHead::rule)
    }

    /// Included instants as added, duplicates kept.
    #[must_use]
    pub fn recurrence_dates(&self) -> &[DateTime<Utc>] {
        &self.recurrence_dates
    }

    /// Excluded instants as added, duplicates kept.
    #[must_use]
    pub fn exception_dates(&self) -> &[DateTime<Utc>] {
        &self.exception_dates
    }

    /// Returns whether enumerating every occurrence terminates: the schedule
    /// has an end time, or every recurrence rule has a count or until.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        self.end_time.is_some() || self.recurrence_heads.iter().all(RuleHead::is_bounded)
    }

    /// Returns whether `instant` lies within the anchor and end time.
    fn in_bounds(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.anchor && self.end_time.is_none_or(|end| instant <= end)
    }
}
