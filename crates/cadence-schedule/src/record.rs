//! Structured record form of a schedule, for serialization.
//!
//! The record mirrors the schedule's construction inputs. Rebuilding a
//! schedule from a record and exporting it again yields an equal record.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use cadence_core::config::ExpansionLimits;
use cadence_core::error::CoreError;
use cadence_rule::Rule;

use crate::error::ScheduleResult;
use crate::schedule::{Schedule, ScheduleOptions};

/// Serializable description of a [`Schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub start_date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rrules: Vec<Rule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exrules: Vec<Rule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rdates: Vec<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exdates: Vec<DateTime<Utc>>,

    /// Occurrence duration in whole seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl Schedule {
    /// Exports the schedule's construction inputs, in insertion order.
    #[must_use]
    pub fn to_record(&self) -> ScheduleRecord {
        ScheduleRecord {
            start_date: self.anchor(),
            rrules: self.recurrence_rules().cloned().collect(),
            exrules: self.exception_rules().cloned().collect(),
            rdates: self.recurrence_dates().to_vec(),
            exdates: self.exception_dates().to_vec(),
            duration: self.duration().map(|d| d.num_seconds()),
            end_time: self.end_time(),
        }
    }

    /// ## Summary
    /// Rebuilds a schedule from a record.
    ///
    /// ## Errors
    /// Returns the construction error (`InvalidDuration`, `InvalidEndTime`)
    /// or the first `InvalidRule` encountered.
    #[tracing::instrument(skip_all, fields(start = %record.start_date))]
    pub fn from_record(record: &ScheduleRecord, limits: ExpansionLimits) -> ScheduleResult<Self> {
        let mut options = ScheduleOptions::default().with_limits(limits);
        if let Some(seconds) = record.duration {
            let duration = TimeDelta::try_seconds(seconds).ok_or_else(|| {
                CoreError::InvalidDuration(format!("{seconds}s is out of range"))
            })?;
            options = options.with_duration(duration);
        }
        if let Some(end_time) = record.end_time {
            options = options.with_end_time(end_time);
        }

        let mut schedule = Self::new(record.start_date, options)?;
        for rule in &record.rrules {
            schedule.add_recurrence_rule(rule.clone())?;
        }
        for rule in &record.exrules {
            schedule.add_exception_rule(rule.clone())?;
        }
        for &date in &record.rdates {
            schedule.add_recurrence_date(date);
        }
        for &date in &record.exdates {
            schedule.add_exception_date(date);
        }
        Ok(schedule)
    }

    /// ## Summary
    /// Serializes the schedule's record as JSON.
    ///
    /// ## Errors
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> ScheduleResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    /// ## Summary
    /// Parses a JSON record and rebuilds the schedule.
    ///
    /// ## Errors
    /// Returns `Serialization` for malformed JSON or unknown rule types, and
    /// the errors of [`Schedule::from_record`].
    pub fn from_json(json: &str, limits: ExpansionLimits) -> ScheduleResult<Self> {
        let record: ScheduleRecord = serde_json::from_str(json)?;
        Self::from_record(&record, limits)
    }
}
