//! Enumeration queries: bounded, ranged and prefix.

use chrono::{DateTime, Utc};

use cadence_core::error::CoreError;
use cadence_rule::RuleHead;

use super::Schedule;
use crate::error::ScheduleResult;

impl Schedule {
    /// Clamps `date` to the end time, if any.
    fn clamp_to_end(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        self.end_time.map_or(date, |end| date.min(end))
    }

    /// ## Summary
    /// Returns every occurrence of a terminating schedule.
    ///
    /// ## Errors
    /// Returns `UnboundedSchedule` if [`Schedule::is_terminating`] is false
    /// rather than enumerating forever, and `TooManyOccurrences` if a rule
    /// exceeds the expansion limit.
    #[tracing::instrument(skip(self))]
    pub fn all_occurrences(&self) -> ScheduleResult<Vec<DateTime<Utc>>> {
        if !self.is_terminating() {
            return Err(CoreError::UnboundedSchedule.into());
        }
        Ok(self
            .merge(RuleHead::all_occurrences, |_| true)?
            .into_iter()
            .collect())
    }

    /// ## Summary
    /// Returns occurrences at or before `end_date`, which is first clamped to
    /// the end time.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if a rule exceeds the expansion limit.
    #[tracing::instrument(skip(self))]
    pub fn occurrences(&self, end_date: DateTime<Utc>) -> ScheduleResult<Vec<DateTime<Utc>>> {
        let end = self.clamp_to_end(end_date);
        if end < self.anchor {
            return Ok(Vec::new());
        }
        Ok(self
            .merge(|head| head.upto(end), |date| date <= end)?
            .into_iter()
            .collect())
    }

    /// ## Summary
    /// Returns the first `n` occurrences.
    ///
    /// Each recurrence rule contributes its own first `n` candidates; the
    /// union is filtered by exclusions and only then cut to `n`. A rule cannot
    /// know how many of its candidates will be excluded, so when exclusions
    /// remove candidates the result may hold fewer than `n` occurrences even
    /// though the schedule has more. This is a known approximation, not a
    /// guarantee of `n` results.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if `n` exceeds the expansion limit and a
    /// rule produces that many.
    #[tracing::instrument(skip(self))]
    pub fn first(&self, n: usize) -> ScheduleResult<Vec<DateTime<Utc>>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .merge(|head| head.first(n), |_| true)?
            .into_iter()
            .take(n)
            .collect())
    }

    /// ## Summary
    /// Returns occurrences in `[begin, end]`, inclusive at both ends, with
    /// `end` clamped to the end time. Empty when nothing qualifies.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if a rule exceeds the expansion limit.
    #[tracing::instrument(skip(self))]
    pub fn occurrences_between(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ScheduleResult<Vec<DateTime<Utc>>> {
        let end = self.clamp_to_end(end);
        if end < begin || end < self.anchor {
            return Ok(Vec::new());
        }
        Ok(self
            .merge(
                |head| head.between(begin, end),
                |date| begin <= date && date <= end,
            )?
            .into_iter()
            .collect())
    }

    /// ## Summary
    /// Returns whether any occurrence falls in `[begin, end]`.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if a rule exceeds the expansion limit.
    pub fn occurs_between(&self, begin: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleResult<bool> {
        Ok(!self.occurrences_between(begin, end)?.is_empty())
    }

    /// ## Summary
    /// Returns up to `n` occurrences strictly after `from`.
    ///
    /// Shares the approximation documented on [`Schedule::first`]: heavy
    /// exclusion can leave fewer than `n` results.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if `n` exceeds the expansion limit and a
    /// rule produces that many.
    #[tracing::instrument(skip(self))]
    pub fn next_occurrences(
        &self,
        n: usize,
        from: DateTime<Utc>,
    ) -> ScheduleResult<Vec<DateTime<Utc>>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .merge(|head| head.after(from, n), |date| date > from)?
            .into_iter()
            .take(n)
            .collect())
    }

    /// ## Summary
    /// Returns the first occurrence strictly after `from`, if any.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if a rule exceeds the expansion limit.
    pub fn next_occurrence(&self, from: DateTime<Utc>) -> ScheduleResult<Option<DateTime<Utc>>> {
        Ok(self.next_occurrences(1, from)?.into_iter().next())
    }

    /// ## Summary
    /// Returns every occurrence at or after `from` of a terminating schedule.
    ///
    /// ## Errors
    /// Returns `UnboundedSchedule` under the same condition as
    /// [`Schedule::all_occurrences`], and `TooManyOccurrences` if a rule
    /// exceeds the expansion limit.
    #[tracing::instrument(skip(self))]
    pub fn remaining_occurrences(&self, from: DateTime<Utc>) -> ScheduleResult<Vec<DateTime<Utc>>> {
        if !self.is_terminating() {
            return Err(CoreError::UnboundedSchedule.into());
        }
        Ok(self
            .merge(
                |head| {
                    Ok(head
                        .all_occurrences()?
                        .into_iter()
                        .filter(|dt| *dt >= from)
                        .collect())
                },
                |date| date >= from,
            )?
            .into_iter()
            .collect())
    }
}
