//! Point-in-time checks.
//!
//! [`Schedule::occurring_at`] asks whether an occurrence is in progress at an
//! instant, taking the duration into account. [`Schedule::occurs_at`] asks
//! whether the instant is itself an occurrence.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use cadence_core::calendar::DayBoundary;

use super::Schedule;
use crate::error::ScheduleResult;

impl Schedule {
    /// ## Summary
    /// Returns whether an occurrence is in progress at `time`.
    ///
    /// In order:
    /// 1. Before the anchor: false, without evaluating any rule.
    /// 2. An excluded date equal to `time`: false.
    /// 3. An included date equal to `time`: true.
    /// 4. An exception-rule instant `e` with `e <= time <= e + duration`: false.
    /// 5. Otherwise true if some occurrence `o` (recurrence rules and included
    ///    dates, after exclusions) has `o <= time <= o + duration`.
    ///
    /// Duration defaults to zero. An excluded date only blocks the exact
    /// instant in step 2; in step 5 it is no longer an occurrence, so its
    /// duration window is not covered either. Step 4 needs no expansion of
    /// the exception rules, so it is not subject to the expansion limit.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if a recurrence rule exceeds the expansion
    /// limit.
    #[tracing::instrument(skip(self))]
    pub fn occurring_at(&self, time: DateTime<Utc>) -> ScheduleResult<bool> {
        if time < self.anchor {
            return Ok(false);
        }
        if self.exception_dates.contains(&time) {
            return Ok(false);
        }
        if self.recurrence_dates.contains(&time) && self.in_bounds(time) {
            return Ok(true);
        }

        let duration = self.duration.unwrap_or_else(TimeDelta::zero);
        let window_start = time
            .checked_sub_signed(duration)
            .map_or(self.anchor, |start| start.max(self.anchor));

        for head in &self.exception_heads {
            if head.occurs_between(window_start, time) {
                tracing::trace!(rule = %head.rule(), "Exception rule covers instant");
                return Ok(false);
            }
        }

        self.occurs_between(window_start, time)
    }

    /// ## Summary
    /// Returns whether `date` is itself an occurrence instant, i.e. the last
    /// entry of [`Schedule::occurrences`]`(date)`. False past the end time.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if a rule exceeds the expansion limit.
    #[tracing::instrument(skip(self))]
    pub fn occurs_at(&self, date: DateTime<Utc>) -> ScheduleResult<bool> {
        if self.end_time.is_some_and(|end| date > end) {
            return Ok(false);
        }
        // Only instants <= date are candidates, so `date` is the last one iff
        // it is present; the single-instant range answers that directly.
        Ok(self.occurrences_between(date, date)?.last() == Some(&date))
    }

    /// ## Summary
    /// Returns whether any occurrence falls on the UTC calendar day `day`.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if a rule exceeds the expansion limit.
    pub fn occurs_on(&self, day: NaiveDate) -> ScheduleResult<bool> {
        self.occurs_on_in(day, &Utc)
    }

    /// ## Summary
    /// Returns whether any occurrence falls on `day`, with day boundaries
    /// taken from `frame`. False if the day starts after the end time.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if a rule exceeds the expansion limit.
    pub fn occurs_on_in(&self, day: NaiveDate, frame: &impl DayBoundary) -> ScheduleResult<bool> {
        let (Some(start), Some(end)) = (frame.start_of_day(day), frame.end_of_day(day)) else {
            tracing::debug!(%day, "Day is not representable in the given frame");
            return Ok(false);
        };
        if self.end_time.is_some_and(|end_time| start > end_time) {
            return Ok(false);
        }
        self.occurs_between(start, end)
    }
}
