//! Occurrence-set merge shared by every query.
//!
//! Recurrence heads and included dates are unioned into a candidate set.
//! Excluded dates are then removed, and each exception head walks the
//! remaining candidates once, dropping the ones it produces. Exception heads
//! never materialise their own instants, so a fine-grained exception rule
//! does not count against the expansion limit. Exclusion is the last step, so
//! it wins over any inclusion.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use cadence_core::error::CoreResult;
use cadence_rule::RuleHead;

use super::Schedule;

impl Schedule {
    /// ## Summary
    /// Merges recurrence candidates and removes exclusions.
    ///
    /// `produce` is asked once per recurrence head. Included dates are kept
    /// when they fall within the schedule's bounds and satisfy `in_window`.
    ///
    /// ## Errors
    /// Propagates errors from `produce`.
    pub(super) fn merge<P, W>(&self, produce: P, in_window: W) -> CoreResult<BTreeSet<DateTime<Utc>>>
    where
        P: Fn(&RuleHead) -> CoreResult<Vec<DateTime<Utc>>>,
        W: Fn(DateTime<Utc>) -> bool,
    {
        let mut included = BTreeSet::new();
        for head in &self.recurrence_heads {
            included.extend(produce(head)?);
        }
        included.extend(
            self.recurrence_dates
                .iter()
                .copied()
                .filter(|date| self.in_bounds(*date) && in_window(*date)),
        );

        self.exclude(&mut included);
        Ok(included)
    }

    /// Removes excluded dates and exception-head instants from `candidates`.
    fn exclude(&self, candidates: &mut BTreeSet<DateTime<Utc>>) {
        let before = candidates.len();
        for date in &self.exception_dates {
            candidates.remove(date);
        }
        for head in &self.exception_heads {
            if candidates.is_empty() {
                break;
            }
            for hit in head.matching(candidates) {
                candidates.remove(&hit);
            }
        }

        tracing::trace!(
            candidates = before,
            removed = before - candidates.len(),
            "Applied exclusions"
        );
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use cadence_rule::Rule;

    use super::*;

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn union_is_sorted_and_deduplicated() {
        let mut schedule = Schedule::starting(at(1));
        schedule.add_recurrence_rule(Rule::daily().with_count(3)).expect("valid rule");
        schedule.add_recurrence_rule(Rule::daily().with_interval(2).with_count(3)).expect("valid rule");
        schedule.add_recurrence_date(at(2));
        schedule.add_recurrence_date(at(9));

        let merged = schedule
            .merge(RuleHead::all_occurrences, |_| true)
            .expect("bounded merge");
        let merged: Vec<_> = merged.into_iter().collect();

        assert_eq!(merged, vec![at(1), at(2), at(3), at(5), at(9)]);
    }

    #[test]
    fn exclusion_wins_over_inclusion() {
        let mut schedule = Schedule::starting(at(1));
        schedule.add_recurrence_rule(Rule::daily().with_count(5)).expect("valid rule");
        schedule.add_recurrence_date(at(3));
        schedule.add_exception_date(at(3));
        schedule.add_exception_rule(Rule::daily().with_interval(2)).expect("valid rule");

        let merged = schedule
            .merge(RuleHead::all_occurrences, |_| true)
            .expect("bounded merge");
        let merged: Vec<_> = merged.into_iter().collect();

        assert_eq!(merged, vec![at(2), at(4)]);
    }

    #[test]
    fn included_dates_respect_window_and_bounds() {
        let mut schedule = Schedule::starting(at(5));
        schedule.add_recurrence_date(at(1));
        schedule.add_recurrence_date(at(6));
        schedule.add_recurrence_date(at(20));

        let merged = schedule
            .merge(|_| Ok(Vec::new()), |date| date <= at(10))
            .expect("merge");
        let merged: Vec<_> = merged.into_iter().collect();

        assert_eq!(merged, vec![at(6)]);
    }
}
