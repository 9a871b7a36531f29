//! Rule heads: a rule bound to a schedule's anchor and hard end.
//!
//! Occurrences are generated with the `rrule` crate. A head never yields an
//! instant before its anchor or after its hard end, and each query
//! materialises at most [`ExpansionLimits::max_instances`] instants.
//!
//! `rrule` works in whole seconds. The anchor's sub-second part is added back
//! onto every generated instant, so a head anchored at `09:00:00.500` yields
//! `09:00:00.500` on each day it matches.

use std::collections::BTreeSet;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

use cadence_core::config::ExpansionLimits;
use cadence_core::error::{CoreError, CoreResult};

use crate::rule::{EXPANSION_TZ, Rule};

/// A [`Rule`] bound to an anchor and optional hard end.
#[derive(Debug, Clone)]
pub struct RuleHead {
    rule: Rule,
    anchor: DateTime<Utc>,
    hard_end: Option<DateTime<Utc>>,
    limits: ExpansionLimits,
    /// Sub-second part of the anchor, dropped by `rrule` and restored on output.
    subsec: TimeDelta,
    /// `None` when the rule provably yields nothing from this anchor.
    set: Option<rrule::RRuleSet>,
}

impl RuleHead {
    /// ## Summary
    /// Binds `rule` to `anchor` and `hard_end`, validating it against the anchor.
    ///
    /// A rule whose until precedes the anchor, or whose count is zero, yields
    /// an empty head rather than an error.
    ///
    /// ## Errors
    /// Returns `InvalidRule` if the rule's parts are inconsistent with its
    /// frequency or out of range (e.g. interval 0, BYWEEKNO on a monthly rule).
    pub fn new(
        rule: Rule,
        anchor: DateTime<Utc>,
        hard_end: Option<DateTime<Utc>>,
        limits: ExpansionLimits,
    ) -> CoreResult<Self> {
        let pattern = rule.pattern();
        if pattern.interval == 0 {
            return Err(CoreError::InvalidRule(format!("{rule}: interval must be at least 1")));
        }
        let empty = pattern.count == Some(0) || pattern.until.is_some_and(|until| until < anchor);

        let whole_seconds = anchor.trunc_subsecs(0);
        let set = if empty {
            tracing::debug!(rule = %rule, %anchor, "Rule yields no occurrences from anchor");
            None
        } else {
            let set = rule
                .to_rrule()?
                .build(whole_seconds.with_timezone(&EXPANSION_TZ))
                .map_err(|e| CoreError::InvalidRule(format!("{rule}: {e}")))?;
            Some(set)
        };

        Ok(Self {
            rule,
            anchor,
            hard_end,
            limits,
            subsec: anchor.signed_duration_since(whole_seconds),
            set,
        })
    }

    #[must_use]
    pub const fn rule(&self) -> &Rule {
        &self.rule
    }

    #[must_use]
    pub const fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    #[must_use]
    pub const fn hard_end(&self) -> Option<DateTime<Utc>> {
        self.hard_end
    }

    /// Returns whether enumerating every occurrence terminates: the rule has a
    /// count or until, or the head is capped by a hard end.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.rule.is_terminating() || self.hard_end.is_some()
    }

    /// Lazily yields the head's occurrences in order, within anchor, until
    /// and hard end.
    fn instants(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        let anchor = self.anchor;
        let subsec = self.subsec;
        let until = self.rule.pattern().until;
        let hard_end = self.hard_end;
        self.set
            .iter()
            .flat_map(IntoIterator::into_iter)
            .map(move |dt| dt.with_timezone(&Utc) + subsec)
            .skip_while(move |dt| *dt < anchor)
            .take_while(move |dt| until.is_none_or(|until| *dt <= until))
            .take_while(move |dt| hard_end.is_none_or(|end| *dt <= end))
    }

    /// Collects `iter`, failing once it exceeds the per-query cap.
    fn collect_capped(
        &self,
        iter: impl Iterator<Item = DateTime<Utc>>,
    ) -> CoreResult<Vec<DateTime<Utc>>> {
        let cap = self.limits.max_instances;
        let mut out = Vec::new();
        for dt in iter {
            if out.len() == cap {
                tracing::warn!(rule = %self.rule, cap, "Rule head exceeded expansion limit");
                return Err(CoreError::TooManyOccurrences(cap));
            }
            out.push(dt);
        }
        tracing::trace!(rule = %self.rule, count = out.len(), "Rule head expanded");
        Ok(out)
    }

    /// ## Summary
    /// Returns every occurrence of a bounded head.
    ///
    /// ## Errors
    /// Returns `UnboundedSchedule` if the head is not bounded, or
    /// `TooManyOccurrences` if it exceeds the expansion limit.
    pub fn all_occurrences(&self) -> CoreResult<Vec<DateTime<Utc>>> {
        if !self.is_bounded() {
            return Err(CoreError::UnboundedSchedule);
        }
        self.collect_capped(self.instants())
    }

    /// ## Summary
    /// Returns occurrences at or before `date`.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if the result exceeds the expansion limit.
    pub fn upto(&self, date: DateTime<Utc>) -> CoreResult<Vec<DateTime<Utc>>> {
        self.collect_capped(self.instants().take_while(move |dt| *dt <= date))
    }

    /// ## Summary
    /// Returns occurrences in `[begin, end]`; empty when none qualify.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if the result exceeds the expansion limit.
    pub fn between(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CoreResult<Vec<DateTime<Utc>>> {
        if end < begin {
            return Ok(Vec::new());
        }
        self.collect_capped(
            self.instants()
                .skip_while(move |dt| *dt < begin)
                .take_while(move |dt| *dt <= end),
        )
    }

    /// ## Summary
    /// Returns at most `n` leading occurrences; fewer if the rule ends early.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if `n` exceeds the expansion limit and the
    /// rule produces that many.
    pub fn first(&self, n: usize) -> CoreResult<Vec<DateTime<Utc>>> {
        self.collect_capped(self.instants().take(n))
    }

    /// ## Summary
    /// Returns at most `n` occurrences strictly after `from`.
    ///
    /// ## Errors
    /// Returns `TooManyOccurrences` if `n` exceeds the expansion limit and the
    /// rule produces that many.
    pub fn after(&self, from: DateTime<Utc>, n: usize) -> CoreResult<Vec<DateTime<Utc>>> {
        self.collect_capped(self.instants().skip_while(move |dt| *dt <= from).take(n))
    }

    /// Returns whether any occurrence falls in `[begin, end]`.
    ///
    /// Stops at the first match; nothing is collected, so the expansion limit
    /// does not apply.
    #[must_use]
    pub fn occurs_between(&self, begin: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        end >= begin
            && self
                .instants()
                .find(|dt| *dt >= begin)
                .is_some_and(|dt| dt <= end)
    }

    /// Returns the members of `candidates` this head produces.
    ///
    /// Walks the head once in step with the sorted candidates and stops past
    /// the last one. Only matches are kept, so a fine-grained rule checked
    /// against a few candidates never reaches the expansion limit.
    #[must_use]
    pub fn matching(&self, candidates: &BTreeSet<DateTime<Utc>>) -> Vec<DateTime<Utc>> {
        let (Some(&first), Some(&last)) = (candidates.first(), candidates.last()) else {
            return Vec::new();
        };

        let mut pending = candidates.iter().copied().peekable();
        let mut hits = Vec::new();
        for instant in self
            .instants()
            .skip_while(move |dt| *dt < first)
            .take_while(move |dt| *dt <= last)
        {
            while pending.next_if(|candidate| *candidate < instant).is_some() {}
            if pending.next_if_eq(&instant).is_some() {
                hits.push(instant);
            }
            if pending.peek().is_none() {
                break;
            }
        }
        hits
    }
}
