//! Invariants that hold for every schedule.

use proptest::prelude::*;

use cadence_test::schedule::Schedule;

use super::helpers::{
    HORIZON_DAYS, ScheduleInputs, inclusive_schedule_inputs, nine_am, schedule_inputs,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ranged_results_are_ordered_unique_and_in_range(
        inputs in schedule_inputs(),
        a in 0..HORIZON_DAYS,
        b in 0..HORIZON_DAYS,
    ) {
        let schedule = inputs.build();
        let (begin, end) = (nine_am(a), nine_am(b));
        let found = schedule.occurrences_between(begin, end).expect("bounded rules");

        prop_assert!(found.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(found.iter().all(|dt| begin <= *dt && *dt <= end));
        prop_assert!(found.iter().all(|dt| *dt >= schedule.anchor()));
    }

    #[test]
    fn excluded_dates_never_appear(inputs in schedule_inputs(), n in 0..30_usize) {
        let schedule = inputs.build();
        let excluded = schedule.exception_dates().to_vec();

        let all = schedule.all_occurrences().expect("bounded rules");
        let first = schedule.first(n).expect("bounded rules");
        let ranged = schedule
            .occurrences_between(nine_am(0), nine_am(HORIZON_DAYS))
            .expect("bounded rules");

        for date in &excluded {
            prop_assert!(!all.contains(date));
            prop_assert!(!first.contains(date));
            prop_assert!(!ranged.contains(date));
            prop_assert!(!schedule.occurs_at(*date).expect("bounded rules"));
        }
    }

    #[test]
    fn exclusions_only_remove(inputs in schedule_inputs()) {
        let all = inputs.build().all_occurrences().expect("bounded rules");
        let unexcluded = ScheduleInputs {
            exception_rules: Vec::new(),
            exdates: Vec::new(),
            ..inputs
        }
        .build()
        .all_occurrences()
        .expect("bounded rules");

        prop_assert!(all.iter().all(|dt| unexcluded.contains(dt)));
    }

    #[test]
    fn anchor_fraction_carries_to_every_occurrence(inputs in schedule_inputs()) {
        let schedule = inputs.build();
        let fraction = schedule.anchor().timestamp_subsec_millis();

        for dt in schedule.all_occurrences().expect("bounded rules") {
            prop_assert_eq!(dt.timestamp_subsec_millis(), fraction);
        }
    }

    #[test]
    fn nothing_occurs_before_the_anchor(inputs in schedule_inputs(), back in 1..1000_i64) {
        let schedule = inputs.build();
        let before = schedule.anchor() - chrono::TimeDelta::hours(back);

        prop_assert!(!schedule.occurring_at(before).expect("bounded rules"));
        prop_assert!(schedule.occurrences(before).expect("bounded rules").is_empty());
    }

    #[test]
    fn record_round_trips(inputs in schedule_inputs()) {
        let record = inputs.build().to_record();
        let rebuilt = Schedule::from_record(&record, Default::default()).expect("valid record");

        prop_assert_eq!(rebuilt.to_record(), record);
    }

    #[test]
    fn first_is_a_prefix_without_exceptions(inputs in inclusive_schedule_inputs(), n in 0..40_usize) {
        let schedule = inputs.build();
        let all = schedule.all_occurrences().expect("bounded rules");
        let first = schedule.first(n).expect("bounded rules");

        prop_assert_eq!(first.len(), n.min(all.len()));
        prop_assert_eq!(&first[..], &all[..first.len()]);
    }
}
