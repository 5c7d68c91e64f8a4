use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use gapfill_gaps::{ContextConfig, RuleThresholds, detect_gaps, plan_gaps};
use gapfill_series::TimeSeries;
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 11, 20).unwrap()
}

/// A series observed on the day offsets where `mask` is true. The first and
/// last offsets are always observed.
fn series_from_mask(mask: &[bool]) -> TimeSeries {
    let last = mask.len().saturating_sub(1);
    let points = mask
        .iter()
        .enumerate()
        .filter(|&(i, &observed)| observed || i == 0 || i == last)
        .map(|(i, _)| (base() + Duration::days(i as i64), (i as f64 * 0.7).sin() * 10.0))
        .collect();
    TimeSeries::from_present(points).unwrap()
}

proptest! {
    #[test]
    fn gaps_partition_the_unobserved_days(mask in prop::collection::vec(any::<bool>(), 1..120)) {
        let series = series_from_mask(&mask);
        let gaps = detect_gaps(&series).unwrap();

        let observed: BTreeSet<NaiveDate> = series.present_dates().into_iter().collect();
        let expected: Vec<NaiveDate> = series
            .daily_axis()
            .into_iter()
            .filter(|d| !observed.contains(d))
            .collect();
        let covered: Vec<NaiveDate> = gaps.iter().flat_map(|g| g.dates().to_vec()).collect();
        prop_assert_eq!(covered, expected);

        for gap in &gaps {
            prop_assert!(gap.size() >= 1);
            prop_assert_eq!(gap.size(), gap.dates().len());
            prop_assert_eq!((gap.end_date() - gap.start_date()).num_days() + 1, gap.size() as i64);
        }
        for pair in gaps.windows(2) {
            // Non-adjacent: at least one observed day separates consecutive gaps.
            prop_assert!((pair[1].start_date() - pair[0].end_date()).num_days() >= 2);
        }
    }

    #[test]
    fn every_gap_gets_exactly_one_plan(mask in prop::collection::vec(any::<bool>(), 2..90)) {
        let series = series_from_mask(&mask);
        let gaps = detect_gaps(&series).unwrap();
        let report = plan_gaps(&series, &ContextConfig::default(), &RuleThresholds::default()).unwrap();

        prop_assert_eq!(report.total_gaps(), gaps.len());
        let total: usize = report.methods_used().values().sum();
        prop_assert_eq!(total, gaps.len());
        for (plan, gap) in report.plans().iter().zip(&gaps) {
            prop_assert_eq!(&plan.gap, gap);
            prop_assert!((0.0..=1.0).contains(&plan.context.gap_position));
            prop_assert!(plan.context.has_before && plan.context.has_after);
        }
    }
}

#[test]
fn dense_series_has_no_gaps() {
    let series = series_from_mask(&[true; 45]);
    assert!(detect_gaps(&series).unwrap().is_empty());
}
