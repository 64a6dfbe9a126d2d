use chrono::NaiveDate;
use planning_core::{Commitment, CoverageAggregator, Workweek};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn commitment(
    project: &str,
    start: NaiveDate,
    end: NaiveDate,
    hours: Option<f64>,
    percentage: Option<f64>,
) -> Commitment {
    Commitment::new(project, "resource-1", start, end, hours, percentage).unwrap()
}

/// The planning-board fixture: one resource spread over two projects, mixing
/// fixed-hours and percentage commitments.
fn resource_commitments() -> Vec<Commitment> {
    vec![
        commitment(
            "project-a",
            date(2017, 7, 1),
            date(2017, 7, 31),
            Some(40.0),
            None,
        ),
        commitment(
            "project-a",
            date(2017, 8, 1),
            date(2018, 6, 30),
            None,
            Some(25.0),
        ),
        commitment(
            "project-b",
            date(2016, 1, 1),
            date(2020, 12, 31),
            Some(10.0),
            None,
        ),
        commitment(
            "project-b",
            date(2017, 1, 1),
            date(2017, 12, 31),
            Some(70.0),
            None,
        ),
    ]
}

#[test]
fn committed_hours_merges_overlapping_commitments() {
    let commitments = resource_commitments();
    let aggregator = CoverageAggregator::new(&commitments);
    let totals = aggregator.committed_hours().unwrap();

    // Every month of 2016-2020 is touched by the five-year commitment
    assert_eq!(totals.len(), 60);
    // July 2017: 40 + 10 + 70
    assert_eq!(totals[&date(2017, 7, 1)], 120.0);
    // Feb 2018: 25% of 160 working hours, plus the 10-hour baseline
    assert_eq!(totals[&date(2018, 2, 1)], 50.0);
    // A month only the baseline touches
    assert_eq!(totals[&date(2016, 3, 1)], 10.0);
}

#[test]
fn committed_hours_in_period_restricts_to_the_window() {
    let commitments = resource_commitments();
    let aggregator = CoverageAggregator::new(&commitments);

    let totals = aggregator
        .committed_hours_in_period(date(2017, 7, 1), None)
        .unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[&date(2017, 7, 1)], 120.0);
}

#[test]
fn period_filter_skips_commitments_strictly_inside_the_period() {
    // Historical screening behavior: a commitment that starts after the
    // period opens and ends before it closes fails both arms of the filter
    // and contributes nothing.
    let commitments = vec![commitment(
        "project-b",
        date(2017, 3, 1),
        date(2017, 4, 30),
        Some(10.0),
        None,
    )];
    let aggregator = CoverageAggregator::new(&commitments);
    let totals = aggregator
        .committed_hours_in_period(date(2017, 1, 1), Some(date(2017, 12, 31)))
        .unwrap();
    assert!(totals.is_empty());
}

#[test]
fn coverage_divides_by_full_month_capacity() {
    let commitments = resource_commitments();
    let aggregator = CoverageAggregator::new(&commitments);
    let coverage = aggregator.coverage().unwrap();

    // July 2017 has 168 working hours
    assert!((coverage[&date(2017, 7, 1)] - 120.0 / 168.0).abs() < 1e-9);
    // March 2016 has 184 working hours
    assert!((coverage[&date(2016, 3, 1)] - 10.0 / 184.0).abs() < 1e-9);
}

#[test]
fn coverage_sums_overlapping_commitments_before_dividing() {
    // Second resource of the fixture: a 50% stake and a flat 40 hours land
    // in the same July bucket.
    let commitments = vec![
        commitment(
            "project-a",
            date(2017, 7, 1),
            date(2018, 6, 30),
            None,
            Some(50.0),
        ),
        commitment(
            "project-b",
            date(2016, 7, 15),
            date(2018, 12, 31),
            Some(40.0),
            None,
        ),
    ];
    let aggregator = CoverageAggregator::new(&commitments);
    let coverage = aggregator.coverage().unwrap();
    assert!((coverage[&date(2017, 7, 1)] - (0.5 * 168.0 + 40.0) / 168.0).abs() < 1e-9);
}

#[test]
fn coverage_in_period_uses_the_period_numerator() {
    let commitments = resource_commitments();
    let aggregator = CoverageAggregator::new(&commitments);
    let coverage = aggregator
        .coverage_in_period(date(2017, 7, 1), None)
        .unwrap();
    assert_eq!(coverage.len(), 1);
    assert!((coverage[&date(2017, 7, 1)] - 120.0 / 168.0).abs() < 1e-9);
}

#[test]
fn aggregation_reflects_the_current_commitment_set() {
    let mut commitments = resource_commitments();
    commitments.truncate(1);
    let aggregator = CoverageAggregator::new(&commitments);
    let totals = aggregator.committed_hours().unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[&date(2017, 7, 1)], 40.0);
}

#[test]
fn custom_workweek_changes_the_denominator() {
    let commitments = vec![commitment(
        "project-a",
        date(2017, 7, 1),
        date(2017, 7, 31),
        Some(40.0),
        None,
    )];
    let workweek = Workweek::new(chrono::Weekday::Mon, chrono::Weekday::Sat, 8);
    let aggregator = CoverageAggregator::with_workweek(&commitments, workweek);
    let coverage = aggregator.coverage().unwrap();
    // July 2017 has 26 Mon-Sat working days
    assert!((coverage[&date(2017, 7, 1)] - 40.0 / 208.0).abs() < 1e-9);
}
