use chrono::{NaiveDate, NaiveDateTime};
use cycle_profiler::models::{Column, MetricRecord};
use cycle_profiler::{
    BarTable, Bucket, CompositeAverager, CycleConfig, DateRange, Horizon, InstanceRow, Metric, PriceBar,
    PriceSeries, ProfileBuilder, ProfileError, ProfileKind, ProfileOutput, Session,
};
use strum::IntoEnumIterator;

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Bar opening at 100 and closing `ret` percent away.
fn bar(s: &str, ret: f64) -> PriceBar {
    let close = 100.0 * (1.0 + ret / 100.0);
    PriceBar::new(ts(s), 100.0, close.max(100.0) + 1.0, close.min(100.0) - 1.0, close)
}

fn mon_to_wed() -> PriceSeries {
    PriceSeries::from_bars(vec![
        bar("2024-01-01 00:00", 1.0),
        bar("2024-01-02 00:00", -2.0),
        bar("2024-01-03 00:00", 0.5),
    ])
}

#[test]
fn day_of_week_from_daily_bars() {
    let config = CycleConfig::DEFAULT;
    let rows = ProfileBuilder::new(&config).build(
        ProfileKind::DayOfWeek,
        &mon_to_wed(),
        DateRange::unbounded(),
    );
    assert_eq!(rows.len(), 5);
    let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri"]);

    assert!(approx(rows[0].metrics.avg_return.value(), 1.0));
    assert!(approx(rows[1].metrics.avg_return.value(), -2.0));
    assert!(approx(rows[2].metrics.avg_return.value(), 0.5));
    assert_eq!(rows[0].metrics.prob_green.value(), 100.0);
    assert_eq!(rows[1].metrics.prob_red.value(), 100.0);

    for row in &rows[3..] {
        assert!(row.metrics.is_empty());
        assert_eq!(row.metrics.avg_return.value(), 0.0);
        assert_eq!(row.metrics.prob_green.value(), 0.0);
        assert_eq!(row.metrics.prob_red.value(), 0.0);
    }
}

#[test]
fn decennial_buckets_by_last_digit() {
    let config = CycleConfig::DEFAULT;
    let series = PriceSeries::from_bars(vec![
        bar("2024-06-03 00:00", 1.0),
        bar("2030-06-03 00:00", 2.0),
    ]);
    let rows = ProfileBuilder::new(&config).build(
        ProfileKind::Decennial,
        &series,
        DateRange::unbounded(),
    );
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[4].bucket, Bucket::Index(4));
    assert_eq!(rows[4].metrics.observations, 1);
    assert!(approx(rows[4].metrics.avg_return.value(), 1.0));
    assert_eq!(rows[0].metrics.observations, 1);
    assert!(approx(rows[0].metrics.avg_return.value(), 2.0));
}

#[test]
fn late_afternoon_eastern_is_asia_session() {
    let config = CycleConfig::DEFAULT;
    // 21:00 UTC in January is 16:00 Eastern
    let series = PriceSeries::from_bars(vec![bar("2024-01-03 21:00", 1.0)]);
    let out = ProfileBuilder::new(&config)
        .build_by_key("session", &series, DateRange::unbounded(), None)
        .unwrap();
    let ProfileOutput::Session(rows) = out else {
        panic!("session profile must return session rows");
    };
    assert_eq!(rows.len(), 15);
    let hit: Vec<_> = rows.iter().filter(|r| r.row.metrics.observations > 0).collect();
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].weekday, 3);
    assert_eq!(hit[0].session, Session::Asia);
    assert_eq!(hit[0].row.label, "Wed Asia");
}

#[test]
fn every_profile_is_domain_complete_even_when_empty() {
    let config = CycleConfig::DEFAULT;
    let builder = ProfileBuilder::new(&config);
    let expected = [10, 4, 4, 12, 52, 5, 5, 15, 24];
    let empty = PriceSeries::from_bars(Vec::new());
    let out_of_range = DateRange::new(d(1990, 1, 1), d(1990, 12, 31));

    for (kind, len) in ProfileKind::iter().zip(expected) {
        let rows = builder.build(kind, &empty, DateRange::unbounded());
        assert_eq!(rows.len(), len, "{kind} on empty input");
        assert!(rows.iter().all(|r| r.metrics.is_empty()));

        let rows = builder.build(kind, &mon_to_wed(), out_of_range);
        assert_eq!(rows.len(), len, "{kind} outside the data");
    }
}

#[test]
fn probabilities_are_complementary_and_deterministic() {
    let config = CycleConfig::DEFAULT;
    let builder = ProfileBuilder::new(&config);
    let bars: Vec<PriceBar> = (0..200)
        .map(|i| {
            let day = d(2023, 1, 2) + chrono::Duration::days(i);
            let ret = ((i * 7) % 11) as f64 - 5.0;
            bar(&format!("{} 00:00", day), ret)
        })
        .collect();
    let series = PriceSeries::from_bars(bars);

    let first = builder.build(ProfileKind::Month, &series, DateRange::unbounded());
    let second = builder.build(ProfileKind::Month, &series, DateRange::unbounded());
    assert_eq!(first, second);

    for row in first.iter().filter(|r| r.metrics.observations > 0) {
        let total = row.metrics.prob_green.value() + row.metrics.prob_red.value();
        assert!(approx(total, 100.0), "{}: {}", row.label, total);
    }
}

#[test]
fn long_term_composite_averages_what_is_available() {
    let config = CycleConfig::DEFAULT;
    let series = PriceSeries::from_bars(vec![
        bar("2021-01-15 00:00", 1.0),
        bar("2022-01-14 00:00", 2.0),
        bar("2023-01-16 00:00", 3.0),
    ]);
    let history = ProfileBuilder::new(&config).history(
        ProfileKind::Month,
        &series,
        DateRange::unbounded(),
    );
    assert_eq!(history.len(), 3);

    let averager = CompositeAverager::new(&config);
    assert_eq!(config.window(ProfileKind::Month, Horizon::LongTerm), 10);
    let rows = averager.composite(
        &history,
        ProfileKind::Month,
        Horizon::LongTerm,
        |r: &InstanceRow| r.bucket,
        &[Metric::AvgReturn],
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].instances, 3);
    assert!(approx(rows[0].value(Metric::AvgReturn).unwrap(), 2.0));

    let latest = averager.composite(
        &history,
        ProfileKind::Month,
        Horizon::MinCycle,
        |r: &InstanceRow| r.bucket,
        &[Metric::AvgReturn],
    );
    assert!(approx(latest[0].value(Metric::AvgReturn).unwrap(), 3.0));
    assert!(approx(history[2].metric(Metric::AvgReturn), 3.0));

    let table = averager.profile(&history, ProfileKind::Month, Horizon::LongTerm);
    assert_eq!(table.len(), 12);
    assert_eq!(table[0].metrics.observations, 3);
    assert!(table[1].metrics.is_empty());
}

#[test]
fn unknown_names_are_rejected() {
    let config = CycleConfig::DEFAULT;
    let builder = ProfileBuilder::new(&config);
    let err = builder
        .build_by_key("lunar", &mon_to_wed(), DateRange::unbounded(), None)
        .unwrap_err();
    assert!(matches!(err, ProfileError::UnknownProfile(_)));

    let averager = CompositeAverager::new(&config);
    let history = builder.history(ProfileKind::Month, &mon_to_wed(), DateRange::unbounded());
    let err = averager
        .composite_by_name(&history, "month", "forever", |r: &InstanceRow| r.bucket, &Metric::ALL)
        .unwrap_err();
    assert!(matches!(err, ProfileError::UnknownHorizon(_)));
}

#[test]
fn table_without_close_column_is_rejected() {
    let table = BarTable::new()
        .with_text_column("Date", vec!["2024-01-02".to_string()])
        .with_numeric_column("Open", vec![1.0])
        .with_numeric_column("High", vec![1.0])
        .with_numeric_column("Low", vec![1.0]);
    match table.to_series() {
        Err(ProfileError::MissingColumn { column }) => assert_eq!(column, "Close"),
        other => panic!("expected missing Close, got {other:?}"),
    }
}

#[test]
fn table_rows_flow_into_profiles() {
    let mut table = BarTable::new().with_text_column(
        "Date",
        vec!["2024-01-01".into(), "2024-01-02".into(), "not a date".into()],
    );
    table.insert("Open", Column::Numeric(vec![100.0, 100.0, 100.0]));
    table.insert("High", Column::Numeric(vec![102.0, 101.0, 101.0]));
    table.insert("Low", Column::Numeric(vec![99.0, 97.0, 99.0]));
    table.insert("Close", Column::Numeric(vec![101.0, 98.0, 100.0]));

    let series = table.to_series().unwrap();
    assert_eq!(series.len(), 2);

    let config = CycleConfig::DEFAULT;
    let rows = ProfileBuilder::new(&config).build(
        ProfileKind::DayOfWeek,
        &series,
        DateRange::unbounded(),
    );
    assert!(approx(rows[0].metrics.avg_range.value(), 3.0));
    assert!(approx(rows[1].metrics.avg_range.value(), 4.0));
}
