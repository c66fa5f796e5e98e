use chrono::{Duration, NaiveDate};
use cycle_profiler::analysis::normalized_day_of_year;
use cycle_profiler::models::CurveHorizon;
use cycle_profiler::{CycleConfig, PriceBar, PriceSeries, ReturnMethod, SeasonalityCalculator};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn daily(start: NaiveDate, days: i64, ret: f64) -> Vec<PriceBar> {
    let close = 100.0 * (1.0 + ret / 100.0);
    (0..days)
        .map(|i| {
            let ts = (start + Duration::days(i)).and_hms_opt(0, 0, 0).unwrap();
            PriceBar::new(ts, 100.0, 102.0, 98.0, close)
        })
        .collect()
}

#[test]
fn leap_day_is_folded_away() {
    assert_eq!(normalized_day_of_year(d(2024, 12, 31)), 365);
    assert_eq!(normalized_day_of_year(d(2023, 12, 31)), 365);
    assert_eq!(normalized_day_of_year(d(2024, 3, 1)), normalized_day_of_year(d(2023, 3, 1)));
}

#[test]
fn curves_accumulate_average_daily_returns() {
    let config = CycleConfig::DEFAULT;
    let calc = SeasonalityCalculator::new(&config);

    let mut bars = daily(d(2022, 1, 1), 10, 1.0);
    bars.extend(daily(d(2023, 1, 1), 10, 3.0));
    bars.extend(daily(d(2024, 1, 1), 5, -1.0));
    let series = PriceSeries::from_bars(bars);

    let frame = calc.calculate_seasonality(&series, 5, ReturnMethod::OpenClose, d(2024, 1, 5));
    assert_eq!(frame.reference_year, 2024);
    assert_eq!(frame.rows.len(), 25);

    let curves = calc.generate_cumulative_returns(&frame, &[5]);
    assert_eq!(curves.len(), 2);
    assert_eq!(curves[0].label(), "5YR");
    assert_eq!(curves[1].horizon, CurveHorizon::YearToDate);
    assert_eq!(curves[1].label(), "YTD");

    // Days 1..=5 average 1, 3 and -1; days 6..=10 average 1 and 3
    let five_year = &curves[0];
    assert!((five_year.value_at(1).unwrap() - 1.0).abs() < 1e-9);
    assert!((five_year.value_at(5).unwrap() - 5.0).abs() < 1e-9);
    assert!((five_year.value_at(10).unwrap() - 15.0).abs() < 1e-9);

    let ytd = &curves[1];
    assert_eq!(ytd.points.len(), 5);
    assert!((ytd.last().unwrap().cumulative_return + 5.0).abs() < 1e-9);
}

#[test]
fn cutoff_and_years_back_bound_the_frame() {
    let config = CycleConfig::DEFAULT;
    let calc = SeasonalityCalculator::new(&config);
    let mut bars = daily(d(2010, 6, 1), 3, 1.0);
    bars.extend(daily(d(2024, 6, 1), 3, 1.0));
    let series = PriceSeries::from_bars(bars);

    let frame = calc.calculate_seasonality(&series, 5, ReturnMethod::OpenClose, d(2024, 6, 2));
    assert_eq!(frame.rows.len(), 2);
    assert!(frame.rows.iter().all(|r| r.year == 2024));

    let close_close =
        calc.calculate_seasonality(&series, 5, ReturnMethod::CloseClose, d(2024, 6, 3));
    assert_eq!(close_close.rows.len(), 2);
}

#[test]
fn no_data_means_no_curves() {
    let config = CycleConfig::DEFAULT;
    let calc = SeasonalityCalculator::new(&config);
    let series = PriceSeries::from_bars(daily(d(2001, 1, 1), 30, 1.0));
    let frame = calc.calculate_seasonality(&series, 5, ReturnMethod::OpenClose, d(2024, 12, 31));
    assert!(frame.is_empty());
    assert!(calc.generate_cumulative_returns(&frame, &[5, 10]).is_empty());
}
