//! Session profile views: weekday x session, or sessions pooled across weekdays.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Timelike};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::analysis::bucket_assigner::{BarClock, weekday_label};
use crate::analysis::metrics::MetricAccumulator;
use crate::analysis::profile_builder::{ProfileBuilder, fill_domain};
use crate::config::constants::COMBINED_WEEKDAY;
use crate::config::{CycleConfig, DF, PriceLike};
use crate::domain::{BarColor, Bucket, DateRange, PriceBar, ProfileKind, Session};
use crate::models::{PriceSeries, ProfileRow, SessionRow};

/// Which trading days feed the combined view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DayFilter {
    #[default]
    All,
    /// Days that closed above their open.
    Green,
    /// Days that closed below their open.
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionView {
    /// 15 rows: Mon..Fri x {Asia, London, NY}.
    #[default]
    Daily,
    /// 3 rows: one per session, weekdays pooled.
    Combined(DayFilter),
}

pub fn build_sessions(
    config: &CycleConfig,
    series: &PriceSeries,
    range: DateRange,
    view: SessionView,
) -> Vec<SessionRow> {
    match view {
        SessionView::Daily => ProfileBuilder::new(config)
            .build(ProfileKind::Session, series, range)
            .into_iter()
            .filter_map(session_row)
            .collect(),
        SessionView::Combined(filter) => build_combined(config, series, range, filter),
    }
}

fn session_row(row: ProfileRow) -> Option<SessionRow> {
    let (weekday, session) = row.bucket.session()?;
    Some(SessionRow {
        weekday,
        session,
        day_label: weekday_label(weekday),
        session_label: session.to_string(),
        row,
    })
}

fn build_combined(
    config: &CycleConfig,
    series: &PriceSeries,
    range: DateRange,
    filter: DayFilter,
) -> Vec<SessionRow> {
    let clock = BarClock::for_series(config, series);
    let bars: Vec<&PriceBar> = series
        .within(range)
        .filter(|b| clock.trading_weekday(b.timestamp).is_some())
        .collect();

    let day_colors = match filter {
        DayFilter::All => HashMap::new(),
        DayFilter::Green | DayFilter::Red => day_colors(&bars, &clock),
    };

    let mut groups: BTreeMap<Session, MetricAccumulator> = BTreeMap::new();
    for bar in bars {
        let local = clock.local(bar.timestamp);
        let keep = match filter {
            DayFilter::All => true,
            DayFilter::Green => day_colors.get(&local.date()) == Some(&BarColor::Green),
            DayFilter::Red => day_colors.get(&local.date()) == Some(&BarColor::Red),
        };
        if !keep {
            continue;
        }
        if let Some(session) = Session::from_hour(local.hour()) {
            groups.entry(session).or_default().push(bar);
        }
    }

    if DF.log_profiles {
        log::debug!(
            "session combined ({}): {} sessions observed",
            filter,
            groups.len()
        );
    }

    let groups = groups.into_iter().map(|(k, acc)| (k, acc.finish())).collect();
    let profile = ProfileKind::Session.profile();
    fill_domain(&Session::ALL, groups)
        .into_iter()
        .map(|(session, metrics)| {
            let bucket = Bucket::Session {
                weekday: COMBINED_WEEKDAY,
                session,
            };
            SessionRow {
                weekday: COMBINED_WEEKDAY,
                session,
                day_label: weekday_label(COMBINED_WEEKDAY),
                session_label: session.to_string(),
                row: ProfileRow {
                    bucket,
                    label: profile.label(bucket),
                    metrics,
                },
            }
        })
        .collect()
}

/// Net direction of each local trading day: first open against last close.
/// Unchanged days are neither green nor red. `bars` must be in timestamp order.
fn day_colors(bars: &[&PriceBar], clock: &BarClock) -> HashMap<NaiveDate, BarColor> {
    let days = bars.iter().chunk_by(|b| clock.local(b.timestamp).date());
    days.into_iter()
        .filter_map(|(date, day)| {
            let day: Vec<_> = day.collect();
            let open = day.first()?.open_price.value();
            let close = day.last()?.close_price.value();
            if close > open {
                Some((date, BarColor::Green))
            } else if close < open {
                Some((date, BarColor::Red))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn bar(s: &str, open: f64, close: f64) -> PriceBar {
        let ts = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
        PriceBar::new(ts, open, open.max(close), open.min(close), close)
    }

    // January: Eastern = UTC - 5
    fn sample() -> PriceSeries {
        PriceSeries::from_bars(vec![
            // Tue 2024-01-02 ET: London, NY, Asia. Day opens 100, closes 103: green
            bar("2024-01-02 06:00", 100.0, 101.0),
            bar("2024-01-02 14:00", 101.0, 102.0),
            bar("2024-01-02 22:00", 102.0, 103.0),
            // Wed 2024-01-03 ET: London, NY. Opens 103, closes 101: red
            bar("2024-01-03 06:00", 103.0, 102.0),
            bar("2024-01-03 14:00", 102.0, 101.0),
        ])
    }

    #[test]
    fn daily_view_has_fifteen_rows() {
        let config = CycleConfig::DEFAULT;
        let rows = build_sessions(&config, &sample(), DateRange::unbounded(), SessionView::Daily);
        assert_eq!(rows.len(), 15);
        assert_eq!(rows[0].day_label, "Mon");
        assert_eq!(rows[0].session_label, "Asia");

        let tue_asia = rows
            .iter()
            .find(|r| r.weekday == 2 && r.session == Session::Asia)
            .unwrap();
        assert_eq!(tue_asia.row.metrics.observations, 1);
        assert_eq!(tue_asia.row.label, "Tue Asia");
    }

    #[test]
    fn combined_view_pools_weekdays() {
        let config = CycleConfig::DEFAULT;
        let rows = build_sessions(
            &config,
            &sample(),
            DateRange::unbounded(),
            SessionView::Combined(DayFilter::All),
        );
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.weekday == COMBINED_WEEKDAY && r.day_label == "All"));
        let london = rows.iter().find(|r| r.session == Session::London).unwrap();
        assert_eq!(london.row.metrics.observations, 2);
    }

    #[test]
    fn green_filter_keeps_only_green_days() {
        let config = CycleConfig::DEFAULT;
        let rows = build_sessions(
            &config,
            &sample(),
            DateRange::unbounded(),
            SessionView::Combined(DayFilter::Green),
        );
        let total: usize = rows.iter().map(|r| r.row.metrics.observations).sum();
        assert_eq!(total, 3);
        let asia = rows.iter().find(|r| r.session == Session::Asia).unwrap();
        assert_eq!(asia.row.metrics.prob_green.value(), 100.0);

        let red = build_sessions(
            &config,
            &sample(),
            DateRange::unbounded(),
            SessionView::Combined(DayFilter::Red),
        );
        let asia = red.iter().find(|r| r.session == Session::Asia).unwrap();
        assert_eq!(asia.row.metrics.observations, 0);
        assert_eq!(asia.row.metrics.prob_red.value(), 0.0);
    }
}
