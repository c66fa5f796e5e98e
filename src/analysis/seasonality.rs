//! Day-of-year seasonality curves.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::analysis::metrics::bar_returns;
use crate::config::constants::seasonality::FEB_28_ORDINAL;
use crate::config::{CurveOrigin, CycleConfig, DF};
use crate::models::{
    AnnotatedBar, CurveHorizon, PriceSeries, ReturnMethod, SeasonalFrame, SeasonalityCurve,
    SeasonalityPoint,
};
use crate::utils::{cumulative_sum, mean, rebase_to_zero};

/// Day-of-year with Feb 29 folded away: every date after Feb 28 of a leap year moves
/// down by one, so Dec 31 is always 365.
pub fn normalized_day_of_year(date: NaiveDate) -> u32 {
    let ordinal = date.ordinal();
    if date.leap_year() && ordinal > FEB_28_ORDINAL {
        ordinal - 1
    } else {
        ordinal
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SeasonalityCalculator<'a> {
    config: &'a CycleConfig,
}

impl<'a> SeasonalityCalculator<'a> {
    pub fn new(config: &'a CycleConfig) -> Self {
        Self { config }
    }

    /// Annotates every bar from `cutoff.year() - years_back` up to and including
    /// `cutoff` with its year, month, normalised day-of-year and return.
    ///
    /// Close-close returns are taken between consecutive kept bars, so the first kept
    /// bar has no return and is dropped.
    pub fn calculate_seasonality(
        &self,
        series: &PriceSeries,
        years_back: u32,
        method: ReturnMethod,
        cutoff: NaiveDate,
    ) -> SeasonalFrame {
        let reference_year = cutoff.year();
        let start_year =
            reference_year.saturating_sub(i32::try_from(years_back).unwrap_or(i32::MAX));

        let kept: Vec<_> = series
            .bars()
            .iter()
            .filter(|b| b.date() <= cutoff && b.timestamp.year() >= start_year)
            .copied()
            .collect();

        let returns = bar_returns(&kept, method);
        let skip = kept.len() - returns.len();

        let rows: Vec<AnnotatedBar> = kept[skip..]
            .iter()
            .zip(returns)
            .map(|(bar, return_pct)| AnnotatedBar {
                timestamp: bar.timestamp,
                year: bar.timestamp.year(),
                month: bar.timestamp.month(),
                day_of_year: normalized_day_of_year(bar.date()),
                return_pct,
            })
            .collect();

        if DF.log_seasonality {
            log::debug!(
                "seasonality: {} rows from {} to {} ({})",
                rows.len(),
                start_year,
                cutoff,
                method
            );
        }

        SeasonalFrame {
            reference_year,
            rows,
        }
    }

    /// One curve per horizon `H` (years back from the frame's reference year), plus the
    /// year-to-date curve when the reference year has data. Empty frames give no curves.
    pub fn generate_cumulative_returns(
        &self,
        frame: &SeasonalFrame,
        horizons: &[u32],
    ) -> Vec<SeasonalityCurve> {
        if frame.is_empty() {
            return Vec::new();
        }

        let mut curves: Vec<SeasonalityCurve> = horizons
            .iter()
            .map(|&years| {
                let cutoff_year =
                    frame.reference_year.saturating_sub(i32::try_from(years).unwrap_or(i32::MAX));
                let mut by_day: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
                for row in frame.rows.iter().filter(|r| r.year >= cutoff_year) {
                    by_day
                        .entry(row.day_of_year)
                        .or_default()
                        .push(row.return_pct.value());
                }
                let daily: Vec<(u32, f64)> = by_day
                    .into_iter()
                    .map(|(day, returns)| (day, mean(&returns)))
                    .collect();
                self.curve(CurveHorizon::Years(years), daily)
            })
            .collect();

        let mut ytd: BTreeMap<u32, f64> = BTreeMap::new();
        for row in frame.rows.iter().filter(|r| r.year == frame.reference_year) {
            *ytd.entry(row.day_of_year).or_default() += row.return_pct.value();
        }
        if !ytd.is_empty() {
            curves.push(self.curve(CurveHorizon::YearToDate, ytd.into_iter().collect()));
        }

        curves
    }

    fn curve(&self, horizon: CurveHorizon, daily: Vec<(u32, f64)>) -> SeasonalityCurve {
        let (days, returns): (Vec<u32>, Vec<f64>) = daily.into_iter().unzip();
        let mut cumulative = cumulative_sum(&returns);
        if self.config.curve_origin == CurveOrigin::ZeroBased {
            rebase_to_zero(&mut cumulative);
        }
        SeasonalityCurve {
            horizon,
            points: days
                .into_iter()
                .zip(cumulative)
                .map(|(day_of_year, cumulative_return)| SeasonalityPoint {
                    day_of_year,
                    cumulative_return,
                })
                .collect(),
        }
    }
}
