use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::config::ReturnPct;

/// How a per-row return is measured for seasonality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum ReturnMethod {
    /// (Close - Open) / Open of the same bar.
    #[default]
    #[serde(rename = "open-close")]
    #[strum(serialize = "open-close")]
    OpenClose,
    /// Close against the previous row's close. The first row has no return and is dropped.
    #[serde(rename = "close-close")]
    #[strum(serialize = "close-close")]
    CloseClose,
}

/// A bar annotated with its calendar position and return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    pub timestamp: NaiveDateTime,
    pub year: i32,
    pub month: u32,
    /// Leap-adjusted ordinal, 1..=365.
    pub day_of_year: u32,
    pub return_pct: ReturnPct,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeasonalFrame {
    /// Year of the cutoff date. Horizons count back from here.
    pub reference_year: i32,
    pub rows: Vec<AnnotatedBar>,
}

impl SeasonalFrame {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveHorizon {
    Years(u32),
    YearToDate,
}

impl std::fmt::Display for CurveHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveHorizon::Years(h) => write!(f, "{}YR", h),
            CurveHorizon::YearToDate => write!(f, "YTD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityPoint {
    pub day_of_year: u32,
    pub cumulative_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityCurve {
    pub horizon: CurveHorizon,
    pub points: Vec<SeasonalityPoint>,
}

impl SeasonalityCurve {
    pub fn label(&self) -> String {
        self.horizon.to_string()
    }

    pub fn last(&self) -> Option<SeasonalityPoint> {
        self.points.last().copied()
    }

    /// Cumulative value at `day_of_year`, or at the closest earlier point.
    pub fn value_at(&self, day_of_year: u32) -> Option<f64> {
        self.points
            .iter()
            .take_while(|p| p.day_of_year <= day_of_year)
            .last()
            .map(|p| p.cumulative_return)
    }
}
