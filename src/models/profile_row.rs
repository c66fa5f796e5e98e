use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::{ProbPct, RangePoints, ReturnPct};
use crate::domain::{Bucket, Session};
use crate::error::ProfileError;

/// Metric columns carried by every profile row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Metric {
    AvgReturn,
    AvgRange,
    ProbGreen,
    ProbRed,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::AvgReturn,
        Metric::AvgRange,
        Metric::ProbGreen,
        Metric::ProbRed,
    ];

    pub fn parse_key(key: &str) -> Result<Self, ProfileError> {
        let k = key.trim();
        Self::from_str(k)
            .ok()
            .or_else(|| match k.to_lowercase().replace('_', "").as_str() {
                "avgreturn" | "return" => Some(Metric::AvgReturn),
                "avgrange" | "range" => Some(Metric::AvgRange),
                "probgreen" | "green" => Some(Metric::ProbGreen),
                "probred" | "red" => Some(Metric::ProbRed),
                _ => None,
            })
            .ok_or_else(|| ProfileError::InvalidConfig(format!("unknown metric column: {}", key)))
    }
}

/// Aggregated statistics of one bucket. All zero when nothing was observed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricValues {
    pub avg_return: ReturnPct,
    pub avg_range: RangePoints,
    pub prob_green: ProbPct,
    pub prob_red: ProbPct,
    pub observations: usize,
}

impl MetricValues {
    pub const EMPTY: MetricValues = MetricValues {
        avg_return: ReturnPct::new(0.0),
        avg_range: RangePoints::new(0.0),
        prob_green: ProbPct::ZERO,
        prob_red: ProbPct::ZERO,
        observations: 0,
    };

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::AvgReturn => self.avg_return.value(),
            Metric::AvgRange => self.avg_range.value(),
            Metric::ProbGreen => self.prob_green.value(),
            Metric::ProbRed => self.prob_red.value(),
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::AvgReturn => self.avg_return = ReturnPct::new(value),
            Metric::AvgRange => self.avg_range = RangePoints::new(value),
            Metric::ProbGreen => self.prob_green = ProbPct::new(value),
            Metric::ProbRed => self.prob_red = ProbPct::new(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observations == 0
    }
}

/// Anything the composite averager can re-aggregate.
pub trait MetricRecord {
    fn metrics(&self) -> &MetricValues;

    fn metric(&self, metric: Metric) -> f64 {
        self.metrics().get(metric)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub bucket: Bucket,
    pub label: String,
    #[serde(flatten)]
    pub metrics: MetricValues,
}

impl MetricRecord for ProfileRow {
    fn metrics(&self) -> &MetricValues {
        &self.metrics
    }
}

/// Session profile row: weekday x session, or session only in the combined view
/// (weekday = `COMBINED_WEEKDAY`, day label "All").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRow {
    pub weekday: u32,
    pub session: Session,
    pub day_label: String,
    pub session_label: String,
    #[serde(flatten)]
    pub row: ProfileRow,
}

impl MetricRecord for SessionRow {
    fn metrics(&self) -> &MetricValues {
        &self.row.metrics
    }
}

/// One observed (period instance, bucket) pair. `instance` is the first day of the
/// period the bucket was observed in (year, month, week or day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRow {
    pub instance: NaiveDate,
    pub bucket: Bucket,
    pub label: String,
    #[serde(flatten)]
    pub metrics: MetricValues,
}

impl MetricRecord for InstanceRow {
    fn metrics(&self) -> &MetricValues {
        &self.metrics
    }
}
