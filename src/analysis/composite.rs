//! Composite averages: a unit's metrics re-averaged over its most recent N instances.

use std::collections::BTreeMap;

use crate::analysis::profile_builder::fill_domain;
use crate::config::{CycleConfig, DF};
use crate::domain::{Bucket, Horizon, InstancePeriod, ProfileKind};
use crate::error::Result;
use crate::models::{
    CompositeMatrixRow, CompositeRow, InstanceRow, Metric, MetricRecord, MetricValues, ProfileRow,
};
use crate::utils::mean;

#[derive(Debug, Clone, Copy)]
pub struct CompositeAverager<'a> {
    config: &'a CycleConfig,
}

impl<'a> CompositeAverager<'a> {
    pub fn new(config: &'a CycleConfig) -> Self {
        Self { config }
    }

    /// MinCycle always looks at the latest instance only.
    fn window(&self, kind: ProfileKind, horizon: Horizon) -> usize {
        match horizon {
            Horizon::MinCycle => 1,
            _ => self.config.window(kind, horizon),
        }
    }

    /// One row per unit, in unit order.
    ///
    /// `history` must be chronological. For `MinCycle` each unit keeps its latest record
    /// as-is. Otherwise each metric is the mean over the unit's last N records, N taken
    /// from the config's window table; fewer than N records are averaged as available.
    pub fn composite<R, U, F>(
        &self,
        history: &[R],
        kind: ProfileKind,
        horizon: Horizon,
        unit_key: F,
        metrics: &[Metric],
    ) -> Vec<CompositeRow<U>>
    where
        R: MetricRecord,
        U: Ord + Clone,
        F: Fn(&R) -> U,
    {
        let window = self.window(kind, horizon);

        let mut units: BTreeMap<U, Vec<&R>> = BTreeMap::new();
        for record in history {
            units.entry(unit_key(record)).or_default().push(record);
        }

        if DF.log_composite {
            log::debug!(
                "composite {} {}: window {} over {} units ({} records)",
                kind,
                horizon,
                window,
                units.len(),
                history.len()
            );
        }

        units
            .into_iter()
            .map(|(unit, records)| {
                let tail = &records[records.len().saturating_sub(window)..];
                let values = metrics
                    .iter()
                    .map(|&metric| {
                        let samples: Vec<f64> = tail.iter().map(|r| r.metric(metric)).collect();
                        (metric, mean(&samples))
                    })
                    .collect();
                CompositeRow {
                    unit,
                    horizon,
                    instances: tail.len(),
                    values,
                }
            })
            .collect()
    }

    /// Name-keyed form of `composite`. Unknown profile or horizon names are errors.
    pub fn composite_by_name<R, U, F>(
        &self,
        history: &[R],
        profile_key: &str,
        horizon_name: &str,
        unit_key: F,
        metrics: &[Metric],
    ) -> Result<Vec<CompositeRow<U>>>
    where
        R: MetricRecord,
        U: Ord + Clone,
        F: Fn(&R) -> U,
    {
        let kind = ProfileKind::parse_key(profile_key)?;
        let horizon = Horizon::parse_key(horizon_name)?;
        Ok(self.composite(history, kind, horizon, unit_key, metrics))
    }

    /// Every horizon of one metric side by side: one row per unit.
    pub fn matrix<R, U, F>(
        &self,
        history: &[R],
        kind: ProfileKind,
        unit_key: F,
        metric: Metric,
    ) -> Vec<CompositeMatrixRow<U>>
    where
        R: MetricRecord,
        U: Ord + Clone,
        F: Fn(&R) -> U,
    {
        let mut rows: BTreeMap<U, [f64; 5]> = BTreeMap::new();
        for horizon in Horizon::ALL {
            for row in self.composite(history, kind, horizon, &unit_key, &[metric]) {
                let value = row.value(metric).unwrap_or_default();
                rows.entry(row.unit).or_insert([0.0; 5])[horizon.index()] = value;
            }
        }
        rows.into_iter()
            .map(|(unit, values)| CompositeMatrixRow {
                unit,
                metric,
                values,
            })
            .collect()
    }

    /// Composite of a bucket history as a complete profile table: one row per domain
    /// bucket with all four metrics, zero-filled where the bucket was never observed.
    /// `observations` sums the bars behind the averaged instances.
    pub fn profile(&self, history: &[InstanceRow], kind: ProfileKind, horizon: Horizon) -> Vec<ProfileRow> {
        let profile = kind.profile();
        let rows = self.composite(history, kind, horizon, |r: &InstanceRow| r.bucket, &Metric::ALL);

        let window = self.window(kind, horizon);
        let mut observed: BTreeMap<Bucket, usize> = BTreeMap::new();
        let mut by_bucket: BTreeMap<Bucket, Vec<&InstanceRow>> = BTreeMap::new();
        for r in history {
            by_bucket.entry(r.bucket).or_default().push(r);
        }
        for (bucket, records) in by_bucket {
            let tail = &records[records.len().saturating_sub(window)..];
            observed.insert(bucket, tail.iter().map(|r| r.metrics.observations).sum());
        }

        let groups: BTreeMap<Bucket, MetricValues> = rows
            .into_iter()
            .map(|row| {
                let mut values = MetricValues::EMPTY;
                for (metric, value) in &row.values {
                    values.set(*metric, *value);
                }
                values.observations = observed.get(&row.unit).copied().unwrap_or_default();
                (row.unit, values)
            })
            .collect();

        fill_domain(&profile.domain(), groups)
            .into_iter()
            .map(|(bucket, metrics)| ProfileRow {
                bucket,
                label: profile.label(bucket),
                metrics,
            })
            .collect()
    }
}

/// Human description of a horizon, e.g. month/short_term -> "3 Years (36 months)".
pub fn describe_horizon(kind: ProfileKind, horizon: Horizon, config: &CycleConfig) -> String {
    if horizon == Horizon::MinCycle {
        return "Current data (no averaging)".to_string();
    }
    let n = config.window(kind, horizon);
    let plural = |count: usize, unit: &str| {
        if count == 1 {
            format!("{} {}", count, unit)
        } else {
            format!("{} {}s", count, unit)
        }
    };

    match (kind, kind.instance_period()) {
        (ProfileKind::Decennial, InstancePeriod::Years(span)) => format!(
            "{} ({} decade cycles)",
            plural(n * span as usize, "Year"),
            n
        ),
        (ProfileKind::Presidential, InstancePeriod::Years(span)) => format!(
            "{} ({} presidential cycles)",
            plural(n * span as usize, "Year"),
            n
        ),
        (ProfileKind::Quarter, _) => format!("{} ({} quarters)", plural(n, "Year"), n * 4),
        (ProfileKind::Month, _) => format!("{} ({} months)", plural(n, "Year"), n * 12),
        (ProfileKind::WeekOfYear, _) => format!("{} ({} weeks)", plural(n, "Year"), n * 52),
        (ProfileKind::Session, _) => {
            format!("{} ({} trading days)", plural(n, "Week"), n * 5)
        }
        (ProfileKind::HourOfDay, _) => format!("{} ({} hours)", plural(n, "Day"), n * 24),
        (_, InstancePeriod::Years(span)) => plural(n * span as usize, "Year"),
        (_, InstancePeriod::Months) => plural(n, "Month"),
        (_, InstancePeriod::Weeks) => plural(n, "Week"),
        (_, InstancePeriod::Days) => plural(n, "Day"),
    }
}
