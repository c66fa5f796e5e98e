use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analysis::bucket_assigner::BarClock;
use crate::analysis::metrics::MetricAccumulator;
use crate::analysis::session_profile::{SessionView, build_sessions};
use crate::config::{CycleConfig, DF};
use crate::domain::{Bucket, DateRange, ProfileKind};
use crate::error::Result;
use crate::models::{InstanceRow, MetricValues, PriceSeries, ProfileRow, SessionRow};

/// Result of a name-keyed build: the session profile has its own row shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutput {
    Cycle(Vec<ProfileRow>),
    Session(Vec<SessionRow>),
}

impl ProfileOutput {
    pub fn len(&self) -> usize {
        match self {
            ProfileOutput::Cycle(rows) => rows.len(),
            ProfileOutput::Session(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when not a single bar was aggregated (every row is a zero fill).
    pub fn has_no_observations(&self) -> bool {
        match self {
            ProfileOutput::Cycle(rows) => rows.iter().all(|r| r.metrics.is_empty()),
            ProfileOutput::Session(rows) => rows.iter().all(|r| r.row.metrics.is_empty()),
        }
    }
}

/// Outer-joins aggregated groups onto the full domain. Buckets without a group get
/// `MetricValues::EMPTY`; groups outside the domain are discarded. Output follows
/// domain order.
pub fn fill_domain<K: Ord + Copy>(
    domain: &[K],
    mut groups: BTreeMap<K, MetricValues>,
) -> Vec<(K, MetricValues)> {
    domain
        .iter()
        .map(|key| (*key, groups.remove(key).unwrap_or(MetricValues::EMPTY)))
        .collect()
}

/// Builds per-bucket profiles from a bar series. Stateless apart from the borrowed config.
#[derive(Debug, Clone, Copy)]
pub struct ProfileBuilder<'a> {
    config: &'a CycleConfig,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(config: &'a CycleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a CycleConfig {
        self.config
    }

    /// One row per domain bucket of `kind`, in domain order, over bars inside `range`.
    pub fn build(&self, kind: ProfileKind, series: &PriceSeries, range: DateRange) -> Vec<ProfileRow> {
        crate::trace_time!("ProfileBuilder::build", 2000, {
            let profile = kind.profile();
            let clock = BarClock::for_series(self.config, series);

            let mut groups: BTreeMap<Bucket, MetricAccumulator> = BTreeMap::new();
            let mut in_range = 0usize;
            for bar in series.within(range) {
                in_range += 1;
                if let Some(bucket) = profile.assign(bar.timestamp, &clock) {
                    groups.entry(bucket).or_default().push(bar);
                }
            }

            if DF.log_profiles {
                let assigned: usize = groups.values().map(|g| g.count()).sum();
                log::debug!(
                    "{}: {} bars in range, {} assigned, {}/{} buckets observed",
                    kind,
                    in_range,
                    assigned,
                    groups.len(),
                    profile.domain_len()
                );
            }

            let groups = groups.into_iter().map(|(k, acc)| (k, acc.finish())).collect();
            fill_domain(&profile.domain(), groups)
                .into_iter()
                .map(|(bucket, metrics)| ProfileRow {
                    bucket,
                    label: profile.label(bucket),
                    metrics,
                })
                .collect()
        })
    }

    /// Name-keyed entry point. `view` only matters for the session profile and defaults
    /// to the weekday x session view.
    pub fn build_by_key(
        &self,
        key: &str,
        series: &PriceSeries,
        range: DateRange,
        view: Option<SessionView>,
    ) -> Result<ProfileOutput> {
        let kind = ProfileKind::parse_key(key)?;
        Ok(match kind {
            ProfileKind::Session => ProfileOutput::Session(build_sessions(
                self.config,
                series,
                range,
                view.unwrap_or_default(),
            )),
            _ => ProfileOutput::Cycle(self.build(kind, series, range)),
        })
    }

    /// Observed (instance, bucket) pairs in chronological order: the per-instance
    /// history the composite averager re-aggregates.
    pub fn history(&self, kind: ProfileKind, series: &PriceSeries, range: DateRange) -> Vec<InstanceRow> {
        let profile = kind.profile();
        let clock = BarClock::for_series(self.config, series);

        let mut groups: BTreeMap<(NaiveDate, Bucket), MetricAccumulator> = BTreeMap::new();
        for bar in series.within(range) {
            if let Some(bucket) = profile.assign(bar.timestamp, &clock) {
                let instance = profile.instance(bar.timestamp, &clock);
                groups.entry((instance, bucket)).or_default().push(bar);
            }
        }

        if DF.log_profiles {
            log::debug!("{} history: {} instance rows", kind, groups.len());
        }

        groups
            .into_iter()
            .map(|((instance, bucket), acc)| InstanceRow {
                instance,
                bucket,
                label: profile.label(bucket),
                metrics: acc.finish(),
            })
            .collect()
    }
}
