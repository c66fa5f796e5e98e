//! Where a given instant sits in every cycle.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::analysis::bucket_assigner::BarClock;
use crate::config::CycleConfig;
use crate::domain::{Bucket, ProfileKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclePosition {
    pub kind: ProfileKind,
    /// None when the instant has no bucket (weekend for weekday/session, ISO week 53
    /// under the drop policy).
    pub bucket: Option<Bucket>,
    pub label: Option<String>,
    /// 1-based position in domain order.
    pub position: Option<usize>,
    pub total: usize,
}

impl CyclePosition {
    pub fn describe(&self) -> String {
        match self.position {
            Some(pos) => format!("{} of {}", pos, self.total),
            None => "Market closed".to_string(),
        }
    }
}

/// Position of the UTC instant `at` in every profile, in registry order.
pub fn current_positions(at: NaiveDateTime, config: &CycleConfig) -> Vec<CyclePosition> {
    let clock = BarClock::intraday(config);
    ProfileKind::iter()
        .map(|kind| {
            let profile = kind.profile();
            let domain = profile.domain();
            let bucket = profile.assign(at, &clock);
            let position = bucket.and_then(|b| domain.iter().position(|d| *d == b).map(|i| i + 1));
            CyclePosition {
                kind,
                bucket,
                label: bucket.map(|b| profile.label(b)),
                position,
                total: domain.len(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Session;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn find(positions: &[CyclePosition], kind: ProfileKind) -> &CyclePosition {
        positions.iter().find(|p| p.kind == kind).unwrap()
    }

    #[test]
    fn weekday_instant() {
        let config = CycleConfig::DEFAULT;
        // Wed 2025-03-19 14:00 UTC = 10:00 EDT
        let positions = current_positions(ts("2025-03-19 14:00"), &config);
        assert_eq!(positions.len(), 9);
        assert_eq!(find(&positions, ProfileKind::Month).describe(), "3 of 12");
        assert_eq!(find(&positions, ProfileKind::Quarter).describe(), "1 of 4");
        assert_eq!(
            find(&positions, ProfileKind::Presidential).label.as_deref(),
            Some("Year 1 (Post-Election)")
        );
        let session = find(&positions, ProfileKind::Session);
        assert_eq!(
            session.bucket,
            Some(Bucket::Session { weekday: 3, session: Session::NewYork })
        );
        assert_eq!(session.describe(), "9 of 15");
        assert_eq!(find(&positions, ProfileKind::HourOfDay).label.as_deref(), Some("10:00"));
    }

    #[test]
    fn weekend_has_no_weekday_position() {
        let config = CycleConfig::DEFAULT;
        let positions = current_positions(ts("2025-03-22 14:00"), &config);
        let dow = find(&positions, ProfileKind::DayOfWeek);
        assert_eq!(dow.position, None);
        assert_eq!(dow.describe(), "Market closed");
        assert!(find(&positions, ProfileKind::Month).position.is_some());
    }
}
