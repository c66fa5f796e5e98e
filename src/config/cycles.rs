//! Cycle analysis configuration.
//!
//! A `CycleConfig` value is passed explicitly to the profile builder, the composite
//! averager and the seasonality calculator. `CycleConfig::DEFAULT` is the baked-in
//! blueprint; a JSON file can override any part of it.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};

use crate::config::constants::{self, horizons};
use crate::domain::{Horizon, ProfileKind};
use crate::error::{ProfileError, Result};

/// What to do with ISO week 53 in the week-of-year profile (domain is 1..=52).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Week53Policy {
    /// Week 53 bars are unassignable and dropped.
    #[default]
    Drop,
    /// Week 53 bars count towards week 52 of the same ISO year.
    FoldInto52,
}

/// Normalisation applied to cumulative-return curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CurveOrigin {
    /// First point is the first day's average return.
    #[default]
    AsObserved,
    /// Every curve is shifted so that its first point is exactly 0.
    ZeroBased,
}

/// Lookback windows for one profile, in instances of its natural period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonWindows {
    pub kind: ProfileKind,
    pub windows: [usize; 5],
}

/// Fields missing from a JSON override fall back to `CycleConfig::DEFAULT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Timezone used for weekday, session and hour-of-day bucketing. Bars are UTC.
    pub timezone: Tz,
    /// Most recent election year of the 4-year cycle. The following year is Year 1.
    pub presidential_election_year: i32,
    pub week53: Week53Policy,
    pub curve_origin: CurveOrigin,
    pub horizons: [HorizonWindows; 9],
}

impl CycleConfig {
    pub const DEFAULT: CycleConfig = CycleConfig {
        timezone: chrono_tz::America::New_York,
        presidential_election_year: constants::PRESIDENTIAL_ELECTION_YEAR,
        week53: Week53Policy::Drop,
        curve_origin: CurveOrigin::AsObserved,
        horizons: [
            HorizonWindows { kind: ProfileKind::Decennial, windows: horizons::DECENNIAL },
            HorizonWindows { kind: ProfileKind::Presidential, windows: horizons::PRESIDENTIAL },
            HorizonWindows { kind: ProfileKind::Quarter, windows: horizons::QUARTER },
            HorizonWindows { kind: ProfileKind::Month, windows: horizons::MONTH },
            HorizonWindows { kind: ProfileKind::WeekOfYear, windows: horizons::WEEK_OF_YEAR },
            HorizonWindows { kind: ProfileKind::WeekOfMonth, windows: horizons::WEEK_OF_MONTH },
            HorizonWindows { kind: ProfileKind::DayOfWeek, windows: horizons::DAY_OF_WEEK },
            HorizonWindows { kind: ProfileKind::Session, windows: horizons::SESSION },
            HorizonWindows { kind: ProfileKind::HourOfDay, windows: horizons::HOUR_OF_DAY },
        ],
    };

    /// Number of trailing instances averaged by `horizon` for `kind`.
    /// Falls back to 1 when the table has no entry for `kind` (rejected by `validate`).
    pub fn window(&self, kind: ProfileKind, horizon: Horizon) -> usize {
        self.horizons
            .iter()
            .find(|h| h.kind == kind)
            .map(|h| h.windows[horizon.index()])
            .unwrap_or(1)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CycleConfig = serde_json::from_str(json)
            .map_err(|e| ProfileError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ProfileError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Every profile needs a window table; windows must be positive and non-decreasing.
    pub fn validate(&self) -> Result<()> {
        for kind in ProfileKind::iter() {
            let Some(entry) = self.horizons.iter().find(|h| h.kind == kind) else {
                return Err(ProfileError::InvalidConfig(format!(
                    "no horizon windows for profile {}",
                    kind
                )));
            };
            if entry.windows.contains(&0) {
                return Err(ProfileError::InvalidConfig(format!(
                    "zero-length horizon window for profile {}",
                    kind
                )));
            }
            if entry.windows.windows(2).any(|pair| pair[1] < pair[0]) {
                return Err(ProfileError::InvalidConfig(format!(
                    "horizon windows for profile {} must not decrease: {:?}",
                    kind, entry.windows
                )));
            }
        }
        Ok(())
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CycleConfig::DEFAULT.validate().is_ok());
        assert_eq!(CycleConfig::default(), CycleConfig::DEFAULT);
    }

    #[test]
    fn window_lookup_follows_table() {
        let config = CycleConfig::DEFAULT;
        assert_eq!(config.window(ProfileKind::Month, Horizon::ShortTerm), 3);
        assert_eq!(config.window(ProfileKind::DayOfWeek, Horizon::MultiYear), 156);
        assert_eq!(config.window(ProfileKind::Decennial, Horizon::LongTerm), 5);
    }

    #[test]
    fn json_round_trip_keeps_overrides() {
        let mut config = CycleConfig::DEFAULT;
        config.week53 = Week53Policy::FoldInto52;
        config.timezone = chrono_tz::Europe::London;
        let json = serde_json::to_string(&config).unwrap();
        let parsed = CycleConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = CycleConfig::from_json_str(r#"{"week53":"fold_into52"}"#).unwrap();
        assert_eq!(config.week53, Week53Policy::FoldInto52);
        assert_eq!(config.timezone, CycleConfig::DEFAULT.timezone);
        assert_eq!(
            config.presidential_election_year,
            CycleConfig::DEFAULT.presidential_election_year
        );
        assert_eq!(config.curve_origin, CycleConfig::DEFAULT.curve_origin);
        assert_eq!(config.horizons, CycleConfig::DEFAULT.horizons);

        let empty = CycleConfig::from_json_str("{}").unwrap();
        assert_eq!(empty, CycleConfig::DEFAULT);
    }

    #[test]
    fn decreasing_windows_are_rejected() {
        let mut config = CycleConfig::DEFAULT;
        config.horizons[3].windows = [1, 5, 3, 10, 15];
        let json = serde_json::to_string(&config).unwrap();
        let err = CycleConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidConfig(_)));
    }

    #[test]
    fn missing_profile_entry_is_rejected() {
        let mut config = CycleConfig::DEFAULT;
        // Duplicate month entry in place of hour_of_day
        config.horizons[8] = config.horizons[3];
        assert!(config.validate().is_err());
    }

    #[test]
    fn garbage_json_is_invalid_config() {
        let err = CycleConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ProfileError::InvalidConfig(_)));
    }
}
