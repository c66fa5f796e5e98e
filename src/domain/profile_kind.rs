use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ProfileError;

/// Every recurring cycle the profiler knows how to bucket.
/// Declaration order is the registry order (see `analysis::bucket_assigner::REGISTRY`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProfileKind {
    Decennial,
    Presidential,
    Quarter,
    Month,
    WeekOfYear,
    WeekOfMonth,
    DayOfWeek,
    Session,
    HourOfDay,
}

impl ProfileKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Decennial => "Decennial",
            Self::Presidential => "Presidential",
            Self::Quarter => "Quarter",
            Self::Month => "Month",
            Self::WeekOfYear => "Week Of Year",
            Self::WeekOfMonth => "Week Of Month",
            Self::DayOfWeek => "Day Of Week",
            Self::Session => "Session",
            Self::HourOfDay => "Hour Of Day",
        }
    }

    /// The calendar period one composite instance spans.
    pub fn instance_period(&self) -> InstancePeriod {
        match self {
            Self::Decennial => InstancePeriod::Years(10),
            Self::Presidential => InstancePeriod::Years(4),
            Self::Quarter | Self::Month | Self::WeekOfYear => InstancePeriod::Years(1),
            Self::WeekOfMonth => InstancePeriod::Months,
            Self::DayOfWeek | Self::Session => InstancePeriod::Weeks,
            Self::HourOfDay => InstancePeriod::Days,
        }
    }

    pub fn parse_key(key: &str) -> Result<Self, ProfileError> {
        Self::from_str(key.trim()).map_err(|_| ProfileError::UnknownProfile(key.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstancePeriod {
    Years(u32),
    Months,
    Weeks,
    Days,
}
