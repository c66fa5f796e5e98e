use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ProfileError;

/// Named lookback horizons of the composite averager, shortest first.
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
    Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Horizon {
    #[default]
    MinCycle,
    ShortTerm,
    MidTerm,
    LongTerm,
    MultiYear,
}

impl Horizon {
    pub const ALL: [Horizon; 5] = [
        Horizon::MinCycle,
        Horizon::ShortTerm,
        Horizon::MidTerm,
        Horizon::LongTerm,
        Horizon::MultiYear,
    ];

    /// Position in a per-profile window table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn parse_key(key: &str) -> Result<Self, ProfileError> {
        Self::from_str(key.trim()).map_err(|_| ProfileError::UnknownHorizon(key.to_string()))
    }
}
