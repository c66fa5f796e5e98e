use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::config::constants::session::{
    ASIA_START_HOUR, LONDON_START_HOUR, NY_START_HOUR, WINDOW_HOURS,
};

/// One of the three 8-hour trading windows of an Eastern-time day.
/// Asia [16:00, 24:00), London [00:00, 08:00), NY [08:00, 16:00).
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
)]
pub enum Session {
    Asia,
    London,
    #[strum(to_string = "NY")]
    #[serde(rename = "NY")]
    NewYork,
}

impl Session {
    pub const ALL: [Session; 3] = [Session::Asia, Session::London, Session::NewYork];

    pub fn start_hour(self) -> u32 {
        match self {
            Session::Asia => ASIA_START_HOUR,
            Session::London => LONDON_START_HOUR,
            Session::NewYork => NY_START_HOUR,
        }
    }

    pub fn contains_hour(self, hour: u32) -> bool {
        let start = self.start_hour();
        hour >= start && hour < start + WINDOW_HOURS
    }

    /// Classifies a local (Eastern) hour of day. Hours outside 0..24 have no session.
    pub fn from_hour(hour: u32) -> Option<Session> {
        Self::ALL.into_iter().find(|s| s.contains_hour(hour))
    }
}
