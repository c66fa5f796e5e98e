use serde::{Deserialize, Serialize};

use crate::domain::Session;

/// One discrete position within a recurring cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bucket {
    /// Month 1..=12, quarter 1..=4, year-in-decade 0..=9, hour 0..=23, ...
    Index(u32),
    /// Weekday 1..=5 (Mon..Fri) crossed with a session. Weekday 0 pools all weekdays.
    Session { weekday: u32, session: Session },
}

impl Bucket {
    pub fn index(&self) -> Option<u32> {
        match self {
            Bucket::Index(i) => Some(*i),
            Bucket::Session { .. } => None,
        }
    }

    pub fn session(&self) -> Option<(u32, Session)> {
        match self {
            Bucket::Session { weekday, session } => Some((*weekday, *session)),
            Bucket::Index(_) => None,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Index(i) => write!(f, "{}", i),
            Bucket::Session { weekday, session } => write!(f, "{}/{}", weekday, session),
        }
    }
}
