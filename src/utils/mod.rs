mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{TimeUtils, month_start, parse_timestamp, to_local};

pub(crate) use maths_utils::{cumulative_sum, mean, rebase_to_zero};
