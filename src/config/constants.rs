// Top Level Constants
pub const PRESIDENTIAL_ELECTION_YEAR: i32 = 2020;

/// ISO weeks above this are handled by the configured `Week53Policy`.
pub const WEEK_OF_YEAR_MAX: u32 = 52;
pub const WEEK_OF_MONTH_MAX: u32 = 5;

/// Weekday key used by the combined session view (all weekdays pooled).
pub const COMBINED_WEEKDAY: u32 = 0;

pub mod session {
    // Eastern-time start hours. Each window runs for WINDOW_HOURS.
    pub const ASIA_START_HOUR: u32 = 16;
    pub const LONDON_START_HOUR: u32 = 0;
    pub const NY_START_HOUR: u32 = 8;
    pub const WINDOW_HOURS: u32 = 8;
}

/// Lookback windows per profile, measured in instances of the profile's natural period.
/// Order: min_cycle, short_term, mid_term, long_term, multi_year.
pub mod horizons {
    // Decade cycle: one instance per decade (10y, 20y, 30y, 50y, 100y)
    pub const DECENNIAL: [usize; 5] = [1, 2, 3, 5, 10];
    // Presidential term: one instance per term (4y, 8y, 12y, 20y, 40y)
    pub const PRESIDENTIAL: [usize; 5] = [1, 2, 3, 5, 10];
    // Years
    pub const QUARTER: [usize; 5] = [1, 3, 5, 10, 20];
    pub const MONTH: [usize; 5] = [1, 3, 5, 10, 15];
    pub const WEEK_OF_YEAR: [usize; 5] = [1, 3, 5, 10, 20];
    // Months
    pub const WEEK_OF_MONTH: [usize; 5] = [1, 3, 6, 12, 36];
    // Weeks
    pub const DAY_OF_WEEK: [usize; 5] = [1, 4, 13, 52, 156];
    pub const SESSION: [usize; 5] = [1, 4, 12, 52, 156];
    // Days
    pub const HOUR_OF_DAY: [usize; 5] = [1, 5, 20, 60, 250];
}

pub mod seasonality {
    pub const DEFAULT_YEARS_BACK: u32 = 15;
    pub const DEFAULT_HORIZONS: &[u32] = &[5, 10, 15];
    /// Day-of-year ordinal of Feb 28. Leap-year days after it shift down by one.
    pub const FEB_28_ORDINAL: u32 = 59;
}
