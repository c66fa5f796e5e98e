//! Bucket assignment for every cycle profile.
//!
//! Each profile is a unit struct implementing `CycleProfile`; `REGISTRY` holds one of
//! each in `ProfileKind` declaration order, so lookups never branch on names.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::config::constants::{WEEK_OF_MONTH_MAX, WEEK_OF_YEAR_MAX};
use crate::config::{CycleConfig, Week53Policy};
use crate::domain::{Bucket, ProfileKind, Session};
use crate::models::PriceSeries;
use crate::utils::to_local;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAY_LABELS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Resolves bar timestamps into the wall clock used for weekday/session/hour buckets.
///
/// Calendar profiles (month, quarter, ...) read the UTC date directly. Date-only series
/// (every bar at midnight) carry no intraday clock, so their dates are taken as
/// already local instead of being shifted into the previous evening.
#[derive(Debug, Clone, Copy)]
pub struct BarClock<'a> {
    config: &'a CycleConfig,
    date_only: bool,
}

impl<'a> BarClock<'a> {
    pub fn intraday(config: &'a CycleConfig) -> Self {
        Self {
            config,
            date_only: false,
        }
    }

    pub fn for_series(config: &'a CycleConfig, series: &PriceSeries) -> Self {
        Self {
            config,
            date_only: series.is_date_only(),
        }
    }

    pub fn config(&self) -> &'a CycleConfig {
        self.config
    }

    pub fn is_date_only(&self) -> bool {
        self.date_only
    }

    /// Local wall time of a UTC timestamp.
    pub fn local(&self, ts: NaiveDateTime) -> NaiveDateTime {
        if self.date_only {
            ts
        } else {
            to_local(ts, self.config.timezone).naive_local()
        }
    }

    /// Local weekday as 1 (Mon) ..= 5 (Fri). Weekends have none.
    pub fn trading_weekday(&self, ts: NaiveDateTime) -> Option<u32> {
        let day = self.local(ts).weekday().number_from_monday();
        (day <= 5).then_some(day)
    }
}

/// One recurring cycle: a fixed domain of buckets, an assignment rule and labels.
pub trait CycleProfile: Sync {
    fn kind(&self) -> ProfileKind;

    /// Every valid bucket, in natural display order.
    fn domain(&self) -> Vec<Bucket>;

    /// Bucket of a UTC timestamp, or None when the bar has no place in the domain.
    fn assign(&self, ts: NaiveDateTime, clock: &BarClock) -> Option<Bucket>;

    /// First day of the period instance (year, month, week or day) `ts` belongs to.
    fn instance(&self, ts: NaiveDateTime, clock: &BarClock) -> NaiveDate;

    fn label(&self, bucket: Bucket) -> String;

    fn domain_len(&self) -> usize {
        self.domain().len()
    }
}

fn index_domain(range: std::ops::RangeInclusive<u32>) -> Vec<Bucket> {
    range.map(Bucket::Index).collect()
}

fn year_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn month_label(month: u32) -> String {
    MONTH_LABELS
        .get(month.wrapping_sub(1) as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| month.to_string())
}

pub fn weekday_label(weekday: u32) -> String {
    WEEKDAY_LABELS
        .get(weekday.wrapping_sub(1) as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| "All".to_string())
}

pub struct Decennial;

impl CycleProfile for Decennial {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Decennial
    }
    fn domain(&self) -> Vec<Bucket> {
        index_domain(0..=9)
    }
    fn assign(&self, ts: NaiveDateTime, _clock: &BarClock) -> Option<Bucket> {
        Some(Bucket::Index(ts.year().rem_euclid(10) as u32))
    }
    fn instance(&self, ts: NaiveDateTime, _clock: &BarClock) -> NaiveDate {
        year_start(ts.year())
    }
    fn label(&self, bucket: Bucket) -> String {
        format!("Year {}", bucket)
    }
}

pub struct Presidential;

impl Presidential {
    /// 1 = post-election year, 4 = election year.
    pub fn year_in_term(year: i32, election_year: i32) -> u32 {
        ((year - election_year - 1).rem_euclid(4) + 1) as u32
    }
}

impl CycleProfile for Presidential {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Presidential
    }
    fn domain(&self) -> Vec<Bucket> {
        index_domain(1..=4)
    }
    fn assign(&self, ts: NaiveDateTime, clock: &BarClock) -> Option<Bucket> {
        let election = clock.config().presidential_election_year;
        Some(Bucket::Index(Self::year_in_term(ts.year(), election)))
    }
    fn instance(&self, ts: NaiveDateTime, _clock: &BarClock) -> NaiveDate {
        year_start(ts.year())
    }
    fn label(&self, bucket: Bucket) -> String {
        match bucket.index() {
            Some(1) => "Year 1 (Post-Election)".to_string(),
            Some(2) => "Year 2 (Midterm)".to_string(),
            Some(3) => "Year 3 (Pre-Election)".to_string(),
            Some(4) => "Year 4 (Election)".to_string(),
            _ => format!("Year {}", bucket),
        }
    }
}

pub struct Quarter;

impl CycleProfile for Quarter {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Quarter
    }
    fn domain(&self) -> Vec<Bucket> {
        index_domain(1..=4)
    }
    fn assign(&self, ts: NaiveDateTime, _clock: &BarClock) -> Option<Bucket> {
        Some(Bucket::Index((ts.month() - 1) / 3 + 1))
    }
    fn instance(&self, ts: NaiveDateTime, _clock: &BarClock) -> NaiveDate {
        year_start(ts.year())
    }
    fn label(&self, bucket: Bucket) -> String {
        format!("Q{}", bucket)
    }
}

pub struct Month;

impl CycleProfile for Month {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Month
    }
    fn domain(&self) -> Vec<Bucket> {
        index_domain(1..=12)
    }
    fn assign(&self, ts: NaiveDateTime, _clock: &BarClock) -> Option<Bucket> {
        Some(Bucket::Index(ts.month()))
    }
    fn instance(&self, ts: NaiveDateTime, _clock: &BarClock) -> NaiveDate {
        year_start(ts.year())
    }
    fn label(&self, bucket: Bucket) -> String {
        bucket.index().map(month_label).unwrap_or_default()
    }
}

pub struct WeekOfYear;

impl CycleProfile for WeekOfYear {
    fn kind(&self) -> ProfileKind {
        ProfileKind::WeekOfYear
    }
    fn domain(&self) -> Vec<Bucket> {
        index_domain(1..=WEEK_OF_YEAR_MAX)
    }
    fn assign(&self, ts: NaiveDateTime, clock: &BarClock) -> Option<Bucket> {
        let week = ts.date().iso_week().week();
        if week <= WEEK_OF_YEAR_MAX {
            return Some(Bucket::Index(week));
        }
        match clock.config().week53 {
            Week53Policy::Drop => None,
            Week53Policy::FoldInto52 => Some(Bucket::Index(WEEK_OF_YEAR_MAX)),
        }
    }
    /// ISO year, so the last days of December in week 1 count towards the next year.
    fn instance(&self, ts: NaiveDateTime, _clock: &BarClock) -> NaiveDate {
        year_start(ts.date().iso_week().year())
    }
    fn label(&self, bucket: Bucket) -> String {
        format!("W{}", bucket)
    }
}

pub struct WeekOfMonth;

impl CycleProfile for WeekOfMonth {
    fn kind(&self) -> ProfileKind {
        ProfileKind::WeekOfMonth
    }
    fn domain(&self) -> Vec<Bucket> {
        index_domain(1..=WEEK_OF_MONTH_MAX)
    }
    fn assign(&self, ts: NaiveDateTime, _clock: &BarClock) -> Option<Bucket> {
        // ceil(day / 7)
        Some(Bucket::Index((ts.day() - 1) / 7 + 1))
    }
    fn instance(&self, ts: NaiveDateTime, _clock: &BarClock) -> NaiveDate {
        crate::utils::month_start(ts.date())
    }
    fn label(&self, bucket: Bucket) -> String {
        format!("W{}", bucket)
    }
}

pub struct DayOfWeek;

impl CycleProfile for DayOfWeek {
    fn kind(&self) -> ProfileKind {
        ProfileKind::DayOfWeek
    }
    fn domain(&self) -> Vec<Bucket> {
        index_domain(1..=5)
    }
    fn assign(&self, ts: NaiveDateTime, clock: &BarClock) -> Option<Bucket> {
        clock.trading_weekday(ts).map(Bucket::Index)
    }
    fn instance(&self, ts: NaiveDateTime, clock: &BarClock) -> NaiveDate {
        week_start(clock.local(ts).date())
    }
    fn label(&self, bucket: Bucket) -> String {
        bucket.index().map(weekday_label).unwrap_or_default()
    }
}

pub struct SessionProfile;

impl CycleProfile for SessionProfile {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Session
    }
    fn domain(&self) -> Vec<Bucket> {
        (1..=5)
            .flat_map(|weekday| {
                Session::ALL
                    .into_iter()
                    .map(move |session| Bucket::Session { weekday, session })
            })
            .collect()
    }
    fn assign(&self, ts: NaiveDateTime, clock: &BarClock) -> Option<Bucket> {
        let weekday = clock.trading_weekday(ts)?;
        let session = Session::from_hour(clock.local(ts).hour())?;
        Some(Bucket::Session { weekday, session })
    }
    fn instance(&self, ts: NaiveDateTime, clock: &BarClock) -> NaiveDate {
        week_start(clock.local(ts).date())
    }
    fn label(&self, bucket: Bucket) -> String {
        match bucket.session() {
            Some((weekday, session)) => format!("{} {}", weekday_label(weekday), session),
            None => bucket.to_string(),
        }
    }
}

pub struct HourOfDay;

impl CycleProfile for HourOfDay {
    fn kind(&self) -> ProfileKind {
        ProfileKind::HourOfDay
    }
    fn domain(&self) -> Vec<Bucket> {
        index_domain(0..=23)
    }
    fn assign(&self, ts: NaiveDateTime, clock: &BarClock) -> Option<Bucket> {
        Some(Bucket::Index(clock.local(ts).hour()))
    }
    fn instance(&self, ts: NaiveDateTime, clock: &BarClock) -> NaiveDate {
        clock.local(ts).date()
    }
    fn label(&self, bucket: Bucket) -> String {
        format!("{:02}:00", bucket.index().unwrap_or_default())
    }
}

/// One profile per `ProfileKind`, indexed by its discriminant.
pub static REGISTRY: [&dyn CycleProfile; 9] = [
    &Decennial,
    &Presidential,
    &Quarter,
    &Month,
    &WeekOfYear,
    &WeekOfMonth,
    &DayOfWeek,
    &SessionProfile,
    &HourOfDay,
];

impl ProfileKind {
    pub fn profile(self) -> &'static dyn CycleProfile {
        REGISTRY[self as usize]
    }
}
