use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub struct TimeUtils;

impl TimeUtils {
    // Date-only layouts, tried in order. US month-first wins over ISO on ambiguity.
    pub const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%d.%m.%Y"];

    pub const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];
}

/// Parses a bar timestamp. Zoned RFC 3339 input is converted to UTC; naive input is
/// taken as UTC already. Returns None when no known layout matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    for fmt in TimeUtils::DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    TimeUtils::DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// UTC wall time to the given zone (DST aware).
pub fn to_local(utc: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    tz.from_utc_datetime(&utc)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_common_layouts() {
        let us = parse_timestamp("3/19/2025").unwrap();
        assert_eq!(us.date(), NaiveDate::from_ymd_opt(2025, 3, 19).unwrap());

        let iso = parse_timestamp("2025-03-19 14:00:00").unwrap();
        assert_eq!(iso.hour(), 14);

        let zoned = parse_timestamp("2024-01-03T16:00:00-05:00").unwrap();
        assert_eq!(zoned.hour(), 21);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }

    #[test]
    fn to_local_follows_dst() {
        let ny = chrono_tz::America::New_York;
        let winter = parse_timestamp("2024-01-03 21:00").unwrap();
        let summer = parse_timestamp("2024-07-03 21:00").unwrap();
        assert_eq!(to_local(winter, ny).hour(), 16);
        assert_eq!(to_local(summer, ny).hour(), 17);
    }

    #[test]
    fn month_start_of_mid_month() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(month_start(d), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
