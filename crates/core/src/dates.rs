//! Calendar-day arithmetic.
//!
//! Dates are plain `NaiveDate`s parsed from `YYYY-MM-DD`, so day math never
//! sees a time-of-day component or a time zone offset. Timestamps only
//! appear when a date is pinned to a local wall-clock time for due checks.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};

use crate::error::{CoreError, CoreResult};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for times of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parse an `HH:MM` string into a time of day.
pub fn parse_time(value: &str) -> CoreResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| CoreError::InvalidTime {
        value: value.to_string(),
    })
}

/// Whole calendar days from `a` to `b`.
///
/// Clamped to zero when `b` is before `a`; callers that expect a span must
/// pass the dates in chronological order.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> u32 {
    let days = (b - a).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// The earlier of two optional dates. An absent bound yields the other.
pub fn min_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// The later of two optional dates. An absent bound yields the other.
pub fn max_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Offset a date by a signed number of days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Pin a calendar date and wall-clock time to the local time zone.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times
/// inside a DST gap move forward by one hour.
pub fn at_local(date: NaiveDate, time: NaiveTime) -> DateTime<Local> {
    let naive = date.and_time(time);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2024-01-10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn test_parse_date_trims_whitespace() {
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), d("2024-02-29"));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("Jan 10"),
            Err(CoreError::InvalidDate { .. })
        ));
        assert!(parse_date("2023-02-29").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("18:30").unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap()
        );
        assert!(matches!(
            parse_time("25:00"),
            Err(CoreError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_days_between_forward() {
        assert_eq!(days_between(d("2024-01-01"), d("2024-01-10")), 9);
        assert_eq!(days_between(d("2024-01-01"), d("2024-01-01")), 0);
    }

    #[test]
    fn test_days_between_crosses_month_and_leap_day() {
        assert_eq!(days_between(d("2024-02-28"), d("2024-03-01")), 2);
        assert_eq!(days_between(d("2023-12-31"), d("2024-01-01")), 1);
    }

    #[test]
    fn test_days_between_reversed_is_zero() {
        assert_eq!(days_between(d("2024-01-10"), d("2024-01-01")), 0);
    }

    #[test]
    fn test_min_max_date_option_tolerant() {
        let a = Some(d("2024-01-05"));
        let b = Some(d("2024-01-02"));
        assert_eq!(min_date(a, b), b);
        assert_eq!(max_date(a, b), a);
        assert_eq!(min_date(None, a), a);
        assert_eq!(max_date(a, None), a);
        assert_eq!(min_date(None, None), None);
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(d("2024-01-30"), 3), d("2024-02-02"));
        assert_eq!(add_days(d("2024-01-01"), -1), d("2023-12-31"));
    }

    #[test]
    fn test_at_local_keeps_wall_clock() {
        let date = d("2024-03-05");
        let time = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        let ts = at_local(date, time);
        assert_eq!(ts.date_naive(), date);
        assert_eq!(ts.time(), time);
    }
}
