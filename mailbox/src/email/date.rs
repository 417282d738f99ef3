//! Module dedicated to archived dates.
//!
//! Dates of the archive come as loose strings. They are parsed
//! leniently: a date that cannot be parsed is an unknown date, never
//! an error.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use tracing::debug;

pub const UNKNOWN_DATE: &str = "Unknown date";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a date from a loose string.
///
/// Dates carrying an offset keep it. Naive dates (with or without
/// time) are interpreted in the local time zone.
pub fn parse_datetime(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();

    if input.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date);
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(input) {
        return Some(date);
    }

    if let Some(date) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(input, fmt).ok())
    {
        return Some(date);
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });

    match naive {
        Some(naive) => from_local(naive),
        None => {
            debug!("cannot parse date {input:?}, considering it unknown");
            None
        }
    }
}

/// Attaches the local time zone to the given naive date.
///
/// Returns `None` for local times that do not exist (daylight saving
/// time gaps).
pub fn from_local(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|date| date.fixed_offset())
}

/// Converts the given date to the local wall clock.
pub fn to_local(date: &DateTime<FixedOffset>) -> NaiveDateTime {
    date.with_timezone(&Local).naive_local()
}

/// Returns the number of milliseconds since the epoch, 0 for unknown
/// dates.
pub fn timestamp_millis(date: Option<&DateTime<FixedOffset>>) -> i64 {
    date.map(DateTime::timestamp_millis).unwrap_or_default()
}

/// Formats the time part of a date, for example `2:00 PM`.
pub fn format_time(date: &NaiveDateTime) -> String {
    date.format("%-I:%M %p").to_string()
}

/// Formats a date for the email list, relatively to `now`.
///
/// - less than one day old: `Today 2:00 PM`
/// - less than one week old: `Fri 2:00 PM`
/// - same year: `Jun 15 2:00 PM`
/// - older: `Jun 15, 2001 2:00 PM`
pub fn format_list_date(date: Option<&DateTime<FixedOffset>>, now: NaiveDateTime) -> String {
    let Some(date) = date else {
        return UNKNOWN_DATE.to_owned();
    };

    let date = to_local(date);
    let time = format_time(&date);
    let diff_days = (now - date).num_milliseconds().div_euclid(86_400_000);

    if diff_days == 0 {
        format!("Today {time}")
    } else if diff_days < 7 {
        format!("{} {time}", date.format("%a"))
    } else if date.year() == now.year() {
        format!("{} {time}", date.format("%b %-d"))
    } else {
        format!("{} {time}", date.format("%b %-d, %Y"))
    }
}

/// Formats a date for the email detail, for example `Jun 15, 2001 |
/// 2:00 PM`.
pub fn format_detail_date(date: Option<&DateTime<FixedOffset>>) -> String {
    match date {
        Some(date) => {
            let date = to_local(date);
            format!("{} | {}", date.format("%b %-d, %Y"), format_time(&date))
        }
        None => UNKNOWN_DATE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, Timelike};

    use super::*;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn parse_naive_dates_as_local() {
        let date = parse_datetime("2001-06-15T14:00").unwrap();
        assert_eq!(to_local(&date), naive("2001-06-15 14:00"));

        let date = parse_datetime("2001-06-15 14:30:12").unwrap();
        assert_eq!(to_local(&date).minute(), 30);

        let date = parse_datetime("2001-03-01").unwrap();
        assert_eq!(
            to_local(&date).date(),
            NaiveDate::from_ymd_opt(2001, 3, 1).unwrap()
        );
    }

    #[test]
    fn parse_dates_with_offset() {
        let a = parse_datetime("2001-05-14T16:39:00-07:00").unwrap();
        let b = parse_datetime("Mon, 14 May 2001 16:39:00 -0700").unwrap();
        let c = parse_datetime("2001-05-14 23:39:00+00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.timestamp(), c.timestamp());
    }

    #[test]
    fn malformed_dates_are_unknown() {
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("   "), None);
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime("2001-13-45"), None);
        assert_eq!(timestamp_millis(None), 0);
    }

    #[test]
    fn list_dates() {
        let now = naive("2001-06-15 18:00");
        let date = |s: &str| parse_datetime(s);

        assert_eq!(
            format_list_date(date("2001-06-15T14:00").as_ref(), now),
            "Today 2:00 PM"
        );
        assert_eq!(
            format_list_date(date("2001-06-12T09:05").as_ref(), now),
            "Tue 9:05 AM"
        );
        assert_eq!(
            format_list_date(date("2001-01-02T00:00").as_ref(), now),
            "Jan 2 12:00 AM"
        );
        assert_eq!(
            format_list_date(date("1999-12-31T23:59").as_ref(), now),
            "Dec 31, 1999 11:59 PM"
        );
        assert_eq!(format_list_date(None, now), UNKNOWN_DATE);
    }

    #[test]
    fn detail_dates() {
        let date = parse_datetime("2001-06-15T14:00");
        assert_eq!(format_detail_date(date.as_ref()), "Jun 15, 2001 | 2:00 PM");
        assert_eq!(format_detail_date(None), UNKNOWN_DATE);
    }
}
