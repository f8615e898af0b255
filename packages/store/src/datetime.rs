//! # Date and time display helpers
//!
//! Total functions that turn a timestamp into a display string. They never
//! fail: missing input renders as `"N/A"`, unparseable input as
//! `"Invalid Date"` (or `"Invalid Time"` for [`format_time`]).
//!
//! | Function | Example output |
//! |----------|----------------|
//! | [`format_date_and_time`] | `Nov 23, 2024, 2:30 PM` |
//! | [`format_date`] | `Nov 23, 2024` |
//! | [`format_time`] | `2:30 PM` |
//! | [`get_relative_time`] | `Just now`, `5 minutes ago`, `1 hour ago`, `3 days ago` |
//!
//! The plain functions render in the local time zone. The `*_in` variants take
//! the zone explicitly and [`relative_time_at`] also takes the clock, which is
//! what the tests use.
//!
//! Accepted inputs are anything implementing [`AsTimestamp`]: strings (RFC 3339,
//! RFC 2822, `YYYY-MM-DD`, or a zone-less `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]`),
//! `chrono::DateTime`s, epoch milliseconds, and `Option`s of those. A date-only
//! string means UTC midnight; a zone-less date-time is read in the display zone.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";
pub const INVALID_TIME: &str = "Invalid Time";

const DATE_FORMAT: &str = "%b %-d, %Y";
const TIME_FORMAT: &str = "%-I:%M %p";
const DATE_TIME_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Outcome of reading a timestamp input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed {
    /// No value: `None`, an empty string, or epoch zero.
    Missing,
    Invalid,
    At(DateTime<Utc>),
}

/// A value that can be read as a point in time.
pub trait AsTimestamp {
    /// Resolve to an instant. `zone` is used for inputs that carry no offset.
    fn resolve<Tz: TimeZone>(&self, zone: &Tz) -> Parsed;
}

impl AsTimestamp for str {
    fn resolve<Tz: TimeZone>(&self, zone: &Tz) -> Parsed {
        let s = self.trim();
        if s.is_empty() {
            return Parsed::Missing;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Parsed::At(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Parsed::At(dt.with_timezone(&Utc));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return match date.and_hms_opt(0, 0, 0) {
                Some(naive) => Parsed::At(Utc.from_utc_datetime(&naive)),
                None => Parsed::Invalid,
            };
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return match zone.from_local_datetime(&naive).earliest() {
                    Some(dt) => Parsed::At(dt.with_timezone(&Utc)),
                    None => Parsed::Invalid,
                };
            }
        }
        Parsed::Invalid
    }
}

impl AsTimestamp for String {
    fn resolve<Tz: TimeZone>(&self, zone: &Tz) -> Parsed {
        self.as_str().resolve(zone)
    }
}

impl<Z: TimeZone> AsTimestamp for DateTime<Z> {
    fn resolve<Tz: TimeZone>(&self, _zone: &Tz) -> Parsed {
        Parsed::At(self.with_timezone(&Utc))
    }
}

/// Milliseconds since the Unix epoch. Zero counts as missing.
impl AsTimestamp for i64 {
    fn resolve<Tz: TimeZone>(&self, _zone: &Tz) -> Parsed {
        if *self == 0 {
            return Parsed::Missing;
        }
        match Utc.timestamp_millis_opt(*self).single() {
            Some(dt) => Parsed::At(dt),
            None => Parsed::Invalid,
        }
    }
}

impl<T: AsTimestamp> AsTimestamp for Option<T> {
    fn resolve<Tz: TimeZone>(&self, zone: &Tz) -> Parsed {
        match self {
            Some(value) => value.resolve(zone),
            None => Parsed::Missing,
        }
    }
}

impl<T: AsTimestamp + ?Sized> AsTimestamp for &T {
    fn resolve<Tz: TimeZone>(&self, zone: &Tz) -> Parsed {
        (**self).resolve(zone)
    }
}

fn render<V, Tz>(value: V, zone: &Tz, format: &str, invalid: &str) -> String
where
    V: AsTimestamp,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match value.resolve(zone) {
        Parsed::Missing => NOT_AVAILABLE.to_string(),
        Parsed::Invalid => invalid.to_string(),
        Parsed::At(dt) => dt.with_timezone(zone).format(format).to_string(),
    }
}

pub fn format_date_and_time_in<V, Tz>(value: V, zone: &Tz) -> String
where
    V: AsTimestamp,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    render(value, zone, DATE_TIME_FORMAT, INVALID_DATE)
}

pub fn format_date_in<V, Tz>(value: V, zone: &Tz) -> String
where
    V: AsTimestamp,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    render(value, zone, DATE_FORMAT, INVALID_DATE)
}

pub fn format_time_in<V, Tz>(value: V, zone: &Tz) -> String
where
    V: AsTimestamp,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    render(value, zone, TIME_FORMAT, INVALID_TIME)
}

/// `Nov 23, 2024, 2:30 PM` in local time.
pub fn format_date_and_time<V: AsTimestamp>(value: V) -> String {
    format_date_and_time_in(value, &Local)
}

/// `Nov 23, 2024` in local time.
pub fn format_date<V: AsTimestamp>(value: V) -> String {
    format_date_in(value, &Local)
}

/// `2:30 PM` in local time.
pub fn format_time<V: AsTimestamp>(value: V) -> String {
    format_time_in(value, &Local)
}

/// How long before `now` the value lies, bucketed for humans.
///
/// Under a minute (including instants in the future) is `"Just now"`; after
/// 30 days the plain date is shown instead.
pub fn relative_time_at<V, Tz>(value: V, now: DateTime<Utc>, zone: &Tz) -> String
where
    V: AsTimestamp,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let at = match value.resolve(zone) {
        Parsed::Missing => return NOT_AVAILABLE.to_string(),
        Parsed::Invalid => return INVALID_DATE.to_string(),
        Parsed::At(at) => at,
    };

    let secs = (now - at).num_milliseconds().div_euclid(1000);
    let mins = secs.div_euclid(60);
    let hours = mins.div_euclid(60);
    let days = hours.div_euclid(24);

    if secs < 60 {
        "Just now".to_string()
    } else if mins < 60 {
        ago(mins, "minute")
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days < 30 {
        ago(days, "day")
    } else {
        format_date_in(at, zone)
    }
}

/// Relative time against the current clock, in local time.
pub fn get_relative_time<V: AsTimestamp>(value: V) -> String {
    relative_time_at(value, Utc::now(), &Local)
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
