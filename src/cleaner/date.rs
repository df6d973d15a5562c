//! Date codec.
//!
//! Decoding accepts a date value or a date string and produces a UTC date with
//! millisecond precision. Encoding writes the date back as an ISO-8601 string
//! such as `2020-02-20T00:00:00.000Z`.
//!
//! Accepted string forms:
//! - RFC 3339 with an offset: `2020-02-20T10:30:00.000Z`, `2020-02-20T10:30:00+02:00`
//! - ISO date only: `2020`, `2020-02`, `2020-02-20`
//! - ISO date and time without an offset, read as UTC: `2020-02-20T10:30`
//! - RFC 2822: `Thu, 20 Feb 2020 00:00:00 GMT`
//! - Month first: `02-20-2020`, `02/20/2020`
//! - Expanded years, as encoded outside `0000..=9999`: `+012345-01-01T00:00:00.000Z`

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::{format_date, Data};
use crate::error::{CleanError, CleanResult, ErrorKind};

use super::codec::{Codec, Encoder};
use super::traits::Cleaner;

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})(?:-(\d{2})(?:-(\d{2}))?)?$").expect("iso date regex")
});
static MONTH_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})([-/])(\d{1,2})([-/])(\d{4})$").expect("month-first regex")
});

static EXPANDED_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-])(\d{6})-(\d{2})-(\d{2})(?:T(\d{2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?Z?)?$")
        .expect("expanded year regex")
});

const LOCAL_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Decodes date strings and date values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateDecoder;

impl Cleaner for DateDecoder {
    type Output = DateTime<Utc>;

    fn clean(&self, raw: &Data) -> CleanResult<DateTime<Utc>> {
        match raw {
            Data::Date(date) => Ok(date.trunc_subsecs(3)),
            Data::String(text) => parse_date(text).ok_or_else(|| {
                tracing::debug!(input = %text, "unrecognized date string");
                CleanError::new(ErrorKind::InvalidDateFormat, "Invalid date format")
            }),
            other => Err(CleanError::expected(
                ErrorKind::TypeMismatch,
                "a date string",
                other,
            )),
        }
    }
}

/// Encodes date values as ISO-8601 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateEncoder;

impl Encoder for DateEncoder {
    fn encode(&self, clean: &Data) -> CleanResult<Data> {
        clean
            .as_date()
            .map(|date| Data::String(format_date(date)))
            .ok_or_else(|| CleanError::expected(ErrorKind::TypeMismatch, "a date", clean))
    }
}

/// The date codec.
pub type DateCodec = Codec<DateDecoder, DateEncoder>;

/// Creates the date codec.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_date, uncleaner, Cleaner, Data};
///
/// let date = as_date().clean(&Data::from("2020-02-20")).unwrap();
/// assert_eq!(date.to_rfc3339(), "2020-02-20T00:00:00+00:00");
///
/// let raw = uncleaner(as_date()).unclean(&Data::from(date)).unwrap();
/// assert_eq!(raw, Data::from("2020-02-20T00:00:00.000Z"));
///
/// let error = as_date().clean(&Data::from("invalid date")).unwrap_err();
/// assert_eq!(error.to_string(), "Invalid date format");
/// ```
pub fn as_date() -> DateCodec {
    Codec::new(DateDecoder, DateEncoder)
}

/// Parses the accepted date string forms into a UTC date.
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    parse_with_offset(text)
        .or_else(|| parse_iso_date(text))
        .or_else(|| parse_local_date_time(text))
        .or_else(|| parse_month_first(text))
        .or_else(|| parse_expanded_year(text))
        .map(|date| date.trunc_subsecs(3))
}

fn parse_with_offset(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

fn parse_iso_date(text: &str) -> Option<DateTime<Utc>> {
    let caps = ISO_DATE_RE.captures(text)?;
    let year = caps[1].parse().ok()?;
    let month = caps.get(2).map_or(Some(1), |m| m.as_str().parse().ok())?;
    let day = caps.get(3).map_or(Some(1), |d| d.as_str().parse().ok())?;
    midnight(year, month, day)
}

fn parse_local_date_time(text: &str) -> Option<DateTime<Utc>> {
    LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

fn parse_month_first(text: &str) -> Option<DateTime<Utc>> {
    let caps = MONTH_FIRST_RE.captures(text)?;
    // Mixed separators such as `02-20/2020` are not a date.
    if caps[2] != caps[4] {
        return None;
    }
    let month = caps[1].parse().ok()?;
    let day = caps[3].parse().ok()?;
    let year = caps[5].parse().ok()?;
    midnight(year, month, day)
}

fn parse_expanded_year(text: &str) -> Option<DateTime<Utc>> {
    let caps = EXPANDED_YEAR_RE.captures(text)?;
    let magnitude: i32 = caps[2].parse().ok()?;
    // `-000000` is not a year.
    let year = match &caps[1] {
        "-" if magnitude == 0 => return None,
        "-" => -magnitude,
        _ => magnitude,
    };
    let field = |i: usize| caps.get(i).map_or(Some(0), |m| m.as_str().parse::<u32>().ok());
    let nanos = caps
        .get(8)
        .map_or(Some(0), |m| format!("{:0<9}", m.as_str()).parse::<u32>().ok())?;
    NaiveDate::from_ymd_opt(year, caps[3].parse().ok()?, caps[4].parse().ok()?)?
        .and_hms_nano_opt(field(5)?, field(6)?, field(7)?, nanos)
        .map(|naive| naive.and_utc())
}

fn midnight(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}
