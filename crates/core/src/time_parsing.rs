//! # Time Parsing
//!
//! Turns the date and time strings stored with a schedule record into
//! absolute instants, and breaks durations down into countdown units.
//!
//! Two stored date shapes are accepted:
//!
//! - ISO `YYYY-MM-DD` (e.g. `2026-01-12`)
//! - `DD-Mon-YYYY` with an English three-letter month (e.g. `12-Jan-2026`)
//!
//! Times of day use a 12-hour clock with a meridiem marker (`8:32 AM`), and
//! slot ranges join two of them with `" - "`.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Timelike};
use tracing::warn;

use crate::errors::{AdvisingError, AdvisingResult};
use crate::models::phase::CountdownDuration;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const RANGE_SEPARATOR: &str = " - ";

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Start and end time of day of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Parses a stored calendar date in either accepted shape.
///
/// # Errors
///
/// * `AdvisingError::MalformedInput` - the text matches neither shape or
///   names a day that does not exist
pub fn parse_calendar_date(text: &str) -> AdvisingResult<NaiveDate> {
    let text = text.trim();

    if text.len() == 10 {
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(date);
        }
    }

    let parts: Vec<&str> = text.split('-').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(malformed_date(text));
    };

    let day: u32 = day.parse().map_err(|_| malformed_date(text))?;
    // Month abbreviations are matched exactly as stored
    let month = MONTH_ABBREVIATIONS
        .iter()
        .position(|abbreviation| abbreviation == month)
        .ok_or_else(|| malformed_date(text))?;
    let year: i32 = year.parse().map_err(|_| malformed_date(text))?;

    NaiveDate::from_ymd_opt(year, month as u32 + 1, day).ok_or_else(|| malformed_date(text))
}

/// Lenient variant of [`parse_calendar_date`]: midnight of the parsed date,
/// or `now` itself when the text cannot be parsed.
pub fn parse_calendar_date_or_now(
    text: &str,
    now: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    match parse_calendar_date(text) {
        Ok(date) => combine(date, NaiveTime::default(), *now.offset()),
        Err(err) => {
            warn!("Falling back to the current instant for stored date: {}", err);
            now
        }
    }
}

/// Parses a slot range such as `"8:32 AM - 8:52 AM"`.
pub fn parse_time_range(text: &str) -> AdvisingResult<TimeRange> {
    let (start, end) = text.split_once(RANGE_SEPARATOR).ok_or_else(|| {
        AdvisingError::MalformedInput(format!("Time range '{}' has no '{}'", text, RANGE_SEPARATOR))
    })?;

    Ok(TimeRange {
        start: parse_clock_time(start)?,
        end: parse_clock_time(end)?,
    })
}

/// Parses `h:mm AM|PM` into a 24-hour time of day.
///
/// `12 AM` becomes hour 0 and any PM hour other than 12 gains 12 hours.
/// With a marker the hour may not exceed 12.
/// Without a marker the hour is taken as-is.
pub fn parse_clock_time(text: &str) -> AdvisingResult<NaiveTime> {
    let text = text.trim();
    let mut tokens = text.split_whitespace();

    let clock = tokens.next().ok_or_else(|| malformed_time(text))?;
    let marker = tokens.next();
    if tokens.next().is_some() {
        return Err(malformed_time(text));
    }

    let (hours, minutes) = clock.split_once(':').ok_or_else(|| malformed_time(text))?;
    let mut hours: u32 = hours.parse().map_err(|_| malformed_time(text))?;
    let minutes: u32 = minutes.parse().map_err(|_| malformed_time(text))?;

    match marker {
        Some("AM") | Some("PM") if hours > 12 => {
            return Err(malformed_time(text));
        }
        Some("AM") if hours == 12 => hours = 0,
        Some("PM") if hours != 12 => hours += 12,
        Some("AM") | Some("PM") | None => {}
        Some(_) => return Err(malformed_time(text)),
    }

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(|| malformed_time(text))
}

/// Places `time` (hour and minute only) on `date` in `offset`.
pub fn combine(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    // Both setters accept zero, so the fallback is never taken
    let time = time
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time);
    let local = date.and_time(time);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));

    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Splits a millisecond duration into days, hours, minutes and seconds.
/// Negative durations count as zero.
pub fn decompose(duration_millis: i64) -> CountdownDuration {
    let millis = duration_millis.max(0);

    CountdownDuration {
        days: (millis / MILLIS_PER_DAY) as u64,
        hours: ((millis / MILLIS_PER_HOUR) % 24) as u64,
        minutes: ((millis / MILLIS_PER_MINUTE) % 60) as u64,
        seconds: ((millis / MILLIS_PER_SECOND) % 60) as u64,
    }
}

pub fn time_until(target: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> CountdownDuration {
    decompose((target - now).num_milliseconds())
}

/// Countdown to an optional target; no target means nothing is left.
pub fn time_left(
    target: Option<DateTime<FixedOffset>>,
    now: DateTime<FixedOffset>,
) -> CountdownDuration {
    target
        .map(|target| time_until(target, now))
        .unwrap_or_default()
}

fn malformed_date(text: &str) -> AdvisingError {
    AdvisingError::MalformedInput(format!("Unrecognized date '{}'", text))
}

fn malformed_time(text: &str) -> AdvisingError {
    AdvisingError::MalformedInput(format!("Unrecognized time '{}'", text))
}
