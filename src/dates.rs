//! Date arithmetic and parsing used by the grid and the front ends.
use crate::error::CalendarError;
use std::iter::successors;
use time::{
    macros::format_description, Date, Duration, Month, Month::*, OffsetDateTime, Weekday,
    Weekday::*,
};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) const MONTHS: [Month; 12] = [
    January, February, March, April, May, June, July, August, September, October, November,
    December,
];

/// Weekdays in their natural order, Sunday first
pub(crate) const WEEKDAYS: [Weekday; DAYS_IN_WEEK] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];

/// The current local date.  Falls back to UTC when the local offset cannot
/// be determined (e.g., in a multithreaded process on Unix).
pub fn today() -> Date {
    match OffsetDateTime::now_local() {
        Ok(now) => now.date(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to determine local offset; using UTC");
            OffsetDateTime::now_utc().date()
        }
    }
}

pub fn days_in_month(year: i32, month: Month) -> u8 {
    time::util::days_in_month(month, year)
}

/// Day of the week counted from Sunday = 0
pub fn day_of_week(date: Date) -> u8 {
    date.weekday().number_days_from_sunday()
}

/// Returns `None` if the result is not representable
pub fn add_days(date: Date, n: i64) -> Option<Date> {
    date.checked_add(Duration::days(n))
}

/// Every date from `start` through `end`, inclusive.  Stops early at the end
/// of time.
pub fn iter_days(start: Date, end: Date) -> impl Iterator<Item = Date> {
    successors(Some(start), |&d| add_days(d, 1)).take_while(move |&d| d <= end)
}

/// Parse a date as typed by a user.  Accepted forms are `YYYY-MM-DD`,
/// `today`, `tomorrow`, `yesterday`, `Month D YYYY`, `Month D, YYYY`,
/// `Month YYYY` (meaning the first of the month) and `Month D` (in the year
/// of `today`).
pub fn parse_date(s: &str, today: Date) -> Result<Date, CalendarError> {
    let invalid = || CalendarError::InvalidDate {
        value: s.to_owned(),
    };
    let trimmed = s.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return today.next_day().ok_or_else(invalid),
        "yesterday" => return today.previous_day().ok_or_else(invalid),
        _ => (),
    }
    if let Ok(d) = Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
        return Ok(d);
    }
    let cleaned = trimmed.replace(',', " ");
    let words = cleaned.split_whitespace().collect::<Vec<_>>();
    let Some((first, rest)) = words.split_first() else {
        return Err(invalid());
    };
    let month = month_from_name(first).ok_or_else(invalid)?;
    let (year, day) = match rest {
        [y] if is_year_like(y) => (y.parse::<i32>().map_err(|_| invalid())?, 1),
        [d] => (today.year(), d.parse::<u8>().map_err(|_| invalid())?),
        [d, y] => (
            y.parse::<i32>().map_err(|_| invalid())?,
            d.parse::<u8>().map_err(|_| invalid())?,
        ),
        _ => return Err(invalid()),
    };
    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

/// Parse the month to display.  Accepts `YYYY-MM` in addition to everything
/// [`parse_date`] accepts.
pub fn parse_month(s: &str, today: Date) -> Result<(i32, Month), CalendarError> {
    if let Some((y, m)) = s.trim().split_once('-') {
        if let (Ok(year), Ok(month)) = (y.parse::<i32>(), m.parse::<u8>()) {
            let month = Month::try_from(month).map_err(|_| CalendarError::InvalidMonth {
                month: i64::from(month),
            })?;
            return Ok((year, month));
        }
    }
    let date = parse_date(s, today)?;
    Ok((date.year(), date.month()))
}

/// Look up an English month name, full or abbreviated to three letters
pub(crate) fn month_from_name(s: &str) -> Option<Month> {
    MONTHS
        .into_iter()
        .find(|m| name_matches(&m.to_string(), s))
}

/// Look up an English weekday name, full or abbreviated to three letters
pub(crate) fn weekday_from_name(s: &str) -> Option<Weekday> {
    WEEKDAYS
        .into_iter()
        .find(|wd| name_matches(&wd.to_string(), s))
}

fn name_matches(name: &str, s: &str) -> bool {
    let s = s.trim();
    name.eq_ignore_ascii_case(s) || (s.len() == 3 && name[..3].eq_ignore_ascii_case(s))
}

fn is_year_like(s: &str) -> bool {
    s.trim_start_matches('-').len() > 2
}
