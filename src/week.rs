use crate::dates::{day_of_week, weekday_from_name, DAYS_IN_WEEK};
use crate::error::CalendarError;
use std::fmt;
use std::str::FromStr;
use time::{Date, Month, Weekday, Weekday::*};

const DEFAULT_LABELS: [&str; DAYS_IN_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The day of the week shown in the leftmost column of the grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekStart(Weekday);

impl WeekStart {
    /// Interpret `n` as a day of the week counted from Sunday = 0.  Values
    /// outside `0..7`, including negative ones, wrap around.
    pub fn from_index(n: i64) -> WeekStart {
        WeekStart(match n.rem_euclid(7) {
            0 => Sunday,
            1 => Monday,
            2 => Tuesday,
            3 => Wednesday,
            4 => Thursday,
            5 => Friday,
            _ => Saturday,
        })
    }

    pub fn weekday(self) -> Weekday {
        self.0
    }

    /// Number of days from Sunday, always in `0..7`
    pub fn offset(self) -> u8 {
        self.0.number_days_from_sunday()
    }
}

impl Default for WeekStart {
    fn default() -> WeekStart {
        WeekStart(Sunday)
    }
}

impl From<Weekday> for WeekStart {
    fn from(wd: Weekday) -> WeekStart {
        WeekStart(wd)
    }
}

impl FromStr for WeekStart {
    type Err = CalendarError;

    /// Accepts either an integer (Sunday = 0) or an English weekday name
    fn from_str(s: &str) -> Result<WeekStart, CalendarError> {
        if let Ok(n) = s.trim().parse::<i64>() {
            Ok(WeekStart::from_index(n))
        } else {
            weekday_from_name(s)
                .map(WeekStart)
                .ok_or_else(|| CalendarError::InvalidOffset { value: s.to_owned() })
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Week-start setting plus the weekday labels shown in the header row.
///
/// Labels are always stored in natural order, Sunday first, regardless of
/// the week start; [`WeekConfiguration::effective_labels()`] applies the
/// rotation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeekConfiguration {
    week_start: WeekStart,
    labels: [String; DAYS_IN_WEEK],
}

impl WeekConfiguration {
    pub fn new(week_start: WeekStart) -> WeekConfiguration {
        WeekConfiguration {
            week_start,
            labels: DEFAULT_LABELS.map(String::from),
        }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn set_week_start(&mut self, week_start: WeekStart) {
        self.week_start = week_start;
    }

    pub fn labels(&self) -> &[String; DAYS_IN_WEEK] {
        &self.labels
    }

    /// Replace the weekday labels.  `labels` must list exactly seven names,
    /// Sunday first.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidLabelCount`] for any other count, in
    /// which case the current labels are left in place.
    pub fn set_labels<I, S>(&mut self, labels: I) -> Result<(), CalendarError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<String>>();
        self.labels = <[String; DAYS_IN_WEEK]>::try_from(labels).map_err(|v| {
            CalendarError::InvalidLabelCount {
                expected: DAYS_IN_WEEK,
                actual: v.len(),
            }
        })?;
        Ok(())
    }

    /// Restore the default English abbreviations
    pub fn reset_labels(&mut self) {
        self.labels = DEFAULT_LABELS.map(String::from);
    }

    /// The labels in display order: index 0 is the label of the week-start
    /// day.
    pub fn effective_labels(&self) -> [String; DAYS_IN_WEEK] {
        let k = usize::from(self.week_start.offset());
        std::array::from_fn(|i| self.labels[(i + k) % DAYS_IN_WEEK].clone())
    }
}

impl Default for WeekConfiguration {
    fn default() -> WeekConfiguration {
        WeekConfiguration::new(WeekStart::default())
    }
}

/// The zero-based column in which day 1 of the given month falls
///
/// # Errors
///
/// Returns [`CalendarError::InvalidYear`] if the month cannot be represented.
pub fn first_day_column(
    year: i32,
    month: Month,
    week_start: WeekStart,
) -> Result<usize, CalendarError> {
    let first = Date::from_calendar_date(year, month, 1)
        .map_err(|_| CalendarError::InvalidYear { year })?;
    Ok(column_of(first, week_start))
}

pub(crate) fn column_of(date: Date, week_start: WeekStart) -> usize {
    // Both operands are in 0..7, so adding 7 first keeps this unsigned
    usize::from((day_of_week(date) + 7 - week_start.offset()) % 7)
}
