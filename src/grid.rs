use crate::dates::{days_in_month, iter_days, DAYS_IN_WEEK};
use crate::error::CalendarError;
use crate::events::{EventAnnotation, EventIndex};
use crate::week::{column_of, WeekConfiguration};
use time::{Date, Month};

/// A dated cell of the grid
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DayCell {
    pub date: Date,
    pub is_today: bool,
    /// The day's events in the order they were added
    pub events: Vec<EventAnnotation>,
}

impl DayCell {
    pub fn day(&self) -> u8 {
        self.date.day()
    }

    pub fn contents(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().map(EventAnnotation::content)
    }

    /// Whether `event` also falls on the day before this one
    pub fn continues_before(&self, event: &EventAnnotation) -> bool {
        event.continues_before(self.date)
    }

    /// Whether `event` also falls on the day after this one
    pub fn continues_after(&self, event: &EventAnnotation) -> bool {
        event.continues_after(self.date)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GridCell {
    /// Padding before the first of the month
    Leading,
    Day(DayCell),
    /// Padding after the last of the month
    Trailing,
}

impl GridCell {
    pub fn is_filler(&self) -> bool {
        !matches!(self, GridCell::Day(_))
    }

    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(day) => Some(day),
            _ => None,
        }
    }
}

pub type GridRow = [GridCell; DAYS_IN_WEEK];

/// One month laid out in rows of seven cells
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    pub year: i32,
    pub month: Month,
    /// Header labels in display order
    pub labels: [String; DAYS_IN_WEEK],
    pub rows: Vec<GridRow>,
}

impl Grid {
    /// Iterate over the day cells in order
    pub fn days(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.rows.iter().flatten().filter_map(GridCell::as_day)
    }

    /// The (row, column) of the given date, if it is in this grid
    pub fn position_of(&self, date: Date) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|cell| cell.as_day().is_some_and(|d| d.date == date))
                .map(|c| (r, c))
        })
    }
}

/// Lay out the given month.
///
/// `month` is the month number, 1 through 12.  `today`, if given, is the
/// date whose cell is flagged as today; it need not be in the month.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in `1..=12`, or
/// [`CalendarError::InvalidYear`] if the month is outside the range of
/// representable dates.
pub fn render(
    year: i32,
    month: u8,
    config: &WeekConfiguration,
    today: Option<Date>,
    events: &EventIndex,
) -> Result<Grid, CalendarError> {
    let month = Month::try_from(month).map_err(|_| CalendarError::InvalidMonth {
        month: i64::from(month),
    })?;
    render_month(year, month, config, today, events)
}

/// Like [`render()`], but with the month already validated
///
/// # Errors
///
/// Returns [`CalendarError::InvalidYear`] if the month is outside the range
/// of representable dates.
pub fn render_month(
    year: i32,
    month: Month,
    config: &WeekConfiguration,
    today: Option<Date>,
    events: &EventIndex,
) -> Result<Grid, CalendarError> {
    let first = Date::from_calendar_date(year, month, 1)
        .map_err(|_| CalendarError::InvalidYear { year })?;
    let lead = column_of(first, config.week_start());
    let day_qty = usize::from(days_in_month(year, month));
    let row_qty = (lead + day_qty).div_ceil(DAYS_IN_WEEK);
    let mut days = iter_days(first, Date::MAX).take(day_qty).map(|date| {
        GridCell::Day(DayCell {
            date,
            is_today: today == Some(date),
            events: events.annotations_on(date).to_vec(),
        })
    });
    // Row boundaries are purely positional: every seven cells, counting the
    // leading fillers.
    let rows = (0..row_qty)
        .map(|r| {
            std::array::from_fn(|c| {
                if r == 0 && c < lead {
                    GridCell::Leading
                } else {
                    days.next().unwrap_or(GridCell::Trailing)
                }
            })
        })
        .collect::<Vec<GridRow>>();
    tracing::debug!(year, %month, lead, rows = row_qty, "built month grid");
    if tracing::enabled!(tracing::Level::TRACE) {
        let events_per_row = rows
            .iter()
            .map(|row| row.iter().filter_map(GridCell::as_day).map(|d| d.events.len()).sum())
            .collect::<Vec<usize>>();
        tracing::trace!(lead, days = day_qty, ?events_per_row, "grid contents");
    }
    Ok(Grid {
        year,
        month,
        labels: config.effective_labels(),
        rows,
    })
}
