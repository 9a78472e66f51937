use crate::dates;
use crate::error::CalendarError;
use crate::events::EventIndex;
use crate::grid::{render_month, Grid};
use crate::html::{ClassNames, HtmlTable};
use crate::week::{WeekConfiguration, WeekStart};
use time::{Date, Month, Month::January};

/// Which date, if any, gets the "today" marker
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Highlight {
    /// The current local date, read from the clock each time a grid is built
    #[default]
    Auto,
    Date(Date),
    Disabled,
}

impl Highlight {
    pub fn resolve(self) -> Option<Date> {
        match self {
            Highlight::Auto => Some(dates::today()),
            Highlight::Date(d) => Some(d),
            Highlight::Disabled => None,
        }
    }
}

/// A month to display together with the settings and events used to draw it
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Calendar {
    year: i32,
    month: Month,
    week: WeekConfiguration,
    highlight: Highlight,
    month_names: Option<[String; 12]>,
    events: EventIndex,
}

impl Calendar {
    /// A calendar showing the month containing `date`
    pub fn new(date: Date) -> Calendar {
        Calendar {
            year: date.year(),
            month: date.month(),
            week: WeekConfiguration::default(),
            highlight: Highlight::default(),
            month_names: None,
            events: EventIndex::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in `1..=12`
    /// or [`CalendarError::InvalidYear`] if `year` is not representable.
    pub fn set_month(&mut self, year: i32, month: u8) -> Result<(), CalendarError> {
        let month = Month::try_from(month).map_err(|_| CalendarError::InvalidMonth {
            month: i64::from(month),
        })?;
        self.goto(year, month)
    }

    /// Show the month after the current one
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYear`] when stepping past the last
    /// representable month, in which case the calendar is unchanged.
    pub fn next_month(&mut self) -> Result<(), CalendarError> {
        let month = self.month.next();
        let year = if month == January {
            self.year + 1
        } else {
            self.year
        };
        self.goto(year, month)
    }

    /// Show the month before the current one
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYear`] when stepping before the first
    /// representable month, in which case the calendar is unchanged.
    pub fn previous_month(&mut self) -> Result<(), CalendarError> {
        let year = if self.month == January {
            self.year - 1
        } else {
            self.year
        };
        self.goto(year, self.month.previous())
    }

    fn goto(&mut self, year: i32, month: Month) -> Result<(), CalendarError> {
        Date::from_calendar_date(year, month, 1)
            .map_err(|_| CalendarError::InvalidYear { year })?;
        self.year = year;
        self.month = month;
        Ok(())
    }

    pub fn week(&self) -> &WeekConfiguration {
        &self.week
    }

    pub fn set_week_start<W: Into<WeekStart>>(&mut self, week_start: W) {
        self.week.set_week_start(week_start.into());
    }

    /// Override the weekday labels, Sunday first.  Passing `None` restores
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidLabelCount`] unless exactly seven
    /// labels are given.
    pub fn set_day_names<S: Into<String>>(
        &mut self,
        names: Option<Vec<S>>,
    ) -> Result<(), CalendarError> {
        match names {
            Some(names) => self.week.set_labels(names),
            None => {
                self.week.reset_labels();
                Ok(())
            }
        }
    }

    /// Override the month names used in captions, January first.  Passing
    /// `None` restores the English names.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidLabelCount`] unless exactly twelve
    /// names are given.
    pub fn set_month_names<S: Into<String>>(
        &mut self,
        names: Option<Vec<S>>,
    ) -> Result<(), CalendarError> {
        self.month_names = match names {
            Some(names) => {
                let names = names.into_iter().map(Into::into).collect::<Vec<String>>();
                Some(<[String; 12]>::try_from(names).map_err(|v| {
                    CalendarError::InvalidLabelCount {
                        expected: 12,
                        actual: v.len(),
                    }
                })?)
            }
            None => None,
        };
        Ok(())
    }

    pub fn month_name(&self, month: Month) -> String {
        match &self.month_names {
            Some(names) => names[usize::from(u8::from(month)) - 1].clone(),
            None => month.to_string(),
        }
    }

    /// E.g., "October 2022"
    pub fn caption(&self) -> String {
        format!("{} {}", self.month_name(self.month), self.year)
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }

    pub fn events(&self) -> &EventIndex {
        &self.events
    }

    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `end` is before `start`.
    pub fn add_event<S: Into<String>>(
        &mut self,
        content: S,
        start: Date,
        end: Option<Date>,
    ) -> Result<u64, CalendarError> {
        self.events.add_event(content, start, end.unwrap_or(start))
    }

    /// Add an event with details markup, shown after the content
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `end` is before `start`.
    pub fn add_event_with_details<S, D>(
        &mut self,
        content: S,
        details: Option<D>,
        start: Date,
        end: Option<Date>,
    ) -> Result<u64, CalendarError>
    where
        S: Into<String>,
        D: Into<String>,
    {
        self.events
            .add_event_with_details(content, details, start, end.unwrap_or(start))
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Lay out the current month.  Under [`Highlight::Auto`], the clock is
    /// read at the time of the call.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYear`] if the month is not
    /// representable.
    pub fn grid(&self) -> Result<Grid, CalendarError> {
        render_month(
            self.year,
            self.month,
            &self.week,
            self.highlight.resolve(),
            &self.events,
        )
    }

    /// Render the current month as an HTML table
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYear`] if the month is not
    /// representable.
    pub fn to_html(&self, classes: &ClassNames) -> Result<String, CalendarError> {
        let grid = self.grid()?;
        let caption = self.caption();
        Ok(HtmlTable::new(&grid, classes).caption(&caption).to_string())
    }
}
