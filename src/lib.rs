//! Month-grid calendars rendered as HTML tables, with events bound to days.
//!
//! ```
//! use simcal::{Calendar, ClassNames, Highlight};
//! use time::macros::date;
//!
//! let mut cal = Calendar::new(date!(2022 - 10 - 01));
//! cal.set_week_start(time::Weekday::Monday);
//! cal.set_highlight(Highlight::Date(date!(2022 - 10 - 19)));
//! cal.add_event("<b>Trip</b>", date!(2022 - 10 - 14), Some(date!(2022 - 10 - 16)))?;
//! let html = cal.to_html(&ClassNames::default())?;
//! assert!(html.contains("<caption>October 2022</caption>"));
//! # Ok::<(), simcal::CalendarError>(())
//! ```
mod calendar;
pub mod config;
pub mod dates;
mod error;
mod events;
pub mod grid;
pub mod html;
mod week;
pub use crate::calendar::{Calendar, Highlight};
pub use crate::error::CalendarError;
pub use crate::events::{EventAnnotation, EventIndex};
pub use crate::grid::{render, DayCell, Grid, GridCell, GridRow};
pub use crate::html::{ClassNames, HtmlTable};
pub use crate::week::{first_day_column, WeekConfiguration, WeekStart};
