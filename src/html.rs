//! HTML rendering of a [`Grid`]
use crate::events::EventAnnotation;
use crate::grid::{DayCell, Grid, GridCell};
use askama::Template;
use serde::Deserialize;

/// The `class` attribute values used in the generated markup.  Empty values
/// are left out of an event's class list.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ClassNames {
    /// On the `<table>` element
    pub calendar: String,
    /// On filler cells before the first of the month
    pub leading_day: String,
    /// On filler cells after the last of the month
    pub trailing_day: String,
    /// On today's cell
    pub highlight: String,
    /// On the `<div>` wrapping a day's events
    pub events: String,
    /// On the `<div>` around each single event
    pub event: String,
    /// Added to an event's `<div>` when the event also falls on the previous
    /// day
    pub has_previous: String,
    /// Added to an event's `<div>` when the event also falls on the next day
    pub has_next: String,
    /// Added to an event's `<div>` when the event has details
    pub has_details: String,
    /// On the `<span>` holding an event's details
    pub details: String,
}

impl Default for ClassNames {
    fn default() -> ClassNames {
        ClassNames {
            calendar: String::from("simcal"),
            leading_day: String::from("simcal-lead"),
            trailing_day: String::from("simcal-trail"),
            highlight: String::from("simcal-highlight"),
            events: String::from("simcal-events"),
            event: String::from("simcal-event"),
            has_previous: String::from("simcal-has-previous"),
            has_next: String::from("simcal-has-next"),
            has_details: String::from("simcal-has-details"),
            details: String::from("simcal-event-details"),
        }
    }
}

/// A [`Grid`] paired with everything needed to display it as an HTML table.
/// Use its `Display` implementation (or `to_string()`) to get the markup.
///
/// Labels, the caption and class names are escaped.  Event content and
/// details are caller-supplied markup and are emitted as-is.
#[derive(Clone, Copy, Debug, Template)]
#[template(path = "table.html")]
pub struct HtmlTable<'a> {
    grid: &'a Grid,
    caption: Option<&'a str>,
    classes: &'a ClassNames,
}

impl<'a> HtmlTable<'a> {
    pub fn new(grid: &'a Grid, classes: &'a ClassNames) -> Self {
        HtmlTable {
            grid,
            caption: None,
            classes,
        }
    }

    pub fn caption(mut self, caption: &'a str) -> Self {
        self.caption = Some(caption);
        self
    }

    fn event_class(&self, day: &DayCell, event: &EventAnnotation) -> String {
        let classes = self.classes;
        let mut names = vec![classes.event.as_str()];
        if day.continues_before(event) {
            names.push(&classes.has_previous);
        }
        if day.continues_after(event) {
            names.push(&classes.has_next);
        }
        if event.details.is_some() {
            names.push(&classes.has_details);
        }
        names.retain(|s| !s.is_empty());
        names.join(" ")
    }
}
