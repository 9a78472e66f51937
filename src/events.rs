use crate::dates::iter_days;
use crate::error::CalendarError;
use std::collections::HashMap;
use std::sync::Arc;
use time::Date;

/// A piece of caller-supplied content attached to every date of an inclusive
/// span.  The content is opaque and is embedded verbatim when rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventAnnotation {
    pub sequence_id: u64,
    pub content: Arc<str>,
    /// Extra markup shown alongside the content, also embedded verbatim
    pub details: Option<Arc<str>>,
    pub start: Date,
    pub end: Date,
}

impl EventAnnotation {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Whether the event's span started before `date`
    pub fn continues_before(&self, date: Date) -> bool {
        self.start < date
    }

    /// Whether the event's span goes on after `date`
    pub fn continues_after(&self, date: Date) -> bool {
        date < self.end
    }
}

/// Events bucketed by date.
///
/// Every date's list is kept in ascending `sequence_id` order, which is the
/// order in which the events were added.  Sequence IDs are scoped to the
/// index and are never reused, not even after [`EventIndex::clear()`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EventIndex {
    next_id: u64,
    by_date: HashMap<Date, Vec<EventAnnotation>>,
}

impl EventIndex {
    pub fn new() -> EventIndex {
        EventIndex::default()
    }

    /// Attach `content` to every date from `start` through `end`, inclusive,
    /// and return the sequence ID assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `end` is before `start`.
    pub fn add_event<S: Into<String>>(
        &mut self,
        content: S,
        start: Date,
        end: Date,
    ) -> Result<u64, CalendarError> {
        self.add_event_with_details(content, None::<String>, start, end)
    }

    /// Like [`EventIndex::add_event()`], with optional details markup that
    /// renderers show after the content
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `end` is before `start`.
    pub fn add_event_with_details<S, D>(
        &mut self,
        content: S,
        details: Option<D>,
        start: Date,
        end: Date,
    ) -> Result<u64, CalendarError>
    where
        S: Into<String>,
        D: Into<String>,
    {
        if end < start {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(self.insert(content.into(), details.map(Into::into), start, end))
    }

    /// Attach `content` to a single date
    pub fn add_single<S: Into<String>>(&mut self, content: S, date: Date) -> u64 {
        self.insert(content.into(), None, date, date)
    }

    // Caller guarantees `start <= end`
    fn insert(
        &mut self,
        content: String,
        details: Option<String>,
        start: Date,
        end: Date,
    ) -> u64 {
        let sequence_id = self.next_id;
        self.next_id += 1;
        let annotation = EventAnnotation {
            sequence_id,
            content: Arc::from(content),
            // An empty string means "no details"
            details: details.filter(|s| !s.is_empty()).map(Arc::from),
            start,
            end,
        };
        for date in iter_days(start, end) {
            self.by_date
                .entry(date)
                .or_default()
                .push(annotation.clone());
        }
        tracing::debug!(sequence_id, %start, %end, "added event");
        sequence_id
    }

    pub fn events_on(&self, date: Date) -> Vec<&str> {
        self.annotations_on(date)
            .iter()
            .map(EventAnnotation::content)
            .collect()
    }

    pub fn annotations_on(&self, date: Date) -> &[EventAnnotation] {
        self.by_date
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Forget all events.  The sequence counter keeps counting.
    pub fn clear(&mut self) {
        self.by_date.clear();
    }

    /// Number of distinct dates that have at least one event
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
