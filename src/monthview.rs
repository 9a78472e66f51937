use crate::theme::{
    BASE_STYLE, CAPTION_STYLE, EVENT_DATE_STYLE, EVENT_DAY_STYLE, TODAY_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};
use simcal::{DayCell, EventAnnotation, EventIndex, Grid, GridCell};
use std::collections::HashSet;
use time::Date;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 6;

/// Width of the grid in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 7 - 2;

/// Lines taken up by the caption, a blank line, the weekday labels, and their
/// rule
const HEADER_LINES: u16 = 4;

/// Column at which event text starts, after the span of days
const EVENT_TEXT_COLUMN: u16 = 9;

const ACS_HLINE: char = '─';

/// One month of a [`Grid`], followed by a list of that month's events
#[derive(Clone, Copy, Debug)]
pub(crate) struct MonthView<'a> {
    grid: &'a Grid,
    caption: &'a str,
    events: &'a EventIndex,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(grid: &'a Grid, caption: &'a str, events: &'a EventIndex) -> Self {
        MonthView {
            grid,
            caption,
            events,
        }
    }

    /// Each event that appears in the grid, once, in order of its first
    /// visible day, along with its visible span of days
    fn event_lines(&self) -> Vec<(String, &'a EventAnnotation)> {
        let grid = self.grid;
        let events = self.events;
        let Some(last) = grid.days().last().map(|d| d.date) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for day in grid.days() {
            for ann in events.annotations_on(day.date) {
                if seen.insert(ann.sequence_id) {
                    let end = ann.end.min(last);
                    lines.push((span_label(ann, day.date, end), ann));
                }
            }
        }
        lines
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            y: area.y,
            width: area.width - left,
            height: area.height,
        };
        let mut canvas = BufferCanvas::new(area, buf);
        let caption_width = u16::try_from(Text::raw(self.caption).width()).unwrap_or(u16::MAX);
        canvas.mvprint(
            0,
            MAIN_WIDTH.saturating_sub(caption_width) / 2,
            self.caption,
            CAPTION_STYLE,
        );
        for (col, label) in std::iter::zip(0u16.., &self.grid.labels) {
            let label = label.chars().take(3).collect::<String>();
            canvas.mvprint(2, col * DAY_WIDTH, format!("{label:>3}"), WEEKDAY_STYLE);
        }
        canvas.hline(3, 0, ACS_HLINE, MAIN_WIDTH);
        for (row, cells) in std::iter::zip(0u16.., &self.grid.rows) {
            for (col, cell) in std::iter::zip(0u16.., cells) {
                if let GridCell::Day(day) = cell {
                    let (s, style) = show_day(day);
                    canvas.mvprint(HEADER_LINES + row, col * DAY_WIDTH, s, style);
                }
            }
        }
        let top = HEADER_LINES + u16::try_from(self.grid.rows.len()).unwrap_or(u16::MAX) + 1;
        for (i, (label, ann)) in std::iter::zip(0u16.., self.event_lines()) {
            canvas.mvprint(top + i, 0, label, EVENT_DATE_STYLE);
            canvas.mvprint(top + i, EVENT_TEXT_COLUMN, ann.content(), BASE_STYLE);
        }
    }
}

fn show_day(day: &DayCell) -> (String, Style) {
    let d = day.day();
    if day.is_today {
        (format!("[{d:>2}]"), TODAY_STYLE)
    } else if !day.events.is_empty() {
        (format!(" {d:>2} "), EVENT_DAY_STYLE)
    } else {
        (format!(" {d:>2} "), BASE_STYLE)
    }
}

/// Label such as `" 14-16 "` for the days of `ann` from `start` through
/// `end`, with `<` or `>` marking an event that extends past the month
fn span_label(ann: &EventAnnotation, start: Date, end: Date) -> String {
    let before = if ann.continues_before(start) { '<' } else { ' ' };
    let after = if ann.continues_after(end) { '>' } else { ' ' };
    if start == end {
        format!("{before}{:>2}{after}", start.day())
    } else {
        format!("{before}{:>2}-{:>2}{after}", start.day(), end.day())
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect given to the Paragraph must lie within the buffer, so
            // clip it to the canvas
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcal::{render, WeekConfiguration, WeekStart};
    use time::macros::date;

    #[test]
    fn test_month_view() {
        let mut events = EventIndex::new();
        events
            .add_event("Trip", date!(2022 - 10 - 14), date!(2022 - 10 - 16))
            .expect("range should be valid");
        events
            .add_event("Vacation", date!(2022 - 10 - 30), date!(2022 - 11 - 02))
            .expect("range should be valid");
        let grid = render(
            2022,
            10,
            &WeekConfiguration::new(WeekStart::from_index(1)),
            Some(date!(2022 - 10 - 19)),
            &events,
        )
        .expect("month should render");
        let view = MonthView::new(&grid, "October 2022", &events);
        let area = Rect::new(0, 0, 44, 14);
        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, BASE_STYLE);
        view.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "                October 2022                ",
            "                                            ",
            "  Mon   Tue   Wed   Thu   Fri   Sat   Sun   ",
            "  ────────────────────────────────────────  ",
            "                                  1     2   ",
            "    3     4     5     6     7     8     9   ",
            "   10    11    12    13    14    15    16   ",
            "   17    18   [19]   20    21    22    23   ",
            "   24    25    26    27    28    29    30   ",
            "   31                                       ",
            "                                            ",
            "   14-16   Trip                             ",
            "   30-31>  Vacation                         ",
            "                                            ",
        ]);
        expected.set_style(area, BASE_STYLE);
        expected.set_style(Rect::new(16, 0, 12, 1), CAPTION_STYLE);
        for col in 0..7 {
            expected.set_style(Rect::new(2 + col * DAY_WIDTH, 2, 3, 1), WEEKDAY_STYLE);
        }
        expected.set_style(Rect::new(26, 6, 4, 1), EVENT_DAY_STYLE);
        expected.set_style(Rect::new(32, 6, 4, 1), EVENT_DAY_STYLE);
        expected.set_style(Rect::new(38, 6, 4, 1), EVENT_DAY_STYLE);
        expected.set_style(Rect::new(14, 7, 4, 1), TODAY_STYLE);
        expected.set_style(Rect::new(38, 8, 4, 1), EVENT_DAY_STYLE);
        expected.set_style(Rect::new(2, 9, 4, 1), EVENT_DAY_STYLE);
        expected.set_style(Rect::new(2, 11, 7, 1), EVENT_DATE_STYLE);
        expected.set_style(Rect::new(2, 12, 7, 1), EVENT_DATE_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_span_label() {
        let mut events = EventIndex::new();
        let start = date!(2022 - 09 - 28);
        let end = date!(2022 - 10 - 02);
        events
            .add_event("x", start, end)
            .expect("range should be valid");
        let ann = &events.annotations_on(start)[0];
        assert_eq!(span_label(ann, start, end), " 28- 2 ");
        assert_eq!(
            span_label(ann, date!(2022 - 10 - 01), date!(2022 - 10 - 02)),
            "< 1- 2 "
        );
        assert_eq!(span_label(ann, start, start), " 28>");
    }

    #[test]
    fn test_small_area_does_not_panic() {
        let grid = render(
            2016,
            6,
            &WeekConfiguration::default(),
            None,
            &EventIndex::new(),
        )
        .expect("month should render");
        let events = EventIndex::new();
        let view = MonthView::new(&grid, "June 2016", &events);
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        view.render(area, &mut buffer);
    }
}
