use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::monthview::MonthView;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    DefaultTerminal,
};
use simcal::Calendar;
use std::io::{self, Write};
use time::Date;

/// Interactive month-by-month browser over a [`Calendar`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    calendar: Calendar,
    home: Date,
    state: AppState,
}

impl App {
    /// `home` is the date whose month the "0" key returns to
    pub(crate) fn new(calendar: Calendar, home: Date) -> App {
        App {
            calendar,
            home,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = read()?
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('j') | KeyCode::Down | KeyCode::PageDown => self.next_month(),
                KeyCode::Char('k') | KeyCode::Up | KeyCode::PageUp => self.previous_month(),
                KeyCode::Char('0') | KeyCode::Home => self.reset(),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c @ '0'..='9') => match c.to_digit(10).map(u8::try_from) {
                            Some(Ok(d)) => state.handle_input(JumpToInput::Digit(d)),
                            _ => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump { year, month } => {
                            if self.jump_to(year, u8::from(month)) {
                                self.state = AppState::Calendar;
                                true
                            } else {
                                false
                            }
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn next_month(&mut self) -> bool {
        self.calendar.next_month().is_ok()
    }

    fn previous_month(&mut self) -> bool {
        self.calendar.previous_month().is_ok()
    }

    fn reset(&mut self) -> bool {
        self.jump_to(self.home.year(), u8::from(self.home.month()))
    }

    fn jump_to(&mut self, year: i32, month: u8) -> bool {
        match self.calendar.set_month(year, month) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "cannot show month");
                false
            }
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        match self.calendar.grid() {
            Ok(grid) => {
                let caption = self.calendar.caption();
                MonthView::new(&grid, &caption, self.calendar.events()).render(area, buf);
            }
            Err(e) => tracing::warn!(error = %e, "failed to lay out month"),
        }
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
