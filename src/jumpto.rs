use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Month;

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;
const YEAR_DIGITS: usize = 4;
const ENTER_POS: usize = YEAR_DIGITS + 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * .................
     * .┌─ Jump To… ──┐.
     * .│             │.
     * .│  -YYYY-MM   │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Jump To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// Digits typed so far into the "jump to month" box
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    negative: bool,
    year: [Option<u8>; YEAR_DIGITS],
    month: [Option<u8>; 2],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style only the span so the centering padding is not underlined
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        spans.push(Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        ));
        push_digits(&mut spans, &self.year, "Y");
        spans.push(Span::styled("-", BASE_STYLE));
        push_digits(&mut spans, &self.month, "M");
        Line::from_iter(spans)
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match (input, self.pos) {
            (JumpToInput::Negative, 0) => {
                self.negative = !self.negative;
                JumpToOutput::Ok
            }
            (JumpToInput::Positive, 0) => {
                self.negative = false;
                JumpToOutput::Ok
            }
            (JumpToInput::Digit(d), 0..ENTER_POS) => {
                *self.slot(self.pos) = Some(d);
                self.pos += 1;
                JumpToOutput::Ok
            }
            (JumpToInput::Backspace, 1..) => {
                self.pos -= 1;
                *self.slot(self.pos) = None;
                JumpToOutput::Ok
            }
            (JumpToInput::Enter, ENTER_POS) => {
                let mut year = digits_value(&self.year);
                if self.negative {
                    year = -year;
                }
                match u8::try_from(digits_value(&self.month))
                    .ok()
                    .and_then(|m| Month::try_from(m).ok())
                {
                    Some(month) => JumpToOutput::Jump { year, month },
                    None => JumpToOutput::Invalid,
                }
            }
            _ => JumpToOutput::Invalid,
        }
    }

    fn slot(&mut self, pos: usize) -> &mut Option<u8> {
        if pos < YEAR_DIGITS {
            &mut self.year[pos]
        } else {
            &mut self.month[pos - YEAR_DIGITS]
        }
    }
}

fn push_digits(spans: &mut Vec<Span<'static>>, digits: &[Option<u8>], fallback: &'static str) {
    for dg in digits {
        spans.push(match dg {
            Some(d) => Span::styled(d.to_string(), BASE_STYLE),
            None => Span::styled(fallback, UNFILLED_CELL_STYLE),
        });
    }
}

fn digits_value(digits: &[Option<u8>]) -> i32 {
    digits
        .iter()
        .flatten()
        .fold(0, |acc, &d| acc * 10 + i32::from(d))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump { year: i32, month: Month },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(state: &mut JumpToState, digits: &str) {
        for ch in digits.chars() {
            let d = ch.to_digit(10).expect("test input should be digits");
            let d = u8::try_from(d).expect("digit should fit in u8");
            assert_eq!(state.handle_input(JumpToInput::Digit(d)), JumpToOutput::Ok);
        }
    }

    #[test]
    fn test_jump() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "202210");
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump {
                year: 2022,
                month: Month::October
            }
        );
    }

    #[test]
    fn test_negative_year() {
        let mut state = JumpToState::new();
        assert_eq!(state.handle_input(JumpToInput::Negative), JumpToOutput::Ok);
        type_digits(&mut state, "004402");
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump {
                year: -44,
                month: Month::February
            }
        );
    }

    #[test]
    fn test_sign_only_at_start() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "2");
        assert_eq!(
            state.handle_input(JumpToInput::Negative),
            JumpToOutput::Invalid
        );
    }

    #[test]
    fn test_enter_too_early() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "20221");
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
    }

    #[test]
    fn test_too_many_digits() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "202210");
        assert_eq!(
            state.handle_input(JumpToInput::Digit(1)),
            JumpToOutput::Invalid
        );
    }

    #[test]
    fn test_bad_month() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "202213");
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
        let mut state = JumpToState::new();
        type_digits(&mut state, "202200");
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
    }

    #[test]
    fn test_backspace() {
        let mut state = JumpToState::new();
        assert_eq!(
            state.handle_input(JumpToInput::Backspace),
            JumpToOutput::Invalid
        );
        type_digits(&mut state, "202219");
        assert_eq!(state.handle_input(JumpToInput::Backspace), JumpToOutput::Ok);
        assert_eq!(state.handle_input(JumpToInput::Backspace), JumpToOutput::Ok);
        type_digits(&mut state, "07");
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump {
                year: 2022,
                month: Month::July
            }
        );
    }

    #[test]
    fn test_to_line() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "19");
        let line = state.to_line();
        let s = line
            .spans
            .iter()
            .map(|sp| sp.content.as_ref())
            .collect::<String>();
        assert_eq!(s, " 19YY-MM");
    }
}
