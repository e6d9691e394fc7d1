use crate::YMD_FMT;
use monthcal::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Date;

const TEMPLATE: &str = "YYYY-MM-DD";
const OUTER_WIDTH: u16 = 18;
const OUTER_HEIGHT: u16 = 8;

const UNFILLED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

/// Popup for entering a date to select
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GoTo;

impl StatefulWidget for GoTo {
    type State = DatePrompt;

    /*
     * ..................
     * .┌─ Go To Date ─┐.
     * .│              │.
     * .│  YYYY-MM-DD  │.
     * .│              │.
     * .│   [ENTER]    │.
     * .└──────────────┘.
     * ..................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut DatePrompt) {
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
            .title(" Go To Date ")
            .title_alignment(HorizontalAlignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// Text typed so far into the [`GoTo`] popup
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct DatePrompt {
    input: String,
}

impl DatePrompt {
    pub(crate) fn new() -> DatePrompt {
        DatePrompt::default()
    }

    fn is_full(&self) -> bool {
        self.input.len() == TEMPLATE.len()
    }

    fn to_text(&self) -> Text<'static> {
        let remainder = TEMPLATE.get(self.input.len()..).unwrap_or_default();
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            Line::from_iter([
                Span::styled(self.input.clone(), BASE_STYLE),
                Span::styled(remainder, UNFILLED_STYLE),
            ]),
            Line::styled("", BASE_STYLE),
            // Only the "[ENTER]" text and not its centering padding is
            // underlined
            Line::from(Span::styled(
                "[ENTER]",
                if self.is_full() {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    pub(crate) fn handle_input(&mut self, input: PromptInput) -> PromptOutput {
        match input {
            PromptInput::Char(c) if (c.is_ascii_digit() || c == '-') && !self.is_full() => {
                self.input.push(c);
                PromptOutput::Ok
            }
            PromptInput::Char(_) => PromptOutput::Invalid,
            PromptInput::Backspace => {
                if self.input.pop().is_some() {
                    PromptOutput::Ok
                } else {
                    PromptOutput::Invalid
                }
            }
            PromptInput::Enter => Date::parse(&self.input, &YMD_FMT)
                .map_or(PromptOutput::Invalid, PromptOutput::Submit),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PromptInput {
    Char(char),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PromptOutput {
    Ok,
    Invalid,
    Submit(Date),
}
