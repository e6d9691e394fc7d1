use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Keys (or mouse actions) and what they do
static COMMANDS: &[(&str, &str)] = &[
    ("p, LEFT, PAGE UP", "Previous month"),
    ("n, RIGHT, PAGE DOWN", "Next month"),
    ("t, HOME", "Jump to today"),
    ("g", "Go to a date"),
    ("CLICK", "Select a day or a title bar control"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const KEY_COLUMN_WIDTH: usize = 23;

static DISMISS: &str = "Press the Any Key to dismiss.";

/// Popup listing the commands, drawn over the middle of the given area
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn to_text(self) -> Text<'static> {
        let key_style = self.0.add_modifier(Modifier::BOLD);
        let mut lines = COMMANDS
            .iter()
            .map(|&(keys, action)| {
                Line::from_iter([
                    Span::styled(format!("{keys:KEY_COLUMN_WIDTH$}"), key_style),
                    Span::styled(action, self.0),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::styled(DISMISS, self.0));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.to_text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        // One column of padding on each side
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            width: help_area.width.saturating_add(2),
            ..help_area
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}
