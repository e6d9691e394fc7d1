use ratatui::style::{Color, Modifier, Style};

pub const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const NAV_STYLE: Style = BASE_STYLE.fg(Color::LightCyan);

pub const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Days before or after the displayed month
pub const OUT_OF_SCOPE_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);
