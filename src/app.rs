use crate::help::Help;
use crate::prompt::{DatePrompt, GoTo, PromptInput, PromptOutput};
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use monthcal::calendar::{CalendarOptions, Hit, MonthCalendar, MonthView};
use monthcal::theme::BASE_STYLE;
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use time::{Date, OffsetDateTime};
use tracing::warn;

/// Line, relative to the top of the screen, on which the selection summary is
/// shown
const STATUS_LINE: u16 = 16;

#[derive(Debug)]
pub(crate) struct App {
    view: MonthView,
    state: AppState,
    // In controlled mode, this plays the part of the selection's owner: the
    // calendar reports new dates here, and they are pushed back in as the
    // calendar's value before the next draw.
    owner: Option<Rc<Cell<Option<Date>>>>,
    // Where the calendar was last drawn, for mapping mouse clicks
    area: Rect,
}

impl App {
    pub(crate) fn new(view: MonthView) -> App {
        App {
            view,
            state: AppState::Calendar,
            owner: None,
            area: Rect::default(),
        }
    }

    pub(crate) fn controlled(
        options: CalendarOptions,
        value: Date,
        today: Date,
        host_language: Option<String>,
    ) -> App {
        let owner = Rc::new(Cell::new(None));
        let sink = Rc::clone(&owner);
        let options = options.value(value).on_change(move |date| sink.set(Some(date)));
        App {
            owner: Some(owner),
            ..App::new(MonthView::new(options, today, host_language))
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        self.refresh_today();
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if !self.handle_click(column, row) {
                    self.beep()?;
                }
            }
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        self.sync_owner();
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                    self.view.prev_month().is_ok()
                }
                KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                    self.view.next_month().is_ok()
                }
                KeyCode::Char('t') | KeyCode::Home => {
                    self.view.jump_to_today();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Prompting(DatePrompt::new());
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
            AppState::Prompting(prompt) => {
                let output = match key {
                    KeyCode::Esc => {
                        self.state = AppState::Calendar;
                        return true;
                    }
                    KeyCode::Char(c) => prompt.handle_input(PromptInput::Char(c)),
                    KeyCode::Backspace | KeyCode::Delete => {
                        prompt.handle_input(PromptInput::Backspace)
                    }
                    KeyCode::Enter => prompt.handle_input(PromptInput::Enter),
                    _ => PromptOutput::Invalid,
                };
                match output {
                    PromptOutput::Ok => true,
                    PromptOutput::Invalid => false,
                    PromptOutput::Submit(date) => {
                        self.state = AppState::Calendar;
                        self.view.select_date(date);
                        true
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click could not be acted on
    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        if self.state != AppState::Calendar {
            return true;
        }
        match MonthCalendar::hit_test(self.area, column, row, &self.view) {
            Some(Hit::PrevMonth) => self.view.prev_month().is_ok(),
            Some(Hit::NextMonth) => self.view.next_month().is_ok(),
            Some(Hit::Today) => {
                self.view.jump_to_today();
                true
            }
            Some(Hit::Date(date)) => {
                self.view.select_date(date);
                true
            }
            None => true,
        }
    }

    // The session may outlive the date it started on
    fn refresh_today(&mut self) {
        match OffsetDateTime::now_local() {
            Ok(now) => self.view.set_today(now.date()),
            Err(e) => {
                warn!(error = %e, "Failed to determine local date; keeping previous one");
            }
        }
    }

    fn sync_owner(&mut self) {
        if let Some(owner) = &self.owner {
            if let Some(date) = owner.take() {
                self.view.set_value(date);
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn status(&self) -> String {
        let mode = if self.view.selection().is_controlled() {
            "controlled"
        } else {
            "uncontrolled"
        };
        format!("Selected: {} ({mode})", self.view.selected_date())
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.area = area;
        buf.set_style(area, BASE_STYLE);
        MonthCalendar.render(area, buf, &mut self.view);
        if STATUS_LINE < area.height {
            let status_area = Rect {
                y: area.y + STATUS_LINE,
                height: 1,
                ..area
            };
            Line::styled(self.status(), BASE_STYLE)
                .centered()
                .render(status_area, buf);
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Prompting(ref mut prompt) = self.state {
            GoTo.render(area, buf, prompt);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Prompting(DatePrompt),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use monthcal::calendar::Selection;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 09 - 22);

    fn uncontrolled() -> App {
        App::new(MonthView::new(
            CalendarOptions::new().locale("en-US"),
            TODAY,
            None,
        ))
    }

    fn row(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    fn render(app: &mut App) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn test_month_navigation_keys() {
        let mut app = uncontrolled();
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.view.displayed_month(), date!(2024 - 10 - 22));
        assert!(app.handle_key(KeyCode::Left));
        assert!(app.handle_key(KeyCode::PageUp));
        assert_eq!(app.view.displayed_month(), date!(2024 - 08 - 22));
        assert_eq!(app.view.selected_date(), TODAY);
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.view.displayed_month(), TODAY);
    }

    #[test]
    fn test_invalid_key() {
        let mut app = uncontrolled();
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = uncontrolled();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Calendar);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }

    #[test]
    fn test_go_to_date() {
        let mut app = uncontrolled();
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in "2023-11-08".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.view.selected_date(), date!(2023 - 11 - 08));
        assert_eq!(app.view.displayed_month(), date!(2023 - 11 - 08));
    }

    #[test]
    fn test_go_to_invalid_date() {
        let mut app = uncontrolled();
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in "2023-02-30".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(!app.handle_key(KeyCode::Enter));
        assert!(matches!(app.state, AppState::Prompting(_)));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.view.selected_date(), TODAY);
    }

    #[test]
    fn test_click_navigation() {
        let mut app = uncontrolled();
        let _ = render(&mut app);
        assert!(app.handle_click(63, 0));
        assert_eq!(app.view.displayed_month(), date!(2024 - 10 - 22));
        assert!(app.handle_click(16, 0));
        assert!(app.handle_click(16, 0));
        assert_eq!(app.view.displayed_month(), date!(2024 - 08 - 22));
        assert!(app.handle_click(56, 0));
        assert_eq!(app.view.displayed_month(), TODAY);
    }

    #[test]
    fn test_click_selects_uncontrolled() {
        let mut app = uncontrolled();
        let _ = render(&mut app);
        // September 23
        assert!(app.handle_click(24, 9));
        assert_eq!(app.view.selection(), Selection::Uncontrolled(date!(2024 - 09 - 23)));
    }

    #[test]
    fn test_click_selects_controlled() {
        let mut app = App::controlled(
            CalendarOptions::new().locale("en-US"),
            date!(2024 - 09 - 01),
            TODAY,
            None,
        );
        let _ = render(&mut app);
        assert!(app.handle_click(24, 9));
        assert_eq!(app.view.selection(), Selection::Controlled(date!(2024 - 09 - 01)));
        app.sync_owner();
        assert_eq!(app.view.selection(), Selection::Controlled(date!(2024 - 09 - 23)));
        app.sync_owner();
        assert_eq!(app.view.selection(), Selection::Controlled(date!(2024 - 09 - 23)));
    }

    #[test]
    fn test_today_after_date_change() {
        let mut app = uncontrolled();
        app.view.set_today(date!(2024 - 09 - 23));
        let buffer = render(&mut app);
        assert_eq!(
            row(&buffer, 9),
            format!("{} 22    [23]    24     25     26     27     28", " ".repeat(16))
        );
        assert!(app.handle_key(KeyCode::Char('t')));
        assert_eq!(app.view.selected_date(), date!(2024 - 09 - 23));
        let _ = render(&mut app);
        assert!(app.handle_click(56, 0));
        assert_eq!(app.view.selected_date(), date!(2024 - 09 - 23));
    }

    #[test]
    fn test_controlled_today() {
        let mut app = App::controlled(
            CalendarOptions::new().locale("en-US"),
            date!(2023 - 11 - 08),
            TODAY,
            None,
        );
        assert!(app.handle_key(KeyCode::Char('t')));
        app.sync_owner();
        assert_eq!(app.view.selected_date(), TODAY);
        assert_eq!(app.view.displayed_month(), TODAY);
    }

    #[test]
    fn test_render_status() {
        let mut app = uncontrolled();
        let buffer = render(&mut app);
        assert_eq!(
            row(&buffer, 16),
            format!("{}Selected: 2024-09-22 (uncontrolled)", " ".repeat(22))
        );
    }

    #[test]
    fn test_render_help() {
        let mut app = uncontrolled();
        assert!(app.handle_key(KeyCode::Char('?')));
        let buffer = render(&mut app);
        assert!((0..24).any(|y| row(&buffer, y).contains(" Commands ")));
        assert!((0..24).any(|y| row(&buffer, y).contains("Press the Any Key to dismiss.")));
    }

    #[test]
    fn test_render_prompt() {
        let mut app = uncontrolled();
        assert!(app.handle_key(KeyCode::Char('g')));
        assert!(app.handle_key(KeyCode::Char('2')));
        assert!(app.handle_key(KeyCode::Char('0')));
        let buffer = render(&mut app);
        assert!((0..24).any(|y| row(&buffer, y).contains("20YY-MM-DD")));
    }
}
