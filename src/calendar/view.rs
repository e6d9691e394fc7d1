use super::grid::DayCell;
use super::hooks::CellHooks;
use super::options::CalendarOptions;
use super::state::MonthState;
use crate::locale::{resolve_locale, Locale};
use ratatui::text::{Span, Text};
use std::ops::{Deref, DerefMut};
use time::Date;

/// One calendar instance: its selection state, render hooks, and locale
/// choice.  This is the state of the [`MonthCalendar`](super::MonthCalendar)
/// widget.
///
/// Dereferences to the underlying [`MonthState`] for transitions.
#[derive(Debug)]
pub struct MonthView {
    state: MonthState,
    hooks: CellHooks,
    host_language: Option<String>,
    // Resolved from the requested locale & host language whenever either is
    // set, not on every draw
    locale: &'static Locale,
}

impl MonthView {
    /// `today` is the date used for the "today" control and as the initial
    /// selection when neither a value nor a default value is given.
    /// `host_language` is consulted when the options set no locale.
    pub fn new(options: CalendarOptions, today: Date, host_language: Option<String>) -> MonthView {
        let CalendarOptions {
            value,
            default_value,
            locale,
            date_render,
            date_inner_content,
            on_change,
        } = options;
        MonthView {
            state: MonthState::new(today, value, default_value).with_on_change(on_change),
            hooks: CellHooks::new(date_render, date_inner_content),
            locale: resolve_locale(locale.as_deref(), host_language.as_deref()),
            host_language,
        }
    }

    pub fn locale(&self) -> &'static Locale {
        self.locale
    }

    /// Switch to the locale `locale`, or back to the host language if `None`
    pub fn set_locale(&mut self, locale: Option<&str>) {
        self.locale = resolve_locale(locale, self.host_language.as_deref());
    }

    pub fn hooks(&self) -> &CellHooks {
        &self.hooks
    }

    pub fn is_selected(&self, date: Date) -> bool {
        self.state.selected_date() == date
    }

    pub fn is_today(&self, date: Date) -> bool {
        self.state.today() == date
    }

    /// The content for one cell of the grid: the full-cell override if one is
    /// installed, otherwise the day number plus any supplementary content
    pub fn cell_text(&self, cell: &DayCell) -> Text<'static> {
        self.hooks.cell_text(cell, self.day_label(cell.date))
    }

    fn day_label(&self, date: Date) -> Span<'static> {
        let day = date.day();
        if self.is_today(date) {
            Span::raw(format!("[{day:2}]"))
        } else {
            Span::raw(format!(" {day:2} "))
        }
    }
}

impl Deref for MonthView {
    type Target = MonthState;

    fn deref(&self) -> &MonthState {
        &self.state
    }
}

impl DerefMut for MonthView {
    fn deref_mut(&mut self) -> &mut MonthState {
        &mut self.state
    }
}
