use super::date::DateExt;
use super::grid::DateGrid;
use super::options::ChangeHandler;
use std::fmt;
use thiserror::Error;
use time::Date;
use tracing::debug;

/// Who owns the selected date
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Selection {
    /// The selection mirrors a value supplied by the caller and only changes
    /// when the caller pushes a new value
    Controlled(Date),
    /// The selection is owned by the calendar itself
    Uncontrolled(Date),
}

impl Selection {
    pub fn date(&self) -> Date {
        match self {
            Selection::Controlled(d) | Selection::Uncontrolled(d) => *d,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, Selection::Controlled(_))
    }
}

/// The selected date and the month being displayed, plus the transitions
/// between them.
///
/// The displayed month is always owned here, even when the selection is
/// controlled, so browsing other months never touches the caller's value.
pub struct MonthState {
    today: Date,
    selection: Selection,
    displayed_month: Date,
    on_change: Option<ChangeHandler>,
}

impl MonthState {
    /// If `value` is given, the selection is controlled; otherwise it starts
    /// at `default_value`, or at `today` if that is not given either.
    pub fn new(today: Date, value: Option<Date>, default_value: Option<Date>) -> MonthState {
        let selection = match value {
            Some(v) => Selection::Controlled(v),
            None => Selection::Uncontrolled(default_value.unwrap_or(today)),
        };
        MonthState {
            today,
            selection,
            displayed_month: DateGrid::displayable(selection.date()),
            on_change: None,
        }
    }

    pub fn with_on_change(mut self, on_change: Option<ChangeHandler>) -> Self {
        self.on_change = on_change;
        self
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Update the current date, e.g. when the clock passes midnight
    pub fn set_today(&mut self, today: Date) {
        if today != self.today {
            debug!(from = %self.today, to = %today, "Date changed");
            self.today = today;
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_date(&self) -> Date {
        self.selection.date()
    }

    /// A date within the displayed month.  Only its year and month are
    /// meaningful for display.
    ///
    /// This is always a month with a complete grid, so at the very ends of
    /// the representable range it can differ from the month of the selected
    /// date.
    pub fn displayed_month(&self) -> Date {
        self.displayed_month
    }

    pub fn grid(&self) -> DateGrid {
        DateGrid::for_date(self.displayed_month)
    }

    /// Select `date` (e.g., because the user activated its cell) and show its
    /// month.
    ///
    /// A controlled selection is left for the owner to update in response to
    /// the change notification.
    pub fn select_date(&mut self, date: Date) {
        debug!(%date, controlled = self.selection.is_controlled(), "Selecting date");
        if let Selection::Uncontrolled(ref mut selected) = self.selection {
            *selected = date;
        }
        self.displayed_month = DateGrid::displayable(date);
        self.notify(date);
    }

    pub fn jump_to_today(&mut self) {
        debug!(today = %self.today, "Jumping to today");
        self.select_date(self.today);
    }

    pub fn prev_month(&mut self) -> Result<(), OutOfTimeError> {
        self.shift_month(-1)
    }

    pub fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.shift_month(1)
    }

    /// Push a new value from the owner of a controlled selection.
    ///
    /// This puts the selection under the caller's control if it was not
    /// already.  When the value actually changes, the displayed month follows
    /// it.  No change notification is sent.
    pub fn set_value(&mut self, value: Date) {
        let changed = self.selection.date() != value;
        self.selection = Selection::Controlled(value);
        if changed {
            debug!(%value, "Controlled value changed");
            self.displayed_month = DateGrid::displayable(value);
        }
    }

    fn shift_month(&mut self, months: i32) -> Result<(), OutOfTimeError> {
        let month = self
            .displayed_month
            .add_months(months)
            .filter(|&m| DateGrid::displayable(m) == m)
            .ok_or(OutOfTimeError)?;
        debug!(from = %self.displayed_month, to = %month, "Changing displayed month");
        self.displayed_month = month;
        Ok(())
    }

    fn notify(&mut self, date: Date) {
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(date);
        }
    }
}

impl fmt::Debug for MonthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonthState")
            .field("today", &self.today)
            .field("selection", &self.selection)
            .field("displayed_month", &self.displayed_month)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;
