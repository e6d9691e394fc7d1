use super::hooks::DateContent;
use ratatui::text::Text;
use std::fmt;
use time::Date;

/// Callback notified with the new date whenever the selection changes
pub type ChangeHandler = Box<dyn FnMut(Date)>;

/// Construction options for a [`MonthView`](super::MonthView).  Every option
/// is optional.
#[derive(Default)]
pub struct CalendarOptions {
    pub(super) value: Option<Date>,
    pub(super) default_value: Option<Date>,
    pub(super) locale: Option<String>,
    pub(super) date_render: Option<Box<dyn DateContent>>,
    pub(super) date_inner_content: Option<Box<dyn DateContent>>,
    pub(super) on_change: Option<ChangeHandler>,
}

impl CalendarOptions {
    pub fn new() -> CalendarOptions {
        CalendarOptions::default()
    }

    /// Make the selection controlled by the caller, starting at `date`.
    /// Later changes are pushed with
    /// [`MonthView::set_value`](super::MonthView::set_value).
    pub fn value(mut self, date: Date) -> Self {
        self.value = Some(date);
        self
    }

    /// Initial selection for an uncontrolled calendar.  Ignored when
    /// [`value`](Self::value) is also set.
    pub fn default_value(mut self, date: Date) -> Self {
        self.default_value = Some(date);
        self
    }

    /// Locale for the week-day labels and header strings, overriding the
    /// host language
    pub fn locale<S: Into<String>>(mut self, locale: S) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Replace the whole content of each day cell
    pub fn date_render<F>(mut self, func: F) -> Self
    where
        F: Fn(Date) -> Text<'static> + 'static,
    {
        self.date_render = Some(Box::new(func));
        self
    }

    /// Add content below the day number of each cell
    pub fn date_inner_content<F>(mut self, func: F) -> Self
    where
        F: Fn(Date) -> Text<'static> + 'static,
    {
        self.date_inner_content = Some(Box::new(func));
        self
    }

    pub fn on_change<F>(mut self, func: F) -> Self
    where
        F: FnMut(Date) + 'static,
    {
        self.on_change = Some(Box::new(func));
        self
    }
}

impl fmt::Debug for CalendarOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarOptions")
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("locale", &self.locale)
            .field("date_render", &self.date_render.is_some())
            .field("date_inner_content", &self.date_inner_content.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
