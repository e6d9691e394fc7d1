//! Month-view calendar core for terminal UIs.
//!
//! The [`calendar`] module computes the six-week date grid for a month and
//! owns the selection/displayed-month state machine; [`calendar::MonthCalendar`]
//! draws it with `ratatui`.  Week-day labels and other strings come from the
//! [`locale`] table.
pub mod calendar;
pub mod locale;
pub mod theme;
