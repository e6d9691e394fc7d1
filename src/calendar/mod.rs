mod date;
mod grid;
mod hooks;
mod options;
mod state;
mod view;
mod widget;
pub use self::date::DateExt;
pub use self::grid::{DateGrid, DayCell, DAYS_IN_WEEK, GRID_CELLS, WEEKS_PER_GRID};
pub use self::hooks::{CellHooks, DateContent};
pub use self::options::{CalendarOptions, ChangeHandler};
pub use self::state::{MonthState, OutOfTimeError, Selection};
pub use self::view::MonthView;
pub use self::widget::{Hit, MonthCalendar};
