use super::date::DateExt;
use std::array;
use time::{Date, Duration};

pub const DAYS_IN_WEEK: usize = 7;

/// Every month is laid out over six weeks, even when it fits in fewer
pub const WEEKS_PER_GRID: usize = 6;

pub const GRID_CELLS: usize = DAYS_IN_WEEK * WEEKS_PER_GRID;

/// Days from the first cell of a grid to its last
const GRID_SPAN_DAYS: i64 = 41;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DayCell {
    pub date: Date,
    /// Whether `date` belongs to the month of the grid's reference date
    pub in_current_scope: bool,
}

/// The 42 consecutive days shown for a month, starting on the Sunday on or
/// before the first of the month.
///
/// Cells are stored row-major: index `i` is in week `i / 7` and column
/// `i % 7`, with column 0 being Sunday.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateGrid {
    reference: Date,
    cells: [DayCell; GRID_CELLS],
}

impl DateGrid {
    /// Lay out the month of `reference`.
    ///
    /// References in a month without a complete grid (see
    /// [`DateGrid::displayable`]) are first moved to the nearest month that
    /// has one.
    pub fn for_date(reference: Date) -> DateGrid {
        let reference = DateGrid::displayable(reference);
        let mut date = grid_start(reference).unwrap_or(Date::MIN);
        let cells = array::from_fn(|_| {
            let cell = DayCell {
                date,
                in_current_scope: date.same_month(reference),
            };
            date = date.add_days(1);
            cell
        });
        DateGrid { reference, cells }
    }

    /// The date nearest to `reference` whose month can be laid out in full.
    ///
    /// Only the first and last months of the representable range can lack a
    /// complete grid, as their leading or trailing days fall outside the
    /// range.  A reference in such a month is moved one month towards the
    /// middle of the range; any other reference is returned unchanged.
    pub fn displayable(reference: Date) -> Date {
        if grid_start(reference).is_some() {
            return reference;
        }
        let towards_middle = if reference.year() < 0 { 1 } else { -1 };
        reference
            .add_months(towards_middle)
            .filter(|&r| grid_start(r).is_some())
            .unwrap_or(reference)
    }

    pub fn reference(&self) -> Date {
        self.reference
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Iterate over the six weeks of the grid, each a slice of seven cells
    /// running Sunday through Saturday
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> + '_ {
        self.cells.chunks_exact(DAYS_IN_WEEK)
    }

    pub fn get(&self, week: usize, weekday: usize) -> Option<&DayCell> {
        if weekday < DAYS_IN_WEEK {
            self.cells.get(week * DAYS_IN_WEEK + weekday)
        } else {
            None
        }
    }

    /// Returns the index of the cell showing `date`, if any
    pub fn position(&self, date: Date) -> Option<usize> {
        self.cells.iter().position(|c| c.date == date)
    }

    pub fn first(&self) -> DayCell {
        self.cells[0]
    }

    pub fn last(&self) -> DayCell {
        self.cells[GRID_CELLS - 1]
    }
}

/// The Sunday on or before the first of the month of `reference`, provided
/// that every day of the grid starting there is representable
fn grid_start(reference: Date) -> Option<Date> {
    let month_start = reference.start_of_month();
    let leading_days = Duration::days(i64::from(month_start.day_of_week()));
    let start = month_start.checked_sub(leading_days)?;
    start.checked_add(Duration::days(GRID_SPAN_DAYS))?;
    Some(start)
}
