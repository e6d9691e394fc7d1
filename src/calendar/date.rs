use time::{Date, Duration, Month};

/// Day-granular arithmetic on [`Date`] used by the month grid and the
/// navigation state machine
pub trait DateExt: Sized {
    /// The first day of the date's month
    fn start_of_month(self) -> Self;

    /// Day of the week, counting from 0 for Sunday through 6 for Saturday
    fn day_of_week(self) -> u8;

    /// Moves forwards (or backwards, for negative `days`) by whole days.
    ///
    /// Saturates at the ends of the representable range.
    fn add_days(self, days: i64) -> Self;

    /// Moves by whole months, clamping the day of the month to the length of
    /// the target month (so January 31 plus one month is the last day of
    /// February).  Returns `None` if the target month cannot be represented.
    fn add_months(self, months: i32) -> Option<Self>;

    /// Whether both dates fall in the same month of the same year
    fn same_month(self, other: Self) -> bool;

    fn days_in_month(self) -> u8;
}

impl DateExt for Date {
    fn start_of_month(self) -> Date {
        self.replace_day(1).unwrap_or(self)
    }

    fn day_of_week(self) -> u8 {
        self.weekday().number_days_from_sunday()
    }

    fn add_days(self, days: i64) -> Date {
        self.saturating_add(Duration::days(days))
    }

    fn add_months(self, months: i32) -> Option<Date> {
        let index = self
            .year()
            .checked_mul(12)?
            .checked_add(i32::from(u8::from(self.month())) - 1)?
            .checked_add(months)?;
        let year = index.div_euclid(12);
        let month = u8::try_from(index.rem_euclid(12) + 1).ok()?;
        let month = Month::try_from(month).ok()?;
        (1..=self.day())
            .rev()
            .find_map(|day| Date::from_calendar_date(year, month, day).ok())
    }

    fn same_month(self, other: Date) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    fn days_in_month(self) -> u8 {
        (28..=31)
            .rev()
            .find(|&day| self.replace_day(day).is_ok())
            .unwrap_or(28)
    }
}
