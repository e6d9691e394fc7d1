use super::grid::{DayCell, DAYS_IN_WEEK};
use super::view::MonthView;
use crate::locale::Locale;
use crate::theme::{
    BASE_STYLE, NAV_STYLE, OUT_OF_SCOPE_STYLE, SELECTED_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{StatefulWidget, Widget},
};
use std::iter::zip;
use time::Date;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

/// Number of columns available to the content of a single day
const CELL_WIDTH: u16 = 6;

/// Width of the slot over which each week-day label is centered; matches the
/// width of a default day label
const LABEL_WIDTH: u16 = 4;

/// Width of the whole calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 6 + CELL_WIDTH;

/// Number of lines taken up by the title bar, the week-day labels, and the
/// rule below them
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar: the day number and
/// one line of supplementary content
const WEEK_LINES: u16 = 2;

/// Number of lines in the whole calendar: the header plus six weeks
const TOTAL_LINES: u16 = 15;

/// Columns between the right edge of the "today" control and the right edge
/// of the calendar
const TODAY_GUTTER: u16 = 3;

const PREV_SYMBOL: &str = "<";
const NEXT_SYMBOL: &str = ">";
const ACS_HLINE: char = '─';

/// What lies under a given terminal position of a [`MonthCalendar`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Hit {
    PrevMonth,
    NextMonth,
    Today,
    Date(Date),
}

/// Draws a [`MonthView`]: a title bar with month navigation & a "today"
/// control, the week-day labels of the view's locale, and six weeks of days.
///
/// The calendar is centered horizontally within the area it is given.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MonthCalendar;

impl MonthCalendar {
    /// Determine what a mouse event at (`column`, `row`) landed on, given that
    /// the calendar was last rendered in `area`
    pub fn hit_test(area: Rect, column: u16, row: u16, view: &MonthView) -> Option<Hit> {
        let area = calendar_area(area);
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let x = column - area.x;
        let y = row - area.y;
        if y == 0 {
            let (today_x, today_width) = today_bounds(view.locale());
            if x == 0 {
                Some(Hit::PrevMonth)
            } else if x == MAIN_WIDTH - 1 {
                Some(Hit::NextMonth)
            } else if (today_x..today_x + today_width).contains(&x) {
                Some(Hit::Today)
            } else {
                None
            }
        } else if y >= HEADER_LINES && x % DAY_WIDTH < CELL_WIDTH {
            let week = usize::from((y - HEADER_LINES) / WEEK_LINES);
            let weekday = usize::from(x / DAY_WIDTH);
            view.grid().get(week, weekday).map(|c| Hit::Date(c.date))
        } else {
            None
        }
    }
}

impl StatefulWidget for MonthCalendar {
    type State = MonthView;

    fn render(self, area: Rect, buf: &mut Buffer, view: &mut MonthView) {
        let area = calendar_area(area);
        buf.set_style(area, BASE_STYLE);
        let locale = view.locale();
        let (today_x, _) = today_bounds(locale);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title_bar(locale.title(view.displayed_month()), today_x, locale.today());
        canvas.draw_week_labels(locale.week_labels());
        for (i, week) in zip(0u16.., view.grid().weeks()) {
            for (wd, cell) in zip(0u16.., week) {
                canvas.draw_cell(i, wd, view.cell_text(cell), cell_style(view, cell));
            }
        }
    }
}

fn calendar_area(area: Rect) -> Rect {
    let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
    Rect {
        x: area.x.saturating_add(left),
        y: area.y,
        width: MAIN_WIDTH.min(area.width),
        height: TOTAL_LINES.min(area.height),
    }
}

/// Returns the starting column & width of the "today" control
fn today_bounds(locale: &Locale) -> (u16, u16) {
    let width = u16::try_from(today_label(locale.today()).width()).unwrap_or(u16::MAX);
    let end = MAIN_WIDTH - TODAY_GUTTER;
    (end.saturating_sub(width), width)
}

fn today_label(label: &str) -> Span<'static> {
    Span::styled(format!("[{label}]"), NAV_STYLE)
}

fn cell_style(view: &MonthView, cell: &DayCell) -> Style {
    let style = if cell.in_current_scope {
        BASE_STYLE
    } else {
        OUT_OF_SCOPE_STYLE
    };
    if view.is_selected(cell.date) {
        style.patch(SELECTED_STYLE)
    } else {
        style
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title_bar(&mut self, title: String, today_x: u16, today: &str) {
        self.mvprint(0, 0, Line::styled(PREV_SYMBOL, NAV_STYLE), 1);
        self.mvprint(
            0,
            2,
            Line::styled(title, TITLE_STYLE),
            today_x.saturating_sub(3),
        );
        self.mvprint(0, today_x, Line::from(today_label(today)), MAIN_WIDTH);
        self.mvprint(0, MAIN_WIDTH - 1, Line::styled(NEXT_SYMBOL, NAV_STYLE), 1);
    }

    fn draw_week_labels(&mut self, labels: [&str; DAYS_IN_WEEK]) {
        for (wd, label) in zip(0u16.., labels) {
            let width = u16::try_from(Span::raw(label).width()).unwrap_or(u16::MAX);
            let x = wd * DAY_WIDTH + LABEL_WIDTH.saturating_sub(width) / 2;
            self.mvprint(1, x, Line::styled(label, WEEKDAY_STYLE), DAY_WIDTH);
        }
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_cell(&mut self, week_no: u16, wd: u16, text: Text<'_>, style: Style) {
        let y = week_no * WEEK_LINES + HEADER_LINES;
        let x = wd * DAY_WIDTH;
        let base = style.patch(text.style);
        for (j, line) in zip(0..WEEK_LINES, text.lines) {
            let line_style = base.patch(line.style);
            self.mvprint(y + j, x, line.style(line_style), CELL_WIDTH);
        }
    }

    // Lines are truncated to `max_width` columns and to the calendar's area
    fn mvprint(&mut self, y: u16, x: u16, line: Line<'_>, max_width: u16) {
        if y < self.area.height && x < self.area.width {
            let width = u16::try_from(line.width())
                .unwrap_or(u16::MAX)
                .min(max_width)
                .min(self.area.width - x);
            line.render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width,
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(
            y,
            x,
            Line::raw(String::from(ch).repeat(length.into())),
            length,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarOptions, WEEKS_PER_GRID};
    use crate::locale::{EN_US, ZH_CN};
    use ratatui::style::{Color, Modifier};
    use time::macros::date;

    const TODAY: Date = date!(2024 - 09 - 22);

    fn row(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    fn render(view: &mut MonthView, area: Rect) -> Buffer {
        let mut buffer = Buffer::empty(area);
        MonthCalendar.render(area, &mut buffer, view);
        buffer
    }

    #[test]
    fn test_render_default() {
        let mut view = MonthView::new(CalendarOptions::new(), TODAY, None);
        let buffer = render(&mut view, Rect::new(0, 0, MAIN_WIDTH, TOTAL_LINES));
        assert_eq!(
            row(&buffer, 0),
            format!("< September 2024{}[Today]  >", " ".repeat(22))
        );
        assert_eq!(
            row(&buffer, 1),
            " Su     Mo     Tu     We     Th     Fr     Sa"
        );
        assert_eq!(row(&buffer, 2), "─".repeat(48));
        assert_eq!(
            row(&buffer, 3),
            "  1      2      3      4      5      6      7"
        );
        assert_eq!(row(&buffer, 4), "");
        assert_eq!(
            row(&buffer, 9),
            "[22]    23     24     25     26     27     28"
        );
        assert_eq!(
            row(&buffer, 13),
            "  6      7      8      9     10     11     12"
        );
        assert_eq!(row(&buffer, 14), "");
    }

    #[test]
    fn test_render_styles() {
        let mut view = MonthView::new(CalendarOptions::new(), TODAY, None);
        let buffer = render(&mut view, Rect::new(0, 0, MAIN_WIDTH, TOTAL_LINES));
        // Selected: September 22
        assert!(buffer[(1, 9)].modifier.contains(Modifier::REVERSED));
        assert!(!buffer[(8, 9)].modifier.contains(Modifier::REVERSED));
        // Out of scope: October 6
        assert_eq!(buffer[(2, 13)].fg, Color::DarkGray);
        assert_eq!(buffer[(2, 3)].fg, Color::White);
        assert!(buffer[(2, 0)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_render_centered() {
        let mut view = MonthView::new(CalendarOptions::new(), TODAY, None);
        let buffer = render(&mut view, Rect::new(0, 0, 80, 24));
        assert_eq!(
            row(&buffer, 9),
            format!("{}[22]    23     24     25     26     27     28", " ".repeat(16))
        );
    }

    #[test]
    fn test_render_inner_content() {
        let mut view = MonthView::new(
            CalendarOptions::new()
                .date_inner_content(|d: Date| Text::raw(if d.day() == 1 { "*" } else { "" })),
            TODAY,
            None,
        );
        let buffer = render(&mut view, Rect::new(0, 0, MAIN_WIDTH, TOTAL_LINES));
        assert_eq!(
            row(&buffer, 3),
            "  1      2      3      4      5      6      7"
        );
        assert_eq!(row(&buffer, 4), "*");
        // October 1 is a Tuesday in the fifth week
        assert_eq!(row(&buffer, 12), format!("{}*", " ".repeat(14)));
    }

    #[test]
    fn test_render_date_render_override() {
        let mut view = MonthView::new(
            CalendarOptions::new()
                .date_render(|d: Date| Text::raw(format!("<{}>", d.day())))
                .date_inner_content(|_: Date| Text::raw("unused")),
            TODAY,
            None,
        );
        let buffer = render(&mut view, Rect::new(0, 0, MAIN_WIDTH, TOTAL_LINES));
        assert_eq!(
            row(&buffer, 3),
            "<1>    <2>    <3>    <4>    <5>    <6>    <7>"
        );
        assert_eq!(row(&buffer, 4), "");
        assert_eq!(
            row(&buffer, 9),
            "<22>   <23>   <24>   <25>   <26>   <27>   <28>"
        );
    }

    #[test]
    fn test_render_truncates_long_content() {
        let mut view = MonthView::new(
            CalendarOptions::new().date_inner_content(|_: Date| Text::raw("abcdefghij")),
            TODAY,
            None,
        );
        let buffer = render(&mut view, Rect::new(0, 0, MAIN_WIDTH, TOTAL_LINES));
        assert_eq!(
            row(&buffer, 4),
            "abcdef abcdef abcdef abcdef abcdef abcdef abcdef"
        );
    }

    #[test]
    fn test_render_small_area() {
        let mut view = MonthView::new(CalendarOptions::new(), TODAY, None);
        let buffer = render(&mut view, Rect::new(0, 0, 10, 4));
        assert_eq!(row(&buffer, 0), "< Septembe");
        assert_eq!(row(&buffer, 3), "  1      2");
    }

    #[test]
    fn test_render_follows_navigation() {
        let mut view = MonthView::new(CalendarOptions::new(), TODAY, None);
        assert_eq!(view.next_month(), Ok(()));
        let buffer = render(&mut view, Rect::new(0, 0, MAIN_WIDTH, TOTAL_LINES));
        assert!(row(&buffer, 0).starts_with("< October 2024 "));
        // October 2024 starts on a Tuesday
        assert_eq!(
            row(&buffer, 3),
            " 29     30      1      2      3      4      5"
        );
    }

    #[test]
    fn test_hit_test() {
        let view = MonthView::new(CalendarOptions::new(), TODAY, None);
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(MonthCalendar::hit_test(area, 16, 0, &view), Some(Hit::PrevMonth));
        assert_eq!(MonthCalendar::hit_test(area, 63, 0, &view), Some(Hit::NextMonth));
        assert_eq!(MonthCalendar::hit_test(area, 54, 0, &view), Some(Hit::Today));
        assert_eq!(MonthCalendar::hit_test(area, 60, 0, &view), Some(Hit::Today));
        assert_eq!(MonthCalendar::hit_test(area, 61, 0, &view), None);
        assert_eq!(MonthCalendar::hit_test(area, 20, 1, &view), None);
        assert_eq!(
            MonthCalendar::hit_test(area, 17, 9, &view),
            Some(Hit::Date(date!(2024 - 09 - 22)))
        );
        assert_eq!(
            MonthCalendar::hit_test(area, 17, 10, &view),
            Some(Hit::Date(date!(2024 - 09 - 22)))
        );
        assert_eq!(
            MonthCalendar::hit_test(area, 63, 14, &view),
            Some(Hit::Date(date!(2024 - 10 - 12)))
        );
        assert_eq!(MonthCalendar::hit_test(area, 22, 9, &view), None);
        assert_eq!(MonthCalendar::hit_test(area, 17, 15, &view), None);
        assert_eq!(MonthCalendar::hit_test(area, 2, 9, &view), None);
    }

    #[test]
    fn test_total_lines_fit_six_weeks() {
        assert_eq!(
            usize::from(TOTAL_LINES - HEADER_LINES),
            WEEKS_PER_GRID * usize::from(WEEK_LINES)
        );
    }

    #[test]
    fn test_today_bounds_follow_locale() {
        assert_eq!(today_bounds(&EN_US), (38, 7));
        assert_eq!(today_bounds(&ZH_CN), (39, 6));
    }

    #[test]
    fn test_hit_test_zh_today() {
        let view = MonthView::new(CalendarOptions::new().locale("zh-CN"), TODAY, None);
        let area = Rect::new(0, 0, MAIN_WIDTH, TOTAL_LINES);
        // "[今天]" is six columns wide
        assert_eq!(MonthCalendar::hit_test(area, 38, 0, &view), None);
        assert_eq!(MonthCalendar::hit_test(area, 39, 0, &view), Some(Hit::Today));
        assert_eq!(MonthCalendar::hit_test(area, 44, 0, &view), Some(Hit::Today));
    }
}
