use ratatui::{
    style::{Color, Modifier, Style},
    text::Text,
};
use time::Date;

const FULL_MOON_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

const NEW_MOON_STYLE: Style = Style::new().fg(Color::LightBlue);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
enum Phase {
    Normal,
    Full,
    New,
}

impl Phase {
    fn for_date(date: Date) -> Phase {
        // Will give wrong results pre-1900
        let year = date.year().abs_diff(1900);
        let goldn = (year % 19) + 1;
        let mut epact = (11 * goldn + 18) % 30;
        if (epact == 25 && goldn > 11) || epact == 24 {
            epact += 1;
        }
        let day = u32::from(date.ordinal() - 1);
        match (((((day + epact) * 6) + 11) % 177) / 22) & 7 {
            0 => Phase::New,
            4 => Phase::Full,
            _ => Phase::Normal,
        }
    }
}

/// Supplementary cell content marking days of full & new moons
pub(crate) fn moon_marker(date: Date) -> Text<'static> {
    match Phase::for_date(date) {
        Phase::Normal => Text::default(),
        Phase::Full => Text::styled(" full", FULL_MOON_STYLE),
        Phase::New => Text::styled(" new", NEW_MOON_STYLE),
    }
}
