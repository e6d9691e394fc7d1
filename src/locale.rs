//! Week-day labels and other strings keyed by locale identifier.
//!
//! Locale identifiers are BCP 47 tags (`en-US`) or POSIX locale names
//! (`en_US.UTF-8`).  Resolution never fails: a tag with no entry in the table
//! falls back to another entry for the same language, then to
//! [`DEFAULT_LOCALE`].
use std::env;
use time::Date;
use tracing::debug;
use unic_langid::{subtags::Region, LanguageIdentifier};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum TitleOrder {
    /// "September 2024"
    MonthYear,
    /// "2024年9月"
    YearMonth,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Locale {
    id: &'static str,
    language: &'static str,
    region: Option<&'static str>,
    week_labels: [&'static str; 7],
    today: &'static str,
    month_names: [&'static str; 12],
    title_order: TitleOrder,
}

impl Locale {
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Labels for the days of the week, starting with Sunday
    pub fn week_labels(&self) -> [&'static str; 7] {
        self.week_labels
    }

    /// Label for the "jump to today" control
    pub fn today(&self) -> &'static str {
        self.today
    }

    pub fn month_name(&self, date: Date) -> &'static str {
        let i = usize::from(u8::from(date.month())) - 1;
        self.month_names.get(i).copied().unwrap_or_default()
    }

    /// Heading naming the month & year of `date`
    pub fn title(&self, date: Date) -> String {
        let month = self.month_name(date);
        let year = date.year();
        match self.title_order {
            TitleOrder::MonthYear => format!("{month} {year}"),
            TitleOrder::YearMonth => format!("{year}年{month}"),
        }
    }

    fn matches_language(&self, langid: &LanguageIdentifier) -> bool {
        langid.language.as_str() == self.language
    }

    fn matches_exactly(&self, langid: &LanguageIdentifier) -> bool {
        self.matches_language(langid)
            && langid.region.as_ref().map(Region::as_str) == self.region
    }
}

pub static EN_US: Locale = Locale {
    id: "en-US",
    language: "en",
    region: Some("US"),
    week_labels: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
    today: "Today",
    month_names: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    title_order: TitleOrder::MonthYear,
};

pub static ZH_CN: Locale = Locale {
    id: "zh-CN",
    language: "zh",
    region: Some("CN"),
    week_labels: ["周日", "周一", "周二", "周三", "周四", "周五", "周六"],
    today: "今天",
    month_names: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    title_order: TitleOrder::YearMonth,
};

/// All built-in locales
pub static LOCALES: [&Locale; 2] = [&EN_US, &ZH_CN];

/// The locale used when nothing better matches
pub static DEFAULT_LOCALE: &Locale = &EN_US;

/// Resolve the locale to use for labels.
///
/// `locale_id` takes precedence; if it is `None`, `host_language` (see
/// [`host_language()`]) is used instead.
pub fn resolve_locale(locale_id: Option<&str>, host_language: Option<&str>) -> &'static Locale {
    let Some(tag) = locale_id.or(host_language) else {
        return DEFAULT_LOCALE;
    };
    let Some(langid) = parse_tag(tag) else {
        debug!(tag, fallback = DEFAULT_LOCALE.id, "Unparseable locale; using default");
        return DEFAULT_LOCALE;
    };
    if let Some(locale) = LOCALES.iter().copied().find(|l| l.matches_exactly(&langid)) {
        return locale;
    }
    let fallback = LOCALES
        .iter()
        .copied()
        .find(|l| l.matches_language(&langid))
        .unwrap_or(DEFAULT_LOCALE);
    debug!(tag, fallback = fallback.id, "No exact locale match; falling back");
    fallback
}

/// Week-day labels, Sunday first, for the given locale
pub fn resolve_week_labels(
    locale_id: Option<&str>,
    host_language: Option<&str>,
) -> [&'static str; 7] {
    resolve_locale(locale_id, host_language).week_labels()
}

/// The language reported by the environment, taken from the first non-empty
/// of `LC_ALL`, `LC_MESSAGES`, and `LANG`
pub fn host_language() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
}

fn parse_tag(tag: &str) -> Option<LanguageIdentifier> {
    // Strip POSIX encoding & modifier suffixes, as in "en_US.UTF-8@euro"
    let tag = tag.split(['.', '@']).next()?.replace('_', "-");
    tag.parse().ok()
}
