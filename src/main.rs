mod app;
mod help;
mod logging;
mod moon;
mod prompt;
use crate::app::App;
use crate::moon::moon_marker;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use monthcal::calendar::{CalendarOptions, MonthView};
use monthcal::locale::host_language;
use ratatui::DefaultTerminal;
use std::io;
use std::path::PathBuf;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    locale: Option<String>,
    controlled: bool,
    moon: bool,
    log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("locale") => {
                    opts.locale = Some(parser.value()?.string()?);
                }
                Arg::Short('c') | Arg::Long("controlled") => opts.controlled = true,
                Arg::Short('m') | Arg::Long("moon") => opts.moon = true,
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                logging::init_logging(opts.log_file.as_deref())?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                tracing::info!(%today, ?opts, "Starting calendar");
                let mut options = CalendarOptions::new();
                if let Some(locale) = opts.locale {
                    options = options.locale(locale);
                }
                if opts.moon {
                    options = options.date_inner_content(moon_marker);
                }
                let app = if opts.controlled {
                    App::controlled(options, opts.date.unwrap_or(today), today, host_language())
                } else {
                    if let Some(date) = opts.date {
                        options = options.default_value(date);
                    }
                    App::new(MonthView::new(options, today, host_language()))
                };
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: monthcal [options] [YYYY-MM-DD]");
                println!();
                println!("Month-view terminal calendar");
                println!();
                println!("Options:");
                println!("  -l, --locale <ID>     Locale for labels [default: host language]");
                println!("  -c, --controlled      Run with host-controlled selection");
                println!("  -m, --moon            Mark new and full moons under the day numbers");
                println!("      --log-file <PATH> Write log messages to PATH");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    // Errors here are ignored so that the terminal is always restored
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    r
}
