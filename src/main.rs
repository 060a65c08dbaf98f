mod app;
mod help;
mod theme;
mod view;
use crate::app::App;
use anyhow::Context;
use calgrid::{Calendar, Element, OptionsOverride};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Environment variable holding the log filter.  Nothing is logged when it is
/// unset.
const LOG_ENV: &str = "CALGRID_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { date: Option<Date>, html: bool },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut html = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("html") => html = true,
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
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
        Ok(Command::Run { date, html })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, html } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut calendar =
                    Calendar::with_today(Element::new("div"), OptionsOverride::new(), today);
                calendar.init().context("failed to lay out today's month")?;
                if let Some(date) = date {
                    calendar
                        .set_date(date)
                        .render()
                        .with_context(|| format!("failed to lay out the month of {date}"))?;
                }
                if html {
                    println!("{}", calendar.container());
                    Ok(())
                } else {
                    with_terminal(|mut terminal| {
                        terminal.hide_cursor().context("failed to hide cursor")?;
                        App::new(calendar).run(&mut terminal)?;
                        Ok(())
                    })
                }
            }
            Command::Help => {
                println!("Usage: calgrid [--html] [YYYY-MM-DD]");
                println!();
                println!("Month calendar grid centered on a given date (default: today)");
                println!();
                println!("Options:");
                println!("  --html            Print the rendered month as HTML and exit");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                println!();
                println!("Set {LOG_ENV} (e.g., {LOG_ENV}=debug) to log to stderr.");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn init_logging() {
    if std::env::var_os(LOG_ENV).is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_env(LOG_ENV))
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
