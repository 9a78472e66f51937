mod app;
mod help;
mod jumpto;
mod logging;
mod monthview;
mod theme;
use crate::app::App;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use simcal::config::{parse_highlight, Config};
use simcal::dates::{parse_date, parse_month, today};
use simcal::{Calendar, ClassNames, Highlight, WeekStart};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    month: Option<String>,
    config: Option<PathBuf>,
    week_start: Option<WeekStart>,
    events: Vec<EventArg>,
    today: Option<String>,
    no_highlight: bool,
    interactive: bool,
    verbosity: u8,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    opts.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('s') | Arg::Long("week-start") => {
                    opts.week_start = Some(parser.value()?.parse()?);
                }
                Arg::Short('e') | Arg::Long("event") => {
                    opts.events.push(parser.value()?.parse()?);
                }
                Arg::Short('d') | Arg::Long("details") => {
                    let details = parser.value()?.string()?;
                    let Some(ev) = opts.events.last_mut() else {
                        return Err(lexopt::Error::ParsingFailed {
                            value: details,
                            error: Box::new(OrphanDetailsError),
                        });
                    };
                    ev.details = Some(details);
                }
                Arg::Short('t') | Arg::Long("today") => {
                    opts.today = Some(parser.value()?.string()?);
                }
                Arg::Short('n') | Arg::Long("no-highlight") => opts.no_highlight = true,
                Arg::Short('i') | Arg::Long("interactive") => opts.interactive = true,
                Arg::Short('v') | Arg::Long("verbose") => {
                    opts.verbosity = opts.verbosity.saturating_add(1);
                }
                Arg::Value(value) if opts.month.is_none() => {
                    opts.month = Some(value.string()?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => opts.run(),
            Command::Help => {
                println!("Usage: simcal [OPTIONS] [MONTH]");
                println!();
                println!("Render a month as an HTML calendar table, with events");
                println!();
                println!("MONTH may be YYYY-MM, YYYY-MM-DD, or a date like \"October 2022\".");
                println!("Defaults to the current month.");
                println!();
                println!("Options:");
                println!("  -c, --config FILE     Load settings and events from a TOML file");
                println!("  -s, --week-start DAY  First column: 0-6 (Sunday = 0) or a weekday name");
                println!("  -e, --event SPEC      Add an event, given as START[..END]=CONTENT");
                println!("  -d, --details TEXT    Details markup for the preceding --event");
                println!("  -t, --today DATE      Highlight DATE instead of the current date");
                println!("  -n, --no-highlight    Do not highlight any date");
                println!("  -i, --interactive     Browse months in the terminal instead");
                println!("  -v, --verbose         Log more details to stderr (repeatable)");
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

impl Options {
    fn run(self) -> anyhow::Result<()> {
        logging::init(self.verbosity);
        let today = today();
        let (calendar, classes) = self.build(today)?;
        if self.interactive {
            with_terminal(|mut terminal| {
                terminal.hide_cursor().context("failed to hide cursor")?;
                App::new(calendar, today)
                    .run(terminal)
                    .context("terminal I/O failed")
            })
        } else {
            let html = calendar
                .to_html(&classes)
                .context("failed to render calendar")?;
            print!("{html}");
            Ok(())
        }
    }

    /// Set up a calendar from the config file (if any) and then the
    /// command-line options, which take precedence
    fn build(&self, today: time::Date) -> anyhow::Result<(Calendar, ClassNames)> {
        let mut calendar = Calendar::new(today);
        let mut classes = ClassNames::default();
        if let Some(path) = &self.config {
            let config = Config::load(path)?;
            config
                .apply(&mut calendar, today)
                .with_context(|| format!("invalid configuration in {}", path.display()))?;
            classes = config.classes;
        }
        if let Some(month) = &self.month {
            let (year, month) = parse_month(month, today).context("invalid month argument")?;
            calendar.set_month(year, u8::from(month))?;
        }
        if let Some(ws) = self.week_start {
            calendar.set_week_start(ws);
        }
        if self.no_highlight {
            calendar.set_highlight(Highlight::Disabled);
        } else if let Some(s) = &self.today {
            let hl = parse_highlight(s, today).context("invalid --today value")?;
            calendar.set_highlight(hl);
        }
        for ev in &self.events {
            let start = parse_date(&ev.start, today)
                .with_context(|| format!("invalid start date for event {:?}", ev.content))?;
            let end = ev
                .end
                .as_deref()
                .map(|s| parse_date(s, today))
                .transpose()
                .with_context(|| format!("invalid end date for event {:?}", ev.content))?;
            calendar
                .add_event_with_details(ev.content.as_str(), ev.details.as_deref(), start, end)
                .with_context(|| format!("failed to add event {:?}", ev.content))?;
        }
        tracing::debug!(
            year = calendar.year(),
            month = %calendar.month(),
            events = calendar.events().len(),
            "calendar configured"
        );
        Ok((calendar, classes))
    }
}

/// An `--event` argument, `START[..END]=CONTENT`, plus any `--details`
/// given after it
#[derive(Clone, Debug, Eq, PartialEq)]
struct EventArg {
    start: String,
    end: Option<String>,
    content: String,
    details: Option<String>,
}

impl FromStr for EventArg {
    type Err = EventArgError;

    fn from_str(s: &str) -> Result<EventArg, EventArgError> {
        let (dates, content) = s.split_once('=').ok_or(EventArgError)?;
        let (start, end) = match dates.split_once("..") {
            Some((start, end)) => (start.trim(), Some(end.trim())),
            None => (dates.trim(), None),
        };
        if start.is_empty() || end.is_some_and(str::is_empty) {
            return Err(EventArgError);
        }
        Ok(EventArg {
            start: start.to_owned(),
            end: end.map(String::from),
            content: content.to_owned(),
            details: None,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("expected event of the form START[..END]=CONTENT")]
struct EventArgError;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("--details must follow an --event")]
struct OrphanDetailsError;

fn main() -> anyhow::Result<()> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use time::macros::date;
    use time::{Month, Weekday};

    fn parse_args(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse_args(&[]).ok(), Some(Command::Run(Options::default())));
    }

    #[test]
    fn test_all_options() {
        let cmd = parse_args(&[
            "-s",
            "mon",
            "--event",
            "2022-10-14..2022-10-16=<b>Trip</b>",
            "-e",
            "October 30=Party",
            "--today",
            "2022-10-05",
            "-vv",
            "-i",
            "2022-10",
        ])
        .expect("arguments should parse");
        let opts = match cmd {
            Command::Run(opts) => opts,
            other => panic!("expected Run command, got {other:?}"),
        };
        assert_eq!(opts.month.as_deref(), Some("2022-10"));
        assert_eq!(opts.week_start, Some(WeekStart::from(Weekday::Monday)));
        assert_eq!(opts.today.as_deref(), Some("2022-10-05"));
        assert_eq!(opts.verbosity, 2);
        assert!(opts.interactive);
        assert!(!opts.no_highlight);
        assert_eq!(
            opts.events,
            [
                EventArg {
                    start: "2022-10-14".into(),
                    end: Some("2022-10-16".into()),
                    content: "<b>Trip</b>".into(),
                    details: None,
                },
                EventArg {
                    start: "October 30".into(),
                    end: None,
                    content: "Party".into(),
                    details: None,
                },
            ]
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse_args(&["-n", "--help"]).ok(), Some(Command::Help));
        assert_eq!(parse_args(&["-V"]).ok(), Some(Command::Version));
    }

    #[test]
    fn test_bad_args() {
        assert!(parse_args(&["-s", "someday"]).is_err());
        assert!(parse_args(&["-e", "2022-10-14"]).is_err());
        assert!(parse_args(&["2022-10", "2022-11"]).is_err());
        assert!(parse_args(&["--frobnicate"]).is_err());
    }

    #[test]
    fn test_event_arg() {
        assert_eq!("..2022-10-16=x".parse::<EventArg>(), Err(EventArgError));
        assert_eq!("2022-10-16..=x".parse::<EventArg>(), Err(EventArgError));
        assert_eq!(
            "today=a=b".parse::<EventArg>(),
            Ok(EventArg {
                start: "today".into(),
                end: None,
                content: "a=b".into(),
                details: None,
            })
        );
    }

    #[test]
    fn test_details_follow_event() {
        let cmd = parse_args(&[
            "-e",
            "2022-10-14..2022-10-16=Trip",
            "--details",
            "Pack <em>light</em>",
            "-e",
            "October 30=Party",
        ])
        .expect("arguments should parse");
        let opts = match cmd {
            Command::Run(opts) => opts,
            other => panic!("expected Run command, got {other:?}"),
        };
        let details = opts
            .events
            .iter()
            .map(|ev| ev.details.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(details, [Some("Pack <em>light</em>"), None]);
        assert!(parse_args(&["-d", "orphan", "-e", "today=x"]).is_err());
    }

    #[test]
    fn test_build_with_details() {
        let opts = Options {
            month: Some("2022-10".into()),
            events: vec![EventArg {
                start: "October 14".into(),
                end: Some("October 16".into()),
                content: "Trip".into(),
                details: Some("by train".into()),
            }],
            no_highlight: true,
            ..Options::default()
        };
        let (calendar, classes) = opts
            .build(date!(2022 - 10 - 19))
            .expect("options should apply");
        let ann = &calendar.events().annotations_on(date!(2022 - 10 - 15))[0];
        assert_eq!(ann.details(), Some("by train"));
        let html = calendar.to_html(&classes).expect("month should render");
        assert!(html.contains(concat!(
            "<div class=\"simcal-event simcal-has-previous simcal-has-next simcal-has-details\">",
            "Trip<span class=\"simcal-event-details\">by train</span></div>"
        )));
    }

    #[test]
    fn test_build() {
        let opts = Options {
            month: Some("2022-10".into()),
            week_start: Some(WeekStart::from_index(5)),
            events: vec![EventArg {
                start: "tomorrow".into(),
                end: Some("October 22".into()),
                content: "Fair".into(),
                details: None,
            }],
            today: Some("yesterday".into()),
            ..Options::default()
        };
        let today = date!(2022 - 10 - 19);
        let (calendar, classes) = opts.build(today).expect("options should apply");
        assert_eq!(classes, ClassNames::default());
        assert_eq!(calendar.month(), Month::October);
        assert_eq!(calendar.week().week_start().weekday(), Weekday::Friday);
        assert_eq!(calendar.highlight(), Highlight::Date(date!(2022 - 10 - 18)));
        assert_eq!(calendar.events().events_on(date!(2022 - 10 - 21)), ["Fair"]);
        assert!(calendar.events().events_on(date!(2022 - 10 - 19)).is_empty());
    }

    #[test]
    fn test_build_no_highlight_beats_today() {
        let opts = Options {
            today: Some("2022-10-05".into()),
            no_highlight: true,
            ..Options::default()
        };
        let (calendar, _) = opts
            .build(date!(2022 - 10 - 19))
            .expect("options should apply");
        assert_eq!(calendar.highlight(), Highlight::Disabled);
    }

    #[test]
    fn test_build_inverted_event() {
        let opts = Options {
            events: vec![EventArg {
                start: "tomorrow".into(),
                end: Some("yesterday".into()),
                content: "Oops".into(),
                details: None,
            }],
            ..Options::default()
        };
        assert!(opts.build(date!(2022 - 10 - 19)).is_err());
    }

    #[test]
    fn test_build_with_config() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile should be created");
        file.write_all(b"week_start = 1\nhighlight = \"none\"\n[classes]\ncalendar = \"cal\"\n")
            .expect("tempfile should be writable");
        let opts = Options {
            config: Some(file.path().to_owned()),
            week_start: Some(WeekStart::from_index(3)),
            ..Options::default()
        };
        let (calendar, classes) = opts
            .build(date!(2022 - 10 - 19))
            .expect("options should apply");
        assert_eq!(classes.calendar, "cal");
        assert_eq!(calendar.week().week_start().weekday(), Weekday::Wednesday);
        assert_eq!(calendar.highlight(), Highlight::Disabled);
    }
}
