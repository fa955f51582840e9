//! CLI interface for Pace.
//!
//! Each subcommand is non-interactive: arguments in, text or JSON out.
//!
//! - `pace days add|count|between|week`: working-day calendar arithmetic.
//! - `pace span parse|format`: the duration grammar.
//! - `pace project`: every projection metric for one task or sprint.
//!
//! Timestamps are wall-clock: `2018-03-12`, `2018-03-12T08:00[:00]` or
//! `"2018-03-12 08:00"`. A bare date means midnight.

mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::{Date, DateTime, Time};

use pace::calendar::{self, HolidayCalendar, WorkCalendar};
use pace::config::Config;
use pace::projection::{EffortRecord, Projector, Timeline};
use pace::span::{DurationStyle, TimeSpan, UnitConvention};

use format::{format_report, format_timestamp};

/// Pace: working-day schedules and effort projections.
#[derive(Debug, Parser)]
#[command(name = "pace", after_long_help = EXAMPLES_HELP)]
pub struct Cli {
    /// Config file (default: $PACE_CONFIG or ~/.pace/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const EXAMPLES_HELP: &str = r#"Examples:
  pace days add 2018-01-09 60
  pace days count 2018-03-10 2018-03-23
  pace span parse "1w 2d"
  pace span format PT80H --columns
  pace project --start "2018-03-12 08:00" --now "2018-03-16 08:00" \
      --end "2018-03-23 08:00" --worked 4d --remaining 6d"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Working-day calendar arithmetic.
    Days {
        #[command(subcommand)]
        command: DaysCommand,
    },

    /// Parse and render durations like "1w 2d" or "4d 03h 46m".
    Span {
        #[command(subcommand)]
        command: SpanCommand,
    },

    /// Project efficiency, delay and release date for one task or sprint.
    ///
    /// Durations use work days and weeks from the config.
    /// Without --remaining most metrics are unknown.
    Project {
        /// Planned start.
        #[arg(long, value_parser = parse_timestamp)]
        start: DateTime,

        /// Evaluation instant.
        #[arg(long, value_parser = parse_timestamp)]
        now: DateTime,

        /// Planned end.
        #[arg(long, value_parser = parse_timestamp)]
        end: DateTime,

        /// Effort worked so far.
        #[arg(long)]
        worked: Option<String>,

        /// Effort still remaining.
        #[arg(long)]
        remaining: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum DaysCommand {
    /// Date of the Nth working day counting from START.
    ///
    /// START counts as the first day if it is worked. Negative N walks back.
    Add {
        #[arg(value_parser = parse_timestamp)]
        start: DateTime,
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },

    /// Working days between two dates, both included.
    Count {
        #[arg(value_parser = parse_date)]
        start: Date,
        #[arg(value_parser = parse_date)]
        end: Date,
    },

    /// Whole 24-hour days between two timestamps.
    Between {
        #[arg(value_parser = parse_timestamp)]
        start: DateTime,
        #[arg(value_parser = parse_timestamp)]
        end: DateTime,
    },

    /// Monday and Sunday of the week holding DATE.
    Week {
        #[arg(value_parser = parse_date)]
        date: Date,
    },
}

#[derive(Debug, Subcommand)]
pub enum SpanCommand {
    /// Print the canonical form and total minutes.
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Use 24-hour days and 7-day weeks instead of work days.
        #[arg(long)]
        calendar: bool,
    },

    /// Re-render a duration.
    Format {
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Use 24-hour days and 7-day weeks instead of work days.
        #[arg(long)]
        calendar: bool,

        /// Fixed-width columns down to milliseconds.
        #[arg(long)]
        columns: bool,
    },
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Days { command } => {
            let calendar = config
                .calendar()
                .map_err(|e| format!("failed to build calendar: {e}"))?;
            cmd_days(&calendar, &command)
        }
        Command::Span { command } => cmd_span(&config, &command),
        Command::Project {
            start,
            now,
            end,
            worked,
            remaining,
            json,
        } => {
            let timeline = Timeline::new(start, now, end);
            cmd_project(
                &config,
                timeline,
                worked.as_deref(),
                remaining.as_deref(),
                json,
            )
        }
    }
}

fn cmd_days(calendar: &HolidayCalendar, command: &DaysCommand) -> Result<(), String> {
    match command {
        DaysCommand::Add { start, n } => {
            let day = calendar
                .add_working_days(*start, *n)
                .map_err(|e| format!("cannot add {n} working days to {start}: {e}"))?;
            println!("{}", format_timestamp(day));
        }
        DaysCommand::Count { start, end } => {
            println!("{}", calendar.count_working_days_inclusive(*start, *end));
        }
        DaysCommand::Between { start, end } => {
            println!("{}", calendar::count_calendar_days(*start, *end));
        }
        DaysCommand::Week { date } => {
            let monday = calendar::week_monday(*date).map_err(|e| e.to_string())?;
            let sunday = calendar::week_sunday(*date).map_err(|e| e.to_string())?;
            println!("{monday} {sunday}");
        }
    }
    Ok(())
}

fn cmd_span(config: &Config, command: &SpanCommand) -> Result<(), String> {
    let convention = |calendar: bool| {
        if calendar {
            UnitConvention::Calendar
        } else {
            UnitConvention::Work(config.work_week())
        }
    };

    match command {
        SpanCommand::Parse { text, calendar } => {
            let convention = convention(*calendar);
            let span = parse_span(text, convention)?;
            let canonical = span.format(convention, &convention.default_style());
            let minutes = span.as_millis() / 60_000;
            println!("{canonical} ({minutes} min)");
        }
        SpanCommand::Format {
            text,
            calendar,
            columns,
        } => {
            let convention = convention(*calendar);
            let span = parse_span(text, convention)?;
            let style = if *columns {
                DurationStyle::columns()
            } else {
                convention.default_style()
            };
            println!("{}", span.format(convention, &style));
        }
    }
    Ok(())
}

fn cmd_project(
    config: &Config,
    timeline: Timeline,
    worked: Option<&str>,
    remaining: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let week = config.work_week();
    let convention = UnitConvention::Work(week);
    let worked = worked.map(|w| parse_span(w, convention)).transpose()?;
    let remaining = remaining.map(|r| parse_span(r, convention)).transpose()?;

    let calendar = config
        .calendar()
        .map_err(|e| format!("failed to build calendar: {e}"))?;
    let projector = Projector::with_calendar(calendar, week);
    let report = projector.report(&EffortRecord::new(timeline, worked, remaining));

    if json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("failed to serialize report: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", format_report(&report, &week));
    }
    Ok(())
}

fn parse_span(text: &str, convention: UnitConvention) -> Result<TimeSpan, String> {
    TimeSpan::parse(text, convention).map_err(|e| format!("invalid duration '{text}': {e}"))
}

/// Accepts a bare date (midnight) or a date and time separated by `T` or a space.
fn parse_timestamp(text: &str) -> Result<DateTime, String> {
    let text = text.trim();
    if !text.contains(['T', ' ']) {
        return text
            .parse::<Date>()
            .map(|date| date.to_datetime(Time::midnight()))
            .map_err(|e| format!("invalid date '{text}': {e}"));
    }
    text.replacen(' ', "T", 1)
        .parse::<DateTime>()
        .map_err(|e| format!("invalid timestamp '{text}': {e}"))
}

fn parse_date(text: &str) -> Result<Date, String> {
    parse_timestamp(text).map(|t| t.date())
}
