//! Command-line argument parsing using clap.
//!
//! Arguments follow the classic `cal` convention: `[[month] year]`, with
//! conversion requests as flags.

use clap::{Parser, ValueHint};
use std::io::IsTerminal;
use tracing::debug;

use crate::error::CalError;
use crate::formatter::parse_month;
use crate::types::{
    CLI_YEARS, CalContext, ColumnsMode, GUTTER_WIDTH_YEAR, GregorianDate, RenderStyle, ShamsiDate,
};

#[derive(Parser, Debug)]
#[command(name = "scal")]
#[command(about = "Displays the Shamsi calendar and converts dates", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Convert a Gregorian date (YYYY-MM-DD) to Shamsi.
    #[arg(
        short = 'g',
        long,
        value_name = "DATE",
        conflicts_with_all = ["shamsi", "first_arg", "second_arg"],
        help_heading = "Conversion options"
    )]
    pub gregorian: Option<String>,

    /// Convert a Shamsi date (YYYY-MM-DD) to Gregorian.
    #[arg(
        short = 's',
        long,
        value_name = "DATE",
        conflicts_with_all = ["first_arg", "second_arg"],
        help_heading = "Conversion options"
    )]
    pub shamsi: Option<String>,

    /// Month (1-12 or name) followed by a year, or a year on its own.
    #[arg(index = 1, value_name = "month|year", value_hint = ValueHint::Other)]
    pub first_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 2, value_name = "year", value_hint = ValueHint::Other)]
    pub second_arg: Option<String>,

    /// How to highlight today (color, marker or plain).
    #[arg(long, help_heading = "Output options", value_name = "style")]
    pub style: Option<RenderStyle>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub no_color: bool,

    /// Months per row in the year view (or "auto" for terminal width).
    #[arg(
        short = 'c',
        long = "columns",
        help_heading = "Output options",
        value_name = "width"
    )]
    pub columns: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Use this Gregorian date (YYYY-MM-DD) as today.
    #[arg(long, value_name = "DATE", hide = true)]
    pub today: Option<String>,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display a Shamsi calendar, or convert a date.

Without any arguments, display the current month.

Examples:
  scal                      Display current month
  scal 1403                 Display Shamsi year 1403
  scal 7 1403               Display Mehr 1403
  scal esfand 1402          Display Esfand 1402
  scal -g 2024-03-20        Convert a Gregorian date to Shamsi
  scal -s 1403-01-01        Convert a Shamsi date to Gregorian
  scal --no-color           Disable colorized output";

/// What the user asked for, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ToShamsi(GregorianDate),
    ToGregorian(ShamsiDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl Args {
    pub fn try_parse() -> Result<Self, clap::Error> {
        Parser::try_parse()
    }
}

impl CalContext {
    pub fn new(args: &Args) -> Result<Self, CalError> {
        let today = get_today_date(args)?.to_shamsi();

        let style = match args.style {
            Some(style) => style,
            None if !args.no_color && std::io::stdout().is_terminal() => RenderStyle::Color,
            None => RenderStyle::Plain,
        };

        let columns = match args.columns.as_deref() {
            Some("auto") | None => ColumnsMode::Auto,
            Some(s) => match s.parse::<u32>() {
                Ok(n) if n > 0 => ColumnsMode::Fixed(n),
                _ => return Err(CalError::InvalidColumns(s.to_string())),
            },
        };

        debug!(%today, ?style, ?columns, "calendar context");

        Ok(CalContext {
            style,
            today,
            columns,
            gutter_width: GUTTER_WIDTH_YEAR,
        })
    }
}

/// Get today's Gregorian date, respecting the hidden --today override.
pub fn get_today_date(args: &Args) -> Result<GregorianDate, CalError> {
    match args.today.as_deref() {
        Some(date) => date.parse(),
        None => Ok(chrono::Local::now().date_naive().into()),
    }
}

fn check_cli_year(year: i32) -> Result<i32, CalError> {
    if CLI_YEARS.contains(&year) {
        Ok(year)
    } else {
        Err(CalError::InvalidYear(year))
    }
}

fn parse_year(s: &str) -> Result<i32, CalError> {
    let year = s
        .parse::<i32>()
        .map_err(|_| CalError::InvalidArgument(s.to_string()))?;
    check_cli_year(year)
}

fn parse_month_arg(s: &str) -> Result<u32, CalError> {
    if let Some(month) = parse_month(s) {
        return Ok(month);
    }
    match s.parse::<u32>() {
        Ok(n) => Err(CalError::InvalidMonth(n)),
        Err(_) => Err(CalError::InvalidArgument(s.to_string())),
    }
}

/// Work out the request from conversion flags and positional arguments.
///
/// Argument patterns:
/// - `-g DATE` / `-s DATE`: conversion
/// - no args: current month
/// - 1 arg: year, or a month name (current year)
/// - 2 args: month year
pub fn resolve_request(args: &Args, today: ShamsiDate) -> Result<Request, CalError> {
    if let Some(input) = &args.gregorian {
        let date: GregorianDate = input.parse()?;
        check_cli_year(date.year())?;
        return Ok(Request::ToShamsi(date));
    }

    if let Some(input) = &args.shamsi {
        let date: ShamsiDate = input.parse()?;
        check_cli_year(date.year())?;
        return Ok(Request::ToGregorian(date));
    }

    match (args.first_arg.as_deref(), args.second_arg.as_deref()) {
        (None, None) => Ok(Request::Month {
            year: today.year(),
            month: today.month(),
        }),
        // One argument: a year, unless it names a month
        (Some(arg), None) => {
            if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
                return Ok(Request::Year(parse_year(arg)?));
            }
            parse_month(arg)
                .map(|month| Request::Month {
                    year: today.year(),
                    month,
                })
                .ok_or_else(|| CalError::InvalidArgument(arg.to_string()))
        }
        (Some(month), Some(year)) => Ok(Request::Month {
            month: parse_month_arg(month)?,
            year: parse_year(year)?,
        }),
        (None, Some(_)) => Err(CalError::InvalidArgument(
            "invalid argument combination".to_string(),
        )),
    }
}
