//! Type definitions and constants for conversion and calendar formatting.

use std::fmt;
use std::ops::RangeInclusive;

use clap::ValueEnum;

/// How the renderer marks the highlighted day and decorates headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum RenderStyle {
    /// ANSI colors: reverse video for the highlighted day, colored headers, red Fridays.
    Color,
    /// Plain text with a `>` in front of the highlighted day.
    Marker,
    /// Plain text, nothing highlighted.
    Plain,
}

/// Column display mode for the year view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnsMode {
    /// Fixed number of months per row.
    Fixed(u32),
    /// Auto-detect from terminal width.
    Auto,
}

/// Calendar formatting context containing all display options.
#[derive(Clone, Debug)]
pub struct CalContext {
    /// How highlighted days and headers are drawn.
    pub style: RenderStyle,
    /// Today's date in the Shamsi calendar, used for highlighting.
    pub today: ShamsiDate,
    /// Months per row in the year view.
    pub columns: ColumnsMode,
    /// Width of gutter between months in multi-month display.
    pub gutter_width: usize,
}

/// A validated date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GregorianDate {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) day: u32,
}

/// A validated date in the Shamsi (Solar Hijri) calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShamsiDate {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) day: u32,
}

impl fmt::Display for GregorianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for ShamsiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Layout of a single rendered Shamsi month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 (0 = month starts on Saturday).
    pub leading_blanks: u32,
    pub day_count: u32,
    pub highlighted_day: Option<u32>,
}

// Years accepted by the typed date constructors
pub const SUPPORTED_YEARS: RangeInclusive<i32> = -1_000_000..=1_000_000;
// Years accepted on the command line
pub const CLI_YEARS: RangeInclusive<i32> = 1..=9999;

// Constants for calendar formatting
pub const MONTHS_PER_YEAR: u32 = 12;
pub const DAYS_PER_WEEK: u32 = 7;
pub const CELL_WIDTH: usize = 3;
pub const GRID_WIDTH: usize = CELL_WIDTH * DAYS_PER_WEEK as usize;
pub const GUTTER_WIDTH_YEAR: usize = 3;
pub const WEEKDAY_HEADER: &str = " Sa Su Mo Tu We Th Fr";
pub const HIGHLIGHT_MARKER: char = '>';

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
