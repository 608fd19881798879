//! Calendar calculation logic: the Shamsi 33-year leap cycle, Gregorian
//! leap rules, and conversion between the two calendars.
//!
//! Both calendars are mapped onto one continuous day count (day 1 is
//! 0001-01-01 in the proleptic Gregorian calendar, a Monday). Shamsi years
//! follow each other without gaps, so Farvardin 1 of every year lands
//! exactly one Shamsi year after the previous one. The count is pinned by
//! Farvardin 1, 1403 = 2024-03-20.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::error::CalError;
use crate::types::{
    CalContext, ColumnsMode, DAYS_PER_WEEK, GRID_WIDTH, GregorianDate, MONTHS_PER_YEAR,
    MonthLayout, SUPPORTED_YEARS, ShamsiDate,
};

const SHAMSI_CYCLE_YEARS: i64 = 33;
const SHAMSI_CYCLE_SHIFT: i64 = 2346;
const SHAMSI_LEAP_RESIDUES: [i64; 8] = [1, 5, 9, 13, 17, 21, 26, 30];

// Farvardin 1 of this Shamsi year falls on ANCHOR_GREGORIAN
const ANCHOR_SHAMSI_YEAR: i64 = 1403;
const ANCHOR_GREGORIAN: (i64, u32, u32) = (2024, 3, 20);

// Gregorian year in which a Shamsi year begins
const YEAR_OFFSET: i64 = 621;

const GREGORIAN_DAYS_BEFORE_MONTH: [u32; 12] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Check if a Shamsi year is a leap year (30 days in Esfand).
///
/// Uses the 33-year cycle: `(year + 2346) mod 33` must be one of
/// 1, 5, 9, 13, 17, 21, 26 or 30.
pub fn is_shamsi_leap_year(year: i32) -> bool {
    shamsi_leap(i64::from(year))
}

/// Check if a year is a leap year in the proleptic Gregorian calendar.
pub fn is_gregorian_leap_year(year: i32) -> bool {
    gregorian_leap(i64::from(year))
}

fn shamsi_leap(year: i64) -> bool {
    let rem = (year + SHAMSI_CYCLE_SHIFT).rem_euclid(SHAMSI_CYCLE_YEARS);
    SHAMSI_LEAP_RESIDUES.contains(&rem)
}

fn gregorian_leap(year: i64) -> bool {
    // Divisible by 4, except centuries unless divisible by 400
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_shamsi_month(year: i32, month: u32) -> Result<u32, CalError> {
    match month {
        1..=12 => Ok(shamsi_month_len(i64::from(year), month) as u32),
        _ => Err(CalError::InvalidMonth(month)),
    }
}

pub fn days_in_gregorian_month(year: i32, month: u32) -> Result<u32, CalError> {
    match month {
        1..=12 => Ok(gregorian_month_len(i64::from(year), month) as u32),
        _ => Err(CalError::InvalidMonth(month)),
    }
}

fn shamsi_month_len(year: i64, month: u32) -> i64 {
    match month {
        1..=6 => 31,
        12 if shamsi_leap(year) => 30,
        12 => 29,
        _ => 30,
    }
}

fn gregorian_month_len(year: i64, month: u32) -> i64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if gregorian_leap(year) => 29,
        2 => 28,
        _ => 30,
    }
}

fn shamsi_year_len(year: i64) -> i64 {
    if shamsi_leap(year) { 366 } else { 365 }
}

fn gregorian_year_len(year: i64) -> i64 {
    if gregorian_leap(year) { 366 } else { 365 }
}

fn shamsi_days_before_month(month: u32) -> i64 {
    let passed = i64::from(month) - 1;
    if passed <= 6 {
        passed * 31
    } else {
        6 * 31 + (passed - 6) * 30
    }
}

fn gregorian_days_before_month(year: i64, month: u32) -> i64 {
    let mut days = i64::from(GREGORIAN_DAYS_BEFORE_MONTH[(month - 1) as usize]);
    if month > 2 && gregorian_leap(year) {
        days += 1;
    }
    days
}

/// Day number within the Shamsi year (Farvardin 1 = 1). `month` must be 1-12.
pub fn shamsi_day_of_year(month: u32, day: u32) -> u32 {
    (shamsi_days_before_month(month) + i64::from(day)) as u32
}

/// Day number within the Gregorian year (January 1 = 1). `month` must be 1-12.
pub fn gregorian_day_of_year(year: i32, month: u32, day: u32) -> u32 {
    (gregorian_days_before_month(i64::from(year), month) + i64::from(day)) as u32
}

/// Days since 0000-12-31 of the proleptic Gregorian calendar.
///
/// Computed by hand since `chrono::NaiveDate` stops near ±262,000 years and
/// the conversions run on the whole `i32` year range.
fn gregorian_fixed(year: i64, month: u32, day: u32) -> i64 {
    let prior = year - 1;
    365 * prior + prior.div_euclid(4) - prior.div_euclid(100)
        + prior.div_euclid(400)
        + gregorian_days_before_month(year, month)
        + i64::from(day)
}

/// Number of Shamsi leap years preceding `year`, counted from the start of its shifted cycle.
fn shamsi_leap_years_before(year: i64) -> i64 {
    let shifted = year + SHAMSI_CYCLE_SHIFT;
    let rem = shifted.rem_euclid(SHAMSI_CYCLE_YEARS);
    let partial = SHAMSI_LEAP_RESIDUES.iter().filter(|&&r| r < rem).count() as i64;
    shifted.div_euclid(SHAMSI_CYCLE_YEARS) * SHAMSI_LEAP_RESIDUES.len() as i64 + partial
}

fn shamsi_new_year_fixed(year: i64) -> i64 {
    let elapsed = |y: i64| 365 * y + shamsi_leap_years_before(y);
    let (anchor_year, anchor_month, anchor_day) = ANCHOR_GREGORIAN;
    gregorian_fixed(anchor_year, anchor_month, anchor_day) + elapsed(year)
        - elapsed(ANCHOR_SHAMSI_YEAR)
}

fn new_year_offset(shamsi_year: i64) -> i64 {
    shamsi_new_year_fixed(shamsi_year) - gregorian_fixed(shamsi_year + YEAR_OFFSET, 1, 1)
}

/// Days of Gregorian year `year + 621` that come before Farvardin 1 of Shamsi `year`.
///
/// 79 puts the new year on March 20 of a Gregorian leap year (March 21
/// otherwise). The cycle drifts slowly against the Gregorian calendar, so
/// other values occur.
pub fn shamsi_new_year_offset(year: i32) -> i64 {
    new_year_offset(i64::from(year))
}

/// Convert a Shamsi date to a Gregorian `(year, month, day)`.
///
/// Expects a valid Shamsi date; see [`ShamsiDate::new`] for the checked form.
/// Fails with [`CalError::InvalidYear`] when the Gregorian year does not fit in an `i32`.
pub fn shamsi_to_gregorian(
    year: i32,
    month: u32,
    day: u32,
) -> Result<(i32, u32, u32), CalError> {
    let (gy, gm, gd) = shamsi_to_gregorian_wide(i64::from(year), month, day);
    let gy = i32::try_from(gy).map_err(|_| CalError::InvalidYear(year))?;
    Ok((gy, gm, gd))
}

/// Convert a Gregorian date to a Shamsi `(year, month, day)`.
///
/// Expects a valid Gregorian date; see [`GregorianDate::new`] for the checked form.
/// Fails with [`CalError::InvalidYear`] when the Shamsi year does not fit in an `i32`.
pub fn gregorian_to_shamsi(
    year: i32,
    month: u32,
    day: u32,
) -> Result<(i32, u32, u32), CalError> {
    let (jy, jm, jd) = gregorian_to_shamsi_wide(i64::from(year), month, day);
    let jy = i32::try_from(jy).map_err(|_| CalError::InvalidYear(year))?;
    Ok((jy, jm, jd))
}

fn shamsi_to_gregorian_wide(jy: i64, month: u32, day: u32) -> (i64, u32, u32) {
    let days_passed = shamsi_days_before_month(month) + i64::from(day);

    let mut gy = jy + YEAR_OFFSET;
    let mut total_days = new_year_offset(jy) + days_passed;

    while total_days > gregorian_year_len(gy) {
        total_days -= gregorian_year_len(gy);
        gy += 1;
    }
    while total_days <= 0 {
        gy -= 1;
        total_days += gregorian_year_len(gy);
    }

    let mut gm = 1;
    while gm < 12 && total_days > gregorian_month_len(gy, gm) {
        total_days -= gregorian_month_len(gy, gm);
        gm += 1;
    }

    (gy, gm, total_days as u32)
}

fn gregorian_to_shamsi_wide(gy: i64, month: u32, day: u32) -> (i64, u32, u32) {
    let days_passed = gregorian_days_before_month(gy, month) + i64::from(day);

    let mut jy = gy - YEAR_OFFSET;
    let mut remaining = days_passed - new_year_offset(jy);

    // Early in the Gregorian year: the tail of the previous Shamsi year
    while remaining <= 0 {
        jy -= 1;
        remaining += shamsi_year_len(jy);
    }
    while remaining > shamsi_year_len(jy) {
        remaining -= shamsi_year_len(jy);
        jy += 1;
    }

    let mut jm = 1;
    while jm < 12 && remaining > shamsi_month_len(jy, jm) {
        remaining -= shamsi_month_len(jy, jm);
        jm += 1;
    }

    (jy, jm, remaining as u32)
}

/// Weekday of a Gregorian date. `month` must be 1-12.
pub fn gregorian_weekday(year: i32, month: u32, day: u32) -> Weekday {
    weekday_of_fixed(gregorian_fixed(i64::from(year), month, day))
}

fn weekday_of_fixed(fixed: i64) -> Weekday {
    // Day 1 of the fixed count is a Monday
    match (fixed - 1).rem_euclid(7) {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        6 => Weekday::Sun,
        _ => unreachable!(),
    }
}

/// Column of a weekday in a Saturday-first week (Saturday = 0, Friday = 6).
pub fn saturday_first_index(weekday: Weekday) -> u32 {
    (weekday.num_days_from_monday() + 2) % DAYS_PER_WEEK
}

fn check_year(year: i32) -> Result<(), CalError> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(CalError::InvalidYear(year))
    }
}

fn check_day(year: i32, month: u32, day: u32, max: u32) -> Result<(), CalError> {
    if (1..=max).contains(&day) {
        Ok(())
    } else {
        Err(CalError::InvalidDay {
            year,
            month,
            day,
            max,
        })
    }
}

/// Split `YYYY-MM-DD` into its three numeric fields without range checks.
pub fn parse_ymd(input: &str) -> Result<(i32, u32, u32), CalError> {
    let invalid = || CalError::InvalidDateFormat(input.to_string());
    let mut parts = input.trim().split('-');

    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    Ok((
        parse_digits(year).ok_or_else(invalid)?,
        parse_digits(month).ok_or_else(invalid)?,
        parse_digits(day).ok_or_else(invalid)?,
    ))
}

fn parse_digits<T: FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl GregorianDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalError> {
        check_year(year)?;
        let max = days_in_gregorian_month(year, month)?;
        check_day(year, month, day, max)?;
        Ok(GregorianDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        gregorian_weekday(self.year, self.month, self.day)
    }

    pub fn to_shamsi(self) -> ShamsiDate {
        // SUPPORTED_YEARS keeps the converted year far inside i32
        let (year, month, day) =
            gregorian_to_shamsi_wide(i64::from(self.year), self.month, self.day);
        ShamsiDate {
            year: year as i32,
            month,
            day,
        }
    }
}

impl From<NaiveDate> for GregorianDate {
    fn from(date: NaiveDate) -> Self {
        GregorianDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl FromStr for GregorianDate {
    type Err = CalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        GregorianDate::new(year, month, day)
    }
}

impl ShamsiDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalError> {
        check_year(year)?;
        let max = days_in_shamsi_month(year, month)?;
        check_day(year, month, day, max)?;
        Ok(ShamsiDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn day_of_year(&self) -> u32 {
        shamsi_day_of_year(self.month, self.day)
    }

    pub fn weekday(&self) -> Weekday {
        self.to_gregorian().weekday()
    }

    pub fn to_gregorian(self) -> GregorianDate {
        let (year, month, day) =
            shamsi_to_gregorian_wide(i64::from(self.year), self.month, self.day);
        GregorianDate {
            year: year as i32,
            month,
            day,
        }
    }
}

impl FromStr for ShamsiDate {
    type Err = CalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        ShamsiDate::new(year, month, day)
    }
}

impl MonthLayout {
    /// Lay out a Shamsi month; a highlighted day outside the month is dropped.
    pub fn new(year: i32, month: u32, highlighted_day: Option<u32>) -> Result<Self, CalError> {
        let day_count = days_in_shamsi_month(year, month)?;

        let (gy, gm, gd) = shamsi_to_gregorian_wide(i64::from(year), month, 1);
        let leading_blanks =
            saturday_first_index(weekday_of_fixed(gregorian_fixed(gy, gm, gd)));

        debug!(year, month, leading_blanks, day_count, "month layout");

        Ok(MonthLayout {
            year,
            month,
            leading_blanks,
            day_count,
            highlighted_day: highlighted_day.filter(|day| (1..=day_count).contains(day)),
        })
    }

    /// Grid cells in display order: `None` for leading blanks, then every day.
    pub fn cells(&self) -> impl Iterator<Item = Option<u32>> + '_ {
        (0..self.leading_blanks)
            .map(|_| None)
            .chain((1..=self.day_count).map(Some))
    }

    /// Number of week rows the month occupies.
    pub fn week_rows(&self) -> u32 {
        (self.leading_blanks + self.day_count).div_ceil(DAYS_PER_WEEK)
    }

    pub fn is_highlighted(&self, day: u32) -> bool {
        self.highlighted_day == Some(day)
    }

    /// Whether `day` falls on a Friday, the last column of the grid.
    pub fn is_friday(&self, day: u32) -> bool {
        (self.leading_blanks + day) % DAYS_PER_WEEK == 0
    }
}

impl CalContext {
    /// Day to highlight when showing `year`/`month`: today, if it falls there.
    pub fn highlight_for(&self, year: i32, month: u32) -> Option<u32> {
        (self.today.year == year && self.today.month == month).then_some(self.today.day)
    }

    pub fn months_per_row(&self) -> u32 {
        match self.columns {
            ColumnsMode::Fixed(n) => n.clamp(1, MONTHS_PER_YEAR),
            ColumnsMode::Auto => {
                // One grid plus gutter per month, clamp to 1-3 for readability
                let month_width = (GRID_WIDTH + self.gutter_width) as u32;
                if let Some(term_width) = get_terminal_width() {
                    (term_width / month_width).clamp(1, 3)
                } else {
                    3
                }
            }
        }
    }
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<u32> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as u32)
}
