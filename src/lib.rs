//! Shamsi (Solar Hijri) calendar utility.
//!
//! Features:
//! - Gregorian <-> Shamsi conversion on a continuous day count
//! - Shamsi leap years from the 33-year cycle
//! - Saturday-first month grids and a whole-year view
//! - Today highlighting with color, a text marker, or not at all

pub mod args;
pub mod calendar;
pub mod error;
pub mod formatter;
pub mod types;

pub use calendar::{
    days_in_gregorian_month, days_in_shamsi_month, gregorian_to_shamsi, is_gregorian_leap_year,
    is_shamsi_leap_year, shamsi_to_gregorian,
};
pub use error::CalError;
pub use formatter::{render_month, render_year, shamsi_month_name};
pub use types::{CalContext, GregorianDate, MonthLayout, RenderStyle, ShamsiDate};
