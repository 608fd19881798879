//! Calendar formatting: month names, month grids and the year view.

use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::error::CalError;
use crate::types::{
    COLOR_RED, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL, CELL_WIDTH, CalContext,
    DAYS_PER_WEEK, GRID_WIDTH, HIGHLIGHT_MARKER, MONTHS_PER_YEAR, MonthLayout, RenderStyle,
    WEEKDAY_HEADER,
};

/// Shamsi month names in their common English transliteration.
pub const SHAMSI_MONTHS: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

pub fn shamsi_month_name(month: u32) -> Result<&'static str, CalError> {
    month
        .checked_sub(1)
        .and_then(|idx| SHAMSI_MONTHS.get(idx as usize))
        .copied()
        .ok_or(CalError::InvalidMonth(month))
}

/// Parse month from string (numeric 1-12 or Shamsi month name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    let s_lower = s.to_ascii_lowercase();
    let month_names: [(&str, u32); 26] = [
        // Full names
        ("farvardin", 1),
        ("ordibehesht", 2),
        ("khordad", 3),
        ("tir", 4),
        ("mordad", 5),
        ("shahrivar", 6),
        ("mehr", 7),
        ("aban", 8),
        ("azar", 9),
        ("dey", 10),
        ("bahman", 11),
        ("esfand", 12),
        // Alternate transliterations
        ("amordad", 5),
        ("shahrewar", 6),
        ("adhar", 9),
        ("dei", 10),
        // Short forms
        ("far", 1),
        ("ord", 2),
        ("kho", 3),
        ("mor", 5),
        ("sha", 6),
        ("meh", 7),
        ("aba", 8),
        ("aza", 9),
        ("bah", 11),
        ("esf", 12),
    ];
    month_names
        .iter()
        .find(|(name, _)| *name == s_lower)
        .map(|(_, num)| *num)
}

/// Display width of text, ignoring ANSI escape sequences.
///
/// Only handles CSI sequences such as the `COLOR_*` codes: after an ESC,
/// everything up to the next ASCII letter is skipped.
pub fn visible_width(text: &str) -> usize {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip up to and including the final byte of the CSI sequence
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain.width()
}

/// Center text within a specified width, accounting for Unicode character widths.
fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

fn paint(text: &str, color: &str, style: RenderStyle) -> String {
    match style {
        RenderStyle::Color => format!("{}{}{}", color, text, COLOR_RESET),
        RenderStyle::Marker | RenderStyle::Plain => text.to_string(),
    }
}

/// Format month title ("Farvardin 1403") centered over the day grid.
pub fn format_month_header(
    year: i32,
    month: u32,
    show_year: bool,
    style: RenderStyle,
) -> Result<String, CalError> {
    let month_name = shamsi_month_name(month)?;
    let header = if show_year {
        format!("{} {}", month_name, year)
    } else {
        month_name.to_string()
    };
    Ok(paint(&center_text(&header, GRID_WIDTH), COLOR_TEAL, style))
}

pub fn format_weekday_header(style: RenderStyle) -> String {
    paint(WEEKDAY_HEADER, COLOR_SAND_YELLOW, style)
}

/// Format one day cell, right-aligned to the cell width.
///
/// Color priority: highlighted > Friday > regular
fn format_day(layout: &MonthLayout, day: u32, style: RenderStyle) -> String {
    let highlighted = layout.is_highlighted(day);

    match style {
        RenderStyle::Color if highlighted => {
            let day_str = day.to_string();
            format!(
                "{}{}{}{}",
                " ".repeat(CELL_WIDTH.saturating_sub(day_str.len())),
                COLOR_REVERSE,
                day_str,
                COLOR_RESET
            )
        }
        RenderStyle::Color if layout.is_friday(day) => {
            let day_str = day.to_string();
            format!(
                "{}{}{}{}",
                " ".repeat(CELL_WIDTH.saturating_sub(day_str.len())),
                COLOR_RED,
                day_str,
                COLOR_RESET
            )
        }
        RenderStyle::Marker if highlighted => {
            format!(
                "{:>width$}",
                format!("{}{}", HIGHLIGHT_MARKER, day),
                width = CELL_WIDTH
            )
        }
        _ => format!("{:>width$}", day, width = CELL_WIDTH),
    }
}

/// Format month as lines: title, weekday header, then one line per week.
pub fn format_month_grid(
    layout: &MonthLayout,
    show_year: bool,
    style: RenderStyle,
) -> Result<Vec<String>, CalError> {
    let mut lines = Vec::with_capacity(2 + layout.week_rows() as usize);
    lines.push(format_month_header(
        layout.year,
        layout.month,
        show_year,
        style,
    )?);
    lines.push(format_weekday_header(style));

    let mut line = String::new();
    for (idx, cell) in layout.cells().enumerate() {
        match cell {
            Some(day) => line.push_str(&format_day(layout, day, style)),
            None => line.push_str(&" ".repeat(CELL_WIDTH)),
        }
        if (idx as u32 + 1) % DAYS_PER_WEEK == 0 {
            lines.push(std::mem::take(&mut line));
        }
    }
    // Month did not end on a Friday
    if !line.is_empty() {
        lines.push(line);
    }

    Ok(lines)
}

/// Render a Shamsi month as text: title, weekday header, the week rows and a
/// trailing blank line.
pub fn render_month(
    year: i32,
    month: u32,
    highlighted_day: Option<u32>,
    style: RenderStyle,
) -> Result<String, CalError> {
    debug!(year, month, ?highlighted_day, ?style, "rendering month");

    let layout = MonthLayout::new(year, month, highlighted_day)?;
    let mut out = String::new();
    for line in format_month_grid(&layout, true, style)? {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    Ok(out)
}

/// Place several month grids next to each other, padding by visible width.
pub fn format_months_side_by_side(grids: &[Vec<String>], gutter_width: usize) -> Vec<String> {
    let max_height = grids.iter().map(|g| g.len()).max().unwrap_or(0);

    (0..max_height)
        .map(|row| {
            let mut line = String::new();
            for (i, grid) in grids.iter().enumerate() {
                let text = grid.get(row).map(String::as_str).unwrap_or("");
                line.push_str(text);
                line.push_str(&" ".repeat(GRID_WIDTH.saturating_sub(visible_width(text))));
                if i < grids.len() - 1 {
                    line.push_str(&" ".repeat(gutter_width));
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// Render all 12 months of a Shamsi year in rows of `ctx.months_per_row()`.
pub fn render_year(ctx: &CalContext, year: i32) -> Result<String, CalError> {
    let grids = (1..=MONTHS_PER_YEAR)
        .map(|month| {
            let layout = MonthLayout::new(year, month, ctx.highlight_for(year, month))?;
            format_month_grid(&layout, false, ctx.style)
        })
        .collect::<Result<Vec<_>, _>>()?;

    // A row never holds more than the twelve months
    let per_row = (ctx.months_per_row() as usize).clamp(1, grids.len());
    debug!(year, per_row, "rendering year");

    let total_width = per_row * GRID_WIDTH + (per_row - 1) * ctx.gutter_width;
    let mut out = String::new();
    out.push_str(center_text(&year.to_string(), total_width).trim_end());
    out.push_str("\n\n");

    for chunk in grids.chunks(per_row) {
        for line in format_months_side_by_side(chunk, ctx.gutter_width) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }

    Ok(out)
}
