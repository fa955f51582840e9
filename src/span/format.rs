//! Rendering spans back into the duration grammar.

use super::{TimeSpan, Unit, UnitConvention, WorkWeek};

/// How the rendered units are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Non-zero units only, separated by single spaces: `"1d 2h"`.
    Compact,
    /// One fixed-width column per eligible unit, blank when zero, so values
    /// line up in tabular reports.
    Columns,
}

/// Which units may appear and how they are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStyle {
    /// Largest unit used. Anything bigger is folded into it.
    pub largest: Unit,
    /// Smallest unit used. Anything finer is truncated.
    pub smallest: Unit,
    pub layout: Layout,
    /// Zero-pad every unit after the first to two digits (three for ms).
    /// Only applies to [`Layout::Compact`].
    pub zero_pad: bool,
}

impl DurationStyle {
    /// Weeks down to seconds, compact.
    pub const fn calendar() -> Self {
        Self {
            largest: Unit::Week,
            smallest: Unit::Second,
            layout: Layout::Compact,
            zero_pad: false,
        }
    }

    /// Weeks down to minutes, compact and zero-padded: `"4d 03h 46m"`.
    pub const fn work() -> Self {
        Self {
            largest: Unit::Week,
            smallest: Unit::Minute,
            layout: Layout::Compact,
            zero_pad: true,
        }
    }

    /// Weeks down to milliseconds in fixed columns, 24 characters wide.
    pub const fn columns() -> Self {
        Self {
            largest: Unit::Week,
            smallest: Unit::Millisecond,
            layout: Layout::Columns,
            zero_pad: false,
        }
    }

    pub const fn with_layout(self, layout: Layout) -> Self {
        Self { layout, ..self }
    }

    pub const fn with_units(self, largest: Unit, smallest: Unit) -> Self {
        Self {
            largest,
            smallest,
            ..self
        }
    }
}

impl Default for DurationStyle {
    fn default() -> Self {
        Self::calendar()
    }
}

/// Formats with 24-hour days and 7-day weeks.
pub fn format_duration(span: TimeSpan, style: &DurationStyle) -> String {
    render(span, UnitConvention::Calendar, style)
}

/// Formats with work-relative days and weeks, for effort fields.
pub fn format_work_duration(span: TimeSpan, week: &WorkWeek, style: &DurationStyle) -> String {
    render(span, UnitConvention::Work(*week), style)
}

pub(super) fn render(span: TimeSpan, convention: UnitConvention, style: &DurationStyle) -> String {
    let mut rest = span.as_millis().abs();
    let pieces: Vec<(Unit, i128)> = Unit::ALL
        .into_iter()
        .filter(|&u| u >= style.largest && u <= style.smallest)
        .map(|unit| {
            let size = i128::from(convention.unit_millis(unit));
            let value = rest / size;
            rest -= value * size;
            (unit, value)
        })
        .collect();

    if pieces.iter().all(|&(_, value)| value == 0) {
        return match style.layout {
            Layout::Compact => String::new(),
            Layout::Columns => pieces
                .iter()
                .map(|&(unit, _)| " ".repeat(column_width(unit)))
                .collect::<Vec<_>>()
                .join(" "),
        };
    }

    let sign = if span.is_negative() { "-" } else { "" };
    let body = match style.layout {
        Layout::Compact => compact(&pieces, style.zero_pad),
        Layout::Columns => columns(&pieces),
    };
    format!("{sign}{body}")
}

fn compact(pieces: &[(Unit, i128)], zero_pad: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    for &(unit, value) in pieces.iter().filter(|(_, value)| *value != 0) {
        let digits = if zero_pad && !parts.is_empty() {
            format!("{value:0width$}", width = pad_width(unit))
        } else {
            value.to_string()
        };
        parts.push(format!("{digits}{}", unit.symbol()));
    }
    parts.join(" ")
}

fn columns(pieces: &[(Unit, i128)]) -> String {
    pieces
        .iter()
        .map(|&(unit, value)| {
            let width = column_width(unit);
            if value == 0 {
                " ".repeat(width)
            } else {
                format!("{:>width$}", format!("{value}{}", unit.symbol()))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pad_width(unit: Unit) -> usize {
    match unit {
        Unit::Millisecond => 3,
        _ => 2,
    }
}

/// Digits plus symbol. Wider values push later columns to the right.
fn column_width(unit: Unit) -> usize {
    let digits = match unit {
        Unit::Day => 1,
        Unit::Millisecond => 3,
        _ => 2,
    };
    digits + unit.symbol().len()
}
