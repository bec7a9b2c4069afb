//! FILENAME: core/engine/src/formatter.rs
//! PURPOSE: Per-column cell formatting for report tables.
//! CONTEXT: Each report table ships with a formatter that turns a raw cell
//! value into its display string based on the column it sits in. The
//! renderer only sees the `CellFormatter` trait; `ColumnFormatter` is the
//! data-driven implementation with presets for the standard tables.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::number_format::{format_duration, format_percent, to_fixed};

/// Turns a raw cell value into display text.
pub trait CellFormatter {
    fn format(&self, column: usize, value: &CellValue) -> String;
}

impl<F> CellFormatter for F
where
    F: Fn(usize, &CellValue) -> String,
{
    fn format(&self, column: usize, value: &CellValue) -> String {
        self(column, value)
    }
}

/// Applies an optional formatter; no formatter means the raw display value.
pub fn format_cell(formatter: Option<&dyn CellFormatter>, column: usize, value: &CellValue) -> String {
    match formatter {
        Some(f) => f.format(column, value),
        None => value.display_value(),
    }
}

// ============================================================================
// COLUMN FORMAT RULES
// ============================================================================

/// How a single column is displayed.
/// Numeric formats only touch number cells; text passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColumnFormat {
    #[default]
    Raw,
    Fixed(u8),
    Percent(u8),
    Duration,
}

impl ColumnFormat {
    pub fn apply(&self, value: &CellValue) -> String {
        match (self, value) {
            (ColumnFormat::Fixed(places), CellValue::Number(n)) => to_fixed(*n, *places),
            (ColumnFormat::Percent(places), CellValue::Number(n)) => format_percent(*n, *places),
            (ColumnFormat::Duration, CellValue::Number(n)) => format_duration(*n),
            _ => value.display_value(),
        }
    }
}

/// A formatter driven by a table of (column, format) rules.
/// Columns without a rule are displayed raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ColumnFormatter {
    pub rules: Vec<(usize, ColumnFormat)>,
}

impl ColumnFormatter {
    pub fn new() -> Self {
        ColumnFormatter { rules: Vec::new() }
    }

    /// Sets the format for a column, replacing any earlier rule.
    pub fn with_column(mut self, column: usize, format: ColumnFormat) -> Self {
        self.rules.retain(|(c, _)| *c != column);
        self.rules.push((column, format));
        self
    }

    pub fn with_columns(mut self, columns: &[usize], format: ColumnFormat) -> Self {
        for &column in columns {
            self = self.with_column(column, format);
        }
        self
    }

    pub fn format_for(&self, column: usize) -> ColumnFormat {
        self.rules
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, f)| *f)
            .unwrap_or_default()
    }

    /// Apdex: score with 3 decimals, thresholds as durations.
    pub fn apdex() -> Self {
        ColumnFormatter::new()
            .with_column(0, ColumnFormat::Fixed(3))
            .with_columns(&[1, 2], ColumnFormat::Duration)
    }

    /// Request statistics: error rate as a percentage, timings,
    /// throughput and network rates with 2 decimals.
    pub fn statistics() -> Self {
        ColumnFormatter::new()
            .with_column(3, ColumnFormat::Percent(2))
            .with_columns(&[4, 7, 8, 9, 10, 11, 12, 13], ColumnFormat::Fixed(2))
    }

    /// Error breakdown: both share columns as percentages.
    pub fn errors() -> Self {
        ColumnFormatter::new().with_columns(&[2, 3], ColumnFormat::Percent(2))
    }

    /// Top errors by sampler are shown as-is.
    pub fn top_errors() -> Self {
        ColumnFormatter::new()
    }
}

impl CellFormatter for ColumnFormatter {
    fn format(&self, column: usize, value: &CellValue) -> String {
        self.format_for(column).apply(value)
    }
}
