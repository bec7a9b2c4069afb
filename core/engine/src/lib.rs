//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Shared building blocks for dashboard report tables.
//! CONTEXT: Re-exports the cell value type, number formatting and the
//! per-column formatters used by `table-engine` and `report-persistence`.

pub mod cell;
pub mod formatter;
pub mod logging;
pub mod number_format;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use formatter::{format_cell, CellFormatter, ColumnFormat, ColumnFormatter};
pub use number_format::{format_duration, format_percent, round10, to_fixed};
