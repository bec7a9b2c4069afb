//! FILENAME: core/table-engine/src/lib.rs
//! Result table subsystem for dashboard reports.
//!
//! This crate renders a report table (titles, optional overall row, item
//! rows) into a filtered, formatted and sortable view. It depends on
//! `report-engine` for cell values and formatters.
//!
//! Layers:
//! - `definition`: Serializable input (what the table IS, how the page filters it)
//! - `view`: Renderable output for the frontend (WHAT we display)
//! - `engine`: Render pipeline and row filter (HOW we build the view)
//! - `header`: Extra header rows above the column titles
//! - `sort`: Re-sorting rendered rows by raw value

pub mod definition;
pub mod engine;
pub mod error;
pub mod header;
pub mod sort;
pub mod view;

pub use definition::*;
pub use engine::{includes_row, render_table, RenderOptions, TableRenderer};
pub use error::TableError;
pub use header::{GroupedHeader, HeaderBuilder};
pub use sort::sort_rows;
pub use view::*;
