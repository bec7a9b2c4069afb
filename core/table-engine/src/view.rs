//! FILENAME: core/table-engine/src/view.rs
//! Table View - Renderable output for the frontend.
//!
//! A rendered table is three stacked sections: header rows, an optional
//! pinned overall row, and the filtered body. Body rows keep their raw
//! values and source index next to the formatted text so the table can be
//! re-sorted later without filtering again.

use serde::{Deserialize, Serialize};

use report_engine::CellValue;

use crate::definition::{SortKey, SortSpec};
use crate::sort::sort_rows;

// ============================================================================
// HEADER
// ============================================================================

/// A single header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCell {
    /// Display label.
    pub label: String,

    /// Number of columns this cell spans.
    pub col_span: u16,

    /// Whether clicking this cell re-sorts the table.
    pub sortable: bool,
}

impl HeaderCell {
    /// A column title cell (one column, sortable).
    pub fn title(label: impl Into<String>) -> Self {
        HeaderCell {
            label: label.into(),
            col_span: 1,
            sortable: true,
        }
    }

    /// A category cell spanning several columns (not sortable).
    pub fn spanner(label: impl Into<String>, col_span: u16) -> Self {
        HeaderCell {
            label: label.into(),
            col_span,
            sortable: false,
        }
    }
}

/// One row of the table header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRow {
    pub cells: Vec<HeaderCell>,

    /// False for decorative rows added above the title row.
    pub sortable: bool,
}

impl HeaderRow {
    pub fn titles(titles: &[String]) -> Self {
        HeaderRow {
            cells: titles.iter().map(HeaderCell::title).collect(),
            sortable: true,
        }
    }

    pub fn unsortable(cells: Vec<HeaderCell>) -> Self {
        HeaderRow {
            cells,
            sortable: false,
        }
    }

    /// Total number of columns covered by this row.
    pub fn span(&self) -> usize {
        self.cells.iter().map(|c| c.col_span as usize).sum()
    }
}

// ============================================================================
// BODY
// ============================================================================

/// A single body cell: the raw value and its display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewCell {
    pub value: CellValue,
    pub formatted_value: String,
}

impl ViewCell {
    pub fn new(value: CellValue, formatted_value: String) -> Self {
        ViewCell {
            value,
            formatted_value,
        }
    }
}

/// One rendered body row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRow {
    /// Index into `TableDataset::rows`; `None` for the overall row.
    pub source_index: Option<usize>,

    /// Copied from the dataset row.
    pub is_aggregate_marker: bool,

    pub cells: Vec<ViewCell>,
}

impl BodyRow {
    pub fn formatted_values(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.formatted_value.as_str()).collect()
    }

    pub fn raw_value(&self, column: usize) -> Option<&CellValue> {
        self.cells.get(column).map(|c| &c.value)
    }
}

// ============================================================================
// MAIN VIEW STRUCT
// ============================================================================

/// The complete rendered view of a result table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTable {
    /// Header rows, extra builder rows first, column titles last.
    pub header_rows: Vec<HeaderRow>,

    /// The pinned aggregate row. Never filtered, never sorted.
    pub overall_row: Option<BodyRow>,

    /// Filtered and formatted item rows, in presentation order.
    pub body_rows: Vec<BodyRow>,

    /// The active sort order.
    pub sort_spec: SortSpec,

    /// Number of column titles.
    pub column_count: usize,
}

impl RenderedTable {
    pub fn new(column_count: usize) -> Self {
        RenderedTable {
            header_rows: Vec::new(),
            overall_row: None,
            body_rows: Vec::new(),
            sort_spec: SortSpec::new(),
            column_count,
        }
    }

    pub fn body_row_count(&self) -> usize {
        self.body_rows.len()
    }

    /// The column title row (always the last header row).
    pub fn title_row(&self) -> Option<&HeaderRow> {
        self.header_rows.last()
    }

    /// Formatted text of every body row, in presentation order.
    pub fn body_text(&self) -> Vec<Vec<&str>> {
        self.body_rows.iter().map(BodyRow::formatted_values).collect()
    }

    /// Source indices of the body rows, in presentation order.
    pub fn source_order(&self) -> Vec<usize> {
        self.body_rows.iter().filter_map(|r| r.source_index).collect()
    }

    /// Replaces the active sort order and re-sorts the body in place.
    /// Keys pointing past the last column are dropped.
    pub fn apply_sort(&mut self, spec: &[SortKey]) {
        let column_count = self.column_count;
        self.sort_spec = spec
            .iter()
            .copied()
            .filter(|k| k.column < column_count)
            .collect();
        sort_rows(&mut self.body_rows, &self.sort_spec);
    }
}
