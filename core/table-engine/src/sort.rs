//! FILENAME: core/table-engine/src/sort.rs
//! Client-side re-sorting of rendered body rows.
//!
//! Sorting works on the raw values kept in each `ViewCell`, never on the
//! formatted text, so "1 sec 500 ms" still sorts as 1500.

use std::cmp::Ordering;

use report_engine::CellValue;

use crate::definition::{SortDirection, SortKey};
use crate::view::BodyRow;

/// Stable multi-key sort. Ties on every key keep their current order.
pub fn sort_rows(rows: &mut [BodyRow], spec: &[SortKey]) {
    if spec.is_empty() {
        return;
    }

    rows.sort_by(|a, b| compare_rows(a, b, spec));
}

/// Compares two rows key by key.
pub fn compare_rows(a: &BodyRow, b: &BodyRow, spec: &[SortKey]) -> Ordering {
    for key in spec {
        let ordering = compare_cells(a.raw_value(key.column), b.raw_value(key.column));
        let ordering = match key.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Missing cells (short rows) sort like empty ones.
fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    let empty = CellValue::Empty;
    a.unwrap_or(&empty).sort_cmp(b.unwrap_or(&empty))
}
