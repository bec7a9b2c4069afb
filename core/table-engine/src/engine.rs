//! FILENAME: core/table-engine/src/engine.rs
//! Table Engine - Turns a dataset into a renderable, sortable view.
//!
//! This module takes a TableDataset (content) and a DisplayConfig (the
//! page's current filter state) and produces a RenderedTable.
//!
//! Pipeline:
//! 1. Header rows: builder rows (if any), then one row of column titles
//! 2. Overall row: always emitted when present, formatted cell by cell
//! 3. Row filter: non-empty AND label filter AND group-only filter
//! 4. Body rows: every passing row, formatted cell by cell
//! 5. Initial sort: the default sort spec is attached and applied
//!
//! Rendering never fails. Rows whose length does not match the column count
//! are rendered with whatever values they carry.

use report_engine::logging::log_debug;
use report_engine::{format_cell, CellFormatter, CellValue};

use crate::definition::{DisplayConfig, Row, SortKey, TableDataset};
use crate::header::HeaderBuilder;
use crate::view::{BodyRow, HeaderRow, RenderedTable, ViewCell};

// ============================================================================
// RENDER OPTIONS
// ============================================================================

/// Per-table arguments of a render call.
#[derive(Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    /// Cell formatter; `None` shows raw values.
    pub formatter: Option<&'a dyn CellFormatter>,

    /// Initial sort order.
    pub default_sort: &'a [SortKey],

    /// Column tested against the label filter. `None` means the table has
    /// no label column, so every row is tested with an empty label.
    pub label_column: Option<usize>,

    /// Adds rows above the column titles.
    pub header_builder: Option<&'a dyn HeaderBuilder>,
}

impl<'a> RenderOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formatter(mut self, formatter: &'a dyn CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn with_default_sort(mut self, default_sort: &'a [SortKey]) -> Self {
        self.default_sort = default_sort;
        self
    }

    pub fn with_label_column(mut self, column: usize) -> Self {
        self.label_column = Some(column);
        self
    }

    pub fn with_header_builder(mut self, builder: &'a dyn HeaderBuilder) -> Self {
        self.header_builder = Some(builder);
        self
    }
}

// ============================================================================
// TABLE RENDERER
// ============================================================================

/// Renders one dataset under one snapshot of the display config.
pub struct TableRenderer<'a> {
    dataset: &'a TableDataset,
    config: &'a DisplayConfig,
    options: RenderOptions<'a>,
}

impl<'a> TableRenderer<'a> {
    pub fn new(dataset: &'a TableDataset, config: &'a DisplayConfig, options: RenderOptions<'a>) -> Self {
        TableRenderer {
            dataset,
            config,
            options,
        }
    }

    /// Executes the full render and returns the view.
    pub fn render(&self) -> RenderedTable {
        let mut view = RenderedTable::new(self.dataset.column_count());

        // Step 1: Header rows
        view.header_rows = self.build_header_rows();

        // Step 2: Overall row
        view.overall_row = self
            .dataset
            .overall_row
            .as_ref()
            .map(|row| self.format_row(row, None));

        // Steps 3 + 4: Filter and format item rows
        view.body_rows = self
            .dataset
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| includes_row(row, self.dataset, self.config, self.options.label_column))
            .map(|(index, row)| self.format_row(row, Some(index)))
            .collect();

        // Step 5: Initial sort
        view.apply_sort(self.options.default_sort);

        log_debug!(
            "TABLE",
            "rendered {} of {} rows (overall={}, groups_only={}, pattern={:?})",
            view.body_row_count(),
            self.dataset.rows.len(),
            view.overall_row.is_some(),
            self.config.show_groups_only,
            self.config.label_pattern()
        );

        view
    }

    fn build_header_rows(&self) -> Vec<HeaderRow> {
        let mut rows = match self.options.header_builder {
            Some(builder) => builder.build(&self.dataset.column_titles),
            None => Vec::new(),
        };
        rows.push(HeaderRow::titles(&self.dataset.column_titles));
        rows
    }

    fn format_row(&self, row: &Row, source_index: Option<usize>) -> BodyRow {
        let cells = row
            .values
            .iter()
            .enumerate()
            .map(|(column, value)| {
                ViewCell::new(value.clone(), format_cell(self.options.formatter, column, value))
            })
            .collect();

        BodyRow {
            source_index,
            is_aggregate_marker: row.is_aggregate_marker,
            cells,
        }
    }
}

/// Renders a dataset. Convenience wrapper around `TableRenderer`.
pub fn render_table(dataset: &TableDataset, config: &DisplayConfig, options: RenderOptions<'_>) -> RenderedTable {
    TableRenderer::new(dataset, config, options).render()
}

// ============================================================================
// ROW FILTER
// ============================================================================

/// Whether an item row is shown under the given config.
///
/// Both filters must pass; an empty row never does.
pub fn includes_row(
    row: &Row,
    dataset: &TableDataset,
    config: &DisplayConfig,
    label_column: Option<usize>,
) -> bool {
    !row.is_empty()
        && passes_label_filter(row, dataset, config, label_column)
        && passes_group_filter(row, dataset, config)
}

fn passes_label_filter(
    row: &Row,
    dataset: &TableDataset,
    config: &DisplayConfig,
    label_column: Option<usize>,
) -> bool {
    let filter = match &config.label_filter {
        Some(filter) => filter,
        None => return true,
    };

    if config.restrict_filter_to_leaf_rows && !dataset.supports_group_filtering {
        return true;
    }

    let label = label_column
        .and_then(|column| row.values.get(column))
        .map(CellValue::display_value)
        .unwrap_or_default();

    filter.is_match(&label)
}

fn passes_group_filter(row: &Row, dataset: &TableDataset, config: &DisplayConfig) -> bool {
    !config.show_groups_only || !dataset.supports_group_filtering || row.is_aggregate_marker
}
