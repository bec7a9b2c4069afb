//! FILENAME: core/persistence/src/lib.rs
//! Report Persistence Module
//!
//! Loads the tables of a generated load-test dashboard, knows how each of
//! the standard tables is formatted, sorted and filtered, and writes the
//! rendered tables back out as HTML fragments.

mod config;
mod dashboard_reader;
mod error;
mod html_writer;

pub use config::{load_display_config, parse_display_config};
pub use dashboard_reader::{
    load_dashboard_script, load_report_directory, parse_dashboard_script, parse_table_payload,
};
pub use error::PersistenceError;
pub use html_writer::{save_report_html, write_report_html, write_table_html};

use report_engine::logging::log_debug;
use report_engine::{round10, ColumnFormatter};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use table_engine::{
    render_table, DisplayConfig, GroupedHeader, RenderOptions, RenderedTable, SortDirection,
    SortKey, TableDataset,
};

// ============================================================================
// TABLE KINDS
// ============================================================================

const SORT_FIRST_COLUMN: [SortKey; 1] = [SortKey {
    column: 0,
    direction: SortDirection::Ascending,
}];

const SORT_ERROR_COUNT_DESC: [SortKey; 1] = [SortKey {
    column: 1,
    direction: SortDirection::Descending,
}];

/// The standard tables of a dashboard page, each with its own formatter,
/// initial sort, label column and header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Apdex,
    Statistics,
    Errors,
    TopErrorsBySampler,
    Custom,
}

impl TableKind {
    /// Maps a table element id ("statisticsTable") to its kind.
    pub fn from_element_id(id: &str) -> Self {
        match id {
            "apdexTable" => TableKind::Apdex,
            "statisticsTable" => TableKind::Statistics,
            "errorsTable" => TableKind::Errors,
            "top5ErrorsBySamplerTable" => TableKind::TopErrorsBySampler,
            _ => TableKind::Custom,
        }
    }

    pub fn formatter(&self) -> Option<ColumnFormatter> {
        match self {
            TableKind::Apdex => Some(ColumnFormatter::apdex()),
            TableKind::Statistics => Some(ColumnFormatter::statistics()),
            TableKind::Errors => Some(ColumnFormatter::errors()),
            TableKind::TopErrorsBySampler => Some(ColumnFormatter::top_errors()),
            TableKind::Custom => None,
        }
    }

    pub fn default_sort(&self) -> &'static [SortKey] {
        match self {
            TableKind::Errors => &SORT_ERROR_COUNT_DESC,
            TableKind::Custom => &[],
            _ => &SORT_FIRST_COLUMN,
        }
    }

    /// Column holding the request label. The error table has none.
    pub fn label_column(&self) -> Option<usize> {
        match self {
            TableKind::Apdex => Some(3),
            TableKind::Statistics | TableKind::TopErrorsBySampler => Some(0),
            TableKind::Errors | TableKind::Custom => None,
        }
    }

    pub fn header_builder(&self) -> Option<GroupedHeader> {
        match self {
            TableKind::Statistics => Some(GroupedHeader::statistics()),
            _ => None,
        }
    }
}

// ============================================================================
// REQUESTS SUMMARY
// ============================================================================

/// Pass/fail split of all samples, shown as a pie chart on the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequestsSummary {
    #[serde(rename = "OkPercent")]
    pub ok_percent: f64,
    #[serde(rename = "KoPercent")]
    pub ko_percent: f64,
}

/// One slice of the requests summary chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: &'static str,
    /// Share of the whole, rounded to two decimals.
    pub percent: f64,
    pub color: &'static str,
}

impl RequestsSummary {
    /// FAIL and PASS slices, in that order.
    pub fn pie_slices(&self) -> [PieSlice; 2] {
        let total = self.ok_percent + self.ko_percent;
        let share = |value: f64| {
            if total > 0.0 {
                round10(value / total * 100.0, -2)
            } else {
                0.0
            }
        };

        [
            PieSlice {
                label: "FAIL",
                percent: share(self.ko_percent),
                color: "#FF6347",
            },
            PieSlice {
                label: "PASS",
                percent: share(self.ok_percent),
                color: "#9ACD32",
            },
        ]
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// A table of the report together with its element id.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub id: String,
    pub kind: TableKind,
    pub dataset: TableDataset,
}

impl ReportTable {
    pub fn new(id: impl Into<String>, dataset: TableDataset) -> Self {
        let id = id.into();
        ReportTable {
            kind: TableKind::from_element_id(&id),
            id,
            dataset,
        }
    }

    /// Renders the table with the presets of its kind.
    pub fn render(&self, config: &DisplayConfig) -> RenderedTable {
        let formatter = self.kind.formatter();
        let header = self.kind.header_builder();

        let mut options = RenderOptions::new().with_default_sort(self.kind.default_sort());
        if let Some(f) = &formatter {
            options = options.with_formatter(f);
        }
        if let Some(h) = &header {
            options = options.with_header_builder(h);
        }
        if let Some(column) = self.kind.label_column() {
            options = options.with_label_column(column);
        }

        render_table(&self.dataset, config, options)
    }
}

/// All tables of one dashboard page, in document order.
#[derive(Debug, Clone, Default)]
pub struct DashboardReport {
    pub summary: Option<RequestsSummary>,
    tables: Vec<ReportTable>,
    index: FxHashMap<String, usize>,
}

impl DashboardReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table. A table with the same id replaces the earlier one in place.
    pub fn add_table(&mut self, table: ReportTable) {
        match self.index.get(&table.id) {
            Some(&position) => {
                log_debug!("LOAD", "replacing table '{}'", table.id);
                self.tables[position] = table;
            }
            None => {
                self.index.insert(table.id.clone(), self.tables.len());
                self.tables.push(table);
            }
        }
    }

    pub fn tables(&self) -> &[ReportTable] {
        &self.tables
    }

    pub fn table(&self, id: &str) -> Option<&ReportTable> {
        self.index.get(id).and_then(|&i| self.tables.get(i))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn render_table(&self, id: &str, config: &DisplayConfig) -> Result<RenderedTable, PersistenceError> {
        self.table(id)
            .map(|t| t.render(config))
            .ok_or_else(|| PersistenceError::TableNotFound(id.to_string()))
    }

    /// Renders a table with a search-box pattern applied on top of `config`.
    pub fn render_with_filter(
        &self,
        id: &str,
        config: &DisplayConfig,
        pattern: &str,
    ) -> Result<RenderedTable, PersistenceError> {
        let mut filtered = config.clone();
        filtered.set_label_filter(pattern)?;
        self.render_table(id, &filtered)
    }

    /// Renders every table, in document order.
    pub fn render_all(&self, config: &DisplayConfig) -> Vec<(&str, RenderedTable)> {
        self.tables
            .iter()
            .map(|t| (t.id.as_str(), t.render(config)))
            .collect()
    }
}
