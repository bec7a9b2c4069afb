//! FILENAME: core/table-engine/src/definition.rs
//! Table Definition - The serializable input of a render.
//!
//! This module contains all the types needed to DESCRIBE a result table
//! and the page-wide display settings it is rendered under:
//! - `TableDataset`: titles, optional overall row and item rows, read
//!   straight from the report payload (field names match the payload)
//! - `SortKey` / `SortSpec`: initial sort order, `[column, direction]` pairs
//! - `DisplayConfig`: the user-driven filter state shared by every table

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use report_engine::CellValue;

use crate::error::TableError;

// ============================================================================
// DATASET
// ============================================================================

/// One row of a result table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Row {
    /// Cell values in column order. An empty row is never rendered.
    #[serde(rename = "data", default)]
    pub values: Vec<CellValue>,

    /// True when the row is a synthetic grouping node (a "controller")
    /// rather than a single measured request.
    #[serde(rename = "isController", default)]
    pub is_aggregate_marker: bool,
}

impl Row {
    pub fn new(values: Vec<CellValue>) -> Self {
        Row {
            values,
            is_aggregate_marker: false,
        }
    }

    pub fn aggregate(values: Vec<CellValue>) -> Self {
        Row {
            values,
            is_aggregate_marker: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A complete table as delivered by the report generator.
/// Built once per table and never mutated by rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableDataset {
    /// Display title of each column.
    #[serde(rename = "titles", default)]
    pub column_titles: Vec<String>,

    /// The pinned "Total" row, if the table has one.
    #[serde(rename = "overall", default, skip_serializing_if = "Option::is_none")]
    pub overall_row: Option<Row>,

    /// Item rows in payload order.
    #[serde(rename = "items", default)]
    pub rows: Vec<Row>,

    /// Whether `Row::is_aggregate_marker` carries meaning for this table.
    #[serde(rename = "supportsControllersDiscrimination", default)]
    pub supports_group_filtering: bool,
}

impl TableDataset {
    pub fn new(column_titles: Vec<String>) -> Self {
        TableDataset {
            column_titles,
            overall_row: None,
            rows: Vec::new(),
            supports_group_filtering: false,
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_titles.len()
    }
}

// ============================================================================
// SORT SPECIFICATION
// ============================================================================

/// Sort direction, serialized the way the table sorter expects (0 / 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl TryFrom<u8> for SortDirection {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SortDirection::Ascending),
            1 => Ok(SortDirection::Descending),
            other => Err(format!("invalid sort direction {}, expected 0 or 1", other)),
        }
    }
}

impl From<SortDirection> for u8 {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => 0,
            SortDirection::Descending => 1,
        }
    }
}

/// One `[column, direction]` entry of a sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, SortDirection)", into = "(usize, SortDirection)")]
pub struct SortKey {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(column: usize) -> Self {
        SortKey {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: usize) -> Self {
        SortKey {
            column,
            direction: SortDirection::Descending,
        }
    }
}

impl From<(usize, SortDirection)> for SortKey {
    fn from((column, direction): (usize, SortDirection)) -> Self {
        SortKey { column, direction }
    }
}

impl From<SortKey> for (usize, SortDirection) {
    fn from(key: SortKey) -> Self {
        (key.column, key.direction)
    }
}

/// Ordered sort keys; tables rarely sort on more than two columns.
pub type SortSpec = SmallVec<[SortKey; 2]>;

// ============================================================================
// DISPLAY CONFIG
// ============================================================================

/// A compiled, case-insensitive label filter.
/// Matching is unanchored: the pattern may hit anywhere in the label.
#[derive(Debug, Clone)]
pub struct LabelFilter {
    pattern: String,
    regex: Regex,
}

impl LabelFilter {
    pub fn new(pattern: &str) -> Result<Self, TableError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| TableError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(LabelFilter {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, label: &str) -> bool {
        self.regex.is_match(label)
    }
}

impl PartialEq for LabelFilter {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Serialize for LabelFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}

/// Page-wide display settings, read by every table render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayConfig {
    /// Show only grouping rows in tables that distinguish them.
    pub show_groups_only: bool,

    /// Free-text filter on the label column.
    #[serde(
        rename = "labelFilterPattern",
        deserialize_with = "deserialize_label_filter",
        skip_serializing_if = "Option::is_none"
    )]
    pub label_filter: Option<LabelFilter>,

    /// Apply the label filter only to tables that distinguish grouping rows.
    pub restrict_filter_to_leaf_rows: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            show_groups_only: false,
            label_filter: None,
            restrict_filter_to_leaf_rows: true,
        }
    }
}

impl DisplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the label filter. An empty pattern clears it.
    /// On error the current filter is left untouched.
    pub fn set_label_filter(&mut self, pattern: &str) -> Result<(), TableError> {
        self.label_filter = compile_label_filter(pattern)?;
        Ok(())
    }

    pub fn clear_label_filter(&mut self) {
        self.label_filter = None;
    }

    pub fn label_pattern(&self) -> Option<&str> {
        self.label_filter.as_ref().map(LabelFilter::pattern)
    }

    pub fn with_groups_only(mut self, show_groups_only: bool) -> Self {
        self.show_groups_only = show_groups_only;
        self
    }

    pub fn with_label_filter(mut self, pattern: &str) -> Result<Self, TableError> {
        self.set_label_filter(pattern)?;
        Ok(self)
    }

    pub fn with_leaf_restriction(mut self, restrict: bool) -> Self {
        self.restrict_filter_to_leaf_rows = restrict;
        self
    }
}

fn compile_label_filter(pattern: &str) -> Result<Option<LabelFilter>, TableError> {
    if pattern.is_empty() {
        Ok(None)
    } else {
        LabelFilter::new(pattern).map(Some)
    }
}

fn deserialize_label_filter<'de, D>(deserializer: D) -> Result<Option<LabelFilter>, D::Error>
where
    D: Deserializer<'de>,
{
    let pattern: Option<String> = Option::deserialize(deserializer)?;
    match pattern {
        Some(p) => compile_label_filter(&p).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_from_payload() {
        let json = r#"{
            "supportsControllersDiscrimination": true,
            "overall": {"data": [0.935, 1500, 3000, "Total"], "isController": false},
            "titles": ["Apdex", "T (Toleration threshold)", "F (Frustration threshold)", "Label"],
            "items": [
                {"data": [0.475, 1500, 3000, "https://example.com/prod.html"], "isController": false},
                {"data": [1.0, 1500, 3000, "Checkout"], "isController": true}
            ]
        }"#;

        let dataset: TableDataset = serde_json::from_str(json).unwrap();
        assert!(dataset.supports_group_filtering);
        assert_eq!(dataset.column_count(), 4);
        assert_eq!(dataset.rows.len(), 2);
        assert!(dataset.rows[1].is_aggregate_marker);
        let overall = dataset.overall_row.unwrap();
        assert_eq!(overall.values[3], CellValue::text("Total"));
    }

    #[test]
    fn test_dataset_defaults() {
        let dataset: TableDataset = serde_json::from_str(r#"{"titles": ["Type of error"]}"#).unwrap();
        assert!(!dataset.supports_group_filtering);
        assert!(dataset.overall_row.is_none());
        assert!(dataset.rows.is_empty());
    }

    #[test]
    fn test_sort_spec_pairs() {
        let spec: SortSpec = serde_json::from_str("[[1, 1], [0, 0]]").unwrap();
        assert_eq!(spec.as_slice(), &[SortKey::descending(1), SortKey::ascending(0)]);
        assert_eq!(serde_json::to_string(&spec).unwrap(), "[[1,1],[0,0]]");
        assert!(serde_json::from_str::<SortSpec>("[[0, 2]]").is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = DisplayConfig::default();
        assert!(!config.show_groups_only);
        assert!(config.label_filter.is_none());
        assert!(config.restrict_filter_to_leaf_rows);
    }

    #[test]
    fn test_label_filter_case_insensitive() {
        let filter = LabelFilter::new("foo").unwrap();
        assert!(filter.is_match("/FOO/bar"));
        assert!(!filter.is_match("Test"));
    }

    #[test]
    fn test_set_label_filter() {
        let mut config = DisplayConfig::new();
        config.set_label_filter("prod").unwrap();
        assert_eq!(config.label_pattern(), Some("prod"));

        // Invalid pattern keeps the previous filter.
        assert!(config.set_label_filter("(unclosed").is_err());
        assert_eq!(config.label_pattern(), Some("prod"));

        config.set_label_filter("").unwrap();
        assert!(config.label_filter.is_none());
    }

    #[test]
    fn test_config_json() {
        let config: DisplayConfig =
            serde_json::from_str(r#"{"showGroupsOnly": true, "labelFilterPattern": "cart"}"#).unwrap();
        assert!(config.show_groups_only);
        assert_eq!(config.label_pattern(), Some("cart"));
        assert!(config.restrict_filter_to_leaf_rows);

        let json = serde_json::to_string(&config).unwrap();
        let back: DisplayConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        assert!(serde_json::from_str::<DisplayConfig>(r#"{"labelFilterPattern": "["}"#).is_err());
    }
}
