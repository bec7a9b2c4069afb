//! FILENAME: core/persistence/src/dashboard_reader.rs
//! Reads the table payloads embedded in a generated dashboard script.
//!
//! The generator writes each table as a JSON object literal passed to
//! `createTable($("#<id>"), {...}, formatter, sorts, ...)`, and the pass/fail
//! split as `var data = {"OkPercent": .., "KoPercent": ..};`. Only those
//! literals are read; the surrounding script is ignored.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use report_engine::logging::{log_info, log_warn};
use serde::de::DeserializeOwned;
use table_engine::TableDataset;

use crate::{DashboardReport, PersistenceError, ReportTable, RequestsSummary};

/// Location of the script inside a report output directory.
const DASHBOARD_SCRIPT_PATH: &str = "content/js/dashboard.js";

static CREATE_TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"createTable\(\s*\$\(\s*["']#([^"']+)["']\s*\)\s*,\s*"##)
        .expect("createTable pattern is valid")
});

/// Only an object literal counts; the table helper also declares
/// `var data = info.overall.data;`.
static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"var\s+data\s*=\s*(\{)").expect("summary pattern is valid")
});

/// Parses every table (and the requests summary, if present) out of a
/// dashboard script.
pub fn parse_dashboard_script(source: &str) -> Result<DashboardReport, PersistenceError> {
    let mut report = DashboardReport::new();

    if let Some(brace) = SUMMARY_RE.captures(source).and_then(|caps| caps.get(1)) {
        match read_json_at::<RequestsSummary>(source, brace.start()) {
            Ok(summary) => report.summary = Some(summary),
            Err(e) => log_warn!("LOAD", "skipping unreadable requests summary: {}", e),
        }
    }

    for caps in CREATE_TABLE_RE.captures_iter(source) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let dataset: TableDataset = read_json_at(source, whole.end()).map_err(|e| {
            PersistenceError::InvalidFormat(format!("table '{}': {}", id.as_str(), e))
        })?;

        log_info!(
            "LOAD",
            "table '{}': {} columns, {} rows, overall={}",
            id.as_str(),
            dataset.column_count(),
            dataset.rows.len(),
            dataset.overall_row.is_some()
        );

        report.add_table(ReportTable::new(id.as_str(), dataset));
    }

    if report.is_empty() {
        return Err(PersistenceError::InvalidFormat(
            "Dashboard script contains no tables".to_string(),
        ));
    }

    Ok(report)
}

pub fn load_dashboard_script(path: &Path) -> Result<DashboardReport, PersistenceError> {
    log_info!("LOAD", "reading dashboard script {}", path.display());
    let source = fs::read_to_string(path)?;
    parse_dashboard_script(&source)
}

/// Loads a report from its output directory (`<dir>/content/js/dashboard.js`).
pub fn load_report_directory(dir: &Path) -> Result<DashboardReport, PersistenceError> {
    load_dashboard_script(&dir.join(DASHBOARD_SCRIPT_PATH))
}

/// Parses a single table payload literal.
pub fn parse_table_payload(json: &str) -> Result<TableDataset, PersistenceError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads one JSON value starting at `offset`; whatever follows it is ignored.
fn read_json_at<T: DeserializeOwned>(source: &str, offset: usize) -> Result<T, PersistenceError> {
    let rest = source.get(offset..).unwrap_or_default();
    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<T>();

    match stream.next() {
        Some(value) => Ok(value?),
        None => Err(PersistenceError::InvalidFormat(
            "expected a JSON literal, found end of script".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TableKind;

    const SCRIPT: &str = r##"
var showControllersOnly = false;
var seriesFilter = "";

$(document).ready(function() {
    var data = {"OkPercent": 90.0, "KoPercent": 10.0};

    createTable($("#apdexTable"), {"supportsControllersDiscrimination": true, "overall": {"data": [0.9, 500, 1500, "Total"], "isController": false}, "titles": ["Apdex", "T (Toleration threshold)", "F (Frustration threshold)", "Label"], "items": [{"data": [0.8, 500, 1500, "Home"], "isController": false}]}, function(index, item){
        return item;
    }, [[0, 0]], 3);

    createTable($("#errorsTable"), {"supportsControllersDiscrimination": false, "titles": ["Type of error", "Number of errors", "% in errors", "% in all samples"], "items": [{"data": ["500/Internal Server Error", 3, 100.0, 1.5], "isController": false}]}, function(index, item){
        return item;
    }, [[1, 1]]);
});
"##;

    #[test]
    fn test_parse_script() {
        let report = parse_dashboard_script(SCRIPT).unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.tables()[0].kind, TableKind::Apdex);
        assert_eq!(report.tables()[1].kind, TableKind::Errors);

        let apdex = report.table("apdexTable").unwrap();
        assert!(apdex.dataset.supports_group_filtering);
        assert_eq!(apdex.dataset.rows.len(), 1);

        let summary = report.summary.unwrap();
        assert_eq!(summary.ko_percent, 10.0);
    }

    #[test]
    fn test_summary_after_table_helper() {
        let script = r##"
function createTable(table, info, formatter, defaultSorts, seriesIndex, headerCreator) {
    if(info.overall){
        var data = info.overall.data;
    }
}

$(document).ready(function() {
    var data = {"OkPercent": 99.09411172622043, "KoPercent": 0.9058882737795672};
    createTable($("#errorsTable"), {"titles": ["Type of error"], "items": []}, null, [[1, 1]]);
});
"##;
        let summary = parse_dashboard_script(script).unwrap().summary.unwrap();
        assert_eq!(summary.ok_percent, 99.09411172622043);
        assert_eq!(summary.ko_percent, 0.9058882737795672);
    }

    #[test]
    fn test_script_without_tables() {
        let result = parse_dashboard_script("var data = {\"OkPercent\": 100, \"KoPercent\": 0};");
        assert!(matches!(result, Err(PersistenceError::InvalidFormat(_))));
    }

    #[test]
    fn test_broken_table_literal() {
        let script = r##"createTable($("#statisticsTable"), {"titles": ["Label", }, function(){}, [[0, 0]], 0);"##;
        let err = parse_dashboard_script(script).unwrap_err();
        assert!(err.to_string().contains("statisticsTable"));
    }

    #[test]
    fn test_missing_summary_is_not_an_error() {
        let script = r##"createTable($("#errorsTable"), {"titles": ["Type of error"], "items": []});"##;
        let report = parse_dashboard_script(script).unwrap();
        assert!(report.summary.is_none());
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_parse_table_payload() {
        let dataset = parse_table_payload(r#"{"titles": ["A"], "items": [{"data": ["x"], "isController": true}]}"#).unwrap();
        assert!(dataset.rows[0].is_aggregate_marker);
        assert!(matches!(parse_table_payload(r#"{"titles": 5}"#), Err(PersistenceError::Json(_))));
    }
}
