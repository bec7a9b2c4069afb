//! FILENAME: core/persistence/tests/dashboard_report.rs
//! End-to-end: load a generated dashboard script, render its tables under
//! different display settings, write them out as HTML.

use std::fs;

use report_persistence::{
    load_dashboard_script, load_display_config, load_report_directory, parse_dashboard_script,
    save_report_html, DashboardReport, TableKind,
};
use table_engine::{DisplayConfig, SortKey};

const DASHBOARD: &str = include_str!("fixtures/dashboard.js");

fn report() -> DashboardReport {
    parse_dashboard_script(DASHBOARD).unwrap()
}

#[test]
fn loads_all_four_tables_in_document_order() {
    let report = report();

    let ids: Vec<&str> = report.tables().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["apdexTable", "statisticsTable", "errorsTable", "top5ErrorsBySamplerTable"]);

    let kinds: Vec<TableKind> = report.tables().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TableKind::Apdex, TableKind::Statistics, TableKind::Errors, TableKind::TopErrorsBySampler]
    );

    let slices = report.summary.unwrap().pie_slices();
    assert_eq!(slices[0].percent, 2.5);
    assert_eq!(slices[1].percent, 97.5);
}

#[test]
fn statistics_table_with_default_settings() {
    let table = report().render_table("statisticsTable", &DisplayConfig::new()).unwrap();

    assert_eq!(table.header_rows.len(), 2);
    assert_eq!(table.header_rows[0].span(), 14);
    assert_eq!(table.title_row().unwrap().cells[3].label, "Error %");

    let overall = table.overall_row.as_ref().unwrap();
    assert_eq!(
        overall.formatted_values(),
        vec![
            "Total", "400", "10", "2.50%", "812.35", "120", "9050", "640.00", "1500.50",
            "2100.25", "4800.00", "13.33", "95.12", "7.89"
        ]
    );

    // Sorted by label, ignoring case.
    assert_eq!(table.source_order(), vec![2, 0, 3, 1]);
    assert_eq!(table.sort_spec.as_slice(), &[SortKey::ascending(0)]);
}

#[test]
fn apdex_table_formats_thresholds() {
    let table = report().render_table("apdexTable", &DisplayConfig::new()).unwrap();

    assert_eq!(table.source_order(), vec![1, 2, 3, 0]);
    assert_eq!(
        table.body_rows[0].formatted_values(),
        vec!["0.500", "500 ms", "1 sec 500 ms", "POST /cart/add"]
    );
    assert_eq!(
        table.overall_row.unwrap().formatted_values(),
        vec!["0.813", "500 ms", "1 sec 500 ms", "Total"]
    );
}

#[test]
fn groups_only_applies_to_discriminating_tables() {
    let report = report();
    let config = DisplayConfig::new().with_groups_only(true);

    let counts: Vec<(&str, usize)> = report
        .render_all(&config)
        .into_iter()
        .map(|(id, table)| (id, table.body_row_count()))
        .collect();

    assert_eq!(
        counts,
        vec![
            ("apdexTable", 1),
            ("statisticsTable", 1),
            ("errorsTable", 2),
            ("top5ErrorsBySamplerTable", 2),
        ]
    );
}

#[test]
fn label_filter_spares_flat_tables() {
    let report = report();
    let config = DisplayConfig::new().with_label_filter("CART").unwrap();

    let stats = report.render_table("statisticsTable", &config).unwrap();
    assert_eq!(stats.body_text(), vec![vec![
        "POST /cart/add", "100", "8", "8.00%", "1400.25", "300", "9050", "1100.00",
        "2800.00", "3500.00", "8000.00", "3.33", "20.25", "3.50"
    ]]);
    assert!(stats.overall_row.is_some());

    let apdex = report.render_table("apdexTable", &config).unwrap();
    assert_eq!(apdex.source_order(), vec![1]);

    assert_eq!(report.render_table("errorsTable", &config).unwrap().body_row_count(), 2);
    assert_eq!(report.render_table("top5ErrorsBySamplerTable", &config).unwrap().body_row_count(), 2);
}

#[test]
fn search_box_pattern_on_top_of_config() {
    let report = report();
    let table = report
        .render_with_filter("statisticsTable", &DisplayConfig::new(), "^get ")
        .unwrap();
    assert_eq!(table.source_order(), vec![0, 3]);
}

#[test]
fn top_errors_skip_empty_rows_and_keep_blank_cells() {
    let table = report()
        .render_table("top5ErrorsBySamplerTable", &DisplayConfig::new())
        .unwrap();

    assert_eq!(table.source_order(), vec![3, 1]);
    let overall = table.overall_row.unwrap();
    assert_eq!(overall.cells.len(), 13);
    assert_eq!(overall.cells[3].formatted_value, "Assertion failed");
    assert_eq!(overall.cells[7].formatted_value, "");
}

#[test]
fn errors_table_sorted_by_count() {
    let table = report().render_table("errorsTable", &DisplayConfig::new()).unwrap();
    assert_eq!(
        table.body_text(),
        vec![
            vec!["Assertion failed", "7", "70.00%", "1.75%"],
            vec!["500/Internal Server Error", "3", "30.00%", "0.75%"],
        ]
    );
    assert!(table.overall_row.is_none());
}

#[test]
fn loads_from_report_directory() {
    let dir = tempfile::tempdir().unwrap();
    let js_dir = dir.path().join("content").join("js");
    fs::create_dir_all(&js_dir).unwrap();
    fs::write(js_dir.join("dashboard.js"), DASHBOARD).unwrap();

    let report = load_report_directory(dir.path()).unwrap();
    assert_eq!(report.len(), 4);

    let direct = load_dashboard_script(&js_dir.join("dashboard.js")).unwrap();
    assert_eq!(direct.tables(), report.tables());
}

#[test]
fn missing_script_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_report_directory(dir.path()).unwrap_err();
    assert!(matches!(err, report_persistence::PersistenceError::Io(_)));
}

#[test]
fn writes_html_for_every_table() {
    let report = report();
    let dir = tempfile::tempdir().unwrap();

    let config_path = dir.path().join("display.json");
    fs::write(&config_path, r#"{"showGroupsOnly": true}"#).unwrap();
    let config = load_display_config(&config_path).unwrap();

    let out = dir.path().join("tables.html");
    save_report_html(&report, &config, &out).unwrap();

    let html = fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("<table ").count(), 4);
    assert!(html.contains("<table id=\"errorsTable\" class=\"table tablesorter\" data-sort-list=\"[[1,1]]\">"));
    assert!(html.contains("colspan=\"7\">Response Times (ms)</th>"));
    assert!(!html.contains("<td>GET /product?id=1</td>"));
    assert!(html.contains("<td>Checkout Flow</td>"));
}
