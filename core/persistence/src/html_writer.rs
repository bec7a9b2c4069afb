//! FILENAME: core/persistence/src/html_writer.rs
//! Writes rendered tables as HTML fragments for the table sorter widget.
//!
//! Rows that must stay put (builder header rows, the overall row) carry the
//! `tablesorter-no-sort` class; their header cells are marked
//! `data-sorter="false"`. The initial sort order goes into `data-sort-list`.

use std::fs;
use std::path::Path;

use report_engine::logging::log_info;
use table_engine::{BodyRow, DisplayConfig, HeaderRow, RenderedTable};

use crate::{DashboardReport, PersistenceError};

const NO_SORT_CLASS: &str = "tablesorter-no-sort";

/// Renders one table as a `<table>` element.
pub fn write_table_html(id: &str, table: &RenderedTable) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<table id=\"{}\" class=\"table tablesorter\" data-sort-list=\"{}\">\n",
        escape_html(id),
        sort_list_attr(table)
    ));

    html.push_str("  <thead>\n");
    for row in &table.header_rows {
        write_header_row(&mut html, row);
    }
    html.push_str("  </thead>\n");

    if let Some(overall) = &table.overall_row {
        html.push_str(&format!("  <tbody class=\"{}\">\n", NO_SORT_CLASS));
        write_body_row(&mut html, overall);
        html.push_str("  </tbody>\n");
    }

    html.push_str("  <tbody>\n");
    for row in &table.body_rows {
        write_body_row(&mut html, row);
    }
    html.push_str("  </tbody>\n");

    html.push_str("</table>\n");
    html
}

/// Renders every table of a report, in document order.
pub fn write_report_html(report: &DashboardReport, config: &DisplayConfig) -> String {
    report
        .render_all(config)
        .iter()
        .map(|(id, table)| write_table_html(id, table))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn save_report_html(
    report: &DashboardReport,
    config: &DisplayConfig,
    path: &Path,
) -> Result<(), PersistenceError> {
    let html = write_report_html(report, config);
    fs::write(path, html)?;
    log_info!("HTML", "wrote {} tables to {}", report.len(), path.display());
    Ok(())
}

fn write_header_row(html: &mut String, row: &HeaderRow) {
    if row.sortable {
        html.push_str("    <tr>");
    } else {
        html.push_str(&format!("    <tr class=\"{}\">", NO_SORT_CLASS));
    }

    for cell in &row.cells {
        let mut attrs = String::new();
        if !cell.sortable {
            attrs.push_str(" data-sorter=\"false\"");
        }
        if cell.col_span != 1 {
            attrs.push_str(&format!(" colspan=\"{}\"", cell.col_span));
        }
        html.push_str(&format!("<th{}>{}</th>", attrs, escape_html(&cell.label)));
    }

    html.push_str("</tr>\n");
}

fn write_body_row(html: &mut String, row: &BodyRow) {
    html.push_str("    <tr>");
    for cell in &row.cells {
        html.push_str(&format!("<td>{}</td>", escape_html(&cell.formatted_value)));
    }
    html.push_str("</tr>\n");
}

/// `[[column,direction],...]` as the sorter expects it.
fn sort_list_attr(table: &RenderedTable) -> String {
    let keys: Vec<String> = table
        .sort_spec
        .iter()
        .map(|k| format!("[{},{}]", k.column, u8::from(k.direction)))
        .collect();
    format!("[{}]", keys.join(","))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
