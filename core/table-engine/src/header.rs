//! FILENAME: core/table-engine/src/header.rs
//! Extra header rows placed above the column titles.

use serde::{Deserialize, Serialize};

use crate::view::{HeaderCell, HeaderRow};

/// Produces zero or more header rows that go above the title row.
pub trait HeaderBuilder {
    fn build(&self, column_titles: &[String]) -> Vec<HeaderRow>;
}

impl<F> HeaderBuilder for F
where
    F: Fn(&[String]) -> Vec<HeaderRow>,
{
    fn build(&self, column_titles: &[String]) -> Vec<HeaderRow> {
        self(column_titles)
    }
}

/// One row of category spanners, e.g. "Response Times (ms)" over seven
/// timing columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GroupedHeader {
    pub groups: Vec<(String, u16)>,
}

impl GroupedHeader {
    pub fn new() -> Self {
        GroupedHeader { groups: Vec::new() }
    }

    pub fn group(mut self, label: impl Into<String>, span: u16) -> Self {
        self.groups.push((label.into(), span));
        self
    }

    /// Categories of the request statistics table (14 columns).
    pub fn statistics() -> Self {
        GroupedHeader::new()
            .group("Requests", 1)
            .group("Executions", 3)
            .group("Response Times (ms)", 7)
            .group("Throughput", 1)
            .group("Network (KB/sec)", 2)
    }

    pub fn span(&self) -> usize {
        self.groups.iter().map(|(_, s)| *s as usize).sum()
    }
}

impl HeaderBuilder for GroupedHeader {
    fn build(&self, _column_titles: &[String]) -> Vec<HeaderRow> {
        if self.groups.is_empty() {
            return Vec::new();
        }

        let cells = self
            .groups
            .iter()
            .map(|(label, span)| HeaderCell::spanner(label.clone(), *span))
            .collect();

        vec![HeaderRow::unsortable(cells)]
    }
}
