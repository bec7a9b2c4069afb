//! FILENAME: core/persistence/src/config.rs
//! Display settings stored as JSON, e.g.
//! `{"showGroupsOnly": false, "labelFilterPattern": "checkout", "restrictFilterToLeafRows": true}`.
//! Missing keys take the page defaults.

use std::fs;
use std::path::Path;

use report_engine::logging::log_debug;
use table_engine::DisplayConfig;

use crate::PersistenceError;

pub fn parse_display_config(json: &str) -> Result<DisplayConfig, PersistenceError> {
    let config: DisplayConfig = serde_json::from_str(json)?;
    log_debug!(
        "CONFIG",
        "groups_only={} pattern={:?} leaf_only={}",
        config.show_groups_only,
        config.label_pattern(),
        config.restrict_filter_to_leaf_rows
    );
    Ok(config)
}

pub fn load_display_config(path: &Path) -> Result<DisplayConfig, PersistenceError> {
    let json = fs::read_to_string(path)?;
    parse_display_config(&json)
}
