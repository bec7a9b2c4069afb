//! FILENAME: core/table-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Invalid label filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
