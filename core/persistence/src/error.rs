//! FILENAME: core/persistence/src/error.rs

use table_engine::TableError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table error: {0}")]
    Table(#[from] TableError),
}
