//! Store errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode row {line} of table {table}: {source}")]
    Decode {
        table: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode row for table {table}: {source}")]
    Encode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
