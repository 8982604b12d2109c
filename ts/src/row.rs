//! Row and TableStore traits

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, StoreError};

/// A type persisted as one row of a named table
pub trait Row: Serialize + DeserializeOwned {
    /// Name of the table holding rows of this type
    fn table_name() -> &'static str;
}

/// Full-collection table storage
///
/// `write` replaces the entire table. Implementations must preserve row order
/// and must treat a table that was never written as empty.
pub trait TableStore {
    /// Read every row of `R`'s table, in stored order
    fn read<R: Row>(&self) -> Result<Vec<R>>;

    /// Replace `R`'s table with `rows`
    fn write<R: Row>(&mut self, rows: &[R]) -> Result<()>;

    /// Names of all tables that have been written
    fn tables(&self) -> Result<Vec<String>>;
}

/// Table names double as file names, so keep them to a safe charset
pub fn validate_table_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(name.to_string()))
    }
}

/// Current time in milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
