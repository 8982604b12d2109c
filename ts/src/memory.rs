//! In-process store, for tests and embedders that persist elsewhere

use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::row::{Row, TableStore, validate_table_name};

/// Tables held as JSON values, so rows go through the same serde path as on disk
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored for `table`
    pub fn row_count(&self, table: &str) -> usize {
        self.tables.get(table).map(|rows| rows.len()).unwrap_or(0)
    }
}

impl TableStore for MemoryStore {
    fn read<R: Row>(&self) -> Result<Vec<R>> {
        let table = R::table_name();
        validate_table_name(table)?;

        let Some(values) = self.tables.get(table) else {
            return Ok(Vec::new());
        };

        values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                serde_json::from_value(value.clone()).map_err(|source| StoreError::Decode {
                    table: table.to_string(),
                    line: idx + 1,
                    source,
                })
            })
            .collect()
    }

    fn write<R: Row>(&mut self, rows: &[R]) -> Result<()> {
        let table = R::table_name();
        validate_table_name(table)?;

        let values = rows
            .iter()
            .map(|row| {
                serde_json::to_value(row).map_err(|source| StoreError::Encode {
                    table: table.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.tables.insert(table.to_string(), values);
        Ok(())
    }

    fn tables(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
    }

    impl Row for Item {
        fn table_name() -> &'static str {
            "Items"
        }
    }

    #[test]
    fn test_unwritten_table_is_empty() {
        let store = MemoryStore::new();
        let rows: Vec<Item> = store.read().unwrap();
        assert!(rows.is_empty());
        assert_eq!(store.row_count("Items"), 0);
    }

    #[test]
    fn test_write_then_read() {
        let mut store = MemoryStore::new();
        let rows = vec![
            Item {
                name: "second".to_string(),
            },
            Item {
                name: "first".to_string(),
            },
        ];
        store.write(&rows).unwrap();

        assert_eq!(store.read::<Item>().unwrap(), rows);
        assert_eq!(store.row_count("Items"), 2);
        assert_eq!(store.tables().unwrap(), vec!["Items".to_string()]);
    }

    #[test]
    fn test_write_empty_clears_table() {
        let mut store = MemoryStore::new();
        store
            .write(&[Item {
                name: "x".to_string(),
            }])
            .unwrap();
        store.write::<Item>(&[]).unwrap();
        assert!(store.read::<Item>().unwrap().is_empty());
    }
}
