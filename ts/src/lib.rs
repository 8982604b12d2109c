//! TableStore - generic persisted table store
//!
//! Stores named tables of serde rows with full-collection replace semantics:
//! a caller reads a whole table, mutates it in memory and writes the whole
//! table back. There are no row-level upserts and no transactions.
//!
//! # Architecture
//!
//! ```text
//! store/
//! ├── Revision.jsonl   # one JSON object per row, in order
//! ├── Revision.lock    # advisory lock held during a read or write
//! ├── Logs.jsonl
//! └── Logs.lock
//! ```
//!
//! A missing or blank table reads as an empty collection.
//!
//! # Example
//!
//! ```ignore
//! use tablestore::{JsonlStore, TableStore};
//!
//! let mut store = JsonlStore::open(".revtrack")?;
//! let mut rows: Vec<MyRow> = store.read()?;
//! rows.push(MyRow::new("x"));
//! store.write(&rows)?;
//! ```

mod error;
mod jsonl;
mod memory;
mod row;

pub use error::{Result, StoreError};
pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use row::{Row, TableStore, now_ms, validate_table_name};
