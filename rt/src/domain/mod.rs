//! Domain types for revtrack
//!
//! Core domain types: RevisionItem, SessionLog
//! Both implement the Row trait for TableStore persistence.

mod revision;
mod session;
mod topic;

pub use revision::{REVISION_TABLE, ReviewState, RevisionItem};
pub use session::{LOGS_TABLE, SessionLog, WorkType};
pub use topic::validate_topic;

// Re-export tablestore types for convenience
pub use tablestore::{JsonlStore, MemoryStore, Row, TableStore};
