//! Revision scheduler
//!
//! Tracks per-topic revision state and computes next review dates with an
//! exponential backoff on the iteration count.

mod core;
mod error;
mod interval;

pub use core::{RevisionStore, due_items};
pub use error::{SchedulerError, SchedulerResult};
pub use interval::{FIRST_REVIEW_OFFSET_DAYS, review_gap};
