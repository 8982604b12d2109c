//! revtrack - spaced-repetition revision tracker
//!
//! Tracks, for each studied topic, when it was last studied, when it is next
//! due and how many revision cycles it has been through. Each completed
//! revision pushes the next review out by `2^iteration` days.
//!
//! # Core Concepts
//!
//! - **Explicit state**: a `RevisionStore` is loaded from the table store,
//!   changed by one operation and written back whole
//! - **Derived due state**: an item is due when `next_review <= today`; no
//!   transition runs when the clock moves
//! - **Exact topics**: topics match by raw string, no case or whitespace folding
//!
//! # Modules
//!
//! - [`domain`] - RevisionItem and SessionLog rows
//! - [`scheduler`] - Revision scheduling rule and working copy
//! - [`tracker`] - Command handler over a table store
//! - [`stats`] - Aggregates for the dashboard
//! - [`exams`] - Exam countdown
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod exams;
pub mod scheduler;
pub mod stats;
pub mod tracker;

// Re-export commonly used types
pub use config::Config;
pub use domain::{LOGS_TABLE, REVISION_TABLE, ReviewState, RevisionItem, SessionLog, WorkType, validate_topic};
pub use exams::{Countdown, ExamEntry, next_exam, upcoming};
pub use scheduler::{RevisionStore, SchedulerError, SchedulerResult, due_items, review_gap};
pub use stats::{TrackerStats, compute_stats, streak_days};
pub use tracker::{LogOutcome, Tracker, TrackerError, TrackerResult};
