//! Scheduler errors

use thiserror::Error;

/// Errors from scheduler operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("Topic not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Review interval for topic {topic:?} at iteration {iteration} overflows the calendar")]
    IntervalOverflow { topic: String, iteration: u32 },
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
