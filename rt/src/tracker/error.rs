//! Tracker errors

use tablestore::StoreError;
use thiserror::Error;

use crate::scheduler::SchedulerError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl TrackerError {
    /// True for errors the user caused with bad input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Scheduler(SchedulerError::NotFound(_) | SchedulerError::Validation(_))
        )
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
