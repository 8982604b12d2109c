//! RevisionItem domain type
//!
//! One row of the Revision table: the spaced-repetition state of a topic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tablestore::Row;

/// Table holding RevisionItem rows
pub const REVISION_TABLE: &str = "Revision";

/// Derived review state of an item relative to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    /// `next_review` is after the reference date
    Pending,
    /// `next_review` is on or before the reference date
    Due,
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Due => write!(f, "due"),
        }
    }
}

/// Spaced-repetition state for one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionItem {
    /// Topic name, matched by exact string equality
    pub topic: String,

    /// Date of the most recent study or revision
    pub last_studied: NaiveDate,

    /// Date on or after which the topic is due
    pub next_review: NaiveDate,

    /// Completed revision cycles, starting at 1
    pub iteration: u32,
}

impl RevisionItem {
    /// Review state as of `as_of`
    pub fn state(&self, as_of: NaiveDate) -> ReviewState {
        if self.next_review <= as_of {
            ReviewState::Due
        } else {
            ReviewState::Pending
        }
    }

    pub fn is_due(&self, as_of: NaiveDate) -> bool {
        self.state(as_of) == ReviewState::Due
    }

    /// Days until the item falls due (negative when overdue)
    pub fn days_until_due(&self, as_of: NaiveDate) -> i64 {
        (self.next_review - as_of).num_days()
    }

    /// Check the row-level invariants, returning a description of the first violation
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.iteration == 0 {
            return Err(format!("topic {:?} has iteration 0", self.topic));
        }
        if self.next_review < self.last_studied {
            return Err(format!(
                "topic {:?} has next_review {} before last_studied {}",
                self.topic, self.next_review, self.last_studied
            ));
        }
        Ok(())
    }
}

impl Row for RevisionItem {
    fn table_name() -> &'static str {
        REVISION_TABLE
    }
}
