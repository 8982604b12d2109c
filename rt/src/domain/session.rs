//! SessionLog domain type
//!
//! One row of the Logs table: a single study session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tablestore::{Row, now_ms};
use tracing::debug;

/// Table holding SessionLog rows
pub const LOGS_TABLE: &str = "Logs";

/// Default session length in hours
pub const DEFAULT_HOURS: f64 = 1.5;

/// Longest session a single log entry may record
pub const MAX_HOURS: f64 = 24.0;

/// Kind of work done in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    #[default]
    Theory,
    ModuleSolving,
    Pyqs,
    Revision,
}

impl std::fmt::Display for WorkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Theory => write!(f, "theory"),
            Self::ModuleSolving => write!(f, "module_solving"),
            Self::Pyqs => write!(f, "pyqs"),
            Self::Revision => write!(f, "revision"),
        }
    }
}

impl std::str::FromStr for WorkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "theory" => Ok(Self::Theory),
            "module_solving" | "module" => Ok(Self::ModuleSolving),
            "pyqs" | "pyq" => Ok(Self::Pyqs),
            "revision" => Ok(Self::Revision),
            _ => Err(format!("Unknown work type: {}", s)),
        }
    }
}

/// A single study session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    /// Day the session took place
    pub date: NaiveDate,

    /// Subject the topic belongs to (e.g., "Physics")
    pub subject: String,

    /// Topic studied, matched against the Revision table by exact string
    pub topic: String,

    /// Kind of work done
    #[serde(default)]
    pub work_type: WorkType,

    /// Session length in hours
    pub hours: f64,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// When the entry was recorded (Unix milliseconds)
    #[serde(default)]
    pub logged_at: i64,
}

impl SessionLog {
    /// Create a new SessionLog with default work type and duration
    pub fn new(date: NaiveDate, subject: impl Into<String>, topic: impl Into<String>) -> Self {
        let subject = subject.into();
        let topic = topic.into();
        debug!(%date, %subject, %topic, "SessionLog::new: called");
        Self {
            date,
            subject,
            topic,
            work_type: WorkType::default(),
            hours: DEFAULT_HOURS,
            tags: Vec::new(),
            logged_at: now_ms(),
        }
    }

    /// Builder: set work type
    pub fn with_work_type(mut self, work_type: WorkType) -> Self {
        self.work_type = work_type;
        self
    }

    /// Builder: set duration
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours = hours;
        self
    }

    /// Builder: add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Check the fields the topic check does not cover
    pub fn check_fields(&self) -> Result<(), String> {
        if self.subject.trim().is_empty() {
            return Err("subject must not be empty".to_string());
        }
        if !self.hours.is_finite() || self.hours <= 0.0 || self.hours > MAX_HOURS {
            return Err(format!("hours must be in (0, {}], got {}", MAX_HOURS, self.hours));
        }
        Ok(())
    }
}

impl Row for SessionLog {
    fn table_name() -> &'static str {
        LOGS_TABLE
    }
}
