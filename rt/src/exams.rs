//! Exam schedule countdown
//!
//! Exams come from configuration; this module only does the date arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A scheduled exam or mock test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamEntry {
    /// Display name (e.g., "Major Test-3")
    pub name: String,

    /// Exam date
    pub date: NaiveDate,

    /// Paper pattern (e.g., "JEE Main")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ExamEntry {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            pattern: None,
        }
    }

    /// Builder: set pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// The next exam and how far away it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown<'a> {
    pub exam: &'a ExamEntry,
    /// Whole days from the reference date; 0 on exam day
    pub days_left: i64,
}

/// Exams on or after `as_of`, earliest first
pub fn upcoming(exams: &[ExamEntry], as_of: NaiveDate) -> Vec<&ExamEntry> {
    let mut upcoming: Vec<&ExamEntry> = exams.iter().filter(|e| e.date >= as_of).collect();
    upcoming.sort_by_key(|e| e.date);
    upcoming
}

/// The earliest exam on or after `as_of`, or None when all are past
pub fn next_exam(exams: &[ExamEntry], as_of: NaiveDate) -> Option<Countdown<'_>> {
    debug!(exam_count = exams.len(), %as_of, "next_exam: called");
    upcoming(exams, as_of).into_iter().next().map(|exam| Countdown {
        exam,
        days_left: (exam.date - as_of).num_days(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn schedule() -> Vec<ExamEntry> {
        vec![
            ExamEntry::new("Major Test-2", date("2026-02-15")).with_pattern("Main + Adv"),
            ExamEntry::new("Major Test-1", date("2026-02-08")).with_pattern("Main + Adv"),
            ExamEntry::new("Major Test-7", date("2026-03-18")).with_pattern("JEE Main"),
        ]
    }

    #[test]
    fn test_next_exam_picks_earliest_upcoming() {
        let exams = schedule();
        let countdown = next_exam(&exams, date("2026-02-09")).unwrap();
        assert_eq!(countdown.exam.name, "Major Test-2");
        assert_eq!(countdown.days_left, 6);
    }

    #[test]
    fn test_exam_day_counts_as_upcoming() {
        let exams = schedule();
        let countdown = next_exam(&exams, date("2026-02-08")).unwrap();
        assert_eq!(countdown.exam.name, "Major Test-1");
        assert_eq!(countdown.days_left, 0);
    }

    #[test]
    fn test_no_exams_left() {
        let exams = schedule();
        assert!(next_exam(&exams, date("2026-03-19")).is_none());
        assert!(next_exam(&[], date("2026-03-19")).is_none());
    }

    #[test]
    fn test_upcoming_sorted() {
        let exams = schedule();
        let names: Vec<&str> = upcoming(&exams, date("2026-02-01"))
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Major Test-1", "Major Test-2", "Major Test-7"]);
    }

    #[test]
    fn test_exam_entry_yaml() {
        let yaml = "name: AIOOT (Test-9)\ndate: 2026-03-22\npattern: JEE Main\n";
        let entry: ExamEntry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry.date, date("2026-03-22"));
        assert_eq!(entry.pattern.as_deref(), Some("JEE Main"));
    }
}
