//! Aggregate statistics over the Revision and Logs tables

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::domain::{ReviewState, RevisionItem, SessionLog};

/// Summary shown by `rt stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackerStats {
    pub total_topics: usize,
    pub due_topics: usize,
    pub pending_topics: usize,
    /// Highest iteration reached by any topic (0 when nothing is tracked)
    pub max_iteration: u32,
    pub total_sessions: usize,
    pub total_hours: f64,
    pub hours_by_subject: BTreeMap<String, f64>,
    /// Consecutive days with at least one session, ending today or yesterday
    pub streak_days: u32,
}

/// Compute statistics as of `as_of`
pub fn compute_stats(items: &[RevisionItem], logs: &[SessionLog], as_of: NaiveDate) -> TrackerStats {
    debug!(item_count = items.len(), log_count = logs.len(), %as_of, "compute_stats: called");
    let mut stats = TrackerStats {
        total_topics: items.len(),
        total_sessions: logs.len(),
        ..Default::default()
    };

    for item in items {
        match item.state(as_of) {
            ReviewState::Due => stats.due_topics += 1,
            ReviewState::Pending => stats.pending_topics += 1,
        }
        stats.max_iteration = stats.max_iteration.max(item.iteration);
    }

    for log in logs {
        stats.total_hours += log.hours;
        *stats.hours_by_subject.entry(log.subject.clone()).or_insert(0.0) += log.hours;
    }

    stats.streak_days = streak_days(logs, as_of);
    stats
}

/// Length of the run of consecutive study days ending at `as_of`
///
/// A day without a session yet does not break the streak until it is over,
/// so the run may also end at `as_of - 1`.
pub fn streak_days(logs: &[SessionLog], as_of: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = logs.iter().map(|l| l.date).filter(|d| *d <= as_of).collect();

    let mut cursor = if days.contains(&as_of) {
        Some(as_of)
    } else {
        as_of.pred_opt().filter(|d| days.contains(d))
    };

    let mut streak = 0;
    while let Some(day) = cursor.filter(|d| days.contains(d)) {
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}
