//! RevisionStore - in-memory working copy of the Revision table

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use crate::domain::{RevisionItem, validate_topic};

use super::error::{SchedulerError, SchedulerResult};
use super::interval::{FIRST_REVIEW_OFFSET_DAYS, review_gap};

/// Ordered collection of revision items, unique by topic
///
/// Load it from the table store, apply one operation, then write the whole
/// collection back. Row order is preserved and new topics are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionStore {
    items: Vec<RevisionItem>,
}

impl RevisionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded rows, rejecting rows that break the invariants
    pub fn from_items(items: Vec<RevisionItem>) -> SchedulerResult<Self> {
        debug!(item_count = items.len(), "RevisionStore::from_items: called");
        let mut seen = HashSet::new();
        for item in &items {
            validate_topic(&item.topic).map_err(SchedulerError::Validation)?;
            item.check_invariants().map_err(SchedulerError::Validation)?;
            if !seen.insert(item.topic.as_str()) {
                return Err(SchedulerError::Validation(format!("duplicate topic {:?}", item.topic)));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[RevisionItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<RevisionItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a topic by exact string
    pub fn get(&self, topic: &str) -> Option<&RevisionItem> {
        self.items.iter().find(|item| item.topic == topic)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.get(topic).is_some()
    }

    /// Start tracking `topic` if it is new
    ///
    /// A topic that is already tracked is left exactly as it was: re-studying
    /// does not reset its schedule. Returns true when a new item was created.
    pub fn register_or_touch(&mut self, topic: &str, studied_on: NaiveDate) -> SchedulerResult<bool> {
        debug!(%topic, %studied_on, "RevisionStore::register_or_touch: called");
        validate_topic(topic).map_err(SchedulerError::Validation)?;

        if self.contains(topic) {
            debug!(%topic, "RevisionStore::register_or_touch: already tracked, leaving untouched");
            return Ok(false);
        }

        let next_review = studied_on
            .checked_add_days(Days::new(FIRST_REVIEW_OFFSET_DAYS))
            .ok_or_else(|| SchedulerError::Validation(format!("study date {} is out of range", studied_on)))?;

        self.items.push(RevisionItem {
            topic: topic.to_string(),
            last_studied: studied_on,
            next_review,
            iteration: 1,
        });

        info!(%topic, %next_review, "Registered topic for revision");
        Ok(true)
    }

    /// Record a completed revision of `topic` on `today`
    ///
    /// Pushes `next_review` out by `2^iteration` days from `today` and bumps
    /// the iteration. Every call advances the schedule, including repeat
    /// calls on the same day. On error the store is unchanged.
    pub fn mark_revised(&mut self, topic: &str, today: NaiveDate) -> SchedulerResult<RevisionItem> {
        debug!(%topic, %today, "RevisionStore::mark_revised: called");
        validate_topic(topic).map_err(SchedulerError::Validation)?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.topic == topic)
            .ok_or_else(|| SchedulerError::NotFound(topic.to_string()))?;

        let overflow = || SchedulerError::IntervalOverflow {
            topic: topic.to_string(),
            iteration: item.iteration,
        };
        let next_review = review_gap(item.iteration)
            .and_then(|gap| today.checked_add_days(Days::new(gap)))
            .ok_or_else(overflow)?;
        let iteration = item.iteration.checked_add(1).ok_or_else(overflow)?;

        item.last_studied = today;
        item.next_review = next_review;
        item.iteration = iteration;

        info!(%topic, iteration, %next_review, "Marked topic revised");
        Ok(item.clone())
    }

    /// Items due on or before `as_of`
    pub fn due_items(&self, as_of: NaiveDate) -> Vec<RevisionItem> {
        due_items(&self.items, as_of)
    }
}

/// Items with `next_review <= as_of`, ordered by `(next_review, topic)`
pub fn due_items(items: &[RevisionItem], as_of: NaiveDate) -> Vec<RevisionItem> {
    let mut due: Vec<RevisionItem> = items.iter().filter(|item| item.is_due(as_of)).cloned().collect();
    due.sort_by(|a, b| a.next_review.cmp(&b.next_review).then_with(|| a.topic.cmp(&b.topic)));
    debug!(%as_of, due_count = due.len(), "due_items: done");
    due
}
