//! Tracker implementation

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::{RevisionItem, SessionLog, TableStore, validate_topic};
use crate::scheduler::{RevisionStore, SchedulerError};
use crate::stats::{TrackerStats, compute_stats};

use super::error::{TrackerError, TrackerResult};

/// Result of logging a study session
#[derive(Debug, Clone, PartialEq)]
pub struct LogOutcome {
    /// The session as written to the Logs table
    pub session: SessionLog,
    /// True when the topic was not tracked before this session
    pub registered: bool,
    /// Revision state of the topic after the session
    pub item: RevisionItem,
}

/// Command handler owning a table store
///
/// The store is the only durable state. Nothing is cached between calls, so
/// every command sees what the previous one wrote.
pub struct Tracker<S: TableStore> {
    store: S,
}

impl<S: TableStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_revisions(&self) -> TrackerResult<RevisionStore> {
        let items = self.store.read::<RevisionItem>()?;
        Ok(RevisionStore::from_items(items)?)
    }

    fn flush_revisions(&mut self, revisions: &RevisionStore) -> TrackerResult<()> {
        self.store.write(revisions.items())?;
        Ok(())
    }

    /// Record a study session and start tracking its topic if it is new
    ///
    /// Appends to Logs, then writes Revision when a topic was registered.
    /// The two writes are not atomic together: if the second fails the
    /// session stays logged and the topic is registered on the next log.
    pub fn log_session(&mut self, session: SessionLog) -> TrackerResult<LogOutcome> {
        debug!(topic = %session.topic, date = %session.date, "Tracker::log_session: called");
        validate_topic(&session.topic).map_err(TrackerError::Validation)?;
        session.check_fields().map_err(TrackerError::Validation)?;

        let mut revisions = self.load_revisions()?;
        let mut logs = self.store.read::<SessionLog>()?;

        let registered = revisions.register_or_touch(&session.topic, session.date)?;
        let item = revisions
            .get(&session.topic)
            .cloned()
            .ok_or_else(|| SchedulerError::NotFound(session.topic.clone()))?;

        logs.push(session.clone());
        self.store.write(&logs)?;
        if registered {
            self.flush_revisions(&revisions)?;
        }

        info!(topic = %session.topic, hours = session.hours, registered, "Logged study session");
        Ok(LogOutcome {
            session,
            registered,
            item,
        })
    }

    /// Mark a tracked topic revised on `today` and persist the new schedule
    pub fn mark_revised(&mut self, topic: &str, today: NaiveDate) -> TrackerResult<RevisionItem> {
        debug!(%topic, %today, "Tracker::mark_revised: called");
        let mut revisions = self.load_revisions()?;
        let item = revisions.mark_revised(topic, today)?;
        self.flush_revisions(&revisions)?;
        Ok(item)
    }

    /// Topics due on or before `as_of`
    pub fn due(&self, as_of: NaiveDate) -> TrackerResult<Vec<RevisionItem>> {
        debug!(%as_of, "Tracker::due: called");
        Ok(self.load_revisions()?.due_items(as_of))
    }

    /// All tracked topics in stored order
    pub fn revisions(&self) -> TrackerResult<Vec<RevisionItem>> {
        Ok(self.load_revisions()?.into_items())
    }

    /// All logged sessions in stored order
    pub fn sessions(&self) -> TrackerResult<Vec<SessionLog>> {
        Ok(self.store.read::<SessionLog>()?)
    }

    pub fn stats(&self, as_of: NaiveDate) -> TrackerResult<TrackerStats> {
        debug!(%as_of, "Tracker::stats: called");
        let revisions = self.load_revisions()?;
        let logs = self.sessions()?;
        Ok(compute_stats(revisions.items(), &logs, as_of))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemoryStore, WorkType};
    use tablestore::JsonlStore;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::new(MemoryStore::new())
    }

    #[test]
    fn test_empty_store_queries() {
        let tracker = tracker();
        assert!(tracker.due(date("2026-02-08")).unwrap().is_empty());
        assert!(tracker.revisions().unwrap().is_empty());
        assert!(tracker.sessions().unwrap().is_empty());
    }

    #[test]
    fn test_log_session_registers_new_topic() {
        let mut tracker = tracker();
        let outcome = tracker
            .log_session(SessionLog::new(date("2026-02-08"), "Physics", "Vectors").with_hours(2.0))
            .unwrap();

        assert!(outcome.registered);
        assert_eq!(outcome.item.next_review, date("2026-02-09"));
        assert_eq!(outcome.item.iteration, 1);

        assert_eq!(tracker.sessions().unwrap().len(), 1);
        assert_eq!(tracker.revisions().unwrap(), vec![outcome.item]);
    }

    #[test]
    fn test_relogging_keeps_schedule() {
        let mut tracker = tracker();
        tracker
            .log_session(SessionLog::new(date("2026-02-08"), "Physics", "Vectors"))
            .unwrap();
        tracker.mark_revised("Vectors", date("2026-02-09")).unwrap();
        let before = tracker.revisions().unwrap();

        let outcome = tracker
            .log_session(
                SessionLog::new(date("2026-02-20"), "Physics", "Vectors").with_work_type(WorkType::Revision),
            )
            .unwrap();

        assert!(!outcome.registered);
        assert_eq!(tracker.revisions().unwrap(), before);
        assert_eq!(tracker.sessions().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_session_writes_nothing() {
        let mut tracker = tracker();
        let err = tracker
            .log_session(SessionLog::new(date("2026-02-08"), "Physics", "").with_hours(1.0))
            .unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));

        let err = tracker
            .log_session(SessionLog::new(date("2026-02-08"), "Physics", "SHM").with_hours(0.0))
            .unwrap_err();
        assert!(err.is_user_error());

        assert_eq!(tracker.store().row_count("Logs"), 0);
        assert_eq!(tracker.store().row_count("Revision"), 0);
    }

    #[test]
    fn test_mark_revised_persists() {
        let mut tracker = tracker();
        tracker
            .log_session(SessionLog::new(date("2026-02-08"), "Maths", "ITF"))
            .unwrap();

        tracker.mark_revised("ITF", date("2026-02-09")).unwrap();
        let item = tracker.mark_revised("ITF", date("2026-02-11")).unwrap();

        assert_eq!(item.next_review, date("2026-02-15"));
        assert_eq!(tracker.revisions().unwrap(), vec![item]);
    }

    #[test]
    fn test_mark_revised_missing_topic_writes_nothing() {
        let mut tracker = tracker();
        tracker
            .log_session(SessionLog::new(date("2026-02-08"), "Maths", "ITF"))
            .unwrap();
        let before = tracker.revisions().unwrap();

        let err = tracker.mark_revised("Limits", date("2026-02-09")).unwrap_err();

        assert!(matches!(err, TrackerError::Scheduler(SchedulerError::NotFound(_))));
        assert!(err.is_user_error());
        assert_eq!(tracker.revisions().unwrap(), before);
    }

    #[test]
    fn test_due_and_stats() {
        let mut tracker = tracker();
        tracker
            .log_session(SessionLog::new(date("2026-02-07"), "Physics", "SHM").with_hours(1.0))
            .unwrap();
        tracker
            .log_session(SessionLog::new(date("2026-02-08"), "Chemistry", "GOC").with_hours(2.5))
            .unwrap();

        let due: Vec<String> = tracker
            .due(date("2026-02-08"))
            .unwrap()
            .into_iter()
            .map(|i| i.topic)
            .collect();
        assert_eq!(due, vec!["SHM".to_string()]);

        let stats = tracker.stats(date("2026-02-08")).unwrap();
        assert_eq!(stats.total_topics, 2);
        assert_eq!(stats.due_topics, 1);
        assert_eq!(stats.pending_topics, 1);
        assert_eq!(stats.total_hours, 3.5);
        assert_eq!(stats.streak_days, 2);
    }

    #[test]
    fn test_corrupt_revision_table_is_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("Revision.jsonl"),
            concat!(
                r#"{"topic":"SHM","last_studied":"2026-02-01","next_review":"2026-02-02","iteration":1}"#,
                "\n",
                r#"{"topic":"SHM","last_studied":"2026-02-03","next_review":"2026-02-04","iteration":1}"#,
                "\n"
            ),
        )
        .unwrap();
        let tracker = Tracker::new(JsonlStore::open(temp.path()).unwrap());

        let err = tracker.due(date("2026-02-08")).unwrap_err();
        assert!(matches!(err, TrackerError::Scheduler(SchedulerError::Validation(_))));
    }

    #[test]
    fn test_state_survives_reopen() {
        let temp = TempDir::new().unwrap();
        {
            let mut tracker = Tracker::new(JsonlStore::open(temp.path()).unwrap());
            tracker
                .log_session(SessionLog::new(date("2026-02-08"), "Physics", "Fluids"))
                .unwrap();
            tracker.mark_revised("Fluids", date("2026-02-09")).unwrap();
        }

        let tracker = Tracker::new(JsonlStore::open(temp.path()).unwrap());
        let items = tracker.revisions().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].iteration, 2);
        assert_eq!(items[0].next_review, date("2026-02-11"));
        assert_eq!(tracker.sessions().unwrap().len(), 1);
    }
}
