//! In-memory record store for tests and tooling.

use std::collections::HashMap;

use multidrill_core::error::StoreError;
use multidrill_core::model::AttemptRecord;
use multidrill_core::traits::RecordStore;

/// A [`RecordStore`] double backed by a map, with append call counting so
/// tests can assert on batch granularity.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, Vec<AttemptRecord>>,
    append_calls: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with history for one user.
    pub fn with_history(user: &str, records: Vec<AttemptRecord>) -> Self {
        let mut store = Self::default();
        store.records.insert(user.to_string(), records);
        store
    }

    /// How many append batches have been written.
    pub fn append_calls(&self) -> u32 {
        self.append_calls
    }

    /// Everything stored for a user, oldest first.
    pub fn records_for(&self, user: &str) -> &[AttemptRecord] {
        self.records.get(user).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl RecordStore for MemoryStore {
    fn load(&mut self, user: &str) -> Result<Vec<AttemptRecord>, StoreError> {
        Ok(self.records.entry(user.to_string()).or_default().clone())
    }

    fn append(&mut self, user: &str, records: &[AttemptRecord]) -> Result<(), StoreError> {
        self.append_calls += 1;
        self.records
            .entry(user.to_string())
            .or_default()
            .extend_from_slice(records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multidrill_core::model::Problem;

    fn record(problem: &str, correct: bool) -> AttemptRecord {
        AttemptRecord {
            date: "2024-01-01".parse().unwrap(),
            problem: problem.parse().unwrap(),
            elapsed_secs: 1.0,
            correct,
        }
    }

    #[test]
    fn load_of_unknown_user_is_empty() {
        let mut store = MemoryStore::new();
        assert!(store.load("alice").unwrap().is_empty());
    }

    #[test]
    fn append_accumulates_and_counts_batches() {
        let mut store = MemoryStore::new();
        store.append("alice", &[record("2x2", true)]).unwrap();
        store
            .append("alice", &[record("3x3", false), record("4x4", true)])
            .unwrap();

        assert_eq!(store.append_calls(), 2);
        let loaded = store.load("alice").unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[1].problem, Problem::new(3, 3));
    }

    #[test]
    fn preloaded_history_is_returned() {
        let mut store = MemoryStore::with_history("alice", vec![record("6x7", true)]);
        assert_eq!(store.load("alice").unwrap().len(), 1);
        assert_eq!(store.records_for("bob"), &[]);
    }
}
