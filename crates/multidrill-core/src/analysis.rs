//! Session history analysis.
//!
//! Pure functions over the full record log. Empty input is valid input;
//! nothing here can fail.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{AttemptRecord, Problem};

/// Fraction of a record set considered "slow" by default.
pub const DEFAULT_SLOW_PERCENTILE: f64 = 0.3;

/// Correct attempts needed on one date for it to count as a completed
/// session.
pub const DEFAULT_SESSION_GOAL: usize = 10;

/// The most recent completed session: all correct records of the latest
/// date that accumulated at least `goal` correct attempts.
///
/// Returns an empty vec when no date qualifies. Records keep their original
/// relative order. ISO date ordering coincides with chronological ordering,
/// so "latest" is simply the maximum date.
pub fn last_complete_session(records: &[AttemptRecord], goal: usize) -> Vec<AttemptRecord> {
    let mut by_date: HashMap<NaiveDate, Vec<&AttemptRecord>> = HashMap::new();
    for record in records.iter().filter(|r| r.correct) {
        by_date.entry(record.date).or_default().push(record);
    }

    by_date
        .into_iter()
        .filter(|(_, day)| day.len() >= goal)
        .max_by_key(|(date, _)| *date)
        .map(|(_, day)| day.into_iter().cloned().collect())
        .unwrap_or_default()
}

/// The problems of the slowest `floor(len * percentile)` records.
///
/// Sorted by elapsed time descending; ties keep their original relative
/// order. Duplicates are preserved: the result is a multiset that drives
/// weighted random choice, not a deduplicated set.
pub fn slowest_fraction(records: &[AttemptRecord], percentile: f64) -> Vec<Problem> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut by_elapsed: Vec<&AttemptRecord> = records.iter().collect();
    by_elapsed.sort_by(|x, y| y.elapsed_secs.total_cmp(&x.elapsed_secs));

    let cutoff = (records.len() as f64 * percentile).floor() as usize;
    by_elapsed
        .into_iter()
        .take(cutoff)
        .map(|r| r.problem)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Problem;

    fn record(date: &str, problem: &str, elapsed_secs: f64, correct: bool) -> AttemptRecord {
        AttemptRecord {
            date: date.parse().unwrap(),
            problem: problem.parse().unwrap(),
            elapsed_secs,
            correct,
        }
    }

    #[test]
    fn last_complete_session_picks_latest_qualifying_date() {
        let mut records = Vec::new();
        for _ in 0..10 {
            records.push(record("2024-01-01", "2x2", 1.0, true));
        }
        for _ in 0..10 {
            records.push(record("2024-01-05", "3x3", 1.0, true));
        }
        // A later date that never reaches the goal.
        for _ in 0..9 {
            records.push(record("2024-01-07", "4x4", 1.0, true));
        }

        let session = last_complete_session(&records, 10);
        assert_eq!(session.len(), 10);
        assert!(session.iter().all(|r| r.date == "2024-01-05".parse().unwrap()));
    }

    #[test]
    fn last_complete_session_counts_only_correct_records() {
        let mut records = Vec::new();
        for _ in 0..9 {
            records.push(record("2024-01-01", "2x2", 1.0, true));
        }
        for _ in 0..5 {
            records.push(record("2024-01-01", "2x2", 1.0, false));
        }

        assert!(last_complete_session(&records, 10).is_empty());
    }

    #[test]
    fn last_complete_session_accumulates_across_one_date() {
        // Two imperfect rounds on the same date can jointly qualify it.
        let mut records = Vec::new();
        for _ in 0..6 {
            records.push(record("2024-01-01", "2x2", 1.0, true));
        }
        records.push(record("2024-01-01", "5x5", 1.0, false));
        for _ in 0..6 {
            records.push(record("2024-01-01", "3x3", 1.0, true));
        }

        let session = last_complete_session(&records, 10);
        assert_eq!(session.len(), 12);
        assert!(session.iter().all(|r| r.correct));
    }

    #[test]
    fn last_complete_session_empty_input() {
        assert!(last_complete_session(&[], 10).is_empty());
    }

    #[test]
    fn slowest_fraction_returns_floor_of_len_times_percentile() {
        let records: Vec<AttemptRecord> = (0..10)
            .map(|i| record("2024-01-01", "2x2", i as f64, true))
            .collect();

        assert_eq!(slowest_fraction(&records, 0.3).len(), 3);
        assert_eq!(slowest_fraction(&records, 0.35).len(), 3);
        assert_eq!(slowest_fraction(&records, 0.0).len(), 0);
        assert_eq!(slowest_fraction(&records, 1.0).len(), 10);
    }

    #[test]
    fn slowest_fraction_takes_highest_elapsed_first() {
        let records = vec![
            record("2024-01-01", "2x2", 1.0, true),
            record("2024-01-01", "3x4", 9.0, true),
            record("2024-01-01", "5x6", 4.0, true),
            record("2024-01-01", "7x8", 2.0, true),
        ];

        let slow = slowest_fraction(&records, 0.5);
        assert_eq!(
            slow,
            vec![Problem::new(3, 4), Problem::new(5, 6)]
        );
    }

    #[test]
    fn slowest_fraction_ties_keep_original_order() {
        // One 9.0s outlier among nine 1.0s ties: the cut of three is the
        // outlier plus the first two ties in their original order.
        let mut records = vec![record("2024-01-01", "3x4", 9.0, true)];
        let others = ["2x2", "2x3", "2x4", "2x5", "2x6", "2x7", "2x8", "2x9", "3x2"];
        for key in others {
            records.push(record("2024-01-01", key, 1.0, true));
        }

        let slow = slowest_fraction(&records, 0.3);
        assert_eq!(
            slow,
            vec![Problem::new(3, 4), Problem::new(2, 2), Problem::new(2, 3)]
        );
    }

    #[test]
    fn slowest_fraction_preserves_duplicates() {
        let records = vec![
            record("2024-01-01", "6x7", 8.0, true),
            record("2024-01-01", "6x7", 7.0, true),
            record("2024-01-01", "2x2", 1.0, true),
            record("2024-01-01", "2x3", 1.0, true),
        ];

        let slow = slowest_fraction(&records, 0.5);
        assert_eq!(slow, vec![Problem::new(6, 7), Problem::new(6, 7)]);
    }

    #[test]
    fn slowest_fraction_empty_input() {
        assert!(slowest_fraction(&[], 0.3).is_empty());
    }
}
