//! Seam traits between the session engine and its collaborators.
//!
//! Storage and terminal I/O live behind these traits so the engine stays a
//! pure state machine and the tests can drive it with doubles.

use std::time::Duration;

use crate::error::{SessionError, StoreError};
use crate::model::{Answer, AttemptRecord, Problem};

/// Durable append-only log of attempt records, one log per user.
pub trait RecordStore {
    /// Load every historical record for `user`, oldest first.
    ///
    /// A user with no log yet gets an empty, correctly-headered log created
    /// as a side effect and an empty result. A log whose schema header does
    /// not match is rejected with [`StoreError::CorruptHeader`].
    fn load(&mut self, user: &str) -> Result<Vec<AttemptRecord>, StoreError>;

    /// Durably append `records` after all existing ones.
    ///
    /// Must never reorder or rewrite prior records, and must land the batch
    /// all-or-nothing: an interrupted append may lose the whole batch but
    /// never leaves a torn record behind.
    fn append(&mut self, user: &str, records: &[AttemptRecord]) -> Result<(), StoreError>;
}

/// One answered prompt: what the user typed and how long the read blocked.
#[derive(Debug, Clone, Copy)]
pub struct TimedAnswer {
    pub answer: Answer,
    pub elapsed: Duration,
}

/// The user-facing surface the engine drives.
///
/// Implementations own prompting, rendering, and wall-clock timing; the
/// per-trial elapsed time is exactly the duration of the blocking read.
pub trait TrialIo {
    /// Show one trial and block for the answer, timing the read.
    fn prompt_trial(
        &mut self,
        user: &str,
        trial: usize,
        total: usize,
        problem: &Problem,
    ) -> Result<TimedAnswer, SessionError>;

    /// Immediate feedback after grading, with the right answer on a miss.
    fn feedback(&mut self, correct: bool, expected: i64);

    /// End-of-round summary: the round's slowest records plus the score.
    fn round_summary(&mut self, slowest: &[AttemptRecord], correct_count: usize, trials: usize);

    /// Shown before an automatic retry under the strict policy.
    fn retry_notice(&mut self, correct_count: usize, goal: usize);

    /// Ask whether to play another round.
    fn confirm_continue(&mut self) -> Result<bool, SessionError>;
}
