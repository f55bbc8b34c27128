//! Error taxonomy for the store and the session engine.
//!
//! Defined in `multidrill-core` so the engine and the CLI can classify
//! failures without string matching. Ungradable user input is never an
//! error: it parses to [`crate::model::Answer::Unparseable`] and grades
//! incorrect.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the durable record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted header row does not match the expected schema.
    /// Fatal on load; never auto-repaired.
    #[error("record store {path} is corrupt: expected header `{expected}`, found `{found}`")]
    CorruptHeader {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// A data row could not be parsed back into an attempt record.
    #[error("record store {path} is corrupt at line {line}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// An underlying filesystem operation failed.
    #[error("record store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a practice run.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The resolved username was empty. Fatal, user-facing, clean exit.
    #[error("username cannot be empty")]
    EmptyUsername,

    /// The configured factor range produced an empty problem pool.
    #[error("factor range yields no problems to drill")]
    EmptyPool,

    /// Stdin closed before the round finished. The unfinished round's
    /// records are discarded; prior rounds are already durable.
    #[error("input stream closed before the round finished")]
    InputClosed,

    /// Terminal I/O failed outside of a normal end-of-input.
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    /// The record store failed; see [`StoreError`].
    #[error(transparent)]
    Store(#[from] StoreError),
}
