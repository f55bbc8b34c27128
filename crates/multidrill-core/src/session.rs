//! The session engine: drives rounds of timed, graded trials.
//!
//! The runner owns no I/O and no clock. It draws problems from the pool
//! derived for each round, asks the [`TrialIo`] for one timed answer per
//! trial, grades by exact equality, batches the round's records to the
//! store in a single append, and applies the continuation policy.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::analysis::{last_complete_session, DEFAULT_SESSION_GOAL, DEFAULT_SLOW_PERCENTILE};
use crate::error::SessionError;
use crate::model::{AttemptRecord, FactorRange, Problem};
use crate::select::select_pool;
use crate::traits::{RecordStore, TrialIo};

/// Trials per round.
pub const DEFAULT_TRIALS_PER_ROUND: usize = 10;

/// How the runner decides between another round and the continue prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuePolicy {
    /// A round below the session goal loops again immediately; the
    /// continue prompt is only offered after a fully-correct round.
    Strict,
    /// Prompt after every round.
    AlwaysPrompt,
}

/// Configuration for a practice run.
///
/// Under [`ContinuePolicy::Strict`] the goal must not exceed
/// `trials_per_round`, or no round can ever qualify.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub trials_per_round: usize,
    /// Correct answers required for a round (and a date) to qualify.
    pub session_goal: usize,
    /// Fraction of the basis considered slow when no wrong answers exist.
    pub slow_percentile: f64,
    pub factors: FactorRange,
    pub policy: ContinuePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            trials_per_round: DEFAULT_TRIALS_PER_ROUND,
            session_goal: DEFAULT_SESSION_GOAL,
            slow_percentile: DEFAULT_SLOW_PERCENTILE,
            factors: FactorRange::default(),
            policy: ContinuePolicy::Strict,
        }
    }
}

/// Totals across one practice run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rounds: usize,
    pub trials: usize,
    pub correct: usize,
}

/// Drives one practice run for one user.
///
/// All state is explicit: the store handle, the I/O surface, the rng, and
/// the in-memory history accumulated over the run.
pub struct SessionRunner<'a, S, IO, R> {
    store: &'a mut S,
    io: &'a mut IO,
    rng: R,
    config: SessionConfig,
}

impl<'a, S: RecordStore, IO: TrialIo, R: Rng> SessionRunner<'a, S, IO, R> {
    pub fn new(store: &'a mut S, io: &'a mut IO, rng: R, config: SessionConfig) -> Self {
        Self {
            store,
            io,
            rng,
            config,
        }
    }

    /// Run rounds until the user declines to continue after a qualifying
    /// round.
    ///
    /// Each round re-derives its pool from the full history, including
    /// rounds played earlier in this run. The round's batch is appended to
    /// the store in one call before any continuation decision.
    pub fn run(&mut self, user: &str, today: NaiveDate) -> Result<RunSummary, SessionError> {
        if user.trim().is_empty() {
            return Err(SessionError::EmptyUsername);
        }

        let full_pool = self.config.factors.full_pool();
        if full_pool.is_empty() {
            return Err(SessionError::EmptyPool);
        }

        let mut history = self.store.load(user)?;
        let mut summary = RunSummary::default();

        loop {
            let basis = last_complete_session(&history, self.config.session_goal);
            let pool = select_pool(&basis, &full_pool, self.config.slow_percentile);
            tracing::debug!(
                pool_size = pool.len(),
                weighted = !basis.is_empty(),
                "derived round pool"
            );

            let batch = self.run_round(user, &pool, today)?;
            self.store.append(user, &batch)?;

            let correct_count = batch.iter().filter(|r| r.correct).count();
            summary.rounds += 1;
            summary.trials += batch.len();
            summary.correct += correct_count;

            let slowest = round_slowest(&batch, 3);
            self.io
                .round_summary(&slowest, correct_count, batch.len());
            history.extend(batch);

            if self.config.policy == ContinuePolicy::Strict
                && correct_count < self.config.session_goal
            {
                tracing::info!(correct_count, goal = self.config.session_goal, "round below goal, retrying");
                self.io.retry_notice(correct_count, self.config.session_goal);
                continue;
            }

            if !self.io.confirm_continue()? {
                break;
            }
        }

        Ok(summary)
    }

    fn run_round(
        &mut self,
        user: &str,
        pool: &[Problem],
        today: NaiveDate,
    ) -> Result<Vec<AttemptRecord>, SessionError> {
        let mut batch = Vec::with_capacity(self.config.trials_per_round);

        for trial in 1..=self.config.trials_per_round {
            let Some(&problem) = pool.choose(&mut self.rng) else {
                return Err(SessionError::EmptyPool);
            };

            let timed =
                self.io
                    .prompt_trial(user, trial, self.config.trials_per_round, &problem)?;
            let correct = timed.answer.grades_correct(&problem);
            self.io.feedback(correct, problem.answer());

            batch.push(AttemptRecord {
                date: today,
                problem,
                elapsed_secs: timed.elapsed.as_secs_f64(),
                correct,
            });
        }

        Ok(batch)
    }
}

/// The round's slowest records, longest first, at most `take` of them.
fn round_slowest(batch: &[AttemptRecord], take: usize) -> Vec<AttemptRecord> {
    let mut sorted = batch.to_vec();
    sorted.sort_by(|x, y| y.elapsed_secs.total_cmp(&x.elapsed_secs));
    sorted.truncate(take);
    sorted
}
