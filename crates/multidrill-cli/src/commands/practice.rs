//! The `multidrill practice` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use multidrill_core::error::SessionError;
use multidrill_core::model::FactorRange;
use multidrill_core::session::{ContinuePolicy, SessionConfig, SessionRunner};
use multidrill_store::TextStore;

use crate::config::load_config_from;
use crate::console::{self, ConsoleIo};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    user: Option<String>,
    data_dir: Option<PathBuf>,
    trials: Option<usize>,
    min_factor: Option<u8>,
    max_factor: Option<u8>,
    percentile: Option<f64>,
    always_prompt: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let data_dir = data_dir.unwrap_or(config.data_dir);
    let trials = trials.unwrap_or(config.trials_per_round);
    let min_factor = min_factor.unwrap_or(config.min_factor);
    let max_factor = max_factor.unwrap_or(config.max_factor);
    let percentile = percentile.unwrap_or(config.slow_percentile);

    anyhow::ensure!(trials >= 1, "trials must be at least 1");
    anyhow::ensure!(
        min_factor <= max_factor,
        "min factor must not exceed max factor"
    );
    anyhow::ensure!(
        (0.0..=1.0).contains(&percentile),
        "percentile must be between 0.0 and 1.0"
    );

    println!("Welcome to multidrill!\n");

    let username = match user {
        Some(u) => u.trim().to_string(),
        None => console::prompt_username()?,
    };
    if username.is_empty() {
        println!("Username cannot be empty. Exiting.");
        return Ok(());
    }
    anyhow::ensure!(
        username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
        "username may only contain letters, digits, '-' and '_'"
    );

    let session_config = SessionConfig {
        trials_per_round: trials,
        // A qualifying round is a fully-correct round.
        session_goal: trials,
        slow_percentile: percentile,
        factors: FactorRange::new(min_factor, max_factor),
        policy: if always_prompt {
            ContinuePolicy::AlwaysPrompt
        } else {
            ContinuePolicy::Strict
        },
    };

    let mut store = TextStore::new(&data_dir);
    let mut io = ConsoleIo::new();
    let mut runner = SessionRunner::new(&mut store, &mut io, rand::thread_rng(), session_config);
    let today = Local::now().date_naive();

    match runner.run(&username, today) {
        Ok(summary) => {
            println!(
                "\nThanks for practicing, {username}! {} correct out of {} trials. Goodbye!",
                summary.correct, summary.trials
            );
            Ok(())
        }
        Err(SessionError::EmptyUsername) => {
            println!("Username cannot be empty. Exiting.");
            Ok(())
        }
        Err(SessionError::InputClosed) => {
            println!("\nInput closed. Unfinished round discarded. Goodbye!");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
