//! Console implementation of the engine's trial surface.
//!
//! Owns all prompting, rendering, and wall-clock timing: a trial's elapsed
//! time is exactly how long the blocking stdin read took.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use comfy_table::Table;

use multidrill_core::error::SessionError;
use multidrill_core::model::{Answer, AttemptRecord, Problem};
use multidrill_core::traits::{TimedAnswer, TrialIo};

/// Prompt for a username. Returns an empty string when stdin closes first,
/// which the caller treats the same as an empty answer.
pub fn prompt_username() -> io::Result<String> {
    print!("Enter your username: ");
    io::stdout().flush()?;
    match read_line()? {
        Some(line) => Ok(line),
        None => Ok(String::new()),
    }
}

/// Read one trimmed line; `None` when stdin is closed.
fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Drives prompts, feedback, and timing over stdin/stdout.
pub struct ConsoleIo {
    /// Pause after feedback so the answer is readable before the next
    /// clear.
    feedback_pause: Duration,
}

impl ConsoleIo {
    pub fn new() -> Self {
        Self {
            feedback_pause: Duration::from_secs(1),
        }
    }

    fn clear_screen(&self) {
        // ANSI terminal reset.
        print!("\x1bc");
        let _ = io::stdout().flush();
    }
}

impl Default for ConsoleIo {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialIo for ConsoleIo {
    fn prompt_trial(
        &mut self,
        user: &str,
        trial: usize,
        total: usize,
        problem: &Problem,
    ) -> Result<TimedAnswer, SessionError> {
        self.clear_screen();
        println!("User: {user} | Trial {trial}/{total}");
        println!("Solve: {problem}");
        print!("Your answer: ");
        io::stdout().flush().map_err(SessionError::Terminal)?;

        let started = Instant::now();
        let line = read_line().map_err(SessionError::Terminal)?;
        let elapsed = started.elapsed();

        let Some(line) = line else {
            return Err(SessionError::InputClosed);
        };
        Ok(TimedAnswer {
            answer: Answer::parse(&line),
            elapsed,
        })
    }

    fn feedback(&mut self, correct: bool, expected: i64) {
        if correct {
            println!("Correct!");
        } else {
            println!("Wrong! The correct answer is {expected}.");
        }
        thread::sleep(self.feedback_pause);
    }

    fn round_summary(&mut self, slowest: &[AttemptRecord], correct_count: usize, trials: usize) {
        self.clear_screen();
        println!("Session complete! Score: {correct_count}/{trials}");
        println!("Here are your {} slowest responses:", slowest.len());

        let mut table = Table::new();
        table.set_header(vec!["#", "Problem", "Time"]);
        for (i, record) in slowest.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                record.problem.to_string(),
                format!("{:.2}s", record.elapsed_secs),
            ]);
        }
        println!("{table}");
    }

    fn retry_notice(&mut self, correct_count: usize, goal: usize) {
        println!("\nOnly {correct_count}/{goal} correct. Going again with the same focus.");
        thread::sleep(self.feedback_pause);
    }

    fn confirm_continue(&mut self) -> Result<bool, SessionError> {
        print!("\nDo you want to continue for another round? (yes/no): ");
        io::stdout().flush().map_err(SessionError::Terminal)?;
        match read_line().map_err(SessionError::Terminal)? {
            Some(line) => Ok(line.eq_ignore_ascii_case("yes")),
            // Stdin closing at this prompt is a decline; the round is
            // already persisted.
            None => Ok(false),
        }
    }
}
