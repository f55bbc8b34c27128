//! The `multidrill stats` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;
use serde::Serialize;

use multidrill_core::model::{AttemptRecord, Problem};
use multidrill_core::traits::RecordStore;
use multidrill_store::TextStore;

use crate::config::load_config_from;

/// Aggregates for one problem across a user's full history.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemStats {
    pub problem: String,
    pub attempts: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mean_secs: f64,
    pub worst_secs: f64,
}

pub fn execute(
    user: String,
    data_dir: Option<PathBuf>,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let data_dir = data_dir.unwrap_or(config.data_dir);

    let mut store = TextStore::new(&data_dir);
    let records = store.load(&user)?;
    let stats = aggregate(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if stats.is_empty() {
        println!("No attempts recorded for {user} yet.");
        return Ok(());
    }

    println!(
        "History for {user}: {} attempts across {} problems",
        records.len(),
        stats.len()
    );

    let mut table = Table::new();
    table.set_header(vec!["Problem", "Attempts", "Accuracy", "Mean", "Worst"]);
    for s in &stats {
        table.add_row(vec![
            s.problem.clone(),
            s.attempts.to_string(),
            format!("{:.0}%", s.accuracy * 100.0),
            format!("{:.2}s", s.mean_secs),
            format!("{:.2}s", s.worst_secs),
        ]);
    }
    println!("{table}");

    Ok(())
}

/// Per-problem aggregates, weakest first: lowest accuracy, then slowest
/// mean.
pub fn aggregate(records: &[AttemptRecord]) -> Vec<ProblemStats> {
    let mut grouped: HashMap<Problem, Vec<&AttemptRecord>> = HashMap::new();
    for record in records {
        grouped.entry(record.problem).or_default().push(record);
    }

    let mut stats: Vec<ProblemStats> = grouped
        .into_iter()
        .map(|(problem, attempts)| {
            let count = attempts.len();
            let correct = attempts.iter().filter(|r| r.correct).count();
            let mean_secs =
                attempts.iter().map(|r| r.elapsed_secs).sum::<f64>() / count as f64;
            let worst_secs = attempts
                .iter()
                .map(|r| r.elapsed_secs)
                .fold(0.0f64, f64::max);
            ProblemStats {
                problem: problem.to_string(),
                attempts: count,
                correct,
                accuracy: correct as f64 / count as f64,
                mean_secs,
                worst_secs,
            }
        })
        .collect();

    stats.sort_by(|x, y| {
        x.accuracy
            .total_cmp(&y.accuracy)
            .then(y.mean_secs.total_cmp(&x.mean_secs))
    });
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use multidrill_store::MemoryStore;

    fn record(problem: &str, elapsed_secs: f64, correct: bool) -> AttemptRecord {
        AttemptRecord {
            date: "2024-01-01".parse().unwrap(),
            problem: problem.parse().unwrap(),
            elapsed_secs,
            correct,
        }
    }

    #[test]
    fn aggregate_computes_per_problem_figures() {
        let records = vec![
            record("7x8", 2.0, true),
            record("7x8", 4.0, false),
            record("2x2", 1.0, true),
        ];

        let stats = aggregate(&records);
        assert_eq!(stats.len(), 2);

        let seven_eight = stats.iter().find(|s| s.problem == "7x8").unwrap();
        assert_eq!(seven_eight.attempts, 2);
        assert_eq!(seven_eight.correct, 1);
        assert!((seven_eight.accuracy - 0.5).abs() < f64::EPSILON);
        assert!((seven_eight.mean_secs - 3.0).abs() < f64::EPSILON);
        assert!((seven_eight.worst_secs - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_sorts_weakest_first() {
        let records = vec![
            record("2x2", 1.0, true),
            record("6x7", 3.0, false),
            record("9x9", 8.0, true),
            record("9x9", 2.0, true),
        ];

        let stats = aggregate(&records);
        assert_eq!(stats[0].problem, "6x7");
        // Among fully-correct problems the slower mean ranks first.
        assert_eq!(stats[1].problem, "9x9");
        assert_eq!(stats[2].problem, "2x2");
    }

    #[test]
    fn aggregate_empty_history() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn aggregate_over_store_history() {
        let mut store =
            MemoryStore::with_history("alice", vec![record("3x4", 2.0, false)]);
        let records = store.load("alice").unwrap();

        let stats = aggregate(&records);
        assert_eq!(stats[0].problem, "3x4");
        assert_eq!(stats[0].correct, 0);
    }
}
