//! multidrill-store — durable per-user attempt logs.
//!
//! [`TextStore`] keeps one flat delimited file per user with a schema
//! header row; [`MemoryStore`] is an in-memory double for tests and
//! tooling. Both implement [`multidrill_core::traits::RecordStore`].

mod memory;

pub use memory::MemoryStore;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use multidrill_core::error::StoreError;
use multidrill_core::model::{AttemptRecord, Problem};
use multidrill_core::traits::RecordStore;

/// Schema header row. A store whose first line differs is rejected as
/// corrupt; no repair is ever attempted.
pub const HEADER: &str = "date,problem,elapsed,correct";

/// File-backed record store: one `<user>.csv` per user under a data
/// directory. Records are append-only; a batch is formatted into a single
/// buffer and written with one call, so an interrupted append can lose the
/// batch but never tears a record.
#[derive(Debug, Clone)]
pub struct TextStore {
    data_dir: PathBuf,
}

impl TextStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The backing file for a user. Callers validate the username charset
    /// before the store is touched, so this is always one path component.
    pub fn user_path(&self, user: &str) -> PathBuf {
        self.data_dir.join(format!("{user}.csv"))
    }

    fn ensure_headered(&self, user: &str) -> Result<PathBuf, StoreError> {
        let path = self.user_path(user);
        if !path.exists() {
            fs::create_dir_all(&self.data_dir)?;
            fs::write(&path, format!("{HEADER}\n"))?;
            tracing::debug!(path = %path.display(), "created empty record store");
        }
        Ok(path)
    }
}

impl RecordStore for TextStore {
    fn load(&mut self, user: &str) -> Result<Vec<AttemptRecord>, StoreError> {
        let path = self.ensure_headered(user)?;
        let content = fs::read_to_string(&path)?;

        let mut lines = content.lines().enumerate();
        let header = lines.next().map(|(_, line)| line).unwrap_or_default();
        if header != HEADER {
            return Err(StoreError::CorruptHeader {
                path,
                expected: HEADER.to_string(),
                found: header.to_string(),
            });
        }

        let mut records = Vec::new();
        for (idx, line) in lines {
            if line.is_empty() {
                continue;
            }
            let record = parse_record(line).map_err(|reason| StoreError::MalformedRecord {
                path: path.clone(),
                line: idx + 1,
                reason,
            })?;
            records.push(record);
        }

        tracing::debug!(count = records.len(), user, "loaded records");
        Ok(records)
    }

    fn append(&mut self, user: &str, records: &[AttemptRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let path = self.ensure_headered(user)?;

        let mut buf = String::new();
        for record in records {
            buf.push_str(&format_record(record));
        }

        let mut file = OpenOptions::new().append(true).open(&path)?;
        file.write_all(buf.as_bytes())?;
        file.flush()?;

        tracing::debug!(count = records.len(), path = %path.display(), "appended batch");
        Ok(())
    }
}

/// One record as a store line, trailing newline included. Elapsed uses
/// Rust's shortest-roundtrip float formatting so a reload reparses the
/// identical value.
fn format_record(record: &AttemptRecord) -> String {
    let correct = if record.correct { "True" } else { "False" };
    format!(
        "{},{},{},{}\n",
        record.date, record.problem, record.elapsed_secs, correct
    )
}

fn parse_record(line: &str) -> Result<AttemptRecord, String> {
    let mut fields = line.split(',');
    let date = fields.next().ok_or("missing date field")?;
    let problem = fields.next().ok_or("missing problem field")?;
    let elapsed = fields.next().ok_or("missing elapsed field")?;
    let correct = fields.next().ok_or("missing correct field")?;
    if fields.next().is_some() {
        return Err("too many fields".to_string());
    }

    let date = date
        .parse()
        .map_err(|_| format!("invalid date `{date}`"))?;
    let problem: Problem = problem.parse()?;
    let elapsed_secs: f64 = elapsed
        .parse()
        .map_err(|_| format!("invalid elapsed `{elapsed}`"))?;
    if elapsed_secs < 0.0 {
        return Err(format!("negative elapsed `{elapsed}`"));
    }
    let correct = match correct {
        "True" => true,
        "False" => false,
        other => return Err(format!("invalid correct flag `{other}`")),
    };

    Ok(AttemptRecord {
        date,
        problem,
        elapsed_secs,
        correct,
    })
}
