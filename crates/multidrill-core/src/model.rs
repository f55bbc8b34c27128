//! Core data model types for multidrill.
//!
//! These are the fundamental types the whole system works with: drill
//! problems, the factor range they are drawn from, graded attempt records,
//! and the tagged result of parsing a user's answer.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single multiplication problem: an ordered pair of factors.
///
/// `2x3` and `3x2` are distinct problems; no canonicalization collapses a
/// problem with its commutative twin, so each is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Problem {
    pub a: u8,
    pub b: u8,
}

impl Problem {
    pub fn new(a: u8, b: u8) -> Self {
        Self { a, b }
    }

    /// The exact product, used as grading ground truth.
    pub fn answer(&self) -> i64 {
        i64::from(self.a) * i64::from(self.b)
    }
}

impl fmt::Display for Problem {
    /// Canonical key form, e.g. `7x8`. Also the persisted representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.a, self.b)
    }
}

impl FromStr for Problem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('x')
            .ok_or_else(|| format!("invalid problem key `{s}`"))?;
        let a = a
            .parse::<u8>()
            .map_err(|_| format!("invalid factor `{a}` in `{s}`"))?;
        let b = b
            .parse::<u8>()
            .map_err(|_| format!("invalid factor `{b}` in `{s}`"))?;
        Ok(Problem { a, b })
    }
}

/// Inclusive range of factors a drill draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorRange {
    pub min: u8,
    pub max: u8,
}

impl FactorRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// The full universe of problems: the Cartesian product of the range
    /// with itself, ordered pairs kept distinct.
    pub fn full_pool(&self) -> Vec<Problem> {
        let mut pool = Vec::new();
        for a in self.min..=self.max {
            for b in self.min..=self.max {
                pool.push(Problem::new(a, b));
            }
        }
        pool
    }
}

impl Default for FactorRange {
    /// 2..=9: the x1/x10 facts are too easy to be worth drilling.
    fn default() -> Self {
        Self { min: 2, max: 9 }
    }
}

/// One graded, timed trial. Immutable once created; batched to the store
/// at end of round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Calendar date the trial was answered on.
    pub date: NaiveDate,
    pub problem: Problem,
    /// How long the answer took, in seconds. Never negative.
    pub elapsed_secs: f64,
    pub correct: bool,
}

/// The result of parsing a user's typed answer.
///
/// Parsing is total: input that is not an integer becomes `Unparseable`,
/// which grades incorrect against every problem. A parse failure is a
/// graded outcome, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Value(i64),
    Unparseable,
}

impl Answer {
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(v) => Answer::Value(v),
            Err(_) => Answer::Unparseable,
        }
    }

    /// Grade against a problem by exact equality.
    pub fn grades_correct(&self, problem: &Problem) -> bool {
        matches!(self, Answer::Value(v) if *v == problem.answer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_display_and_parse() {
        let p = Problem::new(7, 8);
        assert_eq!(p.to_string(), "7x8");
        assert_eq!("7x8".parse::<Problem>().unwrap(), p);
        assert_eq!("2x12".parse::<Problem>().unwrap(), Problem::new(2, 12));
        assert!("7*8".parse::<Problem>().is_err());
        assert!("x8".parse::<Problem>().is_err());
        assert!("7x".parse::<Problem>().is_err());
    }

    #[test]
    fn problem_is_ordered_pair() {
        assert_ne!(Problem::new(2, 3), Problem::new(3, 2));
        assert_eq!(Problem::new(2, 3).answer(), Problem::new(3, 2).answer());
    }

    #[test]
    fn full_pool_is_cartesian_product() {
        let pool = FactorRange::default().full_pool();
        assert_eq!(pool.len(), 64);
        assert_eq!(pool[0], Problem::new(2, 2));
        assert_eq!(pool[63], Problem::new(9, 9));
        assert!(pool.contains(&Problem::new(2, 9)));
        assert!(pool.contains(&Problem::new(9, 2)));
    }

    #[test]
    fn full_pool_single_factor() {
        let pool = FactorRange::new(4, 4).full_pool();
        assert_eq!(pool, vec![Problem::new(4, 4)]);
    }

    #[test]
    fn full_pool_inverted_range_is_empty() {
        assert!(FactorRange::new(9, 2).full_pool().is_empty());
    }

    #[test]
    fn answer_parse_is_total() {
        assert_eq!(Answer::parse("56"), Answer::Value(56));
        assert_eq!(Answer::parse("  56  "), Answer::Value(56));
        assert_eq!(Answer::parse("-3"), Answer::Value(-3));
        assert_eq!(Answer::parse("abc"), Answer::Unparseable);
        assert_eq!(Answer::parse(""), Answer::Unparseable);
        assert_eq!(Answer::parse("5 6"), Answer::Unparseable);
    }

    #[test]
    fn grading_by_exact_equality() {
        let p = Problem::new(7, 8);
        assert!(Answer::parse("56").grades_correct(&p));
        assert!(!Answer::parse("55").grades_correct(&p));
        assert!(!Answer::parse("abc").grades_correct(&p));
        // Unparseable can never equal a true product, even 0x0.
        assert!(!Answer::Unparseable.grades_correct(&Problem::new(0, 0)));
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = AttemptRecord {
            date: "2024-01-01".parse().unwrap(),
            problem: Problem::new(3, 4),
            elapsed_secs: 2.25,
            correct: true,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: AttemptRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
