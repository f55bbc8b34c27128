//! Problem pool selection.
//!
//! Turns the analysis basis into the weighted pool the next round draws
//! from. The pool is a multiset: duplicates encode weight, and the round
//! draws uniformly with replacement, so repeated entries bias the draw
//! without explicit weight fields.

use crate::analysis::slowest_fraction;
use crate::model::{AttemptRecord, Problem};

/// Select the candidate pool for the next round.
///
/// Priority order:
/// 1. No basis (no prior qualifying session): the full pool, uniform.
/// 2. Problems answered incorrectly in the basis, with multiplicity. A
///    wrong answer is a stronger signal than a merely slow correct one, so
///    incorrectness dominates slowness outright rather than blending.
/// 3. The slowest fraction of the basis; if even that is empty (the basis
///    is too small for the percentile cut), the full pool again.
///
/// Never returns an empty pool as long as `full_pool` is non-empty.
pub fn select_pool(
    basis: &[AttemptRecord],
    full_pool: &[Problem],
    percentile: f64,
) -> Vec<Problem> {
    if basis.is_empty() {
        return full_pool.to_vec();
    }

    let incorrect: Vec<Problem> = basis
        .iter()
        .filter(|r| !r.correct)
        .map(|r| r.problem)
        .collect();
    if !incorrect.is_empty() {
        return incorrect;
    }

    let slow = slowest_fraction(basis, percentile);
    if slow.is_empty() {
        full_pool.to_vec()
    } else {
        slow
    }
}
