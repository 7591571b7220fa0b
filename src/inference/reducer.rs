//! Majority vote over per-location class predictions.

use super::{ClassIndex, RawPrediction};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Reduce a raw prediction to the most frequent class index.
///
/// Ties go to the smallest index.
pub fn reduce(prediction: &RawPrediction) -> Result<ClassIndex> {
    let mut frequency: BTreeMap<i64, usize> = BTreeMap::new();
    for value in prediction.flatten() {
        *frequency.entry(value).or_insert(0) += 1;
    }

    // BTreeMap iterates keys ascending, so keeping only strictly greater
    // counts leaves the smallest key among the tied maxima.
    let mut winner: Option<(i64, usize)> = None;
    for (&value, &count) in &frequency {
        if winner.is_none_or(|(_, best)| count > best) {
            winner = Some((value, count));
        }
    }

    let (value, count) = winner.ok_or(Error::EmptyPrediction)?;
    debug!(
        "Vote: class {} with {}/{} votes across {} distinct classes",
        value,
        count,
        prediction.len(),
        frequency.len()
    );
    Ok(ClassIndex(value))
}
