//! Distance functions for nested records
//!
//! All functions return a distance in range [0.0, 1.0] where 0.0 means identical.

use divsel_core::{flatten_with, FlatRecord, Leaf, SequenceMode};
use serde_json::Value;
use std::collections::BTreeSet;

/// Penalty added for a path present in only one of the two records
const MISSING_PATH_PENALTY: f64 = 1.0;

/// A dissimilarity measure between two records
///
/// Implementations should return a value in [0.0, 1.0] and are expected to
/// be symmetric. Neither property is enforced by the selector.
///
/// Any `Fn(&Value, &Value) -> f64` closure that is `Send + Sync` implements
/// this trait.
pub trait DistanceFunction: Send + Sync {
    fn distance(&self, a: &Value, b: &Value) -> f64;
}

impl<F> DistanceFunction for F
where
    F: Fn(&Value, &Value) -> f64 + Send + Sync,
{
    fn distance(&self, a: &Value, b: &Value) -> f64 {
        self(a, b)
    }
}

/// The default record distance
///
/// Averages a per-path disagreement over the union of flattened paths:
/// - path missing on one side: 1.0
/// - both numeric: `min(1, |a - b| / max(|a|, |b|))`, 0.0 when both are zero
/// - sequences collapsed to member sets: Jaccard distance
/// - anything else: 0.0 if equal, 1.0 otherwise
///
/// If no path exists on both sides the records share nothing comparable and
/// the distance is 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordDistance {
    sequence_mode: SequenceMode,
}

impl RecordDistance {
    pub fn new(sequence_mode: SequenceMode) -> Self {
        Self { sequence_mode }
    }

    pub fn sequence_mode(&self) -> SequenceMode {
        self.sequence_mode
    }

    /// Distance between two records flattened with this metric's sequence mode
    pub fn distance_flat(&self, a: &FlatRecord<'_>, b: &FlatRecord<'_>) -> f64 {
        // sorted union keeps the summation order identical in both directions
        let paths: BTreeSet<&String> = a.paths().chain(b.paths()).collect();

        let mut total = 0.0;
        let mut compared = 0usize;
        for path in &paths {
            match (a.get(path), b.get(path)) {
                (Some(left), Some(right)) => {
                    total += leaf_distance(left, right);
                    compared += 1;
                }
                _ => total += MISSING_PATH_PENALTY,
            }
        }

        if compared == 0 {
            return 1.0;
        }
        total / paths.len() as f64
    }
}

impl DistanceFunction for RecordDistance {
    fn distance(&self, a: &Value, b: &Value) -> f64 {
        self.distance_flat(
            &flatten_with(a, self.sequence_mode),
            &flatten_with(b, self.sequence_mode),
        )
    }
}

/// Distance between two records using positional sequence handling
pub fn default_distance(a: &Value, b: &Value) -> f64 {
    RecordDistance::default().distance(a, b)
}

/// Disagreement between two leaves found at the same path
pub fn leaf_distance<'a>(a: &Leaf<'a>, b: &Leaf<'a>) -> f64 {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return relative_number_distance(x, y);
    }
    match (a, b) {
        (Leaf::Members(x), Leaf::Members(y)) => jaccard_distance(x, y),
        _ => {
            if a == b {
                0.0
            } else {
                1.0
            }
        }
    }
}

/// Relative distance between two numbers: `|a - b| / max(|a|, |b|)`, capped at 1.0
pub fn relative_number_distance(a: f64, b: f64) -> f64 {
    let max = a.abs().max(b.abs());
    if max == 0.0 {
        0.0 // Both are zero
    } else {
        ((a - b).abs() / max).min(1.0)
    }
}

/// Jaccard distance between two sets, 0.0 when both are empty
pub fn jaccard_distance(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    1.0 - intersection as f64 / union as f64
}
