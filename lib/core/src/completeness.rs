//! Completeness scoring
//!
//! The completeness of a record is the fraction of its flattened leaves that
//! carry a value other than null. A record with no leaves scores 0.

use crate::record::{flatten_with, FlatRecord, SequenceMode};
use serde_json::Value;

/// Completeness of a record in [0.0, 1.0]
pub fn completeness(record: &Value) -> f64 {
    completeness_with(record, SequenceMode::Positional)
}

/// Completeness of a record flattened with the given sequence handling
pub fn completeness_with(record: &Value, mode: SequenceMode) -> f64 {
    completeness_of(&flatten_with(record, mode))
}

/// Completeness of an already flattened record
pub fn completeness_of(flat: &FlatRecord<'_>) -> f64 {
    if flat.is_empty() {
        return 0.0;
    }
    flat.defined_count() as f64 / flat.len() as f64
}
