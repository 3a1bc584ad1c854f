//! # divsel
//!
//! Pick a diverse, optionally completeness-weighted subset of JSON records.
//!
//! divsel builds representative samples for testing, training or manual
//! review. Records may be arbitrarily nested and need not share a schema.
//!
//! ## How it works
//!
//! 1. Oversized collections are reduced to a working set (shuffle or
//!    reservoir sampling, depending on size)
//! 2. An initial record is picked: the most complete one, or a random one
//! 3. The record farthest from its nearest already-selected neighbour is
//!    added, until `num_examples` records are chosen
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install divsel
//! divsel data.json --num-examples 10 --prioritize-complete --key-path response.items
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use divsel::prelude::*;
//! use serde_json::json;
//!
//! let items = vec![
//!     json!({"id": 1, "name": "John", "age": 25, "city": "NY"}),
//!     json!({"id": 2, "name": "Jane", "age": 30, "city": "LA"}),
//!     json!({"id": 3, "name": "Bob", "age": 25, "city": "NY"}),
//!     json!({"id": 4, "name": "Alice", "age": 35, "city": "SF"}),
//! ];
//!
//! let options = SelectionOptions::new(2)
//!     .with_prioritize_complete(true)
//!     .with_seed(7);
//! let picked = select_diverse_examples(&items, &options).unwrap();
//! assert_eq!(picked.len(), 2);
//!
//! assert_eq!(default_distance(&items[0], &items[0]), 0.0);
//! assert_eq!(completeness(&items[0]), 1.0);
//! ```
//!
//! ## Crate Structure
//!
//! - [`divsel-core`](https://docs.rs/divsel-core) - Flattening, completeness, errors
//! - [`divsel-similarity`](https://docs.rs/divsel-similarity) - Record distance metric
//! - [`divsel-selector`](https://docs.rs/divsel-selector) - Sampling and greedy selection

pub mod input;
pub mod output;

// Re-export core types
pub use divsel_core::{
    completeness, completeness_of, completeness_with,
    flatten, flatten_with,
    FlatRecord, Leaf, SequenceMode,
    Error, Result,
};

// Re-export similarity
pub use divsel_similarity::{default_distance, DistanceFunction, RecordDistance};

// Re-export selector
pub use divsel_selector::{
    select_diverse_examples, select_diverse_examples_with_rng,
    select_indices, select_indices_with_rng,
    sample_indices, SamplingStrategy,
    Selection, SelectionOptions,
    DEFAULT_COMPLETENESS_WEIGHT, DEFAULT_SAMPLE_SIZE,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        completeness, default_distance, flatten,
        select_diverse_examples, select_indices,
        DistanceFunction, RecordDistance,
        Selection, SelectionOptions, SequenceMode,
        Error, Result,
    };
}
