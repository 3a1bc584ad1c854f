//! # divsel Selector
//!
//! Greedy farthest-point selection of a diverse subset of JSON records.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Collection  │────>│   Sampler   │────>│   Greedy    │
//! │  (records)  │     │(working set)│     │  selector   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                           │       │
//!                                  ┌────────┘       └────────┐
//!                           ┌─────────────┐          ┌─────────────┐
//!                           │  Distance   │          │Completeness │
//!                           │  (+ cache)  │          │   scorer    │
//!                           └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use divsel_selector::{select_diverse_examples, SelectionOptions};
//! use serde_json::json;
//!
//! let items = vec![
//!     json!({"id": 1, "name": "John", "age": 25, "city": "NY"}),
//!     json!({"id": 2, "name": "Jane", "age": 30, "city": "LA"}),
//!     json!({"id": 3, "name": "Bob", "age": 25, "city": "NY"}),
//!     json!({"id": 4, "name": "Alice", "age": 35, "city": "SF"}),
//! ];
//!
//! let options = SelectionOptions::new(2).with_seed(42);
//! let picked = select_diverse_examples(&items, &options).unwrap();
//! assert_eq!(picked.len(), 2);
//! assert_ne!(picked[0]["id"], picked[1]["id"]);
//! ```

pub mod cache;
pub mod greedy;
pub mod options;
pub mod sampling;

pub use cache::{DistanceCache, DEFAULT_CACHE_ENTRIES};
pub use greedy::{
    select_diverse_examples,
    select_diverse_examples_with_rng,
    select_indices,
    select_indices_with_rng,
    Selection,
};
pub use options::{SelectionOptions, DEFAULT_COMPLETENESS_WEIGHT, DEFAULT_SAMPLE_SIZE};
pub use sampling::{sample_indices, SamplingStrategy, RESERVOIR_THRESHOLD};
