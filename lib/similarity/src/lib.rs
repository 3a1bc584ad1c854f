//! # divsel Similarity
//!
//! A normalized distance metric for arbitrarily shaped JSON records.
//!
//! Records are flattened into dot-path leaves and compared path by path.
//! The result is a symmetric dissimilarity in [0.0, 1.0].
//!
//! ## Example
//!
//! ```rust
//! use divsel_similarity::{default_distance, DistanceFunction, RecordDistance};
//! use divsel_core::SequenceMode;
//! use serde_json::json;
//!
//! let a = json!({"a": 1, "b": "test"});
//! assert_eq!(default_distance(&a, &a), 0.0);
//!
//! let b = json!({"a": 1});
//! let d = default_distance(&a, &b);
//! assert!(d > 0.0 && d <= 1.0);
//!
//! // Compare sequences by element count instead of by position
//! let metric = RecordDistance::new(SequenceMode::Length);
//! let x = json!({"tags": ["x", "y"]});
//! let y = json!({"tags": ["y", "x"]});
//! assert_eq!(metric.distance(&x, &y), 0.0);
//! ```

pub mod distance;

pub use distance::{
    default_distance,
    jaccard_distance,
    leaf_distance,
    relative_number_distance,
    DistanceFunction,
    RecordDistance,
};
