//! # divsel Core
//!
//! Core library for divsel, the diverse example selector.
//!
//! This crate provides the record-level building blocks:
//!
//! - [`flatten`] - Nested JSON record to a flat path → leaf map
//! - [`FlatRecord`] - The flattened view, ordered by path
//! - [`completeness`] - Fraction of a record's leaves holding a non-null value
//! - [`Error`] - Configuration and input-size errors raised by selection
//!
//! ## Example
//!
//! ```rust
//! use divsel_core::{flatten, completeness};
//! use serde_json::json;
//!
//! let record = json!({"id": 1, "user": {"name": "Ada", "email": null}});
//! let flat = flatten(&record);
//! assert_eq!(flat.len(), 3);
//! assert!(flat.contains_path("user.email"));
//!
//! assert!((completeness(&record) - 2.0 / 3.0).abs() < 1e-12);
//! ```

pub mod completeness;
pub mod error;
pub mod record;

pub use completeness::{completeness, completeness_of, completeness_with};
pub use error::{Error, Result};
pub use record::{flatten, flatten_with, FlatRecord, Leaf, SequenceMode};
