//! Record flattening
//!
//! Turns an arbitrarily nested JSON record into a single-level map from
//! dot-joined paths to scalar leaves. Both the distance metric and the
//! completeness scorer work on this flat view.

use serde::Serialize;
use serde_json::Value;
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// How nested sequences are represented in a flattened record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceMode {
    /// Expand like an object, using the element index as the path segment
    #[default]
    Positional,
    /// Collapse to one leaf holding the element count
    Length,
    /// Collapse to one leaf holding the set of elements (canonical JSON text)
    Members,
}

impl FromStr for SequenceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positional" => Ok(SequenceMode::Positional),
            "length" => Ok(SequenceMode::Length),
            "members" => Ok(SequenceMode::Members),
            other => Err(format!(
                "unknown sequence mode '{}' (expected positional, length or members)",
                other
            )),
        }
    }
}

impl fmt::Display for SequenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceMode::Positional => write!(f, "positional"),
            SequenceMode::Length => write!(f, "length"),
            SequenceMode::Members => write!(f, "members"),
        }
    }
}

/// A scalar leaf of a flattened record
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf<'a> {
    /// A JSON scalar borrowed from the record (null included)
    Value(&'a Value),
    /// Element count of a collapsed sequence
    Length(usize),
    /// Element set of a collapsed sequence
    Members(BTreeSet<String>),
}

impl<'a> Leaf<'a> {
    /// False only for an explicit null
    pub fn is_defined(&self) -> bool {
        !matches!(self, Leaf::Value(Value::Null))
    }

    /// Numeric view of the leaf, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Leaf::Value(Value::Number(n)) => n.as_f64(),
            Leaf::Length(len) => Some(*len as f64),
            _ => None,
        }
    }
}

/// Flattened view of a record, ordered by path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord<'a> {
    fields: BTreeMap<String, Leaf<'a>>,
}

impl<'a> FlatRecord<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[inline]
    pub fn get(&self, path: &str) -> Option<&Leaf<'a>> {
        self.fields.get(path)
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    /// Iterate over `(path, leaf)` pairs in path order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Leaf<'a>> {
        self.fields.iter()
    }

    pub fn paths(&self) -> btree_map::Keys<'_, String, Leaf<'a>> {
        self.fields.keys()
    }

    /// Number of leaves holding something other than null
    pub fn defined_count(&self) -> usize {
        self.fields.values().filter(|leaf| leaf.is_defined()).count()
    }
}

/// Flatten a record with the default (positional) sequence handling
pub fn flatten(record: &Value) -> FlatRecord<'_> {
    flatten_with(record, SequenceMode::Positional)
}

/// Flatten a record
///
/// Objects are expanded key by key. A top-level array is expanded by index
/// whatever the mode; `mode` only governs sequences nested below the top.
/// A top-level scalar becomes a single leaf at the empty path. Empty objects
/// and empty positional arrays contribute no leaves.
pub fn flatten_with(record: &Value, mode: SequenceMode) -> FlatRecord<'_> {
    let mut fields = BTreeMap::new();
    match record {
        Value::Object(_) | Value::Array(_) => expand(record, "", mode, &mut fields),
        scalar => {
            fields.insert(String::new(), Leaf::Value(scalar));
        }
    }
    FlatRecord { fields }
}

fn expand<'a>(
    node: &'a Value,
    prefix: &str,
    mode: SequenceMode,
    out: &mut BTreeMap<String, Leaf<'a>>,
) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                bind(value, join_path(prefix, key), mode, out);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                bind(value, join_path(prefix, &index.to_string()), mode, out);
            }
        }
        _ => {}
    }
}

fn bind<'a>(
    value: &'a Value,
    path: String,
    mode: SequenceMode,
    out: &mut BTreeMap<String, Leaf<'a>>,
) {
    match (value, mode) {
        (Value::Object(_), _) | (Value::Array(_), SequenceMode::Positional) => {
            expand(value, &path, mode, out);
        }
        (Value::Array(items), SequenceMode::Length) => {
            out.insert(path, Leaf::Length(items.len()));
        }
        (Value::Array(items), SequenceMode::Members) => {
            let members = items.iter().map(|item| item.to_string()).collect();
            out.insert(path, Leaf::Members(members));
        }
        (scalar, _) => {
            out.insert(path, Leaf::Value(scalar));
        }
    }
}

#[inline]
fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value_at(flat: &FlatRecord<'_>, path: &str) -> Option<Value> {
        match flat.get(path) {
            Some(Leaf::Value(value)) => Some((*value).clone()),
            _ => None,
        }
    }

    #[test]
    fn test_flatten_nested_objects() {
        let record = json!({
            "id": 1,
            "user": {"name": "Ada", "address": {"city": "London"}},
        });
        let flat = flatten(&record);

        assert_eq!(flat.len(), 3);
        assert_eq!(value_at(&flat, "id"), Some(json!(1)));
        assert_eq!(value_at(&flat, "user.name"), Some(json!("Ada")));
        assert_eq!(value_at(&flat, "user.address.city"), Some(json!("London")));
    }

    #[test]
    fn test_flatten_keeps_nulls() {
        let record = json!({"a": null, "b": {"c": null}});
        let flat = flatten(&record);

        assert_eq!(flat.len(), 2);
        assert!(!flat.get("a").unwrap().is_defined());
        assert!(!flat.get("b.c").unwrap().is_defined());
        assert_eq!(flat.defined_count(), 0);
    }

    #[test]
    fn test_flatten_positional_arrays() {
        let record = json!({"tags": ["x", "y"], "pts": [{"v": 1}]});
        let flat = flatten(&record);

        let paths: Vec<&str> = flat.paths().map(String::as_str).collect();
        assert_eq!(paths, vec!["pts.0.v", "tags.0", "tags.1"]);
    }

    #[test]
    fn test_flatten_empty_containers_vanish() {
        let record = json!({"a": {}, "b": [], "c": 1});
        let flat = flatten(&record);

        assert_eq!(flat.len(), 1);
        assert!(flat.contains_path("c"));
        assert!(flatten(&json!({})).is_empty());
    }

    #[test]
    fn test_flatten_length_mode() {
        let record = json!({"tags": ["x", "y", "z"], "meta": {"ids": []}});
        let flat = flatten_with(&record, SequenceMode::Length);

        assert_eq!(flat.get("tags"), Some(&Leaf::Length(3)));
        assert_eq!(flat.get("meta.ids"), Some(&Leaf::Length(0)));
        assert_eq!(flat.get("tags").unwrap().as_f64(), Some(3.0));
    }

    #[test]
    fn test_flatten_members_mode() {
        let record = json!({"tags": ["b", "a", "b"]});
        let flat = flatten_with(&record, SequenceMode::Members);

        match flat.get("tags") {
            Some(Leaf::Members(set)) => {
                assert_eq!(set.len(), 2);
                assert!(set.contains("\"a\""));
            }
            other => panic!("expected members leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_flatten_top_level_scalar() {
        let value = json!(42);
        let flat = flatten(&value);
        assert_eq!(flat.len(), 1);
        assert_eq!(value_at(&flat, ""), Some(json!(42)));
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let record = json!({"z": 1, "a": {"m": [1, 2]}, "k": "v"});
        assert_eq!(flatten(&record), flatten(&record));
    }

    #[test]
    fn test_sequence_mode_parse() {
        assert_eq!("Length".parse::<SequenceMode>(), Ok(SequenceMode::Length));
        assert_eq!("members".parse::<SequenceMode>(), Ok(SequenceMode::Members));
        assert!("bogus".parse::<SequenceMode>().is_err());
        assert_eq!(SequenceMode::default().to_string(), "positional");
    }

    #[test]
    fn test_sequence_mode_serializes_like_display() {
        for mode in [SequenceMode::Positional, SequenceMode::Length, SequenceMode::Members] {
            assert_eq!(serde_json::to_value(mode).unwrap(), json!(mode.to_string()));
        }
    }
}
