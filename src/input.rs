//! Input acquisition for the command-line tool
//!
//! Reads a JSON document from a file, stdin or the system clipboard and
//! extracts the array of records to select from, optionally nested under a
//! dot-notation key path.

use serde_json::Value;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Key path '{0}' not found in input")]
    KeyPathNotFound(String),

    #[error("Value at '{0}' is not an array")]
    NotAnArray(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Where the JSON document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
    Clipboard,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Stdin => write!(f, "stdin"),
            InputSource::Clipboard => write!(f, "clipboard"),
        }
    }
}

/// Read the raw document text from `source`
pub fn read_source(source: &InputSource) -> Result<String, InputError> {
    match source {
        InputSource::File(path) => Ok(std::fs::read_to_string(path)?),
        InputSource::Stdin => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        InputSource::Clipboard => read_clipboard(),
    }
}

#[cfg(target_os = "macos")]
const PASTE_COMMANDS: &[(&str, &[&str])] = &[("pbpaste", &[])];

#[cfg(target_os = "windows")]
const PASTE_COMMANDS: &[(&str, &[&str])] = &[(
    "powershell",
    &["-NoProfile", "-Command", "Get-Clipboard -Raw"],
)];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const PASTE_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
];

fn read_clipboard() -> Result<String, InputError> {
    let mut failures = Vec::new();
    for (program, args) in PASTE_COMMANDS {
        match Command::new(program).args(*args).output() {
            Ok(output) if output.status.success() => {
                return String::from_utf8(output.stdout)
                    .map_err(|e| InputError::Clipboard(format!("clipboard is not UTF-8: {}", e)));
            }
            Ok(output) => failures.push(format!("{} exited with {}", program, output.status)),
            Err(e) => failures.push(format!("{}: {}", program, e)),
        }
    }
    Err(InputError::Clipboard(failures.join("; ")))
}

/// Follow a dot-separated key path; numeric segments index into arrays
pub fn resolve_key_path<'a>(root: &'a Value, key_path: &str) -> Option<&'a Value> {
    if key_path.is_empty() {
        return Some(root);
    }
    key_path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Take the record array out of a parsed document
pub fn extract_records(document: Value, key_path: Option<&str>) -> Result<Vec<Value>, InputError> {
    let path = key_path.unwrap_or("");
    let target = if path.is_empty() {
        document
    } else {
        take_key_path(document, path).ok_or_else(|| InputError::KeyPathNotFound(path.to_string()))?
    };

    match target {
        Value::Array(records) => Ok(records),
        _ => Err(InputError::NotAnArray(if path.is_empty() {
            "<root>".to_string()
        } else {
            path.to_string()
        })),
    }
}

/// Parse document text and extract the record array
pub fn parse_records(text: &str, key_path: Option<&str>) -> Result<Vec<Value>, InputError> {
    let document: Value = serde_json::from_str(text)?;
    extract_records(document, key_path)
}

fn take_key_path(document: Value, key_path: &str) -> Option<Value> {
    key_path.split('.').try_fold(document, |node, segment| match node {
        Value::Object(mut map) => map.remove(segment),
        Value::Array(mut items) => {
            let index = segment.parse::<usize>().ok()?;
            (index < items.len()).then(|| items.swap_remove(index))
        }
        _ => None,
    })
}
