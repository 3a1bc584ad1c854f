use divsel_core::SequenceMode;
use divsel_selector::Selection;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use std::path::Path;

/// Run details written next to the selection
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub input_size: usize,
    pub sequence_mode: SequenceMode,
    #[serde(flatten)]
    pub selection: &'a Selection,
}

/// Write a run report as indented JSON to `path`
pub fn write_report(report: &RunReport<'_>, path: &Path) -> io::Result<()> {
    let mut rendered = serde_json::to_string_pretty(report)?;
    rendered.push('\n');
    std::fs::write(path, rendered)
}

/// Write records as indented JSON to `out_file`, or to stdout when `None`
pub fn write_records(records: &[Value], out_file: Option<&Path>) -> io::Result<()> {
    let mut rendered = serde_json::to_string_pretty(records)?;
    rendered.push('\n');

    match out_file {
        Some(path) => std::fs::write(path, rendered),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            handle.flush()
        }
    }
}
