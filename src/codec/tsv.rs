//! Tab-separated export and import of a single log.
//!
//! File body: one `<ISO-8601 time>\t<value>` row per entry, in log order.
//! File name: `<name>-<units>.tsv`, parsed back into log metadata on import.

use serde::{Deserialize, Serialize};

use crate::domain::log_record::UNNAMED;
use crate::domain::{DEFAULT_UNITS, Entry, Log};
use crate::error::{NumlogError, Result};
use crate::numeric;
use crate::timestamp;

/// Row separator used when exporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSeparator {
    /// CRLF on Windows, LF elsewhere
    #[default]
    Platform,
    Lf,
    Crlf,
}

impl LineSeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Platform => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// Suggested file name for an exported log.
///
/// Path separators and characters not allowed in file names are replaced
/// with `_`, so the result never leaves the directory it is joined onto.
pub fn export_file_name(log: &Log) -> String {
    format!("{}-{}.tsv", file_name_part(&log.name), file_name_part(&log.units))
}

fn file_name_part(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Encode every entry of `log` as a TSV row. No trailing separator.
pub fn export_log(log: &Log, separator: LineSeparator) -> String {
    log.entries
        .iter()
        .map(|e| format!("{}\t{}", timestamp::format_iso(&e.time), format_value(e.value)))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// Build a log from an imported file.
///
/// Rows whose timestamp does not parse, or whose value has no leading
/// integer, are dropped and logged; the rest are kept in file order.
/// Values are read as integers, so `7.9` imports as `7`.
pub fn import_log(filename: &str, text: &str) -> Log {
    let (name, units) = parse_file_name(filename);

    let mut entries = Vec::new();
    let mut dropped = 0usize;
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(index + 1, line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                dropped += 1;
                log::warn!("Skipping line of {}: {}", filename, e);
            }
        }
    }

    log::info!(
        "Imported {} entries from {} ({} lines dropped)",
        entries.len(),
        filename,
        dropped
    );
    Log::new(name).with_units(units).with_entries(entries)
}

/// Split `<name>-<units>.<ext>` into name and units.
///
/// Any directory part is ignored. The name is everything before the first
/// `-` or `.`; units are the text after that `-` up to the next `.`.
/// Missing pieces fall back to `"unnamed"` and `"#"`.
pub fn parse_file_name(filename: &str) -> (String, String) {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let name_end = base.find(['-', '.']).unwrap_or(base.len());
    let name = &base[..name_end];

    let units = match base[name_end..].strip_prefix('-') {
        Some(rest) => &rest[..rest.find('.').unwrap_or(rest.len())],
        None => "",
    };

    let name = if name.is_empty() { UNNAMED } else { name };
    let units = if units.is_empty() { DEFAULT_UNITS } else { units };
    (name.to_string(), units.to_string())
}

fn parse_line(line_no: usize, line: &str) -> Result<Entry> {
    let malformed = |reason: String| NumlogError::ImportLineMalformed { line: line_no, reason };

    let cells: Vec<&str> = line.split('\t').collect();
    let [time_text, value_text] = cells.as_slice() else {
        return Err(malformed(format!("expected 2 tab-separated cells, found {}", cells.len())));
    };

    let time = timestamp::parse_iso(time_text).ok_or_else(|| malformed(format!("bad timestamp {:?}", time_text)))?;
    let value = numeric::parse_int(value_text).ok_or_else(|| malformed(format!("bad value {:?}", value_text)))?;

    Ok(Entry::new(time, value))
}

fn format_value(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    value.to_string()
}
