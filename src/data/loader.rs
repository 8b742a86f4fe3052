use std::collections::{HashMap, HashSet};

use log::debug;

use super::model::{Table, Value};
use crate::error::{MergeError, MergeResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse one CSV byte stream into a [`Table`].
///
/// Layout: the first record is the header, every following record a row.
/// * a leading UTF-8 BOM is ignored
/// * blank and whitespace-only lines are skipped, before the header too
/// * duplicate header names become `name.1`, `name.2`, ...
/// * empty header names become `Unnamed: <index>`
/// * short rows are padded with [`Value::Null`], long rows are rejected
///
/// `file` only labels errors.
pub fn parse_table(file: &str, content: &[u8]) -> MergeResult<Table> {
    let parse_err = |message: String| MergeError::Parse {
        file: file.to_string(),
        message,
    };

    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(parse_err("no columns to parse from file".into()));
    }
    if let Some(line) = unterminated_quote_line(content) {
        return Err(parse_err(format!(
            "unterminated quoted field starting on line {line}"
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = reader.records();
    let header = loop {
        match records.next() {
            None => return Err(parse_err("no columns to parse from file".into())),
            Some(result) => {
                let record = result.map_err(|e| parse_err(format!("reading header: {e}")))?;
                if !is_blank_line(content, &record) {
                    break record;
                }
            }
        }
    };
    let mut table = Table::new(dedupe_headers(header.iter()));
    let width = table.columns.len();

    for result in records {
        let record = result.map_err(|e| parse_err(e.to_string()))?;
        if is_blank_line(content, &record) {
            continue;
        }
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(parse_err(format!(
                "line {line}: expected {width} fields, saw {}",
                record.len()
            )));
        }
        let mut row: Vec<Value> = record.iter().map(Value::from_field).collect();
        row.resize(width, Value::Null);
        table.rows.push(row);
    }

    debug!(
        "parsed '{file}': {} columns, {} rows",
        table.columns.len(),
        table.len()
    );
    Ok(table)
}

/// A lone unquoted field made only of whitespace. The csv reader already
/// drops empty lines; whitespace-only ones are skipped the same way.
fn is_blank_line(content: &[u8], record: &csv::StringRecord) -> bool {
    if record.len() != 1 || !record[0].trim().is_empty() {
        return false;
    }
    let start = record.position().map_or(0, |p| p.byte() as usize);
    let first = content
        .get(start..)
        .unwrap_or_default()
        .iter()
        .skip_while(|b| matches!(b, b'\r' | b'\n'))
        .find(|b| !matches!(b, b' ' | b'\t'));
    first != Some(&b'"')
}

// ---------------------------------------------------------------------------
// Header helpers
// ---------------------------------------------------------------------------

fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let raw: Vec<String> = raw
        .enumerate()
        .map(|(i, h)| {
            if h.is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut used: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(raw.len());

    for name in raw {
        if used.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let counter = next_suffix.entry(name.clone()).or_insert(1);
        let renamed = loop {
            let candidate = format!("{name}.{counter}");
            *counter += 1;
            if !used.contains(&candidate) {
                break candidate;
            }
        };
        used.insert(renamed.clone());
        out.push(renamed);
    }
    out
}

// ---------------------------------------------------------------------------
// Quote scanning
// ---------------------------------------------------------------------------

/// The csv reader silently runs an open quoted field to end of input; catch
/// that here. Returns the 1-based line on which the open field started.
fn unterminated_quote_line(content: &[u8]) -> Option<u64> {
    let mut line: u64 = 1;
    let mut at_field_start = true;
    let mut open_since: Option<u64> = None;
    let mut bytes = content.iter().peekable();

    while let Some(&b) = bytes.next() {
        if open_since.is_some() {
            match b {
                b'"' if bytes.peek() == Some(&&b'"') => {
                    bytes.next();
                }
                b'"' => open_since = None,
                b'\n' => line += 1,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if at_field_start => {
                open_since = Some(line);
                at_field_start = false;
            }
            b',' | b'\r' => at_field_start = true,
            b'\n' => {
                line += 1;
                at_field_start = true;
            }
            _ => at_field_start = false,
        }
    }
    open_since
}
