//! JSON file storage
//!
//! The image accumulator grows by append on every extractor run. Files are
//! pretty-printed with two-space indentation and keep non-ASCII text as is.
//! Writes overwrite in place.

use crate::{FantaError, PlayerImageRecord, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

/// Load the accumulated entries as raw JSON.
///
/// A missing or unparsable file starts empty. Any list that parses is kept
/// as is, whatever its elements look like. Valid JSON that is not a list is
/// an error so the file is never overwritten with a fresh list.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No accumulator at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(other) => Err(FantaError::Parse(format!(
            "accumulator {} holds a JSON {}, not a list",
            path.display(),
            json_kind(&other)
        ))),
        Err(e) => {
            log::warn!(
                "Discarding unreadable accumulator {}: {}",
                path.display(),
                e
            );
            Ok(Vec::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Load a required JSON input
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

/// Write `value` as pretty JSON, replacing the file
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

/// Append freshly scraped records to the accumulator file.
///
/// Nothing is deduplicated, so scraping the same page twice stores every
/// player twice. Returns the total number of records now in the file.
pub fn append_to_accumulator<P: AsRef<Path>>(
    path: P,
    records: Vec<PlayerImageRecord>,
) -> Result<usize> {
    let path = path.as_ref();
    let mut all = load_or_default(path)?;
    let added = records.len();
    for record in &records {
        all.push(serde_json::to_value(record)?);
    }
    save_json(path, &all)?;

    log::info!(
        "Added {} records to {} ({} total)",
        added,
        path.display(),
        all.len()
    );
    Ok(all.len())
}
