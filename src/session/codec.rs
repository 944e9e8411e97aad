//! Text encoding of recordings
//!
//! A recording is stored as a JSON array of segment objects:
//!
//! ```text
//! [
//!   {"anchors": [[0, 0], [10, 0]], "interval": 0, "continuous": false},
//!   {"anchors": [[12, 3]], "interval": 40, "continuous": true}
//! ]
//! ```
//!
//! Decoding happens in two passes so callers can tell apart text that is not
//! JSON at all ([`RecordingError::Malformed`]) from JSON that does not
//! describe a recording ([`RecordingError::Schema`] and
//! [`RecordingError::SegmentSchema`]). Nothing is returned on failure.

use std::path::Path;

use crate::error::{RecordingError, Result, ResultExt};
use crate::types::Recording;

/// Encode a recording as compact JSON
pub fn serialize(recording: &Recording) -> String {
    // Positions, integers and booleans cannot fail to encode
    serde_json::to_string(recording).unwrap_or_else(|_| String::from("[]"))
}

/// Encode a recording as indented JSON
pub fn serialize_pretty(recording: &Recording) -> String {
    serde_json::to_string_pretty(recording).unwrap_or_else(|_| String::from("[]"))
}

/// Decode a recording from its JSON text
pub fn deserialize(text: &str) -> Result<Recording> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| RecordingError::Malformed(e.to_string()))?;

    if !value.is_array() {
        return Err(RecordingError::Schema(format!(
            "expected an array of segments, found {}",
            json_kind(&value)
        )));
    }

    let recording: Recording =
        serde_json::from_value(value).map_err(|e| RecordingError::Schema(e.to_string()))?;

    if let Some(index) = recording.iter().position(|s| s.anchors.is_empty()) {
        return Err(RecordingError::SegmentSchema {
            index,
            message: "anchors must not be empty".to_string(),
        });
    }

    Ok(recording)
}

/// Read a recording from a file
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Recording> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read recording {:?}", path))?;

    deserialize(&text).with_context(|| format!("Failed to decode recording {:?}", path))
}

/// Write a recording to a file as indented JSON
pub fn save_to_file(recording: &Recording, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, serialize_pretty(recording))
        .with_context(|| format!("Failed to write recording {:?}", path))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
