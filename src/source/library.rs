//! Library query results shaped like a `VideoLibrary.GetMovieSets` response:
//! `{"result": {"limits": {"total": N}, "sets": [{"label": .., "plot": ..}]}}`.

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use tracing::warn;

use super::Record;
use crate::errors::ExportSetError;

#[derive(Debug, Deserialize)]
struct Response {
    result: Option<QueryResult>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    // Informational only; kept loose so an odd `total` never rejects the sets.
    limits: Option<Value>,
    sets: Option<Vec<Value>>,
}

fn text_field(set: &serde_json::Map<String, Value>, key: &str) -> String {
    match set.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Parse a query result into records.
///
/// Missing `result`/`sets` (or a JSON-RPC error object) is fatal; a single
/// malformed set entry is logged and skipped.
pub fn read_library<R: Read>(reader: R, origin: &str) -> Result<Vec<Record>> {
    let malformed = |detail: String| ExportSetError::MalformedSource {
        origin: origin.to_string(),
        detail,
    };

    let response: Response =
        serde_json::from_reader(reader).map_err(|e| malformed(format!("invalid JSON: {e}")))?;

    if let Some(err) = response.error {
        return Err(malformed(format!("query returned an error: {err}")).into());
    }
    let result = response
        .result
        .ok_or_else(|| malformed("missing 'result'".to_string()))?;
    let sets = result
        .sets
        .ok_or_else(|| malformed("missing 'result.sets'".to_string()))?;

    if let Some(total) = result.limits.as_ref().and_then(|l| l.get("total")) {
        match total.as_u64() {
            Some(n) if n == sets.len() as u64 => {}
            Some(n) => warn!(total = n, present = sets.len(), "limits.total disagrees with number of sets"),
            None => warn!(total = %total, present = sets.len(), "limits.total is not a count; ignoring it"),
        }
    }

    let mut records = Vec::with_capacity(sets.len());
    for (index, set) in sets.iter().enumerate() {
        let Some(obj) = set.as_object() else {
            warn!(index, entry = %set, "Skipping set entry that is not an object");
            continue;
        };
        // No original title in library results; keep the reserved slot for layout parity.
        let row = ["0".to_string(), text_field(obj, "label"), text_field(obj, "plot")];
        records.push(Record::from_fields(&row));
    }
    Ok(records)
}
