//! Boundary decoding for the provider's loosely documented responses.
//!
//! The listing endpoint has been observed returning a bare array as well as
//! an object wrapping the array under different keys; the stats endpoint
//! returns either one summary object or a list of per-period entries, with
//! the count under `total_clicks` or `clicks`. All of that tolerance lives
//! here so the pipeline stages work with plain domain types.

use crate::domain::model::Link;
use crate::utils::error::{ReportError, Result};
use serde_json::Value;

/// Envelope keys tried in priority order when the listing response is an
/// object instead of a bare array.
const LIST_KEYS: [&str; 3] = ["items", "data", "links"];

/// Field names that may carry a click count, tried in order.
const CLICK_FIELDS: [&str; 2] = ["total_clicks", "clicks"];

/// Normalizes a listing-style response to its record sequence.
pub fn decode_list_envelope(value: &Value) -> Result<&Vec<Value>> {
    match value {
        Value::Array(entries) => Ok(entries),
        Value::Object(map) => {
            for key in LIST_KEYS {
                if let Some(Value::Array(entries)) = map.get(key) {
                    return Ok(entries);
                }
            }
            Err(ReportError::MalformedResponseError {
                reason: format!(
                    "object exposes none of the known list keys ({})",
                    LIST_KEYS.join(", ")
                ),
            })
        }
        other => Err(ReportError::MalformedResponseError {
            reason: format!(
                "expected an object or array at the top level, got {}",
                json_kind(other)
            ),
        }),
    }
}

/// Decodes the link listing. Records without a usable id are skipped.
pub fn decode_link_list(value: &Value) -> Result<Vec<Link>> {
    let entries = decode_list_envelope(value)?;
    Ok(entries.iter().filter_map(decode_link).collect())
}

fn decode_link(value: &Value) -> Option<Link> {
    let record = value.as_object()?;
    let id = match record.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return None,
    };
    let name = record
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(Link {
        id,
        name,
        clicks_direct: click_field(value),
    })
}

/// Resolves a stats response to a click total: a single summary object, or
/// per-period entries whose counts are summed. `None` when the shape
/// carries no usable count.
pub fn decode_click_total(value: &Value) -> Option<u64> {
    match value {
        Value::Array(entries) => Some(entries.iter().filter_map(click_field).sum()),
        Value::Object(_) => click_field(value),
        _ => None,
    }
}

fn click_field(value: &Value) -> Option<u64> {
    CLICK_FIELDS
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_u64))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
