//! Per-endpoint decoding of list responses.
//!
//! The backend returns pages in one of two shapes, and each list endpoint
//! declares which one it uses so a malformed payload surfaces as a
//! `ParseError` instead of leaking into screen state.

use crate::error::RequestError;

use models::PageLimit;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// One decoded batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Absent means end of results.
    pub continuation_key: Option<String>,
}

pub enum PageShape<T> {
    /// `{"<items_field>": [...], "<key_field>": "..."}`
    Envelope {
        items_field: &'static str,
        key_field: &'static str,
    },
    /// A bare array. The next key is taken from the last item of a full
    /// batch; a short batch ends the collection.
    KeyedArray { key_of: fn(&T) -> String },
}

impl<T> Clone for PageShape<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PageShape<T> {}

impl<T> std::fmt::Debug for PageShape<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageShape::Envelope {
                items_field,
                key_field,
            } => f
                .debug_struct("Envelope")
                .field("items_field", items_field)
                .field("key_field", key_field)
                .finish(),
            PageShape::KeyedArray { .. } => f.debug_struct("KeyedArray").finish_non_exhaustive(),
        }
    }
}

impl<T: DeserializeOwned> PageShape<T> {
    #[track_caller]
    pub fn decode(&self, value: Value, limit: PageLimit) -> Result<Page<T>, RequestError> {
        match self {
            PageShape::Envelope {
                items_field,
                key_field,
            } => decode_envelope(value, items_field, key_field),
            PageShape::KeyedArray { key_of } => decode_keyed_array(value, limit, *key_of),
        }
    }
}

#[track_caller]
fn decode_envelope<T: DeserializeOwned>(
    value: Value,
    items_field: &str,
    key_field: &str,
) -> Result<Page<T>, RequestError> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Err(RequestError::parse(format!(
                "Expected an object with '{items_field}', got {}",
                json_kind(&other)
            )));
        }
    };

    let items = match object.remove(items_field) {
        None => {
            return Err(RequestError::parse(format!(
                "Missing '{items_field}' in page response"
            )));
        }
        Some(Value::Null) => Vec::new(),
        Some(raw) => serde_json::from_value(raw)
            .map_err(|e| RequestError::parse(format!("Invalid '{items_field}': {e}")))?,
    };

    let continuation_key = match object.remove(key_field) {
        None | Some(Value::Null) => None,
        Some(Value::String(key)) => Some(key),
        Some(other) => {
            return Err(RequestError::parse(format!(
                "'{key_field}' must be a string, got {}",
                json_kind(&other)
            )));
        }
    };

    Ok(Page {
        items,
        continuation_key: non_empty(continuation_key),
    })
}

#[track_caller]
fn decode_keyed_array<T: DeserializeOwned>(
    value: Value,
    limit: PageLimit,
    key_of: fn(&T) -> String,
) -> Result<Page<T>, RequestError> {
    let items: Vec<T> = match value {
        Value::Null => Vec::new(),
        Value::Array(_) => serde_json::from_value(value)
            .map_err(|e| RequestError::parse(format!("Invalid page items: {e}")))?,
        other => {
            return Err(RequestError::parse(format!(
                "Expected an array of items, got {}",
                json_kind(&other)
            )));
        }
    };

    let continuation_key = if items.len() >= limit.as_usize() {
        items.last().map(key_of)
    } else {
        None
    };

    Ok(Page {
        items,
        continuation_key: non_empty(continuation_key),
    })
}

/// An empty key means the same as no key.
fn non_empty(key: Option<String>) -> Option<String> {
    key.filter(|k| !k.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
