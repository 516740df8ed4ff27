//! Generic listing records.
//!
//! A record is one row of domain data (a shipment, a user, a payment) as a
//! flat map of field names to JSON primitives. Dates travel as strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One immutable row of a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The record's `id` field, rendered as text.
    pub fn id(&self) -> Option<String> {
        self.0.get("id").and_then(value_as_text)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// Text form of a field, used for search and equality filters.
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).and_then(value_as_text)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for Record {
    type Error = crate::error::CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(crate::error::CoreError::Source(format!(
                "record must be a JSON object, got {other}"
            ))),
        }
    }
}

/// Render a primitive JSON value as text. Arrays and objects have no text form.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
