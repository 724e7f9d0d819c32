// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitoring events and event-description normalization

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Field that is defaulted to an empty string when absent
pub const DESCRIPTION: &str = "description";

/// Errors raised while normalizing an event description
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("event description should be an array of events or an event object, not {found}")]
    InvalidDescription { found: &'static str },
}

/// A single event: an ordered mapping of field names to values.
///
/// Field semantics belong to the matcher; the only invariant kept here is
/// that normalized events always carry a `description`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a field if it holds a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn description(&self) -> &str {
        self.get_str(DESCRIPTION).unwrap_or_default()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field values rendered as plain strings, for template interpolation.
    ///
    /// Strings are taken verbatim, `null` renders empty, everything else
    /// renders as compact JSON.
    pub fn vars(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect()
    }

    fn ensure_description(&mut self) {
        if !self.fields.contains_key(DESCRIPTION) {
            self.fields
                .insert(DESCRIPTION.to_string(), Value::String(String::new()));
        }
    }
}

impl From<Map<String, Value>> for Event {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Turn a raw event description into an ordered sequence of events.
///
/// An array yields one event per element, in order; a single object yields
/// one event. Anything else, including non-object array elements, is
/// rejected.
pub fn normalize_events(description: Value) -> Result<Vec<Event>, EventError> {
    let items = match description {
        Value::Array(items) => items,
        Value::Object(fields) => vec![Value::Object(fields)],
        other => {
            return Err(EventError::InvalidDescription {
                found: json_type(&other),
            })
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(fields) => {
                let mut event = Event::from(fields);
                event.ensure_description();
                tracing::info!(%event, "add event");
                Ok(event)
            }
            other => Err(EventError::InvalidDescription {
                found: json_type(&other),
            }),
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
