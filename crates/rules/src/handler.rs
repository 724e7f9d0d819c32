// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule handlers and the predicate metadata attached to them

use powny_core::{Event, ExecutionContext, StoreError};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors a handler invocation can end with
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Failed(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Field constraints a handler declares for the events it wants.
///
/// A scalar expects that exact value; an array accepts any of its
/// elements. How the constraints are evaluated is up to the matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Filter {
    fields: BTreeMap<String, Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style constraint
    pub fn with(mut self, field: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), expected.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for Filter {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// A callable rule unit discovered from a rule source
pub trait Handler: Send + Sync {
    /// Entry-point name, e.g. `on_event`
    fn name(&self) -> &str;

    fn filter(&self) -> &Filter;

    fn call(&self, event: &Event, ctx: &mut ExecutionContext) -> Result<(), HandlerError>;
}

impl fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name())
            .field("filter", self.filter())
            .finish()
    }
}

/// Handler backed by a Rust closure, for rule modules built in-process
pub struct FnHandler<F> {
    name: String,
    filter: Filter,
    func: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&Event, &mut ExecutionContext) -> Result<(), HandlerError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, filter: Filter, func: F) -> Self {
        Self {
            name: name.into(),
            filter,
            func,
        }
    }
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&Event, &mut ExecutionContext) -> Result<(), HandlerError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn filter(&self) -> &Filter {
        &self.filter
    }

    fn call(&self, event: &Event, ctx: &mut ExecutionContext) -> Result<(), HandlerError> {
        (self.func)(event, ctx)
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
