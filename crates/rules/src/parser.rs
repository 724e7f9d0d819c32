// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule module TOML parsing

use crate::handler::{Filter, Handler};
use crate::step::{ScriptedHandler, Step};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during rule module parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModule {
    #[serde(default)]
    handler: BTreeMap<String, RawHandler>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHandler {
    #[serde(default, rename = "match")]
    filter: BTreeMap<String, Value>,
    #[serde(default)]
    step: Vec<Step>,
}

/// A parsed rule module: every handler it declares, in name order
#[derive(Debug, Clone, Default)]
pub struct RuleModule {
    pub handlers: Vec<ScriptedHandler>,
}

impl RuleModule {
    pub fn get(&self, name: &str) -> Option<&ScriptedHandler> {
        self.handlers.iter().find(|h| h.name() == name)
    }
}

/// Parse a rule module from TOML content
pub fn parse_module(content: &str) -> Result<RuleModule, ParseError> {
    let raw: RawModule = toml::from_str(content)?;

    let mut module = RuleModule::default();
    for (name, handler) in raw.handler {
        for (field, expected) in &handler.filter {
            validate_expected(&name, field, expected)?;
        }
        module.handlers.push(ScriptedHandler::new(
            name,
            Filter::from(handler.filter),
            handler.step,
        ));
    }

    Ok(module)
}

fn validate_expected(handler: &str, field: &str, expected: &Value) -> Result<(), ParseError> {
    let scalar = |v: &Value| !matches!(v, Value::Array(_) | Value::Object(_));
    let valid = match expected {
        Value::Array(options) => !options.is_empty() && options.iter().all(scalar),
        other => scalar(other),
    };
    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidFormat(format!(
            "handler.{}.match.{} must be a scalar or a non-empty array of scalars",
            handler, field
        )))
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
