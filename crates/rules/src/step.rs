// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler steps declared in rule modules

use crate::handler::{Filter, Handler, HandlerError};
use crate::template::{interpolate, render_value};
use powny_core::{Event, ExecutionContext, Replace};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Log level for `log` steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

fn default_fatal() -> bool {
    true
}

/// One action of a scripted handler.
///
/// String fields accept `{field}` placeholders filled from the event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    /// Emit a log line
    Log {
        message: String,
        #[serde(default)]
        level: LogLevel,
    },
    /// Read a store key, optionally asserting its value
    Read {
        key: String,
        #[serde(default)]
        default: Option<Value>,
        #[serde(default)]
        expect: Option<Value>,
    },
    /// Write a store key, guarded by `version` when given.
    ///
    /// `default` is the previous value reported for a key never written;
    /// it is `null` when omitted.
    Store {
        key: String,
        value: Value,
        #[serde(default)]
        version: Option<u64>,
        #[serde(default)]
        default: Option<Value>,
        #[serde(default = "default_fatal")]
        fatal: bool,
    },
    /// Send a notification through an output channel
    Notify {
        channel: String,
        to: String,
        message: String,
    },
    /// Checkpoint the job
    Save {},
    /// Abort the handler with an error
    Fail { message: String },
}

impl Step {
    /// Step kind as written in the module file
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Log { .. } => "log",
            Step::Read { .. } => "read",
            Step::Store { .. } => "store",
            Step::Notify { .. } => "notify",
            Step::Save {} => "save",
            Step::Fail { .. } => "fail",
        }
    }

    fn run(
        &self,
        handler: &str,
        vars: &HashMap<String, String>,
        ctx: &mut ExecutionContext,
    ) -> Result<(), HandlerError> {
        match self {
            Step::Log { message, level } => {
                let message = interpolate(message, vars);
                match level {
                    LogLevel::Trace => tracing::trace!(handler, "{}", message),
                    LogLevel::Debug => tracing::debug!(handler, "{}", message),
                    LogLevel::Info => tracing::info!(handler, "{}", message),
                    LogLevel::Warn => tracing::warn!(handler, "{}", message),
                    LogLevel::Error => tracing::error!(handler, "{}", message),
                }
            }

            Step::Read {
                key,
                default,
                expect,
            } => {
                let key = interpolate(key, vars);
                let mut request = Replace::read();
                if let Some(default) = default {
                    request = request.with_default(render_value(default, vars));
                }
                let (entry, _) = ctx.store_mut().replace_value(&key, request)?;
                tracing::info!(
                    handler,
                    key = %key,
                    value = %entry.value,
                    version = ?entry.version,
                    "read"
                );

                if let Some(expected) = expect {
                    let expected = render_value(expected, vars);
                    if entry.value != expected {
                        return Err(HandlerError::Failed(format!(
                            "'{}' holds {} but {} was expected",
                            key, entry.value, expected
                        )));
                    }
                }
            }

            Step::Store {
                key,
                value,
                version,
                default,
                fatal,
            } => {
                let key = interpolate(key, vars);
                let mut request =
                    Replace::write(render_value(value, vars)).fatal_on_conflict(*fatal);
                if let Some(version) = version {
                    request = request.with_version(*version);
                }
                // A first write to a fresh key reports `null` as the previous value
                let default = default
                    .as_ref()
                    .map_or(Value::Null, |d| render_value(d, vars));
                request = request.with_default(default);
                let (previous, outcome) = ctx.store_mut().replace_value(&key, request)?;
                tracing::info!(
                    handler,
                    key = %key,
                    version = ?version,
                    previous = %previous.value,
                    outcome = ?outcome,
                    "store"
                );
            }

            Step::Notify {
                channel,
                to,
                message,
            } => {
                ctx.notify(
                    interpolate(channel, vars),
                    interpolate(to, vars),
                    interpolate(message, vars),
                );
            }

            Step::Save {} => ctx.save(),

            Step::Fail { message } => {
                return Err(HandlerError::Failed(interpolate(message, vars)));
            }
        }
        Ok(())
    }
}

/// Handler declared in a rule module file
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedHandler {
    name: String,
    filter: Filter,
    steps: Vec<Step>,
}

impl ScriptedHandler {
    pub fn new(name: impl Into<String>, filter: Filter, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            filter,
            steps,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl Handler for ScriptedHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Run steps in order, stopping at the first failing one
    fn call(&self, event: &Event, ctx: &mut ExecutionContext) -> Result<(), HandlerError> {
        let vars = event.vars();
        for step in &self.steps {
            step.run(&self.name, &vars, ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
