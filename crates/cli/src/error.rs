// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing errors for failures that make a check meaningless.
//!
//! Each error carries what went wrong, why it might have happened, and how
//! to fix it.

use powny_checker::{CheckError, ConfigError};
use powny_rules::SourceError;
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl CliError {
    pub fn from_config(err: ConfigError) -> Self {
        let base = match &err {
            ConfigError::AlreadyExists(path) => {
                CliError::new(format!("Config '{}' already exists", path.display()))
                    .with_suggestion("Overwrite it with: powny create-config --force")
            }
            ConfigError::NoConfigDir => CliError::new("Cannot locate the user config directory")
                .with_suggestion("Pass a path explicitly: powny --config <path> ..."),
            ConfigError::Parse { path, source } => {
                CliError::new(format!("Invalid config '{}'", path.display()))
                    .with_context(source.to_string())
                    .with_suggestion("Start from a fresh one: powny create-config --force")
            }
            ConfigError::Io { path, source } => {
                CliError::new(format!("Can't access config '{}'", path.display()))
                    .with_context(source.to_string())
            }
        };
        base.with_source(err)
    }

    pub fn from_check(err: CheckError) -> Self {
        let base = match &err {
            CheckError::Config(e) => CliError::new(e.to_string()),
            CheckError::MissingRulesPath => CliError::new("No rules path given")
                .with_suggestion("Pass one with: powny check -r <rules-dir> -e <events>")
                .with_suggestion("Or set rules-path in the config (powny create-config)"),
            CheckError::Source(SourceError::NoHandlersFound { origin, errors }) => {
                let mut e = CliError::new(format!("No handlers found in {}", origin));
                for (module, error) in errors {
                    e = e.with_context(format!("{}: {}", module, error));
                }
                e.with_suggestion("Check that rule modules declare an entry-point handler")
                    .with_suggestion("Run with --debug to see skipped handlers")
            }
            CheckError::Source(SourceError::NotADirectory(path)) => {
                CliError::new(format!("Rules path '{}' is not a directory", path.display()))
            }
            CheckError::Source(e) => CliError::new(e.to_string()),
            CheckError::Events(e) => CliError::new("Invalid event description")
                .with_context(e.to_string())
                .with_suggestion(
                    "Describe one event as an object, or several as an array of objects",
                ),
            CheckError::UnparsableEvents { origin, reason } => {
                CliError::new(format!("Can't parse event description {}", origin))
                    .with_context(reason.clone())
                    .with_suggestion("Event descriptions must be JSON or YAML")
            }
            CheckError::Io { path, source } => {
                CliError::new(format!("Can't read event description '{}'", path.display()))
                    .with_context(source.to_string())
            }
        };
        base.with_source(err)
    }
}
