// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One local check run: load rules, normalize events, dispatch

use crate::config::CheckConfig;
use crate::dispatcher::Dispatcher;
use crate::error::CheckError;
use crate::report::RunReport;
use powny_core::{normalize_events, ExecutionContext, Outbox, VersionedStore};
use powny_rules::{DirectoryRuleSource, FieldMatcher, Matcher, RuleSource};
use serde_json::Value;

/// Runs rule handlers against a batch of events in a fresh job context
pub struct Checker<S, M = FieldMatcher> {
    source: S,
    dispatcher: Dispatcher<M>,
    output: Value,
    job_id: Option<String>,
}

impl<S: RuleSource> Checker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            dispatcher: Dispatcher::default(),
            output: Value::Object(serde_json::Map::new()),
            job_id: None,
        }
    }
}

impl Checker<DirectoryRuleSource> {
    /// Build a checker for the rules directory named in `config`
    pub fn from_config(config: &CheckConfig) -> Result<Self, CheckError> {
        let root = config.rules_path.as_ref().ok_or(CheckError::MissingRulesPath)?;
        let source = DirectoryRuleSource::new(root)
            .with_recursive(config.recursive)
            .with_entry_points(config.entry_points.clone());
        Ok(Self::new(source).with_output(config.output.clone()))
    }
}

impl<S: RuleSource, M: Matcher> Checker<S, M> {
    pub fn with_matcher<N: Matcher>(self, matcher: N) -> Checker<S, N> {
        Checker {
            source: self.source,
            dispatcher: Dispatcher::new(matcher),
            output: self.output,
            job_id: self.job_id,
        }
    }

    /// Output channel configuration handed to the job's outbox
    pub fn with_output(mut self, output: Value) -> Self {
        self.output = output;
        self
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// Check `description` against the loaded rules.
    ///
    /// Fails only when the run cannot start: a malformed description or a
    /// source with no usable handlers. Handler failures are in the report.
    pub fn run(&self, description: Value) -> Result<RunReport, CheckError> {
        let events = normalize_events(description)?;

        tracing::info!(source = %self.source.describe(), "loading rules");
        let loaded = self.source.load()?;

        let mut ctx = ExecutionContext::new(VersionedStore::new())
            .with_outbox(Outbox::setup(self.output.clone()));
        if let Some(job_id) = &self.job_id {
            ctx = ctx.with_job_id(job_id.clone());
        }
        tracing::info!(
            job_id = ctx.job_id(),
            events = events.len(),
            handlers = loaded.handlers.len(),
            "starting check"
        );

        let mut report = self.dispatcher.dispatch(&loaded.handlers, &events, &mut ctx);
        report.load_errors = loaded
            .errors
            .iter()
            .map(|(module, error)| (module.clone(), error.to_string()))
            .collect();
        ctx.save();

        tracing::info!(outcome = %report.outcome(), "check finished");
        Ok(report)
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
