// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What a check run did

use powny_core::Notification;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One handler invocation for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    /// Index of the event in the normalized sequence
    pub event: usize,
    pub handler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Dispatch {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Overall result of a run.
///
/// "Nothing matched" is not a failure; it usually means the events or
/// filters need another look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    NothingMatched,
    Succeeded { dispatched: usize },
    Failed { dispatched: usize, failures: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub job_id: String,
    pub events: usize,
    pub handlers: Vec<String>,
    pub load_errors: BTreeMap<String, String>,
    pub dispatches: Vec<Dispatch>,
    pub notifications: Vec<Notification>,
}

impl RunReport {
    pub(crate) fn record(&mut self, event: usize, handler: &str, error: Option<String>) {
        self.dispatches.push(Dispatch {
            event,
            handler: handler.to_string(),
            error,
        });
    }

    pub fn dispatched_count(&self) -> usize {
        self.dispatches.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Dispatch> {
        self.dispatches.iter().filter(|d| d.failed())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Handlers invoked for the event at `index`, in dispatch order
    pub fn handlers_for(&self, index: usize) -> Vec<&str> {
        self.dispatches
            .iter()
            .filter(|d| d.event == index)
            .map(|d| d.handler.as_str())
            .collect()
    }

    pub fn outcome(&self) -> RunOutcome {
        let dispatched = self.dispatches.len();
        let failures = self.failure_count();
        match (dispatched, failures) {
            (0, _) => RunOutcome::NothingMatched,
            (_, 0) => RunOutcome::Succeeded { dispatched },
            _ => RunOutcome::Failed {
                dispatched,
                failures,
            },
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::NothingMatched => write!(f, "no handler matched any event"),
            RunOutcome::Succeeded { dispatched } => write!(f, "{} dispatched, all ok", dispatched),
            RunOutcome::Failed {
                dispatched,
                failures,
            } => write!(f, "{} dispatched, {} failed", dispatched, failures),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Job: {}", self.job_id)?;
        writeln!(
            f,
            "Events: {}  Handlers: {}  Load errors: {}",
            self.events,
            self.handlers.len(),
            self.load_errors.len()
        )?;

        for (module, error) in &self.load_errors {
            writeln!(f, "  ! {}: {}", module, error)?;
        }

        if !self.dispatches.is_empty() {
            writeln!(f, "Dispatched:")?;
            for d in &self.dispatches {
                match &d.error {
                    None => writeln!(f, "  [{}] {} ok", d.event, d.handler)?,
                    Some(e) => writeln!(f, "  [{}] {} FAILED: {}", d.event, d.handler, e)?,
                }
            }
        }

        if !self.notifications.is_empty() {
            writeln!(f, "Notifications:")?;
            for n in &self.notifications {
                writeln!(f, "  {} -> {}: {}", n.channel, n.to, n.message)?;
            }
        }

        write!(f, "Result: {}", self.outcome())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
