// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution context handed to rule handlers
//!
//! Stands in for the object the scheduler injects into a running job. It is
//! passed explicitly to every handler call; there is no global accessor.

use crate::store::VersionedStore;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Auxiliary job data exposed to handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extra {
    pub handler: Option<String>,
    pub job_id: String,
    pub counter: u64,
}

/// A notification a handler asked to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub job_id: String,
    pub handler: Option<String>,
    pub channel: String,
    pub to: String,
    pub message: String,
}

/// Collects notifications instead of delivering them.
///
/// The `output` configuration is kept as given; it only decides whether a
/// channel counts as configured.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    config: Value,
    sent: Vec<Notification>,
}

impl Outbox {
    pub fn setup(output: Value) -> Self {
        Self {
            config: output,
            sent: Vec::new(),
        }
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn is_configured(&self, channel: &str) -> bool {
        self.config.get(channel).is_some()
    }

    pub fn sent(&self) -> &[Notification] {
        &self.sent
    }

    fn record(&mut self, notification: Notification) {
        if self.is_configured(&notification.channel) {
            tracing::info!(
                channel = %notification.channel,
                to = %notification.to,
                message = %notification.message,
                "notification captured"
            );
        } else {
            tracing::warn!(
                channel = %notification.channel,
                to = %notification.to,
                "notification captured for unconfigured output channel"
            );
        }
        self.sent.push(notification);
    }
}

/// The job context a handler runs in
#[derive(Debug)]
pub struct ExecutionContext {
    job_id: String,
    counter: u64,
    handler: Option<String>,
    store: VersionedStore,
    outbox: Outbox,
}

impl ExecutionContext {
    /// Create a context with a fresh job id
    pub fn new(store: VersionedStore) -> Self {
        Self {
            job_id: Uuid::new_v4().to_string(),
            counter: 0,
            handler: None,
            store,
            outbox: Outbox::default(),
        }
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = job_id.into();
        self
    }

    pub fn with_outbox(mut self, outbox: Outbox) -> Self {
        self.outbox = outbox;
        self
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Number of handler invocations started in this context
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn extra(&self) -> Extra {
        Extra {
            handler: self.handler.clone(),
            job_id: self.job_id.clone(),
            counter: self.counter,
        }
    }

    /// Checkpoint the job. Offline there is nothing to persist.
    pub fn save(&self) {
        tracing::debug!(job_id = %self.job_id, counter = self.counter, "save (no-op)");
    }

    pub fn store(&self) -> &VersionedStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VersionedStore {
        &mut self.store
    }

    /// Capture a notification for the current handler
    pub fn notify(
        &mut self,
        channel: impl Into<String>,
        to: impl Into<String>,
        message: impl Into<String>,
    ) {
        let notification = Notification {
            job_id: self.job_id.clone(),
            handler: self.handler.clone(),
            channel: channel.into(),
            to: to.into(),
            message: message.into(),
        };
        self.outbox.record(notification);
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Mark the start of a handler invocation
    pub fn enter_handler(&mut self, name: &str) {
        self.counter += 1;
        self.handler = Some(name.to_string());
    }

    /// Mark the end of the current handler invocation
    pub fn leave_handler(&mut self) {
        self.handler = None;
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(VersionedStore::new())
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
