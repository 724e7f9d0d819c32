// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory versioned key/value store
//!
//! Emulates the coordination service's conditional-write primitive: a write
//! carrying a version only lands if that version is strictly greater than
//! the stored one. Entries live as long as the store instance.

use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("no value stored for '{key}' and no default given")]
    MissingKey { key: String },
    #[error("can't rewrite '{key}' with version {attempted} (stored version: {stored})")]
    VersionConflict {
        key: String,
        attempted: u64,
        stored: u64,
    },
}

/// A stored value with its version and write time.
///
/// Entries synthesized from a default have neither version nor timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreEntry {
    pub value: Value,
    pub version: Option<u64>,
    pub stored_at: Option<DateTime<Utc>>,
}

impl StoreEntry {
    fn unstored(value: Value) -> Self {
        Self {
            value,
            version: None,
            stored_at: None,
        }
    }
}

/// Result of the write half of a [`VersionedStore::replace_value`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The new value was persisted
    Written,
    /// Version conflict in non-fatal mode; nothing was persisted
    Rejected,
    /// No value was supplied, the call was a pure read
    ReadOnly,
}

impl WriteOutcome {
    /// Tri-state view: `Some(true)` written, `Some(false)` rejected, `None` read-only
    pub fn as_option(self) -> Option<bool> {
        match self {
            WriteOutcome::Written => Some(true),
            WriteOutcome::Rejected => Some(false),
            WriteOutcome::ReadOnly => None,
        }
    }
}

/// Arguments for [`VersionedStore::replace_value`]
#[derive(Debug, Clone, PartialEq)]
pub struct Replace {
    value: Option<Value>,
    version: Option<u64>,
    default: Option<Value>,
    fatal_on_conflict: bool,
}

impl Replace {
    /// Read the current entry without writing
    pub fn read() -> Self {
        Self {
            value: None,
            version: None,
            default: None,
            fatal_on_conflict: true,
        }
    }

    /// Write `value`, returning the entry it replaced
    pub fn write(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::read()
        }
    }

    /// Guard the write with a version that must exceed the stored one
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    /// Value reported as "previous" when the key has never been written
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Report version conflicts as [`WriteOutcome::Rejected`] instead of failing
    pub fn non_fatal(self) -> Self {
        self.fatal_on_conflict(false)
    }

    pub fn fatal_on_conflict(mut self, fatal: bool) -> Self {
        self.fatal_on_conflict = fatal;
        self
    }
}

/// In-memory compare-and-set store, one instance per checker run
pub struct VersionedStore {
    entries: HashMap<String, StoreEntry>,
    clock: Box<dyn Clock>,
}

impl VersionedStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            entries: HashMap::new(),
            clock: Box::new(clock),
        }
    }

    /// Read and optionally replace the value stored under `key`.
    ///
    /// Returns the entry as it was before the call together with the write
    /// outcome. A key that was never written resolves to the request's
    /// default (not persisted); without a default the call fails with
    /// [`StoreError::MissingKey`], even when a value is being written.
    pub fn replace_value(
        &mut self,
        key: &str,
        request: Replace,
    ) -> Result<(StoreEntry, WriteOutcome), StoreError> {
        let previous = match self.entries.get(key) {
            Some(entry) => entry.clone(),
            None => match request.default {
                Some(default) => StoreEntry::unstored(default),
                None => {
                    return Err(StoreError::MissingKey {
                        key: key.to_string(),
                    })
                }
            },
        };

        let Some(value) = request.value else {
            return Ok((previous, WriteOutcome::ReadOnly));
        };

        if let (Some(attempted), Some(stored)) = (request.version, previous.version) {
            if attempted <= stored {
                if request.fatal_on_conflict {
                    return Err(StoreError::VersionConflict {
                        key: key.to_string(),
                        attempted,
                        stored,
                    });
                }
                tracing::debug!(key, attempted, stored, "version conflict, write rejected");
                return Ok((previous, WriteOutcome::Rejected));
            }
        }

        let entry = StoreEntry {
            value,
            version: request.version,
            stored_at: Some(self.clock.now()),
        };
        tracing::trace!(key, version = ?entry.version, "value stored");
        self.entries.insert(key.to_string(), entry);

        Ok((previous, WriteOutcome::Written))
    }

    /// Get the stored entry for `key`, if any
    pub fn get(&self, key: &str) -> Option<&StoreEntry> {
        self.entries.get(key)
    }

    /// Stored keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VersionedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VersionedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionedStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
