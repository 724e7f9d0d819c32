// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! powny-core: the job-side contract rule handlers run against
//!
//! This crate provides:
//! - Monitoring events and normalization of raw event descriptions
//! - An in-memory versioned store with compare-and-set writes
//! - The execution context handed to every handler invocation

pub mod clock;
pub mod context;
pub mod event;
pub mod store;

pub use clock::{Clock, FakeClock, SystemClock};
pub use context::{ExecutionContext, Extra, Notification, Outbox};
pub use event::{normalize_events, Event, EventError, DESCRIPTION};
pub use store::{Replace, StoreEntry, StoreError, VersionedStore, WriteOutcome};
