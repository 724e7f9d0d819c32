// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! powny-checker: run rule handlers against events locally
//!
//! Loads a rules repository, normalizes an event description and
//! dispatches every event to the handlers whose filters match, collecting
//! failures instead of stopping on them.

mod check;
pub mod config;
mod dispatcher;
mod error;
mod input;
mod report;

pub use check::Checker;
pub use config::{write_default_config, CheckConfig, ConfigError, LogFormat, LoggingConfig};
pub use dispatcher::Dispatcher;
pub use error::CheckError;
pub use input::{parse_event_description, read_event_description};
pub use report::{Dispatch, RunOutcome, RunReport};
