// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Rule modules: handler discovery, parsing and matching

mod handler;
mod matcher;
mod parser;
mod source;
mod step;
mod template;

pub use handler::{FnHandler, Filter, Handler, HandlerError};
pub use matcher::{FieldMatcher, Matcher};
pub use parser::{parse_module, ParseError, RuleModule};
pub use source::{
    DirectoryRuleSource, HandlerMap, LoadErrors, LoadedRules, ModuleError, RegistryRuleSource,
    RuleSource, SourceError, DEFAULT_ENTRY_POINT,
};
pub use step::{LogLevel, ScriptedHandler, Step};
pub use template::{interpolate, render_value};
