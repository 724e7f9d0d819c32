// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deciding whether a handler applies to an event

use crate::handler::Handler;
use powny_core::Event;
use serde_json::Value;

/// Predicate matcher consulted for every (handler, event) pair
pub trait Matcher {
    fn matches(&self, handler: &dyn Handler, event: &Event) -> bool;
}

impl<F> Matcher for F
where
    F: Fn(&dyn Handler, &Event) -> bool,
{
    fn matches(&self, handler: &dyn Handler, event: &Event) -> bool {
        self(handler, event)
    }
}

/// Matches when every filter field is present on the event with an
/// accepted value. An empty filter matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMatcher;

impl Matcher for FieldMatcher {
    fn matches(&self, handler: &dyn Handler, event: &Event) -> bool {
        handler
            .filter()
            .iter()
            .all(|(field, expected)| match event.get(field) {
                Some(actual) => accepts(expected, actual),
                None => false,
            })
    }
}

fn accepts(expected: &Value, actual: &Value) -> bool {
    match expected {
        Value::Array(options) => options.iter().any(|option| option == actual),
        other => other == actual,
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
