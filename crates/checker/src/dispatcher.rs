// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routing events to matching handlers

use crate::report::RunReport;
use powny_core::{Event, ExecutionContext};
use powny_rules::{FieldMatcher, HandlerMap, Matcher};

/// Invokes every matching handler for every event.
///
/// Events are processed in order. For each event, handlers are tried in
/// qualified-name order. A failing handler is logged and recorded; the
/// remaining handlers and events still run.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<M = FieldMatcher> {
    matcher: M,
}

impl<M: Matcher> Dispatcher<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn dispatch(
        &self,
        handlers: &HandlerMap,
        events: &[Event],
        ctx: &mut ExecutionContext,
    ) -> RunReport {
        let mut report = RunReport {
            job_id: ctx.job_id().to_string(),
            events: events.len(),
            handlers: handlers.keys().cloned().collect(),
            ..RunReport::default()
        };

        for (index, event) in events.iter().enumerate() {
            let span = tracing::info_span!("event", index, description = event.description());
            let _guard = span.enter();

            let mut matched = false;
            for (name, handler) in handlers {
                if !self.matcher.matches(handler.as_ref(), event) {
                    continue;
                }
                matched = true;

                ctx.enter_handler(name);
                let start = std::time::Instant::now();
                let result = handler.call(event, ctx);
                let elapsed = start.elapsed();
                ctx.leave_handler();

                match result {
                    Ok(()) => {
                        tracing::info!(
                            handler = %name,
                            elapsed_ms = elapsed.as_millis() as u64,
                            "handler finished"
                        );
                        report.record(index, name, None);
                    }
                    Err(error) => {
                        tracing::error!(
                            handler = %name,
                            %event,
                            error = %error,
                            elapsed_ms = elapsed.as_millis() as u64,
                            "can't execute rule"
                        );
                        report.record(index, name, Some(error.to_string()));
                    }
                }
            }

            if !matched {
                tracing::info!(%event, "no handlers matched");
            }
        }

        report.notifications = ctx.outbox().sent().to_vec();
        report
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
