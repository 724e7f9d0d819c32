// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Check dispatch specs
//!
//! Events reach the handlers whose filters match; failures are reported
//! without stopping the run.

use crate::prelude::*;

#[test]
fn matching_handler_runs_once() {
    Project::with_foo_rule()
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json"])
        .passes()
        .stdout_has("Events: 2  Handlers: 1")
        .stdout_has("[0] foo:on_event ok")
        .stdout_lacks("[1]")
        .stdout_has("Result: 1 dispatched, all ok")
        .stderr_has("foo/1 matched");
}

#[test]
fn json_report() {
    let run = Project::with_foo_rule()
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json", "-o", "json"])
        .passes();

    let report = run.json();
    similar_asserts::assert_eq!(report["events"], 2);
    similar_asserts::assert_eq!(report["handlers"], serde_json::json!(["foo:on_event"]));
    similar_asserts::assert_eq!(
        report["dispatches"],
        serde_json::json!([{"event": 0, "handler": "foo:on_event"}])
    );
}

#[test]
fn yaml_events_from_stdin() {
    Project::with_foo_rule()
        .powny()
        .args(&["check", "-r", "rules", "-e", "-"])
        .stdin("host: foo\nservice: disk\n")
        .passes()
        .stdout_has("Events: 1")
        .stdout_has("[0] foo:on_event ok");
}

#[test]
fn unmatched_events_still_pass() {
    let project = Project::with_foo_rule();
    project.file("other.json", r#"{"host": "baz"}"#);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "other.json"])
        .passes()
        .stdout_has("Result: no handler matched any event");
}

#[test]
fn failing_handler_does_not_stop_others() {
    let project = Project::with_foo_rule();
    project.file("rules/deny.toml", FAILING_RULE);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json"])
        .passes()
        .stdout_has("[0] deny:on_event FAILED: foo rejected")
        .stdout_has("[0] foo:on_event ok")
        .stdout_has("[1] deny:on_event FAILED: bar rejected")
        .stdout_has("Result: 3 dispatched, 2 failed")
        .stderr_has("can't execute rule");
}

#[test]
fn strict_fails_on_handler_failures() {
    let project = Project::with_foo_rule();
    project.file("rules/deny.toml", FAILING_RULE);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json", "--strict"])
        .fails()
        .stdout_has("2 failed");
}

#[test]
fn broken_module_is_reported_alongside_working_ones() {
    let project = Project::with_foo_rule();
    project.file("rules/broken.toml", BROKEN_RULE);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json"])
        .passes()
        .stdout_has("Load errors: 1")
        .stdout_has("! broken:")
        .stdout_has("[0] foo:on_event ok")
        .stderr_has("can't load rule module");
}

#[test]
fn nested_modules_and_hidden_dirs() {
    let project = Project::with_foo_rule();
    project.file("rules/team/foo.toml", FOO_RULE);
    project.file("rules/.git/foo.toml", FOO_RULE);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json"])
        .passes()
        .stdout_has("[0] team.foo:on_event ok")
        .stdout_lacks(".git");
}

#[test]
fn no_recursive_skips_subdirectories() {
    let project = Project::with_foo_rule();
    project.file("rules/team/foo.toml", FOO_RULE);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json", "--no-recursive"])
        .passes()
        .stdout_has("Handlers: 1")
        .stdout_lacks("team.foo");
}

#[test]
fn entry_point_selects_handlers() {
    let project = Project::empty();
    project.file(
        "rules/alt.toml",
        "[handler.on_alert]\nmatch = { host = \"foo\" }\n",
    );
    project.file("events.json", TWO_EVENTS);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json"])
        .fails()
        .stderr_has("No handlers found");

    project
        .powny()
        .args(&[
            "check",
            "-r",
            "rules",
            "-e",
            "events.json",
            "--entry-point",
            "on_alert",
        ])
        .passes()
        .stdout_has("[0] alt:on_alert ok");
}
