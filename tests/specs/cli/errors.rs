// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fatal error specs
//!
//! Failures that make a check meaningless exit non-zero with suggestions.

use crate::prelude::*;

#[test]
fn missing_rules_path_is_fatal() {
    let project = Project::with_foo_rule();
    project
        .powny()
        .args(&["check", "-e", "events.json"])
        .fails()
        .stderr_has("No rules path given")
        .stderr_has("powny check -r");
}

#[test]
fn rules_path_must_be_a_directory() {
    let project = Project::with_foo_rule();
    project
        .powny()
        .args(&["check", "-r", "events.json", "-e", "events.json"])
        .fails()
        .stderr_has("is not a directory");
}

#[test]
fn no_handlers_is_fatal() {
    let project = Project::empty();
    project.file("rules/README.md", "no modules here");
    project.file("events.json", TWO_EVENTS);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json"])
        .fails()
        .stderr_has("No handlers found");
}

#[test]
fn only_broken_modules_lists_their_errors() {
    let project = Project::empty();
    project.file("rules/broken.toml", BROKEN_RULE);
    project.file("events.json", TWO_EVENTS);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "events.json"])
        .fails()
        .stderr_has("No handlers found")
        .stderr_has("-> broken:");
}

#[test]
fn scalar_event_description_is_fatal() {
    let project = Project::with_foo_rule();
    project.file("bad.json", "42");

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "bad.json"])
        .fails()
        .stderr_has("Invalid event description")
        .stderr_has("not number");
}

#[test]
fn array_of_scalars_is_fatal() {
    let project = Project::with_foo_rule();
    project.file("bad.json", r#"["foo", "bar"]"#);

    project
        .powny()
        .args(&["check", "-r", "rules", "-e", "bad.json"])
        .fails()
        .stderr_has("Invalid event description");
}

#[test]
fn missing_event_file_is_fatal() {
    Project::with_foo_rule()
        .powny()
        .args(&["check", "-r", "rules", "-e", "nope.json"])
        .fails()
        .stderr_has("Can't read event description");
}

#[test]
fn invalid_config_is_fatal() {
    let project = Project::with_foo_rule();
    project.file("powny.toml", "rules-path = [");

    project
        .powny()
        .args(&["--config", "powny.toml", "check", "-e", "events.json"])
        .fails()
        .stderr_has("Invalid config");
}
