// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    Project::empty()
        .powny()
        .args(&["--help"])
        .passes()
        .stdout_has("check")
        .stdout_has("create-config");
}

#[test]
fn check_help_describes_event_desc() {
    Project::empty()
        .powny()
        .args(&["check", "--help"])
        .passes()
        .stdout_has("--event-desc")
        .stdout_has("--rules-path")
        .stdout_has("--strict");
}

#[test]
fn version_names_the_binary() {
    Project::empty()
        .powny()
        .args(&["--version"])
        .passes()
        .stdout_has("powny");
}

#[test]
fn check_requires_event_desc() {
    Project::with_foo_rule()
        .powny()
        .args(&["check", "-r", "rules"])
        .fails()
        .stderr_has("--event-desc");
}

#[test]
fn short_debug_flag_enables_debug_logs() {
    Project::with_foo_rule()
        .powny()
        .args(&["-d", "check", "-r", "rules", "-e", "-"])
        .stdin("host: foo\n")
        .passes()
        .stderr_has("not JSON, trying YAML");
}
