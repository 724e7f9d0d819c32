// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config specs
//!
//! `create-config` writes a starter file; `check` reads it.

use crate::prelude::*;

#[test]
fn create_config_at_explicit_path() {
    let project = Project::empty();
    project
        .powny()
        .args(&["--config", "conf/powny.toml", "create-config"])
        .passes()
        .stdout_has("Created");

    let content = project.read("conf/powny.toml");
    assert!(content.contains("entry-points = [\"on_event\"]"));
    assert!(content.contains("[logging]"));
}

#[test]
fn create_config_at_default_path() {
    let project = Project::empty();
    project.powny().args(&["create-config"]).passes();

    assert!(project.join(".config/powny-cli/config.toml").is_file());
}

#[test]
fn create_config_refuses_to_overwrite() {
    let project = Project::empty();
    project.file("powny.toml", "# mine\n");

    project
        .powny()
        .args(&["--config", "powny.toml", "create-config"])
        .fails()
        .stderr_has("already exists")
        .stderr_has("--force");
    similar_asserts::assert_eq!(project.read("powny.toml"), "# mine\n");

    project
        .powny()
        .args(&["--config", "powny.toml", "create-config", "--force"])
        .passes();
    assert!(project.read("powny.toml").contains("[logging]"));
}

#[test]
fn check_uses_rules_path_from_config() {
    let project = Project::with_foo_rule();
    project.file("powny.toml", "rules-path = \"rules\"\n");

    project
        .powny()
        .args(&["--config", "powny.toml", "check", "-e", "events.json"])
        .passes()
        .stdout_has("[0] foo:on_event ok");
}

#[test]
fn rules_path_flag_overrides_config() {
    let project = Project::with_foo_rule();
    project.file("powny.toml", "rules-path = \"missing\"\n");

    project
        .powny()
        .args(&[
            "--config",
            "powny.toml",
            "check",
            "-r",
            "rules",
            "-e",
            "events.json",
        ])
        .passes()
        .stdout_has("[0] foo:on_event ok");
}

#[test]
fn json_logging_from_config() {
    let project = Project::with_foo_rule();
    project.file(
        "powny.toml",
        "rules-path = \"rules\"\n\n[logging]\nformat = \"json\"\n",
    );

    project
        .powny()
        .args(&["--config", "powny.toml", "check", "-e", "events.json"])
        .passes()
        .stderr_has("\"message\":\"foo/1 matched\"");
}
