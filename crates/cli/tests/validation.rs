// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation flags and self-check through the CLI

#![allow(clippy::unwrap_used)]

mod common;

use common::Project;
use predicates::prelude::*;

#[test]
fn flag_updates_persist_across_transitions() {
    let project = Project::initialized();

    project
        .pcr()
        .args(["flag", "check_3", "pass", "--details", "phase logic reviewed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("check_3 passed (1/5 passing)"));
    project.run(&["next"]);
    project.run(&["next"]);

    let flag = &project.state_json()["state"]["validation"]["check_3"];
    assert_eq!(flag["passed"], true);
    assert_eq!(flag["details"], "phase logic reviewed");
    assert_eq!(flag["description"], "Phase selection logic");
}

#[test]
fn check_lists_each_issue_and_fails() {
    let project = Project::initialized();
    project.run(&["flag", "check_1", "pass"]);

    project
        .pcr()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Self-check failed:"))
        .stdout(predicate::str::contains("Validation check failed: check_2"))
        .stdout(predicate::str::contains("Validation check failed: check_1").not())
        .stdout(predicate::str::contains(
            "No artifacts generated for current phase: PLANNER",
        ))
        .stderr(predicate::str::contains("Self-check found 5 issues"));
}

#[test]
fn check_passes_with_flags_and_artifact() {
    let project = Project::initialized();
    for n in 1..=5 {
        project.run(&["flag", &format!("check_{}", n), "pass"]);
    }
    project.run(&["artifact", "doc", "plan.md", "--description", "initial plan"]);

    project
        .pcr()
        .arg("check")
        .assert()
        .success()
        .stdout("Self-check passed\n");
}

#[test]
fn check_json_reports_issues() {
    let project = Project::initialized();
    project.run(&["artifact", "doc", "plan.md"]);

    let output = project
        .pcr()
        .args(["check", "--format", "json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["issues"].as_array().unwrap().len(), 5);
}

#[test]
fn flags_come_from_config() {
    let project = Project::empty();
    let config = project.path().join("pcr.toml");
    std::fs::write(
        &config,
        r#"
agent_id = "release-bot"

[[flags]]
name = "lint"
description = "Lints clean"

[[flags]]
name = "tests"
description = "Tests green"
initial = true
"#,
    )
    .unwrap();

    let pcr = |args: &[&str]| {
        let mut cmd = project.pcr();
        cmd.arg("--config").arg(&config).args(args);
        cmd
    };

    pcr(&["init"]).assert().success();
    pcr(&["flag", "check_1", "pass"]).assert().failure();
    pcr(&["flag", "lint", "pass"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lint passed (2/2 passing)"));

    let state = project.state_json();
    assert_eq!(state["meta"]["agent_id"], "release-bot");
    assert_eq!(state["state"]["validation"]["tests"]["passed"], true);
}
