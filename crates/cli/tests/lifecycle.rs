// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase lifecycle through the CLI

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::Project;
use predicates::prelude::*;

#[test]
fn init_creates_state_in_planner() {
    let project = Project::empty();

    project
        .pcr()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tracker tracker_"))
        .stdout(predicate::str::contains("Current phase: PLANNER"));

    let state = project.state_json();
    assert_eq!(state["state"]["current_phase"], "PLANNER");
    assert_eq!(state["state"]["phases"]["PLANNER"]["status"], "active");
    assert_eq!(state["state"]["phases"]["MAKER"]["status"], "pending");
    assert_eq!(state["meta"]["version"], "1.1");
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let project = Project::initialized();
    let before = project.state_json()["meta"]["tracker_id"].clone();

    project
        .pcr()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("pcr init --force"));

    assert_eq!(project.state_json()["meta"]["tracker_id"], before);

    project.run(&["init", "--force"]);
    assert_ne!(project.state_json()["meta"]["tracker_id"], before);
}

#[test]
fn state_path_can_come_from_env() {
    let project = Project::empty();
    let custom = project.path().join("custom.json");

    assert_cmd::Command::cargo_bin("pcr")
        .unwrap()
        .current_dir(project.path())
        .env("PCR_STATE", &custom)
        .arg("init")
        .assert()
        .success();

    assert!(custom.exists());
    assert!(!project.state_path().exists());
}

#[test]
fn next_walks_the_cycle() {
    let project = Project::initialized();

    project
        .pcr()
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("PLANNER → MAKER"));
    assert_eq!(project.current_phase(), "MAKER");

    for _ in 0..3 {
        project.run(&["next"]);
    }
    assert_eq!(project.current_phase(), "ORCHESTRATOR");

    project
        .pcr()
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("ORCHESTRATOR → PLANNER"))
        .stdout(predicate::str::contains("Cycle complete (1 so far)"));

    let state = project.state_json();
    assert_eq!(state["state"]["cycle_count"], 1);
    assert_eq!(state["state"]["phases"]["CHECKER"]["completions"], 1);
}

#[test]
fn advance_accepts_any_case() {
    let project = Project::initialized();

    project.run(&["advance", "maker"]);
    project.run(&["advance", "CHECKER"]);

    assert_eq!(project.current_phase(), "CHECKER");
}

#[test]
fn status_shows_phase_table_and_flags() {
    let project = Project::initialized();
    project.run(&["next"]);

    project
        .pcr()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Phase:   MAKER (active)"))
        .stdout(predicate::str::is_match(r"PLANNER\s+completed\s+0\s+1").unwrap())
        .stdout(predicate::str::contains("Validation: 0/5 passed"))
        .stdout(predicate::str::contains("[ ] check_1"));
}

#[test]
fn status_json_is_the_snapshot() {
    let project = Project::initialized();

    let output = project
        .pcr()
        .args(["status", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["current_phase"], "PLANNER");
    assert_eq!(snapshot["total_artifacts"], 0);
    assert_eq!(snapshot["cycle_count"], 0);
}

#[test]
fn fail_then_retry() {
    let project = Project::initialized();

    project
        .pcr()
        .args(["fail", "--reason", "runtime missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked PLANNER as failed"));
    let state = project.state_json();
    assert_eq!(state["state"]["phases"]["PLANNER"]["status"], "failed");
    assert_eq!(
        state["state"]["phases"]["PLANNER"]["error"],
        "runtime missing"
    );

    project
        .pcr()
        .arg("retry")
        .assert()
        .success()
        .stdout(predicate::str::contains("Retrying PLANNER"));
    assert_eq!(
        project.state_json()["state"]["phases"]["PLANNER"]["status"],
        "active"
    );
}

#[test]
fn intent_is_echoed_and_kept() {
    let project = Project::initialized();

    project
        .pcr()
        .args(["intent", "ship the parser"])
        .assert()
        .success()
        .stdout("ship the parser\n");

    assert_eq!(
        project.state_json()["state"]["last_intent"],
        "ship the parser"
    );
}
