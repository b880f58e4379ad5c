// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::TrackerConfig;

fn default_set() -> FlagSet {
    FlagSet::from_defs(&TrackerConfig::default().flags)
}

#[test]
fn flags_start_at_declared_initial_value() {
    let mut defs = TrackerConfig::default().flags;
    defs[1].initial = true;
    let set = FlagSet::from_defs(&defs);

    assert!(!set.get("check_1").unwrap().passed);
    assert!(set.get("check_2").unwrap().passed);
    assert_eq!(set.get("check_2").unwrap().description, "Seed intent restated");
}

#[test]
fn set_updates_declared_flag() {
    let mut set = default_set();
    let now = Utc::now();
    assert!(set.set("check_3", true, Some("ok".into()), now));

    let flag = set.get("check_3").unwrap();
    assert!(flag.passed);
    assert_eq!(flag.details.as_deref(), Some("ok"));
    assert_eq!(flag.updated_at, Some(now));
}

#[test]
fn set_refuses_undeclared_flag() {
    let mut set = default_set();
    let before = set.clone();
    assert!(!set.set("check_6", true, None, Utc::now()));
    assert_eq!(set, before);
    assert!(!set.contains("check_6"));
}

#[test]
fn failing_lists_false_flags_in_name_order() {
    let mut set = default_set();
    set.set("check_2", true, None, Utc::now());
    set.set("check_4", true, None, Utc::now());

    let failing: Vec<&str> = set.failing().collect();
    assert_eq!(failing, vec!["check_1", "check_3", "check_5"]);
}

#[test]
fn compliance_is_ratio_of_passing_flags() {
    let mut set = default_set();
    assert_eq!(set.compliance(), 0.0);
    set.set("check_1", true, None, Utc::now());
    assert!((set.compliance() - 0.2).abs() < f64::EPSILON);
    assert_eq!(FlagSet::default().compliance(), 1.0);
}

#[test]
fn flag_set_serializes_as_plain_map() {
    let set = default_set();
    let json = serde_json::to_value(&set).unwrap();
    assert!(json.is_object());
    assert_eq!(json["check_1"]["passed"], serde_json::json!(false));
}

#[test]
fn restore_keeps_declared_description() {
    let mut set = default_set();
    let saved = ValidationFlag {
        description: "stale description".into(),
        passed: true,
        details: Some("from disk".into()),
        updated_at: None,
    };
    assert!(set.restore("check_5", &saved));
    assert!(!set.restore("check_9", &saved));

    let flag = set.get("check_5").unwrap();
    assert!(flag.passed);
    assert_eq!(flag.description, "Artifact generation");
    assert_eq!(flag.details.as_deref(), Some("from disk"));
}
