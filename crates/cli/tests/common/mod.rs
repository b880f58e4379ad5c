// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]
#![allow(deprecated)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary directory holding one tracker state file
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// A project with `pcr init` already run
    pub fn initialized() -> Self {
        let project = Self::empty();
        project.pcr().arg("init").assert().success();
        project
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("pcr_state.json")
    }

    /// `pcr` pointed at this project's state file, isolated from the caller's env
    pub fn pcr(&self) -> Command {
        let mut cmd = Command::cargo_bin("pcr").expect("pcr binary should build");
        cmd.current_dir(self.dir.path())
            .env_remove("PCR_STATE")
            .env_remove("PCR_CONFIG")
            .env_remove("PCR_LOG_FILE")
            .env_remove("PCR_LOG")
            .arg("--state")
            .arg(self.state_path());
        cmd
    }

    /// Run `pcr` with `args` and require success
    pub fn run(&self, args: &[&str]) {
        self.pcr().args(args).assert().success();
    }

    /// The saved export bundle
    pub fn state_json(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.state_path()).expect("state file should exist");
        serde_json::from_str(&raw).expect("state file should be JSON")
    }

    pub fn current_phase(&self) -> String {
        self.state_json()["state"]["current_phase"]
            .as_str()
            .expect("current_phase should be a string")
            .to_string()
    }
}
