// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pcr-storage: file-backed collaborators for the cycle tracker
//!
//! - [`JsonFileStore`] keeps the latest export bundle in one JSON file
//! - [`LogFileSink`] appends log entries as JSON lines, keeping only the tail

mod json_store;
mod log_file;

pub use json_store::JsonFileStore;
pub use log_file::{read_entries, LogFileSink, DEFAULT_MAX_LINES};
