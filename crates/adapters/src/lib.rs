// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Collaborators for the cycle tracker: log sinks, store wrappers and the
//! background auto-saver

pub mod autosave;
pub mod sink;
pub mod store;
pub mod traced;

#[cfg(test)]
mod test_tracing;

pub use autosave::AutoSaver;
pub use sink::{NoOpSink, TracingSink};
pub use store::NoOpStore;
pub use traced::TracedStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use sink::FakeSink;
#[cfg(any(test, feature = "test-support"))]
pub use store::FakeStore;
