//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`runner`] - [`ScriptedRunner`](runner::ScriptedRunner), a
//!   [`CommandRunner`](crate::port::CommandRunner) with rule-based replies
//!   and a call log.
//! - [`progress`] - [`RecordingProgress`](progress::RecordingProgress),
//!   which keeps every emitted event.

pub mod progress;
pub mod runner;
