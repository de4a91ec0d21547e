//! Automated output-change bisection over a linear revision history.
//!
//! Given a known-good and a known-bad revision and a test command whose stdout
//! is deterministic for a fixed tree state, the tool repeatedly syncs the
//! working copy to a probe revision, runs the test command, and narrows the
//! revision range until only the two adjacent revisions bracketing the change
//! remain. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (probe schedule, output
//!   classification, range narrowing). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting collaborators (working-copy sync, test command
//!   execution, artifact files). Isolated behind traits to enable mocking in
//!   tests.
//!
//! The [`run`] module coordinates core logic with I/O to drive a full
//! bisection; [`cli`] assembles the collaborators from command-line flags.

pub mod cli;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
