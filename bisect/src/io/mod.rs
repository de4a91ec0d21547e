//! Side-effecting collaborators: working-copy sync, test execution, artifacts.
//!
//! Everything here talks to the filesystem or spawns processes. The bisection
//! loop only sees the [`vcs::Vcs`] and [`tester::TestRunner`] traits, so tests
//! substitute scripted implementations.

pub mod artifacts;
pub mod config;
pub mod process;
pub mod tester;
pub mod vcs;
