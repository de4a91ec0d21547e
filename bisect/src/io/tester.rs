//! Test command adapter.
//!
//! The [`TestRunner`] trait decouples the bisection loop from the
//! user-supplied test command. The command is invoked with no
//! bisection-specific arguments; its stdout is the comparison signal and its
//! stderr is diagnostics only. Tests use scripted runners that return
//! predetermined outputs without spawning processes.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

use crate::io::process::run_command;

/// Captured result of one test command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutput {
    /// Exact primary output, compared byte-for-byte between revisions.
    pub stdout: Vec<u8>,
    /// Diagnostic output, persisted per revision and never compared.
    pub stderr: Vec<u8>,
}

/// Abstraction over the user-supplied test command.
pub trait TestRunner {
    /// Run the test command against the currently synced working copy.
    fn run(&self) -> Result<TestOutput>;
}

/// Runs the test command as a subprocess in the working directory.
#[derive(Debug, Clone)]
pub struct CommandTestRunner {
    command: Vec<String>,
    workdir: PathBuf,
    timeout: Option<Duration>,
    output_limit_bytes: usize,
}

impl CommandTestRunner {
    /// Build a runner from a shell-style command line (split with
    /// `shell-words`, not handed to a shell).
    pub fn from_command_line(
        line: &str,
        workdir: impl Into<PathBuf>,
        timeout: Option<Duration>,
        output_limit_bytes: usize,
    ) -> Result<Self> {
        let command =
            shell_words::split(line).with_context(|| format!("parse test command: {line}"))?;
        if command.is_empty() {
            return Err(anyhow!("test command must not be empty"));
        }
        Ok(Self {
            command,
            workdir: workdir.into(),
            timeout,
            output_limit_bytes,
        })
    }
}

impl TestRunner for CommandTestRunner {
    #[instrument(skip_all)]
    fn run(&self) -> Result<TestOutput> {
        let mut cmd = Command::new(&self.command[0]);
        cmd.args(&self.command[1..]).current_dir(&self.workdir);
        let output = run_command(cmd, self.timeout, self.output_limit_bytes)
            .with_context(|| format!("run {}", self.command.join(" ")))?;

        if output.timed_out {
            return Err(anyhow!(
                "test command timed out after {:?}",
                self.timeout.unwrap_or_default()
            ));
        }
        if !output.status.success() {
            return Err(anyhow!(
                "test command failed with status {:?}",
                output.status.code()
            ));
        }
        // A partial capture cannot be compared byte-for-byte.
        if output.stdout_truncated > 0 {
            return Err(anyhow!(
                "test output exceeded the capture limit by {} bytes",
                output.stdout_truncated
            ));
        }

        let mut stderr = output.stderr;
        if output.stderr_truncated > 0 {
            stderr.extend_from_slice(
                format!("\n[test stderr truncated {} bytes]\n", output.stderr_truncated)
                    .as_bytes(),
            );
        }

        debug!(stdout_bytes = output.stdout.len(), "test command captured");
        Ok(TestOutput {
            stdout: output.stdout,
            stderr,
        })
    }
}
