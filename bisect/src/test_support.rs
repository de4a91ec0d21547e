//! Test-only scripted collaborators for driving the loop without subprocesses.

use std::cell::{Cell, RefCell};

use anyhow::{Result, anyhow};

use crate::core::types::RevisionId;
use crate::io::tester::{TestOutput, TestRunner};
use crate::io::vcs::Vcs;

/// In-memory working copy implementing both collaborator traits.
///
/// Sync sets the current revision and records it; the test command answers
/// from a revision-to-output function, so a single instance can be passed as
/// both the VCS and the test runner.
pub struct ScriptedWorkingCopy {
    current: Cell<Option<RevisionId>>,
    /// Sync requests in order, for asserting the probe sequence.
    pub synced: RefCell<Vec<RevisionId>>,
    output_for: Box<dyn Fn(RevisionId) -> Vec<u8>>,
    fail_sync_at: Option<RevisionId>,
    fail_test_at: Option<RevisionId>,
}

impl ScriptedWorkingCopy {
    pub fn new(output_for: impl Fn(RevisionId) -> Vec<u8> + 'static) -> Self {
        Self {
            current: Cell::new(None),
            synced: RefCell::new(Vec::new()),
            output_for: Box::new(output_for),
            fail_sync_at: None,
            fail_test_at: None,
        }
    }

    /// Make sync fail when asked for `rev`.
    pub fn with_sync_failure(mut self, rev: RevisionId) -> Self {
        self.fail_sync_at = Some(rev);
        self
    }

    /// Make the test command fail when run at `rev`.
    pub fn with_test_failure(mut self, rev: RevisionId) -> Self {
        self.fail_test_at = Some(rev);
        self
    }
}

impl Vcs for ScriptedWorkingCopy {
    fn sync(&self, rev: RevisionId) -> Result<()> {
        if self.fail_sync_at == Some(rev) {
            return Err(anyhow!("scripted sync failure at r{rev}"));
        }
        self.current.set(Some(rev));
        self.synced.borrow_mut().push(rev);
        Ok(())
    }
}

impl TestRunner for ScriptedWorkingCopy {
    fn run(&self) -> Result<TestOutput> {
        let rev = self
            .current
            .get()
            .ok_or_else(|| anyhow!("test run before any sync"))?;
        if self.fail_test_at == Some(rev) {
            return Err(anyhow!("scripted test failure at r{rev}"));
        }
        Ok(TestOutput {
            stdout: (self.output_for)(rev),
            stderr: format!("tested r{rev}\n").into_bytes(),
        })
    }
}
