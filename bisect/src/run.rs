//! Orchestration for a full bisection run.

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::core::sampler::Sampler;
use crate::core::state::RunState;
use crate::core::types::{Range, Sample};
use crate::io::artifacts::{ArtifactStore, RunSummary};
use crate::io::tester::TestRunner;
use crate::io::vcs::Vcs;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Adjacent revisions bracketing the change: the test output differs
    /// between `boundary.low` and `boundary.high`.
    pub boundary: Range,
    /// Revisions synced and tested, anchors included.
    pub revisions_tested: u32,
}

/// Drive the bisection loop until the bracket collapses.
///
/// Strictly sequential: each probe's sync completes before its test runs, and
/// the captured output is persisted before classification. The first two
/// probes establish the reference outputs for the anchors; every later probe
/// narrows the range. Sync failures, test failures, identical anchors, and
/// unclassifiable output all abort immediately with no retry.
#[instrument(skip_all, fields(low = initial.low, high = initial.high))]
pub fn run_bisection<V: Vcs, T: TestRunner>(
    vcs: &V,
    tester: &T,
    store: &ArtifactStore,
    initial: Range,
) -> Result<RunOutcome> {
    let mut sampler = Sampler::new();
    let mut state = RunState::new(initial);
    let mut tested = 0u32;

    loop {
        let rev = match sampler.next(state.range()) {
            Sample::Value(rev) => rev,
            Sample::Exhausted => break,
        };

        vcs.sync(rev)
            .with_context(|| format!("sync working copy to r{rev}"))?;
        let output = tester
            .run()
            .with_context(|| format!("run test command at r{rev}"))?;
        store.write_revision(rev, &output.stdout, &output.stderr)?;
        tested += 1;

        state.record(rev, output.stdout)?;
        debug!(rev, range = ?state.range(), phase = ?state.phase(), "observation recorded");
    }

    let boundary = state.range();
    store.write_summary(&RunSummary {
        test_name: store.test_name().to_string(),
        initial,
        boundary,
        revisions_tested: tested,
    })?;
    info!(
        low = boundary.low,
        high = boundary.high,
        tested,
        "bisection complete"
    );
    Ok(RunOutcome {
        boundary,
        revisions_tested: tested,
    })
}
