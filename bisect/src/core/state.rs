//! Run-owned state transitions for the bisection loop.
//!
//! [`RunState`] owns the live range, the phase machine, and the two reference
//! outputs. Recording an observation is a pure transition, so the whole
//! narrowing policy is testable without running any external process.

use std::fmt;

use crate::core::classifier::classify_output;
use crate::core::types::{Phase, Range, RevisionId, Side};

/// Observation that violates a bisection precondition or invariant.
///
/// Both variants are fatal: the run's assumptions no longer hold and no retry
/// can fix them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservationError {
    /// Output matched neither reference output. The test command is
    /// non-deterministic, or the behavior change is not a single clean
    /// transition.
    Inconsistent { revision: RevisionId },
    /// The two anchors produced identical output; there is no change to find
    /// inside the range.
    AnchorsIdentical { low: RevisionId, high: RevisionId },
}

impl fmt::Display for ObservationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inconsistent { revision } => write!(
                f,
                "output of r{revision} matches neither reference output \
                 (non-deterministic test command, or more than one behavior change in the range)"
            ),
            Self::AnchorsIdentical { low, high } => write!(
                f,
                "outputs of r{low} and r{high} are identical; nothing to bisect"
            ),
        }
    }
}

impl std::error::Error for ObservationError {}

/// Mutable state of one bisection run.
#[derive(Debug)]
pub struct RunState {
    initial: Range,
    range: Range,
    phase: Phase,
    // Reference outputs; meaningful only once their bootstrap phase has run.
    low_ref: Vec<u8>,
    high_ref: Vec<u8>,
}

impl RunState {
    pub fn new(initial: Range) -> Self {
        Self {
            initial,
            range: initial,
            phase: Phase::BootstrapLow,
            low_ref: Vec::new(),
            high_ref: Vec::new(),
        }
    }

    /// The user-supplied bracket the run started from.
    pub fn initial(&self) -> Range {
        self.initial
    }

    /// The live, narrowed bracket.
    pub fn range(&self) -> Range {
        self.range
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Record the captured stdout for `rev`, advancing the phase machine.
    ///
    /// The two bootstrap observations become the immutable reference outputs;
    /// the high bootstrap additionally requires the anchors to differ. Once
    /// bisecting, each observation narrows the range toward the boundary or
    /// fails as inconsistent.
    pub fn record(&mut self, rev: RevisionId, stdout: Vec<u8>) -> Result<(), ObservationError> {
        match self.phase {
            Phase::BootstrapLow => {
                self.low_ref = stdout;
                self.phase = Phase::BootstrapHigh;
                Ok(())
            }
            Phase::BootstrapHigh => {
                if stdout == self.low_ref {
                    return Err(ObservationError::AnchorsIdentical {
                        low: self.initial.low,
                        high: self.initial.high,
                    });
                }
                self.high_ref = stdout;
                self.phase = Phase::Bisecting;
                Ok(())
            }
            Phase::Bisecting => match classify_output(&stdout, &self.low_ref, &self.high_ref) {
                Some(Side::Low) => {
                    self.range.raise_low(rev);
                    Ok(())
                }
                Some(Side::High) => {
                    self.range.lower_high(rev);
                    Ok(())
                }
                None => Err(ObservationError::Inconsistent { revision: rev }),
            },
        }
    }
}
