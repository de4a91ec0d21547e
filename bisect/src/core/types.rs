//! Shared deterministic types for bisection core logic.
//!
//! These types define stable contracts between core components. They should not
//! depend on external state or I/O and must remain deterministic across runs.

use serde::Serialize;

/// Revision identifier in a linear history.
///
/// Ordering and identity are the only semantics attached to the value.
pub type RevisionId = u64;

/// Current known bracket around the behavior change.
///
/// `low` behaves like the original good revision, `high` like the bad one.
/// Invariant: `low < high`. Narrowing is monotonic: `low` only ever rises and
/// `high` only ever falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub low: RevisionId,
    pub high: RevisionId,
}

impl Range {
    pub fn new(low: RevisionId, high: RevisionId) -> Self {
        Self { low, high }
    }

    /// True once the bracket holds only two adjacent revisions.
    pub fn is_collapsed(&self) -> bool {
        self.high == self.low + 1
    }

    /// Integer midpoint of the bracket, `floor((low + high) / 2)`.
    pub fn midpoint(&self) -> RevisionId {
        self.low + (self.high - self.low) / 2
    }

    /// Record a revision that behaves like the low anchor.
    pub fn raise_low(&mut self, rev: RevisionId) {
        self.low = self.low.max(rev);
    }

    /// Record a revision that behaves like the high anchor.
    pub fn lower_high(&mut self, rev: RevisionId) {
        self.high = self.high.min(rev);
    }
}

/// Which reference output a probed revision's stdout matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Low,
    High,
}

/// Next revision to probe, or the signal that the bracket is closed.
///
/// Callers must treat [`Sample::Exhausted`] as normal termination, never as a
/// revision number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Value(RevisionId),
    Exhausted,
}

/// Lifecycle phase of a bisection run.
///
/// The two bootstrap phases capture the anchor reference outputs and skip
/// classification; every later observation is classified against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BootstrapLow,
    BootstrapHigh,
    Bisecting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_stays_strictly_inside_the_bracket() {
        for gap in 2..=10u64 {
            let range = Range::new(100, 100 + gap);
            let mid = range.midpoint();
            assert!(range.low < mid && mid < range.high, "gap {gap} gave {mid}");
            assert_eq!(mid, (range.low + range.high) / 2);
        }
    }

    #[test]
    fn collapsed_only_at_gap_one() {
        assert!(Range::new(10, 11).is_collapsed());
        assert!(!Range::new(10, 12).is_collapsed());
    }

    #[test]
    fn narrowing_is_monotonic() {
        let mut range = Range::new(10, 20);
        range.raise_low(15);
        assert_eq!(range.low, 15);
        range.raise_low(12);
        assert_eq!(range.low, 15, "low must never move back down");
        range.lower_high(17);
        assert_eq!(range.high, 17);
        range.lower_high(19);
        assert_eq!(range.high, 17, "high must never move back up");
    }
}
