//! Probe schedule for the bisection loop.

use crate::core::types::{Range, Sample};

/// Stateful producer of the next revision to probe.
///
/// The schedule is fixed: the low anchor first, then the high anchor, then the
/// midpoint of the live range on every later pull. The range is passed fresh
/// on each call, so narrowing applied by the caller between pulls shifts the
/// midpoints. The pull counter is monotonic; a sampler is not restartable.
#[derive(Debug, Default)]
pub struct Sampler {
    pulls: u32,
}

impl Sampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull the next probe target given the current bracket.
    ///
    /// Signals [`Sample::Exhausted`] once the bracket has collapsed. The check
    /// runs before any value is computed, so a degenerate initial range
    /// exhausts immediately instead of yielding its anchors.
    pub fn next(&mut self, range: Range) -> Sample {
        if range.is_collapsed() {
            return Sample::Exhausted;
        }
        let value = match self.pulls {
            0 => range.low,
            1 => range.high,
            _ => range.midpoint(),
        };
        self.pulls += 1;
        Sample::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Range;

    #[test]
    fn first_two_pulls_yield_the_anchors_in_order() {
        let range = Range::new(920, 967);
        let mut sampler = Sampler::new();
        assert_eq!(sampler.next(range), Sample::Value(920));
        assert_eq!(sampler.next(range), Sample::Value(967));
    }

    #[test]
    fn later_pulls_follow_the_live_range() {
        let mut range = Range::new(10, 30);
        let mut sampler = Sampler::new();
        sampler.next(range);
        sampler.next(range);

        assert_eq!(sampler.next(range), Sample::Value(20));
        range.raise_low(20);
        assert_eq!(sampler.next(range), Sample::Value(25));
        range.lower_high(25);
        assert_eq!(sampler.next(range), Sample::Value(22));
    }

    #[test]
    fn collapsed_range_exhausts_instead_of_yielding() {
        let mut sampler = Sampler::new();
        assert_eq!(sampler.next(Range::new(5, 6)), Sample::Exhausted);
        assert_eq!(sampler.next(Range::new(5, 6)), Sample::Exhausted);
    }

    #[test]
    fn exhaustion_applies_even_after_anchor_pulls() {
        let mut range = Range::new(10, 12);
        let mut sampler = Sampler::new();
        assert_eq!(sampler.next(range), Sample::Value(10));
        assert_eq!(sampler.next(range), Sample::Value(12));
        assert_eq!(sampler.next(range), Sample::Value(11));
        range.raise_low(11);
        assert_eq!(sampler.next(range), Sample::Exhausted);
    }

    #[test]
    fn midpoint_pulls_stay_strictly_inside_the_bracket() {
        for gap in 2..=9u64 {
            let range = Range::new(50, 50 + gap);
            let mut sampler = Sampler::new();
            sampler.next(range);
            sampler.next(range);
            match sampler.next(range) {
                Sample::Value(v) => {
                    assert!(range.low < v && v < range.high, "gap {gap} gave {v}");
                }
                Sample::Exhausted => panic!("gap {gap} must not exhaust"),
            }
        }
    }
}
