//! Random draws for path generation.
//!
//! Everything random in the builder and the node strategies goes through
//! [`RandomSource`], so a run can be replayed with a seeded generator or a
//! scripted sequence of values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random draws.
///
/// Only [`RandomSource::next`] is required; the other draws are derived from
/// it so that a scripted source replays identically through every method.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn next(&mut self) -> f64;

    /// Uniform integer in `[lo, hi]` (inclusive on both ends).
    fn next_int(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        let offset = (self.next() * span).floor() as i64;
        lo + offset.min(hi - lo)
    }

    /// Bernoulli trial that succeeds with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next() < p
    }

    /// Uniform index into a sequence of `len` elements. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl<'r> dyn RandomSource + 'r {
    /// Uniform choice over a non-empty slice.
    ///
    /// Panics if `items` is empty. All lookup tables handed to this are
    /// static and non-empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_index(items.len())]
    }
}

// ============================================================================
// RNG ADAPTER
// ============================================================================

/// Adapter exposing any `rand` generator as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

/// Seedable source backed by `StdRng`.
pub type SeededSource = RngSource<StdRng>;

impl RngSource<StdRng> {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Non-reproducible source seeded from the OS.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

// ============================================================================
// SCRIPTED SOURCE
// ============================================================================

/// Replays a fixed cycle of values. Used for deterministic replay.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    index: usize,
}

impl ScriptedSource {
    /// Values are clamped into `[0, 1)`. An empty script behaves as `[0.0]`.
    pub fn new(values: Vec<f64>) -> Self {
        let mut values: Vec<f64> = values
            .into_iter()
            .map(|v| v.clamp(0.0, 0.999_999))
            .collect();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, index: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Rewind to the first scripted value.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Number of draws taken since creation or the last reset.
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedSource {
    fn next(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_cycles_and_resets() {
        let mut src = ScriptedSource::new(vec![0.1, 0.5, 0.9]);
        assert_eq!(src.next(), 0.1);
        assert_eq!(src.next(), 0.5);
        assert_eq!(src.next(), 0.9);
        assert_eq!(src.next(), 0.1);
        assert_eq!(src.draws(), 4);
        src.reset();
        assert_eq!(src.next(), 0.1);
    }

    #[test]
    fn test_scripted_clamps_out_of_range() {
        let mut src = ScriptedSource::new(vec![-1.0, 1.0]);
        assert_eq!(src.next(), 0.0);
        assert!(src.next() < 1.0);
        let mut empty = ScriptedSource::new(vec![]);
        assert_eq!(empty.next(), 0.0);
    }

    #[test]
    fn test_next_int_inclusive_bounds() {
        let mut low = ScriptedSource::constant(0.0);
        assert_eq!(low.next_int(2, 3), 2);
        let mut high = ScriptedSource::constant(0.999);
        assert_eq!(high.next_int(2, 3), 3);
        let mut mid = ScriptedSource::constant(0.5);
        assert_eq!(mid.next_int(2, 3), 3);
        assert_eq!(mid.next_int(5, 5), 5);
        assert_eq!(mid.next_int(5, 1), 5);
    }

    #[test]
    fn test_chance() {
        let mut src = ScriptedSource::new(vec![0.39, 0.4]);
        assert!(src.chance(0.4));
        assert!(!src.chance(0.4));
        assert!(!src.chance(0.0));
    }

    #[test]
    fn test_pick_via_dyn() {
        let mut src = ScriptedSource::new(vec![0.0, 0.5, 0.99]);
        let items = ["a", "b", "c"];
        let rng: &mut dyn RandomSource = &mut src;
        assert_eq!(*rng.pick(&items), "a");
        assert_eq!(*rng.pick(&items), "b");
        assert_eq!(*rng.pick(&items), "c");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = RngSource::seeded(7);
        let mut b = RngSource::seeded(7);
        for _ in 0..32 {
            let x = a.next();
            assert_eq!(x, b.next());
            assert!((0.0..1.0).contains(&x));
        }
    }
}
