//! RNG module - injectable randomness for target selection
//!
//! The engine draws targets through the [`RandomSource`] trait so tests can
//! script exact selections. [`SimpleRng`] is the default source: a small
//! seedable LCG, good enough for picking quiz targets.

/// Source of uniform indices.
pub trait RandomSource {
    /// A value in `[0, len)`. `len` is always non-zero.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low bits.
        let wide = (self.next_u32() as u64) * (max as u64);
        (wide >> 32) as u32
    }

    /// Current state, for reseeding an identical sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_index(&mut self, len: usize) -> usize {
        let max = u32::try_from(len).unwrap_or(u32::MAX);
        self.next_range(max) as usize
    }
}

/// Replays a fixed list of indices (each taken modulo `len`), cycling.
///
/// Used to make target selection exact in tests and benches.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn next_index(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        pick % len
    }
}
