//! RNG module - deterministic random draws for the figure tray
//!
//! A small LCG keeps games reproducible: the same seed always offers the same
//! sequence of figures, which tests and benches rely on.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero
    ///
    /// Uses the high bits, which are far better distributed than the low
    /// bits of a power-of-two LCG.
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_u32() as u64 * len as u64) >> 32) as usize
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
