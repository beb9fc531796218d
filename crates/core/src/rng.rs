//! RNG module - deterministic random source for food and obstacle placement
//!
//! A small LCG keeps every session reproducible from its seed: equal seeds and
//! equal input sequences give equal games.

use crate::grid::Bounds;
use crate::types::Cell;

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniformly chosen cell inside `bounds`
    pub fn next_cell(&mut self, bounds: Bounds) -> Cell {
        let x = self.next_range(bounds.width.max(1) as u32) as i16;
        let y = self.next_range(bounds.height.max(1) as u32) as i16;
        Cell::new(bounds.x + x, bounds.y + y)
    }

    /// Current state, usable as the seed of a follow-up session
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
