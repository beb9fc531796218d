//! Food placement and the timed bonus food.
//!
//! Placement samples random cells and rejects occupied ones. After
//! `max_attempts` misses it enumerates the free cells directly, so it always
//! terminates, even on a nearly full board.

use std::collections::HashSet;

use crate::grid::Bounds;
use crate::rng::SimpleRng;
use crate::types::{Cell, MAX_PLACEMENT_ATTEMPTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodSpawner {
    max_attempts: u32,
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new(MAX_PLACEMENT_ATTEMPTS)
    }
}

impl FoodSpawner {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Pick a free cell in `bounds`.
    ///
    /// Returns `None` only when every cell is occupied.
    pub fn place_food(
        &self,
        occupied: &HashSet<Cell>,
        bounds: Bounds,
        rng: &mut SimpleRng,
    ) -> Option<Cell> {
        if bounds.area() == 0 {
            return None;
        }

        for _ in 0..self.max_attempts {
            let cell = rng.next_cell(bounds);
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = bounds.cells().filter(|c| !occupied.contains(c)).collect();
        if free.is_empty() {
            return None;
        }
        let pick = rng.next_range(free.len() as u32) as usize;
        Some(free[pick])
    }
}

/// Time-limited, higher-value food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusFood {
    pub cell: Cell,
    /// Session play time at which it appeared
    pub spawned_at_ms: u64,
    pub lifespan_ms: u32,
    pub points: u32,
}

impl BonusFood {
    pub fn new(cell: Cell, spawned_at_ms: u64, lifespan_ms: u32, points: u32) -> Self {
        Self {
            cell,
            spawned_at_ms,
            lifespan_ms,
            points,
        }
    }

    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.spawned_at_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u32 {
        (self.lifespan_ms as u64).saturating_sub(self.age_ms(now_ms)) as u32
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) >= self.lifespan_ms as u64
    }
}
