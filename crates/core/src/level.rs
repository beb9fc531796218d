//! Level module - obstacle layouts, level thresholds and safe spawning
//!
//! Level 1 is empty. Levels 2-4 are fixed shapes expressed as fractions of the
//! grid (on the default 40x30 grid: two vertical walls, a cross, a hollow box).
//! Level 5 and up scatter `min(3 * level, 30)` seeded blocks, kept clear of the
//! 5x5 area around the grid centre.

use std::collections::BTreeSet;

use crate::grid::Bounds;
use crate::rng::SimpleRng;
use crate::types::{Cell, Direction, INITIAL_SNAKE_LEN, LEVEL_SPEEDUP_MS, MIN_TICK_MS, SPAWN_LOOKAHEAD};

/// Immutable obstacle cells of the active level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleSet {
    cells: BTreeSet<Cell>,
}

impl ObstacleSet {
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

/// Level thresholds and layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelManager {
    threshold: u32,
    base_tick_ms: u32,
}

impl LevelManager {
    pub fn new(threshold: u32, base_tick_ms: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            base_tick_ms,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Level a given score belongs to (level 1 below the first threshold)
    pub fn level_for_score(&self, score: u32) -> u32 {
        score / self.threshold + 1
    }

    /// New level index when `score` has crossed a threshold that
    /// `current_level` has not reached yet.
    pub fn maybe_advance(&self, score: u32, current_level: u32) -> Option<u32> {
        let target = self.level_for_score(score);
        (target > current_level).then_some(target)
    }

    /// Tick period for a level: 20ms faster per level, never below 50ms
    pub fn tick_interval_ms(&self, level: u32) -> u32 {
        let speedup = level.saturating_sub(1).saturating_mul(LEVEL_SPEEDUP_MS);
        self.base_tick_ms.saturating_sub(speedup).max(MIN_TICK_MS)
    }

    /// Obstacle layout for `level` inside `bounds`.
    ///
    /// `rng` is only consumed for the scattered layouts (level 5+).
    pub fn obstacles_for(&self, level: u32, bounds: Bounds, rng: &mut SimpleRng) -> ObstacleSet {
        let mut cells = BTreeSet::new();
        let w = bounds.width as i32;
        let h = bounds.height as i32;
        let mut put = |x: i32, y: i32| {
            if x >= 0 && y >= 0 && x < w && y < h {
                cells.insert(Cell::new(bounds.x + x as i16, bounds.y + y as i16));
            }
        };

        match level {
            0 | 1 => {}
            2 => {
                for y in h / 6..h * 5 / 6 {
                    put(w * 15 / 40, y);
                    put(w * 24 / 40, y);
                }
            }
            3 => {
                for x in w / 4..w * 3 / 4 {
                    put(x, h / 2);
                }
                for y in h * 8 / 30..h * 22 / 30 {
                    put(w / 2, y);
                }
            }
            4 => {
                let (left, right) = (w / 8, w * 7 / 8);
                let (top, bottom) = (h / 6, h * 5 / 6);
                for x in left..right {
                    put(x, top);
                    put(x, bottom - 1);
                }
                for y in top..bottom {
                    put(left, y);
                    put(right - 1, y);
                }
            }
            _ => {
                let count = (level.saturating_mul(3)).min(30) as usize;
                let center = bounds.center();
                let near_center =
                    |c: Cell| (c.x - center.x).abs() <= 2 && (c.y - center.y).abs() <= 2;
                let mut placed = 0;
                // Bounded: tiny grids may not have room for every block.
                for _ in 0..count * 50 {
                    if placed == count {
                        break;
                    }
                    let c = rng.next_cell(bounds);
                    if near_center(c) || cells.contains(&c) {
                        continue;
                    }
                    cells.insert(c);
                    placed += 1;
                }
            }
        }

        ObstacleSet { cells }
    }
}

/// Find a spawn for a snake of `len` cells heading right.
///
/// Candidate heads are tried nearest to the grid centre first. The body is
/// laid out leftwards from the head and folds upwards in rows when it is
/// longer than half the grid width. A layout is accepted when every body cell
/// is inside `bounds` and off `obstacles`, and the cells right ahead of the
/// head are free too.
pub fn spawn_layout(bounds: Bounds, obstacles: &ObstacleSet, len: usize) -> Option<Vec<Cell>> {
    let len = len.max(1);
    let run = len.min((bounds.width as usize / 2).max(INITIAL_SNAKE_LEN));
    let center = bounds.center();

    let mut candidates: Vec<Cell> = bounds.cells().collect();
    candidates.sort_by_key(|c| {
        let d = (c.x - center.x).abs() as i32 + (c.y - center.y).abs() as i32;
        (d, c.y, c.x)
    });

    let free = |c: Cell| bounds.contains(c) && !obstacles.contains(c);

    candidates.into_iter().find_map(|head| {
        let ahead_clear = (1..=SPAWN_LOOKAHEAD).all(|n| free(head.offset(Direction::Right, n)));
        if !ahead_clear {
            return None;
        }
        let body = folded_body(head, len, run);
        body.iter().all(|&c| free(c)).then_some(body)
    })
}

/// Body cells for a head moving right: leftwards along the head row for
/// `run` cells, then up a row and back, and so on.
fn folded_body(head: Cell, len: usize, run: usize) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(len);
    let mut cur = head;
    let mut dir = Direction::Left;
    let mut in_row = 0;
    for i in 0..len {
        cells.push(cur);
        if i + 1 == len {
            break;
        }
        in_row += 1;
        if in_row < run {
            cur = cur.step(dir);
        } else {
            cur = cur.step(Direction::Up);
            dir = dir.opposite();
            in_row = 0;
        }
    }
    cells
}
