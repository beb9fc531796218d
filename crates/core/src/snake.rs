//! Snake module - body, heading and the per-tick direction latch
//!
//! The body is stored head first. A direction change requested between ticks
//! is held in a single-slot latch and applied at the start of the next move,
//! so at most one turn takes effect per tick no matter how many key presses
//! arrive in between.

use std::collections::VecDeque;

use crate::types::{Cell, Direction};

/// Snake body and heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeState {
    /// Head first
    body: VecDeque<Cell>,
    direction: Direction,
    /// Direction change latched for the next tick
    pending: Option<Direction>,
}

impl SnakeState {
    /// Create a straight snake of `len` cells with its head at `head`,
    /// the body trailing opposite to `direction`.
    pub fn new(head: Cell, direction: Direction, len: usize) -> Self {
        let back = direction.opposite();
        let body = (0..len.max(1))
            .map(|i| head.offset(back, i as i16))
            .collect();
        Self {
            body,
            direction,
            pending: None,
        }
    }

    /// Create a snake from explicit cells (head first)
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        Self {
            body: cells.into_iter().collect(),
            direction,
            pending: None,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Latch a direction change for the next tick.
    ///
    /// Rejected (returns `false`) when a change is already latched, when `dir`
    /// reverses the current heading, or when `dir` is the current heading.
    /// A repeat of the heading leaves the latch open, so `Right, Down` while
    /// moving right still turns down on the next tick.
    pub fn request_direction(&mut self, dir: Direction) -> bool {
        if self.pending.is_some() {
            return false;
        }
        if dir == self.direction.opposite() || dir == self.direction {
            return false;
        }
        self.pending = Some(dir);
        true
    }

    /// Heading the next move will use
    pub fn next_direction(&self) -> Direction {
        self.pending.unwrap_or(self.direction)
    }

    /// Head cell the next move will produce, without moving
    pub fn next_head(&self) -> Cell {
        self.head().step(self.next_direction())
    }

    /// Move one cell.
    ///
    /// Applies and clears the latch, prepends the new head and drops the tail
    /// unless `grew`. Returns the new head.
    pub fn advance(&mut self, grew: bool) -> Cell {
        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);
        if !grew {
            self.body.pop_back();
        }
        new_head
    }

    /// Replace the body wholesale (level change); clears the latch.
    pub fn relocate(&mut self, cells: impl IntoIterator<Item = Cell>, direction: Direction) {
        self.body.clear();
        self.body.extend(cells);
        self.direction = direction;
        self.pending = None;
    }

    /// True when no two body cells coincide
    pub fn is_settled(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.body.len());
        self.body.iter().all(|c| seen.insert(*c))
    }
}
