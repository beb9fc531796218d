//! Collision classification for a candidate head cell.
//!
//! Checks run in a fixed order (wall, body, obstacle) and the first match wins.
//! The body check runs against the body as it is before this tick's move.

use std::collections::VecDeque;

use crate::config::CollisionPolicy;
use crate::grid::GridModel;
use crate::level::ObstacleSet;
use crate::types::{Cell, CollisionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionDetector {
    policy: CollisionPolicy,
}

impl CollisionDetector {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Classify `head` against the grid, the pre-move `body` and `obstacles`.
    ///
    /// `grew` says whether the snake eats this tick; when it does not, the
    /// current tail is about to be vacated and (under the default policy)
    /// does not block.
    pub fn classify(
        &self,
        head: Cell,
        body: &VecDeque<Cell>,
        grew: bool,
        grid: &GridModel,
        obstacles: &ObstacleSet,
    ) -> CollisionKind {
        if !grid.contains(head) {
            return CollisionKind::Wall;
        }

        let skip_tail = !grew && self.policy == CollisionPolicy::ExcludeVacatingTail;
        let checked = if skip_tail {
            body.len().saturating_sub(1)
        } else {
            body.len()
        };
        if body.iter().take(checked).any(|&c| c == head) {
            return CollisionKind::Body;
        }

        if obstacles.contains(head) {
            return CollisionKind::Obstacle;
        }

        CollisionKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> VecDeque<Cell> {
        // Head at (5,5) heading left, curled so the tail sits at (4,5).
        [
            Cell::new(5, 5),
            Cell::new(5, 4),
            Cell::new(4, 4),
            Cell::new(4, 5),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_free_cell() {
        let det = CollisionDetector::default();
        let body = ring();
        let kind = det.classify(
            Cell::new(6, 5),
            &body,
            false,
            &GridModel::default(),
            &ObstacleSet::default(),
        );
        assert_eq!(kind, CollisionKind::None);
    }

    #[test]
    fn test_wall_outside_each_edge() {
        let det = CollisionDetector::default();
        let grid = GridModel::default();
        let body = VecDeque::from(vec![Cell::new(0, 0)]);
        let empty = ObstacleSet::default();
        for head in [
            Cell::new(-1, 0),
            Cell::new(0, -1),
            Cell::new(40, 0),
            Cell::new(0, 30),
        ] {
            assert_eq!(
                det.classify(head, &body, false, &grid, &empty),
                CollisionKind::Wall
            );
        }
    }

    #[test]
    fn test_moving_into_vacating_tail_is_allowed_by_default() {
        let det = CollisionDetector::default();
        let kind = det.classify(
            Cell::new(4, 5),
            &ring(),
            false,
            &GridModel::default(),
            &ObstacleSet::default(),
        );
        assert_eq!(kind, CollisionKind::None);
    }

    #[test]
    fn test_tail_blocks_when_growing() {
        let det = CollisionDetector::default();
        let kind = det.classify(
            Cell::new(4, 5),
            &ring(),
            true,
            &GridModel::default(),
            &ObstacleSet::default(),
        );
        assert_eq!(kind, CollisionKind::Body);
    }

    #[test]
    fn test_include_tail_policy_blocks_tail() {
        let det = CollisionDetector::new(CollisionPolicy::IncludeTail);
        let kind = det.classify(
            Cell::new(4, 5),
            &ring(),
            false,
            &GridModel::default(),
            &ObstacleSet::default(),
        );
        assert_eq!(kind, CollisionKind::Body);
    }

    #[test]
    fn test_body_cell_blocks() {
        let det = CollisionDetector::default();
        let kind = det.classify(
            Cell::new(4, 4),
            &ring(),
            false,
            &GridModel::default(),
            &ObstacleSet::default(),
        );
        assert_eq!(kind, CollisionKind::Body);
    }

    #[test]
    fn test_obstacle_blocks() {
        let det = CollisionDetector::default();
        let obstacles = ObstacleSet::from_cells([Cell::new(6, 5)]);
        let kind = det.classify(
            Cell::new(6, 5),
            &ring(),
            false,
            &GridModel::default(),
            &obstacles,
        );
        assert_eq!(kind, CollisionKind::Obstacle);
    }

    #[test]
    fn test_wall_wins_over_obstacle() {
        let det = CollisionDetector::default();
        let obstacles = ObstacleSet::from_cells([Cell::new(40, 5)]);
        let kind = det.classify(
            Cell::new(40, 5),
            &ring(),
            false,
            &GridModel::default(),
            &obstacles,
        );
        assert_eq!(kind, CollisionKind::Wall);
    }
}
