//! Grid module - playable bounds and cell geometry
//!
//! Cells are addressed in grid units. The playable rectangle starts at the
//! configured offset and spans `width` x `height` cells; pixel coordinates are
//! only produced on request for renderers that need them.

use crate::config::GridConfig;
use crate::error::ConfigError;
use crate::types::Cell;

/// Playable rectangle in cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
}

impl Bounds {
    pub const fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a cell lies inside the rectangle
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x
            && cell.y >= self.y
            && (cell.x as i32) < self.right()
            && (cell.y as i32) < self.bottom()
    }

    /// One past the last column
    pub fn right(&self) -> i32 {
        self.x as i32 + self.width as i32
    }

    /// One past the last row
    pub fn bottom(&self) -> i32 {
        self.y as i32 + self.height as i32
    }

    /// Number of cells in the rectangle
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Cell at a row-major index
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index >= self.area() {
            return None;
        }
        let w = self.width as usize;
        Some(Cell::new(
            self.x + (index % w) as i16,
            self.y + (index / w) as i16,
        ))
    }

    /// Iterate all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.area()).filter_map(move |i| self.cell_at(i))
    }
}

/// Grid geometry constructed once from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridModel {
    bounds: Bounds,
    cell_size: u16,
}

impl GridModel {
    pub fn new(config: &GridConfig) -> Result<Self, ConfigError> {
        if config.width <= 0 || config.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        if config.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        Ok(Self {
            bounds: Bounds::new(config.offset_x, config.offset_y, config.width, config.height),
            cell_size: config.cell_size,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.bounds.contains(cell)
    }

    pub fn cell_size(&self) -> u16 {
        self.cell_size
    }

    /// Top-left pixel of a cell. Cells already carry the grid offset.
    pub fn to_pixels(&self, cell: Cell) -> (i32, i32) {
        let size = self.cell_size as i32;
        (cell.x as i32 * size, cell.y as i32 * size)
    }
}

impl Default for GridModel {
    fn default() -> Self {
        let cfg = GridConfig::default();
        Self {
            bounds: Bounds::new(cfg.offset_x, cfg.offset_y, cfg.width, cfg.height),
            cell_size: cfg.cell_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_bounds() {
        let grid = GridModel::default();
        assert_eq!(grid.bounds(), Bounds::new(0, 0, 40, 30));
        assert_eq!(grid.cell_size(), 20);
        assert_eq!(grid.bounds().area(), 1200);
        assert_eq!(grid.bounds().center(), Cell::new(20, 15));
    }

    #[test]
    fn test_contains_edges() {
        let grid = GridModel::default();
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(39, 29)));
        assert!(!grid.contains(Cell::new(40, 15)));
        assert!(!grid.contains(Cell::new(20, 30)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(0, -1)));
    }

    #[test]
    fn test_offset_bounds() {
        let cfg = GridConfig {
            offset_x: 2,
            offset_y: 3,
            width: 10,
            height: 8,
            cell_size: 16,
        };
        let grid = GridModel::new(&cfg).unwrap();
        assert!(!grid.contains(Cell::new(1, 3)));
        assert!(grid.contains(Cell::new(2, 3)));
        assert!(grid.contains(Cell::new(11, 10)));
        assert!(!grid.contains(Cell::new(12, 10)));
        assert_eq!(grid.to_pixels(Cell::new(2, 3)), (32, 48));
    }

    #[test]
    fn test_cells_iterates_row_major() {
        let b = Bounds::new(1, 1, 3, 2);
        let cells: Vec<Cell> = b.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(1, 1));
        assert_eq!(cells[2], Cell::new(3, 1));
        assert_eq!(cells[3], Cell::new(1, 2));
        assert!(b.cell_at(6).is_none());
    }

    #[test]
    fn test_new_rejects_bad_geometry() {
        let cfg = GridConfig {
            width: 0,
            ..GridConfig::default()
        };
        assert!(GridModel::new(&cfg).is_err());
        let cfg = GridConfig {
            cell_size: 0,
            ..GridConfig::default()
        };
        assert_eq!(GridModel::new(&cfg), Err(ConfigError::ZeroCellSize));
    }
}
