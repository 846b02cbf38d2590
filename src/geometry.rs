use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Board cell in logical grid coordinates.
///
/// Coordinates are signed so a head that has just left the board can still be
/// represented until the next collision check.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }
}

/// Board dimensions in cells plus the pixel size of one cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridGeometry {
    pub width: u16,
    pub height: u16,
    pub cell_size: u16,
}

impl GridGeometry {
    #[must_use]
    pub fn new(width: u16, height: u16, cell_size: u16) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Returns true iff `0 <= col < width` and `0 <= row < height`.
    #[must_use]
    pub fn is_within_bounds(self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && cell.col < i32::from(self.width)
            && cell.row < i32::from(self.height)
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Iterates every valid cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |row| (0..width).map(move |col| Cell { col, row }))
    }

    /// Top-left pixel of `cell` for renderers working in pixel space.
    ///
    /// Widened to `i64` so every `u16` board and cell size fits.
    #[must_use]
    pub fn cell_to_pixels(self, cell: Cell) -> (i64, i64) {
        let size = i64::from(self.cell_size);
        (i64::from(cell.col) * size, i64::from(cell.row) * size)
    }

    /// Cell containing the pixel `(x, y)`.
    #[must_use]
    pub fn pixels_to_cell(self, x: i32, y: i32) -> Cell {
        let size = i32::from(self.cell_size.max(1));
        Cell {
            col: x.div_euclid(size),
            row: y.div_euclid(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Cell, GridGeometry};

    #[test]
    fn bounds_are_half_open() {
        let geometry = GridGeometry::new(30, 20, 10);

        assert!(geometry.is_within_bounds(Cell::new(0, 0)));
        assert!(geometry.is_within_bounds(Cell::new(29, 19)));
        assert!(!geometry.is_within_bounds(Cell::new(30, 5)));
        assert!(!geometry.is_within_bounds(Cell::new(5, 20)));
        assert!(!geometry.is_within_bounds(Cell::new(-1, 5)));
        assert!(!geometry.is_within_bounds(Cell::new(5, -1)));
    }

    #[test]
    fn step_follows_screen_axes() {
        let cell = Cell::new(5, 5);

        assert_eq!(cell.step(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.step(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.step(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.step(Direction::Right), Cell::new(6, 5));
    }

    #[test]
    fn cells_cover_the_whole_board_once() {
        let geometry = GridGeometry::new(4, 3, 10);
        let cells: Vec<Cell> = geometry.cells().collect();

        assert_eq!(cells.len(), geometry.total_cells());
        assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(cells.last(), Some(&Cell::new(3, 2)));
    }

    #[test]
    fn pixel_conversion_uses_cell_size() {
        let geometry = GridGeometry::new(30, 30, 10);

        assert_eq!(geometry.cell_to_pixels(Cell::new(5, 5)), (50, 50));
        assert_eq!(geometry.pixels_to_cell(59, 50), Cell::new(5, 5));
        assert_eq!(geometry.pixels_to_cell(-1, 0), Cell::new(-1, 0));
    }

    #[test]
    fn pixel_conversion_handles_the_largest_board() {
        let geometry = GridGeometry::new(u16::MAX, 1, u16::MAX);

        assert_eq!(
            geometry.cell_to_pixels(Cell::new(65534, 0)),
            (65534 * 65535, 0)
        );
    }
}
