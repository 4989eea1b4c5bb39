use std::fmt;

use super::coord::{Coord, Direction, MAX_DIRECTIONS};

/// Index of a cell inside its [`Grid`](super::Grid) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single maze cell with one neighbor slot and one wall flag per direction.
///
/// Wall flags are only ever changed through [`Grid`](super::Grid), which keeps the
/// flag on both sides of a shared wall in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: Coord,
    neighbors: [Option<CellId>; MAX_DIRECTIONS],
    walls: [bool; MAX_DIRECTIONS],
    visited: bool,
}

impl Cell {
    pub(crate) fn new(coord: Coord, direction_count: usize) -> Self {
        let mut walls = [false; MAX_DIRECTIONS];
        walls[..direction_count].fill(true);
        Cell {
            coord,
            neighbors: [None; MAX_DIRECTIONS],
            walls,
            visited: false,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn neighbor(&self, dir: Direction) -> Option<CellId> {
        self.neighbors[dir.index()]
    }

    /// Whether the wall in slot `dir` is standing. Boundary slots keep their outer
    /// wall for the lifetime of the grid.
    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn link(&mut self, dir: Direction, neighbor: CellId) {
        self.neighbors[dir.index()] = Some(neighbor);
    }

    pub(crate) fn set_wall(&mut self, dir: Direction, present: bool) {
        self.walls[dir.index()] = present;
    }

    pub(crate) fn restore_walls(&mut self, direction_count: usize) {
        self.walls = [false; MAX_DIRECTIONS];
        self.walls[..direction_count].fill(true);
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_fully_walled() {
        let cell = Cell::new(Coord::new(1, 2), 4);
        assert!(cell.has_wall(Direction::NORTH));
        assert!(cell.has_wall(Direction::WEST));
        // Slots past the shape's direction count are never walls.
        assert!(!cell.has_wall(Direction::hex(4)));
        assert!(!cell.is_visited());
        assert_eq!(cell.neighbor(Direction::EAST), None);
    }
}
