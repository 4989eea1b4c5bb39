pub mod cell;
pub mod coord;
pub mod grid;
pub mod neighbors;

pub use cell::{Cell, CellId};
pub use coord::{Coord, Direction, GridShape, MAX_DIRECTIONS};
pub use grid::Grid;
pub use neighbors::resolve;

/// A wall that has just been carved away. `direction` is the slot of `from` that
/// points at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallRemoved {
    pub from: Coord,
    pub to: Coord,
    pub direction: Direction,
}

/// An undirected pair of adjacent cells, stored once with `from` being the cell
/// with the smaller coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: CellId,
    pub to: CellId,
    pub direction: Direction,
}
