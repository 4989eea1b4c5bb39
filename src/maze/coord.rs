use std::fmt;

/// Integer grid coordinate. `x` is the column, `z` the row.
///
/// The derived ordering is lexicographic (`x` first, then `z`) and is used as the
/// canonical order when an undirected edge has to be reported exactly once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub z: i32,
}

impl Coord {
    pub const fn new(x: i32, z: i32) -> Self {
        Coord { x, z }
    }

    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Coord {
            x: self.x + dx,
            z: self.z + dz,
        }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, z): (i32, i32)) -> Self {
        Coord { x, z }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Most direction slots any shape uses (hex grids).
pub const MAX_DIRECTIONS: usize = 6;

/// A neighbor slot of a cell.
///
/// Rectangular grids use the four named slots; hex grids use slots `0..6`,
/// see [`crate::maze::neighbors::resolve`] for the offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction(u8);

impl Direction {
    pub const NORTH: Direction = Direction(0);
    pub const SOUTH: Direction = Direction(1);
    pub const EAST: Direction = Direction(2);
    pub const WEST: Direction = Direction(3);

    /// Hex slot `index`. Panics if `index >= 6`.
    pub const fn hex(index: u8) -> Self {
        assert!(index < MAX_DIRECTIONS as u8, "hex direction out of range");
        Direction(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum GridShape {
    #[default]
    Rectangular,
    HexFlatTop,
    HexPointyTop,
}

impl GridShape {
    pub const fn direction_count(self) -> usize {
        match self {
            GridShape::Rectangular => 4,
            GridShape::HexFlatTop | GridShape::HexPointyTop => 6,
        }
    }

    pub fn directions(self) -> impl Iterator<Item = Direction> {
        (0..self.direction_count() as u8).map(Direction)
    }

    pub const fn is_hex(self) -> bool {
        !matches!(self, GridShape::Rectangular)
    }

    /// The slot pointing back from the neighbor in slot `dir`.
    ///
    /// Rectangular pairs are (N, S) and (E, W); hex pairs are `i` and `(i + 3) % 6`.
    pub const fn opposite(self, dir: Direction) -> Direction {
        match self {
            GridShape::Rectangular => Direction(dir.0 ^ 1),
            GridShape::HexFlatTop | GridShape::HexPointyTop => Direction((dir.0 + 3) % 6),
        }
    }

    /// Human readable name of a slot, used in wall removal logs and the status line.
    ///
    /// Hex names read with rows growing downwards, so slot 0 of a flat-top grid is
    /// "east-upper".
    pub fn direction_name(self, dir: Direction) -> &'static str {
        const RECT: [&str; 4] = ["north", "south", "east", "west"];
        const FLAT: [&str; 6] = [
            "east-upper",
            "east-lower",
            "south",
            "west-lower",
            "west-upper",
            "north",
        ];
        const POINTY: [&str; 6] = [
            "east",
            "south-east",
            "south-west",
            "west",
            "north-west",
            "north-east",
        ];
        let table: &[&str] = match self {
            GridShape::Rectangular => &RECT,
            GridShape::HexFlatTop => &FLAT,
            GridShape::HexPointyTop => &POINTY,
        };
        table.get(dir.index()).copied().unwrap_or("invalid")
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridShape::Rectangular => write!(f, "Rectangular"),
            GridShape::HexFlatTop => write!(f, "Hexagonal (flat top)"),
            GridShape::HexPointyTop => write!(f, "Hexagonal (pointy top)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for shape in [
            GridShape::Rectangular,
            GridShape::HexFlatTop,
            GridShape::HexPointyTop,
        ] {
            for dir in shape.directions() {
                let back = shape.opposite(dir);
                assert_ne!(dir, back);
                assert_eq!(shape.opposite(back), dir);
            }
        }
    }

    #[test]
    fn test_rectangular_opposites() {
        let shape = GridShape::Rectangular;
        assert_eq!(shape.opposite(Direction::NORTH), Direction::SOUTH);
        assert_eq!(shape.opposite(Direction::EAST), Direction::WEST);
        assert_eq!(shape.directions().count(), 4);
    }

    #[test]
    fn test_direction_names() {
        assert_eq!(GridShape::Rectangular.direction_name(Direction::WEST), "west");
        assert_eq!(GridShape::HexFlatTop.direction_name(Direction::hex(0)), "east-upper");
        assert_eq!(GridShape::HexFlatTop.direction_name(Direction::hex(5)), "north");
        assert_eq!(GridShape::HexPointyTop.direction_name(Direction::hex(4)), "north-west");
        // Slots beyond the rectangular four have no name there
        assert_eq!(GridShape::Rectangular.direction_name(Direction::hex(4)), "invalid");
    }

    #[test]
    fn test_coord_order_is_lexicographic() {
        assert!(Coord::new(1, 9) < Coord::new(2, 0));
        assert!(Coord::new(2, 0) < Coord::new(2, 1));
    }
}
