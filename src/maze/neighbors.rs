use super::coord::{Coord, Direction, GridShape, MAX_DIRECTIONS};

/// Rectangular offsets, indexed by slot: north, south, east, west.
const RECT_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Flat-top offsets. Row 0 is for even columns, row 1 for odd columns.
const FLAT_TOP_OFFSETS: [[(i32, i32); 6]; 2] = [
    [(1, -1), (1, 0), (0, 1), (-1, 0), (-1, -1), (0, -1)],
    [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (0, -1)],
];

/// Pointy-top offsets. Row 0 is for even rows, row 1 for odd rows.
const POINTY_TOP_OFFSETS: [[(i32, i32); 6]; 2] = [
    [(1, 0), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1)],
    [(1, 0), (1, 1), (0, 1), (-1, 0), (0, -1), (1, -1)],
];

/// Offset of the neighbor in slot `dir` of a cell at `coord`.
pub fn offset(coord: Coord, shape: GridShape, dir: Direction) -> (i32, i32) {
    match shape {
        GridShape::Rectangular => RECT_OFFSETS[dir.index()],
        GridShape::HexFlatTop => FLAT_TOP_OFFSETS[parity(coord.x)][dir.index()],
        GridShape::HexPointyTop => POINTY_TOP_OFFSETS[parity(coord.z)][dir.index()],
    }
}

/// Neighbor coordinates of `coord`, one entry per direction slot of `shape`.
///
/// This is purely geometric: whether a coordinate actually holds a cell is for the
/// grid to decide, so every slot of a valid shape is filled here. Slots beyond the
/// shape's direction count are `None`.
pub fn resolve(coord: Coord, shape: GridShape) -> [Option<Coord>; MAX_DIRECTIONS] {
    let mut out = [None; MAX_DIRECTIONS];
    for dir in shape.directions() {
        let (dx, dz) = offset(coord, shape, dir);
        out[dir.index()] = Some(coord.offset(dx, dz));
    }
    out
}

fn parity(value: i32) -> usize {
    value.rem_euclid(2) as usize
}
