use std::collections::{HashMap, VecDeque};

use super::cell::{Cell, CellId};
use super::coord::{Coord, Direction, GridShape};
use super::neighbors::resolve;
use super::{Edge, WallRemoved};
use crate::error::{MazeError, Result};

/// The cell topology of a maze: a flat arena of cells plus a coordinate index.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    shape: GridShape,
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    index: HashMap<Coord, CellId>,
}

impl Grid {
    /// Builds a fully walled grid of `width` columns by `height` rows.
    pub fn build(shape: GridShape, width: i32, height: i32) -> Result<Self> {
        Grid::build_masked(shape, width, height, |_| false)
    }

    /// Builds a grid that leaves out every coordinate for which `blocked` returns
    /// `true`. Cells next to a blocked coordinate simply have no neighbor there.
    pub fn build_masked(
        shape: GridShape,
        width: i32,
        height: i32,
        blocked: impl Fn(Coord) -> bool,
    ) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidDimension { width, height });
        }

        let capacity = width as usize * height as usize;
        let mut grid = Grid {
            shape,
            width,
            height,
            cells: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        };

        (0..width)
            .flat_map(|x| (0..height).map(move |z| Coord::new(x, z)))
            .filter(|&coord| !blocked(coord))
            .for_each(|coord| {
                let id = CellId(grid.cells.len());
                grid.cells.push(Cell::new(coord, shape.direction_count()));
                grid.index.insert(coord, id);
            });

        for idx in 0..grid.cells.len() {
            let coord = grid.cells[idx].coord();
            let resolved = resolve(coord, shape);
            for dir in shape.directions() {
                let Some(neighbor) = resolved[dir.index()].and_then(|c| grid.index.get(&c).copied())
                else {
                    continue;
                };
                grid.cells[idx].link(dir, neighbor);
            }
        }

        tracing::debug!(
            %shape,
            width,
            height,
            cells = grid.cells.len(),
            walls = grid.wall_count(),
            "Built grid topology"
        );
        Ok(grid)
    }

    /// Discards every cell. Safe to call on an empty grid.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
        self.width = 0;
        self.height = 0;
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (CellId(idx), cell))
    }

    pub fn id_of(&self, coord: Coord) -> Option<CellId> {
        self.index.get(&coord).copied()
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.id_of(coord).map(|id| self.cell(id))
    }

    pub fn neighbor(&self, id: CellId, dir: Direction) -> Option<CellId> {
        self.cell(id).neighbor(dir)
    }

    /// Existing neighbors of `id` together with the slot they sit in.
    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        let cell = self.cell(id);
        self.shape
            .directions()
            .filter_map(move |dir| cell.neighbor(dir).map(|n| (dir, n)))
    }

    pub fn has_wall(&self, id: CellId, dir: Direction) -> bool {
        self.cell(id).has_wall(dir)
    }

    /// Slot of `from` that points at `to`, if they are adjacent.
    pub fn direction_to(&self, from: CellId, to: CellId) -> Option<Direction> {
        self.neighbors(from).find(|&(_, n)| n == to).map(|(dir, _)| dir)
    }

    /// Removes the wall between `id` and its neighbor in slot `dir`, on both sides.
    ///
    /// Returns `None` if there is no neighbor in that slot or the wall is already gone.
    pub fn remove_wall(&mut self, id: CellId, dir: Direction) -> Option<WallRemoved> {
        let neighbor = self.neighbor(id, dir)?;
        if !self.has_wall(id, dir) {
            return None;
        }
        let back = self.shape.opposite(dir);
        self.cells[id.0].set_wall(dir, false);
        self.cells[neighbor.0].set_wall(back, false);

        let event = WallRemoved {
            from: self.cell(id).coord(),
            to: self.cell(neighbor).coord(),
            direction: dir,
        };
        tracing::trace!(
            from = %event.from,
            to = %event.to,
            dir = self.shape.direction_name(dir),
            "Removed wall"
        );
        Some(event)
    }

    pub(crate) fn set_visited(&mut self, id: CellId, visited: bool) {
        self.cells[id.0].set_visited(visited);
    }

    /// Puts every wall back and clears the visited flags, keeping the topology.
    pub fn reset(&mut self) {
        let direction_count = self.shape.direction_count();
        for cell in &mut self.cells {
            cell.restore_walls(direction_count);
            cell.set_visited(false);
        }
    }

    /// Every adjacent pair that still has a wall between them, reported once from
    /// the cell with the smaller coordinate.
    pub fn walled_edges(&self) -> Vec<Edge> {
        self.edges(true)
    }

    /// Every adjacent pair with an open passage between them, reported once.
    pub fn passages(&self) -> Vec<Edge> {
        self.edges(false)
    }

    fn edges(&self, walled: bool) -> Vec<Edge> {
        self.cells()
            .flat_map(move |(id, cell)| {
                self.neighbors(id).filter_map(move |(dir, n)| {
                    (cell.coord() < self.cell(n).coord() && cell.has_wall(dir) == walled).then_some(
                        Edge {
                            from: id,
                            to: n,
                            direction: dir,
                        },
                    )
                })
            })
            .collect()
    }

    /// Number of interior walls still standing.
    pub fn wall_count(&self) -> usize {
        self.walled_edges().len()
    }

    /// Number of interior walls that have been removed.
    pub fn passage_count(&self) -> usize {
        self.passages().len()
    }

    /// Connected components when walking through open passages only.
    pub fn passage_components(&self) -> usize {
        self.components(|cell, dir| !cell.has_wall(dir))
    }

    /// Connected components of the raw adjacency, ignoring walls.
    pub fn topology_components(&self) -> usize {
        self.components(|_, _| true)
    }

    /// Whether the open passages contain a cycle.
    pub fn has_passage_cycle(&self) -> bool {
        // A forest has exactly `cells - components` edges.
        self.passage_count() > self.len() - self.passage_components()
    }

    /// Size of the component containing `start` when walking through open passages.
    pub fn reachable_from(&self, start: CellId) -> usize {
        let mut seen = vec![false; self.cells.len()];
        self.flood(start, &mut seen, &|cell: &Cell, dir: Direction| !cell.has_wall(dir))
    }

    fn components(&self, open: impl Fn(&Cell, Direction) -> bool) -> usize {
        let mut seen = vec![false; self.cells.len()];
        let mut count = 0;
        for idx in 0..self.cells.len() {
            if !seen[idx] {
                self.flood(CellId(idx), &mut seen, &open);
                count += 1;
            }
        }
        count
    }

    fn flood(
        &self,
        start: CellId,
        seen: &mut [bool],
        open: &impl Fn(&Cell, Direction) -> bool,
    ) -> usize {
        let mut queue = VecDeque::from([start]);
        seen[start.0] = true;
        let mut size = 0;
        while let Some(id) = queue.pop_front() {
            size += 1;
            let cell = self.cell(id);
            for (dir, n) in self.neighbors(id) {
                if open(cell, dir) && !seen[n.0] {
                    seen[n.0] = true;
                    queue.push_back(n);
                }
            }
        }
        size
    }
}
