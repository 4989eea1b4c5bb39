use rand::seq::SliceRandom;

use super::union_find::UnionFind;
use super::{CarveState, Generator, GridEvent, finish, get_rng};
use crate::error::{MazeError, Result};
use crate::maze::{Edge, Grid};

/// Randomized Kruskal carver: walks the shuffled wall list and opens every wall
/// whose two sides are not connected yet.
pub struct KruskalCarver<'g> {
    grid: &'g mut Grid,
    /// Wall edges in the order they will be tried
    edges: Vec<Edge>,
    cursor: usize,
    sets: UnionFind,
    state: CarveState,
    removed: usize,
}

impl<'g> KruskalCarver<'g> {
    /// Restores every wall of `grid` and shuffles its wall list.
    pub fn new(grid: &'g mut Grid, seed: Option<u64>) -> Result<Self> {
        if grid.is_empty() {
            return Err(MazeError::UnbuiltGrid);
        }
        grid.reset();

        let mut edges = grid.walled_edges();
        let mut rng = get_rng(seed);
        edges.shuffle(&mut rng);

        let sets = UnionFind::new(grid.len());
        tracing::debug!(edges = edges.len(), cells = grid.len(), "Shuffled wall edges");
        Ok(KruskalCarver {
            grid,
            edges,
            cursor: 0,
            sets,
            state: CarveState::Idle,
            removed: 0,
        })
    }

    pub fn state(&self) -> CarveState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Number of successful unions, which equals the number of carved walls.
    pub fn unions(&self) -> usize {
        self.removed
    }

    /// Number of separate trees in the forest so far.
    pub fn tree_count(&self) -> usize {
        self.sets.set_count()
    }
}

impl Iterator for KruskalCarver<'_> {
    type Item = GridEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == CarveState::Done {
            return None;
        }
        self.state = CarveState::Running;

        while let Some(&edge) = self.edges.get(self.cursor) {
            self.cursor += 1;
            // A failed union means the cells are already connected and this wall
            // would close a cycle.
            if !self.sets.union(edge.from.index(), edge.to.index()) {
                continue;
            }
            if let Some(event) = self.grid.remove_wall(edge.from, edge.direction) {
                self.removed += 1;
                return Some(GridEvent::WallRemoved(event));
            }
        }

        self.state = CarveState::Done;
        let outcome = finish(
            Generator::Kruskal,
            self.sets.largest_set(),
            self.grid.len(),
            self.removed,
        );
        Some(GridEvent::Done(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::Outcome;
    use crate::maze::{Coord, GridShape};

    #[test]
    fn test_spanning_tree_on_rectangle() {
        let mut grid = Grid::build(GridShape::Rectangular, 7, 4).unwrap();
        let mut carver = KruskalCarver::new(&mut grid, Some(17)).unwrap();
        let mut last = None;
        for event in carver.by_ref() {
            last = Some(event);
        }
        assert_eq!(carver.unions(), 27);
        assert_eq!(carver.tree_count(), 1);
        assert_eq!(last, Some(GridEvent::Done(Outcome::Complete)));
        assert_eq!(grid.passage_count(), 27);
        assert_eq!(grid.passage_components(), 1);
        assert!(!grid.has_passage_cycle());
    }

    #[test]
    fn test_two_disconnected_sub_grids() {
        // 2x3 on the left, 2x3 on the right, column 2 blocked
        let mut grid = Grid::build_masked(GridShape::Rectangular, 5, 3, |c| c.x == 2).unwrap();
        let events = KruskalCarver::new(&mut grid, Some(4))
            .unwrap()
            .collect::<Vec<_>>();
        let removed = events.iter().filter(|e| e.wall_removed().is_some()).count();
        assert_eq!(removed, (6 - 1) + (6 - 1));
        assert_eq!(
            events.last(),
            Some(&GridEvent::Done(Outcome::Disconnected {
                reached: 6,
                total: 12
            }))
        );
        assert_eq!(grid.passage_components(), 2);
        let left = grid.id_of(Coord::new(0, 0)).unwrap();
        assert_eq!(grid.reachable_from(left), 6);
    }

    #[test]
    fn test_unions_match_topology_components() {
        let mut grid = Grid::build_masked(GridShape::HexFlatTop, 9, 9, |c| c.z == 4 || c.x == 6)
            .unwrap();
        let expected = grid.len() - grid.topology_components();
        let mut carver = KruskalCarver::new(&mut grid, Some(8)).unwrap();
        carver.by_ref().for_each(drop);
        assert_eq!(carver.unions(), expected);
        assert!(!grid.has_passage_cycle());
    }

    #[test]
    fn test_rerun_starts_from_full_walls() {
        let mut grid = Grid::build(GridShape::HexPointyTop, 5, 5).unwrap();
        KruskalCarver::new(&mut grid, Some(1)).unwrap().for_each(drop);
        KruskalCarver::new(&mut grid, Some(2)).unwrap().for_each(drop);
        assert_eq!(grid.passage_count(), 24);
        assert!(!grid.has_passage_cycle());
    }

    #[test]
    fn test_unbuilt_grid() {
        let mut grid = Grid::build(GridShape::Rectangular, 2, 2).unwrap();
        grid.clear();
        assert!(matches!(
            KruskalCarver::new(&mut grid, None),
            Err(MazeError::UnbuiltGrid)
        ));
    }
}
