use rand::seq::SliceRandom;

use super::get_rng;
use crate::error::{MazeError, Result, check_probability};
use crate::maze::{Edge, Grid, WallRemoved};

/// Opens a random share of the walls that are still standing, which adds cycles
/// (alternate routes) to a carved maze.
pub struct LoopInjector<'g> {
    grid: &'g mut Grid,
    /// Walls picked for removal, already cut down to `floor(count * fraction)`
    picked: Vec<Edge>,
    cursor: usize,
}

impl<'g> LoopInjector<'g> {
    pub fn new(grid: &'g mut Grid, fraction: f64, seed: Option<u64>) -> Result<Self> {
        if grid.is_empty() {
            return Err(MazeError::UnbuiltGrid);
        }
        let fraction = check_probability("loop fraction", fraction)?;

        let mut picked = grid.walled_edges();
        let remaining = picked.len();
        picked.shuffle(&mut get_rng(seed));
        picked.truncate((remaining as f64 * fraction).floor() as usize);

        tracing::debug!(remaining, removing = picked.len(), "Picked walls for loops");
        Ok(LoopInjector {
            grid,
            picked,
            cursor: 0,
        })
    }

    /// Walls this pass will remove in total.
    pub fn planned(&self) -> usize {
        self.picked.len()
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }
}

impl Iterator for LoopInjector<'_> {
    type Item = WallRemoved;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&edge) = self.picked.get(self.cursor) {
            self.cursor += 1;
            if let Some(event) = self.grid.remove_wall(edge.from, edge.direction) {
                return Some(event);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.picked.len() - self.cursor))
    }
}
