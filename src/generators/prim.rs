use rand::{Rng, rngs::StdRng};

use super::{CarveParams, CarveState, Generator, GridEvent, finish, get_rng};
use crate::error::{MazeError, Result, check_probability};
use crate::maze::{CellId, Direction, Grid};

/// Randomized frontier-stack carver.
///
/// The walk always extends the cell on top of the frontier, so it behaves like a
/// depth-first walk that backtracks when it hits a dead end. Each call to `next`
/// carves exactly one wall, then the terminal [`GridEvent::Done`] follows.
pub struct PrimCarver<'g> {
    grid: &'g mut Grid,
    rng: StdRng,
    /// Probability of preferring the horizontal axis. Only set for rectangular grids.
    bias: Option<f64>,
    frontier: Vec<CellId>,
    start: CellId,
    state: CarveState,
    visited: usize,
    removed: usize,
}

impl<'g> PrimCarver<'g> {
    /// Validates the parameters, then restores every wall of `grid`.
    pub fn new(grid: &'g mut Grid, params: &CarveParams) -> Result<Self> {
        if grid.is_empty() {
            return Err(MazeError::UnbuiltGrid);
        }
        let bias = params
            .bias
            .map(|bias| check_probability("bias", bias))
            .transpose()?;
        let bias = match bias {
            Some(bias) if grid.shape().is_hex() => {
                tracing::debug!(
                    bias,
                    shape = %grid.shape(),
                    "Axis bias only applies to rectangular grids, ignoring"
                );
                None
            }
            other => other,
        };

        let mut rng = get_rng(params.seed);
        let start = match params.start {
            Some(coord) => grid.id_of(coord).ok_or(MazeError::UnknownCell(coord))?,
            None => CellId(rng.random_range(0..grid.len())),
        };

        grid.reset();
        Ok(PrimCarver {
            grid,
            rng,
            bias,
            frontier: Vec::new(),
            start,
            state: CarveState::Idle,
            visited: 0,
            removed: 0,
        })
    }

    pub fn state(&self) -> CarveState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Number of cells the walk has reached so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Picks the neighbor to carve towards among unvisited `candidates`.
    fn choose(&mut self, candidates: &[(Direction, CellId)]) -> (Direction, CellId) {
        if let Some(bias) = self.bias {
            let axis = if self.rng.random_bool(bias) {
                [Direction::WEST, Direction::EAST]
            } else {
                [Direction::NORTH, Direction::SOUTH]
            };
            let preferred = if self.rng.random_bool(0.5) {
                axis
            } else {
                [axis[1], axis[0]]
            };
            let pick = preferred
                .iter()
                .find_map(|&dir| candidates.iter().find(|&&(d, _)| d == dir));
            if let Some(&pick) = pick {
                return pick;
            }
            tracing::trace!("Preferred axis is exhausted, choosing uniformly");
        }
        candidates[self.rng.random_range(0..candidates.len())]
    }
}

impl Iterator for PrimCarver<'_> {
    type Item = GridEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                CarveState::Done => return None,
                CarveState::Idle => {
                    self.grid.set_visited(self.start, true);
                    self.visited = 1;
                    self.frontier.push(self.start);
                    self.state = CarveState::Running;
                    let start = self.grid.cell(self.start).coord();
                    tracing::debug!(%start, "Prim walk started");
                }
                CarveState::Running => {
                    let Some(&current) = self.frontier.last() else {
                        self.state = CarveState::Done;
                        let outcome =
                            finish(Generator::Prim, self.visited, self.grid.len(), self.removed);
                        return Some(GridEvent::Done(outcome));
                    };

                    let candidates = self
                        .grid
                        .neighbors(current)
                        .filter(|&(_, n)| !self.grid.cell(n).is_visited())
                        .collect::<Vec<_>>();
                    if candidates.is_empty() {
                        // Dead end, backtrack
                        self.frontier.pop();
                        continue;
                    }

                    let (dir, next) = self.choose(&candidates);
                    let removed = self.grid.remove_wall(current, dir);
                    self.grid.set_visited(next, true);
                    self.visited += 1;
                    self.frontier.push(next);

                    if let Some(event) = removed {
                        self.removed += 1;
                        return Some(GridEvent::WallRemoved(event));
                    }
                }
            }
        }
    }
}
