use rand::{SeedableRng, rngs::StdRng};

mod kruskal;
mod loops;
mod prim;
pub mod union_find;

pub use kruskal::KruskalCarver;
pub use loops::LoopInjector;
pub use prim::PrimCarver;

use crate::error::{Result, check_probability};
use crate::maze::{Coord, Grid, WallRemoved};

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Mixed into the spanning tree seed so the loop pass does not replay the same
/// random sequence.
const LOOP_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Generator {
    #[default]
    Prim,
    Kruskal,
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Prim => write!(f, "Prim's Algorithm (frontier stack)"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

/// Knobs for a spanning tree pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CarveParams {
    /// Seed for every random choice of the pass. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Probability of preferring the horizontal axis when carving with Prim on a
    /// rectangular grid. `None` carves without axis preference.
    pub bias: Option<f64>,
    /// Start cell for Prim, random when `None`.
    pub start: Option<Coord>,
}

impl CarveParams {
    /// Seed for the loop pass that follows this spanning tree pass.
    pub fn loop_seed(&self) -> Option<u64> {
        self.seed.map(|s| s ^ LOOP_SEED_SALT)
    }
}

/// How a spanning tree pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every cell is part of the carved tree.
    Complete,
    /// The topology is split, so the carved tree spans only `reached` of `total`
    /// cells. For Prim that is the tree grown from the start cell, for Kruskal the
    /// largest tree of the forest.
    Disconnected { reached: usize, total: usize },
}

/// What a carving pass reports to its observer, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    WallRemoved(WallRemoved),
    /// Always the last event of a pass.
    Done(Outcome),
}

impl GridEvent {
    pub fn wall_removed(&self) -> Option<&WallRemoved> {
        match self {
            GridEvent::WallRemoved(event) => Some(event),
            GridEvent::Done(_) => None,
        }
    }
}

/// Where a carving pass is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveState {
    Idle,
    Running,
    Done,
}

/// A spanning tree pass in progress. Pull events to advance it; dropping it
/// early leaves a partially carved but consistent grid.
pub enum SpanningTree<'g> {
    Prim(PrimCarver<'g>),
    Kruskal(KruskalCarver<'g>),
}

impl SpanningTree<'_> {
    pub fn state(&self) -> CarveState {
        match self {
            SpanningTree::Prim(carver) => carver.state(),
            SpanningTree::Kruskal(carver) => carver.state(),
        }
    }

    /// The grid being carved.
    pub fn grid(&self) -> &Grid {
        match self {
            SpanningTree::Prim(carver) => carver.grid(),
            SpanningTree::Kruskal(carver) => carver.grid(),
        }
    }
}

impl Iterator for SpanningTree<'_> {
    type Item = GridEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SpanningTree::Prim(carver) => carver.next(),
            SpanningTree::Kruskal(carver) => carver.next(),
        }
    }
}

/// Starts a spanning tree pass over `grid`. Every wall is restored first.
pub fn run_spanning_tree<'g>(
    grid: &'g mut Grid,
    generator: Generator,
    params: &CarveParams,
) -> Result<SpanningTree<'g>> {
    tracing::info!(
        %generator,
        shape = %grid.shape(),
        cells = grid.len(),
        "Starting spanning tree pass"
    );
    Ok(match generator {
        Generator::Prim => SpanningTree::Prim(PrimCarver::new(grid, params)?),
        Generator::Kruskal => SpanningTree::Kruskal(KruskalCarver::new(grid, params.seed)?),
    })
}

/// Starts a pass that removes `floor(remaining walls * fraction)` extra walls.
pub fn inject_loops(
    grid: &mut Grid,
    fraction: f64,
    seed: Option<u64>,
) -> Result<LoopInjector<'_>> {
    tracing::info!(fraction, walls = grid.wall_count(), "Starting loop injection");
    LoopInjector::new(grid, fraction, seed)
}

/// Summary of [`generate_maze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub outcome: Outcome,
    pub tree_walls_removed: usize,
    pub loop_walls_removed: usize,
}

/// Carves a spanning tree and then, when `loop_fraction > 0`, adds loops, without
/// pausing between steps.
pub fn generate_maze(
    grid: &mut Grid,
    generator: Generator,
    params: &CarveParams,
    loop_fraction: f64,
) -> Result<GenerationReport> {
    check_probability("loop fraction", loop_fraction)?;

    let mut outcome = Outcome::Complete;
    let mut tree_walls_removed = 0;
    for event in run_spanning_tree(grid, generator, params)? {
        match event {
            GridEvent::WallRemoved(_) => tree_walls_removed += 1,
            GridEvent::Done(done) => outcome = done,
        }
    }

    let loop_walls_removed = if loop_fraction > 0.0 {
        inject_loops(grid, loop_fraction, params.loop_seed())?.count()
    } else {
        0
    };

    Ok(GenerationReport {
        outcome,
        tree_walls_removed,
        loop_walls_removed,
    })
}

/// Logs the end of a spanning tree pass and builds its terminal outcome.
fn finish(generator: Generator, reached: usize, total: usize, removed: usize) -> Outcome {
    if reached < total {
        tracing::warn!(
            %generator,
            reached,
            total,
            removed,
            "Grid is disconnected, spanning tree does not reach every cell"
        );
        Outcome::Disconnected { reached, total }
    } else {
        tracing::info!(%generator, removed, "Spanning tree complete");
        Outcome::Complete
    }
}
