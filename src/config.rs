use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::error::Result;
use crate::generators::{CarveParams, Generator};
use crate::maze::{Coord, Grid, GridShape};

/// Carve a maze on a rectangular or hexagonal grid and watch it happen.
#[derive(Debug, Clone, Parser)]
#[command(name = "mazecarve", version, about)]
pub struct Config {
    /// Grid shape
    #[arg(long, value_enum, default_value_t = GridShape::Rectangular)]
    pub shape: GridShape,

    /// Number of columns
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    pub width: i32,

    /// Number of rows
    #[arg(long, default_value_t = 12, allow_negative_numbers = true)]
    pub height: i32,

    /// Spanning tree algorithm
    #[arg(long, value_enum, default_value_t = Generator::Prim)]
    pub generator: Generator,

    /// Probability of carving along the horizontal axis (Prim on rectangular grids)
    #[arg(long)]
    pub bias: Option<f64>,

    /// Cell to start the Prim walk from, as `x,z`
    #[arg(long, value_parser = parse_coord)]
    pub start: Option<Coord>,

    /// Share of the walls left after carving to knock down, in [0, 1]
    #[arg(long, default_value_t = 0.0)]
    pub loops: f64,

    /// Cells to leave out of the grid, as `x,z`. Repeatable.
    #[arg(long = "block", value_parser = parse_coord)]
    pub blocked: Vec<Coord>,

    /// Seed for reproducible mazes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause between carving steps, in milliseconds
    #[arg(long, default_value_t = 20)]
    pub delay_ms: u64,

    /// Carve without drawing, then print a summary
    #[arg(long)]
    pub headless: bool,

    /// Where to write logs. Filter with RUST_LOG.
    #[arg(long, default_value = "mazecarve.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn carve_params(&self) -> CarveParams {
        CarveParams {
            seed: self.seed,
            bias: self.bias,
            start: self.start,
        }
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Builds the grid topology described by the configuration.
    pub fn build_grid(&self) -> Result<Grid> {
        Grid::build_masked(self.shape, self.width, self.height, |coord| {
            self.blocked.contains(&coord)
        })
    }
}

fn parse_coord(s: &str) -> std::result::Result<Coord, String> {
    let (x, z) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,z`, got `{s}`"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid x in `{s}`: {e}"))?;
    let z = z
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid z in `{s}`: {e}"))?;
    Ok(Coord::new(x, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["mazecarve"]).unwrap();
        assert_eq!(config.shape, GridShape::Rectangular);
        assert_eq!(config.generator, Generator::Prim);
        assert_eq!((config.width, config.height), (20, 12));
        assert_eq!(config.carve_params(), CarveParams::default());
        assert_eq!(config.step_delay(), Duration::from_millis(20));
        assert!(!config.headless);
    }

    #[test]
    fn test_full_command_line() {
        let config = Config::try_parse_from([
            "mazecarve",
            "--shape",
            "hex-flat-top",
            "--generator",
            "kruskal",
            "--width",
            "6",
            "--height",
            "4",
            "--loops",
            "0.25",
            "--seed",
            "99",
            "--block",
            "1,1",
            "--block",
            "2, 3",
            "--start",
            "0,0",
        ])
        .unwrap();
        assert_eq!(config.shape, GridShape::HexFlatTop);
        assert_eq!(config.generator, Generator::Kruskal);
        assert_eq!(config.blocked, vec![Coord::new(1, 1), Coord::new(2, 3)]);
        assert_eq!(config.carve_params().start, Some(Coord::new(0, 0)));
        assert_eq!(config.carve_params().seed, Some(99));

        let grid = config.build_grid().unwrap();
        assert_eq!(grid.len(), 22);
        assert!(grid.get(Coord::new(1, 1)).is_none());
    }

    #[test]
    fn test_bad_coordinates_are_rejected() {
        assert!(Config::try_parse_from(["mazecarve", "--block", "3"]).is_err());
        assert!(Config::try_parse_from(["mazecarve", "--start", "a,1"]).is_err());
    }

    #[test]
    fn test_non_positive_dimensions_surface_as_maze_error() {
        let config = Config::try_parse_from(["mazecarve", "--width", "0"]).unwrap();
        assert_eq!(
            config.build_grid().unwrap_err(),
            MazeError::InvalidDimension {
                width: 0,
                height: 12
            }
        );
    }
}
