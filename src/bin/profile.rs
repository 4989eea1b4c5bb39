use std::time::Instant;

use mazecarve::{
    generators::{CarveParams, Generator, generate_maze},
    maze::{Grid, GridShape},
};

const SIZE: i32 = u8::MAX as i32;

/// Times full generation on the largest grid the terminal app can show.
/// Usage: `profile [iterations] [loop fraction]`
fn main() -> anyhow::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    let loops = args.next().and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.1);

    for shape in [
        GridShape::Rectangular,
        GridShape::HexFlatTop,
        GridShape::HexPointyTop,
    ] {
        for generator in [Generator::Prim, Generator::Kruskal] {
            let mut grid = Grid::build(shape, SIZE, SIZE)?;
            let started = Instant::now();
            for iter in 0..num_iters {
                let params = CarveParams {
                    seed: Some(iter as u64),
                    ..Default::default()
                };
                generate_maze(&mut grid, generator, &params, loops)?;
            }
            let elapsed = started.elapsed();
            println!(
                "{shape} / {generator}: {num_iters} runs in {elapsed:?} ({:?} per run)",
                elapsed / num_iters.max(1) as u32
            );
        }
    }
    Ok(())
}
