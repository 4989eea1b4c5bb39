use mazecarve::MazeError;
use mazecarve::generators::{
    CarveParams, Generator, GridEvent, Outcome, generate_maze, run_spanning_tree,
};
use mazecarve::maze::{Coord, Direction, Grid, GridShape, resolve};

#[test]
fn prim_on_five_by_five_from_origin() {
    let mut grid = Grid::build(GridShape::Rectangular, 5, 5).unwrap();
    let params = CarveParams {
        seed: Some(2024),
        bias: Some(0.5),
        start: Some(Coord::new(0, 0)),
    };
    let report = generate_maze(&mut grid, Generator::Prim, &params, 0.0).unwrap();

    assert_eq!(report.tree_walls_removed, 24);
    assert_eq!(report.outcome, Outcome::Complete);
    assert_eq!(grid.passage_components(), 1);
    assert!(!grid.has_passage_cycle());
}

#[test]
fn zero_width_grid_is_rejected() {
    assert_eq!(
        Grid::build(GridShape::Rectangular, 0, 5).unwrap_err(),
        MazeError::InvalidDimension {
            width: 0,
            height: 5
        }
    );
    assert!(Grid::build(GridShape::HexFlatTop, 4, -1).is_err());
}

#[test]
fn kruskal_never_joins_separate_sub_grids() {
    // A 3x4 block and a 2x4 block with an empty column between them
    let mut grid = Grid::build_masked(GridShape::Rectangular, 6, 4, |c| c.x == 3).unwrap();
    let params = CarveParams {
        seed: Some(77),
        ..Default::default()
    };
    let events = run_spanning_tree(&mut grid, Generator::Kruskal, &params)
        .unwrap()
        .collect::<Vec<_>>();

    let removed = events.iter().filter(|e| e.wall_removed().is_some()).count();
    assert_eq!(removed, (12 - 1) + (8 - 1));
    assert_eq!(
        events.last(),
        Some(&GridEvent::Done(Outcome::Disconnected {
            reached: 12,
            total: 20
        }))
    );
    assert_eq!(grid.passage_components(), 2);
    for event in events.iter().filter_map(GridEvent::wall_removed) {
        assert_eq!(event.from.x < 3, event.to.x < 3);
    }
}

#[test]
fn flat_top_east_upper_neighbors() {
    let east_upper = Direction::hex(0);
    assert_eq!(
        resolve(Coord::new(2, 3), GridShape::HexFlatTop)[east_upper.index()],
        Some(Coord::new(3, 2))
    );
    assert_eq!(
        resolve(Coord::new(3, 3), GridShape::HexFlatTop)[east_upper.index()],
        Some(Coord::new(4, 3))
    );
}

#[test]
fn seeded_generation_is_reproducible() {
    let params = CarveParams {
        seed: Some(5),
        ..Default::default()
    };
    for shape in [GridShape::Rectangular, GridShape::HexPointyTop] {
        for generator in [Generator::Prim, Generator::Kruskal] {
            let mut a = Grid::build(shape, 9, 7).unwrap();
            let mut b = Grid::build(shape, 9, 7).unwrap();
            generate_maze(&mut a, generator, &params, 0.3).unwrap();
            generate_maze(&mut b, generator, &params, 0.3).unwrap();
            assert_eq!(a.passages(), b.passages());
        }
    }
}
