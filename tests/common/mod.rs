#![allow(dead_code)]

use grid_util::Point;
use rand::prelude::*;
use weighted_grid_pathfinding::{AstarSolver, CostGrid, GridPath, GridSolver};

/// The 10x10 risk grid used throughout the reference scenarios.
pub const SAMPLE: &str = "1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581";

pub fn sample_grid() -> CostGrid {
    SAMPLE.parse().unwrap()
}

/// Random costs in 1..=9, each cell turned into a barrier with probability `barrier_chance`.
pub fn random_grid(w: usize, h: usize, barrier_chance: f64, rng: &mut StdRng) -> CostGrid {
    let mut grid = CostGrid::new(w, h, 1);
    for point in grid.points().collect::<Vec<_>>() {
        if rng.gen_bool(barrier_chance) {
            grid.set_barrier(point).unwrap();
        } else {
            grid.set_cost(point, rng.gen_range(1..=9)).unwrap();
        }
    }
    grid.update();
    grid
}

/// Random costs 0-9 with every 0 turned into a barrier, open corners and three walls: a column
/// at a fifth of the width over the top four fifths, a column at half the width from a fifth of
/// the height down, and a row at a fifth of the height from half to seven tenths of the width.
/// Depending on the draw there may be no way through.
pub fn demo_barrier_grid(size: usize, rng: &mut StdRng) -> CostGrid {
    let mut grid = CostGrid::new(size, size, 1);
    for point in grid.points().collect::<Vec<_>>() {
        match rng.gen_range(0..10) {
            0 => grid.set_barrier(point).unwrap(),
            cost => grid.set_cost(point, cost).unwrap(),
        }
    }
    let s = size as i32;
    for y in 0..s * 4 / 5 {
        grid.set_barrier(Point::new(s / 5, y)).unwrap();
    }
    for y in s / 5..s {
        grid.set_barrier(Point::new(s / 2, y)).unwrap();
    }
    for x in s / 2..s * 7 / 10 {
        grid.set_barrier(Point::new(x, s / 5)).unwrap();
    }
    let (start, end) = grid.corners();
    grid.set_cost(start, 1).unwrap();
    grid.set_cost(end, 1).unwrap();
    grid.update();
    grid
}

pub fn visualize_grid(grid: &CostGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else {
                match grid.cost(p).unwrap() {
                    Some(cost) => print!("{}", cost),
                    None => print!("#"),
                }
            }
        }
        println!();
    }
}

/// Asserts that `path` runs from start to end through adjacent passable cells and costs what it
/// claims.
pub fn check_path(grid: &CostGrid, path: &GridPath, start: Point, end: Point) {
    assert_eq!(path.points.first(), Some(&start));
    assert_eq!(path.points.last(), Some(&end));
    for pair in path.points.windows(2) {
        assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
    }
    assert!(path.points.iter().all(|p| grid.is_passable(*p)));
    let solver = AstarSolver::new();
    assert_eq!(solver.path_cost(grid, &path.points), Ok(Some(path.cost)));
}
