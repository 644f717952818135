use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use weighted_grid_pathfinding::{
    increment_template, AstarSolver, CostGrid, DijkstraSolver, GridSolver, Point,
};

fn random_cost_grid(n: usize, rng: &mut StdRng) -> CostGrid {
    let mut grid = CostGrid::new(n, n, 1);
    for y in 0..n as i32 {
        for x in 0..n as i32 {
            grid.set_cost(Point::new(x, y), rng.gen_range(1..=9)).unwrap();
        }
    }
    grid
}

fn tiled_bench_solver<S: GridSolver>(c: &mut Criterion, solver_name: &str, solver: &S) {
    let mut rng = StdRng::seed_from_u64(0);
    for (n, tile) in [(100, 1), (100, 5)] {
        let grid = random_cost_grid(n, &mut rng)
            .tile(&increment_template(tile))
            .unwrap();
        let (start, end) = grid.corners();
        let size = grid.width();
        c.bench_function(format!("{solver_name}, {size}x{size}").as_str(), |b| {
            b.iter(|| black_box(solver.get_path_cost(&grid, start, end)))
        });
    }
}

fn bench_dijkstra(c: &mut Criterion) {
    tiled_bench_solver(c, "Dijkstra", &DijkstraSolver::new());
}

fn bench_astar(c: &mut Criterion) {
    tiled_bench_solver(c, "A*", &AstarSolver::new());
}

criterion_group!(benches, bench_dijkstra, bench_astar);
criterion_main!(benches);
