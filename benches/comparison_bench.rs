use criterion::{criterion_group, criterion_main, Criterion};
use grid_search::{
    solver::{
        astar::AstarSolver, bfs::BfsSolver, dfs::DfsSolver, greedy::GreedySolver,
        iddfs::IddfsSolver,
    },
    GridModel, GridSolver, Position, SearchConfig,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const N: usize = 32;
const N_GRIDS: usize = 20;

fn random_grids() -> Vec<GridModel> {
    let mut rng = StdRng::seed_from_u64(0);
    let start = Position::new(0, 0);
    let end = Position::new(N as i32 - 1, N as i32 - 1);
    let mut grids = Vec::new();
    while grids.len() < N_GRIDS {
        let walls: Vec<Position> = (0..N as i32)
            .flat_map(|row| (0..N as i32).map(move |col| Position::new(col, row)))
            .filter(|p| *p != start && *p != end)
            .filter(|_| rng.gen_bool(0.25))
            .collect();
        let grid = GridModel::new(N, N, walls, [end], start).unwrap();
        if grid.reachable(start, end) {
            grids.push(grid);
        }
    }
    grids
}

fn bench_solver<S: GridSolver>(c: &mut Criterion, grids: &[GridModel], solver: S) {
    let config = SearchConfig::path_only();
    c.bench_function(format!("{N}x{N} random, {}", solver.name()).as_str(), |b| {
        b.iter(|| {
            for grid in grids {
                black_box(
                    solver
                        .search(grid, grid.start(), grid.goals(), &config)
                        .unwrap(),
                );
            }
        })
    });
}

fn bench_strategies(c: &mut Criterion) {
    let grids = random_grids();
    bench_solver(c, &grids, DfsSolver);
    bench_solver(c, &grids, BfsSolver);
    bench_solver(c, &grids, GreedySolver);
    bench_solver(c, &grids, AstarSolver::new());
    bench_solver(c, &grids, AstarSolver::weighted(2.0).unwrap());
    bench_solver(c, &grids, IddfsSolver::new(N * N));
}

/// Cost of recording the full step log with tree snapshots against a plain search.
fn bench_step_log(c: &mut Criterion) {
    let grids = random_grids();
    let solver = AstarSolver::new();
    let config = SearchConfig {
        find_all: false,
        ..SearchConfig::default()
    };
    c.bench_function(format!("{N}x{N} random, A* with tree snapshots").as_str(), |b| {
        b.iter(|| {
            for grid in &grids {
                black_box(
                    solver
                        .search(grid, grid.start(), grid.goals(), &config)
                        .unwrap(),
                );
            }
        })
    });
}

criterion_group!(benches, bench_strategies, bench_step_log);
criterion_main!(benches);
