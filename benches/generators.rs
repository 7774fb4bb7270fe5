use criterion::{criterion_group, criterion_main, Criterion};
use maze_mapper::{
    generators::{self, FirstCandidate, RandomChooser},
    grid::Grid,
    units::{ColumnsCount, RowsCount},
};

fn grid_32() -> Grid {
    Grid::new(RowsCount(32), ColumnsCount(32)).unwrap()
}

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut g = grid_32();
    let mut chooser = RandomChooser::from_seed(1);
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| {
            g.reset_walls();
            generators::recursive_backtracker(&mut g, &mut chooser).unwrap()
        })
    });
}

fn bench_first_candidate_maze_32(c: &mut Criterion) {
    let mut g = grid_32();
    c.bench_function("first_candidate_maze_32", move |b| {
        b.iter(|| {
            g.reset_walls();
            generators::recursive_backtracker(&mut g, &mut FirstCandidate).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_first_candidate_maze_32
);
criterion_main!(benches);
