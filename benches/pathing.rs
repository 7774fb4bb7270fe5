use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use maze_mapper::cells::GridCoordinate;
use maze_mapper::generators;
use maze_mapper::grid::Grid;
use maze_mapper::pathing::{self, AStar, BreadthFirst, Solver};
use maze_mapper::units::{ColumnsCount, RowsCount};

fn large_maze() -> Grid {
    let mut g = Grid::new(RowsCount(350), ColumnsCount(350)).unwrap();
    generators::random_maze(&mut g, Some(350)).unwrap();
    g
}

fn bench_a_star(c: &mut Criterion) {
    c.bench_function("a_star", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        let end_coord = GridCoordinate::new(0, 0);
        b.iter(|| AStar.solve(&g, start_coord, end_coord))
    });
}

fn bench_breadth_first(c: &mut Criterion) {
    c.bench_function("breadth_first", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        let end_coord = GridCoordinate::new(0, 0);
        b.iter(|| BreadthFirst.solve(&g, start_coord, end_coord))
    });
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        b.iter(|| pathing::Distances::for_grid(&g, start_coord))
    });
}

criterion_group!(benches,
    bench_a_star,
    bench_breadth_first,
    bench_distances
);
criterion_main!(benches);
