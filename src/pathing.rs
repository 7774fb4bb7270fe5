//! Shortest path search over the open passages of a grid.
//!
//! Solvers only read the grid. All per search bookkeeping lives inside a single `solve` call.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use bit_set::BitSet;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::neighbours::{neighbours_with_open_status, NeighbourMode};
use crate::utils::{self, FnvHashMap};

/// An ordered run of cells from the start to the end of a search, both included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<GridCoordinate>,
}

impl Path {
    fn new(cells: Vec<GridCoordinate>) -> Path {
        Path { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[GridCoordinate] {
        &self.cells
    }

    /// Number of cells on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true for a path produced by a solver.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves between cells, one fewer than the cells.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<GridCoordinate> {
        self.cells.first().cloned()
    }

    pub fn end(&self) -> Option<GridCoordinate> {
        self.cells.last().cloned()
    }

    pub fn into_cells(self) -> Vec<GridCoordinate> {
        self.cells
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Found(Path),
    /// No chain of open walls joins start and end.
    Unreachable,
}

impl SolveOutcome {
    pub fn path(&self) -> Option<&Path> {
        match *self {
            SolveOutcome::Found(ref path) => Some(path),
            SolveOutcome::Unreachable => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        *self == SolveOutcome::Unreachable
    }
}

/// A shortest path algorithm over grid passages.
pub trait Solver {
    /// Find a shortest path from `start` to `end`.
    /// Fails with `OutOfBounds` if either coordinate is outside the grid.
    fn solve(&self, grid: &Grid, start: GridCoordinate, end: GridCoordinate) -> Result<SolveOutcome>;
}

fn check_in_bounds(grid: &Grid, coord: GridCoordinate) -> Result<usize> {
    grid.grid_coordinate_to_index(coord).ok_or_else(|| ErrorKind::OutOfBounds(coord).into())
}

/// A* search with a Manhattan distance heuristic. Every passage costs 1.
///
/// Ties on `f` go to the lower `h` (the node closer to the goal), then to the node
/// discovered first.
#[derive(Debug, Copy, Clone, Default)]
pub struct AStar;

#[derive(Debug, Copy, Clone)]
struct SearchNode {
    g: usize,
    h: usize,
    parent: Option<GridCoordinate>,
}

impl SearchNode {
    #[inline]
    fn f(&self) -> usize {
        self.g + self.h
    }
}

// Field order is the open set priority.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
struct OpenEntry {
    f: usize,
    h: usize,
    sequence: u64,
    index: usize,
    coord: GridCoordinate,
}

impl Solver for AStar {
    fn solve(&self, grid: &Grid, start: GridCoordinate, end: GridCoordinate) -> Result<SolveOutcome> {
        self.search(grid, start, end, |_| ())
    }
}

impl AStar {
    /// `on_expand` sees every cell moved to the closed set, in order.
    fn search<F>(&self,
                 grid: &Grid,
                 start: GridCoordinate,
                 end: GridCoordinate,
                 mut on_expand: F)
                 -> Result<SolveOutcome>
        where F: FnMut(GridCoordinate)
    {
        let start_index = check_in_bounds(grid, start)?;
        check_in_bounds(grid, end)?;

        let cells_count = grid.size();
        let mut nodes: Vec<Option<SearchNode>> = vec![None; cells_count];
        let mut closed = BitSet::with_capacity(cells_count);
        // Stale entries are skipped when popped rather than removed, at most one entry per cell
        // is live at any time.
        let mut open = BinaryHeap::with_capacity(cells_count);
        let mut sequence: u64 = 0;

        let start_h = start.manhattan_distance(end);
        nodes[start_index] = Some(SearchNode {
            g: 0,
            h: start_h,
            parent: None,
        });
        open.push(Reverse(OpenEntry {
            f: start_h,
            h: start_h,
            sequence,
            index: start_index,
            coord: start,
        }));

        let mut expanded = 0;
        while let Some(Reverse(entry)) = open.pop() {
            if closed.contains(entry.index) {
                continue;
            }
            let current = entry.coord;

            if current == end {
                let path = reconstruct_path(grid, &nodes, end);
                debug!("a* reached {} from {} in {} steps, {} cells expanded",
                       end, start, path.steps(), expanded);
                return Ok(SolveOutcome::Found(path));
            }

            let _ = closed.insert(entry.index);
            on_expand(current);
            expanded += 1;
            let current_g = nodes[entry.index].map_or(0, |node| node.g);
            trace!("a* expanding {} g={} f={}", current, current_g, entry.f);

            for (_, neighbour) in neighbours_with_open_status(grid, current, NeighbourMode::Traversal) {
                let neighbour_index = match grid.grid_coordinate_to_index(neighbour) {
                    Some(index) => index,
                    None => continue,
                };
                if closed.contains(neighbour_index) {
                    continue;
                }

                let tentative_g = current_g + 1;
                let improves = nodes[neighbour_index].map_or(true, |node| tentative_g < node.g);
                if improves {
                    let h = neighbour.manhattan_distance(end);
                    let node = SearchNode {
                        g: tentative_g,
                        h,
                        parent: Some(current),
                    };
                    nodes[neighbour_index] = Some(node);
                    sequence += 1;
                    open.push(Reverse(OpenEntry {
                        f: node.f(),
                        h,
                        sequence,
                        index: neighbour_index,
                        coord: neighbour,
                    }));
                }
            }
        }

        debug!("a* found no route from {} to {}, {} cells expanded", start, end, expanded);
        Ok(SolveOutcome::Unreachable)
    }
}

fn reconstruct_path(grid: &Grid, nodes: &[Option<SearchNode>], end: GridCoordinate) -> Path {
    let mut cells = vec![end];
    let mut current = end;
    while let Some(parent) = grid.grid_coordinate_to_index(current)
        .and_then(|index| nodes[index])
        .and_then(|node| node.parent) {
        cells.push(parent);
        current = parent;
    }
    cells.reverse();
    Path::new(cells)
}

/// Flood fill from the start then walk back down the distances from the end.
#[derive(Debug, Copy, Clone, Default)]
pub struct BreadthFirst;

impl Solver for BreadthFirst {
    fn solve(&self, grid: &Grid, start: GridCoordinate, end: GridCoordinate) -> Result<SolveOutcome> {
        check_in_bounds(grid, end)?;
        let distances = Distances::for_grid(grid, start)?;
        Ok(match shortest_path(grid, &distances, end) {
            Some(path) => SolveOutcome::Found(path),
            None => SolveOutcome::Unreachable,
        })
    }
}

/// Steps from a start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, usize>,
    max_distance: usize,
}

impl Distances {
    /// Fails with `OutOfBounds` if `start_coordinate` is not on the grid.
    pub fn for_grid(grid: &Grid, start_coordinate: GridCoordinate) -> Result<Distances> {
        check_in_bounds(grid, start_coordinate)?;

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every passage is one step so the first time a cell is reached is the shortest, the
        // distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances.get(cell_coord).cloned().unwrap_or(0);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for (_, link_coordinate) in
                    neighbours_with_open_status(grid, *cell_coord, NeighbourMode::Traversal) {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Ok(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max_distance
    }

    /// `None` if the cell cannot be reached from the start.
    #[inline]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<usize> {
        self.distances.get(&coord).cloned()
    }

    /// The reachable cells at the maximum distance from the start, in row major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[GridCoordinate; 8]>>();
        furthest.sort_by_key(|c| (c.y, c.x));
        furthest
    }
}

/// Walk from `end_point` back to the start of `distances_from_start`, always stepping to a
/// linked neighbour one step closer to the start. `None` when the end is unreachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Path> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let start = distances_from_start.start();
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_coord != start {
        let closer = neighbours_with_open_status(grid, current_coord, NeighbourMode::Traversal)
            .into_iter()
            .map(|(_, coord)| coord)
            .find(|coord| {
                distances_from_start.distance_from_start_to(*coord) ==
                Some(current_distance.wrapping_sub(1))
            });

        match closer {
            Some(coord) => {
                current_coord = coord;
                current_distance -= 1;
                path.push(current_coord);
            }
            // The distances do not belong to this grid.
            None => return None,
        }
    }

    path.reverse();
    Some(Path::new(path))
}

/// The longest path in a perfect maze: the furthest cell from an arbitrary start is one end of
/// it and the furthest cell from there is the other. On other grids some long path is returned.
pub fn longest_path(grid: &Grid) -> Result<Path> {
    let first_distances = Distances::for_grid(grid, GridCoordinate::new(0, 0))?;
    let long_path_start = first_distances.furthest_points_on_grid()[0];

    let distances_from_start = Distances::for_grid(grid, long_path_start)?;
    let end_point = distances_from_start.furthest_points_on_grid()[0];

    Ok(shortest_path(grid, &distances_from_start, end_point)
        .unwrap_or_else(|| Path::new(vec![long_path_start])))
}
