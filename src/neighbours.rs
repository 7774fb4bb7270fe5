//! Neighbour lookup driven by wall state, shared by maze generation and path finding.

use smallvec::SmallVec;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Grid;

pub type NeighbourSmallVec = SmallVec<[(CompassPrimary, GridCoordinate); 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum NeighbourMode {
    /// In-bounds neighbours that have not been carved into yet (all four walls closed), whatever
    /// the state of the wall in between.
    Carving,
    /// In-bounds neighbours reachable through an open wall on our side.
    Traversal,
}

/// The `(direction, neighbour)` pairs around `coord` selected by `mode`, in the fixed
/// `CompassPrimary::ALL` order. Empty for a coordinate outside the grid.
pub fn neighbours_with_open_status(grid: &Grid,
                                   coord: GridCoordinate,
                                   mode: NeighbourMode)
                                   -> NeighbourSmallVec {
    if !grid.is_valid_coordinate(coord) {
        return NeighbourSmallVec::new();
    }

    CompassPrimary::ALL.iter()
        .filter_map(|&dir| grid.neighbour_at_direction(coord, dir).map(|n| (dir, n)))
        .filter(|&(dir, neighbour)| match mode {
            NeighbourMode::Carving => grid.has_all_walls(neighbour).unwrap_or(false),
            NeighbourMode::Traversal => grid.is_open(coord, dir),
        })
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    fn gc(x: isize, y: isize) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).unwrap()
    }

    #[test]
    fn carving_mode_on_fresh_grid_gives_every_in_bounds_neighbour() {
        let g = grid(3, 3);
        let centre = neighbours_with_open_status(&g, gc(1, 1), NeighbourMode::Carving);
        assert_eq!(&*centre,
                   &[(CompassPrimary::West, gc(0, 1)),
                     (CompassPrimary::East, gc(2, 1)),
                     (CompassPrimary::South, gc(1, 2)),
                     (CompassPrimary::North, gc(1, 0))]);

        let corner = neighbours_with_open_status(&g, gc(0, 0), NeighbourMode::Carving);
        assert_eq!(&*corner,
                   &[(CompassPrimary::East, gc(1, 0)), (CompassPrimary::South, gc(0, 1))]);
    }

    #[test]
    fn carving_mode_skips_carved_neighbours() {
        let mut g = grid(3, 3);
        g.knock_down(gc(2, 1), gc(2, 2), CompassPrimary::South).unwrap();
        let neighbours = neighbours_with_open_status(&g, gc(1, 1), NeighbourMode::Carving);
        assert_eq!(&*neighbours,
                   &[(CompassPrimary::West, gc(0, 1)),
                     (CompassPrimary::South, gc(1, 2)),
                     (CompassPrimary::North, gc(1, 0))]);
    }

    #[test]
    fn traversal_mode_needs_open_walls() {
        let mut g = grid(3, 3);
        assert!(neighbours_with_open_status(&g, gc(1, 1), NeighbourMode::Traversal).is_empty());

        g.knock_down(gc(1, 1), gc(1, 0), CompassPrimary::North).unwrap();
        g.knock_down(gc(1, 1), gc(0, 1), CompassPrimary::West).unwrap();
        let neighbours = neighbours_with_open_status(&g, gc(1, 1), NeighbourMode::Traversal);
        assert_eq!(&*neighbours,
                   &[(CompassPrimary::West, gc(0, 1)), (CompassPrimary::North, gc(1, 0))]);

        let back = neighbours_with_open_status(&g, gc(1, 0), NeighbourMode::Traversal);
        assert_eq!(&*back, &[(CompassPrimary::South, gc(1, 1))]);
    }

    #[test]
    fn outside_the_grid_has_no_neighbours() {
        let g = grid(2, 2);
        assert!(neighbours_with_open_status(&g, gc(-1, 0), NeighbourMode::Carving).is_empty());
        assert!(neighbours_with_open_status(&g, gc(2, 2), NeighbourMode::Traversal).is_empty());
    }
}
