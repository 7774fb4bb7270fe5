//! **maze_mapper** carves perfect mazes on a rectangular grid of walled cells and finds shortest
//! paths through them.
//!
//! ```
//! use maze_mapper::{cells::GridCoordinate, generators, grid::Grid, pathing::{AStar, Solver},
//!                   units::{ColumnsCount, RowsCount}};
//!
//! let mut grid = Grid::new(RowsCount(10), ColumnsCount(10)).unwrap();
//! generators::random_maze(&mut grid, Some(5)).unwrap();
//! let outcome = AStar.solve(&grid, GridCoordinate::new(0, 0), GridCoordinate::new(9, 9)).unwrap();
//! assert!(outcome.path().is_some());
//! ```

// error_chain! expands deeply
#![recursion_limit = "1024"]

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod highlights;
pub mod neighbours;
pub mod pathing;
pub mod units;
pub mod wall_masks;
mod utils;
