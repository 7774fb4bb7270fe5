//! Crate wide `Error`, `ErrorKind`, `Result` and `ResultExt` created by `error_chain!`.
//!
//! Every failure here is a caller input error, apart from `GeneratorStuck` which signals a broken
//! carving invariant. Nothing is retried.

use error_chain::error_chain;

use crate::cells::{CompassPrimary, GridCoordinate};

error_chain! {
    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("grid dimensions must both be greater than zero")
            display("invalid grid dimensions: {} rows x {} columns", rows, columns)
        }
        OutOfBounds(coordinate: GridCoordinate) {
            description("grid coordinate is outside the grid")
            display("grid coordinate {} is outside the grid", coordinate)
        }
        NotAdjacent(a: GridCoordinate, b: GridCoordinate, direction: CompassPrimary) {
            description("cells are not adjacent in the given direction")
            display("{} is not the neighbour {:?} of {}", b, direction, a)
        }
        GeneratorStuck(visited: usize, total: usize) {
            description("maze generator ran out of cells to backtrack to")
            display("maze generator stuck after visiting {} of {} cells", visited, total)
        }
        InvalidWallMasks(reason: String) {
            description("wall mask data does not describe a valid grid")
            display("invalid wall masks: {}", reason)
        }
    }
}
