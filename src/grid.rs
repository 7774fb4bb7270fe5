use std::fmt;
use std::slice;

use error_chain::bail;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::{Cell, CompassPrimary, GridCoordinate, Walls};
use crate::errors::*;
use crate::grid_displays::GridDisplay;
use crate::grid_iterators::{self, BatchIter, CellIter};
use crate::units::{ColumnsCount, RowsCount};
use crate::wall_masks;

/// A rectangular grid of cells separated by walls.
///
/// The grid owns every cell and is the only thing that can change wall state, so the two sides
/// of a wall are always either both open or both closed.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, open passages: {}",
               self.rows, self.columns, self.open_passages_count())
    }
}

impl Grid {
    /// A grid of `rows * columns` cells, every wall closed.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let cells_count = checked_cells_count(rows, columns)?;
        let walls = vec![Walls::ALL_CLOSED; cells_count];
        Ok(Grid::from_walls(rows, columns, walls))
    }

    /// Lay out one `Walls` per cell in row major order. No symmetry check is made here.
    pub(crate) fn from_walls(rows: RowsCount, columns: ColumnsCount, walls: Vec<Walls>) -> Grid {
        let cells = walls.into_iter()
            .enumerate()
            .map(|(index, w)| {
                Cell::new(grid_iterators::index_to_grid_coordinate(columns.0, index), w)
            })
            .collect();
        Grid { cells, rows, columns }
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The cell in column `x` of row `y`.
    pub fn cell_at(&self, x: isize, y: isize) -> Result<&Cell> {
        self.cell(GridCoordinate::new(x, y))
    }

    pub fn cell(&self, coord: GridCoordinate) -> Result<&Cell> {
        self.grid_coordinate_to_index(coord)
            .map(|index| &self.cells[index])
            .ok_or_else(|| ErrorKind::OutOfBounds(coord).into())
    }

    /// True iff all four walls of the cell are closed, i.e. the cell has not been carved into.
    pub fn has_all_walls(&self, coord: GridCoordinate) -> Result<bool> {
        self.cell(coord).map(Cell::has_all_walls)
    }

    /// Is there an open wall on the `direction` side of the cell?
    /// False for coordinates outside the grid.
    #[inline]
    pub fn is_open(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(false, |index| self.cells[index].is_open(direction))
    }

    /// Knock down the wall between `a` and its neighbour `b` that lies in `direction`.
    ///
    /// Opens the wall on both sides at once. Fails with `OutOfBounds` if either cell is outside
    /// the grid and with `NotAdjacent` if `b` is not one step from `a` in `direction`.
    pub fn knock_down(&mut self,
                      a: GridCoordinate,
                      b: GridCoordinate,
                      direction: CompassPrimary)
                      -> Result<()> {
        let a_index = self.grid_coordinate_to_index(a).ok_or(ErrorKind::OutOfBounds(a))?;
        let b_index = self.grid_coordinate_to_index(b).ok_or(ErrorKind::OutOfBounds(b))?;
        if a.offset(direction) != b {
            bail!(ErrorKind::NotAdjacent(a, b, direction));
        }

        self.cells[a_index].walls_mut().open(direction);
        self.cells[b_index].walls_mut().open(direction.opposite());
        Ok(())
    }

    /// Close every wall again so the grid can be carved afresh.
    pub fn reset_walls(&mut self) {
        for cell in &mut self.cells {
            *cell.walls_mut() = Walls::ALL_CLOSED;
        }
    }

    /// The neighbouring coordinate in `direction` if it is inside the grid.
    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        let neighbour_coord = coord.offset(direction);
        if self.is_valid_coordinate(neighbour_coord) {
            Some(neighbour_coord)
        } else {
            None
        }
    }

    /// Number of open walls between pairs of cells inside the grid. Boundary walls do not count.
    pub fn open_passages_count(&self) -> usize {
        self.iter()
            .map(|coord| {
                [CompassPrimary::East, CompassPrimary::South]
                    .iter()
                    .filter(|&&dir| {
                        self.neighbour_at_direction(coord, dir).is_some() && self.is_open(coord, dir)
                    })
                    .count()
            })
            .sum()
    }

    /// The open passages as an undirected graph. Node indices follow row major cell order and
    /// node weights are the cell coordinates.
    pub fn passage_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.size());
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (index, coord) in self.iter().enumerate() {
            for &dir in &[CompassPrimary::East, CompassPrimary::South] {
                if let Some(neighbour) = self.neighbour_at_direction(coord, dir) {
                    if self.is_open(coord, dir) {
                        if let Some(neighbour_index) = self.grid_coordinate_to_index(neighbour) {
                            let _ = graph.add_edge(NodeIndex::new(index),
                                                   NodeIndex::new(neighbour_index),
                                                   ());
                        }
                    }
                }
            }
        }
        graph
    }

    /// Convert a grid coordinate to a one dimensional row major index in the range 0..size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// Is the grid coordinate within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        is_within(self.rows, self.columns, coord)
    }

    /// One 4 bit mask of closed walls per cell, row major. See `wall_masks`.
    pub fn wall_masks(&self) -> Vec<u8> {
        wall_masks::encode(self)
    }

    /// Rebuild a grid from the output of `wall_masks`, failing with `InvalidWallMasks` if the
    /// masks do not describe a consistent grid of this size.
    pub fn from_wall_masks(rows: RowsCount, columns: ColumnsCount, masks: &[u8]) -> Result<Grid> {
        wall_masks::decode(rows, columns, masks)
    }

    #[inline]
    pub fn cells(&self) -> slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.rows, self.columns)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.rows, self.columns)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.rows, self.columns)
    }

    /// Text rendering of the maze with box drawing characters. Each cell body is filled in by
    /// the overlay if one is given.
    pub fn render(&self, overlay: Option<&dyn GridDisplay>) -> String {
        let columns_count = self.columns.0;
        let rows_count = self.rows.0;

        // Walls on grid lines. Vertical line `px` runs down the west side of column `px` and
        // horizontal line `py` along the north side of row `py`, the outer boundary is always a wall.
        let vertical_wall = |px: usize, y: usize| {
            px == 0 || !self.is_passage(GridCoordinate::new(px as isize - 1, y as isize), CompassPrimary::East)
        };
        let horizontal_wall = |x: usize, py: usize| {
            py == 0 || !self.is_passage(GridCoordinate::new(x as isize, py as isize - 1), CompassPrimary::South)
        };
        let junction = |px: usize, py: usize| {
            let up = py > 0 && vertical_wall(px, py - 1);
            let down = py < rows_count && vertical_wall(px, py);
            let left = px > 0 && horizontal_wall(px - 1, py);
            let right = px < columns_count && horizontal_wall(px, py);
            JUNCTIONS[(up as usize) << 3 | (down as usize) << 2 | (left as usize) << 1 | right as usize]
        };

        let mut output = String::new();
        for py in 0..rows_count + 1 {
            for px in 0..columns_count + 1 {
                output.push_str(junction(px, py));
                if px < columns_count {
                    output.push_str(if horizontal_wall(px, py) { "───" } else { "   " });
                }
            }
            output.push('\n');

            if py < rows_count {
                for px in 0..columns_count + 1 {
                    output.push_str(if vertical_wall(px, py) { "│" } else { " " });
                    if px < columns_count {
                        let coord = GridCoordinate::new(px as isize, py as isize);
                        let body = overlay.map_or_else(|| String::from("   "),
                                                       |o| o.render_cell_body(coord));
                        output.push_str(&body);
                    }
                }
                output.push('\n');
            }
        }
        output
    }

    /// An open wall between two cells inside the grid.
    fn is_passage(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction).is_some() && self.is_open(coord, direction)
    }
}

// Box drawing glyph where grid lines meet, indexed by the walls leaving the point:
// up = 8, down = 4, left = 2, right = 1.
const JUNCTIONS: [&str; 16] = [" ", "╶", "╴", "─", "╷", "┌", "┐", "┬",
                               "╵", "└", "┘", "┴", "│", "├", "┤", "┼"];

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Is `coord` inside a grid of `rows * columns` cells. `x` is bounded by the columns and `y` by
/// the rows.
#[inline]
pub(crate) fn is_within(rows: RowsCount, columns: ColumnsCount, coord: GridCoordinate) -> bool {
    coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < columns.0 && (coord.y as usize) < rows.0
}

fn checked_cells_count(rows: RowsCount, columns: ColumnsCount) -> Result<usize> {
    let invalid = || ErrorKind::InvalidDimensions(rows.0, columns.0);
    if rows.0 == 0 || columns.0 == 0 || rows.0 > isize::MAX as usize ||
       columns.0 > isize::MAX as usize {
        bail!(invalid());
    }
    rows.0.checked_mul(columns.0).ok_or_else(|| invalid().into())
}
