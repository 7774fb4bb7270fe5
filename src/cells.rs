use std::fmt;

use crate::units::{ColumnIndex, RowIndex};

/// Position of a cell in the grid. `x` is the column and `y` the row, (0, 0) is the top left.
///
/// Signed so that offsets off the edge of the grid are representable and can simply be
/// rejected as out of bounds.
#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: isize,
    pub y: isize,
}

impl GridCoordinate {
    pub fn new(x: isize, y: isize) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> GridCoordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        GridCoordinate::new(col as isize, row as isize)
    }

    /// Creates a new `GridCoordinate` offset 1 cell away in the given direction.
    /// The result may lie outside of any particular grid.
    #[inline]
    pub fn offset(&self, dir: CompassPrimary) -> GridCoordinate {
        let (dx, dy) = dir.unit_vector();
        GridCoordinate {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Number of horizontal plus vertical steps between two coordinates.
    #[inline]
    pub fn manhattan_distance(&self, other: GridCoordinate) -> usize {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as usize
    }
}

impl From<(isize, isize)> for GridCoordinate {
    fn from(x_y_pair: (isize, isize)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// All directions in the order neighbours are visited.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::West,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::North];

    /// The direction facing back across the same wall.
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// (dx, dy) with y growing southwards.
    pub fn unit_vector(self) -> (isize, isize) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }

    #[inline]
    fn wall_bit(self) -> u8 {
        match self {
            CompassPrimary::North => 0b1000,
            CompassPrimary::South => 0b0100,
            CompassPrimary::East => 0b0010,
            CompassPrimary::West => 0b0001,
        }
    }
}

/// The four wall flags of a cell packed into the low nibble: N=8, S=4, E=2, W=1.
/// A set bit is a wall that is present.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Walls(u8);

impl Walls {
    pub const ALL_CLOSED: Walls = Walls(0b1111);

    /// Walls from a 4 bit mask, `None` if any higher bit is set.
    pub fn from_bits(bits: u8) -> Option<Walls> {
        if bits <= Walls::ALL_CLOSED.0 {
            Some(Walls(bits))
        } else {
            None
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_closed(self, dir: CompassPrimary) -> bool {
        self.0 & dir.wall_bit() != 0
    }

    #[inline]
    pub fn is_open(self, dir: CompassPrimary) -> bool {
        !self.is_closed(dir)
    }

    #[inline]
    pub fn all_closed(self) -> bool {
        self == Walls::ALL_CLOSED
    }

    // Only the grid may change walls, it keeps both sides of a wall in step.
    #[inline]
    pub(crate) fn open(&mut self, dir: CompassPrimary) {
        self.0 &= !dir.wall_bit();
    }
}

impl Default for Walls {
    fn default() -> Walls {
        Walls::ALL_CLOSED
    }
}

/// A maze cell: its position and the state of the walls around it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    coordinate: GridCoordinate,
    walls: Walls,
}

impl Cell {
    pub(crate) fn new(coordinate: GridCoordinate, walls: Walls) -> Cell {
        Cell { coordinate, walls }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coordinate
    }

    /// Read only snapshot of the wall flags.
    #[inline]
    pub fn walls(&self) -> Walls {
        self.walls
    }

    #[inline]
    pub fn is_open(&self, dir: CompassPrimary) -> bool {
        self.walls.is_open(dir)
    }

    /// A cell still enclosed on all four sides has not been carved into yet.
    #[inline]
    pub fn has_all_walls(&self) -> bool {
        self.walls.all_closed()
    }

    #[inline]
    pub(crate) fn walls_mut(&mut self) -> &mut Walls {
        &mut self.walls
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cell({}, {})", self.coordinate.x, self.coordinate.y)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn opposite_directions() {
        for dir in CompassPrimary::ALL.iter().cloned() {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
            let (dx, dy) = dir.unit_vector();
            let (odx, ody) = dir.opposite().unit_vector();
            assert_eq!((dx + odx, dy + ody), (0, 0));
        }
    }

    #[test]
    fn coordinate_offsets() {
        let c = GridCoordinate::new(1, 1);
        assert_eq!(c.offset(CompassPrimary::North), GridCoordinate::new(1, 0));
        assert_eq!(c.offset(CompassPrimary::South), GridCoordinate::new(1, 2));
        assert_eq!(c.offset(CompassPrimary::East), GridCoordinate::new(2, 1));
        assert_eq!(c.offset(CompassPrimary::West), GridCoordinate::new(0, 1));
        assert_eq!(GridCoordinate::new(0, 0).offset(CompassPrimary::West),
                   GridCoordinate::new(-1, 0));
    }

    #[test]
    fn manhattan() {
        let a = GridCoordinate::new(0, 0);
        assert_eq!(a.manhattan_distance(a), 0);
        assert_eq!(a.manhattan_distance(GridCoordinate::new(2, 2)), 4);
        assert_eq!(GridCoordinate::new(3, 1).manhattan_distance(GridCoordinate::new(1, 4)), 5);
    }

    #[test]
    fn walls_start_closed_and_open_independently() {
        let mut walls = Walls::default();
        assert!(walls.all_closed());
        walls.open(CompassPrimary::East);
        assert!(!walls.all_closed());
        assert!(walls.is_open(CompassPrimary::East));
        assert!(walls.is_closed(CompassPrimary::North));
        assert!(walls.is_closed(CompassPrimary::South));
        assert!(walls.is_closed(CompassPrimary::West));
        assert_eq!(walls.bits(), 0b1101);
    }

    #[test]
    fn walls_from_bits() {
        assert_eq!(Walls::from_bits(0xf), Some(Walls::ALL_CLOSED));
        assert_eq!(Walls::from_bits(0).map(|w| w.is_open(CompassPrimary::North)), Some(true));
        assert_eq!(Walls::from_bits(0x10), None);
    }

    #[test]
    fn cell_display() {
        let cell = Cell::new(GridCoordinate::new(2, 3), Walls::default());
        assert_eq!(cell.to_string(), "Cell(2, 3)");
        assert_eq!(cell.coordinate().to_string(), "(2, 3)");
        assert!(cell.has_all_walls());
    }
}
