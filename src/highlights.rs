//! Highlighting of individual cells for display.

use error_chain::bail;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::{self, Grid};
use crate::grid_displays::GridDisplay;
use crate::units::{ColumnsCount, RowsCount};
use crate::utils::{self, FnvHashSet};

/// Display only highlight flags for the cells of one grid, owned by whatever draws the grid.
///
/// Kept apart from `Grid` so that highlighting never touches maze state.
#[derive(Debug, Clone)]
pub struct Highlights {
    rows: RowsCount,
    columns: ColumnsCount,
    highlighted: FnvHashSet<GridCoordinate>,
}

impl Highlights {
    /// No cell highlighted.
    pub fn for_grid(grid: &Grid) -> Highlights {
        Highlights {
            rows: grid.rows(),
            columns: grid.columns(),
            highlighted: utils::fnv_hashset(1),
        }
    }

    /// Fails with `OutOfBounds` for a coordinate outside the grid.
    pub fn set_highlighted(&mut self, coord: GridCoordinate, highlighted: bool) -> Result<()> {
        if !grid::is_within(self.rows, self.columns, coord) {
            bail!(ErrorKind::OutOfBounds(coord));
        }
        if highlighted {
            self.highlighted.insert(coord);
        } else {
            self.highlighted.remove(&coord);
        }
        Ok(())
    }

    /// False for any coordinate outside the grid.
    #[inline]
    pub fn is_highlighted(&self, coord: GridCoordinate) -> bool {
        self.highlighted.contains(&coord)
    }

    pub fn clear_highlights(&mut self) {
        self.highlighted.clear();
    }

    pub fn highlighted_count(&self) -> usize {
        self.highlighted.len()
    }
}

impl GridDisplay for Highlights {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.is_highlighted(coord) {
            String::from("███")
        } else {
            String::from("   ")
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn gc(x: isize, y: isize) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    fn highlights() -> Highlights {
        let g = Grid::new(RowsCount(3), ColumnsCount(4)).unwrap();
        Highlights::for_grid(&g)
    }

    #[test]
    fn nothing_highlighted_at_first() {
        let h = highlights();
        assert_eq!(h.highlighted_count(), 0);
        assert!(!h.is_highlighted(gc(0, 0)));
    }

    #[test]
    fn set_and_unset() {
        let mut h = highlights();
        h.set_highlighted(gc(3, 2), true).unwrap();
        assert!(h.is_highlighted(gc(3, 2)));
        h.set_highlighted(gc(3, 2), false).unwrap();
        assert!(!h.is_highlighted(gc(3, 2)));
    }

    #[test]
    fn out_of_bounds() {
        let mut h = highlights();
        for &coord in &[gc(4, 0), gc(0, 3), gc(-1, 0)] {
            match h.set_highlighted(coord, true) {
                Err(e) => assert!(matches!(e.kind(), ErrorKind::OutOfBounds(_))),
                Ok(_) => panic!("highlighted {}", coord),
            }
        }
        assert_eq!(h.highlighted_count(), 0);
    }

    #[test]
    fn clear_highlights_is_idempotent() {
        let mut h = highlights();
        for &coord in &[gc(0, 0), gc(1, 2), gc(3, 1)] {
            h.set_highlighted(coord, true).unwrap();
        }
        h.clear_highlights();
        assert_eq!(h.highlighted_count(), 0);
        h.clear_highlights();
        assert_eq!(h.highlighted_count(), 0);
        let g = Grid::new(RowsCount(3), ColumnsCount(4)).unwrap();
        assert!(g.iter().all(|coord| !h.is_highlighted(coord)));
    }

    #[test]
    fn render_highlighted_cell() {
        let g = Grid::new(RowsCount(1), ColumnsCount(2)).unwrap();
        let mut h = Highlights::for_grid(&g);
        h.set_highlighted(gc(1, 0), true).unwrap();
        assert_eq!(g.render(Some(&h)),
                   "┌───┬───┐\n\
                    │   │███│\n\
                    └───┴───┘\n");
    }
}
