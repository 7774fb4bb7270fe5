use crate::cells::GridCoordinate;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// Row major iteration over every coordinate of a grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    row_length: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(rows: RowsCount, columns: ColumnsCount) -> CellIter {
        CellIter {
            current_cell_number: 0,
            row_length: columns.0,
            cells_count: rows.0 * columns.0,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = index_to_grid_coordinate(self.row_length, self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

/// Iteration over whole rows (north to south) or whole columns (west to east).
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl BatchIter {
    pub(crate) fn rows(rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Row,
            current_index: 0,
            rows,
            columns,
        }
    }

    pub(crate) fn columns(rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Column,
            current_index: 0,
            rows,
            columns,
        }
    }

    fn batches_count(&self) -> usize {
        match self.iter_type {
            BatchIterType::Row => self.rows.0,
            BatchIterType::Column => self.columns.0,
        }
    }
}

impl ExactSizeIterator for BatchIter {}
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index >= self.batches_count() {
            return None;
        }

        let index = self.current_index;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                (0..self.columns.0)
                    .map(|i| GridCoordinate::from_row_column_indices(ColumnIndex(i), RowIndex(index)))
                    .collect()
            }
            BatchIterType::Column => {
                (0..self.rows.0)
                    .map(|i| GridCoordinate::from_row_column_indices(ColumnIndex(index), RowIndex(i)))
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.batches_count() - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[inline]
pub(crate) fn index_to_grid_coordinate(row_length: usize, one_dimensional_index: usize) -> GridCoordinate {
    let y = one_dimensional_index / row_length;
    let x = one_dimensional_index - (y * row_length);
    GridCoordinate::new(x as isize, y as isize)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cell_iter() {
        let iter = CellIter::new(RowsCount(2), ColumnsCount(3));
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.collect::<Vec<GridCoordinate>>(),
                   &[GridCoordinate::new(0, 0),
                     GridCoordinate::new(1, 0),
                     GridCoordinate::new(2, 0),
                     GridCoordinate::new(0, 1),
                     GridCoordinate::new(1, 1),
                     GridCoordinate::new(2, 1)]);
    }

    #[test]
    fn row_iter() {
        let iter = BatchIter::rows(RowsCount(2), ColumnsCount(3));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<Vec<GridCoordinate>>>(),
                   vec![vec![GridCoordinate::new(0, 0), GridCoordinate::new(1, 0), GridCoordinate::new(2, 0)],
                        vec![GridCoordinate::new(0, 1), GridCoordinate::new(1, 1), GridCoordinate::new(2, 1)]]);
    }

    #[test]
    fn column_iter() {
        let iter = BatchIter::columns(RowsCount(2), ColumnsCount(3));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<Vec<GridCoordinate>>>(),
                   vec![vec![GridCoordinate::new(0, 0), GridCoordinate::new(0, 1)],
                        vec![GridCoordinate::new(1, 0), GridCoordinate::new(1, 1)],
                        vec![GridCoordinate::new(2, 0), GridCoordinate::new(2, 1)]]);
    }

    #[test]
    fn index_conversion() {
        assert_eq!(index_to_grid_coordinate(4, 0), GridCoordinate::new(0, 0));
        assert_eq!(index_to_grid_coordinate(4, 5), GridCoordinate::new(1, 1));
        assert_eq!(index_to_grid_coordinate(4, 11), GridCoordinate::new(3, 2));
    }
}
