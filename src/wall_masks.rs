//! Saving and loading wall state.
//!
//! Each cell is a 4 bit mask of its closed walls, N=8 S=4 E=2 W=1, in row major order. The
//! text form is one line per row with one lowercase hex digit per cell.

use error_chain::bail;

use crate::cells::{CompassPrimary, Walls};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

/// One mask per cell, row major.
pub fn encode(grid: &Grid) -> Vec<u8> {
    grid.cells().map(|cell| cell.walls().bits()).collect()
}

/// Rebuild a grid from masks produced by `encode`.
///
/// Fails with `InvalidDimensions` for an empty grid and with `InvalidWallMasks` if the mask
/// count does not match, a mask is wider than 4 bits, or the two sides of an inner wall disagree.
pub fn decode(rows: RowsCount, columns: ColumnsCount, masks: &[u8]) -> Result<Grid> {
    // Validates the dimensions.
    let empty = Grid::new(rows, columns)?;
    if masks.len() != empty.size() {
        bail!(ErrorKind::InvalidWallMasks(format!("expected {} cell masks, found {}",
                                                  empty.size(),
                                                  masks.len())));
    }

    let walls = masks.iter()
        .enumerate()
        .map(|(index, &bits)| {
            Walls::from_bits(bits).ok_or_else(|| {
                ErrorKind::InvalidWallMasks(format!("mask {:#x} of cell {} is not 4 bits", bits, index))
            })
        })
        .collect::<::std::result::Result<Vec<Walls>, ErrorKind>>()?;

    let grid = Grid::from_walls(rows, columns, walls);
    for coord in grid.iter() {
        for &dir in &[CompassPrimary::East, CompassPrimary::South] {
            if let Some(neighbour) = grid.neighbour_at_direction(coord, dir) {
                if grid.is_open(coord, dir) != grid.is_open(neighbour, dir.opposite()) {
                    bail!(ErrorKind::InvalidWallMasks(format!("wall {:?} of {} does not match wall {:?} of {}",
                                                              dir,
                                                              coord,
                                                              dir.opposite(),
                                                              neighbour)));
                }
            }
        }
    }
    Ok(grid)
}

pub fn to_text(grid: &Grid) -> String {
    let mut text = String::with_capacity(grid.size() + grid.rows().0);
    for row in grid.iter_row() {
        for coord in row {
            if let Ok(cell) = grid.cell(coord) {
                text.push_str(&format!("{:x}", cell.walls().bits()));
            }
        }
        text.push('\n');
    }
    text
}

/// Parse the text form. Blank lines are ignored and every row must be the same width.
pub fn from_text(text: &str) -> Result<Grid> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let columns = lines.first().map_or(0, |l| l.chars().count());

    let mut masks = Vec::with_capacity(lines.len() * columns);
    for (row, line) in lines.iter().enumerate() {
        if line.chars().count() != columns {
            bail!(ErrorKind::InvalidWallMasks(format!("row {} has {} cells, expected {}",
                                                      row,
                                                      line.chars().count(),
                                                      columns)));
        }
        for c in line.chars() {
            let bits = c.to_digit(16)
                .ok_or_else(|| ErrorKind::InvalidWallMasks(format!("{:?} in row {} is not a hex digit", c, row)))?;
            masks.push(bits as u8);
        }
    }

    decode(RowsCount(lines.len()), ColumnsCount(columns), &masks)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::GridCoordinate;
    use crate::generators;

    fn invalid_masks(r: Result<Grid>) -> bool {
        match r {
            Err(e) => matches!(e.kind(), ErrorKind::InvalidWallMasks(_)),
            Ok(_) => false,
        }
    }

    #[test]
    fn closed_grid_text() {
        let g = Grid::new(RowsCount(2), ColumnsCount(3)).unwrap();
        assert_eq!(to_text(&g), "fff\nfff\n");
        assert_eq!(encode(&g), vec![0xf; 6]);
    }

    #[test]
    fn generated_maze_survives_text_form() {
        let mut g = Grid::new(RowsCount(7), ColumnsCount(5)).unwrap();
        generators::random_maze(&mut g, Some(11)).unwrap();
        let loaded = from_text(&to_text(&g)).unwrap();
        assert_eq!(loaded, g);
        assert_eq!(loaded.open_passages_count(), 34);
    }

    #[test]
    fn decode_masks() {
        let g = decode(RowsCount(1), ColumnsCount(2), &[0b1101, 0b1110]).unwrap();
        assert!(g.is_open(GridCoordinate::new(0, 0), CompassPrimary::East));
        assert!(g.is_open(GridCoordinate::new(1, 0), CompassPrimary::West));
        assert_eq!(g.open_passages_count(), 1);
    }

    #[test]
    fn one_sided_walls_are_rejected() {
        assert!(invalid_masks(decode(RowsCount(1), ColumnsCount(2), &[0b1101, 0b1111])));
        assert!(invalid_masks(from_text("ff\n7f\n")));
    }

    #[test]
    fn bad_mask_data_is_rejected() {
        assert!(invalid_masks(decode(RowsCount(1), ColumnsCount(2), &[0xf])));
        assert!(invalid_masks(decode(RowsCount(1), ColumnsCount(1), &[0x1f])));
        assert!(invalid_masks(from_text("ff\nf\n")));
        assert!(invalid_masks(from_text("fg\n")));
        match from_text("\n\n") {
            Err(e) => assert!(matches!(e.kind(), ErrorKind::InvalidDimensions(0, 0))),
            Ok(_) => panic!("loaded an empty grid"),
        }
    }
}
