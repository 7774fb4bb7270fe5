use crate::cells::GridCoordinate;
use crate::pathing::{Distances, Path};
use crate::utils::FnvHashSet;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &Path) -> PathDisplay {
        PathDisplay { on_path_coordinates: path.cells().iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: Vec<GridCoordinate>,
    end_coordinates: Vec<GridCoordinate>,
}

impl StartEndPointsDisplay {
    pub fn new(starts: Vec<GridCoordinate>, ends: Vec<GridCoordinate>) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.start_coordinates.contains(&coord) {
            String::from(" S ")
        } else if self.end_coordinates.contains(&coord) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}
