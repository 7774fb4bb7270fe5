use docopt::Docopt;
use log::{info, warn};
use serde_derive::Deserialize;
use maze_mapper::{
    cells::GridCoordinate,
    generators,
    grid::Grid,
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay},
    pathing::{self, AStar, BreadthFirst, SolveOutcome, Solver},
    units::{ColumnsCount, RowsCount},
    wall_masks,
};
use std::{
    fs::{self, File},
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze Mapper

Usage:
    maze_mapper_driver -h | --help
    maze_mapper_driver [--rows=<n>] [--columns=<n>] [--seed=<s>] [--load-walls=<path>] [--save-walls=<path>] [--text-out=<path>]
    maze_mapper_driver solve (a-star|breadth-first) [--start-x=<x> --start-y=<y>] [--end-x=<x> --end-y=<y>] [--longest-path] [--show-distances] [--rows=<n>] [--columns=<n>] [--seed=<s>] [--load-walls=<path>] [--save-walls=<path>] [--text-out=<path>]

Options:
    -h --help             Show this screen.
    --rows=<n>            Number of rows of cells in the maze [default: 20].
    --columns=<n>         Number of columns of cells in the maze [default: 20].
    --seed=<s>            Seed for the maze generator. A random seed is used if not given.
    --load-walls=<path>   Load the maze walls from a file written by --save-walls instead of generating a maze. Ignores --rows, --columns and --seed.
    --save-walls=<path>   Save the maze walls to a text file: one line per row, one hex digit per cell holding its closed walls N=8 S=4 E=2 W=1.
    --text-out=<path>     Output file path for a textual rendering of the maze, printed to stdout if not given.
    --start-x=<x>         x (column) of the path start [default: 0].
    --start-y=<y>         y (row) of the path start [default: 0].
    --end-x=<x>           x (column) of the path end. Defaults to the last column.
    --end-y=<y>           y (row) of the path end. Defaults to the last row.
    --longest-path        Solve between the two ends of the longest path in the maze, ignoring any start or end point.
    --show-distances      Show the distance in steps (hexadecimal) from the start point to every cell instead of the path.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_load_walls: String,
    flag_save_walls: String,
    flag_text_out: String,
    cmd_solve: bool,
    cmd_a_star: bool,
    cmd_breadth_first: bool,
    flag_start_x: isize,
    flag_start_y: isize,
    flag_end_x: Option<isize>,
    flag_end_y: Option<isize>,
    flag_longest_path: bool,
    flag_show_distances: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_mapper::errors::Error, ::maze_mapper::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    // Help requests print the usage and exit cleanly, anything else is a failure.
    let args = match parse_args(::std::env::args()) {
        Err(ref e) if !e.fatal() => e.exit(),
        parsed => parsed?,
    };

    let maze_grid = build_maze(&args)?;

    if !args.flag_save_walls.is_empty() {
        write_text_to_file(&wall_masks::to_text(&maze_grid), &args.flag_save_walls)
            .chain_err(|| format!("Failed to write maze walls to {}", args.flag_save_walls))?;
    }

    let text = if args.cmd_solve {
        let overlay = solve_maze(&maze_grid, &args)?;
        maze_grid.render(Some(&*overlay))
    } else {
        maze_grid.render(None)
    };

    if args.flag_text_out.is_empty() {
        println!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn parse_args<I, S>(argv: I) -> ::std::result::Result<MazeArgs, docopt::Error>
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    Docopt::new(USAGE).and_then(|d| d.argv(argv).deserialize())
}

fn build_maze(args: &MazeArgs) -> Result<Grid> {
    if !args.flag_load_walls.is_empty() {
        let text = fs::read_to_string(&args.flag_load_walls)
            .chain_err(|| format!("Failed to read maze walls from {}", args.flag_load_walls))?;
        let grid = wall_masks::from_text(&text)?;
        info!("loaded {:?} from {}", grid, args.flag_load_walls);
        return Ok(grid);
    }

    let mut grid = Grid::new(RowsCount(args.flag_rows), ColumnsCount(args.flag_columns))?;
    generators::random_maze(&mut grid, args.flag_seed)?;
    info!("generated {:?}", grid);
    Ok(grid)
}

/// Solve between the requested points and decide how the cells should be displayed:
/// - distances from the start to every cell
/// - the path from start to end
/// - just the start and end markers if there is no path
fn solve_maze(maze_grid: &Grid, args: &MazeArgs) -> Result<Box<dyn GridDisplay>> {

    let (start, end) = if args.flag_longest_path {
        let longest = pathing::longest_path(maze_grid)?;
        let start = longest.start().unwrap_or_else(|| GridCoordinate::new(0, 0));
        (start, longest.end().unwrap_or(start))
    } else {
        let last_x = maze_grid.columns().0 as isize - 1;
        let last_y = maze_grid.rows().0 as isize - 1;
        (GridCoordinate::new(args.flag_start_x, args.flag_start_y),
         GridCoordinate::new(args.flag_end_x.unwrap_or(last_x), args.flag_end_y.unwrap_or(last_y)))
    };

    if args.flag_show_distances {
        return Ok(Box::new(pathing::Distances::for_grid(maze_grid, start)?));
    }

    let solver: Box<dyn Solver> = if args.cmd_breadth_first {
        Box::new(BreadthFirst)
    } else {
        debug_assert!(args.cmd_a_star);
        Box::new(AStar)
    };

    match solver.solve(maze_grid, start, end)? {
        SolveOutcome::Found(path) => {
            info!("path from {} to {} takes {} steps", start, end, path.steps());
            Ok(Box::new(PathDisplay::new(&path)))
        }
        SolveOutcome::Unreachable => {
            warn!("no path from {} to {}", start, end);
            Ok(Box::new(StartEndPointsDisplay::new(vec![start], vec![end])))
        }
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
