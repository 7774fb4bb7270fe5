use error_chain::bail;
use log::{debug, error, trace};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::neighbours::{neighbours_with_open_status, NeighbourMode};

/// Picks which of the carving candidates the generator moves to next.
pub trait CandidateChooser {
    /// An index in `0..candidates_count`. Never called with zero candidates.
    fn choose(&mut self, candidates_count: usize) -> usize;
}

/// Uniformly random choice.
#[derive(Debug, Clone)]
pub struct RandomChooser<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomChooser<R> {
    pub fn new(rng: R) -> RandomChooser<R> {
        RandomChooser { rng }
    }
}

impl RandomChooser<XorShiftRng> {
    /// Same seed, same maze.
    pub fn from_seed(seed: u64) -> RandomChooser<XorShiftRng> {
        RandomChooser::new(XorShiftRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CandidateChooser for RandomChooser<R> {
    fn choose(&mut self, candidates_count: usize) -> usize {
        self.rng.gen_range(0..candidates_count)
    }
}

/// Always takes the first candidate. Gives reproducible mazes without a random source.
#[derive(Debug, Copy, Clone, Default)]
pub struct FirstCandidate;

impl CandidateChooser for FirstCandidate {
    fn choose(&mut self, _: usize) -> usize {
        0
    }
}

/// Apply the recursive backtracker maze generation algorithm to a freshly created grid.
///
/// A depth first walk from the top left cell that knocks through into a not yet carved
/// neighbour, picked by `chooser`, and backtracks along its stack at dead ends. Every cell is
/// visited exactly once so the passages form a spanning tree: a perfect maze.
///
/// The grid must have all walls closed (see `Grid::reset_walls`). An already carved grid leaves
/// the walk with nowhere to go and fails with `GeneratorStuck`.
pub fn recursive_backtracker<C>(grid: &mut Grid, chooser: &mut C) -> Result<()>
    where C: CandidateChooser + ?Sized
{
    let cells_count = grid.size();
    let mut stack: Vec<GridCoordinate> = Vec::with_capacity(cells_count);
    let mut current = GridCoordinate::new(0, 0);
    let mut visited_count = 1;

    debug!("carving {} cell maze starting at {}", cells_count, current);

    while visited_count < cells_count {
        let candidates = neighbours_with_open_status(grid, current, NeighbourMode::Carving);

        if candidates.is_empty() {
            // Dead end, back up to the last cell that may still have somewhere to go.
            current = match stack.pop() {
                Some(previous) => previous,
                None => {
                    error!("maze generator has nowhere to backtrack to from {} with {} of {} cells visited",
                           current, visited_count, cells_count);
                    bail!(ErrorKind::GeneratorStuck(visited_count, cells_count));
                }
            };
            trace!("backtracked to {}", current);
            continue;
        }

        let (direction, next) = candidates[chooser.choose(candidates.len()) % candidates.len()];
        grid.knock_down(current, next, direction)?;
        stack.push(current);

        current = next;
        visited_count += 1;
    }

    debug!("maze carved with {} open passages", grid.open_passages_count());
    Ok(())
}

/// Carve a random maze. The same `seed` always gives the same maze, a random seed is used
/// when none is given.
pub fn random_maze(grid: &mut Grid, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    debug!("random maze seed {}", seed);
    recursive_backtracker(grid, &mut RandomChooser::from_seed(seed))
}
