//! # grid_pathviz
//!
//! The search core of a grid pathfinding visualizer. Two best-first searches run over a
//! 4-connected grid with unit edge costs:
//! [uniform-cost search](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) guided by the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry).
//! Both write their state into the cells of a [SearchGrid] and return the cells in the order
//! they were finalized together with the reconstructed path, so an external driver can replay
//! the search step by step. Frontiers break ties first-in-first-out, which makes every run
//! deterministic.
//!
//! [Session] models the editing surface around the core: obstacles, a start cell and several
//! named destinations of which one is searched for per run.
pub mod error;
pub mod frontier;
pub mod search_grid;
pub mod session;
pub mod solver;

use core::fmt;
use core::str::FromStr;
use grid_util::point::Point;

pub use crate::error::{Error, Occupant, Result};
pub use crate::search_grid::{Cell, SearchGrid};
pub use crate::session::{Destination, DestinationId, Session, SessionConfig};
pub use crate::solver::{
    astar::AstarSolver, dijkstra::DijkstraSolver, path_cost, GridSolver, RevealStep, SearchResult,
};

/// Cost of moving to an adjacent cell.
pub const STEP_COST: i32 = 1;
/// Distance of a cell no search has reached.
pub const UNREACHABLE: i32 = i32::MAX;

pub const MIN_GRID_SIZE: usize = 10;
pub const MAX_GRID_SIZE: usize = 80;
pub const DEFAULT_GRID_SIZE: usize = 40;
pub const MAX_DESTINATION_NAME_LEN: usize = 20;

/// The search algorithms a run can use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Dijkstra-style search ordered by distance from the start.
    UniformCost,
    /// A* ordered by distance plus Manhattan estimate.
    #[default]
    Heuristic,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::UniformCost => f.write_str("dijkstra"),
            Algorithm::Heuristic => f.write_str("astar"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" | "uniform-cost" | "uniform_cost" => Ok(Algorithm::UniformCost),
            "astar" | "a*" | "heuristic" => Ok(Algorithm::Heuristic),
            _ => Err(Error::UnknownAlgorithm { name: s.to_owned() }),
        }
    }
}

/// Runs the chosen algorithm from `start` to `goal`. The grid must have been reset with
/// [SearchGrid::reset_search_state] if an earlier run touched it.
pub fn run_search(
    algorithm: Algorithm,
    grid: &mut SearchGrid,
    start: Point,
    goal: Point,
) -> Result<SearchResult> {
    match algorithm {
        Algorithm::UniformCost => DijkstraSolver.get_path_single_goal(grid, start, goal),
        Algorithm::Heuristic => AstarSolver::new().get_path_single_goal(grid, start, goal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_round_trip() {
        for algorithm in [Algorithm::UniformCost, Algorithm::Heuristic] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::Heuristic));
        assert_eq!(
            "Uniform-Cost".parse::<Algorithm>(),
            Ok(Algorithm::UniformCost)
        );
        assert!(matches!(
            "bfs".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm { .. })
        ));
        assert_eq!(Algorithm::default(), Algorithm::Heuristic);
    }

    /// Both algorithms agree on path length and reset makes reruns identical.
    #[test]
    fn run_search_dispatches_and_repeats() {
        let mut grid = SearchGrid::build(4, 4);
        grid.set_obstacle(Point::new(1, 1), true).unwrap();
        grid.set_obstacle(Point::new(2, 1), true).unwrap();
        let start = Point::new(0, 0);
        let goal = Point::new(3, 3);
        for algorithm in [Algorithm::UniformCost, Algorithm::Heuristic] {
            grid.reset_search_state();
            let first = run_search(algorithm, &mut grid, start, goal).unwrap();
            grid.reset_search_state();
            let second = run_search(algorithm, &mut grid, start, goal).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.edge_count(), Some(6));
        }
    }
}
