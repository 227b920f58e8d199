use crate::{error::Result, search_grid::SearchGrid, STEP_COST};
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, info};

pub mod astar;
pub mod dijkstra;

/// Outcome of one search run. Points refer to cells of the searched grid, which keeps owning them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Cells in the order they were finalized, for progressive reveal.
    pub visited_in_order: Vec<Point>,
    /// Start to goal inclusive, empty if no path exists.
    pub path: Vec<Point>,
    pub succeeded: bool,
}

/// One frame of a playback: all visited cells first, then the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStep {
    Visited(Point),
    Path(Point),
}

impl SearchResult {
    pub fn found(visited_in_order: Vec<Point>, path: Vec<Point>) -> SearchResult {
        SearchResult {
            visited_in_order,
            path,
            succeeded: true,
        }
    }
    pub fn not_found(visited_in_order: Vec<Point>) -> SearchResult {
        SearchResult {
            visited_in_order,
            path: Vec::new(),
            succeeded: false,
        }
    }
    /// Number of moves along the path, `None` if the search failed.
    pub fn edge_count(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
    pub fn reveal(&self) -> impl Iterator<Item = RevealStep> + '_ {
        self.visited_in_order
            .iter()
            .map(|&p| RevealStep::Visited(p))
            .chain(self.path.iter().map(|&p| RevealStep::Path(p)))
    }
}

/// Sums the step costs between consecutive points of a path.
pub fn path_cost(path: &[Point]) -> i32 {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| a.manhattan_distance(b) * STEP_COST)
        .sum()
}

pub trait GridSolver {
    /// Estimated remaining cost from `point` to `goal`.
    fn heuristic(&self, point: &Point, goal: &Point) -> i32;

    /// Runs the search loop on `grid`, writing search state into its cells. Endpoints are assumed
    /// to be valid and the grid to have been reset; use
    /// [get_path_single_goal](Self::get_path_single_goal) for the checked entry point.
    fn search(&self, grid: &mut SearchGrid, start: Point, goal: Point) -> SearchResult;

    /// Validates the endpoints and searches for a path from start to goal.
    fn get_path_single_goal(
        &self,
        grid: &mut SearchGrid,
        start: Point,
        goal: Point,
    ) -> Result<SearchResult> {
        grid.validate_endpoints(start, goal)?;
        debug!("Searching from {} to {}", start, goal);
        let result = self.search(grid, start, goal);
        if result.succeeded {
            debug!(
                "Reached {} after visiting {} cells, path has {} cells",
                goal,
                result.visited_in_order.len(),
                result.path.len()
            );
        } else {
            info!(
                "No path from {} to {} after visiting {} cells",
                start,
                goal,
                result.visited_in_order.len()
            );
        }
        Ok(result)
    }
}
