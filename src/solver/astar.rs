use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;

use crate::{
    frontier::CostFrontier,
    search_grid::SearchGrid,
    solver::{GridSolver, SearchResult},
    STEP_COST,
};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// A* with the Manhattan distance as heuristic, which is consistent on a 4-connected unit-cost
/// grid, so the first path reaching the goal is a shortest one.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    fn heuristic(&self, point: &Point, goal: &Point) -> i32 {
        point.manhattan_distance(goal) * STEP_COST
    }

    fn search(&self, grid: &mut SearchGrid, start: Point, goal: Point) -> SearchResult {
        // Insertion order of the finalized set is the visit order.
        let mut finalized: FxIndexSet<Point> = FxIndexSet::default();
        let mut open = CostFrontier::new();
        {
            let h = self.heuristic(&start, &goal);
            let cell = &mut grid[start];
            cell.distance = 0;
            cell.heuristic = h;
            cell.total_cost = h;
            open.insert(cell);
        }

        while let Some(point) = open.extract_min() {
            // Leftovers from decrease-key reinsertion.
            if finalized.contains(&point) {
                continue;
            }
            let cell = &mut grid[point];
            if cell.is_obstacle {
                continue;
            }
            cell.visited = true;
            let distance = cell.distance;
            finalized.insert(point);

            if point == goal {
                let path = grid.reconstruct_path(goal);
                return SearchResult::found(finalized.into_iter().collect(), path);
            }

            for neighbor in grid.neighbors_of(point) {
                if finalized.contains(&neighbor) {
                    continue;
                }
                let candidate = distance + STEP_COST;
                if candidate < grid[neighbor].distance {
                    let h = self.heuristic(&neighbor, &goal);
                    let next = &mut grid[neighbor];
                    next.distance = candidate;
                    next.heuristic = h;
                    next.total_cost = candidate + h;
                    next.came_from = Some(point);
                    if open.contains(neighbor) {
                        open.remove(neighbor);
                    }
                    open.insert(next);
                }
            }
        }
        SearchResult::not_found(finalized.into_iter().collect())
    }
}
