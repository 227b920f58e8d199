use grid_util::point::Point;
use log::debug;

use crate::{
    frontier::DistanceFrontier,
    search_grid::SearchGrid,
    solver::{GridSolver, SearchResult},
    STEP_COST, UNREACHABLE,
};

/// Uniform-cost search. Every cell enters the frontier once up front; improved distances add a
/// fresh, lower-keyed entry and the stale one is skipped once the cell has been visited.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }

    fn search(&self, grid: &mut SearchGrid, start: Point, goal: Point) -> SearchResult {
        let mut visited_in_order = Vec::new();
        grid[start].distance = 0;

        let mut frontier = DistanceFrontier::with_capacity(grid.rows() * grid.cols());
        for cell in grid.cells() {
            frontier.insert(cell);
        }

        while let Some(point) = frontier.extract_min() {
            let cell = &mut grid[point];
            if cell.is_obstacle || cell.visited {
                continue;
            }
            // The frontier drains in distance order, so everything left is unreachable too.
            if cell.distance == UNREACHABLE {
                debug!("Cut off at {} with {} entries left", point, frontier.len());
                return SearchResult::not_found(visited_in_order);
            }
            cell.visited = true;
            let distance = cell.distance;
            visited_in_order.push(point);

            if point == goal {
                let path = grid.reconstruct_path(goal);
                return SearchResult::found(visited_in_order, path);
            }

            for neighbor in grid.neighbors_of(point) {
                let candidate = distance + STEP_COST;
                let next = &mut grid[neighbor];
                if !next.visited && candidate < next.distance {
                    next.distance = candidate;
                    next.came_from = Some(point);
                    frontier.insert(next);
                }
            }
        }
        SearchResult::not_found(visited_in_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let mut grid = SearchGrid::build(1, 1);
        let start = Point::new(0, 0);
        let result = DijkstraSolver
            .get_path_single_goal(&mut grid, start, start)
            .unwrap();
        assert!(result.succeeded);
        assert_eq!(result.path, vec![start]);
        assert_eq!(result.visited_in_order, vec![start]);
    }

    /// Equal-distance cells are visited in the order the neighbour expansion produced them.
    #[test]
    fn visit_order_on_open_grid() {
        let mut grid = SearchGrid::build(3, 3);
        let result = DijkstraSolver
            .get_path_single_goal(&mut grid, Point::new(0, 0), Point::new(2, 2))
            .unwrap();
        // (x, y) = (col, row)
        let expected_visits = [
            (0, 0),
            (0, 1),
            (1, 0),
            (0, 2),
            (1, 1),
            (2, 0),
            (1, 2),
            (2, 1),
            (2, 2),
        ]
        .map(|(x, y)| Point::new(x, y));
        assert_eq!(result.visited_in_order, expected_visits.to_vec());
        let expected_path = [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)].map(|(x, y)| Point::new(x, y));
        assert_eq!(result.path, expected_path.to_vec());
    }

    /// Asserts that the optimal 4 step solution is found.
    #[test]
    fn solve_simple_problem() {
        // |S  |
        // | # |
        // |  G|
        let mut grid = SearchGrid::build(3, 3);
        grid.set_obstacle(Point::new(1, 1), true).unwrap();
        let result = DijkstraSolver
            .get_path_single_goal(&mut grid, Point::new(0, 0), Point::new(2, 2))
            .unwrap();
        assert!(result.succeeded);
        assert_eq!(result.path.len(), 5);
    }

    #[test]
    fn unreachable_cell_ends_search() {
        // |S#G|
        // | # |
        let mut grid = SearchGrid::build(2, 3);
        grid.set_obstacle(Point::new(1, 0), true).unwrap();
        grid.set_obstacle(Point::new(1, 1), true).unwrap();
        let result = DijkstraSolver
            .get_path_single_goal(&mut grid, Point::new(0, 0), Point::new(2, 0))
            .unwrap();
        assert!(!result.succeeded);
        assert!(result.path.is_empty());
        assert_eq!(
            result.visited_in_order,
            vec![Point::new(0, 0), Point::new(0, 1)]
        );
        assert!(!grid[Point::new(2, 0)].visited);
    }

    #[test]
    fn blocked_goal_is_rejected() {
        let mut grid = SearchGrid::build(2, 2);
        grid.set_obstacle(Point::new(1, 1), true).unwrap();
        let err = DijkstraSolver
            .get_path_single_goal(&mut grid, Point::new(0, 0), Point::new(1, 1))
            .unwrap_err();
        assert_eq!(
            err,
            Error::GoalBlocked {
                point: Point::new(1, 1)
            }
        );
        assert!(grid.cells().all(|c| c.is_pristine()));
    }
}
