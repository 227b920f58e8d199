//! Fuzzes both searches on many random grids, comparing them against a plain breadth-first search
//! and the connected components of the grid. Paths must be valid and shortest, visits unique, and
//! reruns after a reset identical.
use grid_pathviz::{run_search, Algorithm, SearchGrid};
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::{HashSet, VecDeque};

fn random_grid(rows: usize, cols: usize, rng: &mut StdRng) -> SearchGrid {
    let mut grid = SearchGrid::build(rows, cols);
    for y in 0..rows as i32 {
        for x in 0..cols as i32 {
            grid.set_obstacle(Point::new(x, y), rng.gen_bool(0.3)).unwrap();
        }
    }
    grid
}

fn random_grid_point(grid: &SearchGrid, rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(0..grid.cols()) as i32,
        rng.gen_range(0..grid.rows()) as i32,
    )
}

/// Edge count of a shortest path, found without any of the crate's search code.
fn bfs_distance(grid: &SearchGrid, start: Point, goal: Point) -> Option<usize> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0)]);
    while let Some((p, d)) = queue.pop_front() {
        if p == goal {
            return Some(d);
        }
        for n in grid.neighbors_of(p) {
            if seen.insert(n) {
                queue.push_back((n, d + 1));
            }
        }
    }
    None
}

#[test]
fn fuzz() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for i in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = random_grid_point(&grid, &mut rng);
        let goal = random_grid_point(&grid, &mut rng);
        grid.set_obstacle(start, false).unwrap();
        grid.set_obstacle(goal, false).unwrap();
        grid[start].is_start = true;
        grid[goal].is_goal = true;

        let expected = bfs_distance(&grid, start, goal);
        let reachable = grid.reachable(start, goal);
        assert_eq!(reachable, expected.is_some());

        for algorithm in [Algorithm::UniformCost, Algorithm::Heuristic] {
            grid.reset_search_state();
            let result = run_search(algorithm, &mut grid, start, goal).unwrap();
            if result.edge_count() != expected {
                println!("{algorithm}: expected {expected:?}, got {:?}", result.edge_count());
                print!("{grid}");
            }
            assert_eq!(result.succeeded, reachable);
            assert_eq!(result.edge_count(), expected);

            let unique: HashSet<Point> = result.visited_in_order.iter().copied().collect();
            assert_eq!(unique.len(), result.visited_in_order.len());
            assert!(result.visited_in_order.iter().all(|p| grid[*p].visited));

            if result.succeeded {
                assert_eq!(result.path.first(), Some(&start));
                assert_eq!(result.path.last(), Some(&goal));
                assert_eq!(result.visited_in_order.last(), Some(&goal));
                for pair in result.path.windows(2) {
                    assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
                }
                assert!(result.path.iter().all(|p| !grid.is_obstacle(*p)));
            } else {
                assert!(result.path.is_empty());
            }

            if i % 10 == 0 {
                grid.reset_search_state();
                let rerun = run_search(algorithm, &mut grid, start, goal).unwrap();
                assert_eq!(rerun, result);
            }
        }
    }
}
