use crate::error::{Error, Result};
use crate::UNREACHABLE;
use core::fmt;
use core::ops::{Index, IndexMut};
use grid_util::point::Point;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// One grid position together with the per-run search state written by the solvers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub point: Point,
    pub is_obstacle: bool,
    pub is_start: bool,
    /// Marks the destination selected for the next run.
    pub is_goal: bool,
    /// Marks any named destination, selected or not.
    pub is_destination: bool,
    pub distance: i32,
    pub heuristic: i32,
    pub total_cost: i32,
    pub came_from: Option<Point>,
    pub visited: bool,
}

impl Cell {
    pub fn new(point: Point) -> Cell {
        Cell {
            point,
            is_obstacle: false,
            is_start: false,
            is_goal: false,
            is_destination: false,
            distance: UNREACHABLE,
            heuristic: 0,
            total_cost: UNREACHABLE,
            came_from: None,
            visited: false,
        }
    }
    /// Restores the search state, leaving obstacle, start and destination flags alone.
    pub fn reset_search_state(&mut self) {
        self.distance = UNREACHABLE;
        self.heuristic = 0;
        self.total_cost = UNREACHABLE;
        self.came_from = None;
        self.visited = false;
    }
    #[cfg(test)]
    pub(crate) fn is_pristine(&self) -> bool {
        self.distance == UNREACHABLE
            && self.heuristic == 0
            && self.total_cost == UNREACHABLE
            && self.came_from.is_none()
            && !self.visited
    }
}

/// [SearchGrid] owns a fixed rectangle of [Cell]s stored row-major. Points use `x` for the column
/// and `y` for the row. Connected components of the free cells are tracked in a [UnionFind] so
/// reachability can be answered without running a search.
#[derive(Clone, Debug)]
pub struct SearchGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl SearchGrid {
    /// Builds a grid of pristine, obstacle-free cells.
    pub fn build(rows: usize, cols: usize) -> SearchGrid {
        let cells = iproduct!(0..rows, 0..cols)
            .map(|(row, col)| Cell::new(Point::new(col as i32, row as i32)))
            .collect();
        SearchGrid {
            rows,
            cols,
            cells,
            components: UnionFind::new(rows * cols),
            components_dirty: true,
        }
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }
    fn ix(&self, point: Point) -> Option<usize> {
        self.in_bounds(point)
            .then(|| point.y as usize * self.cols + point.x as usize)
    }
    fn out_of_bounds(&self, point: Point) -> Error {
        Error::OutOfBounds {
            point,
            rows: self.rows,
            cols: self.cols,
        }
    }
    pub fn get(&self, point: Point) -> Option<&Cell> {
        self.ix(point).map(|ix| &self.cells[ix])
    }
    pub fn get_mut(&mut self, point: Point) -> Option<&mut Cell> {
        let ix = self.ix(point)?;
        Some(&mut self.cells[ix])
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }
    pub fn is_obstacle(&self, point: Point) -> bool {
        self.get(point).map_or(false, |cell| cell.is_obstacle)
    }

    /// Updates a position on the grid. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    pub fn set_obstacle(&mut self, point: Point, blocked: bool) -> Result<()> {
        let ix = self.ix(point).ok_or_else(|| self.out_of_bounds(point))?;
        let was_blocked = self.cells[ix].is_obstacle;
        self.cells[ix].is_obstacle = blocked;
        if blocked && !was_blocked {
            self.components_dirty = true;
        } else if !blocked && was_blocked && !self.components_dirty {
            for n in self.neighbors_of(point) {
                let n_ix = n.y as usize * self.cols + n.x as usize;
                self.components.union(ix, n_ix);
            }
        }
        Ok(())
    }
    /// Flips the obstacle flag and returns the new value.
    pub fn toggle_obstacle(&mut self, point: Point) -> Result<bool> {
        let blocked = !self.get(point).ok_or_else(|| self.out_of_bounds(point))?.is_obstacle;
        self.set_obstacle(point, blocked)?;
        Ok(blocked)
    }

    /// The free cells at unit Manhattan offset, enumerated up, down, left, right. This order
    /// fixes the order in which equal-cost cells enter a frontier.
    pub fn neighbors_of(&self, point: Point) -> SmallVec<[Point; 4]> {
        [
            Point::new(point.x, point.y - 1),
            Point::new(point.x, point.y + 1),
            Point::new(point.x - 1, point.y),
            Point::new(point.x + 1, point.y),
        ]
        .into_iter()
        .filter(|p| self.get(*p).map_or(false, |cell| !cell.is_obstacle))
        .collect()
    }

    /// Reapplies pristine search state to every cell. Must run between searches on the same grid.
    pub fn reset_search_state(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset_search_state);
    }

    /// Follows `came_from` links back from the goal, returning the path start to goal inclusive.
    pub fn reconstruct_path(&self, goal: Point) -> Vec<Point> {
        let mut path: Vec<Point> =
            std::iter::successors(Some(goal), |p| self.get(*p).and_then(|cell| cell.came_from))
                .collect();
        path.reverse();
        path
    }

    /// Rejects endpoints a search cannot start from or finish at.
    pub fn validate_endpoints(&self, start: Point, goal: Point) -> Result<()> {
        let start_cell = self.get(start).ok_or_else(|| self.out_of_bounds(start))?;
        let goal_cell = self.get(goal).ok_or_else(|| self.out_of_bounds(goal))?;
        if start_cell.is_obstacle {
            return Err(Error::StartBlocked { point: start });
        }
        if goal_cell.is_obstacle {
            return Err(Error::GoalBlocked { point: goal });
        }
        Ok(())
    }

    /// Checks if start and goal are on the same component, regenerating components first
    /// if obstacles were added since the last query.
    pub fn reachable(&mut self, start: Point, goal: Point) -> bool {
        self.update();
        match (self.ix(start), self.ix(goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                !self.cells[start_ix].is_obstacle
                    && !self.cells[goal_ix].is_obstacle
                    && self.components.equiv(start_ix, goal_ix)
            }
            _ => false,
        }
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up free 4-neighbours to the same components.
    pub fn generate_components(&mut self) {
        debug!("Generating components for {}x{} grid", self.rows, self.cols);
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for (row, col) in iproduct!(0..self.rows, 0..self.cols) {
            let ix = row * self.cols + col;
            if self.cells[ix].is_obstacle {
                continue;
            }
            // Down and right suffice, the other two directions are covered from the neighbour.
            if row + 1 < self.rows && !self.cells[ix + self.cols].is_obstacle {
                self.components.union(ix, ix + self.cols);
            }
            if col + 1 < self.cols && !self.cells[ix + 1].is_obstacle {
                self.components.union(ix, ix + 1);
            }
        }
    }
}

impl Index<Point> for SearchGrid {
    type Output = Cell;

    fn index(&self, point: Point) -> &Cell {
        match self.ix(point) {
            Some(ix) => &self.cells[ix],
            None => panic!("{} lies outside the {}x{} grid", point, self.rows, self.cols),
        }
    }
}

impl IndexMut<Point> for SearchGrid {
    fn index_mut(&mut self, point: Point) -> &mut Cell {
        match self.ix(point) {
            Some(ix) => &mut self.cells[ix],
            None => panic!("{} lies outside the {}x{} grid", point, self.rows, self.cols),
        }
    }
}

impl fmt::Display for SearchGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: String = row
                .iter()
                .map(|cell| {
                    if cell.is_start {
                        'S'
                    } else if cell.is_goal {
                        'G'
                    } else if cell.is_destination {
                        'D'
                    } else if cell.is_obstacle {
                        '#'
                    } else if cell.visited {
                        'o'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
