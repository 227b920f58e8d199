use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::{Error, Occupant, Result};
use crate::search_grid::SearchGrid;
use crate::solver::SearchResult;
use crate::{
    run_search, Algorithm, DEFAULT_GRID_SIZE, MAX_DESTINATION_NAME_LEN, MAX_GRID_SIZE,
    MIN_GRID_SIZE,
};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

pub type DestinationId = u32;

/// A named cell that can be selected as the goal of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    pub point: Point,
}

/// Initial state of a [Session].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Rows and columns of the square grid.
    pub grid_size: usize,
    pub start: Point,
    pub destination_name: String,
    pub destination: Point,
    pub algorithm: Algorithm,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            grid_size: DEFAULT_GRID_SIZE,
            start: Point::new(5, 5),
            destination_name: "Destination 1".to_owned(),
            destination: Point::new(30, 30),
            algorithm: Algorithm::default(),
        }
    }
}

/// Editable grid state driving the search core: obstacles, one start, and a list of named
/// destinations of which the selected one is the goal of the next [run](Session::run).
/// Start and destinations never sit on obstacles, and at least one destination always exists.
#[derive(Clone, Debug)]
pub struct Session {
    grid: SearchGrid,
    size: usize,
    start: Point,
    destinations: FxIndexMap<DestinationId, Destination>,
    selected: DestinationId,
    next_id: DestinationId,
    pub algorithm: Algorithm,
}

fn check_size(size: usize) -> Result<()> {
    if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(Error::GridSize {
            size,
            min: MIN_GRID_SIZE,
            max: MAX_GRID_SIZE,
        })
    }
}

fn check_name(name: &str) -> Result<String> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_DESTINATION_NAME_LEN {
        return Err(Error::DestinationName {
            len,
            max: MAX_DESTINATION_NAME_LEN,
        });
    }
    Ok(name.to_owned())
}

/// Pulls a point onto a `size` x `size` grid.
fn clamp(point: Point, size: usize) -> Point {
    let max = size as i32 - 1;
    Point::new(point.x.clamp(0, max), point.y.clamp(0, max))
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Session> {
        check_size(config.grid_size)?;
        let name = check_name(&config.destination_name)?;
        let first = Destination {
            id: 1,
            name,
            point: config.destination,
        };
        let mut destinations = FxIndexMap::default();
        destinations.insert(first.id, first);
        let mut session = Session {
            grid: SearchGrid::build(0, 0),
            size: config.grid_size,
            start: config.start,
            destinations,
            selected: 1,
            next_id: 2,
            algorithm: config.algorithm,
        };
        session.rebuild(config.grid_size);
        Ok(session)
    }

    /// Replaces the grid with an obstacle-free one of the given size, clamping the start and
    /// every destination onto it. A destination clamped onto the start moves to the first free
    /// neighbour of the start instead. Destinations may still share a cell with each other.
    fn rebuild(&mut self, size: usize) {
        self.size = size;
        self.grid = SearchGrid::build(size, size);
        self.start = clamp(self.start, size);
        self.grid[self.start].is_start = true;
        for destination in self.destinations.values_mut() {
            let mut point = clamp(destination.point, size);
            if point == self.start {
                // The grid is empty and at least MIN_GRID_SIZE wide, so a neighbour exists.
                point = self.grid.neighbors_of(point).first().copied().unwrap_or(point);
                debug!(
                    "Moved destination {} off the start to {}",
                    destination.id, point
                );
            }
            destination.point = point;
            self.grid[point].is_destination = true;
        }
    }

    fn reject(&self, err: Error) -> Error {
        warn!("Rejected edit: {}", err);
        err
    }

    fn occupant(&self, point: Point) -> Result<Option<Occupant>> {
        let cell = self.grid.get(point).ok_or_else(|| {
            self.reject(Error::OutOfBounds {
                point,
                rows: self.size,
                cols: self.size,
            })
        })?;
        Ok(if cell.is_start {
            Some(Occupant::Start)
        } else if cell.is_destination {
            Some(Occupant::Destination)
        } else if cell.is_obstacle {
            Some(Occupant::Obstacle)
        } else {
            None
        })
    }

    fn occupied(&self, point: Point, occupant: Occupant) -> Error {
        self.reject(Error::CellOccupied { point, occupant })
    }

    pub fn grid(&self) -> &SearchGrid {
        &self.grid
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn start(&self) -> Point {
        self.start
    }
    /// Destinations in the order they were added.
    pub fn destinations(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.values()
    }
    pub fn destination(&self, id: DestinationId) -> Option<&Destination> {
        self.destinations.get(&id)
    }
    pub fn selected_destination(&self) -> &Destination {
        &self.destinations[&self.selected]
    }

    /// Flips the obstacle at `point`; start and destination cells cannot be blocked.
    pub fn toggle_obstacle(&mut self, point: Point) -> Result<bool> {
        match self.occupant(point)? {
            Some(o @ (Occupant::Start | Occupant::Destination)) => Err(self.occupied(point, o)),
            _ => self.grid.toggle_obstacle(point),
        }
    }
    /// Blocks `point`, as when dragging across cells. Blocking twice is a no-op.
    pub fn paint_obstacle(&mut self, point: Point) -> Result<()> {
        match self.occupant(point)? {
            Some(o @ (Occupant::Start | Occupant::Destination)) => Err(self.occupied(point, o)),
            _ => self.grid.set_obstacle(point, true),
        }
    }

    pub fn move_start(&mut self, point: Point) -> Result<()> {
        match self.occupant(point)? {
            Some(Occupant::Start) => Ok(()),
            Some(o) => Err(self.occupied(point, o)),
            None => {
                self.grid[self.start].is_start = false;
                self.grid[point].is_start = true;
                self.start = point;
                debug!("Moved start to {}", point);
                Ok(())
            }
        }
    }

    /// Adds a named destination on a free cell and selects it.
    pub fn add_destination(&mut self, name: &str, point: Point) -> Result<DestinationId> {
        let name = check_name(name).map_err(|e| self.reject(e))?;
        if let Some(o) = self.occupant(point)? {
            return Err(self.occupied(point, o));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.grid[point].is_destination = true;
        debug!("Added destination {} {:?} at {}", id, name, point);
        self.destinations.insert(id, Destination { id, name, point });
        self.selected = id;
        Ok(id)
    }

    /// Removes a destination. If it was selected, the earliest remaining one is selected instead.
    pub fn remove_destination(&mut self, id: DestinationId) -> Result<Destination> {
        if self.destinations.len() <= 1 && self.destinations.contains_key(&id) {
            return Err(self.reject(Error::LastDestination));
        }
        let removed = self
            .destinations
            .shift_remove(&id)
            .ok_or_else(|| self.reject(Error::UnknownDestination { id }))?;
        // Clamping on resize can stack destinations on one cell.
        if !self.destinations.values().any(|d| d.point == removed.point) {
            let cell = &mut self.grid[removed.point];
            cell.is_destination = false;
            cell.is_goal = false;
        }
        if self.selected == id {
            if let Some(&first) = self.destinations.keys().next() {
                self.selected = first;
            }
        }
        Ok(removed)
    }

    pub fn select_destination(&mut self, id: DestinationId) -> Result<()> {
        if !self.destinations.contains_key(&id) {
            return Err(self.reject(Error::UnknownDestination { id }));
        }
        self.selected = id;
        Ok(())
    }

    /// Rebuilds the grid at a new size. Obstacles are dropped.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        check_size(size).map_err(|e| self.reject(e))?;
        self.rebuild(size);
        Ok(())
    }
    /// Wipes the search state of the last run, keeping obstacles.
    pub fn clear(&mut self) {
        self.grid.reset_search_state();
    }
    /// Wipes obstacles and search state, keeping the start and destinations.
    pub fn reset(&mut self) {
        self.rebuild(self.size);
    }

    /// Whether the selected destination lies in the same open region as the start.
    pub fn goal_reachable(&mut self) -> bool {
        let goal = self.selected_destination().point;
        self.grid.reachable(self.start, goal)
    }

    /// Resets the grid and searches from the start to the selected destination.
    pub fn run(&mut self) -> Result<SearchResult> {
        let goal = self.selected_destination().point;
        self.grid.reset_search_state();
        for cell in self.grid.cells_mut() {
            cell.is_goal = cell.point == goal;
        }
        debug!(
            "Running {} from {} to destination {}",
            self.algorithm, self.start, self.selected
        );
        run_search(self.algorithm, &mut self.grid, self.start, goal)
    }
}
