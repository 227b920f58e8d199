use core::fmt;
use grid_util::point::Point;
use thiserror::Error;

/// Convenient result alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// What already sits on a cell that an edit tried to claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Start,
    Destination,
    Obstacle,
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Occupant::Start => "the start",
            Occupant::Destination => "a destination",
            Occupant::Obstacle => "an obstacle",
        };
        f.write_str(name)
    }
}

/// Invalid invocations and rejected edits. A search that finds no path is not an error,
/// see [SearchResult](crate::solver::SearchResult).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A point does not lie on the grid.
    #[error("{point} lies outside the {rows}x{cols} grid")]
    OutOfBounds { point: Point, rows: usize, cols: usize },

    /// The start of a search is an obstacle.
    #[error("start cell {point} is an obstacle")]
    StartBlocked { point: Point },

    /// The goal of a search is an obstacle.
    #[error("goal cell {point} is an obstacle")]
    GoalBlocked { point: Point },

    /// Requested grid size is outside the supported range.
    #[error("grid size {size} is outside the supported range {min}..={max}")]
    GridSize { size: usize, min: usize, max: usize },

    /// Destination names must be non-empty and short enough to display.
    #[error("destination name must be 1 to {max} characters, got {len}")]
    DestinationName { len: usize, max: usize },

    /// The edit targets a cell that is already taken.
    #[error("cell {point} is occupied by {occupant}")]
    CellOccupied { point: Point, occupant: Occupant },

    #[error("unknown destination id {id}")]
    UnknownDestination { id: u32 },

    /// A session always keeps at least one destination to search for.
    #[error("at least one destination must remain")]
    LastDestination,

    #[error("unknown algorithm {name:?}, expected one of dijkstra, uniform-cost, astar, heuristic")]
    UnknownAlgorithm { name: String },
}
