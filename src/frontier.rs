//! Sorted frontiers for the two solvers.
//!
//! Entries are kept ascending by a key snapshotted at insertion. A new entry goes directly before
//! the first entry with a strictly greater key, so entries with equal keys leave the frontier in
//! the order they entered it. Visit order, and with it every recorded animation, depends on this.
use crate::search_grid::Cell;
use core::marker::PhantomData;
use grid_util::point::Point;
use std::collections::VecDeque;

/// Selects the priority key of a [Cell].
pub trait Priority {
    fn key(cell: &Cell) -> i32;
}

/// Orders by distance from the start.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByDistance;

/// Orders by distance plus heuristic estimate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByTotalCost;

impl Priority for ByDistance {
    fn key(cell: &Cell) -> i32 {
        cell.distance
    }
}

impl Priority for ByTotalCost {
    fn key(cell: &Cell) -> i32 {
        cell.total_cost
    }
}

#[derive(Clone, Debug)]
pub struct SortedFrontier<P> {
    entries: VecDeque<(i32, Point)>,
    _priority: PhantomData<P>,
}

/// Frontier of the uniform-cost search. Stale duplicates are tolerated.
pub type DistanceFrontier = SortedFrontier<ByDistance>;
/// Frontier of the heuristic search, with decrease-key through [remove](SortedFrontier::remove).
pub type CostFrontier = SortedFrontier<ByTotalCost>;

impl<P> Default for SortedFrontier<P> {
    fn default() -> Self {
        SortedFrontier {
            entries: VecDeque::new(),
            _priority: PhantomData,
        }
    }
}

impl<P: Priority> SortedFrontier<P> {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_capacity(capacity: usize) -> Self {
        SortedFrontier {
            entries: VecDeque::with_capacity(capacity),
            _priority: PhantomData,
        }
    }
    pub fn insert(&mut self, cell: &Cell) {
        let key = P::key(cell);
        let ix = self.entries.partition_point(|&(k, _)| k <= key);
        self.entries.insert(ix, (key, cell.point));
    }
    /// Removes and returns the entry with the smallest key, oldest first among equals.
    pub fn extract_min(&mut self) -> Option<Point> {
        self.entries.pop_front().map(|(_, point)| point)
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    /// Points in extraction order.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.entries.iter().map(|&(_, point)| point)
    }
}

impl SortedFrontier<ByTotalCost> {
    pub fn contains(&self, point: Point) -> bool {
        self.entries.iter().any(|&(_, p)| p == point)
    }
    /// Drops every entry at `point`.
    pub fn remove(&mut self, point: Point) {
        self.entries.retain(|&(_, p)| p != point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNREACHABLE;

    fn cell(x: i32, distance: i32, total_cost: i32) -> Cell {
        let mut cell = Cell::new(Point::new(x, 0));
        cell.distance = distance;
        cell.total_cost = total_cost;
        cell
    }

    #[test]
    fn extracts_ascending_with_fifo_ties() {
        let mut frontier = DistanceFrontier::new();
        frontier.insert(&cell(0, UNREACHABLE, UNREACHABLE));
        frontier.insert(&cell(1, 2, 0));
        frontier.insert(&cell(2, 1, 0));
        frontier.insert(&cell(3, 2, 0));
        frontier.insert(&cell(4, 1, 0));
        frontier.insert(&cell(5, UNREACHABLE, UNREACHABLE));
        let order: Vec<i32> = std::iter::from_fn(|| frontier.extract_min())
            .map(|p| p.x)
            .collect();
        assert_eq!(order, vec![2, 4, 1, 3, 0, 5]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn keys_are_snapshotted() {
        let mut frontier = DistanceFrontier::new();
        let mut a = cell(0, 5, 0);
        frontier.insert(&a);
        frontier.insert(&cell(1, 3, 0));
        // Lowering the key afterwards only affects a second, fresh entry.
        a.distance = 1;
        frontier.insert(&a);
        assert_eq!(frontier.len(), 3);
        let order: Vec<i32> = frontier.iter().map(|p| p.x).collect();
        assert_eq!(order, vec![0, 1, 0]);
    }

    #[test]
    fn decrease_key_by_remove_and_reinsert() {
        let mut frontier = CostFrontier::new();
        frontier.insert(&cell(0, 0, 4));
        frontier.insert(&cell(1, 0, 6));
        frontier.insert(&cell(2, 0, 6));
        assert!(frontier.contains(Point::new(2, 0)));
        assert!(!frontier.contains(Point::new(3, 0)));

        frontier.remove(Point::new(2, 0));
        assert!(!frontier.contains(Point::new(2, 0)));
        frontier.insert(&cell(2, 0, 4));
        let order: Vec<i32> = frontier.iter().map(|p| p.x).collect();
        assert_eq!(order, vec![0, 2, 1]);
    }
}
