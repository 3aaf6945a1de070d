use crate::Grid::grid_coordinate::GridCoordinate;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Allocator of molecule positions in a grid of fixed extents.
/// New coordinates are always appended to the end of a sequence and removed from its end,
/// so the front of a sequence (what is drawn first) changes as little as possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCoordinateList {
    pub cols: usize,
    pub rows: usize,
}

impl GridCoordinateList {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub fn capacity(&self) -> usize {
        self.cols * self.rows
    }

    /// cells of the grid not present in `occupied`, row-major
    pub fn free_coordinates(&self, occupied: &HashSet<GridCoordinate>) -> Vec<GridCoordinate> {
        GridCoordinate::grid(self.cols, self.rows)
            .into_iter()
            .filter(|c| !occupied.contains(c))
            .collect()
    }

    /// Returns `existing` followed by `count` distinct random coordinates which collide neither
    /// with `existing` nor with `avoid`. When the grid runs out of free cells as many as possible
    /// are added.
    pub fn adding_random_elements<R: Rng + ?Sized>(
        &self,
        existing: &[GridCoordinate],
        count: usize,
        avoid: &HashSet<GridCoordinate>,
        rng: &mut R,
    ) -> Vec<GridCoordinate> {
        let mut occupied: HashSet<GridCoordinate> = avoid.clone();
        occupied.extend(existing.iter().copied());
        let mut free = self.free_coordinates(&occupied);
        if free.len() < count {
            debug!(
                "grid {}x{} has {} free cells, {} requested",
                self.cols,
                self.rows,
                free.len(),
                count
            );
        }
        free.shuffle(rng);
        free.truncate(count);

        let mut result = Vec::with_capacity(existing.len() + free.len());
        result.extend_from_slice(existing);
        result.extend(free);
        result
    }

    /// drops `count` coordinates from the end of the sequence
    pub fn removing_elements(existing: &[GridCoordinate], count: usize) -> Vec<GridCoordinate> {
        let keep = existing.len().saturating_sub(count);
        existing[..keep].to_vec()
    }

    /// grows or shrinks `existing` to `target` elements
    pub fn resizing<R: Rng + ?Sized>(
        &self,
        existing: &[GridCoordinate],
        target: usize,
        avoid: &HashSet<GridCoordinate>,
        rng: &mut R,
    ) -> Vec<GridCoordinate> {
        if target >= existing.len() {
            self.adding_random_elements(existing, target - existing.len(), avoid, rng)
        } else {
            Self::removing_elements(existing, existing.len() - target)
        }
    }

    /// keeps only the coordinates lying inside the grid, order preserved
    pub fn retain_within(&self, existing: &[GridCoordinate]) -> Vec<GridCoordinate> {
        existing
            .iter()
            .copied()
            .filter(|c| c.is_within(self.cols, self.rows))
            .collect()
    }
}
