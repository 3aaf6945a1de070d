use std::collections::HashSet;
use std::fmt;

/// position of one molecule in the grid. Ordered row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoordinate {
    pub row: usize,
    pub col: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// all cells of a grid with the given extents, row by row
    pub fn grid(cols: usize, rows: usize) -> Vec<GridCoordinate> {
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| GridCoordinate { row, col }))
            .collect()
    }

    pub fn is_within(&self, cols: usize, rows: usize) -> bool {
        self.row < rows && self.col < cols
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// removes repeated coordinates keeping the first occurrence, order is preserved
pub fn unique_coordinates(coords: &[GridCoordinate]) -> Vec<GridCoordinate> {
    let mut seen = HashSet::with_capacity(coords.len());
    coords.iter().copied().filter(|c| seen.insert(*c)).collect()
}

pub fn has_duplicates(coords: &[GridCoordinate]) -> bool {
    let mut seen = HashSet::with_capacity(coords.len());
    coords.iter().any(|c| !seen.insert(*c))
}

/// union of several coordinate sequences as a set
pub fn coordinate_set<'a, I>(pools: I) -> HashSet<GridCoordinate>
where
    I: IntoIterator<Item = &'a [GridCoordinate]>,
{
    pools.into_iter().flatten().copied().collect()
}
