use thiserror::Error;
/// position of a molecule in the grid and set helpers
pub mod grid_coordinate;
/// eng
/// random, collision free allocation of grid cells to one pool of molecules.
/// Molecules are appended at the end of a pool and removed from its end, so the beginning of a pool
/// which is drawn first stays stable while molecules are added or removed.
/// # Examples
/// ```
/// use EquiSim::Grid::grid_coordinate_list::GridCoordinateList;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use std::collections::HashSet;
/// let list = GridCoordinateList::new(10, 10);
/// let mut rng = StdRng::seed_from_u64(42);
/// let pool = list.adding_random_elements(&[], 150, &HashSet::new(), &mut rng);
/// // only 100 cells exist
/// assert_eq!(pool.len(), 100);
/// ```
pub mod grid_coordinate_list;
/// reallocation of two growing and two shrinking pools by handing the released cells over
/// # Examples
/// ```
/// use EquiSim::Grid::grid_coordinate::GridCoordinate;
/// use EquiSim::Grid::grid_element_balancer::{GridElementBalancer, GridElementToBalance};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// let c_coords: Vec<GridCoordinate> = (0..8).map(|col| GridCoordinate::new(0, col)).collect();
/// let balancer = GridElementBalancer::new(
///     GridElementToBalance::new(vec![], 5),
///     GridElementToBalance::new(vec![], 3),
///     GridElementToBalance::new(c_coords, 0),
///     GridElementToBalance::new(vec![], 0),
///     10,
///     10,
/// )
/// .unwrap();
/// let balanced = balancer.balance(&mut StdRng::seed_from_u64(1));
/// assert_eq!(balanced.transferred, 8);
/// assert_eq!(balanced.fresh, 0);
/// assert_eq!(balanced.increasing_a.coords.len(), 5);
/// ```
pub mod grid_element_balancer;
/// reallocation of any number of pools in one batch
pub mod grid_element_setter;
/// progress dependent prefix of a coordinate sequence
pub mod fractioned_coordinates;
mod grid_tests;

/// errors of grid allocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("increasing pool must not shrink, got delta {delta}")]
    InvalidIncreasingDelta { delta: i64 },
    #[error("decreasing pool must not grow, got delta {delta}")]
    InvalidDecreasingDelta { delta: i64 },
    #[error("row count {rows} outside of allowed range {min}..={max}")]
    RowsOutOfRange { rows: usize, min: usize, max: usize },
}
