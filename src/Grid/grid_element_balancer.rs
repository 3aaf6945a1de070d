use crate::Grid::GridError;
use crate::Grid::grid_coordinate::{GridCoordinate, coordinate_set};
use crate::Grid::grid_coordinate_list::GridCoordinateList;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

/// one pool of coordinates together with the number of elements it must end up with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridElementToBalance {
    pub initial_coords: Vec<GridCoordinate>,
    pub final_count: usize,
}

impl GridElementToBalance {
    pub fn new(initial_coords: Vec<GridCoordinate>, final_count: usize) -> Self {
        Self {
            initial_coords,
            final_count,
        }
    }
    /// signed change of the number of elements
    pub fn delta(&self) -> i64 {
        self.final_count as i64 - self.initial_coords.len() as i64
    }
}

/// Result of reallocating one pool. `initial_fraction` and `final_fraction` are fractions of
/// `coords.len()` visible before and after the transition, always counted from the front.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedGridElement {
    pub coords: Vec<GridCoordinate>,
    pub initial_fraction: f64,
    pub final_fraction: f64,
}

impl BalancedGridElement {
    pub(crate) fn growing(initial_count: usize, coords: Vec<GridCoordinate>) -> Self {
        Self {
            initial_fraction: fraction(initial_count, coords.len()),
            final_fraction: if coords.is_empty() { 0.0 } else { 1.0 },
            coords,
        }
    }
    pub(crate) fn shrinking(coords: Vec<GridCoordinate>, final_count: usize) -> Self {
        Self {
            initial_fraction: if coords.is_empty() { 0.0 } else { 1.0 },
            final_fraction: fraction(final_count, coords.len()),
            coords,
        }
    }
    fn visible(&self, fraction: f64) -> &[GridCoordinate] {
        let count = (fraction * self.coords.len() as f64).round() as usize;
        &self.coords[..count.min(self.coords.len())]
    }
    /// coordinates drawn before the transition
    pub fn initial_coords(&self) -> &[GridCoordinate] {
        self.visible(self.initial_fraction)
    }
    /// coordinates drawn after the transition
    pub fn final_coords(&self) -> &[GridCoordinate] {
        self.visible(self.final_fraction)
    }
}

fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count.min(total)) as f64 / total as f64
    }
}

/// `total` split in proportion `part / whole`, rounded
fn proportional_share(total: usize, part: usize, whole: usize) -> usize {
    if whole == 0 {
        0
    } else {
        ((total as f64) * (part as f64) / (whole as f64)).round() as usize
    }
}

/// balanced pools in the same layout as the balancer input
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedGridElements {
    pub increasing_a: BalancedGridElement,
    pub increasing_b: BalancedGridElement,
    pub decreasing_c: BalancedGridElement,
    pub decreasing_d: BalancedGridElement,
    /// number of coordinates moved from decreasing pools to increasing pools
    pub transferred: usize,
    /// number of fresh grid coordinates drawn for the increasing pools
    pub fresh: usize,
}

/// Reallocates two growing and two shrinking pools at once. Coordinates released by the
/// shrinking pools are handed over to the growing ones, only the growth exceeding what was
/// released is satisfied with fresh grid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct GridElementBalancer {
    increasing_a: GridElementToBalance,
    increasing_b: GridElementToBalance,
    decreasing_c: GridElementToBalance,
    decreasing_d: GridElementToBalance,
    grid: GridCoordinateList,
}

impl GridElementBalancer {
    pub fn new(
        increasing_a: GridElementToBalance,
        increasing_b: GridElementToBalance,
        decreasing_c: GridElementToBalance,
        decreasing_d: GridElementToBalance,
        cols: usize,
        rows: usize,
    ) -> Result<Self, GridError> {
        for pool in [&increasing_a, &increasing_b] {
            if pool.delta() < 0 {
                return Err(GridError::InvalidIncreasingDelta {
                    delta: pool.delta(),
                });
            }
        }
        for pool in [&decreasing_c, &decreasing_d] {
            if pool.delta() > 0 {
                return Err(GridError::InvalidDecreasingDelta {
                    delta: pool.delta(),
                });
            }
        }
        Ok(Self {
            increasing_a,
            increasing_b,
            decreasing_c,
            decreasing_d,
            grid: GridCoordinateList::new(cols, rows),
        })
    }

    pub fn balance<R: Rng + ?Sized>(&self, rng: &mut R) -> BalancedGridElements {
        let increase_a = self.increasing_a.delta() as usize;
        let increase_b = self.increasing_b.delta() as usize;
        let decrease_c = self.decreasing_c.delta().unsigned_abs() as usize;
        let decrease_d = self.decreasing_d.delta().unsigned_abs() as usize;
        let total_increase = increase_a + increase_b;
        let total_decrease = decrease_c + decrease_d;
        let direct_transfer = total_increase.min(total_decrease);

        let a_to_transfer = proportional_share(direct_transfer, increase_a, total_increase);
        let b_to_transfer = direct_transfer - a_to_transfer;
        let c_to_transfer = proportional_share(direct_transfer, decrease_c, total_decrease);
        let d_to_transfer = direct_transfer - c_to_transfer;

        // released cells in the order the shrinking pools hide them, each tail from its last
        // element, both tails merged by the share of their decrease hidden so far
        let mut released = released_in_hiding_order(&self.decreasing_c.initial_coords, c_to_transfer, decrease_c);
        released.extend(released_in_hiding_order(&self.decreasing_d.initial_coords, d_to_transfer, decrease_d));
        released.sort_by(|x, y| x.0.total_cmp(&y.0));

        let mut moved_a: Vec<(f64, GridCoordinate)> = Vec::with_capacity(a_to_transfer);
        let mut moved_b: Vec<(f64, GridCoordinate)> = Vec::with_capacity(b_to_transfer);
        for cell in released {
            let next_a = (moved_a.len() < a_to_transfer).then(|| progress(moved_a.len(), a_to_transfer));
            let next_b = (moved_b.len() < b_to_transfer).then(|| progress(moved_b.len(), b_to_transfer));
            match (next_a, next_b) {
                (Some(a), Some(b)) if b < a => moved_b.push(cell),
                (Some(_), _) => moved_a.push(cell),
                _ => moved_b.push(cell),
            }
        }

        let extra_a = increase_a - a_to_transfer;
        let extra_b = increase_b - b_to_transfer;
        let claimed = coordinate_set([
            self.increasing_a.initial_coords.as_slice(),
            self.increasing_b.initial_coords.as_slice(),
            self.decreasing_c.initial_coords.as_slice(),
            self.decreasing_d.initial_coords.as_slice(),
        ]);
        let mut fresh = self.grid.free_coordinates(&claimed);
        fresh.shuffle(rng);
        let fresh_a: Vec<GridCoordinate> = fresh.iter().take(extra_a).copied().collect();
        let fresh_b: Vec<GridCoordinate> = fresh
            .iter()
            .skip(fresh_a.len())
            .take(extra_b)
            .copied()
            .collect();

        debug!(
            "balancing grid: increase {}+{}, decrease {}+{}, transfer {}, fresh {}",
            increase_a,
            increase_b,
            decrease_c,
            decrease_d,
            direct_transfer,
            fresh_a.len() + fresh_b.len()
        );

        let grow = |pool: &GridElementToBalance, moved: &[(f64, GridCoordinate)], new: &[GridCoordinate]| {
            let mut coords = pool.initial_coords.clone();
            coords.extend(interleaved(moved, new, pool.delta() as usize));
            BalancedGridElement::growing(pool.initial_coords.len(), coords)
        };
        let shrink = |pool: &GridElementToBalance| {
            BalancedGridElement::shrinking(pool.initial_coords.clone(), pool.final_count)
        };

        BalancedGridElements {
            increasing_a: grow(&self.increasing_a, &moved_a, &fresh_a),
            increasing_b: grow(&self.increasing_b, &moved_b, &fresh_b),
            decreasing_c: shrink(&self.decreasing_c),
            decreasing_d: shrink(&self.decreasing_d),
            transferred: direct_transfer,
            fresh: fresh_a.len() + fresh_b.len(),
        }
    }
}

fn tail(coords: &[GridCoordinate], count: usize) -> &[GridCoordinate] {
    &coords[coords.len().saturating_sub(count)..]
}

/// share of `steps` equal steps done when the middle of step `j` is reached
fn progress(j: usize, steps: usize) -> f64 {
    (j as f64 + 0.5) / steps as f64
}

/// The last `count` coordinates of a shrinking pool, in the order they disappear from the
/// drawn prefix, each with the share of `decrease` hidden at that moment.
fn released_in_hiding_order(
    coords: &[GridCoordinate],
    count: usize,
    decrease: usize,
) -> Vec<(f64, GridCoordinate)> {
    tail(coords, count)
        .iter()
        .rev()
        .enumerate()
        .map(|(j, c)| (progress(j, decrease), *c))
        .collect()
}

/// New coordinates of a growing pool. Slot `k` is drawn once the share `progress(k, increase)` of
/// the growth is reached; a moved coordinate waits for a slot drawn no earlier than it is hidden
/// by its old pool, fresh coordinates fill the slots in between.
fn interleaved(
    moved: &[(f64, GridCoordinate)],
    fresh: &[GridCoordinate],
    increase: usize,
) -> Vec<GridCoordinate> {
    let total = moved.len() + fresh.len();
    let (mut m, mut f) = (0, 0);
    let mut result = Vec::with_capacity(total);
    for k in 0..total {
        let take_moved = m < moved.len() && (moved[m].0 <= progress(k, increase) || f == fresh.len());
        if take_moved {
            result.push(moved[m].1);
            m += 1;
        } else {
            result.push(fresh[f]);
            f += 1;
        }
    }
    result
}
