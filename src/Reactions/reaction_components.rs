use crate::Grid::fractioned_coordinates::FractionedCoordinates;
use crate::Grid::grid_coordinate::{GridCoordinate, coordinate_set};
use crate::Grid::grid_coordinate_list::GridCoordinateList;
use crate::Grid::grid_element_balancer::{BalancedGridElements, GridElementBalancer, GridElementToBalance};
use crate::Reactions::ReactionError;
use crate::Reactions::balanced_equations::BalancedReactionEquations;
use crate::Reactions::coefficients::{BalancedReactionCoefficients, SpeciesRole, SpeciesValues};
use crate::Reactions::convergence_solver::ReactionConvergenceSolver;
use crate::settings::GridSettings;
use log::{debug, info};
use rand::Rng;
use std::collections::HashSet;

/// Snapshot of a reaction shown on a grid of molecules.
///
/// A snapshot is never changed: every transition consumes it and returns a new snapshot which
/// owns its predecessor, so the chain of snapshots is the undo history.
/// `molecules` are the coordinates occupied by each species right now (after the last run,
/// the mixture at convergence). `pools` exist only right after a run and give, for any time
/// of that run, the coordinates of each species to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionComponents {
    pub coefficients: BalancedReactionCoefficients,
    pub equilibrium_constant: f64,
    pub grid: GridSettings,
    molecules: SpeciesValues<Vec<GridCoordinate>>,
    equations: Option<BalancedReactionEquations>,
    pools: Option<SpeciesValues<FractionedCoordinates>>,
    previous: Option<Box<ReactionComponents>>,
}

impl ReactionComponents {
    pub fn new(
        coefficients: BalancedReactionCoefficients,
        equilibrium_constant: f64,
        grid: GridSettings,
    ) -> Self {
        Self {
            coefficients,
            equilibrium_constant,
            grid,
            molecules: SpeciesValues::default(),
            equations: None,
            pools: None,
            previous: None,
        }
    }

    /// next snapshot in the chain, `self` becomes its predecessor
    fn succeeded_by(
        self,
        grid: GridSettings,
        molecules: SpeciesValues<Vec<GridCoordinate>>,
        equations: Option<BalancedReactionEquations>,
        pools: Option<SpeciesValues<FractionedCoordinates>>,
    ) -> Self {
        Self {
            coefficients: self.coefficients,
            equilibrium_constant: self.equilibrium_constant,
            grid,
            molecules,
            equations,
            pools,
            previous: Some(Box::new(self)),
        }
    }

    fn coordinate_list(&self) -> GridCoordinateList {
        GridCoordinateList::new(self.grid.cols, self.grid.rows)
    }

    fn occupied(&self) -> HashSet<GridCoordinate> {
        coordinate_set(self.molecules.iter().map(|(_, coords)| coords.as_slice()))
    }

    /// Adds `count` molecules of `role` at random free cells. A full grid takes as many as fit.
    pub fn adding_molecules<R: Rng + ?Sized>(self, role: SpeciesRole, count: usize, rng: &mut R) -> Self {
        let occupied = self.occupied();
        let mut molecules = self.molecules.clone();
        let added = self
            .coordinate_list()
            .adding_random_elements(self.molecules.value(role), count, &occupied, rng);
        debug!(
            "{} molecules of {} requested, {} added",
            count,
            role,
            added.len() - self.molecules.value(role).len()
        );
        *molecules.value_mut(role) = added;
        let grid = self.grid;
        let equations = self.equations.clone();
        self.succeeded_by(grid, molecules, equations, None)
    }

    /// Changes the number of grid rows. Molecules left outside the grid are dropped.
    pub fn with_rows(self, rows: usize) -> Result<Self, ReactionError> {
        let grid = self.grid.with_rows(rows)?;
        let list = GridCoordinateList::new(grid.cols, grid.rows);
        let molecules = self.molecules.map(|_, coords| list.retain_within(coords));
        let equations = self.equations.clone();
        Ok(self.succeeded_by(grid, molecules, equations, None))
    }

    /// concentrations as fractions of the grid capacity
    pub fn concentrations(&self) -> SpeciesValues<f64> {
        let capacity = self.grid.capacity() as f64;
        self.molecules.map(|_, coords| coords.len() as f64 / capacity)
    }

    pub fn molecules(&self, role: SpeciesRole) -> &[GridCoordinate] {
        self.molecules.value(role)
    }

    /// equations of the last run, if any
    pub fn equations(&self) -> Option<&BalancedReactionEquations> {
        self.equations.as_ref()
    }

    /// Runs the reaction forward from the current molecules between `start_time` and
    /// `convergence_time`. Reactant molecules released while the reaction proceeds are reused
    /// for the products.
    pub fn running_forward<R: Rng + ?Sized>(
        self,
        start_time: f64,
        convergence_time: f64,
        solver: &ReactionConvergenceSolver,
        rng: &mut R,
    ) -> Result<Self, ReactionError> {
        let equations = BalancedReactionEquations::forward_from(
            self.coefficients,
            self.equilibrium_constant,
            self.concentrations(),
            start_time,
            convergence_time,
            solver,
        )?;
        info!(
            "forward run {} -> {}: {:?}",
            start_time,
            convergence_time,
            equations.converged_concentrations()
        );
        let molecules = self.molecules.clone();
        self.run(equations, &molecules, rng)
    }

    /// Adds `added_c` and `added_d` product molecules to the mixture left by the last run and
    /// runs the reaction in reverse between `reverse_start` and `reverse_convergence`.
    pub fn running_reverse<R: Rng + ?Sized>(
        self,
        added_c: usize,
        added_d: usize,
        reverse_start: f64,
        reverse_convergence: f64,
        solver: &ReactionConvergenceSolver,
        rng: &mut R,
    ) -> Result<Self, ReactionError> {
        let last_run = self.equations.clone().ok_or(ReactionError::ReactionNotRun)?;
        // the reverse run starts from the mixture the last run converged to
        if reverse_start < last_run.convergence_time {
            return Err(ReactionError::InvalidTimes {
                start: last_run.convergence_time,
                end: reverse_start,
            });
        }
        let list = self.coordinate_list();
        let mut molecules = self.molecules.clone();
        for (role, count) in [(SpeciesRole::ProductC, added_c), (SpeciesRole::ProductD, added_d)] {
            let occupied = coordinate_set(molecules.iter().map(|(_, coords)| coords.as_slice()));
            let added = list.adding_random_elements(molecules.value(role), count, &occupied, rng);
            *molecules.value_mut(role) = added;
        }
        let capacity = self.grid.capacity() as f64;
        let initial = molecules.map(|_, coords| coords.len() as f64 / capacity);
        let equations =
            BalancedReactionEquations::reverse(&last_run, initial, reverse_start, reverse_convergence, solver)?;
        info!(
            "reverse run {} -> {} after adding {} C and {} D: {:?}",
            reverse_start,
            reverse_convergence,
            added_c,
            added_d,
            equations.converged_concentrations()
        );
        self.run(equations, &molecules, rng)
    }

    /// Balances the grid between the initial and the converged mixture of `equations` and binds
    /// every pool to the concentration of its species.
    fn run<R: Rng + ?Sized>(
        self,
        equations: BalancedReactionEquations,
        initial: &SpeciesValues<Vec<GridCoordinate>>,
        rng: &mut R,
    ) -> Result<Self, ReactionError> {
        let capacity = self.grid.capacity();
        let converged = equations.converged_concentrations();
        let pool = |role: SpeciesRole, growing: bool| {
            let coords = initial.value(role).clone();
            let target = (converged.value(role) * capacity as f64).round().max(0.0) as usize;
            // rounding must not flip the direction of a pool
            let target = if growing {
                target.max(coords.len())
            } else {
                target.min(coords.len())
            };
            GridElementToBalance::new(coords, target)
        };
        let forward = equations.is_forward;
        let (grow_1, grow_2, shrink_1, shrink_2) = if forward {
            (SpeciesRole::ProductC, SpeciesRole::ProductD, SpeciesRole::ReactantA, SpeciesRole::ReactantB)
        } else {
            (SpeciesRole::ReactantA, SpeciesRole::ReactantB, SpeciesRole::ProductC, SpeciesRole::ProductD)
        };
        let balancer = GridElementBalancer::new(
            pool(grow_1, true),
            pool(grow_2, true),
            pool(shrink_1, false),
            pool(shrink_2, false),
            self.grid.cols,
            self.grid.rows,
        )?;
        let BalancedGridElements {
            increasing_a,
            increasing_b,
            decreasing_c,
            decreasing_d,
            transferred,
            fresh,
        } = balancer.balance(rng);
        debug!("{} molecules transferred, {} fresh", transferred, fresh);

        let mut balanced: SpeciesValues<Vec<GridCoordinate>> = SpeciesValues::default();
        *balanced.value_mut(grow_1) = increasing_a.coords;
        *balanced.value_mut(grow_2) = increasing_b.coords;
        *balanced.value_mut(shrink_1) = decreasing_c.coords;
        *balanced.value_mut(shrink_2) = decreasing_d.coords;

        let pools = balanced.try_map(|role, coords| {
            FractionedCoordinates::following_concentration(
                coords.clone(),
                equations.concentration.value(role).clone(),
                capacity,
            )
        })?;
        let molecules = pools.map(|_, pool| pool.coords_at(equations.convergence_time).to_vec());
        let grid = self.grid;
        Ok(self.succeeded_by(grid, molecules, Some(equations), Some(pools)))
    }

    /// Coordinates of `role` to draw at time `t`. Right after a run these follow the run's
    /// concentration curve (times before the run show its starting mixture), otherwise they
    /// are the current molecules.
    ///
    /// A growing species skips cells its shrinking owner still draws at `t`, so no cell is ever
    /// drawn twice; in the moment a handed-over cell lags behind rounding, the growing species
    /// shows one molecule less.
    pub fn visible_coordinates(&self, role: SpeciesRole, t: f64) -> Vec<GridCoordinate> {
        let (Some(pools), Some(equations)) = (&self.pools, &self.equations) else {
            return self.molecules.value(role).clone();
        };
        let t = t.max(equations.start_time);
        let pool = pools.value(role);
        let shrinking = |role: &SpeciesRole| role.is_reactant() == equations.is_forward;
        if shrinking(&role) {
            return pool.coords_at(t).to_vec();
        }
        let still_drawn = coordinate_set(
            SpeciesRole::ALL
                .iter()
                .filter(|other| shrinking(*other))
                .map(|other| pools.value(*other).coords_at(t)),
        );
        pool.coordinates
            .iter()
            .filter(|c| !still_drawn.contains(c))
            .take(pool.drawn_count(t))
            .copied()
            .collect()
    }

    pub fn previous(&self) -> Option<&ReactionComponents> {
        self.previous.as_deref()
    }

    /// number of snapshots in the chain, this one included
    pub fn history_len(&self) -> usize {
        let mut len = 1;
        let mut current = self;
        while let Some(previous) = current.previous() {
            len += 1;
            current = previous;
        }
        len
    }

    /// drops this snapshot and returns its predecessor
    pub fn undo(mut self) -> Option<ReactionComponents> {
        self.previous.take().map(|previous| *previous)
    }
}

// unlinks the history one snapshot at a time instead of recursing through the boxes
impl Drop for ReactionComponents {
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(mut snapshot) = previous {
            previous = snapshot.previous.take();
        }
    }
}
