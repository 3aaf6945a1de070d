use crate::Equations::equation::{Equation, EquationTrait};
use crate::Reactions::ReactionError;
use crate::Reactions::coefficients::{BalancedReactionCoefficients, SpeciesRole, SpeciesValues};
use crate::Reactions::convergence_solver::ReactionConvergenceSolver;
use log::{info, warn};
use prettytable::{Cell, Row, Table};

/// Concentration of every species of a balanced reaction as a function of time.
/// Built either for a forward run (reactants -> products) or as a reverse run spliced after a
/// forward one, in which case every equation switches from the forward curve to the reverse curve
/// at the reverse start time.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedReactionEquations {
    pub coefficients: BalancedReactionCoefficients,
    pub equilibrium_constant: f64,
    pub start_time: f64,
    pub convergence_time: f64,
    pub is_forward: bool,
    /// one equation per species
    pub concentration: SpeciesValues<Equation>,
    initial: SpeciesValues<f64>,
    unit_change: f64,
    solved: bool,
}

fn check_concentrations(values: &SpeciesValues<f64>) -> Result<(), ReactionError> {
    for (role, value) in values.iter() {
        if !value.is_finite() || *value < 0.0 {
            return Err(ReactionError::NegativeConcentration {
                species: role,
                value: *value,
            });
        }
    }
    Ok(())
}

fn check_times(start: f64, end: f64) -> Result<(), ReactionError> {
    if !start.is_finite() || !end.is_finite() || end <= start {
        return Err(ReactionError::InvalidTimes { start, end });
    }
    Ok(())
}

impl BalancedReactionEquations {
    /// Forward reaction starting from reactants only
    pub fn forward(
        coefficients: BalancedReactionCoefficients,
        equilibrium_constant: f64,
        reactant_a: f64,
        reactant_b: f64,
        start_time: f64,
        convergence_time: f64,
        solver: &ReactionConvergenceSolver,
    ) -> Result<Self, ReactionError> {
        Self::forward_from(
            coefficients,
            equilibrium_constant,
            SpeciesValues::reactants(reactant_a, reactant_b),
            start_time,
            convergence_time,
            solver,
        )
    }

    /// Forward reaction starting from an arbitrary mixture
    pub fn forward_from(
        coefficients: BalancedReactionCoefficients,
        equilibrium_constant: f64,
        initial: SpeciesValues<f64>,
        start_time: f64,
        convergence_time: f64,
        solver: &ReactionConvergenceSolver,
    ) -> Result<Self, ReactionError> {
        let (unit_change, solved) =
            Self::solve_phase(&coefficients, equilibrium_constant, &initial, start_time, convergence_time, true, solver)?;
        let concentration = Self::phase_equations(
            &coefficients,
            &initial,
            unit_change,
            true,
            start_time,
            convergence_time,
        )?;
        Ok(Self {
            coefficients,
            equilibrium_constant,
            start_time,
            convergence_time,
            is_forward: true,
            concentration,
            initial,
            unit_change,
            solved,
        })
    }

    /// Reverse reaction following `forward`. `reverse_initial` is the mixture at `reverse_start`,
    /// usually the converged forward mixture with extra products added.
    pub fn reverse(
        forward: &BalancedReactionEquations,
        reverse_initial: SpeciesValues<f64>,
        reverse_start: f64,
        reverse_convergence: f64,
        solver: &ReactionConvergenceSolver,
    ) -> Result<Self, ReactionError> {
        if reverse_start < forward.start_time {
            return Err(ReactionError::InvalidTimes {
                start: forward.start_time,
                end: reverse_start,
            });
        }
        let coefficients = forward.coefficients;
        let (unit_change, solved) = Self::solve_phase(
            &coefficients,
            forward.equilibrium_constant,
            &reverse_initial,
            reverse_start,
            reverse_convergence,
            false,
            solver,
        )?;
        let reverse_equations = Self::phase_equations(
            &coefficients,
            &reverse_initial,
            unit_change,
            false,
            reverse_start,
            reverse_convergence,
        )?;
        let concentration = reverse_equations.map(|role, reverse_equation| {
            Equation::switching(
                reverse_start,
                forward.concentration.value(role).clone(),
                reverse_equation.clone(),
            )
        });
        Ok(Self {
            coefficients,
            equilibrium_constant: forward.equilibrium_constant,
            start_time: reverse_start,
            convergence_time: reverse_convergence,
            is_forward: false,
            concentration,
            initial: reverse_initial,
            unit_change,
            solved,
        })
    }

    fn solve_phase(
        coefficients: &BalancedReactionCoefficients,
        equilibrium_constant: f64,
        initial: &SpeciesValues<f64>,
        start_time: f64,
        convergence_time: f64,
        is_forward: bool,
        solver: &ReactionConvergenceSolver,
    ) -> Result<(f64, bool), ReactionError> {
        coefficients.validate()?;
        if !equilibrium_constant.is_finite() || equilibrium_constant <= 0.0 {
            return Err(ReactionError::InvalidEquilibriumConstant(equilibrium_constant));
        }
        check_times(start_time, convergence_time)?;
        check_concentrations(initial)?;
        match solver.find_unit_change(coefficients, initial, equilibrium_constant, is_forward) {
            Some(unit_change) => {
                info!(
                    "{} reaction K = {}: unit change {}",
                    if is_forward { "forward" } else { "reverse" },
                    equilibrium_constant,
                    unit_change
                );
                Ok((unit_change, true))
            }
            None => {
                warn!(
                    "{} reaction K = {} has no solution for {:?}, concentrations stay constant",
                    if is_forward { "forward" } else { "reverse" },
                    equilibrium_constant,
                    initial
                );
                Ok((0.0, false))
            }
        }
    }

    fn phase_equations(
        coefficients: &BalancedReactionCoefficients,
        initial: &SpeciesValues<f64>,
        unit_change: f64,
        is_forward: bool,
        start_time: f64,
        convergence_time: f64,
    ) -> Result<SpeciesValues<Equation>, ReactionError> {
        let converged =
            ReactionConvergenceSolver::concentrations_after(coefficients, initial, unit_change, is_forward);
        // rounding at the bisection limit must not produce a tiny negative value
        let equations = initial.try_map(|role, c0| {
            Equation::equilibrium_reaction(start_time, *c0, convergence_time, converged.value(role).max(0.0))
        })?;
        Ok(equations)
    }

    pub fn unit_change(&self) -> f64 {
        self.unit_change
    }

    /// false when the solver found no unit change and the curves are flat
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// mixture at the start of this phase
    pub fn initial_concentrations(&self) -> SpeciesValues<f64> {
        self.initial
    }

    /// mixture at the convergence time
    pub fn converged_concentrations(&self) -> SpeciesValues<f64> {
        self.concentrations_at(self.convergence_time)
    }

    pub fn concentration_at(&self, role: SpeciesRole, t: f64) -> f64 {
        self.concentration.value(role).get_value(t)
    }

    pub fn concentrations_at(&self, t: f64) -> SpeciesValues<f64> {
        self.concentration.map(|_, equation| equation.get_value(t))
    }

    /// reaction quotient of the mixture at time t
    pub fn quotient_at(&self, t: f64) -> f64 {
        ReactionConvergenceSolver::quotient(&self.coefficients, &self.concentrations_at(t), 0.0, true)
    }

    /// table of concentrations and Q at the given times
    pub fn concentration_table(&self, times: &[f64]) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("t"),
            Cell::new("A"),
            Cell::new("B"),
            Cell::new("C"),
            Cell::new("D"),
            Cell::new("Q"),
        ]));
        for &t in times {
            let c = self.concentrations_at(t);
            let mut cells = vec![Cell::new(&format!("{:.2}", t))];
            for (_, value) in c.iter() {
                cells.push(Cell::new(&format!("{:.4}", value)));
            }
            cells.push(Cell::new(&format!("{:.4}", self.quotient_at(t))));
            table.add_row(Row::new(cells));
        }
        table
    }

    pub fn print_concentration_table(&self, times: &[f64]) {
        self.concentration_table(times).printstd();
    }
}
