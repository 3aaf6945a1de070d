use crate::Equations::equation::EquationError;
use crate::Grid::GridError;
use crate::Reactions::coefficients::SpeciesRole;
use thiserror::Error;
/// species roles, stoichiometric coefficients of aA + bB <=> cC + dD and parsing of reaction strings
/// # Examples
/// ```
/// use EquiSim::Reactions::coefficients::{parse_reaction_equation, BalancedReactionCoefficients};
/// let parsed = parse_reaction_equation("2NO2 = N2O4").unwrap();
/// assert_eq!(parsed.coefficients, BalancedReactionCoefficients::new(2, 0, 1, 0).unwrap());
/// ```
pub mod coefficients;
/// eng
/// The module finds the unit change x of concentration such that the reaction quotient
/// Q = [C]^c [D]^d / ([A]^a [B]^b) of the mixture after the change equals the equilibrium constant K.
/// Every species changes by its coefficient times x, so one scalar describes the whole mixture.
/// The root is found by bisection between zero and the largest change keeping all concentrations non-negative.
/// # Examples
/// ```
/// use EquiSim::Reactions::coefficients::{BalancedReactionCoefficients, SpeciesValues};
/// use EquiSim::Reactions::convergence_solver::ReactionConvergenceSolver;
/// use approx::assert_relative_eq;
/// let solver = ReactionConvergenceSolver::new();
/// let coefficients = BalancedReactionCoefficients::new(1, 1, 1, 1).unwrap();
/// let x = solver
///     .find_unit_change(&coefficients, &SpeciesValues::reactants(0.5, 0.5), 1.0, true)
///     .unwrap();
/// assert_relative_eq!(x, 0.25, epsilon = 1e-4);
/// ```
pub mod convergence_solver;
/// concentration vs time equations of all species for forward and reverse reactions
/// # Examples
/// ```
/// use EquiSim::Reactions::balanced_equations::BalancedReactionEquations;
/// use EquiSim::Reactions::coefficients::{BalancedReactionCoefficients, SpeciesRole};
/// use EquiSim::Reactions::convergence_solver::ReactionConvergenceSolver;
/// use approx::assert_relative_eq;
/// let solver = ReactionConvergenceSolver::new();
/// let coefficients = BalancedReactionCoefficients::new(1, 1, 1, 1).unwrap();
/// let forward = BalancedReactionEquations::forward(coefficients, 1.0, 0.5, 0.5, 0.0, 10.0, &solver).unwrap();
/// assert_relative_eq!(forward.concentration_at(SpeciesRole::ProductC, 10.0), 0.25, epsilon = 1e-4);
/// // adding product C and D after equilibrium pushes the reaction back
/// let mut mixture = forward.converged_concentrations();
/// mixture.product_c += 0.2;
/// mixture.product_d += 0.2;
/// let reverse = BalancedReactionEquations::reverse(&forward, mixture, 15.0, 25.0, &solver).unwrap();
/// assert!(reverse.concentration_at(SpeciesRole::ReactantA, 25.0) > 0.25);
/// ```
pub mod balanced_equations;
/// immutable snapshots of a reaction shown on a grid of molecules
pub mod reaction_components;

/// errors of reaction setup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReactionError {
    #[error("equilibrium constant must be positive and finite, got {0}")]
    InvalidEquilibriumConstant(f64),
    #[error("end time {end} must be after start time {start}")]
    InvalidTimes { start: f64, end: f64 },
    #[error("concentration of {species} must be finite and non-negative, got {value}")]
    NegativeConcentration { species: SpeciesRole, value: f64 },
    #[error("reaction needs at least one {0} with a non-zero coefficient")]
    MissingSpecies(&'static str),
    #[error("cannot parse reaction: {0}")]
    Parse(String),
    #[error("reaction has not been run forward yet")]
    ReactionNotRun,
    #[error(transparent)]
    Equation(#[from] EquationError),
    #[error(transparent)]
    Grid(#[from] GridError),
}
