use crate::Reactions::coefficients::{BalancedReactionCoefficients, SpeciesRole, SpeciesValues};
use crate::settings::SolverSettings;
use log::debug;

/// Result of a successful solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceResult {
    /// change of concentration per unit of stoichiometric coefficient
    pub unit_change: f64,
    /// reaction quotient at `unit_change`
    pub quotient: f64,
    pub iterations: usize,
}

/// Finds the unit change x making the reaction quotient equal to the equilibrium constant.
/// Concentration of every species after the change is `initial ± coefficient * x`: in the forward
/// direction reactants lose and products gain, in the reverse direction the other way round.
/// Q(x) is monotonic on [0, max_unit_change], increasing for the forward direction and decreasing
/// for the reverse one, which is what the bisection relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionConvergenceSolver {
    pub settings: SolverSettings,
}

impl ReactionConvergenceSolver {
    pub fn new() -> Self {
        Self {
            settings: SolverSettings::default(),
        }
    }

    pub fn with_settings(settings: SolverSettings) -> Self {
        Self { settings }
    }

    /// concentration of every species after unit change `x`
    pub fn concentrations_after(
        coefficients: &BalancedReactionCoefficients,
        initial: &SpeciesValues<f64>,
        x: f64,
        is_forward: bool,
    ) -> SpeciesValues<f64> {
        initial.map(|role, c0| {
            let change = coefficients.coefficient(role) as f64 * x;
            if role.is_reactant() == is_forward {
                c0 - change
            } else {
                c0 + change
            }
        })
    }

    /// Reaction quotient products / reactants. Species with zero coefficient are left out
    pub fn quotient(
        coefficients: &BalancedReactionCoefficients,
        initial: &SpeciesValues<f64>,
        x: f64,
        is_forward: bool,
    ) -> f64 {
        let concentrations = Self::concentrations_after(coefficients, initial, x, is_forward);
        let mut numerator = 1.0;
        let mut denominator = 1.0;
        for (role, c) in concentrations.iter() {
            let coefficient = coefficients.coefficient(role);
            if coefficient == 0 {
                continue;
            }
            let term = c.powi(coefficient as i32);
            if role.is_reactant() {
                denominator *= term;
            } else {
                numerator *= term;
            }
        }
        numerator / denominator
    }

    /// Largest x for which no depleted species goes negative. Depleted are the reactants in the
    /// forward direction and the products in the reverse one
    pub fn max_unit_change(
        coefficients: &BalancedReactionCoefficients,
        initial: &SpeciesValues<f64>,
        is_forward: bool,
    ) -> f64 {
        SpeciesRole::ALL
            .iter()
            .filter(|role| role.is_reactant() == is_forward)
            .filter(|role| coefficients.coefficient(**role) > 0)
            .map(|role| initial.value(*role).max(0.0) / coefficients.coefficient(*role) as f64)
            .fold(f64::INFINITY, f64::min)
    }

    /// Bisection over [0, max_unit_change]. Returns None when the quotient does not come within
    /// the tolerance of `equilibrium_constant` in the allowed number of iterations.
    pub fn solve(
        &self,
        coefficients: &BalancedReactionCoefficients,
        initial: &SpeciesValues<f64>,
        equilibrium_constant: f64,
        is_forward: bool,
    ) -> Option<ConvergenceResult> {
        let max_drop = Self::max_unit_change(coefficients, initial, is_forward);
        if !max_drop.is_finite() || max_drop <= 0.0 {
            debug!("no room for the reaction to move: max unit change {}", max_drop);
            return None;
        }
        let mut low = 0.0;
        let mut high = max_drop;
        for iteration in 0..self.settings.max_iterations {
            let mid = (low + high) / 2.0;
            let q = Self::quotient(coefficients, initial, mid, is_forward);
            if (q - equilibrium_constant).abs() <= self.settings.tolerance {
                debug!(
                    "converged after {} iterations: x = {}, Q = {}",
                    iteration + 1,
                    mid,
                    q
                );
                return Some(ConvergenceResult {
                    unit_change: mid,
                    quotient: q,
                    iterations: iteration + 1,
                });
            }
            // NaN or infinite Q only appears next to max_drop where a depleted species vanishes
            let q_too_large = q.is_nan() || q > equilibrium_constant;
            // forward: Q grows with x, reverse: Q falls with x
            if q_too_large == is_forward {
                high = mid;
            } else {
                low = mid;
            }
        }
        debug!(
            "no convergence in {} iterations, bracket [{}, {}]",
            self.settings.max_iterations, low, high
        );
        None
    }

    pub fn find_unit_change(
        &self,
        coefficients: &BalancedReactionCoefficients,
        initial: &SpeciesValues<f64>,
        equilibrium_constant: f64,
        is_forward: bool,
    ) -> Option<f64> {
        self.solve(coefficients, initial, equilibrium_constant, is_forward)
            .map(|result| result.unit_change)
    }
}

impl Default for ReactionConvergenceSolver {
    fn default() -> Self {
        Self::new()
    }
}
