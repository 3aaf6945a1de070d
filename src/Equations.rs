/// scalar functions of one real parameter (time or progress) used to describe concentration curves
/// and the fraction of grid molecules to draw.
/// The set of equation kinds is closed: every kind is a variant of the `Equation` enum and is evaluated
/// through the single entry point `EquationTrait::get_value`
/// # Examples
/// ```
/// use EquiSim::Equations::equation::{Equation, EquationTrait};
/// use approx::assert_relative_eq;
/// // concentration of a reactant falling from 0.5 at t=0 to 0.25 at t=10
/// let reactant = Equation::equilibrium_reaction(0.0, 0.5, 10.0, 0.25).unwrap();
/// assert_relative_eq!(reactant.get_value(0.0), 0.5);
/// assert_relative_eq!(reactant.get_value(10.0), 0.25);
/// // after the convergence time the curve stays at equilibrium
/// assert_relative_eq!(reactant.get_value(15.0), 0.25);
/// // the same curve for the first 5 seconds, then a constant
/// let spliced = Equation::switching(5.0, reactant.clone(), Equation::constant(0.3));
/// assert_relative_eq!(spliced.get_value(4.0), reactant.get_value(4.0));
/// assert_relative_eq!(spliced.get_value(5.0), 0.3);
/// ```
pub mod equation;
