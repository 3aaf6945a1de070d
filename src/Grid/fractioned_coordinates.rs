use crate::Equations::equation::{Equation, EquationError, EquationTrait};
use crate::Grid::grid_coordinate::GridCoordinate;
use crate::Grid::grid_element_balancer::BalancedGridElement;

/// Coordinates bound to an equation giving, at any progress value, the fraction of them to draw.
/// The drawn coordinates are always a prefix of `coordinates`.
#[derive(Debug, Clone, PartialEq)]
pub struct FractionedCoordinates {
    pub coordinates: Vec<GridCoordinate>,
    pub fraction_to_draw: Equation,
}

impl FractionedCoordinates {
    pub fn new(coordinates: Vec<GridCoordinate>, fraction_to_draw: Equation) -> Self {
        Self {
            coordinates,
            fraction_to_draw,
        }
    }

    /// all coordinates drawn at any progress
    pub fn fully_drawn(coordinates: Vec<GridCoordinate>) -> Self {
        Self::new(coordinates, Equation::constant(1.0))
    }

    /// fraction moving linearly from the element's initial to its final fraction between `start` and `end`
    pub fn from_balanced_element(
        element: BalancedGridElement,
        start: f64,
        end: f64,
    ) -> Result<Self, EquationError> {
        let line = Equation::linear(start, element.initial_fraction, end, element.final_fraction)?;
        let fraction = Equation::clamped(
            element.initial_fraction.min(element.final_fraction),
            element.initial_fraction.max(element.final_fraction),
            line,
        )?;
        Ok(Self::new(element.coords, fraction))
    }

    /// Draws as many coordinates as `concentration` amounts to in a grid of `capacity` cells.
    /// Concentration is a fraction of the whole grid, so the fraction of this pool to draw is
    /// `capacity * c(x) / len`.
    pub fn following_concentration(
        coordinates: Vec<GridCoordinate>,
        concentration: Equation,
        capacity: usize,
    ) -> Result<Self, EquationError> {
        if coordinates.is_empty() {
            return Ok(Self::new(coordinates, Equation::constant(0.0)));
        }
        let factor = capacity as f64 / coordinates.len() as f64;
        let fraction = Equation::clamped(0.0, 1.0, Equation::scaled(factor, concentration))?;
        Ok(Self::new(coordinates, fraction))
    }

    pub fn drawn_count(&self, x: f64) -> usize {
        let len = self.coordinates.len();
        let count = (self.fraction_to_draw.get_value(x) * len as f64).round();
        if count.is_nan() || count <= 0.0 {
            0
        } else {
            (count as usize).min(len)
        }
    }

    /// coordinates to draw at progress `x`
    pub fn coords_at(&self, x: f64) -> &[GridCoordinate] {
        &self.coordinates[..self.drawn_count(x)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of(n: usize) -> Vec<GridCoordinate> {
        (0..n).map(|col| GridCoordinate::new(0, col)).collect()
    }

    #[test]
    fn test_drawn_count_is_rounded_and_clamped() {
        let coords = FractionedCoordinates::new(line_of(10), Equation::identity());
        assert_eq!(coords.drawn_count(0.0), 0);
        assert_eq!(coords.drawn_count(0.34), 3);
        assert_eq!(coords.drawn_count(0.36), 4);
        assert_eq!(coords.drawn_count(-5.0), 0);
        assert_eq!(coords.drawn_count(7.0), 10);
        assert_eq!(coords.drawn_count(f64::NAN), 0);
        assert_eq!(coords.coords_at(0.5), &line_of(10)[..5]);
    }

    #[test]
    fn test_monotonic_reveal() {
        let fraction = Equation::equilibrium_reaction(0.0, 0.0, 10.0, 1.0).unwrap();
        let coords = FractionedCoordinates::new(line_of(37), fraction);
        let mut previous = 0;
        for i in 0..=200 {
            let count = coords.drawn_count(i as f64 * 0.06);
            assert!(count >= previous);
            previous = count;
        }
        assert_eq!(previous, 37);
    }

    #[test]
    fn test_from_balanced_element() {
        let element = BalancedGridElement {
            coords: line_of(8),
            initial_fraction: 0.25,
            final_fraction: 1.0,
        };
        let coords = FractionedCoordinates::from_balanced_element(element, 0.0, 10.0).unwrap();
        assert_eq!(coords.drawn_count(-1.0), 2);
        assert_eq!(coords.drawn_count(0.0), 2);
        assert_eq!(coords.drawn_count(10.0), 8);
        assert_eq!(coords.drawn_count(11.0), 8);
    }

    #[test]
    fn test_following_concentration() {
        // 20 coordinates in a 100 cell grid, concentration rising from 0.05 to 0.2
        let concentration = Equation::linear(0.0, 0.05, 10.0, 0.2).unwrap();
        let coords = FractionedCoordinates::following_concentration(line_of(20), concentration, 100).unwrap();
        assert_eq!(coords.drawn_count(0.0), 5);
        assert_eq!(coords.drawn_count(10.0), 20);
        assert_eq!(coords.drawn_count(20.0), 20);

        let empty = FractionedCoordinates::following_concentration(vec![], Equation::constant(0.3), 100).unwrap();
        assert!(empty.coords_at(1.0).is_empty());
    }
}
