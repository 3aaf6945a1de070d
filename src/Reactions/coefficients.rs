use crate::Reactions::ReactionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// role of a species in the reaction aA + bB <=> cC + dD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesRole {
    ReactantA,
    ReactantB,
    ProductC,
    ProductD,
}

impl SpeciesRole {
    pub const ALL: [SpeciesRole; 4] = [
        SpeciesRole::ReactantA,
        SpeciesRole::ReactantB,
        SpeciesRole::ProductC,
        SpeciesRole::ProductD,
    ];

    pub fn is_reactant(&self) -> bool {
        matches!(self, SpeciesRole::ReactantA | SpeciesRole::ReactantB)
    }
}

impl fmt::Display for SpeciesRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SpeciesRole::ReactantA => "A",
            SpeciesRole::ReactantB => "B",
            SpeciesRole::ProductC => "C",
            SpeciesRole::ProductD => "D",
        };
        write!(f, "{}", name)
    }
}

/// one value per species role: concentrations, equations, grid pools...
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesValues<T> {
    pub reactant_a: T,
    pub reactant_b: T,
    pub product_c: T,
    pub product_d: T,
}

impl<T> SpeciesValues<T> {
    pub fn new(reactant_a: T, reactant_b: T, product_c: T, product_d: T) -> Self {
        Self {
            reactant_a,
            reactant_b,
            product_c,
            product_d,
        }
    }

    pub fn from_fn(mut f: impl FnMut(SpeciesRole) -> T) -> Self {
        Self {
            reactant_a: f(SpeciesRole::ReactantA),
            reactant_b: f(SpeciesRole::ReactantB),
            product_c: f(SpeciesRole::ProductC),
            product_d: f(SpeciesRole::ProductD),
        }
    }

    pub fn value(&self, role: SpeciesRole) -> &T {
        match role {
            SpeciesRole::ReactantA => &self.reactant_a,
            SpeciesRole::ReactantB => &self.reactant_b,
            SpeciesRole::ProductC => &self.product_c,
            SpeciesRole::ProductD => &self.product_d,
        }
    }

    pub fn value_mut(&mut self, role: SpeciesRole) -> &mut T {
        match role {
            SpeciesRole::ReactantA => &mut self.reactant_a,
            SpeciesRole::ReactantB => &mut self.reactant_b,
            SpeciesRole::ProductC => &mut self.product_c,
            SpeciesRole::ProductD => &mut self.product_d,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(SpeciesRole, &T) -> U) -> SpeciesValues<U> {
        SpeciesValues::from_fn(|role| f(role, self.value(role)))
    }

    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(SpeciesRole, &T) -> Result<U, E>,
    ) -> Result<SpeciesValues<U>, E> {
        Ok(SpeciesValues {
            reactant_a: f(SpeciesRole::ReactantA, &self.reactant_a)?,
            reactant_b: f(SpeciesRole::ReactantB, &self.reactant_b)?,
            product_c: f(SpeciesRole::ProductC, &self.product_c)?,
            product_d: f(SpeciesRole::ProductD, &self.product_d)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesRole, &T)> {
        SpeciesRole::ALL.into_iter().map(move |role| (role, self.value(role)))
    }
}

impl SpeciesValues<f64> {
    /// initial state of a forward reaction: reactants only
    pub fn reactants(reactant_a: f64, reactant_b: f64) -> Self {
        Self::new(reactant_a, reactant_b, 0.0, 0.0)
    }
}

/// Stoichiometric coefficients of aA + bB <=> cC + dD.
/// A zero coefficient means the species takes no part in the reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalancedReactionCoefficients {
    pub reactant_a: u32,
    pub reactant_b: u32,
    pub product_c: u32,
    pub product_d: u32,
}

impl BalancedReactionCoefficients {
    pub fn new(
        reactant_a: u32,
        reactant_b: u32,
        product_c: u32,
        product_d: u32,
    ) -> Result<Self, ReactionError> {
        let coefficients = Self {
            reactant_a,
            reactant_b,
            product_c,
            product_d,
        };
        coefficients.validate()?;
        Ok(coefficients)
    }

    /// at least one reactant and one product must take part
    pub fn validate(&self) -> Result<(), ReactionError> {
        if self.reactant_a == 0 && self.reactant_b == 0 {
            return Err(ReactionError::MissingSpecies("reactant"));
        }
        if self.product_c == 0 && self.product_d == 0 {
            return Err(ReactionError::MissingSpecies("product"));
        }
        Ok(())
    }

    pub fn coefficient(&self, role: SpeciesRole) -> u32 {
        match role {
            SpeciesRole::ReactantA => self.reactant_a,
            SpeciesRole::ReactantB => self.reactant_b,
            SpeciesRole::ProductC => self.product_c,
            SpeciesRole::ProductD => self.product_d,
        }
    }

    pub fn as_species_values(&self) -> SpeciesValues<u32> {
        SpeciesValues::from_fn(|role| self.coefficient(role))
    }

    /// the reaction written out, e.g. "2A + B ⇌ 3C"
    pub fn to_equation_string(&self, names: &SpeciesValues<String>) -> String {
        let side = |roles: [SpeciesRole; 2]| {
            roles
                .iter()
                .filter(|role| self.coefficient(**role) > 0)
                .map(|role| match self.coefficient(*role) {
                    1 => names.value(*role).clone(),
                    n => format!("{}{}", n, names.value(*role)),
                })
                .collect::<Vec<String>>()
                .join(" + ")
        };
        format!(
            "{} ⇌ {}",
            side([SpeciesRole::ReactantA, SpeciesRole::ReactantB]),
            side([SpeciesRole::ProductC, SpeciesRole::ProductD])
        )
    }
}

impl Default for BalancedReactionCoefficients {
    fn default() -> Self {
        Self {
            reactant_a: 1,
            reactant_b: 1,
            product_c: 1,
            product_d: 1,
        }
    }
}

/// coefficients and species names parsed from a reaction string
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReaction {
    pub coefficients: BalancedReactionCoefficients,
    /// empty string for a role absent from the reaction
    pub names: SpeciesValues<String>,
}

/// Parses reactions like "2A + B = C + 3D", "H2 + I2 <=> 2HI" or "N2O4 ⇌ 2NO2".
/// Each side holds one or two species; a missing coefficient is 1.
pub fn parse_reaction_equation(equation: &str) -> Result<ParsedReaction, ReactionError> {
    let sides: Vec<&str> = equation
        .split(|c: char| c == '⇌' || c == '=')
        .flat_map(|s| s.split("->"))
        .collect();
    // "<=>" leaves '<' and '>' around the '=' split
    let sides: Vec<String> = sides
        .iter()
        .map(|s| s.trim().trim_start_matches('>').trim_end_matches('<').trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if sides.len() != 2 {
        return Err(ReactionError::Parse(format!(
            "expected exactly one arrow in '{}'",
            equation
        )));
    }
    let term = Regex::new(r"^\s*(\d*)\s*([A-Za-z][A-Za-z0-9()]*)\s*$")
        .map_err(|e| ReactionError::Parse(e.to_string()))?;

    let parse_side = |side: &str| -> Result<Vec<(u32, String)>, ReactionError> {
        let terms: Vec<&str> = side.split('+').collect();
        if terms.len() > 2 {
            return Err(ReactionError::Parse(format!(
                "at most two species per side, got '{}'",
                side
            )));
        }
        terms
            .iter()
            .map(|t| {
                let caps = term
                    .captures(t)
                    .ok_or_else(|| ReactionError::Parse(format!("cannot parse term '{}'", t.trim())))?;
                let coefficient = match &caps[1] {
                    "" => 1,
                    digits => digits
                        .parse::<u32>()
                        .map_err(|e| ReactionError::Parse(e.to_string()))?,
                };
                Ok((coefficient, caps[2].to_string()))
            })
            .collect()
    };
    let left = parse_side(&sides[0])?;
    let right = parse_side(&sides[1])?;

    let get = |terms: &Vec<(u32, String)>, i: usize| terms.get(i).cloned().unwrap_or((0, String::new()));
    let (a, name_a) = get(&left, 0);
    let (b, name_b) = get(&left, 1);
    let (c, name_c) = get(&right, 0);
    let (d, name_d) = get(&right, 1);
    Ok(ParsedReaction {
        coefficients: BalancedReactionCoefficients::new(a, b, c, d)?,
        names: SpeciesValues::new(name_a, name_b, name_c, name_d),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_values_access() {
        let mut values = SpeciesValues::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(*values.value(SpeciesRole::ProductC), 3.0);
        *values.value_mut(SpeciesRole::ReactantB) = 5.0;
        let doubled = values.map(|_, v| v * 2.0);
        assert_eq!(doubled, SpeciesValues::new(2.0, 10.0, 6.0, 8.0));
        let roles: Vec<SpeciesRole> = values.iter().map(|(r, _)| r).collect();
        assert_eq!(roles, SpeciesRole::ALL.to_vec());
        assert!(SpeciesRole::ReactantA.is_reactant());
        assert!(!SpeciesRole::ProductD.is_reactant());
    }

    #[test]
    fn test_coefficients_need_both_sides() {
        assert!(BalancedReactionCoefficients::new(1, 0, 2, 0).is_ok());
        assert_eq!(
            BalancedReactionCoefficients::new(0, 0, 2, 1).unwrap_err(),
            ReactionError::MissingSpecies("reactant")
        );
        assert_eq!(
            BalancedReactionCoefficients::new(1, 1, 0, 0).unwrap_err(),
            ReactionError::MissingSpecies("product")
        );
    }

    #[test]
    fn test_parse_reaction_equation() {
        let parsed = parse_reaction_equation("2A + B = C + 3D").unwrap();
        assert_eq!(parsed.coefficients, BalancedReactionCoefficients::new(2, 1, 1, 3).unwrap());
        assert_eq!(parsed.names.reactant_a, "A");
        assert_eq!(parsed.names.product_d, "D");

        let parsed = parse_reaction_equation("H2 + I2 <=> 2HI").unwrap();
        assert_eq!(parsed.coefficients, BalancedReactionCoefficients::new(1, 1, 2, 0).unwrap());
        assert_eq!(parsed.names.product_c, "HI");
        assert_eq!(parsed.names.product_d, "");

        let parsed = parse_reaction_equation("N2O4 ⇌ 2NO2").unwrap();
        assert_eq!(parsed.coefficients.reactant_a, 1);
        assert_eq!(parsed.coefficients.product_c, 2);
        assert_eq!(
            parsed.coefficients.to_equation_string(&parsed.names),
            "N2O4 ⇌ 2NO2"
        );

        let parsed = parse_reaction_equation("CO + Cl2 -> COCl2").unwrap();
        assert_eq!(parsed.names.reactant_b, "Cl2");
    }

    #[test]
    fn test_parse_reaction_equation_errors() {
        assert!(parse_reaction_equation("A + B").is_err());
        assert!(parse_reaction_equation("A + B + E = C").is_err());
        assert!(parse_reaction_equation("A + ? = C").is_err());
        assert!(parse_reaction_equation("A = B = C").is_err());
    }
}
