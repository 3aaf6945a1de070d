use enum_dispatch::enum_dispatch;
use thiserror::Error;

/// errors raised while constructing an equation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquationError {
    #[error("linear equation needs two distinct x values, got x1 = x2 = {x}")]
    DegenerateLinear { x: f64 },
    #[error("clamp range is empty: min {min} > max {max}")]
    InvalidClampRange { min: f64, max: f64 },
    #[error("equilibrium curve needs t2 > t1, got t1 = {t1}, t2 = {t2}")]
    InvalidInterval { t1: f64, t2: f64 },
    #[error("equation parameter '{name}' is not finite: {value}")]
    NonFinite { name: &'static str, value: f64 },
}

fn check_finite(name: &'static str, value: f64) -> Result<f64, EquationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EquationError::NonFinite { name, value })
    }
}

#[enum_dispatch]
pub trait EquationTrait {
    /// value of the function at x. Total, no side effects
    fn get_value(&self, x: f64) -> f64;
}

/// all kinds of scalar equations known to the engine
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch(EquationTrait)]
pub enum Equation {
    Constant(ConstantEquation),
    Linear(LinearEquation),
    Identity(IdentityEquation),
    Scaled(ScaledEquation),
    Switching(SwitchingEquation),
    Clamped(ClampedEquation),
    EquilibriumReaction(EquilibriumReactionEquation),
}

impl Equation {
    pub fn constant(value: f64) -> Self {
        ConstantEquation { value }.into()
    }
    /// straight line through (x1, y1) and (x2, y2)
    pub fn linear(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, EquationError> {
        Ok(LinearEquation::new(x1, y1, x2, y2)?.into())
    }
    pub fn identity() -> Self {
        IdentityEquation.into()
    }
    pub fn scaled(factor: f64, inner: Equation) -> Self {
        ScaledEquation {
            factor,
            inner: Box::new(inner),
        }
        .into()
    }
    /// `left` below the threshold, `right` at and above it
    pub fn switching(threshold: f64, left: Equation, right: Equation) -> Self {
        SwitchingEquation {
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
        .into()
    }
    pub fn clamped(min: f64, max: f64, inner: Equation) -> Result<Self, EquationError> {
        Ok(ClampedEquation::new(min, max, inner)?.into())
    }
    /// concentration approaching equilibrium: c1 at t1, c2 at t2
    pub fn equilibrium_reaction(t1: f64, c1: f64, t2: f64, c2: f64) -> Result<Self, EquationError> {
        Ok(EquilibriumReactionEquation::new(t1, c1, t2, c2)?.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantEquation {
    pub value: f64,
}

impl EquationTrait for ConstantEquation {
    fn get_value(&self, _x: f64) -> f64 {
        self.value
    }
}

/// y = y1 + (x - x1) * slope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearEquation {
    x1: f64,
    y1: f64,
    slope: f64,
}

impl LinearEquation {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, EquationError> {
        let x1 = check_finite("x1", x1)?;
        let y1 = check_finite("y1", y1)?;
        let x2 = check_finite("x2", x2)?;
        let y2 = check_finite("y2", y2)?;
        if x1 == x2 {
            return Err(EquationError::DegenerateLinear { x: x1 });
        }
        Ok(Self {
            x1,
            y1,
            slope: (y2 - y1) / (x2 - x1),
        })
    }
    pub fn slope(&self) -> f64 {
        self.slope
    }
}

impl EquationTrait for LinearEquation {
    fn get_value(&self, x: f64) -> f64 {
        self.y1 + (x - self.x1) * self.slope
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentityEquation;

impl EquationTrait for IdentityEquation {
    fn get_value(&self, x: f64) -> f64 {
        x
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaledEquation {
    pub factor: f64,
    pub inner: Box<Equation>,
}

impl EquationTrait for ScaledEquation {
    fn get_value(&self, x: f64) -> f64 {
        self.factor * self.inner.get_value(x)
    }
}

/// joins two equations at a threshold, e.g. a forward reaction curve with the reverse one
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchingEquation {
    pub threshold: f64,
    pub left: Box<Equation>,
    pub right: Box<Equation>,
}

impl EquationTrait for SwitchingEquation {
    fn get_value(&self, x: f64) -> f64 {
        if x < self.threshold {
            self.left.get_value(x)
        } else {
            self.right.get_value(x)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClampedEquation {
    min: f64,
    max: f64,
    inner: Box<Equation>,
}

impl ClampedEquation {
    pub fn new(min: f64, max: f64, inner: Equation) -> Result<Self, EquationError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(EquationError::InvalidClampRange { min, max });
        }
        Ok(Self {
            min,
            max,
            inner: Box::new(inner),
        })
    }
}

impl EquationTrait for ClampedEquation {
    fn get_value(&self, x: f64) -> f64 {
        self.inner.get_value(x).clamp(self.min, self.max)
    }
}

/// Concentration of one species on its way to equilibrium.
/// A parabola with its vertex at (t2, c2): the change is fastest at t1 and flattens out
/// towards t2. Before t1 the curve holds c1, after t2 it holds c2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumReactionEquation {
    t1: f64,
    c1: f64,
    t2: f64,
    c2: f64,
}

impl EquilibriumReactionEquation {
    pub fn new(t1: f64, c1: f64, t2: f64, c2: f64) -> Result<Self, EquationError> {
        let t1 = check_finite("t1", t1)?;
        let c1 = check_finite("c1", c1)?;
        let t2 = check_finite("t2", t2)?;
        let c2 = check_finite("c2", c2)?;
        if t2 <= t1 {
            return Err(EquationError::InvalidInterval { t1, t2 });
        }
        Ok(Self { t1, c1, t2, c2 })
    }
    pub fn start(&self) -> (f64, f64) {
        (self.t1, self.c1)
    }
    pub fn end(&self) -> (f64, f64) {
        (self.t2, self.c2)
    }
}

impl EquationTrait for EquilibriumReactionEquation {
    fn get_value(&self, x: f64) -> f64 {
        if x <= self.t1 {
            self.c1
        } else if x >= self.t2 {
            self.c2
        } else {
            let s = (self.t2 - x) / (self.t2 - self.t1);
            self.c2 + (self.c1 - self.c2) * s * s
        }
    }
}
