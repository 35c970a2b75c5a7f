//! Height-dependent movement costs.
//! A step whose destination is at least as high as its source is a climb,
//! anything else is a fall; each variant prices the two independently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{CostSettings, normalize_variant};
use crate::error::ConfigError;

pub trait CostFunction: fmt::Debug {
    fn name(&self) -> &'static str;

    fn climb_cost(&self, delta: u32) -> f64;

    fn fall_cost(&self, delta: u32) -> f64;

    fn cost(&self, current: i32, next: i32) -> f64 {
        let delta = current.abs_diff(next);
        if next >= current { self.climb_cost(delta) } else { self.fall_cost(delta) }
    }
}

/// Every step costs one, so path cost equals hop count.
#[derive(Clone, Copy, Debug, Default)]
pub struct Constant;

impl CostFunction for Constant {
    fn name(&self) -> &'static str {
        "const"
    }

    fn climb_cost(&self, _delta: u32) -> f64 {
        1.0
    }

    fn fall_cost(&self, _delta: u32) -> f64 {
        1.0
    }
}

/// Climbs cost their height gain, falls refund their height loss.
#[derive(Clone, Copy, Debug, Default)]
pub struct Linear;

impl CostFunction for Linear {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn climb_cost(&self, delta: u32) -> f64 {
        f64::from(delta)
    }

    fn fall_cost(&self, delta: u32) -> f64 {
        -f64::from(delta)
    }
}

/// Convex climb penalty; falls are bounded by `tanh` and turn negative once the
/// drop exceeds the penalty threshold.
#[derive(Clone, Copy, Debug)]
pub struct Nonlinear {
    penalty_threshold: u32,
}

impl Nonlinear {
    pub fn new(penalty_threshold: u32) -> Result<Self, ConfigError> {
        if penalty_threshold == 0 {
            return Err(ConfigError::invalid("costfunc.penalty_threshold", "must be positive"));
        }
        Ok(Self { penalty_threshold })
    }
}

impl CostFunction for Nonlinear {
    fn name(&self) -> &'static str {
        "non_linear"
    }

    fn climb_cost(&self, delta: u32) -> f64 {
        f64::from(delta).powf(1.5)
    }

    fn fall_cost(&self, delta: u32) -> f64 {
        (f64::from(self.penalty_threshold) - f64::from(delta)).tanh()
    }
}

/// Bounded and direction-symmetric; never negative.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tanh;

impl CostFunction for Tanh {
    fn name(&self) -> &'static str {
        "tanh"
    }

    fn climb_cost(&self, delta: u32) -> f64 {
        f64::from(delta).tanh()
    }

    fn fall_cost(&self, delta: u32) -> f64 {
        f64::from(delta).tanh()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum CostFunctionKind {
    #[serde(rename = "const")]
    Constant,
    Linear,
    NonLinear,
    Tanh,
}

impl CostFunctionKind {
    pub const ALL: [CostFunctionKind; 4] = [
        CostFunctionKind::Constant,
        CostFunctionKind::Linear,
        CostFunctionKind::NonLinear,
        CostFunctionKind::Tanh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constant => "const",
            Self::Linear => "linear",
            Self::NonLinear => "non_linear",
            Self::Tanh => "tanh",
        }
    }

    /// Whether some step under this kind may carry a negative weight.
    pub fn allows_negative_steps(self) -> bool {
        matches!(self, Self::Linear | Self::NonLinear)
    }
}

impl fmt::Display for CostFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostFunctionKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_variant(value).as_str() {
            "const" | "constant" => Ok(Self::Constant),
            "linear" => Ok(Self::Linear),
            "non_linear" | "nonlinear" => Ok(Self::NonLinear),
            "tanh" => Ok(Self::Tanh),
            _ => Err(ConfigError::UnknownVariant {
                kind: "cost function",
                value: value.to_string(),
                expected: "const, linear, non_linear, tanh",
            }),
        }
    }
}

impl TryFrom<String> for CostFunctionKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

pub fn build_cost_function(
    kind: CostFunctionKind,
    settings: &CostSettings,
) -> Result<Box<dyn CostFunction>, ConfigError> {
    Ok(match kind {
        CostFunctionKind::Constant => Box::new(Constant),
        CostFunctionKind::Linear => Box::new(Linear),
        CostFunctionKind::NonLinear => Box::new(Nonlinear::new(settings.penalty_threshold)?),
        CostFunctionKind::Tanh => Box::new(Tanh),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_functions() -> Vec<Box<dyn CostFunction>> {
        CostFunctionKind::ALL
            .into_iter()
            .map(|kind| build_cost_function(kind, &CostSettings::default()).expect("defaults"))
            .collect()
    }

    #[test]
    fn flat_steps_use_the_climb_branch() {
        assert_eq!(Constant.cost(3, 3), 1.0);
        assert_eq!(Linear.cost(3, 3), 0.0);
        assert_eq!(Nonlinear::new(2).expect("threshold").cost(3, 3), 0.0);
        assert_eq!(Tanh.cost(3, 3), 0.0);
    }

    #[test]
    fn constant_ignores_direction_and_magnitude() {
        assert_eq!(Constant.cost(0, 10), 1.0);
        assert_eq!(Constant.cost(10, 0), 1.0);
    }

    #[test]
    fn linear_refunds_descents() {
        assert_eq!(Linear.cost(1, 4), 3.0);
        assert_eq!(Linear.cost(4, 1), -3.0);
    }

    #[test]
    fn nonlinear_is_asymmetric_and_can_go_negative() {
        let cost = Nonlinear::new(2).expect("threshold");
        assert!((cost.cost(0, 4) - 8.0).abs() < 1e-12);
        assert!((cost.cost(4, 3) - 1.0_f64.tanh()).abs() < 1e-12);
        assert!(cost.cost(5, 0) < 0.0);
        assert!(cost.cost(5, 0) > -1.0);
    }

    #[test]
    fn tanh_is_bounded_and_symmetric() {
        assert_eq!(Tanh.cost(0, 6), Tanh.cost(6, 0));
        assert!(Tanh.cost(0, 100) <= 1.0);
        assert!(Tanh.cost(0, 1) > 0.0);
    }

    #[test]
    fn nonlinear_rejects_zero_threshold() {
        assert!(matches!(Nonlinear::new(0), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn every_kind_builds_and_names_itself() {
        for (kind, function) in CostFunctionKind::ALL.into_iter().zip(all_functions()) {
            assert_eq!(kind.as_str(), function.name());
        }
    }

    #[test]
    fn kinds_parse_original_spellings() {
        assert_eq!("CONST".parse::<CostFunctionKind>().ok(), Some(CostFunctionKind::Constant));
        assert_eq!(
            "NON_LINEAR".parse::<CostFunctionKind>().ok(),
            Some(CostFunctionKind::NonLinear)
        );
        assert_eq!("non-linear".parse::<CostFunctionKind>().ok(), Some(CostFunctionKind::NonLinear));
        assert!("cubic".parse::<CostFunctionKind>().is_err());
    }
}
