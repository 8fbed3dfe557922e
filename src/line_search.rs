pub mod backtracking;
pub mod fixed_step;
pub mod strong_wolfe;

use std::fmt::Debug;
use std::str::FromStr;

use num_traits::Float;

use crate::error::{Error, Result};

pub use backtracking::Backtracking;
pub use fixed_step::FixedStep;
pub use strong_wolfe::StrongWolfe;

/// A strategy for choosing a step length along a fixed descent direction.
///
/// The strategy only ever sees the one-dimensional restriction of the
/// objective: `phi(alpha)` evaluates the objective at the trial point for
/// step `alpha`, and `phi_dphi(alpha)` returns the pair
/// `(phi(alpha), phi'(alpha))`. `phi'(0)` is strictly negative whenever the
/// solver delegates here.
pub trait LineSearch<T>
where
    T: Float + Debug,
{
    /// Returns an accepted step length, or [`Error::LineSearchFailed`] when
    /// no acceptable step exists within the strategy's own budget.
    fn search(
        &self,
        phi: &mut dyn FnMut(T) -> T,
        phi_dphi: &mut dyn FnMut(T) -> (T, T),
    ) -> Result<T>;
}

/// Options shared by the line-search strategies.
///
/// Each strategy reads the fields relevant to it and validates them at
/// construction; the solver passes this struct through opaquely.
#[derive(Debug, Clone)]
pub struct LineSearchOptions<T>
where
    T: Float + Debug,
{
    /// First trial step length. Default: 1.0.
    pub initial_step: T,
    /// Sufficient-decrease constant `c1` in the Armijo condition. Default: 1e-4.
    pub c1: T,
    /// Curvature constant `c2` in the strong Wolfe condition. Default: 0.9.
    pub c2: T,
    /// Contraction factor for backtracking. Default: 0.5.
    pub rho: T,
    /// Largest step the strong Wolfe bracketing phase may try. Default: 50.0.
    pub step_max: T,
    /// Trial budget per search. Default: 25.
    pub max_iterations: usize,
    /// Constant step returned by the fixed strategy. Default: 1.0.
    pub step: T,
}

impl<T> Default for LineSearchOptions<T>
where
    T: Float + Debug,
{
    fn default() -> Self {
        Self {
            initial_step: T::one(),
            c1: T::from(1e-4).unwrap(),
            c2: T::from(0.9).unwrap(),
            rho: T::from(0.5).unwrap(),
            step_max: T::from(50.0).unwrap(),
            max_iterations: 25,
            step: T::one(),
        }
    }
}

/// The line-search strategies the solver can resolve by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearchMethod {
    /// Bracketing/zoom search satisfying the strong Wolfe conditions.
    StrongWolfe,
    /// Armijo backtracking.
    Backtracking,
    /// Constant step length.
    FixedStep,
}

impl LineSearchMethod {
    /// Builds the named strategy from the given options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLineSearchOptions`] when the options violate
    /// the strategy's parameter constraints.
    pub fn resolve<T>(self, options: &LineSearchOptions<T>) -> Result<Box<dyn LineSearch<T>>>
    where
        T: Float + Debug + 'static,
    {
        match self {
            LineSearchMethod::StrongWolfe => Ok(Box::new(StrongWolfe::new(options)?)),
            LineSearchMethod::Backtracking => Ok(Box::new(Backtracking::new(options)?)),
            LineSearchMethod::FixedStep => Ok(Box::new(FixedStep::new(options)?)),
        }
    }
}

impl Default for LineSearchMethod {
    fn default() -> Self {
        LineSearchMethod::StrongWolfe
    }
}

impl FromStr for LineSearchMethod {
    type Err = Error;

    /// Parses a line-search identifier. Accepts `"strong_wolfe"`,
    /// `"backtracking"` and `"fixed"`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strong_wolfe" => Ok(LineSearchMethod::StrongWolfe),
            "backtracking" => Ok(LineSearchMethod::Backtracking),
            "fixed" => Ok(LineSearchMethod::FixedStep),
            _ => Err(Error::UnknownLineSearch {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "strong_wolfe".parse::<LineSearchMethod>().unwrap(),
            LineSearchMethod::StrongWolfe
        );
        assert_eq!(
            "Backtracking".parse::<LineSearchMethod>().unwrap(),
            LineSearchMethod::Backtracking
        );
        assert_eq!(
            "FIXED".parse::<LineSearchMethod>().unwrap(),
            LineSearchMethod::FixedStep
        );
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let err = "newton_raphson".parse::<LineSearchMethod>().unwrap_err();
        assert_eq!(
            err,
            Error::UnknownLineSearch {
                name: "newton_raphson".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_builds_each_method() {
        let options = LineSearchOptions::<f64>::default();
        assert!(LineSearchMethod::StrongWolfe.resolve(&options).is_ok());
        assert!(LineSearchMethod::Backtracking.resolve(&options).is_ok());
        assert!(LineSearchMethod::FixedStep.resolve(&options).is_ok());
    }
}
