use std::fmt::Debug;

use log::debug;
use num_traits::Float;

use crate::error::{Error, Result};
use crate::line_search::{LineSearch, LineSearchOptions};

/// Armijo backtracking line search.
///
/// Starts at `initial_step` and contracts by `rho` until the sufficient
/// decrease condition `phi(a) <= phi(0) + c1 * a * phi'(0)` holds. No
/// curvature condition; this is the cheap, robust choice for plain
/// steepest descent.
#[derive(Debug, Clone)]
pub struct Backtracking<T>
where
    T: Float + Debug,
{
    initial_step: T,
    c1: T,
    rho: T,
    max_iterations: usize,
}

impl<T> Backtracking<T>
where
    T: Float + Debug,
{
    /// Builds a backtracking search from shared line-search options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLineSearchOptions`] unless `0 < c1 < 1`,
    /// `0 < rho < 1`, `initial_step > 0` and the trial budget is positive.
    pub fn new(options: &LineSearchOptions<T>) -> Result<Self> {
        if !(options.c1 > T::zero() && options.c1 < T::one()) {
            return Err(Error::InvalidLineSearchOptions {
                reason: "sufficient-decrease constant c1 must satisfy 0 < c1 < 1",
            });
        }
        if !(options.rho > T::zero() && options.rho < T::one()) {
            return Err(Error::InvalidLineSearchOptions {
                reason: "contraction factor rho must satisfy 0 < rho < 1",
            });
        }
        if !(options.initial_step > T::zero()) {
            return Err(Error::InvalidLineSearchOptions {
                reason: "initial_step must be positive",
            });
        }
        if options.max_iterations == 0 {
            return Err(Error::InvalidLineSearchOptions {
                reason: "max_iterations must be positive",
            });
        }
        Ok(Self {
            initial_step: options.initial_step,
            c1: options.c1,
            rho: options.rho,
            max_iterations: options.max_iterations,
        })
    }
}

impl<T> LineSearch<T> for Backtracking<T>
where
    T: Float + Debug,
{
    fn search(
        &self,
        phi: &mut dyn FnMut(T) -> T,
        phi_dphi: &mut dyn FnMut(T) -> (T, T),
    ) -> Result<T> {
        let (phi_zero, dphi_zero) = phi_dphi(T::zero());
        let mut a = self.initial_step;

        for _ in 0..self.max_iterations {
            if phi(a) <= phi_zero + self.c1 * a * dphi_zero {
                debug!("backtracking accepted step {:?}", a);
                return Ok(a);
            }
            a = self.rho * a;
        }

        Err(Error::LineSearchFailed {
            reason: "sufficient decrease not reached within backtracking budget",
        })
    }
}
