use std::fmt::Debug;

use log::debug;
use num_traits::Float;

use crate::error::{Error, Result};
use crate::line_search::{LineSearch, LineSearchOptions};

/// Strong Wolfe line search.
///
/// Implements the classic bracketing/zoom scheme: the bracketing phase
/// expands the trial step until it brackets an acceptable interval, and the
/// zoom phase bisects that interval until a step satisfies both
///
/// - sufficient decrease: `phi(a) <= phi(0) + c1 * a * phi'(0)`
/// - curvature: `|phi'(a)| <= c2 * |phi'(0)|`
///
/// with `0 < c1 < c2 < 1`.
#[derive(Debug, Clone)]
pub struct StrongWolfe<T>
where
    T: Float + Debug,
{
    initial_step: T,
    c1: T,
    c2: T,
    step_max: T,
    max_iterations: usize,
}

impl<T> StrongWolfe<T>
where
    T: Float + Debug,
{
    /// Builds a strong Wolfe search from shared line-search options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLineSearchOptions`] unless `0 < c1 < c2 < 1`,
    /// `0 < initial_step <= step_max` and the trial budget is positive.
    pub fn new(options: &LineSearchOptions<T>) -> Result<Self> {
        if !(options.c1 > T::zero() && options.c1 < options.c2 && options.c2 < T::one()) {
            return Err(Error::InvalidLineSearchOptions {
                reason: "Wolfe constants must satisfy 0 < c1 < c2 < 1",
            });
        }
        if !(options.initial_step > T::zero() && options.initial_step <= options.step_max) {
            return Err(Error::InvalidLineSearchOptions {
                reason: "initial_step must satisfy 0 < initial_step <= step_max",
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
            c2: options.c2,
            step_max: options.step_max,
            max_iterations: options.max_iterations,
        })
    }

    /// Narrows a bracketing interval `[lo, hi]` down to an acceptable step.
    ///
    /// Invariant on entry: the interval contains a step satisfying the
    /// strong Wolfe conditions, `phi(lo)` is the lowest value seen so far,
    /// and `phi'(lo) * (hi - lo) < 0`.
    fn zoom(
        &self,
        mut lo: T,
        mut hi: T,
        mut phi_lo: T,
        phi_zero: T,
        dphi_zero: T,
        phi_dphi: &mut dyn FnMut(T) -> (T, T),
    ) -> Result<T> {
        let half = T::from(0.5).unwrap();
        for _ in 0..self.max_iterations {
            let a = half * (lo + hi);
            let (phi_a, dphi_a) = phi_dphi(a);

            if phi_a > phi_zero + self.c1 * a * dphi_zero || phi_a >= phi_lo {
                hi = a;
            } else {
                if dphi_a.abs() <= -self.c2 * dphi_zero {
                    debug!("strong Wolfe accepted step {:?} in zoom", a);
                    return Ok(a);
                }
                if dphi_a * (hi - lo) >= T::zero() {
                    hi = lo;
                }
                lo = a;
                phi_lo = phi_a;
            }
        }
        Err(Error::LineSearchFailed {
            reason: "strong Wolfe zoom budget exhausted without an acceptable step",
        })
    }
}

impl<T> LineSearch<T> for StrongWolfe<T>
where
    T: Float + Debug,
{
    fn search(
        &self,
        _phi: &mut dyn FnMut(T) -> T,
        phi_dphi: &mut dyn FnMut(T) -> (T, T),
    ) -> Result<T> {
        let (phi_zero, dphi_zero) = phi_dphi(T::zero());
        if dphi_zero >= T::zero() {
            return Err(Error::LineSearchFailed {
                reason: "initial slope is not negative",
            });
        }

        let two = T::from(2.0).unwrap();
        let mut a_prev = T::zero();
        let mut phi_prev = phi_zero;
        let mut a = self.initial_step;

        for i in 0..self.max_iterations {
            let (phi_a, dphi_a) = phi_dphi(a);

            if phi_a > phi_zero + self.c1 * a * dphi_zero || (i > 0 && phi_a >= phi_prev) {
                return self.zoom(a_prev, a, phi_prev, phi_zero, dphi_zero, phi_dphi);
            }
            if dphi_a.abs() <= -self.c2 * dphi_zero {
                debug!("strong Wolfe accepted step {:?} while bracketing", a);
                return Ok(a);
            }
            if dphi_a >= T::zero() {
                return self.zoom(a, a_prev, phi_a, phi_zero, dphi_zero, phi_dphi);
            }

            a_prev = a;
            phi_prev = phi_a;
            if a >= self.step_max {
                break;
            }
            a = (two * a).min(self.step_max);
        }

        Err(Error::LineSearchFailed {
            reason: "strong Wolfe bracketing budget exhausted without an acceptable step",
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    // phi(a) for f(x) = x^2 restricted along -grad from x = 1:
    // phi(a) = (1 - 2a)^2, phi'(a) = -4 * (1 - 2a).
    fn quadratic_phi(a: f64) -> f64 {
        (1.0 - 2.0 * a).powi(2)
    }

    fn quadratic_phi_dphi(a: f64) -> (f64, f64) {
        (quadratic_phi(a), -4.0 * (1.0 - 2.0 * a))
    }

    #[test]
    fn test_accepts_step_satisfying_both_conditions() {
        let ls = StrongWolfe::new(&LineSearchOptions::default()).unwrap();
        let alpha = ls
            .search(&mut quadratic_phi, &mut quadratic_phi_dphi)
            .unwrap();

        let (phi_zero, dphi_zero) = quadratic_phi_dphi(0.0);
        let (phi_a, dphi_a) = quadratic_phi_dphi(alpha);
        assert!(alpha > 0.0);
        assert!(phi_a <= phi_zero + 1e-4 * alpha * dphi_zero);
        assert!(dphi_a.abs() <= 0.9 * dphi_zero.abs());
    }

    #[test]
    fn test_exact_minimizer_found_on_quadratic() {
        // With c2 = 0.1 the curvature condition forces the step close to
        // the exact minimizer of phi at a = 0.5.
        let options = LineSearchOptions {
            c2: 0.1,
            ..LineSearchOptions::default()
        };
        let ls = StrongWolfe::new(&options).unwrap();
        let alpha = ls
            .search(&mut quadratic_phi, &mut quadratic_phi_dphi)
            .unwrap();
        assert_relative_eq!(alpha, 0.5, max_relative = 0.2);
    }

    #[test]
    fn test_fails_on_unbounded_descent() {
        // phi(a) = -a decreases forever and never satisfies the curvature
        // condition, so bracketing must run out of budget.
        let ls = StrongWolfe::new(&LineSearchOptions::default()).unwrap();
        let err = ls
            .search(&mut |a: f64| -a, &mut |a: f64| (-a, -1.0))
            .unwrap_err();
        assert!(matches!(err, Error::LineSearchFailed { .. }));
    }

    #[test]
    fn test_rejects_bad_wolfe_constants() {
        let options = LineSearchOptions {
            c1: 0.95,
            c2: 0.9,
            ..LineSearchOptions::default()
        };
        assert!(matches!(
            StrongWolfe::new(&options),
            Err(Error::InvalidLineSearchOptions { .. })
        ));
    }
}
