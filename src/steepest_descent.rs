use std::fmt::Debug;

use log::info;
use num_traits::{Float, ToPrimitive};

use crate::error::{Error, Result};
use crate::line_search::{LineSearch, LineSearchMethod, LineSearchOptions};
use crate::objective::Objective;
use crate::vector::{Norm, Vector};

/// Configuration options for the steepest-descent solver.
///
/// At least one of `tol`, `gtol` and `maxiter` must be set, or the loop
/// could never terminate; construction rejects a configuration with all
/// three unset.
#[derive(Debug, Clone)]
pub struct SteepestDescentConfig<T>
where
    T: Float + Debug,
{
    /// Functional-change stopping tolerance: stop once `|j - j_prev| <= tol`.
    /// `None` disables the criterion.
    pub tol: Option<T>,
    /// Gradient-norm stopping tolerance: stop once `||grad j|| <= gtol`.
    /// `None` disables the criterion.
    pub gtol: Option<T>,
    /// Maximum number of iterations. `None` disables the criterion.
    pub maxiter: Option<usize>,
    /// Emit per-iteration progress and the termination reason through the
    /// `log` facade.
    pub disp: bool,
    /// Line-search strategy used to pick step lengths.
    pub line_search: LineSearchMethod,
    /// Options passed opaquely to the chosen line-search strategy.
    pub line_search_options: LineSearchOptions<T>,
}

impl<T> Default for SteepestDescentConfig<T>
where
    T: Float + Debug,
{
    fn default() -> Self {
        Self {
            tol: None,
            gtol: Some(T::from(1e-4).unwrap()),
            maxiter: Some(200),
            disp: true,
            line_search: LineSearchMethod::default(),
            line_search_options: LineSearchOptions::default(),
        }
    }
}

/// Optional callbacks fired by the solver during iteration.
///
/// All three slots run synchronously on the solver's thread; the solver
/// remains the sole mutator of its iterate state while they run.
pub struct Hooks<T, V>
where
    T: Float + Debug,
    V: Vector<T>,
{
    /// Called with `(j, grad)` at the start of every loop pass, including
    /// the final pass that only checks convergence.
    pub before_iteration: Option<Box<dyn FnMut(T, &V)>>,
    /// Called with `(j, grad)` after every completed iteration, where `j`
    /// is the new objective value and `grad` the gradient evaluated at the
    /// start of that iteration.
    pub after_iteration: Option<Box<dyn FnMut(T, &V)>>,
    /// Called with `(j, direction, iterate)` after every completed
    /// iteration, before `after_iteration`.
    pub callback: Option<Box<dyn FnMut(T, &V, &V)>>,
}

impl<T, V> Default for Hooks<T, V>
where
    T: Float + Debug,
    V: Vector<T>,
{
    fn default() -> Self {
        Self {
            before_iteration: None,
            after_iteration: None,
            callback: None,
        }
    }
}

/// Which stopping criterion ended the iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// `||grad j||` dropped to `gtol` or below.
    GradientTolerance,
    /// `|j - j_prev|` dropped to `tol` or below.
    FunctionalTolerance,
    /// The iteration budget was spent.
    IterationLimit,
}

/// Result of a steepest-descent run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T, V>
where
    T: Float + Debug,
    V: Vector<T>,
{
    /// The optimized iterate.
    pub optimal_point: V,
    /// The objective value at the optimized iterate.
    pub optimal_value: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// The criterion that stopped the iteration.
    pub reason: TerminationReason,
}

/// Steepest-descent solver.
///
/// Each iteration evaluates the objective and its gradient, checks the
/// configured stopping criteria, validates that the negative gradient is a
/// strict descent direction, delegates the step-length choice to the
/// configured line search over the one-dimensional restriction of the
/// objective, and commits the step.
pub struct SteepestDescent<T, V>
where
    T: Float + Debug,
    V: Vector<T>,
{
    config: SteepestDescentConfig<T>,
    line_search: Box<dyn LineSearch<T>>,
    hooks: Hooks<T, V>,
}

impl<T, V> Debug for SteepestDescent<T, V>
where
    T: Float + Debug,
    V: Vector<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteepestDescent")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T, V> SteepestDescent<T, V>
where
    T: Float + Debug + 'static,
    V: Vector<T>,
{
    /// Creates a solver with no hooks registered.
    ///
    /// # Errors
    ///
    /// Fails eagerly on an invalid configuration; see [`Self::with_hooks`].
    pub fn new(config: SteepestDescentConfig<T>) -> Result<Self> {
        Self::with_hooks(config, Hooks::default())
    }

    /// Creates a solver with the given hooks.
    ///
    /// The line-search strategy is resolved here, so a bad strategy setup
    /// fails at construction rather than at solve time.
    ///
    /// # Errors
    ///
    /// * [`Error::NoStoppingCriterion`] if `tol`, `gtol` and `maxiter` are
    ///   all unset.
    /// * [`Error::InvalidTolerance`] if a set tolerance is not finite and
    ///   positive.
    /// * [`Error::InvalidLineSearchOptions`] if the line-search options
    ///   violate the chosen strategy's constraints.
    pub fn with_hooks(config: SteepestDescentConfig<T>, hooks: Hooks<T, V>) -> Result<Self> {
        if config.tol.is_none() && config.gtol.is_none() && config.maxiter.is_none() {
            return Err(Error::NoStoppingCriterion);
        }
        check_tolerance("tol", config.tol)?;
        check_tolerance("gtol", config.gtol)?;
        let line_search = config.line_search.resolve(&config.line_search_options)?;
        Ok(Self {
            config,
            line_search,
            hooks,
        })
    }

    /// Minimizes `objective` starting from `initial`.
    ///
    /// The initial iterate is cloned; the caller's value is never mutated.
    ///
    /// # Errors
    ///
    /// * [`Error::NotADescentDirection`] if the directional derivative
    ///   along the negative gradient is non-negative. This signals a broken
    ///   gradient implementation and aborts immediately.
    /// * [`Error::LineSearchFailed`] propagated verbatim when the line
    ///   search cannot find an acceptable step; the solver does not retry.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::{Objective, SteepestDescent, SteepestDescentConfig};
    ///
    /// struct Quadratic;
    ///
    /// impl Objective<f64, Vec<f64>> for Quadratic {
    ///     fn value(&self, m: &Vec<f64>) -> f64 {
    ///         m.iter().map(|x| x * x).sum()
    ///     }
    ///
    ///     fn gradient(&self, m: &Vec<f64>) -> Vec<f64> {
    ///         m.iter().map(|x| 2.0 * x).collect()
    ///     }
    /// }
    ///
    /// let config = SteepestDescentConfig::default();
    /// let mut solver = SteepestDescent::new(config).unwrap();
    /// let solution = solver.solve(&Quadratic, &vec![1.0, 1.0]).unwrap();
    ///
    /// assert!(solution.optimal_value < 1e-6);
    /// ```
    pub fn solve<O>(&mut self, objective: &O, initial: &V) -> Result<Solution<T, V>>
    where
        O: Objective<T, V>,
    {
        let mut j: Option<T> = None;
        let mut j_prev: Option<T> = None;
        let mut m = initial.clone();
        let mut m_prev = m.clone();
        let mut it: usize = 0;

        let minus_two = -(T::one() + T::one());

        let (j_final, grad_norm_final) = loop {
            // Evaluate the functional at the current iterate; the value is
            // already known after a committed step.
            let j_cur = match j {
                Some(value) => value,
                None => {
                    let value = objective.value(&m);
                    j = Some(value);
                    value
                }
            };
            let grad = objective.gradient(&m);
            let grad_norm = grad.norm(Norm::L2);

            if let Some(hook) = self.hooks.before_iteration.as_mut() {
                hook(j_cur, &grad);
            }

            if self.config.disp {
                info!("Iteration {}\tJ = {:?}\t|dJ| = {:?}", it, j_cur, grad_norm);
            }

            if self.is_converged(j_cur, j_prev, grad_norm, it) {
                break (j_cur, grad_norm);
            }

            // direction = -grad
            let mut direction = grad.clone();
            direction.axpy(minus_two, &grad);

            let djs = objective.directional_derivative(&m, &direction);
            if djs >= T::zero() {
                return Err(Error::NotADescentDirection {
                    slope: to_f64(djs),
                    gradient_norm: to_f64(grad_norm),
                });
            }

            // One-dimensional restriction of the objective along the
            // descent direction, anchored at the committed iterate.
            let alpha = {
                let mut phi = |a: T| {
                    let mut trial = m_prev.clone();
                    trial.axpy(-a, &grad);
                    objective.value(&trial)
                };
                let mut phi_dphi = |a: T| {
                    let mut trial = m_prev.clone();
                    trial.axpy(-a, &grad);
                    let value = objective.value(&trial);
                    let slope = objective.directional_derivative(&trial, &direction);
                    (value, slope)
                };
                self.line_search.search(&mut phi, &mut phi_dphi)?
            };

            // Commit the accepted step.
            m = m_prev.clone();
            m.axpy(-alpha, &grad);
            let j_new = objective.value(&m);

            m_prev = m.clone();
            j_prev = Some(j_cur);
            j = Some(j_new);
            it += 1;

            if let Some(callback) = self.hooks.callback.as_mut() {
                callback(j_new, &direction, &m);
            }
            if let Some(hook) = self.hooks.after_iteration.as_mut() {
                hook(j_new, &grad);
            }
        };

        let reason = self.termination_reason(j_final, j_prev, grad_norm_final);

        if self.config.disp {
            match reason {
                TerminationReason::GradientTolerance => {
                    info!("Tolerance reached: |dJ| <= gtol in {} iterations.", it);
                }
                TerminationReason::FunctionalTolerance => {
                    info!("Tolerance reached: |delta J| <= tol in {} iterations.", it);
                }
                TerminationReason::IterationLimit => {
                    info!("Maximum number of iterations reached.");
                }
            }
        }

        Ok(Solution {
            optimal_point: m,
            optimal_value: j_final,
            iterations: it,
            reason,
        })
    }

    /// The loop continues only while every enabled criterion says
    /// "not converged"; a disabled criterion never stops it.
    fn is_converged(&self, j: T, j_prev: Option<T>, grad_norm: T, it: usize) -> bool {
        let grad_keeps_going = match self.config.gtol {
            Some(gtol) => grad_norm > gtol,
            None => true,
        };
        let tol_keeps_going = match (self.config.tol, j_prev) {
            (Some(tol), Some(prev)) => (j - prev).abs() > tol,
            _ => true,
        };
        let iter_keeps_going = match self.config.maxiter {
            Some(maxiter) => it < maxiter,
            None => true,
        };
        !(grad_keeps_going && tol_keeps_going && iter_keeps_going)
    }

    /// Re-derives the stopping reason from the final state. When several
    /// criteria hold at once, the gradient criterion wins, then the
    /// functional one; the iteration budget is the fallback.
    fn termination_reason(&self, j: T, j_prev: Option<T>, grad_norm: T) -> TerminationReason {
        if let Some(gtol) = self.config.gtol {
            if grad_norm <= gtol {
                return TerminationReason::GradientTolerance;
            }
        }
        if let (Some(tol), Some(prev)) = (self.config.tol, j_prev) {
            if (j - prev).abs() <= tol {
                return TerminationReason::FunctionalTolerance;
            }
        }
        TerminationReason::IterationLimit
    }
}

fn check_tolerance<T>(name: &'static str, tolerance: Option<T>) -> Result<()>
where
    T: Float + Debug,
{
    match tolerance {
        Some(value) if !(value.is_finite() && value > T::zero()) => Err(Error::InvalidTolerance {
            name,
            value: to_f64(value),
        }),
        _ => Ok(()),
    }
}

fn to_f64<T>(value: T) -> f64
where
    T: Float,
{
    value.to_f64().unwrap_or(f64::NAN)
}
