use std::fmt::Debug;

use num_traits::Float;

use crate::vector::Vector;

/// An objective function the solver can minimize.
///
/// `gradient` must return the exact gradient at the given point; the solver
/// validates per iteration that the negative gradient is a strict descent
/// direction and aborts when it is not.
pub trait Objective<T, V>
where
    T: Float + Debug,
    V: Vector<T>,
{
    /// Evaluates the objective at `m`.
    fn value(&self, m: &V) -> T;

    /// Computes the gradient of the objective at `m`.
    fn gradient(&self, m: &V) -> V;

    /// Rate of change of the objective at `m` along `direction`.
    ///
    /// The default evaluates the gradient and takes the inner product with
    /// `direction`. Override when a directional derivative is available
    /// more cheaply than a full gradient.
    fn directional_derivative(&self, m: &V, direction: &V) -> T {
        self.gradient(m).inner(direction)
    }
}
