use std::fmt::Debug;

use ndarray::{Array1, LinalgScalar};
use num_traits::Float;

/// Which norm to evaluate on a [`Vector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Norm {
    /// Sum of absolute values.
    L1,
    /// Euclidean norm. This is the norm the solver uses for convergence.
    L2,
    /// Maximum absolute value.
    LInf,
}

/// A point in the search space.
///
/// The solver only ever touches iterates through this interface: it clones
/// before mutating and updates in place with `axpy`, so any vector-like type
/// with an inner product can be optimized over.
pub trait Vector<T>: Clone
where
    T: Float + Debug,
{
    /// In-place scaled accumulation: `self += alpha * other`.
    fn axpy(&mut self, alpha: T, other: &Self);

    /// Inner product with another vector.
    fn inner(&self, other: &Self) -> T;

    /// Norm of the given kind.
    fn norm(&self, kind: Norm) -> T;
}

impl<T> Vector<T> for Vec<T>
where
    T: Float + Debug,
{
    fn axpy(&mut self, alpha: T, other: &Self) {
        debug_assert_eq!(self.len(), other.len());
        self.iter_mut()
            .zip(other.iter())
            .for_each(|(x, &y)| *x = *x + alpha * y);
    }

    fn inner(&self, other: &Self) -> T {
        debug_assert_eq!(self.len(), other.len());
        self.iter()
            .zip(other.iter())
            .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
    }

    fn norm(&self, kind: Norm) -> T {
        match kind {
            Norm::L1 => self.iter().fold(T::zero(), |acc, &x| acc + x.abs()),
            Norm::L2 => self
                .iter()
                .fold(T::zero(), |acc, &x| acc + x * x)
                .sqrt(),
            Norm::LInf => self.iter().fold(T::zero(), |acc, &x| acc.max(x.abs())),
        }
    }
}

impl<T> Vector<T> for Array1<T>
where
    T: Float + Debug + LinalgScalar,
{
    fn axpy(&mut self, alpha: T, other: &Self) {
        self.scaled_add(alpha, other);
    }

    fn inner(&self, other: &Self) -> T {
        self.dot(other)
    }

    fn norm(&self, kind: Norm) -> T {
        match kind {
            Norm::L1 => self.fold(T::zero(), |acc, &x| acc + x.abs()),
            Norm::L2 => self.fold(T::zero(), |acc, &x| acc + x * x).sqrt(),
            Norm::LInf => self.fold(T::zero(), |acc, &x| acc.max(x.abs())),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn test_vec_axpy() {
        let mut x = vec![1.0, 2.0, 3.0];
        let y = vec![1.0, -1.0, 0.5];
        x.axpy(2.0, &y);
        assert_relative_eq!(x[0], 3.0);
        assert_relative_eq!(x[1], 0.0);
        assert_relative_eq!(x[2], 4.0);
    }

    #[test]
    fn test_vec_inner_and_norms() {
        let x = vec![3.0, -4.0];
        let y = vec![1.0, 1.0];
        assert_relative_eq!(x.inner(&y), -1.0);
        assert_relative_eq!(x.norm(Norm::L1), 7.0);
        assert_relative_eq!(x.norm(Norm::L2), 5.0);
        assert_relative_eq!(x.norm(Norm::LInf), 4.0);
    }

    #[test]
    fn test_array1_matches_vec() {
        let mut a = array![1.0, 2.0];
        let b = array![0.5, -0.5];
        a.axpy(-2.0, &b);
        assert_relative_eq!(a[0], 0.0);
        assert_relative_eq!(a[1], 3.0);
        assert_relative_eq!(a.inner(&b), -1.5);
        assert_relative_eq!(array![3.0, -4.0].norm(Norm::L2), 5.0);
    }
}
