use std::fmt::Debug;

use num_traits::Float;

use crate::error::{Error, Result};
use crate::line_search::{LineSearch, LineSearchOptions};

/// Fixed step length.
///
/// Returns the configured step unconditionally, without evaluating the
/// restriction. Useful for problems with a known Lipschitz constant and for
/// testing, since it never fails.
#[derive(Debug, Clone)]
pub struct FixedStep<T>
where
    T: Float + Debug,
{
    step: T,
}

impl<T> FixedStep<T>
where
    T: Float + Debug,
{
    /// Builds a fixed-step strategy from shared line-search options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLineSearchOptions`] unless `step` is finite
    /// and positive.
    pub fn new(options: &LineSearchOptions<T>) -> Result<Self> {
        if !(options.step.is_finite() && options.step > T::zero()) {
            return Err(Error::InvalidLineSearchOptions {
                reason: "fixed step must be finite and positive",
            });
        }
        Ok(Self { step: options.step })
    }
}

impl<T> LineSearch<T> for FixedStep<T>
where
    T: Float + Debug,
{
    fn search(
        &self,
        _phi: &mut dyn FnMut(T) -> T,
        _phi_dphi: &mut dyn FnMut(T) -> (T, T),
    ) -> Result<T> {
        Ok(self.step)
    }
}
