pub mod error;
pub mod line_search;
pub mod objective;
pub mod steepest_descent;
pub mod vector;

pub use error::{Error, Result};
pub use line_search::{LineSearch, LineSearchMethod, LineSearchOptions};
pub use objective::Objective;
pub use steepest_descent::{
    Hooks, Solution, SteepestDescent, SteepestDescentConfig, TerminationReason,
};
pub use vector::{Norm, Vector};
