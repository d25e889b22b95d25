//! Visiting-order optimizer.
//!
//! For every ordered pair of points a hybrid selector picks the fastest of
//! walking, the external trip planner and the rail graph. The resulting
//! cost matrix is searched exhaustively for the cheapest visiting order
//! from the origin.

mod config;
mod hybrid;
mod matrix;
#[cfg(test)]
pub(crate) mod mock;
mod order;
mod request;

pub use config::{HybridConfig, OptimizerConfig, PairPenalty};
pub use hybrid::{
    Absence, Candidate, Choice, HybridSelector, RailAccess, TransitPlanner, rail_plan, select,
    walk_plan,
};
pub use matrix::{CostMatrix, MatrixBuilder, MatrixReport};
pub use order::{VisitOrder, best_order, for_each_permutation, path_cost};
pub use request::{
    OptimizeError, OptimizeRequest, Optimized, Optimizer, RequestError, Segment,
};
