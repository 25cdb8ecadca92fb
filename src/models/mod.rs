//! Domain model types for single-vehicle tour optimization.
//!
//! Provides the request side (nodes, vehicle profile, options) and the
//! result side (solutions, candidates, savings). Everything here is created
//! fresh per optimization call.

mod node;
mod options;
mod request;
mod solution;
mod vehicle;

pub use node::{Node, Position, DEFAULT_PRIORITY};
pub use options::{Algorithm, OptimizationOptions};
pub use request::OptimizationRequest;
pub use solution::{
    Candidate, MetricSavings, OptimizationResult, ResultMetadata, Savings, Solution,
};
pub use vehicle::{FuelType, VehicleProfile};
