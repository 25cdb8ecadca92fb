//! # u-tour
//!
//! Single-vehicle tour optimization: orders a set of geographic stops
//! starting from a fixed position, trading off distance, fuel and stop
//! priority under a wall-clock budget.
//!
//! ## Modules
//!
//! - [`models`] — Request, vehicle, node and result types
//! - [`distance`] — Haversine distance, per-leg time/fuel and the distance matrix
//! - [`evaluation`] — Weighted tour cost shared by every solver
//! - [`constructive`] — Priority-adjusted nearest neighbor
//! - [`ga`] — Genetic algorithm with order crossover
//! - [`aco`] — Ant colony optimization
//! - [`solver`] — Solver contract, deadlines and failure containment
//! - [`hybrid`] — Multi-start orchestration of all solvers
//! - [`savings`] — Savings against the input order
//! - [`engine`] — Validation, dispatch and result assembly
//!
//! ## Example
//!
//! ```
//! use u_tour::models::{Node, OptimizationRequest, Position};
//!
//! let request = OptimizationRequest::new(
//!     Position::new(29.0, 41.0),
//!     vec![
//!         Node::new("b", Position::new(29.02, 41.0)),
//!         Node::new("a", Position::new(29.01, 41.0)).with_priority(90),
//!     ],
//! );
//! let result = u_tour::optimize(&request).unwrap();
//! assert_eq!(result.best.len(), 2);
//! assert!(result.best.efficiency > 0.0);
//! ```

pub mod aco;
pub mod constructive;
pub mod distance;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod hybrid;
pub mod models;
pub mod random;
pub mod savings;
pub mod solver;

pub use engine::{optimize, Engine, EngineConfig};
pub use error::{SolveError, ValidationError};
