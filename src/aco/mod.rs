//! Ant colony optimization for tour ordering.
//!
//! - [`PheromoneMatrix`] — Symmetric, floored trail levels
//! - [`AntColonySolver`] — Colony construction with evaporation and
//!   best-tour reinforcement

mod pheromone;
mod solver;

pub use pheromone::PheromoneMatrix;
pub use solver::{AcoConfig, AcoOutcome, AntColonySolver};
