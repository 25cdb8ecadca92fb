//! Genetic algorithm for tour ordering.
//!
//! - [`Chromosome`] — Permutation of node indices, cost as its fitness
//! - [`TourGaProblem`] — [`u_metaheur::ga::GaProblem`] over tour permutations
//! - [`GeneticSolver`] — Elitist generational GA with a nearest-neighbor seed

mod chromosome;
mod problem;
mod solver;

pub use chromosome::Chromosome;
pub use problem::TourGaProblem;
pub use solver::{GaConfig, GaOutcome, GeneticSolver};
