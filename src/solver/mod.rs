//! Uniform solver contract.
//!
//! Every algorithm implements [`TourSolver`]; [`SolverKind`] is the tagged
//! variant the orchestrator dispatches on, so selecting a solver is a
//! `match` rather than a trait object.

mod deadline;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use log::debug;

use crate::aco::{AcoConfig, AntColonySolver};
use crate::constructive::NearestNeighborSolver;
use crate::error::SolveError;
use crate::evaluation::TourEvaluator;
use crate::ga::{GaConfig, GeneticSolver};
use crate::models::Algorithm;

pub use deadline::Deadline;

/// An algorithm that orders every node exactly once.
pub trait TourSolver {
    /// Wire name of the algorithm.
    fn name(&self) -> &'static str;

    /// Returns the best ordering of node indices found before `deadline`.
    ///
    /// Running out of time is not an error; implementations return their
    /// best-so-far tour.
    fn solve(&self, evaluator: &TourEvaluator, deadline: Deadline)
        -> Result<Vec<usize>, SolveError>;
}

/// The concrete solvers an optimization call can run.
#[derive(Debug, Clone)]
pub enum SolverKind {
    /// Priority-adjusted nearest neighbor.
    NearestNeighbor(NearestNeighborSolver),
    /// Genetic algorithm.
    Genetic(GeneticSolver),
    /// Ant colony optimization.
    AntColony(AntColonySolver),
}

impl SolverKind {
    /// Genetic solver with the given configuration.
    pub fn genetic(config: GaConfig) -> Self {
        Self::Genetic(GeneticSolver::new(config))
    }

    /// Ant colony solver with the given configuration.
    pub fn ant_colony(config: AcoConfig) -> Self {
        Self::AntColony(AntColonySolver::new(config))
    }

    /// The algorithm this solver implements.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            SolverKind::NearestNeighbor(_) => Algorithm::NearestNeighbor,
            SolverKind::Genetic(_) => Algorithm::Genetic,
            SolverKind::AntColony(_) => Algorithm::AntColony,
        }
    }
}

impl TourSolver for SolverKind {
    fn name(&self) -> &'static str {
        match self {
            SolverKind::NearestNeighbor(s) => s.name(),
            SolverKind::Genetic(s) => s.name(),
            SolverKind::AntColony(s) => s.name(),
        }
    }

    fn solve(
        &self,
        evaluator: &TourEvaluator,
        deadline: Deadline,
    ) -> Result<Vec<usize>, SolveError> {
        match self {
            SolverKind::NearestNeighbor(s) => s.solve(evaluator, deadline),
            SolverKind::Genetic(s) => s.solve(evaluator, deadline),
            SolverKind::AntColony(s) => s.solve(evaluator, deadline),
        }
    }
}

/// Outcome of one contained solver run.
#[derive(Debug, Clone)]
pub struct SolverRun {
    /// Which algorithm ran.
    pub algorithm: Algorithm,
    /// The verified ordering and its cost, or why the run failed.
    pub outcome: Result<(Vec<usize>, f64), SolveError>,
    /// Wall-clock time the run took.
    pub elapsed: Duration,
}

/// Runs a solver, converting panics, malformed tours and non-finite costs
/// into [`SolveError`]s.
pub fn run_contained<S: TourSolver>(
    solver: &S,
    algorithm: Algorithm,
    evaluator: &TourEvaluator,
    deadline: Deadline,
) -> SolverRun {
    let started = Instant::now();
    let name = solver.name();
    let outcome = catch_unwind(AssertUnwindSafe(|| solver.solve(evaluator, deadline)))
        .unwrap_or_else(|payload| {
            Err(SolveError::Panicked {
                algorithm: name,
                message: panic_message(payload.as_ref()),
            })
        })
        .and_then(|order| {
            verify_permutation(&order, evaluator.num_nodes()).map_err(|reason| {
                SolveError::InvalidTour {
                    algorithm: name,
                    reason,
                }
            })?;
            let cost = evaluator.cost(&order);
            if !cost.is_finite() {
                return Err(SolveError::NonFiniteCost { algorithm: name });
            }
            Ok((order, cost))
        });

    let elapsed = started.elapsed();
    debug!(
        "{name} finished in {:.1} ms: {}",
        elapsed.as_secs_f64() * 1000.0,
        match &outcome {
            Ok((_, cost)) => format!("cost {cost:.6}"),
            Err(e) => format!("failed ({e})"),
        }
    );
    SolverRun {
        algorithm,
        outcome,
        elapsed,
    }
}

/// Checks that `order` visits each of `0..n` exactly once.
///
/// # Examples
///
/// ```
/// use u_tour::solver::verify_permutation;
///
/// assert!(verify_permutation(&[2, 0, 1], 3).is_ok());
/// assert!(verify_permutation(&[0, 0, 1], 3).is_err());
/// assert!(verify_permutation(&[0, 1], 3).is_err());
/// ```
pub fn verify_permutation(order: &[usize], n: usize) -> Result<(), String> {
    if order.len() != n {
        return Err(format!("expected {n} stops, got {}", order.len()));
    }
    let mut seen = vec![false; n];
    for &i in order {
        match seen.get_mut(i) {
            None => return Err(format!("node index {i} out of range")),
            Some(true) => return Err(format!("node index {i} visited twice")),
            Some(flag) => *flag = true,
        }
    }
    Ok(())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
