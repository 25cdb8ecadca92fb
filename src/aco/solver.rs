//! Ant colony optimization over open tours.
//!
//! Each iteration a colony of ants builds complete tours from the start
//! position. An ant at location `i` moves to unvisited node `j` with
//! probability proportional to
//!
//! ```text
//! tau(i, j)^alpha * (1 / d(i, j))^beta
//! ```
//!
//! After the colony finishes, every trail evaporates by `rho`, then the
//! iteration-best and global-best tours deposit `1 / (1 + cost)` on their
//! edges.
//!
//! # Reference
//!
//! Dorigo, M. & Gambardella, L.M. (1997). "Ant colony system: a cooperative
//! learning approach to the traveling salesman problem", *IEEE Transactions
//! on Evolutionary Computation* 1(1), 53-66.

use log::debug;
use rand::Rng;
use u_numflow::random::weighted_choose;

use super::pheromone::PheromoneMatrix;
use crate::error::SolveError;
use crate::evaluation::TourEvaluator;
use crate::models::{Algorithm, OptimizationOptions};
use crate::random::rng_from;
use crate::solver::{Deadline, TourSolver};

/// Added to distances before inverting so coincident points stay finite.
const DISTANCE_EPSILON: f64 = 1e-6;

/// Ant colony parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AcoConfig {
    /// Ants per iteration.
    pub colony_size: usize,
    /// Iteration limit.
    pub max_iterations: u32,
    /// Pheromone exponent.
    pub alpha: f64,
    /// Heuristic (inverse distance) exponent.
    pub beta: f64,
    /// Evaporation rate in (0, 1).
    pub evaporation: f64,
    /// Lowest trail level.
    pub pheromone_floor: f64,
    /// Seed; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            colony_size: 20,
            max_iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation: 0.1,
            pheromone_floor: 1e-10,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Applies the request's iteration limit.
    pub fn apply_options(mut self, options: &OptimizationOptions) -> Self {
        self.max_iterations = options.max_iterations_for(Algorithm::AntColony);
        self
    }

    /// Sets the number of ants.
    pub fn with_colony_size(mut self, ants: usize) -> Self {
        self.colony_size = ants;
        self
    }

    /// Sets the iteration limit.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the pheromone and heuristic exponents.
    pub fn with_exponents(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation(mut self, rho: f64) -> Self {
        self.evaporation = rho;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of an ACO run.
#[derive(Debug, Clone)]
pub struct AcoOutcome {
    /// Best ordering across all ants and iterations.
    pub best: Vec<usize>,
    /// Cost of `best`.
    pub best_cost: f64,
    /// Iterations completed.
    pub iterations: u32,
    /// Tours built in total.
    pub ants_built: u64,
}

/// Pheromone-guided probabilistic tour construction.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour::aco::{AcoConfig, AntColonySolver};
/// use u_tour::evaluation::TourEvaluator;
/// use u_tour::models::{Node, OptimizationOptions, Position, VehicleProfile};
/// use u_tour::solver::Deadline;
///
/// let nodes: Vec<Node> = (0..5)
///     .map(|i| Node::new(format!("n{i}"), Position::new(0.0, 0.01 * i as f64)))
///     .collect();
/// let eval = TourEvaluator::new(
///     Position::new(0.0, 0.0),
///     &nodes,
///     &VehicleProfile::default(),
///     &OptimizationOptions::default().with_priority_weight(0.0),
/// );
/// let solver = AntColonySolver::new(AcoConfig::default().with_max_iterations(30).with_seed(42));
/// let outcome = solver.run(&eval, Deadline::after(Duration::from_secs(2)));
/// assert_eq!(outcome.best, vec![0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AntColonySolver {
    config: AcoConfig,
}

impl AntColonySolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: AcoConfig) -> Self {
        Self { config }
    }

    /// The solver's configuration.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs the colony and returns the best tour observed.
    pub fn run(&self, evaluator: &TourEvaluator, deadline: Deadline) -> AcoOutcome {
        let n = evaluator.num_nodes();
        let cfg = &self.config;
        let size = n + 1;
        let mut rng = rng_from(cfg.seed);

        let distances = evaluator.distances();
        let mut heuristic = vec![0.0; size * size];
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    heuristic[i * size + j] =
                        (1.0 / (distances.get(i, j) + DISTANCE_EPSILON)).powf(cfg.beta);
                }
            }
        }

        let mut pheromone =
            PheromoneMatrix::new(size, 1.0 / size as f64, cfg.pheromone_floor);

        let mut best: Vec<usize> = (0..n).collect();
        let mut best_cost = evaluator.cost(&best);
        let mut iterations = 0;
        let mut ants_built = 0u64;

        'iterations: while iterations < cfg.max_iterations && n > 1 {
            let mut iteration_best: Option<(Vec<usize>, f64)> = None;
            for _ in 0..cfg.colony_size.max(1) {
                if deadline.expired() {
                    break 'iterations;
                }
                let tour = construct_tour(n, &pheromone, &heuristic, cfg.alpha, &mut rng);
                let cost = evaluator.cost(&tour);
                ants_built += 1;

                if cost < best_cost {
                    best_cost = cost;
                    best.clone_from(&tour);
                }
                if iteration_best.as_ref().map_or(true, |(_, c)| cost < *c) {
                    iteration_best = Some((tour, cost));
                }
            }
            iterations += 1;

            pheromone.evaporate(cfg.evaporation);
            if let Some((tour, cost)) = iteration_best {
                pheromone.deposit_tour(&tour, 1.0 / (1.0 + cost));
            }
            pheromone.deposit_tour(&best, 1.0 / (1.0 + best_cost));
        }

        debug!("ant_colony: {iterations} iterations, {ants_built} ants, best cost {best_cost:.6}");
        AcoOutcome {
            best,
            best_cost,
            iterations,
            ants_built,
        }
    }
}

impl TourSolver for AntColonySolver {
    fn name(&self) -> &'static str {
        "ant_colony"
    }

    fn solve(
        &self,
        evaluator: &TourEvaluator,
        deadline: Deadline,
    ) -> Result<Vec<usize>, SolveError> {
        let outcome = self.run(evaluator, deadline);
        if outcome.ants_built == 0 && evaluator.num_nodes() > 1 {
            return Err(SolveError::NoTour {
                algorithm: self.name(),
            });
        }
        if !outcome.best_cost.is_finite() {
            return Err(SolveError::NonFiniteCost {
                algorithm: self.name(),
            });
        }
        Ok(outcome.best)
    }
}

/// Builds one ant's tour from the start position (location 0).
fn construct_tour<R: Rng>(
    n: usize,
    pheromone: &PheromoneMatrix,
    heuristic: &[f64],
    alpha: f64,
    rng: &mut R,
) -> Vec<usize> {
    let size = n + 1;
    let mut unvisited: Vec<usize> = (0..n).collect();
    let mut tour = Vec::with_capacity(n);
    let mut weights = Vec::with_capacity(n);
    let mut current = 0;

    while !unvisited.is_empty() {
        weights.clear();
        for &node in &unvisited {
            let loc = node + 1;
            weights.push(pheromone.get(current, loc).powf(alpha) * heuristic[current * size + loc]);
        }
        let total: f64 = weights.iter().sum();

        let weighted = if total.is_finite() {
            weighted_choose(&weights, rng)
        } else {
            None
        };
        let pick = match weighted {
            Some(i) => i,
            None => rng.random_range(0..unvisited.len()),
        };
        let node = unvisited.swap_remove(pick);
        tour.push(node);
        current = node + 1;
    }
    tour
}
