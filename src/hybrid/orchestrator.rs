//! Runs several solvers under one deadline and keeps the cheapest tour.

use log::{info, warn};
use rayon::prelude::*;

use crate::aco::AcoConfig;
use crate::constructive::NearestNeighborSolver;
use crate::evaluation::TourEvaluator;
use crate::ga::GaConfig;
use crate::models::Algorithm;
use crate::solver::{run_contained, Deadline, SolverKind, SolverRun};

/// Share of the post-greedy window given to the GA when solvers run one
/// after the other. ACO gets whatever is left when the GA returns.
pub const SEQUENTIAL_GA_SHARE: f64 = 0.5;

/// Name reported when every solver failed and the input order is returned.
pub const INPUT_ORDER: &str = "input_order";

/// The tour chosen among all solver runs.
#[derive(Debug, Clone)]
pub struct HybridOutcome {
    /// Algorithm that produced `order`, `None` if every solver failed.
    pub winner: Option<Algorithm>,
    /// Winning ordering of node indices.
    pub order: Vec<usize>,
    /// Cost of `order`.
    pub cost: f64,
    /// Every run, in execution order.
    pub runs: Vec<SolverRun>,
}

impl HybridOutcome {
    /// Wire name of the winner.
    pub fn winner_name(&self) -> &'static str {
        self.winner.map_or(INPUT_ORDER, |a| a.name())
    }
}

/// Multi-start orchestration of the greedy, genetic and ant colony solvers.
///
/// Nearest neighbor always runs first, so a valid tour exists before any
/// expensive search starts. The GA and ACO then share the remaining window,
/// concurrently by default. A failing solver never aborts the call: its run
/// is recorded and the remaining candidates compete.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour::aco::AcoConfig;
/// use u_tour::evaluation::TourEvaluator;
/// use u_tour::ga::GaConfig;
/// use u_tour::hybrid::HybridOrchestrator;
/// use u_tour::models::{Node, OptimizationOptions, Position, VehicleProfile};
/// use u_tour::solver::Deadline;
///
/// let nodes: Vec<Node> = (0..8)
///     .map(|i| Node::new(format!("n{i}"), Position::new(0.01 * (i % 3) as f64, 0.01 * i as f64)))
///     .collect();
/// let eval = TourEvaluator::new(
///     Position::new(0.0, 0.0),
///     &nodes,
///     &VehicleProfile::default(),
///     &OptimizationOptions::default(),
/// );
/// let hybrid = HybridOrchestrator::new(
///     GaConfig::default().with_max_generations(20).with_seed(1),
///     AcoConfig::default().with_max_iterations(10).with_seed(2),
/// );
/// let outcome = hybrid.run(&eval, Deadline::after(Duration::from_secs(5)));
/// assert_eq!(outcome.runs.len(), 3);
/// for run in &outcome.runs {
///     let (_, cost) = run.outcome.as_ref().unwrap();
///     assert!(outcome.cost <= *cost);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HybridOrchestrator {
    ga: GaConfig,
    aco: AcoConfig,
    parallel: bool,
}

impl HybridOrchestrator {
    /// Creates an orchestrator running GA and ACO concurrently.
    ///
    /// On a rayon pool with a single thread the sequential split is used
    /// even when parallel execution is requested.
    pub fn new(ga: GaConfig, aco: AcoConfig) -> Self {
        Self {
            ga,
            aco,
            parallel: true,
        }
    }

    /// Chooses between concurrent and sequential execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs all solvers and returns the cheapest tour.
    pub fn run(&self, evaluator: &TourEvaluator, deadline: Deadline) -> HybridOutcome {
        let mut runs = vec![run_greedy(evaluator, deadline)];

        let searches = vec![
            SolverKind::genetic(self.ga.clone()),
            SolverKind::ant_colony(self.aco.clone()),
        ];
        if self.parallel && rayon::current_num_threads() > 1 {
            let parallel_runs: Vec<SolverRun> = searches
                .par_iter()
                .map(|solver| run_contained(solver, solver.algorithm(), evaluator, deadline))
                .collect();
            runs.extend(parallel_runs);
        } else {
            // A single-thread pool would run these back to back anyway, so
            // split the window instead of letting GA starve ACO.
            // ACO keeps the full deadline, so it also gets whatever GA left.
            let slices = [deadline.split(SEQUENTIAL_GA_SHARE), deadline];
            for (solver, slice) in searches.iter().zip(slices) {
                runs.push(run_contained(solver, solver.algorithm(), evaluator, slice));
            }
        }

        select_best(evaluator, runs)
    }

    /// Runs one algorithm, falling back to nearest neighbor if it fails.
    pub fn run_single(
        &self,
        algorithm: Algorithm,
        evaluator: &TourEvaluator,
        deadline: Deadline,
    ) -> HybridOutcome {
        let solver = match algorithm {
            Algorithm::Hybrid => return self.run(evaluator, deadline),
            Algorithm::NearestNeighbor => {
                return select_best(evaluator, vec![run_greedy(evaluator, deadline)]);
            }
            Algorithm::Genetic => SolverKind::genetic(self.ga.clone()),
            Algorithm::AntColony => SolverKind::ant_colony(self.aco.clone()),
        };

        let run = run_contained(&solver, algorithm, evaluator, deadline);
        let mut runs = vec![run];
        if runs[0].outcome.is_err() {
            warn!("{} failed, falling back to nearest_neighbor", algorithm.name());
            runs.push(run_greedy(evaluator, deadline));
        }
        select_best(evaluator, runs)
    }
}

fn run_greedy(evaluator: &TourEvaluator, deadline: Deadline) -> SolverRun {
    let greedy = SolverKind::NearestNeighbor(NearestNeighborSolver);
    run_contained(&greedy, Algorithm::NearestNeighbor, evaluator, deadline)
}

/// Picks the minimum-cost successful run; earlier runs win ties.
///
/// Falls back to the input order when nothing succeeded, so a usable tour
/// is always returned.
pub fn select_best(evaluator: &TourEvaluator, runs: Vec<SolverRun>) -> HybridOutcome {
    let mut winner: Option<(Algorithm, &[usize], f64)> = None;
    for run in &runs {
        match &run.outcome {
            Ok((order, cost)) => {
                if winner.map_or(true, |(_, _, best)| *cost < best) {
                    winner = Some((run.algorithm, order.as_slice(), *cost));
                }
            }
            Err(err) => warn!("{} contained: {err}", run.algorithm.name()),
        }
    }

    let (winner, order, cost) = match winner {
        Some((algorithm, order, cost)) => (Some(algorithm), order.to_vec(), cost),
        None => {
            warn!("every solver failed, returning the input order");
            let order: Vec<usize> = (0..evaluator.num_nodes()).collect();
            let cost = evaluator.cost(&order);
            (None, order, cost)
        }
    };

    let outcome = HybridOutcome {
        winner,
        order,
        cost,
        runs,
    };
    info!(
        "selected {} with cost {:.6} out of {} run(s)",
        outcome.winner_name(),
        outcome.cost,
        outcome.runs.len()
    );
    outcome
}
