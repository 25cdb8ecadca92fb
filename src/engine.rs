//! Optimization entry point.
//!
//! [`Engine::optimize`] validates a request, builds the shared
//! [`TourEvaluator`], dispatches to the requested algorithm and assembles
//! the [`OptimizationResult`] with savings against the input order.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::aco::AcoConfig;
use crate::error::ValidationError;
use crate::evaluation::TourEvaluator;
use crate::ga::GaConfig;
use crate::hybrid::{HybridOrchestrator, HybridOutcome};
use crate::models::{
    Algorithm, Candidate, OptimizationRequest, OptimizationResult, ResultMetadata,
};
use crate::random::derive_seed;
use crate::savings::SavingsCalculator;
use crate::solver::Deadline;

const GA_STREAM: u64 = 1;
const ACO_STREAM: u64 = 2;

/// Engine-level configuration that is not part of a request.
///
/// # Examples
///
/// ```
/// use u_tour::EngineConfig;
///
/// let config = EngineConfig::default().with_seed(42).with_parallel(false);
/// assert_eq!(config.seed, Some(42));
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Master seed; each solver derives its own stream from it.
    pub seed: Option<u64>,
    /// Run GA and ACO concurrently in hybrid mode.
    pub parallel: bool,
    /// GA parameters not carried by requests.
    pub ga: GaConfig,
    /// ACO parameters not carried by requests.
    pub aco: AcoConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: true,
            ga: GaConfig::default(),
            aco: AcoConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Fixes the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Chooses concurrent or sequential hybrid execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replaces the GA parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Replaces the ACO parameters.
    pub fn with_aco(mut self, aco: AcoConfig) -> Self {
        self.aco = aco;
        self
    }
}

/// Tour optimization engine.
///
/// Stateless between calls; one engine can serve many requests, including
/// concurrently.
///
/// # Examples
///
/// ```
/// use u_tour::models::{Algorithm, Node, OptimizationOptions, OptimizationRequest, Position};
/// use u_tour::{Engine, EngineConfig};
///
/// let nodes = vec![
///     Node::new("far", Position::new(0.03, 0.0)),
///     Node::new("near", Position::new(0.01, 0.0)),
/// ];
/// let request = OptimizationRequest::new(Position::new(0.0, 0.0), nodes)
///     .with_options(OptimizationOptions::default().with_algorithm(Algorithm::NearestNeighbor));
///
/// let engine = Engine::with_config(EngineConfig::default().with_seed(1));
/// let result = engine.optimize(&request).unwrap();
/// assert_eq!(result.best.ids(), vec!["near", "far"]);
/// assert_eq!(result.metadata.algorithm, "nearest_neighbor");
/// assert!(result.distance_savings() > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Engine with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates and optimizes one request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the request is rejected. Solver
    /// failures are contained and never surface here.
    pub fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, ValidationError> {
        request.validate()?;
        Ok(self.optimize_validated(request))
    }

    fn optimize_validated(&self, request: &OptimizationRequest) -> OptimizationResult {
        let started = Instant::now();
        let options = &request.options;
        let deadline = Deadline::at(started + Duration::from_millis(options.time_limit_ms));

        let evaluator = TourEvaluator::new(
            request.start_position,
            &request.nodes,
            &request.vehicle,
            options,
        );

        let mut ga = self.config.ga.clone().apply_options(options);
        ga.seed = derive_seed(self.config.seed, GA_STREAM).or(ga.seed);
        let mut aco = self.config.aco.clone().apply_options(options);
        aco.seed = derive_seed(self.config.seed, ACO_STREAM).or(aco.seed);

        let mut iteration_limits = BTreeMap::new();
        if matches!(options.algorithm, Algorithm::Hybrid | Algorithm::Genetic) {
            iteration_limits.insert(Algorithm::Genetic.name().to_string(), ga.max_generations);
        }
        if matches!(options.algorithm, Algorithm::Hybrid | Algorithm::AntColony) {
            iteration_limits.insert(Algorithm::AntColony.name().to_string(), aco.max_iterations);
        }

        let orchestrator = HybridOrchestrator::new(ga, aco).with_parallel(self.config.parallel);
        let outcome = match options.algorithm {
            Algorithm::Hybrid => orchestrator.run(&evaluator, deadline),
            single => orchestrator.run_single(single, &evaluator, deadline),
        };

        let result = self.assemble(request, &evaluator, outcome, iteration_limits, started);
        if result.metadata.exceeds_fuel_capacity {
            warn!(
                "tour needs {:.2} fuel units, vehicle `{}` carries {:.2}",
                result.best.fuel_cost,
                request.vehicle.id(),
                request.vehicle.fuel_capacity()
            );
        }
        info!(
            "optimized {} nodes with {} in {:.1} ms, {:.1}% distance saved",
            request.nodes.len(),
            result.metadata.algorithm,
            result.metadata.optimization_time_ms,
            result.distance_savings_percent()
        );
        result
    }

    fn assemble(
        &self,
        request: &OptimizationRequest,
        evaluator: &TourEvaluator,
        outcome: HybridOutcome,
        iteration_limits: BTreeMap<String, u32>,
        started: Instant,
    ) -> OptimizationResult {
        let options = &request.options;
        let input_order: Vec<usize> = (0..request.nodes.len()).collect();
        let calculator = SavingsCalculator::new(evaluator.metrics(&input_order));
        let savings = calculator.compare(&evaluator.metrics(&outcome.order));

        let best = evaluator.to_solution(&request.nodes, &outcome.order);
        let capacity = request.vehicle.fuel_capacity();
        let exceeds_fuel_capacity = capacity > 0.0 && best.fuel_cost > capacity;

        let candidates = outcome
            .runs
            .iter()
            .map(|run| match &run.outcome {
                Ok((order, cost)) => Candidate {
                    algorithm: run.algorithm.name().to_string(),
                    cost: Some(*cost),
                    elapsed_ms: millis(run.elapsed),
                    solution: Some(evaluator.to_solution(&request.nodes, order)),
                    error: None,
                },
                Err(err) => Candidate {
                    algorithm: run.algorithm.name().to_string(),
                    cost: None,
                    elapsed_ms: millis(run.elapsed),
                    solution: None,
                    error: Some(err.to_string()),
                },
            })
            .collect();

        let pattern = match (options.algorithm, outcome.winner) {
            (Algorithm::Hybrid, _) => Algorithm::Hybrid.pattern(),
            (_, Some(winner)) => winner.pattern(),
            (requested, None) => requested.pattern(),
        };

        let mut parameters = options.clone();
        parameters.max_iterations = options.effective_max_iterations();

        OptimizationResult {
            best,
            candidates,
            metadata: ResultMetadata {
                algorithm: outcome.winner_name().to_string(),
                pattern: pattern.to_string(),
                optimization_time_ms: millis(started.elapsed()),
                parameters,
                iteration_limits,
                savings,
                exceeds_fuel_capacity,
            },
        }
    }
}

/// Optimizes a request with a default [`Engine`].
///
/// # Examples
///
/// ```
/// use u_tour::models::{Node, OptimizationRequest, Position};
///
/// let request = OptimizationRequest::new(Position::new(0.0, 0.0), vec![]);
/// assert!(u_tour::optimize(&request).is_err());
/// ```
pub fn optimize(request: &OptimizationRequest) -> Result<OptimizationResult, ValidationError> {
    Engine::default().optimize(request)
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
