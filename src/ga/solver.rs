//! Genetic algorithm over tour permutations.
//!
//! # Operators
//!
//! - **Initialization**: one nearest-neighbor seed plus random permutations
//! - **Selection**: tournament ([`Selection::Tournament`])
//! - **Crossover**: order crossover (OX) with probability `crossover_rate`
//! - **Mutation**: swap with probability `mutation_rate` per offspring
//! - **Elitism**: the generation's cheapest individual survives unchanged
//!
//! Operators come from [`TourGaProblem`]. The generation loop is local
//! rather than [`u_metaheur::ga::GaRunner`] because it seeds the population
//! with the greedy tour and checks the deadline before every offspring
//! instead of once per generation.

use log::debug;
use rand::Rng;
use u_metaheur::ga::{GaProblem, Individual, Selection};

use super::chromosome::Chromosome;
use super::problem::TourGaProblem;
use crate::error::SolveError;
use crate::evaluation::TourEvaluator;
use crate::models::{Algorithm, OptimizationOptions};
use crate::random::rng_from;
use crate::solver::{Deadline, TourSolver};

/// Genetic algorithm parameters.
///
/// # Examples
///
/// ```
/// use u_tour::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_max_generations(100)
///     .with_seed(7);
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.tournament_size, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generation limit.
    pub max_generations: u32,
    /// Per-offspring swap probability.
    pub mutation_rate: f64,
    /// Probability that two parents are recombined instead of cloned.
    pub crossover_rate: f64,
    /// Individuals compared per tournament.
    pub tournament_size: usize,
    /// Seed; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 500,
            mutation_rate: 0.05,
            crossover_rate: 0.9,
            tournament_size: 3,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Applies the request's population, mutation and iteration knobs.
    pub fn apply_options(mut self, options: &OptimizationOptions) -> Self {
        self.population_size = options.population_size;
        self.mutation_rate = options.mutation_rate;
        self.max_generations = options.max_iterations_for(Algorithm::Genetic);
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation limit.
    pub fn with_max_generations(mut self, generations: u32) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of a GA run, including the best-so-far trace.
#[derive(Debug, Clone)]
pub struct GaOutcome {
    /// Best individual across all generations.
    pub best: Chromosome,
    /// Best-so-far fitness `1 / (1 + cost)` after initialization and after
    /// each generation; never decreases.
    pub history: Vec<f64>,
    /// Generations completed (a generation cut short by the deadline counts).
    pub generations: u32,
}

/// Population-based tour search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour::evaluation::TourEvaluator;
/// use u_tour::ga::{GaConfig, GeneticSolver};
/// use u_tour::models::{Node, OptimizationOptions, Position, VehicleProfile};
/// use u_tour::solver::Deadline;
///
/// let nodes: Vec<Node> = (0..6)
///     .map(|i| Node::new(format!("n{i}"), Position::new(0.01 * i as f64, 0.0)))
///     .collect();
/// let eval = TourEvaluator::new(
///     Position::new(0.0, 0.0),
///     &nodes,
///     &VehicleProfile::default(),
///     &OptimizationOptions::default(),
/// );
/// let solver = GeneticSolver::new(GaConfig::default().with_max_generations(30).with_seed(42));
/// let outcome = solver.run(&eval, Deadline::after(Duration::from_secs(2)));
/// assert_eq!(outcome.best.len(), 6);
/// assert!(outcome.history.windows(2).all(|w| w[1] >= w[0]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneticSolver {
    config: GaConfig,
}

impl GeneticSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    /// The solver's configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA and returns the best individual with its trace.
    pub fn run(&self, evaluator: &TourEvaluator, deadline: Deadline) -> GaOutcome {
        let problem = TourGaProblem::new(evaluator);
        let n = problem.num_nodes();
        let cfg = &self.config;
        let pop_size = cfg.population_size.max(2);
        let selection = Selection::Tournament(cfg.tournament_size);
        let mut rng = rng_from(cfg.seed);

        let evaluate = |mut c: Chromosome| {
            c.set_fitness(problem.evaluate(&c));
            c
        };

        let mut population = Vec::with_capacity(pop_size);
        population.push(evaluate(problem.greedy_individual()));
        while population.len() < pop_size && !deadline.expired() {
            population.push(evaluate(problem.create_individual(&mut rng)));
        }

        let mut best = cheapest(&population).clone();
        let mut history = vec![score(&best)];
        let mut generations = 0;

        'generations: while generations < cfg.max_generations && n > 1 {
            if deadline.expired() {
                break;
            }
            generations += 1;

            let mut next = Vec::with_capacity(pop_size);
            next.push(cheapest(&population).clone());

            while next.len() < pop_size {
                if deadline.expired() {
                    track_best(&mut best, &next);
                    history.push(score(&best));
                    break 'generations;
                }
                let p1 = &population[selection.select(&population, &mut rng)];
                let p2 = &population[selection.select(&population, &mut rng)];
                let children = if rng.random::<f64>() < cfg.crossover_rate {
                    problem.crossover(p1, p2, &mut rng)
                } else {
                    vec![p1.clone(), p2.clone()]
                };

                for mut child in children {
                    if next.len() >= pop_size {
                        break;
                    }
                    if rng.random::<f64>() < cfg.mutation_rate {
                        problem.mutate(&mut child, &mut rng);
                    }
                    next.push(evaluate(child));
                }
            }

            population = next;
            track_best(&mut best, &population);
            history.push(score(&best));
        }

        debug!(
            "genetic: {generations} generations, best cost {:.6}",
            best.fitness()
        );
        GaOutcome {
            best,
            history,
            generations,
        }
    }
}

impl TourSolver for GeneticSolver {
    fn name(&self) -> &'static str {
        "genetic"
    }

    fn solve(
        &self,
        evaluator: &TourEvaluator,
        deadline: Deadline,
    ) -> Result<Vec<usize>, SolveError> {
        let outcome = self.run(evaluator, deadline);
        if !outcome.best.fitness().is_finite() {
            return Err(SolveError::NonFiniteCost {
                algorithm: self.name(),
            });
        }
        Ok(outcome.best.into_genes())
    }
}

fn cheapest(population: &[Chromosome]) -> &Chromosome {
    let mut best = &population[0];
    for c in &population[1..] {
        if c.fitness() < best.fitness() {
            best = c;
        }
    }
    best
}

fn track_best(best: &mut Chromosome, population: &[Chromosome]) {
    let top = cheapest(population);
    if top.fitness() < best.fitness() {
        *best = top.clone();
    }
}

/// Higher-is-better score reported in the trace.
fn score(c: &Chromosome) -> f64 {
    1.0 / (1.0 + c.fitness())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::constructive::nearest_neighbor;
    use crate::models::{Node, Position, VehicleProfile};
    use crate::solver::verify_permutation;

    fn grid(n: usize) -> Vec<Node> {
        (0..n)
            .map(|i| {
                let x = (i % 5) as f64 * 0.01;
                let y = (i / 5) as f64 * 0.01;
                Node::new(format!("n{i}"), Position::new(x, y)).with_priority(1 + (i as u32 * 7) % 100)
            })
            .collect()
    }

    fn evaluator(nodes: &[Node]) -> TourEvaluator {
        TourEvaluator::new(
            Position::new(-0.01, -0.01),
            nodes,
            &VehicleProfile::default(),
            &OptimizationOptions::default(),
        )
    }

    fn long_deadline() -> Deadline {
        Deadline::after(Duration::from_secs(10))
    }

    #[test]
    fn test_ga_returns_permutation() {
        let nodes = grid(15);
        let eval = evaluator(&nodes);
        let solver = GeneticSolver::new(GaConfig::default().with_max_generations(40).with_seed(42));
        let order = solver.solve(&eval, long_deadline()).expect("ga succeeds");
        assert!(verify_permutation(&order, 15).is_ok());
    }

    #[test]
    fn test_ga_history_monotone() {
        let nodes = grid(12);
        let eval = evaluator(&nodes);
        let solver = GeneticSolver::new(
            GaConfig::default()
                .with_max_generations(60)
                .with_mutation_rate(0.5)
                .with_seed(9),
        );
        let outcome = solver.run(&eval, long_deadline());
        assert_eq!(outcome.generations, 60);
        assert_eq!(outcome.history.len(), 61);
        assert!(outcome.history.windows(2).all(|w| w[1] >= w[0]));
        let last = *outcome.history.last().expect("non-empty");
        assert_eq!(last, 1.0 / (1.0 + outcome.best.fitness()));
        assert_eq!(outcome.best.fitness(), eval.cost(outcome.best.genes()));
    }

    #[test]
    fn test_ga_never_worse_than_seed() {
        let nodes = grid(10);
        let eval = evaluator(&nodes);
        let nn = nearest_neighbor(eval.distances(), eval.priorities(), eval.step_costs());
        let solver = GeneticSolver::new(GaConfig::default().with_max_generations(20).with_seed(1));
        let outcome = solver.run(&eval, long_deadline());
        assert!(outcome.best.fitness() <= eval.cost(&nn));
    }

    #[test]
    fn test_ga_deterministic_with_seed() {
        let nodes = grid(10);
        let eval = evaluator(&nodes);
        let config = GaConfig::default().with_max_generations(25).with_seed(123);
        let a = GeneticSolver::new(config.clone()).run(&eval, long_deadline());
        let b = GeneticSolver::new(config).run(&eval, long_deadline());
        assert_eq!(a.best.genes(), b.best.genes());
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_ga_expired_deadline_returns_seed() {
        let nodes = grid(8);
        let eval = evaluator(&nodes);
        let solver = GeneticSolver::new(GaConfig::default().with_seed(5));
        let outcome = solver.run(&eval, Deadline::expired_now());
        assert_eq!(outcome.generations, 0);
        let nn = nearest_neighbor(eval.distances(), eval.priorities(), eval.step_costs());
        assert_eq!(outcome.best.genes(), nn.as_slice());
    }

    #[test]
    fn test_ga_single_node() {
        let nodes = grid(1);
        let eval = evaluator(&nodes);
        let order = GeneticSolver::default()
            .solve(&eval, long_deadline())
            .expect("single node");
        assert_eq!(order, vec![0]);
    }

    #[test]
    fn test_apply_options() {
        let options = OptimizationOptions::default()
            .with_population_size(120)
            .with_mutation_rate(0.2)
            .with_max_iterations(42);
        let cfg = GaConfig::default().apply_options(&options);
        assert_eq!(cfg.population_size, 120);
        assert_eq!(cfg.mutation_rate, 0.2);
        assert_eq!(cfg.max_generations, 42);
    }
}
