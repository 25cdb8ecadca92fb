//! Tour ordering as a GA problem.
//!
//! Implements [`GaProblem`] over permutation chromosomes scored by the
//! shared [`TourEvaluator`].
//!
//! # Operators
//!
//! - **Initialization**: uniformly shuffled node indices
//! - **Crossover**: order crossover (OX), two children per pair
//! - **Mutation**: swap of two random positions

use rand::Rng;
use u_metaheur::ga::operators::{order_crossover, swap_mutation};
use u_metaheur::ga::GaProblem;
use u_numflow::random::shuffled_indices;

use super::chromosome::Chromosome;
use crate::constructive::nearest_neighbor;
use crate::evaluation::TourEvaluator;

/// GA problem for ordering the stops of one request.
///
/// # Examples
///
/// ```
/// use u_metaheur::ga::{GaConfig, GaProblem, GaRunner};
/// use u_tour::evaluation::TourEvaluator;
/// use u_tour::ga::TourGaProblem;
/// use u_tour::models::{Node, OptimizationOptions, Position, VehicleProfile};
///
/// let nodes: Vec<Node> = (0..5)
///     .map(|i| Node::new(format!("n{i}"), Position::new(0.01 * i as f64, 0.0)))
///     .collect();
/// let eval = TourEvaluator::new(
///     Position::new(0.0, 0.0),
///     &nodes,
///     &VehicleProfile::default(),
///     &OptimizationOptions::default(),
/// );
///
/// let problem = TourGaProblem::new(&eval);
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_seed(42);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(result.best_fitness < f64::INFINITY);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TourGaProblem<'a> {
    evaluator: &'a TourEvaluator,
}

impl<'a> TourGaProblem<'a> {
    /// Wraps an evaluator.
    pub fn new(evaluator: &'a TourEvaluator) -> Self {
        Self { evaluator }
    }

    /// The nearest-neighbor tour, used as a seed individual.
    pub fn greedy_individual(&self) -> Chromosome {
        let e = self.evaluator;
        Chromosome::new(nearest_neighbor(e.distances(), e.priorities(), e.step_costs()))
    }

    /// Number of genes per individual.
    pub fn num_nodes(&self) -> usize {
        self.evaluator.num_nodes()
    }
}

impl GaProblem for TourGaProblem<'_> {
    type Individual = Chromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        Chromosome::new(shuffled_indices(self.num_nodes(), rng))
    }

    fn evaluate(&self, individual: &Chromosome) -> f64 {
        self.evaluator.cost(individual.genes())
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Vec<Chromosome> {
        if parent1.is_empty() {
            return vec![parent1.clone(), parent2.clone()];
        }
        let (c1, c2) = order_crossover(parent1.genes(), parent2.genes(), rng);
        vec![Chromosome::new(c1), Chromosome::new(c2)]
    }

    fn mutate<R: Rng>(&self, individual: &mut Chromosome, rng: &mut R) {
        swap_mutation(individual.genes_mut(), rng);
    }
}
