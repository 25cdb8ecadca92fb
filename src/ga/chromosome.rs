//! Permutation chromosome.
//!
//! A chromosome encodes a tour directly as a permutation of node indices.
//! The start position is implicit and never part of the genes.

use u_metaheur::ga::Individual;

/// A tour candidate in the genetic population.
///
/// The fitness value is the evaluator's tour cost, so lower is better and an
/// unevaluated chromosome sits at `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use u_metaheur::ga::Individual;
/// use u_tour::ga::Chromosome;
///
/// let c = Chromosome::new(vec![2, 0, 1]);
/// assert_eq!(c.genes(), &[2, 0, 1]);
/// assert_eq!(c.fitness(), f64::INFINITY);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<usize>,
    cost: f64,
}

impl Chromosome {
    /// Creates an unevaluated chromosome from a permutation.
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            cost: f64::INFINITY,
        }
    }

    /// Returns the permutation.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Returns a mutable reference to the permutation.
    ///
    /// Callers that change the genes must re-evaluate.
    pub fn genes_mut(&mut self) -> &mut Vec<usize> {
        &mut self.genes
    }

    /// Consumes the chromosome, returning the permutation.
    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns true if there are no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl Individual for Chromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.cost
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.cost = fitness;
    }
}
