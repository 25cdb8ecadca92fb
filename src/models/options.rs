//! Optimization options and algorithm selection.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Which solver (or combination) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Priority-adjusted greedy construction.
    NearestNeighbor,
    /// Genetic algorithm over permutations.
    Genetic,
    /// Ant colony optimization.
    AntColony,
    /// All of the above under one budget, best tour wins.
    #[default]
    Hybrid,
}

impl Algorithm {
    /// Wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::NearestNeighbor => "nearest_neighbor",
            Algorithm::Genetic => "genetic",
            Algorithm::AntColony => "ant_colony",
            Algorithm::Hybrid => "hybrid",
        }
    }

    /// Descriptive search pattern label.
    pub fn pattern(&self) -> &'static str {
        match self {
            Algorithm::NearestNeighbor => "greedy",
            Algorithm::Genetic => "evolutionary",
            Algorithm::AntColony => "swarm",
            Algorithm::Hybrid => "multi-start",
        }
    }

    /// Iteration limit used when the request does not set one.
    ///
    /// Generations for the GA, colony iterations for ACO. Nearest neighbor
    /// is a single pass.
    pub fn default_max_iterations(&self) -> Option<u32> {
        match self {
            Algorithm::NearestNeighbor => Some(1),
            Algorithm::Genetic => Some(500),
            Algorithm::AntColony => Some(100),
            Algorithm::Hybrid => None,
        }
    }
}

/// Request-level knobs.
///
/// Every field has a default, so `{}` deserializes to a usable value.
///
/// # Examples
///
/// ```
/// use u_tour::models::{Algorithm, OptimizationOptions};
///
/// let opts = OptimizationOptions::default();
/// assert_eq!(opts.algorithm, Algorithm::Hybrid);
/// assert_eq!(opts.time_limit_ms, 15_000);
/// assert!(opts.validate().is_ok());
///
/// let ga = OptimizationOptions::default()
///     .with_algorithm(Algorithm::Genetic)
///     .with_population_size(80);
/// assert_eq!(ga.effective_max_iterations(), Some(500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizationOptions {
    /// Solver selection.
    pub algorithm: Algorithm,
    /// Generations / iterations; `None` means the solver's own default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
    /// GA population size.
    pub population_size: usize,
    /// GA per-offspring swap mutation probability.
    pub mutation_rate: f64,
    /// Wall-clock budget for the whole call.
    pub time_limit_ms: u64,
    /// Weight of the priority term, 0 = pure distance, 1 = priority only.
    pub priority_weight: f64,
    /// Whether fuel cost enters the objective.
    pub fuel_optimization: bool,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Hybrid,
            max_iterations: None,
            population_size: 50,
            mutation_rate: 0.05,
            time_limit_ms: 15_000,
            priority_weight: 0.3,
            fuel_optimization: true,
        }
    }
}

impl OptimizationOptions {
    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the iteration limit.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Sets the GA population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the GA mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the time budget in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the priority weight.
    pub fn with_priority_weight(mut self, weight: f64) -> Self {
        self.priority_weight = weight;
        self
    }

    /// Enables or disables the fuel term.
    pub fn with_fuel_optimization(mut self, enabled: bool) -> Self {
        self.fuel_optimization = enabled;
        self
    }

    /// Iteration limit after applying the algorithm default.
    pub fn effective_max_iterations(&self) -> Option<u32> {
        self.max_iterations
            .or_else(|| self.algorithm.default_max_iterations())
    }

    /// Iteration limit a specific solver should use.
    pub fn max_iterations_for(&self, algorithm: Algorithm) -> u32 {
        self.max_iterations
            .or_else(|| algorithm.default_max_iterations())
            .unwrap_or(1)
    }

    /// Checks every option against its allowed range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(it) = self.max_iterations {
            if !(1..=10_000).contains(&it) {
                return Err(ValidationError::InvalidOption(format!(
                    "maxIterations {it} is outside 1..=10000"
                )));
            }
        }
        if !(10..=500).contains(&self.population_size) {
            return Err(ValidationError::InvalidOption(format!(
                "populationSize {} is outside 10..=500",
                self.population_size
            )));
        }
        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ValidationError::InvalidOption(format!(
                "mutationRate {} is outside [0, 1]",
                self.mutation_rate
            )));
        }
        if !(1_000..=60_000).contains(&self.time_limit_ms) {
            return Err(ValidationError::InvalidOption(format!(
                "timeLimitMs {} is outside 1000..=60000",
                self.time_limit_ms
            )));
        }
        if !self.priority_weight.is_finite() || !(0.0..=1.0).contains(&self.priority_weight) {
            return Err(ValidationError::InvalidOption(format!(
                "priorityWeight {} is outside [0, 1]",
                self.priority_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let opts: OptimizationOptions = serde_json::from_str("{}").expect("valid");
        assert_eq!(opts, OptimizationOptions::default());
    }

    #[test]
    fn test_algorithm_wire_names() {
        let a: Algorithm = serde_json::from_str(r#""ant_colony""#).expect("valid");
        assert_eq!(a, Algorithm::AntColony);
        assert_eq!(a.name(), "ant_colony");
        assert!(serde_json::from_str::<Algorithm>(r#""simulated_annealing""#).is_err());
    }

    #[test]
    fn test_patterns() {
        assert_eq!(Algorithm::NearestNeighbor.pattern(), "greedy");
        assert_eq!(Algorithm::Genetic.pattern(), "evolutionary");
        assert_eq!(Algorithm::AntColony.pattern(), "swarm");
        assert_eq!(Algorithm::Hybrid.pattern(), "multi-start");
    }

    #[test]
    fn test_max_iterations_defaults() {
        let opts = OptimizationOptions::default();
        assert_eq!(opts.effective_max_iterations(), None);
        assert_eq!(opts.max_iterations_for(Algorithm::Genetic), 500);
        assert_eq!(opts.max_iterations_for(Algorithm::AntColony), 100);
        let pinned = opts.with_max_iterations(7);
        assert_eq!(pinned.max_iterations_for(Algorithm::AntColony), 7);
    }

    #[test]
    fn test_validate_ranges() {
        let base = OptimizationOptions::default();
        assert!(base.clone().with_max_iterations(0).validate().is_err());
        assert!(base.clone().with_population_size(9).validate().is_err());
        assert!(base.clone().with_mutation_rate(1.5).validate().is_err());
        assert!(base.clone().with_time_limit_ms(999).validate().is_err());
        assert!(base.clone().with_time_limit_ms(60_001).validate().is_err());
        assert!(base.clone().with_priority_weight(-0.1).validate().is_err());
        assert!(base.with_priority_weight(f64::NAN).validate().is_err());
    }
}
