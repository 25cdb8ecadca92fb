//! Tour scoring.
//!
//! - [`TourEvaluator`] — Weighted distance/priority/fuel cost of an ordering
//! - [`CostWeights`] — Term weights derived from the request options
//! - [`StepCosts`] — Per-step marginal cost used by greedy construction

mod evaluator;

pub use evaluator::{CostWeights, StepCosts, TourEvaluator};
