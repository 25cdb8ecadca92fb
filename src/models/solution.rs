//! Solution and result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Node, OptimizationOptions};

/// An ordered tour with its aggregate metrics.
///
/// `sequence` is a permutation of the request's nodes; the start position
/// is implicit and precedes the first node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// Nodes in visiting order.
    pub sequence: Vec<Node>,
    /// Kilometers driven.
    pub total_distance: f64,
    /// Hours driven.
    pub total_time: f64,
    /// Liters (or kWh-equivalent) consumed.
    pub fuel_cost: f64,
    /// Kilograms of CO2 emitted.
    pub co2_emissions: f64,
    /// Higher-is-better score in [0, 1] relative to the input order.
    pub efficiency: f64,
}

impl Solution {
    /// Node ids in visiting order.
    pub fn ids(&self) -> Vec<&str> {
        self.sequence.iter().map(Node::id).collect()
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the tour has no stops.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// One dimension of the before/after comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSavings {
    /// Value for the input order.
    pub original: f64,
    /// Value for the optimized order.
    pub optimized: f64,
    /// `original - optimized`; negative when the optimized tour is worse.
    pub saved: f64,
    /// `saved / original * 100`, zero when `original` is zero.
    pub saved_percent: f64,
}

/// Savings of the optimized tour against the input order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    /// Kilometers.
    pub distance: MetricSavings,
    /// Hours.
    pub time: MetricSavings,
    /// Fuel units.
    pub fuel: MetricSavings,
    /// Kilograms of CO2.
    pub emissions: MetricSavings,
}

/// A single solver run inside an optimization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Solver name.
    pub algorithm: String,
    /// Scalar objective value; `None` if the solver failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Wall-clock time the solver took.
    pub elapsed_ms: f64,
    /// The solver's tour, if it produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    /// Failure description, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Candidate {
    /// Returns `true` if the solver produced a tour.
    pub fn succeeded(&self) -> bool {
        self.solution.is_some()
    }
}

/// Descriptive data about how the best tour was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    /// Solver that produced the winning tour.
    pub algorithm: String,
    /// Search pattern label.
    pub pattern: String,
    /// Total wall-clock time of the call.
    pub optimization_time_ms: f64,
    /// Effective options.
    pub parameters: OptimizationOptions,
    /// Iteration limit each iterative solver actually ran with, keyed by
    /// algorithm name. Empty for nearest neighbor.
    #[serde(default)]
    pub iteration_limits: BTreeMap<String, u32>,
    /// Before/after comparison.
    pub savings: Savings,
    /// `true` when the tour needs more fuel than the vehicle carries.
    pub exceeds_fuel_capacity: bool,
}

/// Output of one optimization call.
///
/// # Examples
///
/// ```
/// use u_tour::models::{Node, OptimizationRequest, Position};
///
/// let request = OptimizationRequest::new(
///     Position::new(0.0, 0.0),
///     vec![Node::new("a", Position::new(0.01, 0.0))],
/// );
/// let result = u_tour::optimize(&request).unwrap();
/// assert_eq!(result.best.ids(), vec!["a"]);
/// assert_eq!(result.distance_savings_percent(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    /// The winning tour.
    pub best: Solution,
    /// Every solver run, in execution order.
    pub candidates: Vec<Candidate>,
    /// Provenance and savings.
    pub metadata: ResultMetadata,
}

impl OptimizationResult {
    /// Distance of the input order.
    pub fn original_distance(&self) -> f64 {
        self.metadata.savings.distance.original
    }

    /// Time of the input order.
    pub fn original_time(&self) -> f64 {
        self.metadata.savings.time.original
    }

    /// Fuel of the input order.
    pub fn original_fuel_cost(&self) -> f64 {
        self.metadata.savings.fuel.original
    }

    /// Kilometers saved.
    pub fn distance_savings(&self) -> f64 {
        self.metadata.savings.distance.saved
    }

    /// Percent of distance saved.
    pub fn distance_savings_percent(&self) -> f64 {
        self.metadata.savings.distance.saved_percent
    }

    /// Hours saved.
    pub fn time_savings(&self) -> f64 {
        self.metadata.savings.time.saved
    }

    /// Percent of time saved.
    pub fn time_savings_percent(&self) -> f64 {
        self.metadata.savings.time.saved_percent
    }

    /// Fuel saved.
    pub fn fuel_savings(&self) -> f64 {
        self.metadata.savings.fuel.saved
    }

    /// Percent of fuel saved.
    pub fn fuel_savings_percent(&self) -> f64 {
        self.metadata.savings.fuel.saved_percent
    }

    /// Serializes the result to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
