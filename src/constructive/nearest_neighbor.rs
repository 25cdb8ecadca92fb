//! Priority-aware nearest-neighbor constructive heuristic.
//!
//! Starting at the start position, repeatedly visit the unvisited node whose
//! visit adds the least to the tour cost:
//!
//! ```text
//! step = per_km * d(current, i) + per_waiting_priority * (remaining - priority_i)
//! ```
//!
//! The coefficients come from [`TourEvaluator::step_costs`], so the greedy
//! choice is scored by the same objective every other solver minimizes. With
//! equal priorities the second term is the same for every candidate and the
//! rule reduces to plain nearest neighbor.
//!
//! Ties are broken by raw distance, then by input position, so the result is
//! fully deterministic.
//!
//! # Complexity
//!
//! O(n²) where n = number of nodes.

use std::cmp::Ordering;

use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::evaluation::{StepCosts, TourEvaluator};
use crate::solver::{Deadline, TourSolver};

/// Builds a tour by always taking the cheapest next stop.
///
/// # Arguments
///
/// * `distances` — Distance matrix (location 0 = start position)
/// * `priorities` — Node priorities in 1..=100, in node-index order
/// * `step` — Marginal cost coefficients, usually from
///   [`TourEvaluator::step_costs`]
///
/// # Examples
///
/// ```
/// use u_tour::constructive::nearest_neighbor;
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::evaluation::StepCosts;
/// use u_tour::models::{Node, Position};
///
/// let nodes = vec![
///     Node::new("far", Position::new(0.03, 0.0)),
///     Node::new("near", Position::new(0.01, 0.0)),
///     Node::new("mid", Position::new(0.02, 0.0)),
/// ];
/// let dm = DistanceMatrix::from_positions(Position::new(0.0, 0.0), &nodes);
///
/// let order = nearest_neighbor(&dm, &[50.0, 50.0, 50.0], StepCosts::new(1.0, 0.1));
/// assert_eq!(order, vec![1, 2, 0]);
/// ```
pub fn nearest_neighbor(distances: &DistanceMatrix, priorities: &[f64], step: StepCosts) -> Vec<usize> {
    let n = priorities.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = None;
    let mut remaining: f64 = priorities.iter().sum();

    while order.len() < n {
        // (node, marginal, raw)
        let mut best: Option<(usize, f64, f64)> = None;
        for i in 0..n {
            if visited[i] {
                continue;
            }
            let raw = distances.leg(current, i);
            let marginal = step.marginal(raw, remaining, priorities[i]);
            let better = match best {
                None => true,
                Some((_, best_marginal, best_raw)) => match marginal.total_cmp(&best_marginal) {
                    Ordering::Less => true,
                    Ordering::Equal => raw < best_raw,
                    Ordering::Greater => false,
                },
            };
            if better {
                best = Some((i, marginal, raw));
            }
        }

        match best {
            Some((next, _, _)) => {
                visited[next] = true;
                order.push(next);
                remaining -= priorities[next];
                current = Some(next);
            }
            None => break,
        }
    }

    order
}

/// [`TourSolver`] wrapper around [`nearest_neighbor`].
///
/// Runs to completion regardless of the deadline: it is the fallback every
/// other solver relies on and finishes in O(n²).
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborSolver;

impl TourSolver for NearestNeighborSolver {
    fn name(&self) -> &'static str {
        "nearest_neighbor"
    }

    fn solve(
        &self,
        evaluator: &TourEvaluator,
        _deadline: Deadline,
    ) -> Result<Vec<usize>, SolveError> {
        Ok(nearest_neighbor(
            evaluator.distances(),
            evaluator.priorities(),
            evaluator.step_costs(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, OptimizationOptions, Position, VehicleProfile};

    fn line() -> (Vec<Node>, DistanceMatrix) {
        let nodes = vec![
            Node::new("c", Position::new(0.03, 0.0)),
            Node::new("a", Position::new(0.01, 0.0)),
            Node::new("b", Position::new(0.02, 0.0)),
        ];
        let dm = DistanceMatrix::from_positions(Position::new(0.0, 0.0), &nodes);
        (nodes, dm)
    }

    fn distance_only() -> StepCosts {
        StepCosts::new(1.0, 0.0)
    }

    #[test]
    fn test_nn_sweeps_line() {
        let (_, dm) = line();
        assert_eq!(nearest_neighbor(&dm, &[50.0; 3], StepCosts::new(1.0, 0.3)), vec![1, 2, 0]);
    }

    #[test]
    fn test_nn_priority_pulls_far_node_forward() {
        let (_, dm) = line();
        // The far node has top priority and priority dominates.
        let order = nearest_neighbor(&dm, &[100.0, 1.0, 1.0], StepCosts::new(0.0, 1.0));
        assert_eq!(order[0], 0);
    }

    #[test]
    fn test_nn_zero_weight_ignores_priority() {
        let (_, dm) = line();
        let order = nearest_neighbor(&dm, &[100.0, 1.0, 1.0], distance_only());
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_nn_tie_breaks_by_index() {
        let nodes = vec![
            Node::new("x", Position::new(0.0, 0.0)),
            Node::new("y", Position::new(0.0, 0.0)),
        ];
        let dm = DistanceMatrix::from_positions(Position::new(0.0, 0.0), &nodes);
        assert_eq!(nearest_neighbor(&dm, &[50.0, 50.0], distance_only()), vec![0, 1]);
    }

    #[test]
    fn test_nn_tie_on_marginal_uses_raw_distance() {
        let (_, dm) = line();
        // Pure priority scoring with equal priorities ties every candidate.
        let order = nearest_neighbor(&dm, &[100.0; 3], StepCosts::new(0.0, 1.0));
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_nn_matches_evaluator_on_two_stops() {
        // A low-priority stop nearby and an urgent one slightly further out,
        // on opposite sides of the start.
        let nodes = vec![
            Node::new("near", Position::new(0.010, 0.0)).with_priority(1),
            Node::new("urgent", Position::new(-0.015, 0.0)).with_priority(100),
        ];
        let eval = TourEvaluator::new(
            Position::new(0.0, 0.0),
            &nodes,
            &VehicleProfile::default(),
            &OptimizationOptions::default(),
        );
        let order = NearestNeighborSolver
            .solve(&eval, Deadline::expired_now())
            .expect("greedy never fails");
        assert_eq!(order, vec![1, 0]);
        assert!(eval.cost(&order) < eval.cost(&[0, 1]));
    }

    #[test]
    fn test_nn_empty() {
        let dm = DistanceMatrix::from_positions(Position::new(0.0, 0.0), &[]);
        assert!(nearest_neighbor(&dm, &[], distance_only()).is_empty());
    }
}
