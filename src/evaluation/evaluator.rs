//! Tour evaluator producing the scalar objective shared by every solver.

use crate::distance::{leg_fuel_cost, DistanceMatrix, TourMetrics};
use crate::models::{Node, OptimizationOptions, Position, Solution, VehicleProfile};

/// Share of the non-priority weight given to distance when fuel is optimized.
const DISTANCE_SHARE: f64 = 0.7;

/// Weights of the three objective terms. They always sum to 1.
///
/// # Examples
///
/// ```
/// use u_tour::evaluation::CostWeights;
///
/// let w = CostWeights::new(0.3, true);
/// assert!((w.distance - 0.49).abs() < 1e-12);
/// assert!((w.fuel - 0.21).abs() < 1e-12);
/// assert!((w.distance + w.priority + w.fuel - 1.0).abs() < 1e-12);
///
/// let no_fuel = CostWeights::new(0.3, false);
/// assert_eq!(no_fuel.fuel, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    /// Weight of normalized distance.
    pub distance: f64,
    /// Weight of the priority lateness term.
    pub priority: f64,
    /// Weight of normalized fuel; zero when fuel optimization is off.
    ///
    /// Fuel is proportional to distance and both share the input-order
    /// normalization, so this weight moves cost between the two terms
    /// without changing which order is cheaper.
    pub fuel: f64,
}

impl CostWeights {
    /// Splits `1 - priority_weight` between distance and fuel.
    pub fn new(priority_weight: f64, fuel_optimization: bool) -> Self {
        let rest = 1.0 - priority_weight;
        if fuel_optimization {
            Self {
                distance: DISTANCE_SHARE * rest,
                priority: priority_weight,
                fuel: (1.0 - DISTANCE_SHARE) * rest,
            }
        } else {
            Self {
                distance: rest,
                priority: priority_weight,
                fuel: 0.0,
            }
        }
    }
}

/// Marginal cost coefficients for building a tour one stop at a time.
///
/// Appending stop `i` after `current` while `remaining` priority is still
/// unvisited adds exactly
/// `per_km * d(current, i) + per_waiting_priority * (remaining - priority_i)`
/// to [`TourEvaluator::cost`]: the leg's distance and fuel, plus one more
/// position of lateness for every stop left behind.
///
/// # Examples
///
/// ```
/// use u_tour::evaluation::StepCosts;
///
/// let step = StepCosts::new(0.5, 0.01);
/// // 2 km with 60 priority left waiting after the move.
/// assert!((step.marginal(2.0, 80.0, 20.0) - 1.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCosts {
    /// Cost of one kilometre of travel, distance and fuel terms combined.
    pub per_km: f64,
    /// Cost of one unit of priority waiting one more position.
    pub per_waiting_priority: f64,
}

impl StepCosts {
    /// Creates step costs from raw coefficients.
    pub fn new(per_km: f64, per_waiting_priority: f64) -> Self {
        Self {
            per_km,
            per_waiting_priority,
        }
    }

    /// Cost added by moving `km` to a stop of `priority` while `remaining`
    /// priority (including that stop) is unvisited.
    pub fn marginal(&self, km: f64, remaining: f64, priority: f64) -> f64 {
        self.per_km * km + self.per_waiting_priority * (remaining - priority)
    }
}

/// Scores node orderings against the weighted distance/priority/fuel objective.
///
/// Orders are slices of node indices (positions in the request's node list).
/// Distance and fuel are normalized by the input order's values so every
/// term is dimensionless, and the input order itself is the baseline for
/// [`efficiency`](Self::efficiency).
///
/// # Examples
///
/// ```
/// use u_tour::evaluation::TourEvaluator;
/// use u_tour::models::{Node, OptimizationOptions, Position, VehicleProfile};
///
/// let nodes = vec![
///     Node::new("far", Position::new(0.02, 0.0)),
///     Node::new("near", Position::new(0.01, 0.0)),
/// ];
/// let eval = TourEvaluator::new(
///     Position::new(0.0, 0.0),
///     &nodes,
///     &VehicleProfile::default(),
///     &OptimizationOptions::default(),
/// );
/// // Visiting the near stop first is cheaper than the input order.
/// assert!(eval.cost(&[1, 0]) < eval.cost(&[0, 1]));
/// assert!(eval.efficiency(eval.cost(&[1, 0])) > 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct TourEvaluator {
    distances: DistanceMatrix,
    priorities: Vec<f64>,
    priority_sum: f64,
    vehicle: VehicleProfile,
    weights: CostWeights,
    distance_scale: f64,
    fuel_scale: f64,
    baseline_cost: f64,
}

impl TourEvaluator {
    /// Builds an evaluator for one request.
    pub fn new(
        start: Position,
        nodes: &[Node],
        vehicle: &VehicleProfile,
        options: &OptimizationOptions,
    ) -> Self {
        let distances = DistanceMatrix::from_positions(start, nodes);
        let priorities: Vec<f64> = nodes.iter().map(|n| f64::from(n.priority())).collect();
        let priority_sum = priorities.iter().sum();

        let input_order: Vec<usize> = (0..nodes.len()).collect();
        let baseline_distance = distances.tour_distance(&input_order);
        let baseline_fuel = leg_fuel_cost(baseline_distance, vehicle.fuel_consumption_rate());

        let mut evaluator = Self {
            distances,
            priorities,
            priority_sum,
            vehicle: vehicle.clone(),
            weights: CostWeights::new(options.priority_weight, options.fuel_optimization),
            distance_scale: non_zero_or_one(baseline_distance),
            fuel_scale: non_zero_or_one(baseline_fuel),
            baseline_cost: 0.0,
        };
        evaluator.baseline_cost = evaluator.cost(&input_order);
        evaluator
    }

    /// Scalar cost of an ordering; lower is better.
    pub fn cost(&self, order: &[usize]) -> f64 {
        let distance = self.distances.tour_distance(order);
        let fuel = leg_fuel_cost(distance, self.vehicle.fuel_consumption_rate());

        self.weights.distance * distance / self.distance_scale
            + self.weights.priority * self.priority_lateness(order)
            + self.weights.fuel * fuel / self.fuel_scale
    }

    /// Priority-weighted mean relative position, in [0, 1].
    ///
    /// Zero when high-priority nodes come first, approaching one when they
    /// come last. A single node always scores zero.
    pub fn priority_lateness(&self, order: &[usize]) -> f64 {
        let n = order.len();
        if n < 2 || self.priority_sum <= 0.0 {
            return 0.0;
        }
        let last = (n - 1) as f64;
        let weighted: f64 = order
            .iter()
            .enumerate()
            .map(|(pos, &node)| self.priorities[node] * pos as f64 / last)
            .sum();
        weighted / self.priority_sum
    }

    /// Marginal cost coefficients consistent with [`cost`](Self::cost).
    pub fn step_costs(&self) -> StepCosts {
        let fuel_per_km = leg_fuel_cost(1.0, self.vehicle.fuel_consumption_rate());
        let per_km =
            self.weights.distance / self.distance_scale + self.weights.fuel * fuel_per_km / self.fuel_scale;
        let n = self.priorities.len();
        let per_waiting_priority = if n < 2 || self.priority_sum <= 0.0 {
            0.0
        } else {
            self.weights.priority / ((n - 1) as f64 * self.priority_sum)
        };
        StepCosts::new(per_km, per_waiting_priority)
    }

    /// Fitness used by population-based solvers: `1 / (1 + cost)`.
    pub fn fitness(&self, order: &[usize]) -> f64 {
        1.0 / (1.0 + self.cost(order))
    }

    /// Bounded higher-is-better score relative to the input order.
    pub fn efficiency(&self, cost: f64) -> f64 {
        let total = self.baseline_cost + cost;
        if total <= 0.0 {
            return 1.0;
        }
        (self.baseline_cost / total).clamp(0.0, 1.0)
    }

    /// Cost of the input order.
    pub fn baseline_cost(&self) -> f64 {
        self.baseline_cost
    }

    /// Distance, time, fuel and emissions of an ordering.
    pub fn metrics(&self, order: &[usize]) -> TourMetrics {
        TourMetrics::from_distance(self.distances.tour_distance(order), &self.vehicle)
    }

    /// Materializes an ordering into a reportable [`Solution`].
    pub fn to_solution(&self, nodes: &[Node], order: &[usize]) -> Solution {
        let metrics = self.metrics(order);
        Solution {
            sequence: order.iter().map(|&i| nodes[i].clone()).collect(),
            total_distance: metrics.distance_km,
            total_time: metrics.time_hours,
            fuel_cost: metrics.fuel,
            co2_emissions: metrics.co2_kg,
            efficiency: self.efficiency(self.cost(order)),
        }
    }

    /// The shared distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Node priorities in input order.
    pub fn priorities(&self) -> &[f64] {
        &self.priorities
    }

    /// Objective weights.
    pub fn weights(&self) -> CostWeights {
        self.weights
    }

    /// Number of nodes being ordered.
    pub fn num_nodes(&self) -> usize {
        self.priorities.len()
    }
}

fn non_zero_or_one(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<Node> {
        vec![
            Node::new("a", Position::new(0.03, 0.0)).with_priority(10),
            Node::new("b", Position::new(0.01, 0.0)).with_priority(90),
            Node::new("c", Position::new(0.02, 0.0)).with_priority(50),
        ]
    }

    fn evaluator(priority_weight: f64, fuel: bool) -> TourEvaluator {
        let options = OptimizationOptions::default()
            .with_priority_weight(priority_weight)
            .with_fuel_optimization(fuel);
        TourEvaluator::new(
            Position::new(0.0, 0.0),
            &nodes(),
            &VehicleProfile::default(),
            &options,
        )
    }

    #[test]
    fn test_baseline_cost_pure_distance() {
        let eval = evaluator(0.0, false);
        // Input order normalizes to exactly one.
        assert!((eval.baseline_cost() - 1.0).abs() < 1e-12);
        assert!((eval.efficiency(eval.baseline_cost()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_distance_only_prefers_sweep() {
        let eval = evaluator(0.0, false);
        // b (0.01) -> c (0.02) -> a (0.03) is the shortest open path.
        let best = eval.cost(&[1, 2, 0]);
        for order in [[0, 1, 2], [0, 2, 1], [1, 0, 2], [2, 0, 1], [2, 1, 0]] {
            assert!(best < eval.cost(&order));
        }
    }

    #[test]
    fn test_priority_only_ignores_distance() {
        let eval = evaluator(1.0, true);
        // Sorted by descending priority: b (90), c (50), a (10).
        let by_priority = eval.cost(&[1, 2, 0]);
        let reversed = eval.cost(&[0, 2, 1]);
        assert!(by_priority < reversed);
        assert!((by_priority - eval.priority_lateness(&[1, 2, 0])).abs() < 1e-12);
    }

    #[test]
    fn test_priority_lateness_bounds() {
        let eval = evaluator(0.3, true);
        let early = eval.priority_lateness(&[1, 2, 0]);
        let late = eval.priority_lateness(&[0, 2, 1]);
        assert!((0.0..=1.0).contains(&early));
        assert!((0.0..=1.0).contains(&late));
        assert!(early < late);
        assert_eq!(eval.priority_lateness(&[2]), 0.0);
    }

    #[test]
    fn test_fuel_term_tracks_distance() {
        // Fuel is linear in distance, so both normalizations agree and the
        // fuel switch never changes how orders rank.
        for priority_weight in [0.0, 0.3, 0.9] {
            let with_fuel = evaluator(priority_weight, true);
            let without = evaluator(priority_weight, false);
            for order in [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
                assert!((with_fuel.cost(&order) - without.cost(&order)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_step_costs_sum_to_cost() {
        let eval = evaluator(0.6, true);
        let step = eval.step_costs();
        let order = [2, 0, 1];
        let mut remaining: f64 = eval.priorities().iter().sum();
        let mut current = None;
        let mut total = 0.0;
        for &i in &order {
            let p = eval.priorities()[i];
            total += step.marginal(eval.distances().leg(current, i), remaining, p);
            remaining -= p;
            current = Some(i);
        }
        assert!((total - eval.cost(&order)).abs() < 1e-12);
    }

    #[test]
    fn test_step_costs_single_node_has_no_priority_term() {
        let one = vec![Node::new("x", Position::new(0.01, 0.0))];
        let eval = TourEvaluator::new(
            Position::new(0.0, 0.0),
            &one,
            &VehicleProfile::default(),
            &OptimizationOptions::default(),
        );
        assert_eq!(eval.step_costs().per_waiting_priority, 0.0);
    }

    #[test]
    fn test_zero_distance_nodes() {
        let same = vec![
            Node::new("x", Position::new(5.0, 5.0)),
            Node::new("y", Position::new(5.0, 5.0)),
        ];
        let eval = TourEvaluator::new(
            Position::new(5.0, 5.0),
            &same,
            &VehicleProfile::default(),
            &OptimizationOptions::default().with_priority_weight(0.0),
        );
        assert_eq!(eval.cost(&[0, 1]), 0.0);
        assert_eq!(eval.efficiency(0.0), 1.0);
        let sol = eval.to_solution(&same, &[1, 0]);
        assert_eq!(sol.total_distance, 0.0);
        assert_eq!(sol.ids(), vec!["y", "x"]);
    }

    #[test]
    fn test_fitness_inverse_of_cost() {
        let eval = evaluator(0.3, true);
        let good = [1, 2, 0];
        let bad = [0, 2, 1];
        assert!(eval.fitness(&good) > eval.fitness(&bad));
        assert!((eval.fitness(&good) - 1.0 / (1.0 + eval.cost(&good))).abs() < 1e-15);
    }

    #[test]
    fn test_to_solution_metrics() {
        let eval = evaluator(0.3, true);
        let sol = eval.to_solution(&nodes(), &[1, 2, 0]);
        let m = eval.metrics(&[1, 2, 0]);
        assert_eq!(sol.total_distance, m.distance_km);
        assert!((sol.total_time - m.distance_km / 40.0).abs() < 1e-12);
        assert!((sol.fuel_cost - m.distance_km * 0.3).abs() < 1e-12);
        assert!(sol.efficiency > 0.5);
    }
}
