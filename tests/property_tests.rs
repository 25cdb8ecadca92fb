//! Property-based tests for tour optimization.
//!
//! # Invariants tested
//!
//! - **Triangle inequality:** great-circle distance never takes a shortcut.
//! - **Symmetry:** the distance matrix is symmetric.
//! - **Permutation:** every solver visits each node exactly once.
//! - **Monotonic GA:** best-so-far fitness never decreases.
//! - **Hybrid dominance:** the hybrid winner is no worse than any candidate.

use std::time::Duration;

use proptest::prelude::*;
use u_tour::distance::{haversine_km, DistanceMatrix};
use u_tour::evaluation::TourEvaluator;
use u_tour::ga::{GaConfig, GeneticSolver};
use u_tour::models::{
    Algorithm, Node, OptimizationOptions, OptimizationRequest, Position, VehicleProfile,
};
use u_tour::solver::{verify_permutation, Deadline};
use u_tour::{Engine, EngineConfig};

fn position_strategy() -> impl Strategy<Value = Position> {
    (-60.0_f64..60.0, -60.0_f64..60.0).prop_map(|(lng, lat)| Position::new(lng, lat))
}

/// A handful of stops within roughly ten kilometers of the origin.
fn local_nodes_strategy(max: usize) -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec((0.0_f64..0.1, 0.0_f64..0.1, 1_u32..=100), 1..=max).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (lng, lat, priority))| {
                Node::new(format!("n{i}"), Position::new(lng, lat)).with_priority(priority)
            })
            .collect()
    })
}

fn sorted_ids(nodes: &[Node]) -> Vec<String> {
    let mut ids: Vec<String> = nodes.iter().map(|n| n.id().to_string()).collect();
    ids.sort();
    ids
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: going through a third point is never shorter.
    #[test]
    fn haversine_triangle_inequality(
        a in position_strategy(),
        b in position_strategy(),
        c in position_strategy(),
    ) {
        let direct = haversine_km(a, c);
        let detour = haversine_km(a, b) + haversine_km(b, c);
        prop_assert!(direct <= detour + 1e-6, "{direct} > {detour}");
    }

    /// Property: distance is non-negative, symmetric and zero on the diagonal.
    #[test]
    fn distance_matrix_symmetric(nodes in local_nodes_strategy(12)) {
        let dm = DistanceMatrix::from_positions(Position::new(0.05, 0.05), &nodes);
        prop_assert!(dm.is_symmetric(1e-12));
        for i in 0..dm.size() {
            prop_assert_eq!(dm.get(i, i), 0.0);
            for j in 0..dm.size() {
                prop_assert!(dm.get(i, j) >= 0.0);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: the GA's best-so-far trace is non-decreasing.
    #[test]
    fn ga_fitness_monotonic(nodes in local_nodes_strategy(10), seed in any::<u64>()) {
        let evaluator = TourEvaluator::new(
            Position::new(0.0, 0.0),
            &nodes,
            &VehicleProfile::default(),
            &OptimizationOptions::default(),
        );
        let solver = GeneticSolver::new(
            GaConfig::default()
                .with_population_size(20)
                .with_max_generations(25)
                .with_seed(seed),
        );
        let outcome = solver.run(&evaluator, Deadline::after(Duration::from_secs(5)));
        prop_assert!(outcome.history.windows(2).all(|w| w[1] >= w[0]));
        prop_assert!(verify_permutation(outcome.best.genes(), nodes.len()).is_ok());
    }

    /// Property: every algorithm returns a permutation and the hybrid winner
    /// is no worse than any candidate it ran.
    #[test]
    fn solvers_return_permutations(
        nodes in local_nodes_strategy(9),
        seed in any::<u64>(),
        algorithm in prop_oneof![
            Just(Algorithm::NearestNeighbor),
            Just(Algorithm::Genetic),
            Just(Algorithm::AntColony),
            Just(Algorithm::Hybrid),
        ],
    ) {
        let options = OptimizationOptions::default()
            .with_algorithm(algorithm)
            .with_max_iterations(30)
            .with_time_limit_ms(5_000);
        let request = OptimizationRequest::new(Position::new(0.0, 0.0), nodes.clone())
            .with_options(options);
        let engine = Engine::with_config(EngineConfig::default().with_seed(seed));
        let result = engine.optimize(&request).expect("valid request");

        let returned: Vec<Node> = result.best.sequence.clone();
        prop_assert_eq!(sorted_ids(&returned), sorted_ids(&nodes));
        prop_assert!(result.best.efficiency >= 0.0 && result.best.efficiency <= 1.0);

        let evaluator = TourEvaluator::new(
            request.start_position,
            &request.nodes,
            &request.vehicle,
            &request.options,
        );
        let index_of = |id: &str| nodes.iter().position(|n| n.id() == id).expect("known id");
        let best_order: Vec<usize> = result.best.ids().into_iter().map(index_of).collect();
        let best_cost = evaluator.cost(&best_order);
        for candidate in &result.candidates {
            if let Some(cost) = candidate.cost {
                prop_assert!(best_cost <= cost + 1e-12, "{best_cost} > {cost}");
            }
        }
    }
}
