//! Constructive heuristics for building initial tours.
//!
//! - [`nearest_neighbor`] — Cheapest-next-stop greedy nearest neighbor, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::{nearest_neighbor, NearestNeighborSolver};
