//! Geo/cost model.
//!
//! Pure functions converting coordinates into distance, travel time, fuel,
//! and emissions, plus a dense distance matrix for the solvers.

mod geo;
mod matrix;

pub use geo::{
    estimate_tour, haversine_km, leg_fuel_cost, leg_time, TourMetrics, EARTH_RADIUS_KM,
};
pub use matrix::DistanceMatrix;
