//! Great-circle distance and per-leg cost conversions.
//!
//! Distances are geometric: no road network is consulted.

use serde::{Deserialize, Serialize};

use crate::models::{Node, Position, VehicleProfile};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two positions.
///
/// Symmetric, zero for identical points, and satisfies the triangle
/// inequality up to floating-point rounding.
///
/// # Examples
///
/// ```
/// use u_tour::distance::haversine_km;
/// use u_tour::models::Position;
///
/// let a = Position::new(0.0, 0.0);
/// let b = Position::new(1.0, 0.0);
/// // One degree of longitude on the equator.
/// assert!((haversine_km(a, b) - 111.195).abs() < 0.01);
/// assert_eq!(haversine_km(a, a), 0.0);
/// ```
pub fn haversine_km(a: Position, b: Position) -> f64 {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let d_phi = (b.lat() - a.lat()).to_radians();
    let d_lambda = (b.lng() - a.lng()).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Hours needed to drive `distance_km` at `average_speed_kmh`.
///
/// Speed is validated to be positive before optimization starts, so no
/// guard is applied here.
pub fn leg_time(distance_km: f64, average_speed_kmh: f64) -> f64 {
    distance_km / average_speed_kmh
}

/// Fuel consumed over `distance_km` at `rate_per_100km`.
pub fn leg_fuel_cost(distance_km: f64, rate_per_100km: f64) -> f64 {
    distance_km * rate_per_100km / 100.0
}

/// Aggregate distance, time, fuel and emissions of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourMetrics {
    /// Kilometers.
    pub distance_km: f64,
    /// Hours.
    pub time_hours: f64,
    /// Fuel units (liters or kWh-equivalent).
    pub fuel: f64,
    /// Kilograms of CO2.
    pub co2_kg: f64,
}

impl TourMetrics {
    /// Derives time, fuel and CO2 from a total distance.
    ///
    /// Every leg is linear in distance, so converting the sum equals
    /// summing the converted legs.
    pub fn from_distance(distance_km: f64, vehicle: &VehicleProfile) -> Self {
        let fuel = leg_fuel_cost(distance_km, vehicle.fuel_consumption_rate());
        Self {
            distance_km,
            time_hours: leg_time(distance_km, vehicle.average_speed()),
            fuel,
            co2_kg: fuel * vehicle.fuel_type().co2_per_unit(),
        }
    }
}

/// Computes the metrics of visiting `nodes` in the given order from `start`.
///
/// Usable for pre-flight estimates without running any optimizer.
///
/// # Examples
///
/// ```
/// use u_tour::distance::estimate_tour;
/// use u_tour::models::{Node, Position, VehicleProfile};
///
/// let start = Position::new(0.0, 0.0);
/// let nodes = vec![
///     Node::new("a", Position::new(1.0, 0.0)),
///     Node::new("b", Position::new(2.0, 0.0)),
/// ];
/// let m = estimate_tour(start, &nodes, &VehicleProfile::default());
/// assert!((m.distance_km - 222.39).abs() < 0.01);
/// assert!((m.time_hours - m.distance_km / 40.0).abs() < 1e-9);
/// ```
pub fn estimate_tour(start: Position, nodes: &[Node], vehicle: &VehicleProfile) -> TourMetrics {
    let mut prev = start;
    let mut distance = 0.0;
    for node in nodes {
        distance += haversine_km(prev, node.position());
        prev = node.position();
    }
    TourMetrics::from_distance(distance, vehicle)
}
