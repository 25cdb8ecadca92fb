//! Optimization request and its validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Node, OptimizationOptions, Position, VehicleProfile};
use crate::error::ValidationError;

/// Input to one optimization call.
///
/// # Examples
///
/// ```
/// use u_tour::models::OptimizationRequest;
///
/// let json = r#"{
///     "nodes": [
///         {"id": "a", "position": [29.01, 41.0], "priority": 70},
///         {"id": "b", "position": [29.02, 41.0]}
///     ],
///     "startPosition": [29.0, 41.0],
///     "options": {"algorithm": "nearest_neighbor"}
/// }"#;
/// let request = OptimizationRequest::from_json(json).unwrap();
/// assert_eq!(request.nodes.len(), 2);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    /// Stops to order.
    pub nodes: Vec<Node>,
    /// Fixed origin of the first leg.
    pub start_position: Position,
    /// Vehicle profile; defaults apply to missing fields.
    #[serde(default)]
    pub vehicle: VehicleProfile,
    /// Optimization knobs.
    #[serde(default)]
    pub options: OptimizationOptions,
}

impl OptimizationRequest {
    /// Creates a request with default vehicle and options.
    pub fn new(start_position: Position, nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            start_position,
            vehicle: VehicleProfile::default(),
            options: OptimizationOptions::default(),
        }
    }

    /// Replaces the vehicle profile.
    pub fn with_vehicle(mut self, vehicle: VehicleProfile) -> Self {
        self.vehicle = vehicle;
        self
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: OptimizationOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses a request from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the request the way the request layer does.
    ///
    /// The engine calls this before optimizing so it can run standalone.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.nodes.is_empty() {
            return Err(ValidationError::NoNodes);
        }
        if !self.start_position.is_valid() {
            return Err(ValidationError::PositionOutOfRange {
                context: "startPosition".to_string(),
                lng: self.start_position.lng(),
                lat: self.start_position.lat(),
            });
        }

        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id()) {
                return Err(ValidationError::DuplicateNodeId(node.id().to_string()));
            }
            let p = node.position();
            if !p.is_valid() {
                return Err(ValidationError::PositionOutOfRange {
                    context: format!("node `{}`", node.id()),
                    lng: p.lng(),
                    lat: p.lat(),
                });
            }
            if !(1..=100).contains(&node.priority()) {
                return Err(ValidationError::PriorityOutOfRange {
                    id: node.id().to_string(),
                    priority: node.priority(),
                });
            }
        }

        validate_vehicle(&self.vehicle)?;
        self.options.validate()
    }
}

fn validate_vehicle(vehicle: &VehicleProfile) -> Result<(), ValidationError> {
    let capacity = vehicle.fuel_capacity();
    if !capacity.is_finite() || capacity < 0.0 {
        return Err(ValidationError::InvalidVehicle(format!(
            "fuelCapacity {capacity} must be >= 0"
        )));
    }
    let speed = vehicle.average_speed();
    if !speed.is_finite() || speed <= 0.0 || speed > 200.0 {
        return Err(ValidationError::InvalidVehicle(format!(
            "averageSpeed {speed} is outside (0, 200]"
        )));
    }
    let rate = vehicle.fuel_consumption_rate();
    if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
        return Err(ValidationError::InvalidVehicle(format!(
            "fuelConsumptionRate {rate} is outside [0, 100]"
        )));
    }
    Ok(())
}
