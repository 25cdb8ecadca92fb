//! Vehicle fuel and speed profile.

use serde::{Deserialize, Serialize};

/// Propulsion type of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    /// Petrol engine.
    Gasoline,
    /// Diesel engine.
    #[default]
    Diesel,
    /// Battery electric; consumption is in kWh-equivalent units.
    Electric,
    /// Petrol/electric hybrid.
    Hybrid,
}

impl FuelType {
    /// Direct CO2 emission in kg per unit of fuel consumed.
    pub fn co2_per_unit(&self) -> f64 {
        match self {
            FuelType::Gasoline => 2.31,
            FuelType::Diesel => 2.68,
            FuelType::Electric => 0.45,
            FuelType::Hybrid => 1.50,
        }
    }

    /// Lowercase name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Diesel => "diesel",
            FuelType::Electric => "electric",
            FuelType::Hybrid => "hybrid",
        }
    }
}

/// Converts distance into travel time and fuel for one vehicle.
///
/// The profile does not constrain feasibility: no range limit is enforced,
/// [`fuel_capacity`](Self::fuel_capacity) is only used to flag tours that
/// would need refuelling.
///
/// # Examples
///
/// ```
/// use u_tour::models::{FuelType, VehicleProfile};
///
/// let v = VehicleProfile::default();
/// assert_eq!(v.fuel_type(), FuelType::Diesel);
/// assert_eq!(v.average_speed(), 40.0);
///
/// let ev = VehicleProfile::new("ev-1")
///     .with_fuel_type(FuelType::Electric)
///     .with_average_speed(60.0)
///     .with_fuel_consumption_rate(18.0);
/// assert_eq!(ev.fuel_consumption_rate(), 18.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleProfile {
    id: String,
    fuel_type: FuelType,
    fuel_capacity: f64,
    average_speed: f64,
    fuel_consumption_rate: f64,
}

impl VehicleProfile {
    /// Creates a profile with default fuel and speed figures.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the fuel type.
    pub fn with_fuel_type(mut self, fuel_type: FuelType) -> Self {
        self.fuel_type = fuel_type;
        self
    }

    /// Sets the tank (or battery) capacity.
    pub fn with_fuel_capacity(mut self, capacity: f64) -> Self {
        self.fuel_capacity = capacity;
        self
    }

    /// Sets the average speed in km/h.
    pub fn with_average_speed(mut self, speed: f64) -> Self {
        self.average_speed = speed;
        self
    }

    /// Sets the consumption in L/100km.
    pub fn with_fuel_consumption_rate(mut self, rate: f64) -> Self {
        self.fuel_consumption_rate = rate;
        self
    }

    /// Vehicle id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fuel type.
    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    /// Tank capacity in liters; zero means unknown.
    pub fn fuel_capacity(&self) -> f64 {
        self.fuel_capacity
    }

    /// Average speed in km/h.
    pub fn average_speed(&self) -> f64 {
        self.average_speed
    }

    /// Consumption in L/100km.
    pub fn fuel_consumption_rate(&self) -> f64 {
        self.fuel_consumption_rate
    }
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            fuel_type: FuelType::Diesel,
            fuel_capacity: 100.0,
            average_speed: 40.0,
            fuel_consumption_rate: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_default() {
        let v = VehicleProfile::default();
        assert_eq!(v.id(), "default");
        assert_eq!(v.fuel_capacity(), 100.0);
        assert_eq!(v.fuel_consumption_rate(), 30.0);
    }

    #[test]
    fn test_vehicle_partial_json() {
        let v: VehicleProfile =
            serde_json::from_str(r#"{"fuelType":"electric","averageSpeed":55.5}"#)
                .expect("valid profile");
        assert_eq!(v.fuel_type(), FuelType::Electric);
        assert_eq!(v.average_speed(), 55.5);
        assert_eq!(v.id(), "default");
        assert_eq!(v.fuel_consumption_rate(), 30.0);
    }

    #[test]
    fn test_unknown_fuel_type_rejected() {
        let res = serde_json::from_str::<VehicleProfile>(r#"{"fuelType":"coal"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_co2_factors() {
        assert!(FuelType::Diesel.co2_per_unit() > FuelType::Gasoline.co2_per_unit());
        assert!(FuelType::Electric.co2_per_unit() < FuelType::Hybrid.co2_per_unit());
        assert_eq!(FuelType::Hybrid.as_str(), "hybrid");
    }
}
