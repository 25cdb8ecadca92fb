//! Positions and waypoint nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default priority for nodes that do not specify one.
pub const DEFAULT_PRIORITY: u32 = 50;

/// A geographic point as `(longitude, latitude)` in degrees.
///
/// Serializes as a two-element `[lng, lat]` array.
///
/// # Examples
///
/// ```
/// use u_tour::models::Position;
///
/// let p = Position::new(29.0, 41.0);
/// assert_eq!(p.lng(), 29.0);
/// assert_eq!(p.lat(), 41.0);
/// assert!(p.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    lng: f64,
    lat: f64,
}

impl Position {
    /// Creates a position from longitude and latitude.
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns `true` if both coordinates are finite and in range.
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<[f64; 2]> for Position {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self::new(lng, lat)
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.lng, p.lat]
    }
}

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

/// A stop to visit.
///
/// Nodes are immutable for the duration of an optimization call. The
/// metadata map is carried through untouched.
///
/// # Examples
///
/// ```
/// use u_tour::models::{Node, Position};
///
/// let n = Node::new("bin-7", Position::new(29.01, 41.0)).with_priority(80);
/// assert_eq!(n.id(), "bin-7");
/// assert_eq!(n.priority(), 80);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    position: Position,
    #[serde(default = "default_priority")]
    priority: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, serde_json::Value>,
}

impl Node {
    /// Creates a node with the default priority and no metadata.
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            priority: DEFAULT_PRIORITY,
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the priority (1..=100, higher is more urgent).
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Attaches a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Node id, unique within a request.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Location of the stop.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Priority in 1..=100.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Opaque caller metadata.
    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }
}
