//! Error types.
//!
//! Validation errors describe requests the engine refuses to run. Solve
//! errors describe a single solver failing; the orchestrator contains them
//! and never surfaces them as a failed optimization.

use thiserror::Error;

/// A request rejected before optimization starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The node list is empty.
    #[error("at least one node is required")]
    NoNodes,
    /// Two nodes share the same id.
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(String),
    /// A coordinate is outside the valid longitude/latitude range.
    #[error("{context}: position [{lng}, {lat}] is out of range")]
    PositionOutOfRange {
        /// Which position was invalid (node id or `startPosition`).
        context: String,
        /// Longitude.
        lng: f64,
        /// Latitude.
        lat: f64,
    },
    /// A node priority is outside 1..=100.
    #[error("node `{id}`: priority {priority} is outside 1..=100")]
    PriorityOutOfRange {
        /// Node id.
        id: String,
        /// Offending priority.
        priority: u32,
    },
    /// A vehicle profile field is invalid.
    #[error("vehicle: {0}")]
    InvalidVehicle(String),
    /// An optimization option is outside its allowed range.
    #[error("options: {0}")]
    InvalidOption(String),
    /// The request could not be parsed.
    #[error("malformed request: {0}")]
    Malformed(String),
}

/// A failure inside one solver run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The solver produced something that is not a permutation of the nodes.
    #[error("{algorithm} returned an invalid tour: {reason}")]
    InvalidTour {
        /// Solver name.
        algorithm: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// The best tour's cost was NaN or infinite.
    #[error("{algorithm} produced a non-finite cost")]
    NonFiniteCost {
        /// Solver name.
        algorithm: &'static str,
    },
    /// The deadline expired before the solver built a single tour.
    #[error("{algorithm} built no tour before the deadline")]
    NoTour {
        /// Solver name.
        algorithm: &'static str,
    },
    /// The solver panicked.
    #[error("{algorithm} panicked: {message}")]
    Panicked {
        /// Solver name.
        algorithm: &'static str,
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::NoNodes.to_string(),
            "at least one node is required"
        );
        let err = ValidationError::PriorityOutOfRange {
            id: "a".into(),
            priority: 0,
        };
        assert_eq!(err.to_string(), "node `a`: priority 0 is outside 1..=100");
    }

    #[test]
    fn test_solve_error_message() {
        let err = SolveError::Panicked {
            algorithm: "genetic",
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "genetic panicked: boom");
        let err = SolveError::NoTour {
            algorithm: "ant_colony",
        };
        assert_eq!(err.to_string(), "ant_colony built no tour before the deadline");
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("nope").expect_err("invalid json");
        assert!(matches!(
            ValidationError::from(err),
            ValidationError::Malformed(_)
        ));
    }
}
