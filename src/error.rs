//! Error types surfaced by [`solve`](crate::solve).
//!
//! [`SolveError`] has three variants. [`SolveError::Validation`] wraps a
//! [`ValidationError`] for a structurally malformed instance and is reported
//! before any search work. [`SolveError::Infeasible`] covers well-formed
//! instances that admit no assignment within the search effort.
//! [`SolveError::Internal`] marks a produced plan that failed final
//! verification; callers should treat it as a defect, not an outcome.

use std::fmt;

use crate::models::MAX_INPUT_VALUE;

/// The constraint family a dimension enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    /// Cumulative load against vehicle capacity.
    Capacity,
    /// Cumulative time against location time windows.
    TimeWindow,
    /// Cumulative travel distance against a vehicle's distance cap.
    Distance,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Capacity => write!(f, "capacity"),
            ConstraintKind::TimeWindow => write!(f, "time window"),
            ConstraintKind::Distance => write!(f, "distance"),
        }
    }
}

/// Coarse classification of every caller-visible failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintClass {
    Capacity,
    TimeWindow,
    Distance,
    MalformedInput,
    Internal,
}

impl From<ConstraintKind> for ConstraintClass {
    fn from(kind: ConstraintKind) -> Self {
        match kind {
            ConstraintKind::Capacity => ConstraintClass::Capacity,
            ConstraintKind::TimeWindow => ConstraintClass::TimeWindow,
            ConstraintKind::Distance => ConstraintClass::Distance,
        }
    }
}

/// Which of the two input matrices a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    Distance,
    Time,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixKind::Distance => write!(f, "distance_matrix"),
            MatrixKind::Time => write!(f, "time_matrix"),
        }
    }
}

/// A structural defect in a [`ProblemInstance`](crate::models::ProblemInstance).
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    TooFewLocations {
        count: usize,
    },
    NoVehicles,
    DepotOutOfRange {
        depot_index: usize,
        num_locations: usize,
    },
    MatrixRowCount {
        matrix: MatrixKind,
        expected: usize,
        actual: usize,
    },
    MatrixRowLength {
        matrix: MatrixKind,
        row: usize,
        expected: usize,
        actual: usize,
    },
    NegativeMatrixEntry {
        matrix: MatrixKind,
        row: usize,
        column: usize,
        value: i64,
    },
    MatrixEntryTooLarge {
        matrix: MatrixKind,
        row: usize,
        column: usize,
        value: i64,
    },
    DepotDemand {
        location: usize,
        demand: i64,
    },
    /// A scalar input above [`MAX_INPUT_VALUE`]; `field` names it.
    ValueTooLarge {
        field: String,
        value: i64,
    },
    NegativeDemand {
        location: usize,
        demand: i64,
    },
    NegativeServiceTime {
        location: usize,
        service_time: i64,
    },
    InvalidTimeWindow {
        location: usize,
        start: i64,
        end: i64,
    },
    NegativeCapacity {
        vehicle: usize,
        capacity: i64,
    },
    NegativeMaxDistance {
        vehicle: usize,
        max_distance: i64,
    },
    ZeroTimeLimit,
    NegativeFixedCost {
        cost: i64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TooFewLocations { count } => write!(
                f,
                "malformed input: at least 2 locations (depot + 1 stop) are required, got {}",
                count
            ),
            ValidationError::NoVehicles => {
                write!(f, "malformed input: at least 1 vehicle is required")
            }
            ValidationError::DepotOutOfRange {
                depot_index,
                num_locations,
            } => write!(
                f,
                "malformed input: depot_index {} is out of range for {} locations",
                depot_index, num_locations
            ),
            ValidationError::MatrixRowCount {
                matrix,
                expected,
                actual,
            } => write!(
                f,
                "malformed input: {} must be {}x{}, got {} rows",
                matrix, expected, expected, actual
            ),
            ValidationError::MatrixRowLength {
                matrix,
                row,
                expected,
                actual,
            } => write!(
                f,
                "malformed input: {} row {} has {} entries, expected {}",
                matrix, row, actual, expected
            ),
            ValidationError::NegativeMatrixEntry {
                matrix,
                row,
                column,
                value,
            } => write!(
                f,
                "malformed input: {}[{}][{}] = {} is negative",
                matrix, row, column, value
            ),
            ValidationError::MatrixEntryTooLarge {
                matrix,
                row,
                column,
                value,
            } => write!(
                f,
                "malformed input: {}[{}][{}] = {} exceeds the maximum {}",
                matrix, row, column, value, MAX_INPUT_VALUE
            ),
            ValidationError::DepotDemand { location, demand } => write!(
                f,
                "malformed input: depot location {} has demand {}, expected 0",
                location, demand
            ),
            ValidationError::ValueTooLarge { field, value } => write!(
                f,
                "malformed input: {} = {} exceeds the maximum {}",
                field, value, MAX_INPUT_VALUE
            ),
            ValidationError::NegativeDemand { location, demand } => write!(
                f,
                "malformed input: location {} has negative demand {}",
                location, demand
            ),
            ValidationError::NegativeServiceTime {
                location,
                service_time,
            } => write!(
                f,
                "malformed input: location {} has negative service time {}",
                location, service_time
            ),
            ValidationError::InvalidTimeWindow {
                location,
                start,
                end,
            } => write!(
                f,
                "malformed input: location {} has invalid time window [{}, {}]",
                location, start, end
            ),
            ValidationError::NegativeCapacity { vehicle, capacity } => write!(
                f,
                "malformed input: vehicle {} has negative capacity {}",
                vehicle, capacity
            ),
            ValidationError::NegativeMaxDistance {
                vehicle,
                max_distance,
            } => write!(
                f,
                "malformed input: vehicle {} has negative max distance {}",
                vehicle, max_distance
            ),
            ValidationError::ZeroTimeLimit => {
                write!(f, "malformed input: time_limit_seconds must be positive")
            }
            ValidationError::NegativeFixedCost { cost } => write!(
                f,
                "malformed input: fixed_vehicle_cost {} is negative",
                cost
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure outcome of a solve call.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The instance is structurally inconsistent.
    Validation(ValidationError),
    /// No assignment of all locations satisfies every dimension.
    Infeasible {
        constraint: ConstraintKind,
        message: String,
    },
    /// A produced plan violated its own bounds.
    Internal(String),
}

impl SolveError {
    pub(crate) fn infeasible(constraint: ConstraintKind, message: impl Into<String>) -> Self {
        SolveError::Infeasible {
            constraint,
            message: message.into(),
        }
    }

    /// The constraint class implicated by this failure.
    pub fn constraint_class(&self) -> ConstraintClass {
        match self {
            SolveError::Validation(_) => ConstraintClass::MalformedInput,
            SolveError::Infeasible { constraint, .. } => (*constraint).into(),
            SolveError::Internal(_) => ConstraintClass::Internal,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SolveError::Validation(_))
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveError::Infeasible { .. })
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Validation(err) => write!(f, "{}", err),
            SolveError::Infeasible {
                constraint,
                message,
            } => write!(f, "infeasible ({} constraint): {}", constraint, message),
            SolveError::Internal(message) => {
                write!(f, "internal error: produced plan failed verification: {}", message)
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for SolveError {
    fn from(err: ValidationError) -> Self {
        SolveError::Validation(err)
    }
}

pub type SolveResult<T> = std::result::Result<T, SolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_matrix() {
        let err = SolveError::from(ValidationError::MatrixRowLength {
            matrix: MatrixKind::Distance,
            row: 2,
            expected: 3,
            actual: 2,
        });
        let msg = err.to_string();
        assert!(msg.contains("malformed input"));
        assert!(msg.contains("distance_matrix row 2"));
        assert_eq!(err.constraint_class(), ConstraintClass::MalformedInput);
        assert!(err.is_validation());
    }

    #[test]
    fn test_infeasible_message_names_constraint() {
        let err = SolveError::infeasible(ConstraintKind::TimeWindow, "location 3 unreachable");
        assert_eq!(
            err.to_string(),
            "infeasible (time window constraint): location 3 unreachable"
        );
        assert_eq!(err.constraint_class(), ConstraintClass::TimeWindow);
        assert!(err.is_infeasible());
    }

    #[test]
    fn test_bound_messages_name_the_field() {
        let err = ValidationError::ValueTooLarge {
            field: "vehicle 2 capacity".to_string(),
            value: i64::MAX,
        };
        assert!(err.to_string().starts_with("malformed input: vehicle 2 capacity"));
        let err = ValidationError::DepotDemand {
            location: 0,
            demand: 5,
        };
        assert_eq!(
            err.to_string(),
            "malformed input: depot location 0 has demand 5, expected 0"
        );
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err = SolveError::from(ValidationError::NoVehicles);
        assert!(err.source().is_some());
        let err = SolveError::Internal("x".into());
        assert!(err.source().is_none());
    }
}
