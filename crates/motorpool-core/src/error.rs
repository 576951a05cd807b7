//! # Error Types
//!
//! Domain-specific error types for motorpool-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  motorpool-core errors (this file)                                     │
//! │  ├── FleetError       - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → FleetError → caller                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (vehicle id, capacity, rate)
//! 3. Errors are enum variants, never String
//! 4. Every domain rule violation is reported as a value, never swallowed

use thiserror::Error;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Fleet Error
// =============================================================================

/// Domain rule violations raised by fleet operations.
///
/// Each variant identifies the rule that was broken and carries enough
/// context to explain the rejection to a caller.
#[derive(Debug, Error)]
pub enum FleetError {
    /// No member of the fleet has the given identity.
    ///
    /// ## When This Occurs
    /// - Removing a vehicle that was never added (or already removed)
    /// - A rental request naming an unknown vehicle id
    #[error("Vehicle not found: {vehicle_id}")]
    NotFound { vehicle_id: Uuid },

    /// The vehicle exists but is currently rented out.
    ///
    /// Also raised when a batch request names a vehicle that an earlier
    /// request in the same batch has already claimed.
    #[error("Vehicle {vehicle_id} is already rented")]
    AlreadyRented { vehicle_id: Uuid },

    /// A specific-vehicle request asked for more seats than the vehicle has.
    #[error("Vehicle {vehicle_id} seats {capacity}, requested {requested}")]
    InsufficientCapacity {
        vehicle_id: Uuid,
        capacity: u32,
        requested: u32,
    },

    /// No available member can satisfy the capacity requirement.
    ///
    /// ## User Workflow
    /// ```text
    /// Request: any vehicle, 7+ seats
    ///      │
    ///      ▼
    /// Best-fit scan over available members
    ///      │
    ///      ▼
    /// Largest available vehicle seats 5
    ///      │
    ///      ▼
    /// NoSuitableVehicle { requested: 7 }
    /// ```
    #[error("No available vehicle with capacity {requested} or more")]
    NoSuitableVehicle { requested: u32 },

    /// A batch named the same vehicle id in two different requests.
    ///
    /// Rejected before any allocation is attempted, independent of whether
    /// the vehicle is available.
    #[error("Batch names vehicle {vehicle_id} more than once")]
    DuplicateInBatch { vehicle_id: Uuid },

    /// Adding the vehicle would break capacity-price monotonicity: within a
    /// fleet, a higher-capacity vehicle never costs less per day than a
    /// lower-capacity one. The conflicting member is cited.
    #[error(
        "Cannot add {capacity}-seat vehicle at {daily_rate}/day: \
         conflicts with {member_capacity}-seat member at {member_rate}/day"
    )]
    InvariantViolation {
        capacity: u32,
        daily_rate: Money,
        member_capacity: u32,
        member_rate: Money,
    },

    /// Discount rate outside the closed range 0% to 100%.
    #[error("Discount rate {bps} bps is outside the allowed range 0..=10000")]
    InvalidDiscount { bps: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied data doesn't meet requirements.
/// Used for early validation before domain logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., the nil UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., a vehicle id already in the fleet).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with FleetError.
pub type FleetResult<T> = Result<T, FleetError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let id = Uuid::new_v4();
        let err = FleetError::InsufficientCapacity {
            vehicle_id: id,
            capacity: 4,
            requested: 6,
        };
        assert_eq!(
            err.to_string(),
            format!("Vehicle {id} seats 4, requested 6")
        );

        let err = FleetError::NoSuitableVehicle { requested: 7 };
        assert_eq!(
            err.to_string(),
            "No available vehicle with capacity 7 or more"
        );
    }

    #[test]
    fn test_invariant_violation_cites_conflicting_member() {
        let err = FleetError::InvariantViolation {
            capacity: 2,
            daily_rate: Money::from_cents(3000),
            member_capacity: 5,
            member_rate: Money::from_cents(2000),
        };
        assert_eq!(
            err.to_string(),
            "Cannot add 2-seat vehicle at 30.00/day: \
             conflicts with 5-seat member at 20.00/day"
        );
    }

    #[test]
    fn test_validation_converts_to_fleet_error() {
        let validation_err = ValidationError::Required {
            field: "plate".to_string(),
        };
        let fleet_err: FleetError = validation_err.into();
        assert!(matches!(fleet_err, FleetError::Validation(_)));
    }
}
