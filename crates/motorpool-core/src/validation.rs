//! # Validation Module
//!
//! Input validation utilities for the fleet core.
//!
//! ## Validation Strategy
//! Validation runs at construction boundaries (vehicle and request
//! constructors, batch entry) so that domain logic only ever sees data that
//! already satisfies the basic field rules. Cross-entity rules (the
//! capacity-price invariant, availability) live in the fleet itself.
//!
//! ## Usage
//! ```rust
//! use motorpool_core::validation::{validate_plate, validate_seating_capacity};
//!
//! assert!(validate_plate("AB123CD").is_ok());
//! assert!(validate_seating_capacity(4).is_ok());
//! assert!(validate_seating_capacity(0).is_err());
//! ```

use uuid::Uuid;

use crate::error::ValidationError;
use crate::{MAX_BATCH_REQUESTS, MAX_CUSTOMER_ID_LENGTH, MAX_PLATE_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates a vehicle identity.
///
/// ## Rules
/// - Must not be the nil UUID (all zeroes)
pub fn validate_vehicle_id(id: &Uuid) -> ValidationResult<()> {
    if id.is_nil() {
        return Err(ValidationError::InvalidFormat {
            field: "vehicle id".to_string(),
            reason: "must not be the nil UUID".to_string(),
        });
    }

    Ok(())
}

/// Validates a customer identifier.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 64 characters
///
/// ## Returns
/// The trimmed customer id.
pub fn validate_customer_id(customer_id: &str) -> ValidationResult<String> {
    let customer_id = customer_id.trim();

    if customer_id.is_empty() {
        return Err(ValidationError::Required {
            field: "customer id".to_string(),
        });
    }

    if customer_id.len() > MAX_CUSTOMER_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "customer id".to_string(),
            max: MAX_CUSTOMER_ID_LENGTH,
        });
    }

    Ok(customer_id.to_string())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a license plate.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 16 characters
///
/// Plate formats vary by jurisdiction, so no character-set rule is applied.
///
/// ## Returns
/// The trimmed plate string.
pub fn validate_plate(plate: &str) -> ValidationResult<String> {
    let plate = plate.trim();

    if plate.is_empty() {
        return Err(ValidationError::Required {
            field: "plate".to_string(),
        });
    }

    if plate.len() > MAX_PLATE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "plate".to_string(),
            max: MAX_PLATE_LENGTH,
        });
    }

    Ok(plate.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a vehicle's seating capacity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_seating_capacity(capacity: u32) -> ValidationResult<()> {
    if capacity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "capacity".to_string(),
        });
    }

    Ok(())
}

/// Validates the minimum capacity of a rental request.
///
/// ## Rules
/// - Must be positive (> 0): a request for zero seats is meaningless
pub fn validate_min_capacity(min_capacity: u32) -> ValidationResult<()> {
    if min_capacity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "minimum capacity".to_string(),
        });
    }

    Ok(())
}

/// Validates a daily rate in cents.
///
/// ## Rules
/// - Must be positive (> 0): free or negative rates are invalid
pub fn validate_daily_rate(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "daily rate".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of requests in a batch.
///
/// ## Rules
/// - Must not exceed MAX_BATCH_REQUESTS (100)
pub fn validate_batch_size(request_count: usize) -> ValidationResult<()> {
    if request_count > MAX_BATCH_REQUESTS {
        return Err(ValidationError::OutOfRange {
            field: "batch requests".to_string(),
            min: 0,
            max: MAX_BATCH_REQUESTS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
