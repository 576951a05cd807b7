//! # Domain Types
//!
//! Core domain types for the rental fleet.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌───────────────────┐     │
//! │  │    Vehicle      │   │  RentalRequest  │   │ AllocationOutcome │     │
//! │  │  ─────────────  │   │  ─────────────  │   │  ───────────────  │     │
//! │  │  id (UUID)      │   │  customer_id    │   │  vehicle snapshot │     │
//! │  │  plate          │   │  min_capacity   │   │  price_cents      │     │
//! │  │  capacity       │   │  vehicle_id?    │   │  customer_id      │     │
//! │  │  daily_rate     │   └─────────────────┘   └───────────────────┘     │
//! │  │  status         │                                                   │
//! │  └─────────────────┘   ┌─────────────────────┐   ┌───────────────┐     │
//! │                        │ CustomerSettlement  │   │ BatchOutcome  │     │
//! │  ┌─────────────────┐   │  ─────────────────  │   │  ───────────  │     │
//! │  │  VehicleStatus  │   │  gross / discount   │   │  allocations  │     │
//! │  │  Available      │   │  net                │   │  customers    │     │
//! │  │  Rented         │   └─────────────────────┘   │  grand_total  │     │
//! │  └─────────────────┘                             └───────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FleetError, FleetResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_customer_id, validate_daily_rate, validate_min_capacity, validate_plate,
    validate_seating_capacity, validate_vehicle_id,
};

// =============================================================================
// Vehicle Status
// =============================================================================

/// The availability state of a vehicle.
///
/// A two-state machine: `Available ⇄ Rented`. Initial state is `Available`;
/// there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    /// Ready to be rented out.
    Available,
    /// Currently in use by a customer.
    Rented,
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Available
    }
}

// =============================================================================
// Vehicle
// =============================================================================

/// A single rentable unit.
///
/// ## Immutability
/// Identity, plate, capacity and daily rate never change after creation;
/// only `status` transitions, and only through [`Vehicle::rent`] and
/// [`Vehicle::release`]. Once a vehicle is held by a fleet, the fleet owns
/// all further transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier (UUID v4). Never the nil UUID.
    pub id: Uuid,

    /// License plate - business identifier (domain-unique not enforced).
    pub plate: String,

    /// Seating capacity (always positive).
    pub capacity: u32,

    /// Daily rental rate in cents (always positive).
    pub daily_rate_cents: i64,

    /// Current availability state.
    pub status: VehicleStatus,

    /// When the vehicle was created.
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Creates a new vehicle in the `Available` state.
    ///
    /// ## Validation
    /// - `id` must not be the nil UUID
    /// - `plate` must be non-empty (it is trimmed and bounded in length)
    /// - `capacity` must be positive
    /// - `daily_rate_cents` must be positive
    ///
    /// ## Example
    /// ```rust
    /// use motorpool_core::Vehicle;
    /// use uuid::Uuid;
    ///
    /// let vehicle = Vehicle::new(Uuid::new_v4(), "AB123CD", 4, 4000).unwrap();
    /// assert!(vehicle.is_available());
    /// assert_eq!(vehicle.daily_rate().cents(), 4000);
    /// ```
    pub fn new(
        id: Uuid,
        plate: &str,
        capacity: u32,
        daily_rate_cents: i64,
    ) -> Result<Self, ValidationError> {
        validate_vehicle_id(&id)?;
        let plate = validate_plate(plate)?;
        validate_seating_capacity(capacity)?;
        validate_daily_rate(daily_rate_cents)?;

        Ok(Vehicle {
            id,
            plate,
            capacity,
            daily_rate_cents,
            status: VehicleStatus::Available,
            created_at: Utc::now(),
        })
    }

    /// Returns the daily rate as a Money type.
    #[inline]
    pub fn daily_rate(&self) -> Money {
        Money::from_cents(self.daily_rate_cents)
    }

    /// Checks whether the vehicle is available for rental.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    /// Transitions the vehicle to `Rented`.
    ///
    /// Fails with [`FleetError::AlreadyRented`] if it is already rented:
    /// a rented vehicle cannot be rented again.
    pub fn rent(&mut self) -> FleetResult<()> {
        match self.status {
            VehicleStatus::Available => {
                self.status = VehicleStatus::Rented;
                Ok(())
            }
            VehicleStatus::Rented => Err(FleetError::AlreadyRented { vehicle_id: self.id }),
        }
    }

    /// Returns the vehicle to the `Available` state.
    ///
    /// Idempotent: releasing an already-available vehicle is a no-op, not an
    /// error.
    pub fn release(&mut self) {
        self.status = VehicleStatus::Available;
    }
}

// =============================================================================
// Rental Request
// =============================================================================

/// A request to rent one vehicle, tagged with the requesting customer.
///
/// Two forms, mirroring the two allocation paths:
/// - [`RentalRequest::for_vehicle`] names a specific vehicle id and a
///   minimum capacity to re-validate against it
/// - [`RentalRequest::for_capacity`] asks for any vehicle meeting a
///   minimum capacity (best-fit selection)
///
/// Fields are private so that every request in existence passed validation:
/// the minimum capacity is always positive and the customer id non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRequest {
    customer_id: String,
    min_capacity: u32,
    vehicle_id: Option<Uuid>,
}

impl RentalRequest {
    /// Builds a request for a specific vehicle by id.
    pub fn for_vehicle(
        customer_id: &str,
        vehicle_id: Uuid,
        min_capacity: u32,
    ) -> Result<Self, ValidationError> {
        let customer_id = validate_customer_id(customer_id)?;
        validate_vehicle_id(&vehicle_id)?;
        validate_min_capacity(min_capacity)?;

        Ok(RentalRequest {
            customer_id,
            min_capacity,
            vehicle_id: Some(vehicle_id),
        })
    }

    /// Builds a request for any vehicle with at least `min_capacity` seats.
    pub fn for_capacity(customer_id: &str, min_capacity: u32) -> Result<Self, ValidationError> {
        let customer_id = validate_customer_id(customer_id)?;
        validate_min_capacity(min_capacity)?;

        Ok(RentalRequest {
            customer_id,
            min_capacity,
            vehicle_id: None,
        })
    }

    /// The customer this request belongs to.
    #[inline]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// The minimum seating capacity required.
    #[inline]
    pub fn min_capacity(&self) -> u32 {
        self.min_capacity
    }

    /// The specific vehicle requested, if any.
    #[inline]
    pub fn vehicle_id(&self) -> Option<Uuid> {
        self.vehicle_id
    }
}

// =============================================================================
// Allocation Outcome
// =============================================================================

/// The result of one successful allocation.
///
/// Uses the snapshot pattern: `vehicle` is a copy of the member at the
/// moment of allocation (already transitioned to `Rented`), and
/// `price_cents` is the daily rate captured before the transition. Later
/// fleet changes never retroactively alter an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Snapshot of the allocated vehicle.
    pub vehicle: Vehicle,

    /// Price charged: the vehicle's daily rate at allocation time.
    pub price_cents: i64,

    /// The customer the vehicle was allocated to.
    pub customer_id: String,
}

impl AllocationOutcome {
    /// Returns the charged price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Settlement Types
// =============================================================================

/// Per-customer financial summary over one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSettlement {
    /// The customer being settled.
    pub customer_id: String,

    /// Sum of all prices charged to this customer in the batch.
    pub gross_cents: i64,

    /// Discount applied (zero unless the customer has multiple bookings).
    pub discount_cents: i64,

    /// Amount due: gross minus discount, floored at zero.
    pub net_cents: i64,
}

impl CustomerSettlement {
    /// Returns the gross total as Money.
    #[inline]
    pub fn gross(&self) -> Money {
        Money::from_cents(self.gross_cents)
    }

    /// Returns the discount amount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Returns the net total as Money.
    #[inline]
    pub fn net(&self) -> Money {
        Money::from_cents(self.net_cents)
    }
}

/// The full result of an atomically processed batch.
///
/// `customers` is a `BTreeMap` keyed by customer id so that iteration order
/// is deterministic: identical inputs always produce identical outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Allocations in request order.
    pub allocations: Vec<AllocationOutcome>,

    /// Per-customer settlement, keyed by customer id.
    pub customers: BTreeMap<String, CustomerSettlement>,

    /// Sum of all per-customer net totals.
    pub grand_total_cents: i64,
}

impl BatchOutcome {
    /// Returns the grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vehicle() -> Vehicle {
        Vehicle::new(Uuid::new_v4(), "AB123CD", 4, 4000).unwrap()
    }

    #[test]
    fn test_vehicle_construction_validates_inputs() {
        // Nil id
        assert!(Vehicle::new(Uuid::nil(), "AB123CD", 4, 4000).is_err());
        // Empty plate
        assert!(Vehicle::new(Uuid::new_v4(), "", 4, 4000).is_err());
        assert!(Vehicle::new(Uuid::new_v4(), "   ", 4, 4000).is_err());
        // Zero capacity
        assert!(Vehicle::new(Uuid::new_v4(), "AB123CD", 0, 4000).is_err());
        // Non-positive rate
        assert!(Vehicle::new(Uuid::new_v4(), "AB123CD", 4, 0).is_err());
        assert!(Vehicle::new(Uuid::new_v4(), "AB123CD", 4, -100).is_err());
    }

    #[test]
    fn test_vehicle_starts_available() {
        let vehicle = test_vehicle();
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert!(vehicle.is_available());
    }

    #[test]
    fn test_vehicle_plate_is_trimmed() {
        let vehicle = Vehicle::new(Uuid::new_v4(), "  AB123CD  ", 4, 4000).unwrap();
        assert_eq!(vehicle.plate, "AB123CD");
    }

    #[test]
    fn test_rent_transitions_to_rented() {
        let mut vehicle = test_vehicle();
        vehicle.rent().unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Rented);
    }

    #[test]
    fn test_rent_while_rented_fails() {
        let mut vehicle = test_vehicle();
        vehicle.rent().unwrap();

        let err = vehicle.rent().unwrap_err();
        assert!(matches!(err, FleetError::AlreadyRented { vehicle_id } if vehicle_id == vehicle.id));
        // State unchanged by the failed transition.
        assert_eq!(vehicle.status, VehicleStatus::Rented);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut vehicle = test_vehicle();
        vehicle.rent().unwrap();

        vehicle.release();
        assert!(vehicle.is_available());

        // Releasing an already-available vehicle is a no-op, not an error.
        vehicle.release();
        assert!(vehicle.is_available());
    }

    #[test]
    fn test_request_requires_positive_min_capacity() {
        assert!(RentalRequest::for_capacity("alice", 0).is_err());
        assert!(RentalRequest::for_vehicle("alice", Uuid::new_v4(), 0).is_err());
        assert!(RentalRequest::for_capacity("alice", 1).is_ok());
    }

    #[test]
    fn test_request_requires_customer_id() {
        assert!(RentalRequest::for_capacity("", 2).is_err());
        assert!(RentalRequest::for_capacity("   ", 2).is_err());
    }

    #[test]
    fn test_request_accessors() {
        let id = Uuid::new_v4();
        let request = RentalRequest::for_vehicle("alice", id, 3).unwrap();
        assert_eq!(request.customer_id(), "alice");
        assert_eq!(request.min_capacity(), 3);
        assert_eq!(request.vehicle_id(), Some(id));

        let request = RentalRequest::for_capacity("bob", 5).unwrap();
        assert_eq!(request.vehicle_id(), None);
    }

    #[test]
    fn test_outcome_serde_round_trip() {
        let outcome = AllocationOutcome {
            vehicle: test_vehicle(),
            price_cents: 4000,
            customer_id: "alice".to_string(),
        };

        let json = serde_json::to_string(&outcome).unwrap();
        let back: AllocationOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
        assert_eq!(back.price().cents(), 4000);
    }
}
