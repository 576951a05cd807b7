//! # motorpool-core: Pure Business Logic for the Motorpool Rental Fleet
//!
//! This crate is the **heart** of Motorpool. It models a rental fleet that
//! assigns vehicles to rental requests under a capacity constraint, as pure
//! logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Motorpool Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Callers (storage / presentation layers)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ motorpool-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │   types   │  │   money   │  │   fleet   │  │   batch    │  │   │
//! │  │   │  Vehicle  │  │   Money   │  │   Fleet   │  │ atomic     │  │   │
//! │  │   │  Request  │  │ Discount  │  │  best-fit │  │ allocation │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐                                │   │
//! │  │   │validation │  │ settlement │                                │   │
//! │  │   └───────────┘  └────────────┘                                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Vehicle, RentalRequest, outcomes)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`fleet`] - The Fleet aggregate: membership, invariants, best-fit
//! - [`batch`] - All-or-nothing batch allocation
//! - [`settlement`] - Per-customer pricing and discounts
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every operation is deterministic for its inputs
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//! 5. **No Partial Effects**: a failed batch leaves the fleet untouched
//!
//! ## Example Usage
//!
//! ```rust
//! use motorpool_core::{DiscountRate, Fleet, RentalRequest, Vehicle};
//! use uuid::Uuid;
//!
//! let mut fleet = Fleet::new();
//! fleet.add(Vehicle::new(Uuid::new_v4(), "AB123CD", 4, 4000).unwrap()).unwrap();
//! fleet.add(Vehicle::new(Uuid::new_v4(), "EF456GH", 6, 6000).unwrap()).unwrap();
//!
//! // Two bookings for the same customer: 10% multi-booking discount.
//! let requests = vec![
//!     RentalRequest::for_capacity("alice", 3).unwrap(),
//!     RentalRequest::for_capacity("alice", 5).unwrap(),
//! ];
//! let rate = DiscountRate::from_bps(1000).unwrap();
//!
//! let outcome = fleet.process_batch(&requests, rate).unwrap();
//! assert_eq!(outcome.grand_total().cents(), 9000); // 100.00 gross - 10%
//! assert_eq!(fleet.available_count(), 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod batch;
pub mod error;
pub mod fleet;
pub mod money;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use motorpool_core::Fleet` instead of
// `use motorpool_core::fleet::Fleet`

pub use error::{FleetError, FleetResult, ValidationError};
pub use fleet::Fleet;
pub use money::{DiscountRate, Money};
pub use settlement::settle;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum requests allowed in a single batch.
///
/// ## Business Reason
/// Bounds the work a single atomic commit can represent and keeps rejection
/// messages meaningful; a larger booking should be split by the caller.
pub const MAX_BATCH_REQUESTS: usize = 100;

/// Maximum length of a license plate, trimmed.
pub const MAX_PLATE_LENGTH: usize = 16;

/// Maximum length of a customer identifier, trimmed.
pub const MAX_CUSTOMER_ID_LENGTH: usize = 64;
