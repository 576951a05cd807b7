//! # Fleet Aggregate
//!
//! The `Fleet` owns a collection of vehicles and every mutation on them.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Fleet Operations                                │
//! │                                                                         │
//! │  Caller Action            Fleet Operation         State Change          │
//! │  ─────────────            ───────────────         ────────────          │
//! │                                                                         │
//! │  Register vehicle ───────► add() ────────────────► append + index      │
//! │                            └── capacity-price invariant checked         │
//! │                                                                         │
//! │  Retire vehicle ─────────► remove() ─────────────► drop by identity    │
//! │                                                                         │
//! │  Rent one vehicle ───────► allocate() ───────────► status → Rented     │
//! │                            └── best-fit or by-id resolution             │
//! │                                                                         │
//! │  Vehicle comes back ─────► release() ────────────► status → Available  │
//! │                                                                         │
//! │  Dashboard reads ────────► total_count() ────────► (read only, O(1))   │
//! │                            available_count()                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - **Capacity-price monotonicity**: a higher-capacity member never costs
//!   less per day than a lower-capacity one (equal capacities are exempt).
//!   Checked on every insertion; a violating insertion is rejected and the
//!   fleet is left unchanged.
//! - Insertion order is preserved and significant: it is the tie-breaker
//!   for best-fit allocation.
//! - Member ids are unique; the id→position index and the availability
//!   counter are kept consistent with the member list at all times.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use tracing::debug;
use uuid::Uuid;

use crate::error::{FleetError, FleetResult, ValidationError};
use crate::types::{AllocationOutcome, RentalRequest, Vehicle};

/// The process-wide empty fleet value.
///
/// Lazily constructed, thread-safe, and never mutated; see [`Fleet::empty`].
static EMPTY: Lazy<Fleet> = Lazy::new(Fleet::new);

// =============================================================================
// Fleet
// =============================================================================

/// An ordered collection of vehicles with indexed reads.
///
/// ## Representation
/// - `vehicles`: members in insertion order (the best-fit tie-break order)
/// - `index`: id → position, so by-id lookups never scan the member list
/// - `available`: maintained count of `Available` members, so
///   [`Fleet::available_count`] is O(1) even at 10,000+ members
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) index: HashMap<Uuid, usize>,
    pub(crate) available: usize,
}

impl Fleet {
    /// Creates a new empty fleet.
    pub fn new() -> Self {
        Fleet {
            vehicles: Vec::new(),
            index: HashMap::new(),
            available: 0,
        }
    }

    /// Returns the shared empty fleet value.
    ///
    /// This is process-wide immutable state: lazily constructed on first
    /// use, safe to read from any thread, and never mutated. Clone it to
    /// obtain a fleet to work with.
    ///
    /// ## Example
    /// ```rust
    /// use motorpool_core::Fleet;
    ///
    /// let fleet = Fleet::empty().clone();
    /// assert_eq!(fleet.total_count(), 0);
    /// ```
    pub fn empty() -> &'static Fleet {
        &EMPTY
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Adds a vehicle to the fleet.
    ///
    /// ## Failure Modes
    /// - the vehicle's id is already a member (duplicate identity)
    /// - capacity-price monotonicity would break against any current member;
    ///   the error cites the conflicting member's capacity and rate
    ///
    /// On failure the fleet is left unchanged.
    pub fn add(&mut self, vehicle: Vehicle) -> FleetResult<()> {
        if self.index.contains_key(&vehicle.id) {
            return Err(ValidationError::Duplicate {
                field: "vehicle id".to_string(),
                value: vehicle.id.to_string(),
            }
            .into());
        }

        for member in &self.vehicles {
            let undercuts = vehicle.capacity > member.capacity
                && vehicle.daily_rate_cents < member.daily_rate_cents;
            let overprices = vehicle.capacity < member.capacity
                && vehicle.daily_rate_cents > member.daily_rate_cents;
            if undercuts || overprices {
                return Err(FleetError::InvariantViolation {
                    capacity: vehicle.capacity,
                    daily_rate: vehicle.daily_rate(),
                    member_capacity: member.capacity,
                    member_rate: member.daily_rate(),
                });
            }
        }

        debug!(
            vehicle_id = %vehicle.id,
            plate = %vehicle.plate,
            capacity = vehicle.capacity,
            "vehicle added to fleet"
        );

        if vehicle.is_available() {
            self.available += 1;
        }
        self.index.insert(vehicle.id, self.vehicles.len());
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Removes a vehicle by identity and returns it.
    ///
    /// Matching is by id, never by value: two vehicles with identical plate,
    /// capacity and rate are still distinct members. Fails with
    /// [`FleetError::NotFound`] if the id is not a member; the fleet is left
    /// unchanged in that case.
    pub fn remove(&mut self, vehicle_id: &Uuid) -> FleetResult<Vehicle> {
        let pos = *self
            .index
            .get(vehicle_id)
            .ok_or(FleetError::NotFound {
                vehicle_id: *vehicle_id,
            })?;

        let vehicle = self.vehicles.remove(pos);
        self.index.remove(vehicle_id);
        // Members after the removal point shifted down one position.
        for (i, member) in self.vehicles.iter().enumerate().skip(pos) {
            self.index.insert(member.id, i);
        }
        if vehicle.is_available() {
            self.available -= 1;
        }

        debug!(vehicle_id = %vehicle.id, plate = %vehicle.plate, "vehicle removed from fleet");
        Ok(vehicle)
    }

    /// Number of members, regardless of state. O(1).
    #[inline]
    pub fn total_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of members currently available for rental. O(1).
    #[inline]
    pub fn available_count(&self) -> usize {
        self.available
    }

    /// Looks up a member by id.
    #[inline]
    pub fn get(&self, vehicle_id: &Uuid) -> Option<&Vehicle> {
        self.index.get(vehicle_id).map(|&pos| &self.vehicles[pos])
    }

    /// All members in insertion order.
    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    // =========================================================================
    // Best-Fit Allocation
    // =========================================================================

    /// Read-only best-fit query: the available member that would be selected
    /// for a capacity-`min_capacity` request right now, if any.
    pub fn best_available(&self, min_capacity: u32) -> Option<&Vehicle> {
        self.best_fit(min_capacity, &HashSet::new())
            .map(|pos| &self.vehicles[pos])
    }

    /// Best-fit selection: the available, unclaimed member with the smallest
    /// capacity ≥ `min_capacity`. Ties are broken by insertion order - the
    /// scan replaces the candidate only on a strictly smaller capacity, so
    /// the earliest-inserted member of the winning capacity is kept.
    fn best_fit(&self, min_capacity: u32, claimed: &HashSet<Uuid>) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (pos, vehicle) in self.vehicles.iter().enumerate() {
            if !vehicle.is_available()
                || vehicle.capacity < min_capacity
                || claimed.contains(&vehicle.id)
            {
                continue;
            }
            match best {
                Some(b) if self.vehicles[b].capacity <= vehicle.capacity => {}
                _ => best = Some(pos),
            }
        }
        best
    }

    /// Resolves a request to a member position without mutating anything.
    ///
    /// `claimed` holds ids provisionally taken by earlier requests of the
    /// same batch; they are treated as unavailable. Single allocations pass
    /// an empty set.
    pub(crate) fn resolve_request(
        &self,
        request: &RentalRequest,
        claimed: &HashSet<Uuid>,
    ) -> FleetResult<usize> {
        match request.vehicle_id() {
            // Specific vehicle: bypass best-fit, re-validate capacity.
            Some(vehicle_id) => {
                let pos = *self
                    .index
                    .get(&vehicle_id)
                    .ok_or(FleetError::NotFound { vehicle_id })?;
                let vehicle = &self.vehicles[pos];

                if claimed.contains(&vehicle_id) || !vehicle.is_available() {
                    return Err(FleetError::AlreadyRented { vehicle_id });
                }
                if vehicle.capacity < request.min_capacity() {
                    return Err(FleetError::InsufficientCapacity {
                        vehicle_id,
                        capacity: vehicle.capacity,
                        requested: request.min_capacity(),
                    });
                }
                Ok(pos)
            }
            // Any vehicle: best-fit over available, unclaimed members.
            None => self
                .best_fit(request.min_capacity(), claimed)
                .ok_or(FleetError::NoSuitableVehicle {
                    requested: request.min_capacity(),
                }),
        }
    }

    /// Applies a resolved allocation: captures the price, transitions the
    /// member to `Rented`, and snapshots it into an outcome.
    pub(crate) fn commit_allocation(
        &mut self,
        pos: usize,
        customer_id: &str,
    ) -> FleetResult<AllocationOutcome> {
        // Price is fixed from the rate before the state transition.
        let price_cents = self.vehicles[pos].daily_rate_cents;
        self.vehicles[pos].rent()?;
        self.available -= 1;

        let vehicle = self.vehicles[pos].clone();
        debug!(
            vehicle_id = %vehicle.id,
            customer_id,
            price_cents,
            "allocation committed"
        );

        Ok(AllocationOutcome {
            vehicle,
            price_cents,
            customer_id: customer_id.to_string(),
        })
    }

    /// Allocates one vehicle for one request.
    ///
    /// By-capacity requests use best-fit selection; by-id requests bypass it
    /// and re-validate the named vehicle. On failure nothing is mutated.
    ///
    /// ## Example
    /// ```rust
    /// use motorpool_core::{Fleet, RentalRequest, Vehicle};
    /// use uuid::Uuid;
    ///
    /// let mut fleet = Fleet::new();
    /// fleet.add(Vehicle::new(Uuid::new_v4(), "AB123CD", 4, 4000).unwrap()).unwrap();
    ///
    /// let request = RentalRequest::for_capacity("alice", 3).unwrap();
    /// let outcome = fleet.allocate(&request).unwrap();
    ///
    /// assert_eq!(outcome.price().cents(), 4000);
    /// assert_eq!(fleet.available_count(), 0);
    /// ```
    pub fn allocate(&mut self, request: &RentalRequest) -> FleetResult<AllocationOutcome> {
        let pos = self.resolve_request(request, &HashSet::new())?;
        self.commit_allocation(pos, request.customer_id())
    }

    /// Returns a rented member to service.
    ///
    /// Fails with [`FleetError::NotFound`] for unknown ids. Releasing an
    /// already-available member is a no-op, matching
    /// [`Vehicle::release`](crate::types::Vehicle::release).
    pub fn release(&mut self, vehicle_id: &Uuid) -> FleetResult<()> {
        let pos = *self
            .index
            .get(vehicle_id)
            .ok_or(FleetError::NotFound {
                vehicle_id: *vehicle_id,
            })?;

        if !self.vehicles[pos].is_available() {
            self.vehicles[pos].release();
            self.available += 1;
            debug!(vehicle_id = %vehicle_id, "vehicle returned to service");
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
