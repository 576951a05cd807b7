//! # Batch Transaction Processor
//!
//! All-or-nothing allocation of a sequence of rental requests.
//!
//! ## Transaction Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Validate-Then-Commit                                 │
//! │                                                                         │
//! │  Requests ──► structural pre-checks                                    │
//! │               ├── batch size bound                                      │
//! │               └── DuplicateInBatch if an id is named twice              │
//! │                        │                                                │
//! │                        ▼                                                │
//! │               PLAN (read-only)                                          │
//! │               └── resolve every request against the pre-batch fleet,    │
//! │                   tracking provisionally claimed ids                    │
//! │                        │                                                │
//! │            ┌───────────┴───────────┐                                    │
//! │            ▼                       ▼                                    │
//! │       any step fails          all steps succeed                        │
//! │            │                       │                                    │
//! │            ▼                       ▼                                    │
//! │       Err(first failure)      COMMIT (infallible)                      │
//! │       fleet untouched         └── apply every transition               │
//! │                                                                         │
//! │  No partial allocation is ever observable to a caller.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The plan phase performs no mutation at all, so the failure path needs no
//! rollback: atomicity falls out of the phase split rather than being
//! restored after the fact. Each request is resolved against the fleet as
//! it stood before the batch; the claimed-id set only prevents two requests
//! from taking the same member.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::error::{FleetError, FleetResult};
use crate::fleet::Fleet;
use crate::types::{AllocationOutcome, RentalRequest};
use crate::validation::validate_batch_size;

impl Fleet {
    /// Atomically allocates one vehicle per request.
    ///
    /// Either every request succeeds and all transitions are applied
    /// together, or the first unsatisfiable request is reported and the
    /// fleet is left entirely unmodified.
    ///
    /// ## Pre-checks
    /// Before any allocation is attempted, the batch is rejected if it
    /// exceeds [`MAX_BATCH_REQUESTS`](crate::MAX_BATCH_REQUESTS), or if it
    /// names the same vehicle id in two requests
    /// ([`FleetError::DuplicateInBatch`], independent of availability).
    ///
    /// ## Example
    /// ```rust
    /// use motorpool_core::{Fleet, RentalRequest, Vehicle};
    /// use uuid::Uuid;
    ///
    /// let mut fleet = Fleet::new();
    /// fleet.add(Vehicle::new(Uuid::new_v4(), "AB123CD", 4, 4000).unwrap()).unwrap();
    /// fleet.add(Vehicle::new(Uuid::new_v4(), "EF456GH", 6, 6000).unwrap()).unwrap();
    ///
    /// let requests = vec![
    ///     RentalRequest::for_capacity("alice", 3).unwrap(),
    ///     RentalRequest::for_capacity("bob", 5).unwrap(),
    /// ];
    /// let outcomes = fleet.allocate_batch(&requests).unwrap();
    ///
    /// assert_eq!(outcomes.len(), 2);
    /// assert_eq!(fleet.available_count(), 0);
    /// ```
    pub fn allocate_batch(
        &mut self,
        requests: &[RentalRequest],
    ) -> FleetResult<Vec<AllocationOutcome>> {
        validate_batch_size(requests.len())?;
        reject_duplicate_ids(requests)?;

        // Plan phase: resolve everything, mutate nothing.
        let mut claimed: HashSet<Uuid> = HashSet::with_capacity(requests.len());
        let mut plan: Vec<usize> = Vec::with_capacity(requests.len());
        for request in requests {
            let pos = self.resolve_request(request, &claimed)?;
            claimed.insert(self.vehicles[pos].id);
            plan.push(pos);
        }

        debug!(requests = requests.len(), "batch plan complete, committing");

        // Commit phase: every resolved member is available by construction,
        // so applying the transitions cannot fail halfway through.
        let mut outcomes = Vec::with_capacity(plan.len());
        for (pos, request) in plan.into_iter().zip(requests) {
            outcomes.push(self.commit_allocation(pos, request.customer_id())?);
        }
        Ok(outcomes)
    }
}

/// Rejects batches that name the same vehicle id in more than one request.
fn reject_duplicate_ids(requests: &[RentalRequest]) -> FleetResult<()> {
    let mut seen: HashSet<Uuid> = HashSet::new();
    for request in requests {
        if let Some(vehicle_id) = request.vehicle_id() {
            if !seen.insert(vehicle_id) {
                return Err(FleetError::DuplicateInBatch { vehicle_id });
            }
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
