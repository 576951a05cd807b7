//! # Pricing & Settlement
//!
//! Aggregates a batch of allocations into per-customer totals.
//!
//! ## Settlement Rules
//! - the price of an allocation is the vehicle's daily rate captured at
//!   allocation time (rates never change retroactively within an outcome)
//! - gross = sum of a customer's prices over the batch
//! - a customer with more than one allocation gets the multi-booking
//!   discount: gross × rate; single-allocation customers get zero discount
//!   regardless of the rate
//! - net = max(0, gross − discount)
//! - grand total = sum of all per-customer nets
//!
//! Customers are keyed in a `BTreeMap`, so identical inputs always settle
//! to identical outcomes, independent of allocation order.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::FleetResult;
use crate::fleet::Fleet;
use crate::money::{DiscountRate, Money};
use crate::types::{AllocationOutcome, BatchOutcome, CustomerSettlement, RentalRequest};

/// Settles a batch of allocations under the given discount rate.
///
/// Pure aggregation: the allocations are consumed into the returned
/// [`BatchOutcome`] unchanged and in order.
///
/// ## Example
/// ```rust
/// use motorpool_core::{settle, AllocationOutcome, DiscountRate, Vehicle};
/// use uuid::Uuid;
///
/// let vehicle = Vehicle::new(Uuid::new_v4(), "AB123CD", 4, 4000).unwrap();
/// let allocations = vec![AllocationOutcome {
///     vehicle,
///     price_cents: 4000,
///     customer_id: "alice".to_string(),
/// }];
///
/// let outcome = settle(allocations, DiscountRate::zero());
/// assert_eq!(outcome.grand_total().cents(), 4000);
/// ```
pub fn settle(allocations: Vec<AllocationOutcome>, discount_rate: DiscountRate) -> BatchOutcome {
    // First pass: gross and booking count per customer.
    let mut totals: BTreeMap<String, (Money, usize)> = BTreeMap::new();
    for allocation in &allocations {
        let entry = totals
            .entry(allocation.customer_id.clone())
            .or_insert((Money::zero(), 0));
        entry.0 += allocation.price();
        entry.1 += 1;
    }

    // Second pass: apply the multi-booking discount and total up.
    let mut customers: BTreeMap<String, CustomerSettlement> = BTreeMap::new();
    let mut grand_total = Money::zero();
    for (customer_id, (gross, bookings)) in totals {
        let discount = if bookings > 1 {
            discount_rate.discount_on(gross)
        } else {
            Money::zero()
        };
        let net = (gross - discount).max(Money::zero());
        grand_total += net;

        debug!(
            customer_id = %customer_id,
            gross = %gross,
            discount = %discount,
            net = %net,
            "customer settled"
        );

        customers.insert(
            customer_id.clone(),
            CustomerSettlement {
                customer_id,
                gross_cents: gross.cents(),
                discount_cents: discount.cents(),
                net_cents: net.cents(),
            },
        );
    }

    BatchOutcome {
        allocations,
        customers,
        grand_total_cents: grand_total.cents(),
    }
}

impl Fleet {
    /// Atomically allocates a batch and settles it in one step.
    ///
    /// This is the settlement surface of the core: the batch either commits
    /// fully and is priced into a [`BatchOutcome`], or fails with the fleet
    /// untouched. The discount rate was range-checked at construction
    /// ([`DiscountRate::from_bps`]), so no pricing rule can fail after
    /// allocation starts.
    pub fn process_batch(
        &mut self,
        requests: &[RentalRequest],
        discount_rate: DiscountRate,
    ) -> FleetResult<BatchOutcome> {
        let allocations = self.allocate_batch(requests)?;
        Ok(settle(allocations, discount_rate))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vehicle;
    use uuid::Uuid;

    fn test_vehicle(plate: &str, capacity: u32, rate_cents: i64) -> Vehicle {
        Vehicle::new(Uuid::new_v4(), plate, capacity, rate_cents).unwrap()
    }

    fn allocation(customer: &str, price_cents: i64) -> AllocationOutcome {
        AllocationOutcome {
            vehicle: test_vehicle("PLT", 4, price_cents),
            price_cents,
            customer_id: customer.to_string(),
        }
    }

    #[test]
    fn test_batch_prices_match_allocated_rates() {
        // Fleet with a 4-seater at 40.00 and a 6-seater at 60.00; requests
        // for capacities 3 and 5 at zero discount settle to 100.00.
        let mut fleet = Fleet::new();
        fleet.add(test_vehicle("SMALL", 4, 4000)).unwrap();
        fleet.add(test_vehicle("BIG", 6, 6000)).unwrap();

        let requests = vec![
            RentalRequest::for_capacity("alice", 3).unwrap(),
            RentalRequest::for_capacity("bob", 5).unwrap(),
        ];

        let outcome = fleet.process_batch(&requests, DiscountRate::zero()).unwrap();

        let prices: Vec<i64> = outcome.allocations.iter().map(|a| a.price_cents).collect();
        assert_eq!(prices, vec![4000, 6000]);
        assert_eq!(outcome.grand_total_cents, 10_000);
    }

    #[test]
    fn test_multi_booking_discount_applies_per_customer() {
        // alice books twice for a gross of 100.00 at 10% → net 90.00;
        // bob books once for 50.00 and gets no discount.
        let allocations = vec![
            allocation("alice", 4000),
            allocation("alice", 6000),
            allocation("bob", 5000),
        ];
        let rate = DiscountRate::from_bps(1000).unwrap();

        let outcome = settle(allocations, rate);

        let alice = &outcome.customers["alice"];
        assert_eq!(alice.gross_cents, 10_000);
        assert_eq!(alice.discount_cents, 1000);
        assert_eq!(alice.net_cents, 9000);

        let bob = &outcome.customers["bob"];
        assert_eq!(bob.gross_cents, 5000);
        assert_eq!(bob.discount_cents, 0);
        assert_eq!(bob.net_cents, 5000);

        assert_eq!(outcome.grand_total_cents, 14_000);
    }

    #[test]
    fn test_single_booking_never_discounted() {
        // Even at a 100% rate, a lone booking pays full price.
        let rate = DiscountRate::from_bps(10_000).unwrap();
        let outcome = settle(vec![allocation("alice", 5000)], rate);

        assert_eq!(outcome.customers["alice"].discount_cents, 0);
        assert_eq!(outcome.grand_total_cents, 5000);
    }

    #[test]
    fn test_full_discount_floors_net_at_zero() {
        let rate = DiscountRate::from_bps(10_000).unwrap();
        let outcome = settle(
            vec![allocation("alice", 4000), allocation("alice", 6000)],
            rate,
        );

        let alice = &outcome.customers["alice"];
        assert_eq!(alice.discount_cents, 10_000);
        assert_eq!(alice.net_cents, 0);
        assert_eq!(outcome.grand_total_cents, 0);
    }

    #[test]
    fn test_empty_batch_settles_to_zero() {
        let outcome = settle(Vec::new(), DiscountRate::zero());
        assert!(outcome.allocations.is_empty());
        assert!(outcome.customers.is_empty());
        assert_eq!(outcome.grand_total_cents, 0);
    }

    #[test]
    fn test_settlement_is_deterministic_in_customer_order() {
        let rate = DiscountRate::from_bps(500).unwrap();
        let forward = settle(
            vec![allocation("alice", 4000), allocation("bob", 5000)],
            rate,
        );
        let reverse = settle(
            vec![allocation("bob", 5000), allocation("alice", 4000)],
            rate,
        );

        assert_eq!(forward.customers, reverse.customers);
        assert_eq!(forward.grand_total_cents, reverse.grand_total_cents);
    }

    #[test]
    fn test_process_batch_failure_produces_no_outcome() {
        let mut fleet = Fleet::new();
        fleet.add(test_vehicle("SMALL", 2, 2000)).unwrap();
        let before = fleet.clone();

        let requests = vec![RentalRequest::for_capacity("alice", 8).unwrap()];
        let result = fleet.process_batch(&requests, DiscountRate::zero());

        assert!(result.is_err());
        assert_eq!(fleet, before);
    }
}
