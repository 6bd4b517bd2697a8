//! Order, side, and cancel-record types.
//!
//! An [`Order`] does not store its price or side: both are derived from the
//! composite order id (see [`crate::types::order_id`]). Quantities are plain
//! `u64` values in the venue's base unit; the caller's tick/lot/min-size
//! constraints are enforced by the book, not by these types.

use serde::{Deserialize, Serialize};

use crate::types::order_id;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: bid (buy) or ask (sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side - wants to purchase the asset
    Bid,
    /// Sell side - wants to sell the asset
    Ask,
}

impl Side {
    /// `true` for the bid side.
    #[inline]
    pub fn is_bid(self) -> bool {
        matches!(self, Side::Bid)
    }

    /// Returns the opposite side.
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Whether a taker on this side at `taker_price` crosses a maker
    /// resting at `maker_price`.
    ///
    /// A bid crosses makers priced at or below it; an ask crosses makers
    /// priced at or above it.
    #[inline]
    pub fn crosses(self, taker_price: u64, maker_price: u64) -> bool {
        match self {
            Side::Bid => taker_price >= maker_price,
            Side::Ask => taker_price <= maker_price,
        }
    }

    /// The side a composite order id decodes to.
    #[inline]
    pub fn of(order_id: u128) -> Side {
        if order_id::is_bid(order_id) {
            Side::Bid
        } else {
            Side::Ask
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order resting in (or entering) the book.
///
/// Price and side live inside `order_id`; `filled_quantity` accumulates
/// over the order's lifetime and never exceeds `quantity`.
///
/// ## Example
///
/// ```
/// use matchbook::types::{order_id, Order, Side};
///
/// let id = order_id::encode(true, 50_000, u64::MAX);
/// let order = Order::new(id, 1, 100, 500, 1_703_577_600_000);
///
/// assert_eq!(order.side(), Side::Bid);
/// assert_eq!(order.price(), 50_000);
/// assert_eq!(order.remaining(), 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Composite order id (side, price, per-side sequence number)
    pub order_id: u128,

    /// Caller-supplied identifier, echoed back in outward records
    pub client_order_id: u64,

    /// Maker identity reference for settlement systems
    pub owner: u64,

    /// Original quantity
    pub quantity: u64,

    /// Cumulative filled quantity (invariant: `<= quantity`)
    pub filled_quantity: u64,

    /// Timestamp after which the order is phantom liquidity
    pub expire_timestamp: u64,
}

impl Order {
    /// Create a new, unfilled order.
    pub fn new(
        order_id: u128,
        client_order_id: u64,
        owner: u64,
        quantity: u64,
        expire_timestamp: u64,
    ) -> Self {
        Self {
            order_id,
            client_order_id,
            owner,
            quantity,
            filled_quantity: 0,
            expire_timestamp,
        }
    }

    /// Side decoded from the order id.
    #[inline]
    pub fn side(&self) -> Side {
        Side::of(self.order_id)
    }

    /// Price decoded from the order id.
    #[inline]
    pub fn price(&self) -> u64 {
        order_id::price(self.order_id)
    }

    /// Quantity still open.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.quantity - self.filled_quantity
    }

    /// Check if the order is fully filled.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.filled_quantity == self.quantity
    }

    /// Whether the order has expired relative to the caller-supplied `now`.
    ///
    /// An order is live through its expire timestamp inclusive.
    #[inline]
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expire_timestamp
    }

    /// Fill a portion of this order, clamped to the open quantity.
    ///
    /// Returns the quantity actually filled.
    pub fn fill(&mut self, quantity: u64) -> u64 {
        let actual = quantity.min(self.remaining());
        self.filled_quantity += actual;
        actual
    }
}

// ============================================================================
// OrderCancel record
// ============================================================================

/// Removal record handed back by batch operations and expiry sweeps so
/// external accounting (e.g. locked collateral) can be reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancel {
    /// Id of the removed order
    pub order_id: u128,

    /// Quantity that was still open at removal
    pub remaining_quantity: u64,
}

impl OrderCancel {
    /// Create a removal record.
    pub fn new(order_id: u128, remaining_quantity: u64) -> Self {
        Self {
            order_id,
            remaining_quantity,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
