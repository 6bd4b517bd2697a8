//! Fill records and execution plans.
//!
//! A [`FillPlan`] is a pure value: computing one never mutates the book,
//! and it carries no references into it. It can be inspected, logged, or
//! discarded; committing it is a separate step that re-validates every
//! recorded fill against live state (see `Book::commit_fill_plan`).

use serde::{Deserialize, Serialize};

use crate::types::Side;

/// A single execution against one maker order.
///
/// The price is always the maker's price (standard price-time priority
/// behavior); it is recorded redundantly with `maker_id` so settlement
/// consumers need not decode the composite id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// Composite id of the maker order that was (or would be) hit
    pub maker_id: u128,

    /// Execution price (the maker's price)
    pub price: u64,

    /// Executed quantity
    pub quantity: u64,
}

impl Fill {
    /// Notional value of this fill (price * quantity), unscaled.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}

/// A hypothetical match outcome computed by `Book::compute_fill_plan`.
///
/// Consumed by value by `Book::commit_fill_plan`, so a plan cannot be
/// committed twice. Between planning and committing the book may change;
/// commit tolerates that divergence by skipping stale fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillPlan {
    /// Taker side
    pub side: Side,

    /// Taker limit price
    pub price: u64,

    /// Requested quantity
    pub quantity: u64,

    /// Taker identity, used when the remainder is injected at commit
    pub owner: u64,

    /// Caller-supplied identifier carried into the injected remainder
    pub client_order_id: u64,

    /// Expiry carried into the injected remainder
    pub expire_timestamp: u64,

    /// Quantity the plan expects to fill
    pub filled_quantity: u64,

    /// Planned maker fills, best-priced first
    pub fills: Vec<Fill>,
}

impl FillPlan {
    /// Quantity the plan leaves unfilled.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.quantity - self.filled_quantity
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
