//! Composite order id codec.
//!
//! ## Layout
//!
//! A resting order's identity, side, price, and queue position are packed
//! into one sortable `u128`:
//!
//! ```text
//! bit  127      : side (0 = bid, 1 = ask)
//! bits 126 - 64 : price (63 bits)
//! bits  63 - 0  : per-side sequence number
//! ```
//!
//! ## Why one key space works for both sides
//!
//! Within a side the ids form a single ascending key space ordered by price
//! first, sequence second. Bid sequence numbers count *down* from
//! `u64::MAX` while ask sequence numbers count *up* from 1, so at a tied
//! price a newer bid gets a *smaller* id and a newer ask gets a *larger*
//! id. Scanning bid keys descending (or ask keys ascending) therefore
//! visits orders best-price-first and oldest-first, which is exactly
//! price-time priority with no separate timestamp field.
//!
//! The layout is a wire contract: external indexers decode ids without
//! calling back into the engine, so it must stay bit-exact.
//!
//! ## Example
//!
//! ```
//! use matchbook::types::order_id;
//!
//! let id = order_id::encode(true, 50_000, 42);
//! assert_eq!(order_id::decode(id), (true, 50_000, 42));
//! ```

/// Lowest representable price.
pub const MIN_PRICE: u64 = 1;

/// Highest representable price (63 bits).
pub const MAX_PRICE: u64 = (1u64 << 63) - 1;

const SIDE_BIT: u128 = 1u128 << 127;
const PRICE_MASK: u64 = MAX_PRICE;

/// Pack `(is_bid, price, seq)` into a composite order id.
///
/// Total over `price ∈ [1, 2^63 - 1]` and the full `u64` sequence range.
/// Debug builds assert the price fits the 63-bit field; callers validate
/// prices before encoding.
#[inline]
pub fn encode(is_bid: bool, price: u64, seq: u64) -> u128 {
    debug_assert!(price <= MAX_PRICE, "price does not fit in 63 bits");
    let side = if is_bid { 0 } else { SIDE_BIT };
    side | (((price & PRICE_MASK) as u128) << 64) | seq as u128
}

/// Unpack a composite order id into `(is_bid, price, seq)`.
#[inline]
pub fn decode(order_id: u128) -> (bool, u64, u64) {
    (is_bid(order_id), price(order_id), sequence(order_id))
}

/// Side flag of a composite id (`true` for bids).
#[inline]
pub fn is_bid(order_id: u128) -> bool {
    order_id & SIDE_BIT == 0
}

/// Price field of a composite id.
#[inline]
pub fn price(order_id: u128) -> u64 {
    ((order_id >> 64) as u64) & PRICE_MASK
}

/// Per-side sequence number of a composite id.
#[inline]
pub fn sequence(order_id: u128) -> u64 {
    order_id as u64
}

// ============================================================================
// Unit Tests
// ============================================================================
