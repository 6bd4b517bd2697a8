//! Per-side ordered order index.
//!
//! ## Design
//!
//! Each book side keeps its resting orders in a `BTreeMap` keyed by the
//! composite order id. Because the id packs price above the per-side
//! sequence number (and the bid counter descends while the ask counter
//! ascends), a single directional scan of the key space visits orders in
//! strict price-time priority:
//!
//! - **Bids**: best order = largest key; worse orders have smaller keys
//! - **Asks**: best order = smallest key; worse orders have larger keys
//!
//! ## Cursor discipline
//!
//! [`SideBook::next_toward_worse`] computes the follow-up cursor from the
//! map alone, so the matching loop can capture it *before* removing the
//! current entry. Removal of the current entry never invalidates a cursor
//! captured this way.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::types::{order_id, Order};

/// Ordered index of one book side, keyed by composite order id.
#[derive(Debug, Clone)]
pub struct SideBook {
    /// Which side this index holds; fixed at construction
    is_bid: bool,

    /// Resting orders in ascending key order
    orders: BTreeMap<u128, Order>,
}

impl SideBook {
    /// Create an empty side.
    pub fn new(is_bid: bool) -> Self {
        Self {
            is_bid,
            orders: BTreeMap::new(),
        }
    }

    /// `true` if this is the bid side.
    #[inline]
    pub fn is_bid(&self) -> bool {
        self.is_bid
    }

    /// Number of resting orders (including expired ones not yet collected).
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the side holds no orders.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Check if an order id rests on this side.
    #[inline]
    pub fn contains(&self, order_id: u128) -> bool {
        self.orders.contains_key(&order_id)
    }

    /// Insert a resting order.
    ///
    /// The id's side bit must match the side this index holds.
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(
            order_id::is_bid(order.order_id),
            self.is_bid,
            "order id decodes to the wrong side for this index"
        );
        self.orders.insert(order.order_id, order);
    }

    /// Remove an order, returning it if present.
    pub fn remove(&mut self, order_id: u128) -> Option<Order> {
        self.orders.remove(&order_id)
    }

    /// Borrow an order.
    #[inline]
    pub fn get(&self, order_id: u128) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// Mutably borrow an order.
    #[inline]
    pub fn get_mut(&mut self, order_id: u128) -> Option<&mut Order> {
        self.orders.get_mut(&order_id)
    }

    /// Key of the best-priced order: largest key for bids, smallest for
    /// asks.
    pub fn best_key(&self) -> Option<u128> {
        if self.is_bid {
            self.orders.keys().next_back().copied()
        } else {
            self.orders.keys().next().copied()
        }
    }

    /// Next key strictly toward worse prices relative to `key`.
    ///
    /// Computed from the map alone; `key` itself need not be present, so a
    /// cursor captured before removing the current entry stays valid.
    pub fn next_toward_worse(&self, key: u128) -> Option<u128> {
        if self.is_bid {
            self.orders.range(..key).next_back().map(|(k, _)| *k)
        } else {
            self.orders
                .range((Bound::Excluded(key), Bound::Unbounded))
                .next()
                .map(|(k, _)| *k)
        }
    }

    /// Best-first traversal of the whole side.
    pub fn iter_from_best(&self) -> Box<dyn Iterator<Item = (u128, &Order)> + '_> {
        if self.is_bid {
            Box::new(self.orders.iter().rev().map(|(k, v)| (*k, v)))
        } else {
            Box::new(self.orders.iter().map(|(k, v)| (*k, v)))
        }
    }

    /// Best-first traversal of keys in `[lo, hi]`; empty when `lo > hi`.
    pub fn range_from_best(&self, lo: u128, hi: u128) -> Box<dyn Iterator<Item = (u128, &Order)> + '_> {
        if lo > hi {
            return Box::new(std::iter::empty());
        }
        if self.is_bid {
            Box::new(self.orders.range(lo..=hi).rev().map(|(k, v)| (*k, v)))
        } else {
            Box::new(self.orders.range(lo..=hi).map(|(k, v)| (*k, v)))
        }
    }

    /// Ascending-key traversal (used by digests and bounded drains).
    pub fn iter(&self) -> impl Iterator<Item = (u128, &Order)> + '_ {
        self.orders.iter().map(|(k, v)| (*k, v))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn order(is_bid: bool, price: u64, seq: u64, quantity: u64) -> Order {
        Order::new(order_id::encode(is_bid, price, seq), 1, 100, quantity, u64::MAX)
    }

    fn populated_asks() -> SideBook {
        let mut side = SideBook::new(false);
        side.insert(order(false, 12, 1, 10));
        side.insert(order(false, 10, 2, 10));
        side.insert(order(false, 11, 3, 10));
        side
    }

    fn populated_bids() -> SideBook {
        let mut side = SideBook::new(true);
        side.insert(order(true, 8, u64::MAX, 10));
        side.insert(order(true, 10, u64::MAX - 1, 10));
        side.insert(order(true, 9, u64::MAX - 2, 10));
        side
    }

    #[test]
    fn test_empty_side() {
        let side = SideBook::new(true);
        assert!(side.is_bid());
        assert!(side.is_empty());
        assert_eq!(side.len(), 0);
        assert!(side.best_key().is_none());
    }

    #[test]
    fn test_ask_best_is_lowest_price() {
        let side = populated_asks();
        let best = side.best_key().unwrap();
        assert_eq!(order_id::price(best), 10);
    }

    #[test]
    fn test_bid_best_is_highest_price() {
        let side = populated_bids();
        let best = side.best_key().unwrap();
        assert_eq!(order_id::price(best), 10);
    }

    #[test]
    fn test_ask_walk_toward_worse() {
        let side = populated_asks();
        let mut prices = Vec::new();
        let mut cursor = side.best_key();
        while let Some(key) = cursor {
            prices.push(order_id::price(key));
            cursor = side.next_toward_worse(key);
        }
        assert_eq!(prices, vec![10, 11, 12]);
    }

    #[test]
    fn test_bid_walk_toward_worse() {
        let side = populated_bids();
        let mut prices = Vec::new();
        let mut cursor = side.best_key();
        while let Some(key) = cursor {
            prices.push(order_id::price(key));
            cursor = side.next_toward_worse(key);
        }
        assert_eq!(prices, vec![10, 9, 8]);
    }

    #[test]
    fn test_cursor_survives_removal_of_current() {
        let mut side = populated_asks();
        let best = side.best_key().unwrap();

        // Capture the next cursor before removing the current entry.
        let next = side.next_toward_worse(best).unwrap();
        side.remove(best).unwrap();

        assert_eq!(order_id::price(next), 11);
        assert!(side.contains(next));
        // The cursor can still be advanced after the removal.
        let after = side.next_toward_worse(next).unwrap();
        assert_eq!(order_id::price(after), 12);
    }

    #[test]
    fn test_time_priority_within_price() {
        // Two asks at the same price: the older (smaller seq) comes first.
        let mut side = SideBook::new(false);
        side.insert(order(false, 10, 5, 10));
        side.insert(order(false, 10, 6, 10));
        assert_eq!(order_id::sequence(side.best_key().unwrap()), 5);

        // Two bids at the same price: the older (larger seq, since the bid
        // counter descends) comes first.
        let mut side = SideBook::new(true);
        side.insert(order(true, 10, u64::MAX, 10));
        side.insert(order(true, 10, u64::MAX - 1, 10));
        assert_eq!(order_id::sequence(side.best_key().unwrap()), u64::MAX);
    }

    #[test]
    fn test_range_from_best() {
        let side = populated_asks();
        let lo = order_id::encode(false, 10, 0);
        let hi = order_id::encode(false, 11, u64::MAX);
        let prices: Vec<u64> = side
            .range_from_best(lo, hi)
            .map(|(k, _)| order_id::price(k))
            .collect();
        assert_eq!(prices, vec![10, 11]);

        // Inverted bounds yield an empty traversal, not a panic.
        assert_eq!(side.range_from_best(hi, lo).count(), 0);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut side = populated_asks();
        let best = side.best_key().unwrap();
        side.get_mut(best).unwrap().fill(4);
        assert_eq!(side.get(best).unwrap().remaining(), 6);
    }
}
