//! The order book: two ordered sides plus trading constraints.
//!
//! ## Architecture
//!
//! A [`Book`] owns a [`SideBook`] per side, the venue constraints
//! (tick size, lot size, minimum size), and the two per-side sequence
//! counters that feed the composite id codec. All operations execute
//! synchronously and deterministically; "now" is always a caller-supplied
//! input, never a wall clock.
//!
//! Order intake and the plan/commit protocol live in the sibling
//! `matching` module; this file holds the book structure, validation,
//! cancellation, modification, expiry collection, market-data queries, and
//! the state digest.
//!
//! ## Example
//!
//! ```
//! use matchbook::{Book, Side};
//!
//! let mut book = Book::new(1, 1, 1);
//! book.create_order(Side::Ask, 10, 100, 7, 1, u64::MAX, 0).unwrap();
//!
//! assert_eq!(book.best_ask_id(0).map(|id| matchbook::types::order_id::price(id)), Some(10));
//! assert!(book.mid_price(0).is_err()); // no bids yet
//! ```

use sha2::{Digest, Sha256};

use crate::error::BookError;
use crate::orderbook::side::SideBook;
use crate::types::order_id::{self, MAX_PRICE, MIN_PRICE};
use crate::types::{Order, OrderCancel, Side};

/// A two-sided limit order book with price-time priority.
#[derive(Debug, Clone)]
pub struct Book {
    /// Minimum price increment
    tick_size: u64,

    /// Minimum quantity increment
    lot_size: u64,

    /// Minimum order size
    min_size: u64,

    /// Resting bids, best = largest key
    bids: SideBook,

    /// Resting asks, best = smallest key
    asks: SideBook,

    /// Next bid sequence number; counts down from `u64::MAX`
    next_bid_seq: u64,

    /// Next ask sequence number; counts up from 1
    next_ask_seq: u64,
}

impl Book {
    /// Create an empty book with the given trading constraints.
    ///
    /// # Panics
    ///
    /// Panics if `tick_size` or `lot_size` is zero: a book with degenerate
    /// constraints is a construction bug, not a runtime condition.
    pub fn new(tick_size: u64, lot_size: u64, min_size: u64) -> Self {
        assert!(tick_size > 0, "tick size must be non-zero");
        assert!(lot_size > 0, "lot size must be non-zero");
        Self {
            tick_size,
            lot_size,
            min_size,
            bids: SideBook::new(true),
            asks: SideBook::new(false),
            next_bid_seq: u64::MAX,
            next_ask_seq: 1,
        }
    }

    // ========================================================================
    // Constraints and counts
    // ========================================================================

    /// Minimum price increment.
    #[inline]
    pub fn tick_size(&self) -> u64 {
        self.tick_size
    }

    /// Minimum quantity increment.
    #[inline]
    pub fn lot_size(&self) -> u64 {
        self.lot_size
    }

    /// Minimum order size.
    #[inline]
    pub fn min_size(&self) -> u64 {
        self.min_size
    }

    /// Number of resting bid orders.
    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    /// Number of resting ask orders.
    #[inline]
    pub fn ask_count(&self) -> usize {
        self.asks.len()
    }

    /// Total number of resting orders.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    /// Check if the book holds no orders.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    // ========================================================================
    // Order access
    // ========================================================================

    /// Check if an order rests in the book.
    pub fn contains_order(&self, order_id: u128) -> bool {
        self.side(Side::of(order_id)).contains(order_id)
    }

    /// Borrow a resting order.
    pub fn get_order(&self, order_id: u128) -> Option<&Order> {
        self.side(Side::of(order_id)).get(order_id)
    }

    /// The side index holding orders of `side`.
    pub(crate) fn side(&self, side: Side) -> &SideBook {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Mutable access to the side index holding orders of `side`.
    pub(crate) fn side_mut(&mut self, side: Side) -> &mut SideBook {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Take the next sequence number for `side`.
    ///
    /// Bid sequences descend, ask sequences ascend; see the id codec for
    /// why the directions differ.
    pub(crate) fn next_sequence(&mut self, side: Side) -> u64 {
        match side {
            Side::Bid => {
                let seq = self.next_bid_seq;
                self.next_bid_seq -= 1;
                seq
            }
            Side::Ask => {
                let seq = self.next_ask_seq;
                self.next_ask_seq += 1;
                seq
            }
        }
    }

    /// Validate taker inputs against the book constraints. No mutation
    /// happens before this passes.
    pub(crate) fn validate_order(
        &self,
        price: u64,
        quantity: u64,
        expire_timestamp: u64,
        now: u64,
    ) -> Result<(), BookError> {
        if quantity < self.min_size {
            return Err(BookError::BelowMinSize {
                quantity,
                min_size: self.min_size,
            });
        }
        if quantity % self.lot_size != 0 {
            return Err(BookError::QuantityOffLot {
                quantity,
                lot_size: self.lot_size,
            });
        }
        if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
            return Err(BookError::PriceOutOfRange { price });
        }
        if price % self.tick_size != 0 {
            return Err(BookError::PriceOffTick {
                price,
                tick_size: self.tick_size,
            });
        }
        if now > expire_timestamp {
            return Err(BookError::Expired {
                expire_timestamp,
                now,
            });
        }
        Ok(())
    }

    /// Insert an already-validated order into its own side.
    pub(crate) fn insert_resting(&mut self, order: Order) {
        self.side_mut(order.side()).insert(order);
    }

    // ========================================================================
    // Cancel and modify
    // ========================================================================

    /// Remove and return a resting order.
    ///
    /// Cancelling an id that does not rest in the book is an error, never a
    /// no-op: a silent no-op would mask double-cancel bugs in callers.
    pub fn cancel_order(&mut self, order_id: u128) -> Result<Order, BookError> {
        self.side_mut(Side::of(order_id))
            .remove(order_id)
            .ok_or(BookError::OrderNotFound { order_id })
    }

    /// Decrease a resting order's quantity in place.
    ///
    /// Only strict decreases are supported: growing an order (or changing
    /// its price) would let it keep its queue position while representing
    /// different liquidity, so callers must cancel and re-create instead.
    /// Returns the quantity released from the book together with the
    /// updated order.
    pub fn modify_order(
        &mut self,
        order_id: u128,
        new_quantity: u64,
        now: u64,
    ) -> Result<(u64, &Order), BookError> {
        let min_size = self.min_size;
        let lot_size = self.lot_size;

        let order = self
            .side_mut(Side::of(order_id))
            .get_mut(order_id)
            .ok_or(BookError::OrderNotFound { order_id })?;

        if new_quantity >= order.quantity {
            return Err(BookError::ModifyMustDecrease {
                quantity: order.quantity,
                new_quantity,
            });
        }
        if new_quantity <= order.filled_quantity {
            return Err(BookError::ModifyBelowFill {
                new_quantity,
                filled_quantity: order.filled_quantity,
            });
        }
        if new_quantity < min_size {
            return Err(BookError::BelowMinSize {
                quantity: new_quantity,
                min_size,
            });
        }
        if new_quantity % lot_size != 0 {
            return Err(BookError::QuantityOffLot {
                quantity: new_quantity,
                lot_size,
            });
        }
        if order.is_expired(now) {
            return Err(BookError::Expired {
                expire_timestamp: order.expire_timestamp,
                now,
            });
        }

        let released = order.quantity - new_quantity;
        order.quantity = new_quantity;
        Ok((released, &*order))
    }

    // ========================================================================
    // Expiry collection
    // ========================================================================

    /// Remove up to `max_removals` expired orders across both sides,
    /// returning a removal record per order for external reconciliation.
    pub fn remove_expired(&mut self, now: u64, max_removals: usize) -> Vec<OrderCancel> {
        let mut removed = Vec::new();
        for side in [Side::Bid, Side::Ask] {
            if removed.len() == max_removals {
                break;
            }
            let budget = max_removals - removed.len();
            let index = self.side_mut(side);
            let expired: Vec<u128> = index
                .iter()
                .filter(|(_, order)| order.is_expired(now))
                .map(|(key, _)| key)
                .take(budget)
                .collect();
            for key in expired {
                let order = index.remove(key).expect("key was just observed");
                removed.push(OrderCancel::new(key, order.remaining()));
            }
        }
        removed
    }

    /// Remove up to `max_removals` orders unconditionally (book teardown),
    /// returning a removal record per order.
    pub fn drain_all(&mut self, max_removals: usize) -> Vec<OrderCancel> {
        let mut removed = Vec::new();
        for side in [Side::Bid, Side::Ask] {
            if removed.len() == max_removals {
                break;
            }
            let budget = max_removals - removed.len();
            let index = self.side_mut(side);
            let keys: Vec<u128> = index.iter().map(|(key, _)| key).take(budget).collect();
            for key in keys {
                let order = index.remove(key).expect("key was just observed");
                removed.push(OrderCancel::new(key, order.remaining()));
            }
        }
        removed
    }

    // ========================================================================
    // Market-data queries
    // ========================================================================

    /// Id of the best live bid, skipping expired entries.
    pub fn best_bid_id(&self, now: u64) -> Option<u128> {
        self.bids
            .iter_from_best()
            .find(|(_, order)| !order.is_expired(now))
            .map(|(key, _)| key)
    }

    /// Id of the best live ask, skipping expired entries.
    pub fn best_ask_id(&self, now: u64) -> Option<u128> {
        self.asks
            .iter_from_best()
            .find(|(_, order)| !order.is_expired(now))
            .map(|(key, _)| key)
    }

    /// Floor average of the best live bid and ask prices.
    ///
    /// Fails when either side has no live order left after skipping
    /// expired entries.
    pub fn mid_price(&self, now: u64) -> Result<u64, BookError> {
        let bid = self.best_bid_id(now).ok_or(BookError::EmptyBookSide)?;
        let ask = self.best_ask_id(now).ok_or(BookError::EmptyBookSide)?;
        let sum = order_id::price(bid) as u128 + order_id::price(ask) as u128;
        Ok((sum / 2) as u64)
    }

    /// Resting quantity aggregated by price, best level first.
    ///
    /// Collects at most `max_ticks` price levels whose price falls in
    /// `[price_low, price_high]`, skipping expired orders. An inverted
    /// bound yields an empty result; a zero tick count is an error.
    pub fn level2_range(
        &self,
        side: Side,
        price_low: u64,
        price_high: u64,
        max_ticks: u64,
        now: u64,
    ) -> Result<Vec<(u64, u64)>, BookError> {
        if max_ticks == 0 {
            return Err(BookError::ZeroTickCount);
        }

        let lo = order_id::encode(side.is_bid(), price_low.min(MAX_PRICE), 0);
        let hi = order_id::encode(side.is_bid(), price_high.min(MAX_PRICE), u64::MAX);

        let mut levels: Vec<(u64, u64)> = Vec::new();
        for (key, order) in self.side(side).range_from_best(lo, hi) {
            if order.is_expired(now) {
                continue;
            }
            let price = order_id::price(key);
            match levels.last_mut() {
                Some((level_price, level_quantity)) if *level_price == price => {
                    *level_quantity = level_quantity.saturating_add(order.remaining());
                }
                _ => {
                    if levels.len() as u64 == max_ticks {
                        break;
                    }
                    levels.push((price, order.remaining()));
                }
            }
        }
        Ok(levels)
    }

    // ========================================================================
    // State digest
    // ========================================================================

    /// SHA-256 digest over the canonical encoding of the book state.
    ///
    /// Covers the constraints, both sequence counters, and every resting
    /// order in ascending key order, all little-endian. Two books that
    /// processed the same operation sequence produce identical digests,
    /// which is the replay-verification hook for external persistence.
    pub fn state_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for value in [
            self.tick_size,
            self.lot_size,
            self.min_size,
            self.next_bid_seq,
            self.next_ask_seq,
        ] {
            hasher.update(value.to_le_bytes());
        }
        for index in [&self.bids, &self.asks] {
            for (key, order) in index.iter() {
                hasher.update(key.to_le_bytes());
                hasher.update(order.client_order_id.to_le_bytes());
                hasher.update(order.owner.to_le_bytes());
                hasher.update(order.quantity.to_le_bytes());
                hasher.update(order.filled_quantity.to_le_bytes());
                hasher.update(order.expire_timestamp.to_le_bytes());
            }
        }
        let result = hasher.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&result);
        digest
    }

    /// Hex rendering of [`Book::state_digest`].
    pub fn state_digest_hex(&self) -> String {
        hex::encode(self.state_digest())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FAR: u64 = u64::MAX;

    /// Book with tick/lot/min of 1 and a handful of resting orders.
    fn populated_book() -> Book {
        let mut book = Book::new(1, 1, 1);
        book.create_order(Side::Bid, 9, 10, 1, 1, FAR, 0).unwrap();
        book.create_order(Side::Bid, 8, 20, 1, 2, FAR, 0).unwrap();
        book.create_order(Side::Ask, 11, 30, 2, 3, FAR, 0).unwrap();
        book.create_order(Side::Ask, 12, 40, 2, 4, FAR, 0).unwrap();
        book
    }

    #[test]
    fn test_new_book_is_empty() {
        let book = Book::new(5, 10, 20);
        assert!(book.is_empty());
        assert_eq!(book.order_count(), 0);
        assert_eq!(book.tick_size(), 5);
        assert_eq!(book.lot_size(), 10);
        assert_eq!(book.min_size(), 20);
        assert!(book.best_bid_id(0).is_none());
        assert!(book.best_ask_id(0).is_none());
    }

    #[test]
    #[should_panic(expected = "tick size must be non-zero")]
    fn test_zero_tick_size_panics() {
        Book::new(0, 1, 1);
    }

    #[test]
    fn test_validation_below_min_size() {
        let book = Book::new(1, 10, 50);
        assert_eq!(
            book.validate_order(100, 40, FAR, 0),
            Err(BookError::BelowMinSize {
                quantity: 40,
                min_size: 50
            })
        );
    }

    #[test]
    fn test_validation_off_lot() {
        let book = Book::new(1, 10, 10);
        assert_eq!(
            book.validate_order(100, 55, FAR, 0),
            Err(BookError::QuantityOffLot {
                quantity: 55,
                lot_size: 10
            })
        );
    }

    #[test]
    fn test_validation_price_range() {
        let book = Book::new(1, 1, 1);
        assert_eq!(
            book.validate_order(0, 1, FAR, 0),
            Err(BookError::PriceOutOfRange { price: 0 })
        );
        assert!(book.validate_order(MIN_PRICE, 1, FAR, 0).is_ok());
        assert!(book.validate_order(MAX_PRICE, 1, FAR, 0).is_ok());
    }

    #[test]
    fn test_validation_off_tick() {
        let book = Book::new(5, 1, 1);
        assert_eq!(
            book.validate_order(12, 1, FAR, 0),
            Err(BookError::PriceOffTick {
                price: 12,
                tick_size: 5
            })
        );
        assert!(book.validate_order(15, 1, FAR, 0).is_ok());
    }

    #[test]
    fn test_validation_already_expired() {
        let book = Book::new(1, 1, 1);
        assert_eq!(
            book.validate_order(10, 1, 99, 100),
            Err(BookError::Expired {
                expire_timestamp: 99,
                now: 100
            })
        );
        // Expiry is inclusive: an order expiring exactly now is accepted.
        assert!(book.validate_order(10, 1, 100, 100).is_ok());
    }

    #[test]
    fn test_sequence_directions() {
        let mut book = Book::new(1, 1, 1);
        assert_eq!(book.next_sequence(Side::Bid), u64::MAX);
        assert_eq!(book.next_sequence(Side::Bid), u64::MAX - 1);
        assert_eq!(book.next_sequence(Side::Ask), 1);
        assert_eq!(book.next_sequence(Side::Ask), 2);
    }

    #[test]
    fn test_cancel_order() {
        let mut book = populated_book();
        let bid = book.best_bid_id(0).unwrap();

        let order = book.cancel_order(bid).unwrap();
        assert_eq!(order.price(), 9);
        assert!(!book.contains_order(bid));
        assert_eq!(book.bid_count(), 1);
    }

    #[test]
    fn test_cancel_unknown_is_error() {
        let mut book = populated_book();
        let bogus = order_id::encode(true, 7, 12345);
        assert_eq!(
            book.cancel_order(bogus),
            Err(BookError::OrderNotFound { order_id: bogus })
        );

        // Double cancel surfaces the same way.
        let bid = book.best_bid_id(0).unwrap();
        book.cancel_order(bid).unwrap();
        assert!(book.cancel_order(bid).is_err());
    }

    #[test]
    fn test_modify_decreases_quantity() {
        let mut book = populated_book();
        let ask = book.best_ask_id(0).unwrap();

        let (released, order) = book.modify_order(ask, 10, 0).unwrap();
        assert_eq!(released, 20);
        assert_eq!(order.quantity, 10);
        assert_eq!(book.get_order(ask).unwrap().remaining(), 10);
    }

    #[test]
    fn test_modify_rejects_increase_and_equal() {
        let mut book = populated_book();
        let ask = book.best_ask_id(0).unwrap();

        assert!(matches!(
            book.modify_order(ask, 31, 0),
            Err(BookError::ModifyMustDecrease { .. })
        ));
        assert!(matches!(
            book.modify_order(ask, 30, 0),
            Err(BookError::ModifyMustDecrease { .. })
        ));
    }

    #[test]
    fn test_modify_rejects_below_fill() {
        let mut book = Book::new(1, 1, 1);
        book.create_order(Side::Ask, 10, 100, 1, 1, FAR, 0).unwrap();
        // Partially fill the resting ask.
        book.create_order(Side::Bid, 10, 60, 2, 2, FAR, 0).unwrap();
        let ask = book.best_ask_id(0).unwrap();
        assert_eq!(book.get_order(ask).unwrap().filled_quantity, 60);

        assert!(matches!(
            book.modify_order(ask, 60, 0),
            Err(BookError::ModifyBelowFill { .. })
        ));
        let (released, order) = book.modify_order(ask, 70, 0).unwrap();
        assert_eq!(released, 30);
        assert_eq!(order.remaining(), 10);
    }

    #[test]
    fn test_modify_revalidates_constraints() {
        let mut book = Book::new(1, 10, 20);
        book.create_order(Side::Bid, 10, 100, 1, 1, FAR, 0).unwrap();
        let bid = book.best_bid_id(0).unwrap();

        assert!(matches!(
            book.modify_order(bid, 10, 0),
            Err(BookError::BelowMinSize { .. })
        ));
        assert!(matches!(
            book.modify_order(bid, 35, 0),
            Err(BookError::QuantityOffLot { .. })
        ));
    }

    #[test]
    fn test_modify_rejects_expired() {
        let mut book = Book::new(1, 1, 1);
        book.create_order(Side::Bid, 10, 100, 1, 1, 50, 0).unwrap();
        let bid = book.best_bid_id(0).unwrap();

        assert!(matches!(
            book.modify_order(bid, 40, 51),
            Err(BookError::Expired { .. })
        ));
        // Still modifiable exactly at the expiry timestamp.
        assert!(book.modify_order(bid, 40, 50).is_ok());
    }

    #[test]
    fn test_remove_expired_is_bounded() {
        let mut book = Book::new(1, 1, 1);
        for i in 0..5 {
            book.create_order(Side::Bid, 10 + i, 10, 1, i, 100, 0).unwrap();
            book.create_order(Side::Ask, 100 + i, 10, 2, i, 100, 0).unwrap();
        }
        book.create_order(Side::Bid, 5, 10, 1, 99, FAR, 0).unwrap();

        let removed = book.remove_expired(200, 4);
        assert_eq!(removed.len(), 4);
        assert_eq!(book.order_count(), 7);

        let removed = book.remove_expired(200, 100);
        assert_eq!(removed.len(), 6);
        // Only the far-expiry bid survives.
        assert_eq!(book.order_count(), 1);
        assert!(removed.iter().all(|c| c.remaining_quantity == 10));
    }

    #[test]
    fn test_drain_all_returns_remaining_quantities() {
        let mut book = populated_book();
        let drained = book.drain_all(3);
        assert_eq!(drained.len(), 3);
        assert_eq!(book.order_count(), 1);

        let rest = book.drain_all(100);
        assert_eq!(rest.len(), 1);
        assert!(book.is_empty());
    }

    #[test]
    fn test_best_ids_skip_expired() {
        let mut book = Book::new(1, 1, 1);
        book.create_order(Side::Bid, 10, 5, 1, 1, 100, 0).unwrap();
        book.create_order(Side::Bid, 9, 5, 1, 2, FAR, 0).unwrap();

        // Before expiry the 10 bid is best; after, it is skipped.
        assert_eq!(order_id::price(book.best_bid_id(100).unwrap()), 10);
        assert_eq!(order_id::price(book.best_bid_id(101).unwrap()), 9);
    }

    #[test]
    fn test_mid_price() {
        let book = populated_book();
        // Best bid 9, best ask 11.
        assert_eq!(book.mid_price(0), Ok(10));
    }

    #[test]
    fn test_mid_price_floor_division() {
        let mut book = Book::new(1, 1, 1);
        book.create_order(Side::Bid, 9, 5, 1, 1, FAR, 0).unwrap();
        book.create_order(Side::Ask, 12, 5, 2, 2, FAR, 0).unwrap();
        assert_eq!(book.mid_price(0), Ok(10));
    }

    #[test]
    fn test_mid_price_requires_both_sides() {
        let mut book = Book::new(1, 1, 1);
        assert_eq!(book.mid_price(0), Err(BookError::EmptyBookSide));

        book.create_order(Side::Bid, 9, 5, 1, 1, 100, 0).unwrap();
        assert_eq!(book.mid_price(0), Err(BookError::EmptyBookSide));

        book.create_order(Side::Ask, 11, 5, 2, 2, FAR, 0).unwrap();
        assert!(book.mid_price(0).is_ok());

        // The lone bid expiring empties that side again.
        assert_eq!(book.mid_price(101), Err(BookError::EmptyBookSide));
    }

    #[test]
    fn test_level2_aggregates_by_price() {
        let mut book = Book::new(1, 1, 1);
        book.create_order(Side::Ask, 10, 100, 1, 1, FAR, 0).unwrap();
        book.create_order(Side::Ask, 10, 50, 1, 2, FAR, 0).unwrap();
        book.create_order(Side::Ask, 12, 30, 1, 3, FAR, 0).unwrap();

        let levels = book.level2_range(Side::Ask, 1, 1_000, 10, 0).unwrap();
        assert_eq!(levels, vec![(10, 150), (12, 30)]);
    }

    #[test]
    fn test_level2_best_first_per_side() {
        let book = populated_book();

        let bids = book.level2_range(Side::Bid, 1, 1_000, 10, 0).unwrap();
        assert_eq!(bids, vec![(9, 10), (8, 20)]);

        let asks = book.level2_range(Side::Ask, 1, 1_000, 10, 0).unwrap();
        assert_eq!(asks, vec![(11, 30), (12, 40)]);
    }

    #[test]
    fn test_level2_respects_tick_cap_and_bounds() {
        let book = populated_book();

        let asks = book.level2_range(Side::Ask, 1, 1_000, 1, 0).unwrap();
        assert_eq!(asks, vec![(11, 30)]);

        let asks = book.level2_range(Side::Ask, 12, 1_000, 10, 0).unwrap();
        assert_eq!(asks, vec![(12, 40)]);

        // Inverted bounds are empty, not an error.
        let asks = book.level2_range(Side::Ask, 1_000, 1, 10, 0).unwrap();
        assert!(asks.is_empty());
    }

    #[test]
    fn test_level2_zero_ticks_is_error() {
        let book = populated_book();
        assert_eq!(
            book.level2_range(Side::Ask, 1, 1_000, 0, 0),
            Err(BookError::ZeroTickCount)
        );
    }

    #[test]
    fn test_level2_skips_expired() {
        let mut book = Book::new(1, 1, 1);
        book.create_order(Side::Ask, 10, 100, 1, 1, 100, 0).unwrap();
        book.create_order(Side::Ask, 10, 50, 1, 2, FAR, 0).unwrap();

        let levels = book.level2_range(Side::Ask, 1, 1_000, 10, 101).unwrap();
        assert_eq!(levels, vec![(10, 50)]);
    }

    #[test]
    fn test_state_digest_tracks_mutations() {
        let mut book = populated_book();
        let before = book.state_digest();
        assert_eq!(book.state_digest(), before, "digest must be stable");

        let bid = book.best_bid_id(0).unwrap();
        book.cancel_order(bid).unwrap();
        assert_ne!(book.state_digest(), before);
    }

    #[test]
    fn test_state_digest_hex() {
        let book = populated_book();
        let hex = book.state_digest_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
