//! Taker execution: immediate matching, fill plans, and commits.
//!
//! ## Matching rules
//!
//! - Takers walk the opposite side from the best price outward
//! - Fills always execute at the maker's price
//! - Expired makers are phantom liquidity: they fill nothing and are
//!   removed when a mutating scan touches them
//! - At most [`MAX_FILLS`] makers are touched per call, bounding the
//!   worst-case cost; a capped taker may be left unfilled even though
//!   crossable liquidity remains deeper in the book
//!
//! ## Plan / commit
//!
//! `compute_fill_plan` simulates a taker without mutating the book and
//! returns a [`FillPlan`] value. `commit_fill_plan` applies one later,
//! re-checking every planned fill against live state: makers that vanished
//! are skipped, makers that expired are removed and skipped, and the first
//! maker whose price no longer crosses stops the commit (all later planned
//! fills are worse-priced). This optimistic revalidation is what lets
//! planning and committing run in separate execution steps without the
//! engine holding a lock across them.

use serde::{Deserialize, Serialize};

use crate::error::BookError;
use crate::orderbook::book::Book;
use crate::types::{order_id, Fill, FillPlan, Order, OrderCancel, Side};

/// Maximum number of maker orders one matching call may touch.
pub const MAX_FILLS: usize = 100;

/// Outcome of [`Book::create_order`].
///
/// The fills and expiry removals recorded here are the engine's outward
/// interface to settlement and custody systems; no value moves inside the
/// engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Id assigned to the taker (also the resting id if `resting`)
    pub order_id: u128,

    /// Total quantity filled by this call
    pub filled_quantity: u64,

    /// Executed maker fills, best-priced first
    pub fills: Vec<Fill>,

    /// Expired makers removed during the scan (no value transferred)
    pub expired: Vec<OrderCancel>,

    /// Whether an unfilled remainder now rests in the book
    pub resting: bool,
}

/// Outcome of [`Book::commit_fill_plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
    /// Total quantity filled at commit time
    pub filled_quantity: u64,

    /// Fills actually applied (a subset of the planned fills)
    pub fills: Vec<Fill>,

    /// Expired makers removed while committing
    pub expired: Vec<OrderCancel>,

    /// Id of the injected remainder order, when one was created
    pub injected_order_id: Option<u128>,
}

impl Book {
    /// Validate, match, and (if a remainder is left) rest a new limit order.
    ///
    /// Validation is fail-fast: nothing mutates unless every constraint
    /// passes. The order is assigned a fresh composite id from its side's
    /// sequence counter, matched against the opposite side, and any
    /// unfilled remainder rests under that id.
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::{Book, Side};
    ///
    /// let mut book = Book::new(1, 1, 1);
    /// book.create_order(Side::Ask, 10, 100, 7, 1, u64::MAX, 0).unwrap();
    ///
    /// let result = book.create_order(Side::Bid, 10, 40, 8, 2, u64::MAX, 0).unwrap();
    /// assert_eq!(result.filled_quantity, 40);
    /// assert!(!result.resting);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn create_order(
        &mut self,
        side: Side,
        price: u64,
        quantity: u64,
        owner: u64,
        client_order_id: u64,
        expire_timestamp: u64,
        now: u64,
    ) -> Result<MatchResult, BookError> {
        self.validate_order(price, quantity, expire_timestamp, now)?;

        let sequence = self.next_sequence(side);
        let taker_id = order_id::encode(side.is_bid(), price, sequence);

        let mut fills = Vec::new();
        let mut expired = Vec::new();
        let mut filled = 0u64;
        let mut touched = 0usize;

        let opposite = self.side_mut(side.opposite());
        let mut cursor = opposite.best_key();
        while let Some(key) = cursor {
            if touched == MAX_FILLS || filled == quantity {
                break;
            }
            touched += 1;

            // The follow-up cursor must come from the pre-removal map
            // state; removing the current entry would otherwise strand the
            // traversal.
            let next = opposite.next_toward_worse(key);
            let maker_price = order_id::price(key);

            let maker = opposite.get(key).expect("cursor key is present");
            if maker.is_expired(now) {
                // Phantom liquidity: consumes itself, transfers nothing.
                let gone = opposite.remove(key).expect("cursor key is present");
                expired.push(OrderCancel::new(key, gone.remaining()));
            } else if side.crosses(price, maker_price) {
                let maker = opposite.get_mut(key).expect("cursor key is present");
                let fill_quantity = maker.fill(quantity - filled);
                filled += fill_quantity;
                fills.push(Fill {
                    maker_id: key,
                    price: maker_price,
                    quantity: fill_quantity,
                });
                if maker.is_filled() {
                    opposite.remove(key);
                }
            } else {
                // Price-ordered index: no further maker can cross either.
                break;
            }

            cursor = next;
        }

        let resting = filled < quantity;
        if resting {
            self.insert_resting(Order {
                order_id: taker_id,
                client_order_id,
                owner,
                quantity,
                filled_quantity: filled,
                expire_timestamp,
            });
        }

        Ok(MatchResult {
            order_id: taker_id,
            filled_quantity: filled,
            fills,
            expired,
            resting,
        })
    }

    /// Simulate a taker without mutating the book.
    ///
    /// Runs the same validation and the same bounded best-first scan as
    /// [`Book::create_order`], but read-only: expired makers are treated
    /// as absent (they still spend touch budget, keeping plan and commit
    /// coverage identical) and nothing is removed. Consumes no sequence
    /// number.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_fill_plan(
        &self,
        side: Side,
        price: u64,
        quantity: u64,
        owner: u64,
        client_order_id: u64,
        expire_timestamp: u64,
        now: u64,
    ) -> Result<FillPlan, BookError> {
        self.validate_order(price, quantity, expire_timestamp, now)?;

        let mut fills = Vec::new();
        let mut filled = 0u64;
        let mut touched = 0usize;

        for (key, maker) in self.side(side.opposite()).iter_from_best() {
            if touched == MAX_FILLS || filled == quantity {
                break;
            }
            touched += 1;

            if maker.is_expired(now) {
                continue;
            }
            let maker_price = order_id::price(key);
            if !side.crosses(price, maker_price) {
                break;
            }

            let fill_quantity = maker.remaining().min(quantity - filled);
            filled += fill_quantity;
            fills.push(Fill {
                maker_id: key,
                price: maker_price,
                quantity: fill_quantity,
            });
        }

        Ok(FillPlan {
            side,
            price,
            quantity,
            owner,
            client_order_id,
            expire_timestamp,
            filled_quantity: filled,
            fills,
        })
    }

    /// Apply a previously computed plan against the current book state.
    ///
    /// The book may have changed since planning; each planned fill is
    /// re-validated at application time:
    ///
    /// - maker gone (canceled or fully filled since planning): skipped
    ///   silently
    /// - maker expired: removed, recorded under `expired`, skipped
    /// - maker price no longer crossing the plan price: commit stops, the
    ///   remaining (strictly worse-priced) fills are abandoned
    /// - otherwise: fills `min(planned, maker remaining, taker remaining)`
    ///
    /// When `inject_remainder` is set and the unfilled remainder still
    /// satisfies the minimum-size, lot-size, and expiry constraints, it is
    /// inserted as a fresh resting order and its id returned.
    pub fn commit_fill_plan(
        &mut self,
        plan: FillPlan,
        now: u64,
        inject_remainder: bool,
    ) -> CommitResult {
        let mut fills = Vec::new();
        let mut expired = Vec::new();
        let mut filled = 0u64;

        let opposite = self.side_mut(plan.side.opposite());
        for planned in &plan.fills {
            if filled == plan.quantity {
                break;
            }

            let Some(maker) = opposite.get(planned.maker_id) else {
                continue;
            };
            if maker.is_expired(now) {
                let gone = opposite
                    .remove(planned.maker_id)
                    .expect("maker was just observed");
                expired.push(OrderCancel::new(planned.maker_id, gone.remaining()));
                continue;
            }
            let maker_price = order_id::price(planned.maker_id);
            if !plan.side.crosses(plan.price, maker_price) {
                break;
            }

            let maker = opposite
                .get_mut(planned.maker_id)
                .expect("maker was just observed");
            let fill_quantity = maker.fill(planned.quantity.min(plan.quantity - filled));
            if fill_quantity > 0 {
                filled += fill_quantity;
                fills.push(Fill {
                    maker_id: planned.maker_id,
                    price: maker_price,
                    quantity: fill_quantity,
                });
            }
            if maker.is_filled() {
                opposite.remove(planned.maker_id);
            }
        }

        let remainder = plan.quantity - filled;
        let mut injected_order_id = None;
        if inject_remainder
            && remainder > 0
            && remainder >= self.min_size()
            && remainder % self.lot_size() == 0
            && now <= plan.expire_timestamp
        {
            let sequence = self.next_sequence(plan.side);
            let id = order_id::encode(plan.side.is_bid(), plan.price, sequence);
            self.insert_resting(Order {
                order_id: id,
                client_order_id: plan.client_order_id,
                owner: plan.owner,
                quantity: remainder,
                filled_quantity: 0,
                expire_timestamp: plan.expire_timestamp,
            });
            injected_order_id = Some(id);
        }

        CommitResult {
            filled_quantity: filled,
            fills,
            expired,
            injected_order_id,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
