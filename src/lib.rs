//! # Matchbook
//!
//! Price-time priority central limit order book with a plan/commit
//! execution protocol.
//!
//! ## Architecture
//!
//! - **Types**: composite order ids, orders, fills, plans, cancel records
//! - **OrderBook**: two ordered sides, matching, expiry collection, queries
//!
//! ## Design Principles
//!
//! 1. **Determinism**: every operation is a pure function of the book state
//!    and its inputs, including the caller-supplied `now`
//! 2. **No value transfer**: the engine reports fills and removals; moving
//!    collateral is the caller's job
//! 3. **Single-threaded**: callers serialize access; the only concurrency
//!    modeled is the gap between planning and committing a fill, handled by
//!    optimistic revalidation instead of locking
//! 4. **Bounded work**: matching touches at most [`MAX_FILLS`] makers per
//!    call, and expiry collection takes an explicit removal budget
//!
//! ## Example
//!
//! ```
//! use matchbook::{Book, Side};
//!
//! let mut book = Book::new(1, 1, 1);
//!
//! // Rest an ask: 100 units at price 10.
//! book.create_order(Side::Ask, 10, 100, 7, 1, u64::MAX, 0).unwrap();
//!
//! // Preview a crossing bid, then apply it.
//! let plan = book.compute_fill_plan(Side::Bid, 10, 40, 8, 2, u64::MAX, 0).unwrap();
//! assert_eq!(plan.filled_quantity, 40);
//!
//! let result = book.commit_fill_plan(plan, 0, true);
//! assert_eq!(result.filled_quantity, 40);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy for book operations
pub mod error;

/// Order book: ordered sides, matching, queries
pub mod orderbook;

/// Core data types: orders, fills, plans, composite ids
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::BookError;
pub use orderbook::{Book, CommitResult, MatchResult, SideBook, MAX_FILLS};
pub use types::{Fill, FillPlan, Order, OrderCancel, Side};
