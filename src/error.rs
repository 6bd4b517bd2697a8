//! Error taxonomy for book operations.
//!
//! Every variant corresponds to a validation failure detected *before* any
//! mutation (validate-then-mutate discipline). Stale-plan divergence during
//! a commit is deliberately not represented here: a maker vanishing or
//! expiring between plan and commit is documented skip-on-divergence
//! behavior, not an error.

use thiserror::Error;

/// Validation and lookup failures surfaced by the book.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("quantity {quantity} is below the minimum order size {min_size}")]
    BelowMinSize { quantity: u64, min_size: u64 },

    #[error("quantity {quantity} is not a multiple of the lot size {lot_size}")]
    QuantityOffLot { quantity: u64, lot_size: u64 },

    #[error("price {price} is outside the representable price range")]
    PriceOutOfRange { price: u64 },

    #[error("price {price} is not a multiple of the tick size {tick_size}")]
    PriceOffTick { price: u64, tick_size: u64 },

    #[error("order expired at {expire_timestamp}, now is {now}")]
    Expired { expire_timestamp: u64, now: u64 },

    #[error("no resting order with id {order_id:#x}")]
    OrderNotFound { order_id: u128 },

    #[error("modify must decrease quantity: {new_quantity} is not below {quantity}")]
    ModifyMustDecrease { quantity: u64, new_quantity: u64 },

    #[error("new quantity {new_quantity} does not exceed the filled quantity {filled_quantity}")]
    ModifyBelowFill {
        new_quantity: u64,
        filled_quantity: u64,
    },

    #[error("one book side has no live orders")]
    EmptyBookSide,

    #[error("level-2 query needs a non-zero tick count")]
    ZeroTickCount,
}
