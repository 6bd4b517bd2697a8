//! Matchbook - Binary Entry Point
//!
//! Walks the engine API end to end: rest some liquidity, preview a taker
//! with a fill plan, commit it, and print the resulting book state.

use matchbook::types::price::from_fixed_trimmed;
use matchbook::{Book, Side};

fn main() {
    println!("===========================================");
    println!("  Matchbook - limit order matching engine");
    println!("===========================================");
    println!();

    // Prices/quantities are fixed-point u64 scaled by 10^8.
    // tick 0.01, lot 0.001, minimum size 0.01
    let mut book = Book::new(1_000_000, 100_000, 1_000_000);
    let now = 1_703_577_600_000u64;
    let expire = now + 86_400_000;

    println!("Resting maker liquidity...");
    book.create_order(Side::Ask, 5_000_000_000_000, 100_000_000, 7, 1, expire, now)
        .unwrap();
    book.create_order(Side::Ask, 5_000_000_000_000, 50_000_000, 7, 2, expire, now)
        .unwrap();
    book.create_order(Side::Bid, 4_990_000_000_000, 80_000_000, 9, 3, expire, now)
        .unwrap();
    println!("  {} orders resting", book.order_count());
    println!();

    println!("Planning a bid: 1.2 @ 50000...");
    let plan = book
        .compute_fill_plan(Side::Bid, 5_000_000_000_000, 120_000_000, 11, 4, expire, now)
        .unwrap();
    println!("  planned fills: {}", plan.fills.len());
    println!("  planned quantity: {}", from_fixed_trimmed(plan.filled_quantity));
    println!("  unfilled remainder: {}", from_fixed_trimmed(plan.remaining()));
    println!();

    println!("Committing the plan...");
    let result = book.commit_fill_plan(plan, now, true);
    for fill in &result.fills {
        println!(
            "  filled {} @ {} against maker {:#x}",
            from_fixed_trimmed(fill.quantity),
            from_fixed_trimmed(fill.price),
            fill.maker_id,
        );
    }
    if let Some(id) = result.injected_order_id {
        println!("  remainder rests as {:#x}", id);
    }
    println!();

    println!("Book state:");
    let bids = book.level2_range(Side::Bid, 1, u64::MAX, 5, now).unwrap();
    let asks = book.level2_range(Side::Ask, 1, u64::MAX, 5, now).unwrap();
    for (price, quantity) in asks.iter().rev() {
        println!("  ask {} x {}", from_fixed_trimmed(*price), from_fixed_trimmed(*quantity));
    }
    for (price, quantity) in &bids {
        println!("  bid {} x {}", from_fixed_trimmed(*price), from_fixed_trimmed(*quantity));
    }
    match book.mid_price(now) {
        Ok(mid) => println!("  mid {}", from_fixed_trimmed(mid)),
        Err(e) => println!("  mid unavailable: {}", e),
    }
    println!();
    println!("State digest: {}", book.state_digest_hex());
}
