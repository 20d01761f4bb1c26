//! Property tests for ledger invariants.

use approx::assert_relative_eq;
use papertrade::domain::ledger::{Ledger, TradeRejected};
use proptest::prelude::*;

const SYMBOLS: [&str; 3] = ["AAPL", "MSFT", "NVDA"];

#[derive(Debug, Clone)]
enum Op {
    Buy { symbol: usize, shares: u64, cents: u32 },
    Sell { symbol: usize, shares: u64, cents: u32 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SYMBOLS.len(), 1..50u64, 1..50_000u32)
            .prop_map(|(symbol, shares, cents)| Op::Buy { symbol, shares, cents }),
        (0..SYMBOLS.len(), 1..50u64, 1..50_000u32)
            .prop_map(|(symbol, shares, cents)| Op::Sell { symbol, shares, cents }),
    ]
}

fn apply(ledger: &mut Ledger, op: &Op) -> Result<(), TradeRejected> {
    match *op {
        Op::Buy { symbol, shares, cents } => {
            ledger.buy(SYMBOLS[symbol], shares, f64::from(cents) / 100.0)
        }
        Op::Sell { symbol, shares, cents } => {
            ledger.sell(SYMBOLS[symbol], shares, f64::from(cents) / 100.0)
        }
    }
}

proptest! {
    #[test]
    fn buy_then_sell_restores_cash(shares in 1..100u64, cents in 1..10_000u32) {
        let price = f64::from(cents) / 100.0;
        let mut ledger = Ledger::default();

        ledger.buy("AAPL", shares, price).unwrap();
        ledger.sell("AAPL", shares, price).unwrap();

        assert_relative_eq!(ledger.cash_balance(), 10_000.0, epsilon = 1e-6);
        prop_assert!(!ledger.has_position("AAPL"));
        prop_assert_eq!(ledger.position_count(), 0);
    }

    #[test]
    fn cash_never_negative(ops in prop::collection::vec(op(), 1..60)) {
        let mut ledger = Ledger::default();
        for op in &ops {
            let before = ledger.clone();
            if apply(&mut ledger, op).is_err() {
                prop_assert_eq!(&ledger, &before);
            }
            prop_assert!(ledger.cash_balance() >= 0.0);
            prop_assert!(ledger.entries().all(|e| e.shares > 0));
        }
    }

    #[test]
    fn overdrawn_buy_rejected(extra in 1..1_000u64) {
        let mut ledger = Ledger::new(1_000.0);
        let before = ledger.clone();
        // 10 per share, so 100 shares exactly spend the balance
        let result = ledger.buy("AAPL", 100 + extra, 10.0);
        let rejected_for_funds = matches!(result, Err(TradeRejected::InsufficientFunds { .. }));
        prop_assert!(rejected_for_funds);
        prop_assert_eq!(ledger, before);
    }

    #[test]
    fn oversell_rejected(held in 1..100u64, extra in 1..100u64) {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", held, 1.0).unwrap();
        let before = ledger.clone();

        let result = ledger.sell("AAPL", held + extra, 1.0);
        let rejected_for_shares =
            matches!(result, Err(TradeRejected::InsufficientShares { .. }));
        prop_assert!(rejected_for_shares);
        prop_assert_eq!(ledger, before);
    }

    #[test]
    fn wacc_stays_between_buy_prices(
        buys in prop::collection::vec((1..20u64, 1..20_000u32), 1..10)
    ) {
        let mut ledger = Ledger::new(1.0e9);
        for &(shares, cents) in &buys {
            ledger.buy("AAPL", shares, f64::from(cents) / 100.0).unwrap();
        }
        let lo = buys.iter().map(|&(_, c)| f64::from(c) / 100.0).fold(f64::INFINITY, f64::min);
        let hi = buys.iter().map(|&(_, c)| f64::from(c) / 100.0).fold(0.0, f64::max);
        let wacc = ledger.entry("AAPL").unwrap().wacc_price;

        prop_assert!(wacc >= lo - 1e-9 && wacc <= hi + 1e-9);
        prop_assert_eq!(ledger.shares_of("AAPL"), buys.iter().map(|&(s, _)| s).sum::<u64>());
    }

    #[test]
    fn snapshot_restore_preserves_holdings(ops in prop::collection::vec(op(), 0..40)) {
        let mut ledger = Ledger::default();
        for op in &ops {
            let _ = apply(&mut ledger, op);
        }

        let mut restored = Ledger::default();
        restored.restore(&ledger.snapshot());

        prop_assert_eq!(restored.cash_balance(), ledger.cash_balance());
        prop_assert_eq!(restored.position_count(), ledger.position_count());
        for entry in ledger.entries() {
            let other = restored.entry(&entry.symbol).unwrap();
            prop_assert_eq!(other.shares, entry.shares);
            prop_assert_eq!(other.wacc_price, entry.wacc_price);
        }
    }

    #[test]
    fn clear_matches_fresh_ledger(ops in prop::collection::vec(op(), 0..40)) {
        let mut ledger = Ledger::new(5_000.0);
        for op in &ops {
            let _ = apply(&mut ledger, op);
        }
        ledger.clear();
        prop_assert_eq!(ledger.snapshot(), Ledger::new(5_000.0).snapshot());
    }
}

#[test]
fn wacc_blends_two_buys() {
    let mut ledger = Ledger::default();
    ledger.buy("AAPL", 10, 100.0).unwrap();
    ledger.buy("AAPL", 10, 120.0).unwrap();

    let entry = ledger.entry("AAPL").unwrap();
    assert_eq!(entry.shares, 20);
    assert_relative_eq!(entry.wacc_price, 110.0, epsilon = 1e-12);
}
