//! Simulated cash account and positions under weighted-average cost.

use std::collections::{BTreeMap, HashMap};

use super::position::PositionEntry;
use super::quote::{canonical_symbol, is_valid_symbol};
use super::snapshot::{self, LedgerSnapshot};

pub const DEFAULT_INITIAL_BALANCE: f64 = 10_000.0;

/// Why a buy or sell was refused. A refused trade never mutates the ledger.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TradeRejected {
    #[error("symbol must be non-empty with no commas, slashes or whitespace")]
    InvalidSymbol,

    #[error("share count must be positive")]
    InvalidShares,

    #[error("price must be a non-negative number, got {price}")]
    InvalidPrice { price: f64 },

    #[error("insufficient funds: cost {cost:.2} exceeds available cash {available:.2}")]
    InsufficientFunds { cost: f64, available: f64 },

    #[error("position in {symbol} would exceed the maximum share count")]
    PositionTooLarge { symbol: String },

    #[error("no position in {symbol}")]
    NoPosition { symbol: String },

    #[error("insufficient shares of {symbol}: holding {held}, requested {requested}")]
    InsufficientShares {
        symbol: String,
        held: u64,
        requested: u64,
    },
}

/// Single-writer ledger. Cash and entries change together in each operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    cash: f64,
    initial_balance: f64,
    entries: BTreeMap<String, PositionEntry>,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(DEFAULT_INITIAL_BALANCE)
    }
}

impl Ledger {
    /// A non-finite or negative starting balance falls back to
    /// [`DEFAULT_INITIAL_BALANCE`].
    pub fn new(initial_balance: f64) -> Self {
        let initial_balance = if initial_balance.is_finite() && initial_balance >= 0.0 {
            initial_balance
        } else {
            tracing::warn!(initial_balance, "invalid initial balance, using default");
            DEFAULT_INITIAL_BALANCE
        };
        Ledger {
            cash: initial_balance,
            initial_balance,
            entries: BTreeMap::new(),
        }
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    pub fn entry(&self, symbol: &str) -> Option<&PositionEntry> {
        self.entries.get(&canonical_symbol(symbol))
    }

    pub fn has_position(&self, symbol: &str) -> bool {
        self.entry(symbol).is_some()
    }

    pub fn shares_of(&self, symbol: &str) -> u64 {
        self.entry(symbol).map_or(0, |e| e.shares)
    }

    /// Entries in symbol order.
    pub fn entries(&self) -> impl Iterator<Item = &PositionEntry> {
        self.entries.values()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn position_count(&self) -> usize {
        self.entries.len()
    }

    pub fn total_shares(&self) -> u64 {
        self.entries
            .values()
            .fold(0u64, |total, e| total.saturating_add(e.shares))
    }

    pub fn buy(&mut self, symbol: &str, shares: u64, price: f64) -> Result<(), TradeRejected> {
        let symbol = validate_order(symbol, shares, price)?;
        let cost = shares as f64 * price;
        if cost > self.cash {
            tracing::debug!(%symbol, shares, price, cost, cash = self.cash, "buy rejected");
            return Err(TradeRejected::InsufficientFunds {
                cost,
                available: self.cash,
            });
        }

        match self.entries.get_mut(&symbol) {
            Some(entry) => {
                let Some(new_shares) = entry.shares.checked_add(shares) else {
                    return Err(TradeRejected::PositionTooLarge { symbol });
                };
                entry.wacc_price =
                    (entry.shares as f64 * entry.wacc_price + cost) / new_shares as f64;
                entry.shares = new_shares;
            }
            None => {
                self.entries
                    .insert(symbol.clone(), PositionEntry::new(symbol.clone(), shares, price));
            }
        }
        self.cash -= cost;

        tracing::info!(%symbol, shares, price, cash = self.cash, "bought");
        Ok(())
    }

    /// Selling leaves the average cost of the remaining shares untouched.
    pub fn sell(&mut self, symbol: &str, shares: u64, price: f64) -> Result<(), TradeRejected> {
        let symbol = validate_order(symbol, shares, price)?;
        let Some(entry) = self.entries.get_mut(&symbol) else {
            return Err(TradeRejected::NoPosition { symbol });
        };
        if entry.shares < shares {
            return Err(TradeRejected::InsufficientShares {
                held: entry.shares,
                requested: shares,
                symbol,
            });
        }

        entry.shares -= shares;
        if entry.shares == 0 {
            self.entries.remove(&symbol);
        }
        self.cash += shares as f64 * price;

        tracing::info!(%symbol, shares, price, cash = self.cash, "sold");
        Ok(())
    }

    /// Update marks for the symbols present in `prices`; everything else keeps
    /// its last mark. Non-finite or negative marks are ignored.
    pub fn mark_prices(&mut self, prices: &HashMap<String, f64>) {
        for entry in self.entries.values_mut() {
            match prices.get(&entry.symbol) {
                Some(&price) if price.is_finite() && price >= 0.0 => entry.current_price = price,
                Some(&price) => {
                    tracing::warn!(symbol = %entry.symbol, price, "ignoring invalid mark")
                }
                None => {}
            }
        }
    }

    pub fn total_value(&self) -> f64 {
        self.cash + self.entries.values().map(PositionEntry::market_value).sum::<f64>()
    }

    pub fn total_profit_loss(&self) -> f64 {
        self.entries
            .values()
            .fold(0.0, |total, entry| total + entry.unrealized_pnl())
    }

    pub fn clear(&mut self) {
        self.cash = self.initial_balance;
        self.entries.clear();
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        snapshot::encode(self.cash, self.entries.values())
    }

    /// Replace the ledger contents with `snapshot`. A malformed snapshot
    /// resets to the initial balance with no entries instead of failing.
    pub fn restore(&mut self, snapshot: &LedgerSnapshot) {
        match snapshot::decode(snapshot) {
            Ok((cash, entries)) => {
                self.cash = cash;
                self.entries = entries;
                tracing::debug!(cash, positions = self.entries.len(), "ledger restored");
            }
            Err(err) => {
                tracing::warn!(error = %err, "malformed ledger snapshot, resetting");
                self.clear();
            }
        }
    }
}

fn validate_order(symbol: &str, shares: u64, price: f64) -> Result<String, TradeRejected> {
    let symbol = canonical_symbol(symbol);
    if !is_valid_symbol(&symbol) {
        return Err(TradeRejected::InvalidSymbol);
    }
    if shares == 0 {
        return Err(TradeRejected::InvalidShares);
    }
    if !price.is_finite() || price < 0.0 {
        return Err(TradeRejected::InvalidPrice { price });
    }
    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn prices(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(s, p)| (s.to_string(), *p)).collect()
    }

    #[test]
    fn new_ledger() {
        let ledger = Ledger::default();
        assert_eq!(ledger.cash_balance(), 10_000.0);
        assert_eq!(ledger.initial_balance(), 10_000.0);
        assert_eq!(ledger.position_count(), 0);
        assert_eq!(ledger.total_value(), 10_000.0);
    }

    #[test]
    fn new_with_invalid_balance_uses_default() {
        assert_eq!(Ledger::new(-1.0).cash_balance(), DEFAULT_INITIAL_BALANCE);
        assert_eq!(Ledger::new(f64::NAN).cash_balance(), DEFAULT_INITIAL_BALANCE);
    }

    #[test]
    fn buy_opens_position() {
        let mut ledger = Ledger::default();
        ledger.buy("aapl", 10, 100.0).unwrap();

        let entry = ledger.entry("AAPL").unwrap();
        assert_eq!(entry.symbol, "AAPL");
        assert_eq!(entry.shares, 10);
        assert_eq!(entry.wacc_price, 100.0);
        assert_eq!(entry.current_price, 100.0);
        assert_eq!(ledger.cash_balance(), 9_000.0);
    }

    #[test]
    fn buy_twice_blends_wacc() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        ledger.buy("AAPL", 10, 120.0).unwrap();

        let entry = ledger.entry("AAPL").unwrap();
        assert_eq!(entry.shares, 20);
        assert_relative_eq!(entry.wacc_price, 110.0);
        assert_eq!(ledger.cash_balance(), 7_800.0);
    }

    #[test]
    fn buy_into_existing_entry_keeps_mark() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 1, 100.0).unwrap();
        ledger.mark_prices(&prices(&[("AAPL", 105.0)]));
        ledger.buy("AAPL", 1, 110.0).unwrap();
        assert_eq!(ledger.entry("AAPL").unwrap().current_price, 105.0);
    }

    #[test]
    fn buy_exactly_all_cash() {
        let mut ledger = Ledger::new(1_000.0);
        ledger.buy("X", 10, 100.0).unwrap();
        assert_eq!(ledger.cash_balance(), 0.0);
    }

    #[test]
    fn buy_insufficient_funds_leaves_ledger_unchanged() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 5, 100.0).unwrap();
        let before = ledger.clone();

        let err = ledger.buy("MSFT", 100, 100.0).unwrap_err();
        assert_eq!(
            err,
            TradeRejected::InsufficientFunds {
                cost: 10_000.0,
                available: 9_500.0
            }
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn buy_rejects_bad_input() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.buy("AAPL", 0, 10.0), Err(TradeRejected::InvalidShares));
        assert_eq!(ledger.buy("  ", 1, 10.0), Err(TradeRejected::InvalidSymbol));
        assert!(matches!(
            ledger.buy("AAPL", 1, -1.0),
            Err(TradeRejected::InvalidPrice { .. })
        ));
        assert!(matches!(
            ledger.buy("AAPL", 1, f64::NAN),
            Err(TradeRejected::InvalidPrice { .. })
        ));
        assert_eq!(ledger, Ledger::default());
    }

    #[test]
    fn buy_rejects_symbols_that_break_the_snapshot() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        let before = ledger.clone();

        for symbol in ["BRK,B", "AAPL\nMSFT", "BRK B", "../X", "A\\B", "X\r"] {
            assert_eq!(
                ledger.buy(symbol, 1, 50.0),
                Err(TradeRejected::InvalidSymbol),
                "{symbol:?}"
            );
        }
        assert_eq!(ledger, before);

        let mut restored = Ledger::default();
        restored.restore(&ledger.snapshot());
        assert_eq!(restored.shares_of("AAPL"), 10);
        assert_eq!(restored.cash_balance(), 9_000.0);
    }

    #[test]
    fn buy_past_max_share_count_is_rejected() {
        let mut ledger = Ledger::default();
        ledger.buy("FREE", u64::MAX, 0.0).unwrap();
        let before = ledger.clone();

        assert_eq!(
            ledger.buy("FREE", 1, 0.0),
            Err(TradeRejected::PositionTooLarge {
                symbol: "FREE".into()
            })
        );
        assert_eq!(ledger, before);
        assert_eq!(ledger.shares_of("FREE"), u64::MAX);
    }

    #[test]
    fn total_shares_saturates() {
        let mut ledger = Ledger::default();
        ledger.buy("A", u64::MAX, 0.0).unwrap();
        ledger.buy("B", 5, 0.0).unwrap();
        assert_eq!(ledger.total_shares(), u64::MAX);
    }

    #[test]
    fn buy_at_zero_price_is_allowed() {
        let mut ledger = Ledger::default();
        ledger.buy("FREE", 3, 0.0).unwrap();
        assert_eq!(ledger.shares_of("FREE"), 3);
        assert_eq!(ledger.cash_balance(), 10_000.0);
    }

    #[test]
    fn sell_partial_keeps_wacc() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        ledger.buy("AAPL", 10, 120.0).unwrap();
        ledger.sell("AAPL", 5, 150.0).unwrap();

        let entry = ledger.entry("AAPL").unwrap();
        assert_eq!(entry.shares, 15);
        assert_relative_eq!(entry.wacc_price, 110.0);
        assert_eq!(ledger.cash_balance(), 7_800.0 + 750.0);
    }

    #[test]
    fn sell_all_removes_entry() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        ledger.sell("aapl", 10, 100.0).unwrap();

        assert!(!ledger.has_position("AAPL"));
        assert_eq!(ledger.position_count(), 0);
        assert_eq!(ledger.cash_balance(), 10_000.0);
    }

    #[test]
    fn sell_without_position() {
        let mut ledger = Ledger::default();
        assert_eq!(
            ledger.sell("AAPL", 1, 10.0),
            Err(TradeRejected::NoPosition {
                symbol: "AAPL".into()
            })
        );
    }

    #[test]
    fn sell_more_than_held_leaves_ledger_unchanged() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        let before = ledger.clone();

        assert_eq!(
            ledger.sell("AAPL", 11, 100.0),
            Err(TradeRejected::InsufficientShares {
                symbol: "AAPL".into(),
                held: 10,
                requested: 11
            })
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn sell_rejects_zero_shares() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        assert_eq!(ledger.sell("AAPL", 0, 100.0), Err(TradeRejected::InvalidShares));
    }

    #[test]
    fn mark_prices_updates_only_present_symbols() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        ledger.buy("MSFT", 5, 200.0).unwrap();

        ledger.mark_prices(&prices(&[("AAPL", 110.0), ("TSLA", 1.0)]));

        assert_eq!(ledger.entry("AAPL").unwrap().current_price, 110.0);
        assert_eq!(ledger.entry("MSFT").unwrap().current_price, 200.0);
        assert!(!ledger.has_position("TSLA"));
        assert_eq!(ledger.cash_balance(), 8_000.0);
    }

    #[test]
    fn mark_prices_ignores_invalid_marks() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        ledger.mark_prices(&prices(&[("AAPL", f64::NAN)]));
        assert_eq!(ledger.entry("AAPL").unwrap().current_price, 100.0);
    }

    #[test]
    fn total_value_and_profit_loss() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        ledger.buy("MSFT", 5, 200.0).unwrap();
        ledger.mark_prices(&prices(&[("AAPL", 110.0), ("MSFT", 180.0)]));

        assert_relative_eq!(ledger.total_value(), 8_000.0 + 1_100.0 + 900.0);
        assert_relative_eq!(ledger.total_profit_loss(), 100.0 - 100.0);
        assert_eq!(ledger.total_shares(), 15);
    }

    #[test]
    fn clear_resets_to_initial_balance() {
        let mut ledger = Ledger::new(5_000.0);
        ledger.buy("AAPL", 10, 100.0).unwrap();
        ledger.clear();

        assert_eq!(ledger.cash_balance(), 5_000.0);
        assert_eq!(ledger.position_count(), 0);
        assert_eq!(ledger.snapshot().as_str(), "5000\n");
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();
        ledger.buy("AAPL", 10, 120.0).unwrap();
        ledger.buy("MSFT", 3, 333.33).unwrap();

        let mut restored = Ledger::default();
        restored.restore(&ledger.snapshot());

        assert_eq!(restored.cash_balance(), ledger.cash_balance());
        assert_eq!(restored.shares_of("AAPL"), 20);
        assert_eq!(restored.entry("AAPL").unwrap().wacc_price, 110.0);
        assert_eq!(restored.entry("MSFT").unwrap().wacc_price, 333.33);
        assert_eq!(restored.entry("MSFT").unwrap().current_price, 333.33);
    }

    #[test]
    fn restore_malformed_resets() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10, 100.0).unwrap();

        ledger.restore(&LedgerSnapshot::from_text("not a number\nAAPL,1,1\n"));

        assert_eq!(ledger.cash_balance(), 10_000.0);
        assert_eq!(ledger.position_count(), 0);
    }

    #[test]
    fn restore_bad_entry_resets_whole_ledger() {
        let mut ledger = Ledger::default();
        ledger.restore(&LedgerSnapshot::from_text("500\nAAPL,1,1\nMSFT,abc,1\n"));
        assert_eq!(ledger, Ledger::default());
    }

    #[test]
    fn symbols_are_sorted() {
        let mut ledger = Ledger::default();
        ledger.buy("MSFT", 1, 1.0).unwrap();
        ledger.buy("AAPL", 1, 1.0).unwrap();
        assert_eq!(ledger.symbols().collect::<Vec<_>>(), vec!["AAPL", "MSFT"]);
    }
}
