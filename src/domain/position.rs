//! Position entry held in the ledger.

/// One open holding. `shares` is always positive while the entry exists.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionEntry {
    pub symbol: String,
    pub shares: u64,
    /// Share-weighted average acquisition cost. Only buys move it.
    pub wacc_price: f64,
    /// Last known market mark. Never feeds the cost basis.
    pub current_price: f64,
}

impl PositionEntry {
    pub fn new(symbol: String, shares: u64, price: f64) -> Self {
        PositionEntry {
            symbol,
            shares,
            wacc_price: price,
            current_price: price,
        }
    }

    pub fn market_value(&self) -> f64 {
        self.shares as f64 * self.current_price
    }

    pub fn cost_basis(&self) -> f64 {
        self.shares as f64 * self.wacc_price
    }

    pub fn unrealized_pnl(&self) -> f64 {
        self.market_value() - self.cost_basis()
    }

    /// Unrealized P/L as a percentage of cost; 0 for a zero-cost position.
    pub fn pnl_percent(&self) -> f64 {
        let cost = self.cost_basis();
        if cost == 0.0 {
            return 0.0;
        }
        self.unrealized_pnl() / cost * 100.0
    }
}
