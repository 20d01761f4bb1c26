//! RSI (Relative Strength Index).
//!
//! Simple averages over the first 14 price changes of the series:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), or 100 when avg_loss == 0.
//! Fewer than 14 changes read as the neutral 50.

pub const PERIOD: usize = 14;
pub const NEUTRAL: f64 = 50.0;

pub fn rsi(prices: &[f64]) -> f64 {
    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    if changes.len() < PERIOD {
        return NEUTRAL;
    }

    let window = &changes[..PERIOD];
    let avg_gain = window.iter().map(|&c| c.max(0.0)).sum::<f64>() / PERIOD as f64;
    let avg_loss = window.iter().map(|&c| (-c).max(0.0)).sum::<f64>() / PERIOD as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
