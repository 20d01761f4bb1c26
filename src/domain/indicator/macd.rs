//! MACD (Moving Average Convergence Divergence).
//!
//! MACD = EMA(12) - EMA(26), both seeded at the first price and folded over
//! the whole series. Series shorter than 26 prices read as 0.
//!
//! The "previous" MACD used for the crossover score is the MACD of the series
//! without its last price. [`MacdState`] reads it off the running fold just
//! before the last price goes in, so no second pass over the data is needed.

use super::ema::Ema;

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const MIN_POINTS: usize = 26;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdState {
    fast: Ema,
    slow: Ema,
    count: usize,
}

impl Default for MacdState {
    fn default() -> Self {
        MacdState {
            fast: Ema::new(FAST_PERIOD),
            slow: Ema::new(SLOW_PERIOD),
            count: 0,
        }
    }
}

impl MacdState {
    pub fn update(&mut self, price: f64) {
        self.fast.update(price);
        self.slow.update(price);
        self.count += 1;
    }

    pub fn value(&self) -> f64 {
        if self.count < MIN_POINTS {
            return 0.0;
        }
        match (self.fast.value(), self.slow.value()) {
            (Some(fast), Some(slow)) => fast - slow,
            _ => 0.0,
        }
    }
}

/// Current and previous MACD of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdReading {
    pub current: f64,
    pub previous: f64,
}

impl MacdReading {
    /// Two-point signal line: the mean of the current and previous MACD.
    pub fn signal(&self) -> f64 {
        (self.current + self.previous) / 2.0
    }
}

pub fn macd(prices: &[f64]) -> f64 {
    let mut state = MacdState::default();
    for &price in prices {
        state.update(price);
    }
    state.value()
}

/// `None` when there are fewer than two prices to compare.
pub fn macd_reading(prices: &[f64]) -> Option<MacdReading> {
    let (&last, head) = prices.split_last()?;
    if head.is_empty() {
        return None;
    }

    let mut state = MacdState::default();
    for &price in head {
        state.update(price);
    }
    let previous = state.value();
    state.update(last);

    Some(MacdReading {
        current: state.value(),
        previous,
    })
}
