//! Exponential moving average.
//!
//! k = 2/(n+1), seeded with the first price, then EMA = P*k + EMA*(1-k).

/// Running EMA state that folds prices one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Ema {
    k: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Ema {
            k: smoothing_factor(period),
            value: None,
        }
    }

    pub fn update(&mut self, price: f64) -> f64 {
        let next = match self.value {
            None => price,
            Some(prev) => price * self.k + prev * (1.0 - self.k),
        };
        self.value = Some(next);
        next
    }

    /// `None` until the first price has been folded in.
    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// EMA of the whole series; `None` for an empty series.
pub fn ema(prices: &[f64], period: usize) -> Option<f64> {
    let mut state = Ema::new(period);
    for &price in prices {
        state.update(price);
    }
    state.value()
}
