//! 52-week position: where the price sits between the yearly low and high,
//! as a percentage clamped to [0, 100].

pub const NEUTRAL: f64 = 50.0;
pub const SYNTHETIC_HIGH_FACTOR: f64 = 1.2;
pub const SYNTHETIC_LOW_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearRange {
    pub high: f64,
    pub low: f64,
}

impl YearRange {
    /// Use the reported bounds, substituting `price * 1.2` for a missing high
    /// and `price * 0.8` for a missing low. Bounds <= 0 count as missing.
    pub fn with_fallback(price: f64, year_high: f64, year_low: f64) -> Self {
        YearRange {
            high: if year_high > 0.0 {
                year_high
            } else {
                price * SYNTHETIC_HIGH_FACTOR
            },
            low: if year_low > 0.0 {
                year_low
            } else {
                price * SYNTHETIC_LOW_FACTOR
            },
        }
    }

    /// 50 when the range is empty or inverted.
    pub fn position(&self, price: f64) -> f64 {
        if self.high <= self.low {
            return NEUTRAL;
        }
        ((price - self.low) / (self.high - self.low) * 100.0).clamp(0.0, 100.0)
    }
}
