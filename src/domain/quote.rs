//! Point-in-time quote snapshot.

use serde::Deserialize;

/// Current quote for one symbol. Fields the provider did not report are 0.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub previous_close: f64,
    pub volume: f64,
    pub avg_volume: f64,
    pub year_high: f64,
    pub year_low: f64,
    pub pe_ratio: f64,
    pub eps: f64,
}

impl Quote {
    pub fn new(symbol: &str, price: f64) -> Self {
        Quote {
            symbol: canonical_symbol(symbol),
            price,
            ..Quote::default()
        }
    }

    /// A quote with an empty symbol or a non-positive price stands for
    /// "no data" and must never be read as a real zero-valued quote.
    pub fn is_available(&self) -> bool {
        !self.symbol.is_empty() && self.price > 0.0
    }
}

/// Trimmed, upper-cased ticker.
pub fn canonical_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Symbols double as snapshot fields and history file stems, so `,`, `/`,
/// `\`, whitespace and control characters are refused.
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && !symbol
            .chars()
            .any(|c| c == ',' || c == '/' || c == '\\' || c.is_whitespace() || c.is_control())
}
