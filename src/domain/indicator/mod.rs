//! Technical and fundamental indicators.
//!
//! Every function here is pure and takes an oldest-first series (most recent
//! value last). Short or degenerate input yields the indicator's neutral value
//! instead of an error:
//! - MACD: 0.0 below [`macd::MIN_POINTS`] prices
//! - RSI: 50.0 below [`rsi::PERIOD`] price changes
//! - Relative volume: 1.0 below [`relative_volume::WINDOW`] volumes
//! - 52-week position: 50.0 when the range is empty

pub mod ema;
pub mod macd;
pub mod relative_volume;
pub mod rsi;
pub mod year_range;

use std::fmt;

/// Identity of each scored indicator, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Macd,
    Rsi,
    RelativeVolume,
    YearPosition,
    PeRatio,
    Eps,
}

impl Indicator {
    pub const ALL: [Indicator; 6] = [
        Indicator::Macd,
        Indicator::Rsi,
        Indicator::RelativeVolume,
        Indicator::YearPosition,
        Indicator::PeRatio,
        Indicator::Eps,
    ];
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Indicator::Macd => "MACD",
            Indicator::Rsi => "RSI",
            Indicator::RelativeVolume => "RVOL",
            Indicator::YearPosition => "52W Pos",
            Indicator::PeRatio => "P/E",
            Indicator::Eps => "EPS",
        };
        f.pad(label)
    }
}
