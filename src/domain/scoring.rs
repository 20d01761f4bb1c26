//! Discrete indicator scores and the weighted recommendation.
//!
//! Each score is in {-2, -1, 0, 1, 2}, bearish to bullish. The thresholds
//! and weights are fixed heuristics.

use std::fmt;

use super::indicator::macd::MacdReading;

pub const DEFAULT_INDUSTRY_PE: f64 = 18.0;
pub const HIGH_RELATIVE_VOLUME: f64 = 1.5;
pub const BUY_THRESHOLD: f64 = 0.8;
pub const SELL_THRESHOLD: f64 = -0.8;

pub const WEIGHT_MACD: f64 = 0.25;
pub const WEIGHT_RSI: f64 = 0.15;
pub const WEIGHT_VOLUME: f64 = 0.10;
pub const WEIGHT_POSITION: f64 = 0.15;
pub const WEIGHT_PE: f64 = 0.20;
pub const WEIGHT_EPS: f64 = 0.15;

/// Crossing the two-point signal line scores ±2; staying above or below
/// it scores ±1. No reading (fewer than two prices) scores 0.
pub fn score_macd(reading: Option<MacdReading>) -> i8 {
    let Some(reading) = reading else {
        return 0;
    };
    let MacdReading { current, previous } = reading;
    let signal = reading.signal();
    if previous <= signal && current > signal {
        2
    } else if previous >= signal && current < signal {
        -2
    } else if current > signal {
        1
    } else if current < signal {
        -1
    } else {
        0
    }
}

pub fn score_rsi(rsi: f64) -> i8 {
    if rsi < 20.0 {
        2
    } else if rsi < 30.0 {
        1
    } else if rsi > 80.0 {
        -2
    } else if rsi > 70.0 {
        -1
    } else {
        0
    }
}

/// High relative volume confirms the direction of the latest price change.
pub fn score_volume(relative_volume: f64, prices: &[f64]) -> i8 {
    let [.., prev, last] = prices else {
        return 0;
    };
    if relative_volume <= HIGH_RELATIVE_VOLUME {
        return 0;
    }
    let change = last - prev;
    if change > 0.0 {
        1
    } else if change < 0.0 {
        -1
    } else {
        0
    }
}

pub fn score_year_position(position: f64) -> i8 {
    if position < 10.0 {
        2
    } else if position < 30.0 {
        1
    } else if position > 90.0 {
        -2
    } else if position > 70.0 {
        -1
    } else {
        0
    }
}

pub fn score_pe(pe_ratio: f64, industry_pe: f64) -> i8 {
    if pe_ratio < industry_pe * 0.6 {
        2
    } else if pe_ratio < industry_pe * 0.8 {
        1
    } else if pe_ratio > industry_pe * 1.4 {
        -2
    } else if pe_ratio > industry_pe * 1.2 {
        -1
    } else {
        0
    }
}

/// Positive earnings score +1; zero or negative earnings score -1.
pub fn score_eps(eps: f64) -> i8 {
    if eps > 0.0 { 1 } else { -1 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl Recommendation {
    pub fn from_score(overall: f64) -> Self {
        if overall >= BUY_THRESHOLD {
            Recommendation::Buy
        } else if overall <= SELL_THRESHOLD {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Recommendation::Buy => "BUY",
            Recommendation::Hold => "HOLD",
            Recommendation::Sell => "SELL",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubScores {
    pub macd: i8,
    pub rsi: i8,
    pub volume: i8,
    pub position: i8,
    pub pe: i8,
    pub eps: i8,
}

impl SubScores {
    pub fn weighted(&self) -> f64 {
        WEIGHT_MACD * f64::from(self.macd)
            + WEIGHT_RSI * f64::from(self.rsi)
            + WEIGHT_VOLUME * f64::from(self.volume)
            + WEIGHT_POSITION * f64::from(self.position)
            + WEIGHT_PE * f64::from(self.pe)
            + WEIGHT_EPS * f64::from(self.eps)
    }
}

/// Fully derived output of one analysis pass. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSet {
    pub sub: SubScores,
    pub overall: f64,
    pub recommendation: Recommendation,
}

impl From<SubScores> for ScoreSet {
    fn from(sub: SubScores) -> Self {
        let overall = sub.weighted();
        ScoreSet {
            sub,
            overall,
            recommendation: Recommendation::from_score(overall),
        }
    }
}
