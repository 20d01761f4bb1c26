//! Per-symbol analysis: quote + history → indicator values → scores.
//!
//! Missing inputs degrade to neutral or substitute values, so any symbol with
//! an available quote always yields an [`Analysis`].

use super::indicator::macd::{self, MacdReading};
use super::indicator::relative_volume::{quote_relative_volume, relative_volume};
use super::indicator::rsi::rsi;
use super::indicator::year_range::YearRange;
use super::ohlcv::{self, PricePoint};
use super::quote::Quote;
use super::scoring::{
    DEFAULT_INDUSTRY_PE, ScoreSet, SubScores, score_eps, score_macd, score_pe, score_rsi,
    score_volume, score_year_position,
};

pub const DEFAULT_HISTORY_DAYS: usize = 30;
pub const FALLBACK_PE: f64 = 15.0;
pub const FALLBACK_EPS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub industry_pe: f64,
    /// Substituted when the quote reports a P/E of 0.
    pub fallback_pe: f64,
    /// Substituted when the quote reports an EPS of 0.
    pub fallback_eps: f64,
    pub history_days: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            industry_pe: DEFAULT_INDUSTRY_PE,
            fallback_pe: FALLBACK_PE,
            fallback_eps: FALLBACK_EPS,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeSource {
    /// Quote volume over the provider's average volume.
    Quote,
    /// Latest bar volume over the window mean.
    Series,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorValues {
    pub macd: f64,
    pub rsi: f64,
    pub relative_volume: f64,
    pub volume_source: VolumeSource,
    pub year_position: f64,
    pub pe_ratio: f64,
    pub industry_pe: f64,
    pub eps: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub symbol: String,
    pub values: IndicatorValues,
    pub scores: ScoreSet,
}

/// Analyze one symbol. Returns `None` when the quote is unavailable.
///
/// `history` must be oldest first.
pub fn analyze(quote: &Quote, history: &[PricePoint], config: &AnalysisConfig) -> Option<Analysis> {
    if !quote.is_available() {
        tracing::debug!(symbol = %quote.symbol, "skipping unavailable quote");
        return None;
    }

    let prices = ohlcv::closes(history);
    let reading = macd::macd_reading(&prices);
    let macd_value = reading.map_or(0.0, |MacdReading { current, .. }| current);

    let (relative_volume, volume_source) =
        match quote_relative_volume(quote.volume, quote.avg_volume) {
            Some(rv) => (rv, VolumeSource::Quote),
            None => (relative_volume(&ohlcv::volumes(history)), VolumeSource::Series),
        };

    let year_position =
        YearRange::with_fallback(quote.price, quote.year_high, quote.year_low).position(quote.price);

    let pe_ratio = if quote.pe_ratio != 0.0 {
        quote.pe_ratio
    } else {
        config.fallback_pe
    };
    let eps = if quote.eps != 0.0 {
        quote.eps
    } else {
        config.fallback_eps
    };

    let values = IndicatorValues {
        macd: macd_value,
        rsi: rsi(&prices),
        relative_volume,
        volume_source,
        year_position,
        pe_ratio,
        industry_pe: config.industry_pe,
        eps,
    };

    let sub = SubScores {
        macd: score_macd(reading),
        rsi: score_rsi(values.rsi),
        volume: score_volume(values.relative_volume, &prices),
        position: score_year_position(values.year_position),
        pe: score_pe(values.pe_ratio, values.industry_pe),
        eps: score_eps(values.eps),
    };
    let scores = ScoreSet::from(sub);

    tracing::debug!(
        symbol = %quote.symbol,
        bars = history.len(),
        overall = scores.overall,
        recommendation = %scores.recommendation,
        "analyzed"
    );

    Some(Analysis {
        symbol: quote.symbol.clone(),
        values,
        scores,
    })
}
