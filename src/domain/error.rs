//! Domain error types.

use crate::domain::ledger::TradeRejected;
use crate::domain::watchlist::WatchlistError;

/// Top-level error type for papertrade.
///
/// Ledger validation failures travel as [`TradeRejected`] and only become a
/// `PapertradeError` at the CLI edge, where they pick up an exit code.
#[derive(Debug, thiserror::Error)]
pub enum PapertradeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("market data error: {reason}")]
    MarketData { reason: String },

    #[error("no quote available for {symbol}")]
    NoQuote { symbol: String },

    #[error("ledger storage error: {reason}")]
    Storage { reason: String },

    #[error("trade rejected: {0}")]
    Trade(#[from] TradeRejected),

    #[error(transparent)]
    Watchlist(#[from] WatchlistError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PapertradeError> for std::process::ExitCode {
    fn from(err: &PapertradeError) -> Self {
        let code: u8 = match err {
            PapertradeError::Io(_) | PapertradeError::Storage { .. } => 1,
            PapertradeError::ConfigParse { .. }
            | PapertradeError::ConfigMissing { .. }
            | PapertradeError::ConfigInvalid { .. }
            | PapertradeError::Watchlist(_) => 2,
            PapertradeError::MarketData { .. } | PapertradeError::NoQuote { .. } => 3,
            PapertradeError::Trade(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
