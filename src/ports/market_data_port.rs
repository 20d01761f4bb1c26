//! Market data access port trait.

use crate::domain::error::PapertradeError;
use crate::domain::ohlcv::PricePoint;
use crate::domain::quote::Quote;

pub trait MarketDataPort {
    /// Current quote for `symbol`. `Ok(None)` when the source has no
    /// usable quote for it.
    fn fetch_quote(&self, symbol: &str) -> Result<Option<Quote>, PapertradeError>;

    /// At most `limit` most recent bars, oldest first.
    fn fetch_history(&self, symbol: &str, limit: usize)
    -> Result<Vec<PricePoint>, PapertradeError>;
}
