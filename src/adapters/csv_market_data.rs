//! CSV file market data adapter.
//!
//! Quotes come from one `quotes.csv` snapshot; history comes from one
//! `{SYMBOL}.csv` file per symbol in the same directory.

use crate::domain::error::PapertradeError;
use crate::domain::ohlcv::{self, PricePoint};
use crate::domain::quote::{Quote, canonical_symbol, is_valid_symbol};
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const QUOTES_FILE: &str = "quotes.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct MarketDataConfig {
    pub data_dir: PathBuf,
}

pub struct CsvMarketDataAdapter {
    config: MarketDataConfig,
}

impl CsvMarketDataAdapter {
    pub fn new(config: MarketDataConfig) -> Self {
        Self { config }
    }

    fn quotes_path(&self) -> PathBuf {
        self.config.data_dir.join(QUOTES_FILE)
    }

    fn history_path(&self, symbol: &str) -> PathBuf {
        self.config.data_dir.join(format!("{}.csv", symbol))
    }

    fn read_quotes(&self) -> Result<Vec<Quote>, PapertradeError> {
        let path = self.quotes_path();
        let content = fs::read_to_string(&path).map_err(|e| PapertradeError::MarketData {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut quotes = Vec::new();
        for result in rdr.deserialize::<Quote>() {
            let quote = result.map_err(|e| PapertradeError::MarketData {
                reason: format!("quote parse error in {}: {}", path.display(), e),
            })?;
            quotes.push(quote);
        }

        tracing::debug!(path = %path.display(), count = quotes.len(), "read quotes");
        Ok(quotes)
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, PapertradeError>
where
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| PapertradeError::MarketData {
            reason: format!("missing {} column", name),
        })?
        .parse()
        .map_err(|e| PapertradeError::MarketData {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl MarketDataPort for CsvMarketDataAdapter {
    fn fetch_quote(&self, symbol: &str) -> Result<Option<Quote>, PapertradeError> {
        let symbol = canonical_symbol(symbol);
        let quote = self
            .read_quotes()?
            .into_iter()
            .map(|mut q| {
                q.symbol = canonical_symbol(&q.symbol);
                q
            })
            .find(|q| q.symbol == symbol)
            .filter(Quote::is_available);

        if quote.is_none() {
            tracing::debug!(%symbol, "no usable quote");
        }
        Ok(quote)
    }

    fn fetch_history(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PricePoint>, PapertradeError> {
        let symbol = canonical_symbol(symbol);
        if !is_valid_symbol(&symbol) {
            return Err(PapertradeError::MarketData {
                reason: format!("invalid symbol {:?}", symbol),
            });
        }
        let path = self.history_path(&symbol);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no history file");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(PapertradeError::MarketData {
                    reason: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| PapertradeError::MarketData {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| PapertradeError::MarketData {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                PapertradeError::MarketData {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            bars.push(PricePoint {
                date,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        ohlcv::sort_oldest_first(&mut bars);
        let bars = ohlcv::most_recent(&bars, limit).to_vec();

        tracing::debug!(%symbol, bars = bars.len(), "read history");
        Ok(bars)
    }
}
