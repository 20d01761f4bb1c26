#![allow(dead_code)]

use chrono::NaiveDate;
use papertrade::domain::error::PapertradeError;
pub use papertrade::domain::ohlcv::PricePoint;
pub use papertrade::domain::quote::Quote;
use papertrade::domain::snapshot::LedgerSnapshot;
use papertrade::ports::ledger_store::LedgerStore;
use papertrade::ports::market_data_port::MarketDataPort;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub struct MockMarketData {
    pub quotes: HashMap<String, Quote>,
    pub history: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
    pub history_requests: RefCell<Vec<(String, usize)>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            quotes: HashMap::new(),
            history: HashMap::new(),
            errors: HashMap::new(),
            history_requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quotes.insert(quote.symbol.clone(), quote);
        self
    }

    pub fn with_price(self, symbol: &str, price: f64) -> Self {
        self.with_quote(Quote::new(symbol, price))
    }

    pub fn with_history(mut self, symbol: &str, bars: Vec<PricePoint>) -> Self {
        self.history.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn fetch_quote(&self, symbol: &str) -> Result<Option<Quote>, PapertradeError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(PapertradeError::MarketData {
                reason: reason.clone(),
            });
        }
        Ok(self.quotes.get(symbol).cloned().filter(Quote::is_available))
    }

    fn fetch_history(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PricePoint>, PapertradeError> {
        self.history_requests
            .borrow_mut()
            .push((symbol.to_string(), limit));
        let bars = self.history.get(symbol).cloned().unwrap_or_default();
        let start = bars.len().saturating_sub(limit);
        Ok(bars[start..].to_vec())
    }
}

/// In-memory ledger store that counts writes.
pub struct MemoryStore {
    pub saved: RefCell<Option<LedgerSnapshot>>,
    pub saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            saved: RefCell::new(None),
            saves: Cell::new(0),
        }
    }

    pub fn with_text(text: &str) -> Self {
        let store = Self::new();
        store.saved.replace(Some(LedgerSnapshot::from_text(text)));
        store
    }

    pub fn text(&self) -> Option<String> {
        self.saved.borrow().as_ref().map(|s| s.as_str().to_string())
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, PapertradeError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), PapertradeError> {
        self.saved.replace(Some(snapshot.clone()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn remove(&self) -> Result<(), PapertradeError> {
        self.saved.replace(None);
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily bars starting 2024-01-01, one per close, with flat volume.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: date(2024, 1, 1) + chrono::Days::new(i as u64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        })
        .collect()
}

pub fn full_quote(symbol: &str, price: f64) -> Quote {
    Quote {
        year_high: price * 1.5,
        year_low: price * 0.5,
        pe_ratio: 18.0,
        eps: 2.0,
        ..Quote::new(symbol, price)
    }
}
