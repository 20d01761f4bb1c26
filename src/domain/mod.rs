//! Core domain types and logic: the portfolio ledger and the signal engine.

pub mod analysis;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod ledger;
pub mod ohlcv;
pub mod position;
pub mod quote;
pub mod scoring;
pub mod snapshot;
pub mod watchlist;
