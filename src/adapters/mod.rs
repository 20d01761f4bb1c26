//! Concrete adapter implementations for ports.

pub mod csv_market_data;
pub mod file_config_adapter;
pub mod file_ledger_store;
pub mod text_report;
