//! Configuration validation.
//!
//! Validates all config fields before any command touches the ledger.

use crate::domain::error::PapertradeError;
use crate::domain::watchlist::parse_symbols;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), PapertradeError> {
    validate_initial_balance(config)?;
    validate_account(config)?;
    validate_market_data_dir(config)?;
    validate_industry_pe(config)?;
    validate_history_days(config)?;
    validate_watchlist(config)?;
    Ok(())
}

/// An absent key is fine; a present one must parse as a finite number above 0.
fn validate_positive_number(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), PapertradeError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(());
    };
    let value = config.get_double(section, key, f64::NAN);
    if !value.is_finite() || value <= 0.0 {
        return Err(PapertradeError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{} must be a positive number, got {:?}", key, raw.trim()),
        });
    }
    Ok(())
}

fn validate_initial_balance(config: &dyn ConfigPort) -> Result<(), PapertradeError> {
    validate_positive_number(config, "ledger", "initial_balance")
}

fn validate_account(config: &dyn ConfigPort) -> Result<(), PapertradeError> {
    match config.get_string("ledger", "account") {
        Some(s) if s.trim().is_empty() => Err(PapertradeError::ConfigInvalid {
            section: "ledger".to_string(),
            key: "account".to_string(),
            reason: "account must not be blank".to_string(),
        }),
        Some(s) if s.contains(['/', '\\']) => Err(PapertradeError::ConfigInvalid {
            section: "ledger".to_string(),
            key: "account".to_string(),
            reason: "account must not contain path separators".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_market_data_dir(config: &dyn ConfigPort) -> Result<(), PapertradeError> {
    match config.get_string("market", "data_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PapertradeError::ConfigMissing {
            section: "market".to_string(),
            key: "data_dir".to_string(),
        }),
    }
}

fn validate_industry_pe(config: &dyn ConfigPort) -> Result<(), PapertradeError> {
    validate_positive_number(config, "analysis", "industry_pe")
}

fn validate_history_days(config: &dyn ConfigPort) -> Result<(), PapertradeError> {
    let Some(raw) = config.get_string("analysis", "history_days") else {
        return Ok(());
    };
    if config.get_int("analysis", "history_days", 0) < 1 {
        return Err(PapertradeError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "history_days".to_string(),
            reason: format!(
                "history_days must be a whole number of at least 1, got {:?}",
                raw.trim()
            ),
        });
    }
    Ok(())
}

fn validate_watchlist(config: &dyn ConfigPort) -> Result<(), PapertradeError> {
    if let Some(list) = config.get_string("analysis", "watchlist") {
        parse_symbols(&list)?;
    }
    Ok(())
}
