//! Watchlist parsing and analysis target selection.

use std::collections::{BTreeSet, HashSet};

use super::quote::{canonical_symbol, is_valid_symbol};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WatchlistError {
    #[error("empty symbol in watchlist")]
    EmptySymbol,

    #[error("invalid symbol in watchlist: {0:?}")]
    InvalidSymbol(String),

    #[error("duplicate symbol in watchlist: {0}")]
    DuplicateSymbol(String),
}

/// Parse a comma-separated symbol list into canonical symbols, keeping order.
/// Blank input is an empty watchlist.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, WatchlistError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let symbol = canonical_symbol(token);
        if symbol.is_empty() {
            return Err(WatchlistError::EmptySymbol);
        }
        if !is_valid_symbol(&symbol) {
            return Err(WatchlistError::InvalidSymbol(symbol));
        }
        if !seen.insert(symbol.clone()) {
            return Err(WatchlistError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

/// Union of held, watched and explicitly requested symbols, sorted and
/// de-duplicated. Blank or invalid requests are dropped.
pub fn analysis_targets<'a>(
    held: impl IntoIterator<Item = &'a str>,
    watched: &[String],
    requested: &[String],
) -> Vec<String> {
    let targets: BTreeSet<String> = held
        .into_iter()
        .map(canonical_symbol)
        .chain(watched.iter().map(|s| canonical_symbol(s)))
        .chain(requested.iter().map(|s| canonical_symbol(s)))
        .filter(|s| is_valid_symbol(s))
        .collect();
    targets.into_iter().collect()
}
