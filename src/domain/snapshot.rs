//! Ledger snapshot text format.
//!
//! Line 1 holds the cash balance; each following line is
//! `symbol,shares,wacc_price`. Blank lines are ignored.

use std::collections::BTreeMap;

use crate::domain::position::PositionEntry;
use crate::domain::quote::canonical_symbol;

/// Opaque serialized ledger state handed to a [`crate::ports::ledger_store::LedgerStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    text: String,
}

impl LedgerSnapshot {
    pub fn from_text(text: impl Into<String>) -> Self {
        LedgerSnapshot { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot is empty")]
    Empty,

    #[error("invalid cash balance {value:?}")]
    InvalidCash { value: String },

    #[error("line {line}: {reason}")]
    InvalidEntry { line: usize, reason: String },

    #[error("line {line}: duplicate symbol {symbol}")]
    DuplicateSymbol { line: usize, symbol: String },
}

pub(crate) fn encode<'a>(
    cash: f64,
    entries: impl Iterator<Item = &'a PositionEntry>,
) -> LedgerSnapshot {
    let mut text = format!("{}\n", cash);
    for entry in entries {
        text.push_str(&format!(
            "{},{},{}\n",
            entry.symbol, entry.shares, entry.wacc_price
        ));
    }
    LedgerSnapshot { text }
}

/// Parse snapshot text into a cash balance and entries marked at their WACC.
pub(crate) fn decode(
    snapshot: &LedgerSnapshot,
) -> Result<(f64, BTreeMap<String, PositionEntry>), SnapshotError> {
    let mut lines = snapshot
        .text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, cash_line) = lines.next().ok_or(SnapshotError::Empty)?;
    let cash: f64 = cash_line
        .parse()
        .ok()
        .filter(|c: &f64| c.is_finite() && *c >= 0.0)
        .ok_or_else(|| SnapshotError::InvalidCash {
            value: cash_line.to_string(),
        })?;

    let mut entries = BTreeMap::new();
    for (line_no, line) in lines {
        let entry = decode_entry(line_no, line)?;
        if entries.contains_key(&entry.symbol) {
            return Err(SnapshotError::DuplicateSymbol {
                line: line_no,
                symbol: entry.symbol,
            });
        }
        entries.insert(entry.symbol.clone(), entry);
    }

    Ok((cash, entries))
}

fn decode_entry(line_no: usize, line: &str) -> Result<PositionEntry, SnapshotError> {
    let invalid = |reason: &str| SnapshotError::InvalidEntry {
        line: line_no,
        reason: reason.to_string(),
    };

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 3 {
        return Err(invalid("expected symbol,shares,wacc_price"));
    }

    let symbol = canonical_symbol(fields[0]);
    if symbol.is_empty() {
        return Err(invalid("empty symbol"));
    }
    let shares: u64 = fields[1]
        .trim()
        .parse()
        .map_err(|_| invalid("shares is not a whole number"))?;
    if shares == 0 {
        return Err(invalid("shares must be positive"));
    }
    let wacc: f64 = fields[2]
        .trim()
        .parse()
        .map_err(|_| invalid("wacc_price is not a number"))?;
    if !wacc.is_finite() || wacc < 0.0 {
        return Err(invalid("wacc_price must be a non-negative number"));
    }

    Ok(PositionEntry::new(symbol, shares, wacc))
}
