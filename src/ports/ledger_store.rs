//! Ledger persistence port trait.

use crate::domain::error::PapertradeError;
use crate::domain::snapshot::LedgerSnapshot;

pub trait LedgerStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<LedgerSnapshot>, PapertradeError>;
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), PapertradeError>;
    /// Delete the stored ledger. Removing a ledger that was never saved is not an error.
    fn remove(&self) -> Result<(), PapertradeError>;
}
