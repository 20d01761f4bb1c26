//! Plain-text file ledger store.

use crate::domain::error::PapertradeError;
use crate::domain::snapshot::LedgerSnapshot;
use crate::ports::ledger_store::LedgerStore;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const DEFAULT_ACCOUNT: &str = "default";

/// Where one account's ledger lives on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerStoreConfig {
    pub data_dir: PathBuf,
    pub account: String,
}

impl Default for LedgerStoreConfig {
    fn default() -> Self {
        LedgerStoreConfig {
            data_dir: PathBuf::from("."),
            account: DEFAULT_ACCOUNT.to_string(),
        }
    }
}

pub struct FileLedgerStore {
    config: LedgerStoreConfig,
}

impl FileLedgerStore {
    pub fn new(config: LedgerStoreConfig) -> Self {
        Self { config }
    }

    /// `{data_dir}/{account}_portfolio.txt`
    pub fn path(&self) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}_portfolio.txt", self.config.account))
    }
}

impl LedgerStore for FileLedgerStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, PapertradeError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loaded ledger");
                Ok(Some(LedgerSnapshot::from_text(text)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no saved ledger");
                Ok(None)
            }
            Err(e) => Err(PapertradeError::Storage {
                reason: format!("failed to read {}: {}", path.display(), e),
            }),
        }
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), PapertradeError> {
        let path = self.path();
        if !self.config.data_dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.config.data_dir).map_err(|e| PapertradeError::Storage {
                reason: format!(
                    "failed to create directory {}: {}",
                    self.config.data_dir.display(),
                    e
                ),
            })?;
        }
        fs::write(&path, snapshot.as_str()).map_err(|e| PapertradeError::Storage {
            reason: format!("failed to write {}: {}", path.display(), e),
        })?;
        tracing::debug!(path = %path.display(), "saved ledger");
        Ok(())
    }

    fn remove(&self) -> Result<(), PapertradeError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "removed ledger");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PapertradeError::Storage {
                reason: format!("failed to remove {}: {}", path.display(), e),
            }),
        }
    }
}
