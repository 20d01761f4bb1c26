//! Report rendering port trait.

use crate::domain::analysis::Analysis;
use crate::domain::ledger::Ledger;

/// Port for turning analysis results and ledger state into printable reports.
pub trait ReportPort {
    fn render_analyses(&self, analyses: &[Analysis]) -> String;
    fn render_portfolio(&self, ledger: &Ledger) -> String;
}
