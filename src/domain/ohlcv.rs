//! Historical price bar representation.

use chrono::NaiveDate;

/// One bar of daily history.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Sort a series into oldest-first order.
///
/// Providers commonly hand history back newest first; every indicator in
/// [`crate::domain::indicator`] expects the most recent bar last.
pub fn sort_oldest_first(points: &mut [PricePoint]) {
    points.sort_by_key(|p| p.date);
}

/// Keep only the `limit` most recent bars of an oldest-first series.
pub fn most_recent(points: &[PricePoint], limit: usize) -> &[PricePoint] {
    let start = points.len().saturating_sub(limit);
    &points[start..]
}

pub fn closes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.close).collect()
}

pub fn volumes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.volume as f64).collect()
}
