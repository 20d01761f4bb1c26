//! Relative volume.
//!
//! Two sources are supported. The quote path divides the quote's volume by
//! the provider-reported average volume. The series path divides the most
//! recent volume of the window by the mean of the window's first 20 volumes.

pub const WINDOW: usize = 20;
pub const NEUTRAL: f64 = 1.0;

/// Series path. Below [`WINDOW`] volumes, or with a zero mean, reads as 1.0.
pub fn relative_volume(volumes: &[f64]) -> f64 {
    if volumes.len() < WINDOW {
        return NEUTRAL;
    }
    let average = volumes[..WINDOW].iter().sum::<f64>() / WINDOW as f64;
    if average == 0.0 {
        return NEUTRAL;
    }
    match volumes.last() {
        Some(&latest) => latest / average,
        None => NEUTRAL,
    }
}

/// Quote path. `None` unless the reported average volume is positive.
pub fn quote_relative_volume(volume: f64, avg_volume: f64) -> Option<f64> {
    (avg_volume > 0.0).then(|| volume / avg_volume)
}
