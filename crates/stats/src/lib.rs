//! Statistical helper functions for gap analysis and method scoring.
//!
//! Descriptive statistics live at the crate root; least-squares fits are in
//! [`PolyFit`] and reconstruction-error metrics in [`mse`], [`mae`],
//! [`rmse`] and [`r2_score`].

mod fit;
mod linalg;
mod metrics;

pub use fit::{PolyFit, linear_slope};
pub use metrics::{mae, mse, r2_score, rmse};

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Population standard deviation (N denominator, numpy's default `std`).
/// Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / data.len() as f64).sqrt()
}

/// First differences `data[i + 1] - data[i]`. Empty for fewer than 2 elements.
pub fn diff(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Point-index axis `0.0, 1.0, ..., (n - 1) as f64`.
pub fn index_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}
