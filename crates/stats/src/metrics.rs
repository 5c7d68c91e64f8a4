//! Reconstruction-error metrics over paired true/predicted values.
//!
//! All functions expect slices of equal length; extra elements in the longer
//! slice are ignored. Empty input yields NaN for the error means.

/// Mean squared error.
pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    let ss: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    ss / n as f64
}

/// Mean absolute error.
pub fn mae(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    let sa: f64 = y_true.iter().zip(y_pred).map(|(t, p)| (t - p).abs()).sum();
    sa / n as f64
}

/// Root mean squared error.
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    mse(y_true, y_pred).sqrt()
}

/// Coefficient of determination `1 - SS_res / SS_tot`.
///
/// Returns 0.0 (not NaN) when the true values have zero total variance.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    let y_true = &y_true[..n];
    let mean = crate::mean(y_true);
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean) * (t - mean)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    1.0 - ss_res / ss_tot
}
