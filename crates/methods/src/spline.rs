//! Natural cubic spline interpolation kernel.

use gapfill_series::TimeSeries;

use crate::error::MethodError;
use crate::kernel::{DailyFrame, linear_run};
use crate::method::Method;

/// Minimum number of observations for a cubic spline; fewer fall back to linear.
pub const MIN_POINTS: usize = 4;

/// Fills every gap from a natural cubic spline through all observations.
///
/// Series with fewer than [`MIN_POINTS`] observations are filled linearly.
/// Estimates are floored at 0 when every observed value is non-negative.
///
/// # Errors
///
/// Returns [`MethodError::InsufficientData`] if nothing is observed.
pub fn interpolate(series: &TimeSeries) -> Result<TimeSeries, MethodError> {
    let frame = DailyFrame::new(series, Method::Spline)?;
    if frame.known_pos().len() < MIN_POINTS {
        return frame.fill(|frame, run| Ok(linear_run(frame, run)));
    }

    let spline = NaturalCubic::new(frame.known_pos(), frame.known_val());
    let floor = frame.non_negative().then_some(0.0);
    frame.fill(|frame, run| {
        let segment = frame.split_index(run) - 1;
        Ok(run
            .clone()
            .map(|pos| {
                let v = spline.eval(segment, pos as f64);
                floor.map_or(v, |f| v.max(f))
            })
            .collect())
    })
}

/// Natural cubic spline (zero second derivative at both ends).
struct NaturalCubic {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivatives at the knots.
    m: Vec<f64>,
}

impl NaturalCubic {
    /// Builds the spline through strictly increasing knots `x`.
    fn new(x: &[f64], y: &[f64]) -> Self {
        let n = x.len();
        let mut m = vec![0.0; n];
        if n > 2 {
            // Tridiagonal system for m[1..n-1] solved with the Thomas algorithm.
            let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
            let size = n - 2;
            let mut diag = vec![0.0; size];
            let mut rhs = vec![0.0; size];
            for i in 0..size {
                let k = i + 1;
                diag[i] = 2.0 * (h[k - 1] + h[k]);
                rhs[i] = 6.0 * ((y[k + 1] - y[k]) / h[k] - (y[k] - y[k - 1]) / h[k - 1]);
            }
            // Forward sweep: sub-diagonal h[i], super-diagonal h[i + 1].
            for i in 1..size {
                let w = h[i] / diag[i - 1];
                diag[i] -= w * h[i];
                rhs[i] -= w * rhs[i - 1];
            }
            m[size] = rhs[size - 1] / diag[size - 1];
            for i in (0..size - 1).rev() {
                m[i + 1] = (rhs[i] - h[i + 1] * m[i + 2]) / diag[i];
            }
        }
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        }
    }

    /// Evaluates the spline at `t` on the segment `[x[seg], x[seg + 1]]`.
    fn eval(&self, seg: usize, t: f64) -> f64 {
        let (x0, x1) = (self.x[seg], self.x[seg + 1]);
        let (y0, y1) = (self.y[seg], self.y[seg + 1]);
        let (m0, m1) = (self.m[seg], self.m[seg + 1]);
        let h = x1 - x0;
        let a = x1 - t;
        let b = t - x0;
        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}
