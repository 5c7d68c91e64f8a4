//! Least-squares polynomial fits (degree 0 to 2).

use crate::linalg::solve;

/// Highest polynomial degree supported by [`PolyFit`].
pub const MAX_DEGREE: usize = 2;

/// A fitted least-squares polynomial.
///
/// The fit is computed on a centred and scaled copy of `x` to keep the
/// normal equations well conditioned; [`predict`](Self::predict) applies the
/// same transform, so callers work in the original units.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyFit {
    /// Coefficients in ascending order of power, in scaled units.
    coeffs: Vec<f64>,
    x_center: f64,
    x_scale: f64,
}

impl PolyFit {
    /// Fits a polynomial of `degree` to the points `(x[i], y[i])`.
    ///
    /// Returns `None` if the slices differ in length, hold fewer than
    /// `degree + 1` points, `degree > 2`, or the system is singular
    /// (for instance all `x` equal with `degree >= 1`).
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Option<Self> {
        if x.len() != y.len() || x.len() < degree + 1 || degree > MAX_DEGREE {
            return None;
        }

        let n = x.len() as f64;
        let x_center = x.iter().sum::<f64>() / n;
        let spread = x
            .iter()
            .map(|&xi| (xi - x_center).abs())
            .fold(0.0_f64, f64::max);
        let x_scale = if spread > 0.0 { spread } else { 1.0 };

        // Power sums S_k = sum(t^k) for k in 0..=2*degree and T_k = sum(y * t^k).
        let mut s = [0.0_f64; 2 * MAX_DEGREE + 1];
        let mut t = [0.0_f64; MAX_DEGREE + 1];
        for (&xi, &yi) in x.iter().zip(y) {
            let ti = (xi - x_center) / x_scale;
            let mut p = 1.0;
            for (k, sk) in s.iter_mut().enumerate().take(2 * degree + 1) {
                *sk += p;
                if k <= degree {
                    t[k] += yi * p;
                }
                p *= ti;
            }
        }

        let coeffs = match degree {
            0 => solve([[s[0]]], [t[0]])?.to_vec(),
            1 => solve([[s[0], s[1]], [s[1], s[2]]], [t[0], t[1]])?.to_vec(),
            _ => solve(
                [[s[0], s[1], s[2]], [s[1], s[2], s[3]], [s[2], s[3], s[4]]],
                [t[0], t[1], t[2]],
            )?
            .to_vec(),
        };

        Some(Self {
            coeffs,
            x_center,
            x_scale,
        })
    }

    /// Evaluates the fitted polynomial at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        let t = (x - self.x_center) / self.x_scale;
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    /// Evaluates the fitted polynomial at every element of `x`.
    pub fn predict_all(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.predict(xi)).collect()
    }

    /// First derivative `dy/dx` at `x`, in original units.
    pub fn slope_at(&self, x: f64) -> f64 {
        let t = (x - self.x_center) / self.x_scale;
        let dt: f64 = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &c)| k as f64 * c * t.powi(k as i32 - 1))
            .sum();
        dt / self.x_scale
    }
}

/// Slope of the degree-1 least-squares line through `(x[i], y[i])`.
///
/// Returns `None` with fewer than 2 points or when all `x` are equal.
pub fn linear_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    PolyFit::fit(x, y, 1).map(|f| f.slope_at(0.0))
}
