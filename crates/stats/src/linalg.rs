//! Dense solver for the small normal-equation systems behind [`crate::PolyFit`].
//!
//! Systems are at most 3 x 3 in practice (quadratic fits), so a plain
//! Gaussian elimination with partial pivoting on a stack array is enough.

/// Pivot magnitude below which the system is treated as singular.
const SINGULAR_TOL: f64 = 1e-12;

/// Solves `a * x = b` for an `N x N` system stored row-major.
///
/// Returns `None` if the matrix is singular or the solution is not finite.
pub(crate) fn solve<const N: usize>(mut a: [[f64; N]; N], mut b: [f64; N]) -> Option<[f64; N]> {
    for col in 0..N {
        let pivot_row = (col..N).max_by(|&i, &j| {
            a[i][col]
                .abs()
                .partial_cmp(&a[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot_row][col].abs() < SINGULAR_TOL {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..N {
            let factor = a[row][col] / a[col][col];
            for k in col..N {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; N];
    for row in (0..N).rev() {
        let tail: f64 = ((row + 1)..N).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }

    x.iter().all(|v| v.is_finite()).then_some(x)
}
