//! Log-linear interpolation kernel.

use gapfill_series::TimeSeries;

use crate::error::MethodError;
use crate::kernel::DailyFrame;
use crate::method::Method;

/// Offset added to every value when the series has a non-positive observation.
pub const SHIFT: f64 = 1.0;

/// Fills every gap by interpolating `ln(value)` linearly, which gives
/// exponential segments between neighbouring observations.
///
/// When any observation is `<= 0` all values are shifted up by [`SHIFT`]
/// first; the shift is undone afterwards and estimates are clipped at 0.
///
/// # Errors
///
/// Returns [`MethodError::InsufficientData`] if nothing is observed, and
/// [`MethodError::Kernel`] if a shifted value is still not positive.
pub fn interpolate(series: &TimeSeries) -> Result<TimeSeries, MethodError> {
    let frame = DailyFrame::new(series, Method::Log)?;
    let shifted = frame.known_val().iter().any(|&v| v <= 0.0);
    let shift = if shifted { SHIFT } else { 0.0 };

    if let Some(&min) = frame
        .known_val()
        .iter()
        .min_by(|a, b| a.total_cmp(b))
        .filter(|&&v| v + shift <= 0.0)
    {
        return Err(MethodError::Kernel {
            method: Method::Log.to_string(),
            reason: format!("value {min} is not positive after shifting by {shift}"),
        });
    }

    frame.fill(|frame, run| {
        let (left, right) = frame.bracket(run);
        let (l0, l1) = ((left + shift).ln(), (right + shift).ln());
        let x0 = (run.start - 1) as f64;
        let width = (run.end - run.start + 1) as f64;
        Ok(run
            .clone()
            .map(|pos| {
                let v = (l0 + (l1 - l0) * (pos as f64 - x0) / width).exp() - shift;
                if shifted { v.max(0.0) } else { v }
            })
            .collect())
    })
}
