//! Automatic whole-series method selection.
//!
//! ```text
//! auto_select_method()
//!   ├─ characterize()            heuristic recommendation
//!   ├─ cross_validate()          skipped if disabled, < 10 observed points or no methods
//!   └─ reconcile                 agree → high, otherwise weighted → medium
//! ```

use gapfill_methods::MethodRegistry;
use gapfill_series::TimeSeries;
use serde::Serialize;
use tracing::{debug, info};

use crate::characterize::{SeriesCharacteristics, characterize};
use crate::config::AutoSelectConfig;
use crate::cv::{CvReport, cross_validate};
use crate::error::SelectError;

/// Fewer observed points than this skip cross-validation.
pub const MIN_CV_POINTS: usize = 10;

/// Weight of the MSE penalty in the reconciliation score.
const MSE_PENALTY: f64 = 0.01;

/// How much the evidence backs a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// The method recommended for a whole series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoSelection {
    /// Registry name of the recommended method.
    pub method: String,
    pub confidence: Confidence,
    pub rationale: String,
    pub characteristics: SeriesCharacteristics,
    /// Present when cross-validation ran.
    pub cross_validation: Option<CvReport>,
}

/// Recommends one interpolation method for `series`.
///
/// The characterization recommendation is used as is, with `medium`
/// confidence, when cross-validation is disabled or the series has fewer
/// than [`MIN_CV_POINTS`] observed points. Otherwise the cross-validation
/// winner (lowest `mse - r2`) is reconciled with it: agreement gives `high`
/// confidence; disagreement is settled by weighing
/// `cv_weight * (r2 - 0.01 * mse)` against `(1 - cv_weight) * char_score`,
/// where `char_score` is 1 if the characterization method was scored and
/// 0.5 otherwise, with `medium` confidence. A weight of 1 always follows
/// cross-validation. If the registry is empty or no method could be scored
/// the characterization wins with `low` confidence.
///
/// # Errors
///
/// Returns [`SelectError`] for an invalid config.
#[tracing::instrument(skip_all, fields(n_present = series.n_present()))]
pub fn auto_select_method(
    series: &TimeSeries,
    registry: &MethodRegistry,
    config: &AutoSelectConfig,
) -> Result<AutoSelection, SelectError> {
    config.validate()?;

    let characteristics = characterize(series);
    let char_method = characteristics.recommendation.as_str();
    debug!(
        method = char_method,
        reason = %characteristics.reason,
        "characterized series"
    );

    if !config.use_cv() || series.n_present() < MIN_CV_POINTS {
        return Ok(AutoSelection {
            method: char_method.to_string(),
            confidence: Confidence::Medium,
            rationale: format!("based on series characteristics: {}", characteristics.reason),
            characteristics,
            cross_validation: None,
        });
    }

    if registry.is_empty() {
        info!("no methods registered, falling back to characterization");
        return Ok(AutoSelection {
            method: char_method.to_string(),
            confidence: Confidence::Low,
            rationale: format!(
                "no interpolation methods are registered; using series characteristics: {}",
                characteristics.reason
            ),
            characteristics,
            cross_validation: None,
        });
    }

    let cv = cross_validate(series, registry, config.cv())?;
    let Some(best) = cv.best() else {
        info!("no method could be scored, falling back to characterization");
        return Ok(AutoSelection {
            method: char_method.to_string(),
            confidence: Confidence::Low,
            rationale: format!(
                "cross-validation produced no usable result; using series characteristics: {}",
                characteristics.reason
            ),
            characteristics,
            cross_validation: Some(cv),
        });
    };
    let cv_method = best.method.clone();
    debug!(method = %cv_method, "cross-validation winner");

    let (method, confidence, rationale) = if cv_method == char_method {
        (
            cv_method.clone(),
            Confidence::High,
            format!("cross-validation and series characteristics agree on {cv_method}"),
        )
    } else {
        let cv_score = best.metrics.r2 - best.metrics.mse * MSE_PENALTY;
        let char_scored = cv.score(char_method).is_some_and(|s| s.metrics.is_usable());
        let char_score = if char_scored { 1.0 } else { 0.5 };
        let weight = config.cv_weight();
        if weight >= 1.0 || weight * cv_score > (1.0 - weight) * char_score {
            (
                cv_method.clone(),
                Confidence::Medium,
                format!(
                    "cross-validation chose {cv_method}; series characteristics suggested {char_method}"
                ),
            )
        } else {
            (
                char_method.to_string(),
                Confidence::Medium,
                format!(
                    "series characteristics chose {char_method}; cross-validation suggested {cv_method}"
                ),
            )
        }
    };

    info!(%method, ?confidence, "selected method");
    Ok(AutoSelection {
        method,
        confidence,
        rationale,
        characteristics,
        cross_validation: Some(cv),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gapfill_methods::{Method, MethodError};

    fn series(values: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        TimeSeries::from_daily(start, values.iter().map(|&v| Some(v)).collect()).unwrap()
    }

    /// A registry whose only method copies its input, leaving hidden points missing.
    fn unscorable_registry() -> MethodRegistry {
        let mut registry = MethodRegistry::new();
        registry
            .register("noop", |s: &TimeSeries| -> Result<TimeSeries, MethodError> {
                Ok(s.clone())
            })
            .unwrap();
        registry
    }

    #[test]
    fn two_points_skip_cv() {
        let sel = auto_select_method(
            &series(&[1.0, 2.0]),
            &MethodRegistry::with_defaults(),
            &AutoSelectConfig::default(),
        )
        .unwrap();
        assert_eq!(sel.method, "linear");
        assert_eq!(sel.confidence, Confidence::Medium);
        assert!(sel.rationale.contains("insufficient data"));
        assert!(sel.cross_validation.is_none());
    }

    #[test]
    fn disabled_cv_uses_characterization() {
        let values: Vec<f64> = (0..30).map(|i| 2.0 * 1.15_f64.powi(i)).collect();
        let sel = auto_select_method(
            &series(&values),
            &MethodRegistry::with_defaults(),
            &AutoSelectConfig::new().with_use_cv(false),
        )
        .unwrap();
        assert_eq!(sel.method, "log");
        assert_eq!(sel.confidence, Confidence::Medium);
        assert!(sel.cross_validation.is_none());
    }

    #[test]
    fn agreement_gives_high_confidence() {
        // Exponential data: characterization says log, and log interpolation
        // reconstructs hidden points exactly.
        let values: Vec<f64> = (0..40).map(|i| 5.0 * 1.1_f64.powi(i)).collect();
        let sel = auto_select_method(
            &series(&values),
            &MethodRegistry::with_defaults(),
            &AutoSelectConfig::default(),
        )
        .unwrap();
        assert_eq!(sel.characteristics.recommendation, Method::Log);
        assert_eq!(sel.method, "log");
        assert_eq!(sel.confidence, Confidence::High);
        assert!(sel.cross_validation.is_some());
    }

    #[test]
    fn no_usable_score_gives_low_confidence() {
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let sel = auto_select_method(
            &series(&values),
            &unscorable_registry(),
            &AutoSelectConfig::default(),
        )
        .unwrap();
        assert_eq!(sel.confidence, Confidence::Low);
        assert_eq!(sel.method, sel.characteristics.recommendation.as_str());
    }

    #[test]
    fn empty_registry_gives_low_confidence() {
        let values: Vec<f64> = (0..20).map(|i| 3.0 + i as f64 * 0.5).collect();
        let sel = auto_select_method(
            &series(&values),
            &MethodRegistry::new(),
            &AutoSelectConfig::default(),
        )
        .unwrap();
        assert_eq!(sel.confidence, Confidence::Low);
        assert_eq!(sel.method, sel.characteristics.recommendation.as_str());
        assert!(sel.rationale.contains("no interpolation methods"));
        assert!(sel.cross_validation.is_none());
    }

    #[test]
    fn full_cv_weight_follows_cv() {
        // Only "shifted" is registered, so cross-validation cannot agree with
        // the characterization and its score is negative.
        let mut registry = MethodRegistry::new();
        registry
            .register("shifted", |s: &TimeSeries| -> Result<TimeSeries, MethodError> {
                let filled = gapfill_methods::linear::interpolate(s)?;
                let start = filled.first_date().unwrap_or_default();
                let values = filled
                    .observations()
                    .iter()
                    .map(|o| o.value().map(|v| v + 100.0))
                    .collect();
                Ok(TimeSeries::from_daily(start, values)?)
            })
            .unwrap();
        let values: Vec<f64> = (0..30).map(|i| (i as f64 * 0.4).sin() + 3.0).collect();

        let followed = auto_select_method(
            &series(&values),
            &registry,
            &AutoSelectConfig::new().with_cv_weight(1.0),
        )
        .unwrap();
        assert_eq!(followed.method, "shifted");
        assert_eq!(followed.confidence, Confidence::Medium);

        let ignored = auto_select_method(
            &series(&values),
            &registry,
            &AutoSelectConfig::new().with_cv_weight(0.0),
        )
        .unwrap();
        assert_eq!(ignored.method, ignored.characteristics.recommendation.as_str());
    }

    #[test]
    fn same_seed_same_result() {
        let values: Vec<f64> = (0..50).map(|i| (i as f64 * 0.3).cos() * 4.0 + 10.0).collect();
        let registry = MethodRegistry::with_defaults();
        let config = AutoSelectConfig::default();
        let a = auto_select_method(&series(&values), &registry, &config).unwrap();
        let b = auto_select_method(&series(&values), &registry, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_weight_rejected() {
        let err = auto_select_method(
            &series(&[1.0, 2.0, 3.0]),
            &MethodRegistry::with_defaults(),
            &AutoSelectConfig::new().with_cv_weight(-0.5),
        )
        .unwrap_err();
        assert_eq!(err, SelectError::InvalidCvWeight { cv_weight: -0.5 });
    }

    #[test]
    fn confidence_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Confidence::High).unwrap(),
            "\"high\""
        );
    }
}
