//! Hold-out cross-validation of interpolation methods.

use chrono::NaiveDate;
use gapfill_methods::MethodRegistry;
use gapfill_series::TimeSeries;
use gapfill_stats::{mae, mse, r2_score, rmse};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::CvConfig;
use crate::error::SelectError;

/// Minimum observed points: one interior point to hide plus both ends.
pub const MIN_POINTS: usize = 3;

/// Reconstruction error of one method on the held-out points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CvMetrics {
    pub mse: f64,
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
    /// Number of held-out points with a finite prediction.
    pub valid_points: usize,
}

impl CvMetrics {
    /// Scores `predicted` against `truth`, skipping non-finite pairs.
    ///
    /// Fewer than 2 valid pairs yield the [`unusable`](Self::unusable) sentinel.
    pub fn compute(truth: &[f64], predicted: &[f64]) -> Self {
        let (t, p): (Vec<f64>, Vec<f64>) = truth
            .iter()
            .zip(predicted)
            .filter(|(t, p)| t.is_finite() && p.is_finite())
            .map(|(&t, &p)| (t, p))
            .unzip();
        if t.len() < 2 {
            return Self::unusable(t.len());
        }
        Self {
            mse: mse(&t, &p),
            mae: mae(&t, &p),
            rmse: rmse(&t, &p),
            r2: r2_score(&t, &p),
            valid_points: t.len(),
        }
    }

    /// Sentinel for a method that could not be scored: infinite errors and
    /// `r2 = -inf`.
    pub fn unusable(valid_points: usize) -> Self {
        Self {
            mse: f64::INFINITY,
            mae: f64::INFINITY,
            rmse: f64::INFINITY,
            r2: f64::NEG_INFINITY,
            valid_points,
        }
    }

    /// Returns `true` if the errors are finite.
    pub fn is_usable(&self) -> bool {
        self.mse.is_finite()
    }

    /// Ranking key: lower is better.
    pub fn score(&self) -> f64 {
        self.mse - self.r2
    }
}

/// Outcome of one method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodScore {
    pub method: String,
    pub metrics: CvMetrics,
    /// Number of held-out points.
    pub test_points: usize,
    /// Why the kernel failed, if it did.
    pub failure: Option<String>,
}

/// Results of one cross-validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvReport {
    seed: u64,
    test_ratio: f64,
    held_out: Vec<NaiveDate>,
    scores: Vec<MethodScore>,
}

impl CvReport {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn test_ratio(&self) -> f64 {
        self.test_ratio
    }

    /// Dates of the hidden points, in order.
    pub fn held_out(&self) -> &[NaiveDate] {
        &self.held_out
    }

    /// One score per registered method, in registry order.
    pub fn scores(&self) -> &[MethodScore] {
        &self.scores
    }

    /// Score of the named method.
    pub fn score(&self, method: &str) -> Option<&MethodScore> {
        self.scores.iter().find(|s| s.method == method)
    }

    /// The usable method with the lowest `mse - r2`; ties go to registry order.
    pub fn best(&self) -> Option<&MethodScore> {
        self.scores
            .iter()
            .filter(|s| s.metrics.is_usable())
            .min_by(|a, b| a.metrics.score().total_cmp(&b.metrics.score()))
    }
}

/// Hides a seeded sample of interior observed points, fills the gapped
/// series with every registered method and scores each against the hidden
/// values.
///
/// `max(1, floor(test_ratio * interior))` points are hidden, never the first
/// or last observation. A failing method is recorded with
/// [`CvMetrics::unusable`] and its error and does not affect the others.
///
/// # Errors
///
/// Returns [`SelectError::InvalidTestRatio`] for an invalid config,
/// [`SelectError::EmptyRegistry`] if nothing is registered and
/// [`SelectError::InsufficientData`] with fewer than [`MIN_POINTS`]
/// observed points.
#[tracing::instrument(skip_all, fields(n_present = series.n_present(), seed = config.seed()))]
pub fn cross_validate(
    series: &TimeSeries,
    registry: &MethodRegistry,
    config: &CvConfig,
) -> Result<CvReport, SelectError> {
    config.validate()?;
    if registry.is_empty() {
        return Err(SelectError::EmptyRegistry);
    }
    let n_present = series.n_present();
    if n_present < MIN_POINTS {
        return Err(SelectError::InsufficientData {
            needed: MIN_POINTS,
            got: n_present,
        });
    }

    let interior = n_present - 2;
    let n_test = ((interior as f64 * config.test_ratio()) as usize).clamp(1, interior);
    let mut rng = StdRng::seed_from_u64(config.seed());
    let mut hidden: Vec<usize> = index::sample(&mut rng, interior, n_test)
        .into_iter()
        .map(|i| i + 1)
        .collect();
    hidden.sort_unstable();

    let points: Vec<(NaiveDate, f64)> = series.present().collect();
    let (held_out, truth): (Vec<NaiveDate>, Vec<f64>) = hidden.iter().map(|&i| points[i]).unzip();
    let gapped = series.with_hidden(&hidden)?;
    debug!(n_test, "held out points");

    let scores = registry
        .names()
        .into_par_iter()
        .map(|name| match registry.dispatch(name, &gapped) {
            Ok(filled) => {
                let predicted: Vec<f64> = held_out
                    .iter()
                    .map(|&date| {
                        filled
                            .nearest(date)
                            .and_then(|o| o.value())
                            .unwrap_or(f64::NAN)
                    })
                    .collect();
                let metrics = CvMetrics::compute(&truth, &predicted);
                debug!(
                    method = name,
                    mse = metrics.mse,
                    mae = metrics.mae,
                    r2 = metrics.r2,
                    "scored method"
                );
                MethodScore {
                    method: name.to_string(),
                    metrics,
                    test_points: n_test,
                    failure: None,
                }
            }
            Err(e) => {
                warn!(method = name, error = %e, "method failed during cross-validation");
                MethodScore {
                    method: name.to_string(),
                    metrics: CvMetrics::unusable(0),
                    test_points: n_test,
                    failure: Some(e.to_string()),
                }
            }
        })
        .collect();

    Ok(CvReport {
        seed: config.seed(),
        test_ratio: config.test_ratio(),
        held_out,
        scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gapfill_methods::MethodError;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn line(n: u32) -> TimeSeries {
        TimeSeries::from_present((1..=n).map(|day| (d(day), 3.0 * day as f64)).collect()).unwrap()
    }

    #[test]
    fn metrics_basic() {
        let m = CvMetrics::compute(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]);
        assert_relative_eq!(m.mse, 4.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(m.mae, 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(m.rmse, (4.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.r2, -1.0, epsilon = 1e-12);
        assert_eq!(m.valid_points, 3);
    }

    #[test]
    fn metrics_skip_non_finite_pairs() {
        let m = CvMetrics::compute(&[1.0, 2.0, 3.0], &[1.0, f64::NAN, 3.0]);
        assert_eq!(m.valid_points, 2);
        assert_eq!(m.mse, 0.0);
    }

    #[test]
    fn metrics_sentinel_below_two_points() {
        let m = CvMetrics::compute(&[1.0], &[1.0]);
        assert_eq!(m, CvMetrics::unusable(1));
        assert!(!m.is_usable());
        assert_eq!(m.r2, f64::NEG_INFINITY);
    }

    #[test]
    fn linear_is_exact_on_a_line() {
        let report =
            cross_validate(&line(30), &MethodRegistry::with_defaults(), &CvConfig::default())
                .unwrap();
        assert_eq!(report.held_out().len(), 5);
        let linear = report.score("linear").unwrap();
        assert_relative_eq!(linear.metrics.mse, 0.0, epsilon = 1e-9);
        assert_eq!(report.scores().len(), 4);
    }

    #[test]
    fn held_out_excludes_ends() {
        for seed in 0..20 {
            let report = cross_validate(
                &line(12),
                &MethodRegistry::with_defaults(),
                &CvConfig::new().with_seed(seed).with_test_ratio(0.5),
            )
            .unwrap();
            assert_eq!(report.held_out().len(), 5);
            assert!(report.held_out().iter().all(|&h| h != d(1) && h != d(12)));
            assert!(report.held_out().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn failing_method_is_isolated() {
        let mut registry = MethodRegistry::with_defaults();
        registry
            .register(
                "broken",
                |_: &TimeSeries| -> Result<TimeSeries, MethodError> {
                    Err(MethodError::Kernel {
                        method: "broken".to_string(),
                        reason: "always fails".to_string(),
                    })
                },
            )
            .unwrap();
        let report = cross_validate(&line(20), &registry, &CvConfig::default()).unwrap();
        let broken = report.score("broken").unwrap();
        assert!(!broken.metrics.is_usable());
        assert_eq!(broken.failure.as_deref(), Some("broken: always fails"));
        assert!(report.score("linear").unwrap().failure.is_none());
        let best = report.best().unwrap();
        assert_ne!(best.method, "broken");
        assert!(best.metrics.mse < 1e-9);
    }

    #[test]
    fn too_few_points() {
        let err = cross_validate(&line(2), &MethodRegistry::with_defaults(), &CvConfig::default())
            .unwrap_err();
        assert_eq!(err, SelectError::InsufficientData { needed: 3, got: 2 });
    }

    #[test]
    fn empty_registry() {
        let err = cross_validate(&line(10), &MethodRegistry::new(), &CvConfig::default())
            .unwrap_err();
        assert_eq!(err, SelectError::EmptyRegistry);
    }

    #[test]
    fn best_prefers_registry_order_on_ties() {
        let score = |method: &str| MethodScore {
            method: method.to_string(),
            metrics: CvMetrics::compute(&[1.0, 2.0], &[1.0, 2.0]),
            test_points: 2,
            failure: None,
        };
        let report = CvReport {
            seed: 0,
            test_ratio: 0.2,
            held_out: vec![d(2), d(3)],
            scores: vec![score("b"), score("a")],
        };
        assert_eq!(report.best().unwrap().method, "b");
    }
}
