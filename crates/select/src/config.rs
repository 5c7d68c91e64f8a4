//! Configuration for cross-validation and auto-selection.

use crate::error::SelectError;

/// Cross-validation parameters.
///
/// # Example
///
/// ```
/// use gapfill_select::CvConfig;
///
/// let config = CvConfig::new().with_test_ratio(0.3).with_seed(7);
/// assert_eq!(config.seed(), 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CvConfig {
    /// Fraction of interior observed points hidden for testing.
    test_ratio: f64,
    /// Seed of the held-out sample.
    seed: u64,
}

impl CvConfig {
    /// Creates a configuration with `test_ratio = 0.2` and `seed = 42`.
    pub fn new() -> Self {
        Self {
            test_ratio: 0.2,
            seed: 42,
        }
    }

    pub fn with_test_ratio(mut self, test_ratio: f64) -> Self {
        self.test_ratio = test_ratio;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn test_ratio(&self) -> f64 {
        self.test_ratio
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates this configuration.
    ///
    /// Returns an error unless `0 < test_ratio < 1`.
    pub fn validate(&self) -> Result<(), SelectError> {
        let in_range = self.test_ratio > 0.0 && self.test_ratio < 1.0;
        if !in_range {
            return Err(SelectError::InvalidTestRatio {
                test_ratio: self.test_ratio,
            });
        }
        Ok(())
    }
}

impl Default for CvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Auto-selection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoSelectConfig {
    /// Run cross-validation at all.
    use_cv: bool,
    /// Weight of the cross-validation result against the characterization.
    cv_weight: f64,
    cv: CvConfig,
}

impl AutoSelectConfig {
    /// Creates a configuration with `use_cv = true`, `cv_weight = 0.7` and
    /// the default [`CvConfig`].
    pub fn new() -> Self {
        Self {
            use_cv: true,
            cv_weight: 0.7,
            cv: CvConfig::new(),
        }
    }

    pub fn with_use_cv(mut self, use_cv: bool) -> Self {
        self.use_cv = use_cv;
        self
    }

    pub fn with_cv_weight(mut self, cv_weight: f64) -> Self {
        self.cv_weight = cv_weight;
        self
    }

    pub fn with_cv(mut self, cv: CvConfig) -> Self {
        self.cv = cv;
        self
    }

    pub fn use_cv(&self) -> bool {
        self.use_cv
    }

    pub fn cv_weight(&self) -> f64 {
        self.cv_weight
    }

    pub fn cv(&self) -> &CvConfig {
        &self.cv
    }

    /// Validates this configuration, including the nested [`CvConfig`].
    pub fn validate(&self) -> Result<(), SelectError> {
        if !(0.0..=1.0).contains(&self.cv_weight) {
            return Err(SelectError::InvalidCvWeight {
                cv_weight: self.cv_weight,
            });
        }
        self.cv.validate()
    }
}

impl Default for AutoSelectConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_defaults() {
        let cfg = CvConfig::default();
        assert_eq!(cfg.test_ratio(), 0.2);
        assert_eq!(cfg.seed(), 42);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn cv_ratio_bounds() {
        for ratio in [0.0, 1.0, -0.2, 1.2, f64::NAN] {
            let err = CvConfig::new().with_test_ratio(ratio).validate();
            assert!(
                matches!(err, Err(SelectError::InvalidTestRatio { .. })),
                "{ratio}"
            );
        }
        assert!(CvConfig::new().with_test_ratio(0.99).validate().is_ok());
    }

    #[test]
    fn auto_defaults() {
        let cfg = AutoSelectConfig::default();
        assert!(cfg.use_cv());
        assert_eq!(cfg.cv_weight(), 0.7);
        assert_eq!(cfg.cv(), &CvConfig::default());
    }

    #[test]
    fn auto_weight_bounds() {
        assert!(AutoSelectConfig::new().with_cv_weight(0.0).validate().is_ok());
        assert!(AutoSelectConfig::new().with_cv_weight(1.0).validate().is_ok());
        assert_eq!(
            AutoSelectConfig::new().with_cv_weight(1.5).validate(),
            Err(SelectError::InvalidCvWeight { cv_weight: 1.5 })
        );
        assert!(
            AutoSelectConfig::new()
                .with_cv_weight(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn auto_validates_nested_cv() {
        let cfg = AutoSelectConfig::new().with_cv(CvConfig::new().with_test_ratio(2.0));
        assert!(matches!(
            cfg.validate(),
            Err(SelectError::InvalidTestRatio { .. })
        ));
    }
}
