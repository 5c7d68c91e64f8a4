//! Thresholds for context analysis and rule-based selection.

use crate::error::GapError;

/// Parameters of the local-context analysis around a gap.
///
/// # Example
///
/// ```
/// use gapfill_gaps::ContextConfig;
///
/// let config = ContextConfig::new().with_window_size(7);
/// assert_eq!(config.window_size(), 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConfig {
    /// Maximum number of observed points taken on each side of a gap.
    window_size: usize,
    /// Both windows must have volatility below this to count as stable.
    stable_volatility: f64,
    /// Trend consistency must be below this to count as stable.
    stable_trend_delta: f64,
    /// Fraction of the span at either end that counts as the edge.
    edge_fraction: f64,
}

impl ContextConfig {
    /// Creates the default configuration.
    ///
    /// Defaults: `window_size = 5`, `stable_volatility = 10`,
    /// `stable_trend_delta = 5`, `edge_fraction = 0.1`.
    pub fn new() -> Self {
        Self {
            window_size: 5,
            stable_volatility: 10.0,
            stable_trend_delta: 5.0,
            edge_fraction: 0.1,
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_stable_volatility(mut self, stable_volatility: f64) -> Self {
        self.stable_volatility = stable_volatility;
        self
    }

    pub fn with_stable_trend_delta(mut self, stable_trend_delta: f64) -> Self {
        self.stable_trend_delta = stable_trend_delta;
        self
    }

    pub fn with_edge_fraction(mut self, edge_fraction: f64) -> Self {
        self.edge_fraction = edge_fraction;
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn stable_volatility(&self) -> f64 {
        self.stable_volatility
    }

    pub fn stable_trend_delta(&self) -> f64 {
        self.stable_trend_delta
    }

    pub fn edge_fraction(&self) -> f64 {
        self.edge_fraction
    }

    /// Validates this configuration.
    ///
    /// Requires `window_size >= 1`, positive finite stability thresholds and
    /// `edge_fraction` in `[0, 0.5]`.
    pub fn validate(&self) -> Result<(), GapError> {
        if self.window_size == 0 {
            return Err(GapError::InvalidWindowSize {
                window_size: self.window_size,
            });
        }
        positive("stable_volatility", self.stable_volatility)?;
        positive("stable_trend_delta", self.stable_trend_delta)?;
        if !(0.0..=0.5).contains(&self.edge_fraction) {
            return Err(GapError::InvalidThreshold {
                name: "edge_fraction",
                value: self.edge_fraction,
            });
        }
        Ok(())
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Thresholds of the gap-size decision table.
///
/// Gaps of `1..=short_gap_max` days are short, up to `medium_gap_max` are
/// medium, anything longer is long.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleThresholds {
    short_gap_max: usize,
    medium_gap_max: usize,
    trend_consistency: f64,
    level_jump: f64,
    strong_trend: f64,
}

impl RuleThresholds {
    /// Creates the default thresholds: short gaps up to 3 days, medium up to
    /// 7, trend consistency 5, level jump 20, strong trend 5.
    pub fn new() -> Self {
        Self {
            short_gap_max: 3,
            medium_gap_max: 7,
            trend_consistency: 5.0,
            level_jump: 20.0,
            strong_trend: 5.0,
        }
    }

    pub fn with_short_gap_max(mut self, days: usize) -> Self {
        self.short_gap_max = days;
        self
    }

    pub fn with_medium_gap_max(mut self, days: usize) -> Self {
        self.medium_gap_max = days;
        self
    }

    pub fn with_trend_consistency(mut self, threshold: f64) -> Self {
        self.trend_consistency = threshold;
        self
    }

    pub fn with_level_jump(mut self, threshold: f64) -> Self {
        self.level_jump = threshold;
        self
    }

    pub fn with_strong_trend(mut self, threshold: f64) -> Self {
        self.strong_trend = threshold;
        self
    }

    /// Longest gap, in days, treated as short.
    pub fn short_gap_max(&self) -> usize {
        self.short_gap_max
    }

    /// Longest gap, in days, treated as medium.
    pub fn medium_gap_max(&self) -> usize {
        self.medium_gap_max
    }

    /// Medium gaps need trend consistency below this to stay linear.
    pub fn trend_consistency(&self) -> f64 {
        self.trend_consistency
    }

    /// Medium gaps with a level jump below this use a polynomial.
    pub fn level_jump(&self) -> f64 {
        self.level_jump
    }

    /// Long gaps with an absolute neighbouring trend above this use a polynomial.
    pub fn strong_trend(&self) -> f64 {
        self.strong_trend
    }

    /// Validates these thresholds.
    ///
    /// Requires `1 <= short_gap_max <= medium_gap_max` and positive finite
    /// numeric thresholds.
    pub fn validate(&self) -> Result<(), GapError> {
        if self.short_gap_max == 0 {
            return Err(GapError::InvalidThreshold {
                name: "short_gap_max",
                value: 0.0,
            });
        }
        if self.medium_gap_max < self.short_gap_max {
            return Err(GapError::InvalidThreshold {
                name: "medium_gap_max",
                value: self.medium_gap_max as f64,
            });
        }
        positive("trend_consistency", self.trend_consistency)?;
        positive("level_jump", self.level_jump)?;
        positive("strong_trend", self.strong_trend)
    }
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self::new()
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), GapError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GapError::InvalidThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_defaults() {
        let cfg = ContextConfig::default();
        assert_eq!(cfg.window_size(), 5);
        assert_eq!(cfg.stable_volatility(), 10.0);
        assert_eq!(cfg.stable_trend_delta(), 5.0);
        assert_eq!(cfg.edge_fraction(), 0.1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn context_zero_window() {
        let err = ContextConfig::new().with_window_size(0).validate().unwrap_err();
        assert_eq!(err, GapError::InvalidWindowSize { window_size: 0 });
    }

    #[test]
    fn context_bad_thresholds() {
        assert!(
            ContextConfig::new()
                .with_stable_volatility(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            ContextConfig::new()
                .with_stable_trend_delta(-1.0)
                .validate()
                .is_err()
        );
        assert!(ContextConfig::new().with_edge_fraction(0.6).validate().is_err());
        assert!(ContextConfig::new().with_edge_fraction(0.0).validate().is_ok());
    }

    #[test]
    fn rule_defaults() {
        let t = RuleThresholds::default();
        assert_eq!(t.short_gap_max(), 3);
        assert_eq!(t.medium_gap_max(), 7);
        assert_eq!(t.trend_consistency(), 5.0);
        assert_eq!(t.level_jump(), 20.0);
        assert_eq!(t.strong_trend(), 5.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn rule_builder_chaining() {
        let t = RuleThresholds::new()
            .with_short_gap_max(2)
            .with_medium_gap_max(10)
            .with_level_jump(3.0);
        assert_eq!(t.short_gap_max(), 2);
        assert_eq!(t.medium_gap_max(), 10);
        assert_eq!(t.level_jump(), 3.0);
    }

    #[test]
    fn rule_inverted_sizes() {
        let err = RuleThresholds::new()
            .with_short_gap_max(8)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            GapError::InvalidThreshold {
                name: "medium_gap_max",
                ..
            }
        ));
    }

    #[test]
    fn rule_zero_short_gap() {
        assert!(RuleThresholds::new().with_short_gap_max(0).validate().is_err());
    }
}
