use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use gapfill_gaps::ContextConfig;
use gapfill_select::{AutoSelectConfig, CvConfig};

/// Top-level gapfill configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GapfillConfig {
    /// Gap analysis settings.
    #[serde(default)]
    pub gaps: GapsToml,

    /// Whole-series selection settings.
    #[serde(default)]
    pub select: SelectToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GapsToml {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
}

fn default_window_size() -> usize {
    5
}

impl Default for GapsToml {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectToml {
    #[serde(default = "default_true")]
    pub use_cv: bool,
    #[serde(default = "default_cv_weight")]
    pub cv_weight: f64,
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_true() -> bool {
    true
}

fn default_cv_weight() -> f64 {
    0.7
}

fn default_test_ratio() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

impl Default for SelectToml {
    fn default() -> Self {
        Self {
            use_cv: default_true(),
            cv_weight: default_cv_weight(),
            test_ratio: default_test_ratio(),
            seed: default_seed(),
        }
    }
}

impl GapsToml {
    /// Builds the context config, with `window` taking precedence.
    pub fn context_config(&self, window: Option<usize>) -> ContextConfig {
        ContextConfig::new().with_window_size(window.unwrap_or(self.window_size))
    }
}

impl SelectToml {
    /// Builds the auto-selection config. `Some` overrides win over file values.
    pub fn auto_select_config(
        &self,
        no_cv: bool,
        cv_weight: Option<f64>,
        test_ratio: Option<f64>,
        seed: Option<u64>,
    ) -> AutoSelectConfig {
        let cv = CvConfig::new()
            .with_test_ratio(test_ratio.unwrap_or(self.test_ratio))
            .with_seed(seed.unwrap_or(self.seed));
        AutoSelectConfig::new()
            .with_use_cv(self.use_cv && !no_cv)
            .with_cv_weight(cv_weight.unwrap_or(self.cv_weight))
            .with_cv(cv)
    }
}

/// Reads the TOML file at `path`, or returns defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<GapfillConfig> {
    let Some(path) = path else {
        return Ok(GapfillConfig::default());
    };
    info!(path = %path.display(), "reading config");
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse gapfill TOML")
}
