//! # gapfill-select
//!
//! Whole-series method selection and plan-driven filling.
//!
//! | Entry point | Does |
//! |-------------|------|
//! | [`characterize`] | Shape statistics and a heuristic recommendation |
//! | [`cross_validate`] | Hides seeded interior points and scores every registered method |
//! | [`auto_select_method`] | Reconciles the two into one method with a [`Confidence`] |
//! | [`adaptive_fill`] | Applies a per-gap plan from `gapfill-gaps` |
//!
//! # Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use gapfill_methods::MethodRegistry;
//! use gapfill_select::{AutoSelectConfig, auto_select_method};
//! use gapfill_series::TimeSeries;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let values = (0..30).map(|i| Some(10.0 + i as f64)).collect();
//! let series = TimeSeries::from_daily(start, values).unwrap();
//!
//! let registry = MethodRegistry::with_defaults();
//! let selection = auto_select_method(&series, &registry, &AutoSelectConfig::default()).unwrap();
//! assert!(registry.contains(&selection.method));
//! assert!(selection.cross_validation.is_some());
//! ```

pub mod adaptive;
pub mod auto;
pub mod characterize;
pub mod config;
pub mod cv;
pub mod error;

pub use adaptive::{AdaptiveFill, adaptive_fill};
pub use auto::{AutoSelection, Confidence, auto_select_method};
pub use characterize::{SeriesCharacteristics, SeriesShape, characterize};
pub use config::{AutoSelectConfig, CvConfig};
pub use cv::{CvMetrics, CvReport, MethodScore, cross_validate};
pub use error::SelectError;
