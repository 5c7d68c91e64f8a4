//! # gapfill-methods
//!
//! Interpolation kernels and the registry that dispatches to them by name.
//!
//! | Method | Kernel | Clipping |
//! |--------|--------|----------|
//! | `linear` | Straight line between neighbouring observations | none |
//! | `log` | Linear in `ln(value)`, shifted by +1 if any value is `<= 0` | at 0 when shifted |
//! | `polynomial` | Quadratic fit over 3 observations each side | at 0 for non-negative data |
//! | `spline` | Natural cubic spline through all observations | at 0 for non-negative data |
//!
//! Every kernel returns a new series on the full daily axis between the
//! first and last observed dates; observed values pass through unchanged.
//!
//! # Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use gapfill_methods::MethodRegistry;
//! use gapfill_series::TimeSeries;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let series = TimeSeries::from_present(vec![(d(1), 10.0), (d(4), 40.0)]).unwrap();
//!
//! let registry = MethodRegistry::with_defaults();
//! let filled = registry.dispatch("linear", &series).unwrap();
//! assert_eq!(filled.value_at(d(2)), Some(20.0));
//! ```
//!
//! Custom kernels are plain functions or closures:
//!
//! ```
//! use gapfill_methods::{MethodError, MethodRegistry};
//! use gapfill_series::TimeSeries;
//!
//! let mut registry = MethodRegistry::with_defaults();
//! registry
//!     .register("as_is", |s: &TimeSeries| -> Result<TimeSeries, MethodError> {
//!         Ok(s.reindex_daily())
//!     })
//!     .unwrap();
//! assert!(registry.contains("as_is"));
//! ```

pub mod error;
pub mod linear;
pub mod log;
pub mod method;
pub mod polynomial;
pub mod registry;
pub mod spline;

pub(crate) mod kernel;

pub use error::MethodError;
pub use method::Method;
pub use registry::{Interpolator, MethodRegistry};
