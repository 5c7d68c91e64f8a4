//! # gapfill-series
//!
//! Date-indexed daily time series with explicit missing values.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["(NaiveDate, Option<f64>) pairs"] -->|"TimeSeries::new()"| B["TimeSeries"]
//!     B -->|".present()"| C["observed points"]
//!     B -->|".daily_axis()"| D["every day in [first, last]"]
//!     B -->|".reindex_daily()"| E["TimeSeries on the full axis"]
//!     B -->|".with_hidden()"| F["TimeSeries with points masked"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use gapfill_series::TimeSeries;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let series = TimeSeries::from_present(vec![(d(1), 1.0), (d(2), 2.0), (d(5), 5.0)]).unwrap();
//!
//! assert_eq!(series.n_present(), 3);
//! assert_eq!(series.span_days(), Some(4));
//! assert_eq!(series.daily_axis().len(), 5);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `series` | `TimeSeries` and `Observation` |
//! | `axis` | Daily date sequence helpers |
//! | `error` | Error types |

mod axis;
mod error;
mod series;

pub use axis::{daily_sequence, days_between};
pub use error::SeriesError;
pub use series::{Observation, TimeSeries};
