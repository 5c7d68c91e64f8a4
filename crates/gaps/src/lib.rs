//! # gapfill-gaps
//!
//! Finds the gaps of a daily series, summarises the data around each one and
//! picks an interpolation method per gap from a fixed decision table.
//!
//! ```text
//! plan_gaps()
//!   ├─ detect_gaps()         (gap.rs)
//!   ├─ analyze_context()     (context.rs, one per gap, in parallel)
//!   └─ select_method_with()  (rules.rs)
//! ```
//!
//! # Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use gapfill_gaps::{ContextConfig, RuleThresholds, plan_gaps};
//! use gapfill_methods::Method;
//! use gapfill_series::TimeSeries;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let points = (1..=30).filter(|&day| day != 12).map(|day| (d(day), 5.0)).collect();
//! let series = TimeSeries::from_present(points).unwrap();
//!
//! let report = plan_gaps(&series, &ContextConfig::default(), &RuleThresholds::default()).unwrap();
//! assert_eq!(report.total_gaps(), 1);
//! assert_eq!(report.primary_method(), Some(Method::Linear));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `gap` | `Gap` and `detect_gaps` |
//! | `context` | `LocalContext`, `WindowSummary` and `analyze_context` |
//! | `rules` | Decision table: `select_method`, `select_method_with` |
//! | `plan` | `plan_gaps` and the `GapReport` it returns |
//! | `config` | `ContextConfig` and `RuleThresholds` |
//! | `error` | Error types |

pub mod config;
pub mod context;
pub mod error;
pub mod gap;
pub mod plan;
pub mod rules;

pub use config::{ContextConfig, RuleThresholds};
pub use context::{LocalContext, WindowSummary, analyze_context};
pub use error::GapError;
pub use gap::{Gap, detect_gaps};
pub use plan::{GapPlan, GapReport, plan_gaps};
pub use rules::{MethodSelection, Rule, select_method, select_method_with};
