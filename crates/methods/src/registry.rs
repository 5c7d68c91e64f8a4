//! Name-keyed registry of interpolation kernels.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use gapfill_series::TimeSeries;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::MethodError;
use crate::method::Method;
use crate::{linear, log, polynomial, spline};

/// An interpolation kernel.
///
/// Implementations fill every gap of the input and return a series on the
/// full daily axis between the first and last observed dates. They must not
/// alter observed values.
///
/// Any `Fn(&TimeSeries) -> Result<TimeSeries, MethodError>` that is
/// `Send + Sync` is an `Interpolator`.
pub trait Interpolator: Send + Sync {
    /// Fills the gaps of `series`.
    fn interpolate(&self, series: &TimeSeries) -> Result<TimeSeries, MethodError>;
}

impl<F> Interpolator for F
where
    F: Fn(&TimeSeries) -> Result<TimeSeries, MethodError> + Send + Sync,
{
    fn interpolate(&self, series: &TimeSeries) -> Result<TimeSeries, MethodError> {
        self(series)
    }
}

/// Statically populated map from method name to kernel.
///
/// Names iterate in sorted order. The registry is immutable once shared, so
/// concurrent [`dispatch`](Self::dispatch) calls are safe.
#[derive(Clone, Default)]
pub struct MethodRegistry {
    methods: BTreeMap<String, Arc<dyn Interpolator>>,
}

impl MethodRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in kernels of [`Method::ALL`].
    pub fn with_defaults() -> Self {
        let mut methods: BTreeMap<String, Arc<dyn Interpolator>> = BTreeMap::new();
        for method in Method::ALL {
            let kernel: Arc<dyn Interpolator> = match method {
                Method::Linear => Arc::new(linear::interpolate),
                Method::Polynomial => Arc::new(polynomial::interpolate),
                Method::Spline => Arc::new(spline::interpolate),
                Method::Log => Arc::new(log::interpolate),
            };
            methods.insert(method.as_str().to_string(), kernel);
        }
        Self { methods }
    }

    /// Registers `kernel` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MethodError::InvalidName`] if `name` is empty or has
    /// surrounding whitespace, and [`MethodError::DuplicateMethod`] if it is
    /// already registered.
    pub fn register<I>(&mut self, name: impl Into<String>, kernel: I) -> Result<(), MethodError>
    where
        I: Interpolator + 'static,
    {
        let name = name.into();
        if name.is_empty() || name.trim() != name {
            return Err(MethodError::InvalidName { name });
        }
        if self.methods.contains_key(&name) {
            return Err(MethodError::DuplicateMethod { name });
        }
        debug!(method = %name, "registered interpolation method");
        self.methods.insert(name, Arc::new(kernel));
        Ok(())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Looks up the kernel registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MethodError::MethodNotFound`] listing the available names.
    pub fn get(&self, name: &str) -> Result<&dyn Interpolator, MethodError> {
        self.methods
            .get(name)
            .map(|k| k.as_ref())
            .ok_or_else(|| MethodError::MethodNotFound {
                name: name.to_string(),
                available: self.methods.keys().cloned().collect(),
            })
    }

    /// Applies the kernel registered under `name` to `series`.
    ///
    /// The input is never modified; the filled series is a new value.
    ///
    /// # Errors
    ///
    /// Returns [`MethodError::MethodNotFound`] for an unknown name and
    /// propagates kernel failures.
    pub fn dispatch(&self, name: &str, series: &TimeSeries) -> Result<TimeSeries, MethodError> {
        self.get(name)?.interpolate(series)
    }

    /// Applies every registered kernel to `series`, in name order.
    ///
    /// Kernels run in parallel. A failing kernel yields its error in its own
    /// slot and does not stop the others.
    pub fn dispatch_all(
        &self,
        series: &TimeSeries,
    ) -> Vec<(String, Result<TimeSeries, MethodError>)> {
        self.methods
            .par_iter()
            .map(|(name, kernel)| {
                let result = kernel.interpolate(series);
                if let Err(e) = &result {
                    warn!(method = %name, error = %e, "method failed");
                }
                (name.clone(), result)
            })
            .collect()
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn defaults_are_sorted() {
        let reg = MethodRegistry::with_defaults();
        assert_eq!(reg.names(), vec!["linear", "log", "polynomial", "spline"]);
        assert_eq!(reg.len(), 4);
        assert!(reg.contains("spline"));
        assert!(!reg.contains("akima"));
    }

    #[test]
    fn register_closure() {
        let mut reg = MethodRegistry::new();
        assert!(reg.is_empty());
        reg.register(
            "identity",
            |s: &TimeSeries| -> Result<TimeSeries, MethodError> { Ok(s.clone()) },
        )
        .unwrap();
        assert_eq!(reg.names(), vec!["identity"]);
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut reg = MethodRegistry::with_defaults();
        let err = reg.register("linear", linear::interpolate).unwrap_err();
        assert_eq!(
            err,
            MethodError::DuplicateMethod {
                name: "linear".to_string()
            }
        );
    }

    #[test]
    fn register_rejects_bad_names() {
        let mut reg = MethodRegistry::new();
        for name in ["", " linear", "linear\n"] {
            let err = reg.register(name, linear::interpolate).unwrap_err();
            assert!(matches!(err, MethodError::InvalidName { .. }), "{name:?}");
        }
    }

    #[test]
    fn dispatch_unknown_lists_available() {
        let reg = MethodRegistry::with_defaults();
        let s = TimeSeries::from_present(vec![(d(1), 1.0)]).unwrap();
        let err = reg.dispatch("akima", &s).unwrap_err();
        assert_eq!(
            err.to_string(),
            "method 'akima' not found (available: linear, log, polynomial, spline)"
        );
    }

    #[test]
    fn debug_lists_names() {
        let reg = MethodRegistry::with_defaults();
        assert_eq!(
            format!("{reg:?}"),
            r#"MethodRegistry { methods: ["linear", "log", "polynomial", "spline"] }"#
        );
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MethodRegistry>();
    }
}
