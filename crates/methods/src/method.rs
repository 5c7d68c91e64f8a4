//! Built-in interpolation method names.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::MethodError;

/// The interpolation techniques shipped with the default registry.
///
/// The registry itself is keyed by string and accepts other names; this
/// enum covers the names the selectors can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Straight line between the neighbouring observations.
    Linear,
    /// Local quadratic least-squares fit around each gap.
    Polynomial,
    /// Natural cubic spline through all observations.
    Spline,
    /// Linear interpolation of log-values (exponential segments).
    Log,
}

impl Method {
    /// All built-in methods, in registry order.
    pub const ALL: [Method; 4] = [
        Method::Linear,
        Method::Log,
        Method::Polynomial,
        Method::Spline,
    ];

    /// Returns the registry name of this method.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Linear => "linear",
            Method::Polynomial => "polynomial",
            Method::Spline => "spline",
            Method::Log => "log",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = MethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| MethodError::MethodNotFound {
                name: s.to_string(),
                available: Method::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            })
    }
}
