//! Errors raised when a grid configuration cannot produce a map.

use std::error::Error;
use std::fmt;

/// A grid configuration that cannot produce a map.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigurationError {
    /// A walk needs a start row and at least one row below it.
    TooFewRows { rows: u32 },
    /// The grid has no column to start a walk in.
    NoColumns,
    /// A physical extent or scale is NaN or infinite.
    NonFiniteExtent { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewRows { rows } => {
                write!(f, "grid needs at least 2 rows, got {rows}")
            }
            Self::NoColumns => write!(f, "grid needs at least 1 column"),
            Self::NonFiniteExtent { field, value } => {
                write!(f, "{field} must be a finite number, got {value}")
            }
        }
    }
}

impl Error for ConfigurationError {}
