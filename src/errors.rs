use crate::dimension::Dimension;
use thiserror::Error;

/// Error type for invalid unit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    #[error("empty unit string")]
    EmptyUnit,
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
    #[error("unknown gas '{0}'")]
    UnknownGas(String),
    #[error("invalid exponent '{0}'")]
    InvalidExponent(String),
    #[error("failed to parse unit '{input}': {reason}")]
    ParseFailed { input: String, reason: String },
    #[error("cannot convert from '{from_unit}' ({from}) to '{to_unit}' ({to})")]
    IncompatibleDimensions {
        from_unit: String,
        to_unit: String,
        from: Dimension,
        to: Dimension,
    },
    #[error("unknown conversion context '{0}'")]
    UnknownContext(String),
    #[error("unit '{0}' is already defined")]
    DuplicateUnit(String),
    #[error("dimensions of '{0}' don't contain a gas mixture")]
    UnknownMixture(String),
    #[error("unsupported mixture dimensionality in '{unit}': {reason}")]
    UnsupportedMixtureDimension { unit: String, reason: String },
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),
    #[error("no {metric} value for '{gas}' (constituent of '{mixture}')")]
    MissingGwp {
        metric: String,
        gas: String,
        mixture: String,
    },
    #[error("invalid fraction table for mixture '{name}': {reason}")]
    InvalidFractionTable { name: String, reason: String },
    #[error("invalid metric table: {0}")]
    InvalidMetricTable(String),
    #[error("mixture '{0}' uses mole fractions, which cannot be weighted by mass-based GWPs")]
    UnsupportedFractionBasis(String),
}

/// Convenience type for `Result<T, UnitsError>`.
pub type UnitsResult<T> = Result<T, UnitsError>;
