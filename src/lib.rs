//! Unit handling for simple climate model emissions data.
//!
//! Emissions timeseries come in units like `Mt CH4 / yr`, `GtC / yr` or
//! `kg HFC410a`, and comparing gases requires Global Warming Potential
//! metrics. This crate provides a [`UnitRegistry`] that understands:
//!
//! - mass and time units with SI prefixes, plus joint mass-gas symbols
//!   like `tC` and `GtCO2`
//! - one pseudo-dimension per gas species, so `kg CH4` and `kg C` never
//!   convert silently
//! - conversion contexts: molecular-weight contexts such as
//!   `CH4_conversions`, and one context per GWP metric (`AR4GWP100`,
//!   `AR5GWP100`, ...)
//! - refrigerant mixtures such as `HFC410a`, which can be split into
//!   constituents or converted to CO2-equivalent
//!
//! # Examples
//!
//! Converting between units of the same species:
//!
//! ```
//! use scm_units::UnitRegistry;
//!
//! let registry = UnitRegistry::new();
//! let q = registry.quantity(1.0, "GtC / yr").unwrap();
//! let co2 = registry.convert(&q, "Gt CO2 / yr").unwrap();
//! assert!((co2.magnitude - 44.0 / 12.0).abs() < 1e-12);
//! ```
//!
//! Converting between gases inside a metric context:
//!
//! ```
//! use scm_units::UnitRegistry;
//!
//! let registry = UnitRegistry::new();
//! let ch4 = registry.quantity(1.0, "Mt CH4 / yr").unwrap();
//! let co2e = registry
//!     .convert_in_context(&ch4, "Mt CO2 / yr", "AR4GWP100")
//!     .unwrap();
//! assert!((co2e.magnitude - 25.0).abs() < 1e-12);
//! ```
//!
//! Splitting a refrigerant blend into constituents:
//!
//! ```
//! use scm_units::UnitRegistry;
//!
//! let registry = UnitRegistry::new();
//! let q = registry.quantity(10.0, "kg HFC410a").unwrap();
//! for part in registry.split_gas_mixture(&q).unwrap() {
//!     println!("{part}");
//! }
//! ```

pub mod context;
pub mod dimension;
pub mod errors;
mod gases;
pub mod metrics;
pub mod mixtures;
mod parser;
pub mod quantity;
pub mod registry;

pub use context::Context;
pub use dimension::Dimension;
pub use errors::{UnitsError, UnitsResult};
pub use metrics::{MetricTable, BUILTIN_METRICS};
pub use mixtures::{FractionBasis, Mixture, FRACTION_SUM_REL_TOL};
pub use quantity::{Quantity, Unit};
pub use registry::{GasInfo, UnitInfo, UnitRegistry};
