//! Refrigerant gas mixture definitions.
//!
//! A [`Mixture`] is a named blend of gases with constituent fractions that
//! sum to 1. Registered mixtures become pseudo-units with their own species
//! dimension, so quantities like `kg HFC410a / yr` can be split into
//! constituent gas quantities or converted to CO2-equivalent using a GWP
//! metric.
//!
//! The built-in table covers the ASHRAE R-400 and R-500 blend series, with
//! mass fractions from the ASHRAE 34 designations. Names follow the
//! constituent family, as in `CFC400` for R-400 and `HFC410a` for R-410A.

use crate::errors::{UnitsError, UnitsResult};
use is_close::is_close;
use serde::{Deserialize, Serialize};

/// Relative tolerance for the fraction-sum invariant.
pub const FRACTION_SUM_REL_TOL: f64 = 1e-6;

/// Whether a mixture's constituent fractions are by mass or by mole.
///
/// Whether a blend is specified by mass or by mole is a property of the
/// source data, so it is carried per mixture rather than assumed globally.
/// GWP weighting is mass-based, so only mass-basis mixtures can be converted
/// to CO2-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FractionBasis {
    #[default]
    Mass,
    Mole,
}

/// A named gas blend: an ordered mapping from constituent gas to fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mixture {
    name: String,
    basis: FractionBasis,
    /// `(gas symbol, fraction)` pairs in blend order.
    constituents: Vec<(String, f64)>,
}

impl Mixture {
    /// Creates a mass-basis mixture from `(gas, fraction)` pairs.
    pub fn new<S: Into<String>>(name: S, constituents: Vec<(String, f64)>) -> Self {
        Self {
            name: name.into(),
            basis: FractionBasis::Mass,
            constituents,
        }
    }

    /// Sets the fraction basis.
    #[must_use]
    pub fn with_basis(mut self, basis: FractionBasis) -> Self {
        self.basis = basis;
        self
    }

    /// The mixture's name, used as its unit symbol.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn basis(&self) -> FractionBasis {
        self.basis
    }

    /// The constituent `(gas, fraction)` pairs in blend order.
    #[must_use]
    pub fn constituents(&self) -> &[(String, f64)] {
        &self.constituents
    }

    /// Validates the fraction table.
    ///
    /// Fractions must be finite and non-negative (a zero fraction is
    /// permitted but the gas must still be a valid constituent, to keep the
    /// definition auditable), and must sum to 1 within
    /// [`FRACTION_SUM_REL_TOL`].
    ///
    /// # Errors
    ///
    /// Returns [`UnitsError::InvalidFractionTable`] describing the first
    /// violation found.
    pub fn validate(&self) -> UnitsResult<()> {
        if self.constituents.is_empty() {
            return Err(self.invalid("no constituents"));
        }
        for (gas, fraction) in &self.constituents {
            if !fraction.is_finite() || *fraction < 0.0 {
                return Err(self.invalid(&format!("fraction {fraction} for '{gas}' is invalid")));
            }
        }
        let total: f64 = self.constituents.iter().map(|(_, f)| f).sum();
        if !is_close!(total, 1.0, rel_tol = FRACTION_SUM_REL_TOL) {
            return Err(self.invalid(&format!("fractions sum to {total}, expected 1")));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> UnitsError {
        UnitsError::InvalidFractionTable {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

/// One built-in blend: name and mass-percent constituents.
const fn blend(
    name: &'static str,
    constituents: &'static [(&'static str, f64)],
) -> (&'static str, &'static [(&'static str, f64)]) {
    (name, constituents)
}

/// Built-in refrigerant blends with constituent mass percentages.
#[rustfmt::skip]
const BLENDS: &[(&str, &[(&str, f64)])] = &[
    blend("CFC400",   &[("CFC12", 50.0), ("CFC114", 50.0)]),
    blend("HCFC401a", &[("HCFC22", 53.0), ("HFC152a", 13.0), ("HCFC124", 34.0)]),
    blend("HCFC401b", &[("HCFC22", 61.0), ("HFC152a", 11.0), ("HCFC124", 28.0)]),
    blend("HCFC401c", &[("HCFC22", 33.0), ("HFC152a", 15.0), ("HCFC124", 52.0)]),
    blend("HCFC402a", &[("HFC125", 60.0), ("C3H8", 2.0), ("HCFC22", 38.0)]),
    blend("HCFC402b", &[("HFC125", 38.0), ("C3H8", 2.0), ("HCFC22", 60.0)]),
    blend("HCFC403a", &[("C3H8", 5.0), ("HCFC22", 75.0), ("C3F8", 20.0)]),
    blend("HCFC403b", &[("C3H8", 5.0), ("HCFC22", 56.0), ("C3F8", 39.0)]),
    blend("HFC404a",  &[("HFC125", 44.0), ("HFC143a", 52.0), ("HFC134a", 4.0)]),
    blend("HCFC406a", &[("HCFC22", 55.0), ("HC600a", 4.0), ("HCFC142b", 41.0)]),
    blend("HFC407a",  &[("HFC32", 20.0), ("HFC125", 40.0), ("HFC134a", 40.0)]),
    blend("HFC407b",  &[("HFC32", 10.0), ("HFC125", 70.0), ("HFC134a", 20.0)]),
    blend("HFC407c",  &[("HFC32", 23.0), ("HFC125", 25.0), ("HFC134a", 52.0)]),
    blend("HFC407d",  &[("HFC32", 15.0), ("HFC125", 15.0), ("HFC134a", 70.0)]),
    blend("HFC407e",  &[("HFC32", 25.0), ("HFC125", 15.0), ("HFC134a", 60.0)]),
    blend("HFC407f",  &[("HFC32", 30.0), ("HFC125", 30.0), ("HFC134a", 40.0)]),
    blend("HCFC408a", &[("HFC125", 7.0), ("HFC143a", 46.0), ("HCFC22", 47.0)]),
    blend("HCFC409a", &[("HCFC22", 60.0), ("HCFC124", 25.0), ("HCFC142b", 15.0)]),
    blend("HCFC409b", &[("HCFC22", 65.0), ("HCFC124", 25.0), ("HCFC142b", 10.0)]),
    blend("HFC410a",  &[("HFC32", 50.0), ("HFC125", 50.0)]),
    blend("HFC410b",  &[("HFC32", 45.0), ("HFC125", 55.0)]),
    blend("HCFC412a", &[("HCFC22", 70.0), ("C3F8", 5.0), ("HCFC142b", 25.0)]),
    blend("HCFC415a", &[("HCFC22", 82.0), ("HFC152a", 18.0)]),
    blend("HCFC415b", &[("HCFC22", 25.0), ("HFC152a", 75.0)]),
    blend("HFC421a",  &[("HFC125", 58.0), ("HFC134a", 42.0)]),
    blend("HFC421b",  &[("HFC125", 85.0), ("HFC134a", 15.0)]),
    blend("HFC423a",  &[("HFC134a", 52.5), ("HFC227ea", 47.5)]),
    blend("HFC425a",  &[("HFC32", 18.5), ("HFC134a", 69.5), ("HFC227ea", 12.0)]),
    blend("HFC427a",  &[("HFC32", 15.0), ("HFC125", 25.0), ("HFC143a", 10.0), ("HFC134a", 50.0)]),
    blend("HFC458a",  &[("HFC32", 20.5), ("HFC125", 4.0), ("HFC134a", 61.5), ("HFC227ea", 13.5), ("HFC236fa", 0.5)]),
    blend("HCFC500",  &[("CFC12", 73.8), ("HFC152a", 26.2)]),
    blend("HCFC501",  &[("HCFC22", 75.0), ("CFC12", 25.0)]),
    blend("HCFC502",  &[("HCFC22", 48.8), ("CFC115", 51.2)]),
    blend("HCFC503",  &[("HFC23", 40.1), ("CFC13", 59.9)]),
    blend("HCFC504",  &[("HFC32", 48.2), ("CFC115", 51.8)]),
    blend("HFC507a",  &[("HFC125", 50.0), ("HFC143a", 50.0)]),
    blend("HFC508a",  &[("HFC23", 39.0), ("C2F6", 61.0)]),
    blend("HFC508b",  &[("HFC23", 46.0), ("C2F6", 54.0)]),
    blend("HCFC509a", &[("HCFC22", 44.0), ("C3F8", 56.0)]),
];

/// Builds the built-in mixtures, converting mass percentages to fractions.
pub(crate) fn builtin_mixtures() -> Vec<Mixture> {
    BLENDS
        .iter()
        .map(|(name, constituents)| {
            Mixture::new(
                *name,
                constituents
                    .iter()
                    .map(|(gas, pct)| (gas.to_string(), pct / 100.0))
                    .collect(),
            )
        })
        .collect()
}
