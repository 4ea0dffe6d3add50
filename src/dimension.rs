//! Physical dimensions for unit validation.
//!
//! Emissions accounting needs far fewer base quantities than a general
//! dimensional-analysis system: mass, time, and one pseudo-dimension per gas
//! species. Treating each species (`carbon`, `methane`, `CFC400`, ...) as its
//! own base dimension is what makes `kg CH4` and `kg C` incompatible until a
//! conversion context is enabled.
//!
//! Dimensions are stored as integer exponents. For example:
//! - an emission rate `kg CH4 / yr` has mass = 1, time = -1, methane = 1
//! - a concentration `ppm` is dimensionless

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Represents the physical dimension of a quantity.
///
/// Two quantities can be converted without a context only if their
/// dimensions are identical, including the species exponents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Dimension {
    /// Mass exponent (M)
    pub mass: i32,
    /// Time exponent (T)
    pub time: i32,
    /// Species exponents, keyed by species name.
    /// Using a BTreeMap for deterministic ordering; zero exponents are
    /// never stored.
    species: BTreeMap<String, i32>,
}

impl Dimension {
    /// Creates a dimension with all exponents set to zero (dimensionless).
    #[must_use]
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Mass dimension (M¹).
    #[must_use]
    pub fn mass() -> Self {
        Self {
            mass: 1,
            ..Self::default()
        }
    }

    /// Time dimension (T¹).
    #[must_use]
    pub fn time() -> Self {
        Self {
            time: 1,
            ..Self::default()
        }
    }

    /// Dimension of a single gas species.
    #[must_use]
    pub fn species(name: &str) -> Self {
        let mut species = BTreeMap::new();
        species.insert(name.to_string(), 1);
        Self {
            mass: 0,
            time: 0,
            species,
        }
    }

    /// Returns true if this dimension is dimensionless.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.mass == 0 && self.time == 0 && self.species.is_empty()
    }

    /// Returns true if this dimension is compatible with another for
    /// conversion. Two dimensions are compatible if they are identical.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self == other
    }

    /// The exponent of the given species in this dimension.
    #[must_use]
    pub fn species_exponent(&self, name: &str) -> i32 {
        self.species.get(name).copied().unwrap_or(0)
    }

    /// Iterates over the species exponents.
    pub fn species_exponents(&self) -> impl Iterator<Item = (&str, i32)> {
        self.species.iter().map(|(name, &exp)| (name.as_str(), exp))
    }

    /// Returns true if the only non-zero exponent is a single species with
    /// exponent 1. Pure gas units like `CH4` have this shape.
    #[must_use]
    pub fn is_pure_species(&self) -> bool {
        self.mass == 0 && self.time == 0 && self.species.len() == 1 && {
            let (_, &exp) = self.species.iter().next().expect("len checked");
            exp == 1
        }
    }

    /// Multiplies this dimension by another (adds exponents).
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut species = self.species.clone();
        for (name, exp) in &other.species {
            *species.entry(name.clone()).or_insert(0) += exp;
        }
        species.retain(|_, exp| *exp != 0);
        Self {
            mass: self.mass + other.mass,
            time: self.time + other.time,
            species,
        }
    }

    /// Divides this dimension by another (subtracts exponents).
    #[must_use]
    pub fn divide(&self, other: &Self) -> Self {
        self.multiply(&other.pow(-1))
    }

    /// Raises this dimension to an integer power.
    #[must_use]
    pub fn pow(&self, exp: i32) -> Self {
        let species = if exp == 0 {
            BTreeMap::new()
        } else {
            self.species
                .iter()
                .map(|(name, e)| (name.clone(), e * exp))
                .collect()
        };
        Self {
            mass: self.mass * exp,
            time: self.time * exp,
            species,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }

        let mut parts = Vec::new();
        for (exp, sym) in [(self.mass, "[mass]"), (self.time, "[time]")] {
            if exp == 1 {
                parts.push(sym.to_string());
            } else if exp != 0 {
                parts.push(format!("{sym}^{exp}"));
            }
        }
        for (name, &exp) in &self.species {
            if exp == 1 {
                parts.push(format!("[{name}]"));
            } else if exp != 0 {
                parts.push(format!("[{name}]^{exp}"));
            }
        }

        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        let dim = Dimension::dimensionless();
        assert!(dim.is_dimensionless());
        assert_eq!(format!("{}", dim), "dimensionless");
    }

    #[test]
    fn test_emission_rate() {
        // kg CH4 / yr = M T^-1 [methane]
        let rate = Dimension::mass()
            .multiply(&Dimension::species("methane"))
            .divide(&Dimension::time());
        assert_eq!(rate.mass, 1);
        assert_eq!(rate.time, -1);
        assert_eq!(rate.species_exponent("methane"), 1);
        assert!(!rate.is_dimensionless());
    }

    #[test]
    fn test_species_cancellation() {
        let methane = Dimension::species("methane");
        let ratio = methane.divide(&methane);
        assert!(ratio.is_dimensionless());
    }

    #[test]
    fn test_pure_species() {
        assert!(Dimension::species("carbon").is_pure_species());
        assert!(!Dimension::species("carbon").pow(2).is_pure_species());
        assert!(!Dimension::mass()
            .multiply(&Dimension::species("carbon"))
            .is_pure_species());
    }

    #[test]
    fn test_is_compatible() {
        let a = Dimension::mass().multiply(&Dimension::species("carbon"));
        let b = Dimension::mass().multiply(&Dimension::species("carbon"));
        let c = Dimension::mass().multiply(&Dimension::species("methane"));
        assert!(a.is_compatible(&b));
        assert!(!a.is_compatible(&c));
    }

    #[test]
    fn test_pow_zero_clears_species() {
        let dim = Dimension::species("carbon").pow(0);
        assert!(dim.is_dimensionless());
    }

    #[test]
    fn test_display() {
        let rate = Dimension::mass()
            .multiply(&Dimension::species("carbon"))
            .divide(&Dimension::time());
        assert_eq!(format!("{}", rate), "[mass] [time]^-1 [carbon]");
    }
}
