//! Units and quantities.
//!
//! A [`Unit`] is a product of registered symbols with integer exponents,
//! e.g. `kg CH4 / yr` is `{kg: 1, CH4: 1, yr: -1}`. Units store symbols, not
//! resolved dimensions; resolution happens against a
//! [`UnitRegistry`](crate::registry::UnitRegistry) so that the same unit
//! string can be interpreted by registries with different gas or mixture
//! tables.
//!
//! A [`Quantity`] pairs a magnitude with a unit. Quantities are plain data;
//! all arithmetic that needs the registry (conversion, splitting,
//! CO2-equivalence) lives on the registry itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A parsed unit: a product of symbols with integer exponents.
///
/// # Equality
///
/// Two units are equal if they have the same components, so
/// `kg CH4 / yr == CH4 * kg * yr^-1`. Units built from different but
/// convertible symbols (`a` vs `yr`) are not equal; they convert with
/// factor 1 instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Unit {
    /// Map from symbol to exponent. Using a BTreeMap for deterministic
    /// ordering; zero exponents are never stored.
    components: BTreeMap<String, i32>,
}

impl Unit {
    /// Creates an empty (dimensionless) unit.
    #[must_use]
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Creates a unit from components, dropping zero exponents.
    #[must_use]
    pub fn from_components(components: BTreeMap<String, i32>) -> Self {
        let components = components
            .into_iter()
            .filter(|(_, exp)| *exp != 0)
            .collect();
        Self { components }
    }

    /// The unit's components.
    #[must_use]
    pub fn components(&self) -> &BTreeMap<String, i32> {
        &self.components
    }

    /// Returns true if the unit has no components.
    #[must_use]
    pub fn has_no_components(&self) -> bool {
        self.components.is_empty()
    }

    /// Multiplies this unit by another.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut components = self.components.clone();
        for (symbol, exp) in &other.components {
            *components.entry(symbol.clone()).or_insert(0) += exp;
        }
        Self::from_components(components)
    }

    /// Divides this unit by another.
    #[must_use]
    pub fn divide(&self, other: &Self) -> Self {
        let mut components = self.components.clone();
        for (symbol, exp) in &other.components {
            *components.entry(symbol.clone()).or_insert(0) -= exp;
        }
        Self::from_components(components)
    }

    /// Raises this unit to a power.
    #[must_use]
    pub fn pow(&self, exp: i32) -> Self {
        Self::from_components(
            self.components
                .iter()
                .map(|(symbol, e)| (symbol.clone(), e * exp))
                .collect(),
        )
    }

    /// Returns a copy with one symbol substituted for another at the same
    /// exponent. Used when splitting a mixture quantity into constituents.
    #[must_use]
    pub fn with_symbol_replaced(&self, from: &str, to: &str) -> Self {
        let mut components = self.components.clone();
        if let Some(exp) = components.remove(from) {
            *components.entry(to.to_string()).or_insert(0) += exp;
        }
        Self::from_components(components)
    }

    /// Returns the canonical string representation: symbols with positive
    /// exponents first (alphabetically), then `/`, then the negative ones.
    #[must_use]
    pub fn normalized(&self) -> String {
        if self.components.is_empty() {
            return "1".to_string();
        }

        let mut numerator: Vec<(&str, i32)> = Vec::new();
        let mut denominator: Vec<(&str, i32)> = Vec::new();
        for (symbol, &exp) in &self.components {
            if exp > 0 {
                numerator.push((symbol, exp));
            } else {
                denominator.push((symbol, -exp));
            }
        }

        let format_part = |parts: &[(&str, i32)]| -> String {
            parts
                .iter()
                .map(|(s, e)| {
                    if *e == 1 {
                        (*s).to_string()
                    } else {
                        format!("{s}^{e}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        };

        let num_str = format_part(&numerator);
        let den_str = format_part(&denominator);
        match (num_str.is_empty(), den_str.is_empty()) {
            (true, true) => "1".to_string(),
            (false, true) => num_str,
            (true, false) => format!("1 / {den_str}"),
            (false, false) => format!("{num_str} / {den_str}"),
        }
    }
}

impl std::hash::Hash for Unit {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

/// A numeric magnitude paired with a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Quantity {
    /// Creates a quantity.
    #[must_use]
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}
