//! Conversion contexts between species dimensions.
//!
//! Species dimensions keep `kg CH4` and `kg C` apart during normal
//! dimensional analysis. A [`Context`] names a set of transformations that
//! temporarily bridge two species dimensions with a scalar factor, in the
//! style of pint's contexts:
//!
//! - chemical contexts (`CH4_conversions`, `NOx_conversions`, ...) bridge
//!   via molecular-weight ratios,
//! - GWP metric contexts (`AR4GWP100`, ...) bridge every gas species to
//!   `carbon` via its CO2-equivalence factor.
//!
//! Factors are expressed in species base units: a transformation
//! `methane -> carbon` with factor 12/16 says one base unit of methane is
//! worth 12/16 base units of carbon.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named set of species-to-species transformations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    name: String,
    /// `(from species, to species) -> factor` in species base units.
    transforms: BTreeMap<(String, String), f64>,
}

impl Context {
    /// Creates an empty context.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            transforms: BTreeMap::new(),
        }
    }

    /// The context's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a transformation between two species dimensions.
    ///
    /// The reverse direction is implied: `factor(to, from) = 1 / factor`.
    /// Re-adding a pair overwrites the previous factor.
    pub fn add_transformation(&mut self, from: &str, to: &str, factor: f64) {
        self.transforms
            .insert((from.to_string(), to.to_string()), factor);
    }

    /// Builder-style [`Context::add_transformation`].
    #[must_use]
    pub fn with_transformation(mut self, from: &str, to: &str, factor: f64) -> Self {
        self.add_transformation(from, to, factor);
        self
    }

    /// Returns true if the context defines a transformation touching the
    /// given species.
    #[must_use]
    pub fn covers(&self, species: &str) -> bool {
        self.transforms
            .keys()
            .any(|(from, to)| from == species || to == species)
    }

    /// Looks up the factor converting one base unit of `from` into base
    /// units of `to`.
    ///
    /// Tries the direct transformation, then the inverse, then a two-step
    /// chain through a shared species (so a metric context that maps both
    /// `methane -> carbon` and `nitrous_oxide -> carbon` also supports
    /// `methane -> nitrous_oxide`).
    #[must_use]
    pub fn factor(&self, from: &str, to: &str) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }
        if let Some(&f) = self.transforms.get(&(from.to_string(), to.to_string())) {
            return Some(f);
        }
        if let Some(&f) = self.transforms.get(&(to.to_string(), from.to_string())) {
            return Some(1.0 / f);
        }

        // Chain through a shared intermediate species
        for ((a, b), &f1) in &self.transforms {
            let (via, first) = if a == from {
                (b, f1)
            } else if b == from {
                (a, 1.0 / f1)
            } else {
                continue;
            };
            if let Some(&f2) = self.transforms.get(&(via.clone(), to.to_string())) {
                return Some(first * f2);
            }
            if let Some(&f2) = self.transforms.get(&(to.to_string(), via.clone())) {
                return Some(first / f2);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_direct_and_inverse() {
        let ctx = Context::new("CH4_conversions").with_transformation(
            "methane",
            "carbon",
            12.0 / 16.0,
        );
        assert!(is_close!(ctx.factor("methane", "carbon").unwrap(), 12.0 / 16.0));
        assert!(is_close!(ctx.factor("carbon", "methane").unwrap(), 16.0 / 12.0));
        assert!(ctx.factor("methane", "nitrogen").is_none());
    }

    #[test]
    fn test_identity() {
        let ctx = Context::new("empty");
        assert!(is_close!(ctx.factor("carbon", "carbon").unwrap(), 1.0));
    }

    #[test]
    fn test_chained_through_shared_species() {
        let ctx = Context::new("metric")
            .with_transformation("methane", "carbon", 25.0 * 12.0 / 44.0)
            .with_transformation("nitrous_oxide", "carbon", 298.0 * 12.0 / 44.0);

        // methane -> nitrous_oxide via carbon
        let factor = ctx.factor("methane", "nitrous_oxide").unwrap();
        assert!(is_close!(factor, 25.0 / 298.0));
        // and the reverse chain
        let factor = ctx.factor("nitrous_oxide", "methane").unwrap();
        assert!(is_close!(factor, 298.0 / 25.0));
    }

    #[test]
    fn test_covers() {
        let ctx = Context::new("NOx_conversions").with_transformation(
            "nitrogen",
            "NOx",
            46.0 / 14.0,
        );
        assert!(ctx.covers("nitrogen"));
        assert!(ctx.covers("NOx"));
        assert!(!ctx.covers("carbon"));
    }
}
