//! The unit registry.
//!
//! [`UnitRegistry`] holds every recognised unit: physical units (mass, time,
//! concentrations) with SI prefixes, gas species as pseudo-units, registered
//! mixtures, the GWP metric table, and the conversion contexts derived from
//! it. The registry is built once, is read-only afterwards, and is passed by
//! reference wherever units need resolving; there is no process-wide global.
//!
//! # Conversion factor convention
//!
//! Every unit stores the multiplier to convert FROM the unit TO its base
//! units: kg for mass, s for time, and the species' reference gas for gas
//! units. For example `t` has factor 1e3 and `CO2` has factor 12/44 (one
//! kilogram of CO2 contains 12/44 kilograms of carbon).
//!
//! # Example
//!
//! ```
//! use scm_units::UnitRegistry;
//!
//! let registry = UnitRegistry::new();
//! let q = registry.quantity(1.0, "tC").unwrap();
//! let co2 = registry.convert(&q, "tCO2").unwrap();
//! assert!((co2.magnitude - 44.0 / 12.0).abs() < 1e-12);
//! ```

use crate::context::Context;
use crate::dimension::Dimension;
use crate::errors::{UnitsError, UnitsResult};
use crate::gases::{GasSpec, STANDARD_GASES};
use crate::metrics::MetricTable;
use crate::mixtures::{builtin_mixtures, FractionBasis, Mixture};
use crate::parser;
use crate::quantity::{Quantity, Unit};
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Information about a registered unit.
#[derive(Debug, Clone)]
pub struct UnitInfo {
    /// The canonical symbol of this unit.
    pub name: String,
    /// The physical dimension of this unit.
    pub dimension: Dimension,
    /// Conversion factor to base units.
    pub factor: f64,
}

impl UnitInfo {
    fn new(name: &str, dimension: Dimension, factor: f64) -> Self {
        Self {
            name: name.to_string(),
            dimension,
            factor,
        }
    }
}

/// Information about a registered gas.
#[derive(Debug, Clone)]
pub struct GasInfo {
    /// Canonical symbol, e.g. `CO2`.
    pub symbol: String,
    /// The species dimension the gas lives in, e.g. `carbon`.
    pub species: String,
    /// Kilograms of the species' reference gas per kilogram of this gas.
    pub scale: f64,
}

/// SI prefix multipliers, longest symbols first so `da` wins over `d`.
const SI_PREFIXES: &[(&str, f64)] = &[
    ("da", 1e1),
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6), // using 'u' for micro (μ)
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
];

// Constants for time conversions
const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;
/// Seconds per year, using the 365.25-day astronomical year.
const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 3600.0;

/// How a component symbol resolved, including the decomposition of joint
/// mass-gas symbols like `GtCO2` (mass part `Gt`, gas `CO2`).
#[derive(Debug, Clone)]
struct Resolved {
    info: UnitInfo,
    joint: Option<JointSymbol>,
}

#[derive(Debug, Clone)]
struct JointSymbol {
    /// The leading mass part, e.g. `Gt`.
    mass_part: String,
    /// Canonical symbol of the trailing gas or mixture.
    gas: String,
}

/// Registry of recognised units, gases, mixtures, metrics and contexts.
///
/// Construction registers the standard units and gases, the built-in
/// refrigerant mixtures, and one conversion context per GWP metric plus the
/// molecular-weight contexts (`CH4_conversions`, `N2O_conversions`,
/// `NOx_conversions`, `NH3_conversions`). Additional mixtures can be added
/// with [`UnitRegistry::define_mixture`] before the registry is shared;
/// every query method takes `&self`, so concurrent readers need no locking.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    /// Map from canonical symbol to unit info.
    units: HashMap<String, UnitInfo>,
    /// Map from alias to canonical symbol.
    aliases: HashMap<String, String>,
    /// Map from canonical gas symbol to gas info.
    gases: BTreeMap<String, GasInfo>,
    /// Registered mixtures by name.
    mixtures: BTreeMap<String, Mixture>,
    /// GWP values per (metric, gas).
    metrics: MetricTable,
    /// Conversion contexts by name.
    contexts: BTreeMap<String, Context>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    /// Creates a registry with the built-in GWP metric table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_metric_table(MetricTable::builtin())
            .expect("built-in reference data is valid")
    }

    /// Creates a registry with a caller-supplied metric table.
    ///
    /// # Errors
    ///
    /// Fails with [`UnitsError::UnknownGas`] if the table references a gas
    /// that is not a standard gas, and with
    /// [`UnitsError::InvalidFractionTable`] if a built-in mixture fails
    /// validation. Either error means the registry is not usable; no
    /// partially built registry is returned.
    pub fn with_metric_table(metrics: MetricTable) -> UnitsResult<Self> {
        let mut registry = Self {
            units: HashMap::new(),
            aliases: HashMap::new(),
            gases: BTreeMap::new(),
            mixtures: BTreeMap::new(),
            metrics,
            contexts: BTreeMap::new(),
        };
        registry.register_mass_units();
        registry.register_time_units();
        registry.register_concentration_units();
        registry.register_standard_gases()?;
        registry.register_chemical_contexts();
        registry.register_metric_contexts()?;
        for mixture in builtin_mixtures() {
            registry.define_mixture(mixture)?;
        }
        Ok(registry)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    fn insert_unit(&mut self, info: UnitInfo) {
        self.units.insert(info.name.clone(), info);
    }

    fn insert_alias(&mut self, alias: &str, canonical: &str) {
        self.aliases
            .insert(alias.to_string(), canonical.to_string());
    }

    fn register_mass_units(&mut self) {
        self.insert_unit(UnitInfo::new("kg", Dimension::mass(), 1.0));
        self.insert_unit(UnitInfo::new("g", Dimension::mass(), 1e-3));
        self.insert_unit(UnitInfo::new("t", Dimension::mass(), 1e3)); // metric tonne
        self.insert_alias("tonne", "t");
        self.insert_alias("tonnes", "t");
    }

    fn register_time_units(&mut self) {
        self.insert_unit(UnitInfo::new("s", Dimension::time(), 1.0));
        self.insert_unit(UnitInfo::new(
            "min",
            Dimension::time(),
            SECONDS_PER_MINUTE,
        ));
        self.insert_unit(UnitInfo::new("h", Dimension::time(), SECONDS_PER_HOUR));
        self.insert_unit(UnitInfo::new("day", Dimension::time(), SECONDS_PER_DAY));
        self.insert_unit(UnitInfo::new("yr", Dimension::time(), SECONDS_PER_YEAR));

        self.insert_alias("sec", "s");
        self.insert_alias("second", "s");
        self.insert_alias("seconds", "s");
        self.insert_alias("minute", "min");
        self.insert_alias("minutes", "min");
        self.insert_alias("hr", "h");
        self.insert_alias("hour", "h");
        self.insert_alias("hours", "h");
        self.insert_alias("d", "day");
        self.insert_alias("days", "day");
        self.insert_alias("a", "yr"); // annum
        self.insert_alias("annum", "yr");
        self.insert_alias("year", "yr");
        self.insert_alias("years", "yr");
    }

    fn register_concentration_units(&mut self) {
        // Concentrations are dimensionless ratios
        self.insert_unit(UnitInfo::new("ppm", Dimension::dimensionless(), 1e-6));
        self.insert_unit(UnitInfo::new("ppb", Dimension::dimensionless(), 1e-9));
        self.insert_unit(UnitInfo::new("ppt", Dimension::dimensionless(), 1e-12));
    }

    fn register_standard_gases(&mut self) -> UnitsResult<()> {
        for (symbol, spec) in STANDARD_GASES {
            match spec {
                GasSpec::Base(species) => {
                    self.register_gas(symbol, species, 1.0);
                    if species != symbol {
                        self.insert_alias(species, symbol);
                    }
                }
                GasSpec::Derived {
                    factor,
                    of,
                    aliases,
                } => {
                    let base = self
                        .gases
                        .get(*of)
                        .ok_or_else(|| UnitsError::UnknownGas((*of).to_string()))?
                        .clone();
                    self.register_gas(symbol, &base.species, factor * base.scale);
                    for alias in *aliases {
                        self.insert_alias(alias, symbol);
                    }
                }
                GasSpec::Alias(of) => {
                    let canonical = self
                        .resolve_gas(of)
                        .ok_or_else(|| UnitsError::UnknownGas((*of).to_string()))?
                        .symbol
                        .clone();
                    self.insert_alias(symbol, &canonical);
                    self.add_uppercase_alias(symbol, &canonical);
                    continue;
                }
            }
            self.add_uppercase_alias(symbol, symbol);
        }
        Ok(())
    }

    fn register_gas(&mut self, symbol: &str, species: &str, scale: f64) {
        self.gases.insert(
            symbol.to_string(),
            GasInfo {
                symbol: symbol.to_string(),
                species: species.to_string(),
                scale,
            },
        );
        self.insert_unit(UnitInfo::new(symbol, Dimension::species(species), scale));
    }

    /// Registers the upper-cased spelling of a symbol so that e.g.
    /// `HFC4310MEE` resolves to `HFC4310mee`.
    fn add_uppercase_alias(&mut self, symbol: &str, canonical: &str) {
        let upper = symbol.to_uppercase();
        if upper != symbol && !self.units.contains_key(&upper) && !self.aliases.contains_key(&upper)
        {
            self.insert_alias(&upper, canonical);
        }
    }

    fn register_chemical_contexts(&mut self) {
        let contexts = [
            Context::new("CH4_conversions").with_transformation("methane", "carbon", 12.0 / 16.0),
            Context::new("N2O_conversions").with_transformation(
                "nitrous_oxide",
                "nitrogen",
                14.0 / 44.0,
            ),
            Context::new("NOx_conversions").with_transformation("nitrogen", "NOx", 46.0 / 14.0),
            Context::new("NH3_conversions").with_transformation("nitrogen", "NH3", 17.0 / 14.0),
        ];
        for context in contexts {
            self.contexts.insert(context.name().to_string(), context);
        }
    }

    /// Builds one conversion context per metric: each gas with a GWP gets a
    /// transformation from its species dimension to `carbon`.
    fn register_metric_contexts(&mut self) -> UnitsResult<()> {
        let co2_scale = self.co2_scale();
        let metric_names: Vec<String> =
            self.metrics.metric_names().map(str::to_string).collect();

        for metric in metric_names {
            let mut context = Context::new(&metric);
            let rows: Vec<(String, f64)> = self
                .metrics
                .rows(&metric)
                .map(|(gas, value)| (gas.to_string(), value))
                .collect();
            for (gas, gwp) in rows {
                let info = self
                    .resolve_gas(&gas)
                    .ok_or_else(|| UnitsError::UnknownGas(gas.clone()))?;
                if info.species == "carbon" {
                    continue;
                }
                // One base unit of the gas's species is worth
                // `gwp * co2_scale / scale` base units of carbon
                context.add_transformation(&info.species, "carbon", gwp * co2_scale / info.scale);
            }
            debug!("built metric context {metric}");
            self.contexts.insert(metric, context);
        }
        Ok(())
    }

    fn co2_scale(&self) -> f64 {
        self.gases
            .get("CO2")
            .map(|gas| gas.scale)
            .expect("CO2 is a standard gas")
    }

    // ------------------------------------------------------------------
    // Mixture registration
    // ------------------------------------------------------------------

    /// Registers a gas mixture as a new pseudo-unit.
    ///
    /// Validates the fraction table, checks that every constituent gas is
    /// registered (a zero-weighted unknown gas is still an error, to keep
    /// the definition auditable), registers the mixture's unit and species
    /// dimension, and extends every metric context whose table covers all
    /// constituents with the fraction-weighted mixture GWP.
    ///
    /// Registration is all-or-nothing: on error the registry is unchanged.
    ///
    /// # Errors
    ///
    /// - [`UnitsError::InvalidFractionTable`] if the fractions are not all
    ///   non-negative and summing to 1 within tolerance
    /// - [`UnitsError::UnknownGas`] if a constituent is not registered
    /// - [`UnitsError::DuplicateUnit`] if the name is already taken
    pub fn define_mixture(&mut self, mixture: Mixture) -> UnitsResult<()> {
        mixture.validate()?;

        let name = mixture.name().to_string();
        if self.units.contains_key(&name) || self.aliases.contains_key(&name) {
            return Err(UnitsError::DuplicateUnit(name));
        }
        for (gas, _) in mixture.constituents() {
            if self.resolve_gas(gas).is_none() {
                return Err(UnitsError::UnknownGas(gas.clone()));
            }
        }

        // All validation has passed; start mutating
        self.insert_unit(UnitInfo::new(&name, Dimension::species(&name), 1.0));
        self.add_uppercase_alias(&name, &name);

        if mixture.basis() == FractionBasis::Mass {
            self.derive_mixture_gwps(&mixture);
        } else {
            debug!(
                "not deriving GWPs for mole-basis mixture {}",
                mixture.name()
            );
        }
        self.mixtures.insert(name, mixture);
        Ok(())
    }

    /// Adds the fraction-weighted GWP of a mixture to each metric context
    /// that has values for all of its constituents.
    fn derive_mixture_gwps(&mut self, mixture: &Mixture) {
        let co2_scale = self.co2_scale();
        for metric in self.metrics.metric_names() {
            let mut total = 0.0;
            let mut missing = None;
            for (gas, fraction) in mixture.constituents() {
                let canonical = &self
                    .resolve_gas(gas)
                    .expect("constituents checked during registration")
                    .symbol;
                match self.metrics.gwp(metric, canonical) {
                    Some(gwp) => total += fraction * gwp,
                    None => {
                        missing = Some(gas.clone());
                        break;
                    }
                }
            }

            if let Some(gas) = missing {
                debug!(
                    "skipping mixture {} in {metric}: no value for constituent {gas}",
                    mixture.name()
                );
                continue;
            }

            debug!("derived {metric} GWP {total} for mixture {}", mixture.name());
            let context = self
                .contexts
                .get_mut(metric)
                .expect("metric contexts are built before mixtures");
            context.add_transformation(mixture.name(), "carbon", total * co2_scale);
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Returns true if the symbol resolves to a registered unit, alias,
    /// prefixed unit, or joint mass-gas symbol.
    #[must_use]
    pub fn knows_symbol(&self, symbol: &str) -> bool {
        self.resolve_component(symbol).is_some()
    }

    /// Looks up a registered gas by canonical symbol or alias.
    #[must_use]
    pub fn resolve_gas(&self, symbol: &str) -> Option<&GasInfo> {
        if let Some(gas) = self.gases.get(symbol) {
            return Some(gas);
        }
        let canonical = self.aliases.get(symbol)?;
        self.gases.get(canonical)
    }

    /// The registered mixture of the given name, if any.
    #[must_use]
    pub fn mixture(&self, name: &str) -> Option<&Mixture> {
        self.mixtures.get(name)
    }

    /// Iterates over the registered mixture names.
    pub fn mixture_names(&self) -> impl Iterator<Item = &str> {
        self.mixtures.keys().map(String::as_str)
    }

    /// The conversion context of the given name, if any.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// The registry's GWP metric table.
    #[must_use]
    pub fn metrics(&self) -> &MetricTable {
        &self.metrics
    }

    fn lookup_exact(&self, symbol: &str) -> Option<&UnitInfo> {
        if let Some(info) = self.units.get(symbol) {
            return Some(info);
        }
        let canonical = self.aliases.get(symbol)?;
        self.units.get(canonical)
    }

    /// Resolves a component symbol: exact match, alias, SI-prefixed
    /// physical unit, or joint mass-gas symbol.
    fn resolve_component(&self, symbol: &str) -> Option<Resolved> {
        if let Some(info) = self.lookup_exact(symbol) {
            return Some(Resolved {
                info: info.clone(),
                joint: None,
            });
        }
        if let Some(info) = self.lookup_prefixed(symbol) {
            return Some(Resolved { info, joint: None });
        }
        self.lookup_joint(symbol)
    }

    /// Attempts to parse a symbol as a prefixed physical unit, e.g.
    /// `kt = 1e3 t`. Gas and mixture units take the joint form instead.
    fn lookup_prefixed(&self, symbol: &str) -> Option<UnitInfo> {
        for (prefix, factor) in SI_PREFIXES {
            let Some(base_symbol) = symbol.strip_prefix(prefix) else {
                continue;
            };
            let Some(base) = self.lookup_exact(base_symbol) else {
                continue;
            };
            if base.dimension.species_exponents().next().is_some() {
                continue;
            }
            return Some(UnitInfo {
                name: symbol.to_string(),
                dimension: base.dimension.clone(),
                factor: base.factor * factor,
            });
        }
        None
    }

    /// Attempts to parse a joint mass-gas symbol such as `tC`, `gCH4` or
    /// `GtCO2`: an optional SI prefix, `g` or `t`, then a gas or mixture.
    fn lookup_joint(&self, symbol: &str) -> Option<Resolved> {
        let mut candidates: Vec<(&str, f64)> = Vec::new();
        for (prefix, factor) in SI_PREFIXES {
            if symbol.starts_with(prefix) {
                candidates.push((*prefix, *factor));
            }
        }
        candidates.push(("", 1.0));

        for (prefix, prefix_factor) in candidates {
            let rest = &symbol[prefix.len()..];
            for (mass_symbol, mass_factor) in [("g", 1e-3), ("t", 1e3)] {
                let Some(gas_symbol) = rest.strip_prefix(mass_symbol) else {
                    continue;
                };
                if gas_symbol.is_empty() {
                    continue;
                }
                let Some(gas) = self.lookup_exact(gas_symbol) else {
                    continue;
                };
                if !gas.dimension.is_pure_species() {
                    continue;
                }
                let mass_part = &symbol[..prefix.len() + mass_symbol.len()];
                return Some(Resolved {
                    info: UnitInfo {
                        name: symbol.to_string(),
                        dimension: Dimension::mass().multiply(&gas.dimension),
                        factor: prefix_factor * mass_factor * gas.factor,
                    },
                    joint: Some(JointSymbol {
                        mass_part: mass_part.to_string(),
                        gas: gas.name.clone(),
                    }),
                });
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Parsing and conversion
    // ------------------------------------------------------------------

    /// Parses a unit string.
    ///
    /// Every symbol must resolve against the registry, so typos fail here
    /// rather than at the first conversion.
    ///
    /// # Errors
    ///
    /// [`UnitsError::ParseFailed`] for malformed input and
    /// [`UnitsError::UnknownUnit`] for an unregistered symbol.
    pub fn parse_unit(&self, input: &str) -> UnitsResult<Unit> {
        let unit = parser::parse_unit(input, self)?;
        for symbol in unit.components().keys() {
            if !self.knows_symbol(symbol) {
                return Err(UnitsError::UnknownUnit(symbol.clone()));
            }
        }
        Ok(unit)
    }

    /// Parses a unit string and pairs it with a magnitude.
    pub fn quantity(&self, magnitude: f64, unit: &str) -> UnitsResult<Quantity> {
        Ok(Quantity::new(magnitude, self.parse_unit(unit)?))
    }

    /// Computes the physical dimension of a unit.
    pub fn dimension(&self, unit: &Unit) -> UnitsResult<Dimension> {
        let mut result = Dimension::dimensionless();
        for (symbol, &exp) in unit.components() {
            let resolved = self
                .resolve_component(symbol)
                .ok_or_else(|| UnitsError::UnknownUnit(symbol.clone()))?;
            result = result.multiply(&resolved.info.dimension.pow(exp));
        }
        Ok(result)
    }

    /// Computes the conversion factor from a unit to its base units.
    pub fn base_factor(&self, unit: &Unit) -> UnitsResult<f64> {
        let mut factor = 1.0;
        for (symbol, &exp) in unit.components() {
            let resolved = self
                .resolve_component(symbol)
                .ok_or_else(|| UnitsError::UnknownUnit(symbol.clone()))?;
            factor *= resolved.info.factor.powi(exp);
        }
        Ok(factor)
    }

    /// Calculates the factor converting values in `from` to values in `to`.
    ///
    /// # Errors
    ///
    /// Fails with [`UnitsError::IncompatibleDimensions`] when the dimensions
    /// differ; converting between species requires a context.
    pub fn conversion_factor(&self, from: &Unit, to: &Unit) -> UnitsResult<f64> {
        self.conversion_factor_with(from, to, None)
    }

    /// Like [`UnitRegistry::conversion_factor`], additionally allowing one
    /// species substitution defined by the named context.
    pub fn conversion_factor_in_context(
        &self,
        from: &Unit,
        to: &Unit,
        context: &str,
    ) -> UnitsResult<f64> {
        let context = self
            .contexts
            .get(context)
            .ok_or_else(|| UnitsError::UnknownContext(context.to_string()))?;
        self.conversion_factor_with(from, to, Some(context))
    }

    fn conversion_factor_with(
        &self,
        from: &Unit,
        to: &Unit,
        context: Option<&Context>,
    ) -> UnitsResult<f64> {
        let dim_from = self.dimension(from)?;
        let dim_to = self.dimension(to)?;
        let base = self.base_factor(from)? / self.base_factor(to)?;

        if dim_from.is_compatible(&dim_to) {
            return Ok(base);
        }

        if let Some(context) = context {
            if let Some(factor) = Self::species_bridge(&dim_from, &dim_to, context) {
                return Ok(base * factor);
            }
        }

        Err(UnitsError::IncompatibleDimensions {
            from_unit: from.to_string(),
            to_unit: to.to_string(),
            from: dim_from,
            to: dim_to,
        })
    }

    /// If `from` and `to` differ only by swapping one species for another
    /// and the context bridges that pair, returns the bridging factor.
    fn species_bridge(from: &Dimension, to: &Dimension, context: &Context) -> Option<f64> {
        let diff = from.divide(to);
        if diff.mass != 0 || diff.time != 0 {
            return None;
        }
        let exponents: Vec<(&str, i32)> = diff.species_exponents().collect();
        let (source, target) = match exponents.as_slice() {
            [(a, 1), (b, -1)] => (*a, *b),
            [(a, -1), (b, 1)] => (*b, *a),
            _ => return None,
        };
        context.factor(source, target)
    }

    /// Converts a quantity to the target unit.
    pub fn convert(&self, quantity: &Quantity, target: &str) -> UnitsResult<Quantity> {
        let to = self.parse_unit(target)?;
        let factor = self.conversion_factor(&quantity.unit, &to)?;
        Ok(Quantity::new(quantity.magnitude * factor, to))
    }

    /// Converts a quantity to the target unit within a named context.
    ///
    /// Metric names act as contexts, so
    /// `convert_in_context(&q, "kg CO2", "AR4GWP100")` converts an emission
    /// of any gas (or registered mixture) to CO2.
    pub fn convert_in_context(
        &self,
        quantity: &Quantity,
        target: &str,
        context: &str,
    ) -> UnitsResult<Quantity> {
        let to = self.parse_unit(target)?;
        let factor = self.conversion_factor_in_context(&quantity.unit, &to, context)?;
        Ok(Quantity::new(quantity.magnitude * factor, to))
    }

    // ------------------------------------------------------------------
    // Gas mixture resolver
    // ------------------------------------------------------------------

    /// Locates the single mixture species in a quantity's unit.
    ///
    /// Returns the mixture and the component symbol carrying it.
    fn resolve_mixture_component<'a>(
        &'a self,
        quantity: &'a Quantity,
    ) -> UnitsResult<(&'a Mixture, &'a str, Option<String>)> {
        let dimension = self.dimension(&quantity.unit)?;
        let mixture_species: Vec<(&str, i32)> = dimension
            .species_exponents()
            .filter(|(name, _)| self.mixtures.contains_key(*name))
            .collect();

        let (name, exponent) = match mixture_species.as_slice() {
            [] => {
                return Err(UnitsError::UnknownMixture(quantity.unit.to_string()));
            }
            [(name, exp)] => (*name, *exp),
            _ => {
                return Err(UnitsError::UnsupportedMixtureDimension {
                    unit: quantity.unit.to_string(),
                    reason: "more than one gas mixture in dimensions".to_string(),
                });
            }
        };
        if exponent != 1 {
            return Err(UnitsError::UnsupportedMixtureDimension {
                unit: quantity.unit.to_string(),
                reason: format!("mixture has dimensionality {exponent} != 1"),
            });
        }

        // Find the component symbol contributing the mixture species; for a
        // joint symbol like `GtCFC400` the constituents keep the mass part.
        for (symbol, _) in quantity.unit.components() {
            let resolved = self
                .resolve_component(symbol)
                .ok_or_else(|| UnitsError::UnknownUnit(symbol.clone()))?;
            if resolved.info.dimension.species_exponent(name) != 0 {
                let mixture = &self.mixtures[name];
                let mass_part = resolved.joint.map(|joint| joint.mass_part);
                return Ok((mixture, symbol.as_str(), mass_part));
            }
        }
        // The dimension said a mixture is present, so a component must carry it
        unreachable!("mixture species without a contributing component")
    }

    /// Splits a quantity in a mixture unit into constituent gas quantities.
    ///
    /// Each constituent has magnitude `quantity.magnitude * fraction` and
    /// the same unit with the mixture symbol replaced by the gas symbol, so
    /// mass is conserved: the constituent magnitudes sum to the input
    /// magnitude.
    ///
    /// # Errors
    ///
    /// - [`UnitsError::UnknownMixture`] if the unit contains no registered
    ///   mixture
    /// - [`UnitsError::UnsupportedMixtureDimension`] for more than one mixture or a
    ///   mixture exponent other than 1
    /// - [`UnitsError::InvalidFractionTable`] if the stored fraction table
    ///   no longer validates (re-checked defensively)
    ///
    /// # Example
    ///
    /// ```
    /// use scm_units::UnitRegistry;
    ///
    /// let registry = UnitRegistry::new();
    /// let q = registry.quantity(10.0, "kg HFC410a").unwrap();
    /// let parts = registry.split_gas_mixture(&q).unwrap();
    /// assert_eq!(parts.len(), 2);
    /// assert!((parts[0].magnitude - 5.0).abs() < 1e-12);
    /// ```
    pub fn split_gas_mixture(&self, quantity: &Quantity) -> UnitsResult<Vec<Quantity>> {
        let (mixture, component, mass_part) = self.resolve_mixture_component(quantity)?;
        mixture.validate()?;

        let constituents = mixture
            .constituents()
            .iter()
            .map(|(gas, fraction)| {
                let replacement = match &mass_part {
                    Some(mass) => format!("{mass}{gas}"),
                    None => gas.clone(),
                };
                Quantity::new(
                    quantity.magnitude * fraction,
                    quantity.unit.with_symbol_replaced(component, &replacement),
                )
            })
            .collect();
        Ok(constituents)
    }

    /// Converts a quantity in a mixture unit to CO2-equivalent under the
    /// given metric.
    ///
    /// The result magnitude is the fraction-weighted sum of constituent
    /// GWPs times the input magnitude; the result unit replaces the mixture
    /// symbol with `CO2`. There is no silent zero-substitution: a missing
    /// GWP for any constituent is an error, since an incomplete conversion
    /// must not understate emissions.
    ///
    /// # Errors
    ///
    /// Everything [`UnitRegistry::split_gas_mixture`] raises, plus
    /// [`UnitsError::UnknownMetric`] and [`UnitsError::MissingGwp`].
    ///
    /// # Example
    ///
    /// ```
    /// use scm_units::UnitRegistry;
    ///
    /// let registry = UnitRegistry::new();
    /// let q = registry.quantity(1.0, "kg HFC410a").unwrap();
    /// let co2e = registry.convert_to_co2_equivalent(&q, "AR5GWP100").unwrap();
    /// // 0.5 * 677 + 0.5 * 3170
    /// assert!((co2e.magnitude - 1923.5).abs() < 1e-9);
    /// ```
    pub fn convert_to_co2_equivalent(
        &self,
        quantity: &Quantity,
        metric: &str,
    ) -> UnitsResult<Quantity> {
        if !self.metrics.contains_metric(metric) {
            return Err(UnitsError::UnknownMetric(metric.to_string()));
        }

        let (mixture, component, mass_part) = self.resolve_mixture_component(quantity)?;
        mixture.validate()?;
        if mixture.basis() == FractionBasis::Mole {
            return Err(UnitsError::UnsupportedFractionBasis(
                mixture.name().to_string(),
            ));
        }

        let mut weighted_gwp = 0.0;
        for (gas, fraction) in mixture.constituents() {
            let canonical = &self
                .resolve_gas(gas)
                .ok_or_else(|| UnitsError::UnknownGas(gas.clone()))?
                .symbol;
            let gwp =
                self.metrics
                    .gwp(metric, canonical)
                    .ok_or_else(|| UnitsError::MissingGwp {
                        metric: metric.to_string(),
                        gas: gas.clone(),
                        mixture: mixture.name().to_string(),
                    })?;
            weighted_gwp += fraction * gwp;
        }

        let replacement = match &mass_part {
            Some(mass) => format!("{mass}CO2"),
            None => "CO2".to_string(),
        };
        Ok(Quantity::new(
            quantity.magnitude * weighted_gwp,
            quantity.unit.with_symbol_replaced(component, &replacement),
        ))
    }
}
