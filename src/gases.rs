//! Standard greenhouse-gas and pollutant species definitions.
//!
//! Each entry either introduces a new species dimension (base gas), scales
//! onto an existing gas via a molecular-weight ratio (derived gas), or names
//! an alias for another gas. For example `CO2` is mass-convertible to `C`
//! (12/44), while `CH4` lives in its own `methane` dimension and can only be
//! reached from carbon through a conversion context.

/// How a gas symbol is defined relative to the rest of the registry.
#[derive(Debug, Clone, Copy)]
pub(crate) enum GasSpec {
    /// Introduces a new species dimension with the given name.
    Base(&'static str),
    /// A scaled version of another gas: 1 unit of this gas equals
    /// `factor` units of `of`.
    Derived {
        factor: f64,
        of: &'static str,
        aliases: &'static [&'static str],
    },
    /// Another name for an existing gas.
    Alias(&'static str),
}

/// The standard gas table.
///
/// Ordering matters: derived gases and aliases must come after the gas they
/// reference.
pub(crate) const STANDARD_GASES: &[(&str, GasSpec)] = &[
    // CO2, CH4, N2O
    ("C", GasSpec::Base("carbon")),
    (
        "CO2",
        GasSpec::Derived {
            factor: 12.0 / 44.0,
            of: "C",
            aliases: &["carbon_dioxide"],
        },
    ),
    ("CH4", GasSpec::Base("methane")),
    ("HC50", GasSpec::Alias("CH4")),
    ("N2O", GasSpec::Base("nitrous_oxide")),
    (
        "N2ON",
        GasSpec::Derived {
            factor: 44.0 / 28.0,
            of: "N2O",
            aliases: &["nitrous_oxide_farming_style"],
        },
    ),
    ("N", GasSpec::Base("nitrogen")),
    (
        "NO2",
        GasSpec::Derived {
            factor: 14.0 / 46.0,
            of: "N",
            aliases: &["nitrogen_dioxide"],
        },
    ),
    // aerosol precursors
    ("NOx", GasSpec::Base("NOx")),
    ("nox", GasSpec::Alias("NOx")),
    ("NH3", GasSpec::Base("NH3")),
    ("ammonia", GasSpec::Alias("NH3")),
    ("S", GasSpec::Base("sulfur")),
    (
        "SO2",
        GasSpec::Derived {
            factor: 32.0 / 64.0,
            of: "S",
            aliases: &["sulfur_dioxide"],
        },
    ),
    ("SOx", GasSpec::Alias("SO2")),
    ("BC", GasSpec::Base("black_carbon")),
    ("OC", GasSpec::Base("OC")),
    ("CO", GasSpec::Base("carbon_monoxide")),
    ("VOC", GasSpec::Base("VOC")),
    (
        "NMVOC",
        GasSpec::Derived {
            factor: 1.0,
            of: "VOC",
            aliases: &["non_methane_volatile_organic_compounds"],
        },
    ),
    // hydrocarbons; no GWP rows, but they appear in refrigerant blends
    ("C2H6", GasSpec::Base("ethane")),
    ("HC170", GasSpec::Alias("C2H6")),
    ("C3H8", GasSpec::Base("propane")),
    ("HC290", GasSpec::Alias("C3H8")),
    ("HC600", GasSpec::Base("HC600")),
    ("butane", GasSpec::Alias("HC600")),
    ("HC600a", GasSpec::Base("HC600a")),
    ("isobutane", GasSpec::Alias("HC600a")),
    ("HC601", GasSpec::Base("HC601")),
    ("pentane", GasSpec::Alias("HC601")),
    ("HC601a", GasSpec::Base("HC601a")),
    ("isopentane", GasSpec::Alias("HC601a")),
    ("HO1270", GasSpec::Base("HO1270")),
    ("propene", GasSpec::Alias("HO1270")),
    // CFCs
    ("CFC11", GasSpec::Base("CFC11")),
    ("CFC12", GasSpec::Base("CFC12")),
    ("CFC13", GasSpec::Base("CFC13")),
    ("CFC113", GasSpec::Base("CFC113")),
    ("CFC114", GasSpec::Base("CFC114")),
    ("CFC115", GasSpec::Base("CFC115")),
    // HCFCs
    ("HCFC21", GasSpec::Base("HCFC21")),
    ("HCFC22", GasSpec::Base("HCFC22")),
    ("HCFC123", GasSpec::Base("HCFC123")),
    ("HCFC124", GasSpec::Base("HCFC124")),
    ("HCFC141b", GasSpec::Base("HCFC141b")),
    ("HCFC142b", GasSpec::Base("HCFC142b")),
    ("HCFC225ca", GasSpec::Base("HCFC225ca")),
    ("HCFC225cb", GasSpec::Base("HCFC225cb")),
    // HFCs
    ("HFC23", GasSpec::Base("HFC23")),
    ("HFC32", GasSpec::Base("HFC32")),
    ("HFC41", GasSpec::Base("HFC41")),
    ("HFC125", GasSpec::Base("HFC125")),
    ("HFC134", GasSpec::Base("HFC134")),
    ("HFC134a", GasSpec::Base("HFC134a")),
    ("HFC143", GasSpec::Base("HFC143")),
    ("HFC143a", GasSpec::Base("HFC143a")),
    ("HFC152a", GasSpec::Base("HFC152a")),
    ("HFC161", GasSpec::Base("HFC161")),
    ("HFC227ea", GasSpec::Base("HFC227ea")),
    ("HFC236cb", GasSpec::Base("HFC236cb")),
    ("HFC236ea", GasSpec::Base("HFC236ea")),
    ("HFC236fa", GasSpec::Base("HFC236fa")),
    ("HFC245ca", GasSpec::Base("HFC245ca")),
    ("HFC245fa", GasSpec::Base("HFC245fa")),
    ("HFC365mfc", GasSpec::Base("HFC365mfc")),
    ("HFC4310mee", GasSpec::Base("HFC4310mee")),
    ("HFC4310", GasSpec::Alias("HFC4310mee")),
    // Halons
    ("Halon1211", GasSpec::Base("Halon1211")),
    ("Halon1301", GasSpec::Base("Halon1301")),
    ("Halon2402", GasSpec::Base("Halon2402")),
    // PFCs
    ("CF4", GasSpec::Base("CF4")),
    ("C2F6", GasSpec::Base("C2F6")),
    ("PFC116", GasSpec::Alias("C2F6")),
    ("C3F8", GasSpec::Base("C3F8")),
    ("PFC218", GasSpec::Alias("C3F8")),
    ("cC4F8", GasSpec::Base("cC4F8")),
    ("PFCC318", GasSpec::Alias("cC4F8")),
    ("C4F10", GasSpec::Base("C4F10")),
    ("C5F12", GasSpec::Base("C5F12")),
    ("C6F14", GasSpec::Base("C6F14")),
    ("C7F16", GasSpec::Base("C7F16")),
    ("C8F18", GasSpec::Base("C8F18")),
    // Fluorinated ethers
    ("HFE356pcc3", GasSpec::Base("HFE356pcc3")),
    // Hydrofluoroolefins
    ("HFO1234yf", GasSpec::Base("HFO1234yf")),
    ("HFO1234ze", GasSpec::Base("HFO1234ze")),
    // Misc
    ("CCl4", GasSpec::Base("CCl4")),
    ("CHCl3", GasSpec::Base("CHCl3")),
    ("CH2Cl2", GasSpec::Base("CH2Cl2")),
    ("CH3CCl3", GasSpec::Base("CH3CCl3")),
    ("CH3Cl", GasSpec::Base("CH3Cl")),
    ("CH3Br", GasSpec::Base("CH3Br")),
    ("SF5CF3", GasSpec::Base("SF5CF3")),
    ("SF6", GasSpec::Base("SF6")),
    ("SO2F2", GasSpec::Base("SO2F2")),
    ("NF3", GasSpec::Base("NF3")),
];
