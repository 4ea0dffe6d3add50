//! Global Warming Potential metric tables.
//!
//! A [`MetricTable`] maps `(metric, gas) -> GWP` where the GWP is the
//! dimensionless CO2-equivalence factor of one kilogram of the gas over the
//! metric's time horizon. The built-in table covers the 100-year GWPs of the
//! IPCC Second (SAR), Fourth (AR4), Fifth (AR5) and Sixth (AR6) Assessment
//! Reports for the standard gases.
//!
//! Custom tables can be loaded from TOML, one table per metric:
//!
//! ```toml
//! [TestCustomContext]
//! CH4 = 22.0
//! N2O = 345.0
//! ```

use crate::errors::{UnitsError, UnitsResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metric names of the built-in table, in assessment-report order.
pub const BUILTIN_METRICS: &[&str] = &["SARGWP100", "AR4GWP100", "AR5GWP100", "AR6GWP100"];

/// One gas row of the built-in table: 100-year GWPs per assessment report.
/// `None` means the report does not provide a value for that gas.
struct GwpRow {
    gas: &'static str,
    sar: Option<f64>,
    ar4: Option<f64>,
    ar5: Option<f64>,
    ar6: Option<f64>,
}

const fn row(
    gas: &'static str,
    sar: Option<f64>,
    ar4: Option<f64>,
    ar5: Option<f64>,
    ar6: Option<f64>,
) -> GwpRow {
    GwpRow {
        gas,
        sar,
        ar4,
        ar5,
        ar6,
    }
}

/// Built-in 100-year GWP values.
///
/// Sources: IPCC SAR Table 2.9, AR4 Table 2.14, AR5 Table 8.A.1,
/// AR6 Table 7.SM.7. One row per species dimension; derived gases
/// (e.g. N2ON) pick up the value of their base gas automatically.
#[rustfmt::skip]
const GWP_ROWS: &[GwpRow] = &[
    row("CO2",        Some(1.0),     Some(1.0),     Some(1.0),     Some(1.0)),
    row("CH4",        Some(21.0),    Some(25.0),    Some(28.0),    Some(27.9)),
    row("N2O",        Some(310.0),   Some(298.0),   Some(265.0),   Some(273.0)),
    // CFCs
    row("CFC11",      Some(3800.0),  Some(4750.0),  Some(4660.0),  Some(6230.0)),
    row("CFC12",      Some(8100.0),  Some(10900.0), Some(10200.0), Some(12500.0)),
    row("CFC13",      None,          Some(14400.0), Some(13900.0), Some(16200.0)),
    row("CFC113",     Some(4800.0),  Some(6130.0),  Some(5820.0),  Some(6520.0)),
    row("CFC114",     None,          Some(10000.0), Some(8590.0),  Some(9430.0)),
    row("CFC115",     None,          Some(7370.0),  Some(7670.0),  Some(9600.0)),
    // HCFCs
    row("HCFC21",     None,          Some(151.0),   Some(148.0),   Some(160.0)),
    row("HCFC22",     Some(1500.0),  Some(1810.0),  Some(1760.0),  Some(1960.0)),
    row("HCFC123",    Some(90.0),    Some(77.0),    Some(79.0),    Some(90.4)),
    row("HCFC124",    Some(470.0),   Some(609.0),   Some(527.0),   Some(597.0)),
    row("HCFC141b",   None,          Some(725.0),   Some(782.0),   Some(860.0)),
    row("HCFC142b",   Some(1800.0),  Some(2310.0),  Some(1980.0),  Some(2300.0)),
    row("HCFC225ca",  None,          Some(122.0),   Some(127.0),   Some(137.0)),
    row("HCFC225cb",  None,          Some(595.0),   Some(525.0),   Some(568.0)),
    // HFCs
    row("HFC23",      Some(11700.0), Some(14800.0), Some(12400.0), Some(14600.0)),
    row("HFC32",      Some(650.0),   Some(675.0),   Some(677.0),   Some(771.0)),
    row("HFC41",      Some(150.0),   Some(92.0),    Some(116.0),   Some(135.0)),
    row("HFC125",     Some(2800.0),  Some(3500.0),  Some(3170.0),  Some(3740.0)),
    row("HFC134",     Some(1000.0),  Some(1100.0),  Some(1120.0),  Some(1260.0)),
    row("HFC134a",    Some(1300.0),  Some(1430.0),  Some(1300.0),  Some(1530.0)),
    row("HFC143",     Some(300.0),   Some(353.0),   Some(328.0),   Some(364.0)),
    row("HFC143a",    Some(3800.0),  Some(4470.0),  Some(4800.0),  Some(5810.0)),
    row("HFC152a",    Some(140.0),   Some(124.0),   Some(138.0),   Some(164.0)),
    row("HFC161",     None,          Some(12.0),    Some(4.0),     Some(4.84)),
    row("HFC227ea",   Some(2900.0),  Some(3220.0),  Some(3350.0),  Some(3600.0)),
    row("HFC236cb",   None,          Some(1340.0),  Some(1210.0),  Some(1350.0)),
    row("HFC236ea",   None,          Some(1370.0),  Some(1330.0),  Some(1500.0)),
    row("HFC236fa",   Some(6300.0),  Some(9810.0),  Some(8060.0),  Some(8690.0)),
    row("HFC245ca",   Some(560.0),   Some(693.0),   Some(716.0),   Some(787.0)),
    row("HFC245fa",   None,          Some(1030.0),  Some(858.0),   Some(962.0)),
    row("HFC365mfc",  None,          Some(794.0),   Some(804.0),   Some(914.0)),
    row("HFC4310mee", Some(1300.0),  Some(1640.0),  Some(1650.0),  Some(1600.0)),
    // Halons
    row("Halon1211",  None,          Some(1890.0),  Some(1750.0),  Some(1930.0)),
    row("Halon1301",  Some(5400.0),  Some(7140.0),  Some(6290.0),  Some(7200.0)),
    row("Halon2402",  None,          Some(1640.0),  Some(1470.0),  Some(2170.0)),
    // PFCs
    row("CF4",        Some(6500.0),  Some(7390.0),  Some(6630.0),  Some(7380.0)),
    row("C2F6",       Some(9200.0),  Some(12200.0), Some(11100.0), Some(12400.0)),
    row("C3F8",       Some(7000.0),  Some(8830.0),  Some(8900.0),  Some(9290.0)),
    row("cC4F8",      Some(8700.0),  Some(10300.0), Some(9540.0),  Some(10200.0)),
    row("C4F10",      Some(7000.0),  Some(8860.0),  Some(9200.0),  Some(10000.0)),
    row("C5F12",      Some(7500.0),  Some(9160.0),  Some(8550.0),  Some(9220.0)),
    row("C6F14",      Some(7400.0),  Some(9300.0),  Some(7910.0),  Some(8620.0)),
    row("C7F16",      None,          None,          Some(7820.0),  Some(8410.0)),
    row("C8F18",      None,          None,          Some(7620.0),  Some(8260.0)),
    // Fluorinated ethers
    row("HFE356pcc3", None,          Some(413.0),   Some(413.0),   None),
    // Misc
    row("SF6",        Some(23900.0), Some(22800.0), Some(23500.0), Some(25200.0)),
    row("NF3",        None,          Some(17200.0), Some(16100.0), Some(17400.0)),
    row("SF5CF3",     None,          Some(17700.0), Some(17400.0), Some(18500.0)),
    row("SO2F2",      None,          Some(4740.0),  Some(4090.0),  Some(4630.0)),
    row("CCl4",       Some(1400.0),  Some(1400.0),  Some(1730.0),  Some(2200.0)),
    row("CH2Cl2",     Some(9.0),     Some(8.7),     Some(9.0),     Some(11.2)),
    row("CHCl3",      Some(4.0),     Some(31.0),    Some(16.0),    Some(20.6)),
    row("CH3CCl3",    Some(100.0),   Some(146.0),   Some(160.0),   Some(161.0)),
    row("CH3Cl",      None,          Some(13.0),    Some(12.0),    Some(5.54)),
    row("CH3Br",      Some(5.0),     Some(5.0),     Some(2.0),     Some(2.43)),
];

/// A read-only lookup table of GWP values, keyed by metric then gas symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricTable {
    metrics: BTreeMap<String, BTreeMap<String, f64>>,
}

impl MetricTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of assessment-report 100-year GWPs.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for r in GWP_ROWS {
            for (metric, value) in BUILTIN_METRICS
                .iter()
                .zip([r.sar, r.ar4, r.ar5, r.ar6])
            {
                if let Some(value) = value {
                    table.insert(metric, r.gas, value);
                }
            }
        }
        table
    }

    /// Loads a table from a TOML document with one section per metric.
    ///
    /// # Errors
    ///
    /// Returns [`UnitsError::InvalidMetricTable`] if the document cannot be
    /// parsed, is empty, or contains a non-finite or non-positive value.
    /// Load failures are fatal configuration errors; no partial table is
    /// ever returned.
    pub fn from_toml_str(doc: &str) -> UnitsResult<Self> {
        let metrics: BTreeMap<String, BTreeMap<String, f64>> = toml::from_str(doc)
            .map_err(|e| UnitsError::InvalidMetricTable(e.to_string()))?;

        if metrics.is_empty() {
            return Err(UnitsError::InvalidMetricTable(
                "no metrics defined".to_string(),
            ));
        }
        for (metric, gases) in &metrics {
            if gases.is_empty() {
                return Err(UnitsError::InvalidMetricTable(format!(
                    "metric '{metric}' has no gas entries"
                )));
            }
            for (gas, value) in gases {
                if !value.is_finite() || *value <= 0.0 {
                    return Err(UnitsError::InvalidMetricTable(format!(
                        "metric '{metric}', gas '{gas}': value {value} must be finite and positive"
                    )));
                }
            }
        }

        Ok(Self { metrics })
    }

    /// Inserts a single value.
    pub fn insert(&mut self, metric: &str, gas: &str, value: f64) {
        self.metrics
            .entry(metric.to_string())
            .or_default()
            .insert(gas.to_string(), value);
    }

    /// Looks up the GWP of a gas under a metric.
    #[must_use]
    pub fn gwp(&self, metric: &str, gas: &str) -> Option<f64> {
        self.metrics.get(metric)?.get(gas).copied()
    }

    /// Returns true if the metric is present in the table.
    #[must_use]
    pub fn contains_metric(&self, metric: &str) -> bool {
        self.metrics.contains_key(metric)
    }

    /// Iterates over the metric names.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    /// Iterates over the `(gas, value)` rows of one metric.
    pub fn rows(&self, metric: &str) -> impl Iterator<Item = (&str, f64)> {
        self.metrics
            .get(metric)
            .into_iter()
            .flat_map(|gases| gases.iter().map(|(gas, &value)| (gas.as_str(), value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_builtin_lookup() {
        let table = MetricTable::builtin();
        assert!(is_close!(table.gwp("AR4GWP100", "CH4").unwrap(), 25.0));
        assert!(is_close!(table.gwp("SARGWP100", "N2O").unwrap(), 310.0));
        assert!(is_close!(table.gwp("AR5GWP100", "HFC32").unwrap(), 677.0));
    }

    #[test]
    fn test_builtin_missing_entries() {
        let table = MetricTable::builtin();
        // C7F16 was first assessed in AR5
        assert!(table.gwp("AR4GWP100", "C7F16").is_none());
        assert!(table.gwp("AR5GWP100", "C7F16").is_some());
    }

    #[test]
    fn test_builtin_metric_names() {
        let table = MetricTable::builtin();
        for metric in BUILTIN_METRICS {
            assert!(table.contains_metric(metric), "missing {metric}");
        }
        assert!(!table.contains_metric("AR0GWP100"));
    }

    #[test]
    fn test_from_toml() {
        let table = MetricTable::from_toml_str(
            r#"
            [TestCustomContext]
            CH4 = 22.0
            N2O = 345.0
            "#,
        )
        .unwrap();
        assert!(is_close!(table.gwp("TestCustomContext", "CH4").unwrap(), 22.0));
        assert!(is_close!(
            table.gwp("TestCustomContext", "N2O").unwrap(),
            345.0
        ));
    }

    #[test]
    fn test_from_toml_rejects_malformed() {
        assert!(matches!(
            MetricTable::from_toml_str("not toml ["),
            Err(UnitsError::InvalidMetricTable(_))
        ));
        assert!(matches!(
            MetricTable::from_toml_str(""),
            Err(UnitsError::InvalidMetricTable(_))
        ));
        // values must be positive; a zero GWP would silently understate
        // emissions equivalence
        assert!(matches!(
            MetricTable::from_toml_str("[M]\nCH4 = 0.0"),
            Err(UnitsError::InvalidMetricTable(_))
        ));
        assert!(matches!(
            MetricTable::from_toml_str("[M]\nCH4 = nan"),
            Err(UnitsError::InvalidMetricTable(_))
        ));
    }

    #[test]
    fn test_rows_iteration() {
        let table = MetricTable::builtin();
        let rows: Vec<_> = table.rows("SARGWP100").collect();
        assert!(rows.iter().any(|(gas, v)| *gas == "SF6" && *v == 23900.0));
        assert!(table.rows("NoSuchMetric").next().is_none());
    }
}
