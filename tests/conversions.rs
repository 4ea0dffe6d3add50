//! End-to-end conversion tests against published GWP values.
//!
//! These tests pin the registry to the IPCC assessment-report numbers:
//! - single-gas conversions under each metric, across unit spellings
//! - molecular-weight context conversions
//! - refrigerant mixture GWPs derived from constituent fractions
//! - mixture splitting and CO2-equivalence

use approx::assert_relative_eq;
use scm_units::{FractionBasis, MetricTable, Mixture, Quantity, UnitRegistry, UnitsError};

/// Converts 1 `from` to `to` under `context` and returns the magnitude.
fn convert_one(registry: &UnitRegistry, from: &str, to: &str, context: &str) -> f64 {
    let q = registry.quantity(1.0, from).unwrap();
    registry.convert_in_context(&q, to, context).unwrap().magnitude
}

mod metric_conversions {
    use super::*;

    /// A gas converts to CO2 with its GWP in every unit spelling: bare gas,
    /// mass, and emission-rate forms.
    fn assert_gwp(registry: &UnitRegistry, gas: &str, metric: &str, gwp: f64) {
        let forms = [
            (format!("kg {gas}"), "kg CO2".to_string()),
            (format!("kg {gas} / yr"), "kg CO2 / yr".to_string()),
            (format!("Mt {gas}"), "Mt CO2".to_string()),
            (format!("Mt {gas} / yr"), "Mt CO2 / yr".to_string()),
        ];
        for (from, to) in forms {
            assert_relative_eq!(
                convert_one(registry, &from, &to, metric),
                gwp,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_sar_values() {
        let registry = UnitRegistry::new();
        assert_gwp(&registry, "CH4", "SARGWP100", 21.0);
        assert_gwp(&registry, "N2O", "SARGWP100", 310.0);
        assert_gwp(&registry, "SF6", "SARGWP100", 23900.0);
        assert_gwp(&registry, "CF4", "SARGWP100", 6500.0);
        assert_gwp(&registry, "C2F6", "SARGWP100", 9200.0);
        assert_gwp(&registry, "HFC32", "SARGWP100", 650.0);
    }

    #[test]
    fn test_ar4_values() {
        let registry = UnitRegistry::new();
        assert_gwp(&registry, "CH4", "AR4GWP100", 25.0);
        assert_gwp(&registry, "N2O", "AR4GWP100", 298.0);
        assert_gwp(&registry, "SF6", "AR4GWP100", 22800.0);
        assert_gwp(&registry, "C2F6", "AR4GWP100", 12200.0);
        assert_gwp(&registry, "HCFC142b", "AR4GWP100", 2310.0);
        assert_gwp(&registry, "cC4F8", "AR4GWP100", 10300.0);
        assert_gwp(&registry, "HFE356pcc3", "AR4GWP100", 413.0);
        assert_gwp(&registry, "CH2Cl2", "AR4GWP100", 8.7);
    }

    #[test]
    fn test_ar5_values() {
        let registry = UnitRegistry::new();
        assert_gwp(&registry, "CH4", "AR5GWP100", 28.0);
        assert_gwp(&registry, "C7F16", "AR5GWP100", 7820.0);
        assert_gwp(&registry, "C8F18", "AR5GWP100", 7620.0);
        assert_gwp(&registry, "SO2F2", "AR5GWP100", 4090.0);
    }

    #[test]
    fn test_ar6_values() {
        let registry = UnitRegistry::new();
        assert_gwp(&registry, "CH4", "AR6GWP100", 27.9);
        assert_gwp(&registry, "N2O", "AR6GWP100", 273.0);
        assert_gwp(&registry, "SF6", "AR6GWP100", 25200.0);
    }

    /// GWP conversions are linear in the magnitude.
    #[test]
    fn test_linearity() {
        let registry = UnitRegistry::new();
        for magnitude in [0.0, 0.5, 3.0, 1e6] {
            let q = registry.quantity(magnitude, "kg CH4").unwrap();
            let co2e = registry
                .convert_in_context(&q, "kg CO2", "AR4GWP100")
                .unwrap();
            assert_relative_eq!(co2e.magnitude, magnitude * 25.0, max_relative = 1e-12);
        }
    }

    /// Round-tripping through CO2 and back is the identity.
    #[test]
    fn test_round_trip() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(7.3, "Mt N2O / yr").unwrap();
        let co2e = registry
            .convert_in_context(&q, "Mt CO2 / yr", "AR4GWP100")
            .unwrap();
        let back = registry
            .convert_in_context(&co2e, "Mt N2O / yr", "AR4GWP100")
            .unwrap();
        assert_relative_eq!(back.magnitude, q.magnitude, max_relative = 1e-12);
    }

    /// Without a context the species keep gases apart.
    #[test]
    fn test_no_context_no_conversion() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(1.0, "kg CH4").unwrap();
        assert!(matches!(
            registry.convert(&q, "kg CO2"),
            Err(UnitsError::IncompatibleDimensions { .. })
        ));
    }
}

mod chemical_contexts {
    use super::*;

    #[test]
    fn test_methane_to_carbon() {
        let registry = UnitRegistry::new();
        assert_relative_eq!(
            convert_one(&registry, "kg CH4", "kg C", "CH4_conversions"),
            12.0 / 16.0
        );
    }

    #[test]
    fn test_nox_to_nitrogen() {
        let registry = UnitRegistry::new();
        assert_relative_eq!(
            convert_one(&registry, "kg NOx", "kg N", "NOx_conversions"),
            14.0 / 46.0,
            max_relative = 1e-12
        );
        // NO2 shares the nitrogen dimension, no context needed
        let q = registry.quantity(1.0, "kg NO2").unwrap();
        let n = registry.convert(&q, "kg N").unwrap();
        assert_relative_eq!(n.magnitude, 14.0 / 46.0);
    }

    #[test]
    fn test_ammonia_to_nitrogen() {
        let registry = UnitRegistry::new();
        assert_relative_eq!(
            convert_one(&registry, "kg NH3", "kg N", "NH3_conversions"),
            14.0 / 17.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_nitrous_oxide_to_nitrogen() {
        let registry = UnitRegistry::new();
        assert_relative_eq!(
            convert_one(&registry, "kg N2O", "kg N", "N2O_conversions"),
            14.0 / 44.0
        );
    }
}

mod mixtures {
    use super::*;

    /// Derived mixture GWPs match the fraction-weighted constituent values.
    #[test]
    fn test_ar4_mixture_gwps() {
        let registry = UnitRegistry::new();
        let expected = [
            ("CFC400", 0.5 * 10900.0 + 0.5 * 10000.0),
            ("HFC404a", 0.44 * 3500.0 + 0.52 * 4470.0 + 0.04 * 1430.0),
            ("HFC410a", 0.5 * 675.0 + 0.5 * 3500.0),
            ("HFC507a", 0.5 * 3500.0 + 0.5 * 4470.0),
            (
                "HFC458a",
                0.205 * 675.0 + 0.04 * 3500.0 + 0.615 * 1430.0 + 0.135 * 3220.0 + 0.005 * 9810.0,
            ),
            ("HCFC500", 0.738 * 10900.0 + 0.262 * 124.0),
            ("HCFC502", 0.488 * 1810.0 + 0.512 * 7370.0),
            ("HCFC503", 0.401 * 14800.0 + 0.599 * 14400.0),
            ("HCFC509a", 0.44 * 1810.0 + 0.56 * 8830.0),
        ];
        for (mixture, gwp) in expected {
            assert_relative_eq!(
                convert_one(&registry, &format!("kg {mixture}"), "kg CO2", "AR4GWP100"),
                gwp,
                max_relative = 1e-9
            );
        }
    }

    /// The R-410A scenario: 1 kg of HFC410a under AR5 is 1923.5 kg CO2e.
    #[test]
    fn test_hfc410a_ar5_scenario() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(1.0, "kg HFC410a").unwrap();

        let co2e = registry.convert_to_co2_equivalent(&q, "AR5GWP100").unwrap();
        assert_relative_eq!(co2e.magnitude, 1923.5);
        assert_eq!(co2e.unit, registry.parse_unit("kg CO2").unwrap());

        // the metric context agrees with the resolver
        let via_context = registry
            .convert_in_context(&q, "kg CO2", "AR5GWP100")
            .unwrap();
        assert_relative_eq!(via_context.magnitude, co2e.magnitude, max_relative = 1e-12);
    }

    #[test]
    fn test_split_hfc410a() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(10.0, "kg HFC410a").unwrap();
        let parts = registry.split_gas_mixture(&q).unwrap();

        assert_eq!(parts.len(), 2);
        assert_relative_eq!(parts[0].magnitude, 5.0);
        assert_eq!(parts[0].unit, registry.parse_unit("kg HFC32").unwrap());
        assert_relative_eq!(parts[1].magnitude, 5.0);
        assert_eq!(parts[1].unit, registry.parse_unit("kg HFC125").unwrap());
    }

    /// Splitting conserves mass across every built-in blend.
    #[test]
    fn test_split_conserves_mass() {
        let registry = UnitRegistry::new();
        let names: Vec<String> = registry.mixture_names().map(str::to_string).collect();
        for name in names {
            let q = registry.quantity(1.0, &format!("kg {name} / yr")).unwrap();
            let parts = registry.split_gas_mixture(&q).unwrap();
            let total: f64 = parts.iter().map(|p| p.magnitude).sum();
            assert_relative_eq!(total, 1.0, max_relative = 1e-6);
        }
    }

    /// Splitting a constituent's quantity further must fail cleanly.
    #[test]
    fn test_split_constituent_is_not_a_mixture() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(10.0, "kg HFC410a").unwrap();
        let parts = registry.split_gas_mixture(&q).unwrap();
        assert!(matches!(
            registry.split_gas_mixture(&parts[0]),
            Err(UnitsError::UnknownMixture(_))
        ));
    }

    /// CO2-equivalence is all-or-nothing: one constituent without a value
    /// under the metric fails the whole conversion.
    #[test]
    fn test_missing_constituent_gwp() {
        let registry = UnitRegistry::new();
        // HCFC503 contains CFC13, which SAR does not assess
        let q = registry.quantity(1.0, "kg HCFC503").unwrap();
        let err = registry
            .convert_to_co2_equivalent(&q, "SARGWP100")
            .unwrap_err();
        assert!(matches!(err, UnitsError::MissingGwp { .. }));

        // and the metric context has no entry for it either
        assert!(registry
            .convert_in_context(&q, "kg CO2", "SARGWP100")
            .is_err());
    }

    /// Blends with hydrocarbon constituents are registered and splittable
    /// but cannot be converted to CO2-equivalent, since no assessment
    /// report assigns hydrocarbons a GWP.
    #[test]
    fn test_hydrocarbon_blends_unconvertible() {
        let registry = UnitRegistry::new();
        for name in ["HCFC402a", "HCFC402b", "HCFC403a", "HCFC403b", "HCFC406a"] {
            assert!(registry.mixture(name).is_some(), "missing {name}");
            let q = registry.quantity(1.0, &format!("kg {name}")).unwrap();
            let parts = registry.split_gas_mixture(&q).unwrap();
            let total: f64 = parts.iter().map(|p| p.magnitude).sum();
            assert_relative_eq!(total, 1.0, max_relative = 1e-6);

            for metric in scm_units::BUILTIN_METRICS {
                assert!(
                    matches!(
                        registry.convert_to_co2_equivalent(&q, metric),
                        Err(UnitsError::MissingGwp { .. })
                    ),
                    "{name} should not convert under {metric}"
                );
            }
        }
    }

    /// User-defined mixtures participate in every operation.
    #[test]
    fn test_user_defined_mixture() {
        let mut registry = UnitRegistry::new();
        registry
            .define_mixture(Mixture::new(
                "GreenBlend",
                vec![
                    ("HFC32".to_string(), 0.7),
                    ("HFO1234yf".to_string(), 0.3),
                ],
            ))
            .unwrap();

        let q = registry.quantity(4.0, "t GreenBlend").unwrap();
        let parts = registry.split_gas_mixture(&q).unwrap();
        assert_relative_eq!(parts[0].magnitude, 2.8);
        assert_relative_eq!(parts[1].magnitude, 1.2);

        // HFO1234yf has no AR4 value, so no AR4 CO2e for the blend
        assert!(matches!(
            registry.convert_to_co2_equivalent(&q, "AR4GWP100"),
            Err(UnitsError::MissingGwp { .. })
        ));
    }

    #[test]
    fn test_mole_basis_mixture_split_only() {
        let mut registry = UnitRegistry::new();
        registry
            .define_mixture(
                Mixture::new(
                    "MoleBlend",
                    vec![("HFC32".to_string(), 0.5), ("HFC125".to_string(), 0.5)],
                )
                .with_basis(FractionBasis::Mole),
            )
            .unwrap();

        let q = registry.quantity(1.0, "kg MoleBlend").unwrap();
        assert!(registry.split_gas_mixture(&q).is_ok());
        assert!(matches!(
            registry.convert_to_co2_equivalent(&q, "AR4GWP100"),
            Err(UnitsError::UnsupportedFractionBasis(_))
        ));
    }
}

mod custom_metric_tables {
    use super::*;

    #[test]
    fn test_toml_metric_table() {
        let table = MetricTable::from_toml_str(
            r#"
            [TestCustomContext]
            CO2 = 1.0
            CH4 = 22.0
            N2O = 345.0

            [SARGWP100]
            CO2 = 1.0
            CH4 = 21.0
            N2O = 310.0
            "#,
        )
        .unwrap();
        let registry = UnitRegistry::with_metric_table(table).unwrap();

        assert_relative_eq!(
            convert_one(&registry, "kg CH4", "kg CO2", "TestCustomContext"),
            22.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            convert_one(&registry, "kg N2O", "kg CO2", "TestCustomContext"),
            345.0,
            max_relative = 1e-12
        );
        // the co-loaded standard metric works alongside the custom one
        assert_relative_eq!(
            convert_one(&registry, "kg CH4", "kg CO2", "SARGWP100"),
            21.0,
            max_relative = 1e-12
        );
        // metrics absent from the custom table are unknown
        assert!(matches!(
            registry.convert_in_context(
                &registry.quantity(1.0, "kg CH4").unwrap(),
                "kg CO2",
                "AR4GWP100"
            ),
            Err(UnitsError::UnknownContext(_))
        ));
    }

    #[test]
    fn test_unknown_gas_in_table_is_fatal() {
        let table = MetricTable::from_toml_str(
            r#"
            [Custom]
            NotAGas = 100.0
            "#,
        )
        .unwrap();
        assert!(matches!(
            UnitRegistry::with_metric_table(table),
            Err(UnitsError::UnknownGas(_))
        ));
    }
}

mod quantities {
    use super::*;

    #[test]
    fn test_quantity_display_round_trip() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(2.5, "Mt CH4 / yr").unwrap();
        let reparsed: Quantity = registry
            .quantity(q.magnitude, &q.unit.to_string())
            .unwrap();
        assert_eq!(q, reparsed);
    }

    /// Typos fail when the quantity is built, not at the first conversion.
    #[test]
    fn test_unknown_units_fail_at_construction() {
        let registry = UnitRegistry::new();
        assert!(matches!(
            registry.quantity(1.0, "kg CH5"),
            Err(UnitsError::UnknownUnit(_))
        ));
        assert!(matches!(
            registry.quantity(1.0, "kg CH4 / fortnight"),
            Err(UnitsError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_joint_symbols_match_spelled_out_units() {
        let registry = UnitRegistry::new();
        let joint = registry.quantity(1.0, "GtC / yr").unwrap();
        let spelled = registry.convert(&joint, "Gt C / yr").unwrap();
        assert_relative_eq!(spelled.magnitude, 1.0);
    }
}
