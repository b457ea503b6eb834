//! Replacing the builtin tables with deployment-specific JSON files

use std::fs;
use std::path::PathBuf;

use hazard_zones_core::{
    compute, GeoPoint, HazardRegistries, RegistryError, Scenario, SubstanceRegistry,
    ThresholdRegistry,
};

/// Write `contents` to a uniquely named file in the temp dir
fn temp_table(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "hazard-zones-{}-{}.json",
        std::process::id(),
        name
    ));
    fs::write(&path, contents).unwrap();
    path
}

const CUSTOM_SUBSTANCES: &str = r#"{
    "version": 3,
    "substances": [
        { "name": "Emulsion", "conversion_factor": 0.9, "category": "blasting agent",
          "description": "Bulk emulsion", "default_efficiency_fraction": 1.0 }
    ]
}"#;

const CUSTOM_THRESHOLDS: &str = r#"{
    "version": 2,
    "hazard": "blast overpressure (site calibration)",
    "thresholds": [
        { "name": "Evacuate", "trigger_value_kpa": 20.0, "scaling_constant": 8.0, "color": "red" },
        { "name": "Shelter", "trigger_value_kpa": 5.0, "scaling_constant": 18.0, "color": "yellow" }
    ]
}"#;

#[test]
fn test_custom_tables_drive_calculation() {
    let subs = temp_table("subs-ok", CUSTOM_SUBSTANCES);
    let thresholds = temp_table("thresholds-ok", CUSTOM_THRESHOLDS);

    let registries =
        HazardRegistries::from_files(Some(subs.as_path()), Some(thresholds.as_path())).unwrap();
    assert_eq!(registries.substances.len(), 1);
    assert_eq!(
        registries.thresholds.hazard(),
        "blast overpressure (site calibration)"
    );

    let scenario = Scenario::new("emulsion", 1_000.0 / 0.9, 1.0, GeoPoint::default());
    let result = compute(&registries, &scenario).unwrap();
    // W = 1000 kg, W^(1/3) = 10
    assert!((result.radius("Evacuate").unwrap().value() - 80.0).abs() < 1e-9);
    assert!((result.radius("Shelter").unwrap().value() - 180.0).abs() < 1e-9);

    // Builtin materials are gone once the table is replaced
    assert!(compute(
        &registries,
        &Scenario::new("TNT", 1.0, 1.0, GeoPoint::default())
    )
    .is_err());

    let _ = fs::remove_file(subs);
    let _ = fs::remove_file(thresholds);
}

#[test]
fn test_misordered_threshold_file_refuses_to_load() {
    let path = temp_table(
        "thresholds-bad",
        r#"{ "thresholds": [
            { "name": "Shelter", "trigger_value_kpa": 5.0, "scaling_constant": 18.0 },
            { "name": "Evacuate", "trigger_value_kpa": 20.0, "scaling_constant": 8.0 }
        ] }"#,
    );

    let err = ThresholdRegistry::from_file(&path).unwrap_err();
    match err {
        RegistryError::NonMonotonicScaling {
            more_severe,
            less_severe,
            ..
        } => {
            assert_eq!(more_severe, "Shelter");
            assert_eq!(less_severe, "Evacuate");
        }
        other => panic!("expected NonMonotonicScaling, got {other:?}"),
    }
    let _ = fs::remove_file(path);
}

#[test]
fn test_zero_factor_file_refuses_to_load() {
    let path = temp_table(
        "subs-zero",
        r#"{ "substances": [
            { "name": "Inert", "conversion_factor": 0.0, "category": "x",
              "description": "", "default_efficiency_fraction": 1.0 }
        ] }"#,
    );
    assert!(matches!(
        SubstanceRegistry::from_file(&path),
        Err(RegistryError::InvalidValue {
            field: "conversion_factor",
            ..
        })
    ));
    let _ = fs::remove_file(path);
}

#[test]
fn test_missing_file_is_read_error() {
    let err = SubstanceRegistry::from_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, RegistryError::Read { .. }));
}
