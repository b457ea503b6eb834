//! Worked scenarios from input to map rings and table rows

use approx::assert_relative_eq;
use hazard_zones_core::{
    build_report, compute, scaled_distance, GeoPoint, HazardRegistries, Meters, Scenario,
    ScenarioField, ZoneError,
};

fn perth() -> GeoPoint {
    GeoPoint::new(-31.9505, 115.8605)
}

fn invalid_field(result: hazard_zones_core::Result<impl std::fmt::Debug>) -> ScenarioField {
    match result {
        Err(ZoneError::InvalidScenario { field, .. }) => field,
        other => panic!("expected InvalidScenario, got {other:?}"),
    }
}

/// 50 kg TNT at full yield
#[test]
fn test_reference_material_full_yield() {
    let registries = HazardRegistries::builtin();
    let scenario = Scenario::from_percent("TNT", 50.0, 100.0, perth()).unwrap();
    let result = compute(&registries, &scenario).unwrap();

    assert_relative_eq!(*result.reference_equivalent_quantity(), 50.0);
    assert_relative_eq!(
        result.reference_equivalent_quantity().cube_root(),
        3.684,
        epsilon = 1e-3
    );
    // K = 2.5 and K = 14.8
    assert_relative_eq!(*result.zones()[0].radius, 9.21, epsilon = 0.01);
    assert_relative_eq!(*result.zones()[4].radius, 54.53, epsilon = 0.01);
    assert_eq!(result.origin(), perth());
}

/// Same charge at 20 % efficiency
#[test]
fn test_reference_material_partial_yield() {
    let registries = HazardRegistries::builtin();
    let scenario = Scenario::from_percent("TNT", 50.0, 20.0, perth()).unwrap();
    let result = compute(&registries, &scenario).unwrap();

    assert_relative_eq!(*result.reference_equivalent_quantity(), 10.0, epsilon = 1e-12);
    assert_relative_eq!(
        result.reference_equivalent_quantity().cube_root(),
        2.154,
        epsilon = 1e-3
    );
    // K = 5.6
    assert_relative_eq!(
        *result.radius("Moderate Damage").unwrap(),
        12.06,
        epsilon = 0.01
    );
}

#[test]
fn test_vapor_cloud_uses_substance_default_efficiency() {
    let registries = HazardRegistries::builtin();
    let propane = registries.substances.lookup("Propane").unwrap();
    let scenario = Scenario::with_default_efficiency(propane, 1_000.0, perth());
    let result = compute(&registries, &scenario).unwrap();

    // 1000 kg × 9.90 × 0.10
    assert_relative_eq!(*result.reference_equivalent_quantity(), 990.0, epsilon = 1e-9);
}

#[test]
fn test_boundary_rejection() {
    let registries = HazardRegistries::builtin();
    let run = |mass: f64, eff: f64| compute(&registries, &Scenario::new("TNT", mass, eff, perth()));

    assert_eq!(invalid_field(run(0.0, 1.0)), ScenarioField::TotalMass);
    assert_eq!(invalid_field(run(-10.0, 1.0)), ScenarioField::TotalMass);
    assert_eq!(invalid_field(run(10.0, 0.0)), ScenarioField::EfficiencyFraction);
    assert_eq!(invalid_field(run(10.0, 1.01)), ScenarioField::EfficiencyFraction);
    assert!(run(10.0, 1.0).is_ok());

    let unknown = compute(&registries, &Scenario::new("Kryptonite", 10.0, 1.0, perth()));
    assert_eq!(
        unknown.unwrap_err(),
        ZoneError::UnknownSubstance {
            name: "Kryptonite".to_string()
        }
    );
}

#[test]
fn test_overflowing_equivalent_quantity_rejected() {
    let registries = HazardRegistries::builtin();
    let huge = Scenario::new("Hydrogen", 1e308, 1.0, perth());

    let err = compute(&registries, &huge).unwrap_err();
    match err {
        ZoneError::InvalidScenario { field, value, .. } => {
            assert_eq!(field, ScenarioField::TotalMass);
            assert_eq!(value, 1e308);
        }
        other => panic!("expected InvalidScenario, got {other:?}"),
    }

    // Largest masses that stay finite still produce finite radii
    let big = compute(&registries, &Scenario::new("TNT", 1e300, 1.0, perth())).unwrap();
    assert!(big.reference_equivalent_quantity().is_finite());
    assert!(big.zones().iter().all(|z| z.radius.is_finite()));
}

#[test]
fn test_report_for_map_and_table() {
    let registries = HazardRegistries::builtin();
    let scenario = Scenario::new("ANFO", 500.0, 1.0, perth());
    let result = compute(&registries, &scenario).unwrap();
    let report = build_report(&result, &registries.thresholds).unwrap();

    assert_eq!(report.rings.len(), 5);
    assert_eq!(report.rows.len(), 5);
    // Widest ring first, most severe last
    assert_eq!(report.rings[0].color, "#fef0d9");
    assert_eq!(report.rings[4].color, "#7f0000");
    assert!(report.rings.iter().all(|r| r.center == perth()));
    // Rows most severe first
    assert_eq!(report.rows[0].threshold, "Total Destruction");
    assert_eq!(report.rows[4].threshold, "Window Breakage");

    let total_band_area: f64 = (0..5).map(|i| *result.band_area(i).unwrap()).sum();
    assert_relative_eq!(
        total_band_area,
        *result.outermost().unwrap().area(),
        max_relative = 1e-12
    );
}

#[test]
fn test_standoff_distance_back_check() {
    let registries = HazardRegistries::builtin();
    let result = compute(&registries, &Scenario::new("TNT", 1_000.0, 1.0, perth())).unwrap();

    // 100 m from 1 t TNT: Z = 10, between light damage (9.5) and window breakage (14.8)
    let z = scaled_distance(Meters::new(100.0), result.reference_equivalent_quantity());
    assert_relative_eq!(z, 10.0, epsilon = 1e-9);
    assert_eq!(
        result.zone_at_distance(Meters::new(100.0)).unwrap().threshold,
        "Window Breakage"
    );
    assert_eq!(
        result.zone_at_distance(Meters::new(90.0)).unwrap().threshold,
        "Light Damage"
    );
}
