//! Physical properties of the cube-root scaling law over many scenarios
//!
//! Randomized sweeps use a fixed seed so failures reproduce.

use approx::assert_relative_eq;
use hazard_zones_core::model::threshold_radii;
use hazard_zones_core::{
    assemble, compute, GeoPoint, HazardRegistries, Kilograms, Scenario, Substance,
    SubstanceRegistry, ThresholdRegistry,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CBRT_2: f64 = 1.259_921_049_894_873_2;

fn origin() -> GeoPoint {
    GeoPoint::new(-33.8688, 151.2093)
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn test_zones_nest_for_random_scenarios() {
    init_logging();
    let registries = HazardRegistries::builtin();
    let names: Vec<String> = registries
        .substances
        .list()
        .iter()
        .map(|s| s.name.clone())
        .collect();
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..2000 {
        let name = &names[rng.random_range(0..names.len())];
        let mass = 10f64.powf(rng.random_range(-3.0..6.0));
        let eff = rng.random_range(0.001..=1.0);
        let scenario = Scenario::new(name.clone(), mass, eff, origin());

        let result = compute(&registries, &scenario).unwrap();
        for pair in result.zones().windows(2) {
            assert!(
                pair[0].radius <= pair[1].radius,
                "{} ({}) outside {} ({}) for {:?}",
                pair[0].threshold,
                pair[0].radius,
                pair[1].threshold,
                pair[1].radius,
                scenario
            );
        }
    }
}

#[test]
fn test_doubling_mass_scales_radii_by_cube_root_of_two() {
    let registries = HazardRegistries::builtin();
    for name in ["TNT", "ANFO", "Propane", "Hydrogen"] {
        let single = compute(&registries, &Scenario::new(name, 75.0, 0.4, origin())).unwrap();
        let double = compute(&registries, &Scenario::new(name, 150.0, 0.4, origin())).unwrap();

        for (a, b) in single.zones().iter().zip(double.zones()) {
            assert_relative_eq!(*b.radius, *a.radius * CBRT_2, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_doubling_conversion_factor_scales_radii_by_cube_root_of_two() {
    let make = |name: &str, factor: f64| Substance {
        name: name.to_string(),
        conversion_factor: factor,
        category: "test".to_string(),
        description: String::new(),
        default_efficiency_fraction: 1.0,
    };
    let substances =
        SubstanceRegistry::from_substances(vec![make("Base", 1.3), make("Double", 2.6)]).unwrap();
    let registries = HazardRegistries::new(substances, ThresholdRegistry::builtin());

    let base = compute(&registries, &Scenario::new("Base", 12.0, 0.8, origin())).unwrap();
    let double = compute(&registries, &Scenario::new("Double", 12.0, 0.8, origin())).unwrap();

    assert_relative_eq!(
        *double.reference_equivalent_quantity(),
        2.0 * *base.reference_equivalent_quantity(),
        max_relative = 1e-12
    );
    for (a, b) in base.zones().iter().zip(double.zones()) {
        assert_relative_eq!(*b.radius, *a.radius * CBRT_2, max_relative = 1e-12);
    }
}

#[test]
fn test_zero_equivalent_quantity_gives_exactly_zero_radii() {
    let thresholds = ThresholdRegistry::builtin();
    let radii = threshold_radii(&thresholds, Kilograms::ZERO);
    assert_eq!(radii.len(), thresholds.len());
    assert!(radii.iter().all(|(_, r)| r.value() == 0.0));

    let scenario = Scenario::new("TNT", 1.0, 1.0, origin());
    let result = assemble(&scenario, Kilograms::ZERO, radii).unwrap();
    assert!(result.zones().iter().all(|z| z.radius.value() == 0.0));
    assert!(result.zone_at(&origin()).is_none());
}

#[test]
fn test_identical_inputs_give_bit_identical_results() {
    let registries = HazardRegistries::builtin();
    let scenario = Scenario::new("Ethylene", 2_345.678, 0.137, origin());

    let first = compute(&registries, &scenario).unwrap();
    let second = compute(&registries, &scenario).unwrap();

    assert_eq!(
        first.reference_equivalent_quantity().to_bits(),
        second.reference_equivalent_quantity().to_bits()
    );
    for (a, b) in first.zones().iter().zip(second.zones()) {
        assert_eq!(a.threshold, b.threshold);
        assert_eq!(a.radius.to_bits(), b.radius.to_bits());
    }
}

#[test]
fn test_batch_matches_sequential() {
    let registries = HazardRegistries::builtin();
    let mut rng = StdRng::seed_from_u64(7);
    let scenarios: Vec<Scenario> = (0..256)
        .map(|_| {
            Scenario::new(
                "C-4",
                rng.random_range(0.1..500.0),
                rng.random_range(0.05..=1.0),
                origin(),
            )
        })
        .collect();

    let batch = hazard_zones_core::compute_batch(&registries, &scenarios);
    for (scenario, result) in scenarios.iter().zip(batch) {
        assert_eq!(result.unwrap(), compute(&registries, scenario).unwrap());
    }
}
