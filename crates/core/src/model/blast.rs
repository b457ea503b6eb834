//! Blast overpressure: TNT equivalence and Hopkinson-Cranz scaling
//!
//! # Model
//!
//! 1. Equivalent mass: `W = m · f · η` where `m` is the released mass, `f` the
//!    substance conversion factor relative to TNT and `η` the fraction of the
//!    mass that takes part in the explosion.
//! 2. Cube-root similitude: a given overpressure is reached at the same scaled
//!    distance `Z = R / W^(1/3)` for every charge size, so
//!    `R_i = Z_i · W^(1/3)` for threshold `i` with scaling constant `Z_i`.
//!
//! Point source, free field, uniform energy release. No terrain or
//! confinement correction.
//!
//! # References
//! - Hopkinson, B. (1915). British Ordnance Board Minutes 13565
//! - Cranz, C. (1926). Lehrbuch der Ballistik, Springer
//! - CCPS (2010). Guidelines for Vapor Cloud Explosion, Pressure Vessel Burst,
//!   BLEVE and Flash Fire Hazards, 2nd ed.

use rayon::prelude::*;
use tracing::debug;

use crate::core_types::units::{Kilograms, Meters};
use crate::error::{Result, ScenarioField, ZoneError};
use crate::model::{HazardModel, ModelEvaluation};
use crate::registry::{HazardRegistries, Substance, SubstanceRegistry, ThresholdRegistry};
use crate::scenario::Scenario;
use crate::zones::{assemble, EffectZoneResult};

/// Equivalency and scaling calculator over borrowed registries
#[derive(Debug, Clone, Copy)]
pub struct BlastOverpressureModel<'a> {
    substances: &'a SubstanceRegistry,
    thresholds: &'a ThresholdRegistry,
}

impl<'a> BlastOverpressureModel<'a> {
    pub fn new(substances: &'a SubstanceRegistry, thresholds: &'a ThresholdRegistry) -> Self {
        Self {
            substances,
            thresholds,
        }
    }

    pub fn from_registries(registries: &'a HazardRegistries) -> Self {
        Self::new(&registries.substances, &registries.thresholds)
    }

    /// `total_mass × conversion_factor × efficiency`, no validation
    pub fn equivalent_quantity(substance: &Substance, scenario: &Scenario) -> f64 {
        scenario.total_mass * substance.conversion_factor * scenario.detonation_efficiency_fraction
    }
}

impl HazardModel for BlastOverpressureModel<'_> {
    type Input = Scenario;

    fn name(&self) -> &'static str {
        "blast-overpressure"
    }

    fn thresholds(&self) -> &ThresholdRegistry {
        self.thresholds
    }

    fn evaluate(&self, scenario: &Scenario) -> Result<ModelEvaluation> {
        let substance = self.substances.lookup(&scenario.substance_name)?;
        scenario.validate()?;

        let equivalent = Self::equivalent_quantity(substance, scenario);
        if !equivalent.is_finite() {
            return Err(ZoneError::invalid(
                ScenarioField::TotalMass,
                "must yield a finite equivalent quantity",
                scenario.total_mass,
            ));
        }
        let equivalent = Kilograms::new(equivalent);
        let cube_root = equivalent.cube_root();

        let radii = threshold_radii(self.thresholds, equivalent);

        debug!(
            "{}: {} kg {} at {:.0}% -> {} TNT eq, W^(1/3) = {:.4}, {} zones",
            self.name(),
            scenario.total_mass,
            substance.name,
            scenario.detonation_efficiency_fraction * 100.0,
            equivalent,
            cube_root,
            radii.len()
        );

        Ok(ModelEvaluation {
            reference_equivalent_quantity: equivalent,
            radii,
            origin: scenario.origin,
        })
    }
}

/// `R_i = Z_i · W^(1/3)` for every threshold, most severe first
///
/// A zero equivalent mass gives exactly zero for every radius.
pub fn threshold_radii(thresholds: &ThresholdRegistry, equivalent: Kilograms) -> Vec<(String, Meters)> {
    let cube_root = equivalent.cube_root();
    thresholds
        .list()
        .iter()
        .map(|t| (t.name.clone(), Meters::new(t.scaling_constant * cube_root)))
        .collect()
}

/// Compute the effect zones for one scenario
///
/// # Errors
/// - `UnknownSubstance` if the substance is not registered
/// - `InvalidScenario` if mass, efficiency or coordinates are out of range
/// - `ZoneOrderingViolation` if the threshold table produces non-nesting radii
pub fn compute(registries: &HazardRegistries, scenario: &Scenario) -> Result<EffectZoneResult> {
    let evaluation = BlastOverpressureModel::from_registries(registries).evaluate(scenario)?;
    assemble(
        scenario,
        evaluation.reference_equivalent_quantity,
        evaluation.radii,
    )
}

/// Compute independent scenarios in parallel, one result per input, in input order
pub fn compute_batch(
    registries: &HazardRegistries,
    scenarios: &[Scenario],
) -> Vec<Result<EffectZoneResult>> {
    let model = BlastOverpressureModel::from_registries(registries);
    scenarios.par_iter().map(|s| model.run(s)).collect()
}

/// Scaled distance `Z = R / W^(1/3)` of a standoff distance, m/kg^(1/3)
///
/// Infinite for a zero equivalent mass: no threshold is reached anywhere.
pub fn scaled_distance(distance: Meters, equivalent: Kilograms) -> f64 {
    let cube_root = equivalent.cube_root();
    if cube_root > 0.0 {
        *distance / cube_root
    } else {
        f64::INFINITY
    }
}
