//! Hazard model interface
//!
//! A hazard model turns its own input type into one radius per severity
//! threshold. Everything after that (nesting check, result packaging,
//! reporting) is shared, so plume, dose or radiant-heat models can feed the
//! same zone pipeline as the blast model.

pub mod blast;

pub use blast::{
    compute, compute_batch, scaled_distance, threshold_radii, BlastOverpressureModel,
};

use crate::core_types::units::{Kilograms, Meters};
use crate::core_types::GeoPoint;
use crate::error::Result;
use crate::registry::ThresholdRegistry;
use crate::zones::{classify, EffectZoneResult};

/// Raw model output, before the nesting check
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvaluation {
    /// Scenario magnitude in reference-material units
    pub reference_equivalent_quantity: Kilograms,
    /// (threshold name, radius), most severe first
    pub radii: Vec<(String, Meters)>,
    pub origin: GeoPoint,
}

/// Backend-agnostic interface for hazard consequence models
///
/// Implementations must be pure: the same input and the same tables yield
/// the same evaluation.
pub trait HazardModel: Send + Sync {
    /// Scenario description this model consumes
    type Input;

    /// Short model identifier for logs
    fn name(&self) -> &'static str;

    /// Severity levels this model reports, most severe first
    fn thresholds(&self) -> &ThresholdRegistry;

    /// Compute per-threshold radii
    ///
    /// # Errors
    /// Returns a `ZoneError` if the input cannot be evaluated
    fn evaluate(&self, input: &Self::Input) -> Result<ModelEvaluation>;

    /// Evaluate and classify in one step
    ///
    /// # Errors
    /// Propagates evaluation errors and `ZoneOrderingViolation`
    fn run(&self, input: &Self::Input) -> Result<EffectZoneResult> {
        classify(self.evaluate(input)?)
    }
}
