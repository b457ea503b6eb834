//! Blast scenario input
//!
//! A `Scenario` is built per request and consumed by one calculation.
//! Construction does not validate; the calculator rejects out-of-domain
//! inputs with `ZoneError::InvalidScenario` naming the offending field.

use serde::{Deserialize, Serialize};

use crate::core_types::units::percent_to_fraction;
use crate::core_types::GeoPoint;
use crate::error::{Result, ScenarioField, ZoneError};
use crate::registry::Substance;

/// One release of a named substance at a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub substance_name: String,
    /// Total mass released, kg
    pub total_mass: f64,
    /// Fraction of the mass contributing to the blast, in (0, 1]
    pub detonation_efficiency_fraction: f64,
    pub origin: GeoPoint,
}

impl Scenario {
    pub fn new(
        substance_name: impl Into<String>,
        total_mass: f64,
        detonation_efficiency_fraction: f64,
        origin: GeoPoint,
    ) -> Self {
        Self {
            substance_name: substance_name.into(),
            total_mass,
            detonation_efficiency_fraction,
            origin,
        }
    }

    /// Build from an efficiency expressed as a percentage (0, 100]
    ///
    /// # Errors
    /// Returns `InvalidScenario` on `EfficiencyFraction` if the percentage is out of range
    pub fn from_percent(
        substance_name: impl Into<String>,
        total_mass: f64,
        efficiency_percent: f64,
        origin: GeoPoint,
    ) -> Result<Self> {
        if !(efficiency_percent > 0.0 && efficiency_percent <= 100.0) {
            return Err(ZoneError::invalid(
                ScenarioField::EfficiencyFraction,
                "must be a percentage in (0, 100]",
                efficiency_percent,
            ));
        }
        Ok(Self::new(
            substance_name,
            total_mass,
            percent_to_fraction(efficiency_percent),
            origin,
        ))
    }

    /// Build using the substance's default efficiency
    pub fn with_default_efficiency(substance: &Substance, total_mass: f64, origin: GeoPoint) -> Self {
        Self::new(
            substance.name.clone(),
            total_mass,
            substance.default_efficiency_fraction,
            origin,
        )
    }

    /// Check every numeric field against its domain
    ///
    /// # Errors
    /// Returns `InvalidScenario` naming the first field out of range
    pub fn validate(&self) -> Result<()> {
        if !(self.total_mass.is_finite() && self.total_mass > 0.0) {
            return Err(ZoneError::invalid(
                ScenarioField::TotalMass,
                "must be finite and greater than 0",
                self.total_mass,
            ));
        }
        let eff = self.detonation_efficiency_fraction;
        if !(eff > 0.0 && eff <= 1.0) {
            return Err(ZoneError::invalid(
                ScenarioField::EfficiencyFraction,
                "must be in (0, 1]",
                eff,
            ));
        }
        if !self.origin.is_valid_latitude() {
            return Err(ZoneError::invalid(
                ScenarioField::Latitude,
                "must be within [-90, 90]",
                self.origin.latitude,
            ));
        }
        if !self.origin.is_valid_longitude() {
            return Err(ZoneError::invalid(
                ScenarioField::Longitude,
                "must be within [-180, 180]",
                self.origin.longitude,
            ));
        }
        Ok(())
    }
}
