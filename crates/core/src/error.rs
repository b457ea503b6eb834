//! Error types for the hazard zone engine
//!
//! - `ZoneError`: failures of a single calculation
//! - `RegistryError`: failures building a substance or threshold table
//! - `Result`: Type alias for `Result<T, ZoneError>`

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for calculation operations
pub type Result<T> = std::result::Result<T, ZoneError>;

/// Scenario field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioField {
    TotalMass,
    EfficiencyFraction,
    Latitude,
    Longitude,
}

impl ScenarioField {
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioField::TotalMass => "total_mass",
            ScenarioField::EfficiencyFraction => "detonation_efficiency_fraction",
            ScenarioField::Latitude => "latitude",
            ScenarioField::Longitude => "longitude",
        }
    }
}

impl fmt::Display for ScenarioField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calculation failed. Nothing partial is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneError {
    /// Substance name not present in the registry
    #[error("unknown substance '{name}'")]
    UnknownSubstance { name: String },

    /// Threshold name not present in the registry
    #[error("unknown severity threshold '{name}'")]
    UnknownThreshold { name: String },

    /// A scenario field is outside its domain
    #[error("invalid scenario: {field} {constraint}, got {value}")]
    InvalidScenario {
        field: ScenarioField,
        constraint: &'static str,
        value: f64,
    },

    /// Computed radii do not nest; the threshold table is defective
    #[error(
        "zone ordering violation: '{inner}' ({inner_radius_m} m) is more severe than \
         '{outer}' but reaches further ({outer_radius_m} m)"
    )]
    ZoneOrderingViolation {
        inner: String,
        inner_radius_m: f64,
        outer: String,
        outer_radius_m: f64,
    },
}

impl ZoneError {
    /// Create an invalid-scenario error
    pub fn invalid(field: ScenarioField, constraint: &'static str, value: f64) -> Self {
        Self::InvalidScenario {
            field,
            constraint,
            value,
        }
    }

    /// True for errors the person entering the scenario can fix
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            ZoneError::UnknownSubstance { .. } | ZoneError::InvalidScenario { .. }
        )
    }
}

/// A registry table could not be built. Fatal at startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to parse registry table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read registry table from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("registry table is empty")]
    Empty,

    #[error("duplicate registry entry '{name}'")]
    Duplicate { name: String },

    #[error("entry '{name}': {field} must be {constraint}, got {value}")]
    InvalidValue {
        name: String,
        field: &'static str,
        constraint: &'static str,
        value: f64,
    },

    #[error(
        "threshold '{name}': secondary trigger {secondary_psi} psi disagrees with \
         {primary_kpa} kPa"
    )]
    InconsistentUnits {
        name: String,
        primary_kpa: f64,
        secondary_psi: f64,
    },

    #[error(
        "threshold '{more_severe}' (K={more_severe_constant}) must have a smaller scaling \
         constant than less severe '{less_severe}' (K={less_severe_constant})"
    )]
    NonMonotonicScaling {
        more_severe: String,
        more_severe_constant: f64,
        less_severe: String,
        less_severe_constant: f64,
    },

    #[error(
        "threshold '{more_severe}' ({more_severe_kpa} kPa) is listed before '{less_severe}' \
         but does not have a higher trigger overpressure ({less_severe_kpa} kPa)"
    )]
    InvertedSeverity {
        more_severe: String,
        more_severe_kpa: f64,
        less_severe: String,
        less_severe_kpa: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_scenario_names_field() {
        let err = ZoneError::invalid(ScenarioField::TotalMass, "must be greater than 0", -3.0);
        let msg = err.to_string();
        assert!(msg.contains("total_mass"), "{msg}");
        assert!(msg.contains("-3"), "{msg}");
        assert!(err.is_user_correctable());
    }

    #[test]
    fn test_ordering_violation_is_not_user_correctable() {
        let err = ZoneError::ZoneOrderingViolation {
            inner: "a".into(),
            inner_radius_m: 10.0,
            outer: "b".into(),
            outer_radius_m: 5.0,
        };
        assert!(!err.is_user_correctable());
    }
}
