//! Severity threshold registry
//!
//! A threshold names an overpressure level and the scaled distance
//! `Z = R / W^(1/3)` (m/kg^(1/3)) at which that level is reached. The table is
//! ordered most severe first, and the scaling constants must strictly grow
//! down the table so that every zone nests inside the next one.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core_types::units::{Kilopascals, Psi};
use crate::error::{RegistryError, Result, ZoneError};
use crate::registry::normalize_name;

/// Builtin overpressure threshold table
pub const BUILTIN_OVERPRESSURE_THRESHOLDS: &str =
    include_str!("../../data/overpressure_thresholds.json");

/// Relative tolerance when checking psi against kPa
const UNIT_CONSISTENCY_TOLERANCE: f64 = 0.01;

/// A named severity level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityThreshold {
    pub name: String,
    /// Trigger overpressure, primary unit
    pub trigger_value: Kilopascals,
    /// The same trigger in psi, for display
    pub trigger_value_secondary: Psi,
    /// Scaled distance at which this level is reached, m/kg^(1/3)
    pub scaling_constant: f64,
    pub color: String,
    pub description: String,
}

impl SeverityThreshold {
    /// Create a threshold, deriving the psi value from kPa
    pub fn new(
        name: impl Into<String>,
        trigger_value: Kilopascals,
        scaling_constant: f64,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            trigger_value,
            trigger_value_secondary: trigger_value.to_psi(),
            scaling_constant,
            color: color.into(),
            description: description.into(),
        }
    }

    fn validate(&self) -> std::result::Result<(), RegistryError> {
        let invalid = |field, value| RegistryError::InvalidValue {
            name: self.name.clone(),
            field,
            constraint: "finite and greater than 0",
            value,
        };
        if !(self.scaling_constant.is_finite() && self.scaling_constant > 0.0) {
            return Err(invalid("scaling_constant", self.scaling_constant));
        }
        let kpa = *self.trigger_value;
        if !(kpa.is_finite() && kpa > 0.0) {
            return Err(invalid("trigger_value", kpa));
        }

        let expected_psi = *self.trigger_value.to_psi();
        let psi = *self.trigger_value_secondary;
        if !psi.is_finite() || ((psi - expected_psi) / expected_psi).abs() > UNIT_CONSISTENCY_TOLERANCE
        {
            return Err(RegistryError::InconsistentUnits {
                name: self.name.clone(),
                primary_kpa: kpa,
                secondary_psi: psi,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ThresholdEntry {
    name: String,
    trigger_value_kpa: f64,
    #[serde(default)]
    trigger_value_psi: Option<f64>,
    scaling_constant: f64,
    #[serde(default)]
    color: String,
    #[serde(default)]
    description: String,
}

impl From<ThresholdEntry> for SeverityThreshold {
    fn from(entry: ThresholdEntry) -> Self {
        let kpa = Kilopascals::new(entry.trigger_value_kpa);
        Self {
            name: entry.name,
            trigger_value: kpa,
            trigger_value_secondary: entry.trigger_value_psi.map_or_else(|| kpa.to_psi(), Psi::new),
            scaling_constant: entry.scaling_constant,
            color: entry.color,
            description: entry.description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ThresholdTable {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    hazard: String,
    thresholds: Vec<ThresholdEntry>,
}

/// Immutable, severity-ordered threshold table
#[derive(Debug, Clone)]
pub struct ThresholdRegistry {
    hazard: String,
    thresholds: Vec<SeverityThreshold>,
    index: FxHashMap<String, usize>,
}

impl ThresholdRegistry {
    /// Registry built from the embedded overpressure table
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_OVERPRESSURE_THRESHOLDS)
            .expect("builtin overpressure threshold table should be valid")
    }

    /// Parse and validate a JSON threshold table. List order is severity order.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed, an entry is invalid, or the
    /// scaling constants do not strictly increase down the list
    pub fn from_json_str(json: &str) -> std::result::Result<Self, RegistryError> {
        let table: ThresholdTable = serde_json::from_str(json)?;
        let mut registry =
            Self::from_thresholds(table.thresholds.into_iter().map(Into::into).collect())?;
        registry.hazard = table.hazard;
        info!(
            "Loaded {} threshold table v{} ({} levels)",
            if registry.hazard.is_empty() { "unnamed" } else { &registry.hazard },
            table.version,
            registry.len()
        );
        Ok(registry)
    }

    /// Read, parse and validate a JSON threshold table from disk
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the table is invalid
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, RegistryError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Build from thresholds listed most severe first
    ///
    /// # Errors
    /// Returns error on an empty list, a duplicate name, an invalid value,
    /// a scaling constant that does not exceed the previous one, or a trigger
    /// overpressure that is not below the previous one
    pub fn from_thresholds(
        thresholds: Vec<SeverityThreshold>,
    ) -> std::result::Result<Self, RegistryError> {
        if thresholds.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut index = FxHashMap::default();
        for (i, threshold) in thresholds.iter().enumerate() {
            threshold.validate()?;
            if index.insert(normalize_name(&threshold.name), i).is_some() {
                return Err(RegistryError::Duplicate {
                    name: threshold.name.clone(),
                });
            }
        }

        for pair in thresholds.windows(2) {
            let (more_severe, less_severe) = (&pair[0], &pair[1]);
            if more_severe.scaling_constant >= less_severe.scaling_constant {
                return Err(RegistryError::NonMonotonicScaling {
                    more_severe: more_severe.name.clone(),
                    more_severe_constant: more_severe.scaling_constant,
                    less_severe: less_severe.name.clone(),
                    less_severe_constant: less_severe.scaling_constant,
                });
            }
            if more_severe.trigger_value <= less_severe.trigger_value {
                return Err(RegistryError::InvertedSeverity {
                    more_severe: more_severe.name.clone(),
                    more_severe_kpa: *more_severe.trigger_value,
                    less_severe: less_severe.name.clone(),
                    less_severe_kpa: *less_severe.trigger_value,
                });
            }
        }

        Ok(Self {
            hazard: String::new(),
            thresholds,
            index,
        })
    }

    /// Thresholds, most dangerous first
    pub fn list(&self) -> &[SeverityThreshold] {
        &self.thresholds
    }

    /// Look up a threshold by name (ASCII case-insensitive)
    ///
    /// # Errors
    /// Returns `ZoneError::UnknownThreshold` if the name is absent
    pub fn lookup(&self, name: &str) -> Result<&SeverityThreshold> {
        self.index
            .get(&normalize_name(name))
            .map(|&i| &self.thresholds[i])
            .ok_or_else(|| ZoneError::UnknownThreshold {
                name: name.to_string(),
            })
    }

    /// Hazard label from the table header, empty if none
    pub fn hazard(&self) -> &str {
        &self.hazard
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}
