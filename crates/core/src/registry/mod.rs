//! Static configuration tables: substances and severity thresholds
//!
//! Both registries are validated once when they are built and are read-only
//! afterwards. They are plain data, so a deployment can swap either table
//! for its own JSON file without touching the calculator.

pub mod substance;
pub mod threshold;

use std::path::Path;
use std::sync::Arc;

pub use substance::{Substance, SubstanceRegistry, BUILTIN_SUBSTANCES};
pub use threshold::{SeverityThreshold, ThresholdRegistry, BUILTIN_OVERPRESSURE_THRESHOLDS};

use crate::error::RegistryError;

/// Lookup key for a substance or threshold name: trimmed, ASCII lowercase
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// The two tables a blast calculation reads, bundled for sharing
#[derive(Debug, Clone)]
pub struct HazardRegistries {
    pub substances: Arc<SubstanceRegistry>,
    pub thresholds: Arc<ThresholdRegistry>,
}

impl HazardRegistries {
    pub fn new(substances: SubstanceRegistry, thresholds: ThresholdRegistry) -> Self {
        Self {
            substances: Arc::new(substances),
            thresholds: Arc::new(thresholds),
        }
    }

    /// Both embedded tables
    pub fn builtin() -> Self {
        Self::new(SubstanceRegistry::builtin(), ThresholdRegistry::builtin())
    }

    /// Load either table from disk, falling back to the builtin one when no path is given
    ///
    /// # Errors
    /// Returns the first table's load or validation failure
    pub fn from_files(
        substances: Option<&Path>,
        thresholds: Option<&Path>,
    ) -> Result<Self, RegistryError> {
        let substances = match substances {
            Some(path) => SubstanceRegistry::from_file(path)?,
            None => SubstanceRegistry::builtin(),
        };
        let thresholds = match thresholds {
            Some(path) => ThresholdRegistry::from_file(path)?,
            None => ThresholdRegistry::builtin(),
        };
        Ok(Self::new(substances, thresholds))
    }
}
