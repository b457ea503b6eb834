//! Substance registry: named materials and their blast-equivalence factors
//!
//! Every substance carries a `conversion_factor` relative to the reference
//! material (TNT = 1.0) and the efficiency fraction assumed when the caller
//! does not supply one. Solid explosives detonate fully (1.0); flammable
//! vapor clouds only release a small fraction of their combustion energy as
//! blast.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{RegistryError, Result, ZoneError};
use crate::registry::normalize_name;

/// Builtin substance table
pub const BUILTIN_SUBSTANCES: &str = include_str!("../../data/substances.json");

/// A named material that can be converted to a reference-equivalent mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substance {
    pub name: String,
    /// Dimensionless multiplier relative to the reference material
    pub conversion_factor: f64,
    /// Free-text classification ("solid explosive", "flammable gas", ...)
    pub category: String,
    pub description: String,
    /// Fraction of the mass assumed to contribute to the blast, in (0, 1]
    pub default_efficiency_fraction: f64,
}

impl Substance {
    fn validate(&self) -> std::result::Result<(), RegistryError> {
        if !(self.conversion_factor.is_finite() && self.conversion_factor > 0.0) {
            return Err(RegistryError::InvalidValue {
                name: self.name.clone(),
                field: "conversion_factor",
                constraint: "finite and greater than 0",
                value: self.conversion_factor,
            });
        }
        let eff = self.default_efficiency_fraction;
        if !(eff > 0.0 && eff <= 1.0) {
            return Err(RegistryError::InvalidValue {
                name: self.name.clone(),
                field: "default_efficiency_fraction",
                constraint: "in (0, 1]",
                value: eff,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SubstanceTable {
    #[serde(default)]
    version: u32,
    substances: Vec<Substance>,
}

/// Immutable name -> substance lookup
///
/// Lookups ignore ASCII case so "tnt" and "TNT" resolve to the same entry;
/// listing preserves the table order and the original spelling.
#[derive(Debug, Clone)]
pub struct SubstanceRegistry {
    substances: Vec<Substance>,
    index: FxHashMap<String, usize>,
}

impl SubstanceRegistry {
    /// Registry built from the embedded table
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_SUBSTANCES).expect("builtin substance table should be valid")
    }

    /// Parse and validate a JSON substance table
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or any entry is invalid
    pub fn from_json_str(json: &str) -> std::result::Result<Self, RegistryError> {
        let table: SubstanceTable = serde_json::from_str(json)?;
        let registry = Self::from_substances(table.substances)?;
        info!(
            "Loaded substance table v{} ({} substances)",
            table.version,
            registry.len()
        );
        Ok(registry)
    }

    /// Read, parse and validate a JSON substance table from disk
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

    /// Build from already-constructed entries
    ///
    /// # Errors
    /// Returns error on an empty list, a duplicate name, or an invalid factor
    pub fn from_substances(substances: Vec<Substance>) -> std::result::Result<Self, RegistryError> {
        if substances.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut index = FxHashMap::default();
        for (i, substance) in substances.iter().enumerate() {
            substance.validate()?;
            if index.insert(normalize_name(&substance.name), i).is_some() {
                return Err(RegistryError::Duplicate {
                    name: substance.name.clone(),
                });
            }
        }

        Ok(Self { substances, index })
    }

    /// Look up a substance by name
    ///
    /// # Errors
    /// Returns `ZoneError::UnknownSubstance` carrying the requested name
    pub fn lookup(&self, name: &str) -> Result<&Substance> {
        self.index
            .get(&normalize_name(name))
            .map(|&i| &self.substances[i])
            .ok_or_else(|| ZoneError::UnknownSubstance {
                name: name.to_string(),
            })
    }

    /// All substances in table order
    pub fn list(&self) -> &[Substance] {
        &self.substances
    }

    pub fn len(&self) -> usize {
        self.substances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substance(name: &str, factor: f64) -> Substance {
        Substance {
            name: name.to_string(),
            conversion_factor: factor,
            category: "test".to_string(),
            description: String::new(),
            default_efficiency_fraction: 1.0,
        }
    }

    #[test]
    fn test_builtin_has_reference_material() {
        let registry = SubstanceRegistry::builtin();
        let tnt = registry.lookup("TNT").unwrap();
        assert_eq!(tnt.conversion_factor, 1.0);
        assert_eq!(tnt.default_efficiency_fraction, 1.0);
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let registry = SubstanceRegistry::builtin();
        let a = registry.lookup("propane").unwrap();
        let b = registry.lookup("  PROPANE ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name, "Propane");
    }

    #[test]
    fn test_unknown_substance_carries_name() {
        let registry = SubstanceRegistry::builtin();
        let err = registry.lookup("Unobtainium").unwrap_err();
        assert_eq!(
            err,
            ZoneError::UnknownSubstance {
                name: "Unobtainium".to_string()
            }
        );
    }

    #[test]
    fn test_gas_defaults_to_partial_efficiency() {
        let registry = SubstanceRegistry::builtin();
        for s in registry.list() {
            if s.category == "flammable gas" {
                assert!(s.default_efficiency_fraction < 1.0, "{}", s.name);
            }
        }
    }

    #[test]
    fn test_zero_factor_rejected() {
        let err = SubstanceRegistry::from_substances(vec![substance("Dud", 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidValue {
                field: "conversion_factor",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_and_nan_factor_rejected() {
        assert!(SubstanceRegistry::from_substances(vec![substance("Neg", -1.0)]).is_err());
        assert!(SubstanceRegistry::from_substances(vec![substance("Nan", f64::NAN)]).is_err());
    }

    #[test]
    fn test_out_of_range_default_efficiency_rejected() {
        let mut s = substance("Overdrive", 1.0);
        s.default_efficiency_fraction = 1.5;
        assert!(SubstanceRegistry::from_substances(vec![s]).is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = SubstanceRegistry::from_substances(vec![
            substance("TNT", 1.0),
            substance("tnt", 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            SubstanceRegistry::from_substances(Vec::new()),
            Err(RegistryError::Empty)
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            SubstanceRegistry::from_json_str("{ not json"),
            Err(RegistryError::Parse(_))
        ));
    }
}
