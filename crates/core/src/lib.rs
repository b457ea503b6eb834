//! Hazard Effect Zone Engine
//!
//! Converts an emergency scenario (material, quantity, location) into nested
//! severity zones for map and table display. The blast overpressure model is
//! built in: a release is converted to a TNT-equivalent mass, and the
//! Hopkinson-Cranz cube-root law gives the distance at which each
//! overpressure threshold is reached.
//!
//! ## Pipeline
//!
//! - Substance and threshold registries: immutable tables, validated once
//! - Blast model: equivalent mass and per-threshold radii
//! - Zone classifier: nesting check and immutable result
//! - Reporting adapter: rings for the map, rows for the table
//!
//! ```
//! use hazard_zones_core::{compute, GeoPoint, HazardRegistries, Scenario};
//!
//! let registries = HazardRegistries::builtin();
//! let scenario = Scenario::new("TNT", 50.0, 1.0, GeoPoint::new(-31.95, 115.86));
//! let result = compute(&registries, &scenario).unwrap();
//! assert_eq!(result.zones().len(), registries.thresholds.len());
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Configuration tables
pub mod registry;

// Calculation pipeline
pub mod model;
pub mod report;
pub mod scenario;
pub mod zones;

pub use core_types::{GeoPoint, Kilograms, Kilopascals, Meters, Psi, SquareMeters};
pub use error::{RegistryError, Result, ScenarioField, ZoneError};
pub use model::{
    compute, compute_batch, scaled_distance, BlastOverpressureModel, HazardModel, ModelEvaluation,
};
pub use registry::{HazardRegistries, SeverityThreshold, Substance, SubstanceRegistry, ThresholdRegistry};
pub use report::{build_report, map_rings, table_rows, MapRing, TableRow, ZoneReport};
pub use scenario::Scenario;
pub use zones::{assemble, classify, EffectZone, EffectZoneResult};
