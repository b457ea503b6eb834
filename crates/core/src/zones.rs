//! Zone classification and result assembly
//!
//! Turns per-threshold radii into an immutable [`EffectZoneResult`], after
//! re-checking that the zones nest (most severe innermost). The registry
//! already refuses non-monotonic tables; this check is independent of it and
//! also covers models that do not read their radii from a registry.

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::error;

use crate::core_types::units::{Kilograms, Meters, SquareMeters};
use crate::core_types::GeoPoint;
use crate::error::{Result, ZoneError};
use crate::model::ModelEvaluation;
use crate::registry::normalize_name;
use crate::scenario::Scenario;

/// One severity zone: the disc around the origin where `threshold` is met or exceeded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectZone {
    pub threshold: String,
    pub radius: Meters,
}

impl EffectZone {
    /// Area of the full disc
    pub fn area(&self) -> SquareMeters {
        self.radius.disc_area()
    }
}

/// Output of one calculation. Zones are stored most severe first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectZoneResult {
    reference_equivalent_quantity: Kilograms,
    zones: Vec<EffectZone>,
    origin: GeoPoint,
}

impl EffectZoneResult {
    /// Equivalent reference-material mass behind the radii
    pub fn reference_equivalent_quantity(&self) -> Kilograms {
        self.reference_equivalent_quantity
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Zones, most severe (smallest) first
    pub fn zones(&self) -> &[EffectZone] {
        &self.zones
    }

    /// Radius for a threshold name, matched like `ThresholdRegistry::lookup`
    pub fn radius(&self, threshold: &str) -> Option<Meters> {
        let key = normalize_name(threshold);
        self.zones
            .iter()
            .find(|z| normalize_name(&z.threshold) == key)
            .map(|z| z.radius)
    }

    /// Threshold name -> radius
    pub fn zone_radii(&self) -> FxHashMap<&str, Meters> {
        self.zones
            .iter()
            .map(|z| (z.threshold.as_str(), z.radius))
            .collect()
    }

    /// The least severe, widest zone
    pub fn outermost(&self) -> Option<&EffectZone> {
        self.zones.last()
    }

    /// Most severe zone reaching `distance` from the origin
    ///
    /// Zero-radius zones contain nothing, so a null scenario classifies every
    /// point, the origin included, as outside all zones.
    pub fn zone_at_distance(&self, distance: Meters) -> Option<&EffectZone> {
        self.zones
            .iter()
            .find(|z| *z.radius > 0.0 && distance <= z.radius)
    }

    /// Most severe zone containing `point`, by great-circle distance
    pub fn zone_at(&self, point: &GeoPoint) -> Option<&EffectZone> {
        self.zone_at_distance(self.origin.haversine_distance(point))
    }

    /// Area of the ring belonging only to zone `index` (its disc minus the next more severe disc)
    pub fn band_area(&self, index: usize) -> Option<SquareMeters> {
        let zone = self.zones.get(index)?;
        let inner = index
            .checked_sub(1)
            .and_then(|i| self.zones.get(i))
            .map_or(SquareMeters::default(), EffectZone::area);
        Some(zone.area().saturating_sub(inner))
    }
}

/// Package one model evaluation into a result, refusing zones that do not nest
///
/// # Errors
/// Returns `ZoneError::ZoneOrderingViolation` if a more severe zone reaches
/// further than a less severe one. Radii are never reordered or clamped.
pub fn classify(evaluation: ModelEvaluation) -> Result<EffectZoneResult> {
    let ModelEvaluation {
        reference_equivalent_quantity,
        radii,
        origin,
    } = evaluation;

    let zones: Vec<EffectZone> = radii
        .into_iter()
        .map(|(threshold, radius)| EffectZone { threshold, radius })
        .collect();

    for pair in zones.windows(2) {
        let (inner, outer) = (&pair[0], &pair[1]);
        if inner.radius > outer.radius {
            error!(
                "Zone ordering violation: '{}' reaches {} but less severe '{}' only {}; \
                 threshold table needs attention",
                inner.threshold, inner.radius, outer.threshold, outer.radius
            );
            return Err(ZoneError::ZoneOrderingViolation {
                inner: inner.threshold.clone(),
                inner_radius_m: *inner.radius,
                outer: outer.threshold.clone(),
                outer_radius_m: *outer.radius,
            });
        }
    }

    Ok(EffectZoneResult {
        reference_equivalent_quantity,
        zones,
        origin,
    })
}

/// Assemble a result for `scenario` from radii listed most severe first
///
/// # Errors
/// Returns `ZoneError::ZoneOrderingViolation` if the radii do not nest
pub fn assemble(
    scenario: &Scenario,
    reference_equivalent_quantity: Kilograms,
    radii_by_threshold: Vec<(String, Meters)>,
) -> Result<EffectZoneResult> {
    classify(ModelEvaluation {
        reference_equivalent_quantity,
        radii: radii_by_threshold,
        origin: scenario.origin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> Scenario {
        Scenario::new("TNT", 1.0, 1.0, GeoPoint::new(-31.95, 115.86))
    }

    fn radii(values: &[(&str, f64)]) -> Vec<(String, Meters)> {
        values
            .iter()
            .map(|&(n, r)| (n.to_string(), Meters::new(r)))
            .collect()
    }

    #[test]
    fn test_assemble_keeps_order_and_origin() {
        let result = assemble(
            &scenario(),
            Kilograms::new(8.0),
            radii(&[("inner", 5.0), ("outer", 20.0)]),
        )
        .unwrap();
        assert_eq!(result.zones()[0].threshold, "inner");
        assert_eq!(result.outermost().unwrap().threshold, "outer");
        assert_eq!(result.origin(), GeoPoint::new(-31.95, 115.86));
        assert_eq!(*result.reference_equivalent_quantity(), 8.0);
        assert_eq!(result.zone_radii()["outer"], Meters::new(20.0));
    }

    #[test]
    fn test_radius_lookup_ignores_case_and_padding() {
        let result = assemble(
            &scenario(),
            Kilograms::new(1.0),
            radii(&[("Total Destruction", 2.5), ("Window Breakage", 14.8)]),
        )
        .unwrap();
        assert_eq!(result.radius("total destruction"), Some(Meters::new(2.5)));
        assert_eq!(result.radius("  WINDOW BREAKAGE "), Some(Meters::new(14.8)));
        assert_eq!(result.radius("Total Destruction"), Some(Meters::new(2.5)));
        assert!(result.radius("Light Damage").is_none());
    }

    #[test]
    fn test_equal_radii_nest() {
        assert!(assemble(
            &scenario(),
            Kilograms::ZERO,
            radii(&[("a", 0.0), ("b", 0.0)])
        )
        .is_ok());
    }

    #[test]
    fn test_violation_surfaced_not_corrected() {
        let err = assemble(
            &scenario(),
            Kilograms::new(1.0),
            radii(&[("severe", 30.0), ("mild", 10.0)]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ZoneError::ZoneOrderingViolation {
                inner: "severe".into(),
                inner_radius_m: 30.0,
                outer: "mild".into(),
                outer_radius_m: 10.0,
            }
        );
    }

    #[test]
    fn test_zone_at_distance_picks_most_severe() {
        let result = assemble(
            &scenario(),
            Kilograms::new(1.0),
            radii(&[("a", 10.0), ("b", 20.0), ("c", 40.0)]),
        )
        .unwrap();
        assert_eq!(result.zone_at_distance(Meters::new(0.0)).unwrap().threshold, "a");
        assert_eq!(result.zone_at_distance(Meters::new(10.0)).unwrap().threshold, "a");
        assert_eq!(result.zone_at_distance(Meters::new(15.0)).unwrap().threshold, "b");
        assert_eq!(result.zone_at_distance(Meters::new(40.0)).unwrap().threshold, "c");
        assert!(result.zone_at_distance(Meters::new(40.1)).is_none());
    }

    #[test]
    fn test_zero_radius_zones_contain_nothing() {
        let result = assemble(&scenario(), Kilograms::ZERO, radii(&[("a", 0.0)])).unwrap();
        assert!(result.zone_at_distance(Meters::ZERO).is_none());
    }

    #[test]
    fn test_zone_at_point() {
        let result = assemble(
            &scenario(),
            Kilograms::new(1.0),
            radii(&[("a", 100.0), ("b", 1000.0)]),
        )
        .unwrap();
        // ~556 m north of the origin
        let point = GeoPoint::new(-31.945, 115.86);
        assert_eq!(result.zone_at(&point).unwrap().threshold, "b");
        assert_eq!(result.zone_at(&result.origin()).unwrap().threshold, "a");
    }

    #[test]
    fn test_band_area_excludes_inner_disc() {
        let result = assemble(
            &scenario(),
            Kilograms::new(1.0),
            radii(&[("a", 1.0), ("b", 2.0)]),
        )
        .unwrap();
        assert_relative_eq!(*result.band_area(0).unwrap(), std::f64::consts::PI);
        assert_relative_eq!(*result.band_area(1).unwrap(), 3.0 * std::f64::consts::PI);
        assert!(result.band_area(2).is_none());
    }
}
