//! Reporting adapter: map rings and table rows
//!
//! Shapes an [`EffectZoneResult`] for the map and table renderers. Only the
//! table values are rounded; ring radii are passed through unchanged so the
//! drawn geometry matches the calculation exactly.

use serde::Serialize;

use crate::core_types::units::{Kilopascals, Meters, Psi};
use crate::core_types::GeoPoint;
use crate::error::Result;
use crate::registry::ThresholdRegistry;
use crate::zones::EffectZoneResult;

/// Decimal places for radii and areas in the table
const RADIUS_DECIMALS: i32 = 1;
/// Decimal places for trigger pressures in the table
const PRESSURE_DECIMALS: i32 = 1;

/// Everything a renderer needs about one zone, severity order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReportEntry {
    pub name: String,
    pub radius: Meters,
    pub trigger_value: Kilopascals,
    pub trigger_value_secondary: Psi,
    pub color: String,
    pub description: String,
}

/// A circle to draw around the origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRing {
    pub center: GeoPoint,
    /// Unrounded radius, meters
    pub radius_m: f64,
    pub color: String,
    pub tooltip: String,
}

/// One results-table row, display-rounded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub threshold: String,
    pub overpressure_kpa: f64,
    pub overpressure_psi: f64,
    pub radius_m: f64,
    /// Area of this zone's ring, excluding the more severe zones inside it
    pub band_area_ha: f64,
    pub description: String,
}

/// Serializable bundle of everything the renderers consume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReport {
    pub origin: GeoPoint,
    pub reference_equivalent_kg: f64,
    pub rings: Vec<MapRing>,
    pub rows: Vec<TableRow>,
}

/// Join each zone with its threshold metadata, most severe first
///
/// # Errors
/// Returns `UnknownThreshold` if the result names a threshold missing from `thresholds`
pub fn report_entries(
    result: &EffectZoneResult,
    thresholds: &ThresholdRegistry,
) -> Result<Vec<ZoneReportEntry>> {
    result
        .zones()
        .iter()
        .map(|zone| {
            let t = thresholds.lookup(&zone.threshold)?;
            Ok(ZoneReportEntry {
                name: t.name.clone(),
                radius: zone.radius,
                trigger_value: t.trigger_value,
                trigger_value_secondary: t.trigger_value_secondary,
                color: t.color.clone(),
                description: t.description.clone(),
            })
        })
        .collect()
}

/// Rings to draw, largest first so the most severe ends up on top
///
/// # Errors
/// Returns `UnknownThreshold` if the result and table disagree
pub fn map_rings(result: &EffectZoneResult, thresholds: &ThresholdRegistry) -> Result<Vec<MapRing>> {
    let mut rings: Vec<MapRing> = report_entries(result, thresholds)?
        .into_iter()
        .map(|entry| MapRing {
            center: result.origin(),
            radius_m: *entry.radius,
            tooltip: format!(
                "{}: {} ({}) within {}",
                entry.name, entry.trigger_value, entry.trigger_value_secondary,
                entry.radius
            ),
            color: entry.color,
        })
        .collect();
    rings.reverse();
    Ok(rings)
}

/// One row per threshold, most severe first
///
/// # Errors
/// Returns `UnknownThreshold` if the result and table disagree
pub fn table_rows(
    result: &EffectZoneResult,
    thresholds: &ThresholdRegistry,
) -> Result<Vec<TableRow>> {
    Ok(report_entries(result, thresholds)?
        .into_iter()
        .enumerate()
        .map(|(i, entry)| TableRow {
            overpressure_kpa: round_to(*entry.trigger_value, PRESSURE_DECIMALS),
            overpressure_psi: round_to(*entry.trigger_value_secondary, PRESSURE_DECIMALS),
            radius_m: round_to(*entry.radius, RADIUS_DECIMALS),
            band_area_ha: result
                .band_area(i)
                .map_or(0.0, |a| round_to(a.hectares(), RADIUS_DECIMALS + 1)),
            threshold: entry.name,
            description: entry.description,
        })
        .collect())
}

/// Rings and rows together
///
/// # Errors
/// Returns `UnknownThreshold` if the result and table disagree
pub fn build_report(result: &EffectZoneResult, thresholds: &ThresholdRegistry) -> Result<ZoneReport> {
    Ok(ZoneReport {
        origin: result.origin(),
        reference_equivalent_kg: round_to(*result.reference_equivalent_quantity(), 2),
        rings: map_rings(result, thresholds)?,
        rows: table_rows(result, thresholds)?,
    })
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
