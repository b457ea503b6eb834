use std::ffi::CString;
use std::os::raw::c_char;

use hazard_zones_core::report::report_entries;
use hazard_zones_core::{EffectZoneResult, GeoPoint, ThresholdRegistry};

use crate::error::DefaultHazardZonesError;
use crate::helpers::c_string_lossy;

/// One zone as seen from C. Strings are borrowed from the owning result.
#[repr(C)]
pub struct HazardZoneRing {
    /// Position in severity order, 0 = most severe.
    pub severity_rank: usize,

    /// Unrounded zone radius (m).
    pub radius_m: f64,

    /// Trigger overpressure (kPa).
    pub trigger_kpa: f64,

    /// Trigger overpressure (psi).
    pub trigger_psi: f64,

    /// Threshold name. Valid until the result is destroyed.
    pub name: *const c_char,

    /// Display colour. Valid until the result is destroyed.
    pub color: *const c_char,

    /// Consequence description. Valid until the result is destroyed.
    pub description: *const c_char,
}

/// Per-zone data with owned C strings.
struct ZoneRecord {
    radius_m: f64,
    trigger_kpa: f64,
    trigger_psi: f64,
    name: CString,
    color: CString,
    description: CString,
}

/// Computed zones for one scenario, owned by the caller.
///
/// Free with `hazard_zones_result_destroy`.
pub struct HazardZonesResult {
    pub(crate) result: EffectZoneResult,
    records: Vec<ZoneRecord>,
}

impl HazardZonesResult {
    pub(crate) fn new(
        result: EffectZoneResult,
        thresholds: &ThresholdRegistry,
    ) -> Result<Box<Self>, DefaultHazardZonesError> {
        let records = report_entries(&result, thresholds)?
            .into_iter()
            .map(|entry| ZoneRecord {
                radius_m: *entry.radius,
                trigger_kpa: *entry.trigger_value,
                trigger_psi: *entry.trigger_value_secondary,
                name: c_string_lossy(&entry.name),
                color: c_string_lossy(&entry.color),
                description: c_string_lossy(&entry.description),
            })
            .collect();
        Ok(Box::new(Self { result, records }))
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn ring(&self, index: usize) -> Result<HazardZoneRing, DefaultHazardZonesError> {
        let record = self
            .records
            .get(index)
            .ok_or_else(|| DefaultHazardZonesError::index_out_of_range(index, self.len()))?;
        Ok(HazardZoneRing {
            severity_rank: index,
            radius_m: record.radius_m,
            trigger_kpa: record.trigger_kpa,
            trigger_psi: record.trigger_psi,
            name: record.name.as_ptr(),
            color: record.color.as_ptr(),
            description: record.description.as_ptr(),
        })
    }

    /// Severity rank of the most severe zone containing the point, if any.
    pub(crate) fn zone_index_at(&self, point: &GeoPoint) -> Option<usize> {
        let zone = self.result.zone_at(point)?;
        self.result
            .zones()
            .iter()
            .position(|z| z.threshold == zone.threshold)
    }
}
