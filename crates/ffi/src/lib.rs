//! C ABI for the hazard zone engine
//!
//! Opaque handles (`HazardZonesEngine`, `HazardZonesResult`) are created and
//! destroyed through this API. Every fallible call returns a
//! `HazardZonesErrorCode` and records a message retrievable with
//! `hazard_zones_get_last_error` on the same thread.

mod error;
mod helpers;
mod instance;
mod result;

use std::os::raw::c_char;
use std::ptr;

use hazard_zones_core::{BlastOverpressureModel, GeoPoint, HazardModel, Scenario};

pub use error::{
    hazard_zones_get_last_error, hazard_zones_get_last_error_code, HazardZonesErrorCode,
};
pub use instance::{hazard_zones_engine_destroy, hazard_zones_engine_new, HazardZonesEngine};
pub use result::{HazardZoneRing, HazardZonesResult};

use crate::error::DefaultHazardZonesError;
use crate::helpers::{ref_from_ptr, str_from_ptr, track_error, track_result};

/// Efficiency argument selecting the substance's default efficiency.
pub const HAZARD_ZONES_DEFAULT_EFFICIENCY: f64 = -1.0;

fn compute_blast(
    engine: *const HazardZonesEngine,
    substance_name: *const c_char,
    total_mass_kg: f64,
    efficiency_percent: f64,
    latitude: f64,
    longitude: f64,
) -> Result<Box<HazardZonesResult>, DefaultHazardZonesError> {
    let engine = ref_from_ptr(engine, "engine")?;
    let name = str_from_ptr(substance_name, "substance_name")?;
    let registries = &engine.registries;
    let origin = GeoPoint::new(latitude, longitude);

    let scenario = if efficiency_percent == HAZARD_ZONES_DEFAULT_EFFICIENCY {
        let substance = registries.substances.lookup(name)?;
        Scenario::with_default_efficiency(substance, total_mass_kg, origin)
    } else {
        Scenario::from_percent(name, total_mass_kg, efficiency_percent, origin)?
    };

    let zones = BlastOverpressureModel::from_registries(registries).run(&scenario)?;
    HazardZonesResult::new(zones, &registries.thresholds)
}

/// Compute blast overpressure zones for one release.
///
/// Parameters
/// - `engine`: engine from `hazard_zones_engine_new`.
/// - `substance_name`: substance key, case-insensitive (e.g. `"TNT"`, `"Propane"`).
/// - `total_mass_kg`: released mass, must be > 0.
/// - `efficiency_percent`: share of the mass taking part in the blast, in (0, 100],
///   or `HAZARD_ZONES_DEFAULT_EFFICIENCY` to use the substance default.
/// - `latitude`, `longitude`: origin in decimal degrees.
/// - `out_result`: receives the result on success, null on failure.
///
/// Returns
/// - `Ok` — success
/// - `NullPointer` / `InvalidString` — bad pointer arguments
/// - `UnknownSubstance` — substance not in the engine's table
/// - `InvalidScenario` — mass, efficiency or coordinates out of range
/// - `ZoneOrderingViolation` — the threshold table is defective
///
/// # Safety
/// - `engine` must be null or a live engine pointer.
/// - `substance_name` must be null or a valid null-terminated C string.
/// - `out_result` must be null or point to writable memory. The caller owns the result
///   and MUST free it with `hazard_zones_result_destroy`.
#[no_mangle]
pub unsafe extern "C" fn hazard_zones_compute_blast(
    engine: *const HazardZonesEngine,
    substance_name: *const c_char,
    total_mass_kg: f64,
    efficiency_percent: f64,
    latitude: f64,
    longitude: f64,
    out_result: *mut *mut HazardZonesResult,
) -> HazardZonesErrorCode {
    if out_result.is_null() {
        return track_error(&DefaultHazardZonesError::null_pointer("out_result"));
    }

    match track_result(compute_blast(
        engine,
        substance_name,
        total_mass_kg,
        efficiency_percent,
        latitude,
        longitude,
    )) {
        Ok(result) => {
            unsafe {
                *out_result = Box::into_raw(result);
            }
            HazardZonesErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_result = ptr::null_mut();
            }
            code
        }
    }
}

/// Number of zones in a result. Returns 0 for a null pointer.
///
/// # Safety
/// `result` must be null or a live result pointer.
#[no_mangle]
pub unsafe extern "C" fn hazard_zones_result_zone_count(result: *const HazardZonesResult) -> usize {
    ref_from_ptr(result, "result").map_or(0, HazardZonesResult::len)
}

/// TNT-equivalent mass behind a result (kg). Returns NaN for a null pointer.
///
/// # Safety
/// `result` must be null or a live result pointer.
#[no_mangle]
pub unsafe extern "C" fn hazard_zones_result_equivalent_kg(
    result: *const HazardZonesResult,
) -> f64 {
    ref_from_ptr(result, "result").map_or(f64::NAN, |r| {
        *r.result.reference_equivalent_quantity()
    })
}

/// Read zone `index` (0 = most severe) into `out_ring`.
///
/// String fields of the ring borrow from the result and are valid until
/// `hazard_zones_result_destroy`. **DO NOT FREE THEM.**
///
/// # Safety
/// - `result` must be null or a live result pointer.
/// - `out_ring` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn hazard_zones_result_zone(
    result: *const HazardZonesResult,
    index: usize,
    out_ring: *mut HazardZoneRing,
) -> HazardZonesErrorCode {
    if out_ring.is_null() {
        return track_error(&DefaultHazardZonesError::null_pointer("out_ring"));
    }

    let ring = ref_from_ptr(result, "result").and_then(|r| r.ring(index));
    match track_result(ring) {
        Ok(ring) => {
            unsafe {
                *out_ring = ring;
            }
            HazardZonesErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Severity rank of the most severe zone containing a point, or -1 if outside all zones
/// (or `result` is null).
///
/// # Safety
/// `result` must be null or a live result pointer.
#[no_mangle]
pub unsafe extern "C" fn hazard_zones_result_zone_at(
    result: *const HazardZonesResult,
    latitude: f64,
    longitude: f64,
) -> isize {
    ref_from_ptr(result, "result")
        .ok()
        .and_then(|r| r.zone_index_at(&GeoPoint::new(latitude, longitude)))
        .and_then(|i| isize::try_from(i).ok())
        .unwrap_or(-1)
}

/// Destroys a result from `hazard_zones_compute_blast`. No-op for null.
///
/// # Safety
/// The pointer MUST have been created by `hazard_zones_compute_blast` and not freed already.
#[no_mangle]
pub unsafe extern "C" fn hazard_zones_result_destroy(ptr: *mut HazardZonesResult) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `hazard_zones_compute_blast`.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
