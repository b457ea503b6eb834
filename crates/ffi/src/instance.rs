use std::os::raw::c_char;
use std::ptr;

use hazard_zones_core::{HazardRegistries, SubstanceRegistry, ThresholdRegistry};
use tracing::info;

use crate::error::{DefaultHazardZonesError, HazardZonesErrorCode};
use crate::helpers::{optional_str_from_ptr, track_error, track_result};

/// Engine handle holding the substance and threshold tables.
///
/// # Thread Safety
/// The tables are immutable once built, so one engine may be shared by any number of
/// threads calling `hazard_zones_compute_blast` concurrently without locking.
pub struct HazardZonesEngine {
    pub(crate) registries: HazardRegistries,
}

impl HazardZonesEngine {
    /// Build an engine from optional JSON tables; a missing table falls back to the builtin one.
    ///
    /// # Errors
    ///
    /// Returns `HazardZonesErrorCode::InvalidRegistry` if either table fails to parse or validate.
    pub(crate) fn new(
        substances_json: Option<&str>,
        thresholds_json: Option<&str>,
    ) -> Result<Box<Self>, DefaultHazardZonesError> {
        let substances = match substances_json {
            Some(json) => SubstanceRegistry::from_json_str(json)?,
            None => SubstanceRegistry::builtin(),
        };
        let thresholds = match thresholds_json {
            Some(json) => ThresholdRegistry::from_json_str(json)?,
            None => ThresholdRegistry::builtin(),
        };
        info!(
            "Created hazard zones engine ({} substances, {} thresholds)",
            substances.len(),
            thresholds.len()
        );

        Ok(Box::new(Self {
            registries: HazardRegistries::new(substances, thresholds),
        }))
    }
}

/// Create an engine and return it via out-parameter.
///
/// Parameters
/// - `substances_json`: JSON substance table, or null for the builtin table.
/// - `thresholds_json`: JSON threshold table (most severe first), or null for the builtin table.
/// - `out_engine`: Pointer to receive the created engine. Must be non-null.
///   - On success: set to a valid `HazardZonesEngine` pointer
///   - On failure: set to null
///
/// Returns
/// - `HazardZonesErrorCode::Ok` (0) — success
/// - `HazardZonesErrorCode::NullPointer` — `out_engine` is null
/// - `HazardZonesErrorCode::InvalidString` — a table is not valid UTF-8
/// - `HazardZonesErrorCode::InvalidRegistry` — a table failed to parse or validate
///
/// # Safety
///
/// - `out_engine` must be a valid, non-null pointer to writable memory.
/// - Non-null string arguments must be valid null-terminated C strings.
/// - The caller takes ownership of the engine and MUST call `hazard_zones_engine_destroy`
///   exactly once.
///
/// Example (C)
/// ```c
/// HazardZonesEngine* engine = NULL;
/// if (hazard_zones_engine_new(NULL, NULL, &engine) != Ok) {
///     fprintf(stderr, "%s\n", hazard_zones_get_last_error());
///     return;
/// }
/// // ... use engine ...
/// hazard_zones_engine_destroy(engine);
/// ```
#[no_mangle]
pub unsafe extern "C" fn hazard_zones_engine_new(
    substances_json: *const c_char,
    thresholds_json: *const c_char,
    out_engine: *mut *mut HazardZonesEngine,
) -> HazardZonesErrorCode {
    if out_engine.is_null() {
        return track_error(&DefaultHazardZonesError::null_pointer("out_engine"));
    }

    let built = optional_str_from_ptr(substances_json, "substances_json").and_then(|subs| {
        let thresholds = optional_str_from_ptr(thresholds_json, "thresholds_json")?;
        HazardZonesEngine::new(subs, thresholds)
    });

    match track_result(built) {
        Ok(engine) => {
            unsafe {
                *out_engine = Box::into_raw(engine);
            }
            HazardZonesErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_engine = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an engine previously created by `hazard_zones_engine_new`.
///
/// Results computed from the engine own their data and remain valid afterwards.
///
/// # Safety
/// - The pointer MUST have been created by `hazard_zones_engine_new` and not freed already.
/// - If `ptr` is null, this function is a no-op.
#[no_mangle]
pub unsafe extern "C" fn hazard_zones_engine_destroy(ptr: *mut HazardZonesEngine) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: The pointer was created by `Box::into_raw` in `hazard_zones_engine_new`.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
