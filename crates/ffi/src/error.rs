use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use hazard_zones_core::{RegistryError, ZoneError};

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait HazardZonesError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> HazardZonesErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `HazardZonesError` for FFI failures.
///
/// Wraps a `HazardZonesErrorCode` with a message; engine errors convert into it via `From`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultHazardZonesError {
    code: HazardZonesErrorCode,
    msg: String,
}

impl DefaultHazardZonesError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_result"`, `"engine"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: HazardZonesErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a C string that is not valid UTF-8.
    pub fn invalid_string(param_name: &str) -> Self {
        Self {
            code: HazardZonesErrorCode::InvalidString,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }

    /// Create error for a zone index past the end of a result.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self {
            code: HazardZonesErrorCode::IndexOutOfRange,
            msg: format!("Zone index {index} out of range (result has {len} zones)"),
        }
    }
}

impl HazardZonesError for DefaultHazardZonesError {
    fn code(&self) -> HazardZonesErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<ZoneError> for DefaultHazardZonesError {
    fn from(error: ZoneError) -> Self {
        let code = match error {
            ZoneError::UnknownSubstance { .. } => HazardZonesErrorCode::UnknownSubstance,
            ZoneError::UnknownThreshold { .. } => HazardZonesErrorCode::UnknownThreshold,
            ZoneError::InvalidScenario { .. } => HazardZonesErrorCode::InvalidScenario,
            ZoneError::ZoneOrderingViolation { .. } => HazardZonesErrorCode::ZoneOrderingViolation,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl From<RegistryError> for DefaultHazardZonesError {
    fn from(error: RegistryError) -> Self {
        Self {
            code: HazardZonesErrorCode::InvalidRegistry,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by hazard zone functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardZonesErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A C string argument was not valid UTF-8.
    InvalidString = 2,

    /// The requested substance is not in the substance table.
    UnknownSubstance = 3,

    /// Mass, efficiency, latitude or longitude out of range.
    InvalidScenario = 4,

    /// Computed zones do not nest; the threshold table is defective.
    ZoneOrderingViolation = 5,

    /// A substance or threshold table failed to parse or validate.
    InvalidRegistry = 6,

    /// Zone index past the end of the result.
    IndexOutOfRange = 7,

    /// A zone names a threshold missing from the threshold table.
    UnknownThreshold = 8,
}

impl From<DefaultHazardZonesError> for HazardZonesErrorCode {
    fn from(error: DefaultHazardZonesError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The `CString` is stored so the pointer handed out stays valid until the next call.
    static LAST_ERROR: RefCell<(Option<CString>, HazardZonesErrorCode)> = const { RefCell::new((None, HazardZonesErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, HazardZonesErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, HazardZonesErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// HazardZonesResult* result = NULL;
/// HazardZonesErrorCode err = hazard_zones_compute_blast(engine, "TNT", 50.0, 100.0, -31.95, 115.86, &result);
/// if (err != Ok) {
///     const char* error = hazard_zones_get_last_error();
///     if (error) {
///         printf("Zone calculation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn hazard_zones_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `HazardZonesErrorCode::Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn hazard_zones_get_last_error_code() -> HazardZonesErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
