use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use tracing::warn;

use crate::error::{
    with_last_error_mut, DefaultHazardZonesError, HazardZonesError, HazardZonesErrorCode,
};

/// Set the thread-local error message and code.
/// Accepts any type implementing `HazardZonesError` trait.
pub(crate) fn set_last_error(error: &impl HazardZonesError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Clear the thread-local error message and code.
/// Called on successful operations so a stale message is never reported.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = HazardZonesErrorCode::Ok;
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl HazardZonesError) -> HazardZonesErrorCode {
    warn!("hazard zones FFI call failed: {}", error.msg());
    set_last_error(error);
    error.code()
}

/// Record the outcome of a fallible operation: clear on success, track on failure.
pub(crate) fn track_result<T>(
    result: Result<T, DefaultHazardZonesError>,
) -> Result<T, HazardZonesErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Borrow a reference from a caller-supplied pointer.
///
/// The pointer must be null or point to a live `T` created by this library.
pub(crate) fn ref_from_ptr<'a, T>(
    ptr: *const T,
    param_name: &str,
) -> Result<&'a T, DefaultHazardZonesError> {
    // SAFETY: non-null pointers handed to us were created by `Box::into_raw`
    // in this crate and stay alive until the matching destroy call.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultHazardZonesError::null_pointer(param_name))
}

/// Borrow a UTF-8 string from a null-terminated C string.
pub(crate) fn str_from_ptr<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, DefaultHazardZonesError> {
    if ptr.is_null() {
        return Err(DefaultHazardZonesError::null_pointer(param_name));
    }
    // SAFETY: caller guarantees a valid null-terminated string for the duration of the call.
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| DefaultHazardZonesError::invalid_string(param_name))
}

/// Like `str_from_ptr`, but a null pointer means "not given".
pub(crate) fn optional_str_from_ptr<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<Option<&'a str>, DefaultHazardZonesError> {
    if ptr.is_null() {
        Ok(None)
    } else {
        str_from_ptr(ptr, param_name).map(Some)
    }
}

/// C string for a Rust string, dropping interior NULs rather than failing.
pub(crate) fn c_string_lossy(s: &str) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}
