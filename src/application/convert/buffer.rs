use std::{ffi::CStr, os::raw::c_char, ptr::NonNull, str::Utf8Error};

use super::types::ReleaseFn;

/// Scoped owner of one engine-allocated result.
///
/// The buffer goes back to the engine when the guard is dropped, so every exit
/// path of a conversion, including the decoding failure path, releases it
/// exactly once. The guard is neither `Send` nor `Clone`: a result belongs to
/// the call that received it.
pub(crate) struct EngineBuffer {
    ptr: NonNull<c_char>,
    release: ReleaseFn,
}

impl EngineBuffer {
    /// Take ownership of `ptr`. Returns `None` when the engine returned null,
    /// in which case there is nothing to release.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a NUL-terminated buffer allocated by the
    /// engine that `release` belongs to, and must not have been released yet.
    pub(crate) unsafe fn from_raw(ptr: *mut c_char, release: ReleaseFn) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr, release })
    }

    pub(crate) fn as_c_str(&self) -> &CStr {
        // SAFETY: `from_raw` requires a live, NUL-terminated engine buffer, and
        // the guard keeps it alive until drop.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    /// Validate the buffer as UTF-8 without copying.
    pub(crate) fn to_str(&self) -> Result<&str, Utf8Error> {
        self.as_c_str().to_str()
    }
}

impl Drop for EngineBuffer {
    fn drop(&mut self) {
        // SAFETY: the pointer came from the engine owning `release` and is
        // released here exactly once.
        unsafe { (self.release)(self.ptr.as_ptr()) }
    }
}
