//! Resolution backend variant.
//!
//! Which strategy produces the resolver is fixed per build: either a
//! context-query function linked in from the platform's GL interface
//! library (`glXGetProcAddress` and friends, selected by a cargo feature on
//! the facade crate), or the built-in dynamic-library lookup served by
//! `gload-dl`. The feature gates reject an ill-formed selection at compile
//! time; by the time a `Backend` value exists it is already well-formed.

use std::ffi::{c_char, c_void};

/// The C shape of a context-query function: null-terminated symbol name in,
/// function pointer or null out.
pub type GetProcAddress = unsafe extern "C" fn(*const c_char) -> *const c_void;

/// The resolution strategy a build settled on.
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    /// Resolve through the process-wide handle to the implementation
    /// library (`gload-dl`). The default when no context-query feature is
    /// selected.
    BuiltIn,
    /// Resolve through an externally linked context-query function.
    ContextQuery(GetProcAddress),
}

impl Backend {
    /// Whether this backend owns an engine-managed resource that
    /// `unload()` must release.
    #[must_use]
    pub fn owns_library_handle(&self) -> bool {
        matches!(self, Backend::BuiltIn)
    }
}
