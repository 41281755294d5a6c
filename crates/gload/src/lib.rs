//! # gload
//!
//! OpenGL API loader. Resolves the catalogued GL entry points through a
//! configurable backend and binds them into process-wide slots, after which
//! the typed wrappers in [`gl`] call straight through the bound pointers.
//! A valid rendering context must already exist when loading runs; this
//! crate never creates one.
//!
//! ## Backends
//!
//! The resolution strategy is fixed per build by a cargo feature:
//!
//! | feature       | resolver                                   |
//! |---------------|--------------------------------------------|
//! | (none)        | built-in `dlopen`/`LoadLibrary` lookup     |
//! | `backend-glx` | `glXGetProcAddress`                        |
//! | `backend-wgl` | `wglGetProcAddress` (+ module fallback)    |
//! | `backend-egl` | `eglGetProcAddress`                        |
//!
//! The three context-query features are mutually exclusive; enabling more
//! than one is rejected at compile time. Hosts whose windowing library
//! already exposes a query function can skip the backend entirely and hand
//! it to [`load_with_resolver`].
//!
//! ## Concurrency
//!
//! Loading is synchronous and unsynchronized with respect to the slots:
//! perform it once, during single-threaded startup, before any bound entry
//! point is invoked, and do not call [`unload`] while bound pointers may
//! still be used. Diagnostics go through the `log` facade; install and
//! filter a logger to see them.

use std::ffi::CStr;
use std::sync::atomic::{AtomicBool, Ordering};

use log::error;

pub use gload_core::backend::{Backend, GetProcAddress};
pub use gload_core::engine::MissingSymbols;
pub use gload_core::table::{ProcPtr, ProcedureEntry};

pub mod gl;

#[cfg(all(feature = "backend-glx", feature = "backend-wgl"))]
compile_error!("backend features are mutually exclusive: backend-glx conflicts with backend-wgl");
#[cfg(all(feature = "backend-glx", feature = "backend-egl"))]
compile_error!("backend features are mutually exclusive: backend-glx conflicts with backend-egl");
#[cfg(all(feature = "backend-wgl", feature = "backend-egl"))]
compile_error!("backend features are mutually exclusive: backend-wgl conflicts with backend-egl");

#[cfg(feature = "backend-glx")]
#[link(name = "GL")]
unsafe extern "C" {
    fn glXGetProcAddress(name: *const std::ffi::c_char) -> *const std::ffi::c_void;
}

#[cfg(feature = "backend-egl")]
#[link(name = "EGL")]
unsafe extern "C" {
    fn eglGetProcAddress(name: *const std::ffi::c_char) -> *const std::ffi::c_void;
}

#[cfg(feature = "backend-wgl")]
#[link(name = "opengl32")]
unsafe extern "system" {
    fn wglGetProcAddress(name: *const std::ffi::c_char) -> *const std::ffi::c_void;
}

/// `wglGetProcAddress` only answers for extension entry points; OpenGL 1.1
/// commands are exported directly from `opengl32.dll`, so a null answer
/// falls back to the module-handle lookup.
#[cfg(feature = "backend-wgl")]
unsafe extern "C" fn wgl_query(name: *const std::ffi::c_char) -> *const std::ffi::c_void {
    let ptr = unsafe { wglGetProcAddress(name) };
    if !ptr.is_null() {
        return ptr;
    }
    BUILTIN_USED.store(true, Ordering::Relaxed);
    gload_dl::resolve(unsafe { CStr::from_ptr(name) })
}

/// Whether the handle manager was ever engaged, so [`unload`] knows if
/// there is anything to release.
static BUILTIN_USED: AtomicBool = AtomicBool::new(false);

/// The resolution strategy this build was configured with.
#[must_use]
pub fn active_backend() -> Backend {
    #[cfg(feature = "backend-glx")]
    return Backend::ContextQuery(glXGetProcAddress);
    #[cfg(feature = "backend-wgl")]
    return Backend::ContextQuery(wgl_query);
    #[cfg(feature = "backend-egl")]
    return Backend::ContextQuery(eglGetProcAddress);
    #[cfg(not(any(
        feature = "backend-glx",
        feature = "backend-wgl",
        feature = "backend-egl"
    )))]
    Backend::BuiltIn
}

/// Loads every catalogued entry point through the configured backend.
///
/// Returns `true` when the whole surface bound. On the first symbol the
/// backend cannot produce, loading stops and `false` is returned, leaving
/// the table partially bound in catalogue order; a later call (or a call
/// to [`load_with`] with a different resolver) picks up where it left off
/// without re-resolving what already bound.
pub fn load() -> bool {
    let backend = active_backend();
    if backend.owns_library_handle() {
        BUILTIN_USED.store(true, Ordering::Relaxed);
    }
    let ok = match backend {
        Backend::BuiltIn => gl::with_table(|table| {
            gload_core::engine::load_with(table, |name| gload_dl::resolve(name))
        }),
        Backend::ContextQuery(query) => gl::with_table(|table| {
            gload_core::engine::load_with(table, |name| unsafe { query(name.as_ptr()) })
        }),
    };
    if !ok {
        error!("OpenGL entry-point load failed; table is partially bound");
    }
    ok
}

/// Loads the catalogued entry points through a caller-supplied resolver,
/// bypassing backend selection. Same fail-fast and skip-if-bound behavior
/// as [`load`].
pub fn load_with<R>(resolve: R) -> bool
where
    R: FnMut(&CStr) -> ProcPtr,
{
    gl::with_table(|table| gload_core::engine::load_with(table, resolve))
}

/// Loads through a raw context-query function of the kind windowing
/// libraries hand out (`SDL_GL_GetProcAddress`, `glfwGetProcAddress`, ...).
///
/// `None` models the null resolver: it fails immediately without touching
/// any slot.
pub fn load_with_resolver(query: Option<GetProcAddress>) -> bool {
    let Some(query) = query else {
        error!("null resolver supplied");
        return false;
    };
    load_with(|name| unsafe { query(name.as_ptr()) })
}

/// Diagnostic variant of [`load_with`]: attempts every still-empty entry
/// and reports the complete set of symbols the resolver could not produce,
/// instead of stopping at the first.
pub fn load_all_with<R>(resolve: R) -> Result<(), MissingSymbols>
where
    R: FnMut(&CStr) -> ProcPtr,
{
    gl::with_table(|table| gload_core::engine::load_all(table, resolve))
}

/// Releases the process-wide library handle if the built-in lookup was
/// ever engaged; a no-op otherwise, since external resolvers hold no
/// engine-owned resource.
///
/// Previously bound slots are not cleared: invoking a bound entry point
/// after `unload` is undefined, by the caller's contract. Always returns
/// `true`.
pub fn unload() -> bool {
    if BUILTIN_USED.swap(false, Ordering::Relaxed) {
        gload_dl::release();
    }
    true
}

/// The binding surface is process-wide state; every test touching it takes
/// this lock first.
#[cfg(test)]
pub(crate) static TEST_SERIAL: std::sync::Mutex<()> = std::sync::Mutex::new(());
