//! # gload-dl
//!
//! Dynamic library handle manager: lazily acquires a process-wide handle to
//! the platform's default OpenGL implementation library and serves raw
//! symbol lookups against it.
//!
//! The handle is a singleton. It is opened on the first lookup that needs
//! it, reused by every subsequent lookup, and closed only by an explicit
//! [`release`]. Releasing does not touch slots that were bound through the
//! handle; invoking such a function pointer after `release` is undefined,
//! and not invoking it is the caller's contract (see the facade crate's
//! concurrency notes).

use std::ffi::{CStr, c_void};
use std::ptr;

use log::{debug, error};
use parking_lot::Mutex;
use thiserror::Error;

pub mod platform;

use platform::{NativeLoader, PlatformLoader};

/// Failure modes of the handle manager. Rendered into the log stream; the
/// public lookup surface stays pointer-or-null.
#[derive(Debug, Error)]
pub enum DlError {
    /// No candidate library could be opened.
    #[error("no loadable OpenGL library among {tried:?}")]
    NoCandidate { tried: Vec<String> },
    /// The library is open but does not export the requested symbol.
    #[error("undefined symbol: {name}")]
    SymbolMiss { name: String },
}

/// Caching wrapper around a [`NativeLoader`].
///
/// Holds at most one open handle. Generic over the loader so tests can
/// count how often the platform-open primitive actually runs.
pub struct LibraryCache<L: NativeLoader> {
    loader: L,
    handle: Option<L::Handle>,
}

impl<L: NativeLoader> LibraryCache<L> {
    #[must_use]
    pub const fn new(loader: L) -> Self {
        Self {
            loader,
            handle: None,
        }
    }

    /// Whether a handle is currently held.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Resolves `name`, opening the library first if no handle is held.
    ///
    /// Candidates are tried in order and the first successful open is
    /// cached. If every candidate fails, null is returned and nothing is
    /// cached: the next call retries the whole list from scratch, so a
    /// library installed later is still picked up. A symbol miss also
    /// returns null but keeps the handle open; one absent entry point does
    /// not poison lookups of the others.
    pub fn resolve(&mut self, candidates: &[&CStr], name: &CStr) -> *const c_void {
        if self.handle.is_none() {
            for candidate in candidates {
                if let Some(handle) = self.loader.open(candidate) {
                    debug!("opened {}", candidate.to_string_lossy());
                    self.handle = Some(handle);
                    break;
                }
            }
        }
        let Some(handle) = self.handle.take() else {
            let tried = candidates
                .iter()
                .map(|c| c.to_string_lossy().into_owned())
                .collect();
            error!("{}", DlError::NoCandidate { tried });
            return ptr::null();
        };
        let sym = self.loader.lookup(&handle, name);
        self.handle = Some(handle);
        if sym.is_null() {
            error!(
                "{}",
                DlError::SymbolMiss {
                    name: name.to_string_lossy().into_owned(),
                }
            );
        }
        sym
    }

    /// Closes the handle if one is held. Idempotent; a no-op when the
    /// library was never opened.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.loader.close(handle);
            debug!("released implementation library handle");
        }
    }
}

/// The process-wide singleton cache backing [`resolve`] and [`release`].
static SHARED: Mutex<LibraryCache<PlatformLoader>> = Mutex::new(LibraryCache::new(PlatformLoader));

/// Resolves `name` against the process-wide implementation library handle,
/// opening it on first use. Null on failure.
pub fn resolve(name: &CStr) -> *const c_void {
    SHARED.lock().resolve(platform::CANDIDATES, name)
}

/// Closes the process-wide handle if it is open. Safe to call repeatedly
/// or without ever having loaded.
pub fn release() {
    SHARED.lock().release();
}
