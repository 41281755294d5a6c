//! Raw platform bindings for dynamic-library access.
//!
//! [`NativeLoader`] is the seam between the caching logic in `lib.rs` and
//! the platform's primitives, so the cache can be exercised in tests with a
//! fake that counts open/close calls. [`PlatformLoader`] is the real
//! implementation: the `dl*` family via `libc` on Unix, the Win32 module
//! API via `windows-sys` on Windows.

use std::ffi::{CStr, c_void};

/// Ordered candidate identifiers for the default implementation library.
/// The first one that opens wins.
#[cfg(all(unix, not(target_os = "macos")))]
pub const CANDIDATES: &[&CStr] = &[c"libGL.so.1", c"libGL.so"];

#[cfg(target_os = "macos")]
pub const CANDIDATES: &[&CStr] = &[
    c"/System/Library/Frameworks/OpenGL.framework/Versions/Current/OpenGL",
    c"/System/Library/Frameworks/OpenGL.framework/OpenGL",
];

#[cfg(windows)]
pub const CANDIDATES: &[&CStr] = &[c"opengl32.dll"];

/// Platform dynamic-library primitives behind a mockable seam.
pub trait NativeLoader {
    type Handle;

    /// Opens the library named `name`, or `None` if it cannot be loaded.
    fn open(&mut self, name: &CStr) -> Option<Self::Handle>;

    /// Looks `name` up against an open handle; null on a miss.
    fn lookup(&mut self, handle: &Self::Handle, name: &CStr) -> *const c_void;

    /// Closes an open handle.
    fn close(&mut self, handle: Self::Handle);
}

/// An opaque handle to an open implementation library.
///
/// The wrapped pointer is process-wide and only ever touched under the
/// cache lock, so moving it across threads is sound.
pub struct SharedObject(*mut c_void);

unsafe impl Send for SharedObject {}

/// The real platform loader.
pub struct PlatformLoader;

#[cfg(unix)]
impl NativeLoader for PlatformLoader {
    type Handle = SharedObject;

    fn open(&mut self, name: &CStr) -> Option<SharedObject> {
        // RTLD_GLOBAL matches what GL extension loaders conventionally use:
        // the implementation library's symbols must be visible to whatever
        // the driver itself pulls in.
        let raw = unsafe { libc::dlopen(name.as_ptr(), libc::RTLD_LAZY | libc::RTLD_GLOBAL) };
        if raw.is_null() { None } else { Some(SharedObject(raw)) }
    }

    fn lookup(&mut self, handle: &SharedObject, name: &CStr) -> *const c_void {
        unsafe { libc::dlsym(handle.0, name.as_ptr()) as *const c_void }
    }

    fn close(&mut self, handle: SharedObject) {
        unsafe {
            libc::dlclose(handle.0);
        }
    }
}

#[cfg(windows)]
impl NativeLoader for PlatformLoader {
    type Handle = SharedObject;

    fn open(&mut self, name: &CStr) -> Option<SharedObject> {
        let raw = unsafe {
            windows_sys::Win32::System::LibraryLoader::LoadLibraryA(name.as_ptr().cast())
        };
        if raw.is_null() {
            None
        } else {
            Some(SharedObject(raw.cast()))
        }
    }

    fn lookup(&mut self, handle: &SharedObject, name: &CStr) -> *const c_void {
        let proc = unsafe {
            windows_sys::Win32::System::LibraryLoader::GetProcAddress(
                handle.0.cast(),
                name.as_ptr().cast(),
            )
        };
        match proc {
            Some(f) => f as *const c_void,
            None => std::ptr::null(),
        }
    }

    fn close(&mut self, handle: SharedObject) {
        unsafe {
            windows_sys::Win32::System::LibraryLoader::FreeLibrary(handle.0.cast());
        }
    }
}
