//! Generated-style OpenGL binding surface.
//!
//! Mechanical data consumed by the loader engine: the scalar typedefs, the
//! enum constants the bundled samples touch, one function-pointer slot per
//! catalogued entry point, and thin typed wrappers that jump through the
//! slot. The shape follows registry-generator output; the catalogue carries
//! the subset of commands the project's samples exercise (clear/draw state,
//! immediate mode, and the shader/buffer/vertex-array path).
//!
//! Calling a wrapper before its slot was bound by a successful load is
//! undefined behavior; debug builds assert on it.

use std::ffi::c_void;

use gload_core::table::ProcedureEntry;

pub mod types {
    #![allow(non_camel_case_types)]

    use std::ffi::{c_char, c_float, c_int, c_uchar, c_uint, c_void};

    pub type GLenum = c_uint;
    pub type GLboolean = c_uchar;
    pub type GLbitfield = c_uint;
    pub type GLvoid = c_void;
    pub type GLbyte = i8;
    pub type GLubyte = c_uchar;
    pub type GLshort = i16;
    pub type GLushort = u16;
    pub type GLint = c_int;
    pub type GLuint = c_uint;
    pub type GLsizei = c_int;
    pub type GLfloat = c_float;
    pub type GLclampf = c_float;
    pub type GLdouble = f64;
    pub type GLchar = c_char;
    pub type GLintptr = isize;
    pub type GLsizeiptr = isize;
}

pub const FALSE: types::GLboolean = 0;
pub const TRUE: types::GLboolean = 1;
pub const NO_ERROR: types::GLenum = 0;

pub const COLOR_BUFFER_BIT: types::GLbitfield = 0x0000_4000;
pub const DEPTH_BUFFER_BIT: types::GLbitfield = 0x0000_0100;

pub const POINTS: types::GLenum = 0x0000;
pub const LINES: types::GLenum = 0x0001;
pub const TRIANGLES: types::GLenum = 0x0004;
pub const QUADS: types::GLenum = 0x0007;

pub const DEPTH_TEST: types::GLenum = 0x0B71;

pub const UNSIGNED_INT: types::GLenum = 0x1405;
pub const FLOAT: types::GLenum = 0x1406;

pub const VENDOR: types::GLenum = 0x1F00;
pub const RENDERER: types::GLenum = 0x1F01;
pub const VERSION: types::GLenum = 0x1F02;

pub const ARRAY_BUFFER: types::GLenum = 0x8892;
pub const ELEMENT_ARRAY_BUFFER: types::GLenum = 0x8893;
pub const STATIC_DRAW: types::GLenum = 0x88E4;

pub const FRAGMENT_SHADER: types::GLenum = 0x8B30;
pub const VERTEX_SHADER: types::GLenum = 0x8B31;
pub const COMPILE_STATUS: types::GLenum = 0x8B81;
pub const LINK_STATUS: types::GLenum = 0x8B82;
pub const INFO_LOG_LENGTH: types::GLenum = 0x8B84;

/// Declares, for every catalogued command: its null-initialized slot, a
/// typed wrapper that jumps through the slot, and its row in the procedure
/// table.
macro_rules! gl_api {
    ($(fn $fname:ident => $sym:literal ($($arg:ident: $ty:ty),*) $(-> $ret:ty)?;)*) => {
        mod storage {
            use gload_core::table::ProcPtr;

            $(
                #[allow(non_upper_case_globals)]
                pub(super) static mut $fname: ProcPtr = std::ptr::null();
            )*
        }

        $(
            #[allow(non_snake_case, clippy::missing_safety_doc)]
            #[inline]
            pub unsafe fn $fname($($arg: $ty),*) $(-> $ret)? {
                unsafe {
                    debug_assert!(
                        !storage::$fname.is_null(),
                        concat!("call to unloaded entry point ", stringify!($fname)),
                    );
                    let f: unsafe extern "system" fn($($ty),*) $(-> $ret)? =
                        std::mem::transmute(storage::$fname);
                    f($($arg),*)
                }
            }
        )*

        /// Assembles the procedure table over the slot storage, in
        /// catalogue order.
        pub(crate) fn procedure_table() -> Vec<ProcedureEntry<'static>> {
            // SAFETY: every entry borrows a distinct storage cell, and the
            // crate's loading contract serializes table construction with
            // all other slot access.
            unsafe {
                vec![
                    $(ProcedureEntry::new($sym, &mut *(&raw mut storage::$fname)),)*
                ]
            }
        }
    };
}

gl_api! {
    fn GetString => c"glGetString" (name: types::GLenum) -> *const types::GLubyte;
    fn GetError => c"glGetError" () -> types::GLenum;
    fn Enable => c"glEnable" (cap: types::GLenum);
    fn Disable => c"glDisable" (cap: types::GLenum);
    fn Viewport => c"glViewport" (x: types::GLint, y: types::GLint, width: types::GLsizei, height: types::GLsizei);
    fn ClearColor => c"glClearColor" (red: types::GLfloat, green: types::GLfloat, blue: types::GLfloat, alpha: types::GLfloat);
    fn Clear => c"glClear" (mask: types::GLbitfield);
    fn Flush => c"glFlush" ();
    fn Begin => c"glBegin" (mode: types::GLenum);
    fn End => c"glEnd" ();
    fn Vertex3f => c"glVertex3f" (x: types::GLfloat, y: types::GLfloat, z: types::GLfloat);
    fn Color3f => c"glColor3f" (red: types::GLfloat, green: types::GLfloat, blue: types::GLfloat);
    fn CreateShader => c"glCreateShader" (type_: types::GLenum) -> types::GLuint;
    fn ShaderSource => c"glShaderSource" (shader: types::GLuint, count: types::GLsizei, string: *const *const types::GLchar, length: *const types::GLint);
    fn CompileShader => c"glCompileShader" (shader: types::GLuint);
    fn GetShaderiv => c"glGetShaderiv" (shader: types::GLuint, pname: types::GLenum, params: *mut types::GLint);
    fn GetShaderInfoLog => c"glGetShaderInfoLog" (shader: types::GLuint, buf_size: types::GLsizei, length: *mut types::GLsizei, info_log: *mut types::GLchar);
    fn DeleteShader => c"glDeleteShader" (shader: types::GLuint);
    fn CreateProgram => c"glCreateProgram" () -> types::GLuint;
    fn AttachShader => c"glAttachShader" (program: types::GLuint, shader: types::GLuint);
    fn LinkProgram => c"glLinkProgram" (program: types::GLuint);
    fn GetProgramiv => c"glGetProgramiv" (program: types::GLuint, pname: types::GLenum, params: *mut types::GLint);
    fn GetProgramInfoLog => c"glGetProgramInfoLog" (program: types::GLuint, buf_size: types::GLsizei, length: *mut types::GLsizei, info_log: *mut types::GLchar);
    fn UseProgram => c"glUseProgram" (program: types::GLuint);
    fn DeleteProgram => c"glDeleteProgram" (program: types::GLuint);
    fn GenBuffers => c"glGenBuffers" (n: types::GLsizei, buffers: *mut types::GLuint);
    fn BindBuffer => c"glBindBuffer" (target: types::GLenum, buffer: types::GLuint);
    fn BufferData => c"glBufferData" (target: types::GLenum, size: types::GLsizeiptr, data: *const c_void, usage: types::GLenum);
    fn DeleteBuffers => c"glDeleteBuffers" (n: types::GLsizei, buffers: *const types::GLuint);
    fn GenVertexArrays => c"glGenVertexArrays" (n: types::GLsizei, arrays: *mut types::GLuint);
    fn BindVertexArray => c"glBindVertexArray" (array: types::GLuint);
    fn DeleteVertexArrays => c"glDeleteVertexArrays" (n: types::GLsizei, arrays: *const types::GLuint);
    fn EnableVertexAttribArray => c"glEnableVertexAttribArray" (index: types::GLuint);
    fn VertexAttribPointer => c"glVertexAttribPointer" (index: types::GLuint, size: types::GLint, type_: types::GLenum, normalized: types::GLboolean, stride: types::GLsizei, pointer: *const c_void);
    fn DrawArrays => c"glDrawArrays" (mode: types::GLenum, first: types::GLint, count: types::GLsizei);
    fn DrawElements => c"glDrawElements" (mode: types::GLenum, count: types::GLsizei, type_: types::GLenum, indices: *const c_void);
}

/// Runs `f` with exclusive write access to the procedure table for the
/// duration of one load call.
pub(crate) fn with_table<T>(f: impl FnOnce(&mut [ProcedureEntry<'static>]) -> T) -> T {
    let mut table = procedure_table();
    f(&mut table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_no_duplicate_names() {
        let _guard = crate::TEST_SERIAL.lock().unwrap();
        let mut names: Vec<_> = procedure_table().iter().map(|e| e.name()).collect();
        let len = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), len);
    }
}
