//! Procedure table data model.
//!
//! A procedure table is an ordered slice of [`ProcedureEntry`] values, each
//! pairing a symbol name with an exclusive borrow of the output slot the
//! resolved function pointer is written into. The slots belong to the
//! binding surface (static storage with process lifetime); the engine only
//! ever writes through the borrow, for the duration of one load call. The C
//! rendition of this structure ends with a sentinel entry; here the slice
//! bound plays that role.

use std::ffi::{CStr, c_void};

/// A resolved (or not-yet-resolved) entry point. Null means "empty slot".
pub type ProcPtr = *const c_void;

/// One (symbol name, output slot) pair of a procedure table.
pub struct ProcedureEntry<'a> {
    name: &'static CStr,
    slot: &'a mut ProcPtr,
}

impl<'a> ProcedureEntry<'a> {
    /// Pairs `name` with the slot its resolved address is written into.
    #[must_use]
    pub fn new(name: &'static CStr, slot: &'a mut ProcPtr) -> Self {
        Self { name, slot }
    }

    /// The symbol name presented to the resolver, null-terminated.
    #[must_use]
    pub fn name(&self) -> &'static CStr {
        self.name
    }

    /// Whether the slot already holds a resolved address.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.slot.is_null()
    }

    /// The slot's current contents.
    #[must_use]
    pub fn current(&self) -> ProcPtr {
        *self.slot
    }

    /// Writes `ptr` into the slot.
    pub fn bind(&mut self, ptr: ProcPtr) {
        *self.slot = ptr;
    }
}
