//! Generic name→slot resolution driver.
//!
//! [`load_with`] is the faithful loading operation: fill every still-empty
//! slot in table order, aborting on the first symbol the resolver cannot
//! produce. [`load_all`] is an additive diagnostic variant that keeps going
//! and reports the complete miss set.
//!
//! The driver performs no allocation and no I/O of its own; everything
//! observable beyond the slot writes happens inside the resolver callback.

use std::ffi::CStr;

use thiserror::Error;

use crate::table::{ProcPtr, ProcedureEntry};

/// Walks `table` in order, resolving every still-empty slot.
///
/// Entries whose slot is already non-null are skipped without invoking the
/// resolver, so repeated calls are cheap and resolution attempts can be
/// layered: a context-query pass first, a fallback pass later, without
/// clobbering what the first pass bound.
///
/// The first entry the resolver yields null for terminates the walk with
/// `false`; entries after it are left untouched. A failed load therefore
/// leaves the table partially bound. Callers may inspect which slots are
/// non-empty to decide whether the surface is usable, or treat any failure
/// as fatal.
///
/// Returns `true` only if every entry ends with a non-empty slot.
pub fn load_with<R>(table: &mut [ProcedureEntry<'_>], mut resolve: R) -> bool
where
    R: FnMut(&CStr) -> ProcPtr,
{
    for entry in table.iter_mut() {
        if entry.is_bound() {
            continue;
        }
        let ptr = resolve(entry.name());
        if ptr.is_null() {
            return false;
        }
        entry.bind(ptr);
    }
    true
}

/// The complete set of names a [`load_all`] pass failed to resolve.
#[derive(Debug, Error)]
#[error("unresolved symbols: {names:?}")]
pub struct MissingSymbols {
    pub names: Vec<&'static CStr>,
}

/// Like [`load_with`], but attempts every still-empty entry and collects
/// the full miss set instead of aborting at the first failure.
///
/// Entries that do resolve are bound even when others miss, so a caller can
/// report everything that is absent in one pass and still use whatever
/// bound. The skip-if-already-bound rule is the same as [`load_with`]'s.
pub fn load_all<R>(table: &mut [ProcedureEntry<'_>], mut resolve: R) -> Result<(), MissingSymbols>
where
    R: FnMut(&CStr) -> ProcPtr,
{
    let mut names = Vec::new();
    for entry in table.iter_mut() {
        if entry.is_bound() {
            continue;
        }
        let ptr = resolve(entry.name());
        if ptr.is_null() {
            names.push(entry.name());
        } else {
            entry.bind(ptr);
        }
    }
    if names.is_empty() {
        Ok(())
    } else {
        Err(MissingSymbols { names })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::ffi::c_void;
    use std::ptr;

    const NAMES: [&CStr; 3] = [c"a", c"b", c"c"];

    /// Distinct, stable non-null pointer per symbol name: the name's own
    /// storage address.
    fn addr_of(name: &CStr) -> ProcPtr {
        name.as_ptr() as ProcPtr
    }

    fn entries<'a>(slots: &'a mut [ProcPtr; 3]) -> Vec<ProcedureEntry<'a>> {
        NAMES
            .iter()
            .copied()
            .zip(slots.iter_mut())
            .map(|(name, slot)| ProcedureEntry::new(name, slot))
            .collect()
    }

    // ---------------------------------------------------------------
    // load_with
    // ---------------------------------------------------------------

    #[test]
    fn all_resolved_binds_every_slot() {
        let mut slots = [ptr::null(); 3];
        let mut table = entries(&mut slots);
        assert!(load_with(&mut table, addr_of));
        drop(table);
        for (name, slot) in NAMES.iter().zip(slots.iter()) {
            assert_eq!(*slot, addr_of(name));
        }
    }

    #[test]
    fn fail_fast_leaves_later_entries_untouched() {
        let calls = Cell::new(0usize);
        let mut slots = [ptr::null(); 3];
        let mut table = entries(&mut slots);
        let ok = load_with(&mut table, |name| {
            calls.set(calls.get() + 1);
            if name == c"b" { ptr::null() } else { addr_of(name) }
        });
        assert!(!ok);
        drop(table);
        assert_eq!(slots[0], addr_of(NAMES[0]));
        assert!(slots[1].is_null());
        assert!(slots[2].is_null());
        // "c" was never attempted.
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn second_pass_skips_bound_entries() {
        let calls = Cell::new(0usize);
        let mut resolve = |name: &CStr| {
            calls.set(calls.get() + 1);
            addr_of(name)
        };
        let mut slots = [ptr::null(); 3];

        let mut table = entries(&mut slots);
        assert!(load_with(&mut table, &mut resolve));
        drop(table);
        assert_eq!(calls.get(), 3);

        let before = slots;
        let mut table = entries(&mut slots);
        assert!(load_with(&mut table, &mut resolve));
        drop(table);
        // Exactly once per entry overall; identical values.
        assert_eq!(calls.get(), 3);
        assert_eq!(slots, before);
    }

    #[test]
    fn layered_fallback_completes_a_partial_load() {
        let mut slots = [ptr::null(); 3];
        let mut table = entries(&mut slots);
        let ok = load_with(&mut table, |name| {
            if name == c"a" { addr_of(name) } else { ptr::null() }
        });
        assert!(!ok);
        drop(table);
        let first_a = slots[0];

        let sentinel = NAMES[1].as_ptr() as ProcPtr;
        let mut table = entries(&mut slots);
        assert!(load_with(&mut table, |_| sentinel));
        drop(table);
        // The fallback pass must not clobber the already-bound "a".
        assert_eq!(slots[0], first_a);
        assert_eq!(slots[1], sentinel);
        assert_eq!(slots[2], sentinel);
    }

    #[test]
    fn empty_table_succeeds() {
        let mut table: Vec<ProcedureEntry<'_>> = Vec::new();
        assert!(load_with(&mut table, |_| ptr::null()));
    }

    #[test]
    fn distinct_pointers_preserved_exactly() {
        static CELLS: [u8; 3] = [0; 3];
        let mut slots = [ptr::null(); 3];
        let mut table = entries(&mut slots);
        let ok = load_with(&mut table, |name| {
            let index = match name.to_bytes()[0] {
                b'a' => 0,
                b'b' => 1,
                _ => 2,
            };
            &CELLS[index] as *const u8 as *const c_void
        });
        assert!(ok);
        drop(table);
        assert_eq!(slots[0], &CELLS[0] as *const u8 as *const c_void);
        assert_eq!(slots[1], &CELLS[1] as *const u8 as *const c_void);
        assert_eq!(slots[2], &CELLS[2] as *const u8 as *const c_void);
    }

    // ---------------------------------------------------------------
    // load_all
    // ---------------------------------------------------------------

    #[test]
    fn load_all_collects_every_miss() {
        let mut slots = [ptr::null(); 3];
        let mut table = entries(&mut slots);
        let err = load_all(&mut table, |name| {
            if name == c"b" { ptr::null() } else { addr_of(name) }
        })
        .unwrap_err();
        assert_eq!(err.names, vec![c"b"]);
        drop(table);
        // Unlike the fail-fast pass, "c" was attempted and bound.
        assert_eq!(slots[0], addr_of(NAMES[0]));
        assert!(slots[1].is_null());
        assert_eq!(slots[2], addr_of(NAMES[2]));
    }

    #[test]
    fn load_all_after_failed_pass_resolves_only_the_remainder() {
        let mut slots = [ptr::null(); 3];
        let mut table = entries(&mut slots);
        assert!(!load_with(&mut table, |name| {
            if name == c"b" { ptr::null() } else { addr_of(name) }
        }));
        drop(table);

        let calls = Cell::new(0usize);
        let mut table = entries(&mut slots);
        load_all(&mut table, |name| {
            calls.set(calls.get() + 1);
            addr_of(name)
        })
        .unwrap();
        drop(table);
        // "a" was bound by the first pass; only "b" and "c" remained.
        assert_eq!(calls.get(), 2);
        assert_eq!(slots[1], addr_of(NAMES[1]));
        assert_eq!(slots[2], addr_of(NAMES[2]));
    }
}
