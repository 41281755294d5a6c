//! End-to-end loading scenario over the crate's real procedure table.
//!
//! A single test function controls the ordering: the table is process-wide
//! state, so the partial-load, fallback, idempotence and unload steps have
//! to happen in sequence.

use std::cell::Cell;
use std::ffi::CStr;
use std::ptr;

use gload::ProcPtr;

#[test]
fn partial_load_fallback_and_unload() {
    let _ = env_logger::builder().is_test(true).try_init();

    // A resolver that refuses exactly one catalogued symbol. load_all
    // binds everything else and reports the miss set.
    let err = gload::load_all_with(|name: &CStr| {
        if name == c"glBegin" {
            ptr::null()
        } else {
            name.as_ptr() as ProcPtr
        }
    })
    .unwrap_err();
    assert_eq!(err.names, vec![c"glBegin"]);

    // A complete fallback pass touches only the one remaining entry.
    let calls = Cell::new(0usize);
    assert!(gload::load_with(|name: &CStr| {
        calls.set(calls.get() + 1);
        assert_eq!(name, c"glBegin");
        name.as_ptr() as ProcPtr
    }));
    assert_eq!(calls.get(), 1);

    // Fully bound: another pass never consults its resolver.
    assert!(gload::load_with(|_: &CStr| -> ProcPtr { unreachable!() }));

    // Only external resolvers ran, so unload has nothing to release and
    // still reports success.
    assert!(gload::unload());
}
