//! # gload-core
//!
//! Backend-agnostic procedure-table loading engine.
//!
//! This crate holds the pure logic of the loader: the table data model
//! (symbol names paired with mutable function-pointer slots), the resolution
//! driver that walks a table and fills empty slots through a resolver
//! callback, and the backend variant a build settles on. No `unsafe` code is
//! permitted at the crate level; raw pointers are stored and compared but
//! never dereferenced here. The platform-specific lookup machinery lives in
//! `gload-dl`, and the generated binding surface lives in `gload`.

#![deny(unsafe_code)]

pub mod backend;
pub mod engine;
pub mod table;
