//! Storage layer for Kassa.
//!
//! Persistence proper is an external concern; this crate ships the
//! in-memory reference implementation of the store traits defined in
//! `kassa-core::store`. It is the backend used by the integration tests
//! and the demo binary, and the executable documentation of the trait
//! contracts any real backend must honor.

pub mod memory;

pub use memory::MemoryStore;
