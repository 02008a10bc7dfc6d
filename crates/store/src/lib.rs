//! In-memory domain store implementation for Kredia.
//!
//! Implements the `kredia-core` store contracts over concurrent maps.
//! The concrete durable store is out of scope for the core; this crate
//! stands in behind the same traits for the server binary and for
//! integration tests that exercise the engines end to end.

mod memory;

pub use memory::MemoryStore;



#[cfg(test)]
mod savings_props;

#[cfg(test)]
mod verifier_tests;
