//! chained-hashset: a single-threaded, separate-chaining hash set with a
//! prime-sized initial table and load-factor driven growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep each concern in its own layer so the invariants of one do
//!   not leak into the next.
//! - Layers:
//!   - `capacity::plan`: turns a requested element count into a table
//!     size. Small requests get `min_capacity` (53); larger ones get the
//!     median prime between the two powers of two enclosing
//!     `requested / load_factor`, found with a sieve of Eratosthenes.
//!   - `BucketTable<T>`: structural layer. Owns a `SlotMap` arena of
//!     elements and a `Vec` of chains holding arena keys. Knows nothing
//!     about hashing beyond the hash code it is handed.
//!   - `HashSet<T, S>`: public API. Hashes elements, maps hash codes to
//!     slots, tracks the load factor and triggers rehashing.
//!
//! Constraints
//! - Single-threaded and synchronous; every mutation takes `&mut self`,
//!   so a rehash can never be observed half done.
//! - Duplicate inserts fail and leave the set unchanged.
//! - The set never shrinks.
//!
//! Hash codes and slots
//! - The `BuildHasher` output is read as a signed `i64` hash code. Slots
//!   are the Euclidean remainder `hash mod capacity`, so negative codes
//!   map into `[0, capacity)` like any other.
//! - Each element stores its hash code; redistribution reuses it and never
//!   calls `T: Hash` again.
//!
//! Growth
//! - After a successful insert, `len / capacity >= load_factor` triggers a
//!   rehash to `capacity * growth_factor` (default 2). The grown size is
//!   not re-validated as prime: only the initial table is planned.
//!
//! Failure model
//! - A zero requested capacity, an invalid `SetConfig`, a request whose
//!   sieve would pass `MAX_SIEVE_BOUND`, or a planner that finds no prime
//!   fail at construction with `CapacityError`, before any allocation.
//! - Absent elements (`None` passed to the `_opt` methods) are a no-op
//!   returning `false`.
//! - Growth past `usize::MAX` panics with "capacity overflow".
//!
//! Observability
//! - Capacity planning and rehashing emit `tracing` events at `debug`;
//!   rejected duplicates at `trace`. No subscriber is installed here.

mod bucket_table;
mod bucket_table_proptest;
pub mod capacity;
pub mod config;
mod hash_set;

// Public surface
pub use bucket_table::slot_for;
pub use capacity::{plan, primes_between, CapacityError, MAX_SIEVE_BOUND};
pub use config::SetConfig;
pub use hash_set::{HashSet, Iter, Set};
