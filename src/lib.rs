//! hashtbl: a single-threaded hash table with separate chaining over a
//! prime number of buckets and pluggable hash/equality strategies.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container whose growth and layout rules
//!   are explicit and observable (bucket count, load factor, dump).
//! - Layers:
//!   - `primes`: `is_prime` (6k±1 trial division) and `find_next_prime`,
//!     used for every bucket-array size.
//!   - `Buckets<K, V>`: entries live in a `SlotMap` arena; each bucket
//!     stores the key of its chain head and entries link to the next one.
//!     Growth relinks entries by their cached hash without moving them.
//!   - `HashTbl<K, V, H, E>`: public API. Probes the bucket chosen by
//!     `hash(key) % bucket_count`, scans it with the equality strategy,
//!     updates in place or prepends, and grows when the load factor
//!     passes `max_load_factor`.
//!
//! Constraints
//! - Single-threaded: `HashTbl` is `!Sync`; share it behind a lock.
//! - Bucket count is always prime and never shrinks.
//! - Keys are unique under the equality strategy; `count(k)` is 0 or 1.
//! - `len() / bucket_count() <= max_load_factor()` after every public
//!   operation returns.
//! - Growth targets `find_next_prime(2 * bucket_count)`, repeated until
//!   the threshold holds.
//!
//! Strategies
//! - `KeyHash<K>` and `KeyEqual<K>` are type parameters, so dispatch is
//!   static. Defaults hash through `hashbrown`'s `DefaultHashBuilder` and
//!   compare with `Eq`; plain closures work as well.
//! - Equal keys must hash equally. The table compares cached hashes before
//!   calling the equality strategy.
//!
//! Reentrancy
//! - Public operations take a debug-only guard. A strategy that calls back
//!   into the table it is serving panics instead of observing a
//!   half-finished chain walk. Release builds compile the guard away.
//!
//! Notes and non-goals
//! - No open addressing, no custom allocators, no serialization.
//! - No public iterator; `Display` dumps the buckets for debugging and
//!   `Debug` prints the entries as a map.
//! - `at`/`at_ref` are the only fallible lookups (`TableError::KeyNotFound`).

mod buckets;
mod builder;
mod error;
mod hash_tbl;
mod hash_tbl_proptest;
pub mod primes;
mod reentrancy;
pub mod strategy;

// Public surface
pub use builder::HashTblBuilder;
pub use error::{TableError, MIN_MAX_LOAD_FACTOR};
pub use hash_tbl::{HashTbl, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR};
pub use strategy::{DefaultKeyEqual, DefaultKeyHash, KeyEqual, KeyHash};
