//! Pluggable hashing and key-equality strategies.
//!
//! A `HashTbl` is parameterized by one strategy of each kind. They are
//! ordinary values stored in the table, so stateless strategies cost
//! nothing and stateful ones (a seeded `BuildHasher`, a closure capturing
//! configuration) are cloned along with the table.
//!
//! The two strategies must agree: keys that compare equal must hash to
//! the same value.

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Maps a key to an unsigned hash value.
pub trait KeyHash<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

/// Decides whether two keys denote the same entry.
pub trait KeyEqual<K: ?Sized> {
    fn eq_keys(&self, a: &K, b: &K) -> bool;
}

/// Hashes any `K: Hash` through a `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct DefaultKeyHash<S = DefaultHashBuilder> {
    build: S,
}

impl<S> DefaultKeyHash<S> {
    pub fn with_hasher(build: S) -> Self {
        Self { build }
    }

    pub fn hasher(&self) -> &S {
        &self.build
    }
}

impl<K, S> KeyHash<K> for DefaultKeyHash<S>
where
    K: ?Sized + Hash,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.build.hash_one(key)
    }
}

/// Compares keys with `K: Eq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultKeyEqual;

impl<K> KeyEqual<K> for DefaultKeyEqual
where
    K: ?Sized + Eq,
{
    #[inline]
    fn eq_keys(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

impl<K, F> KeyHash<K> for F
where
    K: ?Sized,
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

impl<K, F> KeyEqual<K> for F
where
    K: ?Sized,
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn eq_keys(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}
