//! HashTbl: the separate-chaining table engine.

use crate::buckets::Buckets;
use crate::error::{check_load_factor, TableError};
use crate::primes::find_next_prime;
use crate::reentrancy::DebugReentrancy;
use crate::strategy::{DefaultKeyEqual, DefaultKeyHash, KeyEqual, KeyHash};
use core::fmt;
use core::hash::Hash;
use log::debug;
use slotmap::DefaultKey;

/// Capacity hint used by [`HashTbl::new`]; the table starts with the next
/// prime above it.
pub const DEFAULT_CAPACITY: usize = 11;

/// Growth threshold unless configured otherwise.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 1.0;

/// A hash table with separate chaining over a prime number of buckets.
///
/// `H` hashes keys and `E` compares them; see [`crate::strategy`]. When an
/// insertion pushes `len() / bucket_count()` above [`max_load_factor`],
/// the bucket array grows to the next prime above twice its size before
/// the insertion returns.
///
/// [`max_load_factor`]: HashTbl::max_load_factor
pub struct HashTbl<K, V, H = DefaultKeyHash, E = DefaultKeyEqual> {
    pub(crate) buckets: Buckets<K, V>,
    max_load_factor: f32,
    hash: H,
    eq: E,
    reentrancy: DebugReentrancy,
}

impl<K, V> HashTbl<K, V>
where
    K: Hash + Eq,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Table with `find_next_prime(capacity)` buckets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_strategies(capacity, DefaultKeyHash::default(), DefaultKeyEqual)
    }

    /// Table pre-sized for about half load, filled through [`insert`]. A
    /// key that appears twice keeps its last value.
    ///
    /// [`insert`]: HashTbl::insert
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
    {
        Self::from_entries_with_strategies(entries, DefaultKeyHash::default(), DefaultKeyEqual)
    }
}

impl<K, V, H, E> Default for HashTbl<K, V, H, E>
where
    H: KeyHash<K> + Default,
    E: KeyEqual<K> + Default,
{
    fn default() -> Self {
        Self::with_capacity_and_strategies(DEFAULT_CAPACITY, H::default(), E::default())
    }
}

impl<K, V, H, E> HashTbl<K, V, H, E>
where
    H: KeyHash<K>,
    E: KeyEqual<K>,
{
    pub(crate) fn from_parts(bucket_count: usize, max_load_factor: f32, hash: H, eq: E) -> Self {
        Self {
            buckets: Buckets::with_bucket_count(bucket_count),
            max_load_factor,
            hash,
            eq,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn with_strategies(hash: H, eq: E) -> Self {
        Self::with_capacity_and_strategies(DEFAULT_CAPACITY, hash, eq)
    }

    pub fn with_capacity_and_strategies(capacity: usize, hash: H, eq: E) -> Self {
        Self::from_parts(
            find_next_prime(capacity),
            DEFAULT_MAX_LOAD_FACTOR,
            hash,
            eq,
        )
    }

    pub fn from_entries_with_strategies<I>(entries: I, hash: H, eq: E) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
    {
        let entries = entries.into_iter();
        let mut t = Self::from_parts(
            find_next_prime(2 * entries.len()),
            DEFAULT_MAX_LOAD_FACTOR,
            hash,
            eq,
        );
        for (k, v) in entries {
            t.insert(k, v);
        }
        t
    }

    /// Replaces the contents with `entries`, sized as in
    /// [`from_entries`](HashTbl::from_entries). Strategies and the load
    /// factor threshold are kept.
    pub fn assign_entries<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
    {
        let entries = entries.into_iter();
        let bucket_count = find_next_prime(2 * entries.len());
        {
            let _g = self.reentrancy.enter("assign_entries");
            self.buckets = Buckets::with_bucket_count(bucket_count);
        }
        debug!("assign_entries: {} entries into {} buckets", entries.len(), bucket_count);
        for (k, v) in entries {
            self.insert(k, v);
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.len() == 0
    }

    /// Length of the bucket array; always prime.
    pub fn bucket_count(&self) -> usize {
        self.buckets.bucket_count()
    }

    /// Current `len() / bucket_count()`.
    pub fn load_factor(&self) -> f32 {
        self.buckets.load_factor()
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// Sets the growth threshold. Lowering it below the current load
    /// factor grows the table right away. Values below
    /// [`MIN_MAX_LOAD_FACTOR`](crate::MIN_MAX_LOAD_FACTOR) are rejected.
    pub fn set_max_load_factor(&mut self, mlf: f32) -> Result<(), TableError> {
        let _g = self.reentrancy.enter("set_max_load_factor");
        self.max_load_factor = check_load_factor(mlf)?;
        if self.buckets.grow_to_fit(self.max_load_factor) {
            debug!(
                "max load factor {} applied, now {} buckets",
                mlf,
                self.buckets.bucket_count()
            );
        }
        Ok(())
    }

    /// The hash strategy the table was built with.
    pub fn hash_strategy(&self) -> &H {
        &self.hash
    }

    pub fn eq_strategy(&self) -> &E {
        &self.eq
    }

    /// Locates `key`: its hash, its bucket, and the slot holding it if present.
    fn probe(&self, key: &K) -> (u64, usize, Option<DefaultKey>) {
        let hash = self.hash.hash_key(key);
        let bucket = self.buckets.index_of(hash);
        let eq = &self.eq;
        let slot = self
            .buckets
            .find(bucket, |e| e.hash == hash && eq.eq_keys(&e.key, key));
        (hash, bucket, slot)
    }

    /// Inserts `key -> value`, or overwrites the value if `key` is present.
    ///
    /// Returns `true` when a new entry was added and `false` when an
    /// existing one was updated. Adding may grow the table.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let _g = self.reentrancy.enter("insert");
        let (hash, bucket, slot) = self.probe(&key);
        if let Some(s) = slot {
            if let Some(entry) = self.buckets.get_mut(s) {
                entry.value = value;
            }
            return false;
        }
        self.buckets.push_front(bucket, key, value, hash);
        self.buckets.grow_to_fit(self.max_load_factor);
        true
    }

    /// Copies the value for `key` into `out`. Leaves `out` untouched and
    /// returns `false` when `key` is absent.
    pub fn retrieve(&self, key: &K, out: &mut V) -> bool
    where
        V: Clone,
    {
        let _g = self.reentrancy.enter("retrieve");
        let (_, _, slot) = self.probe(key);
        match slot.and_then(|s| self.buckets.get(s)) {
            Some(entry) => {
                out.clone_from(&entry.value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let _g = self.reentrancy.enter("get");
        let (_, _, slot) = self.probe(key);
        slot.and_then(|s| self.buckets.get(s)).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let _g = self.reentrancy.enter("get_mut");
        let (_, _, slot) = self.probe(key);
        self.buckets.get_mut(slot?).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        let _g = self.reentrancy.enter("contains_key");
        self.probe(key).2.is_some()
    }

    /// Mutable access to an existing value; never inserts.
    pub fn at(&mut self, key: &K) -> Result<&mut V, TableError> {
        let _g = self.reentrancy.enter("at");
        let (_, _, slot) = self.probe(key);
        let slot = slot.ok_or(TableError::KeyNotFound)?;
        self.buckets
            .get_mut(slot)
            .map(|e| &mut e.value)
            .ok_or(TableError::KeyNotFound)
    }

    pub fn at_ref(&self, key: &K) -> Result<&V, TableError> {
        let _g = self.reentrancy.enter("at_ref");
        let (_, _, slot) = self.probe(key);
        slot.and_then(|s| self.buckets.get(s))
            .map(|e| &e.value)
            .ok_or(TableError::KeyNotFound)
    }

    /// Value for `key`, inserting `V::default()` first if it is absent.
    /// Inserting applies the same growth rule as [`insert`](HashTbl::insert).
    pub fn get_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let _g = self.reentrancy.enter("get_or_insert");
        let (hash, _, slot) = self.probe(&key);
        &mut self
            .buckets
            .get_or_push(slot, key, hash, V::default, self.max_load_factor)
            .value
    }

    /// Removes `key`. Returns `false`, changing nothing, when it is absent.
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Removes `key` and hands back its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let _g = self.reentrancy.enter("remove");
        let hash = self.hash.hash_key(key);
        let bucket = self.buckets.index_of(hash);
        let eq = &self.eq;
        self.buckets
            .unlink(bucket, |e| e.hash == hash && eq.eq_keys(&e.key, key))
            .map(|e| e.value)
    }

    /// Number of entries whose key equals `key`: 0 or 1, since keys are unique.
    pub fn count(&self, key: &K) -> usize {
        let _g = self.reentrancy.enter("count");
        usize::from(self.probe(key).2.is_some())
    }

    /// Length of the chain `key` hashes to, counting entries with other
    /// keys that collide into the same bucket. A diagnostic for hash
    /// quality, not a membership test.
    pub fn bucket_len(&self, key: &K) -> usize {
        let _g = self.reentrancy.enter("bucket_len");
        let bucket = self.buckets.index_of(self.hash.hash_key(key));
        self.buckets.chain(bucket).count()
    }

    /// Drops every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter("clear");
        self.buckets.clear();
    }
}

impl<K, V, H, E> Clone for HashTbl<K, V, H, E>
where
    K: Clone,
    V: Clone,
    H: Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            max_load_factor: self.max_load_factor,
            hash: self.hash.clone(),
            eq: self.eq.clone(),
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.buckets.clone_from(&source.buckets);
        self.max_load_factor = source.max_load_factor;
        self.hash.clone_from(&source.hash);
        self.eq.clone_from(&source.eq);
    }
}

impl<K, V, H, E> FromIterator<(K, V)> for HashTbl<K, V, H, E>
where
    H: KeyHash<K> + Default,
    E: KeyEqual<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries: Vec<(K, V)> = iter.into_iter().collect();
        Self::from_entries_with_strategies(entries, H::default(), E::default())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for HashTbl<K, V>
where
    K: Hash + Eq,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_entries(entries)
    }
}

impl<K, V, H, E> Extend<(K, V)> for HashTbl<K, V, H, E>
where
    H: KeyHash<K>,
    E: KeyEqual<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Bucket-by-bucket dump: `[i]-> ` followed by the chain, head first, one
/// `key => value` per line, or `"Empty"`.
impl<K, V, H, E> fmt::Display for HashTbl<K, V, H, E>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.buckets.bucket_count() {
            write!(f, "[{}]-> ", i)?;
            let mut chain = self.buckets.chain(i).peekable();
            if chain.peek().is_none() {
                writeln!(f, "\"Empty\"")?;
                continue;
            }
            writeln!(f)?;
            for e in chain {
                writeln!(f, "    {} => {}", e.key, e.value)?;
            }
        }
        Ok(())
    }
}

impl<K, V, H, E> fmt::Debug for HashTbl<K, V, H, E>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.entries().map(|e| (&e.key, &e.value)))
            .finish()
    }
}
