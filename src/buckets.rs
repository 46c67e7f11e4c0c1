//! Buckets: arena-backed collision chains.
//!
//! Every entry lives in a `SlotMap`; a bucket is just the key of its
//! chain head, and each entry links to the next one in its chain. The
//! entry caches its hash so growing never calls back into the hash
//! strategy.

use crate::primes::find_next_prime;
use log::debug;
use slotmap::{DefaultKey, SlotMap};

#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
    next: Option<DefaultKey>,
}

#[derive(Clone, Debug)]
pub(crate) struct Buckets<K, V> {
    heads: Box<[Option<DefaultKey>]>,
    slots: SlotMap<DefaultKey, Entry<K, V>>,
}

/// Walks one chain from its head.
pub(crate) struct Chain<'a, K, V> {
    slots: &'a SlotMap<DefaultKey, Entry<K, V>>,
    cur: Option<DefaultKey>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = &'a Entry<K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        let entry = slots.get(self.cur?)?;
        self.cur = entry.next;
        Some(entry)
    }
}

impl<K, V> Buckets<K, V> {
    /// `bucket_count` must be non-zero; callers pass primes.
    pub(crate) fn with_bucket_count(bucket_count: usize) -> Self {
        debug_assert!(bucket_count > 0);
        Self {
            heads: vec![None; bucket_count].into_boxed_slice(),
            slots: SlotMap::with_key(),
        }
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn load_factor(&self) -> f32 {
        (self.len() as f64 / self.bucket_count() as f64) as f32
    }

    #[inline]
    pub(crate) fn index_of(&self, hash: u64) -> usize {
        (hash % self.heads.len() as u64) as usize
    }

    pub(crate) fn chain(&self, bucket: usize) -> Chain<'_, K, V> {
        Chain {
            slots: &self.slots,
            cur: self.heads[bucket],
        }
    }

    /// First entry in `bucket` matching `pred`.
    pub(crate) fn find<P>(&self, bucket: usize, mut pred: P) -> Option<DefaultKey>
    where
        P: FnMut(&Entry<K, V>) -> bool,
    {
        let mut cur = self.heads[bucket];
        while let Some(k) = cur {
            let entry = self.slots.get(k)?;
            if pred(entry) {
                return Some(k);
            }
            cur = entry.next;
        }
        None
    }

    pub(crate) fn get(&self, slot: DefaultKey) -> Option<&Entry<K, V>> {
        self.slots.get(slot)
    }

    pub(crate) fn get_mut(&mut self, slot: DefaultKey) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(slot)
    }

    pub(crate) fn push_front(&mut self, bucket: usize, key: K, value: V, hash: u64) -> DefaultKey {
        let next = self.heads[bucket];
        let k = self.slots.insert(Entry {
            key,
            value,
            hash,
            next,
        });
        self.heads[bucket] = Some(k);
        k
    }

    /// Unlinks and returns the first entry in `bucket` matching `pred`.
    pub(crate) fn unlink<P>(&mut self, bucket: usize, mut pred: P) -> Option<Entry<K, V>>
    where
        P: FnMut(&Entry<K, V>) -> bool,
    {
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.heads[bucket];
        while let Some(k) = cur {
            let (hit, next) = {
                let entry = self.slots.get(k)?;
                (pred(entry), entry.next)
            };
            if hit {
                match prev {
                    None => self.heads[bucket] = next,
                    Some(p) => {
                        if let Some(before) = self.slots.get_mut(p) {
                            before.next = next;
                        }
                    }
                }
                return self.slots.remove(k);
            }
            prev = Some(k);
            cur = next;
        }
        None
    }

    /// Drops every entry; the bucket count is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.heads.fill(None);
    }

    /// All entries, in arena order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.slots.values()
    }

    /// Redistributes every entry over `bucket_count` fresh buckets using
    /// the cached hashes. Entries keep their slots; only links change.
    pub(crate) fn relink(&mut self, bucket_count: usize) {
        debug_assert!(bucket_count > 0);
        let mut heads = vec![None; bucket_count].into_boxed_slice();
        for (k, entry) in self.slots.iter_mut() {
            let bucket = (entry.hash % bucket_count as u64) as usize;
            entry.next = heads[bucket];
            heads[bucket] = Some(k);
        }
        self.heads = heads;
    }

    /// Grows to `find_next_prime(2 * bucket_count)` until the load factor
    /// is within `max_load_factor`. Returns whether anything moved.
    pub(crate) fn grow_to_fit(&mut self, max_load_factor: f32) -> bool {
        self.grow_for(self.len(), max_load_factor)
    }

    fn grow_for(&mut self, len: usize, max_load_factor: f32) -> bool {
        let mut grew = false;
        while over_threshold(len, self.bucket_count(), max_load_factor) {
            let from = self.bucket_count();
            let to = find_next_prime(2 * from);
            self.relink(to);
            debug!(
                "rehash: {} entries moved from {} to {} buckets",
                self.len(),
                from,
                to
            );
            grew = true;
        }
        grew
    }

    /// The entry at `found` if it is live; otherwise grows for one more
    /// entry and prepends `key -> make()` to the bucket `hash` selects.
    pub(crate) fn get_or_push<F>(
        &mut self,
        found: Option<DefaultKey>,
        key: K,
        hash: u64,
        make: F,
        max_load_factor: f32,
    ) -> &mut Entry<K, V>
    where
        F: FnOnce() -> V,
    {
        let slot = match found {
            Some(k) if self.slots.contains_key(k) => k,
            _ => {
                self.grow_for(self.len() + 1, max_load_factor);
                let bucket = self.index_of(hash);
                self.push_front(bucket, key, make(), hash)
            }
        };
        &mut self.slots[slot]
    }
}

/// `len / bucket_count > max_load_factor`, compared in `f64` so counts
/// past 2^24 still register a single extra entry.
#[inline]
pub(crate) fn over_threshold(len: usize, bucket_count: usize, max_load_factor: f32) -> bool {
    len as f64 > f64::from(max_load_factor) * bucket_count as f64
}
