//! Builder for tables that need more than a capacity hint.

use crate::error::{check_load_factor, TableError};
use crate::hash_tbl::{HashTbl, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR};
use crate::primes::find_next_prime;
use crate::strategy::{DefaultKeyEqual, DefaultKeyHash, KeyEqual, KeyHash};

/// Collects capacity, growth threshold and strategies, then builds a
/// [`HashTbl`]. The threshold is validated in [`build`](Self::build).
///
/// ```
/// use hashtbl::HashTblBuilder;
///
/// let t = HashTblBuilder::new()
///     .with_capacity(40)
///     .with_max_load_factor(0.75)
///     .build::<String, u32>()
///     .unwrap();
/// assert_eq!(t.bucket_count(), 41);
/// ```
#[derive(Clone, Debug)]
pub struct HashTblBuilder<H = DefaultKeyHash, E = DefaultKeyEqual> {
    capacity: usize,
    max_load_factor: f32,
    hash: H,
    eq: E,
}

impl Default for HashTblBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hash: DefaultKeyHash::default(),
            eq: DefaultKeyEqual,
        }
    }
}

impl HashTblBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H, E> HashTblBuilder<H, E> {
    /// Capacity hint; the table gets the next prime above it.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_load_factor(mut self, mlf: f32) -> Self {
        self.max_load_factor = mlf;
        self
    }

    pub fn with_hash<H2>(self, hash: H2) -> HashTblBuilder<H2, E> {
        HashTblBuilder {
            capacity: self.capacity,
            max_load_factor: self.max_load_factor,
            hash,
            eq: self.eq,
        }
    }

    pub fn with_equal<E2>(self, eq: E2) -> HashTblBuilder<H, E2> {
        HashTblBuilder {
            capacity: self.capacity,
            max_load_factor: self.max_load_factor,
            hash: self.hash,
            eq,
        }
    }

    pub fn build<K, V>(self) -> Result<HashTbl<K, V, H, E>, TableError>
    where
        H: KeyHash<K>,
        E: KeyEqual<K>,
    {
        let mlf = check_load_factor(self.max_load_factor)?;
        Ok(HashTbl::from_parts(
            find_next_prime(self.capacity),
            mlf,
            self.hash,
            self.eq,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new() {
        let t = HashTblBuilder::new().build::<u8, u8>().unwrap();
        assert_eq!(t.bucket_count(), 13);
        assert_eq!(t.max_load_factor(), DEFAULT_MAX_LOAD_FACTOR);
    }

    #[test]
    fn rejects_bad_threshold() {
        let err = HashTblBuilder::new()
            .with_max_load_factor(-1.0)
            .build::<u8, u8>()
            .unwrap_err();
        assert_eq!(err, TableError::InvalidLoadFactor(-1.0));
    }

    #[test]
    fn rejects_threshold_below_minimum() {
        let err = HashTblBuilder::new()
            .with_max_load_factor(1e-12)
            .build::<u8, u8>()
            .unwrap_err();
        assert_eq!(err, TableError::InvalidLoadFactor(1e-12));
        assert!(HashTblBuilder::new()
            .with_max_load_factor(crate::MIN_MAX_LOAD_FACTOR)
            .build::<u8, u8>()
            .is_ok());
    }

    #[test]
    fn custom_strategies_and_threshold() {
        let mut t = HashTblBuilder::new()
            .with_capacity(2)
            .with_max_load_factor(0.5)
            .with_hash(|k: &String| k.len() as u64)
            .with_equal(|a: &String, b: &String| a.eq_ignore_ascii_case(b))
            .build::<String, i32>()
            .unwrap();
        assert_eq!(t.bucket_count(), 3);

        assert!(t.insert("Key".to_string(), 1));
        assert!(!t.insert("KEY".to_string(), 2));
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(&"key".to_string()), Some(&2));

        // 2 / 3 > 0.5 grows to 7 buckets.
        t.insert("other".to_string(), 3);
        assert_eq!(t.bucket_count(), 7);
    }
}
