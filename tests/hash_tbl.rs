// HashTbl integration tests through the public API.
//
// Each test names the behavior it checks. Core invariants exercised:
// - Most recent write wins; insert reports new vs. updated.
// - erase/retrieve/count agree; misses change nothing.
// - Bucket count is prime and grows past twice its size on rehash.
// - Copies are deep.
// - The dump lists every bucket, with "Empty" for bare ones.
mod common;

use common::init_test_logger;
use hashtbl::primes::{find_next_prime, is_prime};
use hashtbl::{HashTbl, HashTblBuilder, TableError};

fn identity(k: &u64) -> u64 {
    *k
}

fn same(a: &u64, b: &u64) -> bool {
    a == b
}

// Scenario: eight distinct keys into capacity 4.
// Verifies: 5 buckets at first; growth to 11 once 6 / 5 > 1.0; all keys
// retrievable with their values afterwards.
#[test]
fn eight_inserts_from_capacity_four() {
    init_test_logger();
    let mut t = HashTbl::with_capacity_and_strategies(4, identity, same);
    assert_eq!(t.bucket_count(), 5);

    let pairs: Vec<(u64, String)> = (0..8u64)
        .map(|i| (i * 37 + 1, format!("acct-{i}")))
        .collect();
    for (n, (k, v)) in pairs.iter().enumerate() {
        assert!(t.insert(*k, v.clone()));
        let expected_buckets = if n < 5 { 5 } else { 11 };
        assert_eq!(t.bucket_count(), expected_buckets, "after insert #{}", n + 1);
        let mut out = String::new();
        assert!(t.retrieve(k, &mut out));
        assert_eq!(&out, v);
    }

    assert_eq!(t.len(), 8);
    for (k, v) in &pairs {
        let mut out = String::new();
        assert!(t.retrieve(k, &mut out));
        assert_eq!(&out, v);
    }
}

// Scenario: A=100 then A=200.
// Verifies: second insert returns false, value is 200, size stays 1.
#[test]
fn reinsert_updates_value() {
    let mut t: HashTbl<char, i32> = HashTbl::new();
    assert!(t.insert('A', 100));
    assert!(!t.insert('A', 200));
    let mut out = 0;
    assert!(t.retrieve(&'A', &mut out));
    assert_eq!(out, 200);
    assert_eq!(t.len(), 1);
}

// Verifies: after a successful erase the key is gone; erasing it again is
// a no-op that leaves len unchanged.
#[test]
fn erase_then_lookup() {
    let mut t = HashTbl::from([("x", 1), ("y", 2), ("z", 3)]);
    assert!(t.erase(&"y"));
    let mut out = -1;
    assert!(!t.retrieve(&"y", &mut out));
    assert_eq!(out, -1);
    assert_eq!(t.count(&"y"), 0);
    assert_eq!(t.len(), 2);

    assert!(!t.erase(&"y"));
    assert!(!t.erase(&"never"));
    assert_eq!(t.len(), 2);
}

// Verifies: len == distinct keys inserted minus keys erased.
#[test]
fn len_tracks_distinct_keys() {
    let mut t: HashTbl<u32, u32> = HashTbl::with_capacity(3);
    for i in 0..100 {
        t.insert(i % 40, i);
    }
    assert_eq!(t.len(), 40);
    for i in 0..10 {
        assert!(t.erase(&i));
    }
    assert_eq!(t.len(), 30);
    assert_eq!(t.get(&39), Some(&99));
}

// Verifies: after clear the table is empty and every bucket dumps "Empty".
#[test]
fn clear_then_dump() {
    let mut t = HashTbl::with_capacity_and_strategies(6, identity, same);
    for k in 0..7 {
        t.insert(k, k * k);
    }
    let before = t.to_string();
    assert!(before.contains("    3 => 9\n"), "{before}");

    t.clear();
    assert!(t.is_empty());
    assert_eq!(t.len(), 0);
    let dump = t.to_string();
    assert_eq!(dump.lines().count(), t.bucket_count());
    for (i, line) in dump.lines().enumerate() {
        assert_eq!(line, format!("[{i}]-> \"Empty\""));
    }
}

// Verifies: copies answer like the source and stay independent of it,
// for both clone and clone_from.
#[test]
fn copies_are_deep() {
    let src: HashTbl<String, f64> = (0..30)
        .map(|i| (format!("k{i}"), f64::from(i) * 1.5))
        .collect();
    let mut copy = src.clone();
    for i in 0..30 {
        let key = format!("k{i}");
        assert_eq!(copy.get(&key), src.get(&key));
    }

    copy.erase(&"k0".to_string());
    *copy.at(&"k1".to_string()).unwrap() = -1.0;
    assert_eq!(src.get(&"k0".to_string()), Some(&0.0));
    assert_eq!(src.get(&"k1".to_string()), Some(&1.5));

    let mut assigned: HashTbl<String, f64> = HashTbl::new();
    assigned.insert("stale".to_string(), 9.0);
    assigned.clone_from(&src);
    assert_eq!(assigned.len(), 30);
    assert!(!assigned.contains_key(&"stale".to_string()));
    assigned.clear();
    assert_eq!(src.len(), 30);
}

// Verifies: bucket count stays prime and each growth is to the next prime
// above twice the previous count.
#[test]
fn growth_sequence_is_prime_doubling() {
    init_test_logger();
    let mut t: HashTbl<u64, ()> = HashTbl::with_capacity(1);
    let mut sizes = vec![t.bucket_count()];
    for k in 0..1_000 {
        t.insert(k, ());
        if t.bucket_count() != *sizes.last().unwrap() {
            sizes.push(t.bucket_count());
        }
    }
    assert!(sizes.iter().all(|&s| is_prime(s)));
    for w in sizes.windows(2) {
        assert_eq!(w[1], find_next_prime(2 * w[0]));
    }
    assert_eq!(sizes, vec![2, 5, 11, 23, 47, 97, 197, 397, 797, 1597]);
}

// Verifies: at() fails with KeyNotFound and has no insertion side effect;
// get_or_insert() inserts the default exactly once.
#[test]
fn at_and_get_or_insert() {
    let mut t: HashTbl<&str, Vec<u8>> = HashTbl::new();
    assert_eq!(t.at(&"missing"), Err(TableError::KeyNotFound));
    assert!(t.is_empty());

    t.get_or_insert("bytes").push(1);
    t.get_or_insert("bytes").push(2);
    assert_eq!(t.len(), 1);
    assert_eq!(t.at_ref(&"bytes"), Ok(&vec![1, 2]));
}

// Verifies: with a constant hash every key shares one chain; equality
// alone tells them apart and bucket_len reports the collision length.
#[test]
fn constant_hash_collisions() {
    let mut t = HashTblBuilder::new()
        .with_capacity(10)
        .with_max_load_factor(100.0)
        .with_hash(|_: &String| 0u64)
        .build::<String, usize>()
        .unwrap();
    for i in 0..50 {
        t.insert(format!("key{i}"), i);
    }
    assert_eq!(t.bucket_count(), 11);
    assert_eq!(t.bucket_len(&"key7".to_string()), 50);
    assert_eq!(t.count(&"key7".to_string()), 1);
    assert_eq!(t.count(&"nokey".to_string()), 0);
    for i in 0..50 {
        assert_eq!(t.get(&format!("key{i}")), Some(&i));
    }
    assert!(t.erase(&"key25".to_string()));
    assert_eq!(t.bucket_len(&"key7".to_string()), 49);
}

// Verifies: bulk assignment replaces everything and re-sizes.
#[test]
fn assign_entries_replaces_contents() {
    let mut t: HashTbl<u8, u8> = (0..50).map(|i| (i, i)).collect();
    assert_eq!(t.bucket_count(), 101);
    t.assign_entries([(7, 70), (8, 80), (7, 71)]);
    assert_eq!(t.bucket_count(), 7);
    assert_eq!(t.len(), 2);
    assert_eq!(t.get(&7), Some(&71));
    assert!(!t.contains_key(&0));
}
