#![cfg(test)]

// Property tests for HashTbl kept inside the crate so they can check the
// bucket layout directly.

use crate::hash_tbl::HashTbl;
use crate::primes::is_prime;
use crate::strategy::{DefaultKeyEqual, KeyEqual, KeyHash};
use hashbrown::HashMap;
use proptest::prelude::*;

// Pool-indexed operations: indices shrink to earlier keys, the pool
// shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    GetOrInsert(usize, i32),
    Erase(usize),
    Retrieve(usize),
    At(usize, i32),
    Clear,
    Copy,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=12).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::GetOrInsert(i, d)),
            3 => idx.clone().prop_map(Op::Erase),
            3 => idx.clone().prop_map(Op::Retrieve),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::At(i, d)),
            1 => Just(Op::Clear),
            1 => Just(Op::Copy),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Weak hash so chains actually collide: first byte plus length.
fn weak_hash(k: &String) -> u64 {
    k.bytes().next().map_or(0, u64::from) + k.len() as u64
}

fn check_layout<H, E>(
    t: &HashTbl<String, i32, H, E>,
    model: &HashMap<String, i32>,
) -> Result<(), TestCaseError>
where
    H: KeyHash<String>,
    E: KeyEqual<String>,
{
    prop_assert!(is_prime(t.bucket_count()));
    prop_assert_eq!(t.len(), model.len());
    prop_assert_eq!(t.is_empty(), model.is_empty());
    prop_assert!(t.load_factor() <= t.max_load_factor());
    let mut chained = 0;
    for b in 0..t.bucket_count() {
        for e in t.buckets.chain(b) {
            prop_assert_eq!(e.hash % t.bucket_count() as u64, b as u64);
            prop_assert_eq!(model.get(&e.key), Some(&e.value));
            chained += 1;
        }
    }
    prop_assert_eq!(chained, model.len());
    Ok(())
}

// Property: state-machine equivalence against a model map.
// Invariants exercised across random operation sequences:
// - insert returns true exactly for a new key; the last write wins.
// - erase/retrieve/count agree with the model, and a miss changes nothing.
// - get_or_insert defaults once; at never inserts.
// - every entry sits in the bucket its hash selects; bucket count is prime
//   and never shrinks; load factor stays within the threshold.
// - copies are independent of their source.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), capacity in 0usize..8) {
        let mut sut = HashTbl::with_capacity_and_strategies(
            capacity,
            weak_hash as fn(&String) -> u64,
            DefaultKeyEqual,
        );
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut buckets = sut.bucket_count();

        for op in ops {
            match op {
                Op::Insert(i, v) => {
                    let k = pool[i].clone();
                    let fresh = !model.contains_key(&k);
                    prop_assert_eq!(sut.insert(k.clone(), v), fresh);
                    model.insert(k, v);
                }
                Op::GetOrInsert(i, d) => {
                    let k = pool[i].clone();
                    let slot = sut.get_or_insert(k.clone());
                    let m = model.entry(k).or_default();
                    prop_assert_eq!(*slot, *m);
                    *slot = slot.wrapping_add(d);
                    *m = m.wrapping_add(d);
                }
                Op::Erase(i) => {
                    let k = &pool[i];
                    let before = sut.len();
                    let present = model.remove(k).is_some();
                    prop_assert_eq!(sut.erase(k), present);
                    prop_assert_eq!(sut.len(), before - usize::from(present));
                    prop_assert_eq!(sut.count(k), 0);
                }
                Op::Retrieve(i) => {
                    let k = &pool[i];
                    let mut out = i32::MIN;
                    let hit = sut.retrieve(k, &mut out);
                    match model.get(k) {
                        Some(v) => {
                            prop_assert!(hit);
                            prop_assert_eq!(out, *v);
                            prop_assert_eq!(sut.count(k), 1);
                        }
                        None => {
                            prop_assert!(!hit);
                            prop_assert_eq!(out, i32::MIN);
                            prop_assert_eq!(sut.count(k), 0);
                        }
                    }
                    prop_assert!(sut.bucket_len(k) >= sut.count(k));
                }
                Op::At(i, d) => {
                    let k = &pool[i];
                    match (sut.at(k), model.get_mut(k)) {
                        (Ok(v), Some(m)) => {
                            *v = v.wrapping_add(d);
                            *m = m.wrapping_add(d);
                        }
                        (Err(_), None) => {}
                        (got, want) => {
                            prop_assert!(false, "at disagrees: {:?} vs {:?}", got, want);
                        }
                    }
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.bucket_count(), buckets);
                }
                Op::Copy => {
                    let mut copy = sut.clone();
                    for k in &pool {
                        prop_assert_eq!(copy.get(k), model.get(k));
                    }
                    copy.clear();
                    copy.insert("copy-only".to_string(), 0);
                    prop_assert!(!sut.contains_key(&"copy-only".to_string()));
                }
            }

            prop_assert!(sut.bucket_count() >= buckets, "bucket count shrank");
            buckets = sut.bucket_count();
            check_layout(&sut, &model)?;
        }

        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(v));
        }
    }
}

// Property: growth preserves every pair and grows to at least twice the
// previous bucket count.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_rehash_preserves_pairs(keys in proptest::collection::hash_set(any::<u32>(), 1..200)) {
        let mut t: HashTbl<u32, u64> = HashTbl::with_capacity(1);
        let mut expected = Vec::new();
        for k in keys {
            let before = t.bucket_count();
            t.insert(k, u64::from(k) * 3);
            expected.push(k);
            if t.bucket_count() != before {
                prop_assert!(t.bucket_count() >= 2 * before);
            }
            for &seen in &expected {
                prop_assert_eq!(t.get(&seen), Some(&(u64::from(seen) * 3)));
            }
        }
    }
}
