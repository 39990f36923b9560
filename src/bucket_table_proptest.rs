#![cfg(test)]

// Property tests for BucketTable kept inside the crate so they can reach
// the private structural layer.

use crate::bucket_table::{slot_for, BucketTable};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

// Pool-indexed operations: indices shrink to earlier values and op lists
// shrink in length. Hash codes are drawn from a tiny range so chains are
// long and collisions are the norm.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Remove(usize),
    Contains(usize),
    Grow,
    Iterate,
}

fn hash_of(pool: &[(i64, String)], i: usize) -> i64 {
    pool[i].0
}

fn arb_scenario() -> impl Strategy<Value = (Vec<(i64, String)>, usize, Vec<OpI>)> {
    (
        proptest::collection::vec((-4i64..4, "[a-c]{1,2}"), 1..=10),
        1usize..=7,
    )
        .prop_flat_map(|(pool, capacity)| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                idx.clone().prop_map(OpI::Insert),
                idx.clone().prop_map(OpI::Remove),
                idx.prop_map(OpI::Contains),
                Just(OpI::Grow),
                Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (pool.clone(), capacity, ops))
        })
}

// Property: BucketTable agrees with a model set of (hash, value) pairs.
// - Insert succeeds iff the pair is absent; remove returns the element iff present.
// - Every element sits in `slot_for(hash, capacity)` after each op, including growth.
// - `len` and `iter` match the model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_bucket_table_matches_model((pool, capacity, ops) in arb_scenario()) {
        let mut sut: BucketTable<String> = BucketTable::with_capacity(capacity);
        let mut model: HashSet<(i64, String)> = HashSet::new();

        for op in ops {
            match op {
                OpI::Insert(i) => {
                    let (h, v) = pool[i].clone();
                    let slot = slot_for(h, sut.capacity());
                    let fresh = model.insert((h, v.clone()));
                    prop_assert_eq!(sut.insert(slot, h, v), fresh);
                }
                OpI::Remove(i) => {
                    let h = hash_of(&pool, i);
                    let v = &pool[i].1;
                    let slot = slot_for(h, sut.capacity());
                    let removed = sut.remove(slot, h, v.as_str());
                    let was_present = model.remove(&(h, v.clone()));
                    prop_assert_eq!(removed.is_some(), was_present);
                    if let Some(r) = removed {
                        prop_assert_eq!(&r, v);
                    }
                }
                OpI::Contains(i) => {
                    let (h, v) = &pool[i];
                    let slot = slot_for(*h, sut.capacity());
                    prop_assert_eq!(
                        sut.contains(slot, *h, v.as_str()),
                        model.contains(&(*h, v.clone()))
                    );
                }
                OpI::Grow => {
                    // Cap growth so long op lists stay cheap.
                    let before = sut.capacity();
                    let target = if before < 64 { before * 2 } else { before };
                    sut.redistribute(target);
                    prop_assert_eq!(sut.capacity(), target);
                }
                OpI::Iterate => {
                    let s: BTreeSet<String> = sut.iter().cloned().collect();
                    let m: BTreeSet<String> = model.iter().map(|(_, v)| v.clone()).collect();
                    prop_assert_eq!(s, m);
                }
            }

            sut.assert_consistent();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}
