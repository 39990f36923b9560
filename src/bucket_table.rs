//! BucketTable: structural layer holding the chains.
//!
//! Elements live in a single `SlotMap` arena together with their hash
//! code; each bucket is a `Vec` of arena keys in insertion order. Buckets
//! never point at each other, so redistribution only moves keys and the
//! elements themselves stay put.

use core::borrow::Borrow;
use slotmap::{DefaultKey, SlotMap};

/// Map a signed hash code onto `[0, capacity)`.
///
/// Uses the Euclidean remainder so negative hash codes land in a valid
/// slot instead of producing a negative index.
#[inline]
pub fn slot_for(hash: i64, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "slot_for on an empty table");
    (hash as i128).rem_euclid(capacity as i128) as usize
}

#[derive(Debug)]
struct Entry<T> {
    value: T,
    hash: i64,
}

#[derive(Debug)]
pub struct BucketTable<T> {
    buckets: Vec<Vec<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<T>>,
}

impl<T> BucketTable<T> {
    /// Allocate `capacity` empty buckets. `capacity` must be non-zero.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            buckets: empty_buckets(capacity),
            slots: SlotMap::with_key(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of elements chained at `slot`.
    #[cfg(test)]
    pub(crate) fn bucket_len(&self, slot: usize) -> usize {
        self.buckets.get(slot).map_or(0, Vec::len)
    }

    fn position<Q>(&self, slot: usize, hash: i64, q: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.buckets[slot].iter().position(|&k| {
            self.slots
                .get(k)
                .map(|e| e.hash == hash && e.value.borrow() == q)
                .unwrap_or(false)
        })
    }

    pub fn contains<Q>(&self, slot: usize, hash: i64, q: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(slot, hash, q).is_some()
    }

    /// Append `value` to the chain at `slot` unless an equal element is
    /// already chained there. Returns whether the table changed.
    pub fn insert(&mut self, slot: usize, hash: i64, value: T) -> bool
    where
        T: Eq,
    {
        if self.position(slot, hash, &value).is_some() {
            return false;
        }
        let k = self.slots.insert(Entry { value, hash });
        self.buckets[slot].push(k);
        true
    }

    /// Unlink the element equal to `q` from the chain at `slot`.
    pub fn remove<Q>(&mut self, slot: usize, hash: i64, q: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let pos = self.position(slot, hash, q)?;
        // Vec::remove keeps the rest of the chain in insertion order.
        let k = self.buckets[slot].remove(pos);
        self.slots.remove(k).map(|e| e.value)
    }

    /// Replace the bucket array with `new_capacity` buckets and move every
    /// element into the slot its stored hash maps to. Elements are not
    /// rehashed, so user `Hash` impls never run here.
    pub fn redistribute(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity > 0);
        let mut buckets = empty_buckets(new_capacity);
        for chain in self.buckets.drain(..) {
            for k in chain {
                // Every chained key resolves; a dangling one is a broken table.
                let hash = self.slots[k].hash;
                buckets[slot_for(hash, new_capacity)].push(k);
            }
        }
        self.buckets = buckets;
    }

    /// Drop every element, keeping the bucket count.
    pub fn clear(&mut self) {
        self.slots.clear();
        for chain in &mut self.buckets {
            chain.clear();
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            it: self.slots.values(),
        }
    }

    /// Check that every element sits in the bucket its hash maps to and
    /// that the chains account for every arena entry.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut chained = 0;
        for (slot, chain) in self.buckets.iter().enumerate() {
            for &k in chain {
                let e = self.slots.get(k).expect("chain key resolves");
                assert_eq!(slot_for(e.hash, self.capacity()), slot);
                chained += 1;
            }
        }
        assert_eq!(chained, self.slots.len());
    }
}

fn empty_buckets(capacity: usize) -> Vec<Vec<DefaultKey>> {
    (0..capacity).map(|_| Vec::new()).collect()
}

/// Iterator over the elements of a `BucketTable`, in arena order.
pub struct Iter<'a, T> {
    it: slotmap::basic::Values<'a, DefaultKey, Entry<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| &e.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}
