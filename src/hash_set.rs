//! HashSet: public orchestrator over `BucketTable`.
//!
//! Owns the hasher and config, turns elements into slots, and grows the
//! table once the load factor is reached.

use crate::bucket_table::{self, slot_for, BucketTable};
use crate::capacity::{self, CapacityError};
use crate::config::SetConfig;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// A separate-chaining hash set with a prime-sized initial table.
///
/// Elements are hashed with `S`; the 64-bit hash is read as a signed hash
/// code and mapped to a slot with a Euclidean remainder. After each
/// successful insert the load factor is checked, and once it reaches
/// `SetConfig::load_factor` the capacity is multiplied by
/// `SetConfig::growth_factor` and every element is redistributed.
pub struct HashSet<T, S = RandomState> {
    config: SetConfig,
    hasher: S,
    table: BucketTable<T>,
}

/// The classic mutable set abstraction.
pub trait Set<T> {
    /// Add `value`; returns `false` if an equal element is already stored.
    fn add(&mut self, value: T) -> bool;
    /// Whether an element equal to `value` is stored.
    fn contains(&self, value: &T) -> bool;
    /// Remove the element equal to `value`; returns whether one was stored.
    fn remove(&mut self, value: &T) -> bool;
    /// Number of stored elements.
    fn size(&self) -> usize;
}

impl<T> HashSet<T>
where
    T: Eq + Hash,
{
    /// An empty set with the default config and `min_capacity` buckets.
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// An empty set sized for `capacity` elements.
    ///
    /// Fails with `CapacityError::ZeroCapacity` when `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }

    pub fn with_config(capacity: usize, config: SetConfig) -> Result<Self, CapacityError> {
        Self::with_config_and_hasher(capacity, config, Default::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        let config = SetConfig::default();
        Self {
            table: BucketTable::with_capacity(config.min_capacity),
            config,
            hasher,
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        Self::with_config_and_hasher(capacity, SetConfig::default(), hasher)
    }

    /// Build a set whose initial capacity is planned from `capacity` under
    /// `config`. A zero request or an invalid config is rejected here, so
    /// a constructed set always has at least one bucket.
    pub fn with_config_and_hasher(
        capacity: usize,
        config: SetConfig,
        hasher: S,
    ) -> Result<Self, CapacityError> {
        let planned = capacity::plan(capacity, &config)?;
        Ok(Self {
            table: BucketTable::with_capacity(planned),
            config,
            hasher,
        })
    }

    fn hash_code<Q>(&self, q: &Q) -> i64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q) as i64
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Current ratio of stored elements to buckets.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    pub fn config(&self) -> &SetConfig {
        &self.config
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Insert `value`. Returns `false`, leaving the set untouched, if an
    /// equal element is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hash_code(&value);
        let slot = slot_for(hash, self.capacity());
        if !self.table.insert(slot, hash, value) {
            tracing::trace!(slot, "duplicate element rejected");
            return false;
        }
        if self.load_factor() >= self.config.load_factor {
            self.rehash();
        }
        true
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_code(q);
        self.table.contains(slot_for(hash, self.capacity()), hash, q)
    }

    /// Remove the element equal to `q`. Returns whether one was present.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.take(q).is_some()
    }

    /// Remove and return the element equal to `q`.
    pub fn take<Q>(&mut self, q: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_code(q);
        let slot = slot_for(hash, self.capacity());
        self.table.remove(slot, hash, q)
    }

    /// `insert` for a possibly absent element; `None` is a no-op returning `false`.
    pub fn insert_opt(&mut self, value: Option<T>) -> bool {
        value.is_some_and(|v| self.insert(v))
    }

    /// `contains` for a possibly absent element; `None` is never contained.
    pub fn contains_opt<Q>(&self, q: Option<&Q>) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        q.is_some_and(|q| self.contains(q))
    }

    /// `remove` for a possibly absent element; `None` is a no-op returning `false`.
    pub fn remove_opt<Q>(&mut self, q: Option<&Q>) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        q.is_some_and(|q| self.remove(q))
    }

    /// Remove every element. The capacity is kept.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    // Growth multiplies the capacity without re-deriving a prime, so after
    // the first rehash the table size is no longer prime.
    fn rehash(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_mul(self.config.growth_factor)
            .expect("capacity overflow");
        self.table.redistribute(new_capacity);
        tracing::debug!(
            len = self.len(),
            old_capacity,
            new_capacity,
            "rehashed hash set"
        );
    }
}

impl<T, S> Set<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn add(&mut self, value: T) -> bool {
        self.insert(value)
    }

    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        HashSet::remove(self, value)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// Iterator over the elements of a `HashSet`, in no particular order.
pub struct Iter<'a, T> {
    inner: bucket_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> fmt::Debug for HashSet<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{BuildHasherDefault, Hasher};

    type Fixed = BuildHasherDefault<DefaultHasher>;

    /// Hasher that reports whatever `u64` was last written, so tests can
    /// pin hash codes (including negative ones) exactly.
    #[derive(Default)]
    struct PassThrough(u64);
    impl Hasher for PassThrough {
        fn write(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.0 = (self.0 << 8) | b as u64;
            }
        }
        fn write_i64(&mut self, n: i64) {
            self.0 = n as u64;
        }
        fn finish(&self) -> u64 {
            self.0
        }
    }
    type PassThroughBuild = BuildHasherDefault<PassThrough>;

    /// Invariant: a second insert of an equal element is rejected and `len` is unchanged.
    #[test]
    fn duplicate_insert_rejected() {
        let mut s: HashSet<String> = HashSet::with_capacity(53).unwrap();
        assert!(s.insert("7".to_string()));
        assert!(!s.insert("7".to_string()));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn remove_then_contains_is_false() {
        let mut s: HashSet<String> = HashSet::with_capacity(53).unwrap();
        assert!(s.insert("3".to_string()));
        assert!(s.remove("3"));
        assert!(!s.contains("3"));
        assert!(!s.remove("3"));
        assert!(s.is_empty());
    }

    /// Invariant: growth keeps `len / capacity` below the threshold and keeps
    /// every element reachable.
    #[test]
    fn rehash_doubles_and_preserves_membership() {
        let mut s: HashSet<String, Fixed> =
            HashSet::with_capacity_and_hasher(40, Fixed::default()).unwrap();
        assert_eq!(s.capacity(), 53);
        for i in 0..90 {
            assert!(s.insert(i.to_string()));
            assert!(s.load_factor() < s.config().load_factor);
            s.table.assert_consistent();
        }
        // 43 / 53 and 85 / 106 both reach 0.8.
        assert_eq!(s.capacity(), 212);
        assert_eq!(s.len(), 90);
        assert!((0..90).all(|i| s.contains(i.to_string().as_str())));
    }

    /// Invariant: negative hash codes land in a valid slot and are found again.
    #[test]
    fn negative_hash_codes_are_placed_and_found() {
        let mut s: HashSet<i64, PassThroughBuild> = HashSet::with_hasher(Default::default());
        let values = [-1i64, -53, -54, i64::MIN, -1_000_003, 5];
        for v in values {
            assert!(s.hash_code(&v) == v);
            assert!(s.insert(v));
        }
        for v in values {
            assert!(s.contains(&v));
        }
        s.table.assert_consistent();
        assert!(s.remove(&i64::MIN));
        assert!(!s.contains(&i64::MIN));
        assert_eq!(s.len(), values.len() - 1);
    }

    #[test]
    fn absent_elements_are_rejected_without_side_effects() {
        let mut s: HashSet<String> = HashSet::new();
        assert!(!s.insert_opt(None));
        assert!(!s.contains_opt::<str>(None));
        assert!(!s.remove_opt::<str>(None));
        assert!(s.is_empty());

        assert!(s.insert_opt(Some("x".to_string())));
        assert!(s.contains_opt(Some("x")));
        assert!(s.remove_opt(Some("x")));
        assert!(s.is_empty());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            HashSet::<u32>::with_capacity(0).err(),
            Some(CapacityError::ZeroCapacity)
        );
    }

    /// Invariant: constructors report oversized requests as errors.
    #[test]
    fn oversized_capacity_is_an_error() {
        assert_eq!(
            HashSet::<u8>::with_capacity(usize::MAX / 4).err(),
            Some(CapacityError::CapacityOverflow)
        );
        let config = SetConfig::new().with_min_capacity(usize::MAX);
        assert!(matches!(
            HashSet::<u8>::with_config(1, config),
            Err(CapacityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn custom_config_grows_by_its_factor() {
        let config = SetConfig::new()
            .with_min_capacity(5)
            .with_load_factor(0.5)
            .with_growth_factor(3);
        let mut s: HashSet<u32, Fixed> =
            HashSet::with_config_and_hasher(1, config, Fixed::default()).unwrap();
        assert_eq!(s.capacity(), 5);
        s.extend(0..3u32);
        // 3 / 5 >= 0.5 -> 15.
        assert_eq!(s.capacity(), 15);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn set_trait_mirrors_inherent_api() {
        fn exercise<S: Set<String>>(s: &mut S) {
            assert!(s.add("a".to_string()));
            assert!(!s.add("a".to_string()));
            assert!(s.contains(&"a".to_string()));
            assert_eq!(s.size(), 1);
            assert!(s.remove(&"a".to_string()));
            assert!(!s.remove(&"a".to_string()));
            assert_eq!(s.size(), 0);
        }
        let mut s: HashSet<String> = HashSet::new();
        exercise(&mut s);
    }

    #[test]
    fn take_returns_owned_element() {
        let mut s: HashSet<String> = HashSet::new();
        s.insert("k".to_string());
        assert_eq!(s.take("k"), Some("k".to_string()));
        assert_eq!(s.take("k"), None);
    }

    #[test]
    fn clear_keeps_capacity_after_growth() {
        let mut s: HashSet<u32> = HashSet::new();
        s.extend(0..100u32);
        let cap = s.capacity();
        assert!(cap > 53);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.capacity(), cap);
        assert!(!s.contains(&7));
        assert!(s.insert(7));
    }

    #[test]
    fn equality_ignores_capacity_and_order() {
        let mut a: HashSet<u32> = HashSet::new();
        let mut b: HashSet<u32> = HashSet::with_capacity(1000).unwrap();
        a.extend([1, 2, 3]);
        b.extend([3, 2, 1]);
        assert_eq!(a, b);
        b.insert(4);
        assert_ne!(a, b);
    }

    #[test]
    fn debug_formats_as_set() {
        let mut s: HashSet<u32> = HashSet::new();
        s.insert(1);
        assert_eq!(format!("{:?}", s), "{1}");
    }
}
