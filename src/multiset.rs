//! Implementation of a multiset, backed by a splay tree
#![warn(missing_docs)]

extern crate alloc;

use core::{cmp::Ordering, fmt::Debug, ops::RangeBounds};

use crate::compare::{Compare, Identity, Natural};
use crate::error::Result;
use crate::splay_tree::{IntoIter, Iter, Range, SplayTree};

//-----------------------------------------------------------------------------------------------//

/// An ordered collection of keys that may repeat, implemented using a splay tree.
///
/// Equal keys are kept in the order they were inserted.
#[derive(Clone)]
pub struct MultiSet<K, C = Natural> {
    tree: SplayTree<K, Identity, C>,
}

impl<K: Ord> MultiSet<K> {
    /// Constructor
    pub fn new() -> MultiSet<K> {
        MultiSet {
            tree: SplayTree::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> MultiSet<K> {
        MultiSet {
            tree: SplayTree::with_capacity(capacity),
        }
    }
}

impl<K, C> MultiSet<K, C>
where
    C: Compare<K>,
{
    /// Constructor with a custom sorting function
    pub fn with_comparator(compare: C) -> MultiSet<K, C> {
        MultiSet {
            tree: SplayTree::with_comparator(compare),
        }
    }

    /// Get the total number of keys, counting repeats
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check if the multiset is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all keys
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Reserves capacity for at least `additional` more keys
    pub fn reserve(&mut self, additional: usize) {
        self.tree.reserve(additional);
    }

    /// Add a key after any equal keys
    pub fn insert(&mut self, key: K) {
        self.tree.insert_equal(key);
    }

    /// Fallible version of [`MultiSet::insert`]
    pub fn try_insert(&mut self, key: K) -> Result<()> {
        self.tree.try_insert_equal(key)?;
        Ok(())
    }

    /// Count the keys equal to `key`
    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    /// Check if at least one key equal to `key` is present
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Get the first key equal to `key`, promoting it to the top of the tree
    pub fn get(&mut self, key: &K) -> Option<&K> {
        let position = self.tree.find_and_splay(key);
        self.tree.get(position)
    }

    /// Remove the earliest inserted key equal to `key` and return it
    pub fn take_one(&mut self, key: &K) -> Option<K> {
        let position = self.tree.peek(key);
        self.tree.take(position)
    }

    /// Remove one key equal to `key`, returning whether there was one
    pub fn remove_one(&mut self, key: &K) -> bool {
        self.take_one(key).is_some()
    }

    /// Remove every key equal to `key`, returning how many were removed
    pub fn remove_all(&mut self, key: &K) -> usize {
        self.tree.erase_key(key)
    }

    /// Iterate over the keys equal to `key`, in insertion order
    pub fn equal(&self, key: &K) -> Range<'_, K> {
        let (first, last) = self.tree.equal_range(key);
        self.tree.iter_between(first, last)
    }

    /// Get the first key
    pub fn first(&self) -> Option<&K> {
        self.tree.first_value()
    }

    /// Get the last key
    pub fn last(&self) -> Option<&K> {
        self.tree.last_value()
    }

    /// Pop the first key
    pub fn pop_first(&mut self) -> Option<K> {
        self.tree.pop_first()
    }

    /// Pop the last key
    pub fn pop_last(&mut self) -> Option<K> {
        self.tree.pop_last()
    }

    /// Iterate over the keys in order
    pub fn iter(&self) -> Iter<'_, K> {
        self.tree.iter()
    }

    /// Iterate over the keys within `range`
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Range<'_, K> {
        self.tree.range(range)
    }

    /// Move all keys of `other` to the end of this multiset.
    ///
    /// No key of `other` may be less than a key of this multiset. Equal keys at the boundary are
    /// allowed. On failure `Error::MergeOrder` is returned and neither multiset is changed.
    pub fn append(&mut self, other: &mut Self) -> Result<()> {
        self.tree.merge_equal(&mut other.tree)
    }

    /// The underlying tree
    pub fn as_tree(&self) -> &SplayTree<K, Identity, C> {
        &self.tree
    }
}

impl<K, C> MultiSet<K, C>
where
    C: Compare<K> + Clone,
{
    /// Split at the first key equal to `key`, which is removed.
    ///
    /// This multiset keeps the keys before it. The keys after it, including any other keys equal
    /// to `key`, are returned. `Error::KeyNotFound` is returned if `key` is not present.
    pub fn split(&mut self, key: &K) -> Result<Self> {
        Ok(MultiSet {
            tree: self.tree.split_key(key)?,
        })
    }
}

impl<K: Ord> Default for MultiSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, C> Debug for MultiSet<K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.tree.fmt(f)
    }
}

impl<K: PartialEq, C> PartialEq for MultiSet<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, C> Eq for MultiSet<K, C> {}

impl<K: PartialOrd, C> PartialOrd for MultiSet<K, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, C> Ord for MultiSet<K, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<'a, K, C> IntoIterator for &'a MultiSet<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

impl<K, C> IntoIterator for MultiSet<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<K, C> Extend<K> for MultiSet<K, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.tree.insert_equal_iter(iter);
    }
}

impl<K: Ord> FromIterator<K> for MultiSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        set.extend(iter);
        set
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Repeated keys are all kept and counted
fn test_multiset_0() {
    use alloc::{vec, vec::Vec};

    let mut set: MultiSet<i32> = [3, 1, 3, 2, 3].into_iter().collect();

    assert_eq!(set.len(), 5);
    assert_eq!(set.count(&3), 3);
    assert_eq!(set.count(&4), 0);

    let v: Vec<i32> = set.iter().cloned().collect();
    assert_eq!(v, vec![1, 2, 3, 3, 3]);

    assert!(set.remove_one(&3));
    assert_eq!(set.count(&3), 2);
    assert_eq!(set.remove_all(&3), 2);
    assert_eq!(set.remove_all(&3), 0);
    assert!(!set.remove_one(&3));
    assert_eq!(set.len(), 2);
}

#[test]
// Equal keys come back in insertion order
fn test_multiset_1() {
    use alloc::{vec, vec::Vec};

    // Compare only the first of each pair
    let mut set: MultiSet<(u8, char), _> =
        MultiSet::with_comparator(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
    for pair in [(1, 'x'), (0, 'y'), (1, 'z'), (1, 'w')] {
        set.insert(pair);
    }

    let run: Vec<char> = set.equal(&(1, ' ')).map(|p| p.1).collect();
    assert_eq!(run, vec!['x', 'z', 'w']);

    assert_eq!(set.take_one(&(1, ' ')), Some((1, 'x')));
    assert_eq!(set.get(&(1, ' ')), Some(&(1, 'z')));
    set.as_tree().assert_correctness();
}

#[test]
// Appending with equal boundary keys, and splitting inside a run
fn test_multiset_2() {
    use crate::error::Error;
    use alloc::{vec, vec::Vec};

    let mut a: MultiSet<i32> = [1, 2, 2].into_iter().collect();
    let mut b: MultiSet<i32> = [2, 5].into_iter().collect();
    let mut c: MultiSet<i32> = [0].into_iter().collect();

    a.append(&mut b).unwrap();
    assert_eq!(a.append(&mut c), Err(Error::MergeOrder));
    assert_eq!(c.len(), 1);

    let v: Vec<i32> = a.iter().cloned().collect();
    assert_eq!(v, vec![1, 2, 2, 2, 5]);

    let high = a.split(&2).unwrap();
    let v: Vec<i32> = high.iter().cloned().collect();
    assert_eq!(v, vec![2, 2, 5]);
    assert_eq!(a.len(), 1);
    high.as_tree().assert_correctness();
}

#[test]
// A stress test against a sorted vector
fn test_multiset_3() {
    use alloc::vec::Vec;
    use rand::prelude::*;

    const COUNT: usize = 50000;

    let mut rng = SmallRng::seed_from_u64(1029384756);
    let mut set = MultiSet::new();
    let mut model: Vec<u16> = Vec::new();

    for _ in 0..COUNT {
        let key = rng.random_range(0..500u16);
        if rng.random_bool(0.7) {
            set.insert(key);
            let at = model.partition_point(|&x| x <= key);
            model.insert(at, key);
        } else {
            let removed = set.remove_one(&key);
            match model.binary_search(&key) {
                Ok(_) => {
                    let at = model.partition_point(|&x| x < key);
                    model.remove(at);
                    assert!(removed);
                }
                Err(_) => assert!(!removed),
            }
        }
    }

    set.as_tree().assert_correctness();
    assert!(set.iter().eq(model.iter()));
}
