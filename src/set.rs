//! Implementation of sets, backed by a splay tree
#![warn(missing_docs)]

extern crate alloc;

use compact_str::CompactString;
use core::{
    cmp::Ordering,
    fmt::Debug,
    iter::FusedIterator,
    ops::RangeBounds,
};

use crate::compare::{Compare, DerefKey, Identity, Natural};
use crate::error::Result;
use crate::splay_tree::{IntoIter, Iter, Range, SplayTree};

//-----------------------------------------------------------------------------------------------//

/// A set of unique keys, implemented using a splay tree.
///
/// Keys are ordered by `C`, which is the key's own `Ord` by default. Lookups through `get` splay
/// the key to the top of the tree, so keys that are used often stay cheap to reach.
#[derive(Clone)]
pub struct Set<K, C = Natural> {
    tree: SplayTree<K, Identity, C>,
}

impl<K: Ord> Set<K> {
    /// Constructor
    pub fn new() -> Set<K> {
        Set {
            tree: SplayTree::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> Set<K> {
        Set {
            tree: SplayTree::with_capacity(capacity),
        }
    }
}

impl<K, C> Set<K, C>
where
    C: Compare<K>,
{
    /// Constructor with a custom sorting function
    pub fn with_comparator(compare: C) -> Set<K, C> {
        Set {
            tree: SplayTree::with_comparator(compare),
        }
    }

    /// Get the number of keys in the `Set`
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check if there are any keys in the `Set`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all keys from the `Set`
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Reserves capacity for at least `additional` more keys
    pub fn reserve(&mut self, additional: usize) {
        self.tree.reserve(additional);
    }

    /// Add a key to the set.
    ///
    /// Returns `false`, dropping `key`, if an equal key was already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.insert_unique(key).1
    }

    /// Fallible version of [`Set::insert`]
    pub fn try_insert(&mut self, key: K) -> Result<bool> {
        Ok(self.tree.try_insert_unique(key)?.1)
    }

    /// Remove a key, returning whether it was present
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Remove a key and return it
    pub fn take(&mut self, key: &K) -> Option<K> {
        let position = self.tree.peek(key);
        self.tree.take(position)
    }

    /// Check if the set contains a key, without reshaping the tree
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Get the stored key equal to `key`.
    ///
    /// The key is promoted to the top of the tree for future lookups.
    pub fn get(&mut self, key: &K) -> Option<&K> {
        let position = self.tree.find_and_splay(key);
        self.tree.get(position)
    }

    /// Count the keys equal to `key`, which is zero or one
    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    /// Get the first key in the set
    pub fn first(&self) -> Option<&K> {
        self.tree.first_value()
    }

    /// Get the last key in the set
    pub fn last(&self) -> Option<&K> {
        self.tree.last_value()
    }

    /// Pop the first key from the set
    pub fn pop_first(&mut self) -> Option<K> {
        self.tree.pop_first()
    }

    /// Pop the last key from the set
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

    /// Move all keys of `other` to the end of this set.
    ///
    /// Every key of `other` must be greater than every key of this set, otherwise
    /// `Error::MergeOrder` is returned and neither set is changed.
    pub fn append(&mut self, other: &mut Self) -> Result<()> {
        self.tree.merge_unique(&mut other.tree)
    }

    /// The underlying tree
    pub fn as_tree(&self) -> &SplayTree<K, Identity, C> {
        &self.tree
    }
}

impl<K, C> Set<K, C>
where
    C: Compare<K> + Clone,
{
    /// Split the set at `key`, which is removed.
    ///
    /// This set keeps the smaller keys and the greater keys are returned. `Error::KeyNotFound` is
    /// returned if `key` is not in the set.
    pub fn split(&mut self, key: &K) -> Result<Self> {
        Ok(Set {
            tree: self.tree.split_key(key)?,
        })
    }
}

impl<K: Ord> Default for Set<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, C> Debug for Set<K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.tree.fmt(f)
    }
}

impl<K: PartialEq, C> PartialEq for Set<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, C> Eq for Set<K, C> {}

impl<K: PartialOrd, C> PartialOrd for Set<K, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, C> Ord for Set<K, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<'a, K, C> IntoIterator for &'a Set<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

impl<K, C> IntoIterator for Set<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<K, C> Extend<K> for Set<K, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.tree.insert_unique_iter(iter);
    }
}

impl<K: Ord> FromIterator<K> for Set<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        set.extend(iter);
        set
    }
}

//-----------------------------------------------------------------------------------------------//

/// A set of strings, implemented using a splay tree.
///
/// This is a specialised version of `Set` that stores keys as a `CompactString` and is searched
/// with `&str`.
#[derive(Clone)]
pub struct StringSet<C = Natural> {
    tree: SplayTree<CompactString, DerefKey, C>,
}

impl StringSet {
    /// Constructor
    pub fn new() -> StringSet {
        StringSet {
            tree: SplayTree::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> StringSet {
        StringSet {
            tree: SplayTree::with_capacity(capacity),
        }
    }
}

impl<C> StringSet<C>
where
    C: Compare<str>,
{
    /// Constructor with a custom sorting function
    pub fn with_comparator(compare: C) -> StringSet<C> {
        StringSet {
            tree: SplayTree::with_comparator(compare),
        }
    }

    /// Get the number of strings in the `StringSet`
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check if there are any strings in the `StringSet`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all strings from the `StringSet`
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Add a string, returning `false` if it was already present
    pub fn insert(&mut self, key: &str) -> bool {
        if self.tree.contains(key) {
            return false;
        }
        self.tree.insert_unique(CompactString::new(key)).1
    }

    /// Remove a string, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        let position = self.tree.peek(key);
        self.tree.take(position).is_some()
    }

    /// Check if the set contains a string
    pub fn contains(&self, key: &str) -> bool {
        self.tree.contains(key)
    }

    /// Get the stored string equal to `key`, promoting it to the top of the tree
    pub fn get(&mut self, key: &str) -> Option<&str> {
        let position = self.tree.find_and_splay(key);
        self.tree.get(position).map(CompactString::as_str)
    }

    /// Get the first string in the set
    pub fn first(&self) -> Option<&str> {
        self.tree.first_value().map(CompactString::as_str)
    }

    /// Get the last string in the set
    pub fn last(&self) -> Option<&str> {
        self.tree.last_value().map(CompactString::as_str)
    }

    /// Pop the first string from the set
    pub fn pop_first(&mut self) -> Option<CompactString> {
        self.tree.pop_first()
    }

    /// Pop the last string from the set
    pub fn pop_last(&mut self) -> Option<CompactString> {
        self.tree.pop_last()
    }

    /// Iterate over the strings in order
    pub fn iter(&self) -> StringSetIterator<'_> {
        StringSetIterator {
            iter: self.tree.iter(),
        }
    }
}

impl Default for StringSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Debug for StringSet<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.tree.fmt(f)
    }
}

impl<C> PartialEq for StringSet<C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<C> Eq for StringSet<C> {}

impl<'a, C> IntoIterator for &'a StringSet<C>
where
    C: Compare<str>,
{
    type Item = &'a str;
    type IntoIter = StringSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, C> Extend<&'a str> for StringSet<C>
where
    C: Compare<str>,
{
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a> FromIterator<&'a str> for StringSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        set.extend(iter);
        set
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `StringSet`
pub struct StringSetIterator<'a> {
    iter: Iter<'a, CompactString>,
}

impl<'a> Iterator for StringSetIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.iter.next().map(CompactString::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for StringSetIterator<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(CompactString::as_str)
    }
}

impl ExactSizeIterator for StringSetIterator<'_> {}

impl FusedIterator for StringSetIterator<'_> {}

//-----------------------------------------------------------------------------------------------//

#[test]
// A very simple test of inserting into a set
fn test_set_0() {
    use alloc::vec;
    use alloc::vec::Vec;

    let mut set = Set::new();

    assert!(set.insert(5));
    assert!(set.insert(1));
    assert!(set.insert(9));
    assert!(!set.insert(5));

    assert_eq!(set.get(&5), Some(&5));
    assert_eq!(set.get(&4), None);

    let v: Vec<i32> = set.iter().cloned().collect();
    assert_eq!(v, vec![1, 5, 9]);
}

#[test]
// Strings, a reversed comparator and the string set
fn test_set_1() {
    use alloc::{
        string::{String, ToString},
        vec,
        vec::Vec,
    };

    let mut set = Set::new();
    set.insert("Five".to_string());
    set.insert("One".to_string());
    set.insert("Nine".to_string());

    assert_eq!(set.get(&"Five".to_string()), Some(&"Five".to_string()));
    assert_eq!(set.get(&"Seven".to_string()), None);

    let v: Vec<String> = set.iter().cloned().collect();
    assert_eq!(
        v,
        vec!["Five".to_string(), "Nine".to_string(), "One".to_string()]
    );

    let mut reversed = StringSet::with_comparator(|a: &str, b: &str| b.cmp(a));
    reversed.extend(["Five", "One", "Nine", "One"]);
    assert_eq!(reversed.len(), 3);
    assert_eq!(reversed.get("Nine"), Some("Nine"));
    let v: Vec<&str> = reversed.iter().collect();
    assert_eq!(v, vec!["One", "Nine", "Five"]);

    let strings: StringSet = ["b", "a", "c"].into_iter().collect();
    assert_eq!(strings.first(), Some("a"));
    assert_eq!(strings.last(), Some("c"));
    assert!(strings.contains("b"));
}

#[test]
// A stress test with inserting and getting
fn test_set_2() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut set = Set::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        set.insert(key);
    }

    assert_eq!(set.len(), COUNT);

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        assert_eq!(set.get(&key), Some(&key));
    }

    set.as_tree().assert_correctness();
}

#[test]
// A stress test with inserting and popping from both ends
fn test_set_3() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(9876543210);

    let mut set = Set::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        set.insert(key);
    }

    let mut previous = 0;
    for _ in 0..COUNT / 2 {
        let key = set.pop_first().unwrap();
        assert!(key >= previous);
        previous = key;
    }

    let mut previous = usize::MAX;
    while let Some(key) = set.pop_last() {
        assert!(key <= previous);
        previous = key;
    }

    assert_eq!(set.len(), 0);
}

#[test]
// A stress test with inserting and removing
fn test_set_4() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(5678901234);

    let mut set = Set::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        set.insert(key);
    }

    let mut rng = SmallRng::seed_from_u64(5678901234);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        assert!(set.remove(&key));
    }

    assert_eq!(set.len(), 0);
    set.as_tree().assert_correctness();
}

#[test]
// Splitting a set and appending the halves back together
fn test_set_5() {
    use crate::error::Error;

    let mut low: Set<u32> = (0..100).collect();
    let mut high = low.split(&40).unwrap();

    assert_eq!(low.len(), 40);
    assert_eq!(high.len(), 59);
    assert_eq!(low.last(), Some(&39));
    assert_eq!(high.first(), Some(&41));

    assert_eq!(high.append(&mut low), Err(Error::MergeOrder));
    low.append(&mut high).unwrap();
    assert!(high.is_empty());
    assert_eq!(low.len(), 99);
    assert!(!low.contains(&40));
    assert_eq!(low.range(38..43).count(), 4);

    assert_eq!(low.split(&40).unwrap_err(), Error::KeyNotFound);
}
