//! The splay tree engine that the set and multiset are built on
//!
//! [`SplayTree`] stores values in a vector that runs parallel to the leaves of a [`Tree`]. Values
//! do not move while the tree reshapes itself around them, so a [`Position`] stays valid until the
//! element it refers to is erased.

#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    fmt::Debug,
    iter::FusedIterator,
    ops::{Bound, RangeBounds},
};

use log::{debug, trace};

use crate::compare::{Compare, Identity, KeyOf, Natural};
use crate::error::{Error, Result};
use crate::util::{Duplicates, Location, Tree, NIL};

//-----------------------------------------------------------------------------------------------//

/// An opaque handle to an element of a [`SplayTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A position in a [`SplayTree`]: either an element, or one past the last element
///
/// Positions are plain handles and do not borrow the tree. A position is valid until its element
/// is erased. Using an erased position, or a position of another tree, is a logic error: it may
/// panic or refer to an unrelated element, but it is never unsound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// An element
    Node(NodeId),
    /// One past the last element
    End,
}

impl Position {
    #[inline]
    fn from_leaf(leaf: usize) -> Position {
        if leaf == NIL {
            Position::End
        } else {
            Position::Node(NodeId(leaf))
        }
    }

    #[inline]
    fn leaf(self) -> usize {
        match self {
            Position::Node(NodeId(leaf)) => leaf,
            Position::End => NIL,
        }
    }

    /// Check if this is the end position
    #[inline]
    pub fn is_end(self) -> bool {
        self == Position::End
    }
}

//-----------------------------------------------------------------------------------------------//

/// An ordered container backed by a splay tree
///
/// Values are ordered by the key that `X` extracts from them, compared with `C`. The engine does
/// not enforce unique keys by itself: `insert_unique` rejects duplicates and `insert_equal`
/// keeps them in insertion order, and a container picks the one it needs.
#[derive(Clone)]
pub struct SplayTree<V, X = Identity, C = Natural> {
    tree: Tree,
    values: Vec<Option<V>>,
    key_of: X,
    compare: C,
}

impl<V, X, C> SplayTree<V, X, C> {
    /// Constructor with explicit key extraction and comparison strategies
    pub fn with_parts(key_of: X, compare: C) -> Self {
        SplayTree {
            tree: Tree::new(),
            values: Vec::new(),
            key_of,
            compare,
        }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all elements
    pub fn clear(&mut self) {
        trace!("clearing {} elements", self.len());
        self.tree.clear();
        self.values.clear();
    }

    /// Reserves capacity for at least `additional` more elements
    pub fn reserve(&mut self, additional: usize) {
        let required = self.tree.reserve(additional);
        if required > 0 {
            self.values.reserve(required);
        }
    }

    /// Swap the contents of two trees, including their strategies
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// The structure of the tree
    pub fn structure(&self) -> &Tree {
        &self.tree
    }

    /// The position of the smallest element, or `End` if the tree is empty
    #[inline]
    pub fn begin(&self) -> Position {
        Position::from_leaf(self.tree.first())
    }

    /// The end position
    #[inline]
    pub fn end(&self) -> Position {
        Position::End
    }

    /// The position of the largest element, or `End` if the tree is empty
    #[inline]
    pub fn last(&self) -> Position {
        Position::from_leaf(self.tree.last())
    }

    /// The position after `position`; the end position stays at the end
    pub fn next(&self, position: Position) -> Position {
        match position {
            Position::Node(NodeId(leaf)) => Position::from_leaf(self.tree.next(leaf)),
            Position::End => Position::End,
        }
    }

    /// The position before `position`
    ///
    /// Stepping back from the end gives the largest element. Stepping back from the smallest
    /// element gives `End`.
    pub fn prev(&self, position: Position) -> Position {
        match position {
            Position::Node(NodeId(leaf)) => Position::from_leaf(self.tree.prev(leaf)),
            Position::End => self.last(),
        }
    }

    /// Get the element at a position
    pub fn get(&self, position: Position) -> Option<&V> {
        match position {
            Position::Node(NodeId(leaf)) => self.values.get(leaf).and_then(Option::as_ref),
            Position::End => None,
        }
    }

    /// The smallest element
    pub fn first_value(&self) -> Option<&V> {
        self.get(self.begin())
    }

    /// The largest element
    pub fn last_value(&self) -> Option<&V> {
        self.get(self.last())
    }

    /// Splay the element at `position` to the root
    pub fn splay(&mut self, position: Position) {
        self.tree.splay(position.leaf());
    }

    /// Remove the element at `position` and return it
    pub fn take(&mut self, position: Position) -> Option<V> {
        let leaf = position.leaf();
        if leaf == NIL {
            return None;
        }
        self.tree.remove(leaf);
        self.values[leaf].take()
    }

    /// Remove the element at `position`, returning the position that followed it
    pub fn erase(&mut self, position: Position) -> Position {
        let next = self.next(position);
        self.take(position);
        next
    }

    /// Remove the elements in `[first, last)`, returning `last`
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        let mut position = first;
        while position != last && !position.is_end() {
            position = self.erase(position);
        }
        last
    }

    /// Remove and return the smallest element
    pub fn pop_first(&mut self) -> Option<V> {
        self.take(self.begin())
    }

    /// Remove and return the largest element
    pub fn pop_last(&mut self) -> Option<V> {
        self.take(self.last())
    }

    /// Iterate over the elements in order
    ///
    /// The iterator is double ended, so reverse iteration is `iter().rev()`.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            tree: &self.tree,
            values: &self.values,
            front: self.tree.first(),
            back: self.tree.last(),
            len: self.tree.count(),
        }
    }

    /// Iterate over the elements in `[first, last)`
    pub fn iter_between(&self, first: Position, last: Position) -> Range<'_, V> {
        Range {
            tree: &self.tree,
            values: &self.values,
            front: first.leaf(),
            back: last.leaf(),
        }
    }

    // Exchange storage only, leaving the strategies in place
    fn swap_storage(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.tree, &mut other.tree);
        core::mem::swap(&mut self.values, &mut other.values);
    }
}

impl<V, X, C> SplayTree<V, X, C>
where
    X: Default,
    C: Default,
{
    /// Constructor
    pub fn new() -> Self {
        Self::with_parts(X::default(), C::default())
    }

    /// Constructor, pre-allocating a given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        SplayTree {
            tree: Tree::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            key_of: X::default(),
            compare: C::default(),
        }
    }
}

impl<V, X, C> SplayTree<V, X, C>
where
    X: Default,
{
    /// Constructor with a custom comparator
    pub fn with_comparator(compare: C) -> Self {
        Self::with_parts(X::default(), compare)
    }
}

impl<V, X, C> SplayTree<V, X, C>
where
    X: KeyOf<V>,
    C: Compare<X::Key>,
{
    #[inline]
    fn key(&self, leaf: usize) -> &X::Key {
        self.key_of.key_of(occupied(&self.values[leaf]))
    }

    fn locate(&self, key: &X::Key, duplicates: Duplicates) -> Location {
        self.tree
            .locate(duplicates, |x| self.compare.compare(key, self.key(x)))
    }

    // Link a value in at a location that is not `Found`, and splay it to the root
    fn attach(&mut self, location: Location, value: V) -> usize {
        let leaf = self.tree.attach(location);
        place(&mut self.values, leaf, value);
        self.tree.splay(leaf);
        leaf
    }

    fn try_reserve_one(&mut self) -> Result<()> {
        let required = self.tree.try_reserve(1)?;
        if required > 0 {
            self.values.try_reserve(required)?;
        }
        Ok(())
    }

    /// Insert a value unless an equal key is already present
    ///
    /// Returns the position of the new element and `true`, or the position of the existing
    /// element and `false`. In the second case `value` is dropped and the tree is unchanged.
    pub fn insert_unique(&mut self, value: V) -> (Position, bool) {
        match self.locate(self.key_of.key_of(&value), Duplicates::Reject) {
            Location::Found(leaf) => (Position::from_leaf(leaf), false),
            location => (Position::from_leaf(self.attach(location, value)), true),
        }
    }

    /// Insert a value, keeping it after any elements with an equal key
    pub fn insert_equal(&mut self, value: V) -> Position {
        let location = self.locate(self.key_of.key_of(&value), Duplicates::Allow);
        Position::from_leaf(self.attach(location, value))
    }

    /// Fallible version of [`SplayTree::insert_unique`]
    ///
    /// If storage for the node cannot be allocated, `Error::Alloc` is returned and nothing is
    /// linked into the tree.
    pub fn try_insert_unique(&mut self, value: V) -> Result<(Position, bool)> {
        match self.locate(self.key_of.key_of(&value), Duplicates::Reject) {
            Location::Found(leaf) => Ok((Position::from_leaf(leaf), false)),
            location => {
                self.try_reserve_one()?;
                Ok((Position::from_leaf(self.attach(location, value)), true))
            }
        }
    }

    /// Fallible version of [`SplayTree::insert_equal`]
    pub fn try_insert_equal(&mut self, value: V) -> Result<Position> {
        let location = self.locate(self.key_of.key_of(&value), Duplicates::Allow);
        self.try_reserve_one()?;
        Ok(Position::from_leaf(self.attach(location, value)))
    }

    /// Build a value and insert it unless an equal key is already present
    ///
    /// The value is built before any storage is touched, so a panicking constructor leaves the
    /// tree as it was. A value whose key is already present is dropped.
    pub fn emplace_unique_with<F>(&mut self, make: F) -> (Position, bool)
    where
        F: FnOnce() -> V,
    {
        self.insert_unique(make())
    }

    /// Build a value and insert it after any elements with an equal key
    pub fn emplace_equal_with<F>(&mut self, make: F) -> Position
    where
        F: FnOnce() -> V,
    {
        self.insert_equal(make())
    }

    /// Insert every value of an iterator, rejecting duplicate keys
    pub fn insert_unique_iter<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert_unique(value);
        }
    }

    /// Insert every value of an iterator, keeping duplicate keys
    pub fn insert_equal_iter<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert_equal(value);
        }
    }

    /// Remove every element with a key equal to `key`, returning how many were removed
    pub fn erase_key(&mut self, key: &X::Key) -> usize {
        let (mut position, last) = self.equal_range(key);
        let mut removed = 0;
        while position != last {
            position = self.erase(position);
            removed += 1;
        }
        removed
    }

    /// The position of the first element not ordered before `key`
    pub fn lower_bound(&self, key: &X::Key) -> Position {
        Position::from_leaf(
            self.tree
                .lower_bound(|x| self.compare.compare(key, self.key(x))),
        )
    }

    /// The position of the first element ordered after `key`
    pub fn upper_bound(&self, key: &X::Key) -> Position {
        Position::from_leaf(
            self.tree
                .upper_bound(|x| self.compare.compare(key, self.key(x))),
        )
    }

    /// The positions bounding the elements with a key equal to `key`
    pub fn equal_range(&self, key: &X::Key) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Find the first element with a key equal to `key` without changing the tree
    pub fn peek(&self, key: &X::Key) -> Position {
        let leaf = self
            .tree
            .lower_bound(|x| self.compare.compare(key, self.key(x)));
        if leaf != NIL && self.compare.compare(key, self.key(leaf)) == Ordering::Equal {
            Position::from_leaf(leaf)
        } else {
            Position::End
        }
    }

    /// Find the first element with a key equal to `key`, splaying it to the root
    ///
    /// Accessing the element again, or one near it, is cheap afterwards.
    pub fn find_and_splay(&mut self, key: &X::Key) -> Position {
        let position = self.peek(key);
        self.splay(position);
        position
    }

    /// Check if an element with a key equal to `key` exists
    pub fn contains(&self, key: &X::Key) -> bool {
        !self.peek(key).is_end()
    }

    /// Count the elements with a key equal to `key`
    pub fn count(&self, key: &X::Key) -> usize {
        let (first, last) = self.equal_range(key);
        self.iter_between(first, last).count()
    }

    /// Iterate over the elements whose keys lie in `range`
    pub fn range<R>(&self, range: R) -> Range<'_, V>
    where
        R: RangeBounds<X::Key>,
    {
        let first = match range.start_bound() {
            Bound::Included(key) => self.lower_bound(key),
            Bound::Excluded(key) => self.upper_bound(key),
            Bound::Unbounded => self.begin(),
        };
        let last = match range.end_bound() {
            Bound::Included(key) => self.upper_bound(key),
            Bound::Excluded(key) => self.lower_bound(key),
            Bound::Unbounded => self.end(),
        };

        // A reversed range is empty
        if let (Position::Node(a), Position::Node(b)) = (first, last) {
            if self.compare.compare(self.key(a.0), self.key(b.0)) == Ordering::Greater {
                return self.iter_between(last, last);
            }
        }
        if first.is_end() {
            return self.iter_between(first, first);
        }

        self.iter_between(first, last)
    }

    /// Check every invariant of the tree, panicking if one is broken
    ///
    /// Parent and child links must agree, the cached extremes and count must be right, every
    /// element must be stored and an in-order walk must never go backwards.
    pub fn assert_correctness(&self) {
        self.tree.check();

        let mut x = self.tree.first();
        while x != NIL {
            assert!(self.values[x].is_some(), "element {x} has no value");
            let y = self.tree.next(x);
            if y != NIL {
                assert!(
                    self.compare.compare(self.key(x), self.key(y)) != Ordering::Greater,
                    "elements {x} and {y} are out of order"
                );
            }
            x = y;
        }
    }
}

impl<V, X, C> SplayTree<V, X, C>
where
    X: KeyOf<V> + Clone,
    C: Compare<X::Key> + Clone,
{
    /// Split the tree around the element at `position`
    ///
    /// The element is splayed to the root and dropped. This tree keeps the elements before it and
    /// the elements after it are returned as a new tree. Only the smaller of the two sides is
    /// moved to new storage.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end position.
    pub fn split(&mut self, position: Position) -> Self {
        let pivot = position.leaf();
        assert_ne!(pivot, NIL, "cannot split at the end position");

        let (low, high) = self.tree.cut(pivot);
        self.values[pivot] = None;

        let mut greater = Self::with_parts(self.key_of.clone(), self.compare.clone());
        let values = &mut self.values;
        let dest = &mut greater.values;

        if self.tree.not_larger(low, high) {
            let moved = self.tree.transplant(low, &mut greater.tree, |from, to| {
                relocate(values, dest, from, to)
            });
            greater.tree.adopt(moved);
            self.tree.adopt(high);
            self.swap_storage(&mut greater);
        } else {
            let moved = self.tree.transplant(high, &mut greater.tree, |from, to| {
                relocate(values, dest, from, to)
            });
            greater.tree.adopt(moved);
            self.tree.adopt(low);
        }

        trace!("split into {} and {} elements", self.len(), greater.len());
        greater
    }

    /// Split the tree around the first element with a key equal to `key`
    ///
    /// See [`SplayTree::split`]. If there is no such element `Error::KeyNotFound` is returned and
    /// the tree is unchanged.
    pub fn split_key(&mut self, key: &X::Key) -> Result<Self> {
        let position = self.peek(key);
        if position.is_end() {
            debug!("split rejected: key not found");
            return Err(Error::KeyNotFound);
        }
        Ok(self.split(position))
    }
}

impl<V, X, C> SplayTree<V, X, C>
where
    X: KeyOf<V>,
    C: Compare<X::Key>,
{
    /// Move every element of `other` to the end of this tree
    ///
    /// Every key in `other` must be ordered strictly after every key in this tree, otherwise
    /// `Error::MergeOrder` is returned and neither tree is changed. On success `other` is empty.
    ///
    /// Each tree owns its own storage, so the smaller of the two trees is moved leaf by leaf into
    /// the storage of the larger one. The cost is linear in the size of the smaller tree.
    pub fn merge_unique(&mut self, other: &mut Self) -> Result<()> {
        self.merge(other, Duplicates::Reject)
    }

    /// Like [`SplayTree::merge_unique`], but the boundary keys may be equal
    ///
    /// The smaller tree is moved into the storage of the larger one, as in `merge_unique`.
    pub fn merge_equal(&mut self, other: &mut Self) -> Result<()> {
        self.merge(other, Duplicates::Allow)
    }

    fn merge(&mut self, other: &mut Self, duplicates: Duplicates) -> Result<()> {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            self.swap_storage(other);
            return Ok(());
        }

        let ordering = self
            .compare
            .compare(self.key(self.tree.last()), other.key(other.tree.first()));
        let separated = match duplicates {
            Duplicates::Reject => ordering == Ordering::Less,
            Duplicates::Allow => ordering != Ordering::Greater,
        };
        if !separated {
            debug!("merge rejected: key ranges overlap");
            return Err(Error::MergeOrder);
        }

        trace!("merging {} elements into {}", other.len(), self.len());

        // Move the smaller tree into the storage of the larger one
        if other.len() <= self.len() {
            let low = self.tree.span();
            let span = other.tree.span();
            let source = &mut other.values;
            let dest = &mut self.values;
            let high = other.tree.transplant(span, &mut self.tree, |from, to| {
                relocate(source, dest, from, to)
            });
            self.tree.join(low, high);
        } else {
            let high = other.tree.span();
            let span = self.tree.span();
            let source = &mut self.values;
            let dest = &mut other.values;
            let low = self.tree.transplant(span, &mut other.tree, |from, to| {
                relocate(source, dest, from, to)
            });
            other.tree.join(low, high);
            self.swap_storage(other);
        }

        other.clear();
        Ok(())
    }
}

// Get the value of a leaf that is linked into the tree
#[inline]
fn occupied<V>(slot: &Option<V>) -> &V {
    match slot {
        Some(value) => value,
        None => unreachable!("vacant slot linked into the tree"),
    }
}

// Store a value for a freshly allocated leaf
fn place<V>(values: &mut Vec<Option<V>>, leaf: usize, value: V) {
    if leaf == values.len() {
        values.push(Some(value));
    } else {
        values[leaf] = Some(value);
    }
}

// Move the value of a transplanted leaf
fn relocate<V>(source: &mut [Option<V>], dest: &mut Vec<Option<V>>, from: usize, to: usize) {
    if let Some(value) = source[from].take() {
        place(dest, to, value);
    }
}

impl<V, X, C> Default for SplayTree<V, X, C>
where
    X: Default,
    C: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, X, C> Extend<V> for SplayTree<V, X, C>
where
    X: KeyOf<V>,
    C: Compare<X::Key>,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.insert_equal_iter(iter);
    }
}

impl<V, X, C> FromIterator<V> for SplayTree<V, X, C>
where
    X: KeyOf<V> + Default,
    C: Compare<X::Key> + Default,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = Self::with_capacity(iter.size_hint().0);
        tree.extend(iter);
        tree
    }
}

impl<V: Debug, X, C> Debug for SplayTree<V, X, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V: PartialEq, X, C> PartialEq for SplayTree<V, X, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq, X, C> Eq for SplayTree<V, X, C> {}

impl<V: PartialOrd, X, C> PartialOrd for SplayTree<V, X, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<V: Ord, X, C> Ord for SplayTree<V, X, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<'a, V, X, C> IntoIterator for &'a SplayTree<V, X, C> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, X, C> IntoIterator for SplayTree<V, X, C> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            front: self.tree.first(),
            back: self.tree.last(),
            len: self.tree.count(),
            tree: self.tree,
            values: self.values,
        }
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `SplayTree`
pub struct Iter<'a, V> {
    tree: &'a Tree,
    values: &'a [Option<V>],
    front: usize,
    back: usize,
    len: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        if self.len == 0 {
            return None;
        }

        let leaf = self.front;
        self.front = self.tree.next(leaf);
        self.len -= 1;

        Some(occupied(&self.values[leaf]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, V> DoubleEndedIterator for Iter<'a, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        if self.len == 0 {
            return None;
        }

        let leaf = self.back;
        self.back = self.tree.prev(leaf);
        self.len -= 1;

        Some(occupied(&self.values[leaf]))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

/// Iterator over the elements between two positions of a `SplayTree`
pub struct Range<'a, V> {
    tree: &'a Tree,
    values: &'a [Option<V>],
    front: usize,
    back: usize,
}

impl<'a, V> Iterator for Range<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        if self.front == self.back {
            return None;
        }

        let leaf = self.front;
        self.front = self.tree.next(leaf);

        Some(occupied(&self.values[leaf]))
    }
}

impl<'a, V> DoubleEndedIterator for Range<'a, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        if self.front == self.back {
            return None;
        }

        self.back = if self.back == NIL {
            self.tree.last()
        } else {
            self.tree.prev(self.back)
        };

        Some(occupied(&self.values[self.back]))
    }
}

impl<V> FusedIterator for Range<'_, V> {}

/// Owning iterator over a `SplayTree`
pub struct IntoIter<V> {
    tree: Tree,
    values: Vec<Option<V>>,
    front: usize,
    back: usize,
    len: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        if self.len == 0 {
            return None;
        }

        let leaf = self.front;
        self.front = self.tree.next(leaf);
        self.len -= 1;

        self.values[leaf].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<V> {
        if self.len == 0 {
            return None;
        }

        let leaf = self.back;
        self.back = self.tree.prev(leaf);
        self.len -= 1;

        self.values[leaf].take()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn values<V: Clone, X, C>(tree: &SplayTree<V, X, C>) -> Vec<V> {
    tree.iter().cloned().collect()
}

#[test]
// Inserting 2, 1, 4, 3, 5 gives each key once, in order
fn test_splay_tree_0() {
    use alloc::vec;

    let mut tree: SplayTree<i32> = SplayTree::new();
    for key in [2, 1, 4, 3, 5] {
        assert!(tree.insert_unique(key).1);
    }
    tree.assert_correctness();

    for key in 1..=4 {
        assert_eq!(tree.count(&key), 1);
    }
    assert_eq!(values(&tree), vec![1, 2, 3, 4, 5]);

    // Walking the positions by hand, forwards and back
    let mut p = tree.begin();
    assert_eq!(tree.get(p), Some(&1));
    p = tree.next(p);
    p = tree.next(p);
    assert_eq!(tree.get(p), Some(&3));
    p = tree.prev(p);
    assert_eq!(tree.get(p), Some(&2));
    for _ in 0..4 {
        p = tree.next(p);
    }
    assert_eq!(p, tree.end());
    p = tree.prev(p);
    assert_eq!(tree.get(p), Some(&5));
}

#[test]
// A repeated unique insert is rejected and returns the same position
fn test_splay_tree_1() {
    let mut tree: SplayTree<i32> = SplayTree::new();
    let (a, inserted_a) = tree.insert_unique(1);
    let (b, inserted_b) = tree.insert_unique(1);

    assert!(inserted_a);
    assert!(!inserted_b);
    assert_eq!(a, b);
    assert_eq!(tree.count(&1), 1);
    assert_eq!(tree.count(&2), 0);
    assert_eq!(tree.len(), 1);

    tree.insert_unique(2);
    assert_eq!(tree.count(&1), 1);
    assert_eq!(tree.count(&2), 1);
}

#[test]
// Erasing from the middle keeps the cached extremes
fn test_splay_tree_2() {
    let mut tree: SplayTree<i32> = SplayTree::new();
    tree.insert_unique_iter([1, 3, 5]);

    assert_eq!(tree.erase_key(&3), 1);
    tree.assert_correctness();

    assert_eq!(tree.first_value(), Some(&1));
    assert_eq!(tree.iter().next_back(), Some(&5));
    assert_eq!(tree.len(), 2);
}

#[test]
// Equal keys keep their insertion order
fn test_splay_tree_3() {
    use alloc::vec;

    let mut tree: SplayTree<(i32, char), ByFirst> = SplayTree::new();
    for pair in [(2, 'a'), (1, 'b'), (2, 'c'), (0, 'd'), (2, 'e')] {
        tree.insert_equal(pair);
    }
    tree.assert_correctness();

    assert_eq!(tree.count(&2), 3);
    assert_eq!(
        values(&tree),
        vec![(0, 'd'), (1, 'b'), (2, 'a'), (2, 'c'), (2, 'e')]
    );

    let (first, last) = tree.equal_range(&2);
    let run: Vec<char> = tree.iter_between(first, last).map(|p| p.1).collect();
    assert_eq!(run, vec!['a', 'c', 'e']);

    assert_eq!(tree.get(tree.peek(&2)), Some(&(2, 'a')));
}

#[cfg(test)]
#[derive(Clone, Copy, Default)]
struct ByFirst;

#[cfg(test)]
impl KeyOf<(i32, char)> for ByFirst {
    type Key = i32;

    fn key_of<'a>(&self, value: &'a (i32, char)) -> &'a i32 {
        &value.0
    }
}

#[test]
// `peek` leaves the shape alone, `find_and_splay` moves the element to the root
fn test_splay_tree_4() {
    let mut tree: SplayTree<u32> = SplayTree::new();
    tree.insert_unique_iter(0..100);

    let root = tree.structure().root();
    let p = tree.peek(&17);
    assert_eq!(tree.get(p), Some(&17));
    assert_eq!(tree.structure().root(), root);

    let q = tree.find_and_splay(&17);
    assert_eq!(p, q);
    assert_eq!(Position::Node(NodeId(tree.structure().root())), q);
    tree.assert_correctness();

    assert_eq!(tree.find_and_splay(&1000), Position::End);
    assert!(!tree.contains(&1000));
}

#[test]
// Bounds agree with a sorted vector
fn test_splay_tree_5() {
    use alloc::vec;

    let mut tree: SplayTree<i32> = SplayTree::new();
    tree.insert_equal_iter([10, 20, 20, 30]);

    assert_eq!(tree.get(tree.lower_bound(&20)), Some(&20));
    assert_eq!(tree.get(tree.upper_bound(&20)), Some(&30));
    assert_eq!(tree.get(tree.lower_bound(&5)), Some(&10));
    assert_eq!(tree.lower_bound(&31), Position::End);
    assert_eq!(tree.upper_bound(&30), Position::End);

    let v: Vec<i32> = tree.range(15..=30).cloned().collect();
    assert_eq!(v, vec![20, 20, 30]);
    let v: Vec<i32> = tree.range(..20).rev().cloned().collect();
    assert_eq!(v, vec![10]);
    assert_eq!(tree.range(25..15).count(), 0);
    assert_eq!(tree.range(40..).count(), 0);
}

#[test]
// Range erase stops at `last`
fn test_splay_tree_6() {
    use alloc::vec;

    let mut tree: SplayTree<i32> = SplayTree::new();
    tree.insert_unique_iter(1..=9);

    let first = tree.lower_bound(&3);
    let last = tree.lower_bound(&7);
    let next = tree.erase_range(first, last);
    tree.assert_correctness();

    assert_eq!(tree.get(next), Some(&7));
    assert_eq!(values(&tree), vec![1, 2, 7, 8, 9]);

    let end = tree.erase_range(tree.lower_bound(&8), tree.end());
    assert_eq!(end, Position::End);
    assert_eq!(values(&tree), vec![1, 2, 7]);
    assert_eq!(tree.last_value(), Some(&7));
}

#[test]
// Merging separated trees, and rejecting overlapping ones untouched
fn test_splay_tree_7() {
    use alloc::vec;

    let mut a: SplayTree<i32> = SplayTree::new();
    let mut b: SplayTree<i32> = SplayTree::new();
    a.insert_unique_iter([1, 3, 4]);
    b.insert_unique_iter([6, 7, 9]);

    a.merge_unique(&mut b).unwrap();
    a.assert_correctness();
    b.assert_correctness();
    assert_eq!(values(&a), vec![1, 3, 4, 6, 7, 9]);
    assert!(b.is_empty());

    let mut c: SplayTree<i32> = SplayTree::new();
    let mut d: SplayTree<i32> = SplayTree::new();
    c.insert_unique_iter([3, 4]);
    d.insert_unique_iter([1, 5]);
    assert_eq!(c.merge_unique(&mut d), Err(Error::MergeOrder));
    assert_eq!(values(&c), vec![3, 4]);
    assert_eq!(values(&d), vec![1, 5]);

    // Equal boundary keys only merge in equal mode
    let mut e: SplayTree<i32> = SplayTree::new();
    e.insert_equal_iter([4, 5, 6]);
    assert_eq!(c.merge_unique(&mut e), Err(Error::MergeOrder));
    assert_eq!(c.merge_equal(&mut e), Ok(()));
    c.assert_correctness();
    assert_eq!(values(&c), vec![3, 4, 4, 5, 6]);
}

#[test]
// A large donor is merged by moving the smaller receiver into its storage
fn test_splay_tree_8() {
    let mut a: SplayTree<u32> = SplayTree::new();
    let mut b: SplayTree<u32> = SplayTree::new();
    a.insert_unique_iter(0..3);
    b.insert_unique_iter(10..1000);

    a.merge_unique(&mut b).unwrap();
    a.assert_correctness();
    assert_eq!(a.len(), 993);
    assert!(b.is_empty());
    assert!(a.iter().copied().eq((0..3).chain(10..1000)));

    // Merging into an empty tree takes everything
    let mut c: SplayTree<u32> = SplayTree::new();
    c.merge_unique(&mut a).unwrap();
    assert_eq!(c.len(), 993);
    assert!(a.is_empty());
}

#[test]
// Split drops the pivot, and merging the halves restores the rest
fn test_splay_tree_9() {
    let mut tree: SplayTree<u32> = SplayTree::new();
    tree.insert_unique_iter((0..200).map(|x| (x * 7) % 200));

    for pivot in [150, 20, 0, 199] {
        let mut t = tree.clone();
        let mut right = t.split_key(&pivot).unwrap();
        t.assert_correctness();
        right.assert_correctness();

        assert!(t.iter().all(|&x| x < pivot));
        assert!(right.iter().all(|&x| x > pivot));
        assert_eq!(t.len() + right.len(), 199);

        t.merge_unique(&mut right).unwrap();
        t.assert_correctness();
        assert!(t.iter().copied().eq((0..200).filter(|&x| x != pivot)));
    }

    assert_eq!(tree.split_key(&1000).unwrap_err(), Error::KeyNotFound);
    assert_eq!(tree.len(), 200);
}

#[test]
// Owned iteration, comparison and the debug format
fn test_splay_tree_10() {
    use alloc::{format, vec};

    let mut a: SplayTree<i32> = SplayTree::new();
    a.insert_unique_iter([3, 1, 2]);
    let b = a.clone();

    assert_eq!(a, b);
    assert_eq!(format!("{a:?}"), "{1, 2, 3}");

    let mut c = b.clone();
    c.pop_last();
    assert!(c < a);

    let v: Vec<i32> = a.into_iter().rev().collect();
    assert_eq!(v, vec![3, 2, 1]);

    let d: SplayTree<i32> = [2, 1, 2].into_iter().collect();
    assert_eq!(format!("{d:?}"), "{1, 2, 2}");
    assert_eq!(c.pop_first(), Some(1));
    assert_eq!(c.pop_first(), Some(2));
    assert_eq!(c.pop_first(), None);
}

#[test]
// A degenerate chain is dropped, cloned and split without recursion
fn test_splay_tree_11() {
    const COUNT: u32 = 200000;

    let mut tree: SplayTree<u32> = SplayTree::new();
    tree.insert_unique_iter(0..COUNT);

    // Ascending inserts leave a left chain under the root
    let copy = tree.clone();
    let right = tree.split_key(&0).unwrap();
    assert_eq!(right.len(), COUNT as usize - 1);
    assert!(tree.is_empty());
    drop(copy);
}

#[test]
// Fallible inserts behave like the infallible ones when memory is available
fn test_splay_tree_12() {
    let mut tree: SplayTree<i32> = SplayTree::new();
    assert_eq!(tree.try_insert_unique(4).map(|r| r.1), Ok(true));
    assert_eq!(tree.try_insert_unique(4).map(|r| r.1), Ok(false));
    assert!(tree.try_insert_equal(4).is_ok());
    assert_eq!(tree.count(&4), 2);

    let (_, inserted) = tree.emplace_unique_with(|| 2 + 2);
    assert!(!inserted);
    tree.emplace_equal_with(|| 5);
    assert_eq!(tree.len(), 3);
    tree.assert_correctness();
}

#[test]
// A stress test against a sorted vector, in equal mode
fn test_splay_tree_13() {
    use rand::prelude::*;

    const COUNT: usize = 20000;

    let mut rng = SmallRng::seed_from_u64(1234567890);
    let mut tree: SplayTree<i32> = SplayTree::new();
    let mut model: Vec<i32> = Vec::new();

    for step in 0..COUNT {
        let key = rng.random_range(-200..200);
        match rng.random_range(0..4) {
            0 | 1 => {
                tree.insert_equal(key);
                let at = model.partition_point(|&x| x <= key);
                model.insert(at, key);
            }
            2 => {
                let removed = tree.erase_key(&key);
                let before = model.len();
                model.retain(|&x| x != key);
                assert_eq!(removed, before - model.len());
            }
            _ => {
                let (lo, hi) = tree.equal_range(&key);
                assert_eq!(
                    tree.iter_between(lo, hi).count(),
                    model.iter().filter(|&&x| x == key).count()
                );
                tree.find_and_splay(&key);
            }
        }

        if step % 1000 == 0 {
            tree.assert_correctness();
            assert_eq!(values(&tree), model);
        }
    }

    assert_eq!(tree.len(), model.len());
}

#[test]
// Swapping exchanges contents, and a cleared tree is reusable
fn test_splay_tree_14() {
    use alloc::vec;

    let mut a: SplayTree<i32> = SplayTree::new();
    let mut b: SplayTree<i32> = SplayTree::new();
    a.insert_unique_iter(0..5);
    b.insert_unique_iter(10..12);

    a.swap(&mut b);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 5);
    assert_eq!(values(&a), vec![10, 11]);
    assert_eq!(values(&b), vec![0, 1, 2, 3, 4]);
    a.assert_correctness();
    b.assert_correctness();

    // Free some leaves first so the cleared storage held recycled slots
    b.erase_key(&2);
    b.pop_first();
    b.clear();
    assert!(b.is_empty());
    assert_eq!(b.begin(), b.end());
    b.assert_correctness();

    b.insert_unique_iter([7, 3, 9]);
    assert!(!b.insert_unique(7).1);
    b.assert_correctness();
    assert_eq!(values(&b), vec![3, 7, 9]);
    assert_eq!(b.first_value(), Some(&3));
    assert_eq!(b.last_value(), Some(&9));
}
