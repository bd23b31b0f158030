//! Utility types to support self adjusting binary splay trees
//!
//! The [`Tree`] here only manages the *shape* of a splay tree. Each leaf is a `usize` index into
//! an external vector of values that is owned by the collection built on top of it. All links
//! between leaves (parent, left and right) are indices too, with [`NIL`] standing in for "no leaf".

#![warn(missing_docs)]

extern crate alloc;
use alloc::{collections::TryReserveError, vec::Vec};

use core::{cmp::Ordering, fmt::Display};

/// The index used for a missing leaf
pub const NIL: usize = !0;

//-----------------------------------------------------------------------------------------------//

// A leaf in a splay tree
#[derive(Clone, Debug)]
struct Leaf {
    parent: usize,
    left: usize,
    right: usize,
}

/// How [`Tree::locate`] treats a leaf with a key equal to the one searched for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Duplicates {
    /// Stop at the equal leaf and report it as found
    Reject,
    /// Keep descending to the right, so that a new leaf is placed after all equal leaves
    Allow,
}

/// Where a key sits in a tree, or where it would be attached
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// A leaf with an equal key exists
    Found(usize),
    /// The tree is empty, a new leaf becomes the root
    Root,
    /// A new leaf becomes the left child of the given leaf
    Left(usize),
    /// A new leaf becomes the right child of the given leaf
    Right(usize),
}

// A detached subtree with its extreme leaves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) root: usize,
    pub(crate) first: usize,
    pub(crate) last: usize,
}

impl Span {
    pub(crate) const EMPTY: Span = Span {
        root: NIL,
        first: NIL,
        last: NIL,
    };
}

//-----------------------------------------------------------------------------------------------//

/// A tree of integer leaves
///
/// Besides the root the tree caches its left-most and right-most leaves, so the smallest and
/// largest positions are available in constant time. Removed leaves go to a 'recycle bin' and are
/// handed out again by later insertions, so leaf indices stay dense.
#[derive(Clone, Debug)]
pub struct Tree {
    leaf: Vec<Leaf>,
    root: usize,
    recycle: usize,
    count: usize,
    first: usize,
    last: usize,
}

impl Tree {
    /// Construct an empty tree
    pub fn new() -> Tree {
        Tree {
            leaf: Vec::new(),
            root: NIL,
            recycle: NIL,
            count: 0,
            first: NIL,
            last: NIL,
        }
    }

    /// Construct an empty tree, pre-allocating a given capacity
    pub fn with_capacity(capacity: usize) -> Tree {
        Tree {
            leaf: Vec::with_capacity(capacity),
            ..Tree::new()
        }
    }

    /// Get the number of leaves in the tree
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Check if the tree has no leaves
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the number of recycled leaves in the tree
    #[inline]
    pub fn recycle_count(&self) -> usize {
        self.leaf.len() - self.count
    }

    /// Get the current allocated size of the tree. This is the current `count` plus the
    /// `recycle_count`. Note that this is not necessarily the same as the allocated capacity.
    #[inline]
    pub fn allocated_count(&self) -> usize {
        self.leaf.len()
    }

    /// Remove all leaves from the tree
    pub fn clear(&mut self) {
        self.leaf.truncate(0);
        self.root = NIL;
        self.recycle = NIL;
        self.count = 0;
        self.first = NIL;
        self.last = NIL;
    }

    /// Reserves capacity for at least `additional` more leaves
    ///
    /// Room that has been allocated and then 'recycled' is subtracted from `additional`. The
    /// amount of new storage that was required (if any) is returned, so that a collection can
    /// grow its own value storage to match.
    pub fn reserve(&mut self, additional: usize) -> usize {
        let recycle_count = self.recycle_count();
        if additional > recycle_count {
            let required = additional - recycle_count;
            self.leaf.reserve(required);
            required
        } else {
            0
        }
    }

    /// Fallible version of [`Tree::reserve`]
    pub fn try_reserve(&mut self, additional: usize) -> Result<usize, TryReserveError> {
        let recycle_count = self.recycle_count();
        if additional > recycle_count {
            let required = additional - recycle_count;
            self.leaf.try_reserve(required)?;
            Ok(required)
        } else {
            Ok(0)
        }
    }

    /// Get the root leaf, or [`NIL`] if the tree is empty
    #[inline]
    pub fn root(&self) -> usize {
        self.root
    }

    /// Get the first (left-most) leaf in the tree
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Get the last (right-most) leaf in the tree
    #[inline]
    pub fn last(&self) -> usize {
        self.last
    }

    /// Get the previous leaf in the tree
    #[inline]
    pub fn prev(&self, leaf: usize) -> usize {
        prev(&self.leaf, leaf)
    }

    /// Get the next leaf in the tree
    #[inline]
    pub fn next(&self, leaf: usize) -> usize {
        next(&self.leaf, leaf)
    }

    /// Get the parent of a leaf
    #[inline]
    pub fn parent(&self, leaf: usize) -> usize {
        self.leaf[leaf].parent
    }

    /// Get the left child of a leaf
    #[inline]
    pub fn left(&self, leaf: usize) -> usize {
        self.leaf[leaf].left
    }

    /// Get the right child of a leaf
    #[inline]
    pub fn right(&self, leaf: usize) -> usize {
        self.leaf[leaf].right
    }

    /// Locate a key in the tree, or if not found identify where to attach it
    ///
    /// `probe` compares the key being searched for against the key stored at a leaf. With
    /// [`Duplicates::Allow`] an equal key never stops the walk, which places the new leaf after
    /// every leaf with an equal key.
    pub fn locate<F>(&self, duplicates: Duplicates, mut probe: F) -> Location
    where
        F: FnMut(usize) -> Ordering,
    {
        let mut x = self.root;

        // First leaf is a special case
        if x == NIL {
            return Location::Root;
        }

        loop {
            match probe(x) {
                Ordering::Equal if duplicates == Duplicates::Reject => return Location::Found(x),
                Ordering::Less => {
                    let y = self.leaf[x].left;
                    if y == NIL {
                        return Location::Left(x);
                    }
                    x = y;
                }
                _ => {
                    let y = self.leaf[x].right;
                    if y == NIL {
                        return Location::Right(x);
                    }
                    x = y;
                }
            }
        }
    }

    /// Get the left-most leaf whose key is not ordered before the searched key
    ///
    /// `probe` compares the searched key against the key at a leaf. [`NIL`] is returned if every
    /// key is ordered before the searched key.
    pub fn lower_bound<F>(&self, mut probe: F) -> usize
    where
        F: FnMut(usize) -> Ordering,
    {
        let mut x = self.root;
        let mut bound = NIL;
        while x != NIL {
            if probe(x) == Ordering::Greater {
                x = self.leaf[x].right;
            } else {
                bound = x;
                x = self.leaf[x].left;
            }
        }
        bound
    }

    /// Get the left-most leaf whose key is ordered after the searched key
    pub fn upper_bound<F>(&self, mut probe: F) -> usize
    where
        F: FnMut(usize) -> Ordering,
    {
        let mut x = self.root;
        let mut bound = NIL;
        while x != NIL {
            if probe(x) == Ordering::Less {
                bound = x;
                x = self.leaf[x].left;
            } else {
                x = self.leaf[x].right;
            }
        }
        bound
    }

    /// Attach a new leaf at a location returned by [`Tree::locate`]
    ///
    /// The cached first and last leaves are kept up to date. The leaf is not splayed, that is
    /// left to the caller.
    pub fn attach(&mut self, location: Location) -> usize {
        match location {
            Location::Found(leaf) => leaf,
            Location::Root => {
                debug_assert_eq!(self.root, NIL);
                let leaf = self.alloc(NIL);
                self.root = leaf;
                self.first = leaf;
                self.last = leaf;
                leaf
            }
            Location::Left(parent) => {
                let leaf = self.alloc(parent);
                self.leaf[parent].left = leaf;
                if self.first == parent {
                    self.first = leaf;
                }
                leaf
            }
            Location::Right(parent) => {
                let leaf = self.alloc(parent);
                self.leaf[parent].right = leaf;
                if self.last == parent {
                    self.last = leaf;
                }
                leaf
            }
        }
    }

    /// Promote a leaf to be root
    ///
    /// The order of the leaves is unchanged, however the tree is reconfigured by a sequence of
    /// zig, zig-zig and zig-zag steps so that `leaf` becomes the root. The identity of the first
    /// and last leaves never changes under rotation, so the cached extremes stay valid.
    pub fn splay(&mut self, leaf: usize) {
        if leaf == NIL {
            return;
        }
        splay(&mut self.leaf, leaf);
        self.root = leaf;
    }

    /// Remove a leaf from the tree
    ///
    /// A leaf with two children is replaced by its successor, which is unlinked and spliced into
    /// the vacated position. No other leaf changes its index. The former parent of the removed
    /// leaf is then splayed to the root.
    pub fn remove(&mut self, x: usize) {
        debug_assert_ne!(x, NIL);

        if self.first == x {
            self.first = self.next(x);
        }
        if self.last == x {
            self.last = self.prev(x);
        }

        let y = self.leaf[x].parent;
        let a = self.leaf[x].left;
        let b = self.leaf[x].right;

        let replacement = if a == NIL {
            b
        } else if b == NIL {
            a
        } else {
            // The successor has no left child
            let s = first(&self.leaf, b);
            if s != b {
                let p = self.leaf[s].parent;
                let c = self.leaf[s].right;
                self.leaf[p].left = c;
                if c != NIL {
                    self.leaf[c].parent = p;
                }
                self.leaf[s].right = b;
                self.leaf[b].parent = s;
            }
            self.leaf[s].left = a;
            self.leaf[a].parent = s;
            s
        };

        if replacement != NIL {
            self.leaf[replacement].parent = y;
        }

        if y == NIL {
            self.root = replacement;
        } else {
            if self.leaf[y].left == x {
                self.leaf[y].left = replacement;
            } else {
                debug_assert_eq!(self.leaf[y].right, x);
                self.leaf[y].right = replacement;
            }
            self.splay(y);
        }

        self.free(x);
    }

    // The whole tree as a span
    pub(crate) fn span(&self) -> Span {
        Span {
            root: self.root,
            first: self.first,
            last: self.last,
        }
    }

    // Install a detached subtree as the whole tree
    pub(crate) fn adopt(&mut self, span: Span) {
        debug_assert!(span.root == NIL || self.leaf[span.root].parent == NIL);
        self.root = span.root;
        self.first = span.first;
        self.last = span.last;
    }

    // Splay `x` to the root, then cut it out, leaving two detached subtrees behind
    //
    // The tree has no root afterwards. It is up to the caller to `adopt` or `join` the spans.
    pub(crate) fn cut(&mut self, x: usize) -> (Span, Span) {
        self.splay(x);

        let l = self.leaf[x].left;
        let r = self.leaf[x].right;

        let low = if l == NIL {
            Span::EMPTY
        } else {
            self.leaf[l].parent = NIL;
            Span {
                root: l,
                first: self.first,
                last: last(&self.leaf, l),
            }
        };

        let high = if r == NIL {
            Span::EMPTY
        } else {
            self.leaf[r].parent = NIL;
            Span {
                root: r,
                first: first(&self.leaf, r),
                last: self.last,
            }
        };

        self.leaf[x].left = NIL;
        self.leaf[x].right = NIL;
        self.adopt(Span::EMPTY);
        self.free(x);

        (low, high)
    }

    // Join two detached subtrees, every leaf of `low` ordered before every leaf of `high`
    //
    // The last leaf of `low` is splayed to the top of its subtree, which leaves it with no right
    // child, and `high` is hung there.
    pub(crate) fn join(&mut self, low: Span, high: Span) {
        if low.root == NIL {
            return self.adopt(high);
        }
        if high.root == NIL {
            return self.adopt(low);
        }

        let m = low.last;
        splay(&mut self.leaf, m);
        debug_assert_eq!(self.leaf[m].parent, NIL);
        debug_assert_eq!(self.leaf[m].right, NIL);

        self.leaf[m].right = high.root;
        self.leaf[high.root].parent = m;

        self.adopt(Span {
            root: m,
            first: low.first,
            last: high.last,
        });
    }

    // Check if the first span has no more leaves than the second
    //
    // Both spans are walked in lockstep, so the cost is bounded by the smaller one.
    pub(crate) fn not_larger(&self, a: Span, b: Span) -> bool {
        let mut x = a.first;
        let mut y = b.first;
        loop {
            if x == NIL {
                return true;
            }
            if y == NIL {
                return false;
            }
            x = self.next(x);
            y = self.next(y);
        }
    }

    // Move a detached subtree into another tree's storage
    //
    // The subtree is rebuilt leaf by leaf in `dest` using an explicit stack, so the height of the
    // subtree does not matter. `relocate(from, to)` is called for every moved leaf so the caller
    // can move the associated value. The moved leaves are recycled here. The returned span is
    // detached in `dest`.
    pub(crate) fn transplant<F>(&mut self, span: Span, dest: &mut Tree, mut relocate: F) -> Span
    where
        F: FnMut(usize, usize),
    {
        if span.root == NIL {
            return Span::EMPTY;
        }

        let mut moved = Span::EMPTY;
        let mut stack = Vec::new();
        stack.push((span.root, NIL, Location::Root));

        while let Some((x, parent, location)) = stack.pop() {
            let y = dest.alloc(parent);
            match location {
                Location::Left(_) => dest.leaf[parent].left = y,
                Location::Right(_) => dest.leaf[parent].right = y,
                _ => moved.root = y,
            }

            if x == span.first {
                moved.first = y;
            }
            if x == span.last {
                moved.last = y;
            }

            let Leaf { left, right, .. } = self.leaf[x];
            if right != NIL {
                stack.push((right, y, Location::Right(y)));
            }
            if left != NIL {
                stack.push((left, y, Location::Left(y)));
            }

            relocate(x, y);
            self.free(x);
        }

        moved
    }

    // Allocate and initialise a new leaf
    fn alloc(&mut self, parent: usize) -> usize {
        // Increase the leaf count
        self.count += 1;

        // Recycle an old leaf
        let leaf = self.recycle;
        if leaf != NIL {
            let l = &mut self.leaf[leaf];
            self.recycle = l.parent;
            l.parent = parent;
            l.left = NIL;
            l.right = NIL;

            return leaf;
        }

        // Inititialise a new one
        let leaf = self.leaf.len();
        self.leaf.push(Leaf {
            parent,
            left: NIL,
            right: NIL,
        });

        leaf
    }

    // Free a leaf and add it to the recycle queue
    fn free(&mut self, leaf: usize) {
        self.count -= 1;

        self.leaf[leaf].parent = self.recycle;
        self.recycle = leaf;
    }

    /// Check the structure of the tree, panicking if it is inconsistent
    ///
    /// Every child must point back at its parent, the cached first and last leaves must be the
    /// true extremes and the count must match the number of reachable leaves in both directions.
    pub fn check(&self) {
        if self.root == NIL {
            assert_eq!(self.count, 0, "an empty tree has leaves");
            assert_eq!(self.first, NIL, "an empty tree has a first leaf");
            assert_eq!(self.last, NIL, "an empty tree has a last leaf");
            return;
        }

        assert_eq!(self.leaf[self.root].parent, NIL, "the root has a parent");
        assert_eq!(self.first, first(&self.leaf, self.root), "stale first leaf");
        assert_eq!(self.last, last(&self.leaf, self.root), "stale last leaf");

        // Forwards, checking the links of every leaf
        let mut x = self.first;
        let mut count_f = 0;
        while x != NIL {
            let l = &self.leaf[x];
            if l.left != NIL {
                assert_eq!(self.leaf[l.left].parent, x, "left child disowns parent");
            }
            if l.right != NIL {
                assert_eq!(self.leaf[l.right].parent, x, "right child disowns parent");
            }
            count_f += 1;
            x = self.next(x);
        }

        // Backwards
        let mut x = self.last;
        let mut count_b = 0;
        while x != NIL {
            count_b += 1;
            x = self.prev(x);
        }

        assert_eq!(count_f, count_b, "forward and backward walks disagree");
        assert_eq!(count_f, self.count, "leaf count is out of step");
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[ ")?;
        let mut leaf = self.first();
        while leaf != NIL {
            write!(f, "{leaf} ")?;
            leaf = self.next(leaf);
        }
        write!(f, "]")?;
        Ok(())
    }
}

//-----------------------------------------------------------------------------------------------//

// Link surgery on raw leaf slices. None of these touch the root or the cached extremes.

// Promote `x` over its parent, `x` being the right child
fn left_rotation(leaf: &mut [Leaf], x: usize) {
    let y = leaf[x].parent;
    debug_assert_eq!(leaf[y].right, x);
    let z = leaf[y].parent;

    let b = leaf[x].left;
    leaf[y].right = b;
    if b != NIL {
        leaf[b].parent = y;
    }

    leaf[x].left = y;
    leaf[y].parent = x;
    leaf[x].parent = z;

    if z != NIL {
        if leaf[z].left == y {
            leaf[z].left = x;
        } else {
            debug_assert_eq!(leaf[z].right, y);
            leaf[z].right = x;
        }
    }
}

// Promote `x` over its parent, `x` being the left child
fn right_rotation(leaf: &mut [Leaf], x: usize) {
    let y = leaf[x].parent;
    debug_assert_eq!(leaf[y].left, x);
    let z = leaf[y].parent;

    let b = leaf[x].right;
    leaf[y].left = b;
    if b != NIL {
        leaf[b].parent = y;
    }

    leaf[x].right = y;
    leaf[y].parent = x;
    leaf[x].parent = z;

    if z != NIL {
        if leaf[z].left == y {
            leaf[z].left = x;
        } else {
            debug_assert_eq!(leaf[z].right, y);
            leaf[z].right = x;
        }
    }
}

// Promote `x` over its parent, whichever side it is on
fn zig(leaf: &mut [Leaf], x: usize) {
    let y = leaf[x].parent;
    if leaf[y].left == x {
        right_rotation(leaf, x);
    } else {
        left_rotation(leaf, x);
    }
}

// `x` and its parent are same-side children: rotate the parent first
fn zig_zig(leaf: &mut [Leaf], x: usize) {
    let y = leaf[x].parent;
    zig(leaf, y);
    zig(leaf, x);
}

// `x` and its parent are opposite-side children: rotate `x` twice
fn zig_zag(leaf: &mut [Leaf], x: usize) {
    zig(leaf, x);
    zig(leaf, x);
}

// Promote a leaf to the top of its tree
//
// This low-level function manipulates the binary tree to move a leaf to be the root of whatever
// (possibly detached) tree it belongs to. It is the responsibility of the caller to store the
// new root. Promotion is the key mechanism that enables splay trees to achieve amortised
// logarithmic time access.
fn splay(leaf: &mut [Leaf], x: usize) {
    loop {
        let y = leaf[x].parent;
        if y == NIL {
            return;
        }

        let z = leaf[y].parent;
        if z == NIL {
            zig(leaf, x);
            return;
        }

        if (leaf[z].left == y) == (leaf[y].left == x) {
            zig_zig(leaf, x);
        } else {
            zig_zag(leaf, x);
        }
    }
}

// Get the first leaf (the left-most) under `x`
fn first(leaf: &[Leaf], mut x: usize) -> usize {
    if x == NIL {
        return NIL;
    }

    loop {
        let y = leaf[x].left;
        if y == NIL {
            return x;
        }
        x = y;
    }
}

// Get the last leaf (the right-most) under `x`
fn last(leaf: &[Leaf], mut x: usize) -> usize {
    if x == NIL {
        return NIL;
    }

    loop {
        let y = leaf[x].right;
        if y == NIL {
            return x;
        }
        x = y;
    }
}

// Get the logical predecessor to a leaf
fn prev(leaf: &[Leaf], mut x: usize) -> usize {
    let y = leaf[x].left;
    if y != NIL {
        return last(leaf, y);
    }

    loop {
        let y = leaf[x].parent;
        if y == NIL {
            return NIL;
        }
        if leaf[y].right == x {
            return y;
        }
        debug_assert_eq!(leaf[y].left, x);
        x = y;
    }
}

// Get the logical successor to a leaf
fn next(leaf: &[Leaf], mut x: usize) -> usize {
    let y = leaf[x].right;
    if y != NIL {
        return first(leaf, y);
    }

    loop {
        let y = leaf[x].parent;
        if y == NIL {
            return NIL;
        }
        if leaf[y].left == x {
            return y;
        }
        debug_assert_eq!(leaf[y].right, x);
        x = y;
    }
}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn build(keys: &[u32]) -> (Tree, alloc::vec::Vec<u32>) {
    let mut tree = Tree::new();
    let mut key_slice = Vec::new();
    for &key in keys {
        let location = tree.locate(Duplicates::Reject, |x| key.cmp(&key_slice[x]));
        if let Location::Found(_) = location {
            continue;
        }
        let leaf = tree.attach(location);
        tree.splay(leaf);
        if leaf == key_slice.len() {
            key_slice.push(key);
        } else {
            key_slice[leaf] = key;
        }
    }
    (tree, key_slice)
}

#[cfg(test)]
fn in_order(tree: &Tree, key_slice: &[u32]) -> alloc::vec::Vec<u32> {
    let mut v = Vec::new();
    let mut x = tree.first();
    while x != NIL {
        v.push(key_slice[x]);
        x = tree.next(x);
    }
    v
}

#[test]
// Inserted leaves are splayed to the root and the extremes are cached
fn test_tree_0() {
    use alloc::vec;

    let (tree, key_slice) = build(&[2, 1, 4, 3, 5]);
    tree.check();

    assert_eq!(key_slice[tree.root()], 5);
    assert_eq!(key_slice[tree.first()], 1);
    assert_eq!(key_slice[tree.last()], 5);
    assert_eq!(in_order(&tree, &key_slice), vec![1, 2, 3, 4, 5]);
}

#[test]
// Zig-zig steps on an ascending chain shorten it
fn test_tree_1() {
    let mut tree = Tree::new();
    let mut prev_leaf = tree.attach(Location::Root);
    for _ in 1..8 {
        prev_leaf = tree.attach(Location::Right(prev_leaf));
    }
    tree.check();

    let last = tree.last();
    assert_eq!(last, 7);
    tree.splay(last);
    tree.check();

    assert_eq!(tree.root(), last);
    assert_eq!(tree.right(last), NIL);
    assert_eq!(tree.left(last), tree.first());

    // The deepest leaf was at depth 7 before the splay
    let mut deepest = 0;
    let mut x = tree.first();
    while x != NIL {
        let mut depth = 0;
        let mut y = x;
        while tree.parent(y) != NIL {
            depth += 1;
            y = tree.parent(y);
        }
        deepest = deepest.max(depth);
        x = tree.next(x);
    }
    assert_eq!(deepest, 5);
}

#[test]
// Removing leaves with two children splices in the successor
fn test_tree_2() {
    use alloc::vec;

    let (mut tree, key_slice) = build(&[4, 2, 6, 1, 3, 5, 7]);
    let x = tree.lower_bound(|x| 4u32.cmp(&key_slice[x]));
    let succ = tree.next(x);

    tree.splay(x);
    assert_ne!(tree.left(x), NIL);
    assert_ne!(tree.right(x), NIL);

    tree.remove(x);
    assert_eq!(tree.root(), succ);
    tree.check();

    assert_eq!(in_order(&tree, &key_slice), vec![1, 2, 3, 5, 6, 7]);
    assert_eq!(key_slice[succ], 5);
    assert_eq!(tree.count(), 6);
    assert_eq!(tree.recycle_count(), 1);
}

#[test]
// Duplicate placement goes after the equal leaves
fn test_tree_3() {
    let (tree, key_slice) = build(&[1, 3, 5]);
    match tree.locate(Duplicates::Allow, |x| 3u32.cmp(&key_slice[x])) {
        Location::Right(x) | Location::Left(x) => assert!(key_slice[x] >= 3),
        other => panic!("unexpected location {other:?}"),
    }
    match tree.locate(Duplicates::Reject, |x| 3u32.cmp(&key_slice[x])) {
        Location::Found(x) => assert_eq!(key_slice[x], 3),
        other => panic!("unexpected location {other:?}"),
    }
}

#[test]
// Cutting and joining a tree restores every other leaf
fn test_tree_4() {
    use alloc::vec;

    let (mut tree, key_slice) = build(&[5, 1, 9, 3, 7, 2, 8]);
    let pivot = tree.lower_bound(|x| 5u32.cmp(&key_slice[x]));

    let (low, high) = tree.cut(pivot);
    assert_eq!(key_slice[low.first], 1);
    assert_eq!(key_slice[low.last], 3);
    assert_eq!(key_slice[high.first], 7);
    assert_eq!(key_slice[high.last], 9);
    assert!(tree.not_larger(high, low));

    tree.join(low, high);
    tree.check();
    assert_eq!(in_order(&tree, &key_slice), vec![1, 2, 3, 7, 8, 9]);
    assert_eq!(key_slice[tree.root()], 3);
}

#[test]
// A deep chain moves into a fresh tree without recursion
fn test_tree_5() {
    const COUNT: usize = 100000;

    let mut tree = Tree::new();
    let mut x = tree.attach(Location::Root);
    for _ in 1..COUNT {
        x = tree.attach(Location::Left(x));
    }

    let mut dest = Tree::new();
    let mut moved = 0;
    let span = tree.span();
    let span = tree.transplant(span, &mut dest, |_, _| moved += 1);
    dest.adopt(span);
    tree.clear();

    dest.check();
    assert_eq!(moved, COUNT);
    assert_eq!(dest.count(), COUNT);
    assert_eq!(tree.count(), 0);
}
