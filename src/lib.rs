//! ## Introduction
//!
//! This crate implements ordered containers on top of a splay tree. Splay trees are binary search
//! trees that reorganise themselves on access: an element that has just been inserted or looked up
//! is rotated to the root, so repeated and nearby accesses are cheap. Every operation runs in
//! amortised logarithmic time.
//!
//! ## Design
//!
//! - The *structure* of a tree is kept apart from the values stored in it. [`util::Tree`] manages
//!   a set of `usize` leaves linked by parent, left and right indices, and [`SplayTree`] keeps the
//!   values in a vector parallel to those leaves. Values are moved when inserted and when the
//!   vector grows, but not as the tree reshapes around them.
//! - Removed leaves are recycled for later insertions, so memory is reused without returning to
//!   the allocator.
//! - Ordering is pluggable. A [`Compare`] strategy orders keys, either by `Ord` ([`Natural`]) or
//!   with any `Fn(&K, &K) -> Ordering`. A [`KeyOf`] strategy picks the key out of a stored value.
//! - One engine serves both unique and repeated keys. [`Set`] inserts with `insert_unique` and
//!   [`MultiSet`] with `insert_equal`.
//! - Trees can be split around an element and merged back, moving only the smaller side.
//! - Nothing recurses over the height of a tree, so degenerate shapes are safe to clone, drop,
//!   split and merge.
//! - The crate is `#![no_std]` and only needs `alloc`.
//!
//! ## Contents
//!
//! <center>
//!
//! | Type         | Stores  | Keys       | Iterator            |
//! |:-------------|:--------|:-----------|---------------------|
//! | `SplayTree`  | Values  | Either     | `Iter`, `Range`     |
//! | `Set`        | Keys    | Unique     | `Iter`              |
//! | `MultiSet`   | Keys    | Repeatable | `Iter`              |
//! | `StringSet`  | Strings | Unique     | `StringSetIterator` |
//!
//! </center>
//!
//! The [`harness`] module holds a small command language used by the `splay-demo` binary to
//! drive and benchmark the containers.
//!
//! ## Example
//!
//! ```
//! use splay_tree::{Set, SplayTree};
//!
//! let mut set: Set<i32> = [2, 1, 4, 3, 5].into_iter().collect();
//! assert_eq!(set.get(&3), Some(&3));
//! assert!(!set.insert(4));
//!
//! let high = set.split(&3).unwrap();
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2]);
//! assert_eq!(high.iter().copied().collect::<Vec<_>>(), [4, 5]);
//!
//! let mut tree: SplayTree<i32> = SplayTree::new();
//! tree.insert_equal(7);
//! tree.insert_equal(7);
//! assert_eq!(tree.count(&7), 2);
//! ```

#![no_std]
#![warn(missing_docs)]

pub mod compare;
pub mod error;
pub mod harness;
mod multiset;
mod set;
mod splay_tree;
pub mod util;

pub use compare::{Compare, DerefKey, Identity, KeyOf, Natural};
pub use error::{Error, Result};
pub use multiset::*;
pub use set::*;
pub use splay_tree::*;
