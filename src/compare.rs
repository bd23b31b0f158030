//! Comparison and key extraction strategies used by the trees

use core::{cmp::Ordering, ops::Deref};

/// A total order over keys
///
/// Any closure `Fn(&K, &K) -> Ordering` is a comparator, and [`Natural`] uses the key's own
/// `Ord` implementation.
pub trait Compare<K: ?Sized> {
    /// Compare two keys
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// Compare keys by their `Ord` implementation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}

//-----------------------------------------------------------------------------------------------//

/// Turns a stored value into the key it is ordered by
pub trait KeyOf<V> {
    /// The key type
    type Key: ?Sized;

    /// Borrow the key of a value
    fn key_of<'a>(&self, value: &'a V) -> &'a Self::Key;
}

/// The value is its own key, as in a plain set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Identity;

impl<V> KeyOf<V> for Identity {
    type Key = V;

    #[inline]
    fn key_of<'a>(&self, value: &'a V) -> &'a V {
        value
    }
}

/// The key is the target of the value's `Deref`, e.g. `str` for a stored string
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerefKey;

impl<V: Deref> KeyOf<V> for DerefKey {
    type Key = V::Target;

    #[inline]
    fn key_of<'a>(&self, value: &'a V) -> &'a V::Target {
        value.deref()
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
fn test_compare_0() {
    assert_eq!(Natural.compare(&1, &2), Ordering::Less);
    assert_eq!(Natural.compare("b", "a"), Ordering::Greater);

    let reverse = |a: &i32, b: &i32| b.cmp(a);
    assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
}

#[test]
fn test_key_of_0() {
    use compact_str::CompactString;

    let s = CompactString::new("splay");
    let key: &str = DerefKey.key_of(&s);
    assert_eq!(key, "splay");
    assert_eq!(*Identity.key_of(&7), 7);
}
