//! Persistent hash set façade.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::iter::Keys;
use crate::node::Node;
use crate::ops::check::check_recursive;
use crate::ops::get::contains_recursive;
use crate::ops::insert::insert_recursive;
use crate::ops::remove::{remove_recursive, RemoveOutcome};
use crate::{default_hash, EqualsFn, HashCode, HashFn};

/// Persistent hash set over a client-supplied hash function and equality
/// predicate.
///
/// Shares the trie machinery of [`HamtMap`](crate::HamtMap): every entry
/// stores the absent marker as its value, and membership is decided by key
/// presence alone. The second type parameter only matters for key views
/// produced by [`HamtMap::key_set`](crate::HamtMap::key_set), which share
/// a map's trie in place; stand-alone sets leave it at the default `()`.
pub struct HamtSet<K, V = ()> {
    hash: HashFn<K>,
    equals: EqualsFn<K>,
    root: Arc<Node<K, V>>,
    size: usize,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K> HamtSet<K> {
    /// Creates an empty set over the given hash function and equality
    /// predicate.
    #[must_use]
    pub fn new(
        hash: impl Fn(&K) -> HashCode + Send + Sync + 'static,
        equals: impl Fn(&K, &K) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            hash: Arc::new(hash),
            equals: Arc::new(equals),
            root: Arc::new(Node::empty()),
            size: 0,
        }
    }
}

impl<K: Hash + Eq + 'static> HamtSet<K> {
    /// Creates an empty set hashing with the standard library's default
    /// hasher and comparing keys with `==`.
    #[must_use]
    pub fn with_default_hasher() -> Self {
        Self::new(|key: &K| default_hash(key), |a: &K, b: &K| a == b)
    }
}

impl<K, V> HamtSet<K, V> {
    /// Key view over an existing trie; used by `HamtMap::key_set`.
    pub(crate) fn from_parts(
        hash: HashFn<K>,
        equals: EqualsFn<K>,
        root: Arc<Node<K, V>>,
        size: usize,
    ) -> Self {
        Self {
            hash,
            equals,
            root,
            size,
        }
    }

    /// Returns the number of elements. O(1).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if `key` is a member of the set.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        contains_recursive(&self.root, (self.hash)(key), key, &self.equals)
    }

    /// Returns `true` if `self` and `other` share the same root node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> Keys<'_, K, V> {
        Keys::new(&self.root, self.size)
    }

    /// Invokes `visitor` for every element, in iterator order.
    pub fn for_each(&self, mut visitor: impl FnMut(&K)) {
        self.root.for_each(&mut |entry| visitor(&entry.key));
    }
}

// ---------------------------------------------------------------------------
// Write operations — each returns a new version
// ---------------------------------------------------------------------------

impl<K: Clone, V: Clone + PartialEq> HamtSet<K, V> {
    /// Returns a set containing `key`.
    ///
    /// Adding a key that is already a member returns a set with the
    /// receiver's own root (see [`ptr_eq`](Self::ptr_eq)) — except in a
    /// key view, where the element's stored value is cleared once.
    #[must_use]
    pub fn insert(&self, key: K) -> Self {
        let code = (self.hash)(&key);
        let outcome = insert_recursive(&self.root, code, key, None, &self.equals);
        Self {
            hash: Arc::clone(&self.hash),
            equals: Arc::clone(&self.equals),
            root: outcome.node,
            size: self.size + usize::from(outcome.inserted),
        }
    }

    /// Returns a set without `key`.
    ///
    /// Removing a non-member returns a set with the receiver's own root
    /// and size.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        match remove_recursive(&self.root, (self.hash)(key), key, &self.equals) {
            RemoveOutcome::NotFound => self.clone(),
            RemoveOutcome::Removed { node } => Self {
                hash: Arc::clone(&self.hash),
                equals: Arc::clone(&self.equals),
                root: node.unwrap_or_else(|| Arc::new(Node::empty())),
                size: self.size - 1,
            },
        }
    }

    /// Returns the union of the two sets. Neither operand changes.
    ///
    /// The larger operand (by size) seeds the result and every element of
    /// the smaller is added to it; the result carries the larger operand's
    /// hash function and equality predicate.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (larger, smaller) = if self.size > other.size {
            (self, other)
        } else {
            (other, self)
        };
        let mut result = larger.clone();
        for key in smaller.iter() {
            result = result.insert(key.clone());
        }
        result
    }

    /// Returns the intersection of the two sets. Neither operand changes.
    ///
    /// Iterates the smaller operand, dropping elements the larger does not
    /// contain; the result is the reduced smaller operand. The iterator
    /// holds the smaller operand's root from before any reduction, so the
    /// traversal is unperturbed by it.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let (larger, smaller) = if self.size > other.size {
            (self, other)
        } else {
            (other, self)
        };
        let mut result = smaller.clone();
        for key in smaller.iter() {
            if !larger.contains(key) {
                result = result.remove(key);
            }
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

impl<K: fmt::Debug, V> HamtSet<K, V> {
    /// Verifies the structural invariants of this set's trie plus the
    /// façade's own bookkeeping: every iterated element is found again by
    /// membership, the cached size matches the iterated count, and
    /// [`for_each`](Self::for_each) agrees with the iterator.
    ///
    /// Violations are passed to `report`; a healthy set reports nothing.
    pub fn check_invariants(&self, mut report: impl FnMut(String)) {
        check_recursive(&self.root, &self.hash, &self.equals, 0, &mut report);

        let mut counted = 0_usize;
        for key in self.iter() {
            counted += 1;
            if !self.contains(key) {
                report(format!(
                    "iterated element not found by membership: key={key:?}"
                ));
            }
        }
        if counted != self.size {
            report(format!(
                "cached size differs from iterated count: size={} counted={counted}",
                self.size
            ));
        }

        let mut walk = self.iter();
        self.for_each(|key| match walk.next() {
            Some(iterated) => {
                if !(self.equals)(iterated, key) {
                    report(format!(
                        "for_each disagrees with iterator: expected={iterated:?} actual={key:?}"
                    ));
                }
            }
            None => report("iterator exhausted before for_each".to_string()),
        });
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

// Manual Clone — shares the trie, no K/V bounds.
impl<K, V> Clone for HamtSet<K, V> {
    fn clone(&self) -> Self {
        Self {
            hash: Arc::clone(&self.hash),
            equals: Arc::clone(&self.equals),
            root: Arc::clone(&self.root),
            size: self.size,
        }
    }
}

impl<K: Hash + Eq + 'static> Default for HamtSet<K> {
    fn default() -> Self {
        Self::with_default_hasher()
    }
}

impl<K: fmt::Debug, V> fmt::Debug for HamtSet<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two sets are equal when they hold the same elements, as judged by the
/// argument's membership.
impl<K, V> PartialEq for HamtSet<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().all(|key| other.contains(key))
    }
}

impl<K, V> Eq for HamtSet<K, V> {}

impl<K: Hash + Eq + Clone + 'static> FromIterator<K> for HamtSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::with_default_hasher();
        set.extend(iter);
        set
    }
}

impl<K: Clone, V: Clone + PartialEq> Extend<K> for HamtSet<K, V> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            *self = self.insert(key);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a HamtSet<K, V> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V>;

    fn into_iter(self) -> Keys<'a, K, V> {
        self.iter()
    }
}
