//! Persistent hash map façade.

use std::fmt;
use std::hash::Hash;
use std::ops;
use std::sync::Arc;

use crate::iter::{Iter, Keys};
use crate::node::Node;
use crate::ops::check::check_recursive;
use crate::ops::get::{contains_recursive, get_recursive};
use crate::ops::insert::insert_recursive;
use crate::ops::remove::{remove_recursive, RemoveOutcome};
use crate::set::HamtSet;
use crate::{default_hash, EqualsFn, HashCode, HashFn};

/// Persistent hash map over a client-supplied hash function and equality
/// predicate.
///
/// Updates return a new map sharing unchanged structure with the receiver;
/// the receiver keeps observing its original contents. Values are compared
/// with [`PartialEq`] to detect updates that change nothing, which are
/// returned without allocating a new trie path.
///
/// The hash function and equality predicate must agree: keys the predicate
/// considers equal must hash to the same code. That contract is the
/// caller's to uphold; violations surface through
/// [`check_invariants`](Self::check_invariants).
pub struct HamtMap<K, V> {
    hash: HashFn<K>,
    equals: EqualsFn<K>,
    root: Arc<Node<K, V>>,
    size: usize,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K, V> HamtMap<K, V> {
    /// Creates an empty map over the given hash function and equality
    /// predicate.
    #[must_use]
    pub fn new(
        hash: impl Fn(&K) -> HashCode + Send + Sync + 'static,
        equals: impl Fn(&K, &K) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::from_fns(Arc::new(hash), Arc::new(equals))
    }

    pub(crate) fn from_fns(hash: HashFn<K>, equals: EqualsFn<K>) -> Self {
        Self {
            hash,
            equals,
            root: Arc::new(Node::empty()),
            size: 0,
        }
    }

    /// Returns the number of key-value pairs. O(1).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if `self` and `other` share the same root node.
    ///
    /// Structurally unchanged results come back with the receiver's root,
    /// so this distinguishes a no-op update from an equal-looking rebuild.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    ///
    /// The iterator observes this version of the map, even if newer
    /// versions are created while it is in flight.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.size)
    }

    /// Returns an iterator over the keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(&self.root, self.size)
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns a set of this map's keys, sharing the map's trie without
    /// copying.
    ///
    /// Both façades stay independent: updates to either produce new
    /// versions and never disturb the shared structure.
    #[must_use]
    pub fn key_set(&self) -> HamtSet<K, V> {
        HamtSet::from_parts(
            Arc::clone(&self.hash),
            Arc::clone(&self.equals),
            Arc::clone(&self.root),
            self.size,
        )
    }
}

impl<K: Hash + Eq, V> HamtMap<K, V>
where
    K: 'static,
{
    /// Creates an empty map hashing with the standard library's default
    /// hasher and comparing keys with `==`.
    #[must_use]
    pub fn with_default_hasher() -> Self {
        Self::new(|key: &K| default_hash(key), |a: &K, b: &K| a == b)
    }
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

impl<K, V> HamtMap<K, V> {
    /// Returns a reference to the value associated with `key`, or `None`
    /// if the key is absent.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        get_recursive(&self.root, (self.hash)(key), key, &self.equals)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        contains_recursive(&self.root, (self.hash)(key), key, &self.equals)
    }
}

// ---------------------------------------------------------------------------
// Write operations — each returns a new version
// ---------------------------------------------------------------------------

impl<K: Clone, V: Clone + PartialEq> HamtMap<K, V> {
    /// Returns a map in which `key` is associated with `value`.
    ///
    /// Inserting a key that is already mapped to an equal value returns a
    /// map with the receiver's own root (see [`ptr_eq`](Self::ptr_eq)).
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let code = (self.hash)(&key);
        let outcome = insert_recursive(&self.root, code, key, Some(value), &self.equals);
        Self {
            hash: Arc::clone(&self.hash),
            equals: Arc::clone(&self.equals),
            root: outcome.node,
            size: self.size + usize::from(outcome.inserted),
        }
    }

    /// Returns a map without `key`.
    ///
    /// Removing an absent key returns a map with the receiver's own root
    /// and size. When the last entry goes, the new map holds a fresh empty
    /// root rather than no root at all.
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
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

impl<K: fmt::Debug, V: fmt::Debug + PartialEq> HamtMap<K, V> {
    /// Verifies the structural invariants of this map's trie plus the
    /// façade's own bookkeeping: every iterated entry is found again by
    /// lookup, and the cached size matches the iterated count.
    ///
    /// Violations are passed to `report`; a healthy map reports nothing.
    pub fn check_invariants(&self, mut report: impl FnMut(String)) {
        check_recursive(&self.root, &self.hash, &self.equals, 0, &mut report);

        let mut counted = 0_usize;
        for (key, value) in self.iter() {
            counted += 1;
            match self.get(key) {
                Some(found) if found == value => {}
                found => report(format!(
                    "lookup disagrees with iteration: key={key:?} expected={value:?} actual={found:?}"
                )),
            }
        }
        if counted != self.size {
            report(format!(
                "cached size differs from iterated count: size={} counted={counted}",
                self.size
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

// Manual Clone — shares the trie, no K/V bounds.
impl<K, V> Clone for HamtMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            hash: Arc::clone(&self.hash),
            equals: Arc::clone(&self.equals),
            root: Arc::clone(&self.root),
            size: self.size,
        }
    }
}

impl<K: Hash + Eq + 'static, V> Default for HamtMap<K, V> {
    fn default() -> Self {
        Self::with_default_hasher()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HamtMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal when they hold the same entries, as judged by the
/// argument's lookup.
impl<K, V: PartialEq> PartialEq for HamtMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V: Eq> Eq for HamtMap<K, V> {}

impl<K: Hash + Eq + Clone + 'static, V: Clone + PartialEq> FromIterator<(K, V)>
    for HamtMap<K, V>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_default_hasher();
        map.extend(iter);
        map
    }
}

impl<K: Clone, V: Clone + PartialEq> Extend<(K, V)> for HamtMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            *self = self.insert(key, value);
        }
    }
}

impl<K, V> ops::Index<&K> for HamtMap<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V> IntoIterator for &'a HamtMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
