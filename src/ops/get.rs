//! Lookup operations — traverse the trie by consuming hash bits.

use crate::node::{self, Node};
use crate::{EqualsFn, HashCode};

/// Searches for `key` in the subtree rooted at `node`.
///
/// Returns a reference to the stored value if the key is present and
/// carries one. Set membership entries store no value; use
/// [`contains_recursive`] for presence checks.
pub fn get_recursive<'a, K, V>(
    node: &'a Node<K, V>,
    remaining: HashCode,
    key: &K,
    equals: &EqualsFn<K>,
) -> Option<&'a V> {
    if remaining == 0 {
        return node
            .entries
            .iter()
            .find(|e| equals(&e.key, key))
            .and_then(|e| e.value.as_ref());
    }
    let child = node.child(node::slot_of(remaining))?;
    get_recursive(child, remaining >> node::BITS_PER_LEVEL, key, equals)
}

/// Returns `true` if `key` is present in the subtree rooted at `node`.
///
/// Decided purely by key presence in the terminal bucket.
pub fn contains_recursive<K, V>(
    node: &Node<K, V>,
    remaining: HashCode,
    key: &K,
    equals: &EqualsFn<K>,
) -> bool {
    if remaining == 0 {
        return node.entries.iter().any(|e| equals(&e.key, key));
    }
    match node.child(node::slot_of(remaining)) {
        Some(child) => contains_recursive(child, remaining >> node::BITS_PER_LEVEL, key, equals),
        None => false,
    }
}
