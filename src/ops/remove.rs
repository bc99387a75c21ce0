//! Removal operation — copy-on-write delete with upward pruning.

use std::sync::Arc;

use crate::node::{self, Node};
use crate::{EqualsFn, HashCode};

/// Outcome of a recursive remove.
pub enum RemoveOutcome<K, V> {
    /// Key was not found — tree unchanged.
    NotFound,
    /// Key was removed.
    Removed {
        /// New root of the modified subtree, or `None` if the subtree
        /// collapsed to empty and the parent must drop its slot.
        node: Option<Arc<Node<K, V>>>,
    },
}

/// Removes `key` from the subtree rooted at `node`, consuming `remaining`
/// hash bits on the way down.
///
/// A child that collapses cascades upward: a node left with no entries and
/// no children becomes absent itself so ancestors can prune.
pub fn remove_recursive<K, V>(
    node: &Arc<Node<K, V>>,
    remaining: HashCode,
    key: &K,
    equals: &EqualsFn<K>,
) -> RemoveOutcome<K, V>
where
    K: Clone,
    V: Clone,
{
    if remaining == 0 {
        return remove_from_bucket(node, key, equals);
    }

    let slot = node::slot_of(remaining);
    let Some(old_child) = node.child(slot) else {
        return RemoveOutcome::NotFound;
    };
    match remove_recursive(old_child, remaining >> node::BITS_PER_LEVEL, key, equals) {
        RemoveOutcome::NotFound => RemoveOutcome::NotFound,
        RemoveOutcome::Removed {
            node: Some(new_child),
        } => RemoveOutcome::Removed {
            node: Some(Arc::new(node.with_child(slot, new_child))),
        },
        RemoveOutcome::Removed { node: None } => RemoveOutcome::Removed {
            node: node.without_child(slot).map(Arc::new),
        },
    }
}

fn remove_from_bucket<K, V>(
    node: &Arc<Node<K, V>>,
    key: &K,
    equals: &EqualsFn<K>,
) -> RemoveOutcome<K, V>
where
    K: Clone,
    V: Clone,
{
    let Some(pos) = node.entries.iter().position(|e| equals(&e.key, key)) else {
        return RemoveOutcome::NotFound;
    };
    if node.entries.len() == 1 && node.bitmask == 0 {
        // Last entry, no children — the whole node goes away.
        return RemoveOutcome::Removed { node: None };
    }
    let mut copy = (**node).clone();
    copy.entries.remove(pos);
    RemoveOutcome::Removed {
        node: Some(Arc::new(copy)),
    }
}
