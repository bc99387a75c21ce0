//! Insertion operation — copy-on-write path-copy insert.

use std::sync::Arc;

use crate::node::{self, Entry, Node};
use crate::{EqualsFn, HashCode};

/// Outcome of a recursive insert.
pub struct InsertOutcome<K, V> {
    /// Root of the modified subtree. The same pointer as the receiver when
    /// nothing changed — callers detect no-ops by identity.
    pub node: Arc<Node<K, V>>,
    /// `true` if a new key was added, `false` if an existing entry was
    /// updated or left alone.
    pub inserted: bool,
}

/// Inserts `key`/`value` into the subtree rooted at `node`, consuming
/// `remaining` hash bits on the way down.
///
/// A `value` of `None` records bare membership (the set façade).
pub fn insert_recursive<K, V>(
    node: &Arc<Node<K, V>>,
    remaining: HashCode,
    key: K,
    value: Option<V>,
    equals: &EqualsFn<K>,
) -> InsertOutcome<K, V>
where
    K: Clone,
    V: Clone + PartialEq,
{
    if remaining == 0 {
        return insert_into_bucket(node, key, value, equals);
    }

    let slot = node::slot_of(remaining);
    match node.child(slot) {
        Some(old_child) => {
            let outcome = insert_recursive(
                old_child,
                remaining >> node::BITS_PER_LEVEL,
                key,
                value,
                equals,
            );
            if Arc::ptr_eq(&outcome.node, old_child) {
                // Unchanged child → unchanged receiver.
                InsertOutcome {
                    node: Arc::clone(node),
                    inserted: outcome.inserted,
                }
            } else {
                InsertOutcome {
                    node: Arc::new(node.with_child(slot, outcome.node)),
                    inserted: outcome.inserted,
                }
            }
        }
        None => {
            let spine = fresh_spine(remaining >> node::BITS_PER_LEVEL, key, value);
            InsertOutcome {
                node: Arc::new(node.with_child(slot, spine)),
                inserted: true,
            }
        }
    }
}

/// The entry belongs in this node's bucket: replace, no-op, or prepend.
fn insert_into_bucket<K, V>(
    node: &Arc<Node<K, V>>,
    key: K,
    value: Option<V>,
    equals: &EqualsFn<K>,
) -> InsertOutcome<K, V>
where
    K: Clone,
    V: Clone + PartialEq,
{
    if let Some(pos) = node.entries.iter().position(|e| equals(&e.key, &key)) {
        if node.entries[pos].value == value {
            // Identical entry — report the receiver itself.
            return InsertOutcome {
                node: Arc::clone(node),
                inserted: false,
            };
        }
        let mut copy = (**node).clone();
        copy.entries[pos] = Entry { key, value };
        InsertOutcome {
            node: Arc::new(copy),
            inserted: false,
        }
    } else {
        let mut copy = (**node).clone();
        copy.entries.insert(0, Entry { key, value });
        InsertOutcome {
            node: Arc::new(copy),
            inserted: true,
        }
    }
}

/// Builds the chain of single-child nodes leading down to a new entry.
///
/// Used when the descent steps into an unoccupied slot; the remaining hash
/// dictates how deep the chain goes.
fn fresh_spine<K, V>(remaining: HashCode, key: K, value: Option<V>) -> Arc<Node<K, V>>
where
    K: Clone,
    V: Clone,
{
    if remaining == 0 {
        Arc::new(Node::with_entry(Entry { key, value }))
    } else {
        let slot = node::slot_of(remaining);
        let child = fresh_spine(remaining >> node::BITS_PER_LEVEL, key, value);
        Arc::new(Node::empty().with_child(slot, child))
    }
}
