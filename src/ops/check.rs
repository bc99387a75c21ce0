//! Structural invariant verification, used by tests and diagnostics.

use std::fmt::Debug;

use crate::node::{self, Node};
use crate::{EqualsFn, HashFn};

/// Verifies the structural invariants of the subtree rooted at `node`.
///
/// `shift` is the total number of hash bits consumed to reach this node.
/// Checks, for every node in the subtree:
///
/// - the bucket holds no two keys the equality predicate considers equal
/// - every bucket entry's hash is fully consumed (`hash(key) >> shift == 0`)
/// - the bitmask population count matches the child array length
/// - no child is an empty node
///
/// Violations are passed to `report` as human-readable messages; the
/// reporter is purely an observer.
pub fn check_recursive<K: Debug, V>(
    node: &Node<K, V>,
    hash: &HashFn<K>,
    equals: &EqualsFn<K>,
    shift: u32,
    report: &mut dyn FnMut(String),
) {
    for (i, entry) in node.entries.iter().enumerate() {
        for other in &node.entries[i + 1..] {
            if equals(&entry.key, &other.key) {
                report(format!("duplicate key in bucket: key={:?}", entry.key));
            }
        }
        let shifted = hash(&entry.key).checked_shr(shift).unwrap_or(0);
        if shifted != 0 {
            report(format!(
                "bucket entry with unconsumed hash: key={:?} shifted_hash={shifted:#x}",
                entry.key
            ));
        }
    }

    let occupied = node.bitmask.count_ones() as usize;
    if occupied != node.children.len() {
        report(format!(
            "bitmask disagrees with child array: bitmask={:#06x} popcount={occupied} children={}",
            node.bitmask,
            node.children.len()
        ));
    }

    for child in &node.children {
        if child.is_empty() {
            report("empty node reachable below the root".to_string());
        }
        check_recursive(child, hash, equals, shift + node::BITS_PER_LEVEL, report);
    }
}
