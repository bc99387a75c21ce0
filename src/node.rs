//! Trie node type and bitmap slot arithmetic.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::HashCode;

/// Bits of hash consumed per trie level (4 → 16-way branching).
pub const BITS_PER_LEVEL: u32 = 4;

/// Mask extracting the slot index for the current level.
pub const SLOT_MASK: HashCode = (1 << BITS_PER_LEVEL) - 1;

/// Bucket of entries terminating at one node. Inline capacity 1: a bucket
/// holds more than one entry only under a full-hash collision.
pub(crate) type EntryList<K, V> = SmallVec<[Entry<K, V>; 1]>;

/// Densely packed child array, ordered by ascending slot.
pub(crate) type ChildList<K, V> = SmallVec<[Arc<Node<K, V>>; 2]>;

/// A key together with its stored value slot.
///
/// `value` is `None` for set membership entries; maps always store `Some`.
/// Membership is decided by scanning keys, never by value comparison.
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: Option<V>,
}

/// Bitmap-compressed HAMT node.
///
/// Entries whose hash has been entirely consumed by the descent live in
/// this node's bucket; bit `i` of `bitmask` is set iff a child occupies
/// logical slot `i`, and the `k`-th child corresponds to the `k`-th set
/// bit. Nodes are never mutated after the operation that created them
/// returns; all modification happens on freshly allocated copies.
#[derive(Clone)]
pub struct Node<K, V> {
    pub(crate) entries: EntryList<K, V>,
    pub(crate) bitmask: u32,
    pub(crate) children: ChildList<K, V>,
}

// ---------------------------------------------------------------------------
// Slot arithmetic
// ---------------------------------------------------------------------------

/// Extracts the logical slot index (0..16) from the low bits of a hash.
#[inline]
#[must_use]
pub const fn slot_of(hash: HashCode) -> u32 {
    hash & SLOT_MASK
}

/// Returns the single-bit selector for the given slot.
#[inline]
#[must_use]
pub const fn slot_bit(slot: u32) -> u32 {
    1 << slot
}

/// Returns the dense position of `bit` within the packed child array.
///
/// Counts the occupied slots below `bit`.
#[inline]
#[must_use]
pub const fn dense_index(bitmask: u32, bit: u32) -> usize {
    (bitmask & (bit - 1)).count_ones() as usize
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K, V> Node<K, V> {
    /// Creates a node with no entries and no children.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: SmallVec::new(),
            bitmask: 0,
            children: SmallVec::new(),
        }
    }

    pub(crate) fn with_entry(entry: Entry<K, V>) -> Self {
        let mut entries = EntryList::new();
        entries.push(entry);
        Self {
            entries,
            bitmask: 0,
            children: SmallVec::new(),
        }
    }

    /// Returns `true` if the node has no entries and no children.
    ///
    /// Only the root of an empty container is ever in this state; interior
    /// nodes collapse away during deletion.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.bitmask == 0
    }

    /// Returns the number of child subtrees.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.bitmask.count_ones() as usize
    }

    pub(crate) fn child(&self, slot: u32) -> Option<&Arc<Node<K, V>>> {
        let bit = slot_bit(slot);
        if self.bitmask & bit == 0 {
            None
        } else {
            Some(&self.children[dense_index(self.bitmask, bit)])
        }
    }

    /// Visits every entry in the subtree: this node's bucket first, then
    /// each child in ascending slot order. Same order as the iterator.
    pub(crate) fn for_each(&self, f: &mut impl FnMut(&Entry<K, V>)) {
        for entry in &self.entries {
            f(entry);
        }
        for child in &self.children {
            child.for_each(f);
        }
    }
}

// ---------------------------------------------------------------------------
// Copy-on-write child surgery
// ---------------------------------------------------------------------------

impl<K: Clone, V: Clone> Node<K, V> {
    /// Returns a copy of this node with `child` installed at `slot`.
    pub(crate) fn with_child(&self, slot: u32, child: Arc<Node<K, V>>) -> Self {
        let bit = slot_bit(slot);
        let mut copy = self.clone();
        if self.bitmask & bit != 0 {
            copy.children[dense_index(self.bitmask, bit)] = child;
        } else {
            copy.children.insert(dense_index(self.bitmask, bit), child);
            copy.bitmask |= bit;
        }
        copy
    }

    /// Returns a copy of this node with the child at `slot` removed, or
    /// `None` when the node collapses to empty (no entries, last child).
    ///
    /// # Panics
    ///
    /// Panics if `slot` is unoccupied; reaching that state means a
    /// structural update went wrong earlier.
    pub(crate) fn without_child(&self, slot: u32) -> Option<Self> {
        let bit = slot_bit(slot);
        assert!(
            self.bitmask & bit != 0,
            "no child at slot {slot} (bitmask {:#06x})",
            self.bitmask
        );
        if self.entries.is_empty() && self.child_count() == 1 {
            return None;
        }
        let mut copy = self.clone();
        copy.children.remove(dense_index(self.bitmask, bit));
        copy.bitmask &= !bit;
        Some(copy)
    }
}

// ---------------------------------------------------------------------------
// Trait impls — summary Debug without K/V bounds.
// ---------------------------------------------------------------------------

impl<K, V> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("bucket_len", &self.entries.len())
            .field("bitmask", &format_args!("{:#018b}", self.bitmask))
            .field("children", &self.children.len())
            .finish()
    }
}
