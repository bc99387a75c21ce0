//! Persistent hash map and set based on a HAMT.
//!
//! A HAMT (Hash-Array Mapped Trie) consumes the hash of a key a few bits
//! per level; children at each level are compressed through a bitmap so
//! only occupied slots consume memory. Every mutating operation returns a
//! new container that shares unchanged structure with its predecessor, so
//! any number of prior versions stay valid and observe their original
//! contents.
//!
//! # Key properties
//!
//! - **Persistence**: updates allocate a fresh path from root to the
//!   modified bucket; everything else is shared via [`Arc`](std::sync::Arc)
//! - **Client-supplied hashing**: each container carries its own hash
//!   function and equality predicate; keys are otherwise opaque
//! - **No-op detection by identity**: an update that changes nothing
//!   returns the same root pointer, observable through `ptr_eq`
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Example
//!
//! ```
//! use hamt_trie::HamtMap;
//!
//! let empty: HamtMap<String, i32> = HamtMap::with_default_hasher();
//! let one = empty.insert("one".to_string(), 1);
//! let two = one.insert("two".to_string(), 2);
//!
//! assert_eq!(two.get(&"one".to_string()), Some(&1));
//! assert_eq!(one.len(), 1); // earlier version unaffected
//! assert_eq!(empty.len(), 0);
//! ```
//!
//! # References
//!
//! - Bagwell, 2001 — "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub mod iter;
pub mod node;

mod map;
mod ops;
mod set;

#[cfg(test)]
mod tests;

pub use map::HamtMap;
pub use set::HamtSet;

/// 32-bit hash code produced by a container's hash function.
pub type HashCode = u32;

/// Shared hash function of a container.
///
/// Must be pure and deterministic, and must agree with the container's
/// [`EqualsFn`]: equal keys produce equal codes.
pub type HashFn<K> = Arc<dyn Fn(&K) -> HashCode + Send + Sync>;

/// Shared equality predicate of a container.
pub type EqualsFn<K> = Arc<dyn Fn(&K, &K) -> bool + Send + Sync>;

/// Hashes a key with the standard library's default hasher, truncated to
/// 32 bits.
///
/// This is the hash function installed by `with_default_hasher` on
/// [`HamtMap`] and [`HamtSet`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn default_hash<K: Hash + ?Sized>(key: &K) -> HashCode {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish() as HashCode
}
