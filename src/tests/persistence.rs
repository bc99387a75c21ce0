//! Old versions keep observing their original contents.

use crate::{HamtMap, HamtSet};

#[test]
fn insert_leaves_receiver_untouched() {
    let v1 = HamtMap::with_default_hasher().insert("a", 1).insert("b", 2);
    let v2 = v1.insert("c", 3);
    let v3 = v2.insert("a", 100);

    assert_eq!(v1.len(), 2);
    assert_eq!(v1.get(&"a"), Some(&1));
    assert_eq!(v1.get(&"c"), None);

    assert_eq!(v2.len(), 3);
    assert_eq!(v2.get(&"a"), Some(&1));
    assert_eq!(v2.get(&"c"), Some(&3));

    assert_eq!(v3.get(&"a"), Some(&100));
}

#[test]
fn remove_leaves_receiver_untouched() {
    let v1 = HamtMap::with_default_hasher().insert(1, 10).insert(2, 20);
    let v2 = v1.remove(&1);

    assert_eq!(v1.len(), 2);
    assert_eq!(v1.get(&1), Some(&10));
    assert_eq!(v2.len(), 1);
    assert_eq!(v2.get(&1), None);
}

/// An iterator in flight keeps walking the version that created it.
#[test]
fn iterator_pins_its_version() {
    let mut v1 = HamtMap::with_default_hasher();
    for i in 0..50 {
        v1 = v1.insert(i, i);
    }

    let iter = v1.iter();
    let v2 = v1.insert(999, 999);

    assert_eq!(iter.count(), 50);
    assert_eq!(v2.len(), 51);
}

/// Many versions of one lineage coexist and disagree only where they must.
#[test]
fn version_chain() {
    let mut versions = vec![HamtMap::with_default_hasher()];
    for i in 0..20 {
        let next = versions.last().unwrap().insert(i, i * 10);
        versions.push(next);
    }

    for (age, version) in versions.iter().enumerate() {
        assert_eq!(version.len(), age);
        for i in 0..20 {
            let expected = if (i as usize) < age { Some(i * 10) } else { None };
            assert_eq!(version.get(&i).copied(), expected);
        }
    }
}

/// The key view and its map are independent façades over one trie.
#[test]
fn key_view_is_independent() {
    let map = HamtMap::with_default_hasher().insert("a", 1).insert("b", 2);
    let view = map.key_set();
    assert_eq!(view.len(), 2);
    assert!(view.contains(&"a"));

    let shrunk = view.remove(&"a");
    let grown = view.insert("c");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"a"), Some(&1));
    assert_eq!(shrunk.len(), 1);
    assert!(!shrunk.contains(&"a"));
    assert_eq!(grown.len(), 3);
}

#[test]
fn set_versions_coexist() {
    let v1 = HamtSet::with_default_hasher().insert(1).insert(2);
    let v2 = v1.insert(3);
    let v3 = v2.remove(&1);

    assert_eq!(v1.len(), 2);
    assert!(v1.contains(&1));
    assert!(!v1.contains(&3));
    assert_eq!(v2.len(), 3);
    assert!(v3.contains(&3));
    assert!(!v3.contains(&1));
}
