use crate::{HamtMap, HamtSet};

#[test]
fn default_is_empty() {
    let map: HamtMap<i32, i32> = HamtMap::default();
    assert!(map.is_empty());
    let set: HamtSet<i32> = HamtSet::default();
    assert!(set.is_empty());
}

#[test]
fn debug_format() {
    let map = HamtMap::with_default_hasher().insert(1, 10);
    assert_eq!(format!("{map:?}"), "{1: 10}");

    let set = HamtSet::with_default_hasher().insert(7);
    assert_eq!(format!("{set:?}"), "{7}");
}

#[test]
fn from_iterator() {
    let map: HamtMap<i32, i32> = vec![(1, 10), (2, 20), (3, 30)].into_iter().collect();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&1), Some(&10));

    let set: HamtSet<i32> = vec![1, 2, 3].into_iter().collect();
    assert_eq!(set.len(), 3);
    assert!(set.contains(&2));
}

#[test]
fn extend_trait() {
    let mut map = HamtMap::with_default_hasher().insert(1, 10);
    map.extend(vec![(2, 20), (3, 30)]);
    assert_eq!(map.len(), 3);
}

#[test]
fn index_existing() {
    let map = HamtMap::with_default_hasher().insert("key", 42);
    assert_eq!(map[&"key"], 42);
}

#[test]
#[should_panic(expected = "key not found")]
fn index_missing_panics() {
    let map: HamtMap<i32, i32> = HamtMap::with_default_hasher();
    let _ = map[&999];
}

/// Content equality is insertion-order blind.
#[test]
fn map_equality() {
    let forward = HamtMap::with_default_hasher().insert(1, 10).insert(2, 20);
    let backward = HamtMap::with_default_hasher().insert(2, 20).insert(1, 10);
    assert_eq!(forward, backward);

    let different = backward.insert(1, 11);
    assert_ne!(forward, different);
}

#[test]
fn into_iterator_for_ref() {
    let map = HamtMap::with_default_hasher().insert(1, 10).insert(2, 20);
    let mut total = 0;
    for (_, value) in &map {
        total += value;
    }
    assert_eq!(total, 30);

    let set = HamtSet::with_default_hasher().insert(3).insert(4);
    let mut sum = 0;
    for key in &set {
        sum += key;
    }
    assert_eq!(sum, 7);
}

#[test]
fn values_iterator() {
    let map = HamtMap::with_default_hasher().insert("a", 1).insert("b", 2);
    let sum: i32 = map.values().sum();
    assert_eq!(sum, 3);
}
