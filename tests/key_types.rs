use std::cmp::Reverse;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rank_skiplist::dynamic::{DynKey, DynSkiplist, KeyKind};
use rank_skiplist::{ByOrd, Error, Key, LessFn, Skiplist};

/// A key that can only be compared: every score ties, so every comparison uses `less`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Version {
    major: u8,
    minor: u8,
}

impl Key for Version {
    fn less(&self, other: &Self) -> bool {
        (self.major, self.minor) < (other.major, other.minor)
    }
}

/// A key with a coarse score: the score only orders by `major`, `less` breaks ties.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ScoredVersion(Version);

impl Key for ScoredVersion {
    fn less(&self, other: &Self) -> bool {
        self.0.less(&other.0)
    }

    fn score(&self) -> f64 {
        f64::from(self.0.major)
    }
}

fn version(major: u8, minor: u8) -> Version {
    Version { major, minor }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn strings_sort_like_std(words in proptest::collection::vec("[a-c]{0,4}", 0..200)) {
        let list: Skiplist<String, usize> = words.iter().cloned().zip(0..).collect();
        let keys: Vec<&String> = list.keys().collect();
        let mut expected: Vec<&String> = words.iter().collect();
        expected.sort();
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn unicode_strings_sort_like_std(words in proptest::collection::vec("\\PC{0,3}", 0..100)) {
        let list: Skiplist<String, ()> = words.iter().map(|w| (w.clone(), ())).collect();
        let mut expected = words.clone();
        expected.sort();
        prop_assert_eq!(list.keys().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn byte_strings_sort_like_std(keys in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..12), 0..200)) {
        let list: Skiplist<Vec<u8>, ()> = keys.iter().map(|k| (k.clone(), ())).collect();
        let mut expected = keys.clone();
        expected.sort();
        prop_assert_eq!(list.keys().cloned().collect::<Vec<_>>(), expected);
        for key in &keys {
            prop_assert!(list.contains_key(key.as_slice()));
        }
    }

    #[test]
    fn floats_sort_like_total_cmp(keys in proptest::collection::vec(-1e6f64..1e6, 0..200)) {
        let list: Skiplist<f64, ()> = keys.iter().map(|&k| (k, ())).collect();
        let mut expected = keys.clone();
        expected.sort_by(f64::total_cmp);
        prop_assert_eq!(list.keys().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn comparable_only_and_scored_keys_agree(pairs in proptest::collection::vec((0u8..4, 0u8..4), 0..100)) {
        let plain: Skiplist<Version, usize> = pairs.iter().map(|&(a, b)| (version(a, b), 0)).collect();
        let scored: Skiplist<ScoredVersion, usize> =
            pairs.iter().map(|&(a, b)| (ScoredVersion(version(a, b)), 0)).collect();
        let plain_keys: Vec<Version> = plain.keys().copied().collect();
        let scored_keys: Vec<Version> = scored.keys().map(|k| k.0).collect();
        prop_assert_eq!(&plain_keys, &scored_keys);
        for pair in plain_keys.windows(2) {
            prop_assert!(!pair[1].less(&pair[0]));
        }
    }
}

#[test]
fn string_lookups_use_str() {
    let mut list = Skiplist::new();
    list.set(String::from("one"), 1);
    list.set(String::from("two"), 2);
    list.set(String::from("three"), 3);
    assert_eq!(list.get("two"), Some(&2));
    assert_eq!(list.position_of("three"), Some(1));
    assert_eq!(list.to_string(), "{one:1 three:3 two:2}");
}

#[test]
fn strings_sharing_a_prefix_fall_back_to_less() {
    let list = Skiplist::from([("abc", 1), ("abb", 2), ("ab", 3), ("abd", 4)]);
    assert_eq!(list.keys().copied().collect::<Vec<_>>(), ["ab", "abb", "abc", "abd"]);
}

#[test]
fn set_and_remove_tell_apart_keys_with_equal_scores() {
    let mut list = Skiplist::new();
    list.set("abc", 1);
    list.set("abd", 2);
    assert_eq!(list.len(), 2);
    assert_eq!(list.to_string(), "{abc:1 abd:2}");

    list.set("abc", 3);
    assert_eq!(list.to_string(), "{abc:3 abd:2}");

    assert_eq!(list.remove(&"abx"), None);
    assert_eq!(list.remove(&"abd"), Some(("abd", 2)));
    assert_eq!(list.len(), 1);
    assert_eq!(list.to_string(), "{abc:3}");
}

#[test]
fn set_and_remove_tell_apart_scored_keys_on_minor() {
    let mut list = Skiplist::new();
    list.set(ScoredVersion(version(1, 0)), 'a');
    list.set(ScoredVersion(version(1, 2)), 'b');
    assert_eq!(list.len(), 2);

    list.set(ScoredVersion(version(1, 0)), 'c');
    assert_eq!(list.len(), 2);
    assert_eq!(list.values().copied().collect::<String>(), "cb");
    assert_eq!(list.get(&ScoredVersion(version(1, 2))), Some(&'b'));

    assert_eq!(list.remove(&ScoredVersion(version(1, 1))), None);
    assert_eq!(list.remove(&ScoredVersion(version(1, 2))), Some((ScoredVersion(version(1, 2)), 'b')));
    assert_eq!(list.values().copied().collect::<String>(), "c");
}

#[test]
fn reverse_keys_sort_descending() {
    let list = Skiplist::from([(Reverse(1), 'a'), (Reverse(3), 'c'), (Reverse(2), 'b')]);
    assert_eq!(list.values().copied().collect::<String>(), "cba");
}

#[test]
fn by_ord_orders_composite_keys() {
    let mut list = Skiplist::with_order(ByOrd);
    list.insert(("b", 1), 'x');
    list.insert(("a", 2), 'y');
    list.insert(("a", 1), 'z');
    assert_eq!(list.values().copied().collect::<String>(), "zyx");
    assert_eq!(list.get(&("a", 2)), Some(&'y'));
}

#[test]
fn less_fn_orders_by_projection() {
    let mut list = Skiplist::with_order(LessFn(|a: &&str, b: &&str| a.len() < b.len()));
    list.insert("ccc", 3);
    list.insert("a", 1);
    list.insert("bb", 2);
    list.insert("dd", 4);
    // Equal lengths are equal keys, kept youngest first.
    assert_eq!(list.keys().copied().collect::<Vec<_>>(), ["a", "dd", "bb", "ccc"]);
    assert_eq!(list.get(&"xx"), Some(&4));
}

#[test]
fn dynamic_list_binds_first_kind() {
    let mut list = DynSkiplist::inferred();
    assert_eq!(list.order().bound(), None);
    list.insert(DynKey::from(3_u64), "three");
    list.insert(DynKey::from(1_u64), "one");
    assert_eq!(list.order().bound(), Some(KeyKind::Uint));
    assert_eq!(list.to_string(), "{1:one 3:three}");

    assert_eq!(
        list.try_set(DynKey::from(-1_i64), "minus one"),
        Err(Error::UnsupportedKeyType {
            bound: "uint",
            found: "int",
        })
    );
    assert_eq!(list.len(), 2);
    assert!(list.try_set(DynKey::from(2_u64), "two").is_ok());
    assert_eq!(list.position_of(&DynKey::from(2_u64)), Some(1));
}

#[test]
fn dynamic_descending_list() {
    let mut list = DynSkiplist::inferred_descending();
    for word in ["pear", "apple", "fig"] {
        list.insert(DynKey::from(word), word.len());
    }
    assert_eq!(list.to_string(), "{pear:4 fig:3 apple:5}");
}

#[test]
#[should_panic(expected = "skiplist: text keys are not supported by a list bound to float keys")]
fn dynamic_list_panics_on_mismatched_insert() {
    let mut list = DynSkiplist::inferred();
    list.insert(DynKey::from(1.5), ());
    list.insert(DynKey::from("oops"), ());
}

#[test]
#[should_panic(expected = "bytes keys are not supported")]
fn dynamic_list_panics_on_mismatched_lookup() {
    let mut list = DynSkiplist::inferred();
    list.insert(DynKey::from("text"), ());
    let _ = list.get(&DynKey::from(b"raw".as_slice()));
}
