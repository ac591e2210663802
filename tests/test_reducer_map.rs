extern crate rand;
extern crate reducer_tree;

use rand::Rng;
use reducer_tree::{Reduce, ReducerMap};
use std::collections::BTreeMap;

// Non-commutative reducer that concatenates `key:value;` fragments, so any
// out-of-order combine shows up in the folded string.
#[derive(Clone, Debug, Default, PartialEq)]
struct Trace(String);

impl Reduce<u32, u32> for Trace {
    fn seed(key: &u32, value: &u32) -> Self {
        Trace(format!("{}:{};", key, value))
    }

    fn combine(&self, other: &Self) -> Self {
        Trace(format!("{}{}", self.0, other.0))
    }
}

// Concatenates the keys themselves, so prefix folds spell out the key order.
#[derive(Clone, Debug, Default, PartialEq)]
struct KeyCat(String);

impl Reduce<String, ()> for KeyCat {
    fn seed(key: &String, _value: &()) -> Self {
        KeyCat(key.clone())
    }

    fn combine(&self, other: &Self) -> Self {
        KeyCat(format!("{}{}", self.0, other.0))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct LenSum(usize);

impl Reduce<u64, String> for LenSum {
    fn seed(_key: &u64, value: &String) -> Self {
        LenSum(value.len())
    }

    fn combine(&self, other: &Self) -> Self {
        LenSum(self.0 + other.0)
    }
}

fn naive_prefix(model: &BTreeMap<u32, u32>, query: u32) -> Trace {
    model.range(..query).fold(Trace::default(), |acc, (key, value)| {
        acc.combine(&Trace::seed(key, value))
    })
}

macro_rules! random_ops_tests {
    ($($name:ident: $ops:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let mut rng = rand::thread_rng();
                let mut map: ReducerMap<u32, u32, Trace> = ReducerMap::new();
                let mut model = BTreeMap::new();

                for i in 0..$ops {
                    let key = rng.gen::<u32>() % 512;
                    let value = rng.gen::<u32>() % 1000;

                    if rng.gen::<bool>() {
                        assert_eq!(map.insert(key, value), !model.contains_key(&key));
                        model.entry(key).or_insert(value);
                    } else {
                        let expected = model.remove(&key).map(|value| (key, value));
                        assert_eq!(map.remove(&key), expected);
                    }
                    assert_eq!(map.get(&key), model.get(&key));

                    if i % 128 == 0 {
                        map.validate();
                    }
                }

                map.validate();
                assert_eq!(map.len(), model.len());

                let mut visited = Vec::new();
                assert!(map.for_all(|key, value, _| {
                    visited.push((*key, *value));
                    true
                }));
                let expected = model
                    .iter()
                    .map(|(key, value)| (*key, *value))
                    .collect::<Vec<_>>();
                assert_eq!(visited, expected);

                for _ in 0..100 {
                    let query = rng.gen::<u32>() % 600;
                    assert_eq!(map.prefix_lt(&query), naive_prefix(&model, query));
                }
            }
        )*
    }
}

random_ops_tests! {
    test_random_ops_100: 100,
    test_random_ops_1000: 1000,
    test_random_ops_10000: 10000,
}

#[test]
fn test_key_concatenation_prefixes() {
    let mut map: ReducerMap<String, (), KeyCat> = ReducerMap::new();
    for key in &["d", "a", "f", "b", "e", "c"] {
        assert!(map.insert(key.to_string(), ()));
    }
    map.validate();

    assert_eq!(map.prefix_lt("a"), KeyCat(String::new()));
    assert_eq!(map.prefix_lt("b"), KeyCat("a".to_string()));
    assert_eq!(map.prefix_lt("c"), KeyCat("ab".to_string()));
    assert_eq!(map.prefix_lt("d"), KeyCat("abc".to_string()));
    assert_eq!(map.prefix_lt("e"), KeyCat("abcd".to_string()));
    assert_eq!(map.prefix_lt("f"), KeyCat("abcde".to_string()));
    assert_eq!(map.prefix_lt("zzz"), KeyCat("abcdef".to_string()));
}

#[test]
fn test_value_length_reduction() {
    let mut map: ReducerMap<u64, String, LenSum> = ReducerMap::new();
    map.validate();
    assert!(map.insert(3, "hello".to_string()));
    map.validate();
    assert!(map.insert(2, "a".to_string()));
    map.validate();

    assert_eq!(map.reduce(), LenSum(6));
    assert_eq!(map.get(&3).map(|value| value.as_str()), Some("hello"));

    assert!(map.remove(&3).is_some());
    map.validate();
    assert_eq!(map.reduce(), LenSum(1));
}

#[test]
fn test_erase_is_idempotent() {
    let mut map: ReducerMap<u32, u32, Trace> = ReducerMap::new();
    map.insert(1, 1);
    map.insert(2, 2);

    assert_eq!(map.remove(&1), Some((1, 1)));
    assert_eq!(map.remove(&1), None);
    map.validate();
    assert_eq!(map.len(), 1);
}

#[test]
fn test_round_trip_leaves_empty_map() {
    let mut rng = rand::thread_rng();
    let mut map: ReducerMap<u32, u32, Trace> = ReducerMap::new();

    let mut keys = (0..1000).collect::<Vec<u32>>();
    rng.shuffle(&mut keys);
    for key in &keys {
        assert!(map.insert(*key, *key));
    }
    map.validate();
    assert_eq!(map.len(), 1000);

    rng.shuffle(&mut keys);
    for key in &keys {
        assert!(map.remove(key).is_some());
    }
    map.validate();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.reduce(), Trace::default());
}
