use entry::Entry;
use node::Node;
use rand::{self, Rng, XorShiftRng};
use reduce::Reduce;
use std::borrow::Borrow;
use std::fmt;
use tree;

/// An ordered map that maintains a monoid reduction over every contiguous
/// key range, implemented as a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and
/// a heap property. Each node has a key, a value, and a priority. The key of
/// any node is greater than all keys in its left subtree and less than all
/// keys in its right subtree. The priority of a node is not less than the
/// priority of any node in its subtrees. By randomly generating priorities,
/// the expected height of the tree is proportional to the logarithm of the
/// number of keys.
///
/// Every node additionally caches the reduction of the subtree below it, so
/// the fold over all entries with keys strictly less than a query key is
/// computed in `O(log N)` expected time. Keys are unique; inserting a key
/// that is already present leaves the map unchanged.
///
/// Each map draws its priorities from its own generator, seeded from the
/// operating system's entropy source, so the shapes of two maps are not
/// correlated.
///
/// # Examples
///
/// ```
/// use reducer_tree::{Count, ReducerMap};
///
/// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map.get(&0), Some(&1));
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.prefix_lt(&3), Count(1));
/// assert_eq!(map.reduce(), Count(2));
///
/// assert_eq!(map.remove(&0), Some((0, 1)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct ReducerMap<T, U, R> {
    tree: tree::Tree<T, U, R>,
    len: usize,
    rng: XorShiftRng,
}

impl<T, U, R> ReducerMap<T, U, R> {
    /// Constructs a new, empty `ReducerMap<T, U, R>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// ```
    pub fn new() -> Self {
        ReducerMap {
            tree: None,
            len: 0,
            rng: rand::weak_rng(),
        }
    }

    /// Inserts a key-value pair into the map if the key is not already
    /// present. Returns `true` if the insertion happened; a duplicate key
    /// returns `false` and leaves the map unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// assert!(map.insert(1, 1));
    /// assert!(!map.insert(1, 2));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> bool
    where
        T: Ord,
        R: Reduce<T, U>,
    {
        if tree::get(&self.tree, &key).is_some() {
            return false;
        }
        let ReducerMap {
            ref mut tree,
            ref mut len,
            ref mut rng,
        } = *self;
        tree::insert(tree, Node::new(key, value, rng.next_u64()));
        *len += 1;
        true
    }

    /// Removes a key-value pair from the map. If the key exists in the map,
    /// it will return the associated key-value pair. Otherwise it will
    /// return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V> + Ord,
        V: Ord + ?Sized,
        R: Reduce<T, U>,
    {
        let ReducerMap {
            ref mut tree,
            ref mut len,
            ..
        } = *self;
        tree::remove(tree, key).map(|entry| {
            let Entry { key, value } = entry;
            *len -= 1;
            (key, value)
        })
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a
    /// particular key. It will return `None` if the key does not exist in
    /// the map.
    ///
    /// The map does not hand out mutable references to values: mutating a
    /// value in place would invalidate the cached reductions on the path to
    /// the root. To change a value, remove the entry and insert it again.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(|node| &node.entry.value)
    }

    /// Returns references to the key, the value, and the cached reduction at
    /// a particular key. The reduction is the fold of the whole subtree
    /// rooted at that key's node, not a range fold. It will return `None` if
    /// the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// map.insert(1, 2);
    /// assert_eq!(map.find(&1), Some((&1, &2, &Count(1))));
    /// assert_eq!(map.find(&0), None);
    /// ```
    pub fn find<V>(&self, key: &V) -> Option<(&T, &U, &R)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key)
            .map(|node| (&node.entry.key, &node.entry.value, &node.reduced))
    }

    /// Returns the reduction of all the entries with keys strictly less than
    /// `key`, combined in ascending key order. Returns the reducer's
    /// identity if no such entries exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    /// map.insert(3, 30);
    /// assert_eq!(map.prefix_lt(&3), Count(2));
    /// assert_eq!(map.prefix_lt(&0), Count(0));
    /// ```
    pub fn prefix_lt<V>(&self, key: &V) -> R
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
        R: Reduce<T, U>,
    {
        tree::prefix_lt(&self.tree, key)
    }

    /// Returns the reduction of all the entries in the map, or the reducer's
    /// identity if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// assert_eq!(map.reduce(), Count(0));
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert_eq!(map.reduce(), Count(2));
    /// ```
    pub fn reduce(&self) -> R
    where
        R: Reduce<T, U>,
    {
        tree::reduce(&self.tree)
    }

    /// Applies `f` to every entry in ascending key order, quitting early if
    /// `f` ever returns `false`. Returns `true` if `f` returned `true` every
    /// time it was called, and on the empty map. The reduction passed to `f`
    /// is the cached reduction of the subtree rooted at the visited node,
    /// not a running prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// map.insert(2, 20);
    /// map.insert(1, 10);
    ///
    /// let mut keys = Vec::new();
    /// assert!(map.for_all(|key, _, _| {
    ///     keys.push(*key);
    ///     true
    /// }));
    /// assert_eq!(keys, vec![1, 2]);
    /// ```
    pub fn for_all<F>(&self, mut f: F) -> bool
    where
        F: FnMut(&T, &U, &R) -> bool,
    {
        tree::for_all(&self.tree, &mut f)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Checks the map's internal invariants: keys strictly increase in
    /// in-order traversal, no parent has a lower priority than a child,
    /// every cached reduction matches a recomputed one, and the entry count
    /// matches `len`. Panics if any invariant is violated. Intended for
    /// tests and debugging.
    ///
    /// # Examples
    ///
    /// ```
    /// use reducer_tree::{Count, ReducerMap};
    ///
    /// let mut map: ReducerMap<u32, u32, Count> = ReducerMap::new();
    /// map.insert(1, 1);
    /// map.validate();
    /// ```
    pub fn validate(&self)
    where
        T: Ord,
        R: Reduce<T, U>,
    {
        assert_eq!(tree::validate(&self.tree, None, None), self.len);
    }
}

impl<T, U, R> Default for ReducerMap<T, U, R> {
    fn default() -> Self {
        Self::new()
    }
}

// Renders as `{(key value priority reduced left right)}` with `_` standing
// in for absent children. The exact whitespace is not a contract.
impl<T, U, R> fmt::Debug for ReducerMap<T, U, R>
where
    T: fmt::Debug,
    U: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("{")?;
        if let Some(ref node) = self.tree {
            write!(f, "{:?}", node)?;
        }
        f.write_str("}")
    }
}
