//! An ordered map based on an AVL tree.

use compare::{Compare, Natural};
use std::cmp::Ordering::{self, *};
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter::{self, IntoIterator};
use std::mem::replace;
use std::ops;
use crate::check;
use crate::error::Result;
use crate::node::{self, Left, Right, Search, Side, Tree};

pub use crate::node::Cursor;

/// An ordered map based on an AVL tree.
///
/// The height of the tree never exceeds roughly `1.44 * log2(n + 2)` for `n` entries, so lookups,
/// insertions and removals all take `O(log n)` time.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Map<K, V, C = Natural<K>> where C: Compare<K> {
    tree: Tree<K, V>,
    cmp: C,
}

impl<K, V> Map<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Map::with_cmp(compare::natural()) }
}

impl<K, V, C> Map<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut map = avl_tree::Map::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Map { tree: Tree::new(), cmp }
    }

    /// Checks if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert!(map.is_empty());
    ///
    /// map.insert(2, "b");
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.tree.root.is_none() }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns a reference to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let map: avl_tree::Map<i32, &str> = avl_tree::Map::new();
    /// assert!(map.cmp().compares_lt(&1, &2));
    ///
    /// let map: avl_tree::Map<i32, &str, _> = avl_tree::Map::with_cmp(natural().rev());
    /// assert!(map.cmp().compares_gt(&1, &2));
    /// ```
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all entries from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.iter().next(), Some((&1, &"a")));
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.iter().next(), None);
    /// ```
    pub fn clear(&mut self) { self.tree.clear(); }

    /// Inserts an entry into the map, returning the previous value, if any, associated
    /// with the key.
    ///
    /// Overwriting the value of a key that is already present leaves the shape of the tree
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.tree.insert(&self.cmp, key, value)
    }

    /// Removes and returns the entry whose key is equal to the given key, returning
    /// `None` if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.remove(&1), Some((1, "a")));
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&1), None);
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)> where C: Compare<Q, K> {
        self.tree.remove(&self.cmp, key)
    }

    /// Returns the map's entry corresponding to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut counts = avl_tree::Map::new();
    ///
    /// for s in vec!["a", "b", "a", "c", "a", "b"] {
    ///     *counts.entry(s).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(counts[&"a"], 3);
    /// assert_eq!(counts[&"b"], 2);
    /// assert_eq!(counts[&"c"], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<K, V> {
        match self.tree.search(&self.cmp, &key) {
            Search::Found(node) => Entry::Occupied(OccupiedEntry { tree: &mut self.tree, node }),
            Search::Vacant(slot) => Entry::Vacant(VacantEntry { tree: &mut self.tree, slot, key }),
        }
    }

    /// Checks if the map contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert!(!map.contains_key(&1));
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.tree.find(&self.cmp, key).is_some()
    }

    /// Returns a reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        self.tree.find(&self.cmp, key).map(|node| &self.tree[node].value)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None`
    /// if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    ///
    /// {
    ///     let value = map.get_mut(&1).unwrap();
    ///     assert_eq!(*value, "a");
    ///     *value = "b";
    /// }
    ///
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        let node = self.tree.find(&self.cmp, key)?;
        Some(&mut self.tree[node].value)
    }

    /// Returns the position of the given key in the map, or `None` if the map does not contain
    /// the key.
    ///
    /// The position can be moved to the neighboring keys in order.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let pos = map.find(&2).unwrap();
    /// assert_eq!((pos.key(), pos.value()), (&2, &"b"));
    /// assert_eq!(pos.next().map(|pos| *pos.key()), Some(3));
    /// assert_eq!(pos.prev().map(|pos| *pos.key()), Some(1));
    /// assert!(pos.next().unwrap().next().is_none());
    ///
    /// assert!(map.find(&4).is_none());
    /// ```
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Option<Cursor<K, V>> where C: Compare<Q, K> {
        self.tree.find(&self.cmp, key).map(|node| Cursor::new(&self.tree, node))
    }

    /// Returns a reference to the map's maximum key and a reference to its associated
    /// value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.last(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.last(), Some((&3, &"c")));
    /// ```
    pub fn last(&self) -> Option<(&K, &V)> {
        self.key_value(self.tree.extremum::<Right>(self.tree.root))
    }

    /// Returns a reference to the map's maximum key and a mutable reference to its
    /// associated value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.last(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// {
    ///     let last = map.last_mut().unwrap();
    ///     assert_eq!(last, (&3, &mut "c"));
    ///     *last.1 = "cc";
    /// }
    ///
    /// assert_eq!(map.last(), Some((&3, &"cc")));
    /// ```
    pub fn last_mut(&mut self) -> Option<(&K, &mut V)> {
        let node = self.tree.extremum::<Right>(self.tree.root);
        self.key_value_mut(node)
    }

    /// Removes the map's maximum key and returns it and its associated value, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.remove_last(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove_last(), Some((3, "c")));
    /// ```
    pub fn remove_last(&mut self) -> Option<(K, V)> {
        let node = self.tree.extremum::<Right>(self.tree.root)?;
        Some(self.tree.remove_node(node))
    }

    /// Returns the map's maximum key's entry, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert!(map.last_entry().is_none());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// {
    ///     let mut e = map.last_entry().unwrap();
    ///     assert_eq!(*e.key(), 3);
    ///     assert_eq!(e.insert("cc"), "c");
    /// }
    ///
    /// assert_eq!(map.last_entry().unwrap().remove(), (3, "cc"));
    /// assert_eq!(map.last(), Some((&2, &"b")));
    /// ```
    pub fn last_entry(&mut self) -> Option<OccupiedEntry<K, V>> {
        let node = self.tree.extremum::<Right>(self.tree.root)?;
        Some(OccupiedEntry { tree: &mut self.tree, node })
    }

    /// Returns a reference to the map's minimum key and a reference to its associated
    /// value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.first(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.first(), Some((&1, &"a")));
    /// ```
    pub fn first(&self) -> Option<(&K, &V)> {
        self.key_value(self.tree.extremum::<Left>(self.tree.root))
    }

    /// Returns a reference to the map's minimum key and a mutable reference to its
    /// associated value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.first(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// {
    ///     let first = map.first_mut().unwrap();
    ///     assert_eq!(first, (&1, &mut "a"));
    ///     *first.1 = "aa";
    /// }
    ///
    /// assert_eq!(map.first(), Some((&1, &"aa")));
    /// ```
    pub fn first_mut(&mut self) -> Option<(&K, &mut V)> {
        let node = self.tree.extremum::<Left>(self.tree.root);
        self.key_value_mut(node)
    }

    /// Removes the map's minimum key and returns it and its associated value, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.remove_first(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove_first(), Some((1, "a")));
    /// ```
    pub fn remove_first(&mut self) -> Option<(K, V)> {
        let node = self.tree.extremum::<Left>(self.tree.root)?;
        Some(self.tree.remove_node(node))
    }

    /// Returns the map's minimum key's entry, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert!(map.first_entry().is_none());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.first_entry().unwrap().remove(), (1, "a"));
    /// assert_eq!(map.first(), Some((&2, &"b")));
    /// ```
    pub fn first_entry(&mut self) -> Option<OccupiedEntry<K, V>> {
        let node = self.tree.extremum::<Left>(self.tree.root)?;
        Some(OccupiedEntry { tree: &mut self.tree, node })
    }

    /// Returns a reference to the predecessor of the given key and a
    /// reference to its associated value, or `None` if no such key is present in the map.
    ///
    /// If `inclusive` is `false`, this method finds the greatest key that is strictly less than
    /// the given key. If `inclusive` is `true`, this method finds the greatest key that is less
    /// than or equal to the given key.
    ///
    /// The given key need not itself be present in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.pred(&0, false), None);
    /// assert_eq!(map.pred(&1, false), None);
    /// assert_eq!(map.pred(&2, false), Some((&1, &"a")));
    /// assert_eq!(map.pred(&3, false), Some((&2, &"b")));
    /// assert_eq!(map.pred(&4, false), Some((&3, &"c")));
    ///
    /// assert_eq!(map.pred(&0, true), None);
    /// assert_eq!(map.pred(&1, true), Some((&1, &"a")));
    /// assert_eq!(map.pred(&2, true), Some((&2, &"b")));
    /// assert_eq!(map.pred(&3, true), Some((&3, &"c")));
    /// assert_eq!(map.pred(&4, true), Some((&3, &"c")));
    /// ```
    pub fn pred<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K> {

        self.key_value(self.tree.neighbor::<Left, _, _>(&self.cmp, key, inclusive))
    }

    /// Returns a reference to the predecessor of the given key and a
    /// mutable reference to its associated value, or `None` if no such key is present in the map.
    ///
    /// If `inclusive` is `false`, this method finds the greatest key that is strictly less than
    /// the given key. If `inclusive` is `true`, this method finds the greatest key that is less
    /// than or equal to the given key.
    ///
    /// The given key need not itself be present in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// {
    ///     let pred = map.pred_mut(&2, false).unwrap();
    ///     assert_eq!(pred, (&1, &mut "a"));
    ///     *pred.1 = "aa";
    /// }
    ///
    /// {
    ///     let pred = map.pred_mut(&2, true).unwrap();
    ///     assert_eq!(pred, (&2, &mut "b"));
    ///     *pred.1 = "bb";
    /// }
    ///
    /// assert_eq!(map.pred(&2, false), Some((&1, &"aa")));
    /// assert_eq!(map.pred(&2, true), Some((&2, &"bb")));
    /// ```
    pub fn pred_mut<Q: ?Sized>(&mut self, key: &Q, inclusive: bool) -> Option<(&K, &mut V)>
        where C: Compare<Q, K> {

        let node = self.tree.neighbor::<Left, _, _>(&self.cmp, key, inclusive);
        self.key_value_mut(node)
    }

    /// Removes the predecessor of the given key from the map and returns it and its associated
    /// value, or `None` if no such key is present in the map.
    ///
    /// If `inclusive` is `false`, this method removes the greatest key that is strictly less than
    /// the given key. If `inclusive` is `true`, this method removes the greatest key that is less
    /// than or equal to the given key.
    ///
    /// The given key need not itself be present in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove_pred(&1, false), None);
    /// assert!(map.contains_key(&1));
    ///
    /// assert_eq!(map.remove_pred(&2, false), Some((1, "a")));
    /// assert!(!map.contains_key(&1));
    ///
    /// assert_eq!(map.remove_pred(&2, true), Some((2, "b")));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn remove_pred<Q: ?Sized>(&mut self, key: &Q, inclusive: bool) -> Option<(K, V)>
        where C: Compare<Q, K> {

        let node = self.tree.neighbor::<Left, _, _>(&self.cmp, key, inclusive)?;
        Some(self.tree.remove_node(node))
    }

    /// Returns the entry of the predecessor of the given key, or `None` if no such key is present
    /// in the map.
    ///
    /// If `inclusive` is `false`, this method finds the greatest key that is strictly less than
    /// the given key. If `inclusive` is `true`, this method finds the greatest key that is less
    /// than or equal to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert!(map.pred_entry(&1, false).is_none());
    /// assert_eq!(map.pred_entry(&3, false).unwrap().remove(), (2, "b"));
    /// assert_eq!(*map.pred_entry(&3, true).unwrap().get(), "c");
    /// ```
    pub fn pred_entry<Q: ?Sized>(&mut self, key: &Q, inclusive: bool)
        -> Option<OccupiedEntry<K, V>> where C: Compare<Q, K> {

        let node = self.tree.neighbor::<Left, _, _>(&self.cmp, key, inclusive)?;
        Some(OccupiedEntry { tree: &mut self.tree, node })
    }

    /// Returns a reference to the successor of the given key and a
    /// reference to its associated value, or `None` if no such key is present in the map.
    ///
    /// If `inclusive` is `false`, this method finds the smallest key that is strictly greater than
    /// the given key. If `inclusive` is `true`, this method finds the smallest key that is greater
    /// than or equal to the given key.
    ///
    /// The given key need not itself be present in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.succ(&0, false), Some((&1, &"a")));
    /// assert_eq!(map.succ(&1, false), Some((&2, &"b")));
    /// assert_eq!(map.succ(&2, false), Some((&3, &"c")));
    /// assert_eq!(map.succ(&3, false), None);
    /// assert_eq!(map.succ(&4, false), None);
    ///
    /// assert_eq!(map.succ(&0, true), Some((&1, &"a")));
    /// assert_eq!(map.succ(&1, true), Some((&1, &"a")));
    /// assert_eq!(map.succ(&2, true), Some((&2, &"b")));
    /// assert_eq!(map.succ(&3, true), Some((&3, &"c")));
    /// assert_eq!(map.succ(&4, true), None);
    /// ```
    pub fn succ<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K> {

        self.key_value(self.tree.neighbor::<Right, _, _>(&self.cmp, key, inclusive))
    }

    /// Returns a reference to the successor of the given key and a
    /// mutable reference to its associated value, or `None` if no such key is present in the map.
    ///
    /// If `inclusive` is `false`, this method finds the smallest key that is strictly greater than
    /// the given key. If `inclusive` is `true`, this method finds the smallest key that is greater
    /// than or equal to the given key.
    ///
    /// The given key need not itself be present in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// {
    ///     let succ = map.succ_mut(&2, false).unwrap();
    ///     assert_eq!(succ, (&3, &mut "c"));
    ///     *succ.1 = "cc";
    /// }
    ///
    /// assert_eq!(map.succ(&2, false), Some((&3, &"cc")));
    /// ```
    pub fn succ_mut<Q: ?Sized>(&mut self, key: &Q, inclusive: bool) -> Option<(&K, &mut V)>
        where C: Compare<Q, K> {

        let node = self.tree.neighbor::<Right, _, _>(&self.cmp, key, inclusive);
        self.key_value_mut(node)
    }

    /// Removes the successor of the given key from the map and returns it and its associated
    /// value, or `None` if no such key is present in the map.
    ///
    /// If `inclusive` is `false`, this method removes the smallest key that is strictly greater
    /// than the given key. If `inclusive` is `true`, this method removes the smallest key that is
    /// greater than or equal to the given key.
    ///
    /// The given key need not itself be present in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove_succ(&3, false), None);
    /// assert!(map.contains_key(&3));
    ///
    /// assert_eq!(map.remove_succ(&2, false), Some((3, "c")));
    /// assert!(!map.contains_key(&3));
    ///
    /// assert_eq!(map.remove_succ(&2, true), Some((2, "b")));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn remove_succ<Q: ?Sized>(&mut self, key: &Q, inclusive: bool) -> Option<(K, V)>
        where C: Compare<Q, K> {

        let node = self.tree.neighbor::<Right, _, _>(&self.cmp, key, inclusive)?;
        Some(self.tree.remove_node(node))
    }

    /// Returns the entry of the successor of the given key, or `None` if no such key is present
    /// in the map.
    ///
    /// If `inclusive` is `false`, this method finds the smallest key that is strictly greater than
    /// the given key. If `inclusive` is `true`, this method finds the smallest key that is greater
    /// than or equal to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert!(map.succ_entry(&3, false).is_none());
    /// assert_eq!(map.succ_entry(&1, false).unwrap().remove(), (2, "b"));
    /// assert_eq!(*map.succ_entry(&1, true).unwrap().get(), "a");
    /// ```
    pub fn succ_entry<Q: ?Sized>(&mut self, key: &Q, inclusive: bool)
        -> Option<OccupiedEntry<K, V>> where C: Compare<Q, K> {

        let node = self.tree.neighbor::<Right, _, _>(&self.cmp, key, inclusive)?;
        Some(OccupiedEntry { tree: &mut self.tree, node })
    }

    /// Returns an iterator that consumes the map.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.into_iter();
    /// assert_eq!(it.next(), Some((1, "a")));
    /// assert_eq!(it.next(), Some((2, "b")));
    /// assert_eq!(it.next(), Some((3, "c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn into_iter(self) -> IntoIter<K, V> {
        IntoIter(node::IntoIter::new(self.tree))
    }

    /// Returns an iterator over the map's entries with immutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<K, V> {
        Iter(node::Iter::new(&self.tree))
    }

    /// Returns an iterator over the map's entries with mutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    ///
    /// let mut i = 1;
    ///
    /// for (_, value) in map.iter_mut() {
    ///     assert_eq!(i, *value);
    ///     *value *= 2;
    ///     i += 1;
    /// }
    ///
    /// assert_eq!(map[&"a"], 2);
    /// assert_eq!(map[&"b"], 4);
    /// assert_eq!(map[&"c"], 6);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        IterMut(node::IterMut::new(&mut self.tree))
    }

    /// Returns an iterator over the map's keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: avl_tree::Map<_, _> = vec![(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    /// assert_eq!(map.keys().collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    pub fn keys(&self) -> Keys<K, V> { Keys(self.iter()) }

    /// Returns an iterator over the map's values in ascending order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: avl_tree::Map<_, _> = vec![(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    /// assert_eq!(map.values().collect::<Vec<_>>(), [&"a", &"b", &"c"]);
    /// ```
    pub fn values(&self) -> Values<K, V> { Values(self.iter()) }

    /// Returns the number of levels in the tree backing the map.
    ///
    /// An empty map has height 0 and a map with a single entry has height 1. The height of a map
    /// with `n` entries never exceeds `1.44 * log2(n + 2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert_eq!(map.height(), 0);
    ///
    /// for i in 0..7 { map.insert(i, ()); }
    /// assert_eq!(map.height(), 3);
    /// ```
    pub fn height(&self) -> usize { check::survey(&self.tree, &self.cmp).0.height }

    /// Checks every structural invariant of the tree backing the map, returning the first
    /// violation found.
    ///
    /// The tree's shape is measured from scratch, independently of the balance information kept
    /// up to date by insertions and removals. This is `O(n)`; a map that has only been modified
    /// through its public interface always passes.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    ///
    /// for i in 0..100 { map.insert(i, i); }
    /// for i in (0..100).filter(|i| i % 3 == 0) { map.remove(&i); }
    ///
    /// assert_eq!(map.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<()> {
        match check::survey(&self.tree, &self.cmp).1 {
            None => Ok(()),
            Some(error) => Err(error),
        }
    }

    /// Checks if the tree backing the map is a valid AVL tree.
    ///
    /// This is exactly `validate().is_ok()`: besides requiring the heights of the two subtrees of
    /// every node to differ by at most one, it requires the keys to be in order, the parent links
    /// to agree with the child links and every stored balance factor to match the measured
    /// heights.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert!(map.is_balanced());
    ///
    /// for i in 0..32 { map.insert(i, i); }
    /// assert!(map.is_balanced());
    ///
    /// for i in 0..16 { map.remove(&i); }
    /// assert!(map.is_balanced());
    /// assert_eq!(map.is_balanced(), map.validate().is_ok());
    /// ```
    pub fn is_balanced(&self) -> bool { self.validate().is_ok() }

    /// Checks if every path from the root of the tree to a leaf has the same length.
    ///
    /// This holds for an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_tree::Map::new();
    /// assert!(map.equal_paths());
    ///
    /// for i in 1..4 { map.insert(i, ()); }
    /// assert!(map.equal_paths());
    ///
    /// map.insert(4, ());
    /// assert!(!map.equal_paths());
    /// ```
    pub fn equal_paths(&self) -> bool { check::survey(&self.tree, &self.cmp).0.equal_paths() }

    fn key_value(&self, node: node::Link) -> Option<(&K, &V)> {
        node.map(|node| {
            let node = &self.tree[node];
            (&node.key, &node.value)
        })
    }

    fn key_value_mut(&mut self, node: node::Link) -> Option<(&K, &mut V)> {
        let node = &mut self.tree[node?];
        Some((&node.key, &mut node.value))
    }
}

impl<K, V, C> Debug for Map<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Default for Map<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { Map::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for Map<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for Map<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

impl<K, V, C> Hash for Map<K, V, C> where K: Hash, V: Hash, C: Compare<K> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        for e in self.iter() { e.hash(h); }
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for Map<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;
    fn index(&self, key: &Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for Map<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { self.into_iter() }
}

impl<K, V, C> PartialEq for Map<K, V, C> where V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(l, r)| {
            self.cmp.compares_eq(l.0, r.0) && l.1 == r.1
        })
    }
}

impl<K, V, C> Eq for Map<K, V, C> where V: Eq, C: Compare<K> {}

impl<K, V, C> PartialOrd for Map<K, V, C> where V: PartialOrd, C: Compare<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Some(Equal),
                (None, Some(_)) => return Some(Less),
                (Some(_), None) => return Some(Greater),
                (Some(l), Some(r)) => match self.cmp.compare(l.0, r.0) {
                    Equal => match l.1.partial_cmp(&r.1) {
                        Some(Equal) => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return Some(non_eq),
                },
            }
        }
    }
}

impl<K, V, C> Ord for Map<K, V, C> where V: Ord, C: Compare<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Equal,
                (None, Some(_)) => return Less,
                (Some(_), None) => return Greater,
                (Some(l), Some(r)) => match self.cmp.compare(l.0, r.0) {
                    Equal => match l.1.cmp(&r.1) {
                        Equal => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return non_eq,
                },
            }
        }
    }
}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`Map::into_iter`](struct.Map.html#method.into_iter) or the
/// `IntoIterator` trait:
///
/// ```
/// let mut map = avl_tree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
#[derive(Clone)]
pub struct IntoIter<K, V>(node::IntoIter<K, V>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the map's entries with immutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`Map::iter`](struct.Map.html#method.iter) or the `IntoIterator` trait:
///
/// ```
/// let mut map = avl_tree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in &map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct Iter<'a, K: 'a, V: 'a>(node::Iter<'a, K, V>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the map's entries with mutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`Map::iter_mut`](struct.Map.html#method.iter_mut) or the
/// `IntoIterator` trait:
///
/// ```
/// let mut map = avl_tree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in &mut map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct IterMut<'a, K: 'a, V: 'a>(node::IterMut<'a, K, V>);

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An iterator over the map's keys.
///
/// Acquire through [`Map::keys`](struct.Map.html#method.keys).
pub struct Keys<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self { Keys(self.0.clone()) }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> { self.0.next_back().map(|e| e.0) }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// An iterator over the map's values.
///
/// Acquire through [`Map::values`](struct.Map.html#method.values).
pub struct Values<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self { Values(self.0.clone()) }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// An entry in the map.
///
/// See [`Map::entry`](struct.Map.html#method.entry) for an example.
pub enum Entry<'a, K: 'a, V: 'a> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Returns the entry's value, inserting the given default if the entry is vacant.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(default),
        }
    }

    /// Returns the entry's value, inserting the given function's result if the entry is vacant.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V where F: FnOnce() -> V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(default()),
        }
    }
}

/// An occupied entry.
///
/// See [`Map::entry`](struct.Map.html#method.entry) for an example.
pub struct OccupiedEntry<'a, K: 'a, V: 'a> {
    tree: &'a mut Tree<K, V>,
    node: usize,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { &self.tree[self.node].key }

    /// Returns a reference to the entry's value.
    pub fn get(&self) -> &V { &self.tree[self.node].value }

    /// Returns a mutable reference to the entry's value.
    pub fn get_mut(&mut self) -> &mut V { &mut self.tree[self.node].value }

    /// Returns a mutable reference to the entry's value with the same lifetime as the map.
    pub fn into_mut(self) -> &'a mut V { &mut self.tree[self.node].value }

    /// Replaces the entry's value with the given value, returning the old one.
    pub fn insert(&mut self, value: V) -> V { replace(self.get_mut(), value) }

    /// Removes the entry from the map and returns its key and value.
    pub fn remove(self) -> (K, V) { self.tree.remove_node(self.node) }
}

/// A vacant entry.
///
/// See [`Map::entry`](struct.Map.html#method.entry) for an example.
pub struct VacantEntry<'a, K: 'a, V: 'a> {
    tree: &'a mut Tree<K, V>,
    slot: Option<(usize, Side)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { &self.key }

    /// Inserts the entry into the map with its key and the given value, returning a mutable
    /// reference to the value with the same lifetime as the map.
    pub fn insert(self, value: V) -> &'a mut V {
        let node = self.tree.insert_at(self.slot, self.key, value);
        &mut self.tree[node].value
    }
}
