use std::vec;
use super::{Left, Link, Right, Tree};

/// In-order iteration by chasing successor links from the minimum and predecessor links from the
/// maximum. `len` keeps the two ends from crossing.
pub struct Iter<'a, K: 'a, V: 'a> {
    tree: &'a Tree<K, V>,
    front: Link,
    back: Link,
    len: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(tree: &'a Tree<K, V>) -> Self {
        Iter {
            tree,
            front: tree.extremum::<Left>(tree.root),
            back: tree.extremum::<Right>(tree.root),
            len: tree.len(),
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter { tree: self.tree, front: self.front, back: self.back, len: self.len }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 { return None; }

        let tree = self.tree;
        let node = self.front?;
        self.front = tree.successor(node);
        self.len -= 1;

        let node = &tree[node];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 { return None; }

        let tree = self.tree;
        let node = self.back?;
        self.back = tree.predecessor(node);
        self.len -= 1;

        let node = &tree[node];
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// Mutable iteration. Handles are ordered up front so that each value can be lent out exactly
/// once.
pub struct IterMut<'a, K: 'a, V: 'a> {
    entries: Vec<Option<(&'a K, &'a mut V)>>,
    order: vec::IntoIter<usize>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub fn new(tree: &'a mut Tree<K, V>) -> Self {
        let order = tree.order().into_iter();
        IterMut { entries: tree.store.entries_mut(), order }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        let node = self.order.next()?;
        self.entries[node].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.order.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
        let node = self.order.next_back()?;
        self.entries[node].take()
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

#[derive(Clone)]
pub struct IntoIter<K, V> {
    entries: Vec<Option<(K, V)>>,
    order: vec::IntoIter<usize>,
}

impl<K, V> IntoIter<K, V> {
    pub fn new(tree: Tree<K, V>) -> Self {
        let order = tree.order().into_iter();
        IntoIter { entries: tree.store.into_entries(), order }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let node = self.order.next()?;
        self.entries[node].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.order.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        let node = self.order.next_back()?;
        self.entries[node].take()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// A position in a map, as returned by [`Map::find`](crate::Map::find).
///
/// A cursor borrows the map, so it cannot outlive a mutation of it.
pub struct Cursor<'a, K: 'a, V: 'a> {
    tree: &'a Tree<K, V>,
    node: usize,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(tree: &'a Tree<K, V>, node: usize) -> Self { Cursor { tree, node } }

    /// Returns the key at this position.
    pub fn key(&self) -> &'a K { let tree = self.tree; &tree[self.node].key }

    /// Returns the value at this position.
    pub fn value(&self) -> &'a V { let tree = self.tree; &tree[self.node].value }

    /// Returns the position of the next greater key, if any.
    pub fn next(&self) -> Option<Self> {
        self.tree.successor(self.node).map(|node| Cursor::new(self.tree, node))
    }

    /// Returns the position of the next smaller key, if any.
    pub fn prev(&self) -> Option<Self> {
        self.tree.predecessor(self.node).map(|node| Cursor::new(self.tree, node))
    }
}

impl<'a, K, V> Clone for Cursor<'a, K, V> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K, V> Copy for Cursor<'a, K, V> {}
