mod iter;


use compare::Compare;
use std::cmp::Ordering::*;
use std::mem;
use std::ops;
use tracing::trace;

pub use self::iter::{Cursor, IntoIter, Iter, IterMut};

/// A handle to a node in the store, or `None` for an empty subtree.
pub type Link = Option<usize>;

/// The child slot a node occupies under its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The change in the parent's balance factor when this side grows by one level.
    pub fn weight(self) -> i8 {
        match self {
            Side::Left => 1,
            Side::Right => -1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    /// Height of the left subtree minus height of the right subtree.
    pub balance: i8,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Link) -> Self {
        Node { key, value, balance: 0, parent, left: None, right: None }
    }

    pub fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    /// A free slot, linked to the next free slot.
    Vacant(Link),
}

/// Owns every node of a tree. Freed slots are threaded into a free list and reused before the
/// arena grows.
#[derive(Clone, Debug)]
pub struct Store<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Link,
    len: usize,
}

impl<K, V> Store<K, V> {
    pub fn new() -> Self {
        Store { slots: vec![], free: None, len: 0 }
    }

    /// Returns the number of live nodes.
    pub fn len(&self) -> usize { self.len }

    pub fn alloc(&mut self, node: Node<K, V>) -> usize {
        self.len += 1;

        match self.free {
            Some(handle) => {
                let next = match mem::replace(&mut self.slots[handle], Slot::Occupied(node)) {
                    Slot::Vacant(next) => next,
                    Slot::Occupied(_) => panic!("free list names live node {}", handle),
                };
                self.free = next;
                handle
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    pub fn dealloc(&mut self, handle: usize) -> Node<K, V> {
        match mem::replace(&mut self.slots[handle], Slot::Vacant(self.free)) {
            Slot::Occupied(node) => {
                self.free = Some(handle);
                self.len -= 1;
                node
            }
            Slot::Vacant(next) => {
                self.slots[handle] = Slot::Vacant(next);
                panic!("node {} freed twice", handle)
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }

    /// Returns every live entry indexed by handle, with mutable references to the values.
    pub fn entries_mut(&mut self) -> Vec<Option<(&K, &mut V)>> {
        self.slots.iter_mut().map(|slot| match slot {
            Slot::Occupied(node) => Some((&node.key, &mut node.value)),
            Slot::Vacant(_) => None,
        }).collect()
    }

    /// Consumes the store, returning every live entry indexed by handle.
    pub fn into_entries(self) -> Vec<Option<(K, V)>> {
        self.slots.into_iter().map(|slot| match slot {
            Slot::Occupied(node) => Some((node.key, node.value)),
            Slot::Vacant(_) => None,
        }).collect()
    }
}

impl<K, V> ops::Index<usize> for Store<K, V> {
    type Output = Node<K, V>;

    fn index(&self, handle: usize) -> &Node<K, V> {
        match self.slots[handle] {
            Slot::Occupied(ref node) => node,
            Slot::Vacant(_) => panic!("dangling node handle {}", handle),
        }
    }
}

impl<K, V> ops::IndexMut<usize> for Store<K, V> {
    fn index_mut(&mut self, handle: usize) -> &mut Node<K, V> {
        match self.slots[handle] {
            Slot::Occupied(ref mut node) => node,
            Slot::Vacant(_) => panic!("dangling node handle {}", handle),
        }
    }
}

/// The outcome of a key search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Search {
    /// The node holding the key.
    Found(usize),
    /// The empty child slot the key belongs in, or `None` if the tree is empty.
    Vacant(Option<(usize, Side)>),
}

/// A binary search tree with parent links. Nothing here knows about balance factors beyond
/// carrying them along with the nodes.
#[derive(Clone, Debug)]
pub struct Tree<K, V> {
    pub store: Store<K, V>,
    pub root: Link,
}

impl<K, V> ops::Index<usize> for Tree<K, V> {
    type Output = Node<K, V>;
    fn index(&self, handle: usize) -> &Node<K, V> { &self.store[handle] }
}

impl<K, V> ops::IndexMut<usize> for Tree<K, V> {
    fn index_mut(&mut self, handle: usize) -> &mut Node<K, V> { &mut self.store[handle] }
}

impl<K, V> Tree<K, V> {
    pub fn new() -> Self {
        Tree { store: Store::new(), root: None }
    }

    pub fn len(&self) -> usize { self.store.len() }

    pub fn clear(&mut self) {
        self.store.clear();
        self.root = None;
    }

    pub fn find<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Link where C: Compare<Q, K> {
        match self.search(cmp, key) {
            Search::Found(node) => Some(node),
            Search::Vacant(_) => None,
        }
    }

    pub fn search<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Search where C: Compare<Q, K> {
        let mut slot = None;
        let mut link = self.root;

        while let Some(node) = link {
            let side = match cmp.compare(key, &self[node].key) {
                Equal => return Search::Found(node),
                Less => Side::Left,
                Greater => Side::Right,
            };

            slot = Some((node, side));
            link = self[node].child(side);
        }

        Search::Vacant(slot)
    }

    /// Links a new node with balance factor zero into the given empty slot.
    pub fn attach(&mut self, slot: Option<(usize, Side)>, key: K, value: V) -> usize {
        let node = self.store.alloc(Node::new(key, value, slot.map(|(parent, _)| parent)));

        match slot {
            None => {
                debug_assert!(self.root.is_none());
                self.root = Some(node);
            }
            Some((parent, side)) => {
                debug_assert!(self[parent].child(side).is_none());
                *self[parent].child_mut(side) = Some(node);
            }
        }

        node
    }

    /// Returns the node's parent and the side of the parent it hangs from, or `None` for the
    /// root.
    pub fn position(&self, node: usize) -> Option<(usize, Side)> {
        self[node].parent.map(|parent| {
            if self[parent].left == Some(node) {
                (parent, Side::Left)
            } else {
                (parent, Side::Right)
            }
        })
    }

    /// Points the given position (a parent's child slot, or the root) at `link`. Does not touch
    /// `link`'s parent.
    pub fn relink(&mut self, position: Option<(usize, Side)>, link: Link) {
        match position {
            None => self.root = link,
            Some((parent, side)) => *self[parent].child_mut(side) = link,
        }
    }

    pub fn extremum<D: Dir>(&self, link: Link) -> Link {
        link.map(|node| self.last::<D>(node))
    }

    /// Returns the node furthest from `node` in direction `D` within its subtree.
    pub fn last<D: Dir>(&self, mut node: usize) -> usize {
        while let Some(child) = D::forward(&self[node]) { node = child; }
        node
    }

    /// Returns the in-order neighbor of the node in direction `D`.
    pub fn step<D: Dir>(&self, mut node: usize) -> Link {
        if let Some(child) = D::forward(&self[node]) {
            return Some(self.last::<D::Opposite>(child));
        }

        let mut ancestor = self[node].parent;

        while let Some(parent) = ancestor {
            if D::forward(&self[parent]) != Some(node) { break; }
            node = parent;
            ancestor = self[parent].parent;
        }

        ancestor
    }

    pub fn predecessor(&self, node: usize) -> Link { self.step::<Left>(node) }

    pub fn successor(&self, node: usize) -> Link { self.step::<Right>(node) }

    /// Returns the node whose key is closest to `key` in direction `D`: the greatest smaller key
    /// for `Left`, the smallest greater key for `Right`. If `inclusive` is `true`, a node whose
    /// key equals `key` is returned instead.
    pub fn neighbor<D: Dir, C, Q: ?Sized>(&self, cmp: &C, key: &Q, inclusive: bool) -> Link
        where C: Compare<Q, K> {

        let mut closest = None;
        let mut link = self.root;

        while let Some(node) = link {
            match cmp.compare(key, &self[node].key) {
                Equal => return
                    if inclusive {
                        Some(node)
                    } else {
                        self.extremum::<D::Opposite>(D::forward(&self[node])).or(closest)
                    },
                order => link =
                    if (order == Greater) == (D::SIDE == Side::Left) {
                        closest = Some(node);
                        D::Opposite::forward(&self[node])
                    } else {
                        D::forward(&self[node])
                    },
            }
        }

        closest
    }

    /// Returns every node handle in key order.
    pub fn order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        let mut link = self.extremum::<Left>(self.root);

        while let Some(node) = link {
            order.push(node);
            link = self.successor(node);
        }

        order
    }

    /// Exchanges the tree positions of two nodes, leaving their keys, values and balance factors
    /// where they are.
    pub fn swap(&mut self, n1: usize, n2: usize) {
        if n1 == n2 { return; }

        trace!(n1, n2, "swapping nodes");

        let (p1, l1, r1) = (self[n1].parent, self[n1].left, self[n1].right);
        let (p2, l2, r2) = (self[n2].parent, self[n2].left, self[n2].right);
        let pos1 = self.position(n1);
        let pos2 = self.position(n2);

        {
            let node = &mut self[n1];
            node.parent = p2;
            node.left = l2;
            node.right = r2;
        }

        {
            let node = &mut self[n2];
            node.parent = p1;
            node.left = l1;
            node.right = r1;
        }

        // adjacent nodes would otherwise end up pointing at themselves
        if r1 == Some(n2) {
            self[n2].right = Some(n1);
            self[n1].parent = Some(n2);
        } else if r2 == Some(n1) {
            self[n1].right = Some(n2);
            self[n2].parent = Some(n1);
        } else if l1 == Some(n2) {
            self[n2].left = Some(n1);
            self[n1].parent = Some(n2);
        } else if l2 == Some(n1) {
            self[n1].left = Some(n2);
            self[n2].parent = Some(n1);
        }

        if let Some((parent, side)) = pos1 {
            if parent != n2 { *self[parent].child_mut(side) = Some(n2); }
        }

        for &child in &[l1, r1] {
            if let Some(child) = child {
                if child != n2 { self[child].parent = Some(n2); }
            }
        }

        if let Some((parent, side)) = pos2 {
            if parent != n1 { *self[parent].child_mut(side) = Some(n1); }
        }

        for &child in &[l2, r2] {
            if let Some(child) = child {
                if child != n1 { self[child].parent = Some(n1); }
            }
        }

        if self.root == Some(n1) {
            self.root = Some(n2);
        } else if self.root == Some(n2) {
            self.root = Some(n1);
        }
    }

    /// Unlinks and frees a node with at most one child, moving that child into its place.
    ///
    /// Returns the node and the position it was removed from, or `None` if it was the root.
    pub fn splice(&mut self, node: usize) -> (Node<K, V>, Option<(usize, Side)>) {
        let (left, right) = (self[node].left, self[node].right);
        assert!(left.is_none() || right.is_none(), "spliced node {} has two children", node);

        let child = left.or(right);
        let position = self.position(node);

        if let Some(child) = child { self[child].parent = self[node].parent; }
        self.relink(position, child);

        (self.store.dealloc(node), position)
    }
}

/// A direction in the tree, used to write mirror-image algorithms once.
pub trait Dir: Sized {
    type Opposite: Dir<Opposite = Self>;

    const SIDE: Side;

    fn forward<K, V>(node: &Node<K, V>) -> Link { node.child(Self::SIDE) }

    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link { node.child_mut(Self::SIDE) }
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;
    const SIDE: Side = Side::Left;
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;
    const SIDE: Side = Side::Right;
}
