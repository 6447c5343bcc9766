//! AVL rebalancing on top of the unbalanced tree core.
//!
//! Every node carries `balance = height(left) - height(right)`. After a node is linked in or
//! spliced out, `rebalance` walks from the mutation point toward the root, adjusting balance
//! factors and rotating where a factor reaches two, and stops as soon as the height of the
//! subtree it is looking at is known not to have changed.


use compare::Compare;
use std::mem;
use tracing::trace;
use crate::node::{Dir, Left, Right, Search, Side, Tree};

/// The kind of height change being propagated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// A subtree grew by one level.
    Insert,
    /// A subtree shrank by one level.
    Remove,
}

impl Mode {
    /// Returns the change in a parent's balance factor when its child on `side` changed height.
    pub fn delta(self, side: Side) -> i8 {
        match self {
            Mode::Insert => side.weight(),
            Mode::Remove => -side.weight(),
        }
    }
}

impl<K, V> Tree<K, V> {
    /// Rotates `pivot` down toward `D::Opposite`, raising its `D` child into its place, and
    /// returns the raised node.
    ///
    /// Balance factors are left to the caller.
    fn rotate<D: Dir>(&mut self, pivot: usize) -> usize {
        let raised = match D::forward(&self[pivot]) {
            Some(raised) => raised,
            None => panic!("cannot rotate node {}: no {:?} child", pivot, D::SIDE),
        };

        let inner = D::Opposite::forward(&self[raised]);
        let position = self.position(pivot);

        *D::forward_mut(&mut self[pivot]) = inner;
        if let Some(inner) = inner { self[inner].parent = Some(pivot); }

        *D::Opposite::forward_mut(&mut self[raised]) = Some(pivot);
        self[raised].parent = self[pivot].parent;
        self[pivot].parent = Some(raised);

        self.relink(position, Some(raised));

        trace!(pivot, raised, "raised {:?} child", D::SIDE);
        raised
    }

    /// Rotates `pivot` to the left, raising its right child. Panics if there is no right child.
    #[cfg(test)]
    pub fn rotate_left(&mut self, pivot: usize) -> usize { self.rotate::<Right>(pivot) }

    /// Rotates `pivot` to the right, raising its left child. Panics if there is no left child.
    #[cfg(test)]
    pub fn rotate_right(&mut self, pivot: usize) -> usize { self.rotate::<Left>(pivot) }

    /// Restores the balance of `node`, whose `D` subtree is two levels taller than the other.
    ///
    /// Returns the new root of the subtree and whether the rotation left the subtree one level
    /// shorter than it was while unbalanced.
    fn restore<D: Dir>(&mut self, node: usize) -> (usize, bool) {
        let heavy = D::SIDE.weight();

        let child = match D::forward(&self[node]) {
            Some(child) => child,
            None => panic!("node {} leans {:?} without a {:?} child", node, D::SIDE, D::SIDE),
        };

        let child_balance = self[child].balance;

        if child_balance != -heavy {
            let top = self.rotate::<D>(node);

            if child_balance == 0 {
                // only reachable while removing
                self[node].balance = heavy;
                self[top].balance = -heavy;
                trace!(node, top, "single rotation, height unchanged");
                (top, false)
            } else {
                self[node].balance = 0;
                self[top].balance = 0;
                trace!(node, top, "single rotation");
                (top, true)
            }
        } else {
            let grandchild = match D::Opposite::forward(&self[child]) {
                Some(grandchild) => grandchild,
                None => panic!("node {} leans against its parent {} without a child", child, node),
            };

            let grandchild_balance = self[grandchild].balance;

            self.rotate::<D::Opposite>(child);
            let top = self.rotate::<D>(node);
            debug_assert_eq!(top, grandchild);

            let (node_balance, child_balance) =
                if grandchild_balance == heavy {
                    (-heavy, 0)
                } else if grandchild_balance == 0 {
                    (0, 0)
                } else {
                    (0, heavy)
                };

            self[node].balance = node_balance;
            self[child].balance = child_balance;
            self[top].balance = 0;

            trace!(node, child, top, "double rotation");
            (top, true)
        }
    }

    /// Propagates a one-level height change upward, starting at `node`, whose balance factor
    /// changes by `delta`.
    pub fn rebalance(&mut self, mut node: usize, mut delta: i8, mode: Mode) {
        loop {
            let balance = self[node].balance + delta;
            self[node].balance = balance;

            let top = match (balance, mode) {
                (0, Mode::Insert) | (1, Mode::Remove) | (-1, Mode::Remove) => {
                    trace!(node, balance, ?mode, "height change absorbed");
                    return;
                }
                (0, Mode::Remove) | (1, Mode::Insert) | (-1, Mode::Insert) => node,
                (2, _) | (-2, _) => {
                    let (top, shrank) =
                        if balance > 0 {
                            self.restore::<Left>(node)
                        } else {
                            self.restore::<Right>(node)
                        };

                    if mode == Mode::Insert || !shrank { return; }
                    top
                }
                _ => panic!("node {} reached balance factor {}", node, balance),
            };

            match self.position(top) {
                None => {
                    trace!(root = top, ?mode, "height change reached the root");
                    return;
                }
                Some((parent, side)) => {
                    delta = mode.delta(side);
                    node = parent;
                }
            }
        }
    }

    /// Exchanges the tree positions of two nodes. Balance factors describe positions, not keys,
    /// so they are exchanged too.
    pub fn swap_balanced(&mut self, n1: usize, n2: usize) {
        self.swap(n1, n2);

        let balance = self[n1].balance;
        self[n1].balance = self[n2].balance;
        self[n2].balance = balance;
    }

    /// Inserts an entry, or overwrites the value of an existing key without touching the tree's
    /// shape. Returns the previous value, if any.
    pub fn insert<C>(&mut self, cmp: &C, key: K, value: V) -> Option<V> where C: Compare<K> {
        match self.search(cmp, &key) {
            Search::Found(node) => Some(mem::replace(&mut self[node].value, value)),
            Search::Vacant(slot) => {
                self.insert_at(slot, key, value);
                None
            }
        }
    }

    /// Links a new node into an empty slot found by `search` and rebalances above it. Returns
    /// the new node.
    pub fn insert_at(&mut self, slot: Option<(usize, Side)>, key: K, value: V) -> usize {
        let node = self.attach(slot, key, value);

        if let Some((parent, side)) = slot {
            self.rebalance(parent, Mode::Insert.delta(side), Mode::Insert);
        }

        node
    }

    /// Removes the entry with the given key, if present.
    pub fn remove<C, Q: ?Sized>(&mut self, cmp: &C, key: &Q) -> Option<(K, V)>
        where C: Compare<Q, K> {

        self.find(cmp, key).map(|node| self.remove_node(node))
    }

    /// Removes the given node from the tree and rebalances above the position it vacated.
    pub fn remove_node(&mut self, node: usize) -> (K, V) {
        // move the node down into its predecessor's position until it can be spliced out
        while let (Some(left), Some(_)) = (self[node].left, self[node].right) {
            let pred = self.last::<Right>(left);
            self.swap_balanced(node, pred);
        }

        let (removed, position) = self.splice(node);

        if let Some((parent, side)) = position {
            self.rebalance(parent, Mode::Remove.delta(side), Mode::Remove);
        }

        (removed.key, removed.value)
    }
}
