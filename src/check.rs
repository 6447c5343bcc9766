//! Structural checks that recompute everything from the links alone, independently of the
//! balance factors maintained by the rebalancing code.

use compare::Compare;
use std::cmp::{max, min, Ordering::Less};
use crate::error::Error;
use crate::node::{Link, Tree};

/// The measured shape of a subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    /// The number of levels; zero for an empty subtree.
    pub height: usize,
    /// The depths of the shallowest and deepest leaves, counted from the subtree's root, or
    /// `None` for an empty subtree.
    pub leaves: Option<(usize, usize)>,
}

impl Shape {
    /// Checks if every path from the root to a leaf has the same length.
    pub fn equal_paths(&self) -> bool {
        self.leaves.map_or(true, |(shallowest, deepest)| shallowest == deepest)
    }
}

/// Measures the whole tree, returning its shape and the first invariant violation found, if any.
pub fn survey<K, V, C>(tree: &Tree<K, V>, cmp: &C) -> (Shape, Option<Error>)
    where C: Compare<K> {

    let mut violation = None;

    if let Some(root) = tree.root {
        if let Some(parent) = tree[root].parent {
            violation = Some(Error::Root { node: root, parent });
        }
    }

    let shape = walk(tree, cmp, tree.root, None, None, &mut violation);
    (shape, violation)
}

fn walk<'a, K, V, C>(tree: &'a Tree<K, V>, cmp: &C, link: Link, lower: Option<&'a K>,
                     upper: Option<&'a K>, violation: &mut Option<Error>) -> Shape
    where C: Compare<K> {

    let handle = match link {
        None => return Shape { height: 0, leaves: None },
        Some(handle) => handle,
    };

    let node = &tree[handle];

    if lower.map_or(false, |lower| cmp.compare(lower, &node.key) != Less) ||
       upper.map_or(false, |upper| cmp.compare(&node.key, upper) != Less) {
        report(violation, Error::Order { node: handle });
    }

    for &child in &[node.left, node.right] {
        if let Some(child) = child {
            let recorded = tree[child].parent;
            if recorded != Some(handle) {
                report(violation, Error::Parent { node: child, recorded, actual: Some(handle) });
            }
        }
    }

    let left = walk(tree, cmp, node.left, lower, Some(&node.key), violation);
    let right = walk(tree, cmp, node.right, Some(&node.key), upper, violation);

    let actual = left.height as isize - right.height as isize;

    if actual.abs() > 1 {
        report(violation, Error::Unbalanced { node: handle, actual });
    } else if actual != node.balance as isize {
        report(violation, Error::BalanceMismatch { node: handle, recorded: node.balance, actual });
    }

    let leaves = match (left.leaves, right.leaves) {
        (None, None) => (0, 0),
        (Some((shallowest, deepest)), None) | (None, Some((shallowest, deepest))) =>
            (shallowest + 1, deepest + 1),
        (Some(l), Some(r)) => (min(l.0, r.0) + 1, max(l.1, r.1) + 1),
    };

    Shape { height: max(left.height, right.height) + 1, leaves: Some(leaves) }
}

/// Keeps the first violation found.
fn report(violation: &mut Option<Error>, error: Error) {
    if violation.is_none() { *violation = Some(error); }
}
