use thiserror::Error;

/// The result of checking a tree's invariants.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A violated tree invariant, as reported by [`crate::Map::validate`].
///
/// Nodes are identified by their handle in the map's node store.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A key is not strictly between the keys bounding its subtree.
    #[error("node {node} is out of order with respect to its ancestors")]
    Order { node: usize },

    /// A child does not point back at the node that owns it.
    #[error("node {node} records parent {recorded:?} but is owned by {actual:?}")]
    Parent {
        node: usize,
        recorded: Option<usize>,
        actual: Option<usize>,
    },

    /// The root node records a parent.
    #[error("root node {node} has parent {parent}")]
    Root { node: usize, parent: usize },

    /// A stored balance factor disagrees with the measured subtree heights.
    #[error("node {node} records balance {recorded} but its subtrees differ by {actual}")]
    BalanceMismatch { node: usize, recorded: i8, actual: isize },

    /// The subtree heights of a node differ by more than one.
    #[error("node {node} is unbalanced: its subtrees differ by {actual}")]
    Unbalanced { node: usize, actual: isize },
}
