//! An ordered map based on an AVL-balanced binary search tree.
//!
//! Keys are ordered by a [`compare::Compare`](https://docs.rs/compare) comparator, which defaults
//! to the keys' natural order. Every insertion and removal restores the AVL invariant on its way
//! back to the root, so the tree never grows deeper than about `1.44 * log2(n + 2)` levels.
//!
//! # Examples
//!
//! ```
//! let mut map = avl_tree::Map::new();
//!
//! for i in 1..8 { map.insert(i, i * 10); }
//!
//! assert_eq!(map.get(&4), Some(&40));
//! assert_eq!(map.height(), 3);
//! assert!(map.equal_paths());
//!
//! assert_eq!(map.remove(&1), Some((1, 10)));
//! assert!(map.equal_paths());
//!
//! assert_eq!(map.remove(&3), Some((3, 30)));
//! assert!(!map.equal_paths());
//! assert!(map.is_balanced());
//! ```

mod balance;
mod check;
mod error;
mod node;

pub mod map;

#[cfg(feature = "quickcheck")]
mod quickcheck;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

pub use error::{Error, Result};
pub use map::Map;
