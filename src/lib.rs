//! This crate exposes a plain, unbalanced Binary Search Tree (BST) mostly for
//! educational purposes, along with a way to measure its shape and draw it.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! sometimes has child `Node`s. The invariants kept by this BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than or equal to its own key. Duplicates are kept, not
//!    rejected, and they pile up to the right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)`. Nothing here rebalances the tree so
//! inserting keys in sorted order yields a tree whose height equals its size.
//! BSTs naturally support sorted iteration by visiting the left subtree, then
//! the subtree root, then the right subtree.
//!
//! ## Internal Path Length
//!
//! The depth of a `Node` is the number of edges between it and the root. The
//! Internal Path Length (IPL) of a tree is the sum of the depths of all of its
//! `Node`s and is a handy single number describing how bushy (small IPL) or
//! stringy (large IPL) a tree is.
//!
//! ```
//! use bst_ipl::Tree;
//!
//! //        10
//! //       /  \
//! //      5    15
//! //     / \     \
//! //    2   7    20
//! let tree: Tree<i32> = [10, 5, 15, 2, 7, 20].into_iter().collect();
//!
//! assert_eq!(tree.ipl(), 0 + 1 + 1 + 2 + 2 + 2);
//! assert_eq!(tree.traverse().copied().collect::<Vec<_>>(), [2, 5, 7, 10, 15, 20]);
//! ```
//!
//! ## Visualization
//!
//! The [`dot`] module renders a tree as a Graphviz digraph.
//!
//! ## Shape over time
//!
//! The [`study`] module measures how the IPL of a tree drifts under random insert/delete pairs
//! with plain and symmetric deletion.

#![deny(missing_docs)]

pub mod dot;
pub mod study;
pub mod tree;

pub use dot::ExportError;
pub use tree::{Iter, Node, Replacement, Tree};
