//! An owning, unbalanced BST. Every `Node` is the sole owner of its two children so dropping a
//! subtree releases all of it, and mutations hand subtrees back and forth instead of patching
//! pointers in place.
//!
//! # Examples
//!
//! ```
//! use bst_ipl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//!
//! tree.insert(1);
//! assert!(tree.search(&1));
//!
//! // Inserting the same key again adds a second node.
//! tree.insert(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Deleting removes one node at a time.
//! assert!(tree.delete(&1));
//! assert!(tree.search(&1));
//! assert!(tree.delete(&1));
//! assert!(!tree.search(&1));
//!
//! // Deleting something that isn't there is a no-op.
//! assert!(!tree.delete(&1));
//! ```
//!
//! # Symmetric deletion
//!
//! [`Tree::delete`] always fills the hole left by a node with two children using its in-order
//! successor, which over many insert/delete pairs drags the tree to the left and grows its IPL.
//! [`Tree::delete_symmetric`] alternates between the successor and the in-order predecessor to
//! avoid that drift.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

/// An owning link to a child subtree. `None` marks an empty subtree.
type Link<K> = Option<Box<Node<K>>>;

/// An unbalanced Binary Search Tree of keys. Keys equal to a node's key are stored in that
/// node's right subtree so duplicates are allowed.
///
/// Two trees compare equal when they have the same shape and the same keys in the same places.
#[derive(Clone)]
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
    /// What [`Tree::delete_symmetric`] uses next.
    next_replacement: Replacement,
}

/// Which neighbour takes the place of a deleted node that has two children.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// The smallest key in the right subtree.
    Successor,
    /// The largest key in the left subtree.
    Predecessor,
}

impl Replacement {
    fn flip(self) -> Self {
        match self {
            Replacement::Successor => Replacement::Predecessor,
            Replacement::Predecessor => Replacement::Successor,
        }
    }
}

impl<K> PartialEq for Tree<K>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<K> Eq for Tree<K> where K: Eq {}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.traverse()).finish()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            next_replacement: Replacement::Successor,
        }
    }

    /// Returns how many nodes are in the tree. Duplicate keys each count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Read-only access to the root node, if there is one.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Inserts a key into the tree. Keys smaller than a node's key go to its left, everything
    /// else (including an equal key) goes to its right. Nothing is ever rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_ipl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.traverse().collect::<Vec<_>>(), [&1, &2, &2]);
    /// ```
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        self.root = Some(Node::insert(self.root.take(), key));
        self.len += 1;
    }

    /// Deletes one node containing the given key and returns whether anything was deleted. If the
    /// key appears more than once only the node closest to the root is removed.
    ///
    /// A node with two children takes the key of its in-order successor (the smallest key in its
    /// right subtree) and the successor's node is removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_ipl::Tree;
    ///
    /// let mut tree: Tree<_> = [10, 5, 15, 12, 20].into_iter().collect();
    ///
    /// assert!(tree.delete(&10));
    /// assert_eq!(tree.root().map(|n| n.key()), Some(&12));
    /// assert!(!tree.delete(&42));
    /// ```
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        self.delete_with(key, Replacement::Successor)
    }

    /// Like [`Tree::delete`] but a node with two children is replaced by the given neighbour.
    ///
    /// The predecessor is skipped in favour of the successor when the largest key of the left
    /// subtree appears more than once, since moving one copy up would leave an equal key on the
    /// left.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_ipl::{Replacement, Tree};
    ///
    /// let mut tree: Tree<_> = [10, 5, 15, 7, 12].into_iter().collect();
    ///
    /// assert!(tree.delete_with(&10, Replacement::Predecessor));
    /// assert_eq!(tree.root().map(|n| n.key()), Some(&7));
    /// ```
    pub fn delete_with(&mut self, key: &K, replacement: Replacement) -> bool
    where
        K: Ord,
    {
        let (root, deleted) = Node::delete(self.root.take(), key, replacement);
        self.root = root;
        if deleted {
            self.len -= 1;
        }
        deleted
    }

    /// Deletes like [`Tree::delete_with`], alternating between the successor and the predecessor
    /// on every call. The first call uses the successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_ipl::Tree;
    ///
    /// let mut tree: Tree<_> = [10, 5, 15, 12, 7].into_iter().collect();
    ///
    /// // Successor first...
    /// assert!(tree.delete_symmetric(&10));
    /// assert_eq!(tree.root().map(|n| n.key()), Some(&12));
    ///
    /// // ...then the predecessor.
    /// assert!(tree.delete_symmetric(&12));
    /// assert_eq!(tree.root().map(|n| n.key()), Some(&7));
    /// ```
    pub fn delete_symmetric(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let replacement = self.next_replacement;
        self.next_replacement = replacement.flip();
        self.delete_with(key, replacement)
    }

    /// Returns whether the key is somewhere in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_ipl::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 4].into_iter().collect();
    ///
    /// assert!(tree.search(&4));
    /// assert!(!tree.search(&2));
    /// ```
    pub fn search(&self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right(),
            };
        }
        false
    }

    /// Returns an iterator over the keys in order. Each call starts a fresh walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_ipl::Tree;
    ///
    /// let tree: Tree<_> = [10, 5, 15, 2, 7, 20].into_iter().collect();
    ///
    /// assert_eq!(tree.traverse().copied().collect::<Vec<_>>(), [2, 5, 7, 10, 15, 20]);
    /// ```
    pub fn traverse(&self) -> Iter<'_, K> {
        Iter::new(self.root())
    }

    /// Computes the Internal Path Length: the sum, over every node, of its depth. The root has
    /// depth 0 and an empty tree has an IPL of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_ipl::Tree;
    ///
    /// //        10
    /// //       /  \
    /// //      5    15
    /// //     / \     \
    /// //    2   7    20
    /// let tree: Tree<_> = [10, 5, 15, 2, 7, 20].into_iter().collect();
    ///
    /// assert_eq!(tree.ipl(), 8);
    /// ```
    pub fn ipl(&self) -> usize {
        self.root().map_or(0, |root| root.ipl(0))
    }

    /// Gets the number of levels in this tree. An empty tree has a height of 0 and a tree with
    /// only a root has a height of 1.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(&node.key)
    }

    /// The largest key in the tree. With duplicates this is the one inserted last.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.key)
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

/// A `Node` has a key that is used for searching/sorting and up to two children.
#[derive(Clone, PartialEq, Eq)]
pub struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the subtree `link` with `key` added at the first empty spot on its search path.
    fn insert(link: Link<K>, key: K) -> Box<Self>
    where
        K: Ord,
    {
        match link {
            None => Self::new_boxed(key),
            Some(mut node) => {
                if key < node.key {
                    node.left = Some(Self::insert(node.left.take(), key));
                } else {
                    node.right = Some(Self::insert(node.right.take(), key));
                }
                node
            }
        }
    }

    /// Returns the subtree `link` without one node holding `key`, and whether such a node was
    /// found.
    fn delete(link: Link<K>, key: &K, replacement: Replacement) -> (Link<K>, bool)
    where
        K: Ord,
    {
        let mut node = match link {
            Some(node) => node,
            None => return (None, false),
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, deleted) = Self::delete(node.left.take(), key, replacement);
                node.left = left;
                (Some(node), deleted)
            }
            Ordering::Greater => {
                let (right, deleted) = Self::delete(node.right.take(), key, replacement);
                node.right = right;
                (Some(node), deleted)
            }
            Ordering::Equal => (node.unlink(replacement), true),
        }
    }

    /// Removes this node from its subtree and returns whatever should take its place.
    fn unlink(mut self: Box<Self>, replacement: Replacement) -> Link<K>
    where
        K: Ord,
    {
        match (self.left.take(), self.right.take()) {
            (None, None) => {
                debug!("deleted a leaf");
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                debug!("deleted a node with one child, promoting the child");
                Some(child)
            }
            // Every key in the left subtree is < the predecessor once it is the only copy of the
            // largest key, so the predecessor can stand in for this node.
            (Some(left), Some(right))
                if replacement == Replacement::Predecessor && left.largest_is_unique() =>
            {
                debug!("deleted a node with two children, promoting its predecessor");
                let (predecessor, left) = left.take_largest();
                self.key = predecessor;
                self.left = left;
                self.right = Some(right);
                Some(self)
            }
            // Every key in the right subtree is >= the successor, and every key on the way down
            // to it is strictly greater, so the successor can stand in for this node.
            (Some(left), Some(right)) => {
                debug!("deleted a node with two children, promoting its successor");
                let (successor, right) = right.take_smallest();
                self.key = successor;
                self.left = Some(left);
                self.right = right;
                Some(self)
            }
        }
    }

    /// Returns the key of the leftmost node and this subtree without that node.
    fn take_smallest(mut self: Box<Self>) -> (K, Link<K>) {
        match self.left.take() {
            None => {
                trace!("found the smallest node of a subtree");
                let Node { key, right, .. } = *self;
                (key, right)
            }
            Some(left) => {
                let (smallest, left) = left.take_smallest();
                self.left = left;
                (smallest, Some(self))
            }
        }
    }

    /// Returns the key of the rightmost node and this subtree without that node.
    fn take_largest(mut self: Box<Self>) -> (K, Link<K>) {
        match self.right.take() {
            None => {
                trace!("found the largest node of a subtree");
                let Node { key, left, .. } = *self;
                (key, left)
            }
            Some(right) => {
                let (largest, right) = right.take_largest();
                self.right = right;
                (largest, Some(self))
            }
        }
    }

    /// Whether the rightmost node holds the only copy of the largest key. Keys down the right
    /// spine never decrease, so any other copy would be the rightmost node's parent.
    fn largest_is_unique(&self) -> bool
    where
        K: Ord,
    {
        let mut parent = self;
        let mut node = match self.right() {
            Some(right) => right,
            None => return true,
        };
        while let Some(right) = node.right() {
            parent = node;
            node = right;
        }
        parent.key != node.key
    }

    /// Sum of the depths in this subtree, given that this node sits at `depth`.
    fn ipl(&self, depth: usize) -> usize {
        depth
            + self.left().map_or(0, |left| left.ipl(depth + 1))
            + self.right().map_or(0, |right| right.ipl(depth + 1))
    }

    fn height(&self) -> usize {
        let left = self.left().map_or(0, Self::height);
        let right = self.right().map_or(0, Self::height);
        left.max(right) + 1
    }
}

/// In-order iterator over the keys of a [`Tree`], created by [`Tree::traverse`].
///
/// Only the path to the next key is kept around, so it uses `O(height)` memory.
pub struct Iter<'a, K> {
    /// Nodes whose key has not been yielded yet but whose left subtree has been pushed.
    stack: Vec<&'a Node<K>>,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K> Iter<'a, K> {
    fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.key)
    }
}


#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and to a sorted `Vec` acting as a multiset.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same keys, duplicates included.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, model: &mut Vec<K>)
    where
        K: Ord + Clone + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    bst.insert(k.clone());
                    let at = model.partition_point(|x| x <= k);
                    model.insert(at, k.clone());
                }
                Op::Delete(k) | Op::DeleteSymmetric(k) => {
                    let expected = match model.binary_search(k) {
                        Ok(at) => {
                            model.remove(at);
                            true
                        }
                        Err(_) => false,
                    };
                    let deleted = match op {
                        Op::DeleteSymmetric(_) => bst.delete_symmetric(k),
                        _ => bst.delete(k),
                    };
                    assert_eq!(deleted, expected);
                }
                Op::Search(k) => {
                    assert_eq!(bst.search(k), model.binary_search(k).is_ok());
                }
                Op::Iter => {
                    assert!(bst.traverse().eq(model.iter()));
                }
            }
        }
    }

    /// Sum of depths found level by level: every node on level `d` adds `d`.
    fn level_order_ipl(tree: &Tree<i8>) -> usize {
        let mut level: Vec<&Node<i8>> = tree.root().into_iter().collect();
        let mut depth = 0;
        let mut ipl = 0;
        while !level.is_empty() {
            ipl += depth * level.len();
            level = level
                .iter()
                .flat_map(|n| n.left().into_iter().chain(n.right()))
                .collect();
            depth += 1;
        }
        ipl
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = Vec::new();

            do_ops(&ops, &mut tree, &mut model);
            tree.len() == model.len() && tree.traverse().eq(model.iter())
        }
    }

    quickcheck::quickcheck! {
        fn mixed_deletes_keep_order(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = Vec::new();

            do_ops(&ops, &mut tree, &mut model);
            super::tests::assert_ordered(&tree);
            tree.len() == model.len()
        }
    }

    quickcheck::quickcheck! {
        fn ipl_matches_depth_sum(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.into_iter().collect();

            tree.ipl() == level_order_ipl(&tree)
        }
    }

    quickcheck::quickcheck! {
        fn height_bounds(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();

            tree.height() <= xs.len() && (xs.is_empty() || tree.height() >= 1)
        }
    }
}
