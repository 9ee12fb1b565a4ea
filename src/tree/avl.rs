// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// AVL-balanced binary search tree over any `Node` implementation

use std::cmp::Ordering;
use std::collections::VecDeque;

use super::node::{link_height, DefaultNode, Link, Node, NodeFactory, NodeView};

/// Side of a node on which a structural change happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Self-balancing ordered container.
///
/// Every node keeps `|height(left) - height(right)| <= 1` and payloads are
/// strictly ordered, so duplicates are silently ignored on insert.
///
/// # Example
/// ```
/// use sensitive_word_filter::tree::{AvlTree, DefaultNode};
///
/// let mut tree: AvlTree<DefaultNode<i32>, _> = AvlTree::new(DefaultNode::new);
/// for value in [6, 2, 2, 1, 3, 7] {
///     tree.insert(value);
/// }
/// assert_eq!(tree.count(), 5);
/// assert_eq!(tree.min_value(), Some(&1));
/// assert_eq!(tree.max_value(), Some(&7));
/// ```
///
/// Stored nodes are only handed out by shared reference, so outside code
/// cannot relink them behind the tree's back:
///
/// ```compile_fail
/// use sensitive_word_filter::tree::{Node, OrderedTree};
///
/// let mut tree = OrderedTree::ordered();
/// for value in 1..=7 {
///     tree.insert(value);
/// }
/// tree.search_mut(&4).and_then(|node| node.left_mut().take());
/// ```
pub struct AvlTree<N: Node, F> {
    root: Link<N>,
    factory: F,
    count: usize,
}

/// Tree of [`DefaultNode`]s built with a plain function pointer factory.
pub type OrderedTree<T> = AvlTree<DefaultNode<T>, fn(T) -> DefaultNode<T>>;

impl<T: Ord> OrderedTree<T> {
    pub fn ordered() -> Self {
        AvlTree::new(DefaultNode::new as fn(T) -> DefaultNode<T>)
    }
}

impl<N, F> Default for AvlTree<N, F>
where
    N: Node,
    F: NodeFactory<N> + Default,
{
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<N, F> AvlTree<N, F>
where
    N: Node,
    F: NodeFactory<N>,
{
    pub fn new(factory: F) -> Self {
        Self {
            root: None,
            factory,
            count: 0,
        }
    }

    /// Insert `value`; a no-op when an equal payload already exists.
    pub fn insert(&mut self, value: N::Value) {
        let mut inserted = false;
        let root = self.root.take();
        self.root = Some(insert_node(root, value, &self.factory, &mut inserted));
        if inserted {
            self.count += 1;
        }
    }

    /// Node holding a payload equal to `value`, if any.
    pub fn search(&self, value: &N::Value) -> Option<&N> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(node.value()) {
                Ordering::Less => node.left().as_deref(),
                Ordering::Greater => node.right().as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Mutable access to a node's non-structural state.
    ///
    /// Callers must not alter the node's payload ordering or its child links.
    pub(crate) fn search_mut(&mut self, value: &N::Value) -> Option<&mut N> {
        find_mut(&mut self.root, value)
    }

    /// Remove `value`; a no-op when it is absent.
    pub fn delete(&mut self, value: &N::Value) {
        let mut deleted = false;
        let root = self.root.take();
        self.root = delete_node(root, value, &mut deleted);
        if deleted {
            self.count -= 1;
        }
    }

    /// Delete `old_value`, then insert `new_value`.
    ///
    /// Not atomic: between the two steps neither value is present.
    pub fn update(&mut self, new_value: N::Value, old_value: &N::Value) {
        self.delete(old_value);
        self.insert(new_value);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root (0 for an empty tree).
    pub fn height(&self) -> usize {
        link_height(&self.root)
    }

    pub fn min_value(&self) -> Option<&N::Value> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left().as_deref() {
            node = left;
        }
        Some(node.value())
    }

    pub fn max_value(&self) -> Option<&N::Value> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right().as_deref() {
            node = right;
        }
        Some(node.value())
    }

    /// Visit every node breadth-first (level order, not sorted order).
    pub fn traverse<V>(&self, mut visitor: V)
    where
        V: FnMut(NodeView<'_, N>),
    {
        let mut queue: VecDeque<&N> = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }

        while let Some(node) = queue.pop_front() {
            if let Some(left) = node.left().as_deref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right().as_deref() {
                queue.push_back(right);
            }
            visitor(NodeView::new(node));
        }
    }

    /// Detach every node, leaving the tree empty. Returned nodes have no
    /// children.
    pub(crate) fn drain_nodes(&mut self) -> Vec<Box<N>> {
        let mut nodes = Vec::with_capacity(self.count);
        let mut pending: Vec<Box<N>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left_mut().take());
            pending.extend(node.right_mut().take());
            nodes.push(node);
        }
        self.count = 0;
        nodes
    }

    /// Payloads in ascending order.
    pub fn iter(&self) -> InOrder<'_, N> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// True when every node satisfies the ordering and balance invariants
    /// and the stored heights and count are consistent.
    pub fn is_balanced(&self) -> bool {
        let mut nodes = 0;
        check_subtree(self.root.as_deref(), None, None, &mut nodes).is_some()
            && nodes == self.count
    }
}

/// In-order iterator returned by [`AvlTree::iter`].
pub struct InOrder<'a, N: Node> {
    stack: Vec<&'a N>,
}

impl<'a, N: Node> InOrder<'a, N> {
    fn push_left_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left().as_deref();
        }
    }
}

impl<'a, N: Node> Iterator for InOrder<'a, N> {
    type Item = &'a N::Value;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right().as_deref());
        Some(node.value())
    }
}

fn find_mut<'a, N: Node>(link: &'a mut Link<N>, value: &N::Value) -> Option<&'a mut N> {
    let node = link.as_deref_mut()?;
    match value.cmp(node.value()) {
        Ordering::Less => find_mut(node.left_mut(), value),
        Ordering::Greater => find_mut(node.right_mut(), value),
        Ordering::Equal => Some(node),
    }
}

fn insert_node<N, F>(link: Link<N>, value: N::Value, factory: &F, inserted: &mut bool) -> Box<N>
where
    N: Node,
    F: NodeFactory<N>,
{
    let mut node = match link {
        Some(node) => node,
        None => {
            *inserted = true;
            let mut leaf = factory.new_node(value);
            leaf.set_height(1);
            return Box::new(leaf);
        }
    };

    let side = match value.cmp(node.value()) {
        Ordering::Less => {
            let child = node.left_mut().take();
            *node.left_mut() = Some(insert_node(child, value, factory, inserted));
            Side::Left
        }
        Ordering::Greater => {
            let child = node.right_mut().take();
            *node.right_mut() = Some(insert_node(child, value, factory, inserted));
            Side::Right
        }
        Ordering::Equal => return node,
    };

    rebalance(node, side)
}

fn delete_node<N: Node>(link: Link<N>, value: &N::Value, deleted: &mut bool) -> Link<N> {
    let mut node = link?;

    let side = match value.cmp(node.value()) {
        Ordering::Less => {
            let child = node.left_mut().take();
            *node.left_mut() = delete_node(child, value, deleted);
            Side::Left
        }
        Ordering::Greater => {
            let child = node.right_mut().take();
            *node.right_mut() = delete_node(child, value, deleted);
            Side::Right
        }
        Ordering::Equal => {
            *deleted = true;
            match node.right_mut().take() {
                None => return node.left_mut().take(),
                Some(right) => {
                    // The in-order successor takes this node's place.
                    let (rest, mut successor) = take_min(right);
                    *successor.left_mut() = node.left_mut().take();
                    *successor.right_mut() = rest;
                    node = successor;
                    Side::Right
                }
            }
        }
    };

    // Shrinking one side is rebalanced like growing the other.
    Some(rebalance(node, side.opposite()))
}

/// Detach the leftmost node of `node`'s subtree.
fn take_min<N: Node>(mut node: Box<N>) -> (Link<N>, Box<N>) {
    match node.left_mut().take() {
        None => {
            let rest = node.right_mut().take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            *node.left_mut() = rest;
            (Some(rebalance(node, Side::Right)), min)
        }
    }
}

fn update_height<N: Node>(node: &mut N) {
    let height = link_height(node.left()).max(link_height(node.right())) + 1;
    node.set_height(height);
}

fn balance_factor<N: Node>(node: &N) -> isize {
    link_height(node.left()) as isize - link_height(node.right()) as isize
}

/// Restore balance at `node` after its `heavy` side grew taller.
fn rebalance<N: Node>(mut node: Box<N>, heavy: Side) -> Box<N> {
    let factor = balance_factor(&*node);
    if factor.abs() < 2 {
        update_height(&mut *node);
        return node;
    }
    debug_assert_eq!(heavy, if factor > 0 { Side::Left } else { Side::Right });

    match heavy {
        Side::Left => {
            let outer_taller = node
                .left()
                .as_deref()
                .is_some_and(|child| link_height(child.left()) >= link_height(child.right()));
            if outer_taller {
                rotate_right(node)
            } else {
                rotate_left_right(node)
            }
        }
        Side::Right => {
            let outer_taller = node
                .right()
                .as_deref()
                .is_some_and(|child| link_height(child.right()) >= link_height(child.left()));
            if outer_taller {
                rotate_left(node)
            } else {
                rotate_right_left(node)
            }
        }
    }
}

/// LL case: the left child becomes the subtree root.
fn rotate_right<N: Node>(mut node: Box<N>) -> Box<N> {
    let Some(mut new_root) = node.left_mut().take() else {
        return node;
    };
    *node.left_mut() = new_root.right_mut().take();
    update_height(&mut *node);
    *new_root.right_mut() = Some(node);
    update_height(&mut *new_root);
    new_root
}

/// RR case: the right child becomes the subtree root.
fn rotate_left<N: Node>(mut node: Box<N>) -> Box<N> {
    let Some(mut new_root) = node.right_mut().take() else {
        return node;
    };
    *node.right_mut() = new_root.left_mut().take();
    update_height(&mut *node);
    *new_root.left_mut() = Some(node);
    update_height(&mut *new_root);
    new_root
}

/// LR case.
fn rotate_left_right<N: Node>(mut node: Box<N>) -> Box<N> {
    if let Some(left) = node.left_mut().take() {
        *node.left_mut() = Some(rotate_left(left));
    }
    rotate_right(node)
}

/// RL case.
fn rotate_right_left<N: Node>(mut node: Box<N>) -> Box<N> {
    if let Some(right) = node.right_mut().take() {
        *node.right_mut() = Some(rotate_right(right));
    }
    rotate_left(node)
}

/// Returns the subtree height when the subtree is a valid AVL tree whose
/// payloads lie strictly between `lower` and `upper`.
fn check_subtree<N: Node>(
    node: Option<&N>,
    lower: Option<&N::Value>,
    upper: Option<&N::Value>,
    nodes: &mut usize,
) -> Option<usize> {
    let Some(node) = node else {
        return Some(0);
    };
    if lower.is_some_and(|lower| node.value() <= lower)
        || upper.is_some_and(|upper| node.value() >= upper)
    {
        return None;
    }
    *nodes += 1;

    let left = check_subtree(node.left().as_deref(), lower, Some(node.value()), nodes)?;
    let right = check_subtree(node.right().as_deref(), Some(node.value()), upper, nodes)?;
    let height = left.max(right) + 1;
    if left.abs_diff(right) > 1 || node.height() != height {
        return None;
    }
    Some(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(values: &[i32]) -> OrderedTree<i32> {
        let mut tree = OrderedTree::ordered();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    fn sorted(tree: &OrderedTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn test_insert_ignores_duplicates() {
        let tree = tree_of(&[6, 2, 2, 1, 3, 3, 7, 4, 4, 8]);
        assert_eq!(tree.count(), 7);
        assert_eq!(sorted(&tree), vec![1, 2, 3, 4, 6, 7, 8]);
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_ascending_inserts_stay_logarithmic() {
        let values: Vec<i32> = (0..1024).collect();
        let tree = tree_of(&values);
        assert_eq!(tree.count(), 1024);
        assert!(tree.is_balanced());
        // 1.44 * log2(1024) bounds an AVL tree of this size
        assert!(tree.height() <= 14);
    }

    #[test]
    fn test_single_rotations() {
        // LL
        let tree = tree_of(&[3, 2, 1]);
        let mut levels = Vec::new();
        tree.traverse(|view| levels.push((*view.value(), view.height())));
        assert_eq!(levels, vec![(2, 2), (1, 1), (3, 1)]);

        // RR
        let tree = tree_of(&[1, 2, 3]);
        let mut levels = Vec::new();
        tree.traverse(|view| levels.push(*view.value()));
        assert_eq!(levels, vec![2, 1, 3]);
    }

    #[test]
    fn test_double_rotations() {
        // LR
        let tree = tree_of(&[3, 1, 2]);
        let mut levels = Vec::new();
        tree.traverse(|view| levels.push(*view.value()));
        assert_eq!(levels, vec![2, 1, 3]);

        // RL
        let tree = tree_of(&[1, 3, 2]);
        let mut levels = Vec::new();
        tree.traverse(|view| levels.push(*view.value()));
        assert_eq!(levels, vec![2, 1, 3]);
    }

    #[test]
    fn test_delete_promotes_successor() {
        let mut tree = tree_of(&[6, 2, 2, 1, 3, 3, 7, 4, 4, 8]);

        tree.delete(&6);
        assert_eq!(sorted(&tree), vec![1, 2, 3, 4, 7, 8]);
        assert!(tree.is_balanced());

        tree.delete(&2);
        assert_eq!(sorted(&tree), vec![1, 3, 4, 7, 8]);
        assert_eq!(tree.count(), 5);
        assert_eq!(tree.max_value(), Some(&8));
        assert_eq!(tree.min_value(), Some(&1));
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut tree = tree_of(&[1, 2, 3]);
        tree.delete(&42);
        assert_eq!(tree.count(), 3);
        assert_eq!(sorted(&tree), vec![1, 2, 3]);
    }

    #[test]
    fn test_delete_rebalances_toward_heavy_side() {
        let mut tree = tree_of(&[5, 3, 8, 2, 4, 7, 9, 1]);
        tree.delete(&7);
        tree.delete(&9);
        assert!(tree.is_balanced());
        assert_eq!(sorted(&tree), vec![1, 2, 3, 4, 5, 8]);
    }

    #[test]
    fn test_delete_everything() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        for value in [4, 1, 7, 2, 6, 3, 5] {
            tree.delete(&value);
            assert!(tree.is_balanced());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.count(), 0);
        assert_eq!(tree.min_value(), None);
        assert_eq!(tree.max_value(), None);
    }

    #[test]
    fn test_update_replaces_value() {
        let mut tree = tree_of(&[1, 2, 3]);
        tree.update(10, &2);
        assert_eq!(sorted(&tree), vec![1, 3, 10]);

        // Absent old value still inserts the new one
        tree.update(20, &99);
        assert_eq!(sorted(&tree), vec![1, 3, 10, 20]);
    }

    #[test]
    fn test_search() {
        let tree = tree_of(&[10, 5, 15]);
        assert_eq!(tree.search(&5).map(|node| *node.value()), Some(5));
        assert!(tree.search(&6).is_none());
        assert!(OrderedTree::<i32>::ordered().search(&1).is_none());
    }

    #[test]
    fn test_search_mut_leaves_structure_intact() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.search_mut(&4).map(|node| *node.value()), Some(4));
        assert!(tree.search_mut(&8).is_none());
        assert_eq!(tree.count(), 7);
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_drain_nodes_empties_tree() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4]);
        let mut drained: Vec<i32> = tree
            .drain_nodes()
            .iter()
            .inspect(|node| assert!(node.left().is_none() && node.right().is_none()))
            .map(|node| *node.value())
            .collect();
        drained.sort_unstable();
        assert_eq!(drained, vec![1, 3, 4, 5, 8]);
        assert!(tree.is_empty());
        assert_eq!(tree.count(), 0);
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_traverse_counts_every_node() {
        let tree = tree_of(&[9, 4, 1, 12, 30, 7, 2]);
        let mut visited = 0;
        tree.traverse(|_| visited += 1);
        assert_eq!(visited, tree.count());
    }

    #[test]
    fn test_custom_factory() {
        let mut tree: AvlTree<DefaultNode<String>, _> =
            AvlTree::new(|word: String| DefaultNode::new(word.to_lowercase()));
        tree.insert("beta".to_string());
        tree.insert("alpha".to_string());
        tree.insert("gamma".to_string());
        assert_eq!(tree.count(), 3);
        assert_eq!(tree.min_value().map(String::as_str), Some("alpha"));
        assert_eq!(tree.max_value().map(String::as_str), Some("gamma"));
    }
}
